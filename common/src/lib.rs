//! Rendering and animation engine for the CWCU cooling-unit dashboard.
//!
//! This crate contains the platform-agnostic core shared between the
//! desktop simulator and the Raspberry Pi build:
//!
//! - [`colors`]: RGB565 color constants for the panel
//! - [`config`]: Layout constants and the startup [`DisplayConfig`]
//! - [`tiles`]: Metric tiles and the [`TileAnimator`]
//! - [`scroll`]: Fixed-capacity temperature history ([`ScrollBuffer`])
//! - [`source`]: Temperature sample sources
//! - [`assets`]: Icon frames, asset tables and the procedural loader
//! - [`framebuffer`]: Owned frame buffer handed to the transport
//! - [`widgets`]: Drawing routines for each layer of the dashboard
//! - [`compositor`]: Builds a complete frame from tiles, chart and status text
//! - [`scheduler`]: Tick pipeline, frame pacing and shutdown
//! - [`transport`]: Display transport contract
//!
//! # no_std Compatibility
//!
//! The crate is `no_std` by default. The `std` feature adds a wall clock
//! ([`clock::StdClock`]) and the network-address status source
//! ([`network::LocalAddress`]).

#![cfg_attr(not(any(test, feature = "std")), no_std)]
// Crate-level lints
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::cast_possible_wrap)]
#![allow(clippy::cast_sign_loss)]

pub mod assets;
pub mod colors;
pub mod compositor;
pub mod config;
pub mod error;
pub mod framebuffer;
pub mod scheduler;
pub mod scroll;
pub mod source;
pub mod styles;
pub mod tiles;
pub mod transport;
pub mod widgets;

#[cfg(feature = "std")]
pub mod clock;
#[cfg(feature = "std")]
pub mod network;

// Re-export commonly used items
pub use assets::{AssetLoader, AssetTable, Assets, FrameAsset, ProceduralAssets};
pub use compositor::compose;
pub use config::DisplayConfig;
pub use error::StartupError;
pub use framebuffer::FrameBuffer;
pub use scheduler::{Clock, SchedulerState, StaticStatus, StatusSource, TickScheduler};
pub use scroll::ScrollBuffer;
pub use source::{RandomWalk, SampleSource, SequenceSource};
pub use tiles::{Status, TileAnimator, TileId, TileSnapshot};
pub use transport::{DisplayTransport, TransportError};
