//! Startup-time errors.
//!
//! Everything in here is fatal: it is raised while the configuration and the
//! asset table are checked, before the scheduler exists. Per-tick failures are
//! [`TransportError`](crate::transport::TransportError)s and never end up here.

use thiserror::Error;

use crate::tiles::{Status, TileId};

/// A configuration or asset problem that prevents the dashboard from starting.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum StartupError {
    #[error("no frame asset for {tile:?}/{status:?} phase {phase}")]
    MissingAsset { tile: TileId, status: Status, phase: u8 },

    #[error("{tile:?} has {count} animation frames, expected 1..=8")]
    InvalidFrameCount { tile: TileId, count: u8 },

    #[error("tile table out of order: expected {expected:?}, found {found:?}")]
    TileOrder { expected: TileId, found: TileId },

    #[error("{tile:?} tile is too small to hold its icon")]
    TileTooSmall { tile: TileId },

    #[error("{region} lies outside the display")]
    OutOfBounds { region: &'static str },

    #[error("{a:?} tile overlaps {b:?} tile")]
    OverlappingTiles { a: TileId, b: TileId },

    #[error("temperature labels must lie in (-1000, 1000) with min < max (min {min}, max {max})")]
    InvalidLabels { min: f32, max: f32 },

    #[error("temperature walk needs finite values, a non-negative step and floor <= ceiling")]
    InvalidWalk,

    #[error("tick interval must be non-zero")]
    ZeroTickInterval,

    #[error("chart is {columns} columns wide but the scroll buffer holds {capacity} samples")]
    ChartCapacity { columns: u32, capacity: usize },

    #[error("asset loading failed: {0}")]
    AssetLoad(&'static str),
}
