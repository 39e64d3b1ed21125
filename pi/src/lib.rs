//! Raspberry Pi support for the CWCU dashboard.
//!
//! - [`ssd1351`]: SSD1351 OLED transport over any `embedded-hal` 1.0 SPI device
//! - [`assets`]: BMP icon loader
//! - [`display`]: Wiring defaults and environment overrides
//!
//! Everything here is hardware-agnostic and tested on the host; the Linux
//! binary in `main.rs` wires it to spidev and sysfs GPIO.

// Crate-level lints
#![allow(clippy::cast_possible_truncation)]

pub mod assets;
pub mod display;
pub mod ssd1351;

pub use assets::BmpAssetLoader;
pub use display::PiSettings;
pub use ssd1351::{PanelConfig, Ssd1351};
