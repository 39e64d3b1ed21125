//! Color constants for the CWCU dashboard.
//!
//! The SSD1351 is driven in 65k-color mode, so everything is expressed as
//! `Rgb565` (5 bits red, 6 bits green, 5 bits blue). Standard colors come from
//! the `RgbColor` trait constants; the rest are tuned for the small OLED,
//! where full-brightness fills look harsh next to white chrome.

use embedded_graphics::pixelcolor::{Rgb565, RgbColor};

// =============================================================================
// Standard Colors (from RgbColor trait)
// =============================================================================

/// Pure black. Panel background and text on light fills.
pub const BLACK: Rgb565 = Rgb565::BLACK;

/// Pure white. Working-area frame, divider and status bar.
pub const WHITE: Rgb565 = Rgb565::WHITE;

/// Pure red. Icon strokes for tiles in the `Bad` state.
pub const RED: Rgb565 = Rgb565::RED;

/// Pure yellow. Icon strokes for tiles in the `Warn` state.
pub const YELLOW: Rgb565 = Rgb565::YELLOW;

/// Pure cyan. Temperature chart bars.
pub const CYAN: Rgb565 = Rgb565::CYAN;

// =============================================================================
// Custom Colors
// =============================================================================

/// Mid gray tile fill for `NoSignal`.
/// RGB565: (16, 32, 16).
pub const GRAY: Rgb565 = Rgb565::new(16, 32, 16);

/// Dark gray for the chart axis and `NoSignal` icon strokes.
/// RGB565: (8, 16, 8) - roughly 25% brightness.
pub const DARK_GRAY: Rgb565 = Rgb565::new(8, 16, 8);

/// Muted green tile fill for `Ok`.
/// RGB565: (4, 40, 6).
pub const DARK_GREEN: Rgb565 = Rgb565::new(4, 40, 6);

/// Bright green icon strokes for `Ok`.
pub const GREEN: Rgb565 = Rgb565::GREEN;

/// Orange tile fill for `Warn`.
/// RGB565: (31, 32, 0) - slightly darker than yellow.
pub const ORANGE: Rgb565 = Rgb565::new(31, 32, 0);

/// Deep red tile fill for `Bad`. Paired with white text.
/// RGB565: (24, 4, 2).
pub const DARK_RED: Rgb565 = Rgb565::new(24, 4, 2);
