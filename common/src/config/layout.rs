//! Display and layout constants.
//!
//! # Pre-computed Layout
//!
//! The panel is an SSD1351 with 128x128 RAM of which a 128x96 window is
//! visible. Every region below is a compile-time `const` so the compositor
//! never recomputes geometry per frame.
//!
//! ```text
//!  y=0   +----------------------------------+
//!        |            (black)               |
//!  y=12  | FANS        | PUMPS              |  tile row 1 (19 px)
//!  y=33  | PROBES      | FLOW               |  tile row 2 (19 px)
//!  y=54  |==================================|  divider
//!  y=56  |50 |  chart (108 x 30)            |
//!  y=85  |20 |                              |
//!  y=87  | 192.168.1.20  (status bar)       |
//!  y=95  +----------------------------------+
//! ```

use embedded_graphics::prelude::{Point, Size};
use embedded_graphics::primitives::Rectangle;

// =============================================================================
// Display
// =============================================================================

/// Visible display width in pixels.
pub const SCREEN_WIDTH: u32 = 128;

/// Visible display height in pixels.
pub const SCREEN_HEIGHT: u32 = 96;

/// Pixel count of one frame.
pub const FRAME_PIXELS: usize = (SCREEN_WIDTH * SCREEN_HEIGHT) as usize;

/// Whole-screen rectangle, used for bounds checks.
pub const SCREEN: Rectangle = Rectangle::new(Point::new(0, 0), Size::new(SCREEN_WIDTH, SCREEN_HEIGHT));

// =============================================================================
// Tiles
// =============================================================================

/// Number of metric tiles (fans, pumps, probes, flow).
pub const TILE_COUNT: usize = 4;

/// Number of tile status levels (no signal, ok, warn, bad).
pub const STATUS_COUNT: usize = 4;

/// Icon frames are square bitmaps of this edge length.
pub const ICON_SIZE: u32 = 16;

/// Pixel count of one icon frame.
pub const ICON_PIXELS: usize = (ICON_SIZE * ICON_SIZE) as usize;

/// Upper bound on animation frames per (tile, status).
pub const MAX_FRAMES: usize = 8;

/// Icon offset from the tile's top-left corner.
pub const ICON_INSET: Point = Point::new(2, 2);

/// Gap between the icon's right edge and the tile text.
pub const TEXT_GAP: i32 = 3;

/// Height of a tile row.
pub const TILE_HEIGHT: u32 = 19;

const TILE_ROW_1: i32 = 12;
const TILE_ROW_2: i32 = TILE_ROW_1 + TILE_HEIGHT as i32 + 2;
const TILE_COL_2: i32 = 64;

/// Fans tile (top left).
pub const FANS_AREA: Rectangle = Rectangle::new(Point::new(0, TILE_ROW_1), Size::new(62, TILE_HEIGHT));

/// Pumps tile (top right).
pub const PUMPS_AREA: Rectangle = Rectangle::new(Point::new(TILE_COL_2, TILE_ROW_1), Size::new(60, TILE_HEIGHT));

/// Probes tile (bottom left).
pub const PROBES_AREA: Rectangle = Rectangle::new(Point::new(0, TILE_ROW_2), Size::new(62, TILE_HEIGHT));

/// Flow tile (bottom right).
pub const FLOW_AREA: Rectangle = Rectangle::new(Point::new(TILE_COL_2, TILE_ROW_2), Size::new(60, TILE_HEIGHT));

// =============================================================================
// Chrome
// =============================================================================

/// White working area behind the chart and status bar.
pub const WORK_AREA: Rectangle = Rectangle::new(Point::new(0, 12), Size::new(124, 84));

/// Black inner area of the working frame.
pub const INNER_AREA: Rectangle = Rectangle::new(Point::new(1, 13), Size::new(122, 74));

/// Black band above the divider that the tiles sit on.
pub const TILE_BAND: Rectangle = Rectangle::new(Point::new(0, 0), Size::new(124, 54));

/// Row of the white divider between tiles and chart.
pub const DIVIDER_Y: i32 = 54;

/// Horizontal extent of the divider.
pub const DIVIDER_X: (i32, i32) = (1, 122);

// =============================================================================
// Chart
// =============================================================================

/// Pixel columns dedicated to the chart; one column per stored sample.
pub const CHART_COLUMNS: usize = 108;

/// Chart plot area. Bars grow upward from the bottom edge.
pub const CHART_AREA: Rectangle = Rectangle::new(Point::new(14, 56), Size::new(CHART_COLUMNS as u32, 30));

/// Left edge of the axis labels.
pub const AXIS_LABEL_X: i32 = 2;

// =============================================================================
// Status Bar
// =============================================================================

/// Maximum status text length in bytes.
pub const STATUS_TEXT_LEN: usize = 32;

/// Bottom status bar that carries the network address.
pub const STATUS_BAR_AREA: Rectangle = Rectangle::new(Point::new(1, 87), Size::new(122, 8));

/// Horizontal padding inside the status bar.
pub const STATUS_TEXT_INSET: i32 = 1;
