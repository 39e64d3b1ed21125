//! Startup configuration.
//!
//! - `layout`: Display dimensions and pre-computed layout constants
//!
//! [`DisplayConfig`] gathers everything that is fixed when the process starts:
//! tick cadence, chart calibration labels, the tile layout table, the palette
//! and the synthetic temperature walk. It is validated once with
//! [`DisplayConfig::validate`] and then shared read-only by every component.

pub mod layout;

use core::time::Duration;

use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::Size;
use embedded_graphics::primitives::Rectangle;

pub use layout::{
    CHART_AREA,
    CHART_COLUMNS,
    FLOW_AREA,
    FANS_AREA,
    FRAME_PIXELS,
    ICON_INSET,
    ICON_PIXELS,
    ICON_SIZE,
    MAX_FRAMES,
    PROBES_AREA,
    PUMPS_AREA,
    SCREEN,
    SCREEN_HEIGHT,
    SCREEN_WIDTH,
    STATUS_BAR_AREA,
    STATUS_COUNT,
    STATUS_TEXT_LEN,
    TILE_COUNT,
};

use crate::colors::{BLACK, CYAN, DARK_GRAY, DARK_GREEN, DARK_RED, GRAY, GREEN, ORANGE, RED, WHITE, YELLOW};
use crate::error::StartupError;
use crate::tiles::{Status, TileId};

// =============================================================================
// Defaults
// =============================================================================

/// Default tick period (5 FPS).
pub const TICK_INTERVAL: Duration = Duration::from_millis(200);

/// Default status-text refresh period.
pub const STATUS_REFRESH: Duration = Duration::from_secs(1);

/// Default temperature mapped to an empty bar.
pub const TEMP_MIN_LABEL: f32 = 20.0;

/// Default temperature mapped to a full-height bar.
pub const TEMP_MAX_LABEL: f32 = 50.0;

// =============================================================================
// Configuration Types
// =============================================================================

/// Placement and animation length of one metric tile.
#[derive(Clone, Copy, PartialEq, Debug)]
pub struct TileLayout {
    pub id: TileId,
    pub area: Rectangle,
    /// Animation frames per status; the tile's phase wraps at this count.
    pub frame_count: u8,
}

/// Colors used by the compositor and the procedural icon loader.
///
/// Per-status arrays are indexed by [`Status::index`].
#[derive(Clone, Copy, PartialEq, Debug)]
pub struct Palette {
    pub background: Rgb565,
    pub chrome: Rgb565,
    pub tile_fill: [Rgb565; STATUS_COUNT],
    pub tile_text: [Rgb565; STATUS_COUNT],
    pub icon: [Rgb565; STATUS_COUNT],
    pub chart_bar: Rgb565,
    pub axis: Rgb565,
    pub axis_text: Rgb565,
    pub status_bar: Rgb565,
    pub status_text: Rgb565,
}

impl Palette {
    /// Fill color of a tile in the given status.
    #[inline]
    pub const fn tile_fill(
        &self,
        status: Status,
    ) -> Rgb565 {
        self.tile_fill[status.index()]
    }

    /// Text color of a tile in the given status.
    #[inline]
    pub const fn tile_text(
        &self,
        status: Status,
    ) -> Rgb565 {
        self.tile_text[status.index()]
    }

    /// Icon stroke color for the given status.
    #[inline]
    pub const fn icon(
        &self,
        status: Status,
    ) -> Rgb565 {
        self.icon[status.index()]
    }
}

/// Parameters of the synthetic temperature walk.
#[derive(Clone, Copy, PartialEq, Debug)]
pub struct WalkConfig {
    /// Sample used as "previous" for the first tick.
    pub initial: f32,
    /// Largest step between consecutive samples.
    pub max_step: f32,
    /// Hard lower bound of the walk.
    pub floor: f32,
    /// Hard upper bound of the walk.
    pub ceiling: f32,
}

/// Immutable dashboard configuration, fixed at startup.
#[derive(Clone, Copy, PartialEq, Debug)]
pub struct DisplayConfig {
    pub tick_interval: Duration,
    pub status_refresh: Duration,
    pub temp_min_label: f32,
    pub temp_max_label: f32,
    /// Tile table in [`TileId::ALL`] order.
    pub tiles: [TileLayout; TILE_COUNT],
    pub chart: Rectangle,
    pub status_bar: Rectangle,
    pub palette: Palette,
    pub walk: WalkConfig,
}

impl DisplayConfig {
    /// The shipped dashboard: 5 FPS, 20..50 °C chart, 2x2 tile grid.
    pub const DEFAULT: Self = Self {
        tick_interval: TICK_INTERVAL,
        status_refresh: STATUS_REFRESH,
        temp_min_label: TEMP_MIN_LABEL,
        temp_max_label: TEMP_MAX_LABEL,
        tiles: [
            TileLayout {
                id: TileId::Fans,
                area: FANS_AREA,
                frame_count: 4,
            },
            TileLayout {
                id: TileId::Pumps,
                area: PUMPS_AREA,
                frame_count: 2,
            },
            TileLayout {
                id: TileId::Probes,
                area: PROBES_AREA,
                frame_count: 2,
            },
            TileLayout {
                id: TileId::Flow,
                area: FLOW_AREA,
                frame_count: 3,
            },
        ],
        chart: CHART_AREA,
        status_bar: STATUS_BAR_AREA,
        palette: Palette {
            background: BLACK,
            chrome: WHITE,
            tile_fill: [GRAY, DARK_GREEN, ORANGE, DARK_RED],
            tile_text: [BLACK, BLACK, BLACK, WHITE],
            icon: [DARK_GRAY, GREEN, YELLOW, RED],
            chart_bar: CYAN,
            axis: DARK_GRAY,
            axis_text: WHITE,
            status_bar: WHITE,
            status_text: BLACK,
        },
        walk: WalkConfig {
            initial: 30.0,
            max_step: 1.5,
            floor: 15.0,
            ceiling: 55.0,
        },
    };

    /// Layout entry for a tile.
    #[inline]
    pub const fn tile(
        &self,
        id: TileId,
    ) -> &TileLayout {
        &self.tiles[id.index()]
    }

    /// Frame counts in [`TileId::ALL`] order.
    pub fn frame_counts(&self) -> [u8; TILE_COUNT] { self.tiles.map(|tile| tile.frame_count) }

    /// Number of ticks between status-text polls (at least 1).
    pub fn status_refresh_ticks(&self) -> u32 {
        let tick_ms = self.tick_interval.as_millis().max(1);
        let ticks = self.status_refresh.as_millis() / tick_ms;
        ticks.clamp(1, u128::from(u32::MAX)) as u32
    }

    /// Check the configuration before anything is built from it.
    ///
    /// `chart_capacity` is the scroll buffer capacity the scheduler will use;
    /// it must match the chart's pixel-column count.
    pub fn validate(
        &self,
        chart_capacity: usize,
    ) -> Result<(), StartupError> {
        if self.tick_interval.is_zero() {
            return Err(StartupError::ZeroTickInterval);
        }

        let (min, max) = (self.temp_min_label, self.temp_max_label);
        if !min.is_finite()
            || !max.is_finite()
            || min >= max
            || min <= -LABEL_LIMIT
            || max >= LABEL_LIMIT
        {
            return Err(StartupError::InvalidLabels { min, max });
        }

        let walk = &self.walk;
        if ![walk.initial, walk.max_step, walk.floor, walk.ceiling]
            .iter()
            .all(|v| v.is_finite())
            || walk.max_step < 0.0
            || walk.floor > walk.ceiling
        {
            return Err(StartupError::InvalidWalk);
        }

        for (expected, tile) in TileId::ALL.iter().zip(self.tiles.iter()) {
            if tile.id != *expected {
                return Err(StartupError::TileOrder {
                    expected: *expected,
                    found: tile.id,
                });
            }
            if tile.frame_count == 0 || usize::from(tile.frame_count) > MAX_FRAMES {
                return Err(StartupError::InvalidFrameCount {
                    tile: tile.id,
                    count: tile.frame_count,
                });
            }
            if !within_screen(&tile.area) {
                return Err(StartupError::OutOfBounds { region: tile.id.label() });
            }
            let needed = Size::new(ICON_INSET.x as u32 + ICON_SIZE, ICON_INSET.y as u32 + ICON_SIZE);
            if tile.area.size.width < needed.width || tile.area.size.height < needed.height {
                return Err(StartupError::TileTooSmall { tile: tile.id });
            }
        }

        for (i, a) in self.tiles.iter().enumerate() {
            for b in &self.tiles[i + 1..] {
                if !is_empty(&a.area.intersection(&b.area)) {
                    return Err(StartupError::OverlappingTiles { a: a.id, b: b.id });
                }
            }
        }

        if !within_screen(&self.chart) {
            return Err(StartupError::OutOfBounds { region: "chart" });
        }
        if self.chart.size.width as usize != chart_capacity {
            return Err(StartupError::ChartCapacity {
                columns: self.chart.size.width,
                capacity: chart_capacity,
            });
        }

        if !within_screen(&self.status_bar) {
            return Err(StartupError::OutOfBounds { region: "status bar" });
        }

        Ok(())
    }
}

impl Default for DisplayConfig {
    fn default() -> Self { Self::DEFAULT }
}

/// Calibration labels must stay strictly inside `±LABEL_LIMIT` to fit the axis.
pub const LABEL_LIMIT: f32 = 1000.0;

/// Zero width or zero height.
const fn is_empty(area: &Rectangle) -> bool { area.size.width == 0 || area.size.height == 0 }

/// Non-empty and entirely on screen.
fn within_screen(area: &Rectangle) -> bool { !is_empty(area) && SCREEN.intersection(area) == *area }

// =============================================================================
// Unit Tests
// =============================================================================
