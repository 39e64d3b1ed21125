//! Frame composition.
//!
//! [`compose`] is a pure function of its inputs: it allocates a fresh
//! [`FrameBuffer`] and draws every layer in a fixed z-order:
//!
//! 1. Background clear and static chrome
//! 2. Temperature chart (bars, axis, labels, latest reading)
//! 3. Tile boxes (fill, icon, name, status label)
//! 4. Status bar text
//!
//! Tile state is passed in as snapshots, never read from the animator, so two
//! calls with equal inputs produce byte-identical frames.

use crate::assets::Assets;
use crate::config::{DisplayConfig, TILE_COUNT};
use crate::framebuffer::FrameBuffer;
use crate::scroll::ScrollBuffer;
use crate::tiles::TileSnapshot;
use crate::widgets::{draw_chart, draw_chrome, draw_status_bar, draw_tile};

/// Build one complete frame.
pub fn compose<const N: usize>(
    tiles: &[TileSnapshot; TILE_COUNT],
    chart: &ScrollBuffer<N>,
    status_text: &str,
    config: &DisplayConfig,
    assets: &Assets,
) -> FrameBuffer {
    let palette = &config.palette;
    let mut frame = FrameBuffer::new(palette.background);

    draw_chrome(&mut frame, &config.status_bar, palette);

    let heights = chart.bar_heights(config.temp_min_label, config.temp_max_label, config.chart.size.height);
    draw_chart(
        &mut frame,
        &config.chart,
        &heights,
        chart.latest(),
        (config.temp_min_label, config.temp_max_label),
        palette,
    );

    for tile in tiles {
        let icon = assets.frame(tile.id, tile.status, tile.phase);
        draw_tile(&mut frame, &config.tile(tile.id).area, tile, icon, palette);
    }

    draw_status_bar(&mut frame, &config.status_bar, status_text, palette);

    frame
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use embedded_graphics::prelude::*;
    use embedded_graphics::primitives::Rectangle;

    use super::*;
    use crate::assets::{AssetLoader, ProceduralAssets};
    use crate::config::{CHART_COLUMNS, ICON_INSET};
    use crate::tiles::{Status, TileAnimator, TileId};

    fn assets() -> Assets {
        let config = DisplayConfig::DEFAULT;
        ProceduralAssets::new(&config).load().unwrap().validate(&config).unwrap()
    }

    fn chart_with(samples: &[f32]) -> ScrollBuffer<CHART_COLUMNS> {
        let mut chart = ScrollBuffer::new();
        for &sample in samples {
            chart.push(sample);
        }
        chart
    }

    #[test]
    fn test_compose_is_pure() {
        let config = DisplayConfig::DEFAULT;
        let assets = assets();
        let animator = TileAnimator::from_config(&config);
        animator.set_status(TileId::Pumps, Status::Bad);
        animator.advance();
        let tiles = animator.snapshot();
        let chart = chart_with(&[21.0, 35.5, 49.0, 60.0]);

        let a = compose(&tiles, &chart, "192.168.1.20", &config, &assets);
        let b = compose(&tiles, &chart, "192.168.1.20", &config, &assets);
        assert!(a.be_bytes().eq(b.be_bytes()));
    }

    #[test]
    fn test_empty_chart_draws_no_bars() {
        let config = DisplayConfig::DEFAULT;
        let tiles = TileAnimator::from_config(&config).snapshot();
        let frame = compose(&tiles, &chart_with(&[]), "", &config, &assets());

        let bars = config
            .chart
            .points()
            .filter(|&p| frame.pixel(p) == Some(config.palette.chart_bar))
            .count();
        assert_eq!(bars, 0);
    }

    #[test]
    fn test_tile_reflects_status() {
        let config = DisplayConfig::DEFAULT;
        let animator = TileAnimator::from_config(&config);
        animator.set_status(TileId::Flow, Status::Warn);
        let frame = compose(&animator.snapshot(), &chart_with(&[30.0]), "x", &config, &assets());

        let flow = config.tile(TileId::Flow).area;
        let probe = flow.top_left + Point::new(1, 1);
        assert_eq!(frame.pixel(probe), Some(config.palette.tile_fill(Status::Warn)));
        let fans = config.tile(TileId::Fans).area.top_left + Point::new(1, 1);
        assert_eq!(frame.pixel(fans), Some(config.palette.tile_fill(Status::NoSignal)));
    }

    #[test]
    fn test_icon_follows_phase() {
        let config = DisplayConfig::DEFAULT;
        let assets = assets();
        let animator = TileAnimator::from_config(&config);
        let chart = chart_with(&[]);

        let before = compose(&animator.snapshot(), &chart, "", &config, &assets);
        animator.advance();
        let after = compose(&animator.snapshot(), &chart, "", &config, &assets);

        let icon_area = Rectangle::new(
            config.tile(TileId::Fans).area.top_left + ICON_INSET,
            Size::new(16, 16),
        );
        assert!(icon_area.points().any(|p| before.pixel(p) != after.pixel(p)));
    }

    #[test]
    fn test_full_chart_newest_on_right() {
        let config = DisplayConfig::DEFAULT;
        let mut chart = chart_with(&[20.0; CHART_COLUMNS]);
        chart.push(50.0);
        let frame = compose(&TileAnimator::from_config(&config).snapshot(), &chart, "", &config, &assets());

        let right = config.chart.top_left.x + config.chart.size.width as i32 - 1;
        let bottom = config.chart.top_left.y + config.chart.size.height as i32 - 1;
        assert_eq!(frame.pixel(Point::new(right, bottom)), Some(config.palette.chart_bar));
        assert_ne!(frame.pixel(Point::new(right - 1, bottom)), Some(config.palette.chart_bar));
    }

    #[test]
    fn test_any_status_text_is_safe() {
        let config = DisplayConfig::DEFAULT;
        let tiles = TileAnimator::from_config(&config).snapshot();
        let chart = chart_with(&[f32::NAN, f32::INFINITY, -1.0e9]);
        for text in ["", "No IP", "€€€€€€€€€€€€€€€€€€€€€€€€€€€€€€€€€€€€€€€€", "\n\t\0"] {
            let _ = compose(&tiles, &chart, text, &config, &assets());
        }
    }
}
