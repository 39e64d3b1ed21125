//! Metric tile box: status fill, icon, name and status label.

use embedded_graphics::mono_font::MonoTextStyle;
use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::{PrimitiveStyle, Rectangle};
use embedded_graphics::text::Text;

use crate::assets::FrameAsset;
use crate::config::layout::TEXT_GAP;
use crate::config::{ICON_INSET, ICON_SIZE, Palette};
use crate::styles::{BOTTOM_LEFT, TILE_FONT, TOP_LEFT};
use crate::tiles::TileSnapshot;

/// Draw one tile into `area`. Nothing is drawn outside the box.
pub fn draw_tile<D>(
    display: &mut D,
    area: &Rectangle,
    tile: &TileSnapshot,
    icon: &FrameAsset,
    palette: &Palette,
) where
    D: DrawTarget<Color = Rgb565>,
{
    let mut clipped = display.clipped(area);

    area.into_styled(PrimitiveStyle::with_fill(palette.tile_fill(tile.status)))
        .draw(&mut clipped)
        .ok();

    let icon_origin = area.top_left + ICON_INSET;
    clipped
        .fill_contiguous(
            &Rectangle::new(icon_origin, Size::new(ICON_SIZE, ICON_SIZE)),
            icon.pixels().iter().copied(),
        )
        .ok();

    let text_x = icon_origin.x + ICON_SIZE as i32 + TEXT_GAP;
    let text_style = MonoTextStyle::new(TILE_FONT, palette.tile_text(tile.status));
    Text::with_text_style(tile.id.label(), Point::new(text_x, area.top_left.y + 1), text_style, TOP_LEFT)
        .draw(&mut clipped)
        .ok();

    let bottom = area.top_left.y + area.size.height as i32 - 1;
    Text::with_text_style(tile.status.label(), Point::new(text_x, bottom), text_style, BOTTOM_LEFT)
        .draw(&mut clipped)
        .ok();
}
