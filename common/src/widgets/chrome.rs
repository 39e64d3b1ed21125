//! Static background: working-area frame, divider and status-bar strip.

use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::{Line, PrimitiveStyle, Rectangle};

use crate::config::Palette;
use crate::config::layout::{DIVIDER_X, DIVIDER_Y, INNER_AREA, TILE_BAND, WORK_AREA};

/// Clear the display and draw the static chrome.
///
/// The working area is a chrome-colored frame with a background-colored
/// interior; the tile band above the divider stays background-colored.
pub fn draw_chrome<D>(
    display: &mut D,
    status_bar: &Rectangle,
    palette: &Palette,
) where
    D: DrawTarget<Color = Rgb565>,
{
    let background = PrimitiveStyle::with_fill(palette.background);
    let chrome = PrimitiveStyle::with_fill(palette.chrome);

    display.clear(palette.background).ok();

    WORK_AREA.into_styled(chrome).draw(display).ok();
    INNER_AREA.into_styled(background).draw(display).ok();
    TILE_BAND.into_styled(background).draw(display).ok();

    Line::new(Point::new(DIVIDER_X.0, DIVIDER_Y), Point::new(DIVIDER_X.1, DIVIDER_Y))
        .into_styled(PrimitiveStyle::with_stroke(palette.chrome, 1))
        .draw(display)
        .ok();

    status_bar
        .into_styled(PrimitiveStyle::with_fill(palette.status_bar))
        .draw(display)
        .ok();
}
