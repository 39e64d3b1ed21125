//! Bottom status bar (network address or other short text).

use embedded_graphics::mono_font::MonoTextStyle;
use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::{PrimitiveStyle, Rectangle};
use embedded_graphics::text::Text;

use crate::config::Palette;
use crate::config::layout::STATUS_TEXT_INSET;
use crate::styles::{SMALL_FONT, TOP_LEFT};

/// Longest prefix of `text` that fits in `width` pixels of `SMALL_FONT`.
///
/// Counts characters, not bytes, so the cut always lands on a char boundary.
pub fn truncate_to_width(
    text: &str,
    width: u32,
) -> &str {
    let advance = SMALL_FONT.character_size.width + SMALL_FONT.character_spacing;
    let max_chars = (width / advance.max(1)) as usize;
    match text.char_indices().nth(max_chars) {
        Some((cut, _)) => &text[..cut],
        None => text,
    }
}

/// Fill the bar and draw `text` left-aligned inside it.
///
/// Text that does not fit is truncated to the bar's character capacity, and
/// the drawing is clipped to `area` as well.
pub fn draw_status_bar<D>(
    display: &mut D,
    area: &Rectangle,
    text: &str,
    palette: &Palette,
) where
    D: DrawTarget<Color = Rgb565>,
{
    let mut clipped = display.clipped(area);

    area.into_styled(PrimitiveStyle::with_fill(palette.status_bar))
        .draw(&mut clipped)
        .ok();

    let inner_width = area.size.width.saturating_sub(2 * STATUS_TEXT_INSET as u32);
    let visible = truncate_to_width(text, inner_width);
    if visible.is_empty() {
        return;
    }

    let y_pad = area.size.height.saturating_sub(SMALL_FONT.character_size.height) as i32 / 2;
    let origin = area.top_left + Point::new(STATUS_TEXT_INSET, y_pad);
    Text::with_text_style(visible, origin, MonoTextStyle::new(SMALL_FONT, palette.status_text), TOP_LEFT)
        .draw(&mut clipped)
        .ok();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{DisplayConfig, STATUS_BAR_AREA};
    use crate::framebuffer::FrameBuffer;

    #[test]
    fn test_truncate_by_chars() {
        assert_eq!(truncate_to_width("192.168.1.20", 120), "192.168.1.20");
        assert_eq!(truncate_to_width("abcdefgh", 16), "abcd");
        assert_eq!(truncate_to_width("ééééé", 8), "éé");
        assert_eq!(truncate_to_width("anything", 0), "");
    }

    #[test]
    fn test_status_text_drawn_inside_bar() {
        let palette = DisplayConfig::DEFAULT.palette;
        let mut frame = FrameBuffer::new(Rgb565::RED);
        draw_status_bar(&mut frame, &STATUS_BAR_AREA, "10.0.0.7", &palette);

        let inked = frame.pixels().iter().filter(|&&p| p == palette.status_text).count();
        assert!(inked > 0);
        assert_eq!(frame.pixel(Point::new(0, 87)), Some(Rgb565::RED));
    }

    #[test]
    fn test_long_text_never_leaves_bar() {
        let palette = DisplayConfig::DEFAULT.palette;
        let text = "a very long status message that will never fit on a 128 pixel panel ünïcödé";
        let mut frame = FrameBuffer::new(Rgb565::RED);
        draw_status_bar(&mut frame, &STATUS_BAR_AREA, text, &palette);

        for (i, &p) in frame.pixels().iter().enumerate() {
            let point = Point::new((i % 128) as i32, (i / 128) as i32);
            if !STATUS_BAR_AREA.contains(point) {
                assert_eq!(p, Rgb565::RED, "pixel {point:?} outside the bar was drawn");
            }
        }
    }
}
