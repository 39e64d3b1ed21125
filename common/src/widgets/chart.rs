//! Scrolling temperature bar chart.

use core::fmt::Write;

use embedded_graphics::mono_font::MonoTextStyle;
use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::{Line, PrimitiveStyle, Rectangle};
use embedded_graphics::text::Text;
use heapless::String;

use crate::config::Palette;
use crate::config::layout::AXIS_LABEL_X;
use crate::styles::{BOTTOM_LEFT, SMALL_FONT, TOP_LEFT, TOP_RIGHT};

/// Format a reading as `"31.4C"`. Non-finite values render as `"--.-C"`.
pub fn format_reading(celsius: f32) -> String<8> {
    let mut text = String::new();
    if celsius > -1000.0 && celsius < 1000.0 {
        let _ = write!(text, "{celsius:.1}C");
    } else {
        let _ = text.push_str("--.-C");
    }
    text
}

/// Format an axis label as a whole number. Labels too wide for the axis
/// render as `"--"`.
pub fn format_label(celsius: f32) -> String<8> {
    let mut text = String::new();
    if write!(text, "{celsius:.0}").is_err() {
        text.clear();
        let _ = text.push_str("--");
    }
    text
}

/// Draw the chart: one 1px bar per height, newest on the right edge.
///
/// `heights` are oldest first, as produced by
/// [`ScrollBuffer::bar_heights`](crate::scroll::ScrollBuffer::bar_heights).
/// Bars are right-aligned, so a partly filled buffer leaves the left side of
/// the chart blank. The y-axis runs one pixel left of `area`, with the
/// calibration labels to its left and the latest reading in the top-right
/// corner.
pub fn draw_chart<D>(
    display: &mut D,
    area: &Rectangle,
    heights: &[u32],
    latest: Option<f32>,
    labels: (f32, f32),
    palette: &Palette,
) where
    D: DrawTarget<Color = Rgb565>,
{
    let width = area.size.width as usize;
    let height = area.size.height;
    let bottom = area.top_left.y + height as i32 - 1;
    let right = area.top_left.x + width as i32 - 1;

    // Bars
    let visible = &heights[heights.len().saturating_sub(width)..];
    let first_x = right - visible.len() as i32 + 1;
    let bar_style = PrimitiveStyle::with_fill(palette.chart_bar);
    for (i, &bar) in visible.iter().enumerate() {
        let bar = bar.min(height);
        if bar == 0 {
            continue;
        }
        Rectangle::new(Point::new(first_x + i as i32, bottom - bar as i32 + 1), Size::new(1, bar))
            .into_styled(bar_style)
            .draw(display)
            .ok();
    }

    // Axis
    let axis_x = area.top_left.x - 1;
    Line::new(Point::new(axis_x, area.top_left.y), Point::new(axis_x, bottom))
        .into_styled(PrimitiveStyle::with_stroke(palette.axis, 1))
        .draw(display)
        .ok();

    let text_style = MonoTextStyle::new(SMALL_FONT, palette.axis_text);
    let (min_label, max_label) = labels;
    Text::with_text_style(&format_label(max_label), Point::new(AXIS_LABEL_X, area.top_left.y), text_style, TOP_LEFT)
        .draw(display)
        .ok();
    Text::with_text_style(&format_label(min_label), Point::new(AXIS_LABEL_X, bottom + 1), text_style, BOTTOM_LEFT)
        .draw(display)
        .ok();

    if let Some(reading) = latest {
        Text::with_text_style(&format_reading(reading), Point::new(right, area.top_left.y), text_style, TOP_RIGHT)
            .draw(display)
            .ok();
    }
}
