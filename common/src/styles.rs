//! Pre-computed text styles and font references.
//!
//! Fonts are shared as `const` references so widgets only vary the color:
//! `MonoTextStyle::new(TILE_FONT, color)`. All dashboard text is positioned by
//! its top edge, which keeps the pixel arithmetic in `config::layout` simple.

use embedded_graphics::mono_font::MonoFont;
use embedded_graphics::mono_font::ascii::FONT_4X6;
use embedded_graphics::text::{Alignment, Baseline, TextStyle, TextStyleBuilder};
use profont::PROFONT_7_POINT;

// =============================================================================
// Fonts
// =============================================================================

/// Tile name and status label font (`ProFont` 7pt).
pub const TILE_FONT: &MonoFont = &PROFONT_7_POINT;

/// Axis label, reading and status-bar font (4x6 pixels).
pub const SMALL_FONT: &MonoFont = &FONT_4X6;

// =============================================================================
// Alignment Styles
// =============================================================================

/// Left-aligned, positioned by the top of the glyph cell.
pub const TOP_LEFT: TextStyle = TextStyleBuilder::new()
    .alignment(Alignment::Left)
    .baseline(Baseline::Top)
    .build();

/// Right-aligned, positioned by the top of the glyph cell.
pub const TOP_RIGHT: TextStyle = TextStyleBuilder::new()
    .alignment(Alignment::Right)
    .baseline(Baseline::Top)
    .build();

/// Left-aligned, positioned by the bottom of the glyph cell.
pub const BOTTOM_LEFT: TextStyle = TextStyleBuilder::new()
    .alignment(Alignment::Left)
    .baseline(Baseline::Bottom)
    .build();
