//! Tile icon frames.
//!
//! Every (tile, status, phase) triple maps to a 16x16 [`FrameAsset`]. Frames
//! are produced once at startup by an [`AssetLoader`] into an [`AssetTable`],
//! which is then checked against the tile layout with
//! [`AssetTable::validate`]. Only the validated [`Assets`] are handed to the
//! render loop, so a per-frame lookup can never miss.
//!
//! [`ProceduralAssets`] draws the built-in icon set with embedded-graphics
//! primitives; the Pi build can instead load BMP files from disk.

use core::convert::Infallible;

use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::{Circle, Line, OffsetOutline, PrimitiveStyle, Rectangle, Triangle};
use heapless::Vec;
use log::warn;

use crate::config::{DisplayConfig, ICON_PIXELS, ICON_SIZE, MAX_FRAMES, Palette, STATUS_COUNT, TILE_COUNT};
use crate::error::StartupError;
use crate::tiles::{Status, TileId};

// =============================================================================
// Frame Asset
// =============================================================================

/// One immutable 16x16 icon bitmap.
///
/// Implements `DrawTarget` so loaders can paint into it; out-of-bounds pixels
/// are dropped.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct FrameAsset {
    pixels: [Rgb565; ICON_PIXELS],
}

impl FrameAsset {
    /// A frame filled with a single color.
    pub const fn filled(color: Rgb565) -> Self {
        Self {
            pixels: [color; ICON_PIXELS],
        }
    }

    /// Pixels in row-major order.
    #[inline]
    pub const fn pixels(&self) -> &[Rgb565] { &self.pixels }

    /// Color at a point, or `None` outside the frame.
    pub fn pixel(
        &self,
        point: Point,
    ) -> Option<Rgb565> {
        index_of(point).map(|idx| self.pixels[idx])
    }
}

#[inline]
fn index_of(point: Point) -> Option<usize> {
    let size = ICON_SIZE as i32;
    if point.x >= 0 && point.x < size && point.y >= 0 && point.y < size {
        Some((point.y * size + point.x) as usize)
    } else {
        None
    }
}

impl OriginDimensions for FrameAsset {
    fn size(&self) -> Size { Size::new(ICON_SIZE, ICON_SIZE) }
}

impl DrawTarget for FrameAsset {
    type Color = Rgb565;
    type Error = Infallible;

    fn draw_iter<I>(
        &mut self,
        pixels: I,
    ) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        for Pixel(point, color) in pixels {
            if let Some(idx) = index_of(point) {
                self.pixels[idx] = color;
            }
        }
        Ok(())
    }

    fn clear(
        &mut self,
        color: Self::Color,
    ) -> Result<(), Self::Error> {
        self.pixels.fill(color);
        Ok(())
    }
}

// =============================================================================
// Asset Table
// =============================================================================

/// Loader output: the frames found for every (tile, status).
pub struct AssetTable {
    frames: [[Vec<FrameAsset, MAX_FRAMES>; STATUS_COUNT]; TILE_COUNT],
}

impl AssetTable {
    /// An empty table.
    pub const fn new() -> Self {
        Self {
            frames: [const { [const { Vec::new() }; STATUS_COUNT] }; TILE_COUNT],
        }
    }

    /// Append the next phase for a (tile, status). Hands the frame back if
    /// `MAX_FRAMES` are already stored.
    pub fn push(
        &mut self,
        tile: TileId,
        status: Status,
        frame: FrameAsset,
    ) -> Result<(), FrameAsset> {
        self.frames[tile.index()][status.index()].push(frame)
    }

    /// Frames stored for a (tile, status), in phase order.
    pub fn frames(
        &self,
        tile: TileId,
        status: Status,
    ) -> &[FrameAsset] {
        &self.frames[tile.index()][status.index()]
    }

    /// Check that every phase each tile can reach has a frame in every status.
    ///
    /// Every tile is checked through [`DisplayConfig::tile`], so a malformed
    /// tile table cannot leave one unchecked. A zero frame count is rejected.
    pub fn validate(
        self,
        config: &DisplayConfig,
    ) -> Result<Assets, StartupError> {
        for tile in TileId::ALL {
            let frame_count = config.tile(tile).frame_count;
            if frame_count == 0 || usize::from(frame_count) > MAX_FRAMES {
                return Err(StartupError::InvalidFrameCount { tile, count: frame_count });
            }
            for status in Status::ALL {
                let stored = self.frames(tile, status).len();
                if stored < usize::from(frame_count) {
                    return Err(StartupError::MissingAsset {
                        tile,
                        status,
                        phase: stored as u8,
                    });
                }
                if stored > usize::from(frame_count) {
                    warn!(
                        "{}/{}: {} frames loaded, only {} are animated",
                        tile.slug(),
                        status.slug(),
                        stored,
                        frame_count
                    );
                }
            }
        }
        Ok(Assets { table: self })
    }
}

impl Default for AssetTable {
    fn default() -> Self { Self::new() }
}

/// An asset table known to cover every reachable (tile, status, phase).
pub struct Assets {
    table: AssetTable,
}

impl Assets {
    /// Frame for a (tile, status, phase).
    ///
    /// The phase is reduced modulo the stored frame count, which validation
    /// guarantees is at least the tile's animation length.
    pub fn frame(
        &self,
        tile: TileId,
        status: Status,
        phase: u8,
    ) -> &FrameAsset {
        let frames = self.table.frames(tile, status);
        &frames[usize::from(phase) % frames.len()]
    }
}

// =============================================================================
// Loading
// =============================================================================

/// Startup-time source of icon frames.
pub trait AssetLoader {
    /// Load every frame. Called once; any error aborts startup.
    fn load(&mut self) -> Result<AssetTable, StartupError>;
}

/// Built-in icon set drawn with embedded-graphics primitives.
///
/// Icons are stroked in the palette's per-status icon color on the tile's
/// per-status fill, so they blend into the tile box.
pub struct ProceduralAssets {
    palette: Palette,
    frame_counts: [u8; TILE_COUNT],
}

impl ProceduralAssets {
    pub fn new(config: &DisplayConfig) -> Self {
        Self {
            palette: config.palette,
            frame_counts: config.frame_counts(),
        }
    }

    /// Draw one icon frame.
    pub fn render(
        &self,
        tile: TileId,
        status: Status,
        phase: u8,
    ) -> FrameAsset {
        let count = self.frame_counts[tile.index()].max(1);
        let mut frame = FrameAsset::filled(self.palette.tile_fill(status));
        let color = self.palette.icon(status);
        match tile {
            TileId::Fans => draw_fan(&mut frame, color, phase, count),
            TileId::Pumps => draw_pump(&mut frame, color, phase),
            TileId::Probes => draw_probe(&mut frame, color, self.palette.tile_fill(status), phase),
            TileId::Flow => draw_flow(&mut frame, color, phase, count),
        }
        frame
    }
}

impl AssetLoader for ProceduralAssets {
    fn load(&mut self) -> Result<AssetTable, StartupError> {
        let mut table = AssetTable::new();
        for tile in TileId::ALL {
            for status in Status::ALL {
                for phase in 0..self.frame_counts[tile.index()] {
                    table
                        .push(tile, status, self.render(tile, status, phase))
                        .map_err(|_| StartupError::AssetLoad("too many procedural frames"))?;
                }
            }
        }
        Ok(table)
    }
}

// =============================================================================
// Icon Drawing
// =============================================================================

const CENTER: Point = Point::new(7, 7);

/// Blade directions for a quarter turn, in 22.5° steps (radius 6).
const BLADE_VECTORS: [Point; 4] = [Point::new(6, 0), Point::new(6, 2), Point::new(4, 4), Point::new(2, 6)];

/// Four-blade fan; the blades rotate a quarter turn over the animation.
fn draw_fan(
    frame: &mut FrameAsset,
    color: Rgb565,
    phase: u8,
    count: u8,
) {
    let stroke = PrimitiveStyle::with_stroke(color, 2);
    let step = usize::from(phase) * BLADE_VECTORS.len() / usize::from(count);
    let v = BLADE_VECTORS[step % BLADE_VECTORS.len()];
    let perpendicular = Point::new(-v.y, v.x);

    for blade in [v, -v, perpendicular, -perpendicular] {
        Line::new(CENTER, CENTER + blade).into_styled(stroke).draw(frame).ok();
    }
    Circle::with_center(CENTER, 5)
        .into_styled(PrimitiveStyle::with_fill(color))
        .draw(frame)
        .ok();
    Circle::with_center(CENTER, 16)
        .into_styled(PrimitiveStyle::with_stroke(color, 1))
        .draw(frame)
        .ok();
}

/// Pump piston: a square that shrinks on odd phases.
fn draw_pump(
    frame: &mut FrameAsset,
    color: Rgb565,
    phase: u8,
) {
    let inset = if phase % 2 == 0 { 2 } else { 3 };
    let edge = ICON_SIZE - 2 * inset as u32;
    Rectangle::new(Point::new(inset, inset), Size::new(edge, edge))
        .into_styled(PrimitiveStyle::with_fill(color))
        .draw(frame)
        .ok();
}

/// Thermometer probe; the bulb alternates between filled and hollow.
fn draw_probe(
    frame: &mut FrameAsset,
    color: Rgb565,
    background: Rgb565,
    phase: u8,
) {
    Rectangle::new(Point::new(6, 1), Size::new(4, 10))
        .into_styled(PrimitiveStyle::with_stroke(color, 1))
        .draw(frame)
        .ok();
    let bulb = Circle::new(Point::new(4, 8), 8);
    bulb.into_styled(PrimitiveStyle::with_fill(color)).draw(frame).ok();
    if phase % 2 == 1 {
        bulb.offset(-2)
            .into_styled(PrimitiveStyle::with_fill(background))
            .draw(frame)
            .ok();
    }
}

/// Flow chevrons that travel left to right across the frame.
fn draw_flow(
    frame: &mut FrameAsset,
    color: Rgb565,
    phase: u8,
    count: u8,
) {
    let style = PrimitiveStyle::with_fill(color);
    let spacing = 6;
    let shift = i32::from(phase) * spacing / i32::from(count);
    for k in -1..3 {
        let x = k * spacing + shift;
        Triangle::new(Point::new(x, 3), Point::new(x + 4, 7), Point::new(x, 11))
            .into_styled(style)
            .draw(frame)
            .ok();
    }
    Line::new(Point::new(0, 14), Point::new(ICON_SIZE as i32 - 1, 14))
        .into_styled(PrimitiveStyle::with_stroke(color, 1))
        .draw(frame)
        .ok();
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn procedural_table() -> AssetTable { ProceduralAssets::new(&DisplayConfig::DEFAULT).load().unwrap() }

    #[test]
    fn test_procedural_assets_cover_layout() {
        let config = DisplayConfig::DEFAULT;
        let table = procedural_table();
        for layout in &config.tiles {
            for status in Status::ALL {
                assert_eq!(table.frames(layout.id, status).len(), usize::from(layout.frame_count));
            }
        }
        assert!(table.validate(&config).is_ok());
    }

    #[test]
    fn test_missing_frame_is_startup_error() {
        let config = DisplayConfig::DEFAULT;
        let loader = ProceduralAssets::new(&config);
        let mut table = AssetTable::new();
        for tile in TileId::ALL {
            for status in Status::ALL {
                let count = config.tile(tile).frame_count;
                // Leave out the last Flow/Bad frame
                let count = if tile == TileId::Flow && status == Status::Bad { count - 1 } else { count };
                for phase in 0..count {
                    table.push(tile, status, loader.render(tile, status, phase)).unwrap();
                }
            }
        }

        match table.validate(&config) {
            Err(err) => assert_eq!(err, StartupError::MissingAsset {
                tile: TileId::Flow,
                status: Status::Bad,
                phase: 2,
            }),
            Ok(_) => panic!("incomplete table passed validation"),
        }
    }

    #[test]
    fn test_push_respects_max_frames() {
        let mut table = AssetTable::new();
        for _ in 0..MAX_FRAMES {
            assert!(table.push(TileId::Fans, Status::Ok, FrameAsset::filled(Rgb565::BLACK)).is_ok());
        }
        assert!(table.push(TileId::Fans, Status::Ok, FrameAsset::filled(Rgb565::BLACK)).is_err());
    }

    #[test]
    fn test_animation_frames_differ() {
        let table = procedural_table();
        for tile in TileId::ALL {
            let frames = table.frames(tile, Status::Ok);
            for i in 1..frames.len() {
                assert_ne!(frames[i], frames[i - 1], "{tile:?} phase {i} repeats phase {}", i - 1);
            }
        }
    }

    #[test]
    fn test_status_changes_icon_colors() {
        let loader = ProceduralAssets::new(&DisplayConfig::DEFAULT);
        assert_ne!(
            loader.render(TileId::Pumps, Status::Ok, 0),
            loader.render(TileId::Pumps, Status::Bad, 0)
        );
    }

    #[test]
    fn test_frame_asset_clips_drawing() {
        let mut frame = FrameAsset::filled(Rgb565::BLACK);
        Pixel(Point::new(20, 3), Rgb565::WHITE).draw(&mut frame).ok();
        Pixel(Point::new(3, 3), Rgb565::WHITE).draw(&mut frame).ok();
        assert_eq!(frame.pixel(Point::new(3, 3)), Some(Rgb565::WHITE));
        assert_eq!(frame.pixel(Point::new(20, 3)), None);
        assert_eq!(frame.pixels().iter().filter(|&&p| p == Rgb565::WHITE).count(), 1);
    }

    #[test]
    fn test_zero_frame_count_is_rejected() {
        let mut config = DisplayConfig::DEFAULT;
        config.tiles[0].frame_count = 0;
        let table = ProceduralAssets::new(&config).load().unwrap();

        match table.validate(&config) {
            Err(err) => assert_eq!(err, StartupError::InvalidFrameCount {
                tile: TileId::Fans,
                count: 0,
            }),
            Ok(_) => panic!("zero frame count passed validation"),
        }
    }

    #[test]
    fn test_duplicated_tile_id_still_checks_every_tile() {
        let mut config = DisplayConfig::DEFAULT;
        // Pumps row claims to be Fans; the Pumps slot still needs frames
        config.tiles[1].id = TileId::Fans;
        let mut table = AssetTable::new();
        let loader = ProceduralAssets::new(&DisplayConfig::DEFAULT);
        for tile in TileId::ALL.into_iter().filter(|&t| t != TileId::Pumps) {
            for status in Status::ALL {
                for phase in 0..config.tile(tile).frame_count {
                    table.push(tile, status, loader.render(tile, status, phase)).unwrap();
                }
            }
        }

        match table.validate(&config) {
            Err(StartupError::MissingAsset { tile, phase, .. }) => {
                assert_eq!(tile, TileId::Pumps);
                assert_eq!(phase, 0);
            }
            Err(err) => panic!("unexpected error {err}"),
            Ok(_) => panic!("uncovered tile passed validation"),
        }
    }

    #[test]
    fn test_extra_frames_are_ignored() {
        let config = DisplayConfig::DEFAULT;
        let loader = ProceduralAssets::new(&config);
        let mut table = procedural_table();
        let count = config.tile(TileId::Fans).frame_count;
        // One frame past the animation length, drawn in another status color
        let extra = loader.render(TileId::Fans, Status::Bad, 0);
        table.push(TileId::Fans, Status::Ok, extra.clone()).unwrap();
        assert_eq!(table.frames(TileId::Fans, Status::Ok).len(), usize::from(count) + 1);

        let assets = table.validate(&config).unwrap();
        let animator = crate::tiles::TileAnimator::from_config(&config);
        animator.set_status(TileId::Fans, Status::Ok);
        let mut seen = std::vec::Vec::new();
        for _ in 0..usize::from(count) * 2 {
            animator.advance();
            let frame = animator.current_frame(TileId::Fans, &assets);
            assert_ne!(*frame, extra);
            seen.push(frame.clone());
        }
        // Lookups wrap at the configured count
        assert_eq!(seen[..usize::from(count)], seen[usize::from(count)..]);
    }

    #[test]
    fn test_lookup_wraps_phase() {
        let config = DisplayConfig::DEFAULT;
        let assets = procedural_table().validate(&config).unwrap();
        assert_eq!(
            assets.frame(TileId::Pumps, Status::Warn, 2),
            assets.frame(TileId::Pumps, Status::Warn, 0)
        );
    }
}
