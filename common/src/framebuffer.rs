//! Owned 128x96 RGB565 frame.
//!
//! The compositor draws into a fresh [`FrameBuffer`] every tick and moves it
//! into the transport, so a frame is never shared between producer and
//! consumer.
//!
//! Pixels are kept as `Rgb565` values in row-major order. Transports that need
//! wire bytes call [`FrameBuffer::be_bytes`], which yields the big-endian
//! byte stream SPI panels expect.

use core::convert::Infallible;
use core::fmt;

use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::pixelcolor::raw::RawU16;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::Rectangle;

use crate::config::{FRAME_PIXELS, SCREEN_HEIGHT, SCREEN_WIDTH};

const WIDTH: usize = SCREEN_WIDTH as usize;

/// One complete frame, ready to hand to a transport.
#[derive(Clone, PartialEq, Eq)]
pub struct FrameBuffer {
    pixels: [Rgb565; FRAME_PIXELS],
}

impl FrameBuffer {
    /// A frame filled with one color.
    pub const fn new(color: Rgb565) -> Self {
        Self {
            pixels: [color; FRAME_PIXELS],
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
        Self::index_of(point.x, point.y).map(|idx| self.pixels[idx])
    }

    /// Big-endian RGB565 bytes, two per pixel, row-major.
    pub fn be_bytes(&self) -> impl Iterator<Item = u8> + '_ {
        self.pixels.iter().flat_map(|&color| {
            let raw: RawU16 = color.into();
            raw.into_inner().to_be_bytes()
        })
    }

    #[inline]
    fn index_of(
        x: i32,
        y: i32,
    ) -> Option<usize> {
        if x >= 0 && x < SCREEN_WIDTH as i32 && y >= 0 && y < SCREEN_HEIGHT as i32 {
            Some(y as usize * WIDTH + x as usize)
        } else {
            None
        }
    }
}

impl Default for FrameBuffer {
    fn default() -> Self { Self::new(Rgb565::BLACK) }
}

impl fmt::Debug for FrameBuffer {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        f.debug_struct("FrameBuffer")
            .field("width", &SCREEN_WIDTH)
            .field("height", &SCREEN_HEIGHT)
            .finish_non_exhaustive()
    }
}

impl OriginDimensions for FrameBuffer {
    fn size(&self) -> Size { Size::new(SCREEN_WIDTH, SCREEN_HEIGHT) }
}

impl DrawTarget for FrameBuffer {
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
            if let Some(idx) = Self::index_of(point.x, point.y) {
                self.pixels[idx] = color;
            }
        }
        Ok(())
    }

    fn fill_contiguous<I>(
        &mut self,
        area: &Rectangle,
        colors: I,
    ) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Self::Color>,
    {
        // Colors cover the whole requested area, so walk it and drop what is off-screen
        let mut colors = colors.into_iter();
        for y in area.rows() {
            for x in area.columns() {
                let Some(color) = colors.next() else {
                    return Ok(());
                };
                if let Some(idx) = Self::index_of(x, y) {
                    self.pixels[idx] = color;
                }
            }
        }
        Ok(())
    }

    fn fill_solid(
        &mut self,
        area: &Rectangle,
        color: Self::Color,
    ) -> Result<(), Self::Error> {
        let drawable_area = area.intersection(&self.bounding_box());
        if drawable_area.size.width == 0 || drawable_area.size.height == 0 {
            return Ok(());
        }

        let x_start = drawable_area.top_left.x as usize;
        let width = drawable_area.size.width as usize;
        for y in drawable_area.rows() {
            let row_start = y as usize * WIDTH + x_start;
            self.pixels[row_start..row_start + width].fill(color);
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
// Unit Tests
// =============================================================================
