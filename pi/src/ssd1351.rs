//! Blocking SSD1351 OLED driver over `embedded-hal` 1.0 SPI.
//!
//! The controller has 128x128 of display RAM; the dashboard panel shows a
//! 128x96 window of it, selected with a row (and optionally column) offset.
//!
//! # Protocol
//!
//! Every command is one byte sent with DC low, followed by its parameter
//! bytes sent with DC high. A frame is pushed by setting the column/row
//! window, issuing `WRITE_RAM`, then streaming big-endian RGB565 pixels with
//! DC high.
//!
//! Pixel data is written in [`CHUNK_SIZE`] byte transfers because the Linux
//! spidev driver rejects single transfers above 4096 bytes by default.

use cwcu_common::FrameBuffer;
use cwcu_common::config::{SCREEN_HEIGHT, SCREEN_WIDTH};
use cwcu_common::transport::{DisplayTransport, TransportError};
use embedded_hal::delay::DelayNs;
use embedded_hal::digital::OutputPin;
use embedded_hal::spi::SpiDevice;
use log::{debug, info};

/// Largest single SPI transfer.
pub const CHUNK_SIZE: usize = 4096;

// SSD1351 Commands
const SET_COLUMN: u8 = 0x15;
const SET_ROW: u8 = 0x75;
const WRITE_RAM: u8 = 0x5C;
const SET_REMAP: u8 = 0xA0;
const START_LINE: u8 = 0xA1;
const DISPLAY_OFFSET: u8 = 0xA2;
const NORMAL_DISPLAY: u8 = 0xA6;
const FUNCTION_SELECT: u8 = 0xAB;
const DISPLAY_OFF: u8 = 0xAE;
const DISPLAY_ON: u8 = 0xAF;
const PRECHARGE: u8 = 0xB1;
const CLOCK_DIV: u8 = 0xB3;
const SET_VSL: u8 = 0xB4;
const SET_GPIO: u8 = 0xB5;
const PRECHARGE2: u8 = 0xB6;
const VCOMH: u8 = 0xBE;
const CONTRAST_ABC: u8 = 0xC1;
const CONTRAST_MASTER: u8 = 0xC7;
const MUX_RATIO: u8 = 0xCA;
const COMMAND_LOCK: u8 = 0xFD;

// Remap flags: 65k color, COM split odd/even, COM scan reversed
const REMAP_BASE: u8 = 0x70;
const REMAP_RGB: u8 = 0x04;

/// Panel geometry and color order.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct PanelConfig {
    pub width: u16,
    pub height: u16,
    /// First RAM column of the visible window.
    pub column_offset: u16,
    /// First RAM row of the visible window.
    pub row_offset: u16,
    /// Panel wired blue-green-red.
    pub bgr: bool,
}

impl PanelConfig {
    /// 128x96 window at row 32 of a 128x128 RAM, RGB order.
    pub const DEFAULT: Self = Self {
        width: SCREEN_WIDTH as u16,
        height: SCREEN_HEIGHT as u16,
        column_offset: 0,
        row_offset: 32,
        bgr: false,
    };

    const fn remap(&self) -> u8 { if self.bgr { REMAP_BASE } else { REMAP_BASE | REMAP_RGB } }
}

impl Default for PanelConfig {
    fn default() -> Self { Self::DEFAULT }
}

/// SSD1351 display owning its SPI device and control pins.
pub struct Ssd1351<SPI, DC, RST> {
    spi: SPI,
    dc: DC,
    rst: RST,
    panel: PanelConfig,
}

impl<SPI, DC, RST> Ssd1351<SPI, DC, RST>
where
    SPI: SpiDevice,
    DC: OutputPin,
    RST: OutputPin,
{
    pub fn new(
        spi: SPI,
        dc: DC,
        rst: RST,
        panel: PanelConfig,
    ) -> Self {
        Self { spi, dc, rst, panel }
    }

    /// Pulse the reset line.
    pub fn reset<D: DelayNs>(
        &mut self,
        delay: &mut D,
    ) -> Result<(), TransportError> {
        self.rst.set_high().map_err(|_| TransportError::Pin)?;
        delay.delay_ms(1);
        self.rst.set_low().map_err(|_| TransportError::Pin)?;
        delay.delay_ms(10);
        self.rst.set_high().map_err(|_| TransportError::Pin)?;
        delay.delay_ms(10);
        Ok(())
    }

    /// Reset the controller, run the power-up sequence and switch the panel on.
    pub fn init<D: DelayNs>(
        &mut self,
        delay: &mut D,
    ) -> Result<(), TransportError> {
        self.reset(delay)?;

        // Unlock the command set, including A2, B1, B3, BB, BE and C1
        self.command(COMMAND_LOCK, &[0x12])?;
        self.command(COMMAND_LOCK, &[0xB1])?;
        self.command(DISPLAY_OFF, &[])?;

        self.command(CLOCK_DIV, &[0xF1])?;
        self.command(MUX_RATIO, &[0x7F])?;
        self.command(SET_REMAP, &[self.panel.remap()])?;
        self.command(START_LINE, &[0x00])?;
        self.command(DISPLAY_OFFSET, &[0x00])?;
        self.command(SET_GPIO, &[0x00])?;
        self.command(FUNCTION_SELECT, &[0x01])?;

        self.command(PRECHARGE, &[0x32])?;
        self.command(VCOMH, &[0x05])?;
        self.command(NORMAL_DISPLAY, &[])?;
        self.command(CONTRAST_ABC, &[0xC8, 0x80, 0xC8])?;
        self.command(CONTRAST_MASTER, &[0x0F])?;
        self.command(SET_VSL, &[0xA0, 0xB5, 0x55])?;
        self.command(PRECHARGE2, &[0x01])?;

        self.set_window()?;
        self.command(DISPLAY_ON, &[])?;
        delay.delay_ms(10);

        info!(
            "SSD1351 ready: {}x{} at column {} row {}{}",
            self.panel.width,
            self.panel.height,
            self.panel.column_offset,
            self.panel.row_offset,
            if self.panel.bgr { " (BGR)" } else { "" }
        );
        Ok(())
    }

    /// Give back the bus and pins.
    pub fn release(self) -> (SPI, DC, RST) { (self.spi, self.dc, self.rst) }

    /// Send a command byte (DC low) and its parameters (DC high).
    fn command(
        &mut self,
        cmd: u8,
        params: &[u8],
    ) -> Result<(), TransportError> {
        self.dc.set_low().map_err(|_| TransportError::Pin)?;
        self.write(&[cmd])?;
        if !params.is_empty() {
            self.dc.set_high().map_err(|_| TransportError::Pin)?;
            self.write(params)?;
        }
        Ok(())
    }

    fn write(
        &mut self,
        bytes: &[u8],
    ) -> Result<(), TransportError> {
        self.spi.write(bytes).map_err(|err| {
            debug!("SPI write of {} bytes failed: {:?}", bytes.len(), embedded_hal::spi::Error::kind(&err));
            TransportError::Bus
        })
    }

    /// Select the visible window in display RAM.
    fn set_window(&mut self) -> Result<(), TransportError> {
        let PanelConfig {
            width,
            height,
            column_offset,
            row_offset,
            ..
        } = self.panel;
        let (x0, x1) = (column_offset, column_offset + width - 1);
        let (y0, y1) = (row_offset, row_offset + height - 1);
        self.command(SET_COLUMN, &[x0 as u8, x1 as u8])?;
        self.command(SET_ROW, &[y0 as u8, y1 as u8])
    }
}

impl<SPI, DC, RST> DisplayTransport for Ssd1351<SPI, DC, RST>
where
    SPI: SpiDevice,
    DC: OutputPin,
    RST: OutputPin,
{
    fn flush(
        &mut self,
        frame: FrameBuffer,
    ) -> Result<(), TransportError> {
        self.set_window()?;
        self.command(WRITE_RAM, &[])?;
        self.dc.set_high().map_err(|_| TransportError::Pin)?;

        let mut chunk = [0u8; CHUNK_SIZE];
        let mut len = 0;
        for byte in frame.be_bytes() {
            chunk[len] = byte;
            len += 1;
            if len == CHUNK_SIZE {
                self.write(&chunk)?;
                len = 0;
            }
        }
        if len > 0 {
            self.write(&chunk[..len])?;
        }
        Ok(())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
