//! Display transport contract.
//!
//! A transport takes ownership of a finished [`FrameBuffer`] and pushes it to
//! the physical panel (or a simulator window). Errors are per-frame and
//! recoverable: the scheduler logs them, drops the frame and carries on, so
//! the last good frame stays on screen.

use thiserror::Error;

use crate::framebuffer::FrameBuffer;

/// A failed flush. The frame is lost; the next tick tries again.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransportError {
    /// SPI (or other bus) write failed.
    #[error("display bus write failed")]
    Bus,

    /// Data/command or reset pin could not be driven.
    #[error("display control pin failed")]
    Pin,

    /// The display is gone (window closed, device unplugged).
    #[error("display disconnected")]
    Disconnected,
}

/// Sink for composed frames.
pub trait DisplayTransport {
    /// Send one complete frame. Blocks until the frame is written or fails.
    fn flush(
        &mut self,
        frame: FrameBuffer,
    ) -> Result<(), TransportError>;
}

impl<T: DisplayTransport + ?Sized> DisplayTransport for &mut T {
    fn flush(
        &mut self,
        frame: FrameBuffer,
    ) -> Result<(), TransportError> {
        (**self).flush(frame)
    }
}
