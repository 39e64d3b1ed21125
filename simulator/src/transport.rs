//! SDL window standing in for the SSD1351 panel.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use cwcu_common::FrameBuffer;
use cwcu_common::config::{SCREEN, SCREEN_HEIGHT, SCREEN_WIDTH};
use cwcu_common::transport::{DisplayTransport, TransportError};
use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use embedded_graphics_simulator::{OutputSettingsBuilder, SimulatorDisplay, SimulatorEvent, Window};
use log::info;

/// Window pixels per panel pixel.
const SCALE: u32 = 4;

/// Blits every frame into an SDL window and watches for the window closing.
///
/// Closing the window raises the shared stop flag; the scheduler then stops
/// after the current tick. Flushes after that report `Disconnected`.
pub struct SimulatorTransport {
    display: SimulatorDisplay<Rgb565>,
    window: Window,
    stop: Arc<AtomicBool>,
    closed: bool,
}

impl SimulatorTransport {
    pub fn new(stop: Arc<AtomicBool>) -> Self {
        let output_settings = OutputSettingsBuilder::new().scale(SCALE).build();
        Self {
            display: SimulatorDisplay::new(Size::new(SCREEN_WIDTH, SCREEN_HEIGHT)),
            window: Window::new("CWCU Dashboard", &output_settings),
            stop,
            closed: false,
        }
    }

    fn poll_events(&mut self) {
        for event in self.window.events() {
            if let SimulatorEvent::Quit = event {
                info!("simulator window closed");
                self.closed = true;
                self.stop.store(true, Ordering::Release);
            }
        }
    }
}

impl DisplayTransport for SimulatorTransport {
    fn flush(
        &mut self,
        frame: FrameBuffer,
    ) -> Result<(), TransportError> {
        if self.closed {
            return Err(TransportError::Disconnected);
        }
        self.display
            .fill_contiguous(&SCREEN, frame.pixels().iter().copied())
            .ok();
        self.window.update(&self.display);
        self.poll_events();
        Ok(())
    }
}
