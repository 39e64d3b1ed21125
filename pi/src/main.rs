//! CWCU dashboard for a Raspberry Pi driving an SSD1351 over spidev.
//!
//! ```text
//! RUST_LOG=debug CWCU_ASSET_DIR=/opt/cwcu/pic cwcu
//! ```
//!
//! Runs until SIGINT/SIGTERM; the frame in flight is finished before exit.

#[cfg(target_os = "linux")]
fn main() -> anyhow::Result<()> { linux::run() }

#[cfg(not(target_os = "linux"))]
fn main() {
    eprintln!("cwcu: the SSD1351 binary needs Linux spidev; use cwcu-simulator on this host");
    std::process::exit(1);
}

#[cfg(target_os = "linux")]
mod linux {
    use std::sync::Arc;
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::thread;
    use std::time::{Duration, SystemTime, UNIX_EPOCH};

    use anyhow::{Context, Result};
    use cwcu_common::clock::StdClock;
    use cwcu_common::config::CHART_COLUMNS;
    use cwcu_common::network::LocalAddress;
    use cwcu_common::{AssetLoader, DisplayConfig, ProceduralAssets, RandomWalk, TickScheduler, TileAnimator};
    use cwcu_pi::{BmpAssetLoader, PiSettings, Ssd1351};
    use linux_embedded_hal::spidev::{SpiModeFlags, SpidevOptions};
    use linux_embedded_hal::sysfs_gpio::Direction;
    use linux_embedded_hal::{Delay, SpidevDevice, SysfsPin};
    use log::info;

    type Oled = Ssd1351<SpidevDevice, SysfsPin, SysfsPin>;

    pub fn run() -> Result<()> {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

        let settings = PiSettings::from_env();
        let config = DisplayConfig::DEFAULT;
        config.validate(CHART_COLUMNS).context("invalid display configuration")?;

        let table = match &settings.asset_dir {
            Some(dir) => BmpAssetLoader::new(dir, &config).load(),
            None => ProceduralAssets::new(&config).load(),
        }
        .context("loading icon frames")?;
        let assets = table.validate(&config).context("icon frames do not cover the tile layout")?;

        let mut oled = open_display(&settings)?;
        oled.init(&mut Delay).context("initializing SSD1351")?;

        let stop = Arc::new(AtomicBool::new(false));
        {
            let stop = Arc::clone(&stop);
            ctrlc::set_handler(move || stop.store(true, Ordering::Release)).context("installing signal handler")?;
        }

        let animator = TileAnimator::from_config(&config);
        let seed = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map_or(0, |elapsed| elapsed.as_nanos() as u64);
        let walk = RandomWalk::from_config(&config.walk, seed);

        let mut scheduler: TickScheduler<'_, _, _, Oled, CHART_COLUMNS> =
            TickScheduler::new(&config, &animator, &assets, walk, LocalAddress::new(), oled)?;
        let stats = scheduler.run(&mut StdClock::new(), &stop);

        info!("exiting after {} frames", stats.flushes);
        Ok(())
    }

    fn open_display(settings: &PiSettings) -> Result<Oled> {
        let mut spi = SpidevDevice::open(&settings.spi_device)
            .with_context(|| format!("opening {}", settings.spi_device.display()))?;
        let options = SpidevOptions::new()
            .bits_per_word(8)
            .max_speed_hz(settings.spi_hz)
            .mode(SpiModeFlags::SPI_MODE_0)
            .build();
        spi.configure(&options).context("configuring SPI")?;

        let dc = output_pin(settings.gpio_dc)?;
        let rst = output_pin(settings.gpio_rst)?;
        info!(
            "SPI {} at {} MHz, DC GPIO {}, RST GPIO {}",
            settings.spi_device.display(),
            settings.spi_hz / 1_000_000,
            settings.gpio_dc,
            settings.gpio_rst
        );
        Ok(Ssd1351::new(spi, dc, rst, settings.panel))
    }

    /// Export a sysfs GPIO and make it an output.
    fn output_pin(number: u64) -> Result<SysfsPin> {
        let pin = SysfsPin::new(number);
        pin.export().with_context(|| format!("exporting GPIO {number}"))?;
        // udev needs a moment to fix permissions on a freshly exported pin
        let mut attempts = 0;
        loop {
            match pin.set_direction(Direction::Out) {
                Ok(()) => return Ok(pin),
                Err(_) if attempts < 10 => {
                    attempts += 1;
                    thread::sleep(Duration::from_millis(20));
                }
                Err(err) => return Err(err).with_context(|| format!("configuring GPIO {number} as output")),
            }
        }
    }
}
