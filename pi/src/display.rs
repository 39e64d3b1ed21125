//! Panel wiring and runtime settings for the Raspberry Pi build.
//!
//! Defaults match the reference wiring: SPI0 CE0, DC on GPIO 25, RST on
//! GPIO 24, 24 MHz clock. The device path and the asset directory can be
//! overridden through the environment when the process starts.

use std::env;
use std::path::PathBuf;

use crate::ssd1351::PanelConfig;

/// spidev node of SPI0 / CE0.
pub const SPI_DEVICE: &str = "/dev/spidev0.0";

/// SPI clock. 24-32 MHz works with short wiring; drop to 16 MHz if unstable.
pub const SPI_HZ: u32 = 24_000_000;

/// Data/command select (BCM numbering).
pub const GPIO_DC: u64 = 25;

/// Panel reset (BCM numbering).
pub const GPIO_RST: u64 = 24;

/// Overrides [`SPI_DEVICE`].
pub const ENV_SPI_DEVICE: &str = "CWCU_SPI_DEVICE";

/// Directory of BMP icon frames. Unset: use the built-in icons.
pub const ENV_ASSET_DIR: &str = "CWCU_ASSET_DIR";

/// Settings resolved once at startup.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct PiSettings {
    pub spi_device: PathBuf,
    pub spi_hz: u32,
    pub gpio_dc: u64,
    pub gpio_rst: u64,
    pub panel: PanelConfig,
    pub asset_dir: Option<PathBuf>,
}

impl PiSettings {
    /// Defaults with environment overrides applied.
    pub fn from_env() -> Self { Self::from_lookup(|key| env::var(key).ok()) }

    /// Defaults with overrides taken from `lookup`. Empty values are ignored.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());
        Self {
            spi_device: var(ENV_SPI_DEVICE).map_or_else(|| PathBuf::from(SPI_DEVICE), PathBuf::from),
            asset_dir: var(ENV_ASSET_DIR).map(PathBuf::from),
            ..Self::default()
        }
    }
}

impl Default for PiSettings {
    fn default() -> Self {
        Self {
            spi_device: PathBuf::from(SPI_DEVICE),
            spi_hz: SPI_HZ,
            gpio_dc: GPIO_DC,
            gpio_rst: GPIO_RST,
            panel: PanelConfig::DEFAULT,
            asset_dir: None,
        }
    }
}
