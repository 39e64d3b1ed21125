//! Icon frames loaded from BMP files.
//!
//! Frames live in one directory named `<tile>_<status>_<phase>.bmp`, for
//! example `fans_warn_2.bmp`. Every frame must be a 16x16 bitmap; any color
//! depth `tinybmp` understands is converted to RGB565 on load.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use cwcu_common::assets::{AssetLoader, AssetTable, FrameAsset};
use cwcu_common::config::{ICON_SIZE, TILE_COUNT};
use cwcu_common::{DisplayConfig, StartupError, Status, TileId};
use embedded_graphics::image::Image;
use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use log::{error, info};
use tinybmp::Bmp;

/// Loads every frame of the tile layout from a directory of BMP files.
pub struct BmpAssetLoader {
    dir: PathBuf,
    frame_counts: [u8; TILE_COUNT],
}

impl BmpAssetLoader {
    pub fn new(
        dir: impl Into<PathBuf>,
        config: &DisplayConfig,
    ) -> Self {
        Self {
            dir: dir.into(),
            frame_counts: config.frame_counts(),
        }
    }

    /// Path of one frame file.
    pub fn frame_path(
        &self,
        tile: TileId,
        status: Status,
        phase: u8,
    ) -> PathBuf {
        self.dir
            .join(format!("{}_{}_{}.bmp", tile.slug(), status.slug(), phase))
    }

    fn load_frame(
        path: &Path,
        tile: TileId,
        status: Status,
        phase: u8,
    ) -> Result<FrameAsset, StartupError> {
        let data = fs::read(path).map_err(|err| {
            error!("cannot read {}: {err}", path.display());
            if err.kind() == ErrorKind::NotFound {
                StartupError::MissingAsset { tile, status, phase }
            } else {
                StartupError::AssetLoad("unreadable bitmap file")
            }
        })?;

        let bmp = Bmp::<Rgb565>::from_slice(&data).map_err(|err| {
            error!("cannot decode {}: {err:?}", path.display());
            StartupError::AssetLoad("invalid bitmap file")
        })?;
        if bmp.size() != Size::new(ICON_SIZE, ICON_SIZE) {
            error!("{} is {}x{}, expected 16x16", path.display(), bmp.size().width, bmp.size().height);
            return Err(StartupError::AssetLoad("bitmap is not 16x16"));
        }

        let mut frame = FrameAsset::filled(Rgb565::BLACK);
        Image::new(&bmp, Point::zero()).draw(&mut frame).ok();
        Ok(frame)
    }
}

impl AssetLoader for BmpAssetLoader {
    fn load(&mut self) -> Result<AssetTable, StartupError> {
        let mut table = AssetTable::new();
        for tile in TileId::ALL {
            for status in Status::ALL {
                for phase in 0..self.frame_counts[tile.index()] {
                    let frame = Self::load_frame(&self.frame_path(tile, status, phase), tile, status, phase)?;
                    table
                        .push(tile, status, frame)
                        .map_err(|_| StartupError::AssetLoad("too many frames"))?;
                }
            }
        }
        info!("loaded icon frames from {}", self.dir.display());
        Ok(table)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
