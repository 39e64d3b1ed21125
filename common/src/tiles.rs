//! Metric tiles and their animation state.
//!
//! The dashboard shows four tiles (fans, pumps, probes, flow). Each tile has a
//! discrete [`Status`] and an animation phase that selects which icon frame is
//! drawn. Both live in the [`TileAnimator`], which is the only place tile state
//! is mutated.
//!
//! # Concurrency
//!
//! Status updates arrive from a sensor or command thread while the tick thread
//! reads them. Every field is a single `AtomicU8`: `set_status` stores with
//! `Release` and readers load with `Acquire`, so a tick observes either the old
//! or the new status, never a torn value. The animator is therefore `Sync` and
//! is shared by reference (an `Arc` in the binaries).
//!
//! Phases are only written by [`TileAnimator::advance`], which runs once per
//! tick on the scheduler thread.

use core::sync::atomic::{AtomicU8, Ordering};

use crate::assets::{Assets, FrameAsset};
use crate::config::{DisplayConfig, MAX_FRAMES, STATUS_COUNT, TILE_COUNT};

// =============================================================================
// Tile Identity and Status
// =============================================================================

/// One of the four metric tiles, in display order.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
#[repr(u8)]
pub enum TileId {
    Fans = 0,
    Pumps = 1,
    Probes = 2,
    Flow = 3,
}

impl TileId {
    /// All tiles in index order.
    pub const ALL: [Self; TILE_COUNT] = [Self::Fans, Self::Pumps, Self::Probes, Self::Flow];

    /// Position in per-tile arrays.
    #[inline]
    pub const fn index(self) -> usize { self as usize }

    /// Name printed on the tile.
    pub const fn label(self) -> &'static str {
        match self {
            Self::Fans => "FANS",
            Self::Pumps => "PUMPS",
            Self::Probes => "PROBES",
            Self::Flow => "FLOW",
        }
    }

    /// Lowercase name used in asset file names and logs.
    pub const fn slug(self) -> &'static str {
        match self {
            Self::Fans => "fans",
            Self::Pumps => "pumps",
            Self::Probes => "probes",
            Self::Flow => "flow",
        }
    }
}

/// Discrete health level of a tile.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Default)]
#[repr(u8)]
pub enum Status {
    /// No reading received yet. Every tile starts here.
    #[default]
    NoSignal = 0,
    Ok = 1,
    Warn = 2,
    Bad = 3,
}

impl Status {
    /// All statuses in index order.
    pub const ALL: [Self; STATUS_COUNT] = [Self::NoSignal, Self::Ok, Self::Warn, Self::Bad];

    /// Position in per-status arrays.
    #[inline]
    pub const fn index(self) -> usize { self as usize }

    /// Decode a stored discriminant. Unknown values read as `NoSignal`.
    pub const fn from_u8(raw: u8) -> Self {
        match raw {
            1 => Self::Ok,
            2 => Self::Warn,
            3 => Self::Bad,
            _ => Self::NoSignal,
        }
    }

    /// Short label printed under the tile name.
    pub const fn label(self) -> &'static str {
        match self {
            Self::NoSignal => "No Sig",
            Self::Ok => "OK",
            Self::Warn => "Warn",
            Self::Bad => "Bad",
        }
    }

    /// Lowercase name used in asset file names and logs.
    pub const fn slug(self) -> &'static str {
        match self {
            Self::NoSignal => "nosignal",
            Self::Ok => "ok",
            Self::Warn => "warn",
            Self::Bad => "bad",
        }
    }
}

// =============================================================================
// Tile Animator
// =============================================================================

/// Copy of one tile's state, taken once per tick for the compositor.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct TileSnapshot {
    pub id: TileId,
    pub status: Status,
    pub phase: u8,
}

/// Owns the status and animation phase of every tile.
pub struct TileAnimator {
    statuses: [AtomicU8; TILE_COUNT],
    phases: [AtomicU8; TILE_COUNT],
    frame_counts: [u8; TILE_COUNT],
}

impl TileAnimator {
    /// Create an animator with every tile at `NoSignal`, phase 0.
    ///
    /// Frame counts are clamped to `1..=MAX_FRAMES`; configurations outside
    /// that range are rejected earlier by [`DisplayConfig::validate`].
    pub const fn new(frame_counts: [u8; TILE_COUNT]) -> Self {
        let mut counts = frame_counts;
        let mut i = 0;
        while i < TILE_COUNT {
            if counts[i] == 0 {
                counts[i] = 1;
            } else if counts[i] as usize > MAX_FRAMES {
                counts[i] = MAX_FRAMES as u8;
            }
            i += 1;
        }
        Self {
            statuses: [const { AtomicU8::new(Status::NoSignal as u8) }; TILE_COUNT],
            phases: [const { AtomicU8::new(0) }; TILE_COUNT],
            frame_counts: counts,
        }
    }

    /// Create an animator using the frame counts from the tile layout table.
    pub fn from_config(config: &DisplayConfig) -> Self { Self::new(config.frame_counts()) }

    /// Set a tile's status. Visible from the next composed frame; last write wins.
    pub fn set_status(
        &self,
        tile: TileId,
        status: Status,
    ) {
        self.statuses[tile.index()].store(status as u8, Ordering::Release);
    }

    /// Current status of a tile.
    #[inline]
    pub fn status(
        &self,
        tile: TileId,
    ) -> Status {
        Status::from_u8(self.statuses[tile.index()].load(Ordering::Acquire))
    }

    /// Current animation phase of a tile, always below its frame count.
    #[inline]
    pub fn phase(
        &self,
        tile: TileId,
    ) -> u8 {
        self.phases[tile.index()].load(Ordering::Relaxed)
    }

    /// Number of animation frames a tile cycles through.
    #[inline]
    pub const fn frame_count(
        &self,
        tile: TileId,
    ) -> u8 {
        self.frame_counts[tile.index()]
    }

    /// Advance every tile by one phase, wrapping at each tile's frame count.
    pub fn advance(&self) {
        for (phase, &count) in self.phases.iter().zip(self.frame_counts.iter()) {
            let _ = phase.fetch_update(Ordering::Relaxed, Ordering::Relaxed, |p| Some((p + 1) % count));
        }
    }

    /// Copy all tile states for one frame.
    pub fn snapshot(&self) -> [TileSnapshot; TILE_COUNT] {
        TileId::ALL.map(|id| TileSnapshot {
            id,
            status: self.status(id),
            phase: self.phase(id),
        })
    }

    /// Icon frame for a tile's current status and phase.
    pub fn current_frame<'a>(
        &self,
        tile: TileId,
        assets: &'a Assets,
    ) -> &'a FrameAsset {
        assets.frame(tile, self.status(tile), self.phase(tile))
    }
}

impl Default for TileAnimator {
    fn default() -> Self { Self::from_config(&DisplayConfig::DEFAULT) }
}

// =============================================================================
// Unit Tests
// =============================================================================
