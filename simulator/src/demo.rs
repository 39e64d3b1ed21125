//! Demo status feed: a stand-in for real sensors.
//!
//! Every [`UPDATE_INTERVAL`] one random tile gets a random status, so every
//! icon set and tile color shows up while the simulator runs.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use cwcu_common::{Status, TileAnimator, TileId};
use log::debug;
use rand::Rng;

const UPDATE_INTERVAL: Duration = Duration::from_secs(2);

/// Granularity of the stop-flag check.
const POLL: Duration = Duration::from_millis(100);

/// Spawn the feed thread. It exits once `stop` is set.
pub fn spawn(
    animator: Arc<TileAnimator>,
    stop: Arc<AtomicBool>,
) -> JoinHandle<()> {
    thread::spawn(move || {
        let mut rng = rand::rng();
        let mut next = Instant::now();
        while !stop.load(Ordering::Acquire) {
            if Instant::now() >= next {
                let tile = TileId::ALL[rng.random_range(0..TileId::ALL.len())];
                let status = Status::ALL[rng.random_range(0..Status::ALL.len())];
                debug!("demo: {} -> {}", tile.label(), status.label());
                animator.set_status(tile, status);
                next += UPDATE_INTERVAL;
            }
            thread::sleep(POLL);
        }
    })
}
