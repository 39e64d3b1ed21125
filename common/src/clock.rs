//! Wall clock for hosted builds.

use std::thread;
use std::time::{Duration, Instant};

use crate::scheduler::Clock;

/// Monotonic [`Clock`] backed by `Instant` and `thread::sleep`.
pub struct StdClock {
    origin: Instant,
}

impl StdClock {
    pub fn new() -> Self { Self { origin: Instant::now() } }
}

impl Default for StdClock {
    fn default() -> Self { Self::new() }
}

impl Clock for StdClock {
    fn now(&self) -> Duration { self.origin.elapsed() }

    fn sleep(
        &mut self,
        duration: Duration,
    ) {
        thread::sleep(duration);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clock_is_monotonic() {
        let mut clock = StdClock::new();
        let before = clock.now();
        clock.sleep(Duration::from_millis(2));
        assert!(clock.now() >= before + Duration::from_millis(2));
    }
}
