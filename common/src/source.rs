//! Temperature sample sources.
//!
//! The scheduler asks a [`SampleSource`] for one sample per tick, passing the
//! previous sample. Production wires in a real sensor (any `FnMut(f32) -> f32`
//! works), the demo uses a bounded [`RandomWalk`], and tests replay a fixed
//! [`SequenceSource`].

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use crate::config::WalkConfig;

/// Produces the next temperature sample.
pub trait SampleSource {
    fn next_sample(
        &mut self,
        previous: f32,
    ) -> f32;
}

impl<F> SampleSource for F
where
    F: FnMut(f32) -> f32,
{
    fn next_sample(
        &mut self,
        previous: f32,
    ) -> f32 {
        self(previous)
    }
}

// =============================================================================
// Random Walk
// =============================================================================

/// Bounded random walk: `clamp(previous + step, floor, ceiling)` with the step
/// drawn uniformly from `[-max_step, max_step]`.
pub struct RandomWalk {
    rng: SmallRng,
    max_step: f32,
    floor: f32,
    ceiling: f32,
}

impl RandomWalk {
    /// Create a walk from an explicit seed. Bounds are swapped if reversed.
    ///
    /// A non-finite step holds the walk still. Steps are capped at
    /// [`MAX_STEP`] so the sampling range stays finite.
    pub fn new(
        seed: u64,
        max_step: f32,
        floor: f32,
        ceiling: f32,
    ) -> Self {
        Self {
            rng: SmallRng::seed_from_u64(seed),
            max_step: sanitize_step(max_step),
            floor: floor.min(ceiling),
            ceiling: floor.max(ceiling),
        }
    }

    /// Create a walk from the configured step and bounds.
    pub fn from_config(
        walk: &WalkConfig,
        seed: u64,
    ) -> Self {
        Self::new(seed, walk.max_step, walk.floor, walk.ceiling)
    }
}

/// Largest step a [`RandomWalk`] takes; the sampling range stays well below `f32::MAX`.
pub const MAX_STEP: f32 = f32::MAX / 4.0;

fn sanitize_step(max_step: f32) -> f32 {
    if !max_step.is_finite() {
        return 0.0;
    }
    let step = if max_step < 0.0 { -max_step } else { max_step };
    step.min(MAX_STEP)
}

impl SampleSource for RandomWalk {
    fn next_sample(
        &mut self,
        previous: f32,
    ) -> f32 {
        let step = if self.max_step > 0.0 {
            self.rng.random_range(-self.max_step..=self.max_step)
        } else {
            0.0
        };
        // max/min rather than clamp: never panics, and a NaN previous snaps to a bound
        (previous + step).max(self.floor).min(self.ceiling)
    }
}

// =============================================================================
// Fixed Sequence
// =============================================================================

/// Replays a fixed list of samples, then repeats the previous value.
pub struct SequenceSource<'a> {
    samples: &'a [f32],
    cursor: usize,
}

impl<'a> SequenceSource<'a> {
    pub const fn new(samples: &'a [f32]) -> Self { Self { samples, cursor: 0 } }

    /// Samples not yet replayed.
    pub fn remaining(&self) -> usize { self.samples.len() - self.cursor }
}

impl SampleSource for SequenceSource<'_> {
    fn next_sample(
        &mut self,
        previous: f32,
    ) -> f32 {
        match self.samples.get(self.cursor) {
            Some(&sample) => {
                self.cursor += 1;
                sample
            }
            None => previous,
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
