//! Scrolling temperature history for the chart.
//!
//! [`ScrollBuffer`] is a fixed-capacity FIFO backed by `heapless::Deque`: one
//! sample per chart column, oldest first. Once full, every push evicts the
//! oldest sample, which makes the chart scroll right-to-left with the newest
//! bar on the right edge.

use heapless::{Deque, Vec};

/// Fixed-capacity FIFO of temperature samples (degrees Celsius).
pub struct ScrollBuffer<const N: usize> {
    samples: Deque<f32, N>,
}

impl<const N: usize> ScrollBuffer<N> {
    /// Create an empty buffer.
    pub const fn new() -> Self { Self { samples: Deque::new() } }

    /// Maximum number of stored samples.
    #[inline]
    pub const fn capacity(&self) -> usize { N }

    /// Number of stored samples.
    #[inline]
    pub fn len(&self) -> usize { self.samples.len() }

    #[inline]
    pub fn is_empty(&self) -> bool { self.samples.is_empty() }

    #[inline]
    pub fn is_full(&self) -> bool { self.samples.is_full() }

    /// Append a sample, evicting the oldest one when full.
    ///
    /// Returns the evicted sample, if any.
    pub fn push(
        &mut self,
        sample: f32,
    ) -> Option<f32> {
        let evicted = if self.samples.is_full() {
            self.samples.pop_front()
        } else {
            None
        };
        match self.samples.push_back(sample) {
            Ok(()) => evicted,
            Err(rejected) => Some(rejected),
        }
    }

    /// Iterate over samples, oldest first.
    pub fn iter(&self) -> impl Iterator<Item = f32> + '_ { self.samples.iter().copied() }

    /// Most recent sample.
    pub fn latest(&self) -> Option<f32> { self.samples.back().copied() }

    /// Drop every sample.
    pub fn clear(&mut self) { self.samples.clear(); }

    /// Map every sample to a bar height in `0..=display_height`.
    ///
    /// Bar `i` belongs to the `i`-th oldest sample. Samples outside the
    /// labels are clamped to the nearest label.
    pub fn bar_heights(
        &self,
        min_label: f32,
        max_label: f32,
        display_height: u32,
    ) -> Vec<u32, N> {
        let mut heights = Vec::new();
        for sample in self.iter() {
            // Cannot overflow: the buffer never holds more than N samples.
            let _ = heights.push(bar_height(sample, min_label, max_label, display_height));
        }
        heights
    }
}

impl<const N: usize> Default for ScrollBuffer<N> {
    fn default() -> Self { Self::new() }
}

/// Map one sample linearly from `[min_label, max_label]` to `[0, display_height]`.
///
/// Never fails: out-of-range samples clamp to the nearest bound, NaN maps to 0,
/// and a degenerate range (`max_label <= min_label`) yields either 0 or the
/// full height.
pub fn bar_height(
    sample: f32,
    min_label: f32,
    max_label: f32,
    display_height: u32,
) -> u32 {
    if sample.is_nan() {
        return 0;
    }

    let range = max_label - min_label;
    if range.is_nan() || range <= 0.0 {
        return if sample <= min_label { 0 } else { display_height };
    }

    let clamped = sample.max(min_label).min(max_label);
    let fraction = (clamped - min_label) / range;
    let height = (fraction * display_height as f32 + 0.5) as u32;
    height.min(display_height)
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    fn contents<const N: usize>(buffer: &ScrollBuffer<N>) -> std::vec::Vec<f32> { buffer.iter().collect() }

    #[test]
    fn test_new_is_empty() {
        let buffer: ScrollBuffer<5> = ScrollBuffer::new();
        assert!(buffer.is_empty());
        assert_eq!(buffer.capacity(), 5);
        assert!(buffer.bar_heights(20.0, 50.0, 30).is_empty());
        assert_eq!(buffer.latest(), None);
    }

    #[test]
    fn test_scroll_scenario() {
        let mut buffer: ScrollBuffer<5> = ScrollBuffer::new();
        for sample in [20.0, 20.0, 20.0] {
            assert_eq!(buffer.push(sample), None);
        }
        assert_eq!(buffer.bar_heights(20.0, 50.0, 30).as_slice(), &[0, 0, 0]);
        assert!(!buffer.is_full());

        buffer.push(50.0);
        buffer.push(80.0);
        assert!(buffer.is_full());
        assert_eq!(contents(&buffer), [20.0, 20.0, 20.0, 50.0, 80.0]);
        let heights = buffer.bar_heights(20.0, 50.0, 30);
        assert_eq!(heights[4], 30);
        assert_eq!(heights[3], 30);

        assert_eq!(buffer.push(30.0), Some(20.0));
        assert_eq!(contents(&buffer), [20.0, 20.0, 50.0, 80.0, 30.0]);
        assert_eq!(buffer.latest(), Some(30.0));
    }

    #[test]
    fn test_bar_height_linear() {
        assert_eq!(bar_height(35.0, 20.0, 50.0, 30), 15);
        assert_eq!(bar_height(21.0, 20.0, 50.0, 30), 1);
        assert_eq!(bar_height(-40.0, 20.0, 50.0, 30), 0);
    }

    #[test]
    fn test_bar_height_degenerate_inputs() {
        assert_eq!(bar_height(f32::NAN, 20.0, 50.0, 30), 0);
        assert_eq!(bar_height(f32::INFINITY, 20.0, 50.0, 30), 30);
        assert_eq!(bar_height(f32::NEG_INFINITY, 20.0, 50.0, 30), 0);
        assert_eq!(bar_height(25.0, 30.0, 30.0, 30), 0);
        assert_eq!(bar_height(35.0, 30.0, 30.0, 30), 30);
        assert_eq!(bar_height(35.0, 20.0, 50.0, 0), 0);
    }

    #[test]
    fn test_clear() {
        let mut buffer: ScrollBuffer<3> = ScrollBuffer::new();
        buffer.push(1.0);
        buffer.push(2.0);
        buffer.clear();
        assert!(buffer.is_empty());
        assert_eq!(buffer.push(3.0), None);
    }

    proptest! {
        #[test]
        fn prop_fifo_and_bounded(samples in prop::collection::vec(-100.0f32..200.0, 0..64)) {
            let mut buffer: ScrollBuffer<8> = ScrollBuffer::new();
            let mut model: std::collections::VecDeque<f32> = std::collections::VecDeque::new();

            for sample in samples {
                let expected_eviction = if model.len() == 8 { model.pop_front() } else { None };
                model.push_back(sample);

                prop_assert_eq!(buffer.push(sample), expected_eviction);
                prop_assert!(buffer.len() <= buffer.capacity());
                prop_assert_eq!(contents(&buffer), model.iter().copied().collect::<std::vec::Vec<_>>());
            }
        }

        #[test]
        fn prop_bar_heights_in_range(
            samples in prop::collection::vec(any::<f32>(), 0..32),
            min in -50.0f32..50.0,
            span in 0.1f32..100.0,
            height in 0u32..200,
        ) {
            let mut buffer: ScrollBuffer<16> = ScrollBuffer::new();
            for sample in samples {
                buffer.push(sample);
            }

            let heights = buffer.bar_heights(min, min + span, height);
            prop_assert_eq!(heights.len(), buffer.len());
            for h in heights {
                prop_assert!(h <= height);
            }
        }
    }
}
