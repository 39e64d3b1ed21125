//! Tick pipeline, frame pacing and shutdown.
//!
//! The [`TickScheduler`] drives one tick at a time on the calling thread:
//!
//! ```text
//! SampleSource -> ScrollBuffer -> TileAnimator::advance -> compose -> DisplayTransport
//! ```
//!
//! # Lifecycle
//!
//! `Idle -> Running -> Stopped`, forward only. [`TickScheduler::run`] checks
//! the stop flag between ticks, never during one, so shutdown always follows
//! a complete tick and no partial frame reaches the panel.
//!
//! # Pacing
//!
//! Ticks are serialized: the next tick starts only after the previous flush
//! returned. [`FramePacer`] sleeps until the next deadline; when a tick
//! overruns its deadline the pacer re-anchors to "now" instead of bursting
//! catch-up ticks, so lag stays bounded to one tick.

use core::sync::atomic::{AtomicBool, Ordering};
use core::time::Duration;

use heapless::String;
use log::{debug, info, warn};

use crate::assets::Assets;
use crate::compositor::compose;
use crate::config::{DisplayConfig, STATUS_TEXT_LEN};
use crate::error::StartupError;
use crate::scroll::ScrollBuffer;
use crate::source::SampleSource;
use crate::tiles::TileAnimator;
use crate::transport::DisplayTransport;

/// Ticks between periodic debug stats lines (10 s at 5 FPS).
const STATS_INTERVAL: u64 = 50;

// =============================================================================
// Collaborator Traits
// =============================================================================

/// Provides the short text shown in the status bar.
pub trait StatusSource {
    /// Current status text. Called on the first tick and then at the
    /// configured refresh interval, on the tick thread.
    fn poll(&mut self) -> String<STATUS_TEXT_LEN>;
}

/// Fixed status text.
pub struct StaticStatus(pub &'static str);

impl StatusSource for StaticStatus {
    fn poll(&mut self) -> String<STATUS_TEXT_LEN> { status_string(self.0) }
}

/// Copy as many whole characters of `text` as fit in a status string.
pub fn status_string(text: &str) -> String<STATUS_TEXT_LEN> {
    let mut out = String::new();
    for ch in text.chars() {
        if out.push(ch).is_err() {
            break;
        }
    }
    out
}

/// Monotonic time source used for pacing.
pub trait Clock {
    /// Time since an arbitrary fixed origin.
    fn now(&self) -> Duration;

    /// Block the calling thread.
    fn sleep(
        &mut self,
        duration: Duration,
    );
}

// =============================================================================
// Frame Pacer
// =============================================================================

/// Fixed-cadence deadline tracker with bounded lag.
pub struct FramePacer {
    period: Duration,
    next: Duration,
}

impl FramePacer {
    /// Start pacing; the first deadline is one period after `now`.
    pub fn new(
        period: Duration,
        now: Duration,
    ) -> Self {
        Self {
            period,
            next: now + period,
        }
    }

    /// Sleep until the current deadline and schedule the next one.
    ///
    /// Returns `true` if the deadline had already passed. In that case no
    /// sleep happens and the schedule is re-anchored to the current time.
    pub fn wait<C: Clock>(
        &mut self,
        clock: &mut C,
    ) -> bool {
        let now = clock.now();
        if now < self.next {
            clock.sleep(self.next - now);
            self.next += self.period;
            false
        } else {
            self.next = now + self.period;
            true
        }
    }

    /// Upcoming deadline.
    #[inline]
    pub const fn deadline(&self) -> Duration { self.next }
}

// =============================================================================
// Scheduler State
// =============================================================================

/// Scheduler lifecycle state.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub enum SchedulerState {
    #[default]
    Idle,
    Running,
    Stopped,
}

/// Outcome of one tick.
#[derive(Clone, Copy, PartialEq, Debug)]
pub struct TickReport {
    /// 1-based tick number.
    pub tick: u64,
    /// Sample pushed into the chart this tick.
    pub sample: f32,
    /// Whether the transport accepted the frame.
    pub flushed: bool,
    /// Whether the status text was re-polled this tick.
    pub status_refreshed: bool,
}

/// Running counters since start.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub struct TickStats {
    pub ticks: u64,
    pub flushes: u64,
    pub flush_failures: u64,
    /// Failed flushes since the last successful one.
    pub consecutive_failures: u32,
    pub overruns: u64,
}

// =============================================================================
// Tick Scheduler
// =============================================================================

/// Drives the render pipeline.
///
/// `N` is the chart's scroll-buffer capacity and must equal the chart width
/// in pixels; [`TickScheduler::new`] rejects any other value.
pub struct TickScheduler<'a, S, P, T, const N: usize> {
    config: &'a DisplayConfig,
    animator: &'a TileAnimator,
    assets: &'a Assets,
    source: S,
    status: P,
    transport: T,
    chart: ScrollBuffer<N>,
    previous: f32,
    status_text: String<STATUS_TEXT_LEN>,
    refresh_ticks: u32,
    ticks_until_poll: u32,
    state: SchedulerState,
    stats: TickStats,
}

impl<'a, S, P, T, const N: usize> TickScheduler<'a, S, P, T, N>
where
    S: SampleSource,
    P: StatusSource,
    T: DisplayTransport,
{
    /// Validate the configuration and build an idle scheduler.
    pub fn new(
        config: &'a DisplayConfig,
        animator: &'a TileAnimator,
        assets: &'a Assets,
        source: S,
        status: P,
        transport: T,
    ) -> Result<Self, StartupError> {
        config.validate(N)?;
        Ok(Self {
            config,
            animator,
            assets,
            source,
            status,
            transport,
            chart: ScrollBuffer::new(),
            previous: config.walk.initial,
            status_text: String::new(),
            refresh_ticks: config.status_refresh_ticks(),
            ticks_until_poll: 0,
            state: SchedulerState::Idle,
            stats: TickStats::default(),
        })
    }

    /// `Idle -> Running`. Returns `false` from any other state.
    pub fn start(&mut self) -> bool {
        if self.state != SchedulerState::Idle {
            warn!("scheduler start ignored in state {:?}", self.state);
            return false;
        }
        self.state = SchedulerState::Running;
        info!(
            "dashboard started: {} ms ticks, {} chart columns",
            self.config.tick_interval.as_millis(),
            N
        );
        true
    }

    /// `Idle | Running -> Stopped`. Returns `false` if already stopped.
    pub fn stop(&mut self) -> bool {
        if self.state == SchedulerState::Stopped {
            return false;
        }
        self.state = SchedulerState::Stopped;
        info!(
            "dashboard stopped after {} ticks ({} flushed, {} failed, {} overruns)",
            self.stats.ticks, self.stats.flushes, self.stats.flush_failures, self.stats.overruns
        );
        true
    }

    /// Run one complete tick. Returns `None` unless the scheduler is running.
    pub fn tick(&mut self) -> Option<TickReport> {
        if self.state != SchedulerState::Running {
            return None;
        }
        let tick = self.stats.ticks + 1;

        let sample = self.source.next_sample(self.previous);
        self.previous = sample;
        self.chart.push(sample);
        self.animator.advance();

        let status_refreshed = self.ticks_until_poll == 0;
        if status_refreshed {
            self.status_text = self.status.poll();
            self.ticks_until_poll = self.refresh_ticks;
        }
        self.ticks_until_poll -= 1;

        let tiles = self.animator.snapshot();
        let frame = compose(&tiles, &self.chart, &self.status_text, self.config, self.assets);

        let flushed = match self.transport.flush(frame) {
            Ok(()) => {
                if self.stats.consecutive_failures > 0 {
                    info!(
                        "display recovered on tick {} after {} failed flushes",
                        tick, self.stats.consecutive_failures
                    );
                }
                self.stats.consecutive_failures = 0;
                self.stats.flushes += 1;
                true
            }
            Err(err) => {
                self.stats.flush_failures += 1;
                self.stats.consecutive_failures = self.stats.consecutive_failures.saturating_add(1);
                if self.stats.consecutive_failures == 1 {
                    warn!("tick {tick}: flush failed: {err}");
                } else {
                    debug!("tick {tick}: flush failed again: {err}");
                }
                false
            }
        };

        self.stats.ticks = tick;
        Some(TickReport {
            tick,
            sample,
            flushed,
            status_refreshed,
        })
    }

    /// Tick at the configured cadence until `stop` is set, then stop.
    ///
    /// The flag is checked between ticks only. Returns the final stats.
    pub fn run<C: Clock>(
        &mut self,
        clock: &mut C,
        stop: &AtomicBool,
    ) -> TickStats {
        if !self.start() {
            return self.stats;
        }

        let mut pacer = FramePacer::new(self.config.tick_interval, clock.now());
        while !stop.load(Ordering::Acquire) {
            self.tick();
            if stop.load(Ordering::Acquire) {
                break;
            }
            if pacer.wait(clock) {
                self.stats.overruns += 1;
                debug!("tick {} overran its {:?} budget", self.stats.ticks, self.config.tick_interval);
            }
            if self.stats.ticks % STATS_INTERVAL == 0 {
                debug!("stats: {:?}", self.stats);
            }
        }

        self.stop();
        self.stats
    }

    #[inline]
    pub const fn state(&self) -> SchedulerState { self.state }

    #[inline]
    pub const fn stats(&self) -> TickStats { self.stats }

    /// Temperature history shown on the chart.
    #[inline]
    pub const fn chart(&self) -> &ScrollBuffer<N> { &self.chart }

    /// Last polled status text.
    #[inline]
    pub fn status_text(&self) -> &str { &self.status_text }

    /// Give back the transport, e.g. to inspect it after shutdown.
    pub fn into_transport(self) -> T { self.transport }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use core::fmt::Write;
    use std::collections::VecDeque;
    use std::sync::atomic::AtomicUsize;

    use super::*;
    use crate::assets::{AssetLoader, ProceduralAssets};
    use crate::config::CHART_COLUMNS;
    use crate::framebuffer::FrameBuffer;
    use crate::source::SequenceSource;
    use crate::tiles::{Status, TileId};
    use crate::transport::TransportError;

    // -------------------------------------------------------------------------
    // Test doubles
    // -------------------------------------------------------------------------

    #[derive(Default)]
    struct FakeClock {
        now: Duration,
        sleeps: Vec<Duration>,
        /// Added to `now` on every `now()` call to simulate tick cost.
        cost: Duration,
        calls: std::cell::Cell<u32>,
    }

    impl Clock for FakeClock {
        fn now(&self) -> Duration {
            let calls = self.calls.get() + 1;
            self.calls.set(calls);
            self.now + self.cost * calls
        }

        fn sleep(
            &mut self,
            duration: Duration,
        ) {
            self.sleeps.push(duration);
            self.now += duration;
        }
    }

    /// Records flushes; replays scripted results, then succeeds.
    #[derive(Default)]
    struct MockTransport<'f> {
        script: VecDeque<Result<(), TransportError>>,
        frames: Vec<FrameBuffer>,
        stop_after: Option<(usize, &'f AtomicBool)>,
    }

    impl DisplayTransport for MockTransport<'_> {
        fn flush(
            &mut self,
            frame: FrameBuffer,
        ) -> Result<(), TransportError> {
            let result = self.script.pop_front().unwrap_or(Ok(()));
            if result.is_ok() {
                self.frames.push(frame);
            }
            if let Some((limit, flag)) = self.stop_after {
                if self.frames.len() >= limit {
                    flag.store(true, Ordering::Release);
                }
            }
            result
        }
    }

    struct CountingStatus<'c>(&'c AtomicUsize);

    impl StatusSource for CountingStatus<'_> {
        fn poll(&mut self) -> String<STATUS_TEXT_LEN> {
            let n = self.0.fetch_add(1, Ordering::Relaxed) + 1;
            let mut text = String::new();
            let _ = write!(text, "poll {n}");
            text
        }
    }

    fn assets(config: &DisplayConfig) -> Assets {
        ProceduralAssets::new(config).load().unwrap().validate(config).unwrap()
    }

    type TestScheduler<'a, P> = TickScheduler<'a, SequenceSource<'a>, P, MockTransport<'a>, CHART_COLUMNS>;

    fn scheduler<'a, P: StatusSource>(
        config: &'a DisplayConfig,
        animator: &'a TileAnimator,
        assets: &'a Assets,
        samples: &'a [f32],
        status: P,
        transport: MockTransport<'a>,
    ) -> TestScheduler<'a, P> {
        TickScheduler::new(config, animator, assets, SequenceSource::new(samples), status, transport).unwrap()
    }

    // -------------------------------------------------------------------------
    // Tests
    // -------------------------------------------------------------------------

    #[test]
    fn test_state_transitions() {
        let config = DisplayConfig::DEFAULT;
        let animator = TileAnimator::from_config(&config);
        let assets = assets(&config);
        let mut s = scheduler(&config, &animator, &assets, &[], StaticStatus("ip"), MockTransport::default());

        assert_eq!(s.state(), SchedulerState::Idle);
        assert_eq!(s.tick(), None);
        assert!(s.start());
        assert!(!s.start());
        assert_eq!(s.state(), SchedulerState::Running);
        assert!(s.tick().is_some());
        assert!(s.stop());
        assert!(!s.stop());
        assert!(!s.start());
        assert_eq!(s.state(), SchedulerState::Stopped);
        assert_eq!(s.tick(), None);
    }

    #[test]
    fn test_stop_from_idle() {
        let config = DisplayConfig::DEFAULT;
        let animator = TileAnimator::from_config(&config);
        let assets = assets(&config);
        let mut s = scheduler(&config, &animator, &assets, &[], StaticStatus(""), MockTransport::default());
        assert!(s.stop());
        assert_eq!(s.state(), SchedulerState::Stopped);
    }

    #[test]
    fn test_new_rejects_wrong_chart_capacity() {
        let config = DisplayConfig::DEFAULT;
        let animator = TileAnimator::from_config(&config);
        let assets = assets(&config);
        let result: Result<TickScheduler<'_, _, _, _, 5>, _> = TickScheduler::new(
            &config,
            &animator,
            &assets,
            SequenceSource::new(&[]),
            StaticStatus(""),
            MockTransport::default(),
        );
        assert!(matches!(result, Err(StartupError::ChartCapacity { capacity: 5, .. })));
    }

    #[test]
    fn test_tick_pipeline() {
        let config = DisplayConfig::DEFAULT;
        let animator = TileAnimator::from_config(&config);
        let assets = assets(&config);
        let mut s = scheduler(&config, &animator, &assets, &[21.0, 22.5], StaticStatus("10.0.0.2"), MockTransport::default());
        s.start();

        let first = s.tick().unwrap();
        assert_eq!(first.tick, 1);
        assert_eq!(first.sample, 21.0);
        assert!(first.flushed);
        assert!(first.status_refreshed);
        assert_eq!(animator.phase(TileId::Fans), 1);
        assert_eq!(s.status_text(), "10.0.0.2");

        let second = s.tick().unwrap();
        assert_eq!(second.sample, 22.5);
        // Sequence exhausted: hold the previous value
        assert_eq!(s.tick().unwrap().sample, 22.5);
        assert_eq!(s.chart().iter().collect::<Vec<_>>(), [21.0, 22.5, 22.5]);
        assert_eq!(s.stats().flushes, 3);
    }

    #[test]
    fn test_first_sample_uses_initial_walk_value() {
        let config = DisplayConfig::DEFAULT;
        let animator = TileAnimator::from_config(&config);
        let assets = assets(&config);
        let mut s = TickScheduler::<_, _, _, CHART_COLUMNS>::new(
            &config,
            &animator,
            &assets,
            |previous: f32| previous + 1.0,
            StaticStatus(""),
            MockTransport::default(),
        )
        .unwrap();
        s.start();
        assert_eq!(s.tick().unwrap().sample, config.walk.initial + 1.0);
    }

    #[test]
    fn test_flush_error_does_not_stop_next_tick() {
        let config = DisplayConfig::DEFAULT;
        let animator = TileAnimator::from_config(&config);
        let assets = assets(&config);
        let transport = MockTransport {
            script: VecDeque::from([Ok(()), Err(TransportError::Bus), Err(TransportError::Disconnected)]),
            ..MockTransport::default()
        };
        let mut s = scheduler(&config, &animator, &assets, &[], StaticStatus(""), transport);
        s.start();

        assert!(s.tick().unwrap().flushed);
        assert!(!s.tick().unwrap().flushed);
        assert!(!s.tick().unwrap().flushed);
        assert_eq!(s.stats().consecutive_failures, 2);

        let recovered = s.tick().unwrap();
        assert!(recovered.flushed);
        assert_eq!(recovered.tick, 4);

        let stats = s.stats();
        assert_eq!(stats.flushes, 2);
        assert_eq!(stats.flush_failures, 2);
        assert_eq!(stats.consecutive_failures, 0);
        assert_eq!(s.into_transport().frames.len(), 2);
    }

    #[test]
    fn test_status_polled_at_refresh_interval() {
        let config = DisplayConfig::DEFAULT;
        let animator = TileAnimator::from_config(&config);
        let assets = assets(&config);
        let polls = AtomicUsize::new(0);
        let mut s = scheduler(&config, &animator, &assets, &[], CountingStatus(&polls), MockTransport::default());
        s.start();

        let refreshed: Vec<u64> = (0..12)
            .filter_map(|_| s.tick())
            .filter(|report| report.status_refreshed)
            .map(|report| report.tick)
            .collect();
        assert_eq!(refreshed, [1, 6, 11]);
        assert_eq!(polls.load(Ordering::Relaxed), 3);
        assert_eq!(s.status_text(), "poll 3");
    }

    #[test]
    fn test_status_change_visible_next_frame() {
        let config = DisplayConfig::DEFAULT;
        let animator = TileAnimator::from_config(&config);
        let assets = assets(&config);
        let mut s = scheduler(&config, &animator, &assets, &[], StaticStatus(""), MockTransport::default());
        s.start();

        s.tick();
        animator.set_status(TileId::Probes, Status::Bad);
        s.tick();

        let probe = config.tile(TileId::Probes).area.top_left + embedded_graphics::prelude::Point::new(1, 1);
        let frames = s.into_transport().frames;
        assert_eq!(frames[0].pixel(probe), Some(config.palette.tile_fill(Status::NoSignal)));
        assert_eq!(frames[1].pixel(probe), Some(config.palette.tile_fill(Status::Bad)));
    }

    #[test]
    fn test_pacer_sleeps_to_deadline() {
        let mut clock = FakeClock::default();
        let mut pacer = FramePacer::new(Duration::from_millis(200), Duration::ZERO);

        clock.now = Duration::from_millis(50);
        assert!(!pacer.wait(&mut clock));
        assert_eq!(clock.sleeps, [Duration::from_millis(150)]);
        assert_eq!(pacer.deadline(), Duration::from_millis(400));
    }

    #[test]
    fn test_pacer_reanchors_after_overrun() {
        let mut clock = FakeClock::default();
        let mut pacer = FramePacer::new(Duration::from_millis(200), Duration::ZERO);

        // Tick took 700 ms: no catch-up burst, next deadline is one period out
        clock.now = Duration::from_millis(700);
        assert!(pacer.wait(&mut clock));
        assert!(clock.sleeps.is_empty());
        assert_eq!(pacer.deadline(), Duration::from_millis(900));

        clock.now = Duration::from_millis(750);
        assert!(!pacer.wait(&mut clock));
        assert_eq!(clock.sleeps, [Duration::from_millis(150)]);
    }

    #[test]
    fn test_run_stops_after_complete_tick() {
        let config = DisplayConfig::DEFAULT;
        let animator = TileAnimator::from_config(&config);
        let assets = assets(&config);
        let stop = AtomicBool::new(false);
        let transport = MockTransport {
            stop_after: Some((3, &stop)),
            ..MockTransport::default()
        };
        let mut s = scheduler(&config, &animator, &assets, &[], StaticStatus(""), transport);
        let mut clock = FakeClock::default();

        let stats = s.run(&mut clock, &stop);

        assert_eq!(s.state(), SchedulerState::Stopped);
        assert_eq!(stats.ticks, 3);
        assert_eq!(stats.flushes, 3);
        // No sleep after the tick that observed the stop request
        assert_eq!(clock.sleeps.len(), 2);
        assert!(clock.sleeps.iter().all(|&d| d == config.tick_interval));
    }

    #[test]
    fn test_run_counts_overruns() {
        let config = DisplayConfig::DEFAULT;
        let animator = TileAnimator::from_config(&config);
        let assets = assets(&config);
        let stop = AtomicBool::new(false);
        let transport = MockTransport {
            stop_after: Some((4, &stop)),
            ..MockTransport::default()
        };
        let mut s = scheduler(&config, &animator, &assets, &[], StaticStatus(""), transport);
        // Every clock read advances 300 ms, longer than the 200 ms period
        let mut clock = FakeClock {
            cost: Duration::from_millis(300),
            ..FakeClock::default()
        };

        let stats = s.run(&mut clock, &stop);
        assert_eq!(stats.ticks, 4);
        assert_eq!(stats.overruns, 3);
        assert!(clock.sleeps.is_empty());
    }

    #[test]
    fn test_run_with_stop_already_set() {
        let config = DisplayConfig::DEFAULT;
        let animator = TileAnimator::from_config(&config);
        let assets = assets(&config);
        let stop = AtomicBool::new(true);
        let mut s = scheduler(&config, &animator, &assets, &[], StaticStatus(""), MockTransport::default());

        let stats = s.run(&mut FakeClock::default(), &stop);
        assert_eq!(stats.ticks, 0);
        assert_eq!(s.state(), SchedulerState::Stopped);
    }

    #[test]
    fn test_status_string_truncates_on_char_boundary() {
        let long = "ééééééééééééééééééééééééé";
        let text = status_string(long);
        assert!(text.len() <= STATUS_TEXT_LEN);
        assert_eq!(text.chars().count(), STATUS_TEXT_LEN / 2);
        assert_eq!(status_string("No IP").as_str(), "No IP");
    }
}
