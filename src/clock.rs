//! Frame rate and the clocks that pace playback.

use std::time::Duration;

use crate::PlaybackError;

/// Playback rate in frames per second, shared by every animation mode.
///
/// ## Example
///
/// ```rust
/// use taskbar_anim_core::FrameRate;
/// use std::time::Duration;
///
/// let fps = FrameRate::new(30).unwrap();
/// assert_eq!(fps.interval_ms(), 33);
/// assert_eq!(fps.interval(), Duration::from_nanos(33_333_333));
///
/// assert!(FrameRate::new(0).is_err());
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "i32"))]
pub struct FrameRate(u32);

impl FrameRate {
    /// 60 fps, the overlay's out-of-the-box rate.
    pub const DEFAULT: FrameRate = FrameRate(60);

    /// Validate a frame rate. Non-positive values are rejected.
    pub fn new(fps: i32) -> Result<Self, PlaybackError> {
        match u32::try_from(fps) {
            Ok(fps) if fps > 0 => Ok(Self(fps)),
            _ => Err(PlaybackError::InvalidFrameRate(fps)),
        }
    }

    #[inline]
    pub fn fps(self) -> u32 {
        self.0
    }

    /// Tick interval, `1s / fps` truncated to whole nanoseconds.
    #[inline]
    pub fn interval(self) -> Duration {
        Duration::from_secs(1) / self.0
    }

    /// Tick interval truncated to whole milliseconds.
    #[inline]
    pub fn interval_ms(self) -> u32 {
        1000 / self.0
    }
}

impl TryFrom<i32> for FrameRate {
    type Error = PlaybackError;

    fn try_from(fps: i32) -> Result<Self, Self::Error> {
        Self::new(fps)
    }
}

impl Default for FrameRate {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// A periodic timer with a settable interval.
///
/// A clock only tracks whether it is armed and how often it fires; tick
/// delivery belongs to whoever drives it. The playback controller keeps two
/// clocks and never runs both at once.
pub trait Clock {
    /// Begin a fresh tick sequence. Restarting a running clock drops its
    /// current phase.
    fn start(&mut self);

    /// Cancel pending ticks.
    fn stop(&mut self);

    /// Change the interval. A running clock picks it up from its next tick;
    /// setting the current interval again leaves the phase alone.
    fn set_interval(&mut self, interval: Duration);

    fn interval(&self) -> Duration;

    fn is_running(&self) -> bool;
}

/// Clock for hosts that deliver ticks themselves.
///
/// It records its state so the host (or a test) can read which clock should
/// be firing and how often.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ManualClock {
    running: bool,
    interval: Duration,
    starts: u32,
}

impl ManualClock {
    pub fn new(interval: Duration) -> Self {
        Self {
            running: false,
            interval,
            starts: 0,
        }
    }

    /// How many times `start()` has been called.
    #[inline]
    pub fn starts(&self) -> u32 {
        self.starts
    }
}

impl Clock for ManualClock {
    fn start(&mut self) {
        self.running = true;
        self.starts += 1;
    }

    fn stop(&mut self) {
        self.running = false;
    }

    fn set_interval(&mut self, interval: Duration) {
        self.interval = interval;
    }

    fn interval(&self) -> Duration {
        self.interval
    }

    fn is_running(&self) -> bool {
        self.running
    }
}

#[cfg(feature = "runtime")]
pub use self::tokio_clock::TokioClock;

#[cfg(feature = "runtime")]
mod tokio_clock {
    use std::time::Duration;

    use tokio::time::{self, Instant, Interval, MissedTickBehavior};

    use super::Clock;

    /// Clock backed by a `tokio::time::Interval`.
    ///
    /// The interval is armed lazily on the first `tick()` after a start or
    /// interval change, so the clock can be built outside a runtime. Late
    /// ticks are coalesced rather than replayed.
    #[derive(Debug)]
    pub struct TokioClock {
        running: bool,
        period: Duration,
        timer: Option<Interval>,
    }

    impl TokioClock {
        pub fn new(period: Duration) -> Self {
            Self {
                running: false,
                period,
                timer: None,
            }
        }

        /// Wait for the next tick. Never resolves while the clock is stopped.
        ///
        /// Cancel safe, so it can sit in a `tokio::select!` branch.
        pub async fn tick(&mut self) {
            if !self.running {
                std::future::pending::<()>().await;
            }
            let period = self.period;
            let timer = self.timer.get_or_insert_with(|| {
                let mut timer = time::interval_at(Instant::now() + period, period);
                timer.set_missed_tick_behavior(MissedTickBehavior::Skip);
                timer
            });
            timer.tick().await;
        }
    }

    impl Clock for TokioClock {
        fn start(&mut self) {
            self.running = true;
            self.timer = None;
        }

        fn stop(&mut self) {
            self.running = false;
            self.timer = None;
        }

        fn set_interval(&mut self, interval: Duration) {
            if interval != self.period {
                self.period = interval;
                self.timer = None;
            }
        }

        fn interval(&self) -> Duration {
            self.period
        }

        fn is_running(&self) -> bool {
            self.running
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_frame_rate_rejects_non_positive() {
        assert_eq!(FrameRate::new(0), Err(PlaybackError::InvalidFrameRate(0)));
        assert_eq!(FrameRate::new(-5), Err(PlaybackError::InvalidFrameRate(-5)));
        assert_eq!(FrameRate::new(1).map(FrameRate::fps), Ok(1));
    }

    #[test]
    fn test_interval() {
        let fps = FrameRate::new(24).unwrap();
        assert_eq!(fps.interval_ms(), 41); // 1000/24 ≈ 41.67
        assert_eq!(fps.interval(), Duration::from_nanos(41_666_666));

        assert_eq!(FrameRate::DEFAULT.interval_ms(), 16);
        assert_eq!(FrameRate::new(50).unwrap().interval(), Duration::from_millis(20));
    }

    #[test]
    fn test_manual_clock_lifecycle() {
        let mut clock = ManualClock::new(Duration::from_millis(16));
        assert!(!clock.is_running());

        clock.start();
        clock.start();
        assert!(clock.is_running());
        assert_eq!(clock.starts(), 2);

        clock.set_interval(Duration::from_millis(33));
        assert_eq!(clock.interval(), Duration::from_millis(33));

        clock.stop();
        assert!(!clock.is_running());
    }

    #[cfg(feature = "runtime")]
    #[tokio::test(start_paused = true)]
    async fn test_tokio_clock_ticks_after_one_interval() {
        let mut clock = TokioClock::new(Duration::from_millis(100));
        clock.start();

        let before = tokio::time::Instant::now();
        clock.tick().await;
        assert_eq!(before.elapsed(), Duration::from_millis(100));

        clock.tick().await;
        assert_eq!(before.elapsed(), Duration::from_millis(200));
    }

    #[cfg(feature = "runtime")]
    #[tokio::test(start_paused = true)]
    async fn test_tokio_clock_stopped_never_ticks() {
        let mut clock = TokioClock::new(Duration::from_millis(10));
        clock.start();
        clock.stop();

        let waited = tokio::time::timeout(Duration::from_secs(5), clock.tick()).await;
        assert!(waited.is_err());
    }

    #[cfg(feature = "runtime")]
    #[tokio::test(start_paused = true)]
    async fn test_tokio_clock_interval_change_rearms() {
        let mut clock = TokioClock::new(Duration::from_millis(100));
        clock.start();
        clock.tick().await;

        clock.set_interval(Duration::from_millis(40));
        let before = tokio::time::Instant::now();
        clock.tick().await;
        assert_eq!(before.elapsed(), Duration::from_millis(40));
    }

    #[cfg(feature = "runtime")]
    #[tokio::test(start_paused = true)]
    async fn test_tokio_clock_same_interval_keeps_phase() {
        let mut clock = TokioClock::new(Duration::from_millis(100));
        clock.start();
        clock.tick().await;

        tokio::time::sleep(Duration::from_millis(60)).await;
        clock.set_interval(Duration::from_millis(100));
        let before = tokio::time::Instant::now();
        clock.tick().await;
        assert_eq!(before.elapsed(), Duration::from_millis(40));
    }
}
