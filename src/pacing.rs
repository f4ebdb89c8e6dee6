//! Tick-rate limiting and rate reporting.

use std::time::{Duration, Instant};

/// Decides when the next tick is due for a target rate.
pub struct FramePacer {
    frame_duration: Duration,
    last_tick: Option<Instant>,
}

impl FramePacer {
    pub fn new(fps: u32) -> Self {
        Self {
            frame_duration: Duration::from_secs_f64(1.0 / fps.max(1) as f64),
            last_tick: None,
        }
    }

    pub fn frame_duration(&self) -> Duration {
        self.frame_duration
    }

    /// Returns true and records `now` if a full frame has elapsed since the
    /// last accepted tick. The first call is always due.
    pub fn due(&mut self, now: Instant) -> bool {
        match self.last_tick {
            Some(last) if now.duration_since(last) < self.frame_duration => false,
            _ => {
                self.last_tick = Some(now);
                true
            }
        }
    }

    /// Time left in the current frame, measured from `started`.
    pub fn remaining(&self, started: Instant, now: Instant) -> Option<Duration> {
        self.frame_duration.checked_sub(now.duration_since(started))
    }
}

/// Counts events and reports a rate once per interval.
pub struct RateCounter {
    count: u32,
    last_time: Instant,
    interval: Duration,
}

impl RateCounter {
    pub fn new(interval: Duration) -> Self {
        Self {
            count: 0,
            last_time: Instant::now(),
            interval,
        }
    }

    /// Records one event at `now`; returns the rate once the interval has passed.
    pub fn record(&mut self, now: Instant) -> Option<f32> {
        self.count += 1;
        let elapsed = now.duration_since(self.last_time);
        if elapsed >= self.interval {
            let rate = self.count as f32 / elapsed.as_secs_f32();
            self.count = 0;
            self.last_time = now;
            Some(rate)
        } else {
            None
        }
    }
}

impl Default for RateCounter {
    fn default() -> Self {
        Self::new(Duration::from_secs(1))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pacer_waits_a_full_frame() {
        let mut pacer = FramePacer::new(50);
        assert_eq!(pacer.frame_duration(), Duration::from_millis(20));

        let t0 = Instant::now();
        assert!(pacer.due(t0));
        assert!(!pacer.due(t0 + Duration::from_millis(5)));
        assert!(pacer.due(t0 + Duration::from_millis(20)));
        assert!(!pacer.due(t0 + Duration::from_millis(39)));
    }

    #[test]
    fn test_pacer_remaining() {
        let pacer = FramePacer::new(10);
        let t0 = Instant::now();
        assert_eq!(
            pacer.remaining(t0, t0 + Duration::from_millis(30)),
            Some(Duration::from_millis(70))
        );
        assert_eq!(pacer.remaining(t0, t0 + Duration::from_millis(150)), None);
    }

    #[test]
    fn test_rate_counter_reports_per_interval() {
        let mut counter = RateCounter::new(Duration::from_secs(1));
        let t0 = counter.last_time;
        for i in 1..10 {
            assert_eq!(counter.record(t0 + Duration::from_millis(i * 100)), None);
        }
        let rate = counter.record(t0 + Duration::from_secs(1)).unwrap();
        assert!((rate - 10.0).abs() < 1e-3);
        assert_eq!(counter.count, 0);
    }
}
