//! Sampled instruments.
//!
//! A composition analyzer scans on a fixed period. Each scan publishes the
//! sample it captured on the previous scan (plus measurement noise) and
//! captures a new one, giving a one-period dead time on top of the hold.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{ControlError, ControlResult};

/// Sample period of an instrument.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SampleConfig {
    /// Sample period (h).
    pub dt: f64,
}

impl SampleConfig {
    /// # Errors
    ///
    /// Returns error if `dt` is not positive.
    pub fn new(dt: f64) -> ControlResult<Self> {
        if !(dt.is_finite() && dt > 0.0) {
            return Err(ControlError::InvalidArg {
                what: "sample period must be positive",
            });
        }
        Ok(Self { dt })
    }
}

/// Tracks the next scheduled scan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SampleClock {
    pub config: SampleConfig,
    /// Time of next scheduled sample.
    pub next_sample_time: f64,
}

impl SampleClock {
    pub fn new(config: SampleConfig, initial_time: f64) -> Self {
        Self {
            config,
            next_sample_time: initial_time + config.dt,
        }
    }

    /// Returns `true` if `current_time >= next_sample_time`.
    pub fn should_sample(&self, current_time: f64) -> bool {
        current_time >= self.next_sample_time
    }

    /// Schedule the next sample one period after the previous schedule.
    ///
    /// The schedule does not catch up: a host stepping over several periods
    /// gets one scan per call.
    pub fn advance(&mut self) {
        self.next_sample_time += self.config.dt;
    }

    pub fn reset(&mut self, current_time: f64) {
        self.next_sample_time = current_time + self.config.dt;
    }
}

/// Analyzer with `N` channels and a one-scan delay.
#[derive(Debug, Clone, PartialEq)]
pub struct DelayedAnalyzer<const N: usize> {
    clock: SampleClock,
    captured: [f64; N],
    reported: [f64; N],
}

impl<const N: usize> DelayedAnalyzer<N> {
    pub fn new(config: SampleConfig) -> Self {
        Self {
            clock: SampleClock::new(config, 0.0),
            captured: [0.0; N],
            reported: [0.0; N],
        }
    }

    /// Start over at `t0`: report and capture `current` exactly, no noise.
    pub fn seed(&mut self, t0: f64, current: &[f64; N]) {
        self.captured = *current;
        self.reported = *current;
        self.clock.reset(t0);
    }

    /// Scan if due. `noise(i)` is called once per channel, in ascending
    /// order, only when a scan happens.
    pub fn scan(&mut self, t: f64, current: &[f64; N], mut noise: impl FnMut(usize) -> f64) -> bool {
        if !self.clock.should_sample(t) {
            return false;
        }
        for i in 0..N {
            self.reported[i] = self.captured[i] + noise(i);
            self.captured[i] = current[i];
        }
        self.clock.advance();
        debug!(t, next = self.clock.next_sample_time, channels = N, "analyzer scan");
        true
    }

    pub fn reported(&self) -> &[f64; N] {
        &self.reported
    }

    pub fn captured(&self) -> &[f64; N] {
        &self.captured
    }

    pub fn next_sample_time(&self) -> f64 {
        self.clock.next_sample_time
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sample_config_rejects_non_positive() {
        assert!(SampleConfig::new(0.0).is_err());
        assert!(SampleConfig::new(-0.1).is_err());
        assert!(SampleConfig::new(0.25).is_ok());
    }

    #[test]
    fn sample_clock_basic() {
        let config = SampleConfig::new(0.1).unwrap();
        let mut clock = SampleClock::new(config, 0.0);

        assert!(!clock.should_sample(0.0));
        assert!(clock.should_sample(0.1));

        clock.advance();
        assert!(!clock.should_sample(0.1));
        assert!(clock.should_sample(0.2));
    }

    #[test]
    fn seeded_analyzer_reports_truth() {
        let mut a = DelayedAnalyzer::<2>::new(SampleConfig::new(0.1).unwrap());
        a.seed(0.0, &[1.0, 2.0]);
        assert_eq!(a.reported(), &[1.0, 2.0]);
        assert!(!a.scan(0.05, &[5.0, 6.0], |_| 100.0));
        assert_eq!(a.reported(), &[1.0, 2.0]);
    }

    #[test]
    fn scan_reports_previous_capture() {
        let mut a = DelayedAnalyzer::<2>::new(SampleConfig::new(0.1).unwrap());
        a.seed(0.0, &[1.0, 2.0]);

        assert!(a.scan(0.1, &[3.0, 4.0], |_| 0.0));
        assert_eq!(a.reported(), &[1.0, 2.0]);
        assert_eq!(a.captured(), &[3.0, 4.0]);

        assert!(a.scan(0.2, &[5.0, 6.0], |i| i as f64 * 0.5));
        assert_eq!(a.reported(), &[3.0, 4.5]);
    }

    #[test]
    fn noise_called_in_order_only_on_scan() {
        let mut a = DelayedAnalyzer::<3>::new(SampleConfig::new(0.25).unwrap());
        a.seed(0.0, &[0.0; 3]);
        let mut calls = Vec::new();
        a.scan(0.2, &[0.0; 3], |i| {
            calls.push(i);
            0.0
        });
        assert!(calls.is_empty());
        a.scan(0.25, &[0.0; 3], |i| {
            calls.push(i);
            0.0
        });
        assert_eq!(calls, vec![0, 1, 2]);
        assert!((a.next_sample_time() - 0.5).abs() < 1e-12);
    }
}
