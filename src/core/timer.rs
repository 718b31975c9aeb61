//! Elapsed-time timers for real-time game mechanics.
//!
//! Every timed mechanic is an explicit state transition driven by game time:
//!
//! - `Interval`: fires every `period`; the accumulator resets to zero on fire.
//! - `Countdown`: runs once for a duration, then expires.
//! - `FixedStep`: converts variable frame time into a count of fixed-rate steps.
//!
//! Timers never read a wall clock. The host passes `dt` in, which keeps every
//! game reproducible under test.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Fires once every `period` of accumulated time.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Interval {
    period: Duration,
    elapsed: Duration,
}

impl Interval {
    #[must_use]
    pub fn new(period: Duration) -> Self {
        Self {
            period,
            elapsed: Duration::ZERO,
        }
    }

    /// Accumulate `dt`; returns true when the period has been reached.
    ///
    /// Overshoot is discarded: the accumulator restarts from zero.
    pub fn tick(&mut self, dt: Duration) -> bool {
        self.elapsed += dt;
        if self.elapsed >= self.period {
            self.elapsed = Duration::ZERO;
            true
        } else {
            false
        }
    }

    /// Restart the accumulator.
    pub fn reset(&mut self) {
        self.elapsed = Duration::ZERO;
    }

    #[must_use]
    pub fn elapsed(&self) -> Duration {
        self.elapsed
    }

    #[must_use]
    pub fn period(&self) -> Duration {
        self.period
    }
}

/// A one-shot timer.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Countdown {
    remaining: Option<Duration>,
}

impl Countdown {
    /// A countdown that is not running.
    #[must_use]
    pub fn idle() -> Self {
        Self { remaining: None }
    }

    /// A countdown already running for `duration`.
    #[must_use]
    pub fn running(duration: Duration) -> Self {
        Self {
            remaining: Some(duration),
        }
    }

    /// (Re)start the countdown.
    pub fn start(&mut self, duration: Duration) {
        self.remaining = Some(duration);
    }

    /// Stop without expiring.
    pub fn cancel(&mut self) {
        self.remaining = None;
    }

    /// Advance by `dt`; returns true exactly once, on the tick it expires.
    pub fn tick(&mut self, dt: Duration) -> bool {
        match self.remaining {
            Some(left) if left <= dt => {
                self.remaining = None;
                true
            }
            Some(left) => {
                self.remaining = Some(left - dt);
                false
            }
            None => false,
        }
    }

    #[must_use]
    pub fn is_running(&self) -> bool {
        self.remaining.is_some()
    }

    #[must_use]
    pub fn remaining(&self) -> Option<Duration> {
        self.remaining
    }
}

/// Fixed-rate step accumulator.
///
/// The rate can change between ticks (Wormy speeds up); leftover time is kept.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FixedStep {
    step: Duration,
    accumulated: Duration,
}

impl FixedStep {
    /// A step clock running at `rate` steps per second.
    ///
    /// # Panics
    ///
    /// Panics if `rate` is zero.
    #[must_use]
    pub fn per_second(rate: u32) -> Self {
        assert!(rate > 0, "Step rate must be positive");
        Self {
            step: Duration::from_secs(1) / rate,
            accumulated: Duration::ZERO,
        }
    }

    /// Change the step rate, keeping accumulated time.
    pub fn set_rate(&mut self, rate: u32) {
        assert!(rate > 0, "Step rate must be positive");
        self.step = Duration::from_secs(1) / rate;
    }

    /// Accumulate `dt` and return how many whole steps are due.
    pub fn tick(&mut self, dt: Duration) -> u32 {
        self.accumulated += dt;
        let mut steps = 0;
        while self.accumulated >= self.step {
            self.accumulated -= self.step;
            steps += 1;
        }
        steps
    }

    /// Duration of one step.
    #[must_use]
    pub fn step(&self) -> Duration {
        self.step
    }

    pub fn reset(&mut self) {
        self.accumulated = Duration::ZERO;
    }
}
