//! Value smoothing.

#![allow(clippy::should_implement_trait)]
use super::interp::lerp;

/// A per-sample linear value smoother which ramps to a new target over a
/// fixed duration.
#[derive(Debug, Default, Clone)]
pub struct Smoother {
    start_value: f64,
    target_value: f64,
    current_value: f64,

    /// Progress of the current ramp, `0.0..=1.0`.
    progress: f64,
    /// Progress made per sample.
    increment: f64,
    duration_ms: f64,

    sample_rate: f64,
}

impl Smoother {
    /// Creates a new `Smoother` resting at `target_value`.
    pub fn new(duration_ms: f64, target_value: f64, sample_rate: f64) -> Self {
        let mut s = Self {
            start_value: target_value,
            target_value,
            current_value: target_value,
            progress: 1.0,
            increment: 0.0,
            duration_ms,
            sample_rate,
        };
        s.update_increment();
        s
    }

    /// Yields the `Smoother`'s next smoothed value, intended to be called
    /// per sample.
    pub fn next(&mut self) -> f64 {
        if !self.is_active() {
            return self.current_value;
        }

        self.progress += self.increment;
        // accumulated increments can land a hair under 1.0
        if self.progress >= 1.0 - 1e-9 {
            self.progress = 1.0;
        }
        self.current_value =
            lerp(self.start_value, self.target_value, self.progress);
        self.current_value
    }

    /// Sets the new target value of the `Smoother`. The ramp starts from the
    /// current value.
    pub fn set_target_value(&mut self, target_value: f64) {
        self.start_value = self.current_value;
        self.target_value = target_value;
        self.progress = if self.increment.is_finite() && self.increment < 1.0 {
            0.0
        }
        else {
            1.0
        };

        if !self.is_active() {
            self.current_value = target_value;
        }
    }

    /// Forces the `Smoother` to reach its target value immediately.
    pub fn finish(&mut self) {
        self.progress = 1.0;
        self.current_value = self.target_value;
    }

    /// Returns the last value returned by [`next()`](Self::next).
    pub fn current_value(&self) -> f64 {
        self.current_value
    }

    pub fn target_value(&self) -> f64 {
        self.target_value
    }

    /// Resets the smoothing period of the `Smoother` in milliseconds. Takes
    /// effect for the next ramp.
    pub fn set_smoothing_period(&mut self, duration_ms: f64) {
        self.duration_ms = duration_ms;
        self.update_increment();
    }

    /// Returns whether the `Smoother` is actively smoothing or not.
    pub fn is_active(&self) -> bool {
        self.progress < 1.0
    }

    fn update_increment(&mut self) {
        let samples = self.duration_ms * 0.001 * self.sample_rate;
        self.increment = if samples >= 1.0 { samples.recip() } else { 1.0 };
    }
}
