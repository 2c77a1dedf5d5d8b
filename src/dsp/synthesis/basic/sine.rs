//! A sine wave generator.

use std::f64::consts::TAU;

/// Basic non-anti-aliased sine wave oscillator.
///
/// The phase is tracked in cycles (`0.0..1.0`) so it can be offset by a
/// fraction of a period.
#[derive(Debug, Clone, Copy)]
pub struct SineOsc {
    phase: f64,
    phase_increment: f64,
    amplitude: f64,
}

impl SineOsc {
    pub fn new(freq_hz: f64, sample_rate: f64) -> Self {
        debug_assert!(0.0 < freq_hz && freq_hz <= sample_rate / 2.0);

        Self {
            phase: 0.0,
            phase_increment: freq_hz / sample_rate,
            amplitude: 1.0,
        }
    }

    /// Returns `Self` with a peak amplitude of `amplitude`.
    pub fn with_amplitude(mut self, amplitude: f64) -> Self {
        self.amplitude = amplitude;
        self
    }

    /// Produces the next sample and advances the phase by one sample.
    #[allow(clippy::should_implement_trait)]
    pub fn next(&mut self) -> f64 {
        let out = (self.phase * TAU).sin() * self.amplitude;
        self.increment_phase();
        out
    }

    /// Sets the frequency of the sine wave oscillator.
    pub fn set_freq(&mut self, freq_hz: f64, sample_rate: f64) {
        debug_assert!(0.0 < freq_hz && freq_hz <= sample_rate / 2.0);
        self.phase_increment = freq_hz / sample_rate;
    }

    /// Returns the frequency in Hz at `sample_rate`.
    pub fn freq(&self, sample_rate: f64) -> f64 {
        self.phase_increment * sample_rate
    }

    /// Offsets the phase by `cycles` (may be negative).
    pub fn phase_add(&mut self, cycles: f64) {
        if cycles.is_finite() {
            self.phase = (self.phase + cycles).rem_euclid(1.0);
        }
    }

    /// Sets the phase in cycles, wrapped into `0.0..1.0`.
    pub fn set_phase(&mut self, cycles: f64) {
        if cycles.is_finite() {
            self.phase = cycles.rem_euclid(1.0);
        }
    }

    /// The current phase in cycles.
    pub fn phase(&self) -> f64 {
        self.phase
    }

    fn increment_phase(&mut self) {
        self.phase += self.phase_increment;

        if self.phase >= 1.0 {
            self.phase -= 1.0;
        }
    }
}
