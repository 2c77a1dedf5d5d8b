//! Low-frequency oscillator for ping-pong panning.

use crate::dsp::synthesis::SineOsc;
use crate::settings::PAN_OSC_AMPLITUDE;

/// The slowest rate the oscillator accepts, in Hz.
const MIN_RATE_HZ: f64 = 0.01;

/// A sine LFO centred on `0.0` with a peak of [`PAN_OSC_AMPLITUDE`], so that
/// `process() + 0.5` sweeps the whole pan range.
#[derive(Debug, Clone, Copy)]
pub struct PanOscillator {
    osc: SineOsc,
    sample_rate: f64,
}

impl PanOscillator {
    pub fn new(rate_hz: f64, sample_rate: f64) -> Self {
        let rate_hz = Self::clamp_rate(rate_hz, sample_rate);

        Self {
            osc: SineOsc::new(rate_hz, sample_rate)
                .with_amplitude(PAN_OSC_AMPLITUDE),
            sample_rate,
        }
    }

    /// Produces the next oscillator value and advances by one sample.
    pub fn process(&mut self) -> f64 {
        self.osc.next()
    }

    /// Offsets the phase by a fraction of a cycle.
    pub fn phase_add(&mut self, cycles: f64) {
        self.osc.phase_add(cycles);
    }

    /// Sets the phase in cycles. A phase of `0.0` or `0.5` yields an output of
    /// `0.0`, i.e. a centred pan.
    pub fn set_phase(&mut self, cycles: f64) {
        self.osc.set_phase(cycles);
    }

    pub fn phase(&self) -> f64 {
        self.osc.phase()
    }

    /// Sets the rate in Hz. Non-finite values are ignored; the rate is kept
    /// between 0.01 Hz and Nyquist (Nyquist if that is lower).
    pub fn set_rate(&mut self, rate_hz: f64) {
        if rate_hz.is_finite() {
            let rate_hz = Self::clamp_rate(rate_hz, self.sample_rate);
            self.osc.set_freq(rate_hz, self.sample_rate);
        }
    }

    pub fn rate(&self) -> f64 {
        self.osc.freq(self.sample_rate)
    }

    fn clamp_rate(rate_hz: f64, sample_rate: f64) -> f64 {
        if rate_hz.is_nan() {
            return MIN_RATE_HZ;
        }

        // nyquist wins over the floor at absurdly low sample rates
        rate_hz.max(MIN_RATE_HZ).min(sample_rate / 2.0)
    }
}
