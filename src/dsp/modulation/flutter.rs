//! Filtered noise used to drive flutter.

use crate::dsp::filtering::{svf::StateVariableFilter, FilterType};
use crate::dsp::synthesis::NoiseOsc;
use crate::dsp::Effect;
use crate::settings::FLUTTER_NOISE_CUTOFF_HZ;

/// A slowly varying random control signal: seeded white noise through a
/// lowpass state variable filter.
///
/// The output wanders within `-1.0..1.0` but in practice stays well inside
/// it, as most of the noise energy is filtered out.
#[derive(Debug, Clone)]
pub struct ModulationSource {
    noise: NoiseOsc,
    filter: StateVariableFilter,
}

impl ModulationSource {
    pub fn new(seed: u64, sample_rate: f64) -> Self {
        let mut filter = StateVariableFilter::new(1, sample_rate);
        filter.set_type(FilterType::Lowpass);
        filter.set_cutoff_freq(FLUTTER_NOISE_CUTOFF_HZ.min(sample_rate * 0.49));

        Self { noise: NoiseOsc::new(seed), filter }
    }

    /// Draws the next value. Every call advances the noise generator and the
    /// filter by one sample.
    #[allow(clippy::should_implement_trait)]
    pub fn next(&mut self) -> f64 {
        let noise = self.noise.next();
        self.filter.process_mono(noise, 0)
    }

    /// The cutoff of the shaping filter in Hz.
    pub fn cutoff_freq(&self) -> f64 {
        self.filter.cutoff_freq()
    }
}
