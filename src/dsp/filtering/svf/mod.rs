//! State variable filter, based on the TPT (Topology-Preserving Transform) design.

use super::*;
use crate::dsp::Effect;
use crate::prelude::*;

pub mod filter;

pub use filter::StateVariableFilter;

#[cfg(test)]
mod tests {
    use super::*;

    fn settle(
        filter: &mut StateVariableFilter,
        input: f64,
        samples: usize,
    ) -> f64 {
        let mut out = 0.0;
        for _ in 0..samples {
            out = filter.process_mono(input, 0);
        }
        out
    }

    #[test]
    fn lowpass_passes_dc() {
        let mut filter = StateVariableFilter::new(1, 48000.0);
        filter.set_cutoff_freq(200.0);
        let out = settle(&mut filter, 1.0, 48000);
        assert!(within_tolerance(out, 1.0, 1e-6));
    }

    #[test]
    fn highpass_blocks_dc() {
        let mut filter = StateVariableFilter::new(1, 48000.0);
        filter.set_cutoff_freq(200.0);
        filter.set_type(FilterType::Highpass);
        let out = settle(&mut filter, 1.0, 48000);
        assert!(out.abs() < 1e-6);
    }

    #[test]
    fn lowpass_attenuates_nyquist() {
        let mut filter = StateVariableFilter::new(1, 48000.0);
        filter.set_cutoff_freq(200.0);

        let mut peak: f64 = 0.0;
        for i in 0..4800 {
            let input = if i % 2 == 0 { 1.0 } else { -1.0 };
            let out = filter.process_mono(input, 0);
            if i > 2400 {
                peak = peak.max(out.abs());
            }
        }

        assert!(peak < 0.01);
    }

    #[test]
    fn unknown_channel_passes_through() {
        let mut filter = StateVariableFilter::new(1, 48000.0);
        assert_eq!(filter.process_mono(0.7, 3), 0.7);
    }

    #[test]
    #[should_panic]
    fn bad_cutoff_argument() {
        let mut filter = StateVariableFilter::new(1, 48000.0);
        filter.set_cutoff_freq(30000.0);
    }

    #[test]
    fn bandpass_blocks_dc() {
        let mut filter = StateVariableFilter::new(1, 48000.0);
        filter.set_cutoff_freq(1000.0);
        filter.set_type(FilterType::Bandpass);
        assert!(settle(&mut filter, 1.0, 48000).abs() < 1e-6);
    }
}
