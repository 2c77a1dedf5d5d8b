//! Modulation sources for the delay voices.

pub mod flutter;
pub mod pan_osc;

pub use flutter::ModulationSource;
pub use pan_osc::PanOscillator;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::prelude::*;

    #[test]
    fn modulation_is_reproducible() {
        let mut a = ModulationSource::new(42, 48000.0);
        let mut b = ModulationSource::new(42, 48000.0);

        for _ in 0..4800 {
            assert_eq!(a.next(), b.next());
        }
    }

    #[test]
    fn modulation_is_slow_and_bounded() {
        let mut m = ModulationSource::new(1, 48000.0);
        let mut prev = m.next();
        let mut max_jump = 0.0_f64;

        for _ in 0..48000 {
            let x = m.next();
            assert!(x.abs() < 1.0);
            max_jump = max_jump.max((x - prev).abs());
            prev = x;
        }

        // white noise would jump by up to 2.0 between samples
        assert!(max_jump < 0.1);
    }

    #[test]
    fn cutoff_stays_below_nyquist() {
        assert_eq!(ModulationSource::new(0, 48000.0).cutoff_freq(), 200.0);
        assert!(ModulationSource::new(0, 300.0).cutoff_freq() < 150.0);
    }

    #[test]
    fn pan_oscillator_sweeps_unit_range() {
        let sr = 1000.0;
        let mut osc = PanOscillator::new(1.0, sr);

        let pans: Vec<f64> = (0..1000).map(|_| osc.process() + 0.5).collect();
        let min = pans.iter().copied().fold(f64::INFINITY, f64::min);
        let max = pans.iter().copied().fold(f64::NEG_INFINITY, f64::max);

        assert!(pans.iter().all(|p| (0.0..=1.0).contains(p)));
        assert!(within_tolerance(min, 0.0, 1e-6));
        assert!(within_tolerance(max, 1.0, 1e-6));
    }

    #[test]
    fn pan_oscillator_is_centred_at_zero_phase() {
        let mut osc = PanOscillator::new(0.6, 48000.0);
        osc.set_phase(0.0);
        assert_eq!(osc.process() + 0.5, 0.5);

        osc.set_phase(0.5);
        assert!(within_tolerance(osc.process() + 0.5, 0.5, 1e-12));
    }

    #[test]
    fn pan_oscillator_rate_is_clamped() {
        let mut osc = PanOscillator::new(0.0, 48000.0);
        assert!(within_tolerance(osc.rate(), 0.01, 1e-12));

        osc.set_rate(f64::NAN);
        assert!(within_tolerance(osc.rate(), 0.01, 1e-12));

        osc.set_rate(1.1);
        assert!(within_tolerance(osc.rate(), 1.1, 1e-12));
    }

    #[test]
    fn pan_oscillator_survives_tiny_sample_rates() {
        let mut osc = PanOscillator::new(0.6, 0.01);
        assert!(within_tolerance(osc.rate(), 0.005, 1e-12));

        osc.set_rate(5.0);
        assert!(within_tolerance(osc.rate(), 0.005, 1e-12));
        assert!(osc.process().is_finite());
    }
}
