//! Dry/wet mix wrapper for `impl `[`Effect`] types.

use super::Effect;
use crate::prelude::*;
use std::ops::{Deref, DerefMut};

/// A dry/wet wrapper around an `impl `[`Effect`].
///
/// The wrapped effect is expected to output only its wet signal; the wrapper
/// blends it with the unprocessed input.
#[derive(Debug)]
pub struct DryWet<E: Effect> {
    dry: Smoother,
    wet: Smoother,
    effect: E,
}

impl<E: Effect> DryWet<E> {
    /// Wraps `effect`, starting fully dry.
    pub fn new(effect: E) -> Self {
        let sr = effect.get_sample_rate();

        Self {
            dry: Smoother::new(MIX_SMOOTHING_MS, 1.0, sr),
            wet: Smoother::new(MIX_SMOOTHING_MS, 0.0, sr),
            effect,
        }
    }

    /// Returns `Self` with the mix jumped straight to `mix` (no ramp).
    pub fn with_mix(mut self, mix: f64) -> Self {
        self.set_mix_equal_gain(mix);
        self.dry.finish();
        self.wet.finish();
        self
    }

    pub fn set_dry(&mut self, dry_level: f64) {
        self.dry.set_target_value(dry_level);
    }

    pub fn set_wet(&mut self, wet_level: f64) {
        self.wet.set_target_value(wet_level);
    }

    /// `mix == 0.0` is 100% dry, and `mix == 1.0` is 100% wet.
    ///
    /// `mix` is clamped between `0.0` and `1.0`; NaN is ignored.
    pub fn set_mix_equal_gain(&mut self, mix: f64) {
        let Some(mix) = clamp_unit(mix) else { return };

        self.set_dry(1.0 - mix);
        self.set_wet(mix);
    }

    /// `mix == 0.0` is 100% dry, and `mix == 1.0` is 100% wet.
    ///
    /// `mix` is clamped between `0.0` and `1.0`; NaN is ignored.
    pub fn set_mix_equal_power(&mut self, mix: f64) {
        let Some(mix) = clamp_unit(mix) else { return };

        self.set_dry((FRAC_PI_2 * mix).cos());
        self.set_wet((FRAC_PI_2 * mix).sin());
    }

    /// The wet level the mix is heading toward.
    pub fn mix(&self) -> f64 {
        self.wet.target_value()
    }

    fn dry_wet_next(&mut self) -> (f64, f64) {
        (self.dry.next(), self.wet.next())
    }
}

impl<E: Effect> Deref for DryWet<E> {
    type Target = E;

    fn deref(&self) -> &Self::Target {
        &self.effect
    }
}

impl<E: Effect> DerefMut for DryWet<E> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.effect
    }
}

impl<E: Effect> Effect for DryWet<E> {
    fn process_stereo(&mut self, in_l: f64, in_r: f64) -> (f64, f64) {
        let (dry, wet) = self.dry_wet_next();
        let (sig_l, sig_r) = self.effect.process_stereo(in_l, in_r);

        (dry * in_l + wet * sig_l, dry * in_r + wet * sig_r)
    }

    fn process_mono(&mut self, input: f64, ch_idx: usize) -> f64 {
        let (dry, wet) = self.dry_wet_next();
        let sig = self.effect.process_mono(input, ch_idx);

        dry * input + wet * sig
    }

    fn get_sample_rate(&self) -> f64 {
        self.effect.get_sample_rate()
    }

    fn get_identifier(&self) -> &str {
        "dry_wet"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Outputs a constant, ignoring its input.
    #[derive(Debug)]
    struct Constant(f64);

    impl Effect for Constant {
        fn process_stereo(&mut self, _: f64, _: f64) -> (f64, f64) {
            (self.0, self.0)
        }

        fn get_sample_rate(&self) -> f64 {
            48000.0
        }

        fn get_identifier(&self) -> &str {
            "constant"
        }
    }

    #[test]
    fn starts_dry() {
        let mut dw = DryWet::new(Constant(5.0));
        assert_eq!(dw.process_stereo(0.25, -0.25), (0.25, -0.25));
    }

    #[test]
    fn full_wet_replaces_input() {
        let mut dw = DryWet::new(Constant(5.0)).with_mix(1.0);
        assert_eq!(dw.process_stereo(0.25, -0.25), (5.0, 5.0));
    }

    #[test]
    fn half_mix_blends_evenly() {
        let mut dw = DryWet::new(Constant(1.0)).with_mix(0.5);
        let (l, r) = dw.process_stereo(0.0, 0.0);
        assert!(within_tolerance(l, 0.5, 1e-12));
        assert!(within_tolerance(r, 0.5, 1e-12));
    }

    #[test]
    fn mix_changes_are_smoothed() {
        let mut dw = DryWet::new(Constant(1.0));
        dw.set_mix_equal_gain(1.0);

        let first = dw.process_stereo(0.0, 0.0).0;
        assert!(first > 0.0 && first < 0.1);

        let samples = (MIX_SMOOTHING_MS * 0.001 * 48000.0) as usize;
        let mut last = first;
        for _ in 0..samples {
            last = dw.process_stereo(0.0, 0.0).0;
        }
        assert!(within_tolerance(last, 1.0, 1e-9));
    }

    #[test]
    fn nan_mix_is_ignored() {
        let mut dw = DryWet::new(Constant(1.0)).with_mix(0.3);
        dw.set_mix_equal_gain(f64::NAN);
        assert!(within_tolerance(dw.mix(), 0.3, 1e-12));
    }

    #[test]
    fn equal_power_keeps_energy() {
        let mut dw = DryWet::new(Constant(1.0));
        dw.set_mix_equal_power(0.5);
        dw.dry.finish();
        dw.wet.finish();

        let (dry, wet) = dw.dry_wet_next();
        assert!(within_tolerance(dry, wet, 1e-12));
        assert!(within_tolerance(dry * dry + wet * wet, 1.0, 1e-12));
    }
}
