//! Pan laws used to place a voice's output in the stereo field.

/// Maps a pan position (`0.0` is hard left, `1.0` is hard right) to a pair of
/// channel gains.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum PanningLaw {
    /// AKA -6 dB. Each side is scaled by its share of the position, so a
    /// centred signal appears at half level in both channels.
    #[default]
    Linear,
    /// Balance control: the channel the signal is panned toward stays at full
    /// level and only the opposite channel fades. Both channels pass
    /// unattenuated at the centre.
    Balance,
}

impl PanningLaw {
    /// Returns the `(left, right)` gains for `pan`, which is clamped to
    /// `0.0..=1.0`.
    #[inline]
    pub fn gains(self, pan: f64) -> (f64, f64) {
        let pan = pan.clamp(0.0, 1.0);

        match self {
            Self::Linear => (1.0 - pan, pan),
            // visual: one side is flat at 1.0 while the other ramps to 0.0
            Self::Balance => {
                (((1.0 - pan) * 2.0).min(1.0), (pan * 2.0).min(1.0))
            }
        }
    }

    /// Applies the law to `sample`, returning `(left, right)`.
    #[inline]
    pub fn apply(self, sample: f64, pan: f64) -> (f64, f64) {
        let (gain_l, gain_r) = self.gains(pan);
        (sample * gain_l, sample * gain_r)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn linear_law_splits_level() {
        assert_eq!(PanningLaw::Linear.gains(0.0), (1.0, 0.0));
        assert_eq!(PanningLaw::Linear.gains(0.5), (0.5, 0.5));
        assert_eq!(PanningLaw::Linear.gains(1.0), (0.0, 1.0));
    }

    #[test]
    fn balance_law_keeps_one_side_dry() {
        assert_eq!(PanningLaw::Balance.gains(0.5), (1.0, 1.0));
        assert_eq!(PanningLaw::Balance.gains(0.25), (1.0, 0.5));
        assert_eq!(PanningLaw::Balance.gains(0.75), (0.5, 1.0));
        assert_eq!(PanningLaw::Balance.gains(0.0), (1.0, 0.0));
        assert_eq!(PanningLaw::Balance.gains(1.0), (0.0, 1.0));
    }

    #[test]
    fn out_of_range_pan_is_clamped() {
        assert_eq!(PanningLaw::Linear.gains(-3.0), (1.0, 0.0));
        assert_eq!(PanningLaw::Balance.gains(7.0), (0.0, 1.0));
    }
}
