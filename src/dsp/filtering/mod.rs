//! Module for time domain filters.

pub const BUTTERWORTH_Q: f64 = std::f64::consts::FRAC_1_SQRT_2;

pub mod svf;

/// The responses a state variable filter can produce.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FilterType {
    #[default]
    Lowpass,
    Highpass,
    Bandpass,
}
