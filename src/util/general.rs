//! General-purpose utility functions.

/// Converts a time in samples to milliseconds at `sample_rate`.
#[inline]
pub fn samples_to_ms(samples: f64, sample_rate: f64) -> f64 {
    samples / sample_rate * 1000.0
}

/// Converts a time in milliseconds to samples at `sample_rate`.
#[inline]
pub fn ms_to_samples(ms: f64, sample_rate: f64) -> f64 {
    ms * 0.001 * sample_rate
}

/// Clamps `value` to `0.0..=1.0`.
///
/// Returns `None` for NaN so that callers can keep their previous value
/// instead of storing garbage.
#[inline]
pub fn clamp_unit(value: f64) -> Option<f64> {
    if value.is_nan() {
        None
    }
    else {
        Some(value.clamp(0.0, 1.0))
    }
}

/// Wraps a (possibly negative) buffer coordinate into `0.0..len`.
#[inline]
pub fn wrap_position(position: f64, len: f64) -> f64 {
    let wrapped = position.rem_euclid(len);
    // rem_euclid can round up to exactly `len` for tiny negative inputs
    if wrapped >= len { 0.0 } else { wrapped }
}

/// Returns whether the absolute value of `value` is less than the provided
/// `tolerance` value. Useful for checking approximate equality.
pub fn within_tolerance(value: f64, target: f64, tolerance: f64) -> bool {
    (value - target).abs() <= tolerance
}
