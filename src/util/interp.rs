//! Interpolation functions.

/// Shorthand for the [`linear`] function.
///
/// `t` is clamped between `0` and `1`.
pub fn lerp(a: f64, b: f64, t: f64) -> f64 {
    linear(a, b, t)
}

/// Linearly interpolates between `a` and `b` based on the value of `t`.
///
/// `t` is clamped between `0` and `1`. The end points are returned exactly.
pub fn linear(a: f64, b: f64, t: f64) -> f64 {
    let t = t.clamp(0.0, 1.0);
    if t == 0.0 {
        return a;
    }
    else if t == 1.0 {
        return b;
    }

    t.mul_add(b - a, a)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::util::within_tolerance;

    #[test]
    fn test_linear_interp() {
        assert_eq!(lerp(2.0, 4.0, 0.0), 2.0);
        assert_eq!(lerp(2.0, 4.0, 1.0), 4.0);
        assert!(within_tolerance(lerp(2.0, 4.0, 0.25), 2.5, 1e-12));
        // clamped
        assert_eq!(lerp(2.0, 4.0, 3.0), 4.0);
        assert_eq!(lerp(2.0, 4.0, -1.0), 2.0);
    }
}
