//! Small scalar helpers shared by the animation components.

/// Linear interpolation. `t` is not clamped, so values outside 0..1 extrapolate.
pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

/// Clamp `v` into `[min, max]`. When `min == max` the bound wins.
pub fn clamp(v: f32, min: f32, max: f32) -> f32 {
    v.max(min).min(max)
}

/// Clamp into the normalised `[-1, 1]` range used by gaze and drag targets.
pub fn clamp_unit(v: f32) -> f32 {
    clamp(v, -1.0, 1.0)
}

/// Exponential smoothing factor, frame-rate independent.
///
/// Moving a value `x += (target - x) * exp_factor(rate, dt)` converges at the
/// same wall-clock speed regardless of how `dt` is sliced.
pub fn exp_factor(rate: f32, dt: f32) -> f32 {
    1.0 - (-rate * dt).exp()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lerp_endpoints_and_midpoint() {
        assert_eq!(lerp(10.0, 20.0, 0.0), 10.0);
        assert_eq!(lerp(10.0, 20.0, 1.0), 20.0);
        assert_eq!(lerp(0.0, 100.0, 0.5), 50.0);
        assert_eq!(lerp(-10.0, 10.0, 0.5), 0.0);
    }

    #[test]
    fn lerp_extrapolates() {
        assert_eq!(lerp(0.0, 10.0, 2.0), 20.0);
        assert_eq!(lerp(0.0, 10.0, -1.0), -10.0);
    }

    #[test]
    fn clamp_bounds() {
        assert_eq!(clamp(5.0, 0.0, 10.0), 5.0);
        assert_eq!(clamp(-5.0, 0.0, 10.0), 0.0);
        assert_eq!(clamp(15.0, 0.0, 10.0), 10.0);
        assert_eq!(clamp(5.0, 3.0, 3.0), 3.0);
    }

    #[test]
    fn exp_factor_is_zero_without_time_and_approaches_one() {
        assert_eq!(exp_factor(10.0, 0.0), 0.0);
        assert!(exp_factor(10.0, 10.0) > 0.999);
    }

    #[test]
    fn exp_factor_composes_across_split_steps() {
        // Two half steps leave the same residual as one full step.
        let one = 1.0 - exp_factor(4.0, 0.5);
        let two = (1.0 - exp_factor(4.0, 0.25)) * (1.0 - exp_factor(4.0, 0.25));
        assert!((one - two).abs() < 1e-6);
    }
}
