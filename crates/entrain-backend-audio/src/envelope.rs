//! Session fade envelope.

/// Linear fade-in / fade-out gain at time `t` of a `duration`-second session.
///
/// Ramps 0 -> 1 over the first `fade` seconds and 1 -> 0 over the last
/// `fade` seconds. The result is the smaller of both ramps clamped to
/// `[0, 1]`, so an over-long fade never overlaps into a negative gain.
pub fn fade_envelope(t: f64, duration: f64, fade: f64) -> f64 {
    if fade <= 0.0 {
        return 1.0;
    }
    let fade_in = t / fade;
    let fade_out = (duration - t) / fade;
    fade_in.min(fade_out).clamp(0.0, 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fade_shape() {
        assert_eq!(fade_envelope(0.0, 60.0, 5.0), 0.0);
        assert_eq!(fade_envelope(2.5, 60.0, 5.0), 0.5);
        assert_eq!(fade_envelope(5.0, 60.0, 5.0), 1.0);
        assert_eq!(fade_envelope(30.0, 60.0, 5.0), 1.0);
        assert_eq!(fade_envelope(57.5, 60.0, 5.0), 0.5);
        assert_eq!(fade_envelope(60.0, 60.0, 5.0), 0.0);
    }

    #[test]
    fn test_last_sample_is_near_zero() {
        let t = 2_645_999.0 / 44_100.0;
        let env = fade_envelope(t, 60.0, 5.0);
        assert!(env > 0.0 && env < 1e-5, "env {}", env);
    }

    #[test]
    fn test_overlapping_fade_never_negative() {
        for i in 0..=100 {
            let t = i as f64 * 0.1;
            let env = fade_envelope(t, 10.0, 8.0);
            assert!((0.0..=1.0).contains(&env));
        }
        assert_eq!(fade_envelope(5.0, 10.0, 8.0), 0.625);
    }

    #[test]
    fn test_zero_fade_is_flat() {
        assert_eq!(fade_envelope(0.0, 10.0, 0.0), 1.0);
    }
}
