//! Sweep-interpolated beat frequency.

use entrain_spec::{SessionParameters, SweepProfile};

/// Beat returned when no sweep profile is available.
pub const FALLBACK_SWEEP_BEAT_HZ: f64 = 4.0;

/// Interpolates the beat frequency at time `t` of a `duration`-second session.
///
/// Segments are walked in order, accumulating their fractional lengths; the
/// first segment whose upper boundary is at or past `t / duration` is linearly
/// interpolated. Past the last boundary the last segment's end frequency holds.
/// Without a profile (or with an empty one) the fallback of 4 Hz is returned.
pub fn sweep_freq(t: f64, duration: f64, profile: Option<&SweepProfile>) -> f64 {
    let Some(profile) = profile else {
        return FALLBACK_SWEEP_BEAT_HZ;
    };
    let Some(last) = profile.segments.last() else {
        return FALLBACK_SWEEP_BEAT_HZ;
    };

    let progress = t / duration;
    let mut cumulative = 0.0;

    for segment in &profile.segments {
        if progress <= cumulative + segment.duration {
            if segment.duration <= 0.0 {
                return segment.start_freq;
            }
            let seg_progress = (progress - cumulative) / segment.duration;
            return segment.start_freq + (segment.end_freq - segment.start_freq) * seg_progress;
        }
        cumulative += segment.duration;
    }

    last.end_freq
}

/// Resolves the instantaneous beat for a session: the sweep value when a
/// sweep is set, otherwise the constant beat.
pub fn resolve_beat(t: f64, params: &SessionParameters) -> f64 {
    match params.sweep {
        Some(ref sweep) => sweep_freq(t, params.duration_secs(), Some(sweep)),
        None => params.beat,
    }
}
