//! Per-channel light modulation.
//!
//! The same function drives the covert encoders during generation and the
//! visual flicker during playback, so both stay phase-locked to the audio.

use std::f64::consts::PI;

use entrain_spec::{SessionParameters, Waveform};

use super::sweep::resolve_beat;

/// Stereo light modulation value.
///
/// Each channel is in `[0, brightness]` where brightness is normalized to 0-1.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct LightMod {
    /// Left channel brightness.
    pub left: f64,
    /// Right channel brightness.
    pub right: f64,
}

/// Computes the light modulation at time `t`.
///
/// # Arguments
/// * `t` - Time in seconds
/// * `beat` - Flicker frequency in Hz
/// * `depth` - Modulation depth (0-1)
/// * `brightness` - Peak brightness (0-1)
/// * `phase` - Right-channel offset as a fraction of one cycle (0-1)
/// * `waveform` - Modulation law
pub fn light_mod(
    t: f64,
    beat: f64,
    depth: f64,
    brightness: f64,
    phase: f64,
    waveform: Waveform,
) -> LightMod {
    let wave_phase = t * beat * PI * 2.0;
    let phase_rad = phase * PI * 2.0;

    let (left, right) = match waveform {
        Waveform::Sine => (
            wave_phase.sin() * 0.5 + 0.5,
            (wave_phase + phase_rad).sin() * 0.5 + 0.5,
        ),
        Waveform::Square => (
            if wave_phase.sin() > 0.0 { 1.0 } else { 0.0 },
            if (wave_phase + phase_rad).sin() > 0.0 {
                1.0
            } else {
                0.0
            },
        ),
        Waveform::Triangle => (
            (((t * beat * 2.0) % 2.0) - 1.0).abs(),
            ((((t + phase / beat) * beat * 2.0) % 2.0) - 1.0).abs(),
        ),
        Waveform::Sawtooth => ((t * beat) % 1.0, ((t + phase / beat) * beat) % 1.0),
    };

    LightMod {
        left: (left * depth + (1.0 - depth)) * brightness,
        right: (right * depth + (1.0 - depth)) * brightness,
    }
}

/// Computes the light modulation for a session at time `t`, resolving the
/// instantaneous beat through the sweep profile when one is set.
pub fn light_mod_at(t: f64, params: &SessionParameters) -> LightMod {
    light_mod_with_beat(t, resolve_beat(t, params), params)
}

/// Computes the light modulation for a session with an already-resolved beat.
pub fn light_mod_with_beat(t: f64, beat: f64, params: &SessionParameters) -> LightMod {
    light_mod(
        t,
        beat,
        params.light_depth_unit(),
        params.brightness_unit(),
        params.light_phase_unit(),
        params.light_waveform,
    )
}
