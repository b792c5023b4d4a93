//! Modulation functions: pure functions of (time, parameters).
//!
//! Everything here is stateless so the generator and the playback controller
//! can evaluate the same instant independently and agree exactly.

pub mod breath;
pub mod light;
pub mod sweep;


pub use breath::{breath_phase, should_whisper, BreathPhase, BreathPhaseResult};
pub use light::{light_mod, light_mod_at, light_mod_with_beat, LightMod};
pub use sweep::{resolve_beat, sweep_freq, FALLBACK_SWEEP_BEAT_HZ};

/// Applies the anti-habituation drift to a carrier frequency.
///
/// Three slow sinusoids (periods of roughly 62.8 s, 27.3 s and 89.8 s,
/// weighted 0.3, 0.2 and 0.5) shift the frequency by at most
/// `amount * base_freq * 0.02`. An amount of zero or less is the identity.
pub fn micro_variation(t: f64, base_freq: f64, amount: f64) -> f64 {
    if amount <= 0.0 {
        return base_freq;
    }

    let v1 = (t * 0.1).sin() * 0.3;
    let v2 = (t * 0.23).sin() * 0.2;
    let v3 = (t * 0.07).sin() * 0.5;

    base_freq + (v1 + v2 + v3) * amount * base_freq * 0.02
}
