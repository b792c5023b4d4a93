//! Covert light-synchronization encoders.
//!
//! Both encoders amplitude-modulate near-ultrasonic carriers with the
//! per-channel light modulation so external light hardware can recover the
//! flicker from the audio alone. Their output is added after the envelope.

use std::f64::consts::PI;

use entrain_spec::{EncodingKind, SessionParameters};

use crate::modulation::LightMod;

/// Spacing between six-channel carriers, in Hz.
pub const SIX_CHANNEL_SPACING_HZ: f64 = 500.0;

/// Resolved covert encoder for one session.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CovertEncoder {
    /// No covert signal.
    None,
    /// Single carrier, modulated per side.
    DualChannel {
        /// Carrier frequency in Hz.
        carrier: f64,
        /// Linear level.
        gain: f64,
    },
    /// Six carriers: R, G, B on the left at base + 0/500/1000 Hz and on the
    /// right at base + 1500/2000/2500 Hz.
    SixChannel {
        /// Lowest carrier frequency in Hz.
        base: f64,
        /// Linear level.
        gain: f64,
        /// RGB intensities normalized to 0-1.
        rgb: [f64; 3],
    },
}

impl CovertEncoder {
    /// Resolves the encoder from session parameters.
    pub fn from_params(params: &SessionParameters) -> Self {
        let gain = params.encoding_gain();
        let carrier = params.resolved_carrier_freq();
        match params.encoding {
            EncodingKind::None => CovertEncoder::None,
            EncodingKind::DualChannel => CovertEncoder::DualChannel { carrier, gain },
            EncodingKind::SixChannel => CovertEncoder::SixChannel {
                base: carrier,
                gain,
                rgb: params.rgb.normalized(),
            },
        }
    }

    /// Computes the (left, right) covert contribution at time `t`.
    pub fn sample(&self, t: f64, light: LightMod) -> (f64, f64) {
        match *self {
            CovertEncoder::None => (0.0, 0.0),
            CovertEncoder::DualChannel { carrier, gain } => {
                dual_channel(t, light, carrier, gain)
            }
            CovertEncoder::SixChannel { base, gain, rgb } => {
                six_channel(t, light, rgb, base, gain)
            }
        }
    }
}

/// Dual-channel encoding: `sin(2*pi*carrier*t) * light * gain` per side.
pub fn dual_channel(t: f64, light: LightMod, carrier: f64, gain: f64) -> (f64, f64) {
    let wave = (2.0 * PI * carrier * t).sin();
    (wave * light.left * gain, wave * light.right * gain)
}

/// Six-channel RGB encoding.
///
/// Each side sums its three colour carriers, weighted by the colour
/// intensity and that side's light modulation, then divides by 3.
pub fn six_channel(t: f64, light: LightMod, rgb: [f64; 3], base: f64, gain: f64) -> (f64, f64) {
    let carrier = |offset: f64| (2.0 * PI * (base + offset * SIX_CHANNEL_SPACING_HZ) * t).sin();
    let [r, g, b] = rgb;

    let left = (carrier(0.0) * r + carrier(1.0) * g + carrier(2.0) * b) * light.left;
    let right = (carrier(3.0) * r + carrier(4.0) * g + carrier(5.0) * b) * light.right;

    (left * gain / 3.0, right * gain / 3.0)
}
