//! Per-frame session mix.

use rand::Rng;
use rand_pcg::Pcg32;

use entrain_spec::{SessionParameters, Waveform};

use crate::encoding::CovertEncoder;
use crate::envelope::fade_envelope;
use crate::modulation::{light_mod_at, micro_variation, should_whisper};
use crate::synthesis::{tone_sample, whisper_envelope, whisper_sample};

/// Master gain applied to the final mix before clipping.
pub const MASTER_GAIN: f64 = 0.8;

/// Resolved, per-session constants plus the whisper noise stream.
pub(crate) struct FrameMixer {
    params: SessionParameters,
    waveform: Waveform,
    tone_gain: f64,
    noise_gain: f64,
    whisper_gain: f64,
    duration: f64,
    encoder: CovertEncoder,
    whisper_rng: Pcg32,
}

impl FrameMixer {
    pub(crate) fn new(params: &SessionParameters, whisper_rng: Pcg32) -> Self {
        Self {
            waveform: params.tone_waveform,
            tone_gain: params.tone_gain(),
            noise_gain: params.noise_gain(),
            whisper_gain: params.whisper_gain(),
            duration: params.duration_secs(),
            encoder: CovertEncoder::from_params(params),
            params: params.clone(),
            whisper_rng,
        }
    }

    /// Mixes one stereo frame at time `t` given the pink-noise sample.
    pub(crate) fn frame(&mut self, t: f64, pink: f32) -> (f32, f32) {
        let params = &self.params;

        let freq_left = micro_variation(t, params.freq_left, params.anti_habituation);
        let freq_right = micro_variation(t, params.freq_right, params.anti_habituation);
        let tone_left = tone_sample(self.waveform, freq_left, t) * self.tone_gain;
        let tone_right = tone_sample(self.waveform, freq_right, t) * self.tone_gain;

        let noise = f64::from(pink) * self.noise_gain;

        let whisper = if should_whisper(t, params) {
            let white = self.whisper_rng.gen::<f64>() * 2.0 - 1.0;
            whisper_sample(t, white) * whisper_envelope(t) * self.whisper_gain
        } else {
            0.0
        };

        let (enc_left, enc_right) = match self.encoder {
            CovertEncoder::None => (0.0, 0.0),
            encoder => encoder.sample(t, light_mod_at(t, params)),
        };

        let env = fade_envelope(t, self.duration, params.fade_time);

        let left = ((tone_left + noise + whisper) * env + enc_left) * MASTER_GAIN;
        let right = ((tone_right + noise + whisper) * env + enc_right) * MASTER_GAIN;

        (left.clamp(-1.0, 1.0) as f32, right.clamp(-1.0, 1.0) as f32)
    }
}
