//! Tone oscillators and the synthetic whisper voice.

use std::f64::consts::PI;

use entrain_spec::Waveform;

/// Evaluates a unit-amplitude tone of frequency `freq` at time `t`.
///
/// Every waveform is bounded to `[-1, 1]`. The phase is computed directly
/// from `t`, so the value depends only on the sample index and never on
/// previous samples.
pub fn tone_sample(waveform: Waveform, freq: f64, t: f64) -> f64 {
    let phase = 2.0 * PI * freq * t;
    match waveform {
        Waveform::Sine => phase.sin(),
        Waveform::Square => {
            if phase.sin() > 0.0 {
                1.0
            } else {
                -1.0
            }
        }
        Waveform::Triangle => phase.sin().asin() * 2.0 / PI,
        Waveform::Sawtooth => ((t * freq) % 1.0) * 2.0 - 1.0,
    }
}

/// Length of one whisper envelope cycle, in seconds.
pub const WHISPER_CYCLE_SECS: f64 = 2.0;

/// Active (sounding) part of each whisper envelope cycle, in seconds.
pub const WHISPER_ACTIVE_SECS: f64 = 0.5;

/// Synthetic voiced-formant whisper sample.
///
/// A pitch gliding around 280 Hz (+/- 40 Hz at 2.5 rad/s) with harmonics
/// at 1x, 1.5x and 2.2x (amplitudes 1, 0.5, 0.25) plus breath noise.
/// `white` is a uniform sample in `[-1, 1)`; it contributes 20%.
pub fn whisper_sample(t: f64, white: f64) -> f64 {
    let base_freq = 280.0 + (t * 2.5).sin() * 40.0;
    let f1 = (2.0 * PI * base_freq * t).sin();
    let f2 = (2.0 * PI * (base_freq * 1.5) * t).sin() * 0.5;
    let f3 = (2.0 * PI * (base_freq * 2.2) * t).sin() * 0.25;
    let noise = white * 0.2;

    (f1 + f2 + f3 + noise) * 0.35
}

/// Half-sine gate for the whisper voice: open for the first 0.5 s of
/// every 2 s cycle, closed otherwise.
pub fn whisper_envelope(t: f64) -> f64 {
    let wt = t % WHISPER_CYCLE_SECS;
    if wt < WHISPER_ACTIVE_SECS {
        (PI * wt / WHISPER_ACTIVE_SECS).sin()
    } else {
        0.0
    }
}

/// Free-running stereo tone pair for live previews.
///
/// Produces only the two carrier tones (no noise, whisper, or encoding) at
/// `tone_gain * 0.7`.
#[derive(Debug, Clone)]
pub struct PreviewOscillator {
    waveform: Waveform,
    freq_left: f64,
    freq_right: f64,
    gain: f64,
    sample_rate: f64,
    index: u64,
}

impl PreviewOscillator {
    /// Master gain applied on top of the tone gain.
    pub const MASTER_GAIN: f64 = 0.7;

    /// Creates a preview oscillator.
    pub fn new(
        waveform: Waveform,
        freq_left: f64,
        freq_right: f64,
        tone_gain: f64,
        sample_rate: u32,
    ) -> Self {
        Self {
            waveform,
            freq_left,
            freq_right,
            gain: tone_gain * Self::MASTER_GAIN,
            sample_rate: f64::from(sample_rate),
            index: 0,
        }
    }

    /// Produces the next stereo frame.
    pub fn next_frame(&mut self) -> (f32, f32) {
        let t = self.index as f64 / self.sample_rate;
        self.index += 1;
        let left = tone_sample(self.waveform, self.freq_left, t) * self.gain;
        let right = tone_sample(self.waveform, self.freq_right, t) * self.gain;
        (left as f32, right as f32)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tones_are_bounded() {
        for waveform in Waveform::ALL {
            for i in 0..10_000 {
                let t = i as f64 / 44_100.0;
                let v = tone_sample(waveform, 213.7, t);
                assert!((-1.0..=1.0).contains(&v), "{:?} at {} = {}", waveform, t, v);
            }
        }
    }

    #[test]
    fn test_tone_reference_points() {
        // Quarter period of 1 Hz
        assert!((tone_sample(Waveform::Sine, 1.0, 0.25) - 1.0).abs() < 1e-12);
        assert_eq!(tone_sample(Waveform::Square, 1.0, 0.25), 1.0);
        assert_eq!(tone_sample(Waveform::Square, 1.0, 0.75), -1.0);
        assert!((tone_sample(Waveform::Triangle, 1.0, 0.25) - 1.0).abs() < 1e-6);
        assert_eq!(tone_sample(Waveform::Sawtooth, 1.0, 0.25), -0.5);
        assert_eq!(tone_sample(Waveform::Sawtooth, 1.0, 0.0), -1.0);
    }

    #[test]
    fn test_square_is_negative_at_zero() {
        // sin(0) is not > 0
        assert_eq!(tone_sample(Waveform::Square, 100.0, 0.0), -1.0);
    }

    #[test]
    fn test_whisper_sample_bounded() {
        for i in 0..20_000 {
            let t = i as f64 / 44_100.0;
            for white in [-1.0, 0.0, 0.999] {
                let v = whisper_sample(t, white);
                assert!(v.abs() <= (1.75 + 0.2) * 0.35 + 1e-12);
            }
        }
    }

    #[test]
    fn test_whisper_envelope_gate() {
        assert_eq!(whisper_envelope(0.0), 0.0);
        assert!((whisper_envelope(0.25) - 1.0).abs() < 1e-12);
        assert_eq!(whisper_envelope(0.6), 0.0);
        assert_eq!(whisper_envelope(1.9), 0.0);
        assert!((whisper_envelope(2.25) - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_preview_oscillator_starts_at_zero_phase() {
        let mut osc = PreviewOscillator::new(Waveform::Sine, 210.0, 214.0, 0.5, 44_100);
        assert_eq!(osc.next_frame(), (0.0, 0.0));
        let (l, r) = osc.next_frame();
        assert!(l.abs() <= 0.35 && r.abs() <= 0.35);
        assert!(l > 0.0 && r > 0.0);
    }
}
