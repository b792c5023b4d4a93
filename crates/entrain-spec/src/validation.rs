//! Session parameter validation.
//!
//! Validation runs before any sample is produced. Every rule reports a coded
//! [`ValidationError`] with a camelCase field path so callers can point at the
//! offending JSON key; soft issues are reported as warnings.

use crate::error::{
    ErrorCode, ValidationError, ValidationResult, ValidationWarning, WarningCode,
};
use crate::params::{SessionParameters, SyncMode, SUPPORTED_SAMPLE_RATES};
use crate::sweep::SweepProfile;

/// Longest accepted session, in seconds (4 hours).
///
/// Keeps a 48 kHz stereo 16-bit export well inside the 4 GiB RIFF limit.
pub const MAX_DURATION_SECS: u32 = 4 * 60 * 60;

/// Carriers below this frequency are audible to most listeners.
pub const AUDIBLE_CARRIER_THRESHOLD_HZ: f64 = 17_000.0;

/// Tolerance between the tone difference and the target beat before warning.
const BEAT_MISMATCH_TOLERANCE_HZ: f64 = 0.5;

/// Whisper levels at or below this are treated as muted.
const WHISPER_MUTED_DB: f64 = -60.0;

/// Validates session parameters.
///
/// # Example
/// ```
/// use entrain_spec::{validate_params, SessionParameters};
///
/// let params = SessionParameters::default();
/// assert!(validate_params(&params).is_ok());
///
/// let broken = SessionParameters { duration: 0, ..Default::default() };
/// assert!(!validate_params(&broken).is_ok());
/// ```
pub fn validate_params(params: &SessionParameters) -> ValidationResult {
    let mut result = ValidationResult::default();

    validate_timing(params, &mut result);
    validate_breath(params, &mut result);
    validate_frequencies(params, &mut result);
    validate_encoding(params, &mut result);
    validate_levels(params, &mut result);
    validate_light(params, &mut result);
    if let Some(ref sweep) = params.sweep {
        validate_sweep(sweep, &mut result);
    }

    check_warnings(params, &mut result);

    result
}

fn validate_timing(params: &SessionParameters, result: &mut ValidationResult) {
    if params.duration == 0 || params.duration > MAX_DURATION_SECS {
        result.add_error(ValidationError::with_path(
            ErrorCode::InvalidDuration,
            format!(
                "duration must be between 1 and {} seconds, got {}",
                MAX_DURATION_SECS, params.duration
            ),
            "duration",
        ));
    }

    if !is_positive(params.fade_time) {
        result.add_error(ValidationError::with_path(
            ErrorCode::InvalidFadeTime,
            format!("fadeTime must be a positive number, got {}", params.fade_time),
            "fadeTime",
        ));
    } else if params.duration > 0 && params.fade_time > params.duration_secs() / 2.0 {
        result.add_error(ValidationError::with_path(
            ErrorCode::FadeExceedsHalfDuration,
            format!(
                "fadeTime {} exceeds half of the {} s session",
                params.fade_time, params.duration
            ),
            "fadeTime",
        ));
    }

    if !SUPPORTED_SAMPLE_RATES.contains(&params.sample_rate) {
        result.add_error(ValidationError::with_path(
            ErrorCode::UnsupportedSampleRate,
            format!(
                "sampleRate must be one of {:?}, got {}",
                SUPPORTED_SAMPLE_RATES, params.sample_rate
            ),
            "sampleRate",
        ));
    }

    if !is_positive(params.whisper_interval) {
        result.add_error(ValidationError::with_path(
            ErrorCode::InvalidWhisperInterval,
            format!(
                "whisperInterval must be a positive number, got {}",
                params.whisper_interval
            ),
            "whisperInterval",
        ));
    }

    if !params.walk_tempo.is_finite() || params.walk_tempo < 0.0 {
        result.add_error(ValidationError::with_path(
            ErrorCode::InvalidWalkTempo,
            format!(
                "walkTempo must be zero or a positive number, got {}",
                params.walk_tempo
            ),
            "walkTempo",
        ));
    }
}

fn validate_breath(params: &SessionParameters, result: &mut ValidationResult) {
    let breath = &params.breath;
    let phases = [
        ("inhale", breath.inhale),
        ("hold", breath.hold),
        ("exhale", breath.exhale),
        ("pause", breath.pause),
    ];

    let mut all_valid = true;
    for (name, value) in phases {
        if !value.is_finite() || value < 0.0 {
            all_valid = false;
            result.add_error(ValidationError::with_path(
                ErrorCode::InvalidBreathTiming,
                format!("breath {} must be a non-negative number, got {}", name, value),
                format!("breath.{}", name),
            ));
        }
    }

    if all_valid && breath.cycle() <= 0.0 {
        result.add_error(ValidationError::with_path(
            ErrorCode::InvalidBreathTiming,
            "breath cycle must have at least one non-zero phase",
            "breath",
        ));
    }
}

fn validate_frequencies(params: &SessionParameters, result: &mut ValidationResult) {
    let nyquist = f64::from(params.sample_rate) / 2.0;

    for (path, value) in [("freqLeft", params.freq_left), ("freqRight", params.freq_right)] {
        if !is_positive(value) {
            result.add_error(ValidationError::with_path(
                ErrorCode::InvalidFrequency,
                format!("{} must be a positive frequency, got {}", path, value),
                path,
            ));
        } else if value >= nyquist {
            result.add_error(ValidationError::with_path(
                ErrorCode::InvalidFrequency,
                format!("{} {} Hz is at or above the Nyquist limit {} Hz", path, value, nyquist),
                path,
            ));
        }
    }

    if !is_positive(params.beat) {
        result.add_error(ValidationError::with_path(
            ErrorCode::InvalidFrequency,
            format!("beat must be a positive frequency, got {}", params.beat),
            "beat",
        ));
    }
}

fn validate_encoding(params: &SessionParameters, result: &mut ValidationResult) {
    if let Some(carrier) = params.carrier_freq {
        if !is_positive(carrier) {
            result.add_error(ValidationError::with_path(
                ErrorCode::InvalidFrequency,
                format!("carrierFreq must be a positive frequency, got {}", carrier),
                "carrierFreq",
            ));
            return;
        }
    }

    let nyquist = f64::from(params.sample_rate) / 2.0;
    if let Some(highest) = params.highest_carrier_freq() {
        if highest >= nyquist {
            result.add_error(ValidationError::with_path(
                ErrorCode::CarrierAboveNyquist,
                format!(
                    "{} encoding reaches {} Hz, at or above the Nyquist limit {} Hz",
                    params.encoding.as_str(),
                    highest,
                    nyquist
                ),
                "carrierFreq",
            ));
        }
    }
}

fn validate_levels(params: &SessionParameters, result: &mut ValidationResult) {
    let levels = [
        ("toneVolumeDb", params.tone_volume_db),
        ("noiseVolumeDb", params.noise_volume_db),
        ("whisperVolumeDb", params.whisper_volume_db),
        ("encodingLevelDb", params.encoding_level_db),
    ];
    for (path, value) in levels {
        if !value.is_finite() {
            result.add_error(ValidationError::with_path(
                ErrorCode::InvalidGain,
                format!("{} must be a finite dB value, got {}", path, value),
                path,
            ));
        }
    }
}

fn validate_light(params: &SessionParameters, result: &mut ValidationResult) {
    let percentages = [
        ("lightModDepth", params.light_mod_depth),
        ("brightness", params.brightness),
        ("lightPhase", params.light_phase),
        ("rgb.r", params.rgb.r),
        ("rgb.g", params.rgb.g),
        ("rgb.b", params.rgb.b),
    ];
    for (path, value) in percentages {
        if !(0.0..=100.0).contains(&value) {
            result.add_error(ValidationError::with_path(
                ErrorCode::OutOfRange,
                format!("{} must be in [0, 100], got {}", path, value),
                path,
            ));
        }
    }

    if !(0.0..=1.0).contains(&params.anti_habituation) {
        result.add_error(ValidationError::with_path(
            ErrorCode::OutOfRange,
            format!(
                "antiHabituation must be in [0, 1], got {}",
                params.anti_habituation
            ),
            "antiHabituation",
        ));
    }
}

/// Validates a sweep profile in isolation.
pub fn validate_sweep(sweep: &SweepProfile, result: &mut ValidationResult) {
    if sweep.segments.is_empty() {
        result.add_error(ValidationError::with_path(
            ErrorCode::EmptySweep,
            "sweep must have at least one segment",
            "sweep.segments",
        ));
        return;
    }

    for (i, seg) in sweep.segments.iter().enumerate() {
        if !is_positive(seg.duration) || seg.duration > 1.0 {
            result.add_error(ValidationError::with_path(
                ErrorCode::InvalidSweepSegment,
                format!("segment duration must be a fraction in (0, 1], got {}", seg.duration),
                format!("sweep.segments[{}].duration", i),
            ));
        }
        for (field, value) in [("startFreq", seg.start_freq), ("endFreq", seg.end_freq)] {
            if !is_positive(value) {
                result.add_error(ValidationError::with_path(
                    ErrorCode::InvalidSweepSegment,
                    format!("segment {} must be a positive frequency, got {}", field, value),
                    format!("sweep.segments[{}].{}", i, field),
                ));
            }
        }
    }

    let total = sweep.total_fraction();
    if (total - 1.0).abs() > 1e-6 {
        result.add_warning(ValidationWarning::with_path(
            WarningCode::SweepFractionsNotNormalized,
            format!(
                "segment fractions sum to {:.3}; the last end frequency holds past the final boundary",
                total
            ),
            "sweep.segments",
        ));
    }
}

fn check_warnings(params: &SessionParameters, result: &mut ValidationResult) {
    // W102: carrier low enough to be heard
    if let Some(carrier) = params.carrier_freq {
        if params.highest_carrier_freq().is_some() && carrier < AUDIBLE_CARRIER_THRESHOLD_HZ {
            result.add_warning(ValidationWarning::with_path(
                WarningCode::AudibleCarrier,
                format!(
                    "carrier at {} Hz is likely audible (below {} Hz)",
                    carrier, AUDIBLE_CARRIER_THRESHOLD_HZ
                ),
                "carrierFreq",
            ));
        }
    }

    // W103: tone difference disagrees with the target beat
    if params.sweep.is_none()
        && params.beat.is_finite()
        && (params.beat_difference() - params.beat).abs() > BEAT_MISMATCH_TOLERANCE_HZ
    {
        result.add_warning(ValidationWarning::with_path(
            WarningCode::BeatMismatch,
            format!(
                "tone difference is {} Hz but the light beat is {} Hz",
                params.beat_difference(),
                params.beat
            ),
            "beat",
        ));
    }

    // W104: audible whispers with nothing to say
    if params.whisper_text.is_empty()
        && params.whisper_volume_db > WHISPER_MUTED_DB
        && params.sync_mode != SyncMode::Interval
    {
        result.add_warning(ValidationWarning::with_path(
            WarningCode::MissingWhisperText,
            "whisper voice is enabled but whisperText is empty",
            "whisperText",
        ));
    }
}

fn is_positive(value: f64) -> bool {
    value.is_finite() && value > 0.0
}
