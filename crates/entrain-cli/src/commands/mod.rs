//! CLI command implementations

pub mod export;
pub mod generate;
pub mod inspect;
pub mod json_output;
pub mod light;
#[cfg(feature = "playback")]
pub mod play;
pub mod preset;
pub mod profiles;
pub mod validate;

mod reporting;

use entrain_backend_audio::AudioError;

/// Exit code for invalid input (bad parameters, unknown profile, unreadable file).
pub const EXIT_CONFIG: u8 = 1;

/// Exit code for generation or export failures.
pub const EXIT_GENERATION: u8 = 2;

/// Exit code for an error that escaped a command.
///
/// Engine failures other than configuration errors map to
/// [`EXIT_GENERATION`]; everything else is [`EXIT_CONFIG`].
pub fn exit_code_for(error: &anyhow::Error) -> u8 {
    let engine_failure = error.chain().any(|cause| {
        cause
            .downcast_ref::<AudioError>()
            .is_some_and(|audio| !audio.is_config_error())
    });
    if engine_failure {
        EXIT_GENERATION
    } else {
        EXIT_CONFIG
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Context;

    #[test]
    fn test_exit_code_for_engine_errors() {
        let err: anyhow::Error = AudioError::encoder_unavailable("lame not found").into();
        assert_eq!(exit_code_for(&err), EXIT_GENERATION);

        let wrapped = Err::<(), _>(AudioError::invalid_wav("short"))
            .context("Failed to decode session.wav")
            .unwrap_err();
        assert_eq!(exit_code_for(&wrapped), EXIT_GENERATION);

        let config: anyhow::Error = AudioError::invalid_param("duration", "zero").into();
        assert_eq!(exit_code_for(&config), EXIT_CONFIG);

        assert_eq!(exit_code_for(&anyhow::anyhow!("no JSON files")), EXIT_CONFIG);
    }
}
