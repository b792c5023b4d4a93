//! Error types for the audio backend.

use entrain_spec::BackendError;
use thiserror::Error;

/// Result type for audio operations.
pub type AudioResult<T> = Result<T, AudioError>;

/// Errors that can occur during session generation, export, or playback.
#[derive(Debug, Error)]
pub enum AudioError {
    /// Parameters failed validation before generation started.
    #[error("invalid session parameters: {message}")]
    InvalidParameters {
        /// Code of the first validation error (e.g. "E101").
        code: &'static str,
        /// Message of the first validation error.
        message: String,
        /// Total number of validation errors.
        count: usize,
    },

    /// Invalid parameter value passed to a lower-level API.
    #[error("invalid parameter '{name}': {message}")]
    InvalidParameter {
        /// Parameter name.
        name: String,
        /// Error message.
        message: String,
    },

    /// No session buffer has been generated yet.
    #[error("no session buffer is available; generate a session first")]
    NoBuffer,

    /// Generation was cancelled or superseded before completion.
    #[error("generation was cancelled")]
    Cancelled,

    /// The compressed encoder collaborator is not present.
    #[error("compressed encoder unavailable: {reason}")]
    EncoderUnavailable {
        /// Why the encoder could not be used.
        reason: String,
    },

    /// The compressed encoder ran but failed.
    #[error("compressed encoding failed: {message}")]
    EncoderFailed {
        /// Error message.
        message: String,
    },

    /// The host audio output could not be opened.
    #[error("audio output unavailable: {message}")]
    OutputUnavailable {
        /// Error message.
        message: String,
    },

    /// Malformed WAV data.
    #[error("invalid WAV data: {message}")]
    InvalidWav {
        /// Error message.
        message: String,
    },

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Background generation task failed to run to completion.
    #[error("generation task failed: {message}")]
    TaskFailed {
        /// Error message.
        message: String,
    },
}

impl AudioError {
    /// Creates an invalid parameter error.
    pub fn invalid_param(name: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidParameter {
            name: name.into(),
            message: message.into(),
        }
    }

    /// Creates an encoder-unavailable error.
    pub fn encoder_unavailable(reason: impl Into<String>) -> Self {
        Self::EncoderUnavailable {
            reason: reason.into(),
        }
    }

    /// Creates an encoder-failed error.
    pub fn encoder_failed(message: impl Into<String>) -> Self {
        Self::EncoderFailed {
            message: message.into(),
        }
    }

    /// Creates an invalid-WAV error.
    pub fn invalid_wav(message: impl Into<String>) -> Self {
        Self::InvalidWav {
            message: message.into(),
        }
    }

    /// Returns true for configuration errors detected before generation.
    pub fn is_config_error(&self) -> bool {
        matches!(
            self,
            AudioError::InvalidParameters { .. } | AudioError::InvalidParameter { .. }
        )
    }
}

impl BackendError for AudioError {
    fn code(&self) -> &'static str {
        match self {
            AudioError::InvalidParameters { .. } => "AUDIO_001",
            AudioError::InvalidParameter { .. } => "AUDIO_002",
            AudioError::NoBuffer => "AUDIO_003",
            AudioError::Cancelled => "AUDIO_004",
            AudioError::EncoderUnavailable { .. } => "AUDIO_005",
            AudioError::EncoderFailed { .. } => "AUDIO_006",
            AudioError::OutputUnavailable { .. } => "AUDIO_007",
            AudioError::InvalidWav { .. } => "AUDIO_008",
            AudioError::Io(_) => "AUDIO_009",
            AudioError::TaskFailed { .. } => "AUDIO_010",
        }
    }

    fn category(&self) -> &'static str {
        match self {
            AudioError::InvalidParameters { .. } | AudioError::InvalidParameter { .. } => {
                "config"
            }
            AudioError::EncoderUnavailable { .. } | AudioError::EncoderFailed { .. } => "encoder",
            AudioError::OutputUnavailable { .. } => "playback",
            _ => "audio",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_param_helper() {
        let err = AudioError::invalid_param("fraction", "must be in [0, 1]");
        assert!(err.to_string().contains("fraction"));
        assert!(err.is_config_error());
        assert_eq!(err.code(), "AUDIO_002");
    }

    #[test]
    fn test_encoder_errors_are_distinct() {
        let missing = AudioError::encoder_unavailable("lame not found");
        let failed = AudioError::encoder_failed("exit status 1");
        assert_ne!(missing.code(), failed.code());
        assert_eq!(missing.category(), "encoder");
        assert!(!missing.is_config_error());
    }
}
