//! Error types for session parameter validation and preset processing.

use thiserror::Error;

/// Error codes for session parameter validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    // Timing errors (E101-E109)
    /// E101: Session duration is zero or exceeds the maximum
    InvalidDuration,
    /// E102: Fade time is not a positive finite number
    InvalidFadeTime,
    /// E103: Sample rate is not supported
    UnsupportedSampleRate,
    /// E104: Breath timing is negative, non-finite, or all zero
    InvalidBreathTiming,
    /// E105: Whisper interval is not a positive finite number
    InvalidWhisperInterval,
    /// E106: Fade time exceeds half of the session duration
    FadeExceedsHalfDuration,

    // Frequency errors (E110-E119)
    /// E110: Carrier or beat frequency is non-finite or not positive
    InvalidFrequency,
    /// E111: Covert carrier frequency exceeds the Nyquist limit
    CarrierAboveNyquist,
    /// E112: Walking tempo is negative or non-finite
    InvalidWalkTempo,

    // Level and range errors (E120-E129)
    /// E120: Gain in dB is not finite
    InvalidGain,
    /// E121: Value outside its 0-100 (or 0-1) scale
    OutOfRange,

    // Sweep errors (E130-E139)
    /// E130: Sweep profile has no segments
    EmptySweep,
    /// E131: Sweep segment has a non-positive fraction or invalid frequency
    InvalidSweepSegment,
}

impl ErrorCode {
    /// Returns the error code string (e.g., "E101").
    pub fn code(&self) -> &'static str {
        match self {
            ErrorCode::InvalidDuration => "E101",
            ErrorCode::InvalidFadeTime => "E102",
            ErrorCode::UnsupportedSampleRate => "E103",
            ErrorCode::InvalidBreathTiming => "E104",
            ErrorCode::InvalidWhisperInterval => "E105",
            ErrorCode::FadeExceedsHalfDuration => "E106",
            ErrorCode::InvalidFrequency => "E110",
            ErrorCode::CarrierAboveNyquist => "E111",
            ErrorCode::InvalidWalkTempo => "E112",
            ErrorCode::InvalidGain => "E120",
            ErrorCode::OutOfRange => "E121",
            ErrorCode::EmptySweep => "E130",
            ErrorCode::InvalidSweepSegment => "E131",
        }
    }
}

impl std::fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Warning codes for session parameter validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WarningCode {
    /// W101: Sweep fractions do not sum to 1
    SweepFractionsNotNormalized,
    /// W102: Covert carrier sits in the audible range
    AudibleCarrier,
    /// W103: Beat difference between left and right tones disagrees with the target beat
    BeatMismatch,
    /// W104: Whisper gain is audible but no affirmation text was supplied
    MissingWhisperText,
}

impl WarningCode {
    /// Returns the warning code string (e.g., "W101").
    pub fn code(&self) -> &'static str {
        match self {
            WarningCode::SweepFractionsNotNormalized => "W101",
            WarningCode::AudibleCarrier => "W102",
            WarningCode::BeatMismatch => "W103",
            WarningCode::MissingWhisperText => "W104",
        }
    }
}

impl std::fmt::Display for WarningCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// A validation error with code, message, and optional field path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    /// The error code.
    pub code: ErrorCode,
    /// Human-readable error message.
    pub message: String,
    /// Path to the problematic field (e.g., "sweep.segments\[1\].duration").
    pub path: Option<String>,
}

impl ValidationError {
    /// Creates a new validation error.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            path: None,
        }
    }

    /// Creates a new validation error with a field path.
    pub fn with_path(code: ErrorCode, message: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            path: Some(path.into()),
        }
    }
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if let Some(ref path) = self.path {
            write!(f, "{}: {} (at {})", self.code, self.message, path)
        } else {
            write!(f, "{}: {}", self.code, self.message)
        }
    }
}

impl std::error::Error for ValidationError {}

/// A validation warning with code, message, and optional field path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationWarning {
    /// The warning code.
    pub code: WarningCode,
    /// Human-readable warning message.
    pub message: String,
    /// Path to the field the warning refers to.
    pub path: Option<String>,
}

impl ValidationWarning {
    /// Creates a new validation warning.
    pub fn new(code: WarningCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            path: None,
        }
    }

    /// Creates a new validation warning with a field path.
    pub fn with_path(
        code: WarningCode,
        message: impl Into<String>,
        path: impl Into<String>,
    ) -> Self {
        Self {
            code,
            message: message.into(),
            path: Some(path.into()),
        }
    }
}

impl std::fmt::Display for ValidationWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if let Some(ref path) = self.path {
            write!(f, "{}: {} (at {})", self.code, self.message, path)
        } else {
            write!(f, "{}: {}", self.code, self.message)
        }
    }
}

/// Top-level error type for parameter and preset operations.
#[derive(Debug, Error)]
pub enum SpecError {
    /// Parameter validation failed with one or more errors.
    #[error("session parameters failed validation with {0} error(s)")]
    ValidationFailed(usize),

    /// JSON parsing error.
    #[error("JSON parse error: {0}")]
    JsonParse(#[from] serde_json::Error),

    /// Unknown built-in profile, subprofile, or sweep name.
    #[error("unknown {kind} '{name}'")]
    UnknownCatalogEntry {
        /// What was being looked up ("profile", "subprofile", "sweep").
        kind: &'static str,
        /// The name that did not resolve.
        name: String,
    },

    /// Preset written by an incompatible format version.
    #[error("unsupported preset version '{found}' (expected {expected}.x)")]
    UnsupportedPresetVersion {
        /// Version string found in the file.
        found: String,
        /// Supported major version.
        expected: u32,
    },

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result of parameter validation.
#[derive(Debug, Clone)]
pub struct ValidationResult {
    /// Whether validation passed (no errors).
    pub ok: bool,
    /// List of validation errors.
    pub errors: Vec<ValidationError>,
    /// List of validation warnings.
    pub warnings: Vec<ValidationWarning>,
}

impl ValidationResult {
    /// Creates a successful validation result.
    pub fn success() -> Self {
        Self {
            ok: true,
            errors: Vec::new(),
            warnings: Vec::new(),
        }
    }

    /// Creates a failed validation result.
    pub fn failure(errors: Vec<ValidationError>) -> Self {
        Self {
            ok: errors.is_empty(),
            errors,
            warnings: Vec::new(),
        }
    }

    /// Adds an error to the result.
    pub fn add_error(&mut self, error: ValidationError) {
        self.errors.push(error);
        self.ok = false;
    }

    /// Adds a warning to the result.
    pub fn add_warning(&mut self, warning: ValidationWarning) {
        self.warnings.push(warning);
    }

    /// Returns true if there are no errors.
    pub fn is_ok(&self) -> bool {
        self.ok
    }

    /// Returns the first error, if any.
    pub fn first_error(&self) -> Option<&ValidationError> {
        self.errors.first()
    }

    /// Converts to a Result, returning Err if there are errors.
    pub fn into_result(self) -> Result<Vec<ValidationWarning>, Vec<ValidationError>> {
        if self.ok {
            Ok(self.warnings)
        } else {
            Err(self.errors)
        }
    }
}

impl Default for ValidationResult {
    fn default() -> Self {
        Self::success()
    }
}

/// Common trait for backend errors.
///
/// Each backend error type implements this trait so the CLI can report
/// stable codes (e.g. "AUDIO_003") without depending on the concrete type.
pub trait BackendError: std::error::Error {
    /// Get the error code for reporting.
    fn code(&self) -> &'static str;

    /// Get a human-readable message describing the error.
    fn message(&self) -> String {
        self.to_string()
    }

    /// Get the error category for grouping related errors.
    fn category(&self) -> &'static str;
}
