//! JSON output types for machine-readable CLI output.
//!
//! These back the `--json` flag on `generate`, `validate`, `inspect`,
//! `profiles` and `light`. Field names are stable.

use entrain_spec::{ValidationError, ValidationWarning};
use serde::{Deserialize, Serialize};

/// Error codes for CLI operations.
///
/// Validation errors pass their own `E1xx` codes through unchanged.
pub mod error_codes {
    /// File could not be read
    pub const FILE_READ: &str = "CLI_001";
    /// JSON parse error
    pub const JSON_PARSE: &str = "CLI_003";
    /// Unknown profile, subprofile or sweep
    pub const UNKNOWN_CATALOG_ENTRY: &str = "CLI_004";
    /// Invalid session parameters
    pub const INVALID_PARAMS: &str = "CLI_006";
    /// Generation error (wraps backend errors)
    pub const GENERATION_ERROR: &str = "CLI_010";
    /// Export error (wraps backend errors)
    pub const EXPORT_ERROR: &str = "CLI_011";
    /// Malformed WAV input
    pub const INVALID_WAV: &str = "CLI_012";
}

/// A structured error in JSON output.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct JsonError {
    /// Stable error code (e.g., "CLI_001", "E101")
    pub code: String,
    /// Human-readable error message
    pub message: String,
    /// JSON path to the problematic field (if applicable)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    /// Source file path (if applicable)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file: Option<String>,
}

impl JsonError {
    /// Creates a new error with code and message.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            path: None,
            file: None,
        }
    }

    /// Sets the JSON path for this error.
    pub fn with_path(mut self, path: impl Into<String>) -> Self {
        self.path = Some(path.into());
        self
    }

    /// Sets the file path for this error.
    pub fn with_file(mut self, file: impl Into<String>) -> Self {
        self.file = Some(file.into());
        self
    }
}

/// A structured warning in JSON output.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct JsonWarning {
    /// Stable warning code (e.g., "W101")
    pub code: String,
    /// Human-readable warning message
    pub message: String,
    /// JSON path to the problematic field (if applicable)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
}

impl JsonWarning {
    /// Creates a new warning with code and message.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            path: None,
        }
    }
}

/// Converts a parameter validation error.
pub fn validation_error_to_json(error: &ValidationError) -> JsonError {
    let json = JsonError::new(error.code.code(), &error.message);
    match &error.path {
        Some(path) => json.with_path(path),
        None => json,
    }
}

/// Converts a parameter validation warning.
pub fn validation_warning_to_json(warning: &ValidationWarning) -> JsonWarning {
    JsonWarning {
        path: warning.path.clone(),
        ..JsonWarning::new(warning.code.code(), &warning.message)
    }
}

/// Result of `entrain validate` for one file.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ValidateResult {
    /// File that was validated
    pub file: String,
    /// Whether the file holds a preset or bare parameters
    pub kind: String,
    /// Canonical parameter hash (only when the file parsed)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub params_hash: Option<String>,
    pub ok: bool,
    pub errors: Vec<JsonError>,
    pub warnings: Vec<JsonWarning>,
}

/// Output of `entrain validate --json`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ValidateOutput {
    /// True when every file validated
    pub success: bool,
    pub results: Vec<ValidateResult>,
}

/// Output of `entrain generate --json`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GenerateOutput {
    pub success: bool,
    /// Seed the session was rendered with
    pub seed: u32,
    /// Canonical parameter hash
    #[serde(skip_serializing_if = "Option::is_none")]
    pub params_hash: Option<String>,
    /// Written audio file
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output: Option<String>,
    /// BLAKE3 hash of the PCM payload (WAV only)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pcm_hash: Option<String>,
    /// Additional files written (preset, basic session, log)
    pub extras: Vec<String>,
    pub duration_ms: u64,
    pub errors: Vec<JsonError>,
    pub warnings: Vec<JsonWarning>,
}

impl GenerateOutput {
    /// A failed run with the given errors.
    pub fn failure(seed: u32, errors: Vec<JsonError>, warnings: Vec<JsonWarning>) -> Self {
        Self {
            success: false,
            seed,
            params_hash: None,
            output: None,
            pcm_hash: None,
            extras: Vec::new(),
            duration_ms: 0,
            errors,
            warnings,
        }
    }
}

/// Output of `entrain inspect --json`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct InspectOutput {
    pub file: String,
    pub sample_rate: u32,
    pub channels: u16,
    pub bits_per_sample: u16,
    pub num_frames: usize,
    pub duration_secs: f64,
    pub pcm_hash: String,
}
