use colored::Colorize;
use entrain_spec::{SpecError, ValidationResult};

use super::json_output::{error_codes, JsonError};

/// Prints coded validation errors and warnings, one per line.
pub(crate) fn print_validation(result: &ValidationResult) {
    for error in &result.errors {
        let path = error
            .path
            .as_ref()
            .map(|p| format!(" at {}", p))
            .unwrap_or_default();
        println!(
            "  {} [{}]{}: {}",
            "x".red(),
            error.code,
            path.dimmed(),
            error.message
        );
    }
    for warning in &result.warnings {
        let path = warning
            .path
            .as_ref()
            .map(|p| format!(" at {}", p))
            .unwrap_or_default();
        println!(
            "  {} [{}]{}: {}",
            "!".yellow(),
            warning.code,
            path.dimmed(),
            warning.message
        );
    }
}

/// Maps a source-loading error onto a CLI error code.
pub(crate) fn spec_error_to_json(error: &SpecError) -> JsonError {
    let code = match error {
        SpecError::Io(_) => error_codes::FILE_READ,
        SpecError::JsonParse(_) | SpecError::UnsupportedPresetVersion { .. } => {
            error_codes::JSON_PARSE
        }
        SpecError::UnknownCatalogEntry { .. } => error_codes::UNKNOWN_CATALOG_ENTRY,
        SpecError::ValidationFailed(_) => error_codes::INVALID_PARAMS,
    };
    JsonError::new(code, error.to_string())
}

/// Prints a JSON document to stdout.
pub(crate) fn print_json<T: serde::Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
