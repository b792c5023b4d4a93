//! Validate command implementation
//!
//! Validates session parameter or preset files without generating audio.

use anyhow::Result;
use colored::Colorize;
use entrain_spec::{canonical_params_hash, validate_params, Preset, SessionParameters, SpecError};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use walkdir::WalkDir;

use super::json_output::{
    validation_error_to_json, validation_warning_to_json, ValidateOutput, ValidateResult,
};
use super::reporting::{print_json, print_validation, spec_error_to_json};
use super::EXIT_CONFIG;

/// What a JSON file on disk turned out to hold.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileKind {
    Preset,
    Params,
}

impl FileKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            FileKind::Preset => "preset",
            FileKind::Params => "params",
        }
    }
}

/// Run the validate command
///
/// # Arguments
/// * `input` - A params/preset JSON file, or a directory scanned recursively for `.json` files
/// * `json_output` - Whether to output machine-readable JSON diagnostics
///
/// # Returns
/// Exit code: 0 if every file is valid, 1 otherwise
pub fn run(input: &str, json_output: bool) -> Result<ExitCode> {
    let files = collect_files(Path::new(input));
    if files.is_empty() {
        anyhow::bail!("no JSON files found under {}", input);
    }

    let results: Vec<ValidateResult> = files
        .iter()
        .map(|path| validate_file(path, !json_output))
        .collect();
    let success = results.iter().all(|r| r.ok);

    if json_output {
        print_json(&ValidateOutput { success, results })?;
    } else {
        let passed = results.iter().filter(|r| r.ok).count();
        println!(
            "\n{} {}/{} file(s) valid",
            if success {
                "Done:".green().bold()
            } else {
                "Done:".red().bold()
            },
            passed,
            results.len()
        );
    }

    Ok(if success {
        ExitCode::SUCCESS
    } else {
        ExitCode::from(EXIT_CONFIG)
    })
}

fn collect_files(input: &Path) -> Vec<PathBuf> {
    if input.is_file() {
        return vec![input.to_path_buf()];
    }
    let mut files: Vec<PathBuf> = WalkDir::new(input)
        .into_iter()
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.file_type().is_file())
        .map(|entry| entry.into_path())
        .filter(|path| path.extension().is_some_and(|ext| ext == "json"))
        .collect();
    files.sort();
    files
}

/// Loads `content` as a preset when it carries a `version` key, else as
/// bare parameters.
pub fn parse_session_file(content: &str) -> Result<(FileKind, SessionParameters), SpecError> {
    let value: serde_json::Value = serde_json::from_str(content)?;
    if value.get("version").is_some() {
        let preset = Preset::from_json(content)?;
        Ok((FileKind::Preset, preset.session_params()))
    } else {
        Ok((FileKind::Params, SessionParameters::from_json(content)?))
    }
}

fn validate_file(path: &Path, print_text: bool) -> ValidateResult {
    let file = path.display().to_string();
    if print_text {
        println!("{} {}", "Validating:".cyan().bold(), file);
    }

    let parsed = std::fs::read_to_string(path)
        .map_err(SpecError::from)
        .and_then(|content| parse_session_file(&content));

    let (kind, params) = match parsed {
        Ok(parsed) => parsed,
        Err(e) => {
            tracing::debug!(file = %file, error = %e, "file could not be loaded");
            if print_text {
                println!("  {} {}", "x".red(), e);
            }
            return ValidateResult {
                file: file.clone(),
                kind: "unknown".to_string(),
                params_hash: None,
                ok: false,
                errors: vec![spec_error_to_json(&e).with_file(&file)],
                warnings: vec![],
            };
        }
    };

    let result = validate_params(&params);
    if print_text {
        print_validation(&result);
    }

    ValidateResult {
        file: file.clone(),
        kind: kind.as_str().to_string(),
        params_hash: canonical_params_hash(&params).ok(),
        ok: result.is_ok(),
        errors: result
            .errors
            .iter()
            .map(|e| validation_error_to_json(e).with_file(&file))
            .collect(),
        warnings: result.warnings.iter().map(validation_warning_to_json).collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use entrain_spec::{catalog, Language};

    #[test]
    fn test_parse_detects_preset() {
        let theta = catalog::profile("theta").unwrap();
        let sub = theta.default_subprofile().unwrap();
        let preset = Preset::for_subprofile(theta, sub, Language::English, "2026-01-01T00:00:00Z");
        let json = preset.to_json_pretty().unwrap();

        let (kind, params) = parse_session_file(&json).unwrap();
        assert_eq!(kind, FileKind::Preset);
        assert_eq!(params, preset.session_params());
    }

    #[test]
    fn test_parse_detects_params() {
        let json = SessionParameters::default().to_json_pretty().unwrap();
        let (kind, params) = parse_session_file(&json).unwrap();
        assert_eq!(kind, FileKind::Params);
        assert_eq!(params, SessionParameters::default());
    }

    #[test]
    fn test_directory_scan_reports_invalid_file() {
        let dir = tempfile::tempdir().unwrap();
        let good = SessionParameters {
            duration: 60,
            ..Default::default()
        };
        let bad = SessionParameters {
            duration: 0,
            ..Default::default()
        };
        std::fs::write(dir.path().join("good.json"), good.to_json_pretty().unwrap()).unwrap();
        std::fs::write(dir.path().join("bad.json"), bad.to_json_pretty().unwrap()).unwrap();
        std::fs::write(dir.path().join("notes.txt"), "ignored").unwrap();

        let files = collect_files(dir.path());
        assert_eq!(files.len(), 2);

        let results: Vec<_> = files.iter().map(|p| validate_file(p, false)).collect();
        let bad_result = results.iter().find(|r| r.file.ends_with("bad.json")).unwrap();
        assert!(!bad_result.ok);
        assert_eq!(bad_result.errors[0].code, "E101");
        assert!(results.iter().find(|r| r.file.ends_with("good.json")).unwrap().ok);

        let code = run(&dir.path().to_string_lossy(), true).unwrap();
        assert_eq!(code, ExitCode::from(EXIT_CONFIG));
    }

    #[test]
    fn test_unparseable_file_is_invalid() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.json");
        std::fs::write(&path, "{ not json").unwrap();
        let result = validate_file(&path, false);
        assert!(!result.ok);
        assert_eq!(result.errors[0].code, "CLI_003");
    }
}
