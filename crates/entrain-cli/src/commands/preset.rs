//! Preset command implementation
//!
//! Writes a preset file for a built-in profile, with the usual overrides.

use anyhow::{Context, Result};
use colored::Colorize;
use entrain_spec::validate_params;
use std::path::PathBuf;
use std::process::ExitCode;

use super::reporting::print_validation;
use super::EXIT_CONFIG;
use crate::input::SessionArgs;

/// Run the preset command
///
/// # Arguments
/// * `session` - Session source and overrides
/// * `output` - Preset path (default: `entrain-preset-<millis>.entrain.json`)
///
/// # Returns
/// Exit code: 0 on success, 1 if the session is invalid
pub fn run(session: &SessionArgs, output: Option<&str>) -> Result<ExitCode> {
    let resolved = session.resolve().context("Failed to resolve session")?;

    let validation = validate_params(&resolved.params);
    print_validation(&validation);
    if !validation.is_ok() {
        println!("{}", "Preset not written: parameters are invalid".red());
        return Ok(ExitCode::from(EXIT_CONFIG));
    }

    let now = chrono::Utc::now();
    let path = output.map(PathBuf::from).unwrap_or_else(|| {
        PathBuf::from(format!("entrain-preset-{}.entrain.json", now.timestamp_millis()))
    });

    let preset = resolved.to_preset(&now.to_rfc3339_opts(chrono::SecondsFormat::Millis, true));
    preset
        .save(&path)
        .with_context(|| format!("Failed to write preset {}", path.display()))?;

    println!("{} {} ({})", "Wrote".green().bold(), path.display(), preset.name);
    Ok(ExitCode::SUCCESS)
}

#[cfg(test)]
mod tests {
    use super::*;
    use entrain_spec::{Preset, PRESET_VERSION};

    #[test]
    fn test_writes_loadable_preset() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("gamma.entrain.json");
        let session = SessionArgs {
            profile: Some("gamma".to_string()),
            lang: "de".to_string(),
            duration: Some(600),
            ..Default::default()
        };

        let code = run(&session, Some(&path.to_string_lossy())).unwrap();
        assert_eq!(code, ExitCode::SUCCESS);

        let preset = Preset::load(&path).unwrap();
        assert_eq!(preset.version, PRESET_VERSION);
        assert_eq!(preset.profile, "gamma");
        assert_eq!(preset.params.duration, 600);
        assert!(preset.name.starts_with("Gamma - "));
    }

    #[test]
    fn test_unknown_subprofile_is_an_error() {
        let session = SessionArgs {
            profile: Some("gamma".to_string()),
            subprofile: Some("theta-meditation".to_string()),
            ..Default::default()
        };
        assert!(run(&session, None).is_err());
    }
}
