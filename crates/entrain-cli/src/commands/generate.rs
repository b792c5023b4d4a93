//! Generate command implementation
//!
//! Resolves session parameters, renders the session in the background and
//! writes the audio file plus any requested sidecar files.

use anyhow::{Context, Result};
use colored::Colorize;
use entrain_backend_audio::{AudioError, NullSink, SessionBuffer, SessionEngine};
use entrain_spec::{
    canonical_params_hash, validate_params, BasicSession, SessionLog, SessionParameters,
};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::Arc;
use std::time::Instant;

use super::json_output::{
    error_codes, validation_error_to_json, validation_warning_to_json, GenerateOutput, JsonError,
};
use super::export::encode_mp3;
use super::reporting::{print_json, print_validation, spec_error_to_json};
use super::{EXIT_CONFIG, EXIT_GENERATION};
use crate::input::{ResolvedSession, SessionArgs};

/// Audio container written by `generate`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AudioFormat {
    #[default]
    Wav,
    Mp3,
}

impl AudioFormat {
    /// File extension without the dot.
    pub fn extension(&self) -> &'static str {
        match self {
            AudioFormat::Wav => "wav",
            AudioFormat::Mp3 => "mp3",
        }
    }
}

impl std::str::FromStr for AudioFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "wav" => Ok(AudioFormat::Wav),
            "mp3" => Ok(AudioFormat::Mp3),
            other => Err(format!("unknown audio format '{}' (expected wav or mp3)", other)),
        }
    }
}

/// Options for the generate command beyond the session itself.
#[derive(Debug, Clone, Default)]
pub struct GenerateOptions {
    /// Output audio path; a conventional name in the current directory if unset
    pub output: Option<String>,
    /// Session seed; a random seed if unset
    pub seed: Option<u32>,
    pub format: AudioFormat,
    /// Also write a preset to this path
    pub preset_out: Option<String>,
    /// Also write a basic-session control file next to the audio
    pub basic_session: bool,
    /// Also write a session log next to the audio
    pub log: bool,
    /// Intention recorded in the session log
    pub intention: Option<String>,
    /// Output machine-readable JSON
    pub json: bool,
}

/// Files written by a successful run.
struct Written {
    output: PathBuf,
    pcm_hash: Option<String>,
    extras: Vec<PathBuf>,
}

/// Run the generate command
///
/// # Arguments
/// * `session` - Session source and overrides
/// * `options` - Output, seed and sidecar options
///
/// # Returns
/// Exit code: 0 on success, 1 for invalid input, 2 if generation or export failed
pub fn run(session: &SessionArgs, options: &GenerateOptions) -> Result<ExitCode> {
    let start = Instant::now();
    let seed = options.seed.unwrap_or_else(rand::random);

    let resolved = match session.resolve() {
        Ok(resolved) => resolved,
        Err(e) => {
            if options.json {
                print_json(&GenerateOutput::failure(seed, vec![spec_error_to_json(&e)], vec![]))?;
            } else {
                eprintln!("{} {}", "error:".red().bold(), e);
            }
            return Ok(ExitCode::from(EXIT_CONFIG));
        }
    };

    let validation = validate_params(&resolved.params);
    let warnings = validation
        .warnings
        .iter()
        .map(validation_warning_to_json)
        .collect::<Vec<_>>();

    if !options.json {
        println!(
            "{} {} - {} ({}s, seed {})",
            "Generating:".cyan().bold(),
            resolved.profile_name(),
            resolved.subprofile_name().unwrap_or("Custom"),
            resolved.params.duration,
            seed
        );
        println!("{} {}", "Source:".dimmed(), resolved.source.as_str());
        print_validation(&validation);
    }

    if !validation.is_ok() {
        if options.json {
            let errors = validation
                .errors
                .iter()
                .map(validation_error_to_json)
                .collect();
            print_json(&GenerateOutput::failure(seed, errors, warnings))?;
        } else {
            println!(
                "\n{} {} error(s)",
                "Invalid parameters:".red().bold(),
                validation.errors.len()
            );
        }
        return Ok(ExitCode::from(EXIT_CONFIG));
    }

    let params_hash = canonical_params_hash(&resolved.params).ok();

    let written = render_session(&resolved.params, seed, options.json)
        .and_then(|buffer| write_outputs(&resolved, &buffer, options));

    let duration_ms = start.elapsed().as_millis() as u64;
    match written {
        Ok(written) => {
            if options.json {
                print_json(&GenerateOutput {
                    success: true,
                    seed,
                    params_hash,
                    output: Some(written.output.display().to_string()),
                    pcm_hash: written.pcm_hash,
                    extras: written
                        .extras
                        .iter()
                        .map(|p| p.display().to_string())
                        .collect(),
                    duration_ms,
                    errors: vec![],
                    warnings,
                })?;
            } else {
                println!(
                    "\n{} {} ({}ms)",
                    "Wrote".green().bold(),
                    written.output.display(),
                    duration_ms
                );
                if let Some(hash) = &written.pcm_hash {
                    println!("{} {}", "PCM hash:".dimmed(), hash);
                }
                for extra in &written.extras {
                    println!("  {} {}", "+".green(), extra.display());
                }
            }
            Ok(ExitCode::SUCCESS)
        }
        Err(e) => {
            let (exit, code) = match e.downcast_ref::<AudioError>() {
                Some(audio) if audio.is_config_error() => (EXIT_CONFIG, error_codes::INVALID_PARAMS),
                Some(AudioError::EncoderUnavailable { .. } | AudioError::EncoderFailed { .. }) => {
                    (EXIT_GENERATION, error_codes::EXPORT_ERROR)
                }
                _ => (EXIT_GENERATION, error_codes::GENERATION_ERROR),
            };
            if options.json {
                let mut output =
                    GenerateOutput::failure(seed, vec![JsonError::new(code, format!("{:#}", e))], warnings);
                output.params_hash = params_hash;
                output.duration_ms = duration_ms;
                print_json(&output)?;
            } else {
                eprintln!("{} {:#}", "error:".red().bold(), e);
            }
            Ok(ExitCode::from(exit))
        }
    }
}

/// Renders on the tokio blocking pool, printing progress lines.
fn render_session(params: &SessionParameters, seed: u32, quiet: bool) -> Result<Arc<SessionBuffer>> {
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .context("Failed to start the generation runtime")?;

    let mut engine = SessionEngine::new(Box::new(NullSink));
    let buffer = runtime.block_on(async {
        let mut pending = engine.start_generation(params, seed)?;
        while let Some(progress) = pending.next_progress().await {
            if !quiet {
                println!("  {} {}", "->".green(), progress);
            }
        }
        engine.complete_generation(pending).await
    })?;
    Ok(buffer)
}

fn write_outputs(
    resolved: &ResolvedSession,
    buffer: &SessionBuffer,
    options: &GenerateOptions,
) -> Result<Written> {
    let output = options
        .output
        .as_ref()
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(resolved.audio_file_name(options.format.extension())));

    let pcm_hash = match options.format {
        AudioFormat::Wav => {
            let wav = entrain_backend_audio::WavResult::from_buffer(buffer)?;
            std::fs::write(&output, &wav.wav_data)
                .with_context(|| format!("Failed to write {}", output.display()))?;
            Some(wav.pcm_hash)
        }
        AudioFormat::Mp3 => {
            let bytes = encode_mp3(buffer)?;
            std::fs::write(&output, bytes)
                .with_context(|| format!("Failed to write {}", output.display()))?;
            None
        }
    };

    let now = chrono::Utc::now();
    let created_at = now.to_rfc3339_opts(chrono::SecondsFormat::Millis, true);
    let dir = output.parent().unwrap_or_else(|| Path::new("")).to_path_buf();
    let mut extras = Vec::new();

    if let Some(path) = &options.preset_out {
        let preset = resolved.to_preset(&created_at);
        let path = PathBuf::from(path);
        preset
            .save(&path)
            .with_context(|| format!("Failed to write preset {}", path.display()))?;
        extras.push(path);
    }

    if options.basic_session {
        let text = BasicSession::render(
            &resolved.params,
            resolved.profile_name(),
            resolved.subprofile_name(),
            &created_at,
        );
        let path = dir.join(BasicSession::file_name(resolved.profile_name()));
        std::fs::write(&path, text)
            .with_context(|| format!("Failed to write {}", path.display()))?;
        extras.push(path);
    }

    if options.log {
        let mut log = SessionLog::new(
            &created_at,
            resolved.profile_name(),
            resolved.subprofile_name().map(str::to_string),
            resolved.params.duration_secs(),
        );
        if let Some(intention) = &options.intention {
            log = log.with_intention(intention);
        }
        let path = dir.join(format!("entrain-session-{}.json", now.timestamp_millis()));
        std::fs::write(&path, log.to_json_pretty()?)
            .with_context(|| format!("Failed to write {}", path.display()))?;
        extras.push(path);
    }

    Ok(Written {
        output,
        pcm_hash,
        extras,
    })
}
