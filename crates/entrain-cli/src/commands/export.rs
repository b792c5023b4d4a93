//! Export command implementation
//!
//! Re-encodes a generated WAV file as MP3 through `lame`.

use anyhow::{Context, Result};
use colored::Colorize;
use entrain_backend_audio::{
    decode_wav, encode_compressed, CompressedEncoder, EncoderConfig, LameEncoder, SessionBuffer,
};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing::warn;

/// Encodes through `lame`; a missing binary surfaces as `EncoderUnavailable`.
pub fn encode_mp3(buffer: &SessionBuffer) -> Result<Vec<u8>> {
    let mut encoder = match LameEncoder::spawn(EncoderConfig::stereo(buffer.sample_rate())) {
        Ok(encoder) => Some(encoder),
        Err(e) => {
            warn!(error = %e, "lame encoder could not be started");
            None
        }
    };
    let bytes = encode_compressed(
        buffer,
        encoder.as_mut().map(|e| e as &mut dyn CompressedEncoder),
    )?;
    Ok(bytes)
}

/// `session.wav` -> `session.mp3`.
pub fn default_output(input: &Path) -> PathBuf {
    input.with_extension("mp3")
}

/// Run the export command
///
/// # Arguments
/// * `input` - WAV file written by `entrain generate`
/// * `output` - MP3 path (default: input with an `.mp3` extension)
pub fn run(input: &str, output: Option<&str>) -> Result<ExitCode> {
    let input_path = Path::new(input);
    let output = output
        .map(PathBuf::from)
        .unwrap_or_else(|| default_output(input_path));

    println!("{} {}", "Exporting:".cyan().bold(), input);

    let bytes = std::fs::read(input_path).with_context(|| format!("Failed to read {}", input))?;
    let buffer = decode_wav(&bytes).with_context(|| format!("Failed to decode {}", input))?;
    let mp3 = encode_mp3(&buffer)?;
    std::fs::write(&output, &mp3)
        .with_context(|| format!("Failed to write {}", output.display()))?;

    println!(
        "{} {} ({} bytes)",
        "Wrote".green().bold(),
        output.display(),
        mp3.len()
    );
    Ok(ExitCode::SUCCESS)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_output_swaps_extension() {
        assert_eq!(
            default_output(Path::new("out/entrain-theta.wav")),
            PathBuf::from("out/entrain-theta.mp3")
        );
    }

    #[test]
    fn test_missing_input_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("missing.wav");
        assert!(run(&missing.to_string_lossy(), None).is_err());
    }
}
