//! Inspect command implementation
//!
//! Reads a WAV file back and reports its format and PCM hash.

use anyhow::{Context, Result};
use colored::Colorize;
use entrain_backend_audio::read_header;
use entrain_backend_audio::wav::compute_pcm_hash;
use std::process::ExitCode;

use super::json_output::InspectOutput;
use super::reporting::print_json;

/// Inspects WAV bytes.
pub fn inspect_bytes(file: &str, bytes: &[u8]) -> Result<InspectOutput> {
    let header = read_header(bytes).with_context(|| format!("Failed to parse {}", file))?;
    let pcm_hash = compute_pcm_hash(bytes)
        .with_context(|| format!("No PCM data chunk in {}", file))?;

    Ok(InspectOutput {
        file: file.to_string(),
        sample_rate: header.format.sample_rate,
        channels: header.format.channels,
        bits_per_sample: header.format.bits_per_sample,
        num_frames: header.num_frames(),
        duration_secs: header.duration_secs(),
        pcm_hash,
    })
}

/// Run the inspect command
///
/// # Arguments
/// * `input` - Path to a WAV file
/// * `json_output` - Whether to output machine-readable JSON
pub fn run(input: &str, json_output: bool) -> Result<ExitCode> {
    let bytes = std::fs::read(input).with_context(|| format!("Failed to read {}", input))?;
    let report = inspect_bytes(input, &bytes)?;

    if json_output {
        print_json(&report)?;
        return Ok(ExitCode::SUCCESS);
    }

    println!("{} {}", "Inspecting:".cyan().bold(), input);
    println!("  {:<12} {} Hz", "Sample rate".dimmed(), report.sample_rate);
    println!("  {:<12} {}", "Channels".dimmed(), report.channels);
    println!("  {:<12} {}", "Bits".dimmed(), report.bits_per_sample);
    println!("  {:<12} {}", "Frames".dimmed(), report.num_frames);
    println!(
        "  {:<12} {}",
        "Duration".dimmed(),
        entrain_spec::format_clock(report.duration_secs)
    );
    println!("  {:<12} {}", "PCM hash".dimmed(), report.pcm_hash);

    Ok(ExitCode::SUCCESS)
}

#[cfg(test)]
mod tests {
    use super::*;
    use entrain_backend_audio::{generate_session, WavResult};
    use entrain_spec::SessionParameters;

    #[test]
    fn test_inspect_generated_wav() {
        let params = SessionParameters {
            duration: 2,
            fade_time: 0.5,
            ..Default::default()
        };
        let buffer = generate_session(&params, 1).unwrap();
        let wav = WavResult::from_buffer(&buffer).unwrap();

        let report = inspect_bytes("session.wav", &wav.wav_data).unwrap();
        assert_eq!(report.sample_rate, 44_100);
        assert_eq!(report.channels, 2);
        assert_eq!(report.bits_per_sample, 16);
        assert_eq!(report.num_frames, 88_200);
        assert_eq!(report.pcm_hash, wav.pcm_hash);
    }

    #[test]
    fn test_inspect_rejects_garbage() {
        assert!(inspect_bytes("noise.bin", b"definitely not a wav file").is_err());
    }
}
