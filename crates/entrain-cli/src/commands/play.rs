//! Play command implementation
//!
//! Generates a session and plays it through the default output device,
//! printing the light modulation and breath phase as it goes.

use anyhow::{Context, Result};
use colored::Colorize;
use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use entrain_backend_audio::{AudioError, AudioResult, AudioSink, SessionBuffer, SessionEngine};
use entrain_spec::{format_clock, validate_params};
use std::process::ExitCode;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, error};

use super::reporting::print_validation;
use super::EXIT_CONFIG;
use crate::input::SessionArgs;

/// Status line refresh interval.
const STATUS_INTERVAL: Duration = Duration::from_millis(500);

fn output_error<E: std::fmt::Display>(e: E) -> AudioError {
    AudioError::OutputUnavailable {
        message: e.to_string(),
    }
}

/// Streams a session buffer to the default cpal output device.
#[derive(Default)]
pub struct CpalSink {
    stream: Option<cpal::Stream>,
}

impl AudioSink for CpalSink {
    fn start(&mut self, buffer: Arc<SessionBuffer>, offset_frame: usize) -> AudioResult<()> {
        self.stream = None;

        let host = cpal::default_host();
        let device = host
            .default_output_device()
            .ok_or_else(|| output_error("no audio output device available"))?;

        let config = cpal::StreamConfig {
            channels: 2,
            sample_rate: cpal::SampleRate(buffer.sample_rate()),
            buffer_size: cpal::BufferSize::Default,
        };

        let mut cursor = offset_frame;
        let stream = device
            .build_output_stream(
                &config,
                move |data: &mut [f32], _: &cpal::OutputCallbackInfo| {
                    for frame in data.chunks_mut(2) {
                        let (left, right) = buffer.frame(cursor).unwrap_or((0.0, 0.0));
                        frame[0] = left;
                        if let Some(sample) = frame.get_mut(1) {
                            *sample = right;
                        }
                        cursor = cursor.saturating_add(1);
                    }
                },
                |err| error!("Audio stream error: {}", err),
                None,
            )
            .map_err(output_error)?;

        stream.play().map_err(output_error)?;
        debug!(offset_frame, "audio stream started");
        self.stream = Some(stream);
        Ok(())
    }

    fn stop(&mut self) -> AudioResult<()> {
        if let Some(stream) = self.stream.take() {
            stream.pause().map_err(output_error)?;
            debug!("audio stream stopped");
        }
        Ok(())
    }
}

/// Run the play command
///
/// # Arguments
/// * `session` - Session source and overrides
/// * `seed` - Session seed; random if unset
/// * `offset` - Start position in seconds
pub fn run(session: &SessionArgs, seed: Option<u32>, offset: f64) -> Result<ExitCode> {
    let resolved = session.resolve().context("Failed to resolve session")?;
    let validation = validate_params(&resolved.params);
    print_validation(&validation);
    if !validation.is_ok() {
        return Ok(ExitCode::from(EXIT_CONFIG));
    }

    let seed = seed.unwrap_or_else(rand::random);
    println!(
        "{} {} - {} (seed {})",
        "Playing:".cyan().bold(),
        resolved.profile_name(),
        resolved.subprofile_name().unwrap_or("Custom"),
        seed
    );

    let mut engine = SessionEngine::new(Box::new(CpalSink::default()));
    engine.generate(&resolved.params, seed, |progress| {
        println!("  {} {}", "->".green(), progress);
    })?;

    let playback = engine.playback_mut();
    playback.play(offset)?;
    let total = format_clock(playback.duration_secs());

    while !playback.poll_ended() {
        std::thread::sleep(STATUS_INTERVAL);
        let light = playback.current_light_mod();
        let breath = playback.current_breath_phase();
        if let (Some(light), Some(breath)) = (light, breath) {
            println!(
                "  {} / {}  light {:.2} {:.2}  {} {:>3.0}%",
                format_clock(playback.current_time()),
                total,
                light.left,
                light.right,
                breath.phase,
                breath.progress * 100.0
            );
        }
    }

    engine.close();
    println!("{}", "Session complete".green().bold());
    Ok(ExitCode::SUCCESS)
}
