//! Light command implementation
//!
//! Prints the light modulation and breath phase a session would drive at
//! given times, without rendering audio. Useful for checking sync against
//! light glasses.

use anyhow::{Context, Result};
use colored::Colorize;
use entrain_backend_audio::modulation::{breath_phase, light_mod_at, resolve_beat};
use entrain_spec::SessionParameters;
use serde::Serialize;
use std::process::ExitCode;

use super::reporting::print_json;
use crate::input::SessionArgs;

/// Modulation state at one instant.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LightSample {
    pub time: f64,
    pub beat: f64,
    pub left: f64,
    pub right: f64,
    pub breath_phase: String,
    pub breath_progress: f64,
    pub breath_remaining: f64,
}

/// Samples the modulation functions at each time in `times`.
pub fn sample(params: &SessionParameters, times: &[f64]) -> Vec<LightSample> {
    times
        .iter()
        .map(|&t| {
            let light = light_mod_at(t, params);
            let breath = breath_phase(t, &params.breath);
            LightSample {
                time: t,
                beat: resolve_beat(t, params),
                left: light.left,
                right: light.right,
                breath_phase: breath.phase.to_string(),
                breath_progress: breath.progress,
                breath_remaining: breath.remaining,
            }
        })
        .collect()
}

/// Evenly spaced sample times covering the session, `count` of them.
pub fn spread(duration_secs: f64, count: usize) -> Vec<f64> {
    match count {
        0 => Vec::new(),
        1 => vec![0.0],
        n => (0..n)
            .map(|i| duration_secs * i as f64 / (n - 1) as f64)
            .collect(),
    }
}

/// Run the light command
///
/// # Arguments
/// * `session` - Session source and overrides
/// * `at` - Explicit sample times in seconds; if empty, `count` evenly spaced times
/// * `count` - Number of evenly spaced samples when `at` is empty
/// * `json_output` - Whether to output machine-readable JSON
pub fn run(session: &SessionArgs, at: &[f64], count: usize, json_output: bool) -> Result<ExitCode> {
    let resolved = session.resolve().context("Failed to resolve session")?;
    let times = if at.is_empty() {
        spread(resolved.params.duration_secs(), count)
    } else {
        at.to_vec()
    };
    let samples = sample(&resolved.params, &times);

    if json_output {
        print_json(&samples)?;
        return Ok(ExitCode::SUCCESS);
    }

    println!(
        "{} {} - {}",
        "Light:".cyan().bold(),
        resolved.profile_name(),
        resolved.subprofile_name().unwrap_or("Custom")
    );
    println!(
        "  {:>9} {:>7} {:>6} {:>6}  {}",
        "time".dimmed(),
        "beat".dimmed(),
        "left".dimmed(),
        "right".dimmed(),
        "breath".dimmed()
    );
    for s in &samples {
        println!(
            "  {:>9} {:>7.2} {:>6.3} {:>6.3}  {} {:>3.0}% ({:.1}s left)",
            entrain_spec::format_clock(s.time),
            s.beat,
            s.left,
            s.right,
            s.breath_phase,
            s.breath_progress * 100.0,
            s.breath_remaining
        );
    }
    Ok(ExitCode::SUCCESS)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_spread_covers_session() {
        assert_eq!(spread(60.0, 0), Vec::<f64>::new());
        assert_eq!(spread(60.0, 1), vec![0.0]);
        assert_eq!(spread(60.0, 4), vec![0.0, 20.0, 40.0, 60.0]);
    }

    #[test]
    fn test_samples_follow_modulation_functions() {
        let params = SessionParameters::default();
        let samples = sample(&params, &[0.0, 0.0625]);

        // Sine at t=0: both channels at the midpoint scaled by brightness
        assert!((samples[0].left - 0.35).abs() < 1e-9);
        assert_eq!(samples[0].breath_phase, "inhale");
        assert_eq!(samples[0].beat, params.beat);

        // Quarter cycle of a 4 Hz beat: left at peak brightness
        assert!((samples[1].left - 0.7).abs() < 1e-9);
    }
}
