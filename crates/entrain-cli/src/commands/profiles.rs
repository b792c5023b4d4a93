//! Profiles command implementation
//!
//! Lists the built-in brainwave profiles and sweep profiles.

use anyhow::Result;
use colored::Colorize;
use entrain_spec::{Profile, SweepPreset, PROFILES, SWEEP_PRESETS};
use serde_json::{json, Value};
use std::process::ExitCode;

use super::reporting::print_json;

/// Builds the JSON catalog listing.
pub fn catalog_json(profiles: &[Profile], sweeps: &[SweepPreset]) -> Value {
    let profiles: Vec<Value> = profiles
        .iter()
        .map(|profile| {
            let subprofiles: Vec<Value> = profile
                .subprofiles
                .iter()
                .map(|sub| {
                    json!({
                        "id": sub.id,
                        "name": sub.name,
                        "freqLeft": sub.freq_left,
                        "freqRight": sub.freq_right,
                        "beat": sub.beat,
                        "syncMode": sub.sync_mode.as_str(),
                    })
                })
                .collect();
            json!({
                "id": profile.id,
                "name": profile.name(),
                "range": profile.band.range_label(),
                "description": profile.description,
                "subprofiles": subprofiles,
            })
        })
        .collect();

    let sweeps: Vec<Value> = sweeps
        .iter()
        .map(|sweep| {
            json!({
                "id": sweep.id,
                "name": sweep.name,
                "segments": sweep.segments,
            })
        })
        .collect();

    json!({ "profiles": profiles, "sweeps": sweeps })
}

/// Run the profiles command
pub fn run(json_output: bool) -> Result<ExitCode> {
    if json_output {
        print_json(&catalog_json(PROFILES, SWEEP_PRESETS))?;
        return Ok(ExitCode::SUCCESS);
    }

    println!("{}", "Profiles".cyan().bold());
    for profile in PROFILES {
        println!(
            "\n  {} {} {}",
            profile.band.symbol(),
            profile.id.bold(),
            format!("({}) {}", profile.band.range_label(), profile.description).dimmed()
        );
        for sub in profile.subprofiles {
            println!(
                "    {:<22} {:<20} {:>6.1}/{:<6.1} Hz  beat {:>4.1} Hz  {}",
                sub.id,
                sub.name,
                sub.freq_left,
                sub.freq_right,
                sub.beat,
                sub.sync_mode.as_str()
            );
        }
    }

    println!("\n{}", "Sweeps".cyan().bold());
    for sweep in SWEEP_PRESETS {
        let path = sweep
            .segments
            .iter()
            .map(|s| format!("{}->{} Hz ({:.0}%)", s.start_freq, s.end_freq, s.duration * 100.0))
            .collect::<Vec<_>>()
            .join(", ");
        println!("  {:<18} {}", sweep.id, sweep.name);
        println!("  {:<18} {}", "", path.dimmed());
    }

    Ok(ExitCode::SUCCESS)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_json_lists_everything() {
        let value = catalog_json(PROFILES, SWEEP_PRESETS);
        assert_eq!(value["profiles"].as_array().unwrap().len(), PROFILES.len());
        assert_eq!(value["sweeps"].as_array().unwrap().len(), SWEEP_PRESETS.len());
        assert_eq!(value["profiles"][1]["id"], "theta");
        assert_eq!(value["sweeps"][0]["segments"][0]["duration"], 0.3);
    }
}
