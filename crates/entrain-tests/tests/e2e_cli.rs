//! CLI commands end to end on real files.

use std::process::ExitCode;

use entrain_cli::commands::generate::{self, GenerateOptions};
use entrain_cli::commands::{inspect, light, preset, validate, EXIT_CONFIG};
use entrain_cli::input::SessionArgs;
use entrain_spec::SessionParameters;
use entrain_tests::{read_with_hound, short_params, SessionDir};

fn profile_args() -> SessionArgs {
    SessionArgs {
        profile: Some("delta".to_string()),
        lang: "en".to_string(),
        duration: Some(3),
        fade: Some(1.0),
        ..Default::default()
    }
}

fn generate_to(dir: &SessionDir, name: &str, session: &SessionArgs, seed: u32) -> Vec<u8> {
    let output = dir.file(name);
    let options = GenerateOptions {
        output: Some(output.clone()),
        seed: Some(seed),
        json: true,
        ..Default::default()
    };
    assert_eq!(generate::run(session, &options).unwrap(), ExitCode::SUCCESS);
    std::fs::read(output).unwrap()
}

#[test]
fn test_generate_then_inspect() {
    let dir = SessionDir::new();
    let bytes = generate_to(&dir, "delta.wav", &profile_args(), 5);

    let report = inspect::inspect_bytes("delta.wav", &bytes).unwrap();
    assert_eq!(report.num_frames, 3 * 44_100);
    assert_eq!(report.channels, 2);

    let info = read_with_hound(&bytes).unwrap();
    assert_eq!(info.num_frames, report.num_frames);
}

#[test]
fn test_preset_command_reproduces_profile_session() {
    let dir = SessionDir::new();
    let preset_path = dir.file("delta.entrain.json");
    assert_eq!(
        preset::run(&profile_args(), Some(&preset_path)).unwrap(),
        ExitCode::SUCCESS
    );

    let from_profile = generate_to(&dir, "a.wav", &profile_args(), 17);
    let from_preset = generate_to(
        &dir,
        "b.wav",
        &SessionArgs {
            preset: Some(preset_path),
            ..Default::default()
        },
        17,
    );
    assert_eq!(
        inspect::inspect_bytes("a.wav", &from_profile).unwrap().pcm_hash,
        inspect::inspect_bytes("b.wav", &from_preset).unwrap().pcm_hash
    );
}

#[test]
fn test_params_file_source() {
    let dir = SessionDir::new();
    let path = dir.add_params("session.json", &short_params(2));
    let bytes = generate_to(
        &dir,
        "session.wav",
        &SessionArgs {
            params: Some(path.to_string_lossy().into_owned()),
            ..Default::default()
        },
        3,
    );
    assert_eq!(read_with_hound(&bytes).unwrap().num_frames, 88_200);
}

#[test]
fn test_validate_directory() {
    let dir = SessionDir::new();
    dir.add_params("ok.json", &short_params(30));
    assert_eq!(
        validate::run(&dir.path().to_string_lossy(), true).unwrap(),
        ExitCode::SUCCESS
    );

    dir.add_params(
        "broken.json",
        &SessionParameters {
            sample_rate: 22_050,
            ..short_params(30)
        },
    );
    assert_eq!(
        validate::run(&dir.path().to_string_lossy(), true).unwrap(),
        ExitCode::from(EXIT_CONFIG)
    );
}

#[test]
fn test_light_samples_track_sweep() {
    let resolved = SessionArgs {
        sweep: Some("theta-alpha".to_string()),
        duration: Some(100),
        ..Default::default()
    }
    .resolve()
    .unwrap();
    let samples = light::sample(&resolved.params, &[0.0, 50.0, 100.0]);
    assert_eq!(samples[0].beat, 4.0);
    assert!((samples[1].beat - 7.0).abs() < 1e-9);
    assert_eq!(samples[2].beat, 10.0);
}
