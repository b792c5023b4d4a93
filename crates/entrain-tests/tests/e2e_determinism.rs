//! Determinism of the full generate -> WAV path.

use entrain_backend_audio::{generate_session, GenerationTask, WavResult};
use entrain_spec::{sweep::sweep_preset, EncodingKind, SessionParameters, Waveform};
use entrain_tests::{assert_deterministic, short_params, verify_determinism};

fn wav_bytes(params: &SessionParameters, seed: u32) -> Vec<u8> {
    let buffer = generate_session(params, seed).unwrap();
    WavResult::from_buffer(&buffer).unwrap().wav_data
}

#[test]
fn test_plain_session_is_byte_identical() {
    let params = short_params(5);
    assert_deterministic(3, || wav_bytes(&params, 42));
}

#[test]
fn test_encoded_sweep_session_is_byte_identical() {
    let params = SessionParameters {
        encoding: EncodingKind::SixChannel,
        sweep: Some(sweep_preset("full-cycle").unwrap().to_profile()),
        tone_waveform: Waveform::Triangle,
        light_waveform: Waveform::Square,
        ..short_params(5)
    };
    let result = verify_determinism(|| wav_bytes(&params, 7), 2);
    result.assert_deterministic();
    assert_eq!(result.output_size, 44 + 5 * 44_100 * 4);
}

#[test]
fn test_seed_changes_pcm_hash() {
    let params = short_params(3);
    let a = WavResult::from_buffer(&generate_session(&params, 1).unwrap()).unwrap();
    let b = WavResult::from_buffer(&generate_session(&params, 2).unwrap()).unwrap();
    assert_ne!(a.pcm_hash, b.pcm_hash);
}

#[test]
fn test_background_task_matches_synchronous_hash() {
    let params = short_params(4);
    let expected = WavResult::from_buffer(&generate_session(&params, 99).unwrap())
        .unwrap()
        .pcm_hash;

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .unwrap();
    let buffer = runtime.block_on(async {
        let mut task = GenerationTask::spawn(&params, 99).unwrap();
        while task.next_progress().await.is_some() {}
        task.join().await.unwrap()
    });

    assert_eq!(WavResult::from_buffer(&buffer).unwrap().pcm_hash, expected);
}
