//! Entrain End-to-End Test Infrastructure
//!
//! Integration tests for the flows that must stay stable across releases:
//!
//! - **Generation**: parameters -> session buffer -> WAV
//! - **Determinism**: same parameters and seed give byte-identical PCM
//! - **Presets**: preset files reproduce the session they were saved from
//! - **CLI**: the command implementations end to end on real files
//!
//! ## Running Tests
//!
//! ```bash
//! cargo test -p entrain-tests
//! ```

pub mod determinism;
pub mod fixtures;
pub mod wav_check;

pub use determinism::{
    assert_deterministic, compute_hash, verify_determinism, DeterminismResult, DiffInfo,
};
pub use fixtures::{short_params, SessionDir};
pub use wav_check::{read_with_hound, WavInfo};
