//! Entrain session parameter library
//!
//! This crate provides the types, catalogs, validation, and persisted formats
//! that describe one entrainment session. It contains no signal processing;
//! the engine lives in `entrain-backend-audio`.
//!
//! # Example
//!
//! ```
//! use entrain_spec::{catalog, validate_params, BrainwaveBand, Language, SessionParameters};
//!
//! let theta = catalog::profile("theta").unwrap();
//! let sub = theta.subprofile("theta-meditation").unwrap();
//! let params = SessionParameters::from_subprofile(sub, Language::English);
//!
//! assert!(validate_params(&params).is_ok());
//! assert_eq!(BrainwaveBand::classify(params.beat_difference()), BrainwaveBand::Theta);
//! ```
//!
//! # Modules
//!
//! - [`params`]: Session parameters, waveform/sync/encoding enums
//! - [`sweep`]: Sweep profiles and the built-in sweeps
//! - [`catalog`]: Brainwave bands and built-in profiles
//! - [`affirmations`]: Multilingual whisper phrases
//! - [`validation`]: Parameter validation
//! - [`preset`]: Preset, session log, and basic-session formats
//! - [`hash`]: Canonical parameter hashing
//! - [`error`]: Error and warning types

pub mod affirmations;
pub mod catalog;
pub mod error;
pub mod hash;
pub mod params;
pub mod preset;
pub mod sweep;
pub mod validation;

pub use affirmations::{affirmations, Language};
pub use catalog::{BrainwaveBand, Profile, Subprofile, PROFILES};
pub use error::{
    BackendError, ErrorCode, SpecError, ValidationError, ValidationResult, ValidationWarning,
    WarningCode,
};
pub use hash::canonical_params_hash;
pub use params::{
    db_to_linear, BreathTiming, EncodingKind, Rgb, SessionParameters, SyncMode, Waveform,
    DEFAULT_SAMPLE_RATE, SUPPORTED_SAMPLE_RATES,
};
pub use preset::{format_clock, BasicSession, Preset, SessionLog, VisualSettings, PRESET_VERSION};
pub use sweep::{SweepPreset, SweepProfile, SweepSegment, SWEEP_PRESETS};
pub use validation::{validate_params, MAX_DURATION_SECS};
