//! Entrain Audio Backend
//!
//! Offline synthesis of binaural / isochronic entrainment sessions.
//!
//! # Overview
//!
//! A session is rendered in full before it is played or exported. Each
//! stereo sample mixes:
//!
//! - **Tones** - one carrier per ear with slow anti-habituation drift
//! - **Pink noise** - Paul Kellet filtered white noise
//! - **Whisper** - a synthetic voiced-formant companion voice, gated by
//!   breath, walking or interval sync
//! - **Covert encoding** - near-ultrasonic carriers amplitude-modulated by
//!   the light modulation, for light glasses that listen to the audio
//!
//! under a linear fade envelope (the encoding term is exempt).
//!
//! # Determinism
//!
//! Generation is a pure function of the parameters, the seed and the
//! sample index. Noise comes from PCG32 streams derived from the seed via
//! BLAKE3, so the same inputs give byte-identical WAV output.
//!
//! # Example
//!
//! ```no_run
//! use entrain_backend_audio::{generate_session, WavResult};
//! use entrain_spec::SessionParameters;
//!
//! let params = SessionParameters { duration: 60, ..Default::default() };
//! let buffer = generate_session(&params, 42)?;
//! let wav = WavResult::from_buffer(&buffer)?;
//! std::fs::write("session.wav", &wav.wav_data)?;
//! println!("PCM hash: {}", wav.pcm_hash);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! # Crate Structure
//!
//! - [`generate`] - Chunked generator, progress and background task
//! - [`modulation`] - Breath phase, light modulation, sweep, whisper gating
//! - [`encoding`] - Dual- and six-channel covert encoders
//! - [`noise`] - Pink noise
//! - [`synthesis`] - Tone, whisper and preview oscillators
//! - [`envelope`] - Fade envelope
//! - [`wav`] - Deterministic WAV writer and reader
//! - [`compressed`] - MP3 export through an external encoder
//! - [`playback`] - Transport state machine and host clock
//! - [`engine`] - [`SessionEngine`], tying it together

pub mod buffer;
pub mod compressed;
pub mod encoding;
pub mod engine;
pub mod envelope;
pub mod error;
pub mod generate;
pub mod modulation;
pub mod noise;
pub mod playback;
pub mod rng;
pub mod synthesis;
pub mod wav;

// Re-export main types at crate root
pub use buffer::SessionBuffer;
pub use compressed::{encode_compressed, CompressedEncoder, EncoderConfig, LameEncoder};
pub use engine::{PendingGeneration, SessionEngine};
pub use error::{AudioError, AudioResult};
pub use generate::{
    generate_session, generate_session_with_progress, GenerationTask, Progress, SessionGenerator,
    Stage,
};
pub use modulation::{BreathPhase, BreathPhaseResult, LightMod};
pub use playback::{AudioSink, HostClock, MonotonicClock, NullSink, PlaybackController, PlaybackState};
pub use wav::{decode_wav, read_header, WavHeader, WavResult};
