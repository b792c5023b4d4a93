//! Deterministic 16-bit stereo WAV export.
//!
//! Files carry only the RIFF, fmt and data chunks, with no timestamps or
//! other variable metadata, so the same buffer always yields the same
//! bytes. The hash of the PCM payload identifies a rendering.

mod format;
mod header;
mod pcm;
mod result;
mod writer;

#[cfg(test)]
mod tests;

pub use format::WavFormat;
pub use header::{decode_wav, read_header, WavHeader};
pub use pcm::{compute_pcm_hash, extract_pcm_data};
pub use result::WavResult;
pub use writer::{encode_wav, sample_to_pcm16, write_session_wav, write_wav_header};
