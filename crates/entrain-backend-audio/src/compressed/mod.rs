//! Compressed (MP3) export through a pluggable encoder.
//!
//! The engine does not ship a compressor. Export feeds rounded 16-bit
//! stereo blocks to whatever [`CompressedEncoder`] the caller supplies,
//! then appends the encoder's flush output.

mod lame;

#[cfg(test)]
mod tests;

use tracing::debug;

use crate::buffer::SessionBuffer;
use crate::error::{AudioError, AudioResult};

pub use lame::LameEncoder;

/// Constant bitrate for compressed exports, in kbit/s.
pub const COMPRESSED_BITRATE_KBPS: u32 = 192;

/// Frames handed to the encoder per call.
pub const BLOCK_FRAMES: usize = 1152;

/// Settings an encoder is opened with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EncoderConfig {
    /// Sample rate in Hz.
    pub sample_rate: u32,
    /// Number of channels (always 2).
    pub channels: u16,
    /// Bitrate in kbit/s.
    pub bitrate_kbps: u32,
}

impl EncoderConfig {
    /// Stereo at the default bitrate.
    pub fn stereo(sample_rate: u32) -> Self {
        Self {
            sample_rate,
            channels: 2,
            bitrate_kbps: COMPRESSED_BITRATE_KBPS,
        }
    }
}

/// A streaming stereo encoder.
///
/// Implementations may buffer internally; any bytes not returned by
/// [`CompressedEncoder::encode_block`] must come out of
/// [`CompressedEncoder::flush`].
pub trait CompressedEncoder {
    /// Encodes one block of equal-length left and right samples.
    fn encode_block(&mut self, left: &[i16], right: &[i16]) -> AudioResult<Vec<u8>>;

    /// Finishes the stream and returns any remaining bytes.
    fn flush(&mut self) -> AudioResult<Vec<u8>>;
}

/// Converts a sample to 16-bit PCM for the compressed path.
///
/// Scales by 32767, rounds half up and clamps to the `i16` range.
pub fn sample_to_pcm16_rounded(sample: f32) -> i16 {
    let scaled = (f64::from(sample) * 32767.0 + 0.5).floor();
    scaled.clamp(f64::from(i16::MIN), f64::from(i16::MAX)) as i16
}

/// Encodes a session buffer with the supplied encoder.
///
/// Returns [`AudioError::EncoderUnavailable`] when `encoder` is `None`.
pub fn encode_compressed(
    buffer: &SessionBuffer,
    encoder: Option<&mut dyn CompressedEncoder>,
) -> AudioResult<Vec<u8>> {
    let encoder = encoder
        .ok_or_else(|| AudioError::encoder_unavailable("no compressed encoder configured"))?;

    let mut out = Vec::new();
    let mut left = Vec::with_capacity(BLOCK_FRAMES);
    let mut right = Vec::with_capacity(BLOCK_FRAMES);
    let mut blocks = 0usize;

    for (l, r) in buffer
        .left()
        .chunks(BLOCK_FRAMES)
        .zip(buffer.right().chunks(BLOCK_FRAMES))
    {
        left.clear();
        right.clear();
        left.extend(l.iter().map(|&s| sample_to_pcm16_rounded(s)));
        right.extend(r.iter().map(|&s| sample_to_pcm16_rounded(s)));
        out.extend(encoder.encode_block(&left, &right)?);
        blocks += 1;
    }
    out.extend(encoder.flush()?);

    debug!(blocks, bytes = out.len(), "compressed export finished");
    Ok(out)
}
