//! WAV export result.

use super::pcm::compute_pcm_hash;
use super::writer::encode_wav;
use crate::buffer::SessionBuffer;
use crate::error::{AudioError, AudioResult};

/// Encoded WAV file plus identifying metadata.
#[derive(Debug)]
pub struct WavResult {
    /// Complete WAV file bytes.
    pub wav_data: Vec<u8>,
    /// BLAKE3 hash of the PCM payload only.
    pub pcm_hash: String,
    /// Sample rate in Hz.
    pub sample_rate: u32,
    /// Frames per channel.
    pub num_frames: usize,
}

impl WavResult {
    /// Encodes a session buffer.
    pub fn from_buffer(buffer: &SessionBuffer) -> AudioResult<Self> {
        let wav_data = encode_wav(buffer)?;
        let pcm_hash = compute_pcm_hash(&wav_data)
            .ok_or_else(|| AudioError::invalid_wav("encoded file has no data chunk"))?;
        Ok(Self {
            wav_data,
            pcm_hash,
            sample_rate: buffer.sample_rate(),
            num_frames: buffer.len(),
        })
    }

    /// Duration in seconds.
    pub fn duration_secs(&self) -> f64 {
        self.num_frames as f64 / f64::from(self.sample_rate)
    }
}
