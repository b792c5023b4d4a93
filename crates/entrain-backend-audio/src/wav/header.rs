//! WAV header inspection.

use super::format::WavFormat;
use super::pcm::extract_pcm_data;
use crate::buffer::SessionBuffer;
use crate::error::{AudioError, AudioResult};

/// Format and payload size read back from WAV bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WavHeader {
    /// Format from the `fmt ` chunk.
    pub format: WavFormat,
    /// Size of the `data` payload in bytes.
    pub data_len: usize,
}

impl WavHeader {
    /// Parses the `fmt ` and `data` chunks of a PCM WAV file.
    pub fn parse(wav_data: &[u8]) -> AudioResult<Self> {
        if wav_data.len() < 12 || &wav_data[0..4] != b"RIFF" || &wav_data[8..12] != b"WAVE" {
            return Err(AudioError::invalid_wav("missing RIFF/WAVE magic"));
        }

        let format = find_fmt(wav_data).ok_or_else(|| AudioError::invalid_wav("no fmt chunk"))?;
        let data = extract_pcm_data(wav_data)
            .ok_or_else(|| AudioError::invalid_wav("no complete data chunk"))?;

        Ok(Self {
            format,
            data_len: data.len(),
        })
    }

    /// Number of frames in the payload.
    pub fn num_frames(&self) -> usize {
        match self.format.block_align() {
            0 => 0,
            align => self.data_len / usize::from(align),
        }
    }

    /// Payload duration in seconds.
    pub fn duration_secs(&self) -> f64 {
        if self.format.sample_rate == 0 {
            return 0.0;
        }
        self.num_frames() as f64 / f64::from(self.format.sample_rate)
    }
}

/// Reads the header of WAV bytes.
pub fn read_header(wav_data: &[u8]) -> AudioResult<WavHeader> {
    WavHeader::parse(wav_data)
}

/// Decodes a 16-bit stereo WAV file back into a session buffer.
///
/// Inverts the export scaling (negative samples over 32768, the rest over
/// 32767). The seed is unknown and recorded as 0.
pub fn decode_wav(wav_data: &[u8]) -> AudioResult<SessionBuffer> {
    let header = WavHeader::parse(wav_data)?;
    if header.format.channels != 2 || header.format.bits_per_sample != 16 {
        return Err(AudioError::invalid_wav(format!(
            "expected 16-bit stereo, found {} channel(s) at {} bits",
            header.format.channels, header.format.bits_per_sample
        )));
    }
    let pcm = extract_pcm_data(wav_data)
        .ok_or_else(|| AudioError::invalid_wav("no complete data chunk"))?;

    let frames = header.num_frames();
    let mut left = Vec::with_capacity(frames);
    let mut right = Vec::with_capacity(frames);
    for frame in pcm.chunks_exact(4) {
        left.push(pcm16_to_sample(i16::from_le_bytes([frame[0], frame[1]])));
        right.push(pcm16_to_sample(i16::from_le_bytes([frame[2], frame[3]])));
    }
    SessionBuffer::new(left, right, header.format.sample_rate, 0)
}

fn pcm16_to_sample(value: i16) -> f32 {
    if value < 0 {
        f32::from(value) / 32768.0
    } else {
        f32::from(value) / 32767.0
    }
}

fn find_fmt(wav_data: &[u8]) -> Option<WavFormat> {
    let u16_at = |at: usize| Some(u16::from_le_bytes([*wav_data.get(at)?, *wav_data.get(at + 1)?]));
    let u32_at = |at: usize| {
        Some(u32::from_le_bytes([
            *wav_data.get(at)?,
            *wav_data.get(at + 1)?,
            *wav_data.get(at + 2)?,
            *wav_data.get(at + 3)?,
        ]))
    };

    let mut pos = 12;
    while pos + 8 <= wav_data.len() {
        let size = u32_at(pos + 4)? as usize;
        let body = pos + 8;
        if &wav_data[pos..pos + 4] == b"fmt " {
            if size < 16 || u16_at(body)? != 1 {
                return None;
            }
            return Some(WavFormat {
                channels: u16_at(body + 2)?,
                sample_rate: u32_at(body + 4)?,
                bits_per_sample: u16_at(body + 14)?,
            });
        }
        pos = body.checked_add(size)? + size % 2;
    }
    None
}
