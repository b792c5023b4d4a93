//! WAV header writing and PCM conversion.

use std::io::Write;

use super::format::{WavFormat, HEADER_LEN};
use crate::buffer::SessionBuffer;
use crate::error::{AudioError, AudioResult};

/// Frames converted per write call.
const FRAMES_PER_WRITE: usize = 4096;

/// Converts a sample to signed 16-bit PCM.
///
/// The value is clamped to `[-1, 1]`, then scaled by 32768 when negative and
/// 32767 otherwise, truncating toward zero. Full scale maps to exactly
/// -32768 and 32767.
pub fn sample_to_pcm16(sample: f32) -> i16 {
    let v = f64::from(sample).clamp(-1.0, 1.0);
    if v < 0.0 {
        (v * 32768.0) as i16
    } else {
        (v * 32767.0) as i16
    }
}

/// Writes the 44-byte RIFF/fmt/data header for `data_size` bytes of PCM.
pub fn write_wav_header<W: Write>(
    writer: &mut W,
    format: &WavFormat,
    data_size: u32,
) -> std::io::Result<()> {
    writer.write_all(b"RIFF")?;
    writer.write_all(&(36 + data_size).to_le_bytes())?;
    writer.write_all(b"WAVE")?;

    writer.write_all(b"fmt ")?;
    writer.write_all(&16u32.to_le_bytes())?;
    writer.write_all(&1u16.to_le_bytes())?; // PCM
    writer.write_all(&format.channels.to_le_bytes())?;
    writer.write_all(&format.sample_rate.to_le_bytes())?;
    writer.write_all(&format.byte_rate().to_le_bytes())?;
    writer.write_all(&format.block_align().to_le_bytes())?;
    writer.write_all(&format.bits_per_sample.to_le_bytes())?;

    writer.write_all(b"data")?;
    writer.write_all(&data_size.to_le_bytes())?;
    Ok(())
}

/// Streams a session buffer as a 16-bit stereo WAV file.
///
/// Frames are interleaved left, right. Fails if the PCM payload would not
/// fit in a RIFF size field.
pub fn write_session_wav<W: Write>(writer: &mut W, buffer: &SessionBuffer) -> AudioResult<()> {
    let format = WavFormat::stereo(buffer.sample_rate());
    let data_size = (buffer.len() as u64) * u64::from(format.block_align());
    let data_size = u32::try_from(data_size)
        .ok()
        .filter(|size| size.checked_add(36).is_some())
        .ok_or_else(|| {
            AudioError::invalid_wav(format!("{} bytes of PCM exceed the RIFF limit", data_size))
        })?;

    write_wav_header(writer, &format, data_size)?;

    let mut block = Vec::with_capacity(FRAMES_PER_WRITE * 4);
    for (left, right) in buffer
        .left()
        .chunks(FRAMES_PER_WRITE)
        .zip(buffer.right().chunks(FRAMES_PER_WRITE))
    {
        block.clear();
        for (&l, &r) in left.iter().zip(right) {
            block.extend_from_slice(&sample_to_pcm16(l).to_le_bytes());
            block.extend_from_slice(&sample_to_pcm16(r).to_le_bytes());
        }
        writer.write_all(&block)?;
    }
    Ok(())
}

/// Encodes a session buffer as complete WAV bytes.
pub fn encode_wav(buffer: &SessionBuffer) -> AudioResult<Vec<u8>> {
    let mut out = Vec::with_capacity(HEADER_LEN + buffer.len() * 4);
    write_session_wav(&mut out, buffer)?;
    Ok(out)
}
