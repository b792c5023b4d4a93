//! Independent WAV verification through `hound`.

use std::io::Cursor;

/// Format and samples of a WAV file as read by `hound`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WavInfo {
    pub channels: u16,
    pub sample_rate: u32,
    pub bits_per_sample: u16,
    /// Frames per channel.
    pub num_frames: usize,
    /// Interleaved 16-bit samples.
    pub samples: Vec<i16>,
}

impl WavInfo {
    /// Left-channel samples.
    pub fn left(&self) -> impl Iterator<Item = i16> + '_ {
        self.samples.iter().step_by(2).copied()
    }

    /// Right-channel samples.
    pub fn right(&self) -> impl Iterator<Item = i16> + '_ {
        self.samples.iter().skip(1).step_by(2).copied()
    }
}

/// Reads WAV bytes with `hound`, independently of the engine's own reader.
pub fn read_with_hound(bytes: &[u8]) -> Result<WavInfo, hound::Error> {
    let mut reader = hound::WavReader::new(Cursor::new(bytes))?;
    let spec = reader.spec();
    let samples = reader.samples::<i16>().collect::<Result<Vec<_>, _>>()?;
    let channels = usize::from(spec.channels.max(1));
    Ok(WavInfo {
        channels: spec.channels,
        sample_rate: spec.sample_rate,
        bits_per_sample: spec.bits_per_sample,
        num_frames: samples.len() / channels,
        samples,
    })
}
