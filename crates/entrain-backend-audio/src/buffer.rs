//! Finished stereo session buffer.

use crate::error::{AudioError, AudioResult};

/// Two equal-length channels of samples in `[-1, 1]`.
///
/// A buffer is produced once, after generation fully completes, and is never
/// mutated afterwards. Share it behind an `Arc`.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionBuffer {
    left: Vec<f32>,
    right: Vec<f32>,
    sample_rate: u32,
    seed: u32,
}

impl SessionBuffer {
    /// Wraps finished channel data.
    pub fn new(left: Vec<f32>, right: Vec<f32>, sample_rate: u32, seed: u32) -> AudioResult<Self> {
        if left.len() != right.len() {
            return Err(AudioError::invalid_param(
                "channels",
                format!(
                    "left and right lengths differ ({} vs {})",
                    left.len(),
                    right.len()
                ),
            ));
        }
        if sample_rate == 0 {
            return Err(AudioError::invalid_param("sample_rate", "must be non-zero"));
        }
        Ok(Self {
            left,
            right,
            sample_rate,
            seed,
        })
    }

    /// Left channel samples.
    pub fn left(&self) -> &[f32] {
        &self.left
    }

    /// Right channel samples.
    pub fn right(&self) -> &[f32] {
        &self.right
    }

    /// Sample rate in Hz.
    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    /// Seed the buffer was generated with.
    pub fn seed(&self) -> u32 {
        self.seed
    }

    /// Number of frames per channel.
    pub fn len(&self) -> usize {
        self.left.len()
    }

    /// True when the buffer holds no frames.
    pub fn is_empty(&self) -> bool {
        self.left.is_empty()
    }

    /// Duration in seconds.
    pub fn duration_secs(&self) -> f64 {
        self.len() as f64 / f64::from(self.sample_rate)
    }

    /// Returns the frame at `index`, if any.
    pub fn frame(&self, index: usize) -> Option<(f32, f32)> {
        Some((*self.left.get(index)?, *self.right.get(index)?))
    }

    /// Frame index for a time offset, clamped to the buffer length.
    pub fn frame_at(&self, secs: f64) -> usize {
        let index = (secs.max(0.0) * f64::from(self.sample_rate)) as usize;
        index.min(self.len())
    }

    /// Peak absolute sample value across both channels.
    pub fn peak(&self) -> f32 {
        self.left
            .iter()
            .chain(self.right.iter())
            .fold(0.0f32, |acc, &s| acc.max(s.abs()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mismatched_channels_rejected() {
        let err = SessionBuffer::new(vec![0.0; 3], vec![0.0; 2], 44_100, 0).unwrap_err();
        assert!(err.to_string().contains("lengths differ"));
    }

    #[test]
    fn test_accessors() {
        let buffer =
            SessionBuffer::new(vec![0.5, -0.25], vec![0.1, -0.75], 2, 9).expect("valid buffer");
        assert_eq!(buffer.len(), 2);
        assert_eq!(buffer.duration_secs(), 1.0);
        assert_eq!(buffer.frame(1), Some((-0.25, -0.75)));
        assert_eq!(buffer.frame(2), None);
        assert_eq!(buffer.frame_at(0.6), 1);
        assert_eq!(buffer.frame_at(10.0), 2);
        assert_eq!(buffer.peak(), 0.75);
        assert_eq!(buffer.seed(), 9);
    }
}
