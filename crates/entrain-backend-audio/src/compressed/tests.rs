use super::*;

/// Records what it is fed; emits one byte per block and two on flush.
#[derive(Default)]
struct RecordingEncoder {
    blocks: Vec<(Vec<i16>, Vec<i16>)>,
    flushed: bool,
}

impl CompressedEncoder for RecordingEncoder {
    fn encode_block(&mut self, left: &[i16], right: &[i16]) -> AudioResult<Vec<u8>> {
        self.blocks.push((left.to_vec(), right.to_vec()));
        Ok(vec![self.blocks.len() as u8])
    }

    fn flush(&mut self) -> AudioResult<Vec<u8>> {
        self.flushed = true;
        Ok(vec![0xFF, 0xFE])
    }
}

struct FailingEncoder;

impl CompressedEncoder for FailingEncoder {
    fn encode_block(&mut self, _: &[i16], _: &[i16]) -> AudioResult<Vec<u8>> {
        Err(AudioError::encoder_failed("boom"))
    }

    fn flush(&mut self) -> AudioResult<Vec<u8>> {
        Ok(Vec::new())
    }
}

fn buffer(frames: usize) -> SessionBuffer {
    SessionBuffer::new(vec![0.5; frames], vec![-0.5; frames], 44_100, 0).unwrap()
}

#[test]
fn test_rounded_conversion() {
    assert_eq!(sample_to_pcm16_rounded(1.0), 32767);
    assert_eq!(sample_to_pcm16_rounded(-1.0), -32767);
    // 16383.5 rounds up, -16383.5 rounds toward +inf
    assert_eq!(sample_to_pcm16_rounded(0.5), 16384);
    assert_eq!(sample_to_pcm16_rounded(-0.5), -16383);
    assert_eq!(sample_to_pcm16_rounded(2.0), 32767);
    assert_eq!(sample_to_pcm16_rounded(-2.0), -32768);
}

#[test]
fn test_blocks_of_1152_then_flush() {
    let mut encoder = RecordingEncoder::default();
    let bytes = encode_compressed(&buffer(2500), Some(&mut encoder)).unwrap();

    let sizes: Vec<usize> = encoder.blocks.iter().map(|(l, _)| l.len()).collect();
    assert_eq!(sizes, vec![1152, 1152, 196]);
    assert!(encoder.flushed);
    assert_eq!(bytes, vec![1, 2, 3, 0xFF, 0xFE]);
    assert!(encoder.blocks[0].0.iter().all(|&s| s == 16384));
    assert!(encoder.blocks[2].1.iter().all(|&s| s == -16383));
}

#[test]
fn test_missing_encoder_is_reported() {
    let err = encode_compressed(&buffer(10), None).unwrap_err();
    assert!(matches!(err, AudioError::EncoderUnavailable { .. }));
}

#[test]
fn test_encoder_failure_propagates() {
    let mut encoder = FailingEncoder;
    let err = encode_compressed(&buffer(10), Some(&mut encoder)).unwrap_err();
    assert!(matches!(err, AudioError::EncoderFailed { .. }));
}

#[test]
fn test_lame_round_trip_when_installed() {
    if LameEncoder::locate().is_err() {
        return;
    }
    let mut encoder = LameEncoder::spawn(EncoderConfig::stereo(44_100)).unwrap();
    let bytes = encode_compressed(&buffer(44_100), Some(&mut encoder)).unwrap();
    assert!(!bytes.is_empty());
    // MPEG frame sync or an ID3 tag
    assert!(bytes.starts_with(b"ID3") || (bytes[0] == 0xFF && bytes[1] & 0xE0 == 0xE0));
}
