//! Tests for the WAV export module.

use std::io::Cursor;

use super::*;
use crate::buffer::SessionBuffer;
use crate::error::AudioError;

fn buffer(left: Vec<f32>, right: Vec<f32>) -> SessionBuffer {
    SessionBuffer::new(left, right, 44_100, 0).unwrap()
}

// =========================================================================
// PCM conversion
// =========================================================================

#[test]
fn test_pcm16_full_scale_is_asymmetric() {
    assert_eq!(sample_to_pcm16(1.0), 32767);
    assert_eq!(sample_to_pcm16(-1.0), -32768);
    assert_eq!(sample_to_pcm16(0.0), 0);
}

#[test]
fn test_pcm16_clamps_and_truncates() {
    assert_eq!(sample_to_pcm16(2.0), 32767);
    assert_eq!(sample_to_pcm16(-3.5), -32768);
    // 0.5 * 32767 = 16383.5, truncated toward zero
    assert_eq!(sample_to_pcm16(0.5), 16383);
    assert_eq!(sample_to_pcm16(-0.5), -16384);
    assert_eq!(sample_to_pcm16(-0.00001), 0);
}

// =========================================================================
// Header layout
// =========================================================================

#[test]
fn test_header_layout() {
    let wav = encode_wav(&buffer(vec![0.0; 10], vec![0.0; 10])).unwrap();
    assert_eq!(wav.len(), 44 + 40);
    assert_eq!(&wav[0..4], b"RIFF");
    assert_eq!(u32::from_le_bytes([wav[4], wav[5], wav[6], wav[7]]), 36 + 40);
    assert_eq!(&wav[8..12], b"WAVE");
    assert_eq!(&wav[12..16], b"fmt ");
    assert_eq!(u16::from_le_bytes([wav[20], wav[21]]), 1);
    assert_eq!(u16::from_le_bytes([wav[22], wav[23]]), 2);
    assert_eq!(u32::from_le_bytes([wav[24], wav[25], wav[26], wav[27]]), 44_100);
    assert_eq!(u32::from_le_bytes([wav[28], wav[29], wav[30], wav[31]]), 176_400);
    assert_eq!(u16::from_le_bytes([wav[32], wav[33]]), 4);
    assert_eq!(u16::from_le_bytes([wav[34], wav[35]]), 16);
    assert_eq!(&wav[36..40], b"data");
    assert_eq!(u32::from_le_bytes([wav[40], wav[41], wav[42], wav[43]]), 40);
}

#[test]
fn test_frames_are_interleaved() {
    let wav = encode_wav(&buffer(vec![1.0, 0.0], vec![-1.0, 0.5])).unwrap();
    let pcm = extract_pcm_data(&wav).unwrap();
    let samples: Vec<i16> = pcm
        .chunks_exact(2)
        .map(|b| i16::from_le_bytes([b[0], b[1]]))
        .collect();
    assert_eq!(samples, vec![32767, -32768, 0, 16383]);
}

#[test]
fn test_header_round_trip() {
    let wav = encode_wav(&buffer(vec![0.1; 441], vec![0.2; 441])).unwrap();
    let header = WavHeader::parse(&wav).unwrap();
    assert_eq!(header.format, WavFormat::stereo(44_100));
    assert_eq!(header.num_frames(), 441);
    assert!((header.duration_secs() - 0.01).abs() < 1e-12);
}

#[test]
fn test_header_rejects_garbage() {
    let err = WavHeader::parse(b"not a wav file at all").unwrap_err();
    assert!(matches!(err, AudioError::InvalidWav { .. }));
}

#[test]
fn test_hound_reads_output() {
    let wav = encode_wav(&buffer(vec![0.25, -0.25, 0.0], vec![-0.5, 0.5, 1.0])).unwrap();
    let reader = hound::WavReader::new(Cursor::new(wav)).unwrap();
    let spec = reader.spec();
    assert_eq!(spec.channels, 2);
    assert_eq!(spec.sample_rate, 44_100);
    assert_eq!(spec.bits_per_sample, 16);
    let samples: Vec<i16> = reader.into_samples::<i16>().map(|s| s.unwrap()).collect();
    assert_eq!(samples, vec![8191, -16384, -8192, 16383, 0, 32767]);
}

// =========================================================================
// PCM extraction and hashing
// =========================================================================

#[test]
fn test_extract_skips_unknown_chunks() {
    let mut wav = Vec::new();
    wav.extend_from_slice(b"RIFF");
    wav.extend_from_slice(&0u32.to_le_bytes());
    wav.extend_from_slice(b"WAVE");
    wav.extend_from_slice(b"LIST");
    wav.extend_from_slice(&3u32.to_le_bytes());
    wav.extend_from_slice(&[1, 2, 3, 0]); // odd size plus pad byte
    wav.extend_from_slice(b"data");
    wav.extend_from_slice(&2u32.to_le_bytes());
    wav.extend_from_slice(&[9, 8]);

    assert_eq!(extract_pcm_data(&wav), Some(&[9u8, 8][..]));
}

#[test]
fn test_pcm_hash_is_stable() {
    let a = WavResult::from_buffer(&buffer(vec![0.3; 100], vec![0.1; 100])).unwrap();
    let b = WavResult::from_buffer(&buffer(vec![0.3; 100], vec![0.1; 100])).unwrap();
    assert_eq!(a.pcm_hash, b.pcm_hash);
    assert_eq!(a.pcm_hash.len(), 64);
    assert_eq!(a.wav_data, b.wav_data);

    let c = WavResult::from_buffer(&buffer(vec![0.3; 100], vec![0.2; 100])).unwrap();
    assert_ne!(a.pcm_hash, c.pcm_hash);
}

#[test]
fn test_streaming_matches_in_memory() {
    let data = buffer((0..10_000).map(|i| (i as f32 * 0.001).sin()).collect(), vec![0.0; 10_000]);
    let mut streamed = Vec::new();
    write_session_wav(&mut streamed, &data).unwrap();
    assert_eq!(streamed, encode_wav(&data).unwrap());
}

#[test]
fn test_decode_inverts_full_scale() {
    let original = buffer(vec![1.0, -1.0, 0.0], vec![0.0, 0.5, -0.5]);
    let decoded = decode_wav(&encode_wav(&original).unwrap()).unwrap();
    assert_eq!(decoded.len(), 3);
    assert_eq!(decoded.left(), &[1.0, -1.0, 0.0]);
    assert_eq!(decoded.right()[2], -0.5);
    assert!((decoded.right()[1] - 0.5).abs() < 1e-4);
}

#[test]
fn test_read_header_matches_parse() {
    let wav = encode_wav(&buffer(vec![0.0; 4], vec![0.0; 4])).unwrap();
    assert_eq!(read_header(&wav).unwrap(), WavHeader::parse(&wav).unwrap());
}
