//! PCM payload extraction and hashing.

/// Returns the `data` chunk payload of a WAV file.
///
/// Chunks before `data` are skipped (with RIFF word alignment). Returns
/// `None` if the RIFF/WAVE magic is missing or no complete data chunk is
/// present.
pub fn extract_pcm_data(wav_data: &[u8]) -> Option<&[u8]> {
    if wav_data.len() < 12 || &wav_data[0..4] != b"RIFF" || &wav_data[8..12] != b"WAVE" {
        return None;
    }

    let mut pos = 12;
    while pos + 8 <= wav_data.len() {
        let id = &wav_data[pos..pos + 4];
        let size = u32::from_le_bytes([
            wav_data[pos + 4],
            wav_data[pos + 5],
            wav_data[pos + 6],
            wav_data[pos + 7],
        ]) as usize;
        let body = pos + 8;

        if id == b"data" {
            return wav_data.get(body..body.checked_add(size)?);
        }

        pos = body.checked_add(size)? + size % 2;
    }

    None
}

/// BLAKE3 hex digest of a WAV file's PCM payload.
pub fn compute_pcm_hash(wav_data: &[u8]) -> Option<String> {
    extract_pcm_data(wav_data).map(|pcm| blake3::hash(pcm).to_hex().to_string())
}
