//! MP3 encoding through an external `lame` process.

use std::io::{Read, Write};
use std::path::PathBuf;
use std::process::{Child, ChildStdin, Command, Stdio};
use std::thread::JoinHandle;

use tracing::{debug, warn};

use super::{CompressedEncoder, EncoderConfig};
use crate::error::{AudioError, AudioResult};

/// Environment variable overriding the `lame` executable location.
pub const LAME_PATH_ENV: &str = "LAME_PATH";

/// Streams raw PCM into `lame` and collects the MP3 it writes.
///
/// Input goes to the child's stdin while a reader thread drains stdout, so
/// the pipes never fill up. All MP3 bytes are returned by `flush`.
pub struct LameEncoder {
    child: Option<Child>,
    stdin: Option<ChildStdin>,
    reader: Option<JoinHandle<std::io::Result<Vec<u8>>>>,
    interleaved: Vec<u8>,
}

impl LameEncoder {
    /// Finds the `lame` executable: `LAME_PATH` first, then `PATH`.
    pub fn locate() -> AudioResult<PathBuf> {
        if let Ok(path) = std::env::var(LAME_PATH_ENV) {
            let path = PathBuf::from(path);
            if path.exists() {
                return Ok(path);
            }
            return Err(AudioError::encoder_unavailable(format!(
                "{} points to missing file {}",
                LAME_PATH_ENV,
                path.display()
            )));
        }

        which::which("lame")
            .map_err(|_| AudioError::encoder_unavailable("lame executable not found on PATH"))
    }

    /// Starts a `lame` process for raw 16-bit little-endian stereo input.
    pub fn spawn(config: EncoderConfig) -> AudioResult<Self> {
        let path = Self::locate()?;
        let khz = format!("{}", f64::from(config.sample_rate) / 1000.0);
        let bitrate = config.bitrate_kbps.to_string();
        let mode = if config.channels == 1 { "m" } else { "s" };

        debug!(path = %path.display(), %khz, %bitrate, "starting lame");
        let mut child = Command::new(&path)
            .args(["-r", "-s", &khz, "--bitwidth", "16", "--signed", "--little-endian"])
            .args(["-m", mode, "--cbr", "-b", &bitrate, "--quiet", "-", "-"])
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::null())
            .spawn()
            .map_err(|e| AudioError::encoder_unavailable(format!("failed to start lame: {}", e)))?;

        let stdin = child.stdin.take();
        let mut stdout = child
            .stdout
            .take()
            .ok_or_else(|| AudioError::encoder_failed("lame stdout was not captured"))?;
        let reader = std::thread::spawn(move || {
            let mut mp3 = Vec::new();
            stdout.read_to_end(&mut mp3)?;
            Ok(mp3)
        });

        Ok(Self {
            child: Some(child),
            stdin,
            reader: Some(reader),
            interleaved: Vec::new(),
        })
    }
}

impl CompressedEncoder for LameEncoder {
    fn encode_block(&mut self, left: &[i16], right: &[i16]) -> AudioResult<Vec<u8>> {
        let stdin = self
            .stdin
            .as_mut()
            .ok_or_else(|| AudioError::encoder_failed("encoder already flushed"))?;

        self.interleaved.clear();
        for (&l, &r) in left.iter().zip(right) {
            self.interleaved.extend_from_slice(&l.to_le_bytes());
            self.interleaved.extend_from_slice(&r.to_le_bytes());
        }
        stdin
            .write_all(&self.interleaved)
            .map_err(|e| AudioError::encoder_failed(format!("writing to lame: {}", e)))?;
        Ok(Vec::new())
    }

    fn flush(&mut self) -> AudioResult<Vec<u8>> {
        // Closing stdin signals end of input.
        drop(self.stdin.take());

        let reader = self
            .reader
            .take()
            .ok_or_else(|| AudioError::encoder_failed("encoder already flushed"))?;
        let mp3 = reader
            .join()
            .map_err(|_| AudioError::encoder_failed("lame reader thread panicked"))?
            .map_err(|e| AudioError::encoder_failed(format!("reading from lame: {}", e)))?;

        if let Some(mut child) = self.child.take() {
            let status = child.wait()?;
            if !status.success() {
                return Err(AudioError::encoder_failed(format!("lame exited with {}", status)));
            }
        }
        Ok(mp3)
    }
}

impl Drop for LameEncoder {
    fn drop(&mut self) {
        if let Some(mut child) = self.child.take() {
            drop(self.stdin.take());
            if let Err(e) = child.kill() {
                warn!("failed to stop lame: {}", e);
            }
            let _ = child.wait();
        }
    }
}
