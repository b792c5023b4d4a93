//! Main entry point for session generation.
//!
//! Generation is offline: the whole session is rendered into memory in
//! three-second chunks, then published as one immutable [`SessionBuffer`].
//! Every sample is a pure function of the parameters, the seed and its
//! index, so the same inputs always produce the same buffer.

mod mixer;
mod progress;
mod task;


use std::sync::atomic::{AtomicBool, Ordering};

use entrain_spec::{validate_params, SessionParameters};
use tracing::{debug, info};

use crate::buffer::SessionBuffer;
use crate::error::{AudioError, AudioResult};
use crate::noise::PinkNoise;
use crate::rng::{create_component_rng, WHISPER_NOISE_KEY};

use mixer::FrameMixer;

pub use mixer::MASTER_GAIN;
pub use progress::{Progress, Stage};
pub use task::{CancelHandle, GenerationTask};

/// Seconds of audio rendered per chunk.
pub const CHUNK_SECS: usize = 3;

/// Validates parameters, mapping the first failure to an [`AudioError`].
pub fn check_params(params: &SessionParameters) -> AudioResult<()> {
    let result = validate_params(params);
    match result.first_error() {
        None => Ok(()),
        Some(first) => Err(AudioError::InvalidParameters {
            code: first.code.code(),
            message: first.message.clone(),
            count: result.errors.len(),
        }),
    }
}

/// Incremental session renderer.
///
/// Each call to [`SessionGenerator::next_chunk`] renders one chunk of both
/// channels. Pink noise is drawn from a single running filter state across
/// chunks, so the result is identical to rendering the noise up front.
pub struct SessionGenerator {
    mixer: FrameMixer,
    pink: PinkNoise,
    scratch: Vec<f32>,
    left: Vec<f32>,
    right: Vec<f32>,
    cursor: usize,
    num_samples: usize,
    chunk_len: usize,
    sample_rate: u32,
    duration: u32,
    seed: u32,
}

impl SessionGenerator {
    /// Validates `params` and prepares a generator.
    ///
    /// # Arguments
    /// * `params` - Session parameters
    /// * `seed` - Seed for the pink-noise and whisper noise streams
    pub fn new(params: &SessionParameters, seed: u32) -> AudioResult<Self> {
        check_params(params)?;

        let num_samples = params.num_samples();
        let chunk_len = params.sample_rate as usize * CHUNK_SECS;

        Ok(Self {
            mixer: FrameMixer::new(params, create_component_rng(seed, WHISPER_NOISE_KEY)),
            pink: PinkNoise::from_session_seed(seed),
            scratch: vec![0.0; chunk_len.min(num_samples)],
            left: vec![0.0; num_samples],
            right: vec![0.0; num_samples],
            cursor: 0,
            num_samples,
            chunk_len,
            sample_rate: params.sample_rate,
            duration: params.duration,
            seed,
        })
    }

    /// Total number of frames the session will hold.
    pub fn num_samples(&self) -> usize {
        self.num_samples
    }

    /// True once every chunk has been rendered.
    pub fn is_complete(&self) -> bool {
        self.cursor >= self.num_samples
    }

    /// Renders the next chunk and reports progress, or returns `None` when
    /// the session is complete.
    pub fn next_chunk(&mut self) -> Option<Progress> {
        if self.is_complete() {
            return None;
        }

        let start = self.cursor;
        let end = (start + self.chunk_len).min(self.num_samples);
        let noise = &mut self.scratch[..end - start];
        self.pink.fill(noise);

        let sample_rate = f64::from(self.sample_rate);
        for (offset, &pink) in noise.iter().enumerate() {
            let i = start + offset;
            let t = i as f64 / sample_rate;
            let (l, r) = self.mixer.frame(t, pink);
            self.left[i] = l;
            self.right[i] = r;
        }

        self.cursor = end;
        let progress = Progress::chunk(end, self.num_samples, self.sample_rate, self.duration);
        debug!(end, total = self.num_samples, "rendered chunk");
        Some(progress)
    }

    /// Consumes the generator and returns the finished buffer.
    ///
    /// Fails with [`AudioError::Cancelled`] if chunks remain unrendered, so a
    /// partial buffer is never published.
    pub fn finish(self) -> AudioResult<SessionBuffer> {
        if !self.is_complete() {
            return Err(AudioError::Cancelled);
        }
        SessionBuffer::new(self.left, self.right, self.sample_rate, self.seed)
    }

    /// Runs the generator to completion.
    ///
    /// `on_progress` receives the full stage sequence (5, per-chunk 10-90,
    /// 95, 100). `cancel` is checked before every chunk; once set, the run
    /// stops and returns [`AudioError::Cancelled`] without further reports.
    pub fn run<F>(mut self, cancel: &AtomicBool, mut on_progress: F) -> AudioResult<SessionBuffer>
    where
        F: FnMut(Progress),
    {
        info!(
            samples = self.num_samples,
            sample_rate = self.sample_rate,
            seed = self.seed,
            "generating session"
        );

        on_progress(Progress::pink_noise());
        loop {
            if cancel.load(Ordering::Acquire) {
                info!("generation cancelled");
                return Err(AudioError::Cancelled);
            }
            match self.next_chunk() {
                Some(progress) => on_progress(progress),
                None => break,
            }
        }

        on_progress(Progress::assembling());
        let buffer = self.finish()?;
        on_progress(Progress::ready());

        info!(duration_secs = buffer.duration_secs(), "session ready");
        Ok(buffer)
    }
}

/// Generates a complete session buffer.
///
/// # Arguments
/// * `params` - Session parameters
/// * `seed` - Noise seed
///
/// # Returns
/// The finished stereo buffer
pub fn generate_session(params: &SessionParameters, seed: u32) -> AudioResult<SessionBuffer> {
    generate_session_with_progress(params, seed, |_| {})
}

/// Generates a complete session buffer, reporting progress.
pub fn generate_session_with_progress<F>(
    params: &SessionParameters,
    seed: u32,
    on_progress: F,
) -> AudioResult<SessionBuffer>
where
    F: FnMut(Progress),
{
    let never = AtomicBool::new(false);
    SessionGenerator::new(params, seed)?.run(&never, on_progress)
}
