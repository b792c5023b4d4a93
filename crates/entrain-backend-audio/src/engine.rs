//! Session engine: one parameter set, one buffer, one transport.

use std::io::Write;
use std::sync::Arc;

use entrain_spec::SessionParameters;
use tracing::{debug, info};

use crate::buffer::SessionBuffer;
use crate::compressed::{encode_compressed, CompressedEncoder};
use crate::error::{AudioError, AudioResult};
use crate::generate::{generate_session_with_progress, CancelHandle, GenerationTask, Progress};
use crate::playback::{AudioSink, HostClock, MonotonicClock, PlaybackController};
use crate::wav::{write_session_wav, WavResult};

/// A generation started by [`SessionEngine::start_generation`].
///
/// Drain progress with [`PendingGeneration::next_progress`], then hand it
/// back to [`SessionEngine::complete_generation`] to publish the buffer.
pub struct PendingGeneration {
    id: u64,
    params: SessionParameters,
    task: GenerationTask,
}

impl PendingGeneration {
    /// Waits for the next progress report; `None` once finished or
    /// superseded.
    pub async fn next_progress(&mut self) -> Option<Progress> {
        self.task.next_progress().await
    }

    /// Parameters this run was started with.
    pub fn params(&self) -> &SessionParameters {
        &self.params
    }
}

/// Owns the current session.
///
/// At most one generation is in flight. Starting another, or closing the
/// engine, cancels it; its progress stops and its buffer is never
/// published. The buffer is only replaced once a run fully completes.
pub struct SessionEngine<C: HostClock = MonotonicClock> {
    session: Option<(Arc<SessionBuffer>, SessionParameters)>,
    playback: PlaybackController<C>,
    in_flight: Option<(u64, CancelHandle)>,
    next_id: u64,
}

impl SessionEngine<MonotonicClock> {
    /// Creates an engine playing through `sink`.
    pub fn new(sink: Box<dyn AudioSink>) -> Self {
        Self::from_controller(PlaybackController::new(sink))
    }
}

impl<C: HostClock> SessionEngine<C> {
    /// Creates an engine around an existing playback controller.
    pub fn from_controller(playback: PlaybackController<C>) -> Self {
        Self {
            session: None,
            playback,
            in_flight: None,
            next_id: 0,
        }
    }

    /// The published buffer, if any.
    pub fn buffer(&self) -> Option<&Arc<SessionBuffer>> {
        self.session.as_ref().map(|(buffer, _)| buffer)
    }

    /// Parameters of the published buffer, if any.
    pub fn params(&self) -> Option<&SessionParameters> {
        self.session.as_ref().map(|(_, params)| params)
    }

    /// The playback transport.
    pub fn playback(&self) -> &PlaybackController<C> {
        &self.playback
    }

    /// Mutable access to the playback transport.
    pub fn playback_mut(&mut self) -> &mut PlaybackController<C> {
        &mut self.playback
    }

    /// True while a background generation is running.
    pub fn is_generating(&self) -> bool {
        self.in_flight.is_some()
    }

    /// Generates on the calling thread and publishes the result.
    pub fn generate<F>(
        &mut self,
        params: &SessionParameters,
        seed: u32,
        on_progress: F,
    ) -> AudioResult<Arc<SessionBuffer>>
    where
        F: FnMut(Progress),
    {
        self.cancel_in_flight();
        let buffer = generate_session_with_progress(params, seed, on_progress)?;
        Ok(self.publish(buffer, params.clone()))
    }

    /// Starts a background generation, cancelling any previous one.
    pub fn start_generation(
        &mut self,
        params: &SessionParameters,
        seed: u32,
    ) -> AudioResult<PendingGeneration> {
        self.cancel_in_flight();
        let task = GenerationTask::spawn(params, seed)?;

        self.next_id += 1;
        let id = self.next_id;
        self.in_flight = Some((id, task.cancel_handle()));
        debug!(id, "generation started");

        Ok(PendingGeneration {
            id,
            params: params.clone(),
            task,
        })
    }

    /// Waits for `pending` and publishes its buffer.
    ///
    /// Returns [`AudioError::Cancelled`] if the run was superseded or
    /// cancelled; the current buffer is then left untouched.
    pub async fn complete_generation(
        &mut self,
        pending: PendingGeneration,
    ) -> AudioResult<Arc<SessionBuffer>> {
        let current = matches!(self.in_flight, Some((id, _)) if id == pending.id);
        if !current {
            pending.task.cancel();
            return Err(AudioError::Cancelled);
        }

        let result = pending.task.join().await;
        self.in_flight = None;
        let buffer = result?;
        Ok(self.publish(buffer, pending.params))
    }

    /// Cancels any in-flight generation.
    pub fn cancel_generation(&mut self) {
        self.cancel_in_flight();
    }

    /// Cancels generation, stops playback and drops the session.
    pub fn close(&mut self) {
        self.cancel_in_flight();
        self.playback.unload();
        self.session = None;
    }

    /// Encodes the published buffer as WAV.
    pub fn export_wav(&self) -> AudioResult<WavResult> {
        WavResult::from_buffer(self.require_buffer()?)
    }

    /// Streams the published buffer as WAV into `writer`.
    pub fn write_wav<W: Write>(&self, writer: &mut W) -> AudioResult<()> {
        write_session_wav(writer, self.require_buffer()?)
    }

    /// Encodes the published buffer with a compressed encoder.
    pub fn export_compressed(
        &self,
        encoder: Option<&mut dyn CompressedEncoder>,
    ) -> AudioResult<Vec<u8>> {
        encode_compressed(self.require_buffer()?, encoder)
    }

    fn require_buffer(&self) -> AudioResult<&SessionBuffer> {
        self.buffer()
            .map(|buffer| buffer.as_ref())
            .ok_or(AudioError::NoBuffer)
    }

    fn cancel_in_flight(&mut self) {
        if let Some((id, handle)) = self.in_flight.take() {
            debug!(id, "cancelling generation");
            handle.cancel();
        }
    }

    fn publish(&mut self, buffer: SessionBuffer, params: SessionParameters) -> Arc<SessionBuffer> {
        let buffer = Arc::new(buffer);
        info!(frames = buffer.len(), "session buffer published");
        self.playback.load(Arc::clone(&buffer), params.clone());
        self.session = Some((Arc::clone(&buffer), params));
        buffer
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::playback::{NullSink, PlaybackState};

    fn params() -> SessionParameters {
        SessionParameters {
            duration: 6,
            fade_time: 1.0,
            whisper_text: vec!["calm".to_string()],
            ..Default::default()
        }
    }

    #[test]
    fn test_export_without_buffer_fails() {
        let engine = SessionEngine::new(Box::new(NullSink));
        assert!(matches!(engine.export_wav(), Err(AudioError::NoBuffer)));
        assert!(matches!(
            engine.export_compressed(None),
            Err(AudioError::NoBuffer)
        ));
    }

    #[test]
    fn test_generate_publishes_and_reexports() {
        let mut engine = SessionEngine::new(Box::new(NullSink));
        let buffer = engine.generate(&params(), 4, |_| {}).unwrap();
        assert_eq!(buffer.len(), 6 * 44_100);
        assert!(engine.playback().is_loaded());

        let first = engine.export_wav().unwrap();
        let second = engine.export_wav().unwrap();
        assert_eq!(first.pcm_hash, second.pcm_hash);
        assert_eq!(first.num_frames, buffer.len());

        assert!(matches!(
            engine.export_compressed(None),
            Err(AudioError::EncoderUnavailable { .. })
        ));
    }

    #[test]
    fn test_invalid_params_keep_previous_buffer() {
        let mut engine = SessionEngine::new(Box::new(NullSink));
        let first = engine.generate(&params(), 4, |_| {}).unwrap();

        let bad = SessionParameters {
            freq_left: f64::NAN,
            ..params()
        };
        assert!(engine.generate(&bad, 4, |_| {}).is_err());
        assert!(Arc::ptr_eq(engine.buffer().unwrap(), &first));
    }

    #[test]
    fn test_close_drops_session() {
        let mut engine = SessionEngine::new(Box::new(NullSink));
        engine.generate(&params(), 4, |_| {}).unwrap();
        engine.playback_mut().play(1.0).unwrap();
        engine.close();
        assert!(engine.buffer().is_none());
        assert_eq!(engine.playback().state(), PlaybackState::Stopped);
        assert!(!engine.playback().is_loaded());
    }

    #[tokio::test]
    async fn test_background_generation_publishes_on_completion() {
        let mut engine = SessionEngine::new(Box::new(NullSink));
        let mut pending = engine.start_generation(&params(), 8).unwrap();
        assert!(engine.is_generating());
        assert!(engine.buffer().is_none());

        let mut last = 0.0;
        while let Some(progress) = pending.next_progress().await {
            assert!(progress.percent > last);
            last = progress.percent;
        }
        assert_eq!(last, 100.0);

        let buffer = engine.complete_generation(pending).await.unwrap();
        assert!(!engine.is_generating());
        assert!(Arc::ptr_eq(engine.buffer().unwrap(), &buffer));
    }

    #[tokio::test]
    async fn test_superseded_generation_is_discarded() {
        let mut engine = SessionEngine::new(Box::new(NullSink));
        let mut stale = engine.start_generation(&params(), 1).unwrap();
        let fresh = engine.start_generation(&params(), 2).unwrap();

        assert!(stale.next_progress().await.is_none());
        assert!(matches!(
            engine.complete_generation(stale).await,
            Err(AudioError::Cancelled)
        ));
        assert!(engine.buffer().is_none());

        let buffer = engine.complete_generation(fresh).await.unwrap();
        assert_eq!(buffer.seed(), 2);
    }
}
