//! Playback transport over a finished session buffer.
//!
//! The controller owns the transport state (stopped, playing, paused) and
//! the host-clock anchor. Audio itself is handed to an [`AudioSink`]; the
//! controller never touches samples. Elapsed time is kept in atomics so a
//! render loop can read it through a [`PlaybackClock`] without locking.

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Instant;

use entrain_spec::SessionParameters;
use tracing::{debug, warn};

use crate::buffer::SessionBuffer;
use crate::error::{AudioError, AudioResult};
use crate::modulation::{breath_phase, light_mod_at, BreathPhaseResult, LightMod};

/// Source of monotonic time in seconds.
pub trait HostClock: Send + Sync {
    /// Current time in seconds from an arbitrary origin.
    fn now(&self) -> f64;
}

/// [`HostClock`] backed by [`Instant`].
#[derive(Debug, Clone, Copy)]
pub struct MonotonicClock {
    origin: Instant,
}

impl Default for MonotonicClock {
    fn default() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl HostClock for MonotonicClock {
    fn now(&self) -> f64 {
        self.origin.elapsed().as_secs_f64()
    }
}

/// Host audio output.
pub trait AudioSink {
    /// Starts playing `buffer` from `offset_frame`, replacing anything
    /// already playing.
    fn start(&mut self, buffer: Arc<SessionBuffer>, offset_frame: usize) -> AudioResult<()>;

    /// Stops output. Must be harmless when nothing is playing.
    fn stop(&mut self) -> AudioResult<()>;
}

/// Sink that discards audio, for headless transport use.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullSink;

impl AudioSink for NullSink {
    fn start(&mut self, _buffer: Arc<SessionBuffer>, _offset_frame: usize) -> AudioResult<()> {
        Ok(())
    }

    fn stop(&mut self) -> AudioResult<()> {
        Ok(())
    }
}

/// Transport state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaybackState {
    Stopped,
    Playing,
    Paused,
}

#[derive(Debug, Default)]
struct Timeline {
    playing: AtomicBool,
    start_bits: AtomicU64,
}

impl Timeline {
    fn start(&self, anchor: f64) {
        self.start_bits.store(anchor.to_bits(), Ordering::Release);
        self.playing.store(true, Ordering::Release);
    }

    fn halt(&self) {
        self.playing.store(false, Ordering::Release);
    }

    fn elapsed(&self, now: f64) -> f64 {
        if !self.playing.load(Ordering::Acquire) {
            return 0.0;
        }
        now - f64::from_bits(self.start_bits.load(Ordering::Acquire))
    }
}

/// Lock-free, cloneable reader of the playback position.
pub struct PlaybackClock<C: HostClock> {
    timeline: Arc<Timeline>,
    clock: Arc<C>,
}

impl<C: HostClock> Clone for PlaybackClock<C> {
    fn clone(&self) -> Self {
        Self {
            timeline: Arc::clone(&self.timeline),
            clock: Arc::clone(&self.clock),
        }
    }
}

impl<C: HostClock> PlaybackClock<C> {
    /// Seconds since playback start, or 0 when not playing.
    pub fn current_time(&self) -> f64 {
        self.timeline.elapsed(self.clock.now())
    }
}

/// Play/pause/seek/stop over one session buffer.
pub struct PlaybackController<C: HostClock = MonotonicClock> {
    clock: Arc<C>,
    timeline: Arc<Timeline>,
    sink: Box<dyn AudioSink>,
    session: Option<(Arc<SessionBuffer>, SessionParameters)>,
    state: PlaybackState,
    resume_at: f64,
}

impl PlaybackController<MonotonicClock> {
    /// Creates a controller on the monotonic clock.
    pub fn new(sink: Box<dyn AudioSink>) -> Self {
        Self::with_clock(sink, MonotonicClock::default())
    }
}

impl<C: HostClock> PlaybackController<C> {
    /// Creates a controller on a custom clock.
    pub fn with_clock(sink: Box<dyn AudioSink>, clock: C) -> Self {
        Self {
            clock: Arc::new(clock),
            timeline: Arc::new(Timeline::default()),
            sink,
            session: None,
            state: PlaybackState::Stopped,
            resume_at: 0.0,
        }
    }

    /// Replaces the loaded session, stopping any playback.
    pub fn load(&mut self, buffer: Arc<SessionBuffer>, params: SessionParameters) {
        self.stop();
        self.session = Some((buffer, params));
    }

    /// Unloads the session, stopping any playback.
    pub fn unload(&mut self) {
        self.stop();
        self.session = None;
    }

    /// True when a session is loaded.
    pub fn is_loaded(&self) -> bool {
        self.session.is_some()
    }

    /// Current transport state.
    pub fn state(&self) -> PlaybackState {
        self.state
    }

    /// Duration of the loaded session, or 0.
    pub fn duration_secs(&self) -> f64 {
        self.session
            .as_ref()
            .map(|(buffer, _)| buffer.duration_secs())
            .unwrap_or(0.0)
    }

    /// Returns a lock-free reader of the playback position.
    pub fn clock(&self) -> PlaybackClock<C> {
        PlaybackClock {
            timeline: Arc::clone(&self.timeline),
            clock: Arc::clone(&self.clock),
        }
    }

    /// Starts playback at `offset` seconds, restarting if already playing.
    pub fn play(&mut self, offset: f64) -> AudioResult<()> {
        let buffer = match &self.session {
            Some((buffer, _)) => Arc::clone(buffer),
            None => return Err(AudioError::NoBuffer),
        };
        if !offset.is_finite() {
            return Err(AudioError::invalid_param("offset", "must be finite"));
        }
        let offset = offset.clamp(0.0, buffer.duration_secs());

        self.halt();
        let frame = buffer.frame_at(offset);
        self.sink.start(buffer, frame)?;
        self.timeline.start(self.clock.now() - offset);
        self.state = PlaybackState::Playing;
        debug!(offset, frame, "playback started");
        Ok(())
    }

    /// Resumes from the paused (or sought) position.
    pub fn resume(&mut self) -> AudioResult<()> {
        self.play(self.resume_at)
    }

    /// Pauses playback and returns the elapsed seconds.
    ///
    /// Returns 0 and does nothing unless playing.
    pub fn pause(&mut self) -> f64 {
        if self.state != PlaybackState::Playing {
            return 0.0;
        }
        let elapsed = self.current_time();
        self.halt();
        self.state = PlaybackState::Paused;
        self.resume_at = elapsed;
        elapsed
    }

    /// Stops playback and rewinds. Safe to call in any state.
    pub fn stop(&mut self) {
        self.halt();
        self.state = PlaybackState::Stopped;
        self.resume_at = 0.0;
    }

    /// Moves to `fraction` (0-1) of the session.
    ///
    /// While playing, playback restarts there; otherwise the position is
    /// remembered for the next [`PlaybackController::resume`].
    pub fn seek(&mut self, fraction: f64) -> AudioResult<()> {
        if !self.is_loaded() {
            return Err(AudioError::NoBuffer);
        }
        if !fraction.is_finite() {
            return Err(AudioError::invalid_param("fraction", "must be finite"));
        }
        let offset = fraction.clamp(0.0, 1.0) * self.duration_secs();
        if self.state == PlaybackState::Playing {
            self.play(offset)
        } else {
            self.resume_at = offset;
            Ok(())
        }
    }

    /// Seconds since playback start, or 0 when not playing.
    pub fn current_time(&self) -> f64 {
        self.timeline.elapsed(self.clock.now())
    }

    /// Playback position: the running time while playing, otherwise the
    /// remembered resume point.
    pub fn position(&self) -> f64 {
        match self.state {
            PlaybackState::Playing => self.current_time(),
            _ => self.resume_at,
        }
    }

    /// Stops and returns true once playback has run past the end.
    pub fn poll_ended(&mut self) -> bool {
        if self.state == PlaybackState::Playing && self.current_time() >= self.duration_secs() {
            debug!("playback reached end");
            self.stop();
            return true;
        }
        false
    }

    /// Light modulation at [`PlaybackController::position`].
    ///
    /// While paused this stays frozen at the pause point rather than
    /// following [`PlaybackController::current_time`], which reads 0 when
    /// not playing. After a stop it reads the session start.
    pub fn current_light_mod(&self) -> Option<LightMod> {
        let (_, params) = self.session.as_ref()?;
        Some(light_mod_at(self.position(), params))
    }

    /// Breath phase at [`PlaybackController::position`], frozen at the
    /// pause point while paused.
    pub fn current_breath_phase(&self) -> Option<BreathPhaseResult> {
        let (_, params) = self.session.as_ref()?;
        Some(breath_phase(self.position(), &params.breath))
    }

    fn halt(&mut self) {
        if let Err(e) = self.sink.stop() {
            warn!("failed to stop audio output: {}", e);
        }
        self.timeline.halt();
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use super::*;
    use crate::modulation::BreathPhase;

    #[derive(Default)]
    struct ManualClock(AtomicU64);

    impl ManualClock {
        fn set(&self, secs: f64) {
            self.0.store(secs.to_bits(), Ordering::SeqCst);
        }
    }

    impl HostClock for Arc<ManualClock> {
        fn now(&self) -> f64 {
            f64::from_bits(self.0.load(Ordering::SeqCst))
        }
    }

    #[derive(Debug, Clone, PartialEq)]
    enum Event {
        Start(usize),
        Stop,
    }

    struct RecordingSink(Arc<Mutex<Vec<Event>>>);

    impl AudioSink for RecordingSink {
        fn start(&mut self, _buffer: Arc<SessionBuffer>, offset_frame: usize) -> AudioResult<()> {
            self.0.lock().unwrap().push(Event::Start(offset_frame));
            Ok(())
        }

        fn stop(&mut self) -> AudioResult<()> {
            self.0.lock().unwrap().push(Event::Stop);
            Ok(())
        }
    }

    struct BrokenSink;

    impl AudioSink for BrokenSink {
        fn start(&mut self, _: Arc<SessionBuffer>, _: usize) -> AudioResult<()> {
            Err(AudioError::OutputUnavailable {
                message: "no device".to_string(),
            })
        }

        fn stop(&mut self) -> AudioResult<()> {
            Err(AudioError::OutputUnavailable {
                message: "no device".to_string(),
            })
        }
    }

    fn setup() -> (
        PlaybackController<Arc<ManualClock>>,
        Arc<ManualClock>,
        Arc<Mutex<Vec<Event>>>,
    ) {
        let clock = Arc::new(ManualClock::default());
        let events = Arc::new(Mutex::new(Vec::new()));
        let mut controller = PlaybackController::with_clock(
            Box::new(RecordingSink(Arc::clone(&events))),
            Arc::clone(&clock),
        );
        // 10 s at 100 Hz
        let buffer = SessionBuffer::new(vec![0.0; 1000], vec![0.0; 1000], 100, 0).unwrap();
        controller.load(Arc::new(buffer), SessionParameters::default());
        events.lock().unwrap().clear();
        (controller, clock, events)
    }

    #[test]
    fn test_play_without_buffer_fails() {
        let mut controller = PlaybackController::new(Box::new(NullSink));
        assert!(matches!(controller.play(0.0), Err(AudioError::NoBuffer)));
        assert!(matches!(controller.seek(0.5), Err(AudioError::NoBuffer)));
        assert_eq!(controller.state(), PlaybackState::Stopped);
    }

    #[test]
    fn test_time_tracks_clock() {
        let (mut controller, clock, _) = setup();
        clock.set(100.0);
        assert_eq!(controller.current_time(), 0.0);

        controller.play(2.0).unwrap();
        assert_eq!(controller.current_time(), 2.0);
        clock.set(101.5);
        assert_eq!(controller.current_time(), 3.5);
        assert_eq!(controller.clock().current_time(), 3.5);
    }

    #[test]
    fn test_pause_then_resume_continues() {
        let (mut controller, clock, events) = setup();
        clock.set(10.0);
        controller.play(0.0).unwrap();
        clock.set(14.0);

        assert_eq!(controller.pause(), 4.0);
        assert_eq!(controller.state(), PlaybackState::Paused);
        assert_eq!(controller.current_time(), 0.0);
        assert_eq!(controller.position(), 4.0);

        clock.set(50.0);
        controller.resume().unwrap();
        assert_eq!(controller.current_time(), 4.0);
        assert_eq!(
            *events.lock().unwrap(),
            vec![Event::Stop, Event::Start(0), Event::Stop, Event::Stop, Event::Start(400)]
        );
    }

    #[test]
    fn test_pause_when_not_playing_is_noop() {
        let (mut controller, _, events) = setup();
        assert_eq!(controller.pause(), 0.0);
        assert_eq!(controller.state(), PlaybackState::Stopped);
        assert!(events.lock().unwrap().is_empty());
    }

    #[test]
    fn test_stop_is_idempotent() {
        let (mut controller, _, _) = setup();
        controller.stop();
        controller.stop();
        assert_eq!(controller.state(), PlaybackState::Stopped);

        let mut broken = PlaybackController::new(Box::new(BrokenSink));
        broken.stop();
        assert_eq!(broken.state(), PlaybackState::Stopped);
    }

    #[test]
    fn test_sink_start_failure_is_reported() {
        let mut controller = PlaybackController::new(Box::new(BrokenSink));
        let buffer = SessionBuffer::new(vec![0.0; 10], vec![0.0; 10], 10, 0).unwrap();
        controller.load(Arc::new(buffer), SessionParameters::default());
        assert!(matches!(
            controller.play(0.0),
            Err(AudioError::OutputUnavailable { .. })
        ));
        assert_eq!(controller.state(), PlaybackState::Stopped);
    }

    #[test]
    fn test_seek_while_playing_restarts() {
        let (mut controller, clock, events) = setup();
        clock.set(0.0);
        controller.play(0.0).unwrap();
        controller.seek(0.5).unwrap();
        assert_eq!(controller.current_time(), 5.0);
        assert_eq!(events.lock().unwrap().last(), Some(&Event::Start(500)));
    }

    #[test]
    fn test_seek_while_stopped_sets_resume_point() {
        let (mut controller, clock, _) = setup();
        clock.set(0.0);
        controller.seek(2.0).unwrap();
        assert_eq!(controller.position(), 10.0);
        controller.seek(0.25).unwrap();
        controller.resume().unwrap();
        assert_eq!(controller.current_time(), 2.5);
        assert!(controller.seek(f64::NAN).is_err());
    }

    #[test]
    fn test_poll_ended() {
        let (mut controller, clock, _) = setup();
        clock.set(0.0);
        controller.play(9.0).unwrap();
        assert!(!controller.poll_ended());
        clock.set(1.0);
        assert!(controller.poll_ended());
        assert_eq!(controller.state(), PlaybackState::Stopped);
        assert!(!controller.poll_ended());
    }

    #[test]
    fn test_modulation_follows_position() {
        let (mut controller, clock, _) = setup();
        clock.set(0.0);
        controller.play(5.0).unwrap();

        // Default breath: 4 s inhale, 4 s hold
        let breath = controller.current_breath_phase().unwrap();
        assert_eq!(breath.phase, BreathPhase::Hold);

        let params = SessionParameters::default();
        assert_eq!(controller.current_light_mod(), Some(light_mod_at(5.0, &params)));

        controller.unload();
        assert_eq!(controller.current_light_mod(), None);
    }

    #[test]
    fn test_paused_modulation_freezes_at_pause_point() {
        let (mut controller, clock, _) = setup();
        let params = SessionParameters::default();
        clock.set(0.0);
        controller.play(0.0).unwrap();
        // Quarter of a 4 Hz cycle past a whole one
        clock.set(3.0625);
        assert_eq!(controller.pause(), 3.0625);

        assert_eq!(controller.current_time(), 0.0);
        assert_eq!(controller.current_light_mod(), Some(light_mod_at(3.0625, &params)));
        assert_ne!(light_mod_at(3.0625, &params), light_mod_at(0.0, &params));

        // Clock keeps running while paused
        clock.set(20.0);
        assert_eq!(controller.current_light_mod(), Some(light_mod_at(3.0625, &params)));
        assert_eq!(
            controller.current_breath_phase().unwrap().phase,
            BreathPhase::Inhale
        );

        controller.stop();
        assert_eq!(controller.current_light_mod(), Some(light_mod_at(0.0, &params)));
    }
}
