//! Breath-cycle phase tracking and whisper gating.

use entrain_spec::{BreathTiming, SessionParameters, SyncMode};

/// Length of a breath- or interval-synced whisper window, in seconds.
pub const WHISPER_WINDOW_SECS: f64 = 0.5;

/// Length of a walk-synced whisper window, in seconds.
pub const WALK_WHISPER_WINDOW_SECS: f64 = 0.3;

/// Walk-synced whispers fire on every Nth step.
pub const WALK_WHISPER_EVERY_STEPS: u64 = 8;

/// Held phases shorter than this use it as the progress denominator.
const MIN_HELD_PHASE_SECS: f64 = 0.1;

/// One of the four breath phases, in cycle order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BreathPhase {
    Inhale,
    Hold,
    Exhale,
    Pause,
}

impl BreathPhase {
    /// Lowercase phase name.
    pub fn as_str(&self) -> &'static str {
        match self {
            BreathPhase::Inhale => "inhale",
            BreathPhase::Hold => "hold",
            BreathPhase::Exhale => "exhale",
            BreathPhase::Pause => "pause",
        }
    }
}

impl std::fmt::Display for BreathPhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Position within the breath cycle at some instant.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BreathPhaseResult {
    /// Active phase.
    pub phase: BreathPhase,
    /// Fraction of the active phase already elapsed (0-1).
    pub progress: f64,
    /// Seconds until the active phase ends.
    pub remaining: f64,
}

/// Computes the breath phase at time `t`.
///
/// The cycle is partitioned into inhale, hold, exhale and pause, in that
/// order. Hold and pause use `max(0.1, length)` as their progress
/// denominator so a zero-length phase never divides by zero.
pub fn breath_phase(t: f64, breath: &BreathTiming) -> BreathPhaseResult {
    let cycle = breath.cycle();
    if !cycle.is_finite() || cycle <= 0.0 {
        return BreathPhaseResult {
            phase: BreathPhase::Inhale,
            progress: 0.0,
            remaining: 0.0,
        };
    }

    let pos = t % cycle;
    let hold_end = breath.inhale + breath.hold;
    let exhale_end = hold_end + breath.exhale;

    if pos < breath.inhale {
        BreathPhaseResult {
            phase: BreathPhase::Inhale,
            progress: pos / breath.inhale,
            remaining: breath.inhale - pos,
        }
    } else if pos < hold_end {
        BreathPhaseResult {
            phase: BreathPhase::Hold,
            progress: (pos - breath.inhale) / breath.hold.max(MIN_HELD_PHASE_SECS),
            remaining: hold_end - pos,
        }
    } else if pos < exhale_end {
        BreathPhaseResult {
            phase: BreathPhase::Exhale,
            progress: (pos - hold_end) / breath.exhale,
            remaining: exhale_end - pos,
        }
    } else {
        BreathPhaseResult {
            phase: BreathPhase::Pause,
            progress: (pos - exhale_end) / breath.pause.max(MIN_HELD_PHASE_SECS),
            remaining: cycle - pos,
        }
    }
}

/// Returns true while an affirmation whisper should sound at time `t`.
pub fn should_whisper(t: f64, params: &SessionParameters) -> bool {
    match params.sync_mode {
        SyncMode::Breath => {
            let cycle = params.breath.cycle();
            if !cycle.is_finite() || cycle <= 0.0 {
                return false;
            }
            let pos = t % cycle;
            let exhale_start = params.breath.exhale_start();
            pos >= exhale_start && pos < exhale_start + WHISPER_WINDOW_SECS
        }
        SyncMode::Walk => {
            let step_interval = 60.0 / params.effective_walk_tempo();
            let step = (t / step_interval).floor() as u64;
            step % WALK_WHISPER_EVERY_STEPS == 0 && t % step_interval < WALK_WHISPER_WINDOW_SECS
        }
        SyncMode::Interval => t % params.whisper_interval < WHISPER_WINDOW_SECS,
    }
}
