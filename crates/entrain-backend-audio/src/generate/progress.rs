//! Generation progress reports.

use std::fmt;

/// What the generator is doing.
#[derive(Debug, Clone, PartialEq)]
pub enum Stage {
    /// Seeding the pink-noise source.
    PinkNoise,
    /// Synthesizing samples; seconds rendered so far out of the total.
    Synthesizing {
        /// Seconds rendered so far (rounded).
        rendered_secs: u64,
        /// Session duration in seconds.
        total_secs: u32,
    },
    /// Assembling the finished buffer.
    Assembling,
    /// The buffer is published.
    Ready,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Stage::PinkNoise => f.write_str("Generating pink noise..."),
            Stage::Synthesizing {
                rendered_secs,
                total_secs,
            } => write!(f, "{}s / {}s", rendered_secs, total_secs),
            Stage::Assembling => f.write_str("Creating buffer..."),
            Stage::Ready => f.write_str("Ready"),
        }
    }
}

/// A progress report: percentage (0-100) plus stage.
#[derive(Debug, Clone, PartialEq)]
pub struct Progress {
    /// Completion percentage.
    pub percent: f64,
    /// Current stage.
    pub stage: Stage,
}

impl Progress {
    pub(crate) fn pink_noise() -> Self {
        Self {
            percent: 5.0,
            stage: Stage::PinkNoise,
        }
    }

    pub(crate) fn chunk(end: usize, total: usize, sample_rate: u32, total_secs: u32) -> Self {
        let fraction = if total == 0 {
            1.0
        } else {
            end as f64 / total as f64
        };
        Self {
            percent: 10.0 + fraction * 80.0,
            stage: Stage::Synthesizing {
                rendered_secs: (end as f64 / f64::from(sample_rate)).round() as u64,
                total_secs,
            },
        }
    }

    pub(crate) fn assembling() -> Self {
        Self {
            percent: 95.0,
            stage: Stage::Assembling,
        }
    }

    pub(crate) fn ready() -> Self {
        Self {
            percent: 100.0,
            stage: Stage::Ready,
        }
    }

    /// True for the final report.
    pub fn is_ready(&self) -> bool {
        self.stage == Stage::Ready
    }
}

impl fmt::Display for Progress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:>3.0}% {}", self.percent, self.stage)
    }
}
