//! Sweep profiles: piecewise-linear beat schedules over normalized session time.

use serde::{Deserialize, Serialize};

use crate::error::SpecError;

/// One segment of a sweep profile.
///
/// `duration` is a fraction (0-1) of the total session length, not seconds.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct SweepSegment {
    /// Fraction of the session covered by this segment.
    pub duration: f64,
    /// Beat frequency at the start of the segment (Hz).
    pub start_freq: f64,
    /// Beat frequency at the end of the segment (Hz).
    pub end_freq: f64,
}

impl SweepSegment {
    /// Creates a new segment.
    pub const fn new(duration: f64, start_freq: f64, end_freq: f64) -> Self {
        Self {
            duration,
            start_freq,
            end_freq,
        }
    }
}

/// A named sequence of sweep segments.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SweepProfile {
    /// Display name.
    #[serde(default)]
    pub name: String,
    /// Segments in playback order.
    pub segments: Vec<SweepSegment>,
}

impl SweepProfile {
    /// Creates a sweep profile from a name and segments.
    pub fn new(name: impl Into<String>, segments: Vec<SweepSegment>) -> Self {
        Self {
            name: name.into(),
            segments,
        }
    }

    /// Sum of all segment fractions.
    pub fn total_fraction(&self) -> f64 {
        self.segments.iter().map(|s| s.duration).sum()
    }

    /// Start frequency of the first segment.
    pub fn first_freq(&self) -> Option<f64> {
        self.segments.first().map(|s| s.start_freq)
    }

    /// End frequency of the last segment.
    pub fn last_freq(&self) -> Option<f64> {
        self.segments.last().map(|s| s.end_freq)
    }
}

/// A built-in sweep profile.
#[derive(Debug, Clone, Copy)]
pub struct SweepPreset {
    /// Lookup key (e.g. "theta-alpha").
    pub id: &'static str,
    /// Display name.
    pub name: &'static str,
    /// Segments in playback order.
    pub segments: &'static [SweepSegment],
}

impl SweepPreset {
    /// Converts the preset to an owned [`SweepProfile`].
    pub fn to_profile(&self) -> SweepProfile {
        SweepProfile::new(self.name, self.segments.to_vec())
    }
}

/// Built-in sweep profiles.
pub const SWEEP_PRESETS: &[SweepPreset] = &[
    SweepPreset {
        id: "theta-alpha",
        name: "θ → α Gentle Awakening",
        segments: &[
            SweepSegment::new(0.3, 4.0, 4.0),
            SweepSegment::new(0.4, 4.0, 10.0),
            SweepSegment::new(0.3, 10.0, 10.0),
        ],
    },
    SweepPreset {
        id: "delta-theta",
        name: "δ → θ Emergence",
        segments: &[
            SweepSegment::new(0.3, 2.0, 2.0),
            SweepSegment::new(0.4, 2.0, 6.0),
            SweepSegment::new(0.3, 6.0, 6.0),
        ],
    },
    SweepPreset {
        id: "alpha-beta",
        name: "α → β Activation",
        segments: &[
            SweepSegment::new(0.2, 10.0, 10.0),
            SweepSegment::new(0.5, 10.0, 18.0),
            SweepSegment::new(0.3, 18.0, 18.0),
        ],
    },
    SweepPreset {
        id: "beta-alpha-theta",
        name: "β → α → θ Descent",
        segments: &[
            SweepSegment::new(0.2, 18.0, 18.0),
            SweepSegment::new(0.3, 18.0, 10.0),
            SweepSegment::new(0.3, 10.0, 6.0),
            SweepSegment::new(0.2, 6.0, 6.0),
        ],
    },
    SweepPreset {
        id: "full-cycle",
        name: "Full Cycle",
        segments: &[
            SweepSegment::new(0.15, 10.0, 6.0),
            SweepSegment::new(0.2, 6.0, 3.0),
            SweepSegment::new(0.3, 3.0, 3.0),
            SweepSegment::new(0.2, 3.0, 6.0),
            SweepSegment::new(0.15, 6.0, 10.0),
        ],
    },
];

/// Looks up a built-in sweep by id.
pub fn sweep_preset(id: &str) -> Result<&'static SweepPreset, SpecError> {
    SWEEP_PRESETS
        .iter()
        .find(|p| p.id == id)
        .ok_or_else(|| SpecError::UnknownCatalogEntry {
            kind: "sweep",
            name: id.to_string(),
        })
}
