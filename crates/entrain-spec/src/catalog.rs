//! Built-in brainwave profiles and band classification.
//!
//! A [`Profile`] groups related [`Subprofile`]s under one brainwave band.
//! Subprofiles carry a complete tonal/breath/light setup and are applied over
//! [`SessionParameters::default`] with [`SessionParameters::from_subprofile`].

use crate::affirmations::{affirmations, Language};
use crate::error::SpecError;
use crate::params::{BreathTiming, Rgb, SessionParameters, SyncMode};

/// Brainwave frequency band.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BrainwaveBand {
    /// Below 4 Hz.
    Delta,
    /// 4 to 8 Hz.
    Theta,
    /// 8 to 14 Hz.
    Alpha,
    /// 14 to 30 Hz.
    Beta,
    /// 30 Hz and above.
    Gamma,
}

impl BrainwaveBand {
    /// Classifies a beat frequency difference into a band.
    ///
    /// Boundaries are half-open: exactly 4 Hz is theta, exactly 8 Hz alpha.
    pub fn classify(diff_hz: f64) -> Self {
        let diff = diff_hz.abs();
        if diff < 4.0 {
            BrainwaveBand::Delta
        } else if diff < 8.0 {
            BrainwaveBand::Theta
        } else if diff < 14.0 {
            BrainwaveBand::Alpha
        } else if diff < 30.0 {
            BrainwaveBand::Beta
        } else {
            BrainwaveBand::Gamma
        }
    }

    /// Greek letter symbol.
    pub fn symbol(&self) -> &'static str {
        match self {
            BrainwaveBand::Delta => "δ",
            BrainwaveBand::Theta => "θ",
            BrainwaveBand::Alpha => "α",
            BrainwaveBand::Beta => "β",
            BrainwaveBand::Gamma => "γ",
        }
    }

    /// Display name.
    pub fn name(&self) -> &'static str {
        match self {
            BrainwaveBand::Delta => "Delta",
            BrainwaveBand::Theta => "Theta",
            BrainwaveBand::Alpha => "Alpha",
            BrainwaveBand::Beta => "Beta",
            BrainwaveBand::Gamma => "Gamma",
        }
    }

    /// Nominal frequency range label.
    pub fn range_label(&self) -> &'static str {
        match self {
            BrainwaveBand::Delta => "0.5-4 Hz",
            BrainwaveBand::Theta => "4-8 Hz",
            BrainwaveBand::Alpha => "8-13 Hz",
            BrainwaveBand::Beta => "13-30 Hz",
            BrainwaveBand::Gamma => "30-100 Hz",
        }
    }
}

impl std::fmt::Display for BrainwaveBand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.symbol(), self.name())
    }
}

/// A ready-made session setup within a profile.
#[derive(Debug, Clone, Copy)]
pub struct Subprofile {
    pub id: &'static str,
    pub name: &'static str,
    pub freq_left: f64,
    pub freq_right: f64,
    pub beat: f64,
    pub breath: BreathTiming,
    /// Walking tempo in bpm; 0 for seated practices.
    pub walk_tempo: f64,
    pub sync_mode: SyncMode,
    pub rgb: Rgb,
    /// Key into the affirmation table.
    pub whisper_key: &'static str,
}

/// A brainwave profile and its subprofiles.
#[derive(Debug, Clone, Copy)]
pub struct Profile {
    pub id: &'static str,
    pub band: BrainwaveBand,
    pub description: &'static str,
    pub subprofiles: &'static [Subprofile],
}

impl Profile {
    /// Display name of the profile's band.
    pub fn name(&self) -> &'static str {
        self.band.name()
    }

    /// Finds a subprofile by id.
    pub fn subprofile(&self, id: &str) -> Result<&'static Subprofile, SpecError> {
        self.subprofiles
            .iter()
            .find(|s| s.id == id)
            .ok_or_else(|| SpecError::UnknownCatalogEntry {
                kind: "subprofile",
                name: id.to_string(),
            })
    }

    /// The first (default) subprofile.
    pub fn default_subprofile(&self) -> Option<&'static Subprofile> {
        self.subprofiles.first()
    }
}

macro_rules! sub {
    ($id:literal, $name:literal, $l:literal, $r:literal, $beat:literal,
     [$i:literal, $h:literal, $e:literal, $p:literal], $tempo:literal, $sync:ident,
     ($red:literal, $green:literal, $blue:literal), $key:literal) => {
        Subprofile {
            id: $id,
            name: $name,
            freq_left: $l,
            freq_right: $r,
            beat: $beat,
            breath: BreathTiming::new($i, $h, $e, $p),
            walk_tempo: $tempo,
            sync_mode: SyncMode::$sync,
            rgb: Rgb::new($red, $green, $blue),
            whisper_key: $key,
        }
    };
}

/// Built-in profiles, ordered from slowest to fastest band.
pub const PROFILES: &[Profile] = &[
    Profile {
        id: "delta",
        band: BrainwaveBand::Delta,
        description: "Deep sleep, regeneration, healing",
        subprofiles: &[
            sub!("delta-sleep", "Sleep", 100.0, 102.0, 2.0, [4.0, 0.0, 8.0, 0.0], 0.0, Breath, (20.0, 20.0, 80.0), "sleep"),
            sub!("delta-healing", "Healing", 136.0, 139.0, 3.0, [5.0, 2.0, 7.0, 2.0], 0.0, Breath, (20.0, 60.0, 40.0), "healing"),
            sub!("delta-release", "Release", 90.0, 93.0, 3.0, [4.0, 0.0, 10.0, 2.0], 0.0, Breath, (30.0, 40.0, 60.0), "release"),
        ],
    },
    Profile {
        id: "theta",
        band: BrainwaveBand::Theta,
        description: "Meditation, creativity, intuition",
        subprofiles: &[
            sub!("theta-meditation", "Meditation", 210.0, 214.0, 4.0, [4.0, 4.0, 6.0, 2.0], 50.0, Breath, (50.0, 30.0, 100.0), "meditation"),
            sub!("theta-creativity", "Creativity", 200.0, 206.0, 6.0, [4.0, 2.0, 6.0, 0.0], 60.0, Breath, (70.0, 40.0, 90.0), "creativity"),
            sub!("theta-intuition", "Intuition", 216.0, 222.0, 6.0, [5.0, 5.0, 5.0, 5.0], 45.0, Breath, (60.0, 30.0, 100.0), "intuition"),
            sub!("theta-walking", "Walking", 205.0, 210.0, 5.0, [4.0, 0.0, 4.0, 0.0], 60.0, Walk, (40.0, 50.0, 80.0), "walking"),
        ],
    },
    Profile {
        id: "alpha",
        band: BrainwaveBand::Alpha,
        description: "Relaxation, learning, flow",
        subprofiles: &[
            sub!("alpha-relax", "Relaxation", 200.0, 210.0, 10.0, [4.0, 2.0, 6.0, 0.0], 55.0, Breath, (30.0, 90.0, 70.0), "relax"),
            sub!("alpha-learning", "Learning", 220.0, 230.0, 10.0, [4.0, 4.0, 4.0, 0.0], 70.0, Breath, (40.0, 80.0, 60.0), "learning"),
            sub!("alpha-stress", "Anti-Stress", 194.0, 204.0, 10.0, [4.0, 7.0, 8.0, 0.0], 50.0, Breath, (30.0, 100.0, 50.0), "antistress"),
            sub!("alpha-morning", "Awakening", 208.0, 220.0, 12.0, [3.0, 0.0, 5.0, 2.0], 65.0, Breath, (80.0, 60.0, 30.0), "morning"),
        ],
    },
    Profile {
        id: "beta",
        band: BrainwaveBand::Beta,
        description: "Focus, productivity, energy",
        subprofiles: &[
            sub!("beta-focus", "Focus", 200.0, 215.0, 15.0, [3.0, 3.0, 3.0, 0.0], 80.0, Walk, (100.0, 80.0, 20.0), "focus"),
            sub!("beta-work", "Work", 190.0, 208.0, 18.0, [4.0, 2.0, 4.0, 0.0], 75.0, Interval, (90.0, 70.0, 30.0), "work"),
            sub!("beta-energy", "Energy", 180.0, 200.0, 20.0, [2.0, 0.0, 2.0, 0.0], 100.0, Walk, (100.0, 60.0, 20.0), "energy"),
            sub!("beta-confidence", "Confidence", 195.0, 212.0, 17.0, [3.0, 3.0, 4.0, 0.0], 90.0, Walk, (100.0, 50.0, 30.0), "confidence"),
        ],
    },
    Profile {
        id: "gamma",
        band: BrainwaveBand::Gamma,
        description: "Higher cognition, insight, transcendence",
        subprofiles: &[
            sub!("gamma-insight", "Insight", 200.0, 240.0, 40.0, [3.0, 6.0, 6.0, 0.0], 70.0, Breath, (100.0, 40.0, 70.0), "insight"),
            sub!("gamma-transcend", "Transcendence", 172.0, 212.0, 40.0, [4.0, 8.0, 8.0, 4.0], 45.0, Breath, (70.0, 30.0, 100.0), "transcend"),
            sub!("gamma-problem", "Problem Solving", 185.0, 225.0, 40.0, [4.0, 4.0, 4.0, 2.0], 80.0, Interval, (90.0, 50.0, 80.0), "problem"),
            sub!("gamma-peak", "Performance", 190.0, 235.0, 45.0, [3.0, 2.0, 3.0, 0.0], 95.0, Walk, (100.0, 40.0, 60.0), "peak"),
        ],
    },
];

/// Looks up a built-in profile by id.
pub fn profile(id: &str) -> Result<&'static Profile, SpecError> {
    PROFILES
        .iter()
        .find(|p| p.id == id)
        .ok_or_else(|| SpecError::UnknownCatalogEntry {
            kind: "profile",
            name: id.to_string(),
        })
}

/// Finds the profile that owns a subprofile id.
pub fn find_subprofile(id: &str) -> Option<(&'static Profile, &'static Subprofile)> {
    PROFILES
        .iter()
        .find_map(|p| p.subprofiles.iter().find(|s| s.id == id).map(|s| (p, s)))
}

impl SessionParameters {
    /// Builds parameters from a subprofile over the defaults, with whisper
    /// text drawn from the affirmation table in `lang`.
    pub fn from_subprofile(sub: &Subprofile, lang: Language) -> Self {
        let mut params = Self::default();
        params.apply_subprofile(sub, lang);
        params
    }

    /// Overwrites the subprofile-controlled fields, leaving the rest intact.
    pub fn apply_subprofile(&mut self, sub: &Subprofile, lang: Language) {
        self.freq_left = sub.freq_left;
        self.freq_right = sub.freq_right;
        self.beat = sub.beat;
        self.breath = sub.breath;
        self.walk_tempo = if sub.walk_tempo > 0.0 {
            sub.walk_tempo
        } else {
            crate::params::DEFAULT_WALK_TEMPO_BPM
        };
        self.sync_mode = sub.sync_mode;
        self.rgb = sub.rgb;
        self.whisper_text = affirmations(sub.whisper_key, lang)
            .iter()
            .map(|s| s.to_string())
            .collect();
    }
}
