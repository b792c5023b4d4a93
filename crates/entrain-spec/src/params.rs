//! Session parameter types.
//!
//! [`SessionParameters`] is the immutable configuration snapshot for one
//! generation run. It is persisted as camelCase JSON (inside presets or as a
//! standalone params file); gains are stored in dB and converted to linear
//! gain at the engine boundary so a save/load round trip is exact.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::SpecError;
use crate::sweep::SweepProfile;

/// Default output sample rate in Hz.
pub const DEFAULT_SAMPLE_RATE: u32 = 44_100;

/// Sample rates the engine accepts. Both leave headroom above the highest
/// covert carrier (six-channel encoding tops out at base + 2500 Hz).
pub const SUPPORTED_SAMPLE_RATES: [u32; 2] = [44_100, 48_000];

/// Carrier frequency used by dual-channel encoding when none is given.
pub const DEFAULT_DUAL_CARRIER_HZ: f64 = 19_000.0;

/// Base carrier frequency used by six-channel encoding when none is given.
pub const DEFAULT_SIX_CARRIER_HZ: f64 = 17_500.0;

/// Walking tempo used when the configured tempo is zero.
pub const DEFAULT_WALK_TEMPO_BPM: f64 = 60.0;

/// Converts a level in decibels to a linear gain factor.
///
/// ```
/// use entrain_spec::db_to_linear;
///
/// assert_eq!(db_to_linear(0.0), 1.0);
/// assert!((db_to_linear(-20.0) - 0.1).abs() < 1e-12);
/// ```
pub fn db_to_linear(db: f64) -> f64 {
    10f64.powf(db / 20.0)
}

/// Periodic waveform shape, shared by the tone oscillators and the light
/// modulation law.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Waveform {
    /// Sine wave.
    #[default]
    Sine,
    /// Square wave.
    Square,
    /// Triangle wave.
    Triangle,
    /// Sawtooth wave.
    Sawtooth,
}

impl Waveform {
    /// All waveform kinds, in display order.
    pub const ALL: [Waveform; 4] = [
        Waveform::Sine,
        Waveform::Square,
        Waveform::Triangle,
        Waveform::Sawtooth,
    ];

    /// Returns the lowercase name used on the command line and in JSON.
    pub fn as_str(&self) -> &'static str {
        match self {
            Waveform::Sine => "sine",
            Waveform::Square => "square",
            Waveform::Triangle => "triangle",
            Waveform::Sawtooth => "sawtooth",
        }
    }
}

/// Policy deciding when affirmation whispers fire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SyncMode {
    /// Whisper at the start of every exhale.
    #[default]
    Breath,
    /// Whisper on every eighth step of the walking tempo.
    Walk,
    /// Whisper at a fixed interval.
    Interval,
}

impl SyncMode {
    /// Returns the lowercase name used on the command line and in JSON.
    pub fn as_str(&self) -> &'static str {
        match self {
            SyncMode::Breath => "breath",
            SyncMode::Walk => "walk",
            SyncMode::Interval => "interval",
        }
    }
}

/// Covert light-synchronization encoding embedded in the audio.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EncodingKind {
    /// No covert carrier.
    #[default]
    None,
    /// One carrier, amplitude-modulated per side by the light modulation.
    DualChannel,
    /// Six carriers (RGB x left/right) spaced 500 Hz apart.
    SixChannel,
}

/// Parses command-line names: the canonical `as_str` form, with `-`
/// accepted for `_`.
macro_rules! impl_from_str {
    ($ty:ident, $kind:literal, [$($variant:ident),+] $(, $alias:literal => $target:ident)*) => {
        impl FromStr for $ty {
            type Err = SpecError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let normalized = s.trim().to_ascii_lowercase().replace('-', "_");
                $(
                    if normalized == $ty::$variant.as_str() {
                        return Ok($ty::$variant);
                    }
                )+
                $(
                    if normalized == $alias {
                        return Ok($ty::$target);
                    }
                )*
                Err(SpecError::UnknownCatalogEntry {
                    kind: $kind,
                    name: s.to_string(),
                })
            }
        }
    };
}

impl_from_str!(Waveform, "waveform", [Sine, Square, Triangle, Sawtooth]);
impl_from_str!(SyncMode, "sync mode", [Breath, Walk, Interval]);
impl_from_str!(
    EncodingKind,
    "encoding",
    [None, DualChannel, SixChannel],
    "dual" => DualChannel,
    "six" => SixChannel
);

impl EncodingKind {
    /// Returns the lowercase name used on the command line and in JSON.
    pub fn as_str(&self) -> &'static str {
        match self {
            EncodingKind::None => "none",
            EncodingKind::DualChannel => "dual_channel",
            EncodingKind::SixChannel => "six_channel",
        }
    }

    /// Short suffix used in exported file names.
    pub fn file_suffix(&self) -> &'static str {
        match self {
            EncodingKind::None => "",
            EncodingKind::DualChannel => "-AS",
            EncodingKind::SixChannel => "-SS",
        }
    }

    /// Carrier frequency used when the parameters leave it unset.
    pub fn default_carrier(&self) -> f64 {
        match self {
            EncodingKind::SixChannel => DEFAULT_SIX_CARRIER_HZ,
            EncodingKind::None | EncodingKind::DualChannel => DEFAULT_DUAL_CARRIER_HZ,
        }
    }
}

/// RGB intensity triple on a 0-100 scale.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Rgb {
    /// Red intensity (0-100).
    pub r: f64,
    /// Green intensity (0-100).
    pub g: f64,
    /// Blue intensity (0-100).
    pub b: f64,
}

impl Rgb {
    /// Creates a new RGB triple.
    pub const fn new(r: f64, g: f64, b: f64) -> Self {
        Self { r, g, b }
    }

    /// Returns the triple normalized to 0-1.
    pub fn normalized(&self) -> [f64; 3] {
        [self.r / 100.0, self.g / 100.0, self.b / 100.0]
    }
}

impl Default for Rgb {
    fn default() -> Self {
        Self::new(50.0, 30.0, 100.0)
    }
}

/// Breath cycle timing in seconds: inhale, hold, exhale, pause.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BreathTiming {
    /// Inhale duration.
    pub inhale: f64,
    /// Hold (after inhale) duration.
    pub hold: f64,
    /// Exhale duration.
    pub exhale: f64,
    /// Pause (after exhale) duration.
    pub pause: f64,
}

impl BreathTiming {
    /// Creates a new breath timing quadruple.
    pub const fn new(inhale: f64, hold: f64, exhale: f64, pause: f64) -> Self {
        Self {
            inhale,
            hold,
            exhale,
            pause,
        }
    }

    /// Total length of one breath cycle.
    pub fn cycle(&self) -> f64 {
        self.inhale + self.hold + self.exhale + self.pause
    }

    /// Offset of the exhale phase within the cycle.
    pub fn exhale_start(&self) -> f64 {
        self.inhale + self.hold
    }
}

impl Default for BreathTiming {
    fn default() -> Self {
        Self::new(4.0, 4.0, 6.0, 2.0)
    }
}

/// Immutable configuration for one session.
///
/// Frequencies are in Hz, times in seconds, levels in dB, and the light
/// controls (`light_mod_depth`, `brightness`, `light_phase`, `rgb`) on a
/// 0-100 scale.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default, deny_unknown_fields)]
pub struct SessionParameters {
    /// Left-ear tone frequency.
    pub freq_left: f64,
    /// Right-ear tone frequency.
    pub freq_right: f64,
    /// Session length in whole seconds.
    pub duration: u32,
    /// Linear fade-in / fade-out length.
    pub fade_time: f64,
    /// Output sample rate.
    pub sample_rate: u32,
    /// Tone level in dB.
    pub tone_volume_db: f64,
    /// Pink-noise level in dB.
    pub noise_volume_db: f64,
    /// Whisper level in dB.
    pub whisper_volume_db: f64,
    /// Period of interval-synced whispers.
    pub whisper_interval: f64,
    /// Affirmation phrases spoken by the companion voice.
    pub whisper_text: Vec<String>,
    /// Breath cycle timing.
    pub breath: BreathTiming,
    /// Walking tempo in beats per minute (0 means the 60 bpm default).
    pub walk_tempo: f64,
    /// Whisper synchronization policy.
    pub sync_mode: SyncMode,
    /// Constant target beat frequency, used when `sweep` is `None`.
    pub beat: f64,
    /// Optional piecewise-linear beat schedule.
    pub sweep: Option<SweepProfile>,
    /// Light modulation depth (0-100).
    pub light_mod_depth: f64,
    /// Peak light brightness (0-100).
    pub brightness: f64,
    /// Right-channel light phase offset as a percentage of one cycle (0-100).
    pub light_phase: f64,
    /// Light modulation waveform.
    pub light_waveform: Waveform,
    /// Tone oscillator waveform.
    pub tone_waveform: Waveform,
    /// Anti-habituation micro-variation amount (0-1).
    pub anti_habituation: f64,
    /// Light colour intensities.
    pub rgb: Rgb,
    /// Covert encoding strategy.
    pub encoding: EncodingKind,
    /// Covert carrier base frequency; the encoding's default when unset.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub carrier_freq: Option<f64>,
    /// Covert encoding level in dB.
    pub encoding_level_db: f64,
}

impl Default for SessionParameters {
    fn default() -> Self {
        Self {
            freq_left: 210.0,
            freq_right: 214.0,
            duration: 20 * 60,
            fade_time: 5.0,
            sample_rate: DEFAULT_SAMPLE_RATE,
            tone_volume_db: -6.0,
            noise_volume_db: -20.0,
            whisper_volume_db: -18.0,
            whisper_interval: 20.0,
            whisper_text: Vec::new(),
            breath: BreathTiming::default(),
            walk_tempo: DEFAULT_WALK_TEMPO_BPM,
            sync_mode: SyncMode::Breath,
            beat: 4.0,
            sweep: None,
            light_mod_depth: 100.0,
            brightness: 70.0,
            light_phase: 50.0,
            light_waveform: Waveform::Sine,
            tone_waveform: Waveform::Sine,
            anti_habituation: 0.15,
            rgb: Rgb::default(),
            encoding: EncodingKind::None,
            carrier_freq: None,
            encoding_level_db: -18.0,
        }
    }
}

impl SessionParameters {
    /// Parses parameters from a JSON string.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Serializes parameters to pretty-printed JSON.
    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Linear tone gain.
    pub fn tone_gain(&self) -> f64 {
        db_to_linear(self.tone_volume_db)
    }

    /// Linear pink-noise gain.
    pub fn noise_gain(&self) -> f64 {
        db_to_linear(self.noise_volume_db)
    }

    /// Linear whisper gain.
    pub fn whisper_gain(&self) -> f64 {
        db_to_linear(self.whisper_volume_db)
    }

    /// Linear covert-encoding gain.
    pub fn encoding_gain(&self) -> f64 {
        db_to_linear(self.encoding_level_db)
    }

    /// Carrier frequency after applying the encoding's default.
    pub fn resolved_carrier_freq(&self) -> f64 {
        self.carrier_freq
            .unwrap_or_else(|| self.encoding.default_carrier())
    }

    /// Highest carrier frequency the chosen encoding will emit.
    pub fn highest_carrier_freq(&self) -> Option<f64> {
        match self.encoding {
            EncodingKind::None => None,
            EncodingKind::DualChannel => Some(self.resolved_carrier_freq()),
            EncodingKind::SixChannel => Some(self.resolved_carrier_freq() + 2500.0),
        }
    }

    /// Walking tempo with the zero-means-default rule applied.
    pub fn effective_walk_tempo(&self) -> f64 {
        if self.walk_tempo > 0.0 {
            self.walk_tempo
        } else {
            DEFAULT_WALK_TEMPO_BPM
        }
    }

    /// Light modulation depth normalized to 0-1.
    pub fn light_depth_unit(&self) -> f64 {
        self.light_mod_depth / 100.0
    }

    /// Brightness normalized to 0-1.
    pub fn brightness_unit(&self) -> f64 {
        self.brightness / 100.0
    }

    /// Right-channel light phase as a fraction of a cycle (0-1).
    pub fn light_phase_unit(&self) -> f64 {
        self.light_phase / 100.0
    }

    /// Absolute difference between the two tone frequencies.
    pub fn beat_difference(&self) -> f64 {
        (self.freq_right - self.freq_left).abs()
    }

    /// Number of sample frames per channel.
    pub fn num_samples(&self) -> usize {
        self.duration as usize * self.sample_rate as usize
    }

    /// Session duration as floating-point seconds.
    pub fn duration_secs(&self) -> f64 {
        f64::from(self.duration)
    }
}
