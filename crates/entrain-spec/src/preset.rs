//! Persisted file formats: presets, session logs, and basic-session control files.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::affirmations::Language;
use crate::catalog::{Profile, Subprofile};
use crate::error::SpecError;
use crate::params::SessionParameters;
use crate::sweep::SweepProfile;

/// Preset format version written by this crate.
pub const PRESET_VERSION: &str = "2.0.0";

const PRESET_MAJOR_VERSION: u32 = 2;

/// Mandala visual settings stored alongside a preset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct VisualSettings {
    pub pattern: String,
    pub petals: u32,
    pub layers: u32,
}

impl Default for VisualSettings {
    fn default() -> Self {
        Self {
            pattern: "flower".to_string(),
            petals: 8,
            layers: 4,
        }
    }
}

/// A saved session configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Preset {
    /// Format version ("2.0.0").
    pub version: String,
    /// Display name, e.g. "Theta - Meditation".
    pub name: String,
    /// ISO-8601 creation timestamp.
    pub created_at: String,
    /// Profile id.
    pub profile: String,
    /// Subprofile id, if one was selected.
    #[serde(default)]
    pub subprofile: Option<String>,
    /// Sweep applied on top of `params`.
    #[serde(default)]
    pub sweep: Option<SweepProfile>,
    /// Full parameter snapshot.
    pub params: SessionParameters,
    #[serde(default)]
    pub visual: VisualSettings,
}

impl Preset {
    /// Creates a preset from an explicit parameter snapshot.
    pub fn new(
        profile: &Profile,
        subprofile: Option<&Subprofile>,
        params: SessionParameters,
        created_at: impl Into<String>,
    ) -> Self {
        let name = format!(
            "{} - {}",
            profile.name(),
            subprofile.map(|s| s.name).unwrap_or("Custom")
        );
        Self {
            version: PRESET_VERSION.to_string(),
            name,
            created_at: created_at.into(),
            profile: profile.id.to_string(),
            subprofile: subprofile.map(|s| s.id.to_string()),
            sweep: params.sweep.clone(),
            params,
            visual: VisualSettings::default(),
        }
    }

    /// Creates a preset for a built-in subprofile.
    pub fn for_subprofile(
        profile: &Profile,
        subprofile: &Subprofile,
        lang: Language,
        created_at: impl Into<String>,
    ) -> Self {
        let params = SessionParameters::from_subprofile(subprofile, lang);
        Self::new(profile, Some(subprofile), params, created_at)
    }

    /// Parses a preset from JSON, rejecting incompatible major versions.
    pub fn from_json(json: &str) -> Result<Self, SpecError> {
        let preset: Preset = serde_json::from_str(json)?;
        preset.check_version()?;
        Ok(preset)
    }

    /// Serializes the preset to pretty-printed JSON.
    pub fn to_json_pretty(&self) -> Result<String, SpecError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Loads a preset from disk.
    pub fn load(path: &Path) -> Result<Self, SpecError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Writes the preset to disk.
    pub fn save(&self, path: &Path) -> Result<(), SpecError> {
        std::fs::write(path, self.to_json_pretty()?)?;
        Ok(())
    }

    /// Returns the parameters to generate from.
    ///
    /// The top-level `sweep` wins over any sweep inside `params`, matching the
    /// way the preset was assembled.
    pub fn session_params(&self) -> SessionParameters {
        let mut params = self.params.clone();
        if self.sweep.is_some() {
            params.sweep = self.sweep.clone();
        }
        params
    }

    fn check_version(&self) -> Result<(), SpecError> {
        let major = self
            .version
            .split('.')
            .next()
            .and_then(|m| m.parse::<u32>().ok());
        if major == Some(PRESET_MAJOR_VERSION) {
            Ok(())
        } else {
            Err(SpecError::UnsupportedPresetVersion {
                found: self.version.clone(),
                expected: PRESET_MAJOR_VERSION,
            })
        }
    }
}

/// Formats seconds as `m:ss`.
///
/// ```
/// use entrain_spec::format_clock;
///
/// assert_eq!(format_clock(0.0), "0:00");
/// assert_eq!(format_clock(1200.0), "20:00");
/// assert_eq!(format_clock(65.9), "1:05");
/// ```
pub fn format_clock(secs: f64) -> String {
    let secs = if secs.is_finite() { secs.max(0.0) } else { 0.0 };
    let minutes = (secs / 60.0).floor() as u64;
    let seconds = (secs % 60.0).floor() as u64;
    format!("{}:{:02}", minutes, seconds)
}

/// Informational record of a completed session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionLog {
    /// ISO-8601 timestamp.
    pub date: String,
    pub profile: String,
    pub subprofile: Option<String>,
    pub intention: Option<String>,
    /// Elapsed time as `m:ss`.
    pub duration: String,
    pub breaths: u32,
    pub steps: u32,
    pub notes: String,
}

impl SessionLog {
    /// Creates a log entry with no breath/step counts or notes.
    pub fn new(
        date: impl Into<String>,
        profile: impl Into<String>,
        subprofile: Option<String>,
        elapsed_secs: f64,
    ) -> Self {
        Self {
            date: date.into(),
            profile: profile.into(),
            subprofile,
            intention: None,
            duration: format_clock(elapsed_secs),
            breaths: 0,
            steps: 0,
            notes: String::new(),
        }
    }

    /// Sets the session intention.
    pub fn with_intention(mut self, intention: impl Into<String>) -> Self {
        let intention = intention.into();
        self.intention = if intention.is_empty() {
            None
        } else {
            Some(intention)
        };
        self
    }

    /// Sets the closing notes.
    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = notes.into();
        self
    }

    /// Serializes the log to pretty-printed JSON.
    pub fn to_json_pretty(&self) -> Result<String, SpecError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// Line-oriented single-segment control file for light/sound machines.
pub struct BasicSession;

impl BasicSession {
    /// Renders the control file text.
    pub fn render(
        params: &SessionParameters,
        profile_name: &str,
        subprofile_name: Option<&str>,
        timestamp: &str,
    ) -> String {
        let mut out = String::new();
        out.push_str("# Entrain Basic Session\n");
        out.push_str(&format!(
            "# {} - {}\n",
            profile_name,
            subprofile_name.unwrap_or("Custom")
        ));
        out.push_str(&format!("# {}\n\n", timestamp));
        out.push_str("[Global]\nColorControlMode=3\n\n");
        out.push_str("[Segment1]\n");
        out.push_str(&format!("Time={:.2}\n", params.duration_secs()));
        out.push_str(&format!("Beat={:.2}\n", params.beat));
        out.push_str(&format!("LPitch={:.2}\n", params.freq_left));
        out.push_str(&format!("RPitch={:.2}\n", params.freq_right));
        out.push_str(&format!("LPhase={:.0}\n", params.light_phase));
        out.push_str(&format!("Bright={:.0}\n", params.brightness));
        out.push_str(&format!("Red={}\n", params.rgb.r));
        out.push_str(&format!("Green={}\n", params.rgb.g));
        out.push_str(&format!("Blue={}\n", params.rgb.b));
        out
    }

    /// Conventional file name for a profile's control file.
    pub fn file_name(profile_name: &str) -> String {
        format!("entrain-{}.kbs", profile_name.to_lowercase())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::profile;
    use crate::sweep::sweep_preset;
    use pretty_assertions::assert_eq;

    const TS: &str = "2026-01-15T08:30:00+00:00";

    #[test]
    fn test_preset_round_trip_reproduces_params() {
        let theta = profile("theta").unwrap();
        let sub = theta.subprofile("theta-walking").unwrap();
        let preset = Preset::for_subprofile(theta, sub, Language::English, TS);

        assert_eq!(preset.version, "2.0.0");
        assert_eq!(preset.name, "Theta - Walking");
        assert_eq!(preset.subprofile.as_deref(), Some("theta-walking"));

        let json = preset.to_json_pretty().unwrap();
        let loaded = Preset::from_json(&json).unwrap();
        assert_eq!(loaded, preset);
        assert_eq!(loaded.session_params(), preset.params);
    }

    #[test]
    fn test_preset_json_shape() {
        let theta = profile("theta").unwrap();
        let preset = Preset::new(theta, None, SessionParameters::default(), TS);
        let value: serde_json::Value =
            serde_json::from_str(&preset.to_json_pretty().unwrap()).unwrap();
        assert_eq!(value["createdAt"], TS);
        assert_eq!(value["name"], "Theta - Custom");
        assert!(value["sweep"].is_null());
        assert_eq!(value["params"]["freqLeft"], 210.0);
        assert_eq!(value["visual"]["petals"], 8);
    }

    #[test]
    fn test_top_level_sweep_is_applied() {
        let theta = profile("theta").unwrap();
        let mut preset = Preset::new(theta, None, SessionParameters::default(), TS);
        preset.sweep = Some(sweep_preset("theta-alpha").unwrap().to_profile());
        assert_eq!(preset.session_params().sweep, preset.sweep);
    }

    #[test]
    fn test_incompatible_version_is_rejected() {
        let theta = profile("theta").unwrap();
        let mut preset = Preset::new(theta, None, SessionParameters::default(), TS);
        preset.version = "1.4.0".to_string();
        let json = serde_json::to_string(&preset).unwrap();
        assert!(matches!(
            Preset::from_json(&json),
            Err(SpecError::UnsupportedPresetVersion { .. })
        ));
    }

    #[test]
    fn test_session_log_json() {
        let log = SessionLog::new(TS, "theta", Some("Meditation".to_string()), 754.2)
            .with_intention("rest")
            .with_notes("calm");
        assert_eq!(log.duration, "12:34");
        let value: serde_json::Value =
            serde_json::from_str(&log.to_json_pretty().unwrap()).unwrap();
        assert_eq!(value["intention"], "rest");
        assert_eq!(value["breaths"], 0);
    }

    #[test]
    fn test_basic_session_render() {
        let params = SessionParameters::default();
        let text = BasicSession::render(&params, "Theta", Some("Meditation"), TS);
        let expected = "\
# Entrain Basic Session
# Theta - Meditation
# 2026-01-15T08:30:00+00:00

[Global]
ColorControlMode=3

[Segment1]
Time=1200.00
Beat=4.00
LPitch=210.00
RPitch=214.00
LPhase=50
Bright=70
Red=50
Green=30
Blue=100
";
        assert_eq!(text, expected);
        assert_eq!(BasicSession::file_name("Theta"), "entrain-theta.kbs");
    }
}
