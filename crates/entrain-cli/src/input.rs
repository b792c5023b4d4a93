//! Session input resolution.
//!
//! Every command that needs session parameters takes the same
//! [`SessionArgs`]: a source (params file, preset file, or built-in
//! profile) followed by per-field overrides. Resolution is pure apart from
//! reading the source file, and never validates; callers decide whether to
//! run [`entrain_spec::validate_params`] before generating.

use std::path::{Path, PathBuf};

use clap::Args;
use entrain_spec::{
    catalog, sweep::sweep_preset, EncodingKind, Language, Preset, Profile, SessionParameters,
    SpecError, Subprofile, SyncMode, VisualSettings, Waveform, PRESET_VERSION,
};

/// Where the base parameters came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionSource {
    /// Built-in defaults, no source given.
    Defaults,
    /// A bare `SessionParameters` JSON file.
    ParamsFile(PathBuf),
    /// A saved preset.
    Preset(PathBuf),
    /// A built-in profile / subprofile.
    Profile,
}

impl SessionSource {
    /// Short label for reports.
    pub fn as_str(&self) -> &'static str {
        match self {
            SessionSource::Defaults => "defaults",
            SessionSource::ParamsFile(_) => "params",
            SessionSource::Preset(_) => "preset",
            SessionSource::Profile => "profile",
        }
    }
}

/// Session source and overrides shared by `generate`, `light` and `play`.
#[derive(Debug, Clone, Default, Args)]
pub struct SessionArgs {
    /// Session parameters JSON file
    #[arg(long, conflicts_with_all = ["preset", "profile", "subprofile"])]
    pub params: Option<String>,

    /// Preset file written by `entrain preset` or `generate --preset-out`
    #[arg(long, conflicts_with_all = ["profile", "subprofile"])]
    pub preset: Option<String>,

    /// Built-in profile (delta, theta, alpha, beta, gamma)
    #[arg(long)]
    pub profile: Option<String>,

    /// Built-in subprofile id (e.g. theta-meditation)
    #[arg(long)]
    pub subprofile: Option<String>,

    /// Affirmation language code for built-in profiles (fr, en, es, ...)
    #[arg(long, default_value = "fr")]
    pub lang: String,

    /// Session length in seconds
    #[arg(long)]
    pub duration: Option<u32>,

    /// Fade-in / fade-out length in seconds
    #[arg(long)]
    pub fade: Option<f64>,

    /// Output sample rate (44100 or 48000)
    #[arg(long)]
    pub sample_rate: Option<u32>,

    /// Covert encoding (none, dual, six)
    #[arg(long)]
    pub encoding: Option<EncodingKind>,

    /// Covert carrier base frequency in Hz
    #[arg(long)]
    pub carrier: Option<f64>,

    /// Covert encoding level in dB
    #[arg(long, allow_hyphen_values = true)]
    pub encoding_level: Option<f64>,

    /// Built-in sweep profile id (e.g. theta-alpha)
    #[arg(long)]
    pub sweep: Option<String>,

    /// Tone waveform (sine, square, triangle, sawtooth)
    #[arg(long)]
    pub tone_waveform: Option<Waveform>,

    /// Light modulation waveform (sine, square, triangle, sawtooth)
    #[arg(long)]
    pub light_waveform: Option<Waveform>,

    /// Whisper sync mode (breath, walk, interval)
    #[arg(long)]
    pub sync: Option<SyncMode>,

    /// Constant target beat in Hz
    #[arg(long)]
    pub beat: Option<f64>,

    /// Left-ear tone frequency in Hz
    #[arg(long)]
    pub freq_left: Option<f64>,

    /// Right-ear tone frequency in Hz
    #[arg(long)]
    pub freq_right: Option<f64>,

    /// Replace the whisper phrases (repeatable)
    #[arg(long = "whisper")]
    pub whisper: Vec<String>,
}

/// Fully resolved session input.
#[derive(Debug, Clone)]
pub struct ResolvedSession {
    pub params: SessionParameters,
    pub profile: Option<&'static Profile>,
    pub subprofile: Option<&'static Subprofile>,
    pub source: SessionSource,
}

impl ResolvedSession {
    /// Profile display name, or "Custom".
    pub fn profile_name(&self) -> &'static str {
        self.profile.map(|p| p.name()).unwrap_or("Custom")
    }

    /// Subprofile display name, if any.
    pub fn subprofile_name(&self) -> Option<&'static str> {
        self.subprofile.map(|s| s.name)
    }

    /// Snapshot of the session as a preset.
    ///
    /// Parameters that did not come from the catalog are saved under the
    /// `custom` profile id.
    pub fn to_preset(&self, created_at: &str) -> Preset {
        match self.profile {
            Some(profile) => Preset::new(profile, self.subprofile, self.params.clone(), created_at),
            None => Preset {
                version: PRESET_VERSION.to_string(),
                name: "Custom".to_string(),
                created_at: created_at.to_string(),
                profile: "custom".to_string(),
                subprofile: None,
                sweep: self.params.sweep.clone(),
                params: self.params.clone(),
                visual: VisualSettings::default(),
            },
        }
    }

    /// Conventional audio file name, e.g. `entrain-theta-Meditation-AS-20min.wav`.
    pub fn audio_file_name(&self, extension: &str) -> String {
        let minutes = f64::from(self.params.duration) / 60.0;
        format!(
            "entrain-{}-{}{}-{}min.{}",
            self.profile_name().to_lowercase(),
            self.subprofile_name().unwrap_or("custom"),
            self.params.encoding.file_suffix(),
            minutes,
            extension
        )
    }
}

impl SessionArgs {
    /// Loads the source and applies overrides.
    pub fn resolve(&self) -> Result<ResolvedSession, SpecError> {
        let lang = Language::from_code_or_default(&self.lang);
        let mut resolved = self.resolve_source(lang)?;
        self.apply_overrides(&mut resolved.params)?;
        Ok(resolved)
    }

    fn resolve_source(&self, lang: Language) -> Result<ResolvedSession, SpecError> {
        if let Some(path) = &self.params {
            let json = std::fs::read_to_string(path)?;
            return Ok(ResolvedSession {
                params: SessionParameters::from_json(&json)?,
                profile: None,
                subprofile: None,
                source: SessionSource::ParamsFile(PathBuf::from(path)),
            });
        }

        if let Some(path) = &self.preset {
            let preset = Preset::load(Path::new(path))?;
            let profile = catalog::profile(&preset.profile).ok();
            let subprofile = match (profile, preset.subprofile.as_deref()) {
                (Some(p), Some(id)) => p.subprofile(id).ok(),
                _ => None,
            };
            return Ok(ResolvedSession {
                params: preset.session_params(),
                profile,
                subprofile,
                source: SessionSource::Preset(PathBuf::from(path)),
            });
        }

        let (profile, subprofile) = match (&self.profile, &self.subprofile) {
            (Some(profile_id), sub_id) => {
                let profile = catalog::profile(profile_id)?;
                let subprofile = match sub_id {
                    Some(id) => Some(profile.subprofile(id)?),
                    None => profile.default_subprofile(),
                };
                (profile, subprofile)
            }
            (None, Some(sub_id)) => {
                let (profile, subprofile) =
                    catalog::find_subprofile(sub_id).ok_or_else(|| {
                        SpecError::UnknownCatalogEntry {
                            kind: "subprofile",
                            name: sub_id.clone(),
                        }
                    })?;
                (profile, Some(subprofile))
            }
            (None, None) => {
                return Ok(ResolvedSession {
                    params: SessionParameters::default(),
                    profile: None,
                    subprofile: None,
                    source: SessionSource::Defaults,
                })
            }
        };

        let params = match subprofile {
            Some(sub) => SessionParameters::from_subprofile(sub, lang),
            None => SessionParameters::default(),
        };
        Ok(ResolvedSession {
            params,
            profile: Some(profile),
            subprofile,
            source: SessionSource::Profile,
        })
    }

    fn apply_overrides(&self, params: &mut SessionParameters) -> Result<(), SpecError> {
        if let Some(duration) = self.duration {
            params.duration = duration;
        }
        if let Some(fade) = self.fade {
            params.fade_time = fade;
        }
        if let Some(rate) = self.sample_rate {
            params.sample_rate = rate;
        }
        if let Some(encoding) = self.encoding {
            params.encoding = encoding;
        }
        if let Some(carrier) = self.carrier {
            params.carrier_freq = Some(carrier);
        }
        if let Some(level) = self.encoding_level {
            params.encoding_level_db = level;
        }
        if let Some(id) = &self.sweep {
            params.sweep = Some(sweep_preset(id)?.to_profile());
        }
        if let Some(waveform) = self.tone_waveform {
            params.tone_waveform = waveform;
        }
        if let Some(waveform) = self.light_waveform {
            params.light_waveform = waveform;
        }
        if let Some(sync) = self.sync {
            params.sync_mode = sync;
        }
        if let Some(beat) = self.beat {
            params.beat = beat;
        }
        if let Some(freq) = self.freq_left {
            params.freq_left = freq;
        }
        if let Some(freq) = self.freq_right {
            params.freq_right = freq;
        }
        if !self.whisper.is_empty() {
            params.whisper_text = self.whisper.clone();
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_no_source_gives_defaults() {
        let resolved = SessionArgs::default().resolve().unwrap();
        assert_eq!(resolved.source, SessionSource::Defaults);
        assert_eq!(resolved.params, SessionParameters::default());
        assert_eq!(resolved.profile_name(), "Custom");
    }

    #[test]
    fn test_profile_uses_default_subprofile() {
        let args = SessionArgs {
            profile: Some("theta".to_string()),
            lang: "en".to_string(),
            ..Default::default()
        };
        let resolved = args.resolve().unwrap();
        let theta = catalog::profile("theta").unwrap();
        let first = theta.default_subprofile().unwrap();

        assert_eq!(resolved.source, SessionSource::Profile);
        assert_eq!(resolved.subprofile.map(|s| s.id), Some(first.id));
        assert_eq!(
            resolved.params,
            SessionParameters::from_subprofile(first, Language::English)
        );
    }

    #[test]
    fn test_subprofile_alone_finds_its_profile() {
        let theta = catalog::profile("theta").unwrap();
        let sub = theta.subprofiles.last().unwrap();
        let args = SessionArgs {
            subprofile: Some(sub.id.to_string()),
            ..Default::default()
        };
        let resolved = args.resolve().unwrap();
        assert_eq!(resolved.profile.map(|p| p.id), Some("theta"));
        assert_eq!(resolved.subprofile.map(|s| s.id), Some(sub.id));
    }

    #[test]
    fn test_unknown_profile_is_an_error() {
        let args = SessionArgs {
            profile: Some("omega".to_string()),
            ..Default::default()
        };
        assert!(matches!(
            args.resolve(),
            Err(SpecError::UnknownCatalogEntry { kind: "profile", .. })
        ));
    }

    #[test]
    fn test_overrides_apply_after_source() {
        let args = SessionArgs {
            profile: Some("alpha".to_string()),
            duration: Some(90),
            encoding: Some(EncodingKind::DualChannel),
            sweep: Some("theta-alpha".to_string()),
            encoding_level: Some(-12.0),
            whisper: vec!["hello".to_string()],
            ..Default::default()
        };
        let resolved = args.resolve().unwrap();
        assert_eq!(resolved.params.duration, 90);
        assert_eq!(resolved.params.encoding, EncodingKind::DualChannel);
        assert_eq!(resolved.params.encoding_level_db, -12.0);
        assert_eq!(
            resolved.params.sweep,
            Some(sweep_preset("theta-alpha").unwrap().to_profile())
        );
        assert_eq!(resolved.params.whisper_text, vec!["hello".to_string()]);
    }

    #[test]
    fn test_params_file_source() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.json");
        let params = SessionParameters {
            duration: 42,
            ..Default::default()
        };
        std::fs::write(&path, params.to_json_pretty().unwrap()).unwrap();

        let args = SessionArgs {
            params: Some(path.to_string_lossy().into_owned()),
            ..Default::default()
        };
        let resolved = args.resolve().unwrap();
        assert_eq!(resolved.params, params);
        assert_eq!(resolved.source, SessionSource::ParamsFile(path));
    }

    #[test]
    fn test_preset_source_restores_catalog_entries() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("theta.entrain.json");
        let theta = catalog::profile("theta").unwrap();
        let sub = theta.default_subprofile().unwrap();
        let preset = Preset::for_subprofile(theta, sub, Language::French, "2026-01-01T00:00:00Z");
        preset.save(&path).unwrap();

        let args = SessionArgs {
            preset: Some(path.to_string_lossy().into_owned()),
            ..Default::default()
        };
        let resolved = args.resolve().unwrap();
        assert_eq!(resolved.params, preset.session_params());
        assert_eq!(resolved.profile.map(|p| p.id), Some("theta"));
        assert_eq!(resolved.subprofile.map(|s| s.id), Some(sub.id));
    }

    #[test]
    fn test_custom_preset_keeps_sweep() {
        let args = SessionArgs {
            sweep: Some("delta-theta".to_string()),
            ..Default::default()
        };
        let resolved = args.resolve().unwrap();
        let preset = resolved.to_preset("2026-01-01T00:00:00.000Z");
        assert_eq!(preset.profile, "custom");
        assert_eq!(preset.session_params(), resolved.params);

        let round_trip = Preset::from_json(&preset.to_json_pretty().unwrap()).unwrap();
        assert_eq!(round_trip, preset);
    }

    #[test]
    fn test_audio_file_name() {
        let resolved = ResolvedSession {
            params: SessionParameters {
                duration: 1200,
                encoding: EncodingKind::SixChannel,
                ..Default::default()
            },
            profile: None,
            subprofile: None,
            source: SessionSource::Defaults,
        };
        assert_eq!(
            resolved.audio_file_name("wav"),
            "entrain-custom-custom-SS-20min.wav"
        );
    }
}
