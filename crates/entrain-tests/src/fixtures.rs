//! Shared parameter builders and temporary session directories.

use std::fs;
use std::path::{Path, PathBuf};

use entrain_spec::{Preset, SessionParameters};
use tempfile::TempDir;

/// Short session with every layer audible, `duration` seconds long.
pub fn short_params(duration: u32) -> SessionParameters {
    SessionParameters {
        duration,
        fade_time: 1.0,
        whisper_text: vec!["je respire".to_string(), "je suis calme".to_string()],
        ..Default::default()
    }
}

/// A temporary directory holding session inputs and outputs.
pub struct SessionDir {
    pub root: TempDir,
}

impl SessionDir {
    /// Create a new empty directory.
    pub fn new() -> Self {
        Self {
            root: TempDir::new().expect("Failed to create temp dir"),
        }
    }

    /// Get the directory path.
    pub fn path(&self) -> &Path {
        self.root.path()
    }

    /// Path of `name` inside the directory, as a string for CLI arguments.
    pub fn file(&self, name: &str) -> String {
        self.root.path().join(name).to_string_lossy().into_owned()
    }

    /// Write a bare parameters file.
    pub fn add_params(&self, name: &str, params: &SessionParameters) -> PathBuf {
        let path = self.root.path().join(name);
        let json = params.to_json_pretty().expect("Failed to serialize params");
        fs::write(&path, json).expect("Failed to write params file");
        path
    }

    /// Write a preset file.
    pub fn add_preset(&self, name: &str, preset: &Preset) -> PathBuf {
        let path = self.root.path().join(name);
        preset.save(&path).expect("Failed to write preset file");
        path
    }
}

impl Default for SessionDir {
    fn default() -> Self {
        Self::new()
    }
}
