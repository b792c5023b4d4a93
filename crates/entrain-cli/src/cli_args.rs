//! CLI argument definitions for the Entrain command-line interface.
//!
//! All `#[derive(Parser)]` and `#[derive(Subcommand)]` types are defined here,
//! keeping `main.rs` focused on dispatch logic.

use clap::{Parser, Subcommand};
use entrain_cli::commands::generate::AudioFormat;
use entrain_cli::input::SessionArgs;

/// Entrain - Offline binaural / isochronic session generator
#[derive(Parser)]
#[command(name = "entrain")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub(crate) struct Cli {
    /// Enable debug logging on stderr (overridden by RUST_LOG)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub(crate) enum Commands {
    /// Generate a session and write it as WAV or MP3
    Generate {
        #[command(flatten)]
        session: SessionArgs,

        /// Output audio path (default: conventional name in the current directory)
        #[arg(short, long)]
        output: Option<String>,

        /// Session seed (default: random, printed so the run can be replayed)
        #[arg(long)]
        seed: Option<u32>,

        /// Output format (wav, mp3)
        #[arg(long, default_value = "wav", value_parser = ["wav", "mp3"])]
        format: String,

        /// Also write a preset to this path
        #[arg(long)]
        preset_out: Option<String>,

        /// Also write a basic-session control file next to the audio
        #[arg(long)]
        basic_session: bool,

        /// Also write a session log next to the audio
        #[arg(long)]
        log: bool,

        /// Intention recorded in the session log
        #[arg(long, requires = "log")]
        intention: Option<String>,

        /// Output machine-readable JSON (no colored output)
        #[arg(long)]
        json: bool,
    },

    /// Read a WAV file back and print its format and PCM hash
    Inspect {
        /// Path to the WAV file
        #[arg(short, long)]
        input: String,

        /// Output machine-readable JSON (no colored output)
        #[arg(long)]
        json: bool,
    },

    /// List built-in profiles, subprofiles and sweeps
    Profiles {
        /// Output machine-readable JSON (no colored output)
        #[arg(long)]
        json: bool,
    },

    /// Validate a params/preset JSON file, or every .json file under a directory
    Validate {
        /// File or directory to validate
        #[arg(short, long)]
        input: String,

        /// Output machine-readable JSON (no colored output)
        #[arg(long)]
        json: bool,
    },

    /// Write a preset for a built-in profile
    Preset {
        #[command(flatten)]
        session: SessionArgs,

        /// Preset path (default: entrain-preset-<millis>.entrain.json)
        #[arg(short, long)]
        output: Option<String>,
    },

    /// Print light modulation and breath phase at given times
    Light {
        #[command(flatten)]
        session: SessionArgs,

        /// Times in seconds, comma separated (default: evenly spaced)
        #[arg(long, value_delimiter = ',')]
        at: Vec<f64>,

        /// Number of evenly spaced samples when --at is not given
        #[arg(long, default_value_t = 11)]
        count: usize,

        /// Output machine-readable JSON (no colored output)
        #[arg(long)]
        json: bool,
    },

    /// Re-encode a generated WAV file as MP3 (requires lame)
    Export {
        /// Path to the WAV file
        #[arg(short, long)]
        input: String,

        /// MP3 path (default: input with an .mp3 extension)
        #[arg(short, long)]
        output: Option<String>,
    },

    /// Generate a session and play it through the default output device
    #[cfg(feature = "playback")]
    Play {
        #[command(flatten)]
        session: SessionArgs,

        /// Session seed (default: random)
        #[arg(long)]
        seed: Option<u32>,

        /// Start position in seconds
        #[arg(long, default_value_t = 0.0)]
        offset: f64,
    },
}

impl Commands {
    /// Parses the already-validated `--format` value.
    pub(crate) fn audio_format(format: &str) -> AudioFormat {
        format.parse().unwrap_or_default()
    }
}
