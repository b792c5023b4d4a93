//! Entrain CLI - Command-line interface for offline entrainment sessions
//!
//! This binary provides commands for generating, validating, inspecting
//! and exporting binaural / isochronic sessions.

mod cli_args;

use clap::Parser;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

use cli_args::{Cli, Commands};
use entrain_cli::commands;
use entrain_cli::commands::generate::GenerateOptions;

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let result = match cli.command {
        Commands::Generate {
            session,
            output,
            seed,
            format,
            preset_out,
            basic_session,
            log,
            intention,
            json,
        } => commands::generate::run(
            &session,
            &GenerateOptions {
                output,
                seed,
                format: Commands::audio_format(&format),
                preset_out,
                basic_session,
                log,
                intention,
                json,
            },
        ),
        Commands::Inspect { input, json } => commands::inspect::run(&input, json),
        Commands::Profiles { json } => commands::profiles::run(json),
        Commands::Validate { input, json } => commands::validate::run(&input, json),
        Commands::Preset { session, output } => commands::preset::run(&session, output.as_deref()),
        Commands::Light {
            session,
            at,
            count,
            json,
        } => commands::light::run(&session, &at, count, json),
        Commands::Export { input, output } => commands::export::run(&input, output.as_deref()),
        #[cfg(feature = "playback")]
        Commands::Play {
            session,
            seed,
            offset,
        } => commands::play::run(&session, seed, offset),
    };

    match result {
        Ok(code) => code,
        Err(e) => {
            eprintln!("{}: {:#}", colored::Colorize::red("error"), e);
            ExitCode::from(commands::exit_code_for(&e))
        }
    }
}
