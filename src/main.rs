//! CLI entry point for the watchlink tool.

use std::process::ExitCode;

use anyhow::Result;
use clap::Parser;
use tracing::debug;
use watchlink_core::{EpisodeRef, LookupRequest, MediaKind};

mod app_config;
mod cli;
mod commands;

use app_config::{VerbositySetting, load_default_file_config, resolve_settings};
use cli::{Args, Command, ConfigAction, join_title};
use commands::{run_config_show_command, run_interactive_command, run_lookup_command};

#[tokio::main]
async fn main() -> Result<ExitCode> {
    // Parse CLI arguments first (before tracing, so --help works without logs)
    let args = Args::parse();

    let loaded_config = load_default_file_config()?;
    let settings = resolve_settings(&args, loaded_config.config.as_ref());

    // Priority: RUST_LOG env var > quiet flag > verbose flag > config verbosity > warn
    let default_level = default_log_level(args.verbose, args.quiet, settings.verbosity);
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(filter)
        .init();

    debug!(
        command = ?args.command,
        config_loaded = loaded_config.loaded_from_file,
        "CLI arguments parsed"
    );

    let exit = match &args.command {
        Some(Command::Config {
            action: ConfigAction::Show,
        }) => {
            run_config_show_command(&args, &loaded_config)?;
            return Ok(ExitCode::SUCCESS);
        }
        Some(Command::Movie(movie)) => {
            let request = LookupRequest::new(
                MediaKind::Movie,
                &join_title(&movie.title),
                movie.year,
                None,
            )?;
            run_lookup_command(&request, &settings, args.no_open, args.quiet).await?
        }
        Some(Command::Tv(tv)) => {
            let request = LookupRequest::new(
                MediaKind::Tv,
                &join_title(&tv.title),
                tv.year,
                Some(EpisodeRef::new(tv.season, tv.episode)),
            )?;
            run_lookup_command(&request, &settings, args.no_open, args.quiet).await?
        }
        None => run_interactive_command(&settings, args.no_open, args.quiet).await?,
    };

    Ok(exit.exit_code())
}

fn default_log_level(verbose: u8, quiet: bool, configured: VerbositySetting) -> &'static str {
    if quiet {
        return "error";
    }
    match verbose {
        0 => configured.log_level(),
        1 => "debug",
        _ => "trace",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_log_level_quiet_wins() {
        assert_eq!(default_log_level(2, true, VerbositySetting::Debug), "error");
    }

    #[test]
    fn test_default_log_level_verbose_count() {
        assert_eq!(default_log_level(1, false, VerbositySetting::Default), "debug");
        assert_eq!(default_log_level(3, false, VerbositySetting::Default), "trace");
    }

    #[test]
    fn test_default_log_level_falls_back_to_config() {
        assert_eq!(default_log_level(0, false, VerbositySetting::Verbose), "info");
        assert_eq!(default_log_level(0, false, VerbositySetting::Quiet), "error");
        assert_eq!(default_log_level(0, false, VerbositySetting::Debug), "debug");
    }

    #[test]
    fn test_default_log_level_without_any_setting_is_warn() {
        assert_eq!(default_log_level(0, false, VerbositySetting::Default), "warn");
    }
}
