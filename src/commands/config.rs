//! Config command handlers: show effective configuration.

use anyhow::Result;

use crate::app_config::{LoadedConfig, mask_secret, resolve_settings};
use crate::cli::Args;

pub fn run_config_show_command(args: &Args, loaded_config: &LoadedConfig) -> Result<()> {
    let effective = resolve_settings(args, loaded_config.config.as_ref());

    let resolved_path = loaded_config.path.as_ref().map_or_else(
        || "<unresolved>".to_string(),
        |path| path.display().to_string(),
    );
    println!("config_path = {resolved_path}");
    println!(
        "config_file = {}",
        if loaded_config.loaded_from_file {
            "loaded"
        } else {
            "not found (using defaults)"
        }
    );
    println!("api_key = {}", mask_secret(effective.api_key.as_deref()));
    println!(
        "language = {}",
        effective.language.as_deref().unwrap_or("<api default>")
    );
    println!("api_base_url = {}", effective.api_base_url);
    println!("link_base_url = {}", effective.link_base_url);
    println!("connect_timeout_secs = {}", effective.connect_timeout_secs);
    println!("read_timeout_secs = {}", effective.read_timeout_secs);
    println!("verbosity = {}", effective.verbosity.as_str());

    Ok(())
}
