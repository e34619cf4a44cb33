//! CLI command handlers.

mod config;
mod lookup;

pub use config::run_config_show_command;
pub use lookup::{LookupExit, run_interactive_command, run_lookup_command};
