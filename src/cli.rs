//! CLI argument definitions using clap derive macros.

use clap::{Args as ClapArgs, Parser, Subcommand};

/// Look up a movie or TV show on TMDB and open its streaming link.
///
/// Run without a subcommand to be prompted for the kind, title, and (for
/// series) season and episode.
#[derive(Parser, Debug)]
#[command(name = "watchlink")]
#[command(author, version, about)]
#[command(
    after_help = "Exit codes:\n  0 = link opened or printed\n  1 = invalid input, configuration, network, or API error\n  2 = no search results"
)]
pub struct Args {
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Increase output verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Only print the link status line and errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Print the link instead of opening it
    #[arg(long, global = true)]
    pub no_open: bool,

    /// TMDB v3 API key
    #[arg(long, env = "TMDB_API_KEY", hide_env_values = true, global = true)]
    pub api_key: Option<String>,

    /// Result language passed to TMDB (e.g. it-IT)
    #[arg(long, global = true)]
    pub language: Option<String>,

    /// Streaming site base URL
    #[arg(long, global = true)]
    pub link_base_url: Option<String>,

    /// TMDB API base URL
    #[arg(long, env = "WATCHLINK_API_BASE_URL", hide = true, global = true)]
    pub api_base_url: Option<String>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Find a movie and open it
    Movie(MovieArgs),
    /// Find a series and open one episode
    Tv(TvArgs),
    /// Inspect configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(ClapArgs, Debug)]
pub struct MovieArgs {
    /// Movie title (multiple words are joined with spaces)
    #[arg(required = true, num_args = 1..)]
    pub title: Vec<String>,

    /// Narrow the search to a release year
    #[arg(short = 'y', long)]
    pub year: Option<u16>,
}

#[derive(ClapArgs, Debug)]
pub struct TvArgs {
    /// Series title (multiple words are joined with spaces)
    #[arg(required = true, num_args = 1..)]
    pub title: Vec<String>,

    /// Season number
    #[arg(short, long)]
    pub season: u32,

    /// Episode number
    #[arg(short, long)]
    pub episode: u32,

    /// Narrow the search to a first-air year
    #[arg(short = 'y', long)]
    pub year: Option<u16>,
}

#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Print the effective configuration
    Show,
}

/// Joins positional title words.
#[must_use]
pub fn join_title(words: &[String]) -> String {
    words.join(" ")
}
