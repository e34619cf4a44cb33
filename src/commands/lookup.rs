//! Lookup command handlers: resolve a title and open its streaming link.

use std::io::{self, Cursor, IsTerminal, Read};
use std::process::ExitCode;

use anyhow::{Result, bail};
use tracing::debug;
use watchlink_core::interactive::prompt_request;
use watchlink_core::{
    DryRunOpener, LinkTemplate, LookupOutcome, LookupRequest, SystemOpener, TmdbClient,
    configure_search_http_timeouts, run_lookup,
};

use crate::app_config::EffectiveSettings;

/// Exit status of a lookup-style command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LookupExit {
    /// A link was opened or previewed, or there was nothing to do.
    Success,
    /// The search returned no results.
    NotFound,
}

impl LookupExit {
    #[must_use]
    pub fn exit_code(self) -> ExitCode {
        match self {
            Self::Success => ExitCode::SUCCESS,
            Self::NotFound => ExitCode::from(2),
        }
    }
}

impl From<&LookupOutcome> for LookupExit {
    fn from(outcome: &LookupOutcome) -> Self {
        if outcome.is_found() {
            Self::Success
        } else {
            Self::NotFound
        }
    }
}

pub async fn run_lookup_command(
    request: &LookupRequest,
    settings: &EffectiveSettings,
    no_open: bool,
    quiet: bool,
) -> Result<LookupExit> {
    let Some(api_key) = settings.api_key.as_deref() else {
        bail!(
            "What: No TMDB API key configured\nWhy: Title search needs a TMDB v3 API key\nFix: Pass --api-key, set TMDB_API_KEY, or add `api_key` to the config file."
        );
    };

    configure_search_http_timeouts(settings.connect_timeout_secs, settings.read_timeout_secs);
    let client = TmdbClient::with_base_url(api_key, settings.api_base_url.clone())?
        .with_language(settings.language.clone());
    let template = LinkTemplate::new(&settings.link_base_url)?;
    debug!(?client, link_base_url = template.base_url(), no_open, "Lookup configured");

    let outcome = if no_open {
        run_lookup(request, &client, &template, &DryRunOpener).await?
    } else {
        run_lookup(request, &client, &template, &SystemOpener).await?
    };

    if let Some(line) = found_line(&outcome, quiet) {
        println!("{line}");
    }
    println!("{}", outcome.status_line());

    Ok(LookupExit::from(&outcome))
}

/// Runs the prompt flow on stdin.
///
/// A terminal gets the prompts on stdout. Piped input is read as the answers,
/// one per line, without echoing prompts; empty piped input prints usage
/// guidance and succeeds.
pub async fn run_interactive_command(
    settings: &EffectiveSettings,
    no_open: bool,
    quiet: bool,
) -> Result<LookupExit> {
    let request = if io::stdin().is_terminal() {
        let mut input = io::stdin().lock();
        let mut output = io::stdout();
        prompt_request(&mut input, &mut output)?
    } else {
        let mut buffer = String::new();
        io::stdin().read_to_string(&mut buffer)?;
        if buffer.trim().is_empty() {
            print_quick_start();
            return Ok(LookupExit::Success);
        }
        prompt_request(&mut Cursor::new(buffer), &mut io::sink())?
    };

    run_lookup_command(&request, settings, no_open, quiet).await
}

/// The `Found:` line shown above the status line; quiet mode drops it.
fn found_line(outcome: &LookupOutcome, quiet: bool) -> Option<String> {
    if quiet {
        return None;
    }
    match outcome {
        LookupOutcome::Opened { title, .. } | LookupOutcome::Previewed { title, .. }
            if !title.is_empty() =>
        {
            Some(format!("Found: {title}"))
        }
        _ => None,
    }
}

fn print_quick_start() {
    println!("No input provided. Pass a subcommand or pipe the form answers via stdin.");
    println!("Example: watchlink movie \"Inception\"");
    println!("Example: watchlink tv \"Breaking Bad\" --season 1 --episode 2");
    println!("Example: printf 'F\\nInception\\n' | watchlink --no-open");
}
