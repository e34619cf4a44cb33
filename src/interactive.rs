//! Prompt-driven request entry.
//!
//! Asks for the same fields as a lookup form: kind, title, and for series the
//! season and episode. Reading and writing go through generic handles so the
//! flow can be driven from tests.

use std::io::{BufRead, Write};

use thiserror::Error;

use crate::media::{EpisodeRef, InputError, LookupRequest, MediaKind};

pub const KIND_PROMPT: &str = "Movie (F) or Series (S)? ";
pub const TITLE_PROMPT: &str = "Title: ";
pub const SEASON_PROMPT: &str = "Season: ";
pub const EPISODE_PROMPT: &str = "Episode: ";

/// Errors raised while prompting.
#[derive(Debug, Error)]
pub enum PromptError {
    #[error("failed to read input: {0}")]
    Io(#[from] std::io::Error),

    /// Input ended before every field was answered.
    #[error("input closed before the form was complete")]
    Closed,

    #[error(transparent)]
    Input(#[from] InputError),
}

/// Prompts for a full lookup request.
///
/// # Errors
///
/// Returns [`PromptError::Input`] for an unknown kind, a blank title, or a
/// non-numeric season/episode; [`PromptError::Closed`] on early end of input.
pub fn prompt_request<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
) -> Result<LookupRequest, PromptError> {
    let kind = MediaKind::parse(&ask(input, output, KIND_PROMPT)?)?;
    let title = ask(input, output, TITLE_PROMPT)?;

    let episode = match kind {
        MediaKind::Movie => None,
        MediaKind::Tv => {
            let season = ask(input, output, SEASON_PROMPT)?;
            let episode = ask(input, output, EPISODE_PROMPT)?;
            Some(EpisodeRef::parse(&season, &episode)?)
        }
    };

    Ok(LookupRequest::new(kind, &title, None, episode)?)
}

fn ask<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
    prompt: &str,
) -> Result<String, PromptError> {
    output.write_all(prompt.as_bytes())?;
    output.flush()?;

    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Err(PromptError::Closed);
    }
    Ok(line.trim().to_string())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::io::Cursor;

    use super::*;

    fn run(script: &str) -> (Result<LookupRequest, PromptError>, String) {
        let mut input = Cursor::new(script.as_bytes().to_vec());
        let mut output = Vec::new();
        let result = prompt_request(&mut input, &mut output);
        (result, String::from_utf8(output).unwrap())
    }

    #[test]
    fn test_movie_form_skips_episode_prompts() {
        let (result, transcript) = run("F\nInception\n");
        let request = result.unwrap();
        assert_eq!(request.kind(), MediaKind::Movie);
        assert_eq!(request.title(), "Inception");
        assert_eq!(transcript, format!("{KIND_PROMPT}{TITLE_PROMPT}"));
    }

    #[test]
    fn test_series_form_reads_season_and_episode() {
        let (result, transcript) = run("s\n  Breaking Bad  \n1\n2\n");
        let request = result.unwrap();
        assert_eq!(request.kind(), MediaKind::Tv);
        assert_eq!(request.title(), "Breaking Bad");
        assert_eq!(request.episode(), Some(EpisodeRef::new(1, 2)));
        assert!(transcript.ends_with(EPISODE_PROMPT));
    }

    #[test]
    fn test_unknown_kind_rejected_before_title() {
        let (result, transcript) = run("x\nInception\n");
        let err = result.unwrap_err();
        assert!(matches!(
            err,
            PromptError::Input(InputError::UnknownKind { .. })
        ));
        assert!(err.to_string().contains("Enter 'F' or 'S'."));
        assert_eq!(transcript, KIND_PROMPT);
    }

    #[test]
    fn test_blank_title_rejected() {
        let (result, _) = run("F\n   \n");
        assert!(matches!(
            result.unwrap_err(),
            PromptError::Input(InputError::EmptyTitle)
        ));
    }

    #[test]
    fn test_non_numeric_episode_rejected() {
        let (result, _) = run("S\nDark\n1\nfirst\n");
        assert!(matches!(
            result.unwrap_err(),
            PromptError::Input(InputError::InvalidNumber { field: "episode", .. })
        ));
    }

    #[test]
    fn test_early_eof_reports_closed() {
        let (result, _) = run("S\nDark\n");
        assert!(matches!(result.unwrap_err(), PromptError::Closed));
    }

    #[test]
    fn test_windows_line_endings_trimmed() {
        let (result, _) = run("f\r\nUp\r\n");
        assert_eq!(result.unwrap().title(), "Up");
    }
}
