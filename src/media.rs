//! Media kinds and validated lookup requests.
//!
//! A [`LookupRequest`] is the unit of work for one lookup: what kind of title
//! to search for, the title itself, and (for TV) which episode to open.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// Errors raised while turning user input into a [`LookupRequest`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InputError {
    /// The media kind was not one of the accepted labels.
    #[error("unrecognized media kind '{input}'\n  Suggestion: Enter 'F' or 'S'.")]
    UnknownKind {
        /// The raw kind label the user entered
        input: String,
    },

    /// The title was empty after trimming.
    #[error("title is empty\n  Suggestion: Enter the title to search for")]
    EmptyTitle,

    /// A TV lookup was missing its season/episode.
    #[error("season and episode are required for series\n  Suggestion: Pass --season and --episode")]
    MissingEpisode,

    /// A movie lookup carried a season/episode.
    #[error("season and episode only apply to series")]
    UnexpectedEpisode,

    /// A numeric field could not be parsed.
    #[error("invalid {field} '{input}': expected a non-negative whole number")]
    InvalidNumber {
        /// Which field failed ("season", "episode", "year")
        field: &'static str,
        /// The raw value the user entered
        input: String,
    },
}

/// The two kinds of title the search API distinguishes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MediaKind {
    /// A feature film.
    Movie,
    /// A TV series; links point at a single episode.
    Tv,
}

impl MediaKind {
    /// Parses a kind label.
    ///
    /// Accepts the single-letter form labels `F` (film) and `S` (series) as
    /// well as `movie`, `film`, `tv`, `series` and `serie`. Matching is
    /// case-insensitive and ignores surrounding whitespace.
    ///
    /// # Errors
    ///
    /// Returns [`InputError::UnknownKind`] for any other label.
    pub fn parse(input: &str) -> Result<Self, InputError> {
        match input.trim().to_ascii_lowercase().as_str() {
            "f" | "movie" | "film" => Ok(Self::Movie),
            "s" | "tv" | "series" | "serie" => Ok(Self::Tv),
            _ => Err(InputError::UnknownKind {
                input: input.trim().to_string(),
            }),
        }
    }

    /// Path segment of the search endpoint for this kind, relative to the API base.
    #[must_use]
    pub fn search_path(self) -> &'static str {
        match self {
            Self::Movie => "search/movie",
            Self::Tv => "search/tv",
        }
    }

    /// Query parameter used to narrow a search by year.
    #[must_use]
    pub fn year_param(self) -> &'static str {
        match self {
            Self::Movie => "year",
            Self::Tv => "first_air_date_year",
        }
    }

    /// Status line shown when the search returns no results.
    #[must_use]
    pub fn not_found_message(self) -> &'static str {
        match self {
            Self::Movie => "Movie not found.",
            Self::Tv => "Series not found.",
        }
    }

    /// Stable lowercase label.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Movie => "movie",
            Self::Tv => "tv",
        }
    }
}

impl fmt::Display for MediaKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MediaKind {
    type Err = InputError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

/// Season/episode coordinates of a TV episode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EpisodeRef {
    /// Season number (0 is used by TMDB for specials).
    pub season: u32,
    /// Episode number within the season.
    pub episode: u32,
}

impl EpisodeRef {
    /// Creates a new episode reference.
    #[must_use]
    pub fn new(season: u32, episode: u32) -> Self {
        Self { season, episode }
    }

    /// Parses season and episode from raw text fields.
    ///
    /// # Errors
    ///
    /// Returns [`InputError::InvalidNumber`] naming the first field that fails.
    pub fn parse(season: &str, episode: &str) -> Result<Self, InputError> {
        Ok(Self {
            season: parse_number("season", season)?,
            episode: parse_number("episode", episode)?,
        })
    }
}

pub(crate) fn parse_number<T: FromStr>(field: &'static str, raw: &str) -> Result<T, InputError> {
    let trimmed = raw.trim();
    trimmed.parse::<T>().map_err(|_| InputError::InvalidNumber {
        field,
        input: trimmed.to_string(),
    })
}

/// A validated request for one lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LookupRequest {
    kind: MediaKind,
    title: String,
    year: Option<u16>,
    episode: Option<EpisodeRef>,
}

impl LookupRequest {
    /// Creates a validated request.
    ///
    /// The title is trimmed. Series require an [`EpisodeRef`]; movies must not
    /// carry one.
    ///
    /// # Errors
    ///
    /// Returns [`InputError`] when the title is empty or the episode does not
    /// match the kind.
    pub fn new(
        kind: MediaKind,
        title: &str,
        year: Option<u16>,
        episode: Option<EpisodeRef>,
    ) -> Result<Self, InputError> {
        let title = title.trim();
        if title.is_empty() {
            return Err(InputError::EmptyTitle);
        }
        match (kind, episode) {
            (MediaKind::Tv, None) => return Err(InputError::MissingEpisode),
            (MediaKind::Movie, Some(_)) => return Err(InputError::UnexpectedEpisode),
            _ => {}
        }
        Ok(Self {
            kind,
            title: title.to_string(),
            year,
            episode,
        })
    }

    /// Shorthand for a movie request.
    ///
    /// # Errors
    ///
    /// Returns [`InputError::EmptyTitle`] when the title is blank.
    pub fn movie(title: &str) -> Result<Self, InputError> {
        Self::new(MediaKind::Movie, title, None, None)
    }

    /// Shorthand for a series episode request.
    ///
    /// # Errors
    ///
    /// Returns [`InputError::EmptyTitle`] when the title is blank.
    pub fn tv(title: &str, season: u32, episode: u32) -> Result<Self, InputError> {
        Self::new(
            MediaKind::Tv,
            title,
            None,
            Some(EpisodeRef::new(season, episode)),
        )
    }

    /// Returns a copy narrowed to the given release/first-air year.
    #[must_use]
    pub fn with_year(mut self, year: Option<u16>) -> Self {
        self.year = year;
        self
    }

    #[must_use]
    pub fn kind(&self) -> MediaKind {
        self.kind
    }

    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    #[must_use]
    pub fn year(&self) -> Option<u16> {
        self.year
    }

    #[must_use]
    pub fn episode(&self) -> Option<EpisodeRef> {
        self.episode
    }
}
