//! Application configuration loading for CLI defaults.

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use watchlink_core::{DEFAULT_LINK_BASE_URL, DEFAULT_TMDB_BASE_URL, LinkTemplate};

use crate::cli::Args;

pub const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 10;
pub const DEFAULT_READ_TIMEOUT_SECS: u64 = 30;

/// TOML-style file configuration for watchlink defaults.
#[derive(Debug, Clone, Default)]
pub struct FileConfig {
    /// TMDB v3 API key.
    pub api_key: Option<String>,
    /// Result language passed to TMDB (e.g. `it-IT`).
    pub language: Option<String>,
    /// Streaming site base URL.
    pub link_base_url: Option<String>,
    /// TMDB API base URL.
    pub api_base_url: Option<String>,
    /// HTTP connect timeout in seconds.
    pub connect_timeout_secs: Option<u64>,
    /// HTTP read timeout in seconds.
    pub read_timeout_secs: Option<u64>,
    /// Default verbosity mode.
    pub verbosity: Option<VerbositySetting>,
}

impl FileConfig {
    /// Validates config values against runtime and CLI constraints.
    pub fn validate(&self) -> Result<()> {
        validate_timeout_secs("connect_timeout_secs", self.connect_timeout_secs)?;
        validate_timeout_secs("read_timeout_secs", self.read_timeout_secs)?;
        if let Some(base) = self.link_base_url.as_deref() {
            LinkTemplate::new(base)
                .with_context(|| "Invalid config value for `link_base_url`".to_string())?;
        }
        if let Some(key) = self.api_key.as_deref()
            && key.trim().is_empty()
        {
            bail!("Invalid config value for `api_key`: must not be empty");
        }
        Ok(())
    }
}

fn validate_timeout_secs(field: &str, value: Option<u64>) -> Result<()> {
    let Some(value) = value else {
        return Ok(());
    };
    if !(1..=3600).contains(&value) {
        bail!("Invalid config value for `{field}`: {value}. Expected range: 1..=3600");
    }
    Ok(())
}

/// Supported config verbosity labels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VerbositySetting {
    Default,
    Verbose,
    Quiet,
    Debug,
}

impl VerbositySetting {
    /// Returns the stable string label for display output.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Default => "default",
            Self::Verbose => "verbose",
            Self::Quiet => "quiet",
            Self::Debug => "debug",
        }
    }

    /// Log filter used when neither the CLI nor `RUST_LOG` chose one.
    #[must_use]
    pub fn log_level(self) -> &'static str {
        match self {
            Self::Default => "warn",
            Self::Verbose => "info",
            Self::Quiet => "error",
            Self::Debug => "debug",
        }
    }
}

/// Loaded config metadata.
#[derive(Debug, Clone)]
pub struct LoadedConfig {
    /// Resolved config path if a base directory is known.
    pub path: Option<PathBuf>,
    /// Parsed file config when a config file exists and was valid.
    pub config: Option<FileConfig>,
    /// Indicates whether configuration was loaded from disk.
    pub loaded_from_file: bool,
}

/// Resolves default config path.
///
/// Priority:
/// 1. `$XDG_CONFIG_HOME/watchlink/config.toml`
/// 2. `$HOME/.config/watchlink/config.toml`
#[must_use]
pub fn resolve_default_config_path() -> Option<PathBuf> {
    if let Some(xdg_config_home) = env_var_non_empty_os("XDG_CONFIG_HOME") {
        return Some(
            PathBuf::from(xdg_config_home)
                .join("watchlink")
                .join("config.toml"),
        );
    }

    let home = env_var_non_empty_os("HOME")?;
    Some(
        PathBuf::from(home)
            .join(".config")
            .join("watchlink")
            .join("config.toml"),
    )
}

fn env_var_non_empty_os(name: &str) -> Option<std::ffi::OsString> {
    let value = env::var_os(name)?;
    if value.is_empty() { None } else { Some(value) }
}

/// Loads config from default path if present.
pub fn load_default_file_config() -> Result<LoadedConfig> {
    let path = resolve_default_config_path();
    let Some(path_ref) = path.as_deref() else {
        return Ok(LoadedConfig {
            path,
            config: None,
            loaded_from_file: false,
        });
    };

    if !path_ref.exists() {
        return Ok(LoadedConfig {
            path,
            config: None,
            loaded_from_file: false,
        });
    }

    let config = load_file_config(path_ref)?;
    Ok(LoadedConfig {
        path,
        config: Some(config),
        loaded_from_file: true,
    })
}

fn load_file_config(path: &Path) -> Result<FileConfig> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file '{}'", path.display()))?;
    parse_config_str(&raw)
        .with_context(|| format!("Failed to parse config file '{}'", path.display()))
}

fn parse_config_str(raw: &str) -> Result<FileConfig> {
    let mut cfg = FileConfig::default();
    for (line_index, raw_line) in raw.lines().enumerate() {
        let line_no = line_index + 1;
        let line = strip_inline_comment(raw_line).trim();
        if line.is_empty() {
            continue;
        }

        let Some((raw_key, raw_value)) = line.split_once('=') else {
            bail!("Invalid config syntax on line {line_no}: expected key = value");
        };

        let key = raw_key.trim();
        let value = raw_value.trim();

        match key {
            "api_key" | "language" | "link_base_url" | "api_base_url" => {
                let parsed = parse_string_literal(value)
                    .with_context(|| format!("Invalid `{key}` value on line {line_no}"))?;
                let slot = match key {
                    "api_key" => &mut cfg.api_key,
                    "language" => &mut cfg.language,
                    "link_base_url" => &mut cfg.link_base_url,
                    _ => &mut cfg.api_base_url,
                };
                *slot = Some(parsed);
            }
            "connect_timeout_secs" => {
                let parsed = parse_integer_u64(value)
                    .with_context(|| format!("Invalid `{key}` value on line {line_no}"))?;
                cfg.connect_timeout_secs = Some(parsed);
            }
            "read_timeout_secs" => {
                let parsed = parse_integer_u64(value)
                    .with_context(|| format!("Invalid `{key}` value on line {line_no}"))?;
                cfg.read_timeout_secs = Some(parsed);
            }
            "verbosity" => {
                let parsed = parse_string_literal(value)
                    .with_context(|| format!("Invalid `verbosity` value on line {line_no}"))?;
                cfg.verbosity = Some(parse_verbosity(&parsed).with_context(|| {
                    format!("Invalid `verbosity` value '{parsed}' on line {line_no}")
                })?);
            }
            unknown => {
                bail!("Unknown configuration key: '{unknown}' on line {line_no}");
            }
        }
    }
    cfg.validate()?;
    Ok(cfg)
}

fn strip_inline_comment(line: &str) -> &str {
    let mut in_string = false;
    for (index, ch) in line.char_indices() {
        match ch {
            '"' => in_string = !in_string,
            '#' if !in_string => return &line[..index],
            _ => {}
        }
    }
    line
}

fn parse_string_literal(raw_value: &str) -> Result<String> {
    if raw_value.len() < 2 || !raw_value.starts_with('"') || !raw_value.ends_with('"') {
        bail!("Expected double-quoted string");
    }
    Ok(raw_value[1..raw_value.len() - 1].to_string())
}

fn parse_integer_u64(raw_value: &str) -> Result<u64> {
    let token = raw_value.trim();
    if token.is_empty() {
        bail!("Expected integer value");
    }
    let value = token.parse::<i128>()?;
    if value < 0 {
        bail!("Expected non-negative integer");
    }
    u64::try_from(value).map_err(|_| anyhow::anyhow!("Integer value out of range for u64"))
}

fn parse_verbosity(value: &str) -> Result<VerbositySetting> {
    match value {
        "default" => Ok(VerbositySetting::Default),
        "verbose" => Ok(VerbositySetting::Verbose),
        "quiet" => Ok(VerbositySetting::Quiet),
        "debug" => Ok(VerbositySetting::Debug),
        other => bail!("Expected one of default, verbose, quiet, debug (got '{other}')"),
    }
}

/// Settings after merging CLI/env values over the config file and defaults.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EffectiveSettings {
    pub api_key: Option<String>,
    pub language: Option<String>,
    pub link_base_url: String,
    pub api_base_url: String,
    pub connect_timeout_secs: u64,
    pub read_timeout_secs: u64,
    pub verbosity: VerbositySetting,
}

/// Merges settings: CLI flag (or its env var) > config file > built-in default.
#[must_use]
pub fn resolve_settings(args: &Args, file: Option<&FileConfig>) -> EffectiveSettings {
    EffectiveSettings {
        api_key: non_empty(args.api_key.clone())
            .or_else(|| file.and_then(|f| f.api_key.clone())),
        language: non_empty(args.language.clone())
            .or_else(|| file.and_then(|f| f.language.clone())),
        link_base_url: non_empty(args.link_base_url.clone())
            .or_else(|| file.and_then(|f| f.link_base_url.clone()))
            .unwrap_or_else(|| DEFAULT_LINK_BASE_URL.to_string()),
        api_base_url: non_empty(args.api_base_url.clone())
            .or_else(|| file.and_then(|f| f.api_base_url.clone()))
            .unwrap_or_else(|| DEFAULT_TMDB_BASE_URL.to_string()),
        connect_timeout_secs: file
            .and_then(|f| f.connect_timeout_secs)
            .unwrap_or(DEFAULT_CONNECT_TIMEOUT_SECS),
        read_timeout_secs: file
            .and_then(|f| f.read_timeout_secs)
            .unwrap_or(DEFAULT_READ_TIMEOUT_SECS),
        verbosity: file
            .and_then(|f| f.verbosity)
            .unwrap_or(VerbositySetting::Default),
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

/// Masks a secret for display, keeping only the last four characters.
#[must_use]
pub fn mask_secret(secret: Option<&str>) -> String {
    match secret {
        None => "<not set>".to_string(),
        Some(value) => {
            let chars: Vec<char> = value.chars().collect();
            if chars.len() <= 8 {
                "****".to_string()
            } else {
                let tail: String = chars[chars.len() - 4..].iter().collect();
                format!("****{tail}")
            }
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use clap::Parser;

    use super::*;

    #[test]
    fn test_parse_config_full() {
        let cfg = parse_config_str(
            r#"
# watchlink defaults
api_key = "abc123"  # inline comment
language = "it-IT"
link_base_url = "https://mirror.example.org"
api_base_url = "http://127.0.0.1:9999/3"
connect_timeout_secs = 5
read_timeout_secs = 60
verbosity = "debug"
"#,
        )
        .unwrap();

        assert_eq!(cfg.api_key.as_deref(), Some("abc123"));
        assert_eq!(cfg.language.as_deref(), Some("it-IT"));
        assert_eq!(
            cfg.link_base_url.as_deref(),
            Some("https://mirror.example.org")
        );
        assert_eq!(cfg.api_base_url.as_deref(), Some("http://127.0.0.1:9999/3"));
        assert_eq!(cfg.connect_timeout_secs, Some(5));
        assert_eq!(cfg.read_timeout_secs, Some(60));
        assert_eq!(cfg.verbosity, Some(VerbositySetting::Debug));
    }

    #[test]
    fn test_parse_config_hash_inside_string_kept() {
        let cfg = parse_config_str("api_key = \"ab#cd\"\n").unwrap();
        assert_eq!(cfg.api_key.as_deref(), Some("ab#cd"));
    }

    #[test]
    fn test_parse_config_unknown_key_reports_line() {
        let err = parse_config_str("language = \"en-US\"\nconcurrency = 3\n").unwrap_err();
        let msg = format!("{err:#}");
        assert!(msg.contains("Unknown configuration key: 'concurrency'"), "{msg}");
        assert!(msg.contains("line 2"), "{msg}");
    }

    #[test]
    fn test_parse_config_missing_equals() {
        let err = parse_config_str("api_key\n").unwrap_err();
        assert!(err.to_string().contains("expected key = value"));
    }

    #[test]
    fn test_parse_config_unquoted_string_rejected() {
        let err = parse_config_str("api_key = abc\n").unwrap_err();
        assert!(format!("{err:#}").contains("double-quoted"));
    }

    #[test]
    fn test_parse_config_timeout_out_of_range() {
        let err = parse_config_str("read_timeout_secs = 0\n").unwrap_err();
        assert!(err.to_string().contains("1..=3600"));
        assert!(parse_config_str("connect_timeout_secs = -1\n").is_err());
    }

    #[test]
    fn test_parse_config_invalid_link_base_url() {
        let err = parse_config_str("link_base_url = \"vixsrc.to\"\n").unwrap_err();
        assert!(format!("{err:#}").contains("link_base_url"));
    }

    #[test]
    fn test_parse_config_invalid_verbosity() {
        let err = parse_config_str("verbosity = \"loud\"\n").unwrap_err();
        assert!(format!("{err:#}").contains("loud"));
    }

    #[test]
    fn test_parse_config_empty_api_key_rejected() {
        assert!(parse_config_str("api_key = \"  \"\n").is_err());
    }

    #[test]
    fn test_verbosity_log_levels() {
        assert_eq!(VerbositySetting::Default.log_level(), "warn");
        assert_eq!(VerbositySetting::Verbose.log_level(), "info");
        assert_eq!(VerbositySetting::Quiet.log_level(), "error");
        assert_eq!(VerbositySetting::Debug.log_level(), "debug");
    }

    #[test]
    fn test_resolve_settings_defaults() {
        let mut args = Args::try_parse_from(["watchlink", "movie", "Up"]).unwrap();
        args.api_key = None;
        args.api_base_url = None;
        let settings = resolve_settings(&args, None);
        assert_eq!(settings.api_key, None);
        assert_eq!(settings.link_base_url, DEFAULT_LINK_BASE_URL);
        assert_eq!(settings.api_base_url, DEFAULT_TMDB_BASE_URL);
        assert_eq!(settings.connect_timeout_secs, DEFAULT_CONNECT_TIMEOUT_SECS);
        assert_eq!(settings.read_timeout_secs, DEFAULT_READ_TIMEOUT_SECS);
        assert_eq!(settings.verbosity, VerbositySetting::Default);
    }

    #[test]
    fn test_resolve_settings_cli_overrides_file() {
        let mut args = Args::try_parse_from([
            "watchlink",
            "--link-base-url",
            "https://cli.example.org",
            "movie",
            "Up",
        ])
        .unwrap();
        args.api_key = Some("from-cli".to_string());
        let file = FileConfig {
            api_key: Some("from-file".to_string()),
            language: Some("it-IT".to_string()),
            link_base_url: Some("https://file.example.org".to_string()),
            read_timeout_secs: Some(90),
            ..FileConfig::default()
        };

        let settings = resolve_settings(&args, Some(&file));
        assert_eq!(settings.api_key.as_deref(), Some("from-cli"));
        assert_eq!(settings.language.as_deref(), Some("it-IT"));
        assert_eq!(settings.link_base_url, "https://cli.example.org");
        assert_eq!(settings.read_timeout_secs, 90);
    }

    #[test]
    fn test_resolve_settings_blank_cli_value_falls_back_to_file() {
        let mut args = Args::try_parse_from(["watchlink", "movie", "Up"]).unwrap();
        args.api_key = Some(String::new());
        let file = FileConfig {
            api_key: Some("from-file".to_string()),
            ..FileConfig::default()
        };
        let settings = resolve_settings(&args, Some(&file));
        assert_eq!(settings.api_key.as_deref(), Some("from-file"));
    }

    #[test]
    fn test_mask_secret() {
        assert_eq!(mask_secret(None), "<not set>");
        assert_eq!(mask_secret(Some("short")), "****");
        assert_eq!(mask_secret(Some("80157e25b43ede5b")), "****de5b");
    }
}
