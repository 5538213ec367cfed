//! Configuration file loading with precedence handling.

use crate::host::InsertMode;
use crate::model::LogLevel;
use crate::state::registry::DEFAULT_MAX_LENGTH;
use serde::Deserialize;
use std::path::PathBuf;
use thiserror::Error;
use tracing::warn;

/// Errors that can occur during config loading.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// Failed to read config file (permission issues, not a file, ...).
    #[error("Failed to read config file at {path}: {reason}")]
    ReadError {
        /// Path that failed to read.
        path: PathBuf,
        /// Reason for failure.
        reason: String,
    },

    /// Config file contains invalid TOML or unknown keys.
    #[error("Invalid TOML in {path}: {reason}")]
    ParseError {
        /// Path with invalid TOML.
        path: PathBuf,
        /// Parse error details.
        reason: String,
    },
}

/// TOML configuration file structure.
///
/// All fields are optional - if not specified, hardcoded defaults are used.
/// Corresponds to `~/.config/sourcelog/config.toml`.
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct ConfigFile {
    /// Entries kept per source. Must be positive.
    #[serde(default)]
    pub max_log_entries: Option<i64>,

    /// Flash the status indicator on unseen activity.
    #[serde(default)]
    pub flash: Option<bool>,

    /// Level threshold for newly created source logs.
    #[serde(default)]
    pub level: Option<LogLevel>,

    /// Where the log viewer opens relative to the focused document.
    #[serde(default)]
    pub viewer_placement: Option<InsertMode>,

    /// Path to log file for tracing output.
    #[serde(default)]
    pub log_file_path: Option<PathBuf>,
}

/// Settings the log core consumes, applied at startup and on reload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Settings {
    /// Shared per-source capacity.
    pub max_log_entries: usize,
    /// Whether the status indicator flashes.
    pub flash: bool,
    /// Level threshold for new sources.
    pub level: LogLevel,
    /// Where the viewer opens.
    pub placement: InsertMode,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            max_log_entries: DEFAULT_MAX_LENGTH,
            flash: false,
            level: LogLevel::Debug,
            placement: InsertMode::SplitBottom,
        }
    }
}

/// Resolved configuration after applying precedence rules.
///
/// Created by merging defaults, config file, env vars, and CLI args.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedConfig {
    /// Core settings.
    pub settings: Settings,
    /// Path to log file for tracing output.
    pub log_file_path: PathBuf,
}

impl Default for ResolvedConfig {
    fn default() -> Self {
        Self {
            settings: Settings::default(),
            log_file_path: default_log_path(),
        }
    }
}

/// Overrides coming from the command line. `None` leaves a value alone.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CliOverrides {
    /// `--max-log-entries`
    pub max_log_entries: Option<usize>,
    /// `--flash`
    pub flash: Option<bool>,
}

/// Resolve default log file path.
///
/// Returns `~/.local/state/sourcelog/sourcelog.log` on Unix-like systems,
/// or appropriate platform path on other systems.
///
/// If state directory cannot be determined, falls back to current directory.
pub fn default_log_path() -> PathBuf {
    if let Some(state_dir) = dirs::state_dir() {
        state_dir.join("sourcelog").join("sourcelog.log")
    } else {
        PathBuf::from("sourcelog.log")
    }
}

/// Load configuration file from a specific path.
///
/// Returns `Ok(None)` if file doesn't exist (not an error - use defaults).
///
/// # Errors
///
/// Returns error if file exists but has read or parse errors.
pub fn load_config_file(path: impl Into<PathBuf>) -> Result<Option<ConfigFile>, ConfigError> {
    let path = path.into();

    // Missing file is not an error - use defaults
    if !path.exists() {
        return Ok(None);
    }

    let contents = std::fs::read_to_string(&path).map_err(|e| ConfigError::ReadError {
        path: path.clone(),
        reason: e.to_string(),
    })?;

    let config: ConfigFile = toml::from_str(&contents).map_err(|e| ConfigError::ParseError {
        path: path.clone(),
        reason: e.to_string(),
    })?;

    Ok(Some(config))
}

/// Resolve default config file path.
///
/// Returns `~/.config/sourcelog/config.toml` on Unix, appropriate path on other platforms.
/// Returns `None` if home directory cannot be determined.
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("sourcelog").join("config.toml"))
}

/// Load configuration with precedence handling.
///
/// Precedence (highest to lowest):
/// 1. Explicit `config_path` argument (CLI `--config`)
/// 2. `SOURCELOG_CONFIG` environment variable
/// 3. Default path `~/.config/sourcelog/config.toml`
///
/// # Errors
///
/// Returns error only if a config file exists but cannot be read or parsed.
pub fn load_config_with_precedence(
    config_path: Option<PathBuf>,
) -> Result<Option<ConfigFile>, ConfigError> {
    if let Some(path) = config_path {
        return load_config_file(path);
    }

    if let Ok(env_path) = std::env::var("SOURCELOG_CONFIG") {
        return load_config_file(PathBuf::from(env_path));
    }

    if let Some(default_path) = default_config_path() {
        return load_config_file(default_path);
    }

    Ok(None)
}

/// Merge config file into defaults to create resolved config.
///
/// A non-positive `max_log_entries` is invalid and falls back to the default
/// with a warning.
pub fn merge_config(config_file: Option<ConfigFile>) -> ResolvedConfig {
    let defaults = ResolvedConfig::default();

    let Some(config) = config_file else {
        return defaults;
    };

    ResolvedConfig {
        settings: Settings {
            max_log_entries: config
                .max_log_entries
                .and_then(positive_capacity)
                .unwrap_or(defaults.settings.max_log_entries),
            flash: config.flash.unwrap_or(defaults.settings.flash),
            level: config.level.unwrap_or(defaults.settings.level),
            placement: config
                .viewer_placement
                .unwrap_or(defaults.settings.placement),
        },
        log_file_path: config.log_file_path.unwrap_or(defaults.log_file_path),
    }
}

/// Apply environment variable overrides to resolved config.
///
/// Checks for:
/// - `SOURCELOG_MAX_LOG_ENTRIES`: positive integer
/// - `SOURCELOG_FLASH`: `true`/`false`/`1`/`0`
///
/// Unparseable values are ignored with a warning.
pub fn apply_env_overrides(mut config: ResolvedConfig) -> ResolvedConfig {
    if let Ok(raw) = std::env::var("SOURCELOG_MAX_LOG_ENTRIES") {
        match raw.trim().parse::<i64>().ok().and_then(positive_capacity) {
            Some(n) => config.settings.max_log_entries = n,
            None => warn!(value = %raw, "Ignoring invalid SOURCELOG_MAX_LOG_ENTRIES"),
        }
    }

    if let Ok(raw) = std::env::var("SOURCELOG_FLASH") {
        match parse_bool(&raw) {
            Some(flash) => config.settings.flash = flash,
            None => warn!(value = %raw, "Ignoring invalid SOURCELOG_FLASH"),
        }
    }

    config
}

/// Apply CLI argument overrides to resolved config.
///
/// Precedence chain: Defaults → Config File → Env Vars → CLI Args (highest)
pub fn apply_cli_overrides(mut config: ResolvedConfig, overrides: CliOverrides) -> ResolvedConfig {
    if let Some(n) = overrides.max_log_entries.filter(|n| *n > 0) {
        config.settings.max_log_entries = n;
    }

    if let Some(flash) = overrides.flash {
        config.settings.flash = flash;
    }

    config
}

/// Run the full precedence chain.
///
/// # Errors
///
/// Propagates [`ConfigError`] from reading or parsing the file; callers
/// decide whether to keep previous values.
pub fn resolve(
    config_path: Option<PathBuf>,
    overrides: CliOverrides,
) -> Result<ResolvedConfig, ConfigError> {
    let config_file = load_config_with_precedence(config_path)?;
    let merged = merge_config(config_file);
    let with_env = apply_env_overrides(merged);
    Ok(apply_cli_overrides(with_env, overrides))
}

fn positive_capacity(n: i64) -> Option<usize> {
    if n > 0 {
        usize::try_from(n).ok()
    } else {
        warn!(max_log_entries = n, "max_log_entries must be positive, using default");
        None
    }
}

fn parse_bool(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
#[path = "loader_tests.rs"]
mod tests;
