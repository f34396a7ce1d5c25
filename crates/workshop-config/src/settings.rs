use std::env;
use std::fmt::Write as _;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{bail, Context, Result};
use chrono::format::{Item, StrftimeItems};
use serde::{Deserialize, Serialize};

/// Public programming-joke endpoint returning a one-element JSON array.
pub const DEFAULT_JOKE_ENDPOINT: &str =
    "https://official-joke-api.appspot.com/jokes/programming/random";

/// Message shown in place of a joke when a fetch fails for any reason.
pub const DEFAULT_FAILURE_MESSAGE: &str = "Failed to load joke. Check your internet connection!";

const DEFAULT_CLOCK_INTERVAL_MS: u64 = 1000;
const DEFAULT_LOG_LEVEL: &str = "info";
const CONFIG_ENV: &str = "WORKSHOP_CONFIG";

/// Top-level settings loaded from `config.toml`.
///
/// Every section and field is optional; anything missing falls back to the
/// defaults below.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct WorkshopConfig {
    pub clock: ClockSettings,
    pub joke: JokeSettings,
    pub log: LogSettings,
}

/// Clock refresh cadence and display pattern.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ClockSettings {
    pub interval_ms: u64,
    /// chrono strftime pattern. `None` selects the long ordinal form
    /// (`October 16th 2026, 3:04:05 pm`).
    pub format: Option<String>,
}

/// Joke endpoint and failure presentation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct JokeSettings {
    pub endpoint: String,
    pub failure_message: String,
    /// Request timeout. Requests wait indefinitely when unset.
    pub timeout_secs: Option<u64>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LogSettings {
    /// Default tracing filter, used when `WORKSHOP_LOG`/`RUST_LOG` are unset.
    pub level: String,
}

impl Default for ClockSettings {
    fn default() -> Self {
        Self {
            interval_ms: DEFAULT_CLOCK_INTERVAL_MS,
            format: None,
        }
    }
}

impl Default for JokeSettings {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_JOKE_ENDPOINT.to_string(),
            failure_message: DEFAULT_FAILURE_MESSAGE.to_string(),
            timeout_secs: None,
        }
    }
}

impl Default for LogSettings {
    fn default() -> Self {
        Self {
            level: DEFAULT_LOG_LEVEL.to_string(),
        }
    }
}

impl ClockSettings {
    pub fn interval(&self) -> Duration {
        Duration::from_millis(self.interval_ms)
    }
}

impl JokeSettings {
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }
}

impl WorkshopConfig {
    /// Parse and validate settings TOML.
    pub fn from_toml_str(input: &str) -> Result<Self> {
        let config: Self = toml::from_str(input).context("failed to parse workshop config TOML")?;
        config.validate()?;
        Ok(config)
    }

    /// Load settings from a file. A missing file yields the defaults.
    pub fn from_path(path: &Path) -> Result<Self> {
        let raw = match fs::read_to_string(path) {
            Ok(raw) => raw,
            Err(err) if err.kind() == ErrorKind::NotFound => return Ok(Self::default()),
            Err(err) => {
                return Err(err)
                    .with_context(|| format!("failed to read config at {}", path.display()))
            }
        };

        Self::from_toml_str(&raw).with_context(|| format!("invalid config at {}", path.display()))
    }

    /// Load settings from the discovered path (see [`config_path`]).
    pub fn load() -> Result<Self> {
        match config_path() {
            Some(path) => Self::from_path(&path),
            None => Ok(Self::default()),
        }
    }

    /// Validate required fields and semantic constraints.
    pub fn validate(&self) -> Result<()> {
        if self.clock.interval_ms == 0 {
            bail!("clock.interval_ms must be greater than zero");
        }
        if let Some(pattern) = &self.clock.format {
            validate_nonempty("clock.format", pattern)?;
            validate_strftime(pattern)?;
        }

        validate_nonempty("joke.endpoint", &self.joke.endpoint)?;
        validate_http_url("joke.endpoint", &self.joke.endpoint)?;
        validate_nonempty("joke.failure_message", &self.joke.failure_message)?;
        if self.joke.timeout_secs == Some(0) {
            bail!("joke.timeout_secs must be greater than zero when set");
        }

        validate_nonempty("log.level", &self.log.level)?;
        Ok(())
    }
}

/// Return the config file location.
///
/// Precedence: `WORKSHOP_CONFIG` env var > `<config_dir>/workshop/config.toml`.
pub fn config_path() -> Option<PathBuf> {
    if let Some(path) = env::var_os(CONFIG_ENV).filter(|p| !p.is_empty()) {
        return Some(PathBuf::from(path));
    }
    dirs::config_dir().map(|dir| dir.join("workshop").join("config.toml"))
}

fn validate_nonempty(field: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        bail!("{field} must not be empty")
    }
    Ok(())
}

fn validate_http_url(field: &str, value: &str) -> Result<()> {
    let rest = value
        .strip_prefix("https://")
        .or_else(|| value.strip_prefix("http://"));
    match rest {
        Some(host) if !host.is_empty() && !host.starts_with('/') => Ok(()),
        _ => bail!("{field} must be an http(s) URL: {value}"),
    }
}

/// Rejects patterns chrono cannot parse, and parse-only specifiers such as
/// `%#z` that fail when formatting.
fn validate_strftime(pattern: &str) -> Result<()> {
    if StrftimeItems::new(pattern).any(|item| matches!(item, Item::Error)) {
        bail!("clock.format is not a valid strftime pattern: {pattern}");
    }
    let mut sample = String::new();
    if write!(sample, "{}", chrono::Local::now().format(pattern)).is_err() {
        bail!("clock.format is not a valid strftime pattern: {pattern}");
    }
    Ok(())
}
