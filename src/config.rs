use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;

use crate::error::{AppError, AppResult};

#[derive(Debug, Clone, Deserialize, PartialEq, Eq, Default)]
#[serde(default)]
pub struct Config {
    pub input: InputConfig,
    pub game: GameConfig,
    pub territories: TerritoryConfig,
    pub log: LogConfig,
}

#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct InputConfig {
    pub debounce_ms: u64,
    /// Upper bound on suggestions for a non-empty query. `0` keeps every match.
    pub max_suggestions: usize,
    pub placeholder: String,
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            debounce_ms: 200,
            max_suggestions: 0,
            placeholder: "Start typing a territory name...".to_string(),
        }
    }
}

impl InputConfig {
    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }

    pub fn suggestion_limit(&self) -> Option<usize> {
        (self.max_suggestions > 0).then_some(self.max_suggestions)
    }
}

#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct GameConfig {
    pub max_guesses: usize,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self { max_guesses: 6 }
    }
}

#[derive(Debug, Clone, Deserialize, PartialEq, Eq, Default)]
#[serde(default)]
pub struct TerritoryConfig {
    /// JSON array of territories, or a directory of `<name>.png` silhouettes.
    pub path: Option<PathBuf>,
}

#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct LogConfig {
    pub file: Option<PathBuf>,
    pub level: String,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            file: None,
            level: "info".to_string(),
        }
    }
}

impl Config {
    pub fn load() -> AppResult<Self> {
        let Some(path) = default_config_path() else {
            return Ok(Self::default());
        };
        Self::load_from_path(path)
    }

    pub fn load_from_path(path: impl AsRef<Path>) -> AppResult<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Ok(Self::default());
        }
        if !path.is_file() {
            return Err(AppError::invalid_argument(format!(
                "config path is not a regular file: {}",
                path.display()
            )));
        }

        let raw = fs::read_to_string(path).map_err(|source| {
            AppError::io_with_context(source, format!("failed to read config: {}", path.display()))
        })?;
        Self::parse(&raw).map_err(|err| match err {
            AppError::InvalidArgument(message) => AppError::invalid_argument(format!(
                "failed to parse config {}: {message}",
                path.display()
            )),
            other => other,
        })
    }

    pub fn parse(raw: &str) -> AppResult<Self> {
        let parsed = toml::from_str::<Self>(raw)
            .map_err(|source| AppError::invalid_argument(source.to_string()))?;
        Ok(parsed.sanitized())
    }

    pub fn sanitized(mut self) -> Self {
        self.input.debounce_ms = self.input.debounce_ms.max(1);
        self.game.max_guesses = self.game.max_guesses.max(1);
        if self.log.level.trim().is_empty() {
            self.log.level = LogConfig::default().level;
        }
        if self
            .territories
            .path
            .as_ref()
            .is_some_and(|path| path.as_os_str().is_empty())
        {
            self.territories.path = None;
        }
        self
    }
}

pub fn default_config_path() -> Option<PathBuf> {
    if let Some(explicit) = std::env::var_os("TGUESS_CONFIG_PATH")
        && !explicit.is_empty()
    {
        return Some(PathBuf::from(explicit));
    }

    if let Some(xdg) = std::env::var_os("XDG_CONFIG_HOME")
        && !xdg.is_empty()
    {
        return Some(PathBuf::from(xdg).join("tguess").join("config.toml"));
    }
    if let Some(home) = std::env::var_os("HOME")
        && !home.is_empty()
    {
        return Some(
            PathBuf::from(home)
                .join(".config")
                .join("tguess")
                .join("config.toml"),
        );
    }
    if let Some(appdata) = std::env::var_os("APPDATA")
        && !appdata.is_empty()
    {
        return Some(PathBuf::from(appdata).join("tguess").join("config.toml"));
    }
    None
}
