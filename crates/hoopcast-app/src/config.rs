// Configuration loading and parsing (config/hoopcast.toml).

use chrono::{Datelike, NaiveDate};
use hoopcast_core::season::SeasonId;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::info;

pub const CONFIG_FILE: &str = "hoopcast.toml";

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config file not found: {path}")]
    FileNotFound { path: PathBuf },

    #[error("failed to parse config file {path}: {source}")]
    ParseError {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("validation error for field `{field}`: {message}")]
    ValidationError { field: String, message: String },

    #[error("failed to initialize config from defaults: {message}")]
    DefaultsCopyError { message: String },
}

// ---------------------------------------------------------------------------
// Assembled Config
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
pub struct Config {
    /// Directory relative paths in the config are resolved against.
    pub base_dir: PathBuf,
    /// Fixed season; `None` derives it from the run date.
    pub season: Option<SeasonId>,
    /// Year stamped onto injury dates; `None` uses the run date's year.
    pub injury_year: Option<i32>,
    pub injuries: InjuriesConfig,
    pub data: DataPaths,
}

impl Config {
    pub fn season_for(&self, today: NaiveDate) -> SeasonId {
        self.season
            .clone()
            .unwrap_or_else(|| SeasonId::for_date(today))
    }

    pub fn injury_year_for(&self, today: NaiveDate) -> i32 {
        self.injury_year.unwrap_or_else(|| today.year())
    }

    /// Resolve a configured path against `base_dir` (absolute paths pass through).
    pub fn resolve(&self, path: &str) -> PathBuf {
        self.base_dir.join(path)
    }
}

// ---------------------------------------------------------------------------
// hoopcast.toml structs
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Deserialize)]
struct ConfigFile {
    #[serde(default)]
    season: SeasonSection,
    injuries: InjuriesConfig,
    data: DataPaths,
}

#[derive(Debug, Clone, Default, Deserialize)]
struct SeasonSection {
    id: Option<String>,
    injury_year: Option<i32>,
}

/// Where the injury feed comes from. Exactly one of `path` / `url`.
#[derive(Debug, Clone, Deserialize)]
pub struct InjuriesConfig {
    pub path: Option<String>,
    pub url: Option<String>,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_timeout_secs() -> u64 {
    10
}

#[derive(Debug, Clone, Deserialize)]
pub struct DataPaths {
    pub rosters: String,
    pub season_stats: String,
}

// ---------------------------------------------------------------------------
// Loading logic
// ---------------------------------------------------------------------------

/// Load and validate `config/hoopcast.toml` relative to `base_dir`.
///
/// Does not copy defaults; see `load_config()`.
pub fn load_config_from(base_dir: &Path) -> Result<Config, ConfigError> {
    let path = base_dir.join("config").join(CONFIG_FILE);
    let text = read_file(&path)?;
    parse_config(&text, base_dir).map_err(|e| match e {
        ParseFailure::Toml(source) => ConfigError::ParseError { path, source },
        ParseFailure::Invalid(e) => e,
    })
}

enum ParseFailure {
    Toml(toml::de::Error),
    Invalid(ConfigError),
}

fn parse_config(text: &str, base_dir: &Path) -> Result<Config, ParseFailure> {
    let file: ConfigFile = toml::from_str(text).map_err(ParseFailure::Toml)?;

    let season = match file.season.id.as_deref() {
        Some(id) => Some(id.parse::<SeasonId>().map_err(|e| {
            ParseFailure::Invalid(ConfigError::ValidationError {
                field: "season.id".into(),
                message: e.to_string(),
            })
        })?),
        None => None,
    };

    let config = Config {
        base_dir: base_dir.to_path_buf(),
        season,
        injury_year: file.season.injury_year,
        injuries: file.injuries,
        data: file.data,
    };
    validate(&config).map_err(ParseFailure::Invalid)?;
    Ok(config)
}

/// Copy `defaults/hoopcast.toml` into `config/` unless a config file is
/// already there. Returns the path written, if any.
pub fn ensure_config_file(base_dir: &Path) -> Result<Option<PathBuf>, ConfigError> {
    let target = base_dir.join("config").join(CONFIG_FILE);
    if target.exists() {
        return Ok(None);
    }

    let default = base_dir.join("defaults").join(CONFIG_FILE);
    if !default.is_file() {
        return Err(ConfigError::DefaultsCopyError {
            message: format!(
                "no {CONFIG_FILE} under config/ or defaults/ in {}; \
                 run from the project root or pass --base-dir",
                base_dir.display()
            ),
        });
    }

    std::fs::create_dir_all(base_dir.join("config")).map_err(|e| {
        ConfigError::DefaultsCopyError {
            message: format!("failed to create config directory: {e}"),
        }
    })?;
    std::fs::copy(&default, &target).map_err(|e| ConfigError::DefaultsCopyError {
        message: format!("failed to copy {}: {e}", default.display()),
    })?;
    Ok(Some(target))
}

/// Load config relative to `base_dir`, copying defaults first.
pub fn load_config(base_dir: &Path) -> Result<Config, ConfigError> {
    if let Some(path) = ensure_config_file(base_dir)? {
        info!("Copied default config to {}", path.display());
    }
    load_config_from(base_dir)
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn read_file(path: &Path) -> Result<String, ConfigError> {
    std::fs::read_to_string(path).map_err(|_| ConfigError::FileNotFound {
        path: path.to_path_buf(),
    })
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

fn validate(config: &Config) -> Result<(), ConfigError> {
    let injuries = &config.injuries;
    match (&injuries.path, &injuries.url) {
        (Some(_), Some(_)) | (None, None) => {
            return Err(ConfigError::ValidationError {
                field: "injuries".into(),
                message: "set exactly one of `path` or `url`".into(),
            });
        }
        (Some(path), None) if path.trim().is_empty() => {
            return Err(ConfigError::ValidationError {
                field: "injuries.path".into(),
                message: "must not be empty".into(),
            });
        }
        (None, Some(url)) => {
            let parsed = reqwest::Url::parse(url).map_err(|e| ConfigError::ValidationError {
                field: "injuries.url".into(),
                message: format!("invalid URL: {e}"),
            })?;
            if !matches!(parsed.scheme(), "http" | "https") {
                return Err(ConfigError::ValidationError {
                    field: "injuries.url".into(),
                    message: format!("unsupported scheme `{}`", parsed.scheme()),
                });
            }
        }
        _ => {}
    }

    if injuries.timeout_secs == 0 {
        return Err(ConfigError::ValidationError {
            field: "injuries.timeout_secs".into(),
            message: "must be > 0".into(),
        });
    }

    let path_fields: &[(&str, &str)] = &[
        ("data.rosters", config.data.rosters.as_str()),
        ("data.season_stats", config.data.season_stats.as_str()),
    ];
    for (name, val) in path_fields {
        if val.trim().is_empty() {
            return Err(ConfigError::ValidationError {
                field: name.to_string(),
                message: "must not be empty".into(),
            });
        }
    }

    if let Some(year) = config.injury_year {
        if year <= 0 {
            return Err(ConfigError::ValidationError {
                field: "season.injury_year".into(),
                message: format!("must be > 0, got {year}"),
            });
        }
    }

    Ok(())
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------
