// Configuration loading and parsing (dashboard.toml).

use serde::Deserialize;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;
use tracing::info;

use crate::loader::is_remote;
use crate::projection::StatKey;

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

    #[error("could not create {path} from the shipped defaults: {source}")]
    SeedError {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// The one config file, under `config/` and shipped under `defaults/`.
const CONFIG_FILE: &str = "dashboard.toml";

// ---------------------------------------------------------------------------
// Top-level assembled Config
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
pub struct Config {
    /// Batter CSV. `None` means the built-in roster.
    pub batters_csv: Option<PathBuf>,
    /// Pitcher CSV source: an http(s) URL or a local path.
    pub pitcher_csv: String,
    pub fetch_timeout: Duration,
    /// Selection cap; `None` means unlimited.
    pub max_selected: Option<usize>,
    pub default_stat: StatKey,
}

// ---------------------------------------------------------------------------
// dashboard.toml structs
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Deserialize)]
struct DashboardFile {
    data: DataSection,
    #[serde(default)]
    fetch: FetchSection,
    #[serde(default)]
    selection: SelectionSection,
    #[serde(default)]
    charts: ChartsSection,
}

#[derive(Debug, Clone, Deserialize)]
struct DataSection {
    #[serde(default)]
    batters_csv: Option<String>,
    pitcher_csv: String,
}

#[derive(Debug, Clone, Deserialize)]
struct FetchSection {
    #[serde(default = "default_timeout_secs")]
    timeout_secs: u64,
}

impl Default for FetchSection {
    fn default() -> Self {
        FetchSection {
            timeout_secs: default_timeout_secs(),
        }
    }
}

fn default_timeout_secs() -> u64 {
    10
}

#[derive(Debug, Clone, Default, Deserialize)]
struct SelectionSection {
    /// 0 = unlimited.
    #[serde(default)]
    max_selected: usize,
}

#[derive(Debug, Clone, Deserialize)]
struct ChartsSection {
    #[serde(default = "default_stat_code")]
    default_stat: String,
}

impl Default for ChartsSection {
    fn default() -> Self {
        ChartsSection {
            default_stat: default_stat_code(),
        }
    }
}

fn default_stat_code() -> String {
    StatKey::default().code().to_string()
}

// ---------------------------------------------------------------------------
// Loading logic
// ---------------------------------------------------------------------------

/// Load and validate configuration from `config/dashboard.toml` relative to
/// `base_dir`. Relative data paths are resolved against `base_dir`.
///
/// This does not auto-copy defaults; `load_config()` does.
pub fn load_config_from(base_dir: &Path) -> Result<Config, ConfigError> {
    let path = base_dir.join("config").join(CONFIG_FILE);
    let text = read_file(&path)?;
    let file: DashboardFile = toml::from_str(&text).map_err(|e| ConfigError::ParseError {
        path: path.clone(),
        source: e,
    })?;

    validate(&file)?;

    let default_stat =
        file.charts
            .default_stat
            .parse::<StatKey>()
            .map_err(|message| ConfigError::ValidationError {
                field: "charts.default_stat".into(),
                message,
            })?;

    let batters_csv = file
        .data
        .batters_csv
        .filter(|p| !p.trim().is_empty())
        .map(|p| resolve(base_dir, p.trim()));

    let pitcher_csv = {
        let source = file.data.pitcher_csv.trim();
        if is_remote(source) {
            source.to_string()
        } else {
            resolve(base_dir, source).display().to_string()
        }
    };

    Ok(Config {
        batters_csv,
        pitcher_csv,
        fetch_timeout: Duration::from_secs(file.fetch.timeout_secs),
        max_selected: match file.selection.max_selected {
            0 => None,
            n => Some(n),
        },
        default_stat,
    })
}

/// Create `config/dashboard.toml` from `defaults/dashboard.toml` when it is
/// missing. Returns whether a copy was made; an existing file is never
/// touched.
pub fn ensure_dashboard_config(base_dir: &Path) -> Result<bool, ConfigError> {
    let target = base_dir.join("config").join(CONFIG_FILE);
    if target.exists() {
        return Ok(false);
    }

    let seed = base_dir.join("defaults").join(CONFIG_FILE);
    let contents = std::fs::read(&seed).map_err(|e| ConfigError::SeedError {
        path: target.clone(),
        source: e,
    })?;

    let seed_err = |e: std::io::Error| ConfigError::SeedError {
        path: target.clone(),
        source: e,
    };
    if let Some(dir) = target.parent() {
        std::fs::create_dir_all(dir).map_err(seed_err)?;
    }
    let mut dest = match std::fs::OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(&target)
    {
        Ok(file) => file,
        // Someone else created it between the check and the open.
        Err(e) if e.kind() == std::io::ErrorKind::AlreadyExists => return Ok(false),
        Err(e) => return Err(seed_err(e)),
    };
    dest.write_all(&contents).map_err(seed_err)?;

    info!("Created {} from {}", target.display(), seed.display());
    Ok(true)
}

/// Loads config relative to the current working directory, copying
/// defaults first.
pub fn load_config() -> Result<Config, ConfigError> {
    let cwd = std::env::current_dir().map_err(|_| ConfigError::FileNotFound {
        path: PathBuf::from("."),
    })?;
    ensure_dashboard_config(&cwd)?;
    load_config_from(&cwd)
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn read_file(path: &Path) -> Result<String, ConfigError> {
    std::fs::read_to_string(path).map_err(|_| ConfigError::FileNotFound {
        path: path.to_path_buf(),
    })
}

fn resolve(base_dir: &Path, path: &str) -> PathBuf {
    let p = Path::new(path);
    if p.is_absolute() {
        p.to_path_buf()
    } else {
        base_dir.join(p)
    }
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

fn validate(file: &DashboardFile) -> Result<(), ConfigError> {
    if file.data.pitcher_csv.trim().is_empty() {
        return Err(ConfigError::ValidationError {
            field: "data.pitcher_csv".into(),
            message: "must not be empty".into(),
        });
    }

    if file.fetch.timeout_secs == 0 {
        return Err(ConfigError::ValidationError {
            field: "fetch.timeout_secs".into(),
            message: "must be greater than 0".into(),
        });
    }

    Ok(())
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------
