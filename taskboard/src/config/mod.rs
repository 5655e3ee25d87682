//! Configuration for embedding the board.
//!
//! Configuration is layered (highest first):
//! 1. TOML config file (`~/.config/taskboard/config.toml`, or an explicit path)
//! 2. Compiled defaults
//!
//! A missing default config file is not an error (defaults are used). An
//! explicit path that doesn't exist is an error.

use std::path::{Path, PathBuf};

use url::Url;

use crate::board::DEFAULT_STORAGE_KEY;
use crate::seed::{ConfiguredSeed, FileSeed, HttpSeed, NoSeed};
use crate::store::FileStore;

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Failed to read the configuration file.
    #[error("failed to read config file {path}: {source}")]
    ReadFile {
        /// Path that was attempted.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// Failed to parse the TOML configuration.
    #[error("failed to parse config file: {0}")]
    ParseToml(#[from] toml::de::Error),

    /// The configured seed URL is not a valid URL.
    #[error("invalid seed url {url}: {source}")]
    InvalidSeedUrl {
        /// The configured value.
        url: String,
        /// Parse failure.
        source: url::ParseError,
    },
}

// ---------------------------------------------------------------------------
// TOML file structs (all fields Option for partial overrides)
// ---------------------------------------------------------------------------

/// Top-level TOML config file structure.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
struct ConfigFile {
    storage: StorageFileConfig,
    seed: SeedFileConfig,
    log: LogFileConfig,
}

/// `[storage]` section of the config file.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
struct StorageFileConfig {
    dir: Option<PathBuf>,
    key: Option<String>,
}

/// `[seed]` section of the config file.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
struct SeedFileConfig {
    url: Option<String>,
    path: Option<PathBuf>,
}

/// `[log]` section of the config file.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
struct LogFileConfig {
    level: Option<String>,
    file: Option<PathBuf>,
}

// ---------------------------------------------------------------------------
// Resolved configuration
// ---------------------------------------------------------------------------

/// Fully resolved board configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoardConfig {
    /// Directory holding the persisted board.
    pub storage_dir: PathBuf,
    /// Key the board is persisted under.
    pub storage_key: String,
    /// URL to fetch the seed board from. Takes precedence over `seed_path`.
    pub seed_url: Option<Url>,
    /// Local JSON file to read the seed board from.
    pub seed_path: Option<PathBuf>,
    /// Log level filter (trace, debug, info, warn, error).
    pub log_level: String,
    /// Log file; `None` means `$TMPDIR/taskboard.log`.
    pub log_file: Option<PathBuf>,
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            storage_dir: default_storage_dir(),
            storage_key: DEFAULT_STORAGE_KEY.to_string(),
            seed_url: None,
            seed_path: None,
            log_level: "info".to_string(),
            log_file: None,
        }
    }
}

impl BoardConfig {
    /// Loads configuration from `explicit_path`, or from the default
    /// location when `None`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the explicit file cannot be read, the
    /// file is not valid TOML, or the seed URL does not parse.
    pub fn load(explicit_path: Option<&Path>) -> Result<Self, ConfigError> {
        let file = load_config_file(explicit_path)?;
        Self::resolve(file)
    }

    /// Parses configuration from TOML text.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the text is not valid TOML or the seed
    /// URL does not parse.
    pub fn from_toml(text: &str) -> Result<Self, ConfigError> {
        Self::resolve(toml::from_str(text)?)
    }

    /// Resolve a `BoardConfig` from a parsed config file. File > default.
    fn resolve(file: ConfigFile) -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let seed_url = file
            .seed
            .url
            .filter(|url| !url.is_empty())
            .map(|url| {
                Url::parse(&url).map_err(|source| ConfigError::InvalidSeedUrl { url, source })
            })
            .transpose()?;

        Ok(Self {
            storage_dir: file.storage.dir.unwrap_or(defaults.storage_dir),
            storage_key: file
                .storage
                .key
                .filter(|key| !key.is_empty())
                .unwrap_or(defaults.storage_key),
            seed_url,
            seed_path: file.seed.path,
            log_level: file.log.level.unwrap_or(defaults.log_level),
            log_file: file.log.file,
        })
    }

    /// Builds the configured seed source: the URL if set, else the file if
    /// set, else [`NoSeed`].
    #[must_use]
    pub fn seed(&self) -> ConfiguredSeed {
        if let Some(url) = &self.seed_url {
            ConfiguredSeed::Http(HttpSeed::new(url.clone()))
        } else if let Some(path) = &self.seed_path {
            ConfiguredSeed::File(FileSeed::new(path))
        } else {
            ConfiguredSeed::None(NoSeed)
        }
    }

    /// Builds the file store rooted at [`storage_dir`](Self::storage_dir).
    #[must_use]
    pub fn file_store(&self) -> FileStore {
        FileStore::new(&self.storage_dir)
    }
}

// ---------------------------------------------------------------------------
// Internal helpers
// ---------------------------------------------------------------------------

fn default_storage_dir() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(std::env::temp_dir)
        .join("taskboard")
}

/// Load and parse a TOML config file.
///
/// If `explicit_path` is `Some`, the file must exist (error if not).
/// If `explicit_path` is `None`, the default path is tried and missing file
/// is treated as empty config.
fn load_config_file(explicit_path: Option<&Path>) -> Result<ConfigFile, ConfigError> {
    if let Some(p) = explicit_path {
        let contents = std::fs::read_to_string(p).map_err(|e| ConfigError::ReadFile {
            path: p.to_path_buf(),
            source: e,
        })?;
        return Ok(toml::from_str(&contents)?);
    }

    let Some(config_dir) = dirs::config_dir() else {
        return Ok(ConfigFile::default());
    };
    let path = config_dir.join("taskboard").join("config.toml");

    match std::fs::read_to_string(&path) {
        Ok(contents) => Ok(toml::from_str(&contents)?),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(ConfigFile::default()),
        Err(e) => Err(ConfigError::ReadFile { path, source: e }),
    }
}
