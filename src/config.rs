//! Configuration file handling
//!
//! The configuration file is a small TOML document pointing out the
//! location of the match database:
//!
//! ```toml
//! [general]
//! database = "/home/user/ranking_db.json"
//! ```
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Configuration file errors
#[derive(Debug)]
#[derive(thiserror::Error)]
pub enum ConfigError {
    /// The configuration directory could not be created
    #[error("Config directory error")]
    Dir(#[source] std::io::Error),

    /// The configuration file could not be read or written
    #[error("Config file error")]
    File(#[source] std::io::Error),

    /// The configuration file is not valid
    #[error("Config format error")]
    Format(#[source] toml::de::Error),

    /// The configuration could not be serialized
    #[error("Config serialization error")]
    Serialize(#[source] toml::ser::Error),
}

/// General settings (`[general]`)
#[derive(Clone, PartialEq, Eq, Hash, Debug)]
#[derive(Serialize, Deserialize)]
pub struct General {
    pub database: PathBuf,
}

/// A complete configuration file
#[derive(Clone, PartialEq, Eq, Hash, Debug)]
#[derive(Serialize, Deserialize)]
pub struct Config {
    pub general: General,
}

impl Config {
    /// Create a configuration pointing at the given database
    pub fn new(database: impl Into<PathBuf>) -> Self {
        Self {
            general: General {
                database: database.into(),
            },
        }
    }

    /// The platform-specific default configuration file path
    pub fn default_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("", "", "ranking")
            .map(|dirs| dirs.config_dir().join("config.toml"))
    }

    /// The default database path (`~/ranking_db.json`)
    pub fn default_database() -> Option<PathBuf> {
        directories::BaseDirs::new().map(|dirs| dirs.home_dir().join("ranking_db.json"))
    }

    /// Read the configuration file at `path`
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        log::debug!("Reading configuration from {}", path.display());
        let content = std::fs::read_to_string(path).map_err(ConfigError::File)?;
        toml::from_str(&content).map_err(ConfigError::Format)
    }

    /// Write this configuration to `path`, creating its directory if needed
    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        log::debug!("Writing configuration to {}", path.display());
        if let Some(dir) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(dir).map_err(ConfigError::Dir)?;
        }
        let content = toml::to_string(self).map_err(ConfigError::Serialize)?;
        std::fs::write(path, content).map_err(ConfigError::File)
    }

    /// The database path, as seen from a config file located at `path`
    ///
    /// Relative database paths are relative to the directory containing
    /// the configuration file.
    pub fn database(&self, path: &Path) -> PathBuf {
        match path.parent() {
            Some(dir) => dir.join(&self.general.database),
            None => self.general.database.clone(),
        }
    }
}
