//! Input-file configuration for zonedb.
//!
//! Names the input tables and the directory they live in. Only the
//! planning-unit file and the costs file are mandatory; every other
//! entry may be omitted.
//!
//! ```toml
//! input_dir = "input"
//! pu_file = "pu.dat"
//! costs_file = "costs.dat"
//! species_file = "spec.dat"
//! puvspr_file = "puvspr.dat"
//! ```

use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};
use thiserror::Error as ThisError;

///
/// ConfigError
///

#[derive(Debug, ThisError)]
pub enum ConfigError {
    #[error("cannot read config '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("config entry '{field}' must name a file")]
    MissingFile { field: &'static str },
}

///
/// InputConfig
///

#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
#[serde(deny_unknown_fields)]
pub struct InputConfig {
    /// Directory every file name is resolved against; empty means cwd.
    #[serde(default)]
    pub input_dir: PathBuf,

    pub pu_file: String,
    pub costs_file: String,

    #[serde(default)]
    pub species_file: Option<String>,
    #[serde(default)]
    pub lock_file: Option<String>,
    #[serde(default)]
    pub zone_file: Option<String>,
    #[serde(default)]
    pub connection_file: Option<String>,
    #[serde(default)]
    pub puvspr_file: Option<String>,
}

impl InputConfig {
    /// Parse and validate a TOML document.
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(text)?;
        config.validate()?;

        Ok(config)
    }

    /// Read, parse and validate a TOML file. A relative `input_dir` is
    /// taken relative to the config file's own directory.
    pub fn from_path(path: &Path) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        let mut config = Self::from_toml_str(&text)?;

        if config.input_dir.is_relative()
            && let Some(parent) = path.parent()
        {
            config.input_dir = parent.join(&config.input_dir);
        }

        Ok(config)
    }

    /// Reject blank mandatory entries; blank optional entries count as absent.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.pu_file.trim().is_empty() {
            return Err(ConfigError::MissingFile { field: "pu_file" });
        }
        if self.costs_file.trim().is_empty() {
            return Err(ConfigError::MissingFile {
                field: "costs_file",
            });
        }

        Ok(())
    }

    /// Join a file name onto `input_dir`.
    #[must_use]
    pub fn resolve(&self, name: &str) -> PathBuf {
        self.input_dir.join(name)
    }

    #[must_use]
    pub fn pu_path(&self) -> PathBuf {
        self.resolve(&self.pu_file)
    }

    #[must_use]
    pub fn costs_path(&self) -> PathBuf {
        self.resolve(&self.costs_file)
    }

    #[must_use]
    pub fn species_path(&self) -> Option<PathBuf> {
        self.optional(self.species_file.as_deref())
    }

    #[must_use]
    pub fn lock_path(&self) -> Option<PathBuf> {
        self.optional(self.lock_file.as_deref())
    }

    #[must_use]
    pub fn zone_path(&self) -> Option<PathBuf> {
        self.optional(self.zone_file.as_deref())
    }

    #[must_use]
    pub fn connection_path(&self) -> Option<PathBuf> {
        self.optional(self.connection_file.as_deref())
    }

    #[must_use]
    pub fn puvspr_path(&self) -> Option<PathBuf> {
        self.optional(self.puvspr_file.as_deref())
    }

    fn optional(&self, name: Option<&str>) -> Option<PathBuf> {
        name.map(str::trim)
            .filter(|n| !n.is_empty())
            .map(|n| self.resolve(n))
    }
}
