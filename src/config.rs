//! Configuration loading and management
//!
//! Handles parsing of `.trk.toml` configuration files. The config carries
//! the storage location; there is no implicit process-wide tracker — every
//! manager is constructed from an explicit path.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::{Error, Result};

/// Name of the config file at the tracker root
pub const CONFIG_FILE: &str = ".trk.toml";

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Storage configuration
    #[serde(default)]
    pub storage: StorageConfig,
}

/// Storage-related configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Tracker data file, relative to the root unless absolute
    #[serde(default = "default_data_file")]
    pub file: PathBuf,
}

fn default_data_file() -> PathBuf {
    PathBuf::from(".trk/tasks.csv")
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            file: default_data_file(),
        }
    }
}

impl Config {
    /// Load a config file, failing on unreadable or invalid TOML.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load `.trk.toml` from a tracker root, falling back to defaults when
    /// the file is missing or unreadable.
    pub fn load_from_root(root: &Path) -> Self {
        let path = root.join(CONFIG_FILE);
        if !path.exists() {
            return Self::default();
        }
        match Self::load(&path) {
            Ok(config) => config,
            Err(err) => {
                warn!(path = %path.display(), %err, "ignoring invalid config");
                Self::default()
            }
        }
    }

    /// Write the config as pretty TOML.
    pub fn save(&self, path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    pub fn validate(&self) -> Result<()> {
        if self.storage.file.as_os_str().is_empty() {
            return Err(Error::InvalidConfig(
                "storage.file cannot be empty".to_string(),
            ));
        }
        Ok(())
    }

    /// Resolve the data file against a tracker root.
    pub fn data_file(&self, root: &Path) -> PathBuf {
        if self.storage.file.is_absolute() {
            self.storage.file.clone()
        } else {
            root.join(&self.storage.file)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn defaults_are_expected() {
        let config = Config::default();
        assert_eq!(config.storage.file, PathBuf::from(".trk/tasks.csv"));
    }

    #[test]
    fn load_from_root_defaults_when_missing() {
        let dir = tempfile::tempdir().expect("tempdir");
        let config = Config::load_from_root(dir.path());
        assert_eq!(config.storage.file, PathBuf::from(".trk/tasks.csv"));
    }

    #[test]
    fn load_parses_overrides() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join(CONFIG_FILE);
        fs::write(&path, "[storage]\nfile = \"data/tracker.csv\"\n").expect("write config");

        let config = Config::load_from_root(dir.path());
        assert_eq!(config.storage.file, PathBuf::from("data/tracker.csv"));
    }

    #[test]
    fn load_rejects_invalid_toml() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join(CONFIG_FILE);
        fs::write(&path, "this = [not valid").expect("write config");

        assert!(Config::load(&path).is_err());
    }

    #[test]
    fn load_rejects_empty_data_file() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join(CONFIG_FILE);
        fs::write(&path, "[storage]\nfile = \"\"\n").expect("write config");

        assert!(matches!(
            Config::load(&path),
            Err(Error::InvalidConfig(_))
        ));
    }

    #[test]
    fn data_file_resolves_against_the_root() {
        let config = Config::default();
        let resolved = config.data_file(Path::new("/work/project"));
        assert_eq!(resolved, PathBuf::from("/work/project/.trk/tasks.csv"));

        let mut absolute = Config::default();
        absolute.storage.file = PathBuf::from("/var/trk/tasks.csv");
        assert_eq!(
            absolute.data_file(Path::new("/work/project")),
            PathBuf::from("/var/trk/tasks.csv")
        );
    }

    #[test]
    fn save_round_trips() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join(CONFIG_FILE);

        let mut config = Config::default();
        config.storage.file = PathBuf::from("state/tasks.csv");
        config.save(&path).expect("save config");

        let reloaded = Config::load(&path).expect("reload config");
        assert_eq!(reloaded.storage.file, PathBuf::from("state/tasks.csv"));
    }
}
