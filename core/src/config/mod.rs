//! Persisted configuration and its file-backed store.
//!
//! The whole configuration is written as one TOML document through `confy`:
//!
//! ```toml
//! version = 0
//! is_visible = true
//! debug_messages = false
//!
//! [presets]
//! enabled = true
//!
//! [presets.light_party]
//! only_in_duty = true
//! party_nameplate = "during_battle"
//! # ...
//!
//! [debug]
//! force_party_size = false
//! party_size = 0
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::context::DebugOverrides;
use crate::live::LiveSettingsSource;
use crate::presets::{LayerStore, seed_all};

const APP_NAME: &str = "clarity";
const CONFIG_NAME: &str = "config";

/// Current config format version. Reserved for migrations.
pub const CONFIG_VERSION: u32 = 0;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClarityConfig {
    pub version: u32,
    /// Whether the editor window is open.
    pub is_visible: bool,
    /// Raise log verbosity to debug.
    pub debug_messages: bool,
    pub presets: LayerStore,
    pub debug: DebugOverrides,
}

impl Default for ClarityConfig {
    fn default() -> Self {
        Self {
            version: CONFIG_VERSION,
            is_visible: true,
            debug_messages: false,
            presets: LayerStore::default(),
            debug: DebugOverrides::default(),
        }
    }
}

impl ClarityConfig {
    /// A new configuration whose layers all mirror the current live settings.
    pub fn fresh<S: LiveSettingsSource + ?Sized>(source: &S) -> Self {
        let mut config = Self::default();
        seed_all(&mut config.presets, source);
        config
    }
}

/// The "save now" capability required by the configurator.
pub trait Persistence {
    fn save_now(&mut self, config: &ClarityConfig) -> Result<(), ConfigError>;
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("could not determine config location: {0}")]
    Location(#[source] confy::ConfyError),

    #[error("failed to load config from {path:?}: {source}")]
    Load {
        path: PathBuf,
        source: confy::ConfyError,
    },

    #[error("failed to save config to {path:?}: {source}")]
    Save {
        path: PathBuf,
        source: confy::ConfyError,
    },
}

/// TOML configuration file on disk.
#[derive(Debug, Clone)]
pub struct ConfigFile {
    path: PathBuf,
}

impl ConfigFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// The platform config location, e.g. `~/.config/clarity/config.toml`.
    pub fn default_path() -> Result<PathBuf, ConfigError> {
        confy::get_configuration_file_path(APP_NAME, CONFIG_NAME).map_err(ConfigError::Location)
    }

    pub fn at_default_path() -> Result<Self, ConfigError> {
        Self::default_path().map(Self::new)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the stored configuration, or `None` when nothing has been saved yet.
    pub fn load(&self) -> Result<Option<ClarityConfig>, ConfigError> {
        if !self.path.exists() {
            return Ok(None);
        }

        let config: ClarityConfig =
            confy::load_path(&self.path).map_err(|source| ConfigError::Load {
                path: self.path.clone(),
                source,
            })?;

        if config.version != CONFIG_VERSION {
            tracing::warn!(
                found = config.version,
                expected = CONFIG_VERSION,
                "Config version mismatch, loading as-is"
            );
        }

        Ok(Some(config))
    }

    /// Load the stored configuration, seeding and saving a fresh one from
    /// `source` on first run.
    pub fn load_or_seed<S: LiveSettingsSource + ?Sized>(
        &mut self,
        source: &S,
    ) -> Result<ClarityConfig, ConfigError> {
        if let Some(config) = self.load()? {
            tracing::debug!(path = ?self.path, "Loaded config");
            return Ok(config);
        }

        tracing::info!(path = ?self.path, "No config found, seeding from live settings");
        let config = ClarityConfig::fresh(source);
        self.save_now(&config)?;
        Ok(config)
    }
}

impl Persistence for ConfigFile {
    fn save_now(&mut self, config: &ClarityConfig) -> Result<(), ConfigError> {
        confy::store_path(&self.path, config).map_err(|source| ConfigError::Save {
            path: self.path.clone(),
            source,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::live::{LiveOption, LiveSnapshot};
    use clarity_types::{GroupingSize, HighlightColor, Layer};

    #[test]
    fn test_missing_file_loads_as_none() {
        let dir = tempfile::tempdir().unwrap();
        let file = ConfigFile::new(dir.path().join("config.toml"));
        assert!(file.load().unwrap().is_none());
    }

    #[test]
    fn test_load_or_seed_creates_file_once() {
        let dir = tempfile::tempdir().unwrap();
        let mut file = ConfigFile::new(dir.path().join("config.toml"));

        let mut live = LiveSnapshot::new();
        live.set(LiveOption::HighlightSelf, 2);

        let seeded = file.load_or_seed(&live).unwrap();
        assert!(file.path().exists());
        for (_, layer) in seeded.presets.iter() {
            assert_eq!(layer.own_highlight, HighlightColor::Green);
        }

        // A second run must load, not reseed.
        live.set(LiveOption::HighlightSelf, 4);
        let loaded = file.load_or_seed(&live).unwrap();
        assert_eq!(loaded, seeded);
    }

    #[test]
    fn test_save_and_reload() {
        let dir = tempfile::tempdir().unwrap();
        let mut file = ConfigFile::new(dir.path().join("nested").join("config.toml"));

        let mut config = ClarityConfig::default();
        config.presets.enabled = false;
        config.debug.force_in_duty = true;
        *config.presets.layer_for_mut(GroupingSize::FullParty) = Layer {
            only_in_duty: true,
            others_highlight: HighlightColor::Red,
            ..Default::default()
        };

        file.save_now(&config).unwrap();
        assert_eq!(file.load().unwrap(), Some(config));
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(
            &path,
            r#"
is_visible = false

[presets.solo]
only_in_duty = true
"#,
        )
        .unwrap();

        let config = ConfigFile::new(&path).load().unwrap().unwrap();
        assert!(!config.is_visible);
        assert!(config.presets.enabled);
        assert!(config.presets.layer_for(GroupingSize::Solo).only_in_duty);
        assert_eq!(config.debug, DebugOverrides::default());
    }
}
