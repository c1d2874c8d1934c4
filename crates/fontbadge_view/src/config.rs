//! Badge configuration file handling (`fontbadge.toml`)
//!
//! ```toml
//! [loader]
//! storage_dir = "/data/app/files"
//! slot_policy = "per-key"
//!
//! [debug]
//! enabled = true
//! density = 2.0
//! ```

use fontbadge_loader::{FontCache, LoaderConfig};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Top-level badge configuration
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct BadgeConfig {
    #[serde(default)]
    pub loader: LoaderConfig,
    #[serde(default)]
    pub debug: DebugConfig,
}

/// Draw-time indicator settings
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct DebugConfig {
    #[serde(default)]
    pub enabled: bool,
    /// Leg length of the corner triangle, in density-independent units
    #[serde(default = "default_indicator_width")]
    pub indicator_width: f32,
    /// Display density multiplier applied to the indicator
    #[serde(default = "default_density")]
    pub density: f32,
}

fn default_indicator_width() -> f32 {
    20.0
}

fn default_density() -> f32 {
    1.0
}

impl Default for DebugConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            indicator_width: default_indicator_width(),
            density: default_density(),
        }
    }
}

impl DebugConfig {
    /// Indicator leg length in pixels
    pub fn indicator_size(&self) -> f32 {
        self.indicator_width * self.density
    }
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
}

impl BadgeConfig {
    /// Load from a TOML file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    /// Install a process-wide font cache built from `[loader]`.
    ///
    /// Must run before the first badge renders; returns `false` if a cache
    /// was already in place.
    pub fn install_cache(&self) -> bool {
        let installed = FontCache::init_global(FontCache::new(self.loader.clone()));
        if !installed {
            tracing::warn!("font cache already initialized; [loader] settings ignored");
        }
        installed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fontbadge_loader::SlotPolicy;

    #[test]
    fn test_empty_config_uses_defaults() {
        let config = BadgeConfig::from_toml_str("").unwrap();
        assert_eq!(config, BadgeConfig::default());
        assert_eq!(config.debug.indicator_size(), 20.0);
        assert_eq!(config.loader.buffer_size, 10_000);
    }

    #[test]
    fn test_sections_override_defaults() {
        let config = BadgeConfig::from_toml_str(
            r#"
            [loader]
            storage_dir = "/tmp/badges"
            slot_policy = "per-key"

            [debug]
            enabled = true
            density = 2.0
            "#,
        )
        .unwrap();

        assert_eq!(config.loader.storage_dir, PathBuf::from("/tmp/badges"));
        assert_eq!(config.loader.slot_policy, SlotPolicy::PerKey);
        assert!(config.debug.enabled);
        assert_eq!(config.debug.indicator_size(), 40.0);
    }

    #[test]
    fn test_bad_toml_is_parse_error() {
        let err = BadgeConfig::from_toml_str("[debug\nenabled = ").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("fontbadge.toml");
        fs::write(&path, "[debug]\nindicator_width = 12.0\n").unwrap();

        let config = BadgeConfig::load(&path).unwrap();
        assert_eq!(config.debug.indicator_width, 12.0);

        let missing = BadgeConfig::load(&dir.path().join("nope.toml")).unwrap_err();
        assert!(matches!(missing, ConfigError::Read { .. }));
    }
}
