//! Loader configuration

use serde::Deserialize;
use std::path::PathBuf;

/// Read buffer used when streaming a font download to disk
pub const DEFAULT_BUFFER_SIZE: usize = 10_000;

/// How many fonts the cache holds
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SlotPolicy {
    /// One gate and one font for the whole process. The first font to load
    /// is served to every badge; later requests for a different source are
    /// no-ops. A local font that fails to load leaves the slot open.
    #[default]
    Single,
    /// One gate and one font per source, keyed by cache key (network) or path
    PerKey,
}

/// Loader settings (the `[loader]` table of `fontbadge.toml`)
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct LoaderConfig {
    /// Where downloaded fonts are written. Supplied by the host.
    #[serde(default = "default_storage_dir")]
    pub storage_dir: PathBuf,
    /// Root that `FontSource::Asset` paths are resolved against
    #[serde(default = "default_asset_root")]
    pub asset_root: PathBuf,
    #[serde(default)]
    pub slot_policy: SlotPolicy,
    #[serde(default = "default_buffer_size")]
    pub buffer_size: usize,
}

fn default_storage_dir() -> PathBuf {
    std::env::temp_dir().join("fontbadge")
}

fn default_asset_root() -> PathBuf {
    PathBuf::from("assets")
}

fn default_buffer_size() -> usize {
    DEFAULT_BUFFER_SIZE
}

impl Default for LoaderConfig {
    fn default() -> Self {
        Self {
            storage_dir: default_storage_dir(),
            asset_root: default_asset_root(),
            slot_policy: SlotPolicy::default(),
            buffer_size: default_buffer_size(),
        }
    }
}

impl LoaderConfig {
    pub fn with_storage_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.storage_dir = dir.into();
        self
    }

    pub fn with_asset_root(mut self, dir: impl Into<PathBuf>) -> Self {
        self.asset_root = dir.into();
        self
    }

    pub fn with_slot_policy(mut self, policy: SlotPolicy) -> Self {
        self.slot_policy = policy;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_fill_missing_fields() {
        let config: LoaderConfig = toml::from_str("slot_policy = \"per-key\"").unwrap();
        assert_eq!(config.slot_policy, SlotPolicy::PerKey);
        assert_eq!(config.buffer_size, DEFAULT_BUFFER_SIZE);
        assert_eq!(config.asset_root, PathBuf::from("assets"));
    }

    #[test]
    fn test_single_slot_is_default() {
        let config: LoaderConfig = toml::from_str("").unwrap();
        assert_eq!(config.slot_policy, SlotPolicy::Single);
    }
}
