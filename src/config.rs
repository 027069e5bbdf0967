use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;

/// Store settings, read from a TOML file:
///
/// ```toml
/// base_dir = "/var/lib/graphs"
/// metadata_file = ".store"
/// ```
#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct StoreConfig {
    /// Directory holding the metadata document and every graph file
    pub base_dir: PathBuf,
    /// Metadata document name, relative to `base_dir`
    pub metadata_file: PathBuf,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            base_dir: PathBuf::from("."),
            metadata_file: PathBuf::from(".store"),
        }
    }
}

impl StoreConfig {
    pub fn new(base_dir: impl Into<PathBuf>) -> StoreConfig {
        StoreConfig {
            base_dir: base_dir.into(),
            ..Default::default()
        }
    }

    pub fn from_toml_str(text: &str) -> Result<StoreConfig> {
        toml::from_str(text).context("unable to parse store config")
    }

    pub fn load(path: impl AsRef<Path>) -> Result<StoreConfig> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("unable to read store config {}", path.display()))?;
        Self::from_toml_str(&text)
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use anyhow::Result;
    use tempfile::tempdir;

    use super::StoreConfig;

    #[test]
    fn defaults_when_empty() -> Result<()> {
        let config = StoreConfig::from_toml_str("")?;
        assert_eq!(config, StoreConfig::default());
        assert_eq!(config.metadata_file, PathBuf::from(".store"));
        Ok(())
    }

    #[test]
    fn partial_override() -> Result<()> {
        let config = StoreConfig::from_toml_str(r#"base_dir = "/srv/graphs""#)?;
        assert_eq!(config.base_dir, PathBuf::from("/srv/graphs"));
        assert_eq!(config.metadata_file, PathBuf::from(".store"));
        Ok(())
    }

    #[test]
    fn load_from_file() -> Result<()> {
        let tmp_dir = tempdir()?;
        let path = tmp_dir.path().join("store.toml");
        std::fs::write(&path, "base_dir = \"data\"\nmetadata_file = \"graphs.json\"\n")?;
        let config = StoreConfig::load(&path)?;
        assert_eq!(config.base_dir, PathBuf::from("data"));
        assert_eq!(config.metadata_file, PathBuf::from("graphs.json"));
        Ok(())
    }

    #[test]
    fn rejects_wrong_types() {
        assert!(StoreConfig::from_toml_str("base_dir = 42").is_err());
        assert!(StoreConfig::load("/nonexistent/store.toml").is_err());
    }
}
