//! Game configuration loader.

use std::path::Path;

use adventure_core::GameConfig;
use tracing::debug;

use crate::loaders::{LoadResult, read_file};

/// Loader for game configuration from TOML files.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load config data from a TOML file.
    ///
    /// Missing keys fall back to [`GameConfig::default`].
    pub fn load(path: &Path) -> LoadResult<GameConfig> {
        let content = read_file(path)?;
        let config = Self::parse(&content)?;
        debug!(target: "adventure::content", path = %path.display(), ?config, "config loaded");
        Ok(config)
    }

    pub fn parse(content: &str) -> LoadResult<GameConfig> {
        toml::from_str(content).map_err(|e| anyhow::anyhow!("Failed to parse config TOML: {}", e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn partial_files_keep_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "minimum_damage = 2").unwrap();

        let config = ConfigLoader::load(file.path()).unwrap();
        assert_eq!(config.minimum_damage, 2);
        assert_eq!(config.default_repeat_limit, GameConfig::DEFAULT_REPEAT_LIMIT);
    }

    #[test]
    fn malformed_files_are_reported() {
        let error = ConfigLoader::parse("minimum_damage = \"lots\"").unwrap_err();
        assert!(error.to_string().starts_with("Failed to parse config TOML"));
    }

    #[test]
    fn missing_files_name_the_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        let error = ConfigLoader::load(&path).unwrap_err();
        assert!(error.to_string().contains("config.toml"));
    }
}
