//! Content factory for loading an adventure's data directory.

use std::path::{Path, PathBuf};

use adventure_core::{Entity, ExperienceLevels, GameConfig};

use crate::loaders::{ConfigLoader, EnemyLoader, EnemyTemplate, LevelsLoader, LoadResult};

/// Content factory that loads all game content from a data directory.
///
/// # Directory Structure
///
/// ```text
/// data_dir/
/// ├── config.toml
/// ├── enemies.ron
/// └── levels/
///     ├── player.ron
///     └── boss.ron
/// ```
pub struct ContentFactory {
    data_dir: PathBuf,
}

impl ContentFactory {
    /// Creates a new content factory pointing to a data directory.
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    /// Load game configuration from `config.toml`.
    pub fn load_config(&self) -> LoadResult<GameConfig> {
        let path = self.data_dir.join("config.toml");
        ConfigLoader::load(&path)
    }

    /// Load the enemy catalog from `enemies.ron`.
    pub fn load_enemies(&self) -> LoadResult<Vec<(String, EnemyTemplate)>> {
        let path = self.data_dir.join("enemies.ron");
        EnemyLoader::load(&path)
    }

    /// Builds `count` fresh copies of the enemy with catalog id `id`.
    pub fn spawn(&self, id: &str, count: usize) -> LoadResult<Vec<Entity>> {
        let enemies = self.load_enemies()?;
        let (_, template) = enemies
            .iter()
            .find(|(candidate, _)| candidate == id)
            .ok_or_else(|| anyhow::anyhow!("No enemy '{}' in {}", id, self.data_dir.display()))?;
        (0..count).map(|_| template.build()).collect()
    }

    /// Load a level curve from `levels/{name}.ron`.
    pub fn load_levels(&self, name: &str) -> LoadResult<ExperienceLevels> {
        let path = self.data_dir.join("levels").join(format!("{}.ron", name));
        LevelsLoader::load(&path)
    }

    /// Returns the data directory path.
    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }
}
