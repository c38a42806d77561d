//! Enemy template loader.
//!
//! Templates reference stock content from [`crate::catalog`] by kind, so a
//! data file can give a goblin a sword or a shaman the Fireball spell without
//! any code.

use std::path::Path;

use adventure_core::{BaseStats, Entity, Equipment, Slot};
use tracing::debug;

use crate::catalog;
use crate::loaders::{LoadResult, read_file};

/// Data-file description of an enemy.
#[derive(Clone, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct EnemyTemplate {
    pub name: String,
    pub description: String,
    #[serde(default)]
    pub stats: BaseStats,
    #[serde(default)]
    pub experience_yield: u32,
    #[serde(default)]
    pub money: u64,
    /// Stock weapon kind.
    #[serde(default)]
    pub weapon: Option<String>,
    /// Stock armor kind.
    #[serde(default)]
    pub armor: Option<String>,
    /// Stock ability kinds.
    #[serde(default)]
    pub abilities: Vec<String>,
    /// Stock modifiers applied at spawn.
    #[serde(default)]
    pub modifiers: Vec<String>,
}

impl EnemyTemplate {
    /// Builds a fresh enemy at full health.
    pub fn build(&self) -> LoadResult<Entity> {
        let mut enemy = Entity::enemy(
            self.name.as_str(),
            self.description.as_str(),
            self.stats,
            self.experience_yield,
        )
        .with_money(self.money);

        if let Some(kind) = &self.weapon {
            enemy = enemy.with_weapon(self.gear(kind, Slot::Weapon)?);
        }
        if let Some(kind) = &self.armor {
            enemy = enemy.with_armor(self.gear(kind, Slot::Armor)?);
        }
        for kind in &self.abilities {
            let ability = catalog::ability(kind).ok_or_else(|| {
                anyhow::anyhow!("Unknown ability '{}' for enemy '{}'", kind, self.name)
            })?;
            enemy.add_ability(ability);
        }
        for kind in &self.modifiers {
            let modifier = catalog::modifier(kind).ok_or_else(|| {
                anyhow::anyhow!("Unknown modifier '{}' for enemy '{}'", kind, self.name)
            })?;
            enemy = enemy.with_modifier(modifier);
        }
        Ok(enemy)
    }

    fn gear(&self, kind: &str, slot: Slot) -> LoadResult<Equipment> {
        let piece = catalog::equipment(kind).ok_or_else(|| {
            anyhow::anyhow!("Unknown equipment '{}' for enemy '{}'", kind, self.name)
        })?;
        if piece.slot() != slot {
            anyhow::bail!(
                "Equipment '{}' for enemy '{}' is not a {} piece",
                kind,
                self.name,
                slot
            );
        }
        Ok(piece)
    }
}

/// Loader for enemy catalogs from RON files.
pub struct EnemyLoader;

impl EnemyLoader {
    /// Load an enemy catalog from a RON file.
    ///
    /// RON format: `Vec<(String, EnemyTemplate)>`. Every template is built
    /// once so dangling content references fail here rather than mid-game.
    pub fn load(path: &Path) -> LoadResult<Vec<(String, EnemyTemplate)>> {
        let content = read_file(path)?;
        let templates: Vec<(String, EnemyTemplate)> = ron::from_str(&content)
            .map_err(|e| anyhow::anyhow!("Failed to parse enemy catalog RON: {}", e))?;

        for (id, template) in &templates {
            template
                .build()
                .map_err(|e| anyhow::anyhow!("Invalid enemy '{}': {}", id, e))?;
        }
        debug!(target: "adventure::content", path = %path.display(), count = templates.len(), "enemies loaded");
        Ok(templates)
    }
}
