//! Level curve loader.

use std::path::Path;

use adventure_core::{ExperienceLevels, Requirements};

use crate::loaders::{LoadResult, read_file};

/// Loader for experience requirement curves from RON files.
///
/// RON format: a [`Requirements`] value, for example
/// `explicit([10, 20, 40])` or `geometric(base: 10, modifier: 1.5, max_level: 20)`.
pub struct LevelsLoader;

impl LevelsLoader {
    pub fn load(path: &Path) -> LoadResult<ExperienceLevels> {
        let content = read_file(path)?;
        let requirements: Requirements = ron::from_str(&content)
            .map_err(|e| anyhow::anyhow!("Failed to parse level curve RON: {}", e))?;

        match &requirements {
            Requirements::Geometric { modifier, .. } if !(modifier.is_finite() && *modifier > 0.0) => {
                anyhow::bail!("Level curve modifier must be positive, got {}", modifier);
            }
            _ => {}
        }
        Ok(ExperienceLevels::new(requirements))
    }
}
