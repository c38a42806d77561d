//! Content loaders for reading game data from files.
//!
//! This module provides loaders that convert RON/TOML files into
//! `adventure-core` values. Formats are the serde representations of the core
//! types, so a file can be written by hand or dumped from code.

pub mod config;
pub mod enemies;
pub mod factory;
pub mod levels;

pub use config::ConfigLoader;
pub use enemies::{EnemyLoader, EnemyTemplate};
pub use factory::ContentFactory;
pub use levels::LevelsLoader;

use std::path::Path;

/// Common result type for loaders.
pub type LoadResult<T> = anyhow::Result<T>;

/// Helper function to read file contents.
pub(crate) fn read_file(path: &Path) -> LoadResult<String> {
    std::fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("Failed to read file {}: {}", path.display(), e))
}
