//! Stock content and data loaders for `adventure-core`.
//!
//! This crate houses ready-made content an adventure can pick from and
//! loaders for RON/TOML data files:
//! - Abilities (War Roar, Insult, Heal, Fireball)
//! - Modifiers (Poison, Burnt, Fire, War Roar and Insult buffs)
//! - Equipment (Sword, Sword and Shield, Leather Armor)
//! - Consumables (Health Potion)
//! - Game configuration (data-driven via TOML)
//! - Level curves and enemy templates (data-driven via RON)
//!
//! Everything here is built from the public `adventure-core` constructors, so
//! authors can copy any entry as a starting point for their own content.

pub mod catalog;

#[cfg(feature = "loaders")]
pub mod loaders;

#[cfg(feature = "loaders")]
pub use loaders::{
    ConfigLoader, ContentFactory, EnemyLoader, EnemyTemplate, LevelsLoader, LoadResult,
};
