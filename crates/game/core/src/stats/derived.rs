//! Base and derived stats.
//!
//! Base stats are the immutable-at-construction baseline stored on an entity.
//! Derived stats are what combat actually reads; they are NOT stored and are
//! recomputed from base + bonuses whenever needed.

use super::StatKind;
use super::bonus::BonusStack;

/// Baseline values an entity is created with.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct BaseStats {
    pub max_health: i32,
    pub damage: i32,
    pub defense: i32,
    pub max_energy: i32,
}

impl BaseStats {
    pub const fn new(max_health: i32, damage: i32, defense: i32, max_energy: i32) -> Self {
        Self {
            max_health,
            damage,
            defense,
            max_energy,
        }
    }

    /// Baseline for a specific stat. [`StatKind::None`] has no baseline.
    pub const fn get(&self, stat: StatKind) -> i32 {
        match stat {
            StatKind::None => 0,
            StatKind::Attack => self.damage,
            StatKind::Defense => self.defense,
            StatKind::MaxHealth => self.max_health,
            StatKind::MaxEnergy => self.max_energy,
        }
    }

    /// Mutable access to a stat baseline, used by level-up rewards.
    pub fn get_mut(&mut self, stat: StatKind) -> Option<&mut i32> {
        match stat {
            StatKind::None => None,
            StatKind::Attack => Some(&mut self.damage),
            StatKind::Defense => Some(&mut self.defense),
            StatKind::MaxHealth => Some(&mut self.max_health),
            StatKind::MaxEnergy => Some(&mut self.max_energy),
        }
    }
}

/// Derived combat statistics at a point in time.
///
/// A snapshot: create a new one after any mutation.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DerivedStats {
    pub attack: u32,
    pub defense: u32,
    pub max_health: u32,
    pub max_energy: u32,
}

impl DerivedStats {
    /// Compute every derived stat from a baseline and the live bonuses.
    pub fn compute(base: &BaseStats, bonuses: &BonusStack) -> Self {
        let derive = |stat| bonuses.apply(stat, base.get(stat));
        Self {
            attack: derive(StatKind::Attack),
            defense: derive(StatKind::Defense),
            max_health: derive(StatKind::MaxHealth),
            max_energy: derive(StatKind::MaxEnergy),
        }
    }

    pub const fn get(&self, stat: StatKind) -> u32 {
        match stat {
            StatKind::None => 0,
            StatKind::Attack => self.attack,
            StatKind::Defense => self.defense,
            StatKind::MaxHealth => self.max_health,
            StatKind::MaxEnergy => self.max_energy,
        }
    }
}
