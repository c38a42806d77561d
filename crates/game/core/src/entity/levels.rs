//! Experience banking and level-ups.
//!
//! [`ExperienceLevels`] holds the requirement table and the banked
//! experience. Rewards need the owning entity and the session, so the actual
//! level-up loop lives in [`Entity::gain_experience`]; this type only answers
//! "is another level due" one step at a time via [`ExperienceLevels::try_level_up`].

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use crate::entity::Entity;
use crate::error::Flow;
use crate::session::Session;

/// Reward run when `entity` reaches `level`.
pub type LevelRewardFn = Arc<dyn Fn(&mut Entity, u32, &mut Session) -> Flow + Send + Sync>;

/// How per-level requirements are produced.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Requirements {
    /// `table[n]` is the experience needed to go from level `n` to `n + 1`.
    /// The maximum level is the table length.
    Explicit(Vec<u32>),
    /// `round(base × modifierⁿ)` for levels `0..max_level`.
    Geometric { base: u32, modifier: f64, max_level: u32 },
}

impl Requirements {
    pub fn max_level(&self) -> u32 {
        match self {
            Self::Explicit(table) => u32::try_from(table.len()).unwrap_or(u32::MAX),
            Self::Geometric { max_level, .. } => *max_level,
        }
    }

    /// Requirement at `level`, `None` at or beyond the maximum level.
    pub fn at(&self, level: u32) -> Option<u32> {
        if level >= self.max_level() {
            return None;
        }
        match self {
            Self::Explicit(table) => table.get(level as usize).copied(),
            Self::Geometric { base, modifier, .. } => {
                let exponent = i32::try_from(level).unwrap_or(i32::MAX);
                let value = f64::from(*base) * modifier.powi(exponent);
                Some(value.round().clamp(0.0, f64::from(u32::MAX)) as u32)
            }
        }
    }
}

#[derive(Clone)]
pub struct ExperienceLevels {
    requirements: Requirements,
    overrides: BTreeMap<u32, u32>,
    level: u32,
    experience: u32,
    default_reward: Option<LevelRewardFn>,
    rewards: BTreeMap<u32, LevelRewardFn>,
}

impl ExperienceLevels {
    pub fn new(requirements: Requirements) -> Self {
        Self {
            requirements,
            overrides: BTreeMap::new(),
            level: 0,
            experience: 0,
            default_reward: None,
            rewards: BTreeMap::new(),
        }
    }

    pub fn explicit(table: impl Into<Vec<u32>>) -> Self {
        Self::new(Requirements::Explicit(table.into()))
    }

    pub fn geometric(base: u32, modifier: f64, max_level: u32) -> Self {
        Self::new(Requirements::Geometric {
            base,
            modifier,
            max_level,
        })
    }

    /// Levels that never progress. Experience is still banked.
    pub fn disabled() -> Self {
        Self::explicit(Vec::new())
    }

    /// Replaces the requirement for a single level.
    pub fn with_requirement(mut self, level: u32, requirement: u32) -> Self {
        self.overrides.insert(level, requirement);
        self
    }

    /// Reward used for every level without a specific override. Without one
    /// a level-up only posts a notice.
    pub fn with_reward<F>(mut self, reward: F) -> Self
    where
        F: Fn(&mut Entity, u32, &mut Session) -> Flow + Send + Sync + 'static,
    {
        self.default_reward = Some(Arc::new(reward));
        self
    }

    /// Reward for reaching exactly `level`.
    pub fn with_level_reward<F>(mut self, level: u32, reward: F) -> Self
    where
        F: Fn(&mut Entity, u32, &mut Session) -> Flow + Send + Sync + 'static,
    {
        self.rewards.insert(level, Arc::new(reward));
        self
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn max_level(&self) -> u32 {
        self.requirements.max_level()
    }

    pub fn is_max_level(&self) -> bool {
        self.level >= self.max_level()
    }

    /// Banked experience toward the next level.
    pub fn experience(&self) -> u32 {
        self.experience
    }

    /// Requirement to leave `level`. `None` means unreachable (max level).
    pub fn requirement_at(&self, level: u32) -> Option<u32> {
        if level >= self.max_level() {
            return None;
        }
        self.overrides
            .get(&level)
            .copied()
            .or_else(|| self.requirements.at(level))
    }

    /// Requirement to leave the current level.
    pub fn requirement(&self) -> Option<u32> {
        self.requirement_at(self.level)
    }

    /// Experience still missing for the next level.
    pub fn remaining(&self) -> Option<u32> {
        self.requirement()
            .map(|requirement| requirement.saturating_sub(self.experience))
    }

    /// Adds `delta` to the bank. The bank never drops below zero.
    pub(crate) fn bank(&mut self, delta: i64) {
        let banked = i64::from(self.experience).saturating_add(delta);
        self.experience = banked.clamp(0, i64::from(u32::MAX)) as u32;
    }

    /// Performs at most one level-up, returning the new level.
    ///
    /// Each call reads the requirement of the level reached by the previous
    /// call, so repeated calls walk the table strictly in order.
    pub(crate) fn try_level_up(&mut self) -> Option<u32> {
        let requirement = self.requirement()?;
        if self.experience < requirement {
            return None;
        }
        self.experience -= requirement;
        self.level += 1;
        Some(self.level)
    }

    pub(crate) fn reward_for(&self, level: u32) -> Option<LevelRewardFn> {
        self.rewards
            .get(&level)
            .or(self.default_reward.as_ref())
            .cloned()
    }
}

impl Default for ExperienceLevels {
    fn default() -> Self {
        Self::disabled()
    }
}

impl fmt::Debug for ExperienceLevels {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ExperienceLevels")
            .field("level", &self.level)
            .field("experience", &self.experience)
            .field("requirement", &self.requirement())
            .field("max_level", &self.max_level())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn explicit_table_walks_one_level_per_requirement() {
        let table: [u32; 5] = [2, 33, 56, 23, 78];
        let mut levels = ExperienceLevels::explicit(table);

        for (expected, requirement) in table.into_iter().enumerate() {
            assert_eq!(levels.level(), expected as u32);
            levels.bank(i64::from(requirement));
            assert_eq!(levels.try_level_up(), Some(expected as u32 + 1));
            assert_eq!(levels.try_level_up(), None);
        }
        assert!(levels.is_max_level());
        assert_eq!(levels.requirement(), None);
    }

    #[test]
    fn geometric_requirements_are_rounded() {
        let requirements = Requirements::Geometric {
            base: 100,
            modifier: 1.2,
            max_level: 3,
        };
        assert_eq!(requirements.at(0), Some(100));
        assert_eq!(requirements.at(1), Some(120));
        assert_eq!(requirements.at(2), Some(144));
        assert_eq!(requirements.at(3), None);
    }

    #[test]
    fn overrides_replace_single_levels() {
        let levels = ExperienceLevels::geometric(10, 2.0, 4).with_requirement(2, 7);
        assert_eq!(levels.requirement_at(1), Some(20));
        assert_eq!(levels.requirement_at(2), Some(7));
        assert_eq!(levels.requirement_at(4), None);
    }

    #[test]
    fn bank_clamps_at_zero() {
        let mut levels = ExperienceLevels::explicit(vec![10u32]);
        levels.bank(4);
        levels.bank(-9);
        assert_eq!(levels.experience(), 0);
    }

    #[test]
    fn max_level_banks_without_leveling() {
        let mut levels = ExperienceLevels::disabled();
        levels.bank(1_000);
        assert_eq!(levels.try_level_up(), None);
        assert_eq!(levels.experience(), 1_000);
        assert_eq!(levels.remaining(), None);
    }
}
