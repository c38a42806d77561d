//! Flat stat contributions and their accumulation.

use super::StatKind;

/// A single signed contribution to one stat.
///
/// Equipment yields these as `(stat, amount)` pairs; modifier buffs are
/// converted into them when stats are recomputed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Bonus {
    pub stat: StatKind,
    pub amount: i32,
}

impl Bonus {
    pub const fn new(stat: StatKind, amount: i32) -> Self {
        Self { stat, amount }
    }

    pub const fn attack(amount: i32) -> Self {
        Self::new(StatKind::Attack, amount)
    }

    pub const fn defense(amount: i32) -> Self {
        Self::new(StatKind::Defense, amount)
    }

    pub const fn max_health(amount: i32) -> Self {
        Self::new(StatKind::MaxHealth, amount)
    }

    pub const fn max_energy(amount: i32) -> Self {
        Self::new(StatKind::MaxEnergy, amount)
    }
}

impl From<(StatKind, i32)> for Bonus {
    fn from((stat, amount): (StatKind, i32)) -> Self {
        Self::new(stat, amount)
    }
}

/// A collection of bonuses that are summed per stat.
///
/// # Example
/// ```
/// # use adventure_core::stats::{Bonus, BonusStack, StatKind};
/// let mut stack = BonusStack::new();
/// stack.add(Bonus::attack(5));
/// stack.add(Bonus::attack(-2));
/// stack.add(Bonus::defense(3));
///
/// assert_eq!(stack.total(StatKind::Attack), 3);
/// assert_eq!(stack.apply(StatKind::Attack, 4), 7);
/// assert_eq!(stack.apply(StatKind::Attack, -10), 0);
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct BonusStack {
    bonuses: Vec<Bonus>,
}

impl BonusStack {
    /// Create a new empty bonus stack
    pub fn new() -> Self {
        Self {
            bonuses: Vec::new(),
        }
    }

    /// Add a bonus to the stack
    pub fn add(&mut self, bonus: Bonus) {
        self.bonuses.push(bonus);
    }

    /// Add multiple bonuses at once
    pub fn extend(&mut self, bonuses: impl IntoIterator<Item = Bonus>) {
        self.bonuses.extend(bonuses);
    }

    /// Sum of all contributions to `stat`.
    pub fn total(&self, stat: StatKind) -> i32 {
        self.bonuses
            .iter()
            .filter(|b| b.stat == stat)
            .map(|b| b.amount)
            .sum()
    }

    /// Apply the stack to a base value, clamping the result at zero.
    ///
    /// # Formula
    /// ```text
    /// result = max(0, base + Σ amount where bonus.stat == stat)
    /// ```
    pub fn apply(&self, stat: StatKind, base: i32) -> u32 {
        let total = i64::from(base) + i64::from(self.total(stat));
        total.clamp(0, i64::from(u32::MAX)) as u32
    }

    pub fn iter(&self) -> impl Iterator<Item = &Bonus> {
        self.bonuses.iter()
    }

    /// Check if the stack is empty
    pub fn is_empty(&self) -> bool {
        self.bonuses.is_empty()
    }

    /// Get the number of bonuses in the stack
    pub fn len(&self) -> usize {
        self.bonuses.len()
    }
}

impl FromIterator<Bonus> for BonusStack {
    fn from_iter<T: IntoIterator<Item = Bonus>>(iter: T) -> Self {
        Self {
            bonuses: iter.into_iter().collect(),
        }
    }
}
