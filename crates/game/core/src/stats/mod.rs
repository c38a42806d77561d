//! Stat System.
//!
//! Derived stats are never stored. They are recomputed on every read from
//! the entity's baseline plus every live contribution:
//!
//! ```text
//! [ Base Stats (stored) ]
//!      +
//! [ Modifier buffs (unexpired, matching stat) ]
//!      +
//! [ Equipment bonuses (weapon + armor) ]
//!      ↓
//! [ max(0, Σ) ]
//! ```
//!
//! ## Principles
//!
//! 1. **SSOT**: Base stats and current health/energy only
//! 2. **No caching**: a debuff applied mid-turn is visible on the very next read
//! 3. **Non-negative**: derived values clamp at zero

pub mod bonus;
pub mod derived;

pub use bonus::{Bonus, BonusStack};
pub use derived::{BaseStats, DerivedStats};

/// Closed set of stats a modifier or piece of equipment can contribute to.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, strum::Display, strum::EnumIter,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum StatKind {
    /// Contributes to nothing; used by purely periodic modifiers.
    #[default]
    None,
    Attack,
    Defense,
    MaxHealth,
    MaxEnergy,
}

impl StatKind {
    /// Stats that are actually derived (everything except [`StatKind::None`]).
    pub const DERIVED: [StatKind; 4] = [
        StatKind::Attack,
        StatKind::Defense,
        StatKind::MaxHealth,
        StatKind::MaxEnergy,
    ];
}
