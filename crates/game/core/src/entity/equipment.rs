//! Weapon and armor slots.
//!
//! Every entity always has exactly one piece in each slot. An entity created
//! without gear wears the inert placeholders returned by
//! [`Equipment::bare_hands`] and [`Equipment::linen_clothes`].

use std::fmt;
use std::sync::Arc;

use crate::entity::Entity;
use crate::error::Flow;
use crate::kind::Kind;
use crate::session::Session;
use crate::stats::{Bonus, StatKind};

/// Bonuses computed from the wearer at stat-read time.
pub type DynamicBonusFn = Arc<dyn Fn(&Entity) -> Vec<Bonus> + Send + Sync>;

/// Side effect run after a hit lands: `(wearer, opponent, session)`.
pub type OnHitFn = Arc<dyn Fn(&mut Entity, &mut Entity, &mut Session) -> Flow + Send + Sync>;

/// The slot a piece of equipment occupies.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum Slot {
    Weapon,
    Armor,
}

#[derive(Clone)]
pub struct Equipment {
    kind: Kind,
    name: String,
    description: String,
    slot: Slot,
    bonuses: Vec<Bonus>,
    dynamic: Option<DynamicBonusFn>,
    on_hit: Option<OnHitFn>,
    placeholder: bool,
}

impl Equipment {
    pub fn new(kind: impl Into<Kind>, name: impl Into<String>, slot: Slot) -> Self {
        Self {
            kind: kind.into(),
            name: name.into(),
            description: String::new(),
            slot,
            bonuses: Vec::new(),
            dynamic: None,
            on_hit: None,
            placeholder: false,
        }
    }

    pub fn weapon(kind: impl Into<Kind>, name: impl Into<String>) -> Self {
        Self::new(kind, name, Slot::Weapon)
    }

    pub fn armor(kind: impl Into<Kind>, name: impl Into<String>) -> Self {
        Self::new(kind, name, Slot::Armor)
    }

    /// Inert weapon worn when nothing else is equipped.
    pub fn bare_hands() -> Self {
        Self {
            placeholder: true,
            ..Self::weapon("bare_hands", "Bare Hands")
                .with_description("Nothing but your fists.")
        }
    }

    /// Inert armor worn when nothing else is equipped.
    pub fn linen_clothes() -> Self {
        Self {
            placeholder: true,
            ..Self::armor("linen_clothes", "Linen Clothes")
                .with_description("They will not stop a blade.")
        }
    }

    /// The placeholder for a slot.
    pub fn placeholder(slot: Slot) -> Self {
        match slot {
            Slot::Weapon => Self::bare_hands(),
            Slot::Armor => Self::linen_clothes(),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_bonus(mut self, bonus: Bonus) -> Self {
        self.bonuses.push(bonus);
        self
    }

    pub fn with_bonuses(mut self, bonuses: impl IntoIterator<Item = Bonus>) -> Self {
        self.bonuses.extend(bonuses);
        self
    }

    pub fn with_dynamic_bonus<F>(mut self, bonus: F) -> Self
    where
        F: Fn(&Entity) -> Vec<Bonus> + Send + Sync + 'static,
    {
        self.dynamic = Some(Arc::new(bonus));
        self
    }

    /// On a weapon the hook runs as `(attacker, target)`; on armor as
    /// `(defender, attacker)`.
    pub fn with_on_hit<F>(mut self, on_hit: F) -> Self
    where
        F: Fn(&mut Entity, &mut Entity, &mut Session) -> Flow + Send + Sync + 'static,
    {
        self.on_hit = Some(Arc::new(on_hit));
        self
    }

    pub fn kind(&self) -> &Kind {
        &self.kind
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn slot(&self) -> Slot {
        self.slot
    }

    pub fn bonuses(&self) -> &[Bonus] {
        &self.bonuses
    }

    pub fn is_placeholder(&self) -> bool {
        self.placeholder
    }

    /// Sum of fixed and dynamic contributions to `stat` for `wearer`.
    pub fn contribution(&self, wearer: &Entity, stat: StatKind) -> i32 {
        if stat == StatKind::None {
            return 0;
        }
        let fixed: i32 = self
            .bonuses
            .iter()
            .filter(|b| b.stat == stat)
            .map(|b| b.amount)
            .sum();
        let dynamic: i32 = self.dynamic.as_ref().map_or(0, |bonus| {
            bonus(wearer)
                .into_iter()
                .filter(|b| b.stat == stat)
                .map(|b| b.amount)
                .sum()
        });
        fixed + dynamic
    }

    pub(crate) fn on_hit_fn(&self) -> Option<OnHitFn> {
        self.on_hit.clone()
    }
}

impl fmt::Debug for Equipment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Equipment")
            .field("kind", &self.kind)
            .field("name", &self.name)
            .field("slot", &self.slot)
            .field("bonuses", &self.bonuses)
            .field("dynamic", &self.dynamic.is_some())
            .field("on_hit", &self.on_hit.is_some())
            .field("placeholder", &self.placeholder)
            .finish()
    }
}
