//! Ready-made content.
//!
//! Each function returns a fresh value, so the same entry can be handed to
//! several entities. Kinds are stable `snake_case` tags; re-applying a stock
//! modifier refreshes it instead of stacking.

use adventure_core::{Ability, Equipment, Modifier};

mod abilities;
mod gear;
mod modifiers;

pub use abilities::{fireball, heal, insult, war_roar};
pub use gear::{health_potion, leather_armor, sword, sword_and_shield};
pub use modifiers::{burnt, fire, insult_buff, insult_debuff, poison, war_roar_buff};

/// Energy cost shared by the stock spells.
pub const SPELL_COST: u32 = 2;

/// Looks up a stock ability by kind.
pub fn ability(kind: &str) -> Option<Ability> {
    match kind {
        "war_roar" => Some(war_roar()),
        "insult" => Some(insult()),
        "heal" => Some(heal()),
        "fireball" => Some(fireball()),
        _ => None,
    }
}

/// Looks up a stock weapon or armor by kind.
pub fn equipment(kind: &str) -> Option<Equipment> {
    match kind {
        "sword" => Some(sword()),
        "sword_and_shield" => Some(sword_and_shield()),
        "leather_armor" => Some(leather_armor()),
        _ => None,
    }
}

/// Looks up a stock modifier by kind.
pub fn modifier(kind: &str) -> Option<Modifier> {
    match kind {
        "war_roar" => Some(war_roar_buff()),
        "insult_debuff" => Some(insult_debuff()),
        "insult_buff" => Some(insult_buff()),
        "fire" => Some(fire()),
        "burnt" => Some(burnt()),
        "poison" => Some(poison()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookups_return_entries_with_matching_kinds() {
        for kind in ["war_roar", "insult", "heal", "fireball"] {
            assert_eq!(ability(kind).map(|a| a.kind().to_string()).as_deref(), Some(kind));
        }
        for kind in ["sword", "sword_and_shield", "leather_armor"] {
            assert_eq!(equipment(kind).map(|e| e.kind().to_string()).as_deref(), Some(kind));
        }
        for kind in ["war_roar", "insult_debuff", "insult_buff", "fire", "burnt", "poison"] {
            assert_eq!(modifier(kind).map(|m| m.kind().to_string()).as_deref(), Some(kind));
        }
        assert!(ability("meteor").is_none());
    }
}
