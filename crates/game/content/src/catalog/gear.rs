//! Stock equipment and consumables.

use adventure_core::{Bonus, Consumable, Equipment};

pub fn sword() -> Equipment {
    Equipment::weapon("sword", "A Simple Sword")
        .with_description("This simple bronze sword gives you a small bonus to your attack")
        .with_bonus(Bonus::attack(5))
}

pub fn sword_and_shield() -> Equipment {
    Equipment::weapon("sword_and_shield", "A Sword and a Shield")
        .with_description("This bronze sword also has a shield included for bonus defense")
        .with_bonuses([Bonus::attack(5), Bonus::defense(3)])
}

pub fn leather_armor() -> Equipment {
    Equipment::armor("leather_armor", "Simple Leather Armor")
        .with_description("This leather armor can block some blows")
        .with_bonus(Bonus::defense(5))
}

/// Restores 5 health per charge.
pub fn health_potion(charges: u32) -> Consumable {
    Consumable::new("health_potion", "Health Potion", charges, |target, session| {
        target.restore_health(5, session).map(drop)
    })
    .with_description("Restores five health of the target")
}
