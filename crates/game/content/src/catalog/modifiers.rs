//! Stock timed modifiers.

use adventure_core::{Duration, Modifier, StatKind};

pub fn war_roar_buff() -> Modifier {
    Modifier::stat_buff(
        "war_roar",
        "War Roar of War",
        StatKind::Attack,
        Duration::Turns(5),
        |_| 2,
    )
    .with_description("You are entranced by the roar and your attack is increased for a short time")
}

pub fn insult_debuff() -> Modifier {
    Modifier::stat_buff(
        "insult_debuff",
        "Insult",
        StatKind::Defense,
        Duration::Turns(3),
        |_| -3,
    )
    .with_description("Feeling insulted lowers your guard.")
}

pub fn insult_buff() -> Modifier {
    Modifier::stat_buff(
        "insult_buff",
        "Insult",
        StatKind::Attack,
        Duration::Turns(3),
        |_| 1,
    )
    .with_description("Feeling insulted makes you hit harder.")
}

/// Scar left by a fireball: lower max health.
pub fn fire() -> Modifier {
    Modifier::stat_buff(
        "fire",
        "Fire",
        StatKind::MaxHealth,
        Duration::Turns(5),
        |_| -5,
    )
    .with_description("The burns leave a scar, reducing maximum health.")
}

/// Lowers attack and deals 2 damage every turn.
pub fn burnt() -> Modifier {
    Modifier::stat_buff(
        "burnt",
        "Burnt",
        StatKind::Attack,
        Duration::Turns(5),
        |_| -2,
    )
    .with_effect(|bearer, session| bearer.take_pure_damage(2, session).map(drop))
    .with_description("The burn makes it hard to fight.")
}

/// Deals 3 damage every turn.
pub fn poison() -> Modifier {
    Modifier::periodic("poison", "Poison", Duration::Turns(5), |bearer, session| {
        bearer.take_pure_damage(3, session).map(drop)
    })
    .with_description("Lose 3 health every turn.")
}
