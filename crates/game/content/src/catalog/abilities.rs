//! Stock spells. All cost [`SPELL_COST`] energy.

use adventure_core::{Ability, Cost};

use super::SPELL_COST;
use super::modifiers::{burnt, fire, insult_buff, insult_debuff, war_roar_buff};

pub fn war_roar() -> Ability {
    Ability::new("war_roar", "War Roar", Cost::Fixed(SPELL_COST), |ctx, session| {
        ctx.target().add_modifier(war_roar_buff(), session).map(drop)
    })
    .with_description("Scream till you either feel stronger or faint from the lack of oxygen.")
}

/// Lowers the target's defense by 3 but raises its attack by 1.
pub fn insult() -> Ability {
    Ability::new("insult", "Insult", Cost::Fixed(SPELL_COST), |ctx, session| {
        let target = ctx.target();
        target.add_modifier(insult_debuff(), session)?;
        target.add_modifier(insult_buff(), session)?;
        Ok(())
    })
    .with_description("A weak insult likening the target's mother to a bovine.")
}

pub fn heal() -> Ability {
    Ability::new("heal", "Heal", Cost::Fixed(SPELL_COST), |ctx, session| {
        ctx.target().restore_health(5, session).map(drop)
    })
    .with_description("A soothing touch that restores 5 health.")
}

/// 5 pure damage, then the fire scar and the burn.
pub fn fireball() -> Ability {
    Ability::new("fireball", "Fireball", Cost::Fixed(SPELL_COST), |ctx, session| {
        let target = ctx.target();
        target.take_pure_damage(5, session)?;
        target.add_modifier(fire(), session)?;
        target.add_modifier(burnt(), session)?;
        Ok(())
    })
    .with_description("A small fireball emerges from your hands and burns the enemy.")
}

#[cfg(test)]
mod tests {
    use super::*;
    use adventure_core::{BaseStats, Entity, GameConfig, Session};

    fn mage() -> Entity {
        Entity::player("Mage", "Studious.", BaseStats::new(20, 1, 0, 10))
            .with_ability(fireball())
            .with_ability(heal())
            .with_ability(war_roar())
    }

    #[test]
    fn fireball_burns_and_scars() {
        let mut session = Session::silent(GameConfig::default());
        let mut caster = mage();
        let mut goblin = Entity::enemy("Goblin", "Green.", BaseStats::new(10, 2, 0, 0), 5);

        let resolution = caster
            .use_ability("fireball", Some(&mut goblin), &mut session)
            .unwrap();
        assert!(resolution.is_done());
        assert_eq!(caster.energy(), 8);
        assert_eq!(goblin.max_health(), 5);
        assert_eq!(goblin.health(), 5);
        assert_eq!(goblin.attack(), 0);

        goblin.end_turn(&mut session).unwrap();
        assert_eq!(goblin.health(), 3);
    }

    #[test]
    fn war_roar_refreshes_rather_than_stacks() {
        let mut session = Session::silent(GameConfig::default());
        let mut caster = mage();
        caster.use_ability("war_roar", None, &mut session).unwrap();
        caster.use_ability("war_roar", None, &mut session).unwrap();
        assert_eq!(caster.attack(), 3);
        assert_eq!(caster.energy(), 6);
    }

    #[test]
    fn heal_is_capped_at_max_health() {
        let mut session = Session::silent(GameConfig::default());
        let mut caster = mage();
        caster.take_pure_damage(3, &mut session).unwrap();
        caster.use_ability("heal", None, &mut session).unwrap();
        assert_eq!(caster.health(), 20);
    }
}
