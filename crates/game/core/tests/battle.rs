mod common;

use adventure_core::{
    BaseStats, Battle, BattleReport, Behavior, Duration, EndGame, Entity, Flow, Intent, Location,
    Modifier, ScriptedIntents, Session, StatKind, Turn,
};
use common::{big_goblin, goblin, hero, session};

#[test]
fn two_goblins_fall_to_scripted_attacks() {
    let (mut session, _) = session();
    let mut player = hero();
    // Indices refer to the alive list, which shrinks once the goblin falls.
    let mut input = ScriptedIntents::new([
        Intent::attack(0),
        Intent::attack(1),
        Intent::attack(0),
        Intent::attack(0),
        Intent::attack(0),
    ]);

    let mut battle = Battle::new(&mut player, [goblin(), big_goblin()], &mut input);
    let report = battle.run(&mut session).expect("player survives");

    assert!(battle.alive().is_empty());
    assert_eq!(battle.dead().len(), 2);
    assert_eq!(
        report,
        BattleReport {
            rounds: 5,
            defeated: 2,
            experience: 15,
        }
    );
    drop(battle);

    assert_eq!(player.health(), 40);
    assert_eq!(input.remaining(), 0);
}

#[test]
fn player_death_ends_the_battle_with_an_outcome() {
    let (mut session, _) = session();
    let mut player = Entity::player("Squire", "Not ready.", BaseStats::new(3, 1, 0, 0));
    let ogre = Entity::enemy("Ogre", "Huge.", BaseStats::new(50, 10, 0, 0), 100);
    let mut input = ScriptedIntents::default();

    let mut battle = Battle::new(&mut player, [ogre], &mut input);
    let outcome = battle.run(&mut session).unwrap_err();

    assert_eq!(outcome, EndGame::zero_health());
    assert_eq!(battle.alive().len(), 1);
    assert!(battle.dead().is_empty());
}

#[test]
fn enemies_that_arrive_dead_skip_the_fight() {
    let (mut session, transcript) = session();
    let mut player = hero();
    let corpse = Entity::enemy("Corpse", "Already dead.", BaseStats::new(0, 0, 0, 0), 7);
    let mut input = ScriptedIntents::default();

    let mut battle = Battle::new(&mut player, [corpse], &mut input);
    assert!(battle.is_won());
    let report = battle.run(&mut session).unwrap();

    assert_eq!(report.rounds, 0);
    assert_eq!(report.defeated, 1);
    assert_eq!(report.experience, 0);
    assert!(transcript.contains("You've killed all the enemies!"));
}

#[test]
fn viewing_and_rejected_intents_keep_the_turn() {
    let (mut session, transcript) = session();
    let mut player = hero();
    let mut input = ScriptedIntents::new([
        Intent::View(adventure_core::View::Stats),
        Intent::attack(7),
        Intent::attack(0),
        Intent::View(adventure_core::View::Inventory),
        Intent::attack(0),
    ]);

    let mut battle = Battle::new(&mut player, [goblin()], &mut input);
    let report = battle.run(&mut session).unwrap();

    assert_eq!(report.rounds, 2);
    assert!(transcript.contains("invalid target"));
    assert!(transcript.contains("Your inventory is empty"));
}

struct Cower;

impl Behavior for Cower {
    fn act(&self, _battle: &mut Battle<'_>, _me: usize, session: &mut Session) -> Flow {
        session.post("The goblin cowers");
        Ok(())
    }
}

#[test]
fn enemy_behavior_replaces_the_default_attack() {
    let (mut session, transcript) = session();
    let mut player = hero();
    let mut input = ScriptedIntents::new([Intent::attack(0), Intent::attack(0)]);

    let mut battle = Battle::new(&mut player, [goblin().with_behavior(Cower)], &mut input);
    battle.run(&mut session).unwrap();
    drop(battle);

    assert_eq!(player.health(), 50);
    assert!(transcript.contains("The goblin cowers"));
}

struct Summoner;

impl Behavior for Summoner {
    fn act(&self, battle: &mut Battle<'_>, me: usize, session: &mut Session) -> Flow {
        if battle.turn() == 0 {
            session.post("The shaman calls for help");
            battle.spawn(goblin());
        }
        if let Some((shaman, player)) = battle.actor_and_player(me) {
            shaman.do_attack(player, session)?;
        }
        Ok(())
    }
}

#[test]
fn behaviors_can_rewrite_the_battle() {
    let (mut session, _) = session();
    let mut player = hero();
    let shaman = Entity::enemy("Shaman", "Chants loudly.", BaseStats::new(10, 2, 0, 0), 3)
        .with_behavior(Summoner);
    // Two hits for the shaman, then two for the goblin it summoned.
    let mut input = ScriptedIntents::new(std::iter::repeat_n(Intent::attack(0), 4));

    let mut battle = Battle::new(&mut player, [shaman], &mut input);
    let report = battle.run(&mut session).unwrap();

    assert_eq!(report.defeated, 2);
    assert_eq!(report.experience, 8);
}

#[test]
fn turn_order_hook_can_put_enemies_first() {
    let fragile = || Entity::player("Glass", "Hits hard, breaks easily.", BaseStats::new(3, 5, 0, 0));
    let brute = || Entity::enemy("Brute", "Slow but strong.", BaseStats::new(5, 3, 0, 0), 1);

    let (mut session, _) = session();
    let mut player = fragile();
    let mut input = ScriptedIntents::new([Intent::attack(0)]);
    let mut battle = Battle::new(&mut player, [brute()], &mut input);
    assert!(battle.run(&mut session).is_ok());

    let (mut session, _) = common::session();
    let mut player = fragile();
    let mut input = ScriptedIntents::new([Intent::attack(0)]);
    let mut battle = Battle::new(&mut player, [brute()], &mut input).with_turn_order(|view| {
        let mut order: Vec<Turn> = (0..view.alive.len()).map(Turn::Enemy).collect();
        order.push(Turn::Player);
        order
    });
    assert_eq!(battle.run(&mut session), Err(EndGame::zero_health()));
}

#[test]
fn enemy_killed_by_its_own_tick_leaves_in_the_same_round() {
    let (mut session, _) = session();
    let mut player = hero();
    let poison = Modifier::periodic("poison", "Poison", Duration::Turns(5), |bearer, session| {
        bearer.take_pure_damage(3, session).map(drop)
    });
    let sickly = Entity::enemy("Sickly Rat", "Not long for this world.", BaseStats::new(2, 1, 0, 0), 4)
        .with_modifier(poison);
    let mut input = ScriptedIntents::default();

    let mut battle = Battle::new(&mut player, [sickly], &mut input);
    let report = battle.run(&mut session).unwrap();

    assert_eq!(report.rounds, 1);
    assert_eq!(report.experience, 4);
}

#[test]
fn an_enemy_slain_mid_round_never_runs_its_end_of_turn_effects() {
    let (mut session, transcript) = session();
    let mut player = hero();
    let burst = Modifier::periodic("death_burst", "Death Burst", Duration::Permanent, |bearer, session| {
        session.post(format!("{} bursts", bearer.name()));
        bearer.take_pure_damage(1, session).map(drop)
    });
    let bloater = Entity::enemy("Bloater", "Swollen and twitching.", BaseStats::new(5, 1, 0, 0), 6)
        .with_modifier(burst);
    let mut input = ScriptedIntents::new([Intent::attack(0)]);

    let mut battle = Battle::new(&mut player, [bloater], &mut input);
    let report = battle.run(&mut session).unwrap();

    assert_eq!(report.rounds, 1);
    assert_eq!(report.experience, 6);
    assert_eq!(battle.dead().len(), 1);
    assert_eq!(battle.dead()[0].name(), "Bloater");
    drop(battle);

    assert!(!transcript.contains("Bloater bursts"));
    assert!(transcript.contains("Bloater has been defeated"));
    assert_eq!(player.health(), 50);
}

#[test]
fn a_player_without_max_health_cannot_fight_on() {
    let (mut session, _) = session();
    let mut player = hero();
    let hollow = Modifier::stat_buff("hollow", "Hollow", StatKind::MaxHealth, Duration::Permanent, |_| -50);
    assert_eq!(player.add_modifier(hollow, &mut session), Err(EndGame::zero_health()));

    // The goblin never deals damage, so only the player's death can end this.
    let mut input = ScriptedIntents::default();
    let mut battle = Battle::new(&mut player, [goblin().with_behavior(Cower)], &mut input);
    assert_eq!(battle.run(&mut session), Err(EndGame::zero_health()));
    assert_eq!(battle.alive().len(), 1);
}

struct Hex;

impl Behavior for Hex {
    fn act(&self, battle: &mut Battle<'_>, _me: usize, session: &mut Session) -> Flow {
        session.post("The witch hexes you");
        let hex = Modifier::stat_buff("hex", "Hex", StatKind::MaxHealth, Duration::Turns(2), |_| -60);
        battle.player_mut().add_modifier(hex, session).map(drop)
    }
}

#[test]
fn a_hex_that_erases_max_health_is_a_loss() {
    let (mut session, transcript) = session();
    let mut player = hero();
    let witch = Entity::enemy("Witch", "Cackling.", BaseStats::new(30, 0, 0, 0), 12).with_behavior(Hex);
    let mut input = ScriptedIntents::new(std::iter::repeat_n(Intent::Pass, 3));

    let mut battle = Battle::new(&mut player, [witch], &mut input);
    let outcome = battle.run(&mut session).unwrap_err();

    assert_eq!(outcome, EndGame::zero_health());
    assert_eq!(battle.turn(), 0);
    assert!(transcript.contains("The witch hexes you"));
}

#[derive(Default)]
struct Cave {
    purged: Vec<String>,
}

impl Location for Cave {
    fn purge_dead(&mut self, defeated: &[Entity]) {
        self.purged.extend(defeated.iter().map(|e| e.name().to_owned()));
    }
}

#[test]
fn victory_purges_the_location_and_permanent_modifiers() {
    let (mut session, _) = session();
    let mut player = hero();
    let focus = Modifier::stat_buff("battle_focus", "Battle Focus", StatKind::Attack, Duration::Permanent, |_| 5);
    player.add_modifier(focus, &mut session).unwrap();
    let mut cave = Cave::default();
    let mut input = ScriptedIntents::new([Intent::attack(0)]);

    let mut battle =
        Battle::new(&mut player, [goblin()], &mut input).with_location(&mut cave);
    battle.run(&mut session).unwrap();
    drop(battle);

    assert_eq!(cave.purged, ["Goblin"]);
    assert!(player.modifiers().is_empty());
    assert_eq!(player.attack(), 5);
}
