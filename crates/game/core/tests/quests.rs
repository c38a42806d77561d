mod common;

use std::any::Any;

use adventure_core::env::AsAny;
use adventure_core::{
    Ability, Battle, Cost, Directive, Duration, EndGame, Entity, Flow, Intent, Modifier, Progress,
    Quest, QuestContext, QuestDefinition, QuestError, QuestEvent, RewardContext, ScriptedIntents,
    Session, StatKind, Target, World,
};
use common::{Idle, goblin, hero, session};

/// Completes after `needed` goblin deaths and pays 50 gold.
struct KillGoblins {
    needed: u32,
    killed: u32,
}

impl Quest for KillGoblins {
    fn on_death(&mut self, entity: &Entity, _ctx: &mut QuestContext) -> Progress {
        if entity.name() != "Goblin" {
            return Progress::Pending;
        }
        self.killed += 1;
        (self.killed >= self.needed).into()
    }

    fn reward(&mut self, ctx: &mut RewardContext<'_>) -> Flow {
        ctx.player.add_money(50);
        ctx.session.post("The village pays you 50 gold");
        Ok(())
    }
}

fn kill_goblins(needed: u32) -> QuestDefinition {
    QuestDefinition::new("kill_goblins", "Goblin Trouble", move || KillGoblins {
        needed,
        killed: 0,
    })
}

fn slay(session: &mut Session) {
    let mut victim = goblin();
    victim.take_pure_damage(100, session).unwrap();
}

#[test]
fn on_death_completion_queues_the_reward() {
    let (mut session, transcript) = session();
    session.quests_mut().register(kill_goblins(2)).unwrap();
    session.quests_mut().start("kill_goblins").unwrap();

    slay(&mut session);
    assert!(session.quests().is_active("kill_goblins"));
    assert_eq!(session.quests().pending_rewards(), 0);

    slay(&mut session);
    assert!(!session.quests().is_active("kill_goblins"));
    assert_eq!(session.quests().finished_count("kill_goblins"), 1);
    assert_eq!(session.quests().pending_rewards(), 1);
    assert!(transcript.contains("Quest complete: Goblin Trouble (kill_goblins)"));

    // Not paid until the reward pass.
    let mut player = hero();
    assert_eq!(player.money(), 0);
    session.process_pending_rewards(&mut player, &mut Idle).unwrap();
    assert_eq!(player.money(), 50);
    assert_eq!(session.quests().pending_rewards(), 0);
}

fn wither() -> Ability {
    Ability::new("wither", "Wither", Cost::Fixed(1), |ctx, session| {
        let rot = Modifier::stat_buff("wither", "Wither", StatKind::MaxHealth, Duration::Turns(3), |_| -10);
        ctx.target().add_modifier(rot, session).map(drop)
    })
}

#[test]
fn withering_an_enemy_to_nothing_counts_as_a_kill() {
    let (mut session, _) = session();
    session.quests_mut().register(kill_goblins(1)).unwrap();
    session.quests_mut().start("kill_goblins").unwrap();
    let mut player = hero().with_ability(wither());
    let mut input = ScriptedIntents::new([Intent::cast("wither", Target::Enemy(0))]);

    let mut battle = Battle::new(&mut player, [goblin()], &mut input);
    let report = battle.run(&mut session).unwrap();

    assert_eq!(report.rounds, 1);
    assert_eq!(report.experience, 5);
    assert_eq!(session.quests().finished_count("kill_goblins"), 1);
    assert_eq!(session.quests().pending_rewards(), 1);
}

#[test]
fn pause_keeps_progress_and_blocks_delivery() {
    let (mut session, _) = session();
    session.quests_mut().register(kill_goblins(2)).unwrap();
    session.quests_mut().start("kill_goblins").unwrap();

    slay(&mut session);
    session.quests_mut().pause("kill_goblins").unwrap();
    slay(&mut session);
    slay(&mut session);
    assert!(session.quests().is_active("kill_goblins"));

    session.quests_mut().unpause("kill_goblins").unwrap();
    slay(&mut session);
    assert_eq!(session.quests().finished_count("kill_goblins"), 1);
}

struct Explorer;

impl Quest for Explorer {
    fn on_discover(&mut self, place: &str, _ctx: &mut QuestContext) -> Progress {
        (place == "cave").into()
    }
}

#[test]
fn quests_without_a_handler_are_unaffected() {
    let (mut session, _) = session();
    session
        .quests_mut()
        .register(QuestDefinition::new("explore", "Explore", || Explorer))
        .unwrap();
    session.quests_mut().start("explore").unwrap();

    slay(&mut session);
    assert!(session.quests().is_active("explore"));

    session.discover("cave");
    assert!(!session.quests().is_active("explore"));
}

#[test]
fn start_rejects_active_and_exhausted_quests() {
    let (mut session, _) = session();
    let quests = session.quests_mut();
    quests.register(kill_goblins(1)).unwrap();
    quests
        .register(QuestDefinition::new("explore", "Explore", || Explorer).with_repeat_limit(2))
        .unwrap();

    quests.start("kill_goblins").unwrap();
    assert_eq!(
        quests.start("kill_goblins"),
        Err(QuestError::AlreadyActive("kill_goblins".into()))
    );

    slay(&mut session);
    assert_eq!(
        session.quests_mut().start("kill_goblins"),
        Err(QuestError::NotRepeatable {
            id: "kill_goblins".into(),
            limit: 1,
        })
    );

    for _ in 0..2 {
        session.quests_mut().start("explore").unwrap();
        session.discover("cave");
    }
    assert!(matches!(
        session.quests_mut().start("explore"),
        Err(QuestError::NotRepeatable { limit: 2, .. })
    ));
}

struct BellRinger;

impl Quest for BellRinger {
    fn on_event(&mut self, name: &str, payload: &dyn Any, _ctx: &mut QuestContext) -> Progress {
        if name != "ring_bell" {
            return Progress::Ignored;
        }
        payload
            .downcast_ref::<u32>()
            .is_some_and(|rings| *rings >= 3)
            .into()
    }
}

#[test]
fn custom_events_carry_payloads() {
    let (mut session, _) = session();
    session
        .quests_mut()
        .register(QuestDefinition::new("bell", "Ring the Bell", || BellRinger))
        .unwrap();
    session.quests_mut().start("bell").unwrap();

    session.raise(QuestEvent::custom("ring_bell", &1u32));
    assert!(session.quests().is_active("bell"));
    session.raise(QuestEvent::custom("ring_gong", &5u32));
    assert!(session.quests().is_active("bell"));
    session.raise(QuestEvent::custom("ring_bell", &3u32));
    assert!(!session.quests().is_active("bell"));
}

/// Starts the follow-up quest from inside dispatch.
struct Herald;

impl Quest for Herald {
    fn on_death(&mut self, _entity: &Entity, ctx: &mut QuestContext) -> Progress {
        ctx.defer(Directive::Start("explore".into()));
        Progress::Done
    }
}

#[test]
fn handler_directives_apply_on_the_next_reward_pass() {
    let (mut session, _) = session();
    let quests = session.quests_mut();
    quests.register(QuestDefinition::new("herald", "Herald", || Herald)).unwrap();
    quests.register(QuestDefinition::new("explore", "Explore", || Explorer)).unwrap();
    quests.start("herald").unwrap();

    slay(&mut session);
    assert!(!session.quests().is_active("explore"));

    session.process_pending_rewards(&mut hero(), &mut Idle).unwrap();
    assert!(session.quests().is_active("explore"));
}

/// Reward completes another quest by raising an event.
struct Scout;

impl Quest for Scout {
    fn on_death(&mut self, _entity: &Entity, _ctx: &mut QuestContext) -> Progress {
        Progress::Done
    }

    fn reward(&mut self, ctx: &mut RewardContext<'_>) -> Flow {
        ctx.session.discover("cave");
        Ok(())
    }
}

#[test]
fn rewards_can_chain_within_one_pass() {
    let (mut session, _) = session();
    let quests = session.quests_mut();
    quests.register(QuestDefinition::new("scout", "Scout", || Scout)).unwrap();
    quests.register(QuestDefinition::new("explore", "Explore", || Explorer)).unwrap();
    quests.start("scout").unwrap();
    quests.start("explore").unwrap();

    slay(&mut session);
    session.process_pending_rewards(&mut hero(), &mut Idle).unwrap();

    assert_eq!(session.quests().finished_count("explore"), 1);
    assert_eq!(session.quests().pending_rewards(), 0);
}

/// A world with one goblin to kill, then nothing.
#[derive(Default)]
struct Village {
    steps: u32,
    celebrated: bool,
}

impl World for Village {
    fn step(&mut self, _player: &mut Entity, session: &mut Session) -> Flow {
        self.steps += 1;
        if self.steps == 1 {
            slay(session);
        }
        if self.steps > 10 {
            return Err(EndGame::failed("Nothing ever happened."));
        }
        Ok(())
    }
}

struct SaveTheVillage;

impl Quest for SaveTheVillage {
    fn on_death(&mut self, entity: &Entity, _ctx: &mut QuestContext) -> Progress {
        (entity.name() == "Goblin").into()
    }

    fn reward(&mut self, ctx: &mut RewardContext<'_>) -> Flow {
        if let Some(village) = ctx.world.as_any_mut().downcast_mut::<Village>() {
            village.celebrated = true;
        }
        Err(EndGame::victory("The village is saved!"))
    }
}

#[test]
fn a_reward_can_end_the_session() {
    let (mut session, transcript) = session();
    session
        .quests_mut()
        .register(QuestDefinition::new("save", "Save the Village", || SaveTheVillage))
        .unwrap();
    session.quests_mut().start("save").unwrap();

    let mut player = hero();
    let mut village = Village::default();
    let outcome = session.run(&mut player, &mut village);

    assert!(outcome.victory);
    assert_eq!(outcome.message, "The village is saved!");
    assert_eq!(village.steps, 1);
    assert!(village.celebrated);
    assert!(transcript.contains("The village is saved!"));
}

#[test]
fn world_outcomes_end_the_session() {
    let (mut session, _) = session();
    let mut village = Village::default();
    let outcome = session.run(&mut hero(), &mut village);

    assert!(!outcome.victory);
    assert_eq!(village.steps, 11);
}
