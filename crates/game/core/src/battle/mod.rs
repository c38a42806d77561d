//! Turn-based encounters.
//!
//! ```text
//! setup ──► round ──► round ──► ... ──► resolved
//!  │          │
//!  │          ├─ turns in order (player asks the IntentSource, enemies run
//!  │          │  their Behavior)
//!  │          └─ end of round: player ticks → sweep dead (grant xp)
//!  │                           → enemies tick → sweep dead → turn += 1
//!  └─ incoming enemies already at 0 health go straight to the dead list
//! ```
//!
//! The battle ends normally when the alive list is empty. A player death
//! surfaces as `Err(EndGame)` from whatever call dealt the blow and unwinds
//! the loop through `?`.
mod intent;
mod turns;

use tracing::info;

pub use intent::{Intent, Target, View};
pub use turns::{Turn, TurnOrder, default_turn_order};

use crate::entity::Entity;
use crate::env::{IntentSource, Location};
use crate::error::{EndGame, Flow};
use crate::session::Session;

/// Read-only snapshot handed to the input layer and the turn-order hook.
#[derive(Clone, Copy, Debug)]
pub struct BattleView<'b> {
    pub player: &'b Entity,
    pub alive: &'b [Entity],
    pub dead: &'b [Entity],
    pub turn: u32,
}

/// Summary of a won battle.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct BattleReport {
    /// Completed rounds.
    pub rounds: u32,
    /// Enemies in the dead list, including any that arrived dead.
    pub defeated: usize,
    /// Experience granted to the player during this battle.
    pub experience: u64,
}

/// An enemy's decision procedure.
///
/// `me` indexes the acting enemy in [`Battle::alive`]. The battle is fully
/// mutable so bosses can script anything (summon, heal allies, flee).
pub trait Behavior: Send + Sync {
    fn act(&self, battle: &mut Battle<'_>, me: usize, session: &mut Session) -> Flow;
}

impl<F> Behavior for F
where
    F: Fn(&mut Battle<'_>, usize, &mut Session) -> Flow + Send + Sync,
{
    fn act(&self, battle: &mut Battle<'_>, me: usize, session: &mut Session) -> Flow {
        self(battle, me, session)
    }
}

/// Default behavior: attack the player.
#[derive(Clone, Copy, Debug, Default)]
pub struct AttackPlayer;

impl Behavior for AttackPlayer {
    fn act(&self, battle: &mut Battle<'_>, me: usize, session: &mut Session) -> Flow {
        if let Some((enemy, player)) = battle.actor_and_player(me) {
            enemy.do_attack(player, session)?;
        }
        Ok(())
    }
}

/// One encounter between the player and a group of enemies.
pub struct Battle<'a> {
    player: &'a mut Entity,
    alive: Vec<Entity>,
    dead: Vec<Entity>,
    location: Option<&'a mut dyn Location>,
    input: &'a mut dyn IntentSource,
    turn_order: TurnOrder,
    turn: u32,
    experience: u64,
}

impl<'a> Battle<'a> {
    /// Sets up a battle, moving enemies that are already dead straight to
    /// the dead list.
    pub fn new(
        player: &'a mut Entity,
        enemies: impl IntoIterator<Item = Entity>,
        input: &'a mut dyn IntentSource,
    ) -> Self {
        let (alive, dead) = enemies.into_iter().partition(Entity::is_alive);
        Self {
            player,
            alive,
            dead,
            location: None,
            input,
            turn_order: Box::new(default_turn_order),
            turn: 0,
            experience: 0,
        }
    }

    /// Location told to purge its dead once the battle is won.
    pub fn with_location(mut self, location: &'a mut dyn Location) -> Self {
        self.location = Some(location);
        self
    }

    pub fn with_turn_order<F>(mut self, order: F) -> Self
    where
        F: Fn(&BattleView<'_>) -> Vec<Turn> + 'static,
    {
        self.turn_order = Box::new(order);
        self
    }

    // ------------------------------------------------------------------------
    // Accessors
    // ------------------------------------------------------------------------

    pub fn player(&self) -> &Entity {
        &*self.player
    }

    pub fn player_mut(&mut self) -> &mut Entity {
        &mut *self.player
    }

    pub fn alive(&self) -> &[Entity] {
        &self.alive
    }

    pub fn dead(&self) -> &[Entity] {
        &self.dead
    }

    pub fn enemy(&self, index: usize) -> Option<&Entity> {
        self.alive.get(index)
    }

    pub fn enemy_mut(&mut self, index: usize) -> Option<&mut Entity> {
        self.alive.get_mut(index)
    }

    /// The acting enemy and the player, borrowed together.
    pub fn actor_and_player(&mut self, me: usize) -> Option<(&mut Entity, &mut Entity)> {
        let enemy = self.alive.get_mut(me)?;
        Some((enemy, &mut *self.player))
    }

    /// Adds an enemy mid-battle (summons). It acts from the next round.
    pub fn spawn(&mut self, enemy: Entity) {
        self.alive.push(enemy);
    }

    pub fn turn(&self) -> u32 {
        self.turn
    }

    pub fn is_won(&self) -> bool {
        self.alive.is_empty()
    }

    pub fn view(&self) -> BattleView<'_> {
        BattleView {
            player: &*self.player,
            alive: &self.alive,
            dead: &self.dead,
            turn: self.turn,
        }
    }

    /// The view together with the intent source it is shown to.
    pub(crate) fn view_and_input(&mut self) -> (BattleView<'_>, &mut dyn IntentSource) {
        let view = BattleView {
            player: &*self.player,
            alive: &self.alive,
            dead: &self.dead,
            turn: self.turn,
        };
        (view, &mut *self.input)
    }

    // ------------------------------------------------------------------------
    // Loop
    // ------------------------------------------------------------------------

    /// Plays rounds until every enemy is defeated.
    ///
    /// On victory the location (if any) purges its dead, permanent modifiers
    /// are cleared from the player and a [`BattleReport`] is returned. A
    /// player death returns `Err(EndGame)` immediately.
    pub fn run(&mut self, session: &mut Session) -> Flow<BattleReport> {
        info!(target: "adventure::battle", enemies = self.alive.len(), "battle started");

        while !self.alive.is_empty() {
            if !self.player.is_alive() {
                info!(target: "adventure::battle", turn = self.turn, "player fell");
                return Err(EndGame::zero_health());
            }
            self.round(session)?;
        }

        session.post("You've killed all the enemies!");
        if let Some(location) = self.location.as_mut() {
            location.purge_dead(&self.dead);
        }
        self.player.clear_permanent_modifiers(session)?;

        let report = BattleReport {
            rounds: self.turn,
            defeated: self.dead.len(),
            experience: self.experience,
        };
        info!(target: "adventure::battle", ?report, "battle won");
        Ok(report)
    }

    fn enemy_turn(&mut self, index: usize, session: &mut Session) -> Flow {
        let behavior = self.alive.get(index).and_then(|e| e.behavior().cloned());
        match behavior {
            Some(behavior) => behavior.act(self, index, session),
            None => AttackPlayer.act(self, index, session),
        }
    }
}
