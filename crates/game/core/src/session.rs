//! Session context.
//!
//! A [`Session`] is created once per adventure and passed explicitly to every
//! operation that posts narrative or raises quest events. It owns the game
//! configuration, the [`QuestManager`] and the [`Presenter`] sink.

use tracing::{debug, info};

use crate::config::GameConfig;
use crate::entity::Entity;
use crate::env::{NullPresenter, Presenter, World};
use crate::error::{EndGame, Flow};
use crate::quest::{QuestEvent, QuestManager, RewardContext};

pub struct Session {
    config: GameConfig,
    quests: QuestManager,
    output: Box<dyn Presenter>,
}

impl Session {
    pub fn new(config: GameConfig, output: Box<dyn Presenter>) -> Self {
        Self {
            quests: QuestManager::from_config(&config),
            config,
            output,
        }
    }

    /// Session that discards narrative.
    pub fn silent(config: GameConfig) -> Self {
        Self::new(config, Box::new(NullPresenter))
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn quests(&self) -> &QuestManager {
        &self.quests
    }

    pub fn quests_mut(&mut self) -> &mut QuestManager {
        &mut self.quests
    }

    /// Sends one line of narrative to the presenter.
    pub fn post(&mut self, text: impl AsRef<str>) {
        self.output.post(text.as_ref());
    }

    /// Dispatches an event to the active quests and announces completions.
    ///
    /// Rewards are only queued here; they run from
    /// [`Session::process_pending_rewards`].
    pub fn raise(&mut self, event: QuestEvent<'_>) {
        for (id, name) in self.quests.progress(&event) {
            self.post(format!("Quest complete: {name} ({id})"));
        }
    }

    /// Shorthand for raising `on_discover`.
    pub fn discover(&mut self, place: &str) {
        self.raise(QuestEvent::Discover(place));
    }

    /// Applies deferred quest directives, then pays out every pending reward
    /// in completion order.
    ///
    /// A reward may complete further quests (by raising events); those are
    /// paid in the same call. A reward returning `Err(EndGame)` stops the
    /// pass and propagates.
    pub fn process_pending_rewards(
        &mut self,
        player: &mut Entity,
        world: &mut dyn World,
    ) -> Flow {
        self.quests.apply_deferred();
        while let Some(mut completed) = self.quests.pop_pending() {
            debug!(target: "adventure::session", quest = %completed.id, "paying reward");
            let mut ctx = RewardContext {
                quest: &completed.id,
                player: &mut *player,
                world: &mut *world,
                session: &mut *self,
            };
            completed.quest.reward(&mut ctx)?;
            self.quests.apply_deferred();
        }
        Ok(())
    }

    /// Runs the world loop until the session ends.
    ///
    /// Each iteration calls [`World::step`] and then pays pending rewards. The
    /// first `EndGame` from either is handed to [`World::end_game`] and
    /// returned.
    pub fn run(&mut self, player: &mut Entity, world: &mut dyn World) -> EndGame {
        info!(target: "adventure::session", player = player.name(), "session started");
        let outcome = loop {
            if let Err(outcome) = self.tick(player, world) {
                break outcome;
            }
        };
        info!(
            target: "adventure::session",
            reason = %outcome.reason,
            victory = outcome.victory,
            "session ended"
        );
        world.end_game(&outcome, player, self);
        outcome
    }

    fn tick(&mut self, player: &mut Entity, world: &mut dyn World) -> Flow {
        world.step(player, self)?;
        self.process_pending_rewards(player, world)
    }
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("config", &self.config)
            .field("quests", &self.quests)
            .finish_non_exhaustive()
    }
}
