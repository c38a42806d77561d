//! Turn order and the end-of-round phase.

use tracing::{debug, trace};

use crate::error::Flow;
use crate::session::Session;

use super::{Battle, BattleView};

/// One slot in a round's turn order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Turn {
    Player,
    /// Index into the alive list at the start of the round.
    Enemy(usize),
}

/// Produces the turn order for a round.
pub type TurnOrder = Box<dyn Fn(&BattleView<'_>) -> Vec<Turn>>;

/// `[player, alive enemies in list order]`.
pub fn default_turn_order(view: &BattleView<'_>) -> Vec<Turn> {
    std::iter::once(Turn::Player)
        .chain((0..view.alive.len()).map(Turn::Enemy))
        .collect()
}

impl Battle<'_> {
    /// Plays one full round: every turn in order, then the end-of-round phase.
    pub(crate) fn round(&mut self, session: &mut Session) -> Flow {
        let order = {
            let view = self.view();
            (self.turn_order)(&view)
        };
        trace!(target: "adventure::battle", turn = self.turn, slots = order.len(), "round started");

        for turn in order {
            match turn {
                Turn::Player if self.player.is_alive() => self.player_turn(session)?,
                Turn::Enemy(index) if self.alive.get(index).is_some_and(|e| e.is_alive()) => {
                    self.enemy_turn(index, session)?
                }
                // Dead combatants and stale indices are skipped.
                Turn::Player | Turn::Enemy(_) => {}
            }
        }

        self.end_of_round(session)
    }

    /// Strict order: player ticks, dead enemies are swept (experience is
    /// granted here), survivors tick, and anything their own effects killed
    /// is swept again.
    fn end_of_round(&mut self, session: &mut Session) -> Flow {
        self.player.end_turn(session)?;
        self.sweep_dead(session)?;
        for enemy in &mut self.alive {
            enemy.end_turn(session)?;
        }
        self.sweep_dead(session)?;
        self.turn += 1;
        Ok(())
    }

    /// Moves defeated enemies from the alive list to the dead list, granting
    /// the player each one's experience yield.
    fn sweep_dead(&mut self, session: &mut Session) -> Flow {
        if self.alive.iter().all(|e| e.is_alive()) {
            return Ok(());
        }

        let (fallen, alive): (Vec<_>, Vec<_>) =
            std::mem::take(&mut self.alive).into_iter().partition(|e| !e.is_alive());
        self.alive = alive;

        for enemy in fallen {
            let experience = enemy.experience_yield();
            debug!(
                target: "adventure::battle",
                enemy = enemy.name(),
                experience,
                "enemy defeated"
            );
            session.post(format!("{} has been defeated", enemy.name()));
            self.dead.push(enemy);
            self.experience += u64::from(experience);
            self.player.gain_experience(i64::from(experience), session)?;
        }
        Ok(())
    }
}
