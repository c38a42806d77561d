//! Structured player decisions and their resolution.

use tracing::debug;

use crate::action::{ActionError, Resolution};
use crate::error::Flow;
use crate::kind::Kind;
use crate::session::Session;

use super::Battle;

/// Who an intent is aimed at. Enemy indices refer to the current
/// alive list (see [`super::BattleView::alive`]).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Target {
    Player,
    Enemy(usize),
}

/// Information the player can look at without spending the turn.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum View {
    Stats,
    Inventory,
    Abilities,
    Quests,
}

/// One player decision, as produced by the input layer.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Intent {
    Attack { target: usize },
    Cast { ability: Kind, target: Target },
    UseItem { item: Kind, target: Target },
    View(View),
    /// Spend the turn doing nothing.
    Pass,
}

impl Intent {
    pub fn attack(target: usize) -> Self {
        Self::Attack { target }
    }

    pub fn cast(ability: impl Into<Kind>, target: Target) -> Self {
        Self::Cast {
            ability: ability.into(),
            target,
        }
    }

    pub fn use_item(item: impl Into<Kind>, target: Target) -> Self {
        Self::UseItem {
            item: item.into(),
            target,
        }
    }
}

/// Whether resolving an intent used up the player's turn.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum TurnUse {
    Consumed,
    Free,
}

impl Battle<'_> {
    /// Asks for intents until one consumes the turn.
    pub(crate) fn player_turn(&mut self, session: &mut Session) -> Flow {
        loop {
            let (view, input) = self.view_and_input();
            let intent = input.next_intent(&view);
            if self.resolve(intent, session)? == TurnUse::Consumed {
                return Ok(());
            }
        }
    }

    fn resolve(&mut self, intent: Intent, session: &mut Session) -> Flow<TurnUse> {
        let resolution = match intent {
            Intent::Attack { target } => match self.living_enemy(target) {
                Ok(index) => {
                    self.player.do_attack(&mut self.alive[index], session)?;
                    Resolution::Done
                }
                Err(error) => Resolution::Rejected(error),
            },
            Intent::Cast { ability, target } => match target {
                Target::Player => self.player.use_ability(ability.as_str(), None, session)?,
                Target::Enemy(index) => match self.living_enemy(index) {
                    Ok(index) => {
                        let enemy = &mut self.alive[index];
                        self.player.use_ability(ability.as_str(), Some(enemy), session)?
                    }
                    Err(error) => Resolution::Rejected(error),
                },
            },
            Intent::UseItem { item, target } => match target {
                Target::Player => self.player.use_item(item.as_str(), None, session)?,
                Target::Enemy(index) => match self.living_enemy(index) {
                    Ok(index) => {
                        let enemy = &mut self.alive[index];
                        self.player.use_item(item.as_str(), Some(enemy), session)?
                    }
                    Err(error) => Resolution::Rejected(error),
                },
            },
            Intent::View(view) => {
                self.show(view, session);
                return Ok(TurnUse::Free);
            }
            Intent::Pass => return Ok(TurnUse::Consumed),
        };

        match resolution {
            Resolution::Done => Ok(TurnUse::Consumed),
            Resolution::Rejected(error) => {
                debug!(target: "adventure::battle", %error, "intent rejected");
                session.post(error.to_string());
                Ok(TurnUse::Free)
            }
        }
    }

    fn living_enemy(&self, index: usize) -> Result<usize, ActionError> {
        let enemy = self.alive.get(index).ok_or(ActionError::InvalidTarget)?;
        if !enemy.is_alive() {
            return Err(ActionError::TargetDead(enemy.name().to_owned()));
        }
        Ok(index)
    }

    fn show(&self, view: View, session: &mut Session) {
        match view {
            View::Stats => {
                self.player.print_stats(session);
                for enemy in self.alive.iter().filter(|e| e.is_alive()) {
                    enemy.print_stats(session);
                }
            }
            View::Inventory => {
                let names = self.player.inventory().names();
                if names.is_empty() {
                    session.post("Your inventory is empty");
                } else {
                    session.post(format!("Inventory: {}", names.join(", ")));
                }
            }
            View::Abilities => {
                let abilities = self.player.abilities();
                if abilities.is_empty() {
                    session.post("You know no abilities");
                }
                for ability in abilities {
                    session.post(format!("{}: {}", ability.name(), ability.description()));
                }
            }
            View::Quests => {
                let lines: Vec<String> = session
                    .quests()
                    .active_names()
                    .into_iter()
                    .map(|(_, name)| name.to_owned())
                    .collect();
                if lines.is_empty() {
                    session.post("No active quests");
                } else {
                    session.post(format!("Quests: {}", lines.join(", ")));
                }
            }
        }
    }
}
