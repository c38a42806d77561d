//! Player decision source.

use std::collections::VecDeque;

use crate::battle::{BattleView, Intent};

/// Supplies one structured intent each time the player must act.
///
/// This is the only point where the simulation waits on the outside world.
pub trait IntentSource {
    fn next_intent(&mut self, view: &BattleView<'_>) -> Intent;
}

impl<F> IntentSource for F
where
    F: FnMut(&BattleView<'_>) -> Intent,
{
    fn next_intent(&mut self, view: &BattleView<'_>) -> Intent {
        self(view)
    }
}

/// Replays a fixed list of intents, then passes forever.
#[derive(Clone, Debug, Default)]
pub struct ScriptedIntents {
    intents: VecDeque<Intent>,
}

impl ScriptedIntents {
    pub fn new(intents: impl IntoIterator<Item = Intent>) -> Self {
        Self {
            intents: intents.into_iter().collect(),
        }
    }

    pub fn push(&mut self, intent: Intent) {
        self.intents.push_back(intent);
    }

    pub fn remaining(&self) -> usize {
        self.intents.len()
    }
}

impl IntentSource for ScriptedIntents {
    fn next_intent(&mut self, _view: &BattleView<'_>) -> Intent {
        self.intents.pop_front().unwrap_or(Intent::Pass)
    }
}
