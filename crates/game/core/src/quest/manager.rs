//! Quest registry, active set and reward queue.

use std::collections::{BTreeMap, VecDeque};
use std::fmt;

use tracing::{debug, trace, warn};

use super::{Directive, Quest, QuestContext, QuestDefinition, QuestError, QuestEvent};
use crate::config::GameConfig;
use crate::error::GameError;
use crate::kind::Kind;

struct ActiveQuest {
    id: Kind,
    name: String,
    paused: bool,
    done: bool,
    quest: Box<dyn Quest>,
}

/// A finished quest waiting for its reward.
pub struct CompletedQuest {
    pub id: Kind,
    pub name: String,
    pub quest: Box<dyn Quest>,
}

impl fmt::Debug for CompletedQuest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CompletedQuest")
            .field("id", &self.id)
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}

/// Owns quest definitions, running instances, completion counts and the
/// pending-reward queue. One per [`crate::Session`].
pub struct QuestManager {
    default_repeat_limit: u32,
    definitions: BTreeMap<Kind, QuestDefinition>,
    active: Vec<ActiveQuest>,
    finished: BTreeMap<Kind, u32>,
    pending: VecDeque<CompletedQuest>,
    deferred: Vec<Directive>,
}

impl QuestManager {
    pub fn new(default_repeat_limit: u32) -> Self {
        Self {
            default_repeat_limit,
            definitions: BTreeMap::new(),
            active: Vec::new(),
            finished: BTreeMap::new(),
            pending: VecDeque::new(),
            deferred: Vec::new(),
        }
    }

    pub fn from_config(config: &GameConfig) -> Self {
        Self::new(config.default_repeat_limit)
    }

    // ------------------------------------------------------------------------
    // Registry
    // ------------------------------------------------------------------------

    pub fn register(&mut self, definition: QuestDefinition) -> Result<(), QuestError> {
        if self.definitions.contains_key(definition.id()) {
            return Err(QuestError::DuplicateQuest(definition.id().clone()));
        }
        debug!(target: "adventure::quest", quest = %definition.id(), "quest registered");
        self.definitions.insert(definition.id().clone(), definition);
        Ok(())
    }

    /// Forgets a definition. A running instance keeps running.
    pub fn unregister(&mut self, id: &str) -> Option<QuestDefinition> {
        self.definitions.remove(id)
    }

    pub fn definition(&self, id: &str) -> Option<&QuestDefinition> {
        self.definitions.get(id)
    }

    // ------------------------------------------------------------------------
    // Lifecycle
    // ------------------------------------------------------------------------

    /// Instantiates and activates a registered quest.
    pub fn start(&mut self, id: &str) -> Result<(), QuestError> {
        let definition = self
            .definitions
            .get(id)
            .ok_or_else(|| QuestError::UnknownQuest(id.into()))?;
        if self.is_active(id) {
            return Err(QuestError::AlreadyActive(definition.id().clone()));
        }
        let limit = definition.repeat_limit().unwrap_or(self.default_repeat_limit);
        if self.finished_count(id) >= limit {
            return Err(QuestError::NotRepeatable {
                id: definition.id().clone(),
                limit,
            });
        }

        debug!(target: "adventure::quest", quest = id, "quest started");
        self.active.push(ActiveQuest {
            id: definition.id().clone(),
            name: definition.name().to_owned(),
            paused: false,
            done: false,
            quest: definition.instantiate(),
        });
        Ok(())
    }

    /// Deactivates a quest, discarding its progress. Does not count as a
    /// completion.
    pub fn stop(&mut self, id: &str) -> Result<(), QuestError> {
        let index = self.position(id)?;
        self.active.remove(index);
        debug!(target: "adventure::quest", quest = id, "quest stopped");
        Ok(())
    }

    /// Stops event delivery while keeping the quest's internal state.
    pub fn pause(&mut self, id: &str) -> Result<(), QuestError> {
        let index = self.position(id)?;
        self.active[index].paused = true;
        Ok(())
    }

    pub fn unpause(&mut self, id: &str) -> Result<(), QuestError> {
        let index = self.position(id)?;
        self.active[index].paused = false;
        Ok(())
    }

    /// Queues a lifecycle change for the next reward pass.
    pub fn defer(&mut self, directive: Directive) {
        self.deferred.push(directive);
    }

    /// Applies queued directives in order. Failures are logged and skipped.
    pub fn apply_deferred(&mut self) {
        for directive in std::mem::take(&mut self.deferred) {
            let result = match &directive {
                Directive::Start(id) => self.start(id),
                Directive::Stop(id) => self.stop(id),
                Directive::Pause(id) => self.pause(id),
                Directive::Unpause(id) => self.unpause(id),
            };
            if let Err(error) = result {
                warn!(
                    target: "adventure::quest",
                    ?directive,
                    %error,
                    code = error.error_code(),
                    severity = error.severity().as_str(),
                    "deferred directive rejected"
                );
            }
        }
    }

    // ------------------------------------------------------------------------
    // Dispatch
    // ------------------------------------------------------------------------

    /// Delivers `event` to every active, unpaused quest in start order.
    ///
    /// Quests that report [`super::Progress::Done`] leave the active set once
    /// the whole pass is over, have their completion counted and are queued
    /// for reward. Returns the completed quests as `(id, name)`.
    pub fn progress(&mut self, event: &QuestEvent<'_>) -> Vec<(Kind, String)> {
        trace!(target: "adventure::quest", event = event.name(), active = self.active.len(), "dispatching");

        for active in self.active.iter_mut().filter(|a| !a.paused) {
            let mut ctx = QuestContext::new(active.id.clone());
            active.done = active.quest.handle(event, &mut ctx).is_done();
            self.deferred.extend(ctx.into_directives());
        }

        if self.active.iter().all(|a| !a.done) {
            return Vec::new();
        }

        let (done, remaining): (Vec<_>, Vec<_>) =
            std::mem::take(&mut self.active).into_iter().partition(|a| a.done);
        self.active = remaining;

        let mut completed = Vec::with_capacity(done.len());
        for ActiveQuest { id, name, quest, .. } in done {
            *self.finished.entry(id.clone()).or_default() += 1;
            debug!(target: "adventure::quest", quest = %id, event = event.name(), "quest completed");
            completed.push((id.clone(), name.clone()));
            self.pending.push_back(CompletedQuest { id, name, quest });
        }
        completed
    }

    // ------------------------------------------------------------------------
    // Queries
    // ------------------------------------------------------------------------

    pub fn is_active(&self, id: &str) -> bool {
        self.active.iter().any(|a| a.id == *id)
    }

    pub fn is_paused(&self, id: &str) -> bool {
        self.active.iter().any(|a| a.id == *id && a.paused)
    }

    /// Ids of running quests in start order.
    pub fn active(&self) -> Vec<&Kind> {
        self.active.iter().map(|a| &a.id).collect()
    }

    /// `(id, name)` of running quests, for display.
    pub fn active_names(&self) -> Vec<(&Kind, &str)> {
        self.active.iter().map(|a| (&a.id, a.name.as_str())).collect()
    }

    pub fn finished_count(&self, id: &str) -> u32 {
        self.finished.get(id).copied().unwrap_or(0)
    }

    pub fn pending_rewards(&self) -> usize {
        self.pending.len()
    }

    pub(crate) fn pop_pending(&mut self) -> Option<CompletedQuest> {
        self.pending.pop_front()
    }

    fn position(&self, id: &str) -> Result<usize, QuestError> {
        self.active
            .iter()
            .position(|a| a.id == *id)
            .ok_or_else(|| QuestError::NotActive(id.into()))
    }
}

impl Default for QuestManager {
    fn default() -> Self {
        Self::from_config(&GameConfig::default())
    }
}

impl fmt::Debug for QuestManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("QuestManager")
            .field("definitions", &self.definitions.keys().collect::<Vec<_>>())
            .field("active", &self.active())
            .field("finished", &self.finished)
            .field("pending", &self.pending.len())
            .finish()
    }
}
