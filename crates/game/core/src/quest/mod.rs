//! Quests: stateful listeners for gameplay events.
//!
//! A quest moves through `registered → active → completed → rewarded`:
//!
//! - [`QuestManager::register`] makes a [`QuestDefinition`] known.
//! - [`QuestManager::start`] instantiates it and counts toward its repeat limit.
//! - A handler returning [`Progress::Done`] moves the instance to the pending
//!   reward queue.
//! - [`crate::Session::process_pending_rewards`] pops it, runs
//!   [`Quest::reward`] and drops it.
//!
//! Rewards never run inside event dispatch. Handlers that want to start,
//! stop, pause or unpause quests record a [`Directive`] through
//! [`QuestContext`]; directives are applied before the next reward pass.
mod event;
mod manager;

use std::any::Any;
use std::fmt;
use std::sync::Arc;

pub use event::QuestEvent;
pub use manager::{CompletedQuest, QuestManager};

use crate::entity::{Entity, Item};
use crate::env::World;
use crate::error::{ErrorSeverity, Flow, GameError};
use crate::kind::Kind;
use crate::session::Session;

/// Result of delivering an event to a quest.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Progress {
    /// The quest has no handler for this event.
    Ignored,
    /// Handled; the quest is not finished yet.
    Pending,
    /// The quest is complete.
    Done,
}

impl Progress {
    pub fn is_done(self) -> bool {
        matches!(self, Self::Done)
    }
}

impl From<bool> for Progress {
    fn from(done: bool) -> Self {
        if done { Self::Done } else { Self::Pending }
    }
}

/// A request to change the active quest set, applied after dispatch.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Directive {
    Start(Kind),
    Stop(Kind),
    Pause(Kind),
    Unpause(Kind),
}

/// Handler-side view of the dispatch in progress.
#[derive(Debug)]
pub struct QuestContext {
    quest: Kind,
    directives: Vec<Directive>,
}

impl QuestContext {
    pub(crate) fn new(quest: Kind) -> Self {
        Self {
            quest,
            directives: Vec::new(),
        }
    }

    /// Id of the quest receiving the event.
    pub fn quest(&self) -> &Kind {
        &self.quest
    }

    /// Queues a change to the active set for after this dispatch.
    pub fn defer(&mut self, directive: Directive) {
        self.directives.push(directive);
    }

    pub(crate) fn into_directives(self) -> Vec<Directive> {
        self.directives
    }
}

/// What a reward can touch.
pub struct RewardContext<'a> {
    /// Id of the quest being rewarded.
    pub quest: &'a Kind,
    pub player: &'a mut Entity,
    pub world: &'a mut dyn World,
    pub session: &'a mut Session,
}

/// A running quest instance.
///
/// Every handler defaults to [`Progress::Ignored`], so a quest only overrides
/// the events it cares about. State kept in `self` (kill counters, flags)
/// survives pauses.
pub trait Quest {
    fn on_death(&mut self, _entity: &Entity, _ctx: &mut QuestContext) -> Progress {
        Progress::Ignored
    }

    fn on_pickup(&mut self, _item: &Item, _ctx: &mut QuestContext) -> Progress {
        Progress::Ignored
    }

    fn on_discover(&mut self, _place: &str, _ctx: &mut QuestContext) -> Progress {
        Progress::Ignored
    }

    fn on_interact(&mut self, _entity: &Entity, _ctx: &mut QuestContext) -> Progress {
        Progress::Ignored
    }

    fn on_level(&mut self, _entity: &Entity, _level: u32, _ctx: &mut QuestContext) -> Progress {
        Progress::Ignored
    }

    /// Author-defined events raised with [`QuestEvent::Custom`].
    fn on_event(&mut self, _name: &str, _payload: &dyn Any, _ctx: &mut QuestContext) -> Progress {
        Progress::Ignored
    }

    /// Routes an event to its handler.
    fn handle(&mut self, event: &QuestEvent<'_>, ctx: &mut QuestContext) -> Progress {
        match *event {
            QuestEvent::Death(entity) => self.on_death(entity, ctx),
            QuestEvent::Pickup(item) => self.on_pickup(item, ctx),
            QuestEvent::Discover(place) => self.on_discover(place, ctx),
            QuestEvent::Interact(entity) => self.on_interact(entity, ctx),
            QuestEvent::Level { entity, level } => self.on_level(entity, level, ctx),
            QuestEvent::Custom { name, payload } => self.on_event(name, payload, ctx),
        }
    }

    /// Runs once, after completion, from the reward pass.
    fn reward(&mut self, _ctx: &mut RewardContext<'_>) -> Flow {
        Ok(())
    }
}

/// Produces fresh quest instances.
pub type QuestFactory = Arc<dyn Fn() -> Box<dyn Quest> + Send + Sync>;

/// A registered quest kind.
#[derive(Clone)]
pub struct QuestDefinition {
    id: Kind,
    name: String,
    description: String,
    repeat_limit: Option<u32>,
    factory: QuestFactory,
}

impl QuestDefinition {
    pub fn new<F, Q>(id: impl Into<Kind>, name: impl Into<String>, factory: F) -> Self
    where
        F: Fn() -> Q + Send + Sync + 'static,
        Q: Quest + 'static,
    {
        Self {
            id: id.into(),
            name: name.into(),
            description: String::new(),
            repeat_limit: None,
            factory: Arc::new(move || Box::new(factory()) as Box<dyn Quest>),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// How many times the quest may be completed. Defaults to
    /// [`crate::GameConfig::default_repeat_limit`].
    pub fn with_repeat_limit(mut self, limit: u32) -> Self {
        self.repeat_limit = Some(limit);
        self
    }

    pub fn id(&self) -> &Kind {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn repeat_limit(&self) -> Option<u32> {
        self.repeat_limit
    }

    pub(crate) fn instantiate(&self) -> Box<dyn Quest> {
        (self.factory)()
    }
}

impl fmt::Debug for QuestDefinition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("QuestDefinition")
            .field("id", &self.id)
            .field("name", &self.name)
            .field("repeat_limit", &self.repeat_limit)
            .finish_non_exhaustive()
    }
}

// ============================================================================
// Quest Errors
// ============================================================================

/// Errors from quest registration and lifecycle operations.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum QuestError {
    #[error("unknown quest {0}")]
    UnknownQuest(Kind),

    #[error("quest {0} is already registered")]
    DuplicateQuest(Kind),

    #[error("quest {0} is already active")]
    AlreadyActive(Kind),

    #[error("quest {id} cannot be repeated (limit {limit})")]
    NotRepeatable { id: Kind, limit: u32 },

    #[error("quest {0} is not active")]
    NotActive(Kind),
}

impl GameError for QuestError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::AlreadyActive(_) | Self::NotRepeatable { .. } => ErrorSeverity::Recoverable,
            Self::UnknownQuest(_) | Self::DuplicateQuest(_) | Self::NotActive(_) => {
                ErrorSeverity::Validation
            }
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::UnknownQuest(_) => "QUEST_UNKNOWN",
            Self::DuplicateQuest(_) => "QUEST_DUPLICATE",
            Self::AlreadyActive(_) => "QUEST_ALREADY_ACTIVE",
            Self::NotRepeatable { .. } => "QUEST_NOT_REPEATABLE",
            Self::NotActive(_) => "QUEST_NOT_ACTIVE",
        }
    }
}
