//! Mechanics kernel for turn-based RPG adventures.
//!
//! `adventure-core` defines the rules an author composes an adventure from:
//! derived stats, timed modifiers, equipment, abilities, experience levels,
//! quests and battles. All narrative leaves through the [`env::Presenter`]
//! held by the [`Session`], all player decisions arrive as structured
//! [`battle::Intent`] values, and the one outcome that crosses every layer,
//! the end of the session, travels as `Err(`[`EndGame`]`)` through `?`.
pub mod action;
pub mod battle;
pub mod config;
pub mod entity;
pub mod env;
pub mod error;
pub mod kind;
pub mod quest;
pub mod session;
pub mod stats;

pub use action::{ActionError, Resolution};
pub use battle::{
    AttackPlayer, Battle, BattleReport, BattleView, Behavior, Intent, Target, Turn, View,
    default_turn_order,
};
pub use config::GameConfig;
pub use entity::{
    Ability, CastContext, Consumable, Cost, Duration, Entity, Equipment, ExperienceLevels,
    Inventory, Item, Modifier, ModifierSet, QuestItem, Refresh, Requirements, Role, Slot,
};
pub use env::{
    IntentSource, Location, NullPresenter, Presenter, ScriptedIntents, TracingPresenter,
    Transcript, World,
};
pub use error::{EndGame, EndgameReason, ErrorSeverity, Flow, GameError};
pub use kind::Kind;
pub use quest::{
    Directive, Progress, Quest, QuestContext, QuestDefinition, QuestError, QuestEvent,
    QuestManager, RewardContext,
};
pub use session::Session;
pub use stats::{BaseStats, Bonus, BonusStack, DerivedStats, StatKind};
