//! Gameplay events delivered to active quests.

use std::any::Any;
use std::fmt;

use crate::entity::{Entity, Item};

/// A named gameplay event with a borrowed payload.
///
/// Events are raised through [`crate::Session::raise`] and dispatched to
/// every active, unpaused quest.
#[derive(Clone, Copy)]
pub enum QuestEvent<'a> {
    /// An entity's health reached zero.
    Death(&'a Entity),
    /// An item was added to an inventory.
    Pickup(&'a Item),
    /// A location was discovered.
    Discover(&'a str),
    /// The player interacted with an entity.
    Interact(&'a Entity),
    /// An entity reached a new level.
    Level { entity: &'a Entity, level: u32 },
    /// Author-defined event.
    Custom { name: &'a str, payload: &'a dyn Any },
}

impl<'a> QuestEvent<'a> {
    pub fn custom(name: &'a str, payload: &'a dyn Any) -> Self {
        Self::Custom { name, payload }
    }

    /// Handler name the event is delivered to.
    pub fn name(&self) -> &'a str {
        match self {
            Self::Death(_) => "on_death",
            Self::Pickup(_) => "on_pickup",
            Self::Discover(_) => "on_discover",
            Self::Interact(_) => "on_interact",
            Self::Level { .. } => "on_level",
            Self::Custom { name, .. } => *name,
        }
    }
}

impl fmt::Debug for QuestEvent<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Death(entity) => f.debug_tuple("Death").field(&entity.name()).finish(),
            Self::Pickup(item) => f.debug_tuple("Pickup").field(item.kind()).finish(),
            Self::Discover(place) => f.debug_tuple("Discover").field(place).finish(),
            Self::Interact(entity) => f.debug_tuple("Interact").field(&entity.name()).finish(),
            Self::Level { entity, level } => f
                .debug_struct("Level")
                .field("entity", &entity.name())
                .field("level", level)
                .finish(),
            Self::Custom { name, .. } => f.debug_struct("Custom").field("name", name).finish(),
        }
    }
}
