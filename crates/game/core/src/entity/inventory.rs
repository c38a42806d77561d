//! Carried items.
//!
//! The inventory is storage only. Raising `on_pickup`, equipping and using
//! consumables go through [`Entity`], which owns the slots and the session
//! hooks.

use std::fmt;
use std::sync::Arc;

use crate::entity::Entity;
use crate::entity::equipment::Equipment;
use crate::error::Flow;
use crate::kind::Kind;
use crate::session::Session;

/// Effect of a consumable on its target.
pub type UseFn = Arc<dyn Fn(&mut Entity, &mut Session) -> Flow + Send + Sync>;

/// A charged, single-target item (potions, scrolls).
#[derive(Clone)]
pub struct Consumable {
    kind: Kind,
    name: String,
    description: String,
    charges: u32,
    effect: UseFn,
}

impl Consumable {
    pub fn new<F>(kind: impl Into<Kind>, name: impl Into<String>, charges: u32, effect: F) -> Self
    where
        F: Fn(&mut Entity, &mut Session) -> Flow + Send + Sync + 'static,
    {
        Self {
            kind: kind.into(),
            name: name.into(),
            description: String::new(),
            charges,
            effect: Arc::new(effect),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_charges(mut self, charges: u32) -> Self {
        self.charges = charges;
        self
    }

    pub fn kind(&self) -> &Kind {
        &self.kind
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn charges(&self) -> u32 {
        self.charges
    }

    /// Spends one charge and hands back the effect to run, or `None` when
    /// the item is used up.
    pub(crate) fn spend(&mut self) -> Option<UseFn> {
        if self.charges == 0 {
            return None;
        }
        self.charges -= 1;
        Some(Arc::clone(&self.effect))
    }
}

impl fmt::Debug for Consumable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Consumable")
            .field("kind", &self.kind)
            .field("name", &self.name)
            .field("charges", &self.charges)
            .finish_non_exhaustive()
    }
}

/// An inert item that exists for quests to look for.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct QuestItem {
    kind: Kind,
    name: String,
    description: String,
}

impl QuestItem {
    pub fn new(kind: impl Into<Kind>, name: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            name: name.into(),
            description: String::new(),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn kind(&self) -> &Kind {
        &self.kind
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> &str {
        &self.description
    }
}

#[derive(Clone, Debug)]
pub enum Item {
    Equipment(Equipment),
    Consumable(Consumable),
    Quest(QuestItem),
}

impl Item {
    pub fn kind(&self) -> &Kind {
        match self {
            Self::Equipment(item) => item.kind(),
            Self::Consumable(item) => item.kind(),
            Self::Quest(item) => item.kind(),
        }
    }

    pub fn name(&self) -> &str {
        match self {
            Self::Equipment(item) => item.name(),
            Self::Consumable(item) => item.name(),
            Self::Quest(item) => item.name(),
        }
    }
}

impl From<Equipment> for Item {
    fn from(item: Equipment) -> Self {
        Self::Equipment(item)
    }
}

impl From<Consumable> for Item {
    fn from(item: Consumable) -> Self {
        Self::Consumable(item)
    }
}

impl From<QuestItem> for Item {
    fn from(item: QuestItem) -> Self {
        Self::Quest(item)
    }
}

#[derive(Clone, Debug, Default)]
pub struct Inventory {
    equipment: Vec<Equipment>,
    consumables: Vec<Consumable>,
    quest_items: Vec<QuestItem>,
}

impl Inventory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores an item. A consumable whose kind is already carried merges its
    /// charges into the existing stack.
    pub(crate) fn insert(&mut self, item: Item) {
        match item {
            Item::Equipment(item) => self.equipment.push(item),
            Item::Consumable(item) => {
                match self.consumables.iter_mut().find(|c| c.kind == item.kind) {
                    Some(stack) => stack.charges = stack.charges.saturating_add(item.charges),
                    None => self.consumables.push(item),
                }
            }
            Item::Quest(item) => self.quest_items.push(item),
        }
    }

    /// Removes and returns the first item of this kind.
    pub fn remove(&mut self, kind: &str) -> Option<Item> {
        if let Some(index) = self.equipment.iter().position(|e| *e.kind() == *kind) {
            return Some(Item::Equipment(self.equipment.remove(index)));
        }
        if let Some(index) = self.consumables.iter().position(|c| c.kind == *kind) {
            return Some(Item::Consumable(self.consumables.remove(index)));
        }
        self.quest_items
            .iter()
            .position(|q| q.kind == *kind)
            .map(|index| Item::Quest(self.quest_items.remove(index)))
    }

    pub(crate) fn take_equipment(&mut self, kind: &str) -> Option<Equipment> {
        let index = self.equipment.iter().position(|e| *e.kind() == *kind)?;
        Some(self.equipment.remove(index))
    }

    pub(crate) fn consumable_mut(&mut self, kind: &str) -> Option<&mut Consumable> {
        self.consumables.iter_mut().find(|c| c.kind == *kind)
    }

    pub fn consumable(&self, kind: &str) -> Option<&Consumable> {
        self.consumables.iter().find(|c| c.kind == *kind)
    }

    pub fn contains(&self, kind: &str) -> bool {
        self.equipment.iter().any(|e| *e.kind() == *kind)
            || self.consumables.iter().any(|c| c.kind == *kind)
            || self.quest_items.iter().any(|q| q.kind == *kind)
    }

    pub fn equipment(&self) -> &[Equipment] {
        &self.equipment
    }

    pub fn consumables(&self) -> &[Consumable] {
        &self.consumables
    }

    pub fn quest_items(&self) -> &[QuestItem] {
        &self.quest_items
    }

    /// Display names of everything carried, equipment first.
    pub fn names(&self) -> Vec<String> {
        let equipment = self.equipment.iter().map(|e| e.name().to_owned());
        let consumables = self
            .consumables
            .iter()
            .map(|c| format!("{} ({} charges)", c.name, c.charges));
        let quest_items = self.quest_items.iter().map(|q| q.name.clone());
        equipment.chain(consumables).chain(quest_items).collect()
    }

    pub fn len(&self) -> usize {
        self.equipment.len() + self.consumables.len() + self.quest_items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn potion(charges: u32) -> Consumable {
        Consumable::new("health_potion", "Health Potion", charges, |_, _| Ok(()))
    }

    #[test]
    fn consumables_of_one_kind_share_a_stack() {
        let mut inventory = Inventory::new();
        inventory.insert(potion(1).into());
        inventory.insert(potion(2).into());

        assert_eq!(inventory.consumables().len(), 1);
        assert_eq!(inventory.consumable("health_potion").map(Consumable::charges), Some(3));
    }

    #[test]
    fn empty_consumable_yields_no_effect() {
        let mut item = potion(1);
        assert!(item.spend().is_some());
        assert!(item.spend().is_none());
        assert_eq!(item.charges(), 0);
    }

    #[test]
    fn remove_finds_every_item_category() {
        let mut inventory = Inventory::new();
        inventory.insert(Equipment::weapon("sword", "Sword").into());
        inventory.insert(QuestItem::new("goblin_ear", "Goblin Ear").into());

        assert!(inventory.contains("goblin_ear"));
        assert!(matches!(inventory.remove("goblin_ear"), Some(Item::Quest(_))));
        assert!(matches!(inventory.remove("sword"), Some(Item::Equipment(_))));
        assert!(inventory.is_empty());
    }
}
