//! Entities: players, enemies and NPCs.
//!
//! An [`Entity`] stores only its baseline stats and current health/energy.
//! Attack, defense and both maxima are derived on every read from the
//! baseline, unexpired modifiers and the two equipment slots (see
//! [`crate::stats`]). Current health and energy are always reported against
//! the live maxima, so a debuff that lowers max health is visible on the next
//! read without any bookkeeping.
mod abilities;
mod equipment;
mod inventory;
mod levels;
mod modifiers;

use std::fmt;
use std::sync::Arc;

use tracing::{debug, trace};

pub use abilities::{Ability, CastContext, CastFn, Cost, CostFn};
pub use equipment::{DynamicBonusFn, Equipment, OnHitFn, Slot};
pub use inventory::{Consumable, Inventory, Item, QuestItem, UseFn};
pub use levels::{ExperienceLevels, LevelRewardFn, Requirements};
pub use modifiers::{BuffFn, Duration, EffectFn, Modifier, ModifierSet, Refresh};

use crate::action::{ActionError, Resolution};
use crate::battle::Behavior;
use crate::error::{EndGame, Flow};
use crate::quest::QuestEvent;
use crate::session::Session;
use crate::stats::{BaseStats, Bonus, BonusStack, DerivedStats, StatKind};

/// What part an entity plays in the adventure.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Role {
    /// The distinguished entity whose death ends the session.
    Player,
    /// A hostile that grants `experience_yield` when defeated.
    Enemy { experience_yield: u32 },
    Npc,
}

#[derive(Clone)]
pub struct Entity {
    name: String,
    description: String,
    role: Role,
    base: BaseStats,
    health: u32,
    energy: u32,
    weapon: Equipment,
    armor: Equipment,
    inventory: Inventory,
    modifiers: ModifierSet,
    abilities: Vec<Ability>,
    experience: ExperienceLevels,
    money: u64,
    interacted: bool,
    behavior: Option<Arc<dyn Behavior>>,
}

impl Entity {
    /// Creates an entity at full health and energy wearing placeholder gear.
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        role: Role,
        base: BaseStats,
    ) -> Self {
        let mut entity = Self {
            name: name.into(),
            description: description.into(),
            role,
            base,
            health: 0,
            energy: 0,
            weapon: Equipment::bare_hands(),
            armor: Equipment::linen_clothes(),
            inventory: Inventory::new(),
            modifiers: ModifierSet::new(),
            abilities: Vec::new(),
            experience: ExperienceLevels::disabled(),
            money: 0,
            interacted: false,
            behavior: None,
        };
        entity.replenish();
        entity
    }

    pub fn player(name: impl Into<String>, description: impl Into<String>, base: BaseStats) -> Self {
        Self::new(name, description, Role::Player, base)
    }

    pub fn enemy(
        name: impl Into<String>,
        description: impl Into<String>,
        base: BaseStats,
        experience_yield: u32,
    ) -> Self {
        Self::new(name, description, Role::Enemy { experience_yield }, base)
    }

    pub fn npc(name: impl Into<String>, description: impl Into<String>, base: BaseStats) -> Self {
        Self::new(name, description, Role::Npc, base)
    }

    // ------------------------------------------------------------------------
    // Builders
    // ------------------------------------------------------------------------

    /// Equips a weapon at construction. Health and energy are refilled to the
    /// new maxima.
    pub fn with_weapon(mut self, weapon: Equipment) -> Self {
        self.weapon = weapon;
        self.replenish();
        self
    }

    pub fn with_armor(mut self, armor: Equipment) -> Self {
        self.armor = armor;
        self.replenish();
        self
    }

    /// Installs a modifier at construction, before the entity is in play.
    /// Health and energy are clamped to the resulting maxima without raising
    /// any event.
    pub fn with_modifier(mut self, modifier: Modifier) -> Self {
        self.modifiers.add(modifier);
        self.health = self.health();
        self.energy = self.energy();
        self
    }

    pub fn with_ability(mut self, ability: Ability) -> Self {
        self.add_ability(ability);
        self
    }

    pub fn with_experience(mut self, experience: ExperienceLevels) -> Self {
        self.experience = experience;
        self
    }

    pub fn with_money(mut self, money: u64) -> Self {
        self.money = money;
        self
    }

    /// Stores an item without raising `on_pickup` (starting kit).
    pub fn with_item(mut self, item: impl Into<Item>) -> Self {
        self.inventory.insert(item.into());
        self
    }

    pub fn with_behavior(mut self, behavior: impl Behavior + 'static) -> Self {
        self.behavior = Some(Arc::new(behavior));
        self
    }

    // ------------------------------------------------------------------------
    // Identity
    // ------------------------------------------------------------------------

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn role(&self) -> Role {
        self.role
    }

    pub fn is_player(&self) -> bool {
        matches!(self.role, Role::Player)
    }

    /// Experience granted to the player when this entity is defeated.
    pub fn experience_yield(&self) -> u32 {
        match self.role {
            Role::Enemy { experience_yield } => experience_yield,
            Role::Player | Role::Npc => 0,
        }
    }

    pub fn behavior(&self) -> Option<&Arc<dyn Behavior>> {
        self.behavior.as_ref()
    }

    // ------------------------------------------------------------------------
    // Derived stats
    // ------------------------------------------------------------------------

    pub fn base(&self) -> &BaseStats {
        &self.base
    }

    /// Mutable baseline, for level-up rewards. Call [`Entity::settle`] after
    /// lowering a maximum so a resulting death is reported.
    pub fn base_mut(&mut self) -> &mut BaseStats {
        &mut self.base
    }

    /// `max(0, base + modifier buffs + equipment bonuses)` for one stat.
    pub fn stat(&self, stat: StatKind) -> u32 {
        let mut bonuses = BonusStack::new();
        bonuses.extend(self.contributions(stat));
        bonuses.apply(stat, self.base.get(stat))
    }

    pub fn attack(&self) -> u32 {
        self.stat(StatKind::Attack)
    }

    pub fn defense(&self) -> u32 {
        self.stat(StatKind::Defense)
    }

    pub fn max_health(&self) -> u32 {
        self.stat(StatKind::MaxHealth)
    }

    pub fn max_energy(&self) -> u32 {
        self.stat(StatKind::MaxEnergy)
    }

    /// Snapshot of every derived stat.
    pub fn stats(&self) -> DerivedStats {
        let bonuses: BonusStack = StatKind::DERIVED
            .into_iter()
            .flat_map(|stat| self.contributions(stat))
            .collect();
        DerivedStats::compute(&self.base, &bonuses)
    }

    fn contributions(&self, stat: StatKind) -> impl Iterator<Item = Bonus> + '_ {
        let modifiers = self
            .modifiers
            .iter()
            .map(move |m| Bonus::new(stat, m.contribution(self, stat)));
        let equipment = [&self.weapon, &self.armor]
            .into_iter()
            .map(move |e| Bonus::new(stat, e.contribution(self, stat)));
        modifiers.chain(equipment)
    }

    // ------------------------------------------------------------------------
    // Health and energy
    // ------------------------------------------------------------------------

    /// Current health, never above the live max health.
    pub fn health(&self) -> u32 {
        self.health.min(self.max_health())
    }

    /// Current energy, never above the live max energy.
    pub fn energy(&self) -> u32 {
        self.energy.min(self.max_energy())
    }

    pub fn is_alive(&self) -> bool {
        self.health() > 0
    }

    /// Writes health clamped to `[0, max_health]`.
    ///
    /// A write that leaves health at zero is lethal: `on_death` is raised when
    /// the entity goes from alive to dead, and for the player every lethal
    /// write returns [`EndGame::zero_health`].
    pub fn set_health(&mut self, value: i64, session: &mut Session) -> Flow {
        let was_alive = self.health > 0;
        let max = i64::from(self.max_health());
        self.health = value.clamp(0, max) as u32;

        if self.health > 0 {
            return Ok(());
        }
        if was_alive {
            self.die(session);
        }
        if self.is_player() {
            return Err(EndGame::zero_health());
        }
        Ok(())
    }

    fn die(&mut self, session: &mut Session) {
        debug!(target: "adventure::entity", entity = %self.name, "entity died");
        session.raise(QuestEvent::Death(self));
    }

    /// Writes energy clamped to `[0, max_energy]`.
    pub fn set_energy(&mut self, value: i64) {
        let max = i64::from(self.max_energy());
        self.energy = value.clamp(0, max) as u32;
    }

    /// Defense-reduced damage, never less than the configured minimum.
    /// Returns the damage dealt.
    pub fn take_damage(&mut self, value: u32, session: &mut Session) -> Flow<u32> {
        let reduced = value.saturating_sub(self.defense());
        let dealt = reduced.max(session.config().minimum_damage);
        self.lose_health(dealt, session)
    }

    /// Damage that bypasses defense (poison, burns, spells).
    pub fn take_pure_damage(&mut self, value: u32, session: &mut Session) -> Flow<u32> {
        self.lose_health(value, session)
    }

    fn lose_health(&mut self, amount: u32, session: &mut Session) -> Flow<u32> {
        session.post(format!("{} took {amount} damage", self.name));
        let health = i64::from(self.health()) - i64::from(amount);
        self.set_health(health, session)?;
        Ok(amount)
    }

    /// Heals up to max health; returns the health actually restored.
    pub fn restore_health(&mut self, value: u32, session: &mut Session) -> Flow<u32> {
        let before = self.health();
        self.set_health(i64::from(before) + i64::from(value), session)?;
        let restored = self.health() - before;
        session.post(format!("{} restored {restored} health", self.name));
        Ok(restored)
    }

    /// Spends energy, stopping at zero.
    pub fn use_energy(&mut self, value: u32) {
        self.set_energy(i64::from(self.energy()) - i64::from(value));
    }

    /// Regains energy up to max energy.
    pub fn gain_energy(&mut self, value: u32) {
        self.set_energy(i64::from(self.energy()) + i64::from(value));
    }

    /// Writes stored health/energy back into the live maxima.
    ///
    /// Every change that can lower a maximum ends here. If the new maximum
    /// leaves a living entity at zero health it dies as if struck: `on_death`
    /// is raised and the player's death returns [`EndGame::zero_health`].
    pub fn settle(&mut self, session: &mut Session) -> Flow {
        let was_alive = self.health > 0;
        self.health = self.health();
        self.energy = self.energy();

        if was_alive && self.health == 0 {
            self.die(session);
            if self.is_player() {
                return Err(EndGame::zero_health());
            }
        }
        Ok(())
    }

    fn replenish(&mut self) {
        self.health = self.max_health();
        self.energy = self.max_energy();
    }

    // ------------------------------------------------------------------------
    // Combat
    // ------------------------------------------------------------------------

    /// Hits `target` with this entity's attack, then fires the attacker's
    /// weapon hook and the target's armor hook. Returns the damage dealt.
    pub fn do_attack(&mut self, target: &mut Entity, session: &mut Session) -> Flow<u32> {
        session.post(format!("{} attacks {}", self.name, target.name));
        let dealt = target.take_damage(self.attack(), session)?;

        if let Some(on_hit) = self.weapon.on_hit_fn() {
            on_hit(self, target, session)?;
        }
        if let Some(on_hit) = target.armor.on_hit_fn() {
            on_hit(target, self, session)?;
        }
        Ok(dealt)
    }

    // ------------------------------------------------------------------------
    // Modifiers
    // ------------------------------------------------------------------------

    pub fn modifiers(&self) -> &ModifierSet {
        &self.modifiers
    }

    /// Installs or refreshes a modifier by kind.
    pub fn add_modifier(&mut self, modifier: Modifier, session: &mut Session) -> Flow<Refresh> {
        trace!(
            target: "adventure::entity",
            entity = %self.name,
            modifier = %modifier.kind(),
            duration = %modifier.duration(),
            "adding modifier"
        );
        let refresh = self.modifiers.add(modifier);
        self.settle(session)?;
        Ok(refresh)
    }

    /// Removes a modifier immediately, whatever its remaining duration.
    pub fn remove_modifier(&mut self, kind: &str, session: &mut Session) -> Flow<Option<Modifier>> {
        let removed = self.modifiers.remove(kind);
        self.settle(session)?;
        Ok(removed)
    }

    /// Clears modifiers that last until the end of a battle.
    pub fn clear_permanent_modifiers(&mut self, session: &mut Session) -> Flow {
        if self.modifiers.purge_permanent() > 0 {
            self.settle(session)?;
        }
        Ok(())
    }

    /// End-of-turn tick over every modifier, in insertion order.
    ///
    /// Each unexpired modifier runs its effect once and then loses one turn;
    /// modifiers that reach zero are purged before returning.
    pub fn end_turn(&mut self, session: &mut Session) -> Flow {
        for kind in self.modifiers.kinds() {
            let effect = match self.modifiers.get(&kind) {
                Some(modifier) if !modifier.is_expired() => modifier.effect_fn(),
                _ => continue,
            };
            if let Some(effect) = effect {
                effect(self, session)?;
            }
            if let Some(modifier) = self.modifiers.get_mut(&kind) {
                modifier.tick();
            }
        }

        let purged = self.modifiers.purge_expired();
        if purged > 0 {
            trace!(target: "adventure::entity", entity = %self.name, purged, "modifiers expired");
        }
        self.settle(session)
    }

    // ------------------------------------------------------------------------
    // Abilities
    // ------------------------------------------------------------------------

    pub fn abilities(&self) -> &[Ability] {
        &self.abilities
    }

    pub fn ability(&self, kind: &str) -> Option<&Ability> {
        self.abilities.iter().find(|a| *a.kind() == *kind)
    }

    /// Learns an ability, replacing any ability of the same kind.
    pub fn add_ability(&mut self, ability: Ability) {
        match self.abilities.iter_mut().find(|a| a.kind() == ability.kind()) {
            Some(existing) => *existing = ability,
            None => self.abilities.push(ability),
        }
    }

    pub fn remove_ability(&mut self, kind: &str) -> Option<Ability> {
        let index = self.abilities.iter().position(|a| *a.kind() == *kind)?;
        Some(self.abilities.remove(index))
    }

    /// Casts a known ability on `target`, or on this entity when `None`.
    pub fn use_ability(
        &mut self,
        kind: &str,
        target: Option<&mut Entity>,
        session: &mut Session,
    ) -> Flow<Resolution> {
        let Some(ability) = self.ability(kind).cloned() else {
            session.post(format!("{} does not know {kind}", self.name));
            return Ok(Resolution::Rejected(ActionError::UnknownAbility(kind.into())));
        };
        ability.cast(self, target, session)
    }

    // ------------------------------------------------------------------------
    // Inventory and equipment
    // ------------------------------------------------------------------------

    pub fn inventory(&self) -> &Inventory {
        &self.inventory
    }

    pub fn weapon(&self) -> &Equipment {
        &self.weapon
    }

    pub fn armor(&self) -> &Equipment {
        &self.armor
    }

    /// Stores an item and raises `on_pickup`.
    pub fn add_to_inventory(&mut self, item: impl Into<Item>, session: &mut Session) {
        let item = item.into();
        session.post(format!("{} picked up {}", self.name, item.name()));
        session.raise(QuestEvent::Pickup(&item));
        self.inventory.insert(item);
    }

    /// Removes an item without raising any event.
    pub fn remove_from_inventory(&mut self, kind: &str) -> Option<Item> {
        self.inventory.remove(kind)
    }

    /// Swaps a carried weapon or armor into its slot.
    ///
    /// The outgoing piece goes back into the inventory unless it is a
    /// placeholder.
    pub fn equip(&mut self, kind: &str, session: &mut Session) -> Flow<Resolution> {
        let Some(incoming) = self.inventory.take_equipment(kind) else {
            let error = if self.inventory.contains(kind) {
                ActionError::NotEquipment(kind.into())
            } else {
                ActionError::UnknownItem(kind.into())
            };
            session.post(format!("{} cannot equip {kind}", self.name));
            return Ok(Resolution::Rejected(error));
        };

        session.post(format!("{} equipped {}", self.name, incoming.name()));
        let slot = match incoming.slot() {
            Slot::Weapon => &mut self.weapon,
            Slot::Armor => &mut self.armor,
        };
        let outgoing = std::mem::replace(slot, incoming);
        if !outgoing.is_placeholder() {
            self.inventory.insert(Item::Equipment(outgoing));
        }
        self.settle(session)?;
        Ok(Resolution::Done)
    }

    /// Returns the piece in `slot` to the inventory and puts the placeholder on.
    pub fn unequip(&mut self, slot: Slot, session: &mut Session) -> Flow {
        let current = match slot {
            Slot::Weapon => &mut self.weapon,
            Slot::Armor => &mut self.armor,
        };
        let outgoing = std::mem::replace(current, Equipment::placeholder(slot));
        if !outgoing.is_placeholder() {
            self.inventory.insert(Item::Equipment(outgoing));
        }
        self.settle(session)
    }

    /// Uses one charge of a carried consumable on `target` (or on this entity).
    pub fn use_item(
        &mut self,
        kind: &str,
        target: Option<&mut Entity>,
        session: &mut Session,
    ) -> Flow<Resolution> {
        let Some(consumable) = self.inventory.consumable_mut(kind) else {
            session.post(format!("{} has no {kind}", self.name));
            return Ok(Resolution::Rejected(ActionError::UnknownItem(kind.into())));
        };
        let name = consumable.name().to_owned();
        let Some(effect) = consumable.spend() else {
            session.post(format!("{name} has no charges left"));
            return Ok(Resolution::Rejected(ActionError::NoCharges {
                item: kind.into(),
            }));
        };

        session.post(format!("{} used {name}", self.name));
        match target {
            Some(target) => effect(target, session)?,
            None => effect(self, session)?,
        }
        Ok(Resolution::Done)
    }

    // ------------------------------------------------------------------------
    // Experience
    // ------------------------------------------------------------------------

    pub fn experience(&self) -> &ExperienceLevels {
        &self.experience
    }

    pub fn level(&self) -> u32 {
        self.experience.level()
    }

    /// Banks experience and applies every level-up it pays for, in order.
    ///
    /// Each new level runs its reward (or posts the default notice) and then
    /// raises `on_level`. Negative values reduce the bank, never below zero.
    pub fn gain_experience(&mut self, value: i64, session: &mut Session) -> Flow {
        self.experience.bank(value);
        while let Some(level) = self.experience.try_level_up() {
            debug!(target: "adventure::levels", entity = %self.name, level, "level up");
            match self.experience.reward_for(level) {
                Some(reward) => {
                    reward(self, level, session)?;
                    self.settle(session)?;
                }
                None => session.post(format!("You leveled up! You are now level {level}")),
            }
            session.raise(QuestEvent::Level {
                entity: self,
                level,
            });
        }
        Ok(())
    }

    // ------------------------------------------------------------------------
    // Money and interaction
    // ------------------------------------------------------------------------

    pub fn money(&self) -> u64 {
        self.money
    }

    pub fn add_money(&mut self, amount: u64) {
        self.money = self.money.saturating_add(amount);
    }

    /// Spends money, stopping at zero.
    pub fn remove_money(&mut self, amount: u64) {
        self.money = self.money.saturating_sub(amount);
    }

    pub fn interacted(&self) -> bool {
        self.interacted
    }

    /// Marks the entity as talked to and raises `on_interact`.
    pub fn interact(&mut self, session: &mut Session) {
        self.interacted = true;
        session.raise(QuestEvent::Interact(self));
    }

    /// Posts a stat sheet through the presenter.
    pub fn print_stats(&self, session: &mut Session) {
        let stats = self.stats();
        session.post(format!(
            "{}\n- Health: {}/{}\n- Energy: {}/{}\n- Attack: {}\n- Defense: {}\n- Level: {}",
            self.name,
            self.health(),
            stats.max_health,
            self.energy(),
            stats.max_energy,
            stats.attack,
            stats.defense,
            self.level()
        ));
    }
}

impl fmt::Debug for Entity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Entity")
            .field("name", &self.name)
            .field("role", &self.role)
            .field("health", &self.health())
            .field("energy", &self.energy())
            .field("base", &self.base)
            .field("weapon", self.weapon.kind())
            .field("armor", self.armor.kind())
            .field("modifiers", &self.modifiers.kinds())
            .field("experience", &self.experience)
            .finish_non_exhaustive()
    }
}
