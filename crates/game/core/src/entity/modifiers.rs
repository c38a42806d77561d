//! Timed stat contributions and periodic effects.
//!
//! A [`Modifier`] is stored on an entity under its [`Kind`]. Re-applying a
//! kind that is already present refreshes it instead of stacking: whichever
//! instance has the strictly greater [`Duration`] survives.
//!
//! Lifecycle per end-of-turn tick:
//!
//! ```text
//! active (Turns(n > 0) | Permanent)
//!    │  run effect once
//!    ▼
//! decrement (Permanent never decrements)
//!    │
//!    ▼
//! Turns(0) = expired ──► purged in the same tick
//! ```
//!
//! A modifier with `Turns(d)` therefore runs its effect exactly `d` times.

use std::fmt;
use std::sync::Arc;

use crate::entity::Entity;
use crate::error::Flow;
use crate::kind::Kind;
use crate::session::Session;
use crate::stats::StatKind;

/// Stat contribution computed from the bearer. Must be pure.
pub type BuffFn = Arc<dyn Fn(&Entity) -> i32 + Send + Sync>;

/// Side effect run on the bearer at each end-of-turn while unexpired.
pub type EffectFn = Arc<dyn Fn(&mut Entity, &mut Session) -> Flow + Send + Sync>;

/// Remaining lifetime of a modifier.
///
/// Ordering is part of the contract: `Permanent` compares greater than any
/// finite duration, so it always wins a refresh.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Duration {
    /// Turns remaining.
    Turns(u32),
    /// Lasts until the battle that applied it resolves.
    Permanent,
}

impl Duration {
    pub const fn is_expired(self) -> bool {
        matches!(self, Self::Turns(0))
    }

    pub const fn is_permanent(self) -> bool {
        matches!(self, Self::Permanent)
    }

    /// Turns left, `None` for permanent modifiers.
    pub const fn remaining(self) -> Option<u32> {
        match self {
            Self::Turns(turns) => Some(turns),
            Self::Permanent => None,
        }
    }

    /// Duration after one end-of-turn tick.
    pub const fn tick(self) -> Self {
        match self {
            Self::Turns(turns) => Self::Turns(turns.saturating_sub(1)),
            Self::Permanent => Self::Permanent,
        }
    }
}

impl fmt::Display for Duration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Turns(turns) => write!(f, "{turns} turns"),
            Self::Permanent => f.write_str("permanent"),
        }
    }
}

/// A timed stat delta and/or periodic effect attached to an entity.
#[derive(Clone)]
pub struct Modifier {
    kind: Kind,
    name: String,
    description: String,
    stat: StatKind,
    duration: Duration,
    buff: Option<BuffFn>,
    effect: Option<EffectFn>,
}

impl Modifier {
    /// A modifier that contributes `buff(bearer)` to `stat` while unexpired.
    pub fn stat_buff<F>(
        kind: impl Into<Kind>,
        name: impl Into<String>,
        stat: StatKind,
        duration: Duration,
        buff: F,
    ) -> Self
    where
        F: Fn(&Entity) -> i32 + Send + Sync + 'static,
    {
        Self {
            kind: kind.into(),
            name: name.into(),
            description: String::new(),
            stat,
            duration,
            buff: Some(Arc::new(buff)),
            effect: None,
        }
    }

    /// A modifier with no stat contribution that runs `effect` every
    /// end-of-turn while unexpired (poison, regeneration).
    pub fn periodic<F>(
        kind: impl Into<Kind>,
        name: impl Into<String>,
        duration: Duration,
        effect: F,
    ) -> Self
    where
        F: Fn(&mut Entity, &mut Session) -> Flow + Send + Sync + 'static,
    {
        Self {
            kind: kind.into(),
            name: name.into(),
            description: String::new(),
            stat: StatKind::None,
            duration,
            buff: None,
            effect: Some(Arc::new(effect)),
        }
    }

    /// Adds a periodic effect to a stat modifier (burn: attack down and
    /// damage each turn).
    pub fn with_effect<F>(mut self, effect: F) -> Self
    where
        F: Fn(&mut Entity, &mut Session) -> Flow + Send + Sync + 'static,
    {
        self.effect = Some(Arc::new(effect));
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Same modifier with a different duration; used to scale stock content.
    pub fn with_duration(mut self, duration: Duration) -> Self {
        self.duration = duration;
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

    pub fn stat(&self) -> StatKind {
        self.stat
    }

    pub fn duration(&self) -> Duration {
        self.duration
    }

    pub fn is_expired(&self) -> bool {
        self.duration.is_expired()
    }

    pub fn has_effect(&self) -> bool {
        self.effect.is_some()
    }

    /// Contribution to `stat` for the given bearer.
    ///
    /// Zero when the modifier targets another stat, has no buff, or is
    /// expired but not yet purged.
    pub fn contribution(&self, bearer: &Entity, stat: StatKind) -> i32 {
        if stat == StatKind::None || self.stat != stat || self.is_expired() {
            return 0;
        }
        self.buff.as_ref().map_or(0, |buff| buff(bearer))
    }

    pub(crate) fn effect_fn(&self) -> Option<EffectFn> {
        self.effect.clone()
    }

    pub(crate) fn tick(&mut self) {
        self.duration = self.duration.tick();
    }
}

impl fmt::Debug for Modifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Modifier")
            .field("kind", &self.kind)
            .field("name", &self.name)
            .field("stat", &self.stat)
            .field("duration", &self.duration)
            .field("buff", &self.buff.is_some())
            .field("effect", &self.effect.is_some())
            .finish()
    }
}

/// What [`ModifierSet::add`] did with the incoming modifier.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Refresh {
    /// No modifier of this kind was present.
    Installed,
    /// The incoming modifier outlasted the existing one and replaced it.
    Replaced,
    /// The existing modifier lasts at least as long; the incoming one was dropped.
    Kept,
}

/// Kind-keyed modifier collection in insertion order.
///
/// Insertion order is the tick order, which keeps end-of-turn effects
/// deterministic.
#[derive(Clone, Debug, Default)]
pub struct ModifierSet {
    entries: Vec<Modifier>,
}

impl ModifierSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Installs `modifier`, or refreshes an existing modifier of the same kind
    /// keeping whichever has the strictly greater duration.
    pub fn add(&mut self, modifier: Modifier) -> Refresh {
        match self.position(&modifier.kind) {
            None => {
                self.entries.push(modifier);
                Refresh::Installed
            }
            Some(index) if modifier.duration > self.entries[index].duration => {
                self.entries[index] = modifier;
                Refresh::Replaced
            }
            Some(_) => Refresh::Kept,
        }
    }

    /// Deletes a modifier by kind regardless of its remaining duration.
    pub fn remove(&mut self, kind: &str) -> Option<Modifier> {
        self.position(kind).map(|index| self.entries.remove(index))
    }

    pub fn get(&self, kind: &str) -> Option<&Modifier> {
        self.entries.iter().find(|m| m.kind == *kind)
    }

    pub(crate) fn get_mut(&mut self, kind: &str) -> Option<&mut Modifier> {
        self.entries.iter_mut().find(|m| m.kind == *kind)
    }

    pub fn contains(&self, kind: &str) -> bool {
        self.position(kind).is_some()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Modifier> {
        self.entries.iter()
    }

    /// Snapshot of the kinds currently installed, in tick order.
    pub fn kinds(&self) -> Vec<Kind> {
        self.entries.iter().map(|m| m.kind.clone()).collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Removes every expired modifier, returning how many were dropped.
    pub fn purge_expired(&mut self) -> usize {
        let before = self.entries.len();
        self.entries.retain(|m| !m.is_expired());
        before - self.entries.len()
    }

    /// Removes every permanent modifier (battle resolution).
    pub fn purge_permanent(&mut self) -> usize {
        let before = self.entries.len();
        self.entries.retain(|m| !m.duration.is_permanent());
        before - self.entries.len()
    }

    fn position(&self, kind: &str) -> Option<usize> {
        self.entries.iter().position(|m| m.kind == *kind)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn roar(turns: u32) -> Modifier {
        Modifier::stat_buff("war_roar", "War Roar", StatKind::Attack, Duration::Turns(turns), |_| 2)
    }

    #[test]
    fn permanent_outranks_any_finite_duration() {
        assert!(Duration::Permanent > Duration::Turns(u32::MAX));
        assert!(Duration::Turns(3) > Duration::Turns(2));
        assert_eq!(Duration::Permanent.tick(), Duration::Permanent);
        assert_eq!(Duration::Turns(0).tick(), Duration::Turns(0));
    }

    #[test]
    fn refresh_keeps_the_longer_duration() {
        let mut set = ModifierSet::new();
        assert_eq!(set.add(roar(2)), Refresh::Installed);
        assert_eq!(set.add(roar(5)), Refresh::Replaced);
        assert_eq!(set.add(roar(3)), Refresh::Kept);
        assert_eq!(set.add(roar(5)), Refresh::Kept);

        assert_eq!(set.len(), 1);
        assert_eq!(set.get("war_roar").map(Modifier::duration), Some(Duration::Turns(5)));
    }

    #[test]
    fn remove_ignores_duration() {
        let mut set = ModifierSet::new();
        set.add(roar(5).with_duration(Duration::Permanent));
        assert!(set.remove("war_roar").is_some());
        assert!(set.is_empty());
        assert!(set.remove("war_roar").is_none());
    }

    #[test]
    fn purge_drops_only_expired_entries() {
        let mut set = ModifierSet::new();
        set.add(roar(0));
        set.add(Modifier::stat_buff("insult", "Insult", StatKind::Defense, Duration::Turns(1), |_| -3));
        assert_eq!(set.purge_expired(), 1);
        assert_eq!(set.kinds(), vec![Kind::new("insult")]);
    }
}
