//! Energy-gated actions.
//!
//! Casting is atomic: the cost is checked and deducted before the effect
//! runs, and a cast the user cannot afford changes nothing.

use std::fmt;
use std::sync::Arc;

use tracing::debug;

use crate::action::{ActionError, Resolution};
use crate::entity::Entity;
use crate::error::Flow;
use crate::kind::Kind;
use crate::session::Session;

/// Energy cost computed from `(user, target)`.
pub type CostFn = Arc<dyn Fn(&Entity, &Entity) -> u32 + Send + Sync>;

/// What a cast does once it has been paid for.
pub type CastFn = Arc<dyn Fn(&mut CastContext<'_>, &mut Session) -> Flow + Send + Sync>;

#[derive(Clone)]
pub enum Cost {
    Fixed(u32),
    Dynamic(CostFn),
}

impl Cost {
    pub fn dynamic<F>(cost: F) -> Self
    where
        F: Fn(&Entity, &Entity) -> u32 + Send + Sync + 'static,
    {
        Self::Dynamic(Arc::new(cost))
    }

    pub fn evaluate(&self, user: &Entity, target: &Entity) -> u32 {
        match self {
            Self::Fixed(cost) => *cost,
            Self::Dynamic(cost) => cost(user, target),
        }
    }
}

impl fmt::Debug for Cost {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Fixed(cost) => f.debug_tuple("Fixed").field(cost).finish(),
            Self::Dynamic(_) => f.write_str("Dynamic"),
        }
    }
}

/// The participants of a cast.
///
/// A self-cast has no separate target; [`CastContext::target`] then resolves
/// to the user.
pub struct CastContext<'a> {
    pub user: &'a mut Entity,
    target: Option<&'a mut Entity>,
}

impl<'a> CastContext<'a> {
    pub fn new(user: &'a mut Entity, target: Option<&'a mut Entity>) -> Self {
        Self { user, target }
    }

    /// The entity the ability is aimed at (the user for self-casts).
    pub fn target(&mut self) -> &mut Entity {
        match &mut self.target {
            Some(target) => &mut **target,
            None => &mut *self.user,
        }
    }

    pub fn is_self_cast(&self) -> bool {
        self.target.is_none()
    }

    /// Both sides at once, for effects that read the user while mutating
    /// the target. `None` for self-casts.
    pub fn pair(&mut self) -> Option<(&mut Entity, &mut Entity)> {
        let target = self.target.as_deref_mut()?;
        Some((&mut *self.user, target))
    }
}

#[derive(Clone)]
pub struct Ability {
    kind: Kind,
    name: String,
    description: String,
    cost: Cost,
    effect: CastFn,
}

impl Ability {
    pub fn new<F>(kind: impl Into<Kind>, name: impl Into<String>, cost: Cost, effect: F) -> Self
    where
        F: Fn(&mut CastContext<'_>, &mut Session) -> Flow + Send + Sync + 'static,
    {
        Self {
            kind: kind.into(),
            name: name.into(),
            description: String::new(),
            cost,
            effect: Arc::new(effect),
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

    pub fn cost(&self, user: &Entity, target: &Entity) -> u32 {
        self.cost.evaluate(user, target)
    }

    pub fn can_cast(&self, user: &Entity, target: &Entity) -> bool {
        user.energy() >= self.cost(user, target)
    }

    /// Pays the cost and runs the effect.
    ///
    /// An unaffordable cast posts a notice and is rejected with no energy
    /// deducted and no effect applied.
    pub fn cast(
        &self,
        user: &mut Entity,
        target: Option<&mut Entity>,
        session: &mut Session,
    ) -> Flow<Resolution> {
        let cost = match target.as_deref() {
            Some(target) => self.cost(user, target),
            None => self.cost(user, user),
        };
        let energy = user.energy();
        if energy < cost {
            session.post(format!(
                "{} does not have enough energy to cast {} ({cost} needed, {energy} left)",
                user.name(),
                self.name
            ));
            return Ok(Resolution::Rejected(ActionError::InsufficientEnergy {
                cost,
                energy,
            }));
        }

        user.use_energy(cost);
        debug!(
            target: "adventure::entity",
            ability = %self.kind,
            user = user.name(),
            cost,
            "ability cast"
        );
        session.post(format!("{} casts {}", user.name(), self.name));

        let mut context = CastContext::new(user, target);
        (self.effect)(&mut context, session)?;
        Ok(Resolution::Done)
    }
}

impl fmt::Debug for Ability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Ability")
            .field("kind", &self.kind)
            .field("name", &self.name)
            .field("cost", &self.cost)
            .finish_non_exhaustive()
    }
}
