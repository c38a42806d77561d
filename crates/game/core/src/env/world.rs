//! World and location seams.

use std::any::Any;

use crate::entity::Entity;
use crate::error::{EndGame, Flow};
use crate::session::Session;

/// Upcast helper so rewards can reach the concrete world type.
pub trait AsAny: Any {
    fn as_any(&self) -> &dyn Any;
    fn as_any_mut(&mut self) -> &mut dyn Any;
}

impl<T: Any> AsAny for T {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

/// A place that can host a battle.
pub trait Location {
    /// Called once after a won battle with every defeated occupant.
    fn purge_dead(&mut self, defeated: &[Entity]);
}

/// The author's adventure: navigation, encounters, scripted scenes.
///
/// [`Session::run`] calls [`World::step`] once per loop iteration and
/// processes pending quest rewards after each step.
pub trait World: AsAny {
    fn step(&mut self, player: &mut Entity, session: &mut Session) -> Flow;

    /// Called once with the outcome that ended the session.
    fn end_game(&mut self, outcome: &EndGame, _player: &mut Entity, session: &mut Session) {
        session.post(&outcome.message);
    }
}
