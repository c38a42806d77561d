//! Collaborator seams.
//!
//! The kernel never parses text, renders output or walks a map. It talks to
//! those layers through the traits here: a [`Presenter`] receives narrative,
//! an [`IntentSource`] supplies structured player decisions, a [`Location`]
//! is told which of its occupants died, and a [`World`] drives the session
//! loop.
mod input;
mod presenter;
mod world;

pub use input::{IntentSource, ScriptedIntents};
pub use presenter::{NullPresenter, Presenter, TracingPresenter, Transcript};
pub use world::{AsAny, Location, World};
