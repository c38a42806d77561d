//! Action outcomes shared by entities and battles.
mod error;

pub use error::{ActionError, Resolution};
