//! Narrative sinks.

use std::sync::{Arc, Mutex, PoisonError};

use tracing::info;

/// Receives player-facing narrative (damage, level-ups, quest completion).
///
/// Fire-and-forget: the kernel never reads anything back.
pub trait Presenter {
    fn post(&mut self, text: &str);
}

impl<F> Presenter for F
where
    F: FnMut(&str),
{
    fn post(&mut self, text: &str) {
        self(text)
    }
}

/// Discards everything.
#[derive(Clone, Copy, Debug, Default)]
pub struct NullPresenter;

impl Presenter for NullPresenter {
    fn post(&mut self, _text: &str) {}
}

/// Forwards narrative to `tracing` at info level.
#[derive(Clone, Copy, Debug, Default)]
pub struct TracingPresenter;

impl Presenter for TracingPresenter {
    fn post(&mut self, text: &str) {
        info!(target: "adventure::narrative", "{text}");
    }
}

/// Records every line; clones share one buffer so a caller can keep a handle
/// after giving the presenter to a session.
#[derive(Clone, Debug, Default)]
pub struct Transcript {
    lines: Arc<Mutex<Vec<String>>>,
}

impl Transcript {
    pub fn new() -> Self {
        Self::default()
    }

    /// Copy of every line posted so far.
    pub fn lines(&self) -> Vec<String> {
        self.lines
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// True if some line equals `text` exactly.
    pub fn contains(&self, text: &str) -> bool {
        self.lines
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .any(|line| line == text)
    }

    pub fn clear(&self) {
        self.lines
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
    }
}

impl Presenter for Transcript {
    fn post(&mut self, text: &str) {
        self.lines
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(text.to_owned());
    }
}
