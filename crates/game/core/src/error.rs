//! Common error infrastructure for adventure-core.
//!
//! This module provides shared types and traits used across all error types in the kernel.
//! Domain-specific errors (e.g., `QuestError`, `ActionError`) are defined in their
//! respective modules alongside the operations they validate.
//!
//! # Design Principles
//!
//! - **Type Safety**: Each subsystem has its own error type with specific variants
//! - **Severity Classification**: Errors are categorized for recovery strategies
//! - **Outcome vs Error**: [`EndGame`] is not a failure, it is the session outcome
//!   and is propagated with `?` through entity, battle and world layers

/// Severity level of an error, used for categorization and recovery strategies.
///
/// Errors are classified by their recoverability and expected handling:
/// - **Recoverable**: Expected conditions; surface a notice and leave state unchanged
/// - **Validation**: Invalid input that should be rejected without retry
/// - **Fatal**: Unrecoverable errors indicating corrupted game state
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ErrorSeverity {
    /// Recoverable error - can retry with same or alternative action.
    ///
    /// Examples: ability unaffordable, quest already active
    Recoverable,

    /// Validation error - invalid input, should not retry without changes.
    ///
    /// Examples: unknown quest id, invalid target index
    Validation,

    /// Fatal error - game state corrupted, cannot continue.
    Fatal,
}

impl ErrorSeverity {
    /// Returns a human-readable description of this severity level.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Recoverable => "recoverable",
            Self::Validation => "validation",
            Self::Fatal => "fatal",
        }
    }

    /// Returns true if this error is potentially recoverable.
    pub const fn is_recoverable(&self) -> bool {
        matches!(self, Self::Recoverable)
    }
}

/// Common trait for all adventure-core errors.
///
/// This trait provides a uniform interface for error classification across
/// all error types in the crate.
///
/// # Implementation Guidelines
///
/// - All error enums should implement this trait
/// - Use `#[derive(thiserror::Error)]` for Display/Error impl
/// - Classify severity based on recoverability, not impact
pub trait GameError: core::fmt::Display + core::fmt::Debug {
    /// Returns the severity level of this error.
    fn severity(&self) -> ErrorSeverity;

    /// Returns a static string identifier for this error variant.
    ///
    /// Default implementation uses the error type name.
    fn error_code(&self) -> &'static str {
        core::any::type_name::<Self>()
    }
}

/// Why a session ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::IntoStaticStr)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum EndgameReason {
    /// The player's health reached zero.
    ZeroHealth,
    /// A scripted objective can no longer be completed.
    FailedObjective,
    /// The adventure was won.
    Victory,
}

/// Terminal session outcome.
///
/// Raised by the player's health setter on death, or by author code (a quest
/// reward, an enemy script) to end the adventure. It unwinds battle and world
/// loops through `?` and is only handled by [`crate::Session::run`].
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[error("game over ({reason}): {message}")]
pub struct EndGame {
    pub message: String,
    pub victory: bool,
    pub reason: EndgameReason,
}

impl EndGame {
    pub fn new(message: impl Into<String>, victory: bool, reason: EndgameReason) -> Self {
        Self {
            message: message.into(),
            victory,
            reason,
        }
    }

    /// Outcome raised when the player dies.
    pub fn zero_health() -> Self {
        Self::new(
            "Looks like you've died, better luck next time.",
            false,
            EndgameReason::ZeroHealth,
        )
    }

    /// Winning outcome with a custom message.
    pub fn victory(message: impl Into<String>) -> Self {
        Self::new(message, true, EndgameReason::Victory)
    }

    /// Losing outcome for an objective that can no longer be met.
    pub fn failed(message: impl Into<String>) -> Self {
        Self::new(message, false, EndgameReason::FailedObjective)
    }
}

impl GameError for EndGame {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Fatal
    }

    fn error_code(&self) -> &'static str {
        self.reason.into()
    }
}

/// Result alias for operations that may end the session.
pub type Flow<T = ()> = Result<T, EndGame>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_health_is_a_loss() {
        let outcome = EndGame::zero_health();
        assert!(!outcome.victory);
        assert_eq!(outcome.reason, EndgameReason::ZeroHealth);
        assert_eq!(outcome.error_code(), "zero_health");
    }

    #[test]
    fn outcomes_are_fatal() {
        let severity = EndGame::failed("The bridge is gone.").severity();
        assert_eq!(severity, ErrorSeverity::Fatal);
        assert_eq!(severity.as_str(), "fatal");
        assert!(!severity.is_recoverable());
    }

    #[test]
    fn display_includes_reason() {
        let outcome = EndGame::victory("You win!");
        assert_eq!(outcome.to_string(), "game over (victory): You win!");
    }
}
