//! Rejected actions.
//!
//! A rejection is an expected outcome of player or entity input: the action
//! did not happen and no state was changed. It is carried inside `Ok` as
//! [`Resolution::Rejected`], never through the `?` channel, which is reserved
//! for [`crate::EndGame`].

use crate::error::{ErrorSeverity, GameError};
use crate::kind::Kind;

// ============================================================================
// Action Rejections
// ============================================================================

/// Reasons an ability cast, item use, equip or attack was refused.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ActionError {
    /// The ability costs more energy than the user has.
    #[error("not enough energy: costs {cost}, have {energy}")]
    InsufficientEnergy { cost: u32, energy: u32 },

    /// The consumable has been used up.
    #[error("{item} has no charges left")]
    NoCharges { item: Kind },

    /// The entity does not know this ability.
    #[error("unknown ability {0}")]
    UnknownAbility(Kind),

    /// Nothing of this kind is carried.
    #[error("no {0} in inventory")]
    UnknownItem(Kind),

    /// The target index does not name a combatant.
    #[error("invalid target")]
    InvalidTarget,

    /// The target has already been defeated.
    #[error("{0} is already dead")]
    TargetDead(String),

    /// The item exists but is not a weapon or armor.
    #[error("{0} cannot be equipped")]
    NotEquipment(Kind),
}

impl GameError for ActionError {
    fn severity(&self) -> ErrorSeverity {
        use ActionError::*;
        match self {
            InsufficientEnergy { .. } | NoCharges { .. } | TargetDead(_) => {
                ErrorSeverity::Recoverable
            }
            UnknownAbility(_) | UnknownItem(_) | InvalidTarget | NotEquipment(_) => {
                ErrorSeverity::Validation
            }
        }
    }

    fn error_code(&self) -> &'static str {
        use ActionError::*;
        match self {
            InsufficientEnergy { .. } => "ACTION_INSUFFICIENT_ENERGY",
            NoCharges { .. } => "ACTION_NO_CHARGES",
            UnknownAbility(_) => "ACTION_UNKNOWN_ABILITY",
            UnknownItem(_) => "ACTION_UNKNOWN_ITEM",
            InvalidTarget => "ACTION_INVALID_TARGET",
            TargetDead(_) => "ACTION_TARGET_DEAD",
            NotEquipment(_) => "ACTION_NOT_EQUIPMENT",
        }
    }
}

/// Result of an action that may be refused without ending the session.
#[derive(Clone, Debug, PartialEq, Eq)]
#[must_use]
pub enum Resolution {
    /// The action happened.
    Done,
    /// The action was refused and nothing changed.
    Rejected(ActionError),
}

impl Resolution {
    pub fn is_done(&self) -> bool {
        matches!(self, Self::Done)
    }

    pub fn is_rejected(&self) -> bool {
        matches!(self, Self::Rejected(_))
    }

    pub fn rejection(&self) -> Option<&ActionError> {
        match self {
            Self::Done => None,
            Self::Rejected(error) => Some(error),
        }
    }
}

impl From<ActionError> for Resolution {
    fn from(error: ActionError) -> Self {
        Self::Rejected(error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unaffordable_cast_is_recoverable() {
        let error = ActionError::InsufficientEnergy { cost: 6, energy: 0 };
        assert!(error.severity().is_recoverable());
        assert_eq!(error.error_code(), "ACTION_INSUFFICIENT_ENERGY");
        assert_eq!(error.to_string(), "not enough energy: costs 6, have 0");
    }

    #[test]
    fn rejection_is_exposed() {
        let resolution = Resolution::from(ActionError::InvalidTarget);
        assert!(resolution.is_rejected());
        assert_eq!(resolution.rejection(), Some(&ActionError::InvalidTarget));
        assert!(Resolution::Done.rejection().is_none());
    }
}
