//! Effect application errors.

use crate::error::{ErrorSeverity, GameError, ReasonCode};

/// Errors returned by effect application.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum EffectError {
    /// The id is unknown, or names an effect of the wrong target kind for a unit.
    #[error("unknown effect '{0}'")]
    UnknownEffect(String),

    /// A unit-kind effect was applied to a hex.
    #[error("effect '{0}' is not a hex effect")]
    NotHexEffect(String),

    /// A brand-new temporary effect found every status slot taken.
    #[error("no free status slot for effect '{effect}' ({cap} slots in use)")]
    StatusSlotsFull { effect: String, cap: usize },
}

impl GameError for EffectError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            EffectError::UnknownEffect(_) | EffectError::NotHexEffect(_) => {
                ErrorSeverity::Validation
            }
            EffectError::StatusSlotsFull { .. } => ErrorSeverity::Recoverable,
        }
    }

    fn reason(&self) -> ReasonCode {
        match self {
            EffectError::UnknownEffect(_) => ReasonCode::UnknownEffect,
            EffectError::NotHexEffect(_) => ReasonCode::NotHexEffect,
            EffectError::StatusSlotsFull { .. } => ReasonCode::StatusSlotsFull,
        }
    }
}
