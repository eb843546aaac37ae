//! Attack validation errors.

use crate::error::{ErrorSeverity, GameError, ReasonCode};

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CombatError {
    /// Unknown or malformed weapon.
    #[error("weapon '{0}' is unknown or malformed")]
    BadWeapon(String),

    #[error("target at distance {distance} is inside minimum range {min}")]
    TooClose { distance: u32, min: u32 },

    #[error("target at distance {distance} is beyond maximum range {max}")]
    OutOfRange { distance: u32, max: u32 },
}

impl GameError for CombatError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            CombatError::BadWeapon(_) => ErrorSeverity::Validation,
            CombatError::TooClose { .. } | CombatError::OutOfRange { .. } => {
                ErrorSeverity::Recoverable
            }
        }
    }

    fn reason(&self) -> ReasonCode {
        match self {
            CombatError::BadWeapon(_) => ReasonCode::BadWeapon,
            CombatError::TooClose { .. } => ReasonCode::TooClose,
            CombatError::OutOfRange { .. } => ReasonCode::OutOfRange,
        }
    }
}
