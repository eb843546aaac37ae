//! Unit action errors.

use crate::error::{ErrorSeverity, GameError, ReasonCode};

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ActionError {
    #[error("action needs {required} AP but only {available} remain")]
    NoAp { required: i32, available: i32 },

    /// An active effect forbids ability use.
    #[error("abilities are disabled; cannot use '{0}'")]
    AbilitiesDisabled(String),
}

impl GameError for ActionError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Recoverable
    }

    fn reason(&self) -> ReasonCode {
        match self {
            ActionError::NoAp { .. } => ReasonCode::NoAp,
            ActionError::AbilitiesDisabled(_) => ReasonCode::AbilitiesDisabled,
        }
    }
}
