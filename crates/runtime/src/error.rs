//! Errors surfaced by the match session.
//!
//! Core rule failures are wrapped unchanged so callers can still read their
//! reason code; the remaining variants cover session bookkeeping and journal
//! I/O.

use std::path::PathBuf;

use tactics_core::{
    ActionError, CombatError, EffectError, GameError, Hex, ReasonCode, UnitId,
};
use thiserror::Error;

pub type Result<T> = std::result::Result<T, RuntimeError>;

#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error("unit {0} is not part of this match")]
    NoUnit(UnitId),

    #[error("unit {0} is already part of this match")]
    DuplicateUnit(UnitId),

    #[error("unit {0} is dead")]
    UnitDead(UnitId),

    #[error("hex {to:?} is not adjacent to {from:?}")]
    NotAdjacent { from: Hex, to: Hex },

    #[error("hex {0:?} is occupied")]
    HexOccupied(Hex),

    #[error("move needs {required} MP but only {available} remain")]
    NoMp { required: i32, available: i32 },

    #[error(transparent)]
    Effect(#[from] EffectError),

    #[error(transparent)]
    Combat(#[from] CombatError),

    #[error(transparent)]
    Action(#[from] ActionError),

    #[error("failed to encode events for fingerprinting")]
    Encode(#[source] bincode::Error),

    #[error("journal file {path}")]
    JournalIo {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("journal file {path} line {line} is not a valid event")]
    JournalFormat {
        path: PathBuf,
        line: usize,
        #[source]
        source: serde_json::Error,
    },
}

impl RuntimeError {
    /// Wire reason code, for errors that have one.
    pub fn reason(&self) -> Option<ReasonCode> {
        match self {
            RuntimeError::NoUnit(_) => Some(ReasonCode::NoUnit),
            RuntimeError::Effect(err) => Some(err.reason()),
            RuntimeError::Combat(err) => Some(err.reason()),
            RuntimeError::Action(err) => Some(err.reason()),
            _ => None,
        }
    }
}
