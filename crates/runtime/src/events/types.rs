//! Event types for different topics.

use serde::{Deserialize, Serialize};
use tactics_core::{
    ApplyOutcome, AttackResolution, DefendOutcome, ExpiredEffect, Hex, Owner, ReasonCode,
    TurnNumber, UnitId,
};

/// Where an applied effect landed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EffectTarget {
    Unit(UnitId),
    Hex(Hex),
}

/// An apply call succeeded (created, refreshed, stacked or ignored).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EffectApplied {
    pub turn: TurnNumber,
    pub target: EffectTarget,
    pub outcome: ApplyOutcome,
}

/// Events related to attacks, defence and deaths.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum CombatEvent {
    /// An attack was resolved and its damage applied.
    AttackResolved {
        turn: TurnNumber,
        attacker: UnitId,
        defender: UnitId,
        resolution: AttackResolution,
        /// Consumed `nextHitBonus` added on top of the resolved damage.
        bonus: i32,
        damage: i32,
        hp_before: i32,
        hp_after: i32,
    },

    /// An attack failed validation; nothing changed.
    AttackRejected {
        turn: TurnNumber,
        attacker: UnitId,
        defender: UnitId,
        weapon_id: String,
        reason: ReasonCode,
    },

    Defended {
        turn: TurnNumber,
        unit: UnitId,
        outcome: DefendOutcome,
    },

    UnitDied { turn: TurnNumber, unit: UnitId },
}

/// Events related to turn boundaries (lightweight).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum TurnEvent {
    Started { owner: Owner, turn: TurnNumber },
    Ended {
        owner: Owner,
        turn: TurnNumber,
        expired: Vec<ExpiredEffect>,
    },
}
