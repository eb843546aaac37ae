//! Immutable records of every state mutation performed by the effect runtime.
//!
//! Replicas broadcast these instead of state deltas; the stream must therefore
//! be complete (no mutation without a record) and in call order.

use crate::combat::DamageType;
use crate::effects::InstanceId;
use crate::env::TickPhase;
use crate::state::{TurnNumber, UnitId};

/// Point in the turn (or external trigger) that produced an event.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::IntoStaticStr)]
#[strum(serialize_all = "camelCase")]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum EventPhase {
    TurnStart,
    TurnEnd,
    AbilityUse,
    MoveStep,
    Death,
}

impl From<TickPhase> for EventPhase {
    fn from(phase: TickPhase) -> Self {
        match phase {
            TickPhase::TurnStart => EventPhase::TurnStart,
            TickPhase::TurnEnd => EventPhase::TurnEnd,
        }
    }
}

/// One effect successfully spread by a death hook.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SpreadRecord {
    pub unit: UnitId,
    pub effect_id: String,
    pub instance: InstanceId,
}

/// What changed.
#[derive(Clone, Debug, PartialEq, Eq, strum::IntoStaticStr)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum EventDetail {
    #[strum(serialize = "dot")]
    Damage {
        amount: i32,
        damage_type: Option<DamageType>,
        hp_before: i32,
        hp_after: i32,
    },
    #[strum(serialize = "regen")]
    Heal {
        amount: i32,
        hp_before: i32,
        hp_after: i32,
    },
    #[strum(serialize = "stat_delta")]
    StatDelta {
        mp_before: i32,
        mp_after: i32,
        ap_before: i32,
        ap_after: i32,
    },
    #[strum(serialize = "death_spread")]
    Spread { applied: Vec<SpreadRecord> },
}

/// Event record emitted for every effect-driven mutation.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EffectEvent {
    pub phase: EventPhase,
    pub turn: TurnNumber,
    pub target: UnitId,
    pub effect_id: String,
    pub detail: EventDetail,
}

impl EffectEvent {
    /// Stable kind tag (`dot`, `regen`, `stat_delta`, `death_spread`).
    pub fn kind(&self) -> &'static str {
        (&self.detail).into()
    }

    /// `(hp_before, hp_after)` for hp-changing events.
    pub fn hp_change(&self) -> Option<(i32, i32)> {
        match self.detail {
            EventDetail::Damage {
                hp_before,
                hp_after,
                ..
            }
            | EventDetail::Heal {
                hp_before,
                hp_after,
                ..
            } => Some((hp_before, hp_after)),
            _ => None,
        }
    }
}
