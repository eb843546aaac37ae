//! Periodic actions executed at turn phases.

use crate::combat::DamageType;

/// Turn phase at which periodic effect actions run.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::IntoStaticStr)]
#[strum(serialize_all = "camelCase")]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TickPhase {
    TurnStart,
    TurnEnd,
}

/// What a tick does when it fires. Amounts are per stack.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TickKind {
    /// Damage over time.
    Dot {
        amount: i32,
        #[cfg_attr(feature = "serde", serde(default))]
        damage_type: Option<DamageType>,
    },
    /// Healing over time, scaled by the target's `healingReceivedPct`.
    Regen { amount: i32 },
    /// Signed mp/ap adjustment, each clamped at zero.
    StatDelta {
        #[cfg_attr(feature = "serde", serde(default))]
        mp: i32,
        #[cfg_attr(feature = "serde", serde(default))]
        ap: i32,
    },
}

/// A tick entry of an effect definition.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TickSpec {
    pub phase: TickPhase,
    pub kind: TickKind,
}

impl TickSpec {
    pub fn dot(phase: TickPhase, amount: i32, damage_type: Option<DamageType>) -> Self {
        Self {
            phase,
            kind: TickKind::Dot {
                amount,
                damage_type,
            },
        }
    }

    pub fn regen(phase: TickPhase, amount: i32) -> Self {
        Self {
            phase,
            kind: TickKind::Regen { amount },
        }
    }

    pub fn stat_delta(phase: TickPhase, mp: i32, ap: i32) -> Self {
        Self {
            phase,
            kind: TickKind::StatDelta { mp, ap },
        }
    }
}
