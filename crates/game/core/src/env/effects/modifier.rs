//! Additive stat modifiers carried by effect definitions.

use crate::combat::DamageType;

/// Derived stat a modifier contributes to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::IntoStaticStr)]
#[strum(serialize_all = "camelCase")]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Stat {
    Armor,
    Vision,
    Range,
    DamageDealtPct,
    DamageTakenPct,
    DamageTakenFlat,
    HealingReceivedPct,
}

impl Stat {
    /// Stats aggregated per damage type as well as into the "all" bucket.
    pub const fn is_damage_scoped(self) -> bool {
        matches!(
            self,
            Stat::DamageDealtPct | Stat::DamageTakenPct | Stat::DamageTakenFlat
        )
    }
}

/// How a modifier combines with the running total.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ModifierOp {
    #[default]
    Add,
}

/// Engine-evaluated predicate gating a modifier.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ModifierCondition {
    /// Only while resolving a melee attack.
    Melee,
    /// Only while resolving a ranged attack.
    NotMelee,
}

/// A single additive modifier.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Modifier {
    pub stat: Stat,
    #[cfg_attr(feature = "serde", serde(default))]
    pub op: ModifierOp,
    pub value: i32,
    /// `None` feeds the "all" bucket of damage-scoped stats.
    #[cfg_attr(feature = "serde", serde(default))]
    pub damage_type: Option<DamageType>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub condition: Option<ModifierCondition>,
}

impl Modifier {
    pub fn add(stat: Stat, value: i32) -> Self {
        Self {
            stat,
            op: ModifierOp::Add,
            value,
            damage_type: None,
            condition: None,
        }
    }

    pub fn scoped(mut self, damage_type: DamageType) -> Self {
        self.damage_type = Some(damage_type);
        self
    }

    pub fn when(mut self, condition: ModifierCondition) -> Self {
        self.condition = Some(condition);
        self
    }
}
