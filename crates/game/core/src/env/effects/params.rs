//! Hook parameters attached to effects.
//!
//! Definitions carry base parameters; an apply call may pass overrides. The two
//! are merged once, when the instance is created or refreshed, and the result is
//! owned by the instance.

use crate::combat::DamageType;

/// Immediate action performed by an event hook.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum HookAction {
    Damage {
        amount: i32,
        #[cfg_attr(feature = "serde", serde(default))]
        damage_type: Option<DamageType>,
    },
    Heal { amount: i32 },
}

/// One effect spread to neighbors when the carrier dies.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SpreadEntry {
    pub effect_id: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub duration: Option<i32>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub stacks: Option<u32>,
}

/// `onDeathApplyAdjacent` hook.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DeathSpread {
    #[cfg_attr(feature = "serde", serde(default = "default_radius"))]
    pub radius: u32,
    pub effects: Vec<SpreadEntry>,
}

#[cfg(feature = "serde")]
fn default_radius() -> u32 {
    1
}

/// `nextHitBonus` hook: extra damage on the next matching hit taken.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct NextHitBonus {
    pub amount: i32,
    #[cfg_attr(feature = "serde", serde(default))]
    pub damage_type: Option<DamageType>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub consume: bool,
}

impl NextHitBonus {
    pub fn matches(&self, damage_type: DamageType) -> bool {
        self.damage_type.is_none_or(|scope| scope == damage_type)
    }
}

/// Parameter map of an effect. Every field is optional so overrides can be sparse.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct EffectParams {
    pub on_ability_use: Option<HookAction>,
    pub on_move_step: Option<HookAction>,
    pub on_death_apply_adjacent: Option<DeathSpread>,
    pub next_hit_bonus: Option<NextHitBonus>,
    pub cannot_heal: Option<bool>,
    pub cannot_use_abilities: Option<bool>,
}

impl EffectParams {
    /// Returns `self` overridden field-by-field by `overrides` (overrides win).
    pub fn merged(&self, overrides: &EffectParams) -> EffectParams {
        EffectParams {
            on_ability_use: overrides
                .on_ability_use
                .clone()
                .or_else(|| self.on_ability_use.clone()),
            on_move_step: overrides
                .on_move_step
                .clone()
                .or_else(|| self.on_move_step.clone()),
            on_death_apply_adjacent: overrides
                .on_death_apply_adjacent
                .clone()
                .or_else(|| self.on_death_apply_adjacent.clone()),
            next_hit_bonus: overrides
                .next_hit_bonus
                .clone()
                .or_else(|| self.next_hit_bonus.clone()),
            cannot_heal: overrides.cannot_heal.or(self.cannot_heal),
            cannot_use_abilities: overrides.cannot_use_abilities.or(self.cannot_use_abilities),
        }
    }

    pub fn blocks_healing(&self) -> bool {
        self.cannot_heal.unwrap_or(false)
    }

    pub fn blocks_abilities(&self) -> bool {
        self.cannot_use_abilities.unwrap_or(false)
    }
}
