//! Aggregation of active effect modifiers into derived combat stats.

use std::collections::BTreeMap;

use crate::combat::DamageType;
use crate::env::{EffectOracle, ModifierCondition, ModifierOp, Stat};
use crate::state::Unit;

/// Per-damage-type totals plus the unscoped "all" bucket.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DamageTotals {
    pub all: i32,
    pub by_type: BTreeMap<DamageType, i32>,
}

impl DamageTotals {
    fn add(&mut self, damage_type: Option<DamageType>, value: i32) {
        match damage_type {
            Some(damage_type) => {
                let slot = self.by_type.entry(damage_type).or_insert(0);
                *slot = slot.saturating_add(value);
            }
            None => self.all = self.all.saturating_add(value),
        }
    }

    /// Type-specific bucket only.
    pub fn for_type(&self, damage_type: DamageType) -> i32 {
        self.by_type.get(&damage_type).copied().unwrap_or(0)
    }

    /// "All" bucket plus the type-specific bucket.
    pub fn total(&self, damage_type: DamageType) -> i32 {
        self.all.saturating_add(self.for_type(damage_type))
    }
}

/// Summed modifiers and OR-ed flags over a unit's active effects.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct UnitModifiers {
    pub armor: i32,
    pub vision: i32,
    pub range: i32,
    pub healing_received_pct: i32,
    pub damage_dealt_pct: DamageTotals,
    pub damage_taken_pct: DamageTotals,
    pub damage_taken_flat: DamageTotals,
    pub cannot_heal: bool,
    pub cannot_use_abilities: bool,
}

/// Attack being resolved, used to evaluate conditional modifiers.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AttackContext {
    pub melee: bool,
}

/// Evaluation context for conditional modifiers.
///
/// Without an attack, conditional modifiers contribute nothing.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ModifierContext {
    pub attack: Option<AttackContext>,
}

impl ModifierContext {
    pub fn attack(melee: bool) -> Self {
        Self {
            attack: Some(AttackContext { melee }),
        }
    }

    fn admits(&self, condition: Option<ModifierCondition>) -> bool {
        match (condition, self.attack) {
            (None, _) => true,
            (Some(_), None) => false,
            (Some(ModifierCondition::Melee), Some(attack)) => attack.melee,
            (Some(ModifierCondition::NotMelee), Some(attack)) => !attack.melee,
        }
    }
}

/// Aggregates modifiers over every active instance on `unit`.
///
/// Disabled instances and instances with unknown definitions are skipped.
/// Values are multiplied by the instance's stack count. The unit is not
/// mutated.
pub fn compute_unit_modifiers(
    catalog: &dyn EffectOracle,
    unit: &Unit,
    ctx: ModifierContext,
) -> UnitModifiers {
    let mut totals = UnitModifiers::default();

    for instance in unit.effects.iter().filter(|i| i.is_active()) {
        totals.cannot_heal |= instance.params.blocks_healing();
        totals.cannot_use_abilities |= instance.params.blocks_abilities();

        let Some(definition) = catalog.definition(&instance.def_id) else {
            continue;
        };

        for modifier in &definition.modifiers {
            if !ctx.admits(modifier.condition) {
                continue;
            }
            let value = match modifier.op {
                ModifierOp::Add => modifier.value.saturating_mul(instance.stack_factor()),
            };
            match modifier.stat {
                Stat::Armor => totals.armor = totals.armor.saturating_add(value),
                Stat::Vision => totals.vision = totals.vision.saturating_add(value),
                Stat::Range => totals.range = totals.range.saturating_add(value),
                Stat::HealingReceivedPct => {
                    totals.healing_received_pct = totals.healing_received_pct.saturating_add(value)
                }
                Stat::DamageDealtPct => totals.damage_dealt_pct.add(modifier.damage_type, value),
                Stat::DamageTakenPct => totals.damage_taken_pct.add(modifier.damage_type, value),
                Stat::DamageTakenFlat => totals.damage_taken_flat.add(modifier.damage_type, value),
            }
        }
    }

    totals
}
