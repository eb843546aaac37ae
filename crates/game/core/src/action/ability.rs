//! Ability use gate.

use crate::effects::{EffectContext, EffectRuntime, ModifierContext};
use crate::event::EffectEvent;
use crate::state::Unit;

use super::ap::{ApSpent, can_spend_ap, spend_ap};
use super::error::ActionError;

/// Result of a successful ability use.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AbilityUse {
    pub ability_id: String,
    pub ap: ApSpent,
    /// Events fired by `onAbilityUse` hooks.
    pub events: Vec<EffectEvent>,
}

/// Checks whether `unit` may use an ability costing `ap_cost` right now.
pub fn check_ability_use(
    runtime: &EffectRuntime<'_>,
    unit: &Unit,
    ability_id: &str,
    ap_cost: i32,
) -> Result<(), ActionError> {
    if runtime
        .compute_unit_modifiers(unit, ModifierContext::default())
        .cannot_use_abilities
    {
        return Err(ActionError::AbilitiesDisabled(ability_id.to_string()));
    }
    if !can_spend_ap(unit, ap_cost) {
        return Err(ActionError::NoAp {
            required: ap_cost.max(0),
            available: unit.ap.current,
        });
    }
    Ok(())
}

/// Spends AP for an ability and fires the unit's `onAbilityUse` hooks.
///
/// The ability's own effect is resolved by the caller.
pub fn use_ability(
    runtime: &EffectRuntime<'_>,
    unit: &mut Unit,
    ability_id: &str,
    ap_cost: i32,
    ctx: EffectContext,
) -> Result<AbilityUse, ActionError> {
    check_ability_use(runtime, unit, ability_id, ap_cost)?;
    let ap = spend_ap(unit, ap_cost)?;
    let events = runtime.notify_ability_used(unit, ctx);
    Ok(AbilityUse {
        ability_id: ability_id.to_string(),
        ap,
        events,
    })
}
