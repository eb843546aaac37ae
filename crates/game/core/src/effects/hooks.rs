//! Event hooks: ability use, movement, death spread and next-hit bonuses.

use std::collections::BTreeSet;

use crate::combat::DamageType;
use crate::env::{EffectOracle, HookAction, NeighborResolver, OccupantResolver};
use crate::event::{EffectEvent, EventDetail, EventPhase, SpreadRecord};
use crate::state::{Hex, Unit};

use super::aggregate::{ModifierContext, compute_unit_modifiers};
use super::apply::ApplyOptions;
use super::instance::{EffectSource, InstanceIds};
use super::tick::{EffectContext, damage, heal};
use super::EffectRuntime;

/// Which per-instance hook a trigger reads.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum HookTrigger {
    AbilityUse,
    MoveStep,
}

impl HookTrigger {
    fn phase(self) -> EventPhase {
        match self {
            HookTrigger::AbilityUse => EventPhase::AbilityUse,
            HookTrigger::MoveStep => EventPhase::MoveStep,
        }
    }
}

/// Fires the `onAbilityUse` / `onMoveStep` hooks of every active instance.
///
/// Stops at the first hook that kills the unit.
pub(crate) fn fire_hooks(
    catalog: &dyn EffectOracle,
    unit: &mut Unit,
    trigger: HookTrigger,
    ctx: EffectContext,
) -> Vec<EffectEvent> {
    let mut events = Vec::new();
    if !unit.is_alive() {
        return events;
    }

    let actions: Vec<(String, HookAction, i32)> = unit
        .effects
        .iter()
        .filter(|instance| instance.is_active())
        .filter_map(|instance| {
            let action = match trigger {
                HookTrigger::AbilityUse => instance.params.on_ability_use.clone(),
                HookTrigger::MoveStep => instance.params.on_move_step.clone(),
            }?;
            Some((instance.def_id.clone(), action, instance.stack_factor()))
        })
        .collect();
    if actions.is_empty() {
        return events;
    }

    let modifiers = compute_unit_modifiers(catalog, unit, ModifierContext::default());
    let phase = trigger.phase();
    for (effect_id, action, stacks) in actions {
        let event = match action {
            HookAction::Damage {
                amount,
                damage_type,
            } => damage(
                unit,
                &effect_id,
                amount.saturating_mul(stacks),
                damage_type,
                phase,
                ctx,
            ),
            HookAction::Heal { amount } => heal(
                unit,
                &effect_id,
                amount.saturating_mul(stacks),
                &modifiers,
                phase,
                ctx,
            ),
        };
        events.extend(event);
        if !unit.is_alive() {
            break;
        }
    }
    events
}

/// Result of [`EffectRuntime::consume_next_hit_bonus`].
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct NextHitOutcome {
    /// Bonus damage to add to the hit; zero when nothing matched.
    pub amount: i32,
    /// Whether the granting instance was removed.
    pub consumed: bool,
    pub effect_id: Option<String>,
}

impl EffectRuntime<'_> {
    /// Applies every `onDeathApplyAdjacent` entry carried by `dead` to the
    /// living units around it.
    ///
    /// Emits a single `death_spread` event listing every successful
    /// application across all hook-carrying instances, or nothing when `dead`
    /// carries no such hook. The event's effect id is the first spreading
    /// instance. Failed applications (unknown ids, full status slots) are
    /// skipped.
    pub fn notify_death(
        &self,
        ids: &mut InstanceIds,
        dead: &Unit,
        neighbors: &dyn NeighborResolver,
        occupants: &mut dyn OccupantResolver,
        ctx: EffectContext,
    ) -> Vec<EffectEvent> {
        let mut first_spreader: Option<&str> = None;
        let mut applied = Vec::new();
        let source = EffectSource::unit(dead.id, dead.owner);

        for instance in dead.effects.iter().filter(|i| i.is_active()) {
            let Some(spread) = &instance.params.on_death_apply_adjacent else {
                continue;
            };
            first_spreader.get_or_insert(instance.def_id.as_str());

            let mut seen: BTreeSet<Hex> = BTreeSet::new();
            for hex in neighbors.neighbors(dead.position, spread.radius) {
                if hex == dead.position || !seen.insert(hex) {
                    continue;
                }
                let Some(occupant) = occupants.occupant_at(hex) else {
                    continue;
                };
                if occupant.id == dead.id || !occupant.is_alive() {
                    continue;
                }

                for entry in &spread.effects {
                    let mut options = ApplyOptions::new().source(source);
                    options.duration = entry.duration;
                    options.stacks = entry.stacks;

                    let outcome =
                        self.apply_unit_effect(ids, occupant, &entry.effect_id, options);
                    if let Ok(outcome) = outcome {
                        applied.push(SpreadRecord {
                            unit: occupant.id,
                            effect_id: outcome.def_id,
                            instance: outcome.instance,
                        });
                    }
                }
            }
        }

        let Some(effect_id) = first_spreader else {
            return Vec::new();
        };
        vec![EffectEvent {
            phase: EventPhase::Death,
            turn: ctx.turn,
            target: dead.id,
            effect_id: effect_id.to_string(),
            detail: EventDetail::Spread { applied },
        }]
    }

    /// Fires the first matching `nextHitBonus` on `defender`.
    ///
    /// Only the first active instance whose scope matches `damage_type` fires.
    /// Consumable bonuses remove their instance and resync the status mirror.
    pub fn consume_next_hit_bonus(
        &self,
        defender: &mut Unit,
        damage_type: DamageType,
    ) -> NextHitOutcome {
        let found = defender.effects.iter().position(|instance| {
            instance.is_active()
                && instance
                    .params
                    .next_hit_bonus
                    .as_ref()
                    .is_some_and(|bonus| bonus.matches(damage_type))
        });
        let Some(index) = found else {
            return NextHitOutcome::default();
        };

        let instance = &defender.effects[index];
        let (amount, consume) = match &instance.params.next_hit_bonus {
            Some(bonus) => (bonus.amount, bonus.consume),
            None => (0, false),
        };
        let effect_id = instance.def_id.clone();

        if consume {
            defender.effects.remove(index);
            self.resync_statuses(defender);
        }

        NextHitOutcome {
            amount,
            consumed: consume,
            effect_id: Some(effect_id),
        }
    }
}
