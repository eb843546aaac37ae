//! Periodic tick execution and the hp/mp/ap mutations shared with hooks.
//!
//! Every mutation here returns the [`EffectEvent`] describing it; callers must
//! forward the event, never drop it.

use crate::combat::DamageType;
use crate::env::{EffectOracle, TickKind, TickPhase};
use crate::event::{EffectEvent, EventDetail, EventPhase};
use crate::state::{TurnNumber, Unit};

use super::aggregate::{ModifierContext, UnitModifiers, compute_unit_modifiers};
use super::instance::EffectInstance;

/// Call context threaded into ticks and hooks.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct EffectContext {
    pub turn: TurnNumber,
}

impl EffectContext {
    pub fn new(turn: TurnNumber) -> Self {
        Self { turn }
    }
}

/// Reduces hp by `amount` (clamped at zero, never increasing hp).
///
/// Returns `None` when no hp was removed.
pub(crate) fn damage(
    unit: &mut Unit,
    effect_id: &str,
    amount: i32,
    damage_type: Option<DamageType>,
    phase: EventPhase,
    ctx: EffectContext,
) -> Option<EffectEvent> {
    let amount = amount.max(0);
    if amount == 0 {
        return None;
    }
    let hp_before = unit.hp.current;
    let removed = unit.hp.drain(amount);
    if removed == 0 {
        return None;
    }
    Some(EffectEvent {
        phase,
        turn: ctx.turn,
        target: unit.id,
        effect_id: effect_id.to_string(),
        detail: EventDetail::Damage {
            amount: removed,
            damage_type,
            hp_before,
            hp_after: unit.hp.current,
        },
    })
}

/// Heals by `amount` scaled by `healingReceivedPct`, clamped at max hp.
///
/// ```text
/// effective = clamp(round(amount × (100 + pct) / 100), 0, ∞)
/// ```
///
/// Nothing happens while the unit carries a `cannotHeal` effect.
pub(crate) fn heal(
    unit: &mut Unit,
    effect_id: &str,
    amount: i32,
    modifiers: &UnitModifiers,
    phase: EventPhase,
    ctx: EffectContext,
) -> Option<EffectEvent> {
    if amount <= 0 || modifiers.cannot_heal {
        return None;
    }
    let scaled = i64::from(amount) * (100 + i64::from(modifiers.healing_received_pct));
    let effective = ((scaled.max(0) + 50) / 100).min(i64::from(i32::MAX)) as i32;
    if effective == 0 {
        return None;
    }
    let hp_before = unit.hp.current;
    let restored = unit.hp.restore(effective);
    Some(EffectEvent {
        phase,
        turn: ctx.turn,
        target: unit.id,
        effect_id: effect_id.to_string(),
        detail: EventDetail::Heal {
            amount: restored,
            hp_before,
            hp_after: unit.hp.current,
        },
    })
}

/// Shifts mp and ap by signed deltas, each clamped at zero from below.
pub(crate) fn shift_stats(
    unit: &mut Unit,
    effect_id: &str,
    mp: i32,
    ap: i32,
    phase: EventPhase,
    ctx: EffectContext,
) -> Option<EffectEvent> {
    if mp == 0 && ap == 0 {
        return None;
    }
    let (mp_before, ap_before) = (unit.mp.current, unit.ap.current);
    unit.mp.shift_floor_zero(mp);
    unit.ap.shift_floor_zero(ap);
    Some(EffectEvent {
        phase,
        turn: ctx.turn,
        target: unit.id,
        effect_id: effect_id.to_string(),
        detail: EventDetail::StatDelta {
            mp_before,
            mp_after: unit.mp.current,
            ap_before,
            ap_after: unit.ap.current,
        },
    })
}

/// Runs every tick entry matching `phase` from `instances` against `unit`.
///
/// `instances` is either the unit's own effect list (snapshotted by the
/// caller) or the hex bucket the unit stands on. The pass stops as soon as
/// the unit dies.
pub(crate) fn run_ticks(
    catalog: &dyn EffectOracle,
    unit: &mut Unit,
    instances: &[EffectInstance],
    phase: TickPhase,
    ctx: EffectContext,
) -> Vec<EffectEvent> {
    let mut events = Vec::new();
    if !unit.is_alive() {
        return events;
    }

    let modifiers = compute_unit_modifiers(catalog, unit, ModifierContext::default());
    let event_phase = EventPhase::from(phase);

    'instances: for instance in instances.iter().filter(|i| i.is_active()) {
        let Some(definition) = catalog.definition(&instance.def_id) else {
            continue;
        };
        let stacks = instance.stack_factor();

        for tick in definition.ticks.iter().filter(|t| t.phase == phase) {
            let event = match &tick.kind {
                TickKind::Dot {
                    amount,
                    damage_type,
                } => damage(
                    unit,
                    &instance.def_id,
                    amount.saturating_mul(stacks),
                    *damage_type,
                    event_phase,
                    ctx,
                ),
                TickKind::Regen { amount } => heal(
                    unit,
                    &instance.def_id,
                    amount.saturating_mul(stacks),
                    &modifiers,
                    event_phase,
                    ctx,
                ),
                TickKind::StatDelta { mp, ap } => shift_stats(
                    unit,
                    &instance.def_id,
                    mp.saturating_mul(stacks),
                    ap.saturating_mul(stacks),
                    event_phase,
                    ctx,
                ),
            };
            events.extend(event);
            if !unit.is_alive() {
                break 'instances;
            }
        }
    }

    events
}
