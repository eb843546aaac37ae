use crate::effects::{
    ApplyOptions, ApplyOutcome, EffectContext, EffectInstance, EffectRuntime, InstanceId,
    InstanceIds, cleanup_where, decrement_where,
};
use crate::env::{Env, TickPhase};
use crate::event::EffectEvent;
use crate::state::{Hex, Owner, TurnNumber, Unit, UnitFlags, UnitId, WorldEffects};

/// Container an expired instance was removed from.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum EffectHolder {
    Unit(UnitId),
    Hex(Hex),
}

/// Instance removed by end-of-turn cleanup.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ExpiredEffect {
    pub holder: EffectHolder,
    pub def_id: String,
    pub instance: InstanceId,
}

impl ExpiredEffect {
    fn new(holder: EffectHolder, instance: EffectInstance) -> Self {
        Self {
            holder,
            def_id: instance.def_id,
            instance: instance.id,
        }
    }
}

/// Everything a turn boundary did, in call order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TurnReport {
    pub owner: Owner,
    pub turn: TurnNumber,
    pub events: Vec<EffectEvent>,
    /// Passive effects granted at turn start.
    pub granted: Vec<(UnitId, ApplyOutcome)>,
    /// Instances removed at turn end.
    pub expired: Vec<ExpiredEffect>,
}

impl TurnReport {
    fn new(owner: Owner, turn: TurnNumber) -> Self {
        Self {
            owner,
            turn,
            ..Self::default()
        }
    }
}

/// Runs turn-start and turn-end maintenance for one owner's units.
#[derive(Clone, Copy, Debug)]
pub struct TurnController<'a> {
    env: Env<'a>,
    runtime: EffectRuntime<'a>,
}

impl<'a> TurnController<'a> {
    pub fn new(env: Env<'a>) -> Self {
        Self {
            env,
            runtime: EffectRuntime::new(env),
        }
    }

    /// Turn start, per unit of `owner`: refill mp/ap, clear one-turn flags and
    /// the temporary armor bonus, grant missing passive effects, tick own
    /// effects then standing hazards, resync the status mirror.
    pub fn on_turn_start(
        &self,
        ids: &mut InstanceIds,
        units: &mut [Unit],
        world: &WorldEffects,
        owner: Owner,
        turn: TurnNumber,
    ) -> TurnReport {
        let mut report = TurnReport::new(owner, turn);
        let ctx = EffectContext::new(turn);

        for unit in units.iter_mut().filter(|u| u.owner == owner) {
            unit.mp.refill();
            unit.ap.refill();
            unit.flags.remove(UnitFlags::DEFENDING);
            unit.temp_armor_bonus = 0;

            self.grant_passives(ids, unit, &mut report);

            report
                .events
                .extend(self.runtime.tick(unit, TickPhase::TurnStart, ctx));
            report
                .events
                .extend(self.runtime.tick_hazards(unit, world, TickPhase::TurnStart, ctx));
            self.runtime.resync_statuses(unit);
        }

        report
    }

    /// Turn end: tick, then decrement, then cleanup, so a one-turn effect
    /// ticks at least once before it expires.
    ///
    /// Hex buckets sourced by `owner` (or unsourced) age at the same time;
    /// emptied buckets are dropped.
    pub fn on_turn_end(
        &self,
        units: &mut [Unit],
        world: &mut WorldEffects,
        owner: Owner,
        turn: TurnNumber,
    ) -> TurnReport {
        let mut report = TurnReport::new(owner, turn);
        let ctx = EffectContext::new(turn);
        let catalog = self.env.effects();

        for unit in units.iter_mut().filter(|u| u.owner == owner) {
            report
                .events
                .extend(self.runtime.tick(unit, TickPhase::TurnEnd, ctx));
            report
                .events
                .extend(self.runtime.tick_hazards(unit, world, TickPhase::TurnEnd, ctx));

            self.runtime.decrement_durations(&mut unit.effects);
            let holder = EffectHolder::Unit(unit.id);
            report.expired.extend(
                self.runtime
                    .cleanup_unit(unit)
                    .into_iter()
                    .map(|instance| ExpiredEffect::new(holder, instance)),
            );
        }

        let aged_by_owner = |instance: &EffectInstance| {
            instance
                .source
                .and_then(|source| source.faction)
                .is_none_or(|faction| faction == owner)
        };
        let hexes: Vec<Hex> = world.iter().map(|(hex, _)| hex).collect();
        for hex in hexes {
            let bucket = world.bucket_mut(hex);
            decrement_where(catalog, bucket, aged_by_owner);
            report.expired.extend(
                cleanup_where(catalog, bucket, aged_by_owner)
                    .into_iter()
                    .map(|instance| ExpiredEffect::new(EffectHolder::Hex(hex), instance)),
            );
        }
        world.prune();

        report
    }

    fn grant_passives(&self, ids: &mut InstanceIds, unit: &mut Unit, report: &mut TurnReport) {
        let abilities = self.env.abilities();
        let grants: Vec<&str> = unit
            .abilities
            .iter()
            .filter_map(|id| abilities.ability(id))
            .filter_map(|ability| ability.granted_effect())
            .collect();

        for effect_id in grants {
            if unit.has_effect(effect_id) {
                continue;
            }
            if let Ok(outcome) = self
                .runtime
                .apply_unit_effect(ids, unit, effect_id, ApplyOptions::new())
            {
                report.granted.push((unit.id, outcome));
            }
        }
    }
}
