//! Match session: the authoritative owner of a match's mutable state.
//!
//! [`MatchSession`] holds the roster, the world hex buckets, the effect
//! instance counter and the turn number, and drives the core rules against
//! them. Every change is journaled and published on the [`EventBus`] in the
//! order it happened.

mod board;

use std::collections::BTreeSet;

use tactics_content::Content;
use tactics_core::{
    AbilityUse, ApplyOptions, ApplyOutcome, DefendOutcome, EffectContext, EffectEvent,
    EffectRuntime, GameError, Hex, InstanceIds, NextHitOutcome, Owner, TurnController,
    TurnNumber, TurnReport, Unit, UnitId, WorldEffects, apply_defence, resolve_attack, spend_ap,
    use_ability, validate_attack,
};
use tracing::{debug, info, warn};

use crate::error::{Result, RuntimeError};
use crate::events::{CombatEvent, EffectApplied, EffectTarget, Event, EventBus, Topic, TurnEvent};
use crate::journal::EventJournal;

use board::{HexGrid, Roster};

/// Result of [`MatchSession::attack`].
#[derive(Debug, Clone, PartialEq)]
pub struct AttackReport {
    pub resolution: tactics_core::AttackResolution,
    pub bonus: NextHitOutcome,
    pub damage: i32,
    pub killed: bool,
}

pub struct MatchSession {
    content: Content,
    units: Vec<Unit>,
    world: WorldEffects,
    ids: InstanceIds,
    turn: TurnNumber,
    fallen: BTreeSet<UnitId>,
    bus: EventBus,
    journal: EventJournal,
}

impl MatchSession {
    pub fn new(content: Content) -> Self {
        Self {
            content,
            units: Vec::new(),
            world: WorldEffects::new(),
            ids: InstanceIds::new(),
            turn: TurnNumber::ZERO,
            fallen: BTreeSet::new(),
            bus: EventBus::new(),
            journal: EventJournal::new(),
        }
    }

    pub fn with_units(content: Content, units: impl IntoIterator<Item = Unit>) -> Result<Self> {
        let mut session = Self::new(content);
        for unit in units {
            session.add_unit(unit)?;
        }
        Ok(session)
    }

    /// Adds a unit to the roster. Units that arrive dead never trigger death hooks.
    pub fn add_unit(&mut self, unit: Unit) -> Result<()> {
        if self.units.iter().any(|u| u.id == unit.id) {
            return Err(RuntimeError::DuplicateUnit(unit.id));
        }
        if !unit.is_alive() {
            self.fallen.insert(unit.id);
        }
        debug!(target: "runtime::session", unit = %unit.id, owner = %unit.owner, "Unit joined");
        self.units.push(unit);
        Ok(())
    }

    pub fn content(&self) -> &Content {
        &self.content
    }

    pub fn units(&self) -> &[Unit] {
        &self.units
    }

    pub fn unit(&self, id: UnitId) -> Option<&Unit> {
        self.units.iter().find(|unit| unit.id == id)
    }

    pub fn world(&self) -> &WorldEffects {
        &self.world
    }

    pub fn turn(&self) -> TurnNumber {
        self.turn
    }

    pub fn journal(&self) -> &EventJournal {
        &self.journal
    }

    pub fn bus(&self) -> &EventBus {
        &self.bus
    }

    pub fn subscribe(&self, topic: Topic) -> tokio::sync::broadcast::Receiver<Event> {
        self.bus.subscribe(topic)
    }

    fn ctx(&self) -> EffectContext {
        EffectContext::new(self.turn)
    }

    fn index_of(&self, id: UnitId) -> Result<usize> {
        self.units
            .iter()
            .position(|unit| unit.id == id)
            .ok_or(RuntimeError::NoUnit(id))
    }

    fn living_index_of(&self, id: UnitId) -> Result<usize> {
        let index = self.index_of(id)?;
        if !self.units[index].is_alive() {
            return Err(RuntimeError::UnitDead(id));
        }
        Ok(index)
    }

    fn emit(&mut self, event: Event) {
        self.journal.record(event.clone());
        self.bus.publish(event);
    }

    fn emit_effects(&mut self, events: Vec<EffectEvent>) {
        for event in events {
            self.emit(Event::Effect(event));
        }
    }

    /// Advances the turn counter and runs turn-start maintenance for `owner`.
    pub fn begin_turn(&mut self, owner: Owner) -> TurnReport {
        self.turn = self.turn.next();
        let turn = self.turn;
        info!(target: "runtime::session", %owner, turn = turn.0, "Turn started");
        self.emit(Event::Turn(TurnEvent::Started { owner, turn }));

        let controller = TurnController::new(self.content.env());
        let report =
            controller.on_turn_start(&mut self.ids, &mut self.units, &self.world, owner, turn);

        for (unit, outcome) in &report.granted {
            debug!(
                target: "runtime::session",
                %unit,
                effect = %outcome.def_id,
                "Passive effect granted"
            );
            self.emit(Event::Applied(EffectApplied {
                turn,
                target: EffectTarget::Unit(*unit),
                outcome: outcome.clone(),
            }));
        }
        self.emit_effects(report.events.clone());
        self.reap_deaths();
        report
    }

    /// Runs turn-end maintenance for `owner`: ticks, durations, cleanup.
    pub fn end_turn(&mut self, owner: Owner) -> TurnReport {
        let turn = self.turn;
        let controller = TurnController::new(self.content.env());
        let report = controller.on_turn_end(&mut self.units, &mut self.world, owner, turn);

        self.emit_effects(report.events.clone());
        self.reap_deaths();

        debug!(
            target: "runtime::session",
            %owner,
            turn = turn.0,
            expired = report.expired.len(),
            "Turn ended"
        );
        self.emit(Event::Turn(TurnEvent::Ended {
            owner,
            turn,
            expired: report.expired.clone(),
        }));
        report
    }

    /// Validates, resolves and applies a weapon attack.
    ///
    /// Failed validation is journaled as `AttackRejected` and returned as an
    /// error; nothing else changes. On success the attacker pays the attack AP
    /// cost, the defender's first matching next-hit bonus is consumed and
    /// added, and a kill triggers the defender's death hooks.
    pub fn attack(
        &mut self,
        attacker: UnitId,
        defender: UnitId,
        weapon_id: &str,
    ) -> Result<AttackReport> {
        let a = self.living_index_of(attacker)?;
        let d = self.living_index_of(defender)?;
        let turn = self.turn;

        let check = validate_attack(self.content.env(), &self.units[a], &self.units[d], weapon_id);
        if let Err(err) = check {
            warn!(
                target: "runtime::session",
                %attacker,
                %defender,
                weapon = weapon_id,
                reason = err.error_code(),
                "Attack rejected"
            );
            self.emit(Event::Combat(CombatEvent::AttackRejected {
                turn,
                attacker,
                defender,
                weapon_id: weapon_id.to_string(),
                reason: err.reason(),
            }));
            return Err(err.into());
        }
        let env = self.content.env();
        spend_ap(&mut self.units[a], env.config().attack_ap_cost)?;

        let resolution = resolve_attack(env, &self.units[a], &self.units[d], weapon_id);
        if let Some(diagnostic) = &resolution.diagnostic {
            warn!(
                target: "runtime::session",
                weapon = weapon_id,
                diagnostic = diagnostic.as_str(),
                "Attack degraded to zero damage"
            );
        }

        let target = &mut self.units[d];
        let bonus = EffectRuntime::new(env).consume_next_hit_bonus(target, resolution.damage_type);
        let total = i64::from(resolution.final_damage) + i64::from(bonus.amount);
        let hp_before = target.hp.current;
        let damage = target.hp.drain(i32::try_from(total.max(0)).unwrap_or(i32::MAX));
        let hp_after = target.hp.current;
        let killed = hp_before > 0 && hp_after == 0;

        info!(
            target: "runtime::session",
            %attacker,
            %defender,
            weapon = weapon_id,
            distance = resolution.distance,
            damage,
            bonus = bonus.amount,
            hp_after,
            "Attack resolved"
        );
        self.emit(Event::Combat(CombatEvent::AttackResolved {
            turn,
            attacker,
            defender,
            resolution: resolution.clone(),
            bonus: bonus.amount,
            damage,
            hp_before,
            hp_after,
        }));
        self.reap_deaths();

        Ok(AttackReport {
            resolution,
            bonus,
            damage,
            killed,
        })
    }

    pub fn defend(&mut self, unit: UnitId) -> Result<DefendOutcome> {
        let index = self.living_index_of(unit)?;
        let outcome = apply_defence(self.content.env(), &mut self.units[index])?;
        debug!(target: "runtime::session", %unit, healed = outcome.healed, "Unit defends");
        self.emit(Event::Combat(CombatEvent::Defended {
            turn: self.turn,
            unit,
            outcome,
        }));
        Ok(outcome)
    }

    /// Moves a unit one hex and fires its `onMoveStep` hooks.
    pub fn move_step(&mut self, unit: UnitId, to: Hex) -> Result<Vec<EffectEvent>> {
        let index = self.living_index_of(unit)?;
        let from = self.units[index].position;
        if from.distance_to(to) != 1 {
            return Err(RuntimeError::NotAdjacent { from, to });
        }
        if self.units.iter().any(|u| u.position == to && u.is_alive()) {
            return Err(RuntimeError::HexOccupied(to));
        }
        let cost = self.content.config.move_mp_cost.max(0);
        let mover = &mut self.units[index];
        if mover.mp.current < cost {
            return Err(RuntimeError::NoMp {
                required: cost,
                available: mover.mp.current,
            });
        }

        mover.mp.drain(cost);
        mover.position = to;
        let ctx = EffectContext::new(self.turn);
        let events = EffectRuntime::new(self.content.env()).notify_move_step(mover, ctx);
        debug!(target: "runtime::session", %unit, ?from, ?to, hooks = events.len(), "Unit moved");

        self.emit_effects(events.clone());
        self.reap_deaths();
        Ok(events)
    }

    /// Spends AP for an ability and fires `onAbilityUse` hooks.
    pub fn use_ability(
        &mut self,
        unit: UnitId,
        ability_id: &str,
        ap_cost: i32,
    ) -> Result<AbilityUse> {
        let index = self.living_index_of(unit)?;
        let runtime = EffectRuntime::new(self.content.env());
        let ctx = self.ctx();
        let used = use_ability(&runtime, &mut self.units[index], ability_id, ap_cost, ctx)
            .inspect_err(|err| {
                warn!(
                    target: "runtime::session",
                    %unit,
                    ability = ability_id,
                    reason = err.error_code(),
                    "Ability use rejected"
                );
            })?;

        self.emit_effects(used.events.clone());
        self.reap_deaths();
        Ok(used)
    }

    pub fn apply_effect(
        &mut self,
        unit: UnitId,
        def_id: &str,
        options: ApplyOptions,
    ) -> Result<ApplyOutcome> {
        let index = self.index_of(unit)?;
        let runtime = EffectRuntime::new(self.content.env());
        let outcome = runtime
            .apply_unit_effect(&mut self.ids, &mut self.units[index], def_id, options)
            .inspect_err(|err| {
                debug!(
                    target: "runtime::session",
                    %unit,
                    effect = def_id,
                    reason = err.error_code(),
                    "Effect not applied"
                );
            })?;

        self.emit(Event::Applied(EffectApplied {
            turn: self.turn,
            target: EffectTarget::Unit(unit),
            outcome: outcome.clone(),
        }));
        Ok(outcome)
    }

    pub fn apply_hex_effect(
        &mut self,
        at: Hex,
        def_id: &str,
        options: ApplyOptions,
    ) -> Result<ApplyOutcome> {
        let runtime = EffectRuntime::new(self.content.env());
        let outcome =
            runtime.apply_hex_effect(&mut self.ids, &mut self.world, at, def_id, options)?;

        self.emit(Event::Applied(EffectApplied {
            turn: self.turn,
            target: EffectTarget::Hex(at),
            outcome: outcome.clone(),
        }));
        Ok(outcome)
    }

    /// Journals new deaths and runs their death hooks.
    ///
    /// Spread only applies effects, so it cannot kill; one pass suffices.
    fn reap_deaths(&mut self) {
        let newly_dead: Vec<UnitId> = self
            .units
            .iter()
            .filter(|unit| !unit.is_alive() && !self.fallen.contains(&unit.id))
            .map(|unit| unit.id)
            .collect();

        for id in newly_dead {
            self.fallen.insert(id);
            let Some(dead) = self.unit(id).cloned() else {
                continue;
            };
            info!(target: "runtime::session", unit = %id, turn = self.turn.0, "Unit died");
            self.emit(Event::Combat(CombatEvent::UnitDied {
                turn: self.turn,
                unit: id,
            }));

            let runtime = EffectRuntime::new(self.content.env());
            let mut roster = Roster {
                units: &mut self.units,
            };
            let ctx = EffectContext::new(self.turn);
            let events = runtime.notify_death(&mut self.ids, &dead, &HexGrid, &mut roster, ctx);
            self.emit_effects(events);
        }
    }
}
