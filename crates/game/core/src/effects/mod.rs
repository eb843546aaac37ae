//! Effect runtime: application, aggregation, ticking, expiry and hooks.
//!
//! [`EffectRuntime`] is a thin, copyable handle over [`Env`]. It owns no
//! state; units, hex buckets and the instance id counter are passed in on
//! every call, so two replicas issuing the same calls observe the same
//! results and events.

mod aggregate;
mod apply;
mod error;
mod expiry;
mod hooks;
mod instance;
mod tick;

pub use aggregate::{
    AttackContext, DamageTotals, ModifierContext, UnitModifiers, compute_unit_modifiers,
};
pub use apply::{ApplyChange, ApplyOptions, ApplyOutcome};
pub use error::EffectError;
pub use expiry::{cleanup_expired, cleanup_where, decrement_durations, decrement_where};
pub use hooks::NextHitOutcome;
pub use instance::{EffectInstance, EffectSource, InstanceId, InstanceIds};
pub use tick::EffectContext;

use crate::env::{EffectDefinition, Env, TargetKind, TickPhase};
use crate::event::EffectEvent;
use crate::state::{Hex, Unit, WorldEffects, temporary_count};

use hooks::HookTrigger;

/// Stateless entry point for every effect operation.
#[derive(Clone, Copy, Debug)]
pub struct EffectRuntime<'a> {
    env: Env<'a>,
}

impl<'a> EffectRuntime<'a> {
    pub fn new(env: Env<'a>) -> Self {
        Self { env }
    }

    pub fn env(&self) -> Env<'a> {
        self.env
    }

    fn unit_definition(&self, def_id: &str) -> Result<&'a EffectDefinition, EffectError> {
        match self.env.effect(def_id) {
            Some(def) if def.target == TargetKind::Unit => Ok(def),
            _ => Err(EffectError::UnknownEffect(def_id.to_string())),
        }
    }

    /// Applies a unit-kind effect, collapsing into an existing instance of the
    /// same definition according to its stacking policy.
    ///
    /// Brand-new temporary instances are rejected once every status slot is
    /// taken. Refreshing or stacking an existing instance always succeeds.
    pub fn apply_unit_effect(
        &self,
        ids: &mut InstanceIds,
        unit: &mut Unit,
        def_id: &str,
        options: ApplyOptions,
    ) -> Result<ApplyOutcome, EffectError> {
        let definition = self.unit_definition(def_id)?;

        let outcome = match unit.effects.iter_mut().find(|i| i.def_id == definition.id) {
            Some(existing) => apply::reapply(definition, existing, &options),
            None => {
                let cap = self.env.config().effective_slot_cap();
                let used = temporary_count(&unit.effects, self.env.effects());
                if !definition.is_infinite() && used >= cap {
                    return Err(EffectError::StatusSlotsFull {
                        effect: definition.id.clone(),
                        cap,
                    });
                }
                apply::create(ids, definition, &mut unit.effects, &options)
            }
        };

        self.resync_statuses(unit);
        Ok(outcome)
    }

    /// Applies a hex-kind effect to the bucket at `at`. No slot cap applies.
    pub fn apply_hex_effect(
        &self,
        ids: &mut InstanceIds,
        world: &mut WorldEffects,
        at: Hex,
        def_id: &str,
        options: ApplyOptions,
    ) -> Result<ApplyOutcome, EffectError> {
        let definition = match self.env.effect(def_id) {
            Some(def) if def.target == TargetKind::Hex => def,
            Some(_) => return Err(EffectError::NotHexEffect(def_id.to_string())),
            None => return Err(EffectError::UnknownEffect(def_id.to_string())),
        };

        let bucket = world.bucket_mut(at);
        let outcome = match bucket.iter_mut().find(|i| i.def_id == definition.id) {
            Some(existing) => apply::reapply(definition, existing, &options),
            None => apply::create(ids, definition, bucket, &options),
        };
        Ok(outcome)
    }

    pub fn compute_unit_modifiers(&self, unit: &Unit, ctx: ModifierContext) -> UnitModifiers {
        compute_unit_modifiers(self.env.effects(), unit, ctx)
    }

    /// Runs the unit's own ticks for `phase`.
    pub fn tick(&self, unit: &mut Unit, phase: TickPhase, ctx: EffectContext) -> Vec<EffectEvent> {
        let instances = unit.effects.clone();
        tick::run_ticks(self.env.effects(), unit, &instances, phase, ctx)
    }

    /// Runs the ticks of the hazards on the hex `unit` stands on.
    pub fn tick_hazards(
        &self,
        unit: &mut Unit,
        world: &WorldEffects,
        phase: TickPhase,
        ctx: EffectContext,
    ) -> Vec<EffectEvent> {
        let bucket = world.bucket(unit.position);
        if bucket.is_empty() {
            return Vec::new();
        }
        tick::run_ticks(self.env.effects(), unit, bucket, phase, ctx)
    }

    pub fn decrement_durations(&self, container: &mut [EffectInstance]) {
        decrement_durations(self.env.effects(), container);
    }

    pub fn cleanup_expired(&self, container: &mut Vec<EffectInstance>) -> Vec<EffectInstance> {
        cleanup_expired(self.env.effects(), container)
    }

    /// Removes expired unit effects and drops them from the status mirror.
    pub fn cleanup_unit(&self, unit: &mut Unit) -> Vec<EffectInstance> {
        let removed = cleanup_expired(self.env.effects(), &mut unit.effects);
        self.resync_statuses(unit);
        removed
    }

    pub fn resync_statuses(&self, unit: &mut Unit) {
        let cap = self.env.config().effective_slot_cap();
        unit.statuses.resync(&unit.effects, self.env.effects(), cap);
    }

    pub fn notify_ability_used(&self, unit: &mut Unit, ctx: EffectContext) -> Vec<EffectEvent> {
        hooks::fire_hooks(self.env.effects(), unit, HookTrigger::AbilityUse, ctx)
    }

    pub fn notify_move_step(&self, unit: &mut Unit, ctx: EffectContext) -> Vec<EffectEvent> {
        hooks::fire_hooks(self.env.effects(), unit, HookTrigger::MoveStep, ctx)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::combat::DamageType;
    use crate::config::EngineConfig;
    use crate::env::{
        AbilityCatalog, DeathSpread, EffectCatalog, EffectParams, HookAction, Modifier,
        ModifierCondition, NeighborResolver, NextHitBonus, OccupantResolver, SpreadEntry,
        StackingPolicy, Stat, TickSpec, WeaponCatalog,
    };
    use crate::event::{EventDetail, EventPhase};
    use crate::state::{Owner, TurnNumber, UnitId};

    struct Fixture {
        effects: EffectCatalog,
        weapons: WeaponCatalog,
        abilities: AbilityCatalog,
        config: EngineConfig,
    }

    impl Fixture {
        fn new() -> Self {
            let mut effects = EffectCatalog::new();
            for def in [
                EffectDefinition::new("burn", 2)
                    .with_tick(TickSpec::dot(TickPhase::TurnStart, 2, Some(DamageType::Fire))),
                EffectDefinition::new("bleed", 3)
                    .with_stacking(StackingPolicy::Stack, 3)
                    .with_tick(TickSpec::dot(TickPhase::TurnEnd, 1, None)),
                EffectDefinition::new("stun", 1).with_stacking(StackingPolicy::Ignore, 1),
                EffectDefinition::new("mending", 2)
                    .with_tick(TickSpec::regen(TickPhase::TurnStart, 4)),
                EffectDefinition::new("blessed", 2)
                    .with_modifier(Modifier::add(Stat::HealingReceivedPct, 50)),
                EffectDefinition::new("wounded", 2).with_params(EffectParams {
                    cannot_heal: Some(true),
                    ..EffectParams::default()
                }),
                EffectDefinition::new("slowed", 2)
                    .with_tick(TickSpec::stat_delta(TickPhase::TurnStart, -3, -1)),
                EffectDefinition::new("fortified", 0).with_modifier(Modifier::add(Stat::Armor, 2)),
                EffectDefinition::new("brace", 1).with_modifier(
                    Modifier::add(Stat::DamageTakenPct, -20).when(ModifierCondition::NotMelee),
                ),
                EffectDefinition::new("vulnerable", 2)
                    .with_stacking(StackingPolicy::Stack, 5)
                    .with_modifier(
                        Modifier::add(Stat::DamageTakenFlat, 1).scoped(DamageType::Physical),
                    ),
                EffectDefinition::new("caltrops", 2).with_params(EffectParams {
                    on_move_step: Some(HookAction::Damage {
                        amount: 1,
                        damage_type: None,
                    }),
                    ..EffectParams::default()
                }),
                EffectDefinition::new("mark", 3).with_params(EffectParams {
                    next_hit_bonus: Some(NextHitBonus {
                        amount: 3,
                        damage_type: None,
                        consume: true,
                    }),
                    ..EffectParams::default()
                }),
                EffectDefinition::new("plague", 3).with_params(EffectParams {
                    on_death_apply_adjacent: Some(DeathSpread {
                        radius: 1,
                        effects: vec![SpreadEntry {
                            effect_id: "burn".into(),
                            duration: Some(1),
                            stacks: None,
                        }],
                    }),
                    ..EffectParams::default()
                }),
                EffectDefinition::new("frostrot", 3).with_params(EffectParams {
                    on_death_apply_adjacent: Some(DeathSpread {
                        radius: 1,
                        effects: vec![SpreadEntry {
                            effect_id: "slowed".into(),
                            duration: Some(2),
                            stacks: None,
                        }],
                    }),
                    ..EffectParams::default()
                }),
                EffectDefinition::new("soothing", 2).with_params(EffectParams {
                    on_move_step: Some(HookAction::Heal { amount: 5 }),
                    ..EffectParams::default()
                }),
                EffectDefinition::new("firefield", 2)
                    .with_target(TargetKind::Hex)
                    .with_tick(TickSpec::dot(TickPhase::TurnStart, 3, Some(DamageType::Fire))),
            ] {
                effects.insert(def).unwrap();
            }
            for i in 0..12 {
                effects.insert(EffectDefinition::new(format!("t{i}"), 3)).unwrap();
            }

            Self {
                effects,
                weapons: WeaponCatalog::new(),
                abilities: AbilityCatalog::new(),
                config: EngineConfig::default(),
            }
        }

        fn runtime(&self) -> EffectRuntime<'_> {
            EffectRuntime::new(Env::new(
                &self.effects,
                &self.weapons,
                &self.abilities,
                &self.config,
            ))
        }
    }

    fn unit(id: u32) -> Unit {
        Unit::new(UnitId(id), Owner(1), Hex::new(0, 0)).with_hp(20).with_mp(5).with_ap(2)
    }

    fn ctx() -> EffectContext {
        EffectContext::new(TurnNumber(1))
    }

    #[test]
    fn unknown_and_mismatched_definitions_are_rejected() {
        let fx = Fixture::new();
        let rt = fx.runtime();
        let mut ids = InstanceIds::new();
        let mut u = unit(1);

        assert_eq!(
            rt.apply_unit_effect(&mut ids, &mut u, "nope", ApplyOptions::new()),
            Err(EffectError::UnknownEffect("nope".into()))
        );
        assert_eq!(
            rt.apply_unit_effect(&mut ids, &mut u, "firefield", ApplyOptions::new()),
            Err(EffectError::UnknownEffect("firefield".into()))
        );

        let mut world = WorldEffects::new();
        assert_eq!(
            rt.apply_hex_effect(&mut ids, &mut world, Hex::ORIGIN, "burn", ApplyOptions::new()),
            Err(EffectError::NotHexEffect("burn".into()))
        );
        assert!(u.effects.is_empty());
        assert_eq!(ids.peek(), 1);
    }

    #[test]
    fn refresh_keeps_a_single_instance_with_latest_values() {
        let fx = Fixture::new();
        let rt = fx.runtime();
        let mut ids = InstanceIds::new();
        let mut u = unit(1);

        let first = rt.apply_unit_effect(&mut ids, &mut u, "burn", ApplyOptions::new()).unwrap();
        assert_eq!(first.change, ApplyChange::Created);

        let second = rt
            .apply_unit_effect(&mut ids, &mut u, "burn", ApplyOptions::new().duration(5))
            .unwrap();
        assert_eq!(second.change, ApplyChange::Refreshed);
        assert_eq!(second.instance, first.instance);
        assert_eq!(u.effects.len(), 1);
        assert_eq!(u.effects[0].remaining, 5);

        // Without an explicit duration the remaining turns never drop.
        rt.apply_unit_effect(&mut ids, &mut u, "burn", ApplyOptions::new()).unwrap();
        assert_eq!(u.effects[0].remaining, 5);
    }

    #[test]
    fn refresh_merges_the_latest_params_over_the_instance() {
        let fx = Fixture::new();
        let rt = fx.runtime();
        let mut ids = InstanceIds::new();
        let mut u = unit(1);
        rt.apply_unit_effect(&mut ids, &mut u, "mark", ApplyOptions::new()).unwrap();

        let silenced = EffectParams {
            cannot_use_abilities: Some(true),
            ..EffectParams::default()
        };
        rt.apply_unit_effect(&mut ids, &mut u, "mark", ApplyOptions::new().params(silenced))
            .unwrap();
        let bigger = EffectParams {
            next_hit_bonus: Some(NextHitBonus {
                amount: 7,
                damage_type: None,
                consume: false,
            }),
            ..EffectParams::default()
        };
        let outcome = rt
            .apply_unit_effect(&mut ids, &mut u, "mark", ApplyOptions::new().params(bigger))
            .unwrap();

        assert_eq!(outcome.change, ApplyChange::Refreshed);
        assert_eq!(u.effects.len(), 1);
        let params = &u.effects[0].params;
        assert_eq!(params.cannot_use_abilities, Some(true));
        assert_eq!(
            params.next_hit_bonus.as_ref().map(|b| (b.amount, b.consume)),
            Some((7, false))
        );
    }

    #[test]
    fn instance_params_survive_a_later_definition_change() {
        let fx = Fixture::new();
        let mut ids = InstanceIds::new();
        let mut u = unit(1);
        fx.runtime()
            .apply_unit_effect(&mut ids, &mut u, "mark", ApplyOptions::new())
            .unwrap();

        let mut revised = EffectCatalog::new();
        revised
            .insert(EffectDefinition::new("mark", 3).with_params(EffectParams {
                next_hit_bonus: Some(NextHitBonus {
                    amount: 9,
                    damage_type: None,
                    consume: true,
                }),
                ..EffectParams::default()
            }))
            .unwrap();
        let rt = EffectRuntime::new(Env::new(&revised, &fx.weapons, &fx.abilities, &fx.config));

        assert_eq!(
            u.effects[0].params.next_hit_bonus.as_ref().map(|b| b.amount),
            Some(3)
        );
        assert_eq!(rt.consume_next_hit_bonus(&mut u, DamageType::Physical).amount, 3);
    }

    #[test]
    fn stack_policy_counts_and_clamps() {
        let fx = Fixture::new();
        let rt = fx.runtime();
        let mut ids = InstanceIds::new();
        let mut u = unit(1);

        for expected in 1..=3 {
            rt.apply_unit_effect(&mut ids, &mut u, "bleed", ApplyOptions::new()).unwrap();
            assert_eq!(u.effects[0].stacks, expected);
        }
        let clamped = rt.apply_unit_effect(&mut ids, &mut u, "bleed", ApplyOptions::new()).unwrap();
        assert_eq!(clamped.change, ApplyChange::Stacked);
        assert_eq!(clamped.stacks, 3);
        assert_eq!(u.effects.len(), 1);
    }

    #[test]
    fn ignore_policy_leaves_existing_instance_untouched() {
        let fx = Fixture::new();
        let rt = fx.runtime();
        let mut ids = InstanceIds::new();
        let mut u = unit(1);

        rt.apply_unit_effect(&mut ids, &mut u, "stun", ApplyOptions::new()).unwrap();
        let outcome = rt
            .apply_unit_effect(&mut ids, &mut u, "stun", ApplyOptions::new().duration(9))
            .unwrap();
        assert_eq!(outcome.change, ApplyChange::Ignored);
        assert_eq!(u.effects[0].remaining, 1);
    }

    #[test]
    fn status_cap_only_blocks_brand_new_temporary_effects() {
        let fx = Fixture::new();
        let rt = fx.runtime();
        let mut ids = InstanceIds::new();
        let mut u = unit(1);

        for i in 0..10 {
            rt.apply_unit_effect(&mut ids, &mut u, &format!("t{i}"), ApplyOptions::new())
                .unwrap();
        }
        assert_eq!(u.statuses.len(), 10);

        let rejected = rt.apply_unit_effect(&mut ids, &mut u, "t10", ApplyOptions::new());
        assert!(matches!(rejected, Err(EffectError::StatusSlotsFull { cap: 10, .. })));
        assert!(!u.has_effect("t10"));

        let refreshed = rt
            .apply_unit_effect(&mut ids, &mut u, "t3", ApplyOptions::new().duration(7))
            .unwrap();
        assert_eq!(refreshed.change, ApplyChange::Refreshed);

        // Infinite effects never occupy a slot.
        rt.apply_unit_effect(&mut ids, &mut u, "fortified", ApplyOptions::new())
            .unwrap();
        assert_eq!(u.statuses.len(), 10);
        assert!(!u.statuses.contains("fortified"));
    }

    #[test]
    fn hex_effects_share_stacking_semantics_without_cap() {
        let fx = Fixture::new();
        let rt = fx.runtime();
        let mut ids = InstanceIds::new();
        let mut world = WorldEffects::new();
        let at = Hex::new(2, -1);

        let first = rt
            .apply_hex_effect(&mut ids, &mut world, at, "firefield", ApplyOptions::new())
            .unwrap();
        let again = rt
            .apply_hex_effect(
                &mut ids,
                &mut world,
                at,
                "firefield",
                ApplyOptions::new().duration(4),
            )
            .unwrap();
        assert_eq!(first.instance, again.instance);
        assert_eq!(world.bucket(at).len(), 1);
        assert_eq!(world.bucket(at)[0].remaining, 4);
    }

    #[test]
    fn dot_tick_emits_one_matching_event() {
        let fx = Fixture::new();
        let rt = fx.runtime();
        let mut ids = InstanceIds::new();
        let mut u = unit(1);
        rt.apply_unit_effect(&mut ids, &mut u, "burn", ApplyOptions::new()).unwrap();

        let events = rt.tick(&mut u, TickPhase::TurnStart, ctx());
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].kind(), "dot");
        assert_eq!(events[0].hp_change(), Some((20, 18)));
        assert_eq!(u.hp.current, 18);

        // Wrong phase does nothing.
        assert!(rt.tick(&mut u, TickPhase::TurnEnd, ctx()).is_empty());
    }

    #[test]
    fn dot_scales_with_stacks_and_never_goes_below_zero() {
        let fx = Fixture::new();
        let rt = fx.runtime();
        let mut ids = InstanceIds::new();
        let mut u = unit(1);
        u.hp.current = 2;
        rt.apply_unit_effect(&mut ids, &mut u, "bleed", ApplyOptions::new().stacks(3))
            .unwrap();

        let events = rt.tick(&mut u, TickPhase::TurnEnd, ctx());
        assert_eq!(u.hp.current, 0);
        assert!(matches!(
            events[0].detail,
            EventDetail::Damage { amount: 2, hp_before: 2, hp_after: 0, .. }
        ));
    }

    #[test]
    fn regen_scales_with_healing_received_and_respects_cannot_heal() {
        let fx = Fixture::new();
        let rt = fx.runtime();
        let mut ids = InstanceIds::new();
        let mut u = unit(1);
        u.hp.current = 10;
        rt.apply_unit_effect(&mut ids, &mut u, "mending", ApplyOptions::new()).unwrap();
        rt.apply_unit_effect(&mut ids, &mut u, "blessed", ApplyOptions::new()).unwrap();

        rt.tick(&mut u, TickPhase::TurnStart, ctx());
        assert_eq!(u.hp.current, 16);

        rt.apply_unit_effect(&mut ids, &mut u, "wounded", ApplyOptions::new()).unwrap();
        assert!(rt.tick(&mut u, TickPhase::TurnStart, ctx()).is_empty());
        assert_eq!(u.hp.current, 16);
    }

    #[test]
    fn a_unit_killed_mid_pass_stays_dead() {
        let fx = Fixture::new();
        let rt = fx.runtime();
        let mut ids = InstanceIds::new();
        let mut u = unit(1);
        u.hp.current = 2;
        rt.apply_unit_effect(&mut ids, &mut u, "burn", ApplyOptions::new()).unwrap();
        rt.apply_unit_effect(&mut ids, &mut u, "mending", ApplyOptions::new()).unwrap();

        let events = rt.tick(&mut u, TickPhase::TurnStart, ctx());
        assert_eq!(u.hp.current, 0);
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].kind(), "dot");

        // Nothing more happens to a corpse.
        assert!(rt.tick(&mut u, TickPhase::TurnStart, ctx()).is_empty());
    }

    #[test]
    fn a_lethal_hook_stops_later_heal_hooks() {
        let fx = Fixture::new();
        let rt = fx.runtime();
        let mut ids = InstanceIds::new();
        let mut u = unit(1);
        u.hp.current = 1;
        rt.apply_unit_effect(&mut ids, &mut u, "caltrops", ApplyOptions::new()).unwrap();
        rt.apply_unit_effect(&mut ids, &mut u, "soothing", ApplyOptions::new()).unwrap();

        let events = rt.notify_move_step(&mut u, ctx());
        assert_eq!(events.len(), 1);
        assert_eq!(u.hp.current, 0);
    }

    #[test]
    fn stat_delta_floors_each_stat_at_zero() {
        let fx = Fixture::new();
        let rt = fx.runtime();
        let mut ids = InstanceIds::new();
        let mut u = unit(1);
        u.mp.current = 2;
        rt.apply_unit_effect(&mut ids, &mut u, "slowed", ApplyOptions::new()).unwrap();

        let events = rt.tick(&mut u, TickPhase::TurnStart, ctx());
        assert_eq!((u.mp.current, u.ap.current), (0, 1));
        assert_eq!(events[0].kind(), "stat_delta");
    }

    #[test]
    fn hazards_tick_the_occupant() {
        let fx = Fixture::new();
        let rt = fx.runtime();
        let mut ids = InstanceIds::new();
        let mut world = WorldEffects::new();
        let mut u = unit(1);
        rt.apply_hex_effect(&mut ids, &mut world, u.position, "firefield", ApplyOptions::new())
            .unwrap();

        let events = rt.tick_hazards(&mut u, &world, TickPhase::TurnStart, ctx());
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].effect_id, "firefield");
        assert_eq!(u.hp.current, 17);
    }

    #[test]
    fn modifiers_multiply_by_stacks_and_honor_conditions() {
        let fx = Fixture::new();
        let rt = fx.runtime();
        let mut ids = InstanceIds::new();
        let mut u = unit(1);
        rt.apply_unit_effect(&mut ids, &mut u, "vulnerable", ApplyOptions::new().stacks(2))
            .unwrap();
        rt.apply_unit_effect(&mut ids, &mut u, "brace", ApplyOptions::new()).unwrap();
        rt.apply_unit_effect(&mut ids, &mut u, "fortified", ApplyOptions::new()).unwrap();

        let idle = rt.compute_unit_modifiers(&u, ModifierContext::default());
        assert_eq!(idle.armor, 2);
        assert_eq!(idle.damage_taken_flat.total(DamageType::Physical), 2);
        assert_eq!(idle.damage_taken_flat.total(DamageType::Fire), 0);
        assert_eq!(idle.damage_taken_pct.all, 0);

        let ranged = rt.compute_unit_modifiers(&u, ModifierContext::attack(false));
        assert_eq!(ranged.damage_taken_pct.all, -20);
        let melee = rt.compute_unit_modifiers(&u, ModifierContext::attack(true));
        assert_eq!(melee.damage_taken_pct.all, 0);
    }

    #[test]
    fn turn_end_cycle_never_leaves_negative_durations() {
        let fx = Fixture::new();
        let rt = fx.runtime();
        let mut ids = InstanceIds::new();
        let mut u = unit(1);
        rt.apply_unit_effect(&mut ids, &mut u, "stun", ApplyOptions::new()).unwrap();
        rt.apply_unit_effect(&mut ids, &mut u, "burn", ApplyOptions::new()).unwrap();
        rt.apply_unit_effect(&mut ids, &mut u, "fortified", ApplyOptions::new()).unwrap();

        rt.tick(&mut u, TickPhase::TurnEnd, ctx());
        rt.decrement_durations(&mut u.effects);
        let removed = rt.cleanup_unit(&mut u);

        assert_eq!(removed.len(), 1);
        assert_eq!(removed[0].def_id, "stun");
        assert!(u.effects.iter().all(|i| i.def_id == "fortified" || i.remaining > 0));
        assert_eq!(u.statuses.def_ids(), vec!["burn"]);
    }

    #[test]
    fn move_step_hook_damages_like_a_tick() {
        let fx = Fixture::new();
        let rt = fx.runtime();
        let mut ids = InstanceIds::new();
        let mut u = unit(1);
        rt.apply_unit_effect(&mut ids, &mut u, "caltrops", ApplyOptions::new()).unwrap();

        let events = rt.notify_move_step(&mut u, ctx());
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].phase, EventPhase::MoveStep);
        assert_eq!(u.hp.current, 19);
        assert!(rt.notify_ability_used(&mut u, ctx()).is_empty());
    }

    #[test]
    fn ability_hook_from_apply_overrides() {
        let fx = Fixture::new();
        let rt = fx.runtime();
        let mut ids = InstanceIds::new();
        let mut u = unit(1);
        let overrides = EffectParams {
            on_ability_use: Some(HookAction::Damage {
                amount: 4,
                damage_type: Some(DamageType::Arcane),
            }),
            ..EffectParams::default()
        };
        rt.apply_unit_effect(&mut ids, &mut u, "stun", ApplyOptions::new().params(overrides))
            .unwrap();

        let events = rt.notify_ability_used(&mut u, ctx());
        assert_eq!(events[0].phase, EventPhase::AbilityUse);
        assert_eq!(u.hp.current, 16);
    }

    #[test]
    fn consumable_next_hit_bonus_fires_once() {
        let fx = Fixture::new();
        let rt = fx.runtime();
        let mut ids = InstanceIds::new();
        let mut u = unit(1);
        rt.apply_unit_effect(&mut ids, &mut u, "mark", ApplyOptions::new()).unwrap();
        assert!(u.statuses.contains("mark"));

        let first = rt.consume_next_hit_bonus(&mut u, DamageType::Physical);
        assert_eq!(first.amount, 3);
        assert!(first.consumed);
        assert!(!u.has_effect("mark"));
        assert!(!u.statuses.contains("mark"));

        let second = rt.consume_next_hit_bonus(&mut u, DamageType::Physical);
        assert_eq!(second, NextHitOutcome::default());
    }

    struct Ring(Vec<Hex>);

    impl NeighborResolver for Ring {
        fn neighbors(&self, _center: Hex, _radius: u32) -> Vec<Hex> {
            self.0.clone()
        }
    }

    struct Board(Vec<Unit>);

    impl OccupantResolver for Board {
        fn occupant_at(&mut self, at: Hex) -> Option<&mut Unit> {
            self.0.iter_mut().find(|u| u.position == at)
        }
    }

    #[test]
    fn death_spreads_to_living_neighbors_with_one_summary_event() {
        let fx = Fixture::new();
        let rt = fx.runtime();
        let mut ids = InstanceIds::new();
        let mut dead = unit(1);
        rt.apply_unit_effect(&mut ids, &mut dead, "plague", ApplyOptions::new()).unwrap();
        dead.hp.current = 0;

        let alive = Unit::new(UnitId(2), Owner(2), Hex::new(1, 0)).with_hp(10);
        let mut corpse = Unit::new(UnitId(3), Owner(2), Hex::new(0, 1)).with_hp(10);
        corpse.hp.current = 0;
        let mut board = Board(vec![alive, corpse]);
        let ring = Ring(vec![Hex::new(1, 0), Hex::new(0, 1), Hex::new(-1, 0)]);

        let events = rt.notify_death(&mut ids, &dead, &ring, &mut board, ctx());
        assert_eq!(events.len(), 1);
        let EventDetail::Spread { applied } = &events[0].detail else {
            panic!("expected spread event");
        };
        assert_eq!(applied.len(), 1);
        assert_eq!(applied[0].unit, UnitId(2));
        assert_eq!(board.0[0].effect("burn").map(|i| i.remaining), Some(1));
        assert!(!board.0[1].has_effect("burn"));
    }

    #[test]
    fn several_spreading_effects_share_one_summary_event() {
        let fx = Fixture::new();
        let rt = fx.runtime();
        let mut ids = InstanceIds::new();
        let mut dead = unit(1);
        rt.apply_unit_effect(&mut ids, &mut dead, "plague", ApplyOptions::new()).unwrap();
        rt.apply_unit_effect(&mut ids, &mut dead, "frostrot", ApplyOptions::new()).unwrap();
        dead.hp.current = 0;

        let neighbor = Unit::new(UnitId(2), Owner(2), Hex::new(1, 0)).with_hp(10);
        let mut board = Board(vec![neighbor]);
        let ring = Ring(vec![Hex::new(1, 0), Hex::new(0, 1)]);

        let events = rt.notify_death(&mut ids, &dead, &ring, &mut board, ctx());
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].effect_id, "plague");
        let EventDetail::Spread { applied } = &events[0].detail else {
            panic!("expected spread event");
        };
        let spread: Vec<(UnitId, &str)> =
            applied.iter().map(|r| (r.unit, r.effect_id.as_str())).collect();
        assert_eq!(spread, vec![(UnitId(2), "burn"), (UnitId(2), "slowed")]);
        assert!(board.0[0].has_effect("burn") && board.0[0].has_effect("slowed"));

        let mut clean = unit(3);
        clean.hp.current = 0;
        assert!(rt.notify_death(&mut ids, &clean, &ring, &mut board, ctx()).is_empty());
    }
}
