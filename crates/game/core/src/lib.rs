//! Deterministic status-effect and combat rules for hex tactics matches.
//!
//! `tactics-core` holds the canonical rules (effect runtime, combat resolver,
//! turn controller, unit actions) as pure functions over explicit inputs.
//! Read-only match data is reached through the oracles bundled in [`Env`];
//! units, hex buckets and the [`InstanceIds`] counter are passed in on every
//! call. Nothing here logs, reads a clock or draws randomness, so replicas
//! replaying the same calls produce identical [`EffectEvent`] streams.
pub mod action;
pub mod combat;
pub mod config;
pub mod effects;
pub mod engine;
pub mod env;
pub mod error;
pub mod event;
pub mod state;

pub use action::{
    AbilityUse, ActionError, ApSpent, DefendOutcome, UnitRecord, apply_defence, can_spend_ap,
    check_ability_use, normalize_unit, spend_ap, use_ability,
};
pub use combat::{
    ArmorClass, AttackCheck, AttackResolution, CombatError, DamageFactors, DamageType, Diagnostic,
    resolve_attack, validate_attack,
};
pub use config::EngineConfig;
pub use effects::{
    ApplyChange, ApplyOptions, ApplyOutcome, EffectContext, EffectError, EffectInstance,
    EffectRuntime, EffectSource, InstanceId, InstanceIds, ModifierContext, NextHitOutcome,
    UnitModifiers,
};
pub use engine::{EffectHolder, ExpiredEffect, TurnController, TurnReport};
pub use env::{
    AbilityCatalog, AbilityDefinition, AbilityOracle, CatalogError, EffectCatalog,
    EffectDefinition, EffectOracle, EffectParams, Env, NeighborResolver, OccupantResolver,
    WeaponCatalog, WeaponDefinition, WeaponOracle,
};
pub use error::{ErrorSeverity, GameError, ReasonCode};
pub use event::{EffectEvent, EventDetail, EventPhase, SpreadRecord};
pub use state::{
    Hex, Owner, ResourceMeter, Squad, TurnNumber, Unit, UnitFlags, UnitId, WorldEffects,
};
