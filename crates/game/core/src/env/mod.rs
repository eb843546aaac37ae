//! Traits describing read-only match data.
//!
//! Oracles expose effect, weapon, and ability definitions. The [`Env`]
//! aggregate bundles them with the [`EngineConfig`] so the engine can access
//! everything it needs without hard coupling to concrete implementations.
mod abilities;
mod effects;
mod error;
mod spatial;
mod weapons;

pub use abilities::{AbilityCatalog, AbilityDefinition, AbilityKind, AbilityOracle, PassiveGrant};
pub use effects::{
    DeathSpread, EffectCatalog, EffectDefinition, EffectOracle, EffectParams, HookAction,
    Modifier, ModifierCondition, ModifierOp, NextHitBonus, SpreadEntry, StackingPolicy, Stat,
    TargetKind, TickKind, TickPhase, TickSpec,
};
pub use error::CatalogError;
pub use spatial::{NeighborResolver, OccupantResolver};
pub use weapons::{WeaponCatalog, WeaponDefinition, WeaponOracle};

use crate::config::EngineConfig;

/// Aggregates read-only oracles required by the effect runtime, combat
/// resolver, and turn controller.
#[derive(Clone, Copy)]
pub struct Env<'a> {
    effects: &'a dyn EffectOracle,
    weapons: &'a dyn WeaponOracle,
    abilities: &'a dyn AbilityOracle,
    config: &'a EngineConfig,
}

impl<'a> Env<'a> {
    pub fn new(
        effects: &'a dyn EffectOracle,
        weapons: &'a dyn WeaponOracle,
        abilities: &'a dyn AbilityOracle,
        config: &'a EngineConfig,
    ) -> Self {
        Self {
            effects,
            weapons,
            abilities,
            config,
        }
    }

    pub fn effects(&self) -> &'a dyn EffectOracle {
        self.effects
    }

    pub fn weapons(&self) -> &'a dyn WeaponOracle {
        self.weapons
    }

    pub fn abilities(&self) -> &'a dyn AbilityOracle {
        self.abilities
    }

    pub fn config(&self) -> &'a EngineConfig {
        self.config
    }

    /// Looks up an effect definition; unknown ids are `None`.
    pub fn effect(&self, id: &str) -> Option<&'a EffectDefinition> {
        self.effects.definition(id)
    }
}

impl core::fmt::Debug for Env<'_> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Env")
            .field("config", self.config)
            .finish_non_exhaustive()
    }
}
