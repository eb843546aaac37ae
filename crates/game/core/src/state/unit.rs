//! Unit entity as seen by the rules engine.

use std::collections::BTreeMap;

use bitflags::bitflags;

use crate::combat::{ArmorClass, DamageType};
use crate::effects::EffectInstance;

use super::common::{Hex, Owner, ResourceMeter, UnitId};
use super::status::StatusMirror;

bitflags! {
    /// One-turn-only flags cleared at the owner's next turn start.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    pub struct UnitFlags: u8 {
        /// Unit spent its turn defending.
        const DEFENDING = 1 << 0;
    }
}

/// Squad composition for group-style units.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Squad {
    pub alive: u32,
    pub size: u32,
}

impl Squad {
    /// Fraction of the squad still alive, clamped to `[0, 1]`.
    pub fn alive_ratio(&self) -> f64 {
        if self.size == 0 {
            return 0.0;
        }
        (f64::from(self.alive) / f64::from(self.size)).clamp(0.0, 1.0)
    }
}

/// Unit state owned by the engine for the duration of a call.
///
/// The unit exclusively owns its effect list and status mirror.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Unit {
    pub id: UnitId,
    pub owner: Owner,
    pub position: Hex,
    pub hp: ResourceMeter,
    pub mp: ResourceMeter,
    pub ap: ResourceMeter,
    pub armor_points: i32,
    /// Bonus armor that lasts until the owner's next turn start.
    pub temp_armor_bonus: i32,
    pub armor_class: ArmorClass,
    /// Percent points per damage type.
    pub resists: BTreeMap<DamageType, i32>,
    pub squad: Option<Squad>,
    pub abilities: Vec<String>,
    pub flags: UnitFlags,
    pub effects: Vec<EffectInstance>,
    pub statuses: StatusMirror,
}

impl Unit {
    pub fn new(id: UnitId, owner: Owner, position: Hex) -> Self {
        Self {
            id,
            owner,
            position,
            hp: ResourceMeter::default(),
            mp: ResourceMeter::default(),
            ap: ResourceMeter::default(),
            armor_points: 0,
            temp_armor_bonus: 0,
            armor_class: ArmorClass::default(),
            resists: BTreeMap::new(),
            squad: None,
            abilities: Vec::new(),
            flags: UnitFlags::empty(),
            effects: Vec::new(),
            statuses: StatusMirror::new(),
        }
    }

    pub fn with_hp(mut self, max: i32) -> Self {
        self.hp = ResourceMeter::full(max);
        self
    }

    pub fn with_mp(mut self, max: i32) -> Self {
        self.mp = ResourceMeter::full(max);
        self
    }

    pub fn with_ap(mut self, max: i32) -> Self {
        self.ap = ResourceMeter::full(max);
        self
    }

    pub fn with_armor(mut self, armor_points: i32, armor_class: ArmorClass) -> Self {
        self.armor_points = armor_points;
        self.armor_class = armor_class;
        self
    }

    pub fn with_resist(mut self, damage_type: DamageType, points: i32) -> Self {
        self.resists.insert(damage_type, points);
        self
    }

    pub fn with_squad(mut self, alive: u32, size: u32) -> Self {
        self.squad = Some(Squad { alive, size });
        self
    }

    pub fn with_ability(mut self, ability: impl Into<String>) -> Self {
        self.abilities.push(ability.into());
        self
    }

    pub fn is_alive(&self) -> bool {
        self.hp.current > 0
    }

    pub fn is_defending(&self) -> bool {
        self.flags.contains(UnitFlags::DEFENDING)
    }

    pub fn resist(&self, damage_type: DamageType) -> i32 {
        self.resists.get(&damage_type).copied().unwrap_or(0)
    }

    pub fn effect(&self, def_id: &str) -> Option<&EffectInstance> {
        self.effects.iter().find(|instance| instance.def_id == def_id)
    }

    pub fn has_effect(&self, def_id: &str) -> bool {
        self.effect(def_id).is_some()
    }
}
