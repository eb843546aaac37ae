//! Attack resolution: the multiplicative damage pipeline.
//!
//! ```text
//! raw   = base × groupAliveRatio × armorClass × distance
//!         × armorPoints × resist × damageTaken
//! final = max(0, round(raw + damageTakenFlat))
//! ```
//!
//! Every factor is recorded in [`DamageFactors`] so callers can explain the
//! number they display.

use crate::effects::{ModifierContext, compute_unit_modifiers};
use crate::env::Env;
use crate::state::{Squad, Unit};

use super::damage::{DamageType, damage_taken_multiplier, finalize_damage, reduction_multiplier};

/// The six pipeline factors, in application order.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DamageFactors {
    pub group_alive_ratio: f64,
    pub armor_class_multiplier: f64,
    pub distance_multiplier: f64,
    pub armor_points_multiplier: f64,
    pub resist_multiplier: f64,
    pub effect_damage_taken_multiplier: f64,
}

impl DamageFactors {
    pub const NEUTRAL: DamageFactors = DamageFactors {
        group_alive_ratio: 1.0,
        armor_class_multiplier: 1.0,
        distance_multiplier: 1.0,
        armor_points_multiplier: 1.0,
        resist_multiplier: 1.0,
        effect_damage_taken_multiplier: 1.0,
    };

    pub fn product(&self) -> f64 {
        self.group_alive_ratio
            * self.armor_class_multiplier
            * self.distance_multiplier
            * self.armor_points_multiplier
            * self.resist_multiplier
            * self.effect_damage_taken_multiplier
    }
}

/// Why a resolution degraded to zero damage.
#[derive(Clone, Debug, PartialEq, Eq, strum::IntoStaticStr)]
#[strum(serialize_all = "snake_case")]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Diagnostic {
    UnknownWeapon,
    MalformedWeapon(String),
    NonFiniteDamage,
}

impl Diagnostic {
    pub fn as_str(&self) -> &'static str {
        self.into()
    }
}

/// Fully explained attack result.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AttackResolution {
    pub weapon_id: String,
    pub damage_type: DamageType,
    pub distance: u32,
    pub base_damage: f64,
    pub factors: DamageFactors,
    /// Summed `damageTakenFlat` (all + weapon type) added after the chain.
    pub flat_bonus: i32,
    pub raw_damage: f64,
    pub final_damage: u32,
    pub diagnostic: Option<Diagnostic>,
}

impl AttackResolution {
    fn degraded(weapon_id: &str, distance: u32, diagnostic: Diagnostic) -> Self {
        Self {
            weapon_id: weapon_id.to_string(),
            damage_type: DamageType::default(),
            distance,
            base_damage: 0.0,
            factors: DamageFactors::NEUTRAL,
            flat_bonus: 0,
            raw_damage: 0.0,
            final_damage: 0,
            diagnostic: Some(diagnostic),
        }
    }

    pub fn is_degraded(&self) -> bool {
        self.diagnostic.is_some()
    }
}

/// Resolves an attack. Never fails: problems produce a zero-damage result
/// carrying a [`Diagnostic`].
///
/// Range is not checked here; call [`super::validate_attack`] first.
pub fn resolve_attack(
    env: Env<'_>,
    attacker: &Unit,
    defender: &Unit,
    weapon_id: &str,
) -> AttackResolution {
    let distance = attacker.position.distance_to(defender.position);

    let Some(weapon) = env.weapons().weapon(weapon_id) else {
        return AttackResolution::degraded(weapon_id, distance, Diagnostic::UnknownWeapon);
    };
    if let Some(reason) = weapon.malformation() {
        return AttackResolution::degraded(
            weapon_id,
            distance,
            Diagnostic::MalformedWeapon(reason.to_string()),
        );
    }

    let config = env.config();
    let damage_type = weapon.damage_type;
    let modifiers = compute_unit_modifiers(
        env.effects(),
        defender,
        ModifierContext::attack(weapon.is_melee()),
    );

    let group_alive_ratio = attacker.squad.as_ref().map_or(1.0, Squad::alive_ratio);
    let armor_class_multiplier = weapon
        .armor_class_multipliers
        .get(&defender.armor_class)
        .copied()
        .unwrap_or(1.0);
    let distance_multiplier = match distance {
        1 | 2 => weapon.distance_curve.get(&distance).copied().unwrap_or(1.0),
        _ => 1.0,
    };
    let effective_armor = defender
        .armor_points
        .saturating_add(defender.temp_armor_bonus)
        .saturating_add(modifiers.armor);
    let armor_points_multiplier = reduction_multiplier(effective_armor, config.armor_point_step);
    let resist_multiplier = match damage_type {
        DamageType::True => 1.0,
        other => reduction_multiplier(defender.resist(other), config.resist_step),
    };
    let effect_damage_taken_multiplier = damage_taken_multiplier(
        modifiers.damage_taken_pct.all,
        modifiers.damage_taken_pct.for_type(damage_type),
    );

    let factors = DamageFactors {
        group_alive_ratio,
        armor_class_multiplier,
        distance_multiplier,
        armor_points_multiplier,
        resist_multiplier,
        effect_damage_taken_multiplier,
    };
    let flat_bonus = modifiers.damage_taken_flat.total(damage_type);
    let raw_damage = weapon.base_damage * factors.product() + f64::from(flat_bonus);

    let Some(final_damage) = finalize_damage(raw_damage) else {
        return AttackResolution::degraded(weapon_id, distance, Diagnostic::NonFiniteDamage);
    };

    AttackResolution {
        weapon_id: weapon.id.clone(),
        damage_type,
        distance,
        base_damage: weapon.base_damage,
        factors,
        flat_bonus,
        raw_damage,
        final_damage,
        diagnostic: None,
    }
}
