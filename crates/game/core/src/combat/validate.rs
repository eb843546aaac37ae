//! Range validation.

use crate::effects::{ModifierContext, compute_unit_modifiers};
use crate::env::{Env, WeaponDefinition};
use crate::state::Unit;

use super::error::CombatError;

/// Successful range check.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AttackCheck {
    pub weapon_id: String,
    pub distance: u32,
    pub range_min: u32,
    /// Weapon maximum extended by the attacker's `range` modifier.
    pub range_max: u32,
    pub melee: bool,
}

/// Maximum range after the attacker's `range` modifier, never below the minimum.
pub(crate) fn effective_range_max(weapon: &WeaponDefinition, range_bonus: i32) -> u32 {
    let extended = i64::from(weapon.range_max) + i64::from(range_bonus);
    let clamped = extended.clamp(i64::from(weapon.range_min), i64::from(u32::MAX));
    u32::try_from(clamped).unwrap_or(weapon.range_min)
}

/// Checks that `defender` is within `[range_min, range_max]` of `attacker`.
pub fn validate_attack(
    env: Env<'_>,
    attacker: &Unit,
    defender: &Unit,
    weapon_id: &str,
) -> Result<AttackCheck, CombatError> {
    let weapon = env
        .weapons()
        .weapon(weapon_id)
        .filter(|weapon| weapon.malformation().is_none())
        .ok_or_else(|| CombatError::BadWeapon(weapon_id.to_string()))?;

    let distance = attacker.position.distance_to(defender.position);
    let range_bonus =
        compute_unit_modifiers(env.effects(), attacker, ModifierContext::default()).range;
    let range_max = effective_range_max(weapon, range_bonus);

    if distance < weapon.range_min {
        return Err(CombatError::TooClose {
            distance,
            min: weapon.range_min,
        });
    }
    if distance > range_max {
        return Err(CombatError::OutOfRange {
            distance,
            max: range_max,
        });
    }

    Ok(AttackCheck {
        weapon_id: weapon.id.clone(),
        distance,
        range_min: weapon.range_min,
        range_max,
        melee: weapon.is_melee(),
    })
}
