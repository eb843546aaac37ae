//! Damage types, armor classes, and the individual damage multipliers.

// ============================================================================
// Damage Type
// ============================================================================

/// Damage type for resistances and damage-scoped modifiers.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Default,
    strum::Display,
    strum::EnumString,
    strum::IntoStaticStr,
)]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DamageType {
    /// Physical damage (melee, projectiles).
    #[default]
    Physical,
    /// Fire damage (burns, explosions).
    Fire,
    /// Cold damage (ice, frost).
    Cold,
    /// Lightning damage (electricity, storms).
    Lightning,
    /// Poison damage (toxins, venom).
    Poison,
    /// Arcane damage (pure magic).
    Arcane,
    /// True damage (ignores all resistances).
    True,
}

// ============================================================================
// Armor Class
// ============================================================================

/// Categorical damage-multiplier bucket, distinct from numeric armor points.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Default,
    strum::Display,
    strum::EnumString,
    strum::IntoStaticStr,
)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE", ascii_case_insensitive)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ArmorClass {
    #[default]
    #[strum(serialize = "NONE")]
    #[cfg_attr(feature = "serde", serde(rename = "NONE"))]
    Unarmored,
    #[cfg_attr(feature = "serde", serde(rename = "LIGHT"))]
    Light,
    #[cfg_attr(feature = "serde", serde(rename = "MEDIUM"))]
    Medium,
    #[cfg_attr(feature = "serde", serde(rename = "HEAVY"))]
    Heavy,
}

// ============================================================================
// Multipliers
// ============================================================================

/// Linear reduction per point, clamped to `[0, 1]`.
///
/// ```text
/// multiplier = max(0, min(1, 1 - step × points))
/// ```
///
/// Negative points (e.g. a vulnerability debuff) clamp to 1, never above.
pub fn reduction_multiplier(points: i32, step: f64) -> f64 {
    (1.0 - step * f64::from(points)).clamp(0.0, 1.0)
}

/// Effect-driven multiplier from summed `damageTakenPct` modifiers.
///
/// ```text
/// multiplier = 1 + (global_pct + per_type_pct) / 100
/// ```
pub fn damage_taken_multiplier(global_pct: i32, per_type_pct: i32) -> f64 {
    1.0 + (f64::from(global_pct) + f64::from(per_type_pct)) / 100.0
}

/// Rounds a raw damage value to the final non-negative integer.
///
/// Returns `None` when the value is not finite.
pub fn finalize_damage(raw: f64) -> Option<u32> {
    if !raw.is_finite() {
        return None;
    }
    let rounded = raw.round().max(0.0);
    Some(if rounded >= f64::from(u32::MAX) {
        u32::MAX
    } else {
        rounded as u32
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const STEP: f64 = 0.05;

    #[test]
    fn armor_points_multiplier_reference_points() {
        assert_eq!(reduction_multiplier(0, STEP), 1.0);
        assert!((reduction_multiplier(10, STEP) - 0.5).abs() < 1e-12);
        assert_eq!(reduction_multiplier(20, STEP), 0.0);
        assert_eq!(reduction_multiplier(35, STEP), 0.0);
        assert_eq!(reduction_multiplier(-4, STEP), 1.0);
    }

    #[test]
    fn damage_taken_multiplier_sums_buckets() {
        assert_eq!(damage_taken_multiplier(0, 0), 1.0);
        assert!((damage_taken_multiplier(10, 15) - 1.25).abs() < 1e-12);
        assert!((damage_taken_multiplier(-50, 0) - 0.5).abs() < 1e-12);
    }

    #[test]
    fn finalize_rounds_half_up_and_floors_at_zero() {
        assert_eq!(finalize_damage(12.5), Some(13));
        assert_eq!(finalize_damage(12.49), Some(12));
        assert_eq!(finalize_damage(-3.0), Some(0));
        assert_eq!(finalize_damage(f64::NAN), None);
    }

    #[test]
    fn armor_class_parses_wire_names() {
        assert_eq!("MEDIUM".parse::<ArmorClass>().unwrap(), ArmorClass::Medium);
        assert_eq!("none".parse::<ArmorClass>().unwrap(), ArmorClass::Unarmored);
        assert_eq!("fire".parse::<DamageType>().unwrap(), DamageType::Fire);
        assert!("plasma".parse::<DamageType>().is_err());
    }
}
