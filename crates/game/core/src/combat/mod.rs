//! Combat resolution.
//!
//! Pure functions turning (attacker, defender, weapon) into a validated,
//! fully explained damage number. Nothing here mutates units; applying the
//! damage is the caller's job.

pub mod damage;
mod error;
mod result;
mod validate;

pub use damage::{
    ArmorClass, DamageType, damage_taken_multiplier, finalize_damage, reduction_multiplier,
};
pub use error::CombatError;
pub use result::{AttackResolution, DamageFactors, Diagnostic, resolve_attack};
pub use validate::{AttackCheck, validate_attack};

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::EngineConfig;
    use crate::effects::{ApplyOptions, EffectRuntime, InstanceIds};
    use crate::env::{
        AbilityCatalog, EffectCatalog, EffectDefinition, Env, Modifier, ModifierCondition, Stat,
        WeaponCatalog, WeaponDefinition,
    };
    use crate::error::GameError;
    use crate::state::{Hex, Owner, Unit, UnitId};

    struct Fixture {
        effects: EffectCatalog,
        weapons: WeaponCatalog,
        abilities: AbilityCatalog,
        config: EngineConfig,
    }

    impl Fixture {
        fn new() -> Self {
            let effects = EffectCatalog::from_definitions([
                EffectDefinition::new("exposed", 2).with_modifier(
                    Modifier::add(Stat::DamageTakenFlat, 1).scoped(DamageType::Physical),
                ),
                EffectDefinition::new("hawkeye", 2).with_modifier(Modifier::add(Stat::Range, 2)),
                EffectDefinition::new("shield_wall", 2).with_modifier(
                    Modifier::add(Stat::DamageTakenPct, -50).when(ModifierCondition::NotMelee),
                ),
                EffectDefinition::new("ironskin", 2).with_modifier(Modifier::add(Stat::Armor, 4)),
            ])
            .unwrap();
            let weapons = WeaponCatalog::from_definitions([
                WeaponDefinition::new("pike", 10.0, 1, 3)
                    .with_armor_multiplier(ArmorClass::Medium, 1.25),
                WeaponDefinition::new("sword", 8.0, 1, 1),
                WeaponDefinition::new("bow", 6.0, 2, 4).with_distance_multiplier(2, 0.5),
                WeaponDefinition::new("firebolt", 10.0, 1, 5).with_damage_type(DamageType::Fire),
                WeaponDefinition::new("smite", 10.0, 1, 5).with_damage_type(DamageType::True),
                WeaponDefinition::new("broken", f64::NAN, 1, 1),
            ])
            .unwrap();
            Self {
                effects,
                weapons,
                abilities: AbilityCatalog::new(),
                config: EngineConfig::default(),
            }
        }

        fn env(&self) -> Env<'_> {
            Env::new(&self.effects, &self.weapons, &self.abilities, &self.config)
        }
    }

    fn at(id: u32, q: i32, r: i32) -> Unit {
        Unit::new(UnitId(id), Owner(id), Hex::new(q, r)).with_hp(30)
    }

    #[test]
    fn validation_reports_range_failures() {
        let fx = Fixture::new();
        let env = fx.env();
        let archer = at(1, 0, 0);

        let adjacent = at(2, 1, 0);
        let err = validate_attack(env, &archer, &adjacent, "bow").unwrap_err();
        assert_eq!(
            err,
            CombatError::TooClose {
                distance: 1,
                min: 2
            }
        );
        assert_eq!(err.error_code(), "too_close");

        let far = at(3, 5, 0);
        let err = validate_attack(env, &archer, &far, "bow").unwrap_err();
        assert_eq!(err.error_code(), "out_of_range");

        let err = validate_attack(env, &archer, &far, "trebuchet").unwrap_err();
        assert_eq!(err.error_code(), "bad_weapon");

        let check = validate_attack(env, &archer, &at(4, 2, -1), "bow").unwrap();
        assert_eq!(check.distance, 2);
        assert!(!check.melee);
    }

    #[test]
    fn range_modifier_extends_maximum_range() {
        let fx = Fixture::new();
        let env = fx.env();
        let rt = EffectRuntime::new(env);
        let mut ids = InstanceIds::new();
        let mut archer = at(1, 0, 0);
        let far = at(2, 6, 0);

        assert!(validate_attack(env, &archer, &far, "bow").is_err());
        rt.apply_unit_effect(&mut ids, &mut archer, "hawkeye", ApplyOptions::new())
            .unwrap();
        let check = validate_attack(env, &archer, &far, "bow").unwrap();
        assert_eq!(check.range_max, 6);
    }

    #[test]
    fn medium_armor_scenario_with_and_without_flat_bonus() {
        let fx = Fixture::new();
        let env = fx.env();
        let rt = EffectRuntime::new(env);
        let mut ids = InstanceIds::new();
        let attacker = at(1, 0, 0);
        let mut defender = at(2, 2, 0).with_armor(0, ArmorClass::Medium);

        let plain = resolve_attack(env, &attacker, &defender, "pike");
        assert_eq!(plain.distance, 2);
        assert_eq!(plain.factors.armor_class_multiplier, 1.25);
        assert_eq!(plain.factors.distance_multiplier, 1.0);
        assert_eq!(plain.final_damage, 13);
        assert!(plain.diagnostic.is_none());

        rt.apply_unit_effect(&mut ids, &mut defender, "exposed", ApplyOptions::new())
            .unwrap();
        let exposed = resolve_attack(env, &attacker, &defender, "pike");
        assert_eq!(exposed.flat_bonus, 1);
        assert_eq!(exposed.final_damage, 14);
    }

    #[test]
    fn armor_resists_and_squad_ratio_multiply() {
        let fx = Fixture::new();
        let env = fx.env();
        let rt = EffectRuntime::new(env);
        let mut ids = InstanceIds::new();

        let squad = at(1, 0, 0).with_squad(3, 4);
        let mut defender = at(2, 1, 0).with_armor(6, ArmorClass::Light);
        defender.temp_armor_bonus = 1;
        rt.apply_unit_effect(&mut ids, &mut defender, "ironskin", ApplyOptions::new())
            .unwrap();

        let result = resolve_attack(env, &squad, &defender, "sword");
        assert_eq!(result.factors.group_alive_ratio, 0.75);
        assert!((result.factors.armor_points_multiplier - 0.45).abs() < 1e-9);
        // 8 × 0.75 × 0.45 = 2.7
        assert_eq!(result.final_damage, 3);

        let burning = at(3, 1, 0).with_resist(DamageType::Fire, 10);
        let fire = resolve_attack(env, &squad, &burning, "firebolt");
        assert!((fire.factors.resist_multiplier - 0.5).abs() < 1e-9);

        let warded = at(4, 1, 0).with_resist(DamageType::True, 20);
        let smite = resolve_attack(env, &at(5, 0, 0), &warded, "smite");
        assert_eq!(smite.factors.resist_multiplier, 1.0);
        assert_eq!(smite.final_damage, 10);
    }

    #[test]
    fn conditional_damage_taken_depends_on_weapon_reach() {
        let fx = Fixture::new();
        let env = fx.env();
        let rt = EffectRuntime::new(env);
        let mut ids = InstanceIds::new();
        let attacker = at(1, 0, 0);
        let mut defender = at(2, 2, 0);
        rt.apply_unit_effect(&mut ids, &mut defender, "shield_wall", ApplyOptions::new())
            .unwrap();

        let ranged = resolve_attack(env, &attacker, &defender, "bow");
        assert_eq!(ranged.factors.effect_damage_taken_multiplier, 0.5);
        assert_eq!(ranged.factors.distance_multiplier, 0.5);

        let melee = resolve_attack(env, &attacker, &defender, "sword");
        assert_eq!(melee.factors.effect_damage_taken_multiplier, 1.0);
    }

    #[test]
    fn bad_weapons_degrade_to_zero_damage() {
        let fx = Fixture::new();
        let env = fx.env();
        let attacker = at(1, 0, 0);
        let defender = at(2, 1, 0);

        let unknown = resolve_attack(env, &attacker, &defender, "trebuchet");
        assert_eq!(unknown.final_damage, 0);
        assert_eq!(unknown.diagnostic, Some(Diagnostic::UnknownWeapon));

        let broken = resolve_attack(env, &attacker, &defender, "broken");
        assert_eq!(broken.final_damage, 0);
        assert!(matches!(broken.diagnostic, Some(Diagnostic::MalformedWeapon(_))));
        assert_eq!(broken.diagnostic.unwrap().as_str(), "malformed_weapon");
    }
}
