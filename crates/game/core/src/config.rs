/// Engine configuration constants and tunable parameters.
///
/// Every replica in a match must run with the same configuration; it is part of
/// the deterministic input together with the content catalogs.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct EngineConfig {
    /// Number of UI-visible temporary status slots per unit.
    /// Never larger than [`EngineConfig::MAX_STATUS_SLOTS`].
    pub status_slot_cap: usize,

    /// Damage reduction per effective armor point (0.05 = 5%).
    pub armor_point_step: f64,

    /// Damage reduction per resist point for the weapon's damage type.
    pub resist_step: f64,

    /// Percent of max HP restored by the defend action.
    pub defend_heal_pct: i32,

    /// Temporary armor granted by the defend action until the next turn start.
    pub defend_armor_bonus: i32,

    /// AP spent by a weapon attack.
    pub attack_ap_cost: i32,

    /// MP spent per hex moved.
    pub move_mp_cost: i32,
}

impl EngineConfig {
    // ===== compile-time constants used as type parameters =====
    /// Capacity of the status mirror backing storage.
    pub const MAX_STATUS_SLOTS: usize = 10;

    // ===== runtime-tunable defaults =====
    pub const DEFAULT_ARMOR_POINT_STEP: f64 = 0.05;
    pub const DEFAULT_RESIST_STEP: f64 = 0.05;
    pub const DEFAULT_DEFEND_HEAL_PCT: i32 = 10;
    pub const DEFAULT_DEFEND_ARMOR_BONUS: i32 = 1;
    pub const DEFAULT_ATTACK_AP_COST: i32 = 1;
    pub const DEFAULT_MOVE_MP_COST: i32 = 1;

    pub fn new() -> Self {
        Self {
            status_slot_cap: Self::MAX_STATUS_SLOTS,
            armor_point_step: Self::DEFAULT_ARMOR_POINT_STEP,
            resist_step: Self::DEFAULT_RESIST_STEP,
            defend_heal_pct: Self::DEFAULT_DEFEND_HEAL_PCT,
            defend_armor_bonus: Self::DEFAULT_DEFEND_ARMOR_BONUS,
            attack_ap_cost: Self::DEFAULT_ATTACK_AP_COST,
            move_mp_cost: Self::DEFAULT_MOVE_MP_COST,
        }
    }

    /// Slot cap actually enforced (configured value bounded by the mirror capacity).
    pub fn effective_slot_cap(&self) -> usize {
        self.status_slot_cap.min(Self::MAX_STATUS_SLOTS)
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self::new()
    }
}
