//! The "defend" action.

use crate::effects::{ModifierContext, compute_unit_modifiers};
use crate::env::Env;
use crate::state::{Unit, UnitFlags};

use super::error::ActionError;

/// What a successful defend did.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DefendOutcome {
    pub ap_spent: i32,
    pub mp_lost: i32,
    pub armor_bonus: i32,
    pub healed: i32,
    pub hp_before: i32,
    pub hp_after: i32,
}

/// Ends the unit's turn in a defensive stance.
///
/// Needs at least 1 AP. Zeroes remaining mp and ap, adds the configured
/// temporary armor bonus (cleared at the unit's next turn start), heals
/// `round(pct × max hp / 100)` and sets [`UnitFlags::DEFENDING`]. The heal is
/// skipped while a `cannotHeal` effect is active.
pub fn apply_defence(env: Env<'_>, unit: &mut Unit) -> Result<DefendOutcome, ActionError> {
    if unit.ap.current < 1 {
        return Err(ActionError::NoAp {
            required: 1,
            available: unit.ap.current,
        });
    }
    let config = env.config();

    let ap_spent = unit.ap.drain(unit.ap.current);
    let mp_lost = unit.mp.drain(unit.mp.current);
    unit.temp_armor_bonus = unit.temp_armor_bonus.saturating_add(config.defend_armor_bonus);
    unit.flags.insert(UnitFlags::DEFENDING);

    let hp_before = unit.hp.current;
    let blocked =
        compute_unit_modifiers(env.effects(), unit, ModifierContext::default()).cannot_heal;
    let healed = if blocked {
        0
    } else {
        let scaled = i64::from(config.defend_heal_pct) * i64::from(unit.hp.maximum);
        let amount = (scaled + 50).div_euclid(100);
        unit.hp.restore(i32::try_from(amount.max(0)).unwrap_or(i32::MAX))
    };

    Ok(DefendOutcome {
        ap_spent,
        mp_lost,
        armor_bonus: config.defend_armor_bonus,
        healed,
        hp_before,
        hp_after: unit.hp.current,
    })
}
