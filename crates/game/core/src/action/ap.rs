//! Action point gate shared by every AP-costed action.

use crate::state::Unit;

use super::error::ActionError;

/// AP before and after a successful spend.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ApSpent {
    pub cost: i32,
    pub before: i32,
    pub after: i32,
}

/// Negative costs are treated as free.
pub fn can_spend_ap(unit: &Unit, cost: i32) -> bool {
    unit.ap.current >= cost.max(0)
}

/// Deducts `cost` AP, or fails with [`ActionError::NoAp`] leaving the unit untouched.
pub fn spend_ap(unit: &mut Unit, cost: i32) -> Result<ApSpent, ActionError> {
    let cost = cost.max(0);
    if !can_spend_ap(unit, cost) {
        return Err(ActionError::NoAp {
            required: cost,
            available: unit.ap.current,
        });
    }
    let before = unit.ap.current;
    unit.ap.drain(cost);
    Ok(ApSpent {
        cost,
        before,
        after: unit.ap.current,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::GameError;
    use crate::state::{Hex, Owner, UnitId};

    #[test]
    fn spending_is_all_or_nothing() {
        let mut unit = Unit::new(UnitId(1), Owner(1), Hex::ORIGIN).with_ap(2);
        assert!(can_spend_ap(&unit, 2));
        assert!(can_spend_ap(&unit, -3));

        let spent = spend_ap(&mut unit, 1).unwrap();
        assert_eq!((spent.before, spent.after), (2, 1));

        let err = spend_ap(&mut unit, 2).unwrap_err();
        assert_eq!(
            err,
            ActionError::NoAp {
                required: 2,
                available: 1
            }
        );
        assert_eq!(err.error_code(), "no_ap");
        assert_eq!(unit.ap.current, 1);
    }
}
