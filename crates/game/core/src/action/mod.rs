//! Unit action rules: AP gating, defend, ability use, and lenient unit
//! normalization.

mod ability;
mod ap;
mod defend;
mod error;
mod normalize;

pub use ability::{AbilityUse, check_ability_use, use_ability};
pub use ap::{ApSpent, can_spend_ap, spend_ap};
pub use defend::{DefendOutcome, apply_defence};
pub use error::ActionError;
pub use normalize::{UnitRecord, normalize_unit};
