//! Canonical match state types touched by the engine.
//!
//! Units and the world hex-effect container are owned by external
//! collaborators; the engine borrows them mutably for the duration of a call.
mod common;
mod status;
mod unit;
mod world;

pub use common::{Hex, Owner, ResourceMeter, TurnNumber, UnitId};
pub use status::{StatusEntry, StatusMirror, temporary_count};
pub use unit::{Squad, Unit, UnitFlags};
pub use world::WorldEffects;
