//! Spatial queries supplied by the map module.
//!
//! The core never computes adjacency itself; death-hook spreading asks these
//! resolvers which hexes are nearby and who stands on them.

use crate::state::{Hex, Unit};

/// Returns the hexes within `radius` of a coordinate (excluding the centre).
pub trait NeighborResolver {
    fn neighbors(&self, center: Hex, radius: u32) -> Vec<Hex>;
}

/// Gives mutable access to the unit standing on a hex, if any.
pub trait OccupantResolver {
    fn occupant_at(&mut self, at: Hex) -> Option<&mut Unit>;
}
