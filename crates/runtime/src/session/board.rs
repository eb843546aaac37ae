//! Spatial adapters the core asks for when a death hook spreads effects.

use tactics_core::{Hex, NeighborResolver, OccupantResolver, Unit};

/// Hexes within `radius` of `center`, excluding it, in axial scan order.
pub(crate) fn hexes_within(center: Hex, radius: u32) -> Vec<Hex> {
    let r = i32::try_from(radius).unwrap_or(i32::MAX).min(64);
    let mut hexes = Vec::new();
    for dq in -r..=r {
        for dr in (-r).max(-dq - r)..=r.min(-dq + r) {
            if dq == 0 && dr == 0 {
                continue;
            }
            hexes.push(Hex::new(center.q + dq, center.r + dr));
        }
    }
    hexes
}

pub(crate) struct HexGrid;

impl NeighborResolver for HexGrid {
    fn neighbors(&self, center: Hex, radius: u32) -> Vec<Hex> {
        hexes_within(center, radius)
    }
}

/// Finds the living unit standing on a hex.
pub(crate) struct Roster<'a> {
    pub units: &'a mut [Unit],
}

impl OccupantResolver for Roster<'_> {
    fn occupant_at(&mut self, at: Hex) -> Option<&mut Unit> {
        self.units
            .iter_mut()
            .find(|unit| unit.position == at && unit.is_alive())
    }
}
