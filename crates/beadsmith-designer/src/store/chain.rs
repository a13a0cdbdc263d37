use beadsmith_core::constants::OFFSET_BOUND_MM;
use beadsmith_core::{Catalog, ItemId, PlacementError};

use super::{check_capacity, next_id_after, PlacementStore};
use crate::geometry::clamp_unit;
use crate::model::{DesignState, Placement, PlacementId};

/// Charm placements along a continuous chain.
///
/// Charms may overlap freely; only per-item capacity is enforced.
#[derive(Debug, Clone)]
pub struct ChainStore {
    placements: Vec<Placement>,
    next_id: u64,
    offset_bound_mm: f64,
}

impl ChainStore {
    pub fn new(offset_bound_mm: f64) -> Self {
        Self {
            placements: Vec::new(),
            next_id: 1,
            offset_bound_mm: if offset_bound_mm.is_nan() {
                0.0
            } else {
                offset_bound_mm.abs()
            },
        }
    }

    /// Rebuilds a store from imported records, sanitising positions.
    ///
    /// Ids are reissued in record order and z-indices compacted to `0..n`
    /// keeping their relative order, so foreign values cannot exhaust either
    /// counter. Capacity is not re-checked: the records describe an existing
    /// design.
    pub fn from_placements(placements: Vec<Placement>, offset_bound_mm: f64) -> Self {
        let mut store = Self::new(offset_bound_mm);
        let mut levels: Vec<i32> = placements.iter().map(|p| p.z_index).collect();
        levels.sort_unstable();
        levels.dedup();
        store.placements = placements
            .into_iter()
            .zip(1u64..)
            .map(|(mut p, id)| {
                p.id = PlacementId(id);
                p.z_index = levels.binary_search(&p.z_index).map_or(0, |rank| rank as i32);
                p.t = clamp_unit(p.t);
                p.offset_mm = store.clamp_offset(p.offset_mm);
                p.quantity = p.quantity.max(1);
                p
            })
            .collect();
        store.next_id = next_id_after(store.placements.iter().map(|p| p.id));
        store
    }

    pub fn offset_bound_mm(&self) -> f64 {
        self.offset_bound_mm
    }

    pub fn placements(&self) -> &[Placement] {
        &self.placements
    }

    pub fn get(&self, id: PlacementId) -> Option<&Placement> {
        self.placements.iter().find(|p| p.id == id)
    }

    fn get_mut(&mut self, id: PlacementId) -> Option<&mut Placement> {
        self.placements.iter_mut().find(|p| p.id == id)
    }

    fn clamp_offset(&self, offset_mm: f64) -> f64 {
        if offset_mm.is_finite() {
            offset_mm.clamp(-self.offset_bound_mm, self.offset_bound_mm)
        } else {
            0.0
        }
    }

    fn top_z(&self) -> i32 {
        self.placements.iter().map(|p| p.z_index).max().unwrap_or(0)
    }

    /// Places one charm at `t` with the given offset, on top of the others.
    pub fn add(
        &mut self,
        catalog: &Catalog,
        item_id: &ItemId,
        t: f64,
        offset_mm: f64,
    ) -> Result<PlacementId, PlacementError> {
        self.add_with_quantity(catalog, item_id, t, offset_mm, 1)
    }

    /// Places `quantity` units of a charm as a single record.
    pub fn add_with_quantity(
        &mut self,
        catalog: &Catalog,
        item_id: &ItemId,
        t: f64,
        offset_mm: f64,
        quantity: u32,
    ) -> Result<PlacementId, PlacementError> {
        if quantity == 0 {
            return Err(PlacementError::InvalidQuantity { quantity });
        }
        check_capacity(catalog, item_id, self.placed_quantity(item_id), quantity)?;

        let id = PlacementId(self.next_id);
        self.next_id = self.next_id.saturating_add(1);
        let placement = Placement {
            id,
            catalog_item_id: item_id.clone(),
            t: clamp_unit(t),
            offset_mm: self.clamp_offset(offset_mm),
            rotation_deg: 0.0,
            z_index: if self.placements.is_empty() {
                0
            } else {
                self.top_z().saturating_add(1)
            },
            quantity,
        };
        tracing::debug!(
            "Placed {} x{} as {} at t={:.3}, offset={:.1}mm",
            item_id,
            quantity,
            id,
            placement.t,
            placement.offset_mm
        );
        self.placements.push(placement);
        Ok(id)
    }

    /// Moves a charm. Capacity is not re-checked; unknown ids are ignored.
    pub fn move_to(&mut self, id: PlacementId, t: f64, offset_mm: f64) -> bool {
        let offset_mm = self.clamp_offset(offset_mm);
        match self.get_mut(id) {
            Some(p) => {
                p.t = clamp_unit(t);
                p.offset_mm = offset_mm;
                true
            }
            None => false,
        }
    }

    /// Changes a record's quantity, re-checking capacity for the increase.
    pub fn set_quantity(
        &mut self,
        catalog: &Catalog,
        id: PlacementId,
        quantity: u32,
    ) -> Result<bool, PlacementError> {
        if quantity == 0 {
            return Err(PlacementError::InvalidQuantity { quantity });
        }
        let Some(current) = self.get(id) else {
            return Ok(false);
        };
        let item_id = current.catalog_item_id.clone();
        let others = self.placed_quantity(&item_id).saturating_sub(current.quantity);
        check_capacity(catalog, &item_id, others, quantity)?;

        if let Some(p) = self.get_mut(id) {
            p.quantity = quantity;
        }
        Ok(true)
    }

    /// Sets rotation, normalised into `[0, 360)`.
    pub fn rotate(&mut self, id: PlacementId, rotation_deg: f64) -> bool {
        if !rotation_deg.is_finite() {
            return false;
        }
        match self.get_mut(id) {
            Some(p) => {
                p.rotation_deg = rotation_deg.rem_euclid(360.0);
                true
            }
            None => false,
        }
    }

    /// Raises a charm above every other one.
    pub fn bring_to_front(&mut self, id: PlacementId) -> bool {
        let top = self.top_z();
        let shared_top = self.placements.iter().filter(|p| p.z_index == top).count() > 1;
        match self.get_mut(id) {
            Some(p) if p.z_index == top && !shared_top => true,
            Some(p) => {
                p.z_index = top.saturating_add(1);
                true
            }
            None => false,
        }
    }
}

impl Default for ChainStore {
    fn default() -> Self {
        Self::new(OFFSET_BOUND_MM)
    }
}

impl PlacementStore for ChainStore {
    type Snapshot = Vec<Placement>;

    fn snapshot(&self) -> Vec<Placement> {
        self.placements.clone()
    }

    fn restore(&mut self, snapshot: Vec<Placement>) {
        self.next_id = self.next_id.max(next_id_after(snapshot.iter().map(|p| p.id)));
        self.placements = snapshot;
    }

    fn design_state(&self) -> DesignState {
        DesignState::Chain {
            placements: self.placements.clone(),
        }
    }

    fn contains(&self, id: PlacementId) -> bool {
        self.get(id).is_some()
    }

    fn placed_quantity(&self, item_id: &ItemId) -> u32 {
        self.placements
            .iter()
            .filter(|p| &p.catalog_item_id == item_id)
            .fold(0u32, |acc, p| acc.saturating_add(p.quantity))
    }

    fn remove(&mut self, id: PlacementId) -> bool {
        let before = self.placements.len();
        self.placements.retain(|p| p.id != id);
        self.placements.len() != before
    }

    fn clear(&mut self) {
        self.placements.clear();
    }

    fn len(&self) -> usize {
        self.placements.len()
    }
}
