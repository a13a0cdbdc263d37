use std::collections::BTreeMap;

use beadsmith_core::{Catalog, ItemId, PlacementError};

use super::{check_capacity, next_id_after, PlacementStore};
use crate::layout::SlotLayout;
use crate::model::{DesignState, PlacementId, SlotPlacement};

/// Bead placements in discrete slots.
///
/// Each slot holds at most one bead. Writing into an occupied slot replaces
/// its occupant (last write wins).
#[derive(Debug, Clone)]
pub struct SlotStore {
    layout: SlotLayout,
    placements: Vec<SlotPlacement>,
    next_id: u64,
}

impl SlotStore {
    pub fn new(layout: SlotLayout) -> Self {
        Self {
            layout,
            placements: Vec::new(),
            next_id: 1,
        }
    }

    /// Rebuilds a store from imported records.
    ///
    /// Ids are reissued in record order. Records outside the slot range are
    /// dropped; for a doubly occupied slot the later record wins.
    pub fn from_placements(layout: SlotLayout, placements: Vec<SlotPlacement>) -> Self {
        let mut store = Self::new(layout);
        let slot_count = layout.slot_count();
        for (mut placement, id) in placements.into_iter().zip(1u64..) {
            placement.id = PlacementId(id);
            if placement.position >= slot_count {
                tracing::warn!(
                    "Dropping bead {} outside slot range ({} >= {})",
                    placement.id,
                    placement.position,
                    slot_count
                );
                continue;
            }
            store.placements.retain(|p| p.position != placement.position);
            store.placements.push(placement);
        }
        store.next_id = next_id_after(store.placements.iter().map(|p| p.id));
        store
    }

    pub fn layout(&self) -> &SlotLayout {
        &self.layout
    }

    pub fn slot_count(&self) -> u32 {
        self.layout.slot_count()
    }

    pub fn placements(&self) -> &[SlotPlacement] {
        &self.placements
    }

    /// Placements sorted by slot.
    pub fn ordered(&self) -> Vec<&SlotPlacement> {
        let mut ordered: Vec<_> = self.placements.iter().collect();
        ordered.sort_by_key(|p| p.position);
        ordered
    }

    pub fn get(&self, id: PlacementId) -> Option<&SlotPlacement> {
        self.placements.iter().find(|p| p.id == id)
    }

    /// The bead currently in a slot, if any.
    pub fn occupant(&self, position: u32) -> Option<&SlotPlacement> {
        self.placements.iter().find(|p| p.position == position)
    }

    fn check_range(&self, position: u32) -> Result<(), PlacementError> {
        let slot_count = self.slot_count();
        if position < slot_count {
            Ok(())
        } else {
            Err(PlacementError::SlotOutOfRange {
                position,
                slot_count,
            })
        }
    }

    /// Puts a bead into a slot, replacing any occupant.
    pub fn add(
        &mut self,
        catalog: &Catalog,
        item_id: &ItemId,
        position: u32,
    ) -> Result<PlacementId, PlacementError> {
        self.check_range(position)?;

        // A replaced bead of the same item frees its unit first.
        let freed = self
            .occupant(position)
            .map_or(0, |p| u32::from(&p.catalog_item_id == item_id));
        let placed = self.placed_quantity(item_id).saturating_sub(freed);
        check_capacity(catalog, item_id, placed, 1)?;

        if let Some(evicted) = self.occupant(position).map(|p| p.id) {
            tracing::debug!("Slot {} occupant {} replaced", position, evicted);
            self.placements.retain(|p| p.id != evicted);
        }

        let id = PlacementId(self.next_id);
        self.next_id = self.next_id.saturating_add(1);
        self.placements.push(SlotPlacement {
            id,
            catalog_item_id: item_id.clone(),
            position,
        });
        tracing::debug!("Placed {} as {} in slot {}", item_id, id, position);
        Ok(id)
    }

    /// Moves a bead to another slot, evicting that slot's occupant.
    ///
    /// Unknown ids and out-of-range slots are ignored.
    pub fn move_to(&mut self, id: PlacementId, position: u32) -> bool {
        if self.check_range(position).is_err() || self.get(id).is_none() {
            return false;
        }
        self.placements
            .retain(|p| p.id == id || p.position != position);
        if let Some(p) = self.placements.iter_mut().find(|p| p.id == id) {
            p.position = position;
        }
        true
    }

    /// Replaces every placement with a new assignment of items to slots.
    ///
    /// The whole assignment is validated first; on error nothing changes.
    pub fn replace_all(
        &mut self,
        catalog: &Catalog,
        assignments: &[(u32, ItemId)],
    ) -> Result<usize, PlacementError> {
        let mut by_slot: BTreeMap<u32, &ItemId> = BTreeMap::new();
        for (position, item_id) in assignments {
            self.check_range(*position)?;
            by_slot.insert(*position, item_id);
        }

        let mut counts: BTreeMap<&ItemId, u32> = BTreeMap::new();
        for item_id in by_slot.values() {
            *counts.entry(*item_id).or_insert(0) += 1;
        }
        for (item_id, count) in &counts {
            check_capacity(catalog, item_id, 0, *count)?;
        }

        let mut next_id = self.next_id;
        let placements: Vec<SlotPlacement> = by_slot
            .into_iter()
            .map(|(position, item_id)| {
                let id = PlacementId(next_id);
                next_id = next_id.saturating_add(1);
                SlotPlacement {
                    id,
                    catalog_item_id: item_id.clone(),
                    position,
                }
            })
            .collect();

        self.next_id = next_id;
        self.placements = placements;
        Ok(self.placements.len())
    }
}

impl PlacementStore for SlotStore {
    type Snapshot = Vec<SlotPlacement>;

    fn snapshot(&self) -> Vec<SlotPlacement> {
        self.placements.clone()
    }

    fn restore(&mut self, snapshot: Vec<SlotPlacement>) {
        self.next_id = self.next_id.max(next_id_after(snapshot.iter().map(|p| p.id)));
        self.placements = snapshot;
    }

    fn design_state(&self) -> DesignState {
        DesignState::Beads {
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
            .count() as u32
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
