//! Placement stores.
//!
//! A store owns the placement records of one design and is the only thing
//! allowed to mutate them. Two stores exist, one per placement model:
//! - `chain`: charms at continuous positions along a path
//! - `slots`: beads in discrete, mutually exclusive slots
//!
//! Both enforce per-item capacity on insertion, treat unknown placement ids
//! as silent no-ops, and leave their records untouched when an operation is
//! rejected.

mod chain;
mod slots;

pub use chain::ChainStore;
pub use slots::SlotStore;

use std::fmt;

use beadsmith_core::{Catalog, CatalogItem, ItemId, PlacementError};

use crate::model::{DesignState, PlacementId};

/// Operations shared by every placement store.
pub trait PlacementStore {
    /// Value copy of the records, used for undo history.
    type Snapshot: Clone + PartialEq + fmt::Debug;

    /// Deep copy of the current records.
    fn snapshot(&self) -> Self::Snapshot;

    /// Replaces the current records with a snapshot.
    fn restore(&mut self, snapshot: Self::Snapshot);

    /// Exportable copy of the records.
    fn design_state(&self) -> DesignState;

    /// True if a placement with this id exists.
    fn contains(&self, id: PlacementId) -> bool;

    /// Quantity of an item currently placed.
    fn placed_quantity(&self, item_id: &ItemId) -> u32;

    /// Removes a placement. Returns false for unknown ids.
    fn remove(&mut self, id: PlacementId) -> bool;

    /// Removes every placement.
    fn clear(&mut self);

    /// Number of placement records.
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// How many more of an item may still be placed, saturating at zero.
    fn remaining(&self, catalog: &Catalog, item_id: &ItemId) -> u32 {
        catalog
            .get(item_id)
            .map(|item| item.effective_limit().saturating_sub(self.placed_quantity(item_id)))
            .unwrap_or(0)
    }
}

/// Resolves an item and checks that `adding` more units fit next to `placed`.
pub(crate) fn check_capacity<'a>(
    catalog: &'a Catalog,
    item_id: &ItemId,
    placed: u32,
    adding: u32,
) -> Result<&'a CatalogItem, PlacementError> {
    let item = catalog.get(item_id).ok_or_else(|| PlacementError::UnknownItem {
        item_id: item_id.to_string(),
    })?;

    if !item.in_stock() {
        return Err(PlacementError::OutOfStock {
            item_id: item_id.to_string(),
        });
    }

    let limit = item.effective_limit();
    if placed.saturating_add(adding) > limit {
        return Err(PlacementError::CapacityExceeded {
            item_id: item_id.to_string(),
            limit,
        });
    }

    Ok(item)
}

/// Next free id after the largest id in use.
pub(crate) fn next_id_after(ids: impl Iterator<Item = PlacementId>) -> u64 {
    ids.map(|id| id.0).max().map_or(1, |max| max.saturating_add(1))
}
