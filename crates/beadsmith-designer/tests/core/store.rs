use beadsmith_core::{Catalog, CatalogItem, ItemId, PlacementError};
use beadsmith_designer::layout::SlotLayout;
use beadsmith_designer::model::PlacementId;
use beadsmith_designer::store::{ChainStore, PlacementStore, SlotStore};
use proptest::prelude::*;
use std::collections::HashSet;

fn charm_catalog() -> Catalog {
    Catalog::from_items(vec![
        CatalogItem::charm("heart", 850, 10).with_max_per_design(3),
        CatalogItem::charm("moon", 900, 2).with_max_per_design(5),
        CatalogItem::charm("star", 500, 20),
        CatalogItem::charm("sold-out", 700, 0),
    ])
    .unwrap()
}

fn bead_catalog() -> Catalog {
    Catalog::from_items(vec![
        CatalogItem::bead("blue", 120, 40, 4.0),
        CatalogItem::bead("red", 150, 3, 4.0),
        CatalogItem::bead("gold", 400, 1, 4.0),
    ])
    .unwrap()
}

#[test]
fn test_capacity_is_min_of_cap_and_stock() {
    let catalog = charm_catalog();
    let mut store = ChainStore::default();
    let moon = ItemId::from("moon");

    assert_eq!(store.remaining(&catalog, &moon), 2);
    store.add(&catalog, &moon, 0.1, 0.0).unwrap();
    store.add(&catalog, &moon, 0.2, 0.0).unwrap();
    assert_eq!(store.remaining(&catalog, &moon), 0);
    assert_eq!(
        store.add(&catalog, &moon, 0.3, 0.0),
        Err(PlacementError::CapacityExceeded {
            item_id: "moon".into(),
            limit: 2
        })
    );
    assert_eq!(store.len(), 2);
}

#[test]
fn test_out_of_stock_and_unknown() {
    let catalog = charm_catalog();
    let mut store = ChainStore::default();
    assert!(matches!(
        store.add(&catalog, &ItemId::from("sold-out"), 0.5, 0.0),
        Err(PlacementError::OutOfStock { .. })
    ));
    assert!(matches!(
        store.add(&catalog, &ItemId::from("comet"), 0.5, 0.0),
        Err(PlacementError::UnknownItem { .. })
    ));
    assert!(store.is_empty());
    assert_eq!(store.remaining(&catalog, &ItemId::from("comet")), 0);
}

#[test]
fn test_charms_may_overlap() {
    let catalog = charm_catalog();
    let mut store = ChainStore::default();
    let star = ItemId::from("star");
    let a = store.add(&catalog, &star, 0.5, 2.0).unwrap();
    let b = store.add(&catalog, &star, 0.5, 2.0).unwrap();
    assert_ne!(a, b);
    assert_eq!(store.len(), 2);
    assert!(store.get(b).unwrap().z_index > store.get(a).unwrap().z_index);
}

#[test]
fn test_move_does_not_recheck_capacity() {
    let catalog = charm_catalog();
    let mut store = ChainStore::default();
    let heart = ItemId::from("heart");
    let ids: Vec<_> = (0..3)
        .map(|i| store.add(&catalog, &heart, i as f64 * 0.1, 0.0).unwrap())
        .collect();
    assert!(store.move_to(ids[0], 0.9, -30.0));
    let moved = store.get(ids[0]).unwrap();
    assert_eq!(moved.t, 0.9);
    assert_eq!(moved.offset_mm, -20.0);
}

#[test]
fn test_unknown_ids_are_noops() {
    let catalog = charm_catalog();
    let mut store = ChainStore::default();
    store.add(&catalog, &ItemId::from("star"), 0.5, 0.0).unwrap();
    let before = store.snapshot();

    let ghost = PlacementId(999);
    assert!(!store.move_to(ghost, 0.2, 0.0));
    assert!(!store.remove(ghost));
    assert!(!store.rotate(ghost, 45.0));
    assert!(!store.bring_to_front(ghost));
    assert_eq!(store.set_quantity(&catalog, ghost, 2), Ok(false));
    assert_eq!(store.snapshot(), before);
}

#[test]
fn test_set_quantity_checks_capacity() {
    let catalog = charm_catalog();
    let mut store = ChainStore::default();
    let heart = ItemId::from("heart");
    let id = store.add(&catalog, &heart, 0.5, 0.0).unwrap();

    assert_eq!(store.set_quantity(&catalog, id, 3), Ok(true));
    assert_eq!(store.placed_quantity(&heart), 3);
    assert!(store.set_quantity(&catalog, id, 4).is_err());
    assert_eq!(
        store.set_quantity(&catalog, id, 0),
        Err(PlacementError::InvalidQuantity { quantity: 0 })
    );
    assert_eq!(store.placed_quantity(&heart), 3);
}

#[test]
fn test_rotation_is_normalised() {
    let catalog = charm_catalog();
    let mut store = ChainStore::default();
    let id = store.add(&catalog, &ItemId::from("star"), 0.5, 0.0).unwrap();
    assert!(store.rotate(id, -90.0));
    assert_eq!(store.get(id).unwrap().rotation_deg, 270.0);
    assert!(store.rotate(id, 720.0));
    assert_eq!(store.get(id).unwrap().rotation_deg, 0.0);
}

#[test]
fn test_clear_and_restore() {
    let catalog = charm_catalog();
    let mut store = ChainStore::default();
    let first = store.add(&catalog, &ItemId::from("star"), 0.5, 0.0).unwrap();
    let snapshot = store.snapshot();
    store.clear();
    assert!(store.is_empty());

    store.restore(snapshot);
    assert!(store.contains(first));
    let next = store.add(&catalog, &ItemId::from("star"), 0.5, 0.0).unwrap();
    assert!(next.0 > first.0);
}

#[test]
fn test_slot_remaining_ignores_per_design_cap() {
    let catalog = Catalog::from_items(vec![CatalogItem::bead("blue", 120, 40, 4.0).with_max_per_design(2)])
        .unwrap();
    let store = SlotStore::new(SlotLayout::new(180.0, 4.0, 1.0));
    assert_eq!(store.remaining(&catalog, &ItemId::from("blue")), 40);
}

#[derive(Debug, Clone)]
enum ChainOp {
    Add(usize, f64, f64),
    Quantity(usize, u32),
    Remove(usize),
}

fn chain_op() -> impl Strategy<Value = ChainOp> {
    prop_oneof![
        (0usize..4, -0.5f64..1.5, -50.0f64..50.0).prop_map(|(i, t, o)| ChainOp::Add(i, t, o)),
        (0usize..8, 0u32..6).prop_map(|(i, q)| ChainOp::Quantity(i, q)),
        (0usize..8).prop_map(ChainOp::Remove),
    ]
}

#[derive(Debug, Clone)]
enum SlotOp {
    Add(usize, u32),
    Move(usize, u32),
    Remove(usize),
}

fn slot_op() -> impl Strategy<Value = SlotOp> {
    prop_oneof![
        (0usize..3, 0u32..40).prop_map(|(i, p)| SlotOp::Add(i, p)),
        (0usize..40, 0u32..40).prop_map(|(i, p)| SlotOp::Move(i, p)),
        (0usize..40).prop_map(SlotOp::Remove),
    ]
}

proptest! {
    #[test]
    fn prop_chain_capacity_invariant(ops in proptest::collection::vec(chain_op(), 0..60)) {
        let catalog = charm_catalog();
        let items = ["heart", "moon", "star", "sold-out"];
        let mut store = ChainStore::default();

        for op in ops {
            let ids: Vec<PlacementId> = store.placements().iter().map(|p| p.id).collect();
            match op {
                ChainOp::Add(i, t, offset) => {
                    let _ = store.add(&catalog, &ItemId::from(items[i]), t, offset);
                }
                ChainOp::Quantity(i, q) => {
                    if let Some(id) = ids.get(i) {
                        let _ = store.set_quantity(&catalog, *id, q);
                    }
                }
                ChainOp::Remove(i) => {
                    if let Some(id) = ids.get(i) {
                        store.remove(*id);
                    }
                }
            }

            for item in catalog.items() {
                prop_assert!(store.placed_quantity(&item.id) <= item.effective_limit());
            }
            for p in store.placements() {
                prop_assert!((0.0..=1.0).contains(&p.t));
                prop_assert!(p.offset_mm.abs() <= store.offset_bound_mm());
                prop_assert!(p.quantity >= 1);
            }
        }
    }

    #[test]
    fn prop_slot_exclusivity(ops in proptest::collection::vec(slot_op(), 0..80)) {
        let catalog = bead_catalog();
        let items = ["blue", "red", "gold"];
        let mut store = SlotStore::new(SlotLayout::new(180.0, 4.0, 1.0));

        for op in ops {
            let ids: Vec<PlacementId> = store.placements().iter().map(|p| p.id).collect();
            match op {
                SlotOp::Add(i, position) => {
                    let _ = store.add(&catalog, &ItemId::from(items[i]), position);
                }
                SlotOp::Move(i, position) => {
                    if let Some(id) = ids.get(i) {
                        store.move_to(*id, position);
                    }
                }
                SlotOp::Remove(i) => {
                    if let Some(id) = ids.get(i) {
                        store.remove(*id);
                    }
                }
            }

            let mut seen = HashSet::new();
            for p in store.placements() {
                prop_assert!(p.position < store.slot_count());
                prop_assert!(seen.insert(p.position), "slot {} occupied twice", p.position);
            }
            for item in catalog.items() {
                prop_assert!(store.placed_quantity(&item.id) <= item.effective_limit());
            }
        }
    }
}
