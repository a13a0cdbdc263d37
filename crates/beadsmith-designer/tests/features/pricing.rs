use beadsmith_core::{BasisPoints, Catalog, CatalogItem, ItemId};
use beadsmith_designer::model::{DesignState, Placement, PlacementId, SlotPlacement};
use beadsmith_designer::pricing::{price, DiscountTier, PricingRules};
use proptest::prelude::*;

fn catalog() -> Catalog {
    Catalog::from_items(vec![
        CatalogItem::charm("heart", 850, 50),
        CatalogItem::charm("star", 1299, 50),
        CatalogItem::bead("blue", 120, 100, 4.0),
    ])
    .unwrap()
}

fn charm(id: u64, item: &str, quantity: u32) -> Placement {
    Placement {
        id: PlacementId(id),
        catalog_item_id: ItemId::from(item),
        t: 0.5,
        offset_mm: 0.0,
        rotation_deg: 0.0,
        z_index: id as i32,
        quantity,
    }
}

fn hearts(n: u64) -> DesignState {
    DesignState::Chain {
        placements: (1..=n).map(|i| charm(i, "heart", 1)).collect(),
    }
}

#[test]
fn test_four_charms_no_discount() {
    let breakdown = price(2500, &hearts(4), &catalog());
    assert_eq!(breakdown.item_count, 4);
    assert_eq!(breakdown.subtotal_minor, 5900);
    assert_eq!(breakdown.discount_minor, 0);
    assert_eq!(breakdown.total_minor, 5900);
}

#[test]
fn test_fifth_charm_earns_five_percent() {
    let breakdown = price(2500, &hearts(5), &catalog());
    assert_eq!(breakdown.item_count, 5);
    assert_eq!(breakdown.subtotal_minor, 6750);
    assert_eq!(breakdown.discount_minor, 337);
    assert_eq!(breakdown.total_minor, 6413);
    assert_eq!(breakdown.discount_rate, BasisPoints::from_percent(5));
}

#[test]
fn test_quantity_counts_as_items() {
    let state = DesignState::Chain {
        placements: vec![charm(1, "heart", 4), charm(2, "star", 6)],
    };
    let breakdown = price(0, &state, &catalog());
    assert_eq!(breakdown.item_count, 10);
    assert_eq!(breakdown.subtotal_minor, 4 * 850 + 6 * 1299);
    assert_eq!(breakdown.discount_minor, (4 * 850 + 6 * 1299) / 10);
}

#[test]
fn test_beads_count_one_each() {
    let state = DesignState::Beads {
        placements: (0..5)
            .map(|i| SlotPlacement {
                id: PlacementId(i + 1),
                catalog_item_id: ItemId::from("blue"),
                position: i as u32,
            })
            .collect(),
    };
    let breakdown = price(1800, &state, &catalog());
    assert_eq!(breakdown.item_count, 5);
    assert_eq!(breakdown.subtotal_minor, 2400);
    assert_eq!(breakdown.discount_minor, 120);
}

#[test]
fn test_discount_boundary_at_five() {
    let catalog = catalog();
    let four = price(2500, &hearts(4), &catalog);
    let five = price(2500, &hearts(5), &catalog);
    assert!(four.discount_minor < five.discount_minor);
}

#[test]
fn test_custom_tiers() {
    let rules = PricingRules::new(vec![
        DiscountTier::new(2, BasisPoints(250)),
        DiscountTier::new(3, BasisPoints(1500)),
    ]);
    assert_eq!(rules.tiers()[0].min_items, 3);
    let breakdown = rules.price(0, &hearts(2), &catalog());
    assert_eq!(breakdown.discount_minor, 1700 * 250 / 10_000);
}

#[test]
fn test_rules_json() {
    let rules: PricingRules =
        serde_json::from_str(r#"{"tiers": [{"minItems": 3, "rate": 700}]}"#).unwrap();
    assert_eq!(rules.rate_for(3), BasisPoints(700));
    assert_eq!(rules.rate_for(2), BasisPoints::ZERO);
}

proptest! {
    #[test]
    fn prop_order_independent(
        quantities in proptest::collection::vec((0usize..2, 1u32..4), 0..15),
        base in 0u64..100_000,
        rotate_by in 0usize..15,
    ) {
        let names = ["heart", "star"];
        let placements: Vec<Placement> = quantities
            .iter()
            .enumerate()
            .map(|(i, (item, q))| charm(i as u64 + 1, names[*item], *q))
            .collect();
        let mut shuffled = placements.clone();
        shuffled.reverse();
        if !shuffled.is_empty() {
            let k = rotate_by % shuffled.len();
            shuffled.rotate_left(k);
        }

        let catalog = catalog();
        let a = price(base, &DesignState::Chain { placements }, &catalog);
        let b = price(base, &DesignState::Chain { placements: shuffled }, &catalog);
        prop_assert_eq!(a, b);
        prop_assert_eq!(a.total_minor + a.discount_minor, a.subtotal_minor);
    }

    #[test]
    fn prop_adding_a_charm_never_lowers_total(n in 0u64..30, base in 0u64..5_000) {
        let catalog = catalog();
        let before = price(base, &hearts(n), &catalog);
        let after = price(base, &hearts(n + 1), &catalog);
        prop_assert!(after.total_minor >= before.total_minor);
    }
}
