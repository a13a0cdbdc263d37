use beadsmith_core::ItemId;
use beadsmith_designer::layout::SlotLayout;
use beadsmith_designer::patterns::{PatternGenerator, PatternKind};
use proptest::prelude::*;

fn items(names: &[&str]) -> Vec<ItemId> {
    names.iter().map(|n| ItemId::from(*n)).collect()
}

#[test]
fn test_alternating_on_classic_bracelet() {
    let layout = SlotLayout::new(180.0, 4.0, 1.0);
    assert_eq!(layout.slot_count(), 36);

    let out = PatternGenerator::default().generate(PatternKind::Alternating, layout.slot_count(), &items(&["blue", "red"]));
    assert_eq!(out.len(), 12);
    for (i, (position, id)) in out.iter().enumerate() {
        assert_eq!(*position, i as u32);
        assert_eq!(id.as_str(), if i % 2 == 0 { "blue" } else { "red" });
    }
}

#[test]
fn test_alternating_uses_first_two_items_only() {
    let out = PatternGenerator::default().generate(PatternKind::Alternating, 8, &items(&["a", "b", "c"]));
    assert!(out.iter().all(|(_, id)| id.as_str() != "c"));
}

#[test]
fn test_cap_is_configurable() {
    let generator = PatternGenerator::new(40);
    let out = generator.generate(PatternKind::Gradient, 36, &items(&["a", "b"]));
    assert_eq!(out.len(), 36);
}

#[test]
fn test_symmetrical_even() {
    let out = PatternGenerator::default().generate(PatternKind::Symmetrical, 36, &items(&["a", "b", "c", "d", "e"]));
    let names: Vec<&str> = out.iter().map(|(_, id)| id.as_str()).collect();
    assert_eq!(names, vec!["a", "b", "c", "d", "e", "a", "a", "e", "d", "c", "b", "a"]);
}

#[test]
fn test_random_seeds_differ() {
    let pool = items(&["a", "b", "c", "d", "e", "f"]);
    let generator = PatternGenerator::new(36);
    let first = generator.generate(PatternKind::Random { seed: 1 }, 36, &pool);
    let second = generator.generate(PatternKind::Random { seed: 2 }, 36, &pool);
    assert_ne!(first, second);
    assert!(first.iter().all(|(_, id)| pool.contains(id)));
}

proptest! {
    #[test]
    fn prop_symmetry_law(half in 1u32..30, k in 1usize..8, cap in 1u32..64) {
        let n = half * 2;
        let pool: Vec<ItemId> = (0..k).map(|i| ItemId::new(format!("bead-{i}"))).collect();
        let out = PatternGenerator::new(cap).generate(PatternKind::Symmetrical, n, &pool);
        let len = out.len();
        prop_assert_eq!(len as u32, n.min(cap));
        for i in 0..len {
            prop_assert_eq!(&out[i].1, &out[len - 1 - i].1);
        }
    }

    #[test]
    fn prop_output_covers_leading_slots(slots in 0u32..100, k in 1usize..6, seed in any::<u64>()) {
        let pool: Vec<ItemId> = (0..k).map(|i| ItemId::new(format!("bead-{i}"))).collect();
        let generator = PatternGenerator::default();
        for kind in [PatternKind::Alternating, PatternKind::Gradient, PatternKind::Random { seed }, PatternKind::Symmetrical] {
            let out = generator.generate(kind, slots, &pool);
            let positions: Vec<u32> = out.iter().map(|(p, _)| *p).collect();
            let expected: Vec<u32> = (0..slots.min(12)).collect();
            prop_assert_eq!(positions, expected);
        }
    }
}
