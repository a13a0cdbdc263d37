use beadsmith_core::{Catalog, ItemId, ItemKind, ItemVisual};
use beadsmith_designer::layout::SlotLayout;
use beadsmith_designer::patterns::PatternKind;
use beadsmith_designer::session::{BeadSession, SessionOptions};
use std::io::Write;
use tempfile::NamedTempFile;

const FEED: &str = r#"[
  {"id": "heart", "name": "Heart", "kind": "charm", "priceMinorUnits": 850,
   "maxPerDesign": 3, "stockUnits": 12,
   "size": {"shape": "rect", "widthMm": 10, "heightMm": 12},
   "svgMarkup": "<svg/>"},
  {"id": "blue", "kind": "bead", "priceMinorUnits": 120, "stockUnits": 200,
   "size": {"shape": "round", "diameterMm": 4}, "imageUrl": "https://cdn.test/blue.png"},
  {"id": "gold", "kind": "bead", "priceMinorUnits": 400, "stockUnits": 0},
  {"id": "red", "kind": "bead", "priceMinorUnits": 150, "stockUnits": 9}
]"#;

#[test]
fn test_load_feed_from_file() {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(FEED.as_bytes()).unwrap();

    let catalog = Catalog::load_from_file(file.path()).unwrap();
    assert_eq!(catalog.len(), 4);
    assert_eq!(catalog.items_of_kind(ItemKind::Bead).count(), 3);
    assert_eq!(
        catalog.get(&ItemId::from("heart")).unwrap().visual,
        ItemVisual::Vector {
            markup: "<svg/>".into()
        }
    );
    assert_eq!(catalog.get(&ItemId::from("gold")).unwrap().visual, ItemVisual::Placeholder);
    assert_eq!(catalog.available_beads(), vec![ItemId::from("blue"), ItemId::from("red")]);
}

#[test]
fn test_feed_drives_bead_pattern() {
    let catalog = Catalog::from_json(FEED).unwrap();
    let mut session = BeadSession::new(
        "bead-bracelet",
        1800,
        catalog,
        SlotLayout::new(180.0, 4.0, 1.0),
        SessionOptions::default(),
    );
    assert_eq!(session.apply_pattern(PatternKind::Alternating), Ok(12));
    // 6 blue, 6 red on top of the base price.
    assert_eq!(session.price().subtotal_minor, 1800 + 6 * 120 + 6 * 150);
    assert_eq!(session.remaining(&ItemId::from("red")), 3);
}

#[test]
fn test_missing_feed_file() {
    assert!(Catalog::load_from_file(std::path::Path::new("/nonexistent/catalog.json")).is_err());
}
