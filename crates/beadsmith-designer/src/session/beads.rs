use beadsmith_core::{Catalog, ItemId, PlacementError};

use super::{BeadSession, DesignSession, SessionOptions};
use crate::input::{InputEvent, InputOutcome, InputPhase};
use crate::layout::SlotLayout;
use crate::model::{DesignMode, DesignState, PlacementId, Point, SlotPlacement};
use crate::patterns::{PatternGenerator, PatternKind};
use crate::serialization::{DesignExport, ImportError};
use crate::store::SlotStore;

/// Bead sessions lay the strand along the design-space x axis, one design
/// unit per millimeter.
impl DesignSession<SlotStore, PatternGenerator> {
    pub fn new(
        product_id: impl Into<String>,
        base_price_minor: u64,
        catalog: Catalog,
        layout: SlotLayout,
        options: SessionOptions,
    ) -> BeadSession {
        let generator = PatternGenerator::new(options.pattern_cap);
        Self::with_parts(
            product_id.into(),
            base_price_minor,
            catalog,
            SlotStore::new(layout),
            generator,
            options,
        )
    }

    /// Reopens an exported bead design.
    pub fn from_export(
        export: DesignExport,
        catalog: Catalog,
        layout: SlotLayout,
        options: SessionOptions,
    ) -> Result<BeadSession, ImportError> {
        export.check_compatible(DesignMode::Beads)?;
        let DesignState::Beads { placements } = export.design else {
            return Err(ImportError::ModeMismatch {
                expected: DesignMode::Beads,
                found: DesignMode::Chain,
            });
        };
        let generator = PatternGenerator::new(options.pattern_cap);
        Ok(Self::with_parts(
            export.product_id,
            export.base_price_minor,
            catalog,
            SlotStore::from_placements(layout, placements),
            generator,
            options,
        ))
    }

    pub fn layout(&self) -> &SlotLayout {
        self.store.layout()
    }

    pub fn slot_count(&self) -> u32 {
        self.store.slot_count()
    }

    pub fn generator(&self) -> &PatternGenerator {
        &self.surface
    }

    /// Placements in slot order.
    pub fn ordered(&self) -> Vec<&SlotPlacement> {
        self.store.ordered()
    }

    /// Puts a bead into a slot, replacing any occupant.
    pub fn place_bead(&mut self, item_id: &ItemId, position: u32) -> Result<PlacementId, PlacementError> {
        self.mutate(|store, catalog| store.add(catalog, item_id, position))
    }

    /// Moves a bead, evicting the destination's occupant.
    pub fn move_bead(&mut self, id: PlacementId, position: u32) -> bool {
        self.mutate(|store, _| Ok(store.move_to(id, position)))
            .unwrap_or(false)
    }

    /// Replaces the whole design with a generated pattern.
    ///
    /// Uses the in-stock beads in catalog order. Returns the number of beads
    /// placed; with no beads available the design is left alone.
    pub fn apply_pattern(&mut self, kind: PatternKind) -> Result<usize, PlacementError> {
        let items = self.catalog.available_beads();
        if items.is_empty() {
            tracing::warn!("No beads in stock, {} pattern not applied", kind);
            return Ok(0);
        }
        let assignments = self.surface.generate(kind, self.store.slot_count(), &items);
        self.mutate(|store, catalog| store.replace_all(catalog, &assignments))
    }

    /// Slot under a screen position.
    pub fn slot_at_screen(&self, pointer: Point) -> Option<u32> {
        let design = self.viewport.screen_to_design(pointer);
        self.store.layout().slot_at(design.x)
    }

    /// Design-space centre of a slot, for rendering.
    pub fn slot_center(&self, position: u32) -> Option<Point> {
        (position < self.slot_count())
            .then(|| Point::new(self.store.layout().slot_center_mm(position), 0.0))
    }

    /// Bead under a screen position.
    ///
    /// Beads sit centred on the string at `y = 0`; the pointer must fall
    /// within one bead radius of it.
    pub fn hit_test(&self, pointer: Point) -> Option<PlacementId> {
        let design = self.viewport.screen_to_design(pointer);
        let on_string = design.y.abs() <= self.store.layout().diameter_mm / 2.0;
        if !on_string {
            return None;
        }
        let slot = self.store.layout().slot_at(design.x)?;
        self.store.occupant(slot).map(|p| p.id)
    }

    /// Slot the captured bead would land in.
    ///
    /// The bead is only moved on release, so hovering across occupied slots
    /// evicts nothing.
    pub fn drag_to_slot(&self, pointer: Point) -> Option<u32> {
        self.dragged()?;
        self.slot_at_screen(pointer)
    }

    /// Routes a normalized pointer event.
    pub fn handle_input(&mut self, event: InputEvent) -> InputOutcome {
        let pointer = event.position();
        match event.phase {
            InputPhase::Start => match self.hit_test(pointer) {
                Some(id) if self.begin_drag(id) => InputOutcome::Captured(id),
                _ => InputOutcome::Ignored,
            },
            InputPhase::Move => match self.dragged() {
                Some(id) if self.drag_to_slot(pointer).is_some() => InputOutcome::Moved(id),
                _ => InputOutcome::Ignored,
            },
            InputPhase::End => {
                if let (Some(id), Some(slot)) = (self.dragged(), self.drag_to_slot(pointer)) {
                    self.store.move_to(id, slot);
                }
                self.end_drag()
                    .map_or(InputOutcome::Ignored, InputOutcome::Released)
            }
        }
    }
}
