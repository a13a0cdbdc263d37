use beadsmith_core::{Catalog, ItemId, ItemSize, PlacementError};

use super::{ChainSession, DesignSession, SessionOptions};
use crate::input::{InputEvent, InputOutcome, InputPhase, PointerKind};
use crate::layout::PathLayout;
use crate::model::{DesignMode, DesignState, Placement, PlacementId, Point};
use crate::projector::{PathProjector, Projection};
use crate::serialization::{DesignExport, ImportError};
use crate::store::ChainStore;

impl DesignSession<ChainStore, PathProjector> {
    pub fn new(
        product_id: impl Into<String>,
        base_price_minor: u64,
        catalog: Catalog,
        layout: PathLayout,
        options: SessionOptions,
    ) -> ChainSession {
        let store = ChainStore::new(options.offset_bound_mm);
        Self::with_parts(
            product_id.into(),
            base_price_minor,
            catalog,
            store,
            PathProjector::new(layout),
            options,
        )
    }

    /// Reopens an exported chain design.
    pub fn from_export(
        export: DesignExport,
        catalog: Catalog,
        layout: PathLayout,
        options: SessionOptions,
    ) -> Result<ChainSession, ImportError> {
        export.check_compatible(DesignMode::Chain)?;
        let DesignState::Chain { placements } = export.design else {
            return Err(ImportError::ModeMismatch {
                expected: DesignMode::Chain,
                found: DesignMode::Beads,
            });
        };
        let store = ChainStore::from_placements(placements, options.offset_bound_mm);
        Ok(Self::with_parts(
            export.product_id,
            export.base_price_minor,
            catalog,
            store,
            PathProjector::new(layout),
            options,
        ))
    }

    pub fn layout(&self) -> &PathLayout {
        self.surface.layout()
    }

    pub fn projector(&self) -> &PathProjector {
        &self.surface
    }

    pub fn placements(&self) -> &[Placement] {
        self.store.placements()
    }

    /// Projects a screen position onto the chain.
    pub fn project(&self, pointer: Point, kind: PointerKind) -> Projection {
        let options = self.options.projection_options(kind);
        self.surface.project(pointer, &self.viewport, &options)
    }

    /// Hangs one charm at `t` with a perpendicular offset.
    pub fn add_charm(
        &mut self,
        item_id: &ItemId,
        t: f64,
        offset_mm: f64,
    ) -> Result<PlacementId, PlacementError> {
        self.mutate(|store, catalog| store.add(catalog, item_id, t, offset_mm))
    }

    /// Hangs one charm where the pointer projects onto the chain.
    pub fn add_charm_at(
        &mut self,
        item_id: &ItemId,
        pointer: Point,
        kind: PointerKind,
    ) -> Result<PlacementId, PlacementError> {
        let Projection { t, offset_mm } = self.project(pointer, kind);
        self.add_charm(item_id, t, offset_mm)
    }

    pub fn move_charm(&mut self, id: PlacementId, t: f64, offset_mm: f64) -> bool {
        self.mutate(|store, _| Ok(store.move_to(id, t, offset_mm)))
            .unwrap_or(false)
    }

    /// Changes how many units a placement stands for, re-checking capacity.
    pub fn set_quantity(&mut self, id: PlacementId, quantity: u32) -> Result<bool, PlacementError> {
        self.mutate(|store, catalog| store.set_quantity(catalog, id, quantity))
    }

    pub fn rotate(&mut self, id: PlacementId, rotation_deg: f64) -> bool {
        self.mutate(|store, _| Ok(store.rotate(id, rotation_deg)))
            .unwrap_or(false)
    }

    pub fn bring_to_front(&mut self, id: PlacementId) -> bool {
        self.mutate(|store, _| Ok(store.bring_to_front(id)))
            .unwrap_or(false)
    }

    /// Moves the captured charm under the pointer.
    ///
    /// Intermediate positions are not recorded in history.
    pub fn drag_to(&mut self, pointer: Point, kind: PointerKind) -> Option<PlacementId> {
        let id = self.dragged()?;
        let Projection { t, offset_mm } = self.project(pointer, kind);
        self.store.move_to(id, t, offset_mm).then_some(id)
    }

    /// Topmost charm whose footprint contains a screen position.
    pub fn hit_test(&self, pointer: Point) -> Option<PlacementId> {
        let px_per_mm = self.surface.px_per_mm();
        if px_per_mm <= 0.0 {
            return None;
        }
        let design = self.viewport.screen_to_design(pointer);

        self.store
            .placements()
            .iter()
            .enumerate()
            .filter(|(_, placement)| {
                let size = self
                    .catalog
                    .get(&placement.catalog_item_id)
                    .map(|item| item.size)
                    .unwrap_or_default();
                let center = self.surface.placement_point(placement.t, placement.offset_mm);
                let (sin, cos) = (-placement.rotation_deg).to_radians().sin_cos();
                let d = design - center;
                let local = Point::new(d.x * cos - d.y * sin, d.x * sin + d.y * cos) * (1.0 / px_per_mm);
                footprint_contains(&size, local)
            })
            // Later records win ties in z.
            .max_by_key(|(index, placement)| (placement.z_index, *index))
            .map(|(_, placement)| placement.id)
    }

    /// Routes a normalized pointer event.
    ///
    /// `Start` captures the charm under the pointer, `Move` drags it and
    /// `End` drops it, committing the gesture as one undo step.
    pub fn handle_input(&mut self, event: InputEvent) -> InputOutcome {
        let pointer = event.position();
        match event.phase {
            InputPhase::Start => match self.hit_test(pointer) {
                Some(id) if self.begin_drag(id) => InputOutcome::Captured(id),
                _ => InputOutcome::Ignored,
            },
            InputPhase::Move => self
                .drag_to(pointer, event.pointer)
                .map_or(InputOutcome::Ignored, InputOutcome::Moved),
            InputPhase::End => {
                if self.is_dragging() {
                    self.drag_to(pointer, event.pointer);
                }
                self.end_drag()
                    .map_or(InputOutcome::Ignored, InputOutcome::Released)
            }
        }
    }
}

fn footprint_contains(size: &ItemSize, local_mm: Point) -> bool {
    match *size {
        ItemSize::Rect {
            width_mm,
            height_mm,
        } => local_mm.x.abs() <= width_mm / 2.0 && local_mm.y.abs() <= height_mm / 2.0,
        ItemSize::Round { diameter_mm } => local_mm.length() <= diameter_mm / 2.0,
    }
}
