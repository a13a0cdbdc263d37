//! Design sessions.
//!
//! A session is the single mutator of one design. It bundles the placement
//! store with its undo history, the viewport, the catalog, the pricing rules
//! and the drag capture token. Every accepted mutation records one history
//! step; rejected or no-op mutations record nothing.
//!
//! Drag gestures are exclusive: while one placement is captured no other
//! drag may start, and undo/redo are ignored. Zooming is always allowed.
//! A whole gesture becomes one undo step when it is released.

mod beads;
mod chain;

use beadsmith_core::constants::{
    HISTORY_DEPTH, MAX_SCALE, MIN_SCALE, OFFSET_BOUND_MM, PATTERN_PREVIEW_CAP,
    PROJECTION_SAMPLES_COARSE, PROJECTION_SAMPLES_FINE, ZOOM_STEP,
};
use beadsmith_core::{Catalog, ItemId, PlacementError};

use crate::history::HistoryManager;
use crate::input::{PointerKind, ZoomEvent};
use crate::model::{DesignState, PlacementId};
use crate::patterns::PatternGenerator;
use crate::pricing::{PriceBreakdown, PricingRules};
use crate::projector::{PathProjector, ProjectionOptions};
use crate::serialization::DesignExport;
use crate::store::{ChainStore, PlacementStore, SlotStore};
use crate::viewport::Viewport;

/// Tunables for a session.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionOptions {
    pub offset_bound_mm: f64,
    /// Grid step for `t` when snapping is enabled.
    pub snap_step: Option<f64>,
    pub fine_samples: usize,
    pub coarse_samples: usize,
    pub history_depth: usize,
    pub pattern_cap: u32,
    pub pricing: PricingRules,
    pub min_scale: f64,
    pub max_scale: f64,
    pub zoom_step: f64,
}

impl SessionOptions {
    /// Projection options for a pointer device.
    pub fn projection_options(&self, pointer: PointerKind) -> ProjectionOptions {
        ProjectionOptions {
            samples: if pointer.is_coarse() {
                self.coarse_samples
            } else {
                self.fine_samples
            },
            snap_step: self.snap_step,
            offset_bound_mm: self.offset_bound_mm,
        }
    }

    fn viewport(&self) -> Viewport {
        Viewport::with_limits(self.min_scale, self.max_scale, self.zoom_step)
    }
}

impl Default for SessionOptions {
    fn default() -> Self {
        Self {
            offset_bound_mm: OFFSET_BOUND_MM,
            snap_step: None,
            fine_samples: PROJECTION_SAMPLES_FINE,
            coarse_samples: PROJECTION_SAMPLES_COARSE,
            history_depth: HISTORY_DEPTH,
            pattern_cap: PATTERN_PREVIEW_CAP,
            pricing: PricingRules::default(),
            min_scale: MIN_SCALE,
            max_scale: MAX_SCALE,
            zoom_step: ZOOM_STEP,
        }
    }
}

/// Exclusive capture of one placement during a drag.
#[derive(Debug, Clone)]
struct DragCapture<T> {
    placement_id: PlacementId,
    before: T,
}

/// One design being edited.
///
/// `S` is the placement store; `G` is the mode-specific surface (the path
/// projector for chains, the pattern generator for beads).
pub struct DesignSession<S: PlacementStore, G> {
    product_id: String,
    base_price_minor: u64,
    catalog: Catalog,
    store: S,
    surface: G,
    history: HistoryManager<S::Snapshot>,
    viewport: Viewport,
    drag: Option<DragCapture<S::Snapshot>>,
    options: SessionOptions,
}

/// Charm-on-chain session.
pub type ChainSession = DesignSession<ChainStore, PathProjector>;

/// Bead-in-slot session.
pub type BeadSession = DesignSession<SlotStore, PatternGenerator>;

impl<S: PlacementStore, G> DesignSession<S, G> {
    fn with_parts(
        product_id: String,
        base_price_minor: u64,
        catalog: Catalog,
        store: S,
        surface: G,
        options: SessionOptions,
    ) -> Self {
        Self {
            product_id,
            base_price_minor,
            catalog,
            store,
            surface,
            history: HistoryManager::new(options.history_depth),
            viewport: options.viewport(),
            drag: None,
            options,
        }
    }

    pub fn product_id(&self) -> &str {
        &self.product_id
    }

    pub fn base_price_minor(&self) -> u64 {
        self.base_price_minor
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn options(&self) -> &SessionOptions {
        &self.options
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    pub fn viewport_mut(&mut self) -> &mut Viewport {
        &mut self.viewport
    }

    /// Runs a store mutation as one undoable step.
    ///
    /// An in-flight drag is committed first. A history step is recorded only
    /// when the mutation succeeds and changes the records.
    fn mutate<T>(
        &mut self,
        f: impl FnOnce(&mut S, &Catalog) -> Result<T, PlacementError>,
    ) -> Result<T, PlacementError> {
        if self.drag.is_some() {
            self.end_drag();
        }
        let before = self.store.snapshot();
        let out = f(&mut self.store, &self.catalog)?;
        if self.store.snapshot() != before {
            self.history.snapshot(&before);
        }
        Ok(out)
    }

    /// Removes a placement. Unknown ids are a no-op.
    pub fn remove(&mut self, id: PlacementId) -> bool {
        self.mutate(|store, _| Ok(store.remove(id))).unwrap_or(false)
    }

    /// Removes every placement, as one undoable step.
    pub fn clear(&mut self) {
        let _ = self.mutate(|store, _| {
            store.clear();
            Ok(())
        });
    }

    pub fn can_undo(&self) -> bool {
        self.drag.is_none() && self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.drag.is_none() && self.history.can_redo()
    }

    /// Restores the state before the last committed edit.
    pub fn undo(&mut self) -> bool {
        if self.drag.is_some() {
            tracing::debug!("Undo ignored while dragging");
            return false;
        }
        match self.history.undo(&self.store.snapshot()) {
            Some(previous) => {
                self.store.restore(previous);
                true
            }
            None => false,
        }
    }

    /// Re-applies the last undone edit.
    pub fn redo(&mut self) -> bool {
        if self.drag.is_some() {
            tracing::debug!("Redo ignored while dragging");
            return false;
        }
        match self.history.redo(&self.store.snapshot()) {
            Some(next) => {
                self.store.restore(next);
                true
            }
            None => false,
        }
    }

    pub fn undo_depth(&self) -> usize {
        self.history.undo_depth()
    }

    pub fn design_state(&self) -> DesignState {
        self.store.design_state()
    }

    pub fn price(&self) -> PriceBreakdown {
        self.options
            .pricing
            .price(self.base_price_minor, &self.store.design_state(), &self.catalog)
    }

    /// How many more of an item may be placed.
    pub fn remaining(&self, item_id: &ItemId) -> u32 {
        self.store.remaining(&self.catalog, item_id)
    }

    pub fn export(&self) -> DesignExport {
        DesignExport::new(
            self.product_id.clone(),
            self.base_price_minor,
            self.store.design_state(),
        )
    }

    /// Applies a wheel or pinch zoom. Allowed during drags.
    pub fn zoom(&mut self, event: ZoomEvent) {
        self.viewport.zoom(event.delta, event.focal());
    }

    /// Captures a placement for dragging.
    ///
    /// Fails while another placement is captured, or for unknown ids.
    pub fn begin_drag(&mut self, id: PlacementId) -> bool {
        if let Some(capture) = &self.drag {
            tracing::warn!(
                "Rejected drag of {}: {} is already captured",
                id,
                capture.placement_id
            );
            return false;
        }
        if !self.store.contains(id) {
            return false;
        }
        self.drag = Some(DragCapture {
            placement_id: id,
            before: self.store.snapshot(),
        });
        tracing::debug!("Captured {} for drag", id);
        true
    }

    /// Releases the capture, recording the whole gesture as one undo step.
    pub fn end_drag(&mut self) -> Option<PlacementId> {
        let capture = self.drag.take()?;
        if self.store.snapshot() != capture.before {
            self.history.snapshot(&capture.before);
        }
        tracing::debug!("Released {}", capture.placement_id);
        Some(capture.placement_id)
    }

    pub fn is_dragging(&self) -> bool {
        self.drag.is_some()
    }

    /// The captured placement, if any.
    pub fn dragged(&self) -> Option<PlacementId> {
        self.drag.as_ref().map(|capture| capture.placement_id)
    }
}
