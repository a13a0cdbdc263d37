//! Catalog data model
//!
//! This module provides:
//! - Catalog item identifiers, kinds, and physical sizes
//! - The resolved visual variant for each item
//! - An ordered, indexed catalog with capacity lookups
//!
//! The catalog is supplied by an external feed and is read-only to the engine.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;

use crate::error::{CatalogError, Result};

/// Unique identifier for a catalog item
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemId(pub String);

impl ItemId {
    /// Creates an id from anything string-like.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Borrows the id as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ItemId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for ItemId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// What kind of product an item is
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ItemKind {
    /// Hangs from a chain at a continuous position
    Charm,
    /// Threaded into a discrete slot
    Bead,
}

/// Physical footprint of an item
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "shape", rename_all = "lowercase")]
pub enum ItemSize {
    /// Rectangular footprint
    Rect {
        #[serde(rename = "widthMm")]
        width_mm: f64,
        #[serde(rename = "heightMm")]
        height_mm: f64,
    },
    /// Round footprint
    Round {
        #[serde(rename = "diameterMm")]
        diameter_mm: f64,
    },
}

impl ItemSize {
    /// Width and height of the bounding box, in millimeters.
    pub fn extent_mm(&self) -> (f64, f64) {
        match *self {
            ItemSize::Rect {
                width_mm,
                height_mm,
            } => (width_mm, height_mm),
            ItemSize::Round { diameter_mm } => (diameter_mm, diameter_mm),
        }
    }

    /// Radius of the smallest circle enclosing the footprint.
    pub fn bounding_radius_mm(&self) -> f64 {
        let (w, h) = self.extent_mm();
        (w * w + h * h).sqrt() / 2.0
    }

    fn validate(&self) -> std::result::Result<(), String> {
        let (w, h) = self.extent_mm();
        if !w.is_finite() || !h.is_finite() {
            return Err("size must be finite".to_string());
        }
        if w <= 0.0 || h <= 0.0 {
            return Err("size must be > 0".to_string());
        }
        Ok(())
    }
}

impl Default for ItemSize {
    fn default() -> Self {
        ItemSize::Round { diameter_mm: 4.0 }
    }
}

/// How an item is drawn, resolved once when the catalog is loaded
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ItemVisual {
    /// Raster artwork at a URL
    Image { url: String },
    /// Inline vector markup
    Vector { markup: String },
    /// No artwork; renderers draw a generic shape
    Placeholder,
}

impl ItemVisual {
    /// Picks inline markup first, then an image URL, then the placeholder.
    pub fn resolve(image_url: Option<&str>, svg_markup: Option<&str>) -> Self {
        fn non_empty(s: Option<&str>) -> Option<&str> {
            s.map(str::trim).filter(|s| !s.is_empty())
        }
        if let Some(markup) = non_empty(svg_markup) {
            ItemVisual::Vector {
                markup: markup.to_string(),
            }
        } else if let Some(url) = non_empty(image_url) {
            ItemVisual::Image {
                url: url.to_string(),
            }
        } else {
            ItemVisual::Placeholder
        }
    }
}

/// Feed representation of a catalog item, as delivered by the host application.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CatalogFeedItem {
    id: ItemId,
    #[serde(default)]
    name: String,
    kind: ItemKind,
    price_minor_units: u64,
    #[serde(default)]
    max_per_design: Option<u32>,
    stock_units: u32,
    #[serde(default)]
    size: ItemSize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    image_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    svg_markup: Option<String>,
}

/// A charm or bead offered for placement
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "CatalogFeedItem", into = "CatalogFeedItem")]
pub struct CatalogItem {
    pub id: ItemId,
    pub name: String,
    pub kind: ItemKind,
    /// Unit price in minor currency units.
    pub price_minor: u64,
    /// Per-design cap. Only meaningful for charms; `None` means uncapped.
    pub max_per_design: Option<u32>,
    pub stock_units: u32,
    pub size: ItemSize,
    pub visual: ItemVisual,
}

impl From<CatalogFeedItem> for CatalogItem {
    fn from(feed: CatalogFeedItem) -> Self {
        let visual = ItemVisual::resolve(feed.image_url.as_deref(), feed.svg_markup.as_deref());
        Self {
            id: feed.id,
            name: feed.name,
            kind: feed.kind,
            price_minor: feed.price_minor_units,
            max_per_design: feed.max_per_design,
            stock_units: feed.stock_units,
            size: feed.size,
            visual,
        }
    }
}

impl From<CatalogItem> for CatalogFeedItem {
    fn from(item: CatalogItem) -> Self {
        let (image_url, svg_markup) = match item.visual {
            ItemVisual::Image { url } => (Some(url), None),
            ItemVisual::Vector { markup } => (None, Some(markup)),
            ItemVisual::Placeholder => (None, None),
        };
        Self {
            id: item.id,
            name: item.name,
            kind: item.kind,
            price_minor_units: item.price_minor,
            max_per_design: item.max_per_design,
            stock_units: item.stock_units,
            size: item.size,
            image_url,
            svg_markup,
        }
    }
}

impl CatalogItem {
    /// Creates a charm with a rectangular footprint and no artwork.
    pub fn charm(id: impl Into<String>, price_minor: u64, stock_units: u32) -> Self {
        let id = id.into();
        Self {
            name: id.clone(),
            id: ItemId(id),
            kind: ItemKind::Charm,
            price_minor,
            max_per_design: None,
            stock_units,
            size: ItemSize::Rect {
                width_mm: 10.0,
                height_mm: 12.0,
            },
            visual: ItemVisual::Placeholder,
        }
    }

    /// Creates a round bead with no artwork.
    pub fn bead(id: impl Into<String>, price_minor: u64, stock_units: u32, diameter_mm: f64) -> Self {
        let id = id.into();
        Self {
            name: id.clone(),
            id: ItemId(id),
            kind: ItemKind::Bead,
            price_minor,
            max_per_design: None,
            stock_units,
            size: ItemSize::Round { diameter_mm },
            visual: ItemVisual::Placeholder,
        }
    }

    /// Sets the per-design cap.
    pub fn with_max_per_design(mut self, max: u32) -> Self {
        self.max_per_design = Some(max);
        self
    }

    /// Sets the resolved visual.
    pub fn with_visual(mut self, visual: ItemVisual) -> Self {
        self.visual = visual;
        self
    }

    /// True when the item can be placed at all.
    pub fn in_stock(&self) -> bool {
        self.stock_units > 0
    }

    /// Largest quantity a single design may hold.
    ///
    /// Charms are bounded by both the per-design cap and stock; beads only by stock.
    pub fn effective_limit(&self) -> u32 {
        match (self.kind, self.max_per_design) {
            (ItemKind::Charm, Some(max)) => max.min(self.stock_units),
            _ => self.stock_units,
        }
    }
}

/// Ordered, indexed collection of catalog items
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    items: Vec<CatalogItem>,
    index: HashMap<ItemId, usize>,
}

impl Catalog {
    /// Create an empty catalog
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a catalog, rejecting duplicate ids and invalid sizes.
    pub fn from_items(items: Vec<CatalogItem>) -> Result<Self> {
        let mut catalog = Self::new();
        for item in items {
            catalog.insert(item)?;
        }
        Ok(catalog)
    }

    /// Parses a JSON array of feed items.
    pub fn from_json(json: &str) -> Result<Self> {
        let items: Vec<CatalogItem> = serde_json::from_str(json)?;
        Self::from_items(items)
    }

    /// Loads a JSON catalog feed from disk.
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let catalog = Self::from_json(&content)?;
        tracing::debug!("Loaded {} catalog items from {}", catalog.len(), path.display());
        Ok(catalog)
    }

    /// Serializes the catalog back to its feed JSON form.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(&self.items)?)
    }

    /// Appends an item, keeping catalog order.
    pub fn insert(&mut self, item: CatalogItem) -> Result<()> {
        if self.index.contains_key(&item.id) {
            return Err(CatalogError::DuplicateItem {
                item_id: item.id.to_string(),
            }
            .into());
        }
        if let Err(reason) = item.size.validate() {
            return Err(CatalogError::InvalidSize {
                item_id: item.id.to_string(),
                reason,
            }
            .into());
        }
        self.index.insert(item.id.clone(), self.items.len());
        self.items.push(item);
        Ok(())
    }

    /// Looks an item up by id.
    pub fn get(&self, id: &ItemId) -> Option<&CatalogItem> {
        self.index.get(id).map(|&i| &self.items[i])
    }

    /// Unit price of an item, if it exists.
    pub fn price_of(&self, id: &ItemId) -> Option<u64> {
        self.get(id).map(|item| item.price_minor)
    }

    /// All items in catalog order.
    pub fn items(&self) -> &[CatalogItem] {
        &self.items
    }

    /// Items of one kind, in catalog order.
    pub fn items_of_kind(&self, kind: ItemKind) -> impl Iterator<Item = &CatalogItem> {
        self.items.iter().filter(move |item| item.kind == kind)
    }

    /// Ids of the in-stock beads, in catalog order.
    pub fn available_beads(&self) -> Vec<ItemId> {
        self.items_of_kind(ItemKind::Bead)
            .filter(|item| item.in_stock())
            .map(|item| item.id.clone())
            .collect()
    }

    /// Number of items.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Check if the catalog is empty.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
