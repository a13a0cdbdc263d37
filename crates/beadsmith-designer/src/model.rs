//! Placement records and the design state they make up.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::ops::{Add, Mul, Sub};

use beadsmith_core::ItemId;

/// A point (or vector) in screen or design space.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn distance_to(&self, other: &Point) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }

    pub fn dot(&self, other: &Point) -> f64 {
        self.x * other.x + self.y * other.y
    }

    pub fn length(&self) -> f64 {
        self.dot(self).sqrt()
    }

    /// Left-hand perpendicular `(-y, x)`.
    pub fn perpendicular(&self) -> Point {
        Point::new(-self.y, self.x)
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

impl Add for Point {
    type Output = Point;

    fn add(self, rhs: Point) -> Point {
        Point::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Point {
    type Output = Point;

    fn sub(self, rhs: Point) -> Point {
        Point::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Mul<f64> for Point {
    type Output = Point;

    fn mul(self, rhs: f64) -> Point {
        Point::new(self.x * rhs, self.y * rhs)
    }
}

/// Identifier of a placement, unique within one design.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PlacementId(pub u64);

impl std::fmt::Display for PlacementId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A charm hung on the chain at a continuous position.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Placement {
    pub id: PlacementId,
    pub catalog_item_id: ItemId,
    /// Fractional position along the path, in `[0, 1]`.
    pub t: f64,
    /// Signed perpendicular displacement from the path.
    pub offset_mm: f64,
    #[serde(default)]
    pub rotation_deg: f64,
    #[serde(default)]
    pub z_index: i32,
    #[serde(default = "default_quantity")]
    pub quantity: u32,
}

fn default_quantity() -> u32 {
    1
}

/// A bead occupying one discrete slot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SlotPlacement {
    pub id: PlacementId,
    pub catalog_item_id: ItemId,
    pub position: u32,
}

/// Which placement model a design uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DesignMode {
    Chain,
    Beads,
}

impl std::fmt::Display for DesignMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Chain => write!(f, "chain"),
            Self::Beads => write!(f, "beads"),
        }
    }
}

/// Every placement of one product instance, in store order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "lowercase")]
pub enum DesignState {
    Chain { placements: Vec<Placement> },
    Beads { placements: Vec<SlotPlacement> },
}

impl DesignState {
    pub fn mode(&self) -> DesignMode {
        match self {
            DesignState::Chain { .. } => DesignMode::Chain,
            DesignState::Beads { .. } => DesignMode::Beads,
        }
    }

    /// Number of placement records (not quantities).
    pub fn len(&self) -> usize {
        match self {
            DesignState::Chain { placements } => placements.len(),
            DesignState::Beads { placements } => placements.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Total number of items: summed quantities for charms, one per bead.
    pub fn item_count(&self) -> u32 {
        match self {
            DesignState::Chain { placements } => placements
                .iter()
                .fold(0u32, |acc, p| acc.saturating_add(p.quantity)),
            DesignState::Beads { placements } => placements.len() as u32,
        }
    }

    /// Placed quantity per catalog item.
    pub fn quantities(&self) -> BTreeMap<ItemId, u32> {
        let mut totals = BTreeMap::new();
        match self {
            DesignState::Chain { placements } => {
                for p in placements {
                    let entry = totals.entry(p.catalog_item_id.clone()).or_insert(0u32);
                    *entry = entry.saturating_add(p.quantity);
                }
            }
            DesignState::Beads { placements } => {
                for p in placements {
                    *totals.entry(p.catalog_item_id.clone()).or_insert(0u32) += 1;
                }
            }
        }
        totals
    }
}
