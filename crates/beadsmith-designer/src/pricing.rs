//! Design pricing.
//!
//! Pure function of the base price, the placements and the catalog. All
//! arithmetic is in integer minor units; the volume discount is floored.

use beadsmith_core::{BasisPoints, Catalog};
use serde::{Deserialize, Serialize};

use crate::model::DesignState;

/// A volume discount applying from `min_items` placed items upward.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DiscountTier {
    pub min_items: u32,
    pub rate: BasisPoints,
}

impl DiscountTier {
    pub fn new(min_items: u32, rate: BasisPoints) -> Self {
        Self { min_items, rate }
    }
}

/// Volume discount tiers.
///
/// Rates are capped at 100% however the rules are built, including when
/// deserialized.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "RawPricingRules")]
pub struct PricingRules {
    tiers: Vec<DiscountTier>,
}

#[derive(Deserialize)]
struct RawPricingRules {
    tiers: Vec<DiscountTier>,
}

impl From<RawPricingRules> for PricingRules {
    fn from(raw: RawPricingRules) -> Self {
        Self::new(raw.tiers)
    }
}

impl PricingRules {
    /// Builds rules from tiers in any order.
    pub fn new(mut tiers: Vec<DiscountTier>) -> Self {
        for tier in &mut tiers {
            if tier.rate > BasisPoints::FULL {
                tracing::warn!(
                    "Discount rate {} for {}+ items exceeds 100%, capping",
                    tier.rate,
                    tier.min_items
                );
                tier.rate = tier.rate.capped();
            }
        }
        tiers.sort_by(|a, b| b.min_items.cmp(&a.min_items));
        Self { tiers }
    }

    /// Rules without any discount.
    pub fn none() -> Self {
        Self { tiers: Vec::new() }
    }

    /// Tiers, highest threshold first.
    pub fn tiers(&self) -> &[DiscountTier] {
        &self.tiers
    }

    /// Rate of the highest tier reached by `item_count`.
    pub fn rate_for(&self, item_count: u32) -> BasisPoints {
        self.tiers
            .iter()
            .filter(|tier| item_count >= tier.min_items)
            .max_by_key(|tier| tier.min_items)
            .map_or(BasisPoints::ZERO, |tier| tier.rate)
    }

    /// Prices a design.
    ///
    /// Items missing from the catalog contribute nothing to the subtotal but
    /// still count toward the discount tier.
    pub fn price(&self, base_minor: u64, state: &DesignState, catalog: &Catalog) -> PriceBreakdown {
        let item_count = state.item_count();

        let items_minor = state.quantities().iter().fold(0u64, |acc, (item_id, qty)| {
            let unit = catalog.price_of(item_id).unwrap_or_else(|| {
                tracing::warn!("No catalog price for '{}', pricing at zero", item_id);
                0
            });
            acc.saturating_add(unit.saturating_mul(u64::from(*qty)))
        });

        let subtotal_minor = base_minor.saturating_add(items_minor);
        let rate = self.rate_for(item_count);
        let discount_minor = rate.apply_floor(subtotal_minor);

        PriceBreakdown {
            subtotal_minor,
            discount_minor,
            total_minor: subtotal_minor.saturating_sub(discount_minor),
            item_count,
            discount_rate: rate,
        }
    }
}

impl Default for PricingRules {
    fn default() -> Self {
        Self::new(vec![
            DiscountTier::new(10, BasisPoints::from_percent(10)),
            DiscountTier::new(5, BasisPoints::from_percent(5)),
        ])
    }
}

/// Result of pricing a design, in minor currency units.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceBreakdown {
    pub subtotal_minor: u64,
    pub discount_minor: u64,
    pub total_minor: u64,
    pub item_count: u32,
    pub discount_rate: BasisPoints,
}

/// Prices a design with the default discount tiers.
pub fn price(base_minor: u64, state: &DesignState, catalog: &Catalog) -> PriceBreakdown {
    PricingRules::default().price(base_minor, state, catalog)
}
