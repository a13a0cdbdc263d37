//! Minor currency unit helpers
//!
//! Prices are carried as integer minor units (cents) end to end. The only
//! conversion to a decimal string happens here, for presentation.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::constants::BPS_DENOMINATOR;

/// A discount or markup rate expressed in basis points (1/100th of a percent).
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct BasisPoints(pub u32);

impl BasisPoints {
    /// Zero rate.
    pub const ZERO: BasisPoints = BasisPoints(0);

    /// The whole amount (100%).
    pub const FULL: BasisPoints = BasisPoints(BPS_DENOMINATOR as u32);

    /// Builds a rate from a whole percentage (5 → 500 bps).
    pub const fn from_percent(percent: u32) -> Self {
        BasisPoints(percent * 100)
    }

    /// Caps the rate at 100%.
    pub fn capped(self) -> Self {
        self.min(Self::FULL)
    }

    /// Applies the rate to an amount, flooring to the nearest minor unit.
    ///
    /// Rates above 100% are capped, so the result never exceeds `amount_minor`.
    pub fn apply_floor(self, amount_minor: u64) -> u64 {
        let scaled = amount_minor as u128 * self.capped().0 as u128 / BPS_DENOMINATOR as u128;
        scaled as u64
    }
}

impl fmt::Display for BasisPoints {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let whole = self.0 / 100;
        let frac = self.0 % 100;
        if frac == 0 {
            write!(f, "{}%", whole)
        } else {
            write!(f, "{}.{:02}%", whole, frac)
        }
    }
}

/// Formats an amount of minor units as a two-decimal string (`6413` → `"64.13"`).
pub fn format_minor(amount_minor: u64) -> String {
    format!("{}.{:02}", amount_minor / 100, amount_minor % 100)
}
