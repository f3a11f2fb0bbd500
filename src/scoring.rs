//! Reward points computation.
//!
//! [`ScoringEngine`] turns a [`Receipt`] into a point total by summing
//! eight independent rules. Scoring is pure: it reads the receipt, never
//! mutates it, and always produces a total. A field that fails to parse
//! only zeroes the rules that depend on it.

mod rules;

use serde::{Deserialize, Serialize};

use crate::models::Receipt;

/// Stateless receipt scorer.
#[derive(Debug, Clone, Copy, Default)]
pub struct ScoringEngine;

/// Points awarded by each rule for a single receipt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PointsBreakdown {
    /// One point per ASCII alphanumeric character in the retailer name.
    pub retailer_name: u64,
    /// Awarded when the total has no cents.
    pub round_dollar_total: u64,
    /// Awarded when the total is a multiple of `0.25`.
    pub quarter_multiple_total: u64,
    /// Five points for every two items.
    pub item_pairs: u64,
    /// Price-based points for items whose trimmed description length is a
    /// multiple of three.
    pub item_descriptions: u64,
    /// Awarded when the total is greater than `10.00`.
    pub total_over_ten: u64,
    /// Awarded when the purchase day is odd.
    pub odd_purchase_day: u64,
    /// Awarded when the purchase time is after 14:00 and before 16:00.
    pub afternoon_purchase: u64,
}

impl ScoringEngine {
    /// Computes the point total for a receipt.
    ///
    /// Equivalent to `ScoringEngine::breakdown(receipt).total()`.
    #[inline]
    #[must_use]
    pub fn compute(receipt: &Receipt) -> u64 {
        Self::breakdown(receipt).total()
    }

    /// Computes the contribution of every rule for a receipt.
    #[inline]
    #[must_use]
    pub fn breakdown(receipt: &Receipt) -> PointsBreakdown {
        let total = rules::parsed_or_warn(receipt.total_amount());
        PointsBreakdown {
            retailer_name: rules::retailer_name(&receipt.retailer),
            round_dollar_total: total.map_or(0, rules::round_dollar_total),
            quarter_multiple_total: total.map_or(0, rules::quarter_multiple_total),
            item_pairs: rules::item_pairs(&receipt.items),
            item_descriptions: rules::item_descriptions(&receipt.items),
            total_over_ten: total.map_or(0, rules::total_over_ten),
            odd_purchase_day: rules::parsed_or_warn(receipt.purchase_day())
                .map_or(0, rules::odd_purchase_day),
            afternoon_purchase: rules::parsed_or_warn(receipt.purchase_clock())
                .map_or(0, rules::afternoon_purchase),
        }
    }
}

impl PointsBreakdown {
    /// Sum of all rule contributions.
    #[inline]
    #[must_use]
    pub fn total(&self) -> u64 {
        self.rules()
            .iter()
            .fold(0_u64, |sum, &(_, points)| sum.saturating_add(points))
    }

    /// Rule contributions paired with a short human-readable label, in
    /// rule order.
    #[inline]
    #[must_use]
    pub const fn rules(&self) -> [(&'static str, u64); 8] {
        [
            ("Retailer name characters", self.retailer_name),
            ("Round dollar total", self.round_dollar_total),
            ("Total is a multiple of 0.25", self.quarter_multiple_total),
            ("Item pairs", self.item_pairs),
            ("Item descriptions", self.item_descriptions),
            ("Total over 10.00", self.total_over_ten),
            ("Odd purchase day", self.odd_purchase_day),
            ("Purchased 14:00-16:00", self.afternoon_purchase),
        ]
    }
}
