//! Individual scoring rules.
//!
//! Each rule takes already-parsed inputs and returns its contribution.
//! Parsing happens once in [`super::ScoringEngine::breakdown`]; a failed
//! parse is logged by [`parsed_or_warn`] and the dependent rules score
//! zero.

use chrono::NaiveTime;
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive as _;

use crate::error::Result;
use crate::models::Item;

/// Awarded when the total has no cents.
const ROUND_DOLLAR_POINTS: u64 = 50;
/// Awarded when the total is a multiple of a quarter.
const QUARTER_MULTIPLE_POINTS: u64 = 25;
/// Awarded for every two items on the receipt.
const ITEM_PAIR_POINTS: u64 = 5;
/// Awarded when the total exceeds ten.
const TOTAL_OVER_TEN_POINTS: u64 = 5;
/// Awarded when the purchase day is odd.
const ODD_DAY_POINTS: u64 = 6;
/// Awarded for purchases inside the afternoon window.
const AFTERNOON_POINTS: u64 = 10;
/// Trimmed description lengths that are a multiple of this earn points.
const DESCRIPTION_LEN_MULTIPLE: usize = 3;
/// Afternoon window start hour (exclusive).
const AFTERNOON_START_HOUR: u32 = 14;
/// Afternoon window end hour (exclusive).
const AFTERNOON_END_HOUR: u32 = 16;

/// Converts a parse result into an option, logging the failure.
pub(super) fn parsed_or_warn<T>(parsed: Result<T>) -> Option<T> {
    match parsed {
        Ok(value) => Some(value),
        Err(err) => {
            tracing::warn!(error = %err, "receipt field ignored for scoring");
            None
        }
    }
}

/// One point per ASCII alphanumeric character.
pub(super) fn retailer_name(retailer: &str) -> u64 {
    let count = retailer.chars().filter(char::is_ascii_alphanumeric).count();
    u64::try_from(count).unwrap_or(u64::MAX)
}

/// Fifty points if the total has no fractional part.
pub(super) fn round_dollar_total(total: Decimal) -> u64 {
    if total.fract().is_zero() {
        ROUND_DOLLAR_POINTS
    } else {
        0
    }
}

/// Twenty-five points if the total is an exact multiple of `0.25`.
pub(super) fn quarter_multiple_total(total: Decimal) -> u64 {
    if (total % Decimal::new(25, 2)).is_zero() {
        QUARTER_MULTIPLE_POINTS
    } else {
        0
    }
}

/// Five points for every two items.
#[allow(
    clippy::integer_division,
    reason = "an unpaired trailing item earns nothing"
)]
pub(super) fn item_pairs(items: &[Item]) -> u64 {
    let pairs = u64::try_from(items.len() / 2).unwrap_or(u64::MAX);
    pairs.saturating_mul(ITEM_PAIR_POINTS)
}

/// Sum of `ceil(price * 0.2)` over items whose trimmed description length
/// is a positive multiple of three.
///
/// Items with an unparseable price are skipped.
pub(super) fn item_descriptions(items: &[Item]) -> u64 {
    items
        .iter()
        .filter(|item| {
            let len = item.trimmed_description_len();
            len != 0 && len % DESCRIPTION_LEN_MULTIPLE == 0
        })
        .filter_map(|item| parsed_or_warn(item.price_amount()))
        .map(price_points)
        .fold(0_u64, u64::saturating_add)
}

/// `ceil(price * 0.2)`, clamped at zero for negative prices.
fn price_points(price: Decimal) -> u64 {
    let points = (price * Decimal::new(2, 1)).ceil();
    if points.is_sign_negative() {
        0
    } else {
        points.to_u64().unwrap_or(u64::MAX)
    }
}

/// Five points if the total is strictly greater than `10.00`.
pub(super) fn total_over_ten(total: Decimal) -> u64 {
    if total > Decimal::TEN {
        TOTAL_OVER_TEN_POINTS
    } else {
        0
    }
}

/// Six points if the day of the month is odd.
pub(super) const fn odd_purchase_day(day: i64) -> u64 {
    if day % 2 == 1 { ODD_DAY_POINTS } else { 0 }
}

/// Ten points if the purchase happened after 14:00 and before 16:00.
pub(super) fn afternoon_purchase(time: NaiveTime) -> u64 {
    let window = NaiveTime::from_hms_opt(AFTERNOON_START_HOUR, 0, 0)
        .zip(NaiveTime::from_hms_opt(AFTERNOON_END_HOUR, 0, 0));
    match window {
        Some((start, end)) if time > start && time < end => AFTERNOON_POINTS,
        Some(_) | None => 0,
    }
}
