//! Receipt and line item models.

use chrono::NaiveTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{ReceiptError, Result};

/// Format of the `purchaseTime` field.
const PURCHASE_TIME_FORMAT: &str = "%H:%M";

/// A submitted purchase receipt.
///
/// All fields are kept exactly as received. Amounts, the purchase date and
/// the purchase time are parsed lazily through the fallible accessors.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Receipt {
    /// Retailer or store name.
    pub retailer: String,
    /// Purchase date (`YYYY-MM-DD`).
    pub purchase_date: String,
    /// Purchase time (24-hour `HH:MM`).
    pub purchase_time: String,
    /// Total amount paid, as decimal text.
    pub total: String,
    /// Purchased line items.
    pub items: Vec<Item>,
}

/// A single line item on a receipt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Item {
    /// Short product description.
    pub short_description: String,
    /// Item price, as decimal text.
    pub price: String,
}

impl Receipt {
    /// Parses the receipt total.
    ///
    /// # Errors
    ///
    /// Returns [`ReceiptError::InvalidAmount`] if `total` is not a decimal
    /// number.
    #[inline]
    pub fn total_amount(&self) -> Result<Decimal> {
        parse_amount("total", &self.total)
    }

    /// Extracts the day-of-month from the purchase date.
    ///
    /// Only the third `-`-separated field is interpreted; year and month
    /// are not validated.
    ///
    /// # Errors
    ///
    /// Returns [`ReceiptError::InvalidDate`] if the date does not have
    /// exactly three fields or the day is not an integer.
    #[inline]
    pub fn purchase_day(&self) -> Result<i64> {
        let mut fields = self.purchase_date.split('-');
        match (fields.next(), fields.next(), fields.next(), fields.next()) {
            (Some(_), Some(_), Some(day), None) => {
                day.parse::<i64>().map_err(|err| ReceiptError::InvalidDate {
                    value: self.purchase_date.clone(),
                    reason: err.to_string(),
                })
            }
            _ => Err(ReceiptError::InvalidDate {
                value: self.purchase_date.clone(),
                reason: "expected three '-'-separated fields".to_owned(),
            }),
        }
    }

    /// Parses the purchase time as a 24-hour wall-clock time.
    ///
    /// # Errors
    ///
    /// Returns [`ReceiptError::InvalidTime`] if the time is not one or two
    /// hour digits, a colon and exactly two minute digits, or is out of
    /// range.
    #[inline]
    pub fn purchase_clock(&self) -> Result<NaiveTime> {
        let invalid = |reason: String| ReceiptError::InvalidTime {
            value: self.purchase_time.clone(),
            reason,
        };
        // chrono's `%M` also takes a single digit and skips leading spaces.
        if !is_clock_shaped(&self.purchase_time) {
            return Err(invalid("expected HH:MM".to_owned()));
        }
        NaiveTime::parse_from_str(&self.purchase_time, PURCHASE_TIME_FORMAT)
            .map_err(|err| invalid(err.to_string()))
    }
}

impl Item {
    /// Parses the item price.
    ///
    /// # Errors
    ///
    /// Returns [`ReceiptError::InvalidAmount`] if `price` is not a decimal
    /// number.
    #[inline]
    pub fn price_amount(&self) -> Result<Decimal> {
        parse_amount("price", &self.price)
    }

    /// Number of characters in the description once surrounding whitespace
    /// is removed.
    #[inline]
    #[must_use]
    pub fn trimmed_description_len(&self) -> usize {
        self.short_description.trim().chars().count()
    }
}

/// Whether `raw` is `H:MM` or `HH:MM` with ASCII digits and nothing else.
fn is_clock_shaped(raw: &str) -> bool {
    let all_digits = |part: &str| part.bytes().all(|byte| byte.is_ascii_digit());
    raw.split_once(':').is_some_and(|(hour, minute)| {
        (1..=2).contains(&hour.len()) && minute.len() == 2 && all_digits(hour) && all_digits(minute)
    })
}

/// Parses decimal text into an exact fixed-point amount.
///
/// Text carrying more fractional digits than the parsed value keeps is
/// rejected instead of being rounded.
fn parse_amount(field: &'static str, raw: &str) -> Result<Decimal> {
    let trimmed = raw.trim();
    let invalid = |source| ReceiptError::InvalidAmount {
        field,
        value: raw.to_owned(),
        source,
    };
    let amount = trimmed.parse::<Decimal>().map_err(invalid)?;
    let written = trimmed.split_once('.').map_or(0, |(_, fraction)| {
        fraction.chars().filter(char::is_ascii_digit).count()
    });
    let kept = usize::try_from(amount.scale()).unwrap_or(usize::MAX);
    if written > kept {
        let scale = u32::try_from(written).unwrap_or(u32::MAX);
        return Err(invalid(rust_decimal::Error::ScaleExceedsMaximumPrecision(scale)));
    }
    Ok(amount)
}
