//! Data models for submitted receipts.
//!
//! Receipts arrive as JSON with every amount encoded as text. The models
//! keep the raw text and expose fallible accessors that parse individual
//! fields on demand, so a single malformed field never prevents a receipt
//! from being stored.

mod ids;
mod receipt;

pub use ids::ReceiptId;
pub use receipt::{Item, Receipt};
