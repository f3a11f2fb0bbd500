//! Receipt processing and reward points scoring.
//!
//! Receipts are submitted once, stored in memory under a generated
//! identifier, and scored on demand:
//!
//! - [`storage`] holds receipts behind the append-only
//!   [`storage::ReceiptStore`] contract.
//! - [`scoring`] computes points with [`scoring::ScoringEngine`].
//! - [`server`] exposes both over HTTP (feature `server`).
//!
//! ```rust
//! use receipt_points::models::{Item, Receipt};
//! use receipt_points::scoring::ScoringEngine;
//!
//! let receipt = Receipt {
//!     retailer: "M&M Corner Market".to_owned(),
//!     purchase_date: "2022-03-20".to_owned(),
//!     purchase_time: "14:33".to_owned(),
//!     total: "9.00".to_owned(),
//!     items: vec![
//!         Item { short_description: "Gatorade".to_owned(), price: "2.25".to_owned() };
//!         4
//!     ],
//! };
//! assert_eq!(ScoringEngine::compute(&receipt), 109);
//! ```

#[cfg(feature = "server")]
pub mod config;
pub mod error;
pub mod models;
pub mod scoring;
#[cfg(feature = "server")]
pub mod server;
pub mod storage;
