//! In-memory receipt storage.
//!
//! Provides [`InMemoryReceiptStore`], a thread-safe map from generated
//! identifier to receipt. Contents live for the lifetime of the store and
//! are lost when the process exits.

use std::collections::HashMap;
use std::collections::hash_map::Entry;
use std::sync::{PoisonError, RwLock};

use crate::error::{ReceiptError, Result};
use crate::models::{Receipt, ReceiptId};

use super::ReceiptStore;

/// Thread-safe in-memory receipt storage.
///
/// Writes take an exclusive lock and reads a shared one, so a receipt is
/// fully inserted before any reader can observe it.
///
/// # Example
///
/// ```rust
/// use receipt_points::models::Receipt;
/// use receipt_points::storage::{InMemoryReceiptStore, ReceiptStore};
///
/// let store = InMemoryReceiptStore::new();
/// let receipt = Receipt {
///     retailer: "Target".to_owned(),
///     purchase_date: "2022-01-01".to_owned(),
///     purchase_time: "13:01".to_owned(),
///     total: "1.25".to_owned(),
///     items: Vec::new(),
/// };
/// let id = store.put(receipt.clone()).unwrap();
/// assert_eq!(store.get(&id).unwrap(), receipt);
/// ```
#[derive(Debug, Default)]
pub struct InMemoryReceiptStore {
    /// Stored receipts keyed by identifier.
    receipts: RwLock<HashMap<ReceiptId, Receipt>>,
}

impl InMemoryReceiptStore {
    /// Creates a new empty store.
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

/// Wraps a lock poison error.
fn lock_error<T>(err: &PoisonError<T>) -> ReceiptError {
    ReceiptError::Storage(err.to_string().into())
}

impl ReceiptStore for InMemoryReceiptStore {
    #[inline]
    fn put(&self, receipt: Receipt) -> Result<ReceiptId> {
        let mut receipts = self.receipts.write().map_err(|err| lock_error(&err))?;
        loop {
            if let Entry::Vacant(slot) = receipts.entry(ReceiptId::generate()) {
                let id = slot.key().clone();
                tracing::debug!(id = %id, items = receipt.items.len(), "stored receipt");
                let _stored = slot.insert(receipt);
                return Ok(id);
            }
            tracing::warn!("generated receipt id collided, retrying");
        }
    }

    #[inline]
    fn get(&self, id: &ReceiptId) -> Result<Receipt> {
        let receipts = self.receipts.read().map_err(|err| lock_error(&err))?;
        receipts.get(id).cloned().ok_or_else(|| {
            tracing::debug!(id = %id, "receipt not found");
            ReceiptError::NotFound(id.clone())
        })
    }

    #[inline]
    fn len(&self) -> Result<usize> {
        let receipts = self.receipts.read().map_err(|err| lock_error(&err))?;
        Ok(receipts.len())
    }
}
