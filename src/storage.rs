//! Receipt storage backends.
//!
//! [`ReceiptStore`] is the append-only contract the service relies on:
//! receipts go in once under a freshly generated identifier and can be
//! read back any number of times. There is no update or delete.

mod memory;

pub use memory::InMemoryReceiptStore;

use crate::error::Result;
use crate::models::{Receipt, ReceiptId};

/// Append-only, identifier-keyed receipt storage.
///
/// All methods take `&self`; implementations use interior mutability and
/// must be safe to share across threads.
pub trait ReceiptStore: core::fmt::Debug + Send + Sync {
    /// Stores a receipt under a newly generated identifier and returns it.
    ///
    /// The receipt contents are not validated. An existing entry is never
    /// overwritten.
    ///
    /// # Errors
    ///
    /// Returns an error if the storage backend fails to write.
    fn put(&self, receipt: Receipt) -> Result<ReceiptId>;

    /// Returns the receipt stored under `id`.
    ///
    /// # Errors
    ///
    /// Returns [`crate::error::ReceiptError::NotFound`] if no receipt was
    /// stored under `id`, or a storage error if the backend fails to read.
    fn get(&self, id: &ReceiptId) -> Result<Receipt>;

    /// Returns the number of stored receipts.
    ///
    /// # Errors
    ///
    /// Returns an error if the storage backend fails to read.
    fn len(&self) -> Result<usize>;

    /// Returns `true` if no receipt has been stored yet.
    ///
    /// # Errors
    ///
    /// Returns an error if the storage backend fails to read.
    #[inline]
    fn is_empty(&self) -> Result<bool> {
        Ok(self.len()? == 0)
    }
}
