//! Newtype wrapper for receipt identifiers.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Opaque identifier assigned to a receipt when it is stored.
///
/// Identifiers are random UUID v4 strings. They are generated by the store
/// and never supplied by clients; any string may still be wrapped for a
/// lookup, which simply misses when it was never issued.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ReceiptId(String);

impl ReceiptId {
    /// Creates an identifier from an existing string.
    #[inline]
    #[must_use]
    pub const fn new(value: String) -> Self {
        Self(value)
    }

    /// Generates a fresh random identifier.
    #[inline]
    #[must_use]
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    /// Returns a reference to the inner string.
    #[inline]
    #[must_use]
    pub fn as_inner(&self) -> &str {
        &self.0
    }

    /// Consumes the wrapper and returns the inner string.
    #[inline]
    #[must_use]
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl core::fmt::Display for ReceiptId {
    #[inline]
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        core::fmt::Display::fmt(&self.0, f)
    }
}

impl From<String> for ReceiptId {
    #[inline]
    fn from(value: String) -> Self {
        Self(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn receipt_id_serde_roundtrip() {
        let id = ReceiptId::new("550e8400-e29b-41d4-a716-446655440000".to_owned());
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, r#""550e8400-e29b-41d4-a716-446655440000""#);
        let deserialized: ReceiptId = serde_json::from_str(&json).unwrap();
        assert_eq!(deserialized, id);
    }

    #[test]
    fn generated_ids_are_uuids() {
        let id = ReceiptId::generate();
        let parsed = Uuid::parse_str(id.as_inner()).unwrap();
        assert_eq!(parsed.get_version_num(), 4);
    }

    #[test]
    fn generated_ids_differ() {
        assert_ne!(ReceiptId::generate(), ReceiptId::generate());
    }

    #[test]
    fn receipt_id_display() {
        let id = ReceiptId::new("abc-123".to_owned());
        assert_eq!(id.to_string(), "abc-123");
    }

    #[test]
    fn receipt_id_from_and_into_inner() {
        let id: ReceiptId = "r-1".to_owned().into();
        assert_eq!(id.as_inner(), "r-1");
        assert_eq!(id.into_inner(), "r-1");
    }
}
