//! Common types used throughout drive-index.

use serde::{Deserialize, Serialize};
use std::fmt;
use zeroize::Zeroize;

/// Identifier of an item in the upstream drive.
///
/// Only ASCII letters and digits are accepted, so an `ItemId` can be placed
/// into an upstream URL path segment without escaping.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct ItemId(String);

impl ItemId {
    /// Validate an untrusted identifier.
    ///
    /// # Errors
    /// - Returns `InvalidIdentifier` if `id` is empty or contains anything
    ///   other than `[A-Za-z0-9]`
    pub fn parse(id: impl Into<String>) -> crate::Result<Self> {
        let id = id.into();
        if !is_valid_item_id(&id) {
            return Err(crate::Error::InvalidIdentifier(id));
        }
        Ok(Self(id))
    }

    /// Get the inner string value.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl<'de> Deserialize<'de> for ItemId {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        Self::parse(raw).map_err(serde::de::Error::custom)
    }
}

/// Check an identifier against `^[A-Za-z0-9]+$`.
pub fn is_valid_item_id(id: &str) -> bool {
    !id.is_empty() && id.bytes().all(|b| b.is_ascii_alphanumeric())
}

/// Bearer credential for the upstream API.
///
/// The secret is wiped on drop and never shown by `Debug`.
#[derive(Clone, Zeroize)]
#[zeroize(drop)]
pub struct AccessToken(String);

impl AccessToken {
    /// Wrap a token string.
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    /// Get the raw token for placing into a header or query string.
    pub fn secret(&self) -> &str {
        &self.0
    }

    /// Check if empty.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "AccessToken([REDACTED])")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_item_id_accepts_alphanumeric() {
        let id = ItemId::parse("01ABCdef789").unwrap();
        assert_eq!(id.as_str(), "01ABCdef789");
    }

    #[test]
    fn test_item_id_rejects_empty() {
        assert!(ItemId::parse("").is_err());
    }

    #[test]
    fn test_item_id_rejects_punctuation() {
        for bad in ["abc!", "a b", "../etc", "abc%21", "id?x=1", "a/b", "x-y", "é1"] {
            let err = ItemId::parse(bad).unwrap_err();
            assert!(matches!(err, crate::Error::InvalidIdentifier(ref s) if s == bad));
        }
    }

    #[test]
    fn test_item_id_deserialize_validates() {
        let ok: ItemId = serde_json::from_str("\"A1\"").unwrap();
        assert_eq!(ok.as_str(), "A1");
        assert!(serde_json::from_str::<ItemId>("\"A!\"").is_err());
    }

    #[test]
    fn test_access_token_debug_redacted() {
        let token = AccessToken::new("super-secret");
        let shown = format!("{:?}", token);
        assert!(!shown.contains("super-secret"));
        assert_eq!(token.secret(), "super-secret");
    }

    proptest! {
        #[test]
        fn prop_alphanumeric_ids_accepted(id in "[A-Za-z0-9]{1,40}") {
            prop_assert!(ItemId::parse(id.clone()).is_ok());
        }

        #[test]
        fn prop_ids_with_other_chars_rejected(
            prefix in "[A-Za-z0-9]{0,10}",
            bad in "[^A-Za-z0-9]",
            suffix in "[A-Za-z0-9]{0,10}",
        ) {
            let id = format!("{}{}{}", prefix, bad, suffix);
            prop_assert!(ItemId::parse(id).is_err());
        }
    }
}
