//! Pseudonymous user key.

use core::fmt;

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

/// A one-way, deterministic hash of a principal's user-detail string.
///
/// Bundles are stored against this key instead of the raw identity, so the
/// store never holds an email address or username. Identical user details
/// always derive the identical key; the hash is not reversible.
///
/// ## Examples
///
/// ```
/// use linkdeck_core::UserKey;
///
/// let a = UserKey::derive("ada@example.com");
/// let b = UserKey::derive("ada@example.com");
/// assert_eq!(a, b);
///
/// let c = UserKey::derive("grace@example.com");
/// assert_ne!(a, c);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserKey(String);

impl UserKey {
    /// Derive the key for a user-detail string.
    ///
    /// SHA-256 over the raw bytes, lowercase hex encoded.
    #[must_use]
    pub fn derive(user_details: &str) -> Self {
        let mut hasher = Sha256::new();
        hasher.update(user_details.as_bytes());
        Self(hex::encode(hasher.finalize()))
    }

    /// Wrap an already-derived key read back from the store.
    #[must_use]
    pub fn from_hash(hash: impl Into<String>) -> Self {
        Self(hash.into())
    }

    /// Returns the key as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for UserKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for UserKey {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_derive_is_deterministic() {
        assert_eq!(
            UserKey::derive("user@example.com"),
            UserKey::derive("user@example.com")
        );
    }

    #[test]
    fn test_derive_known_vector() {
        // SHA-256("abc")
        assert_eq!(
            UserKey::derive("abc").as_str(),
            "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
        );
    }

    #[test]
    fn test_derive_differs_for_different_input() {
        assert_ne!(
            UserKey::derive("user@example.com"),
            UserKey::derive("User@example.com")
        );
    }

    #[test]
    fn test_from_hash_roundtrip() {
        let derived = UserKey::derive("user@example.com");
        let rewrapped = UserKey::from_hash(derived.as_str());
        assert_eq!(derived, rewrapped);
    }

    #[test]
    fn test_serde_is_transparent() {
        let key = UserKey::derive("abc");
        let json = serde_json::to_string(&key).unwrap();
        assert_eq!(
            json,
            "\"ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad\""
        );
    }
}
