//! In-memory adapter for tests and local demos.

use std::collections::HashMap;
use std::sync::{Mutex, PoisonError};

use async_trait::async_trait;

use linkdeck_core::{LinkBundle, UserKey};

use super::{BundleStore, RepositoryError};

/// Bundle store backed by a `HashMap`, keyed by (user key, provider).
#[derive(Default)]
pub struct MemoryBundleStore {
    bundles: Mutex<HashMap<(String, String), Vec<LinkBundle>>>,
}

impl MemoryBundleStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a bundle owned by the given identity.
    pub fn insert(&self, user_key: &UserKey, provider: &str, bundle: LinkBundle) {
        self.bundles
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .entry((user_key.as_str().to_owned(), provider.to_owned()))
            .or_default()
            .push(bundle);
    }
}

#[async_trait]
impl BundleStore for MemoryBundleStore {
    async fn find_bundles(
        &self,
        user_key: &UserKey,
        provider: &str,
    ) -> Result<Vec<LinkBundle>, RepositoryError> {
        let bundles = self
            .bundles
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&(user_key.as_str().to_owned(), provider.to_owned()))
            .cloned()
            .unwrap_or_default();

        Ok(bundles)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_exact_match_on_both_key_and_provider() {
        let store = MemoryBundleStore::new();
        let key = UserKey::derive("ada@example.com");
        store.insert(&key, "github", LinkBundle::new("reads", ""));

        let hit = store.find_bundles(&key, "github").await.unwrap();
        assert_eq!(hit.len(), 1);

        // Same key, different provider: no match.
        let miss = store.find_bundles(&key, "twitter").await.unwrap();
        assert!(miss.is_empty());

        // Provider comparison is case-sensitive.
        let miss = store.find_bundles(&key, "GitHub").await.unwrap();
        assert!(miss.is_empty());
    }

    #[tokio::test]
    async fn test_empty_store_returns_empty_vec() {
        let store = MemoryBundleStore::new();
        let key = UserKey::derive("nobody@example.com");
        assert!(store.find_bundles(&key, "github").await.unwrap().is_empty());
    }
}
