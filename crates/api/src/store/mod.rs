//! Bundle lookup against the persisted store.
//!
//! The store is a port: [`BundleStore`] describes the one query this
//! service needs, and adapters supply it from `PostgreSQL`
//! ([`PostgresBundleStore`]) or memory ([`MemoryBundleStore`], used by
//! tests and local demos). Server-side, bundle records are read-only -
//! the service never mutates them.

use std::time::Duration;

use async_trait::async_trait;
use secrecy::ExposeSecret;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use thiserror::Error;

use linkdeck_core::{LinkBundle, UserKey};

pub mod memory;
pub mod postgres;

pub use memory::MemoryBundleStore;
pub use postgres::PostgresBundleStore;

/// Errors raised by bundle store adapters.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// Database error from sqlx.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Data in the store is corrupted or invalid.
    #[error("data corruption: {0}")]
    DataCorruption(String),
}

/// Port for looking up the bundles owned by an identity.
///
/// Zero matches is an empty `Vec`, not an error - callers must be able to
/// tell "no bundles exist" apart from "lookup could not be performed".
#[async_trait]
pub trait BundleStore: Send + Sync {
    /// Find all bundles whose stored owner key and provider both match
    /// exactly (case-sensitive). Returns the complete result set.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError` when the store is unreachable or a stored
    /// record cannot be decoded.
    async fn find_bundles(
        &self,
        user_key: &UserKey,
        provider: &str,
    ) -> Result<Vec<LinkBundle>, RepositoryError>;
}

/// Create a `PostgreSQL` connection pool with sensible defaults.
///
/// # Arguments
///
/// * `database_url` - `PostgreSQL` connection string (wrapped in `SecretString`)
///
/// # Errors
///
/// Returns `sqlx::Error` if the connection cannot be established.
pub async fn create_pool(database_url: &secrecy::SecretString) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(10)
        .min_connections(2)
        .acquire_timeout(Duration::from_secs(10))
        .connect(database_url.expose_secret())
        .await
}
