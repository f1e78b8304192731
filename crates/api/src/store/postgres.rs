//! `PostgreSQL` adapter for the bundle store.

use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use linkdeck_core::{LinkBundle, UserKey};

use super::{BundleStore, RepositoryError};

/// Bundle store backed by the `link_bundle` table.
///
/// Each bundle's links are one JSONB document; the owner key and provider
/// are plain text columns matched exactly. Only the transport fields are
/// selected - internal columns never leave the adapter.
#[derive(Clone)]
pub struct PostgresBundleStore {
    pool: PgPool,
}

impl PostgresBundleStore {
    /// Create a new store over an existing connection pool.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct BundleRow {
    id: Uuid,
    vanity_url: String,
    description: String,
    links: serde_json::Value,
}

#[async_trait]
impl BundleStore for PostgresBundleStore {
    async fn find_bundles(
        &self,
        user_key: &UserKey,
        provider: &str,
    ) -> Result<Vec<LinkBundle>, RepositoryError> {
        let rows: Vec<BundleRow> = sqlx::query_as(
            r"
            SELECT id, vanity_url, description, links
            FROM link_bundle
            WHERE user_key = $1 AND provider = $2
            ORDER BY created_at ASC
            ",
        )
        .bind(user_key.as_str())
        .bind(provider)
        .fetch_all(&self.pool)
        .await?;

        let mut bundles = Vec::with_capacity(rows.len());
        for row in rows {
            let links = serde_json::from_value(row.links).map_err(|e| {
                RepositoryError::DataCorruption(format!(
                    "invalid links in bundle {}: {e}",
                    row.id
                ))
            })?;

            bundles.push(LinkBundle {
                id: row.id.to_string(),
                vanity_url: row.vanity_url,
                description: row.description,
                links,
            });
        }

        Ok(bundles)
    }
}
