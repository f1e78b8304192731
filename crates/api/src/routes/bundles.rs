//! Bundle lookup handlers.

use axum::Json;
use axum::extract::{Path, State};
use axum::http::HeaderMap;

use linkdeck_core::LinkBundle;

use crate::error::{AppError, Result};
use crate::identity::{self, Resolution};
use crate::state::AppState;

/// Return every bundle owned by the authenticated identity.
///
/// The identity comes from the `x-ms-client-principal` header, never from
/// the URL. Identity failure takes precedence over lookup failure: the
/// store is not consulted until the principal has resolved.
///
/// # Errors
///
/// - `Unauthorized` when the principal header is missing or malformed.
/// - `NotFound` when the identity owns no bundles.
/// - `Database` when the lookup itself fails.
pub async fn for_user(
    State(state): State<AppState>,
    // TODO: decide whether the lookup should also filter by vanity_url;
    // today the route parameter is accepted and ignored.
    Path(_vanity_url): Path<String>,
    headers: HeaderMap,
) -> Result<Json<Vec<LinkBundle>>> {
    let header = headers
        .get(identity::PRINCIPAL_HEADER)
        .and_then(|value| value.to_str().ok());

    let Resolution::Resolved(principal) = identity::resolve_principal(header) else {
        return Err(AppError::Unauthorized);
    };

    let bundles = state
        .store()
        .find_bundles(&principal.user_key, &principal.provider)
        .await?;

    if bundles.is_empty() {
        return Err(AppError::NotFound);
    }

    Ok(Json(bundles))
}
