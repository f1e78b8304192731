//! HTTP route handlers for the bundle API.
//!
//! # Route Structure
//!
//! ```text
//! GET /user/{vanity_url}  - Bundles owned by the authenticated identity
//! ```
//!
//! Health endpoints (`/health`, `/health/ready`) are registered by the
//! binary, next to the resources they probe.

pub mod bundles;

use axum::{Router, routing::get};

use crate::state::AppState;

/// Create all routes for the API.
pub fn routes() -> Router<AppState> {
    Router::new().route("/user/{vanity_url}", get(bundles::for_user))
}
