//! Integration tests for the bundle query endpoint.
//!
//! These drive the assembled router through `tower::ServiceExt::oneshot`
//! with an in-memory store - no network, no database - and verify the
//! endpoint's outcome mapping: 401 for identity failures, 404 for zero
//! matches, 200 with exactly the transport fields, 500 for lookup
//! failures.

#![allow(clippy::unwrap_used)]

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use tower::ServiceExt;

use linkdeck_api::routes;
use linkdeck_api::state::AppState;
use linkdeck_api::store::{BundleStore, MemoryBundleStore, RepositoryError};
use linkdeck_core::{Link, LinkBundle, UserKey};

const PRINCIPAL_HEADER: &str = "x-ms-client-principal";

fn app(store: Arc<dyn BundleStore>) -> Router {
    routes::routes().with_state(AppState::new(store))
}

fn principal_header(provider: &str, user_details: &str) -> String {
    STANDARD.encode(format!(
        r#"{{"identityProvider":"{provider}","userDetails":"{user_details}","userId":"1","userRoles":["authenticated"]}}"#
    ))
}

async fn get_bundles(app: Router, header: Option<&str>) -> axum::response::Response {
    let mut request = Request::builder().uri("/user/my-list");
    if let Some(value) = header {
        request = request.header(PRINCIPAL_HEADER, value);
    }

    app.oneshot(request.body(Body::empty()).unwrap())
        .await
        .unwrap()
}

async fn body_json(response: axum::response::Response) -> serde_json::Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

/// A store whose lookup always fails, for exercising the 500 path.
struct FailingBundleStore;

#[async_trait::async_trait]
impl BundleStore for FailingBundleStore {
    async fn find_bundles(
        &self,
        _user_key: &UserKey,
        _provider: &str,
    ) -> Result<Vec<LinkBundle>, RepositoryError> {
        Err(RepositoryError::DataCorruption("store exploded".to_owned()))
    }
}

// =============================================================================
// Identity failures -> 401
// =============================================================================

#[tokio::test]
async fn test_missing_principal_is_unauthorized() {
    let response = get_bundles(app(Arc::new(MemoryBundleStore::new())), None).await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(body_json(response).await["error"], "Unauthorized");
}

#[tokio::test]
async fn test_invalid_base64_is_unauthorized_not_500() {
    let response = get_bundles(
        app(Arc::new(MemoryBundleStore::new())),
        Some("%%% not base64 %%%"),
    )
    .await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_invalid_json_is_unauthorized_not_500() {
    let header = STANDARD.encode("{this is not json");
    let response = get_bundles(app(Arc::new(MemoryBundleStore::new())), Some(&header)).await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_null_principal_is_unauthorized() {
    let header = STANDARD.encode("null");
    let response = get_bundles(app(Arc::new(MemoryBundleStore::new())), Some(&header)).await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(body_json(response).await["error"], "Unauthorized");
}

#[tokio::test]
async fn test_identity_failure_takes_precedence_over_lookup_failure() {
    // A broken store must not matter when the principal is invalid.
    let response = get_bundles(app(Arc::new(FailingBundleStore)), Some("not base64")).await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

// =============================================================================
// Lookup outcomes -> 404 / 200 / 500
// =============================================================================

#[tokio::test]
async fn test_no_bundles_is_not_found() {
    let header = principal_header("github", "ada@example.com");
    let response = get_bundles(app(Arc::new(MemoryBundleStore::new())), Some(&header)).await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_matching_bundles_are_returned_as_json() {
    let store = MemoryBundleStore::new();
    let key = UserKey::derive("ada@example.com");

    let mut bundle = LinkBundle::new("weekly-reads", "Things worth reading");
    bundle.links.push(Link::new(
        "Rust",
        "The language",
        "https://example.com/rust.png",
        "https://rust-lang.org",
    ));
    store.insert(&key, "github", bundle.clone());

    // Another identity's bundle must not leak into the result.
    store.insert(
        &UserKey::derive("grace@example.com"),
        "github",
        LinkBundle::new("other", ""),
    );
    // Same user details, different provider: not a match either.
    store.insert(&key, "twitter", LinkBundle::new("elsewhere", ""));

    let header = principal_header("github", "ada@example.com");
    let response = get_bundles(app(Arc::new(store)), Some(&header)).await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;

    let bundles = json.as_array().unwrap();
    assert_eq!(bundles.len(), 1);
    assert_eq!(bundles[0]["id"], bundle.id);
    assert_eq!(bundles[0]["vanityUrl"], "weekly-reads");
    assert_eq!(bundles[0]["description"], "Things worth reading");
    assert_eq!(bundles[0]["links"].as_array().unwrap().len(), 1);
    assert_eq!(bundles[0]["links"][0]["title"], "Rust");
}

#[tokio::test]
async fn test_response_carries_exactly_the_transport_fields() {
    let store = MemoryBundleStore::new();
    let key = UserKey::derive("ada@example.com");
    store.insert(&key, "github", LinkBundle::new("reads", ""));

    let header = principal_header("github", "ada@example.com");
    let response = get_bundles(app(Arc::new(store)), Some(&header)).await;
    let json = body_json(response).await;

    let mut keys: Vec<_> = json[0].as_object().unwrap().keys().cloned().collect();
    keys.sort();
    assert_eq!(keys, ["description", "id", "links", "vanityUrl"]);
}

#[tokio::test]
async fn test_lookup_failure_is_500_with_error_body() {
    let header = principal_header("github", "ada@example.com");
    let response = get_bundles(app(Arc::new(FailingBundleStore)), Some(&header)).await;

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let json = body_json(response).await;
    assert!(
        json["error"].as_str().unwrap().contains("store exploded"),
        "500 body should expose the underlying message: {json}"
    );
}
