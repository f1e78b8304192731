//! Signed-in user as known to the client.

use serde::{Deserialize, Serialize};

/// The currently signed-in identity.
///
/// Held transiently by the client store while a session is active. Unlike
/// the bundle, the user is never written to local storage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    /// Provider that authenticated the user (e.g. "github", "aad").
    pub identity_provider: String,
    /// Provider-specific detail string (e.g. an email or username).
    pub user_details: String,
}
