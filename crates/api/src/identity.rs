//! Principal resolution.
//!
//! The platform auth layer forwards the authenticated identity in the
//! `x-ms-client-principal` header as base64-encoded JSON. This module
//! decodes that header and derives the pseudonymous [`UserKey`] used for
//! bundle lookups. It is a pure function over the header value - no I/O.

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use serde_json::{Map, Value};

use linkdeck_core::UserKey;

/// Request header carrying the serialized principal.
pub const PRINCIPAL_HEADER: &str = "x-ms-client-principal";

/// Identity facts extracted from a valid principal header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedPrincipal {
    /// Pseudonymous key derived from the principal's user details.
    pub user_key: UserKey,
    /// Provider that authenticated the user.
    pub provider: String,
}

/// Outcome of resolving the principal header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// Header missing.
    NoPrincipal,
    /// Header present but not decodable into a principal.
    InvalidPrincipal,
    /// Header present and valid.
    Resolved(ResolvedPrincipal),
}

/// Resolve a principal header value into a pseudonymous identity.
///
/// The header is standard base64 over a UTF-8 JSON object with fields
/// `identityProvider`, `userDetails`, `userId` and `userRoles`; only the
/// first two are consumed. Field names match case-insensitively because
/// the serialized casing varies by platform.
///
/// Any decode or parse failure is [`Resolution::InvalidPrincipal`] -
/// malformed input is an authentication failure, never a server error,
/// and no partial state is produced.
#[must_use]
pub fn resolve_principal(header: Option<&str>) -> Resolution {
    let Some(raw) = header else {
        return Resolution::NoPrincipal;
    };

    let Ok(decoded) = STANDARD.decode(raw) else {
        return Resolution::InvalidPrincipal;
    };

    let Ok(json) = std::str::from_utf8(&decoded) else {
        return Resolution::InvalidPrincipal;
    };

    let Ok(value) = serde_json::from_str::<Value>(json) else {
        return Resolution::InvalidPrincipal;
    };

    // A JSON `null` or non-object principal is invalid, not absent.
    let Some(object) = value.as_object() else {
        return Resolution::InvalidPrincipal;
    };

    let Some(provider) = field_str(object, "identityProvider") else {
        return Resolution::InvalidPrincipal;
    };
    let Some(user_details) = field_str(object, "userDetails") else {
        return Resolution::InvalidPrincipal;
    };

    Resolution::Resolved(ResolvedPrincipal {
        user_key: UserKey::derive(user_details),
        provider: provider.to_owned(),
    })
}

/// Case-insensitive string field lookup.
fn field_str<'a>(object: &'a Map<String, Value>, name: &str) -> Option<&'a str> {
    object
        .iter()
        .find(|(key, _)| key.eq_ignore_ascii_case(name))
        .and_then(|(_, value)| value.as_str())
}
