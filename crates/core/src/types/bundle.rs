//! Link bundle types.
//!
//! These are the transport and persistence shapes shared by the server and
//! the client editing session. The wire format is camelCase:
//! `{id, vanityUrl, description, links}`.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One bundle entry: a titled, described, illustrated link.
///
/// Links compare by value over all fields. The `id` is generated when the
/// link is constructed, so two structurally identical links can still be
/// told apart when one of them is removed or edited in place.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Link {
    /// Stable identifier, generated at construction.
    #[serde(default = "Uuid::new_v4")]
    pub id: Uuid,
    /// Display title.
    pub title: String,
    /// Short description shown under the title.
    pub description: String,
    /// Preview image URL.
    pub image: String,
    /// Target URL the link points at.
    pub url: String,
}

impl Link {
    /// Create a new link with a fresh identifier.
    #[must_use]
    pub fn new(
        title: impl Into<String>,
        description: impl Into<String>,
        image: impl Into<String>,
        url: impl Into<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            title: title.into(),
            description: description.into(),
            image: image.into(),
            url: url.into(),
        }
    }
}

/// A named, ordered collection of links owned by one user+provider pair.
///
/// Link order is significant - it determines display order and is mutable
/// through the client store's reorder operation. The vanity URL is chosen
/// by the user and intended to be unique per store, though uniqueness is
/// enforced at save time, not here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LinkBundle {
    /// Bundle identifier, generated at creation.
    pub id: String,
    /// Human-chosen short name the bundle is published under.
    pub vanity_url: String,
    /// Free-form bundle description.
    pub description: String,
    /// The ordered link sequence.
    #[serde(default)]
    pub links: Vec<Link>,
}

impl LinkBundle {
    /// Create an empty bundle with a fresh identifier.
    #[must_use]
    pub fn new(vanity_url: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            vanity_url: vanity_url.into(),
            description: description.into(),
            links: Vec::new(),
        }
    }
}

impl Default for LinkBundle {
    fn default() -> Self {
        Self::new("", "")
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_new_link_has_unique_id() {
        let a = Link::new("Rust", "The language", "https://example.com/rust.png", "https://rust-lang.org");
        let b = Link::new("Rust", "The language", "https://example.com/rust.png", "https://rust-lang.org");
        assert_ne!(a.id, b.id);
        assert_ne!(a, b);
    }

    #[test]
    fn test_bundle_serializes_camel_case() {
        let bundle = LinkBundle::new("weekly-reads", "Things worth reading");
        let json = serde_json::to_value(&bundle).unwrap();

        assert!(json.get("vanityUrl").is_some());
        assert!(json.get("vanity_url").is_none());
        assert_eq!(json["description"], "Things worth reading");
        assert!(json["links"].as_array().unwrap().is_empty());
    }

    #[test]
    fn test_bundle_roundtrip_preserves_link_order() {
        let mut bundle = LinkBundle::new("ordered", "");
        bundle.links.push(Link::new("a", "", "", "https://a.example"));
        bundle.links.push(Link::new("b", "", "", "https://b.example"));
        bundle.links.push(Link::new("c", "", "", "https://c.example"));

        let json = serde_json::to_string(&bundle).unwrap();
        let parsed: LinkBundle = serde_json::from_str(&json).unwrap();

        assert_eq!(parsed, bundle);
        let titles: Vec<_> = parsed.links.iter().map(|l| l.title.as_str()).collect();
        assert_eq!(titles, ["a", "b", "c"]);
    }

    #[test]
    fn test_link_without_id_gets_one_on_deserialize() {
        // Stored records written before links carried identifiers
        let json = r#"{"title":"t","description":"d","image":"i","url":"u"}"#;
        let link: Link = serde_json::from_str(json).unwrap();
        assert_eq!(link.title, "t");
        assert!(!link.id.is_nil());
    }

    #[test]
    fn test_default_bundle_is_empty_with_id() {
        let bundle = LinkBundle::default();
        assert!(!bundle.id.is_empty());
        assert!(bundle.vanity_url.is_empty());
        assert!(bundle.links.is_empty());
    }
}
