//! Integration tests for Linkdeck.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p linkdeck-integration-tests
//! ```
//!
//! # Test Categories
//!
//! - `bundle_query` - The bundle lookup endpoint, driven end-to-end
//!   through the assembled router with an in-memory store (no network,
//!   no database).
//! - `edit_session` - The client store against durable file storage,
//!   covering the edit-then-reload lifecycle.
