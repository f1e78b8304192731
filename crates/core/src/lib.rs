//! Linkdeck Core - Shared types library.
//!
//! This crate provides common types used across all Linkdeck components:
//! - `api` - Bundle lookup service
//! - `client` - Reactive bundle store for editing sessions
//! - `cli` - Command-line tools for migrations and management
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no database access, no HTTP
//! clients. This keeps it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Link bundles, users, and the pseudonymous user key

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
