//! Linkdeck Client - reactive bundle store.
//!
//! Holds the one bundle a user is currently editing, applies ordered edit
//! operations to it, persists it to local storage after every mutation,
//! and notifies subscribers of every change.
//!
//! # Architecture
//!
//! - [`store::BundleStore`] - the mutable cell and its edit operations.
//!   An explicitly constructed context object: create one per editing
//!   session and pass it to the views that need it.
//! - [`storage::LocalStorage`] - the durable key-value collaborator.
//!   Anything that can get and set a string can back the store: a hash
//!   map for tests, a file on disk for a desktop session, the browser's
//!   localStorage behind a binding.
//!
//! Mutations are synchronous; the persistence write they trigger runs on
//! a background writer task in mutation order and can be awaited through
//! the [`store::Persist`] handle each mutation returns, or dropped for
//! fire-and-forget.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod storage;
pub mod store;

pub use storage::{FileStorage, LocalStorage, MemoryStorage, StorageError};
pub use store::{BUNDLE_STORAGE_KEY, BundleStore, Persist, StoreError};
