//! Core types for Linkdeck.
//!
//! This module provides the domain types shared by the server and client.

pub mod bundle;
pub mod key;
pub mod user;

pub use bundle::{Link, LinkBundle};
pub use key::UserKey;
pub use user::User;
