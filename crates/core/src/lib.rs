//! ShopDesk Core - Shared types library.
//!
//! Common types for the ShopDesk binaries:
//! - `console` - Web console for managing clients, orders, and settings
//! - `cli` - Command-line tools for migrations and diagnostics
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no database access, no HTTP
//! clients. All business data lives behind the remote ShopDesk API; this crate
//! defines the vocabulary both binaries speak.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for type-safe IDs, emails, statuses, and currencies

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
