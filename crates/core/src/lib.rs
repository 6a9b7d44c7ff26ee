//! Bramble Core - Shared domain types.
//!
//! This crate provides the validated value types used across the Bramble
//! components:
//!
//! - `api` - REST backend (users, catalog, cart, orders)
//! - `cli` - Command-line tools for migrations and seeding
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no database access, no HTTP.
//! Every raw input shape the backend accepts has a type here with a fallible
//! constructor, so a value of one of these types is valid by construction.
//! Controllers decide the user-facing message for each failure; the types
//! only report what is wrong.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
