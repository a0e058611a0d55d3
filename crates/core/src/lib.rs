//! Bazaar Core - Shared types library.
//!
//! This crate provides common types used across all Bazaar components:
//! - `storefront` - Catalog, cart store, theme and UI controller
//! - `cli` - Terminal front end and static page renderer
//!
//! # Architecture
//!
//! The core crate contains only types and traits - no I/O, no storage access,
//! no rendering. This keeps it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for product ids and prices, plus the
//!   enums that travel over storage and the command line

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
