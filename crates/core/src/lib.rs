//! Greenbasket Core - Shared types library.
//!
//! This crate provides common types used across all Greenbasket components:
//! - `storefront` - Customer-facing catalog, cart, and role-scoped dashboards
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no HTTP, no state containers.
//! This keeps it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for type-safe IDs, emails, roles, money, and
//!   order statuses

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
