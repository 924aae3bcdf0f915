//! Business services built on top of the catalog.

pub mod auth;
pub mod import;
