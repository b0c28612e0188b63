//! # venuehub-core
//!
//! Core crate for VenueHub. Contains configuration schemas, typed
//! identifiers, the shared half-open interval type, and the unified
//! error system.
//!
//! This crate has **no** internal dependencies on other VenueHub crates.

pub mod config;
pub mod error;
pub mod result;
pub mod types;

pub use error::AppError;
pub use result::AppResult;
