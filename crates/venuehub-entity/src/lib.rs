//! # venuehub-entity
//!
//! Domain entity models for VenueHub. Every struct in this crate
//! represents a database table row or a domain value object. All entities
//! derive `Debug`, `Clone`, `Serialize`, `Deserialize`, and database
//! entities additionally derive `sqlx::FromRow`.

pub mod booking;
pub mod venue;
