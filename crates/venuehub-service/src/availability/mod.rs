//! Availability resolution.

pub mod resolver;

pub use resolver::{Availability, AvailabilityResolver, UnavailableReason};
