//! # venuehub-service
//!
//! The booking engine's decision and orchestration layer.
//!
//! [`availability::AvailabilityResolver`] is the leaf decision component:
//! given a venue's schedule and a candidate interval it produces an
//! available/unavailable verdict with a specific reason and no side
//! effects. [`booking::BookingAdmissionService`] orchestrates validation,
//! calls the resolver, computes the price, and commits through the storage
//! layer's per-venue serialization point.
//!
//! Services follow constructor injection — all dependencies are provided
//! at construction time via `Arc` references.

pub mod availability;
pub mod booking;

pub use availability::{Availability, AvailabilityResolver, UnavailableReason};
pub use booking::BookingAdmissionService;
