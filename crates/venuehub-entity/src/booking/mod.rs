//! Booking entities: the persisted booking row, its lifecycle status, and
//! the candidate/admitted records that flow through the admission pipeline.

pub mod candidate;
pub mod model;
pub mod status;

pub use candidate::{AdmittedBooking, CandidateBooking};
pub use model::Booking;
pub use status::BookingStatus;
