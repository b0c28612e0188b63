//! Concrete PostgreSQL repository implementations.

pub mod booking;
pub mod venue;

pub use booking::BookingRepository;
pub use venue::VenueRepository;
