//! Venue entities: the venue row, its weekly operating windows, blackout
//! periods, and the composed schedule view consumed by the availability
//! resolver.

pub mod blackout;
pub mod hours;
pub mod model;
pub mod schedule;
pub mod status;

pub use blackout::Blackout;
pub use hours::{WeeklyHours, WeeklyRule};
pub use model::Venue;
pub use schedule::VenueSchedule;
pub use status::VenueStatus;
