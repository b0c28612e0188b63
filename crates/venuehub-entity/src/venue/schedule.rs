//! Composed schedule view consumed by the availability resolver.

use chrono::FixedOffset;
use serde::{Deserialize, Serialize};

use crate::venue::blackout::Blackout;
use crate::venue::hours::{WeeklyHours, WeeklyRule};
use crate::venue::model::Venue;

/// Everything the availability resolver needs to know about one venue:
/// the venue row, its weekly operating windows, and its blackout periods.
///
/// This is a read-only aggregate assembled by the venue store; the engine
/// never mutates it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VenueSchedule {
    /// The venue row.
    pub venue: Venue,
    /// Weekly operating windows, at most one per day of week.
    pub hours: WeeklyHours,
    /// Blackout periods, ordered by start.
    pub blackouts: Vec<Blackout>,
}

impl VenueSchedule {
    /// Assemble a schedule view.
    pub fn new(venue: Venue, hours: WeeklyHours, blackouts: Vec<Blackout>) -> Self {
        Self {
            venue,
            hours,
            blackouts,
        }
    }

    /// Whether the venue's status permits booking at all.
    pub fn is_bookable(&self) -> bool {
        self.venue.status.is_bookable()
    }

    /// The venue's fixed operating timezone.
    pub fn timezone(&self) -> FixedOffset {
        self.venue.timezone()
    }

    /// The operating window for a day of week (`0` = Sunday), if any.
    pub fn rule_for(&self, day_of_week: i16) -> Option<&WeeklyRule> {
        self.hours.rule_for(day_of_week)
    }
}
