//! Candidate and admitted booking records.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use venuehub_core::AppResult;
use venuehub_core::types::{GuestId, TimeInterval, VenueId};

/// A booking request as it enters the admission pipeline, before any
/// validation has run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CandidateBooking {
    /// The venue to book.
    pub venue_id: VenueId,
    /// The requesting guest.
    pub guest_id: GuestId,
    /// Requested start instant.
    pub start_at: DateTime<Utc>,
    /// Requested duration in minutes.
    pub duration_minutes: i64,
    /// Number of guests attending.
    pub guest_count: i32,
}

impl CandidateBooking {
    /// The requested interval, validating that the duration is positive.
    pub fn interval(&self) -> AppResult<TimeInterval> {
        TimeInterval::from_start(self.start_at, self.duration_minutes)
    }
}

/// A candidate that has passed every admission check, carrying the computed
/// price and the buffer-expanded window the storage layer re-checks under
/// its per-venue lock before committing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdmittedBooking {
    /// The venue to book.
    pub venue_id: VenueId,
    /// The requesting guest.
    pub guest_id: GuestId,
    /// The interval that will be persisted.
    pub interval: TimeInterval,
    /// The interval expanded by the venue's buffer; any non-cancelled
    /// booking overlapping this window makes the admission a race loser.
    pub buffered_window: TimeInterval,
    /// Number of guests attending.
    pub guest_count: i32,
    /// Price computed from the venue's hourly rate.
    pub total_price: Decimal,
}
