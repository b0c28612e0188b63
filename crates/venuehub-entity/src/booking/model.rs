//! Booking entity model.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use venuehub_core::types::{BookingId, GuestId, TimeInterval, VenueId};

use crate::booking::status::BookingStatus;

/// A persisted booking.
///
/// Cancellation flips the status and stamps `cancelled_at`; the interval
/// itself is never rewritten, so the historical record stays intact for
/// audit.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Booking {
    /// Unique booking identifier.
    pub id: BookingId,
    /// The booked venue.
    pub venue_id: VenueId,
    /// The guest who made the booking.
    pub guest_id: GuestId,
    /// Start of the booked interval (inclusive).
    pub start_at: DateTime<Utc>,
    /// End of the booked interval (exclusive).
    pub end_at: DateTime<Utc>,
    /// Number of guests attending.
    pub guest_count: i32,
    /// Total price computed at admission time.
    pub total_price: Decimal,
    /// Lifecycle status.
    pub status: BookingStatus,
    /// When the booking was cancelled, if it was.
    pub cancelled_at: Option<DateTime<Utc>>,
    /// When the booking was created.
    pub created_at: DateTime<Utc>,
    /// When the booking was last updated.
    pub updated_at: DateTime<Utc>,
}

impl Booking {
    /// Whether this booking participates in conflict checks.
    pub fn counts_for_conflicts(&self) -> bool {
        self.status.counts_for_conflicts()
    }

    /// Half-open overlap check against a query window.
    ///
    /// The stored interval is compared unbuffered; buffer expansion happens
    /// on the candidate side at admission time.
    pub fn overlaps_window(&self, window: &TimeInterval) -> bool {
        self.start_at < window.end() && self.end_at > window.start()
    }
}
