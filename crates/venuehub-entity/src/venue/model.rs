//! Venue entity model.

use chrono::{DateTime, FixedOffset, Offset, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use venuehub_core::types::{HostId, VenueId};

use crate::venue::status::VenueStatus;

/// A bookable venue listing.
///
/// Schedule-relevant fields only; images, amenities, and packages live in
/// the surrounding CRUD service and never reach the booking engine.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Venue {
    /// Unique venue identifier.
    pub id: VenueId,
    /// The host who owns this listing.
    pub host_id: HostId,
    /// Display name.
    pub name: String,
    /// Approval status; only approved venues may be booked.
    pub status: VenueStatus,
    /// Maximum simultaneous guests.
    pub capacity: i32,
    /// Minimum booking duration in minutes, if the host set one.
    pub min_booking_minutes: Option<i32>,
    /// Maximum booking duration in minutes, if the host set one.
    pub max_booking_minutes: Option<i32>,
    /// Mandatory gap before and after every booking, in minutes.
    pub buffer_minutes: i32,
    /// Hourly price in the venue's local currency.
    pub base_hourly_price: Decimal,
    /// Fixed UTC offset of the venue's operating timezone, in minutes.
    ///
    /// Threaded explicitly through every local-time computation; the
    /// engine never consults ambient process timezone state.
    pub utc_offset_minutes: i32,
    /// When the listing was created.
    pub created_at: DateTime<Utc>,
    /// When the listing was last updated.
    pub updated_at: DateTime<Utc>,
}

impl Venue {
    /// The venue's fixed operating timezone.
    ///
    /// Falls back to UTC if the stored offset is out of chrono's accepted
    /// range (more than a day either way).
    pub fn timezone(&self) -> FixedOffset {
        FixedOffset::east_opt(self.utc_offset_minutes * 60).unwrap_or_else(|| Utc.fix())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn venue_with_offset(minutes: i32) -> Venue {
        Venue {
            id: VenueId::new(),
            host_id: HostId::new(),
            name: "Test Hall".to_string(),
            status: VenueStatus::Approved,
            capacity: 50,
            min_booking_minutes: None,
            max_booking_minutes: None,
            buffer_minutes: 0,
            base_hourly_price: Decimal::new(10000, 2),
            utc_offset_minutes: minutes,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_timezone_offset_applies_to_wall_clock() {
        let venue = venue_with_offset(-300);
        let utc = Utc.with_ymd_and_hms(2026, 3, 3, 1, 0, 0).unwrap();
        let local = utc.with_timezone(&venue.timezone());
        // 01:00 UTC on Tuesday is 20:00 Monday at UTC-5.
        assert_eq!(local.time().to_string(), "20:00:00");
    }

    #[test]
    fn test_out_of_range_offset_falls_back_to_utc() {
        let venue = venue_with_offset(100_000);
        assert_eq!(venue.timezone().local_minus_utc(), 0);
    }
}
