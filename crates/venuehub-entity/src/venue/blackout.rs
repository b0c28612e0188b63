//! Venue blackout periods.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use venuehub_core::types::{BlackoutId, TimeInterval, VenueId};

/// An absolute-time closed period during which a venue is unconditionally
/// unbookable, overriding its weekly operating windows.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Blackout {
    /// Unique blackout identifier.
    pub id: BlackoutId,
    /// The venue this blackout applies to.
    pub venue_id: VenueId,
    /// Start of the closed period (inclusive).
    pub start_at: DateTime<Utc>,
    /// End of the closed period (exclusive).
    pub end_at: DateTime<Utc>,
    /// Host-facing reason, surfaced to guests on rejection.
    pub reason: Option<String>,
    /// When the blackout was recorded.
    pub created_at: DateTime<Utc>,
}

impl Blackout {
    /// Half-open overlap check against a candidate interval.
    pub fn overlaps(&self, interval: &TimeInterval) -> bool {
        self.start_at < interval.end() && self.end_at > interval.start()
    }
}
