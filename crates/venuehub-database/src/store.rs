//! The narrow storage interface consumed by the booking engine.
//!
//! The engine depends only on these traits, never on a live object graph;
//! everything else the marketplace persists (hosts, images, amenities,
//! packages) stays behind the surrounding CRUD service.

use async_trait::async_trait;

use venuehub_core::AppResult;
use venuehub_core::types::{BookingId, TimeInterval, VenueId};
use venuehub_entity::booking::{AdmittedBooking, Booking};
use venuehub_entity::venue::VenueSchedule;

/// Read access to venue schedule data.
#[async_trait]
pub trait VenueStore: Send + Sync + 'static {
    /// Load the full schedule view for a venue: the venue row, its weekly
    /// operating windows, and its blackouts. `None` if the venue does not
    /// exist.
    async fn find_schedule(&self, venue_id: VenueId) -> AppResult<Option<VenueSchedule>>;
}

/// Read and write access to bookings.
///
/// `insert_admitted` is the admission serialization point: implementations
/// must take a per-venue lock, re-check the buffered window for conflicts
/// under that lock, and only then commit. Two concurrent admissions for
/// overlapping intervals on the same venue must never both succeed; the
/// loser fails with [`ErrorKind::ConcurrencyConflict`].
///
/// [`ErrorKind::ConcurrencyConflict`]: venuehub_core::error::ErrorKind
#[async_trait]
pub trait BookingStore: Send + Sync + 'static {
    /// All non-cancelled bookings for a venue whose stored interval
    /// overlaps `window` (half-open).
    async fn find_overlapping(
        &self,
        venue_id: VenueId,
        window: TimeInterval,
    ) -> AppResult<Vec<Booking>>;

    /// Commit a fully validated admission.
    ///
    /// The caller has already run the availability check; this method
    /// re-checks `admitted.buffered_window` under the venue lock because a
    /// competing admission may have committed in between.
    async fn insert_admitted(&self, admitted: &AdmittedBooking) -> AppResult<Booking>;

    /// Cancel a booking. The status flips and `cancelled_at` is stamped;
    /// the historical interval is preserved for audit.
    async fn cancel(&self, booking_id: BookingId) -> AppResult<Booking>;
}
