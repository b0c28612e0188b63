//! In-memory store using per-venue Tokio mutexes for single-node use.
//!
//! Backs the engine in tests and development without a PostgreSQL
//! instance. The admission serialization contract is the same as the
//! repository's: `insert_admitted` re-checks the buffered window while
//! holding the venue's lock.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use dashmap::DashMap;
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

use venuehub_core::AppResult;
use venuehub_core::error::AppError;
use venuehub_core::types::{BookingId, TimeInterval, VenueId};
use venuehub_entity::booking::{AdmittedBooking, Booking, BookingStatus};
use venuehub_entity::venue::{Blackout, Venue, VenueSchedule, WeeklyHours, WeeklyRule};

use crate::store::{BookingStore, VenueStore};

/// In-memory implementation of both storage traits.
///
/// Suitable for single-node deployments only.
#[derive(Debug, Default)]
pub struct InMemoryStore {
    /// Venue rows by id.
    venues: DashMap<VenueId, Venue>,
    /// Weekly rules by venue.
    rules: DashMap<VenueId, Vec<WeeklyRule>>,
    /// Blackouts by venue.
    blackouts: DashMap<VenueId, Vec<Blackout>>,
    /// Booking rows by id.
    bookings: DashMap<BookingId, Booking>,
    /// Per-venue admission locks.
    admission_locks: DashMap<VenueId, Arc<Mutex<()>>>,
}

impl InMemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a venue row.
    pub fn insert_venue(&self, venue: Venue) {
        self.venues.insert(venue.id, venue);
    }

    /// Seed a weekly rule, enforcing the one-rule-per-day constraint the
    /// database expresses as a primary key.
    pub fn insert_rule(&self, rule: WeeklyRule) -> AppResult<()> {
        let mut rules = self.rules.entry(rule.venue_id).or_default();
        if rules.iter().any(|r| r.day_of_week == rule.day_of_week) {
            return Err(AppError::validation(format!(
                "More than one weekly rule for day {}",
                rule.day_of_week
            )));
        }
        rules.push(rule);
        Ok(())
    }

    /// Seed a blackout period.
    pub fn insert_blackout(&self, blackout: Blackout) {
        self.blackouts
            .entry(blackout.venue_id)
            .or_default()
            .push(blackout);
    }

    /// Number of non-cancelled bookings held for a venue.
    pub fn active_booking_count(&self, venue_id: VenueId) -> usize {
        self.bookings
            .iter()
            .filter(|b| b.venue_id == venue_id && b.counts_for_conflicts())
            .count()
    }

    /// Snapshot of all bookings for a venue, in no particular order.
    pub fn bookings_for(&self, venue_id: VenueId) -> Vec<Booking> {
        self.bookings
            .iter()
            .filter(|b| b.venue_id == venue_id)
            .map(|b| b.value().clone())
            .collect()
    }

    fn venue_lock(&self, venue_id: VenueId) -> Arc<Mutex<()>> {
        self.admission_locks
            .entry(venue_id)
            .or_insert_with(|| Arc::new(Mutex::new(())))
            .clone()
    }

    fn overlapping(&self, venue_id: VenueId, window: &TimeInterval) -> Vec<Booking> {
        let mut hits: Vec<Booking> = self
            .bookings
            .iter()
            .filter(|b| {
                b.venue_id == venue_id && b.counts_for_conflicts() && b.overlaps_window(window)
            })
            .map(|b| b.value().clone())
            .collect();
        hits.sort_by_key(|b| b.start_at);
        hits
    }
}

#[async_trait]
impl VenueStore for InMemoryStore {
    async fn find_schedule(&self, venue_id: VenueId) -> AppResult<Option<VenueSchedule>> {
        let Some(venue) = self.venues.get(&venue_id).map(|v| v.value().clone()) else {
            return Ok(None);
        };

        let rules = self
            .rules
            .get(&venue_id)
            .map(|r| r.value().clone())
            .unwrap_or_default();
        let blackouts = self
            .blackouts
            .get(&venue_id)
            .map(|b| b.value().clone())
            .unwrap_or_default();

        let hours = WeeklyHours::from_rules(rules)?;
        Ok(Some(VenueSchedule::new(venue, hours, blackouts)))
    }
}

#[async_trait]
impl BookingStore for InMemoryStore {
    async fn find_overlapping(
        &self,
        venue_id: VenueId,
        window: TimeInterval,
    ) -> AppResult<Vec<Booking>> {
        Ok(self.overlapping(venue_id, &window))
    }

    async fn insert_admitted(&self, admitted: &AdmittedBooking) -> AppResult<Booking> {
        let lock = self.venue_lock(admitted.venue_id);
        let _guard = lock.lock().await;

        // Re-check under the venue lock: mirrors the advisory-lock re-check
        // in the PostgreSQL repository.
        if !self
            .overlapping(admitted.venue_id, &admitted.buffered_window)
            .is_empty()
        {
            debug!(
                venue_id = %admitted.venue_id,
                window = %admitted.buffered_window,
                "Admission lost the race: competing booking committed first"
            );
            return Err(AppError::concurrency_conflict(
                "A competing booking was admitted first for this interval",
            ));
        }

        let now = Utc::now();
        let booking = Booking {
            id: BookingId::new(),
            venue_id: admitted.venue_id,
            guest_id: admitted.guest_id,
            start_at: admitted.interval.start(),
            end_at: admitted.interval.end(),
            guest_count: admitted.guest_count,
            total_price: admitted.total_price,
            status: BookingStatus::Confirmed,
            cancelled_at: None,
            created_at: now,
            updated_at: now,
        };
        self.bookings.insert(booking.id, booking.clone());

        info!(
            booking_id = %booking.id,
            venue_id = %booking.venue_id,
            interval = %admitted.interval,
            "Booking committed"
        );
        Ok(booking)
    }

    async fn cancel(&self, booking_id: BookingId) -> AppResult<Booking> {
        let Some(mut entry) = self.bookings.get_mut(&booking_id) else {
            warn!(booking_id = %booking_id, "Attempted to cancel unknown booking");
            return Err(AppError::not_found("Booking not found"));
        };

        if entry.status == BookingStatus::Cancelled {
            return Err(AppError::invalid_state("Booking is already cancelled"));
        }

        let now = Utc::now();
        entry.status = BookingStatus::Cancelled;
        entry.cancelled_at = Some(now);
        entry.updated_at = now;

        info!(booking_id = %booking_id, "Booking cancelled");
        Ok(entry.clone())
    }
}
