//! Booking admission orchestration.
//!
//! Validates static constraints, consults the availability resolver, and
//! commits through the storage layer's per-venue serialization point.
//! Admission is all-or-nothing: no partial booking is ever persisted.

use std::sync::Arc;

use tracing::{info, warn};

use venuehub_core::AppResult;
use venuehub_core::config::booking::BookingConfig;
use venuehub_core::error::{AppError, ErrorKind};
use venuehub_core::types::{BookingId, TimeInterval, VenueId};
use venuehub_database::store::{BookingStore, VenueStore};
use venuehub_entity::booking::{AdmittedBooking, Booking, CandidateBooking};
use venuehub_entity::venue::VenueSchedule;

use crate::availability::{Availability, AvailabilityResolver};
use crate::booking::pricing;

/// Orchestrates the booking admission flow.
#[derive(Clone)]
pub struct BookingAdmissionService {
    /// Venue schedule reads.
    venues: Arc<dyn VenueStore>,
    /// Booking reads and the serialized admission write.
    bookings: Arc<dyn BookingStore>,
    /// The leaf availability decision component.
    resolver: AvailabilityResolver,
    /// Engine policy.
    config: BookingConfig,
}

impl BookingAdmissionService {
    /// Creates a new admission service.
    pub fn new(
        venues: Arc<dyn VenueStore>,
        bookings: Arc<dyn BookingStore>,
        config: BookingConfig,
    ) -> Self {
        let resolver = AvailabilityResolver::new(bookings.clone());
        Self {
            venues,
            bookings,
            resolver,
            config,
        }
    }

    /// Answer "is this venue free for this interval?" without booking it.
    ///
    /// Fails `NotFound` for an unknown venue; every other outcome is an
    /// ordinary [`Availability`] verdict.
    pub async fn check_availability(
        &self,
        venue_id: VenueId,
        interval: TimeInterval,
    ) -> AppResult<Availability> {
        let schedule = self.fetch_schedule(venue_id).await?;
        self.resolver.is_available(&schedule, interval).await
    }

    /// Validate and commit a candidate booking.
    ///
    /// On a lost admission race the flow is re-run once (when configured):
    /// the retry observes the now-committed competitor and fails with
    /// `Conflict`, or succeeds if the race was spurious.
    pub async fn create_booking(&self, candidate: &CandidateBooking) -> AppResult<Booking> {
        match self.admit(candidate).await {
            Err(e) if e.kind == ErrorKind::ConcurrencyConflict
                && self.config.retry_on_concurrency_conflict =>
            {
                warn!(
                    venue_id = %candidate.venue_id,
                    "Admission lost a race, re-running the flow once"
                );
                self.admit(candidate).await
            }
            other => other,
        }
    }

    /// Cancel a booking, preserving its historical interval.
    pub async fn cancel_booking(&self, booking_id: BookingId) -> AppResult<Booking> {
        self.bookings.cancel(booking_id).await
    }

    /// One pass of the admission flow.
    async fn admit(&self, candidate: &CandidateBooking) -> AppResult<Booking> {
        let schedule = self.fetch_schedule(candidate.venue_id).await?;

        if !schedule.is_bookable() {
            return Err(AppError::invalid_state(format!(
                "Venue is not open for booking (status: {})",
                schedule.venue.status
            )));
        }

        let interval = candidate.interval()?;
        self.validate_duration(&schedule, &interval)?;
        self.validate_capacity(&schedule, candidate.guest_count)?;

        match self.resolver.is_available(&schedule, interval).await? {
            Availability::Available => {}
            Availability::Unavailable(reason) => {
                return Err(AppError::conflict(reason.to_string()));
            }
        }

        let total_price =
            pricing::quote(interval.duration_minutes(), schedule.venue.base_hourly_price);
        let admitted = AdmittedBooking {
            venue_id: candidate.venue_id,
            guest_id: candidate.guest_id,
            interval,
            buffered_window: interval.expand(i64::from(schedule.venue.buffer_minutes)),
            guest_count: candidate.guest_count,
            total_price,
        };

        let booking = self.bookings.insert_admitted(&admitted).await?;
        info!(
            booking_id = %booking.id,
            venue_id = %booking.venue_id,
            total_price = %booking.total_price,
            "Booking admitted"
        );
        Ok(booking)
    }

    async fn fetch_schedule(&self, venue_id: VenueId) -> AppResult<VenueSchedule> {
        self.venues
            .find_schedule(venue_id)
            .await?
            .ok_or_else(|| AppError::not_found("Venue not found"))
    }

    fn validate_duration(
        &self,
        schedule: &VenueSchedule,
        interval: &TimeInterval,
    ) -> AppResult<()> {
        let duration = interval.duration_minutes();
        let min = schedule
            .venue
            .min_booking_minutes
            .map(i64::from)
            .unwrap_or(self.config.default_min_booking_minutes);
        if duration < min {
            return Err(AppError::validation(format!(
                "Booking must be at least {min} minutes, requested {duration}"
            )));
        }
        if let Some(max) = schedule.venue.max_booking_minutes.map(i64::from) {
            if duration > max {
                return Err(AppError::validation(format!(
                    "Booking must be at most {max} minutes, requested {duration}"
                )));
            }
        }
        Ok(())
    }

    fn validate_capacity(&self, schedule: &VenueSchedule, guest_count: i32) -> AppResult<()> {
        if guest_count <= 0 {
            return Err(AppError::validation("Guest count must be positive"));
        }
        if guest_count > schedule.venue.capacity {
            return Err(AppError::validation(format!(
                "Guest count {guest_count} exceeds venue capacity {}",
                schedule.venue.capacity
            )));
        }
        Ok(())
    }
}
