//! Integration tests for the booking admission flow over the in-memory
//! store.

mod common;

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use rust_decimal::Decimal;

use common::{approved_venue, blackout, candidate, engine, monday, rule, seed_monday_venue, t};
use venuehub_core::AppResult;
use venuehub_core::config::booking::BookingConfig;
use venuehub_core::error::{AppError, ErrorKind};
use venuehub_core::types::{BookingId, TimeInterval, VenueId};
use venuehub_database::InMemoryStore;
use venuehub_database::store::BookingStore;
use venuehub_entity::booking::{AdmittedBooking, Booking};
use venuehub_entity::venue::VenueStatus;
use venuehub_service::{Availability, BookingAdmissionService};

#[tokio::test]
async fn test_unknown_venue_is_not_found() {
    let engine = engine();
    let err = engine
        .service
        .create_booking(&candidate(VenueId::new(), monday(10, 0), 60, 2))
        .await
        .unwrap_err();
    assert_eq!(err.kind, ErrorKind::NotFound);

    let err = engine
        .service
        .check_availability(
            VenueId::new(),
            TimeInterval::from_start(monday(10, 0), 60).unwrap(),
        )
        .await
        .unwrap_err();
    assert_eq!(err.kind, ErrorKind::NotFound);
}

#[tokio::test]
async fn test_unapproved_venue_is_invalid_state() {
    let engine = engine();
    let mut venue = approved_venue();
    venue.status = VenueStatus::PendingApproval;
    let venue_id = seed_monday_venue(&engine, venue);

    let err = engine
        .service
        .create_booking(&candidate(venue_id, monday(10, 0), 60, 2))
        .await
        .unwrap_err();
    assert_eq!(err.kind, ErrorKind::InvalidState);

    // The pure availability query reports the same through its verdict.
    let verdict = engine
        .service
        .check_availability(venue_id, TimeInterval::from_start(monday(10, 0), 60).unwrap())
        .await
        .unwrap();
    assert!(!verdict.is_available());
}

#[tokio::test]
async fn test_duration_bounds() {
    let engine = engine();
    let venue_id = seed_monday_venue(&engine, approved_venue());

    // Below the default 30-minute minimum.
    let err = engine
        .service
        .create_booking(&candidate(venue_id, monday(10, 0), 15, 2))
        .await
        .unwrap_err();
    assert_eq!(err.kind, ErrorKind::Validation);

    // Exactly the default minimum is fine.
    engine
        .service
        .create_booking(&candidate(venue_id, monday(10, 0), 30, 2))
        .await
        .unwrap();
}

#[tokio::test]
async fn test_venue_specific_duration_bounds_override_default() {
    let engine = engine();
    let mut venue = approved_venue();
    venue.min_booking_minutes = Some(60);
    venue.max_booking_minutes = Some(120);
    let venue_id = seed_monday_venue(&engine, venue);

    let err = engine
        .service
        .create_booking(&candidate(venue_id, monday(10, 0), 45, 2))
        .await
        .unwrap_err();
    assert_eq!(err.kind, ErrorKind::Validation);

    let err = engine
        .service
        .create_booking(&candidate(venue_id, monday(10, 0), 150, 2))
        .await
        .unwrap_err();
    assert_eq!(err.kind, ErrorKind::Validation);

    engine
        .service
        .create_booking(&candidate(venue_id, monday(10, 0), 90, 2))
        .await
        .unwrap();
}

#[tokio::test]
async fn test_capacity_is_enforced() {
    let engine = engine();
    let mut venue = approved_venue();
    venue.capacity = 10;
    let venue_id = seed_monday_venue(&engine, venue);

    let err = engine
        .service
        .create_booking(&candidate(venue_id, monday(10, 0), 60, 11))
        .await
        .unwrap_err();
    assert_eq!(err.kind, ErrorKind::Validation);

    let err = engine
        .service
        .create_booking(&candidate(venue_id, monday(10, 0), 60, 0))
        .await
        .unwrap_err();
    assert_eq!(err.kind, ErrorKind::Validation);

    engine
        .service
        .create_booking(&candidate(venue_id, monday(10, 0), 60, 10))
        .await
        .unwrap();
}

#[tokio::test]
async fn test_day_without_operating_hours_is_a_conflict() {
    let engine = engine();
    let venue_id = seed_monday_venue(&engine, approved_venue());

    // Tuesday has no rule.
    let err = engine
        .service
        .create_booking(&candidate(venue_id, monday(10, 0) + chrono::Duration::days(1), 60, 2))
        .await
        .unwrap_err();
    assert_eq!(err.kind, ErrorKind::Conflict);
    assert!(err.message.contains("no operating hours"));
}

#[tokio::test]
async fn test_operating_window_boundaries() {
    let engine = engine();
    let venue_id = seed_monday_venue(&engine, approved_venue());

    // Starting exactly at open is available.
    engine
        .service
        .create_booking(&candidate(venue_id, monday(9, 0), 60, 2))
        .await
        .unwrap();

    // Ending exactly at close is available.
    engine
        .service
        .create_booking(&candidate(venue_id, monday(16, 0), 60, 2))
        .await
        .unwrap();

    // Starting one minute before open is not.
    let err = engine
        .service
        .create_booking(&candidate(venue_id, monday(8, 59), 60, 2))
        .await
        .unwrap_err();
    assert_eq!(err.kind, ErrorKind::Conflict);

    // Running past close is not.
    let err = engine
        .service
        .create_booking(&candidate(venue_id, monday(16, 30), 60, 2))
        .await
        .unwrap_err();
    assert_eq!(err.kind, ErrorKind::Conflict);
}

#[tokio::test]
async fn test_buffer_blocks_adjacent_slot() {
    let engine = engine();
    let mut venue = approved_venue();
    venue.buffer_minutes = 30;
    let venue_id = seed_monday_venue(&engine, venue);

    engine
        .service
        .create_booking(&candidate(venue_id, monday(10, 0), 60, 2))
        .await
        .unwrap();

    // 11:00-11:30 falls inside the 30-minute buffer after the booking.
    let err = engine
        .service
        .create_booking(&candidate(venue_id, monday(11, 0), 30, 2))
        .await
        .unwrap_err();
    assert_eq!(err.kind, ErrorKind::Conflict);

    // 11:30-12:00 clears the buffer exactly.
    engine
        .service
        .create_booking(&candidate(venue_id, monday(11, 30), 30, 2))
        .await
        .unwrap();
}

#[tokio::test]
async fn test_blackout_wins_over_operating_hours() {
    let engine = engine();
    let venue_id = seed_monday_venue(&engine, approved_venue());
    engine.store.insert_blackout(blackout(
        venue_id,
        monday(12, 0),
        monday(14, 0),
        Some("private event"),
    ));

    let err = engine
        .service
        .create_booking(&candidate(venue_id, monday(13, 0), 60, 2))
        .await
        .unwrap_err();
    assert_eq!(err.kind, ErrorKind::Conflict);
    assert!(err.message.contains("private event"));

    // Right after the blackout ends the slot is open again.
    engine
        .service
        .create_booking(&candidate(venue_id, monday(14, 0), 60, 2))
        .await
        .unwrap();
}

#[tokio::test]
async fn test_concrete_monday_scenario() {
    // Venue open Monday 09:00-17:00, buffer 30 minutes, no blackouts,
    // existing confirmed booking 10:00-12:00.
    let engine = engine();
    let mut venue = approved_venue();
    venue.buffer_minutes = 30;
    venue.base_hourly_price = Decimal::new(12000, 2);
    let venue_id = seed_monday_venue(&engine, venue);

    engine
        .service
        .create_booking(&candidate(venue_id, monday(10, 0), 120, 4))
        .await
        .unwrap();

    // 12:15-13:00 starts inside the buffer.
    let err = engine
        .service
        .create_booking(&candidate(venue_id, monday(12, 15), 45, 2))
        .await
        .unwrap_err();
    assert_eq!(err.kind, ErrorKind::Conflict);

    // 12:30-13:00 clears the buffer; half an hour bills at half the rate.
    let booking = engine
        .service
        .create_booking(&candidate(venue_id, monday(12, 30), 30, 2))
        .await
        .unwrap();
    assert_eq!(booking.total_price, Decimal::new(6000, 2));
}

#[tokio::test]
async fn test_price_rounds_up_to_half_hour_increments() {
    let engine = engine();
    let mut venue = approved_venue();
    venue.base_hourly_price = Decimal::new(8000, 2);
    let venue_id = seed_monday_venue(&engine, venue);

    // 100 minutes bills as four half-hours: 2h * 80.00 = 160.00.
    let booking = engine
        .service
        .create_booking(&candidate(venue_id, monday(10, 0), 100, 2))
        .await
        .unwrap();
    assert_eq!(booking.total_price, Decimal::new(16000, 2));
}

#[tokio::test]
async fn test_availability_check_is_idempotent() {
    let engine = engine();
    let venue_id = seed_monday_venue(&engine, approved_venue());
    engine
        .service
        .create_booking(&candidate(venue_id, monday(10, 0), 60, 2))
        .await
        .unwrap();

    let free = TimeInterval::from_start(monday(14, 0), 60).unwrap();
    let taken = TimeInterval::from_start(monday(10, 30), 60).unwrap();

    let first = engine.service.check_availability(venue_id, free).await.unwrap();
    let second = engine.service.check_availability(venue_id, free).await.unwrap();
    assert_eq!(first, second);
    assert!(first.is_available());

    let first = engine.service.check_availability(venue_id, taken).await.unwrap();
    let second = engine.service.check_availability(venue_id, taken).await.unwrap();
    assert_eq!(first, second);
    assert!(!first.is_available());

    // Checking availability never persists anything.
    assert_eq!(engine.store.active_booking_count(venue_id), 1);
}

#[tokio::test]
async fn test_cancelled_booking_frees_the_slot() {
    let engine = engine();
    let venue_id = seed_monday_venue(&engine, approved_venue());

    let first = engine
        .service
        .create_booking(&candidate(venue_id, monday(10, 0), 120, 2))
        .await
        .unwrap();
    engine.service.cancel_booking(first.id).await.unwrap();

    // The same interval admits again.
    engine
        .service
        .create_booking(&candidate(venue_id, monday(10, 0), 120, 2))
        .await
        .unwrap();

    // Cancelling twice is rejected, and unknown bookings are not found.
    let err = engine.service.cancel_booking(first.id).await.unwrap_err();
    assert_eq!(err.kind, ErrorKind::InvalidState);
    let err = engine
        .service
        .cancel_booking(BookingId::new())
        .await
        .unwrap_err();
    assert_eq!(err.kind, ErrorKind::NotFound);
}

#[tokio::test]
async fn test_timezone_offset_maps_utc_to_local_day() {
    // Venue at UTC-5, open Mondays 09:00-21:00 local. 01:00 UTC Tuesday
    // is 20:00 Monday local.
    let engine = engine();
    let mut venue = approved_venue();
    venue.utc_offset_minutes = -300;
    let venue_id = venue.id;
    engine.store.insert_venue(venue);
    engine
        .store
        .insert_rule(rule(venue_id, 1, t(9, 0), t(21, 0)))
        .unwrap();

    let tuesday_utc = monday(0, 0) + chrono::Duration::days(1) + chrono::Duration::hours(1);
    engine
        .service
        .create_booking(&candidate(venue_id, tuesday_utc, 60, 2))
        .await
        .unwrap();
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_admissions_admit_exactly_one() {
    let engine = engine();
    let venue_id = seed_monday_venue(&engine, approved_venue());
    let service = Arc::new(engine.service.clone());

    let a = candidate(venue_id, monday(10, 0), 60, 2);
    let b = candidate(venue_id, monday(10, 30), 60, 2);

    let svc_a = service.clone();
    let svc_b = service.clone();
    let (ra, rb) = tokio::join!(
        tokio::spawn(async move { svc_a.create_booking(&a).await }),
        tokio::spawn(async move { svc_b.create_booking(&b).await }),
    );
    let results = [ra.unwrap(), rb.unwrap()];

    let admitted = results.iter().filter(|r| r.is_ok()).count();
    assert_eq!(admitted, 1, "exactly one of two overlapping admissions may win");

    let loser = results.iter().find(|r| r.is_err()).unwrap().as_ref().unwrap_err();
    assert!(
        loser.kind == ErrorKind::Conflict || loser.kind == ErrorKind::ConcurrencyConflict,
        "unexpected loser kind: {:?}",
        loser.kind
    );
    assert_eq!(engine.store.active_booking_count(venue_id), 1);
}

/// Booking store that loses the admission race exactly once, then
/// delegates to the in-memory store.
struct RaceLosingStore {
    inner: Arc<InMemoryStore>,
    lost_once: AtomicBool,
}

#[async_trait]
impl BookingStore for RaceLosingStore {
    async fn find_overlapping(
        &self,
        venue_id: VenueId,
        window: TimeInterval,
    ) -> AppResult<Vec<Booking>> {
        self.inner.find_overlapping(venue_id, window).await
    }

    async fn insert_admitted(&self, admitted: &AdmittedBooking) -> AppResult<Booking> {
        if !self.lost_once.swap(true, Ordering::SeqCst) {
            return Err(AppError::concurrency_conflict(
                "A competing booking was admitted first for this interval",
            ));
        }
        self.inner.insert_admitted(admitted).await
    }

    async fn cancel(&self, booking_id: BookingId) -> AppResult<Booking> {
        self.inner.cancel(booking_id).await
    }
}

#[tokio::test]
async fn test_race_loser_is_retried_once_and_succeeds() {
    let store = Arc::new(InMemoryStore::new());
    let venue = approved_venue();
    let venue_id = venue.id;
    store.insert_venue(venue);
    store.insert_rule(rule(venue_id, 1, t(9, 0), t(17, 0))).unwrap();

    let racy = Arc::new(RaceLosingStore {
        inner: store.clone(),
        lost_once: AtomicBool::new(false),
    });
    let service =
        BookingAdmissionService::new(store.clone(), racy, BookingConfig::default());

    // The first insert loses a (spurious) race; the automatic retry wins.
    let booking = service
        .create_booking(&candidate(venue_id, monday(10, 0), 60, 2))
        .await
        .unwrap();
    assert_eq!(store.active_booking_count(venue_id), 1);
    assert_eq!(booking.venue_id, venue_id);
}

#[tokio::test]
async fn test_race_loser_surfaces_when_retry_disabled() {
    let store = Arc::new(InMemoryStore::new());
    let venue = approved_venue();
    let venue_id = venue.id;
    store.insert_venue(venue);
    store.insert_rule(rule(venue_id, 1, t(9, 0), t(17, 0))).unwrap();

    let racy = Arc::new(RaceLosingStore {
        inner: store.clone(),
        lost_once: AtomicBool::new(false),
    });
    let config = BookingConfig {
        retry_on_concurrency_conflict: false,
        ..BookingConfig::default()
    };
    let service = BookingAdmissionService::new(store.clone(), racy, config);

    let err = service
        .create_booking(&candidate(venue_id, monday(10, 0), 60, 2))
        .await
        .unwrap_err();
    assert_eq!(err.kind, ErrorKind::ConcurrencyConflict);
    assert!(err.is_retryable());
    assert_eq!(store.active_booking_count(venue_id), 0);
}

#[tokio::test]
async fn test_full_availability_verdicts_via_query() {
    let engine = engine();
    let venue_id = seed_monday_venue(&engine, approved_venue());

    let verdict = engine
        .service
        .check_availability(venue_id, TimeInterval::from_start(monday(10, 0), 60).unwrap())
        .await
        .unwrap();
    assert_eq!(verdict, Availability::Available);
}
