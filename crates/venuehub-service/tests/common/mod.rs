//! Shared test helpers for the booking engine integration tests.

#![allow(dead_code)]

use std::sync::Arc;

use chrono::{DateTime, NaiveTime, TimeZone, Utc};
use rust_decimal::Decimal;

use venuehub_core::config::booking::BookingConfig;
use venuehub_core::config::logging::{LoggingConfig, init_tracing};
use venuehub_core::types::{BlackoutId, GuestId, HostId, VenueId};
use venuehub_database::InMemoryStore;
use venuehub_entity::booking::CandidateBooking;
use venuehub_entity::venue::{Blackout, Venue, VenueStatus, WeeklyRule};
use venuehub_service::BookingAdmissionService;

/// An in-memory engine: the store plus a service wired to it.
pub struct TestEngine {
    /// Direct store access for seeding and assertions.
    pub store: Arc<InMemoryStore>,
    /// The admission service under test.
    pub service: BookingAdmissionService,
}

/// Build an engine with default booking policy.
pub fn engine() -> TestEngine {
    init_tracing(&LoggingConfig::default());
    let store = Arc::new(InMemoryStore::new());
    let service =
        BookingAdmissionService::new(store.clone(), store.clone(), BookingConfig::default());
    TestEngine { store, service }
}

/// An approved venue in UTC with no buffer, capacity 40, at 100.00/hour.
pub fn approved_venue() -> Venue {
    let now = Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap();
    Venue {
        id: VenueId::new(),
        host_id: HostId::new(),
        name: "Harbor Loft".to_string(),
        status: VenueStatus::Approved,
        capacity: 40,
        min_booking_minutes: None,
        max_booking_minutes: None,
        buffer_minutes: 0,
        base_hourly_price: Decimal::new(10000, 2),
        utc_offset_minutes: 0,
        created_at: now,
        updated_at: now,
    }
}

/// Wall-clock time helper.
pub fn t(hour: u32, min: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(hour, min, 0).unwrap()
}

/// An instant on Monday 2026-03-02 (UTC).
pub fn monday(hour: u32, min: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 3, 2, hour, min, 0).unwrap()
}

/// A weekly rule; `day` uses 0 = Sunday through 6 = Saturday.
pub fn rule(venue_id: VenueId, day: i16, open: NaiveTime, close: NaiveTime) -> WeeklyRule {
    WeeklyRule::new(venue_id, day, open, close).expect("valid rule")
}

/// A blackout period.
pub fn blackout(
    venue_id: VenueId,
    start_at: DateTime<Utc>,
    end_at: DateTime<Utc>,
    reason: Option<&str>,
) -> Blackout {
    Blackout {
        id: BlackoutId::new(),
        venue_id,
        start_at,
        end_at,
        reason: reason.map(str::to_string),
        created_at: Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap(),
    }
}

/// A candidate booking for a fresh guest.
pub fn candidate(
    venue_id: VenueId,
    start_at: DateTime<Utc>,
    duration_minutes: i64,
    guest_count: i32,
) -> CandidateBooking {
    CandidateBooking {
        venue_id,
        guest_id: GuestId::new(),
        start_at,
        duration_minutes,
        guest_count,
    }
}

/// Seed a venue open Monday 09:00-17:00 and return it.
pub fn seed_monday_venue(engine: &TestEngine, venue: Venue) -> VenueId {
    let venue_id = venue.id;
    engine.store.insert_venue(venue);
    engine
        .store
        .insert_rule(rule(venue_id, 1, t(9, 0), t(17, 0)))
        .expect("seed rule");
    venue_id
}
