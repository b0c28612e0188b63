//! The availability decision function.
//!
//! Pure apart from the conflicting-bookings lookup it delegates to the
//! booking store; safe to call concurrently and repeatedly. Unavailability
//! is an ordinary verdict, never an error.

use std::fmt;
use std::sync::Arc;

use chrono::{Datelike, NaiveTime, Weekday};
use serde::{Deserialize, Serialize};
use tracing::debug;

use venuehub_core::AppResult;
use venuehub_core::types::TimeInterval;
use venuehub_database::store::BookingStore;
use venuehub_entity::venue::VenueSchedule;

/// Verdict of an availability check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Availability {
    /// The candidate interval may be booked.
    Available,
    /// The candidate interval may not be booked, with the specific reason.
    Unavailable(UnavailableReason),
}

impl Availability {
    /// Whether the verdict permits booking.
    pub fn is_available(&self) -> bool {
        matches!(self, Self::Available)
    }
}

/// Why a candidate interval cannot be booked.
///
/// Each variant renders to a distinct guest-facing message; callers
/// surface it verbatim on rejection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum UnavailableReason {
    /// The venue is not in the approved state.
    VenueNotApproved,
    /// The venue has no operating window on the requested day.
    NoOperatingHours {
        /// Full name of the local day of week.
        day: String,
    },
    /// The interval falls outside the day's operating window.
    OutsideOperatingHours {
        /// Opening wall-clock time.
        open: NaiveTime,
        /// Closing wall-clock time.
        close: NaiveTime,
    },
    /// The interval intersects a blackout period.
    Blackout {
        /// Host-provided reason, if any.
        reason: Option<String>,
    },
    /// The interval, expanded by the venue's buffer, overlaps an existing
    /// non-cancelled booking.
    ConflictingBooking,
}

impl fmt::Display for UnavailableReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::VenueNotApproved => write!(f, "venue is not approved for booking"),
            Self::NoOperatingHours { day } => {
                write!(f, "no operating hours configured for {day}")
            }
            Self::OutsideOperatingHours { open, close } => write!(
                f,
                "requested time falls outside operating hours ({open} to {close})"
            ),
            Self::Blackout { reason: Some(r) } => write!(f, "venue is closed: {r}"),
            Self::Blackout { reason: None } => {
                write!(f, "venue is closed for a blackout period")
            }
            Self::ConflictingBooking => write!(
                f,
                "the requested time conflicts with an existing booking or its buffer"
            ),
        }
    }
}

/// The leaf decision component of the booking engine.
#[derive(Clone)]
pub struct AvailabilityResolver {
    /// Conflicting-bookings lookup.
    bookings: Arc<dyn BookingStore>,
}

impl AvailabilityResolver {
    /// Creates a new resolver.
    pub fn new(bookings: Arc<dyn BookingStore>) -> Self {
        Self { bookings }
    }

    /// Decide whether `interval` may be booked on the venue described by
    /// `schedule`.
    ///
    /// Checks run in order and short-circuit on the first failure:
    /// approval status, operating-hours window (in the venue's fixed
    /// timezone), blackouts, then existing bookings within the
    /// buffer-expanded window.
    pub async fn is_available(
        &self,
        schedule: &VenueSchedule,
        interval: TimeInterval,
    ) -> AppResult<Availability> {
        if !schedule.is_bookable() {
            return Ok(Availability::Unavailable(UnavailableReason::VenueNotApproved));
        }

        if let Some(reason) = check_operating_hours(schedule, &interval) {
            return Ok(Availability::Unavailable(reason));
        }

        if let Some(reason) = check_blackouts(schedule, &interval) {
            return Ok(Availability::Unavailable(reason));
        }

        // The candidate is expanded by the venue buffer and checked against
        // the stored, unbuffered intervals. Applying the buffer on the
        // candidate side at every admission is what keeps the pairwise gap
        // invariant: each existing booking was itself buffer-checked when
        // it was admitted.
        let window = interval.expand(i64::from(schedule.venue.buffer_minutes));
        let conflicts = self
            .bookings
            .find_overlapping(schedule.venue.id, window)
            .await?;
        if !conflicts.is_empty() {
            debug!(
                venue_id = %schedule.venue.id,
                interval = %interval,
                conflicts = conflicts.len(),
                "Candidate interval conflicts with existing bookings"
            );
            return Ok(Availability::Unavailable(UnavailableReason::ConflictingBooking));
        }

        Ok(Availability::Available)
    }
}

/// Project the candidate onto the venue's fixed timezone and test it
/// against the weekly rule for its local start day.
///
/// The rule window is half-open at close: an interval ending exactly at
/// `close_time` is fine, one ending past it is not. Rule windows never
/// span midnight, so the local start and end must share a calendar day.
pub(crate) fn check_operating_hours(
    schedule: &VenueSchedule,
    interval: &TimeInterval,
) -> Option<UnavailableReason> {
    let tz = schedule.timezone();
    let local_start = interval.start().with_timezone(&tz);
    let local_end = interval.end().with_timezone(&tz);

    let day = local_start.weekday();
    let Some(rule) = schedule.rule_for(day.num_days_from_sunday() as i16) else {
        return Some(UnavailableReason::NoOperatingHours {
            day: day_name(day).to_string(),
        });
    };

    if local_start.date_naive() != local_end.date_naive() {
        return Some(UnavailableReason::OutsideOperatingHours {
            open: rule.open_time,
            close: rule.close_time,
        });
    }

    if !rule.covers(local_start.time(), local_end.time()) {
        return Some(UnavailableReason::OutsideOperatingHours {
            open: rule.open_time,
            close: rule.close_time,
        });
    }

    None
}

/// Test the candidate against every blackout, citing the first hit.
pub(crate) fn check_blackouts(
    schedule: &VenueSchedule,
    interval: &TimeInterval,
) -> Option<UnavailableReason> {
    schedule
        .blackouts
        .iter()
        .find(|b| b.overlaps(interval))
        .map(|b| UnavailableReason::Blackout {
            reason: b.reason.clone(),
        })
}

fn day_name(day: Weekday) -> &'static str {
    match day {
        Weekday::Mon => "Monday",
        Weekday::Tue => "Tuesday",
        Weekday::Wed => "Wednesday",
        Weekday::Thu => "Thursday",
        Weekday::Fri => "Friday",
        Weekday::Sat => "Saturday",
        Weekday::Sun => "Sunday",
    }
}
