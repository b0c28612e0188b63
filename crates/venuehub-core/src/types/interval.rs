//! Half-open UTC time intervals and buffer arithmetic.
//!
//! Every overlap decision in the booking engine goes through this type so
//! that the half-open semantics are applied in exactly one place.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::error::AppError;
use crate::result::AppResult;

/// A half-open interval `[start, end)` in UTC with `start < end`.
///
/// Two intervals conflict iff `a.start < b.end && a.end > b.start`, so an
/// interval ending exactly where another starts does not conflict.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeInterval {
    start: DateTime<Utc>,
    end: DateTime<Utc>,
}

impl TimeInterval {
    /// Create an interval, rejecting `start >= end`.
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> AppResult<Self> {
        if end <= start {
            return Err(AppError::validation(
                "Interval start must be strictly before its end",
            ));
        }
        Ok(Self { start, end })
    }

    /// Create an interval from a start instant and a positive duration.
    pub fn from_start(start: DateTime<Utc>, duration_minutes: i64) -> AppResult<Self> {
        if duration_minutes <= 0 {
            return Err(AppError::validation("Duration must be a positive number of minutes"));
        }
        Self::new(start, start + Duration::minutes(duration_minutes))
    }

    /// The inclusive start instant.
    pub fn start(&self) -> DateTime<Utc> {
        self.start
    }

    /// The exclusive end instant.
    pub fn end(&self) -> DateTime<Utc> {
        self.end
    }

    /// Duration of the interval in whole minutes.
    pub fn duration_minutes(&self) -> i64 {
        (self.end - self.start).num_minutes()
    }

    /// Half-open overlap check.
    pub fn overlaps(&self, other: &TimeInterval) -> bool {
        self.start < other.end && self.end > other.start
    }

    /// Whether `instant` falls inside the interval (start inclusive,
    /// end exclusive).
    pub fn contains(&self, instant: DateTime<Utc>) -> bool {
        self.start <= instant && instant < self.end
    }

    /// Widen the interval by `minutes` on both ends.
    ///
    /// Used for buffer expansion at admission time; negative values are
    /// treated as zero.
    pub fn expand(&self, minutes: i64) -> TimeInterval {
        let pad = Duration::minutes(minutes.max(0));
        TimeInterval {
            start: self.start - pad,
            end: self.end + pad,
        }
    }
}

impl std::fmt::Display for TimeInterval {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "[{}, {})",
            self.start.to_rfc3339(),
            self.end.to_rfc3339()
        )
    }
}
