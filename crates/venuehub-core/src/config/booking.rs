//! Booking engine policy configuration.

use serde::{Deserialize, Serialize};

/// Policy knobs for the booking admission flow.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookingConfig {
    /// Minimum booking duration applied when a venue does not set its own.
    #[serde(default = "default_min_booking_minutes")]
    pub default_min_booking_minutes: i64,
    /// Whether a race-losing admission is re-run once automatically.
    /// The retry observes the committed competitor and fails with a
    /// conflict, or succeeds if the race was spurious.
    #[serde(default = "default_true")]
    pub retry_on_concurrency_conflict: bool,
}

impl Default for BookingConfig {
    fn default() -> Self {
        Self {
            default_min_booking_minutes: default_min_booking_minutes(),
            retry_on_concurrency_conflict: default_true(),
        }
    }
}

fn default_min_booking_minutes() -> i64 {
    30
}

fn default_true() -> bool {
    true
}
