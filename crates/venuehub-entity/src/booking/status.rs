//! Booking lifecycle status enumeration.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Lifecycle status of a booking.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "booking_status", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum BookingStatus {
    /// Created but not yet confirmed (e.g. awaiting payment).
    Pending,
    /// Confirmed and occupying its interval.
    Confirmed,
    /// Cancelled; the interval is kept for audit but no longer blocks
    /// other bookings.
    Cancelled,
    /// The booked interval has passed.
    Completed,
}

impl BookingStatus {
    /// Whether a booking with this status participates in conflict checks.
    ///
    /// Everything except `Cancelled` blocks the interval: completed rows
    /// are in the past and harmless, pending rows hold their slot.
    pub fn counts_for_conflicts(&self) -> bool {
        !matches!(self, Self::Cancelled)
    }

    /// Check if the booking is in a terminal state.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Cancelled | Self::Completed)
    }

    /// Return the status as a lowercase string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Confirmed => "confirmed",
            Self::Cancelled => "cancelled",
            Self::Completed => "completed",
        }
    }
}

impl fmt::Display for BookingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for BookingStatus {
    type Err = venuehub_core::AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "pending" => Ok(Self::Pending),
            "confirmed" => Ok(Self::Confirmed),
            "cancelled" => Ok(Self::Cancelled),
            "completed" => Ok(Self::Completed),
            _ => Err(venuehub_core::AppError::validation(format!(
                "Invalid booking status: '{s}'. Expected one of: pending, confirmed, cancelled, completed"
            ))),
        }
    }
}
