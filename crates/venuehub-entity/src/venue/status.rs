//! Venue approval status enumeration.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Approval status of a venue listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "venue_status", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum VenueStatus {
    /// Listing is being drafted by the host.
    Draft,
    /// Submitted and waiting for admin review.
    PendingApproval,
    /// Approved by an admin; the only bookable status.
    Approved,
    /// Rejected by an admin.
    Rejected,
}

impl VenueStatus {
    /// Check if guests may book a venue with this status.
    pub fn is_bookable(&self) -> bool {
        matches!(self, Self::Approved)
    }

    /// Return the status as a lowercase string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Draft => "draft",
            Self::PendingApproval => "pending_approval",
            Self::Approved => "approved",
            Self::Rejected => "rejected",
        }
    }
}

impl fmt::Display for VenueStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for VenueStatus {
    type Err = venuehub_core::AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "draft" => Ok(Self::Draft),
            "pending_approval" => Ok(Self::PendingApproval),
            "approved" => Ok(Self::Approved),
            "rejected" => Ok(Self::Rejected),
            _ => Err(venuehub_core::AppError::validation(format!(
                "Invalid venue status: '{s}'. Expected one of: draft, pending_approval, approved, rejected"
            ))),
        }
    }
}
