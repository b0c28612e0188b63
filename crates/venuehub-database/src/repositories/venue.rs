//! Venue schedule repository implementation.

use async_trait::async_trait;
use sqlx::PgPool;

use venuehub_core::AppResult;
use venuehub_core::error::{AppError, ErrorKind};
use venuehub_core::types::VenueId;
use venuehub_entity::venue::{Blackout, Venue, VenueSchedule, WeeklyHours, WeeklyRule};

use crate::store::VenueStore;

/// Repository for venue schedule reads.
#[derive(Debug, Clone)]
pub struct VenueRepository {
    pool: PgPool,
}

impl VenueRepository {
    /// Create a new venue repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl VenueStore for VenueRepository {
    async fn find_schedule(&self, venue_id: VenueId) -> AppResult<Option<VenueSchedule>> {
        let venue = sqlx::query_as::<_, Venue>("SELECT * FROM venues WHERE id = $1")
            .bind(venue_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find venue", e))?;

        let Some(venue) = venue else {
            return Ok(None);
        };

        let rules = sqlx::query_as::<_, WeeklyRule>(
            "SELECT venue_id, day_of_week, open_time, close_time FROM venue_hours \
             WHERE venue_id = $1 ORDER BY day_of_week",
        )
        .bind(venue_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to load venue hours", e)
        })?;

        let blackouts = sqlx::query_as::<_, Blackout>(
            "SELECT * FROM venue_blackouts WHERE venue_id = $1 ORDER BY start_at",
        )
        .bind(venue_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to load venue blackouts", e)
        })?;

        // The venue_hours primary key already guarantees one rule per day;
        // from_rules re-validates so a corrupt read never reaches the
        // resolver.
        let hours = WeeklyHours::from_rules(rules)?;

        Ok(Some(VenueSchedule::new(venue, hours, blackouts)))
    }
}
