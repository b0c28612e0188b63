//! Booking repository implementation.
//!
//! `insert_admitted` is the admission serialization point for the
//! PostgreSQL backend: a transaction takes an advisory lock keyed on the
//! venue, re-checks the buffered window, and only then inserts. The
//! `bookings_no_overlap` exclusion constraint backstops the re-check.

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::{debug, info};

use venuehub_core::AppResult;
use venuehub_core::error::{AppError, ErrorKind};
use venuehub_core::types::{BookingId, TimeInterval, VenueId};
use venuehub_entity::booking::{AdmittedBooking, Booking, BookingStatus};

use crate::store::BookingStore;

/// Repository for booking reads and the admission write path.
#[derive(Debug, Clone)]
pub struct BookingRepository {
    pool: PgPool,
}

impl BookingRepository {
    /// Create a new booking repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl BookingStore for BookingRepository {
    async fn find_overlapping(
        &self,
        venue_id: VenueId,
        window: TimeInterval,
    ) -> AppResult<Vec<Booking>> {
        sqlx::query_as::<_, Booking>(
            "SELECT * FROM bookings \
             WHERE venue_id = $1 AND status <> 'cancelled' \
               AND start_at < $3 AND end_at > $2 \
             ORDER BY start_at",
        )
        .bind(venue_id)
        .bind(window.start())
        .bind(window.end())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to find overlapping bookings", e)
        })
    }

    async fn insert_admitted(&self, admitted: &AdmittedBooking) -> AppResult<Booking> {
        let mut tx = self.pool.begin().await.map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to begin transaction", e)
        })?;

        // Serialize admission per venue for the rest of the transaction.
        sqlx::query("SELECT pg_advisory_xact_lock(hashtextextended($1::text, 0))")
            .bind(admitted.venue_id)
            .execute(&mut *tx)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to take venue lock", e)
            })?;

        // Re-check under the lock: a competing admission may have committed
        // between the availability check and now.
        let conflicts: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM bookings \
             WHERE venue_id = $1 AND status <> 'cancelled' \
               AND start_at < $3 AND end_at > $2",
        )
        .bind(admitted.venue_id)
        .bind(admitted.buffered_window.start())
        .bind(admitted.buffered_window.end())
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to re-check conflicts", e)
        })?;

        if conflicts > 0 {
            debug!(
                venue_id = %admitted.venue_id,
                window = %admitted.buffered_window,
                "Admission lost the race: competing booking committed first"
            );
            return Err(AppError::concurrency_conflict(
                "A competing booking was admitted first for this interval",
            ));
        }

        let booking = sqlx::query_as::<_, Booking>(
            "INSERT INTO bookings \
             (id, venue_id, guest_id, start_at, end_at, guest_count, total_price, status) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, 'confirmed') \
             RETURNING *",
        )
        .bind(BookingId::new())
        .bind(admitted.venue_id)
        .bind(admitted.guest_id)
        .bind(admitted.interval.start())
        .bind(admitted.interval.end())
        .bind(admitted.guest_count)
        .bind(admitted.total_price)
        .fetch_one(&mut *tx)
        .await
        .map_err(map_insert_error)?;

        tx.commit().await.map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to commit booking", e)
        })?;

        info!(
            booking_id = %booking.id,
            venue_id = %booking.venue_id,
            interval = %admitted.interval,
            "Booking committed"
        );
        Ok(booking)
    }

    async fn cancel(&self, booking_id: BookingId) -> AppResult<Booking> {
        let existing = sqlx::query_as::<_, Booking>("SELECT * FROM bookings WHERE id = $1")
            .bind(booking_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find booking", e))?
            .ok_or_else(|| AppError::not_found("Booking not found"))?;

        if existing.status == BookingStatus::Cancelled {
            return Err(AppError::invalid_state("Booking is already cancelled"));
        }

        let cancelled = sqlx::query_as::<_, Booking>(
            "UPDATE bookings \
             SET status = 'cancelled', cancelled_at = NOW(), updated_at = NOW() \
             WHERE id = $1 \
             RETURNING *",
        )
        .bind(booking_id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to cancel booking", e))?;

        info!(booking_id = %booking_id, "Booking cancelled");
        Ok(cancelled)
    }
}

/// Map insert failures, distinguishing race losers from plain database
/// errors. `23P01` is an exclusion-constraint violation, `40001` a
/// serialization failure; both mean a competing write won.
fn map_insert_error(e: sqlx::Error) -> AppError {
    let code = e
        .as_database_error()
        .and_then(|db| db.code())
        .map(|c| c.to_string());
    match code.as_deref() {
        Some("23P01") | Some("40001") => AppError::with_source(
            ErrorKind::ConcurrencyConflict,
            "A competing booking was admitted first for this interval",
            e,
        ),
        _ => AppError::with_source(ErrorKind::Database, "Failed to insert booking", e),
    }
}
