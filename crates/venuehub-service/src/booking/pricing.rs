//! Booking price computation.

use rust_decimal::Decimal;

/// Price for a booking of `duration_minutes` at `base_hourly` per hour.
///
/// Bookings are billed in half-hour increments, rounded up: a 45-minute
/// booking pays for a full hour, a 30-minute booking pays half the hourly
/// rate. The result is rounded to the cent.
pub fn quote(duration_minutes: i64, base_hourly: Decimal) -> Decimal {
    let half_hours = (duration_minutes + 29) / 30;
    (Decimal::from(half_hours) * base_hourly / Decimal::from(2)).round_dp(2)
}
