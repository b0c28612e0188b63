//! Weekly operating windows.

use chrono::NaiveTime;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use venuehub_core::types::VenueId;
use venuehub_core::{AppError, AppResult};

/// A recurring open/close window for one day of the week, wall-clock in the
/// venue's fixed operating timezone. Windows never span midnight.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct WeeklyRule {
    /// The venue this rule belongs to.
    pub venue_id: VenueId,
    /// Day of week, `0` = Sunday through `6` = Saturday.
    pub day_of_week: i16,
    /// Opening wall-clock time (inclusive).
    pub open_time: NaiveTime,
    /// Closing wall-clock time (exclusive for booking starts; a booking may
    /// end exactly at this time).
    pub close_time: NaiveTime,
}

impl WeeklyRule {
    /// Create a rule, validating the day index and window ordering.
    pub fn new(
        venue_id: VenueId,
        day_of_week: i16,
        open_time: NaiveTime,
        close_time: NaiveTime,
    ) -> AppResult<Self> {
        if !(0..=6).contains(&day_of_week) {
            return Err(AppError::validation(format!(
                "Day of week must be 0 (Sunday) through 6 (Saturday), got {day_of_week}"
            )));
        }
        if close_time <= open_time {
            return Err(AppError::validation(
                "Opening time must be strictly before closing time",
            ));
        }
        Ok(Self {
            venue_id,
            day_of_week,
            open_time,
            close_time,
        })
    }

    /// Whether `[start, end]` lies entirely inside this window.
    ///
    /// `end == close_time` is allowed: the window is half-open at close, so
    /// a booking may run right up to closing.
    pub fn covers(&self, start: NaiveTime, end: NaiveTime) -> bool {
        start >= self.open_time && end <= self.close_time
    }
}

/// The full set of weekly rules for one venue, at most one per day of week.
///
/// Uniqueness is enforced both here and by the `venue_hours` primary key;
/// a schedule with two windows on the same day is rejected rather than
/// silently merged.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WeeklyHours {
    rules: Vec<WeeklyRule>,
}

impl WeeklyHours {
    /// Build from a list of rules, rejecting duplicate days.
    pub fn from_rules(rules: Vec<WeeklyRule>) -> AppResult<Self> {
        let mut seen = [false; 7];
        for rule in &rules {
            let day = usize::try_from(rule.day_of_week).map_err(|_| {
                AppError::validation(format!("Day of week out of range: {}", rule.day_of_week))
            })?;
            if day > 6 {
                return Err(AppError::validation(format!(
                    "Day of week out of range: {day}"
                )));
            }
            if seen[day] {
                return Err(AppError::validation(format!(
                    "More than one weekly rule for day {day}"
                )));
            }
            seen[day] = true;
        }
        Ok(Self { rules })
    }

    /// Look up the rule for a day of week (`0` = Sunday).
    pub fn rule_for(&self, day_of_week: i16) -> Option<&WeeklyRule> {
        self.rules.iter().find(|r| r.day_of_week == day_of_week)
    }

    /// Whether any day has an operating window.
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// All rules, ordered as stored.
    pub fn rules(&self) -> &[WeeklyRule] {
        &self.rules
    }
}
