use crate::errors::{AppError, AppResult};
use chrono::{Datelike, Duration, NaiveDate, Weekday};
use serde::Serialize;

/// Payroll weeks always start on this weekday.
pub const WEEK_START: Weekday = Weekday::Sat;

/// Number of daily entries generated for every week.
pub const DAYS_PER_WEEK: i64 = 7;

#[derive(Debug, Clone, Serialize)]
pub struct Week {
    pub id: String,
    pub site_id: String,
    pub start_date: NaiveDate,
    /// `false` locks the week: no roster changes, no ordinary submissions.
    pub admin_unlocked: bool,
}

impl Week {
    pub fn end_date(&self) -> NaiveDate {
        self.start_date + Duration::days(DAYS_PER_WEEK - 1)
    }

    pub fn is_editable(&self) -> bool {
        self.admin_unlocked
    }

    /// Reject any start date that is not a Saturday.
    pub fn check_start_date(date: NaiveDate) -> AppResult<()> {
        if date.weekday() != WEEK_START {
            return Err(AppError::validation(
                "start_date",
                format!(
                    "{} is a {:?}; the start date must be a Saturday",
                    date,
                    date.weekday()
                ),
            ));
        }
        Ok(())
    }

    /// The 7 calendar days covered by a week starting on `start`.
    pub fn days_from(start: NaiveDate) -> Vec<NaiveDate> {
        (0..DAYS_PER_WEEK)
            .map(|i| start + Duration::days(i))
            .collect()
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct DailyEntry {
    pub id: String,
    pub week_id: String,
    pub date: NaiveDate,
    pub admin_unlocked: bool,
    pub is_saved: bool,
}

impl DailyEntry {
    /// Editable if an admin reopened the day, otherwise only on the day
    /// itself and only until it has been saved.
    pub fn is_editable_on(&self, today: NaiveDate) -> bool {
        if self.admin_unlocked {
            return true;
        }
        self.date == today && !self.is_saved
    }
}
