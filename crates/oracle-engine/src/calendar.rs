//! Local calendar arithmetic.
//!
//! All day and week boundaries are computed in a fixed UTC offset rather than
//! the server's local zone. Weeks are numbered per month, counted from the
//! month's first Thursday, which is when the weekly cycle normally turns over.

use chrono::{DateTime, Datelike, Duration, FixedOffset, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

/// A "month X, week Y" label for announcements and summaries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeekLabel {
    /// Calendar month (1-12).
    pub month: u32,
    /// Week number relative to the month's first Thursday.
    ///
    /// Dates before the first Thursday fall in week 0.
    pub week: i64,
}

impl std::fmt::Display for WeekLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Month {}, week {}", self.month, self.week)
    }
}

impl WeekLabel {
    /// Compute the label for a local date.
    pub fn for_date(date: NaiveDate) -> Self {
        let first_of_month = date - Duration::days(i64::from(date.day0()));
        let to_thursday = (3 + 7 - first_of_month.weekday().num_days_from_monday()) % 7;
        let first_thursday = first_of_month + Duration::days(i64::from(to_thursday));
        let days = (date - first_thursday).num_days();
        Self {
            month: date.month(),
            week: days.div_euclid(7) + 1,
        }
    }
}

/// Converts UTC instants into local dates at a fixed offset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LocalCalendar {
    offset: FixedOffset,
}

impl LocalCalendar {
    /// Create a calendar `hours` east of UTC.
    pub fn new(hours: i32) -> EngineResult<Self> {
        let offset = hours
            .checked_mul(3600)
            .and_then(FixedOffset::east_opt)
            .ok_or(EngineError::InvalidOffset(hours))?;
        Ok(Self { offset })
    }

    /// The underlying offset.
    pub fn offset(&self) -> FixedOffset {
        self.offset
    }

    /// Local wall time for an instant.
    pub fn local(&self, instant: DateTime<Utc>) -> NaiveDateTime {
        instant.with_timezone(&self.offset).naive_local()
    }

    /// Local calendar day for an instant.
    pub fn today(&self, instant: DateTime<Utc>) -> NaiveDate {
        self.local(instant).date()
    }

    /// Month/week label for an instant.
    pub fn week_label(&self, instant: DateTime<Utc>) -> WeekLabel {
        WeekLabel::for_date(self.today(instant))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn first_thursday_is_week_one() {
        // May 2024 starts on a Wednesday; the first Thursday is the 2nd.
        assert_eq!(WeekLabel::for_date(date(2024, 5, 2)).week, 1);
        assert_eq!(WeekLabel::for_date(date(2024, 5, 8)).week, 1);
        assert_eq!(WeekLabel::for_date(date(2024, 5, 9)).week, 2);
        assert_eq!(WeekLabel::for_date(date(2024, 5, 31)).week, 5);
    }

    #[test]
    fn days_before_first_thursday_are_week_zero() {
        // August 2024 starts on a Thursday, September on a Sunday.
        assert_eq!(WeekLabel::for_date(date(2024, 8, 1)).week, 1);
        let label = WeekLabel::for_date(date(2024, 9, 2));
        assert_eq!(label.month, 9);
        assert_eq!(label.week, 0);
    }

    #[test]
    fn label_display() {
        let label = WeekLabel { month: 3, week: 2 };
        assert_eq!(label.to_string(), "Month 3, week 2");
    }

    #[test]
    fn today_uses_offset() {
        let cal = LocalCalendar::new(9).unwrap();
        // 15:30 UTC is already 00:30 the next day at +9.
        let instant = Utc.with_ymd_and_hms(2024, 5, 1, 15, 30, 0).unwrap();
        assert_eq!(cal.today(instant), date(2024, 5, 2));

        let utc = LocalCalendar::new(0).unwrap();
        assert_eq!(utc.today(instant), date(2024, 5, 1));
    }

    #[test]
    fn week_label_crosses_month_with_offset() {
        let cal = LocalCalendar::new(9).unwrap();
        let instant = Utc.with_ymd_and_hms(2024, 4, 30, 20, 0, 0).unwrap();
        let label = cal.week_label(instant);
        assert_eq!(label.month, 5);
        assert_eq!(label.week, 0);
    }

    #[test]
    fn invalid_offsets_rejected() {
        assert!(LocalCalendar::new(24).is_err());
        assert!(LocalCalendar::new(-24).is_err());
        assert!(LocalCalendar::new(i32::MAX).is_err());
        assert!(LocalCalendar::new(-12).is_ok());
    }
}
