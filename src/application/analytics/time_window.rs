//! Calendar arithmetic in the dashboard's local time zone.
//!
//! Every function takes its reference instant as an argument; nothing here
//! reads the system clock.

use chrono::{DateTime, Datelike, Days, Duration, Locale, Months, NaiveDateTime, TimeZone, Utc};
use chrono_tz::Tz;

#[derive(Debug, Clone, Copy)]
pub struct TimeWindows {
    tz: Tz,
    locale: Locale,
}

impl TimeWindows {
    pub fn new(tz: Tz, locale: Locale) -> Self {
        Self { tz, locale }
    }

    /// Local midnight of the day containing `instant`.
    pub fn start_of_day(&self, instant: DateTime<Utc>) -> DateTime<Utc> {
        let date = instant.with_timezone(&self.tz).date_naive();
        self.resolve_local(date.and_time(chrono::NaiveTime::MIN))
    }

    /// Shift by whole calendar days, keeping the local wall-clock time.
    pub fn add_days(&self, instant: DateTime<Utc>, days: i64) -> DateTime<Utc> {
        let local = instant.with_timezone(&self.tz).naive_local();
        let shifted = if days >= 0 {
            local.checked_add_days(Days::new(days.unsigned_abs()))
        } else {
            local.checked_sub_days(Days::new(days.unsigned_abs()))
        };
        self.resolve_or_saturate(shifted, days >= 0)
    }

    /// Shift by whole calendar months, keeping the local wall-clock time.
    ///
    /// The day of month is clamped to the last valid day of the target month,
    /// so March 31 minus one month is February 28 (or 29).
    pub fn add_months(&self, instant: DateTime<Utc>, months: i32) -> DateTime<Utc> {
        let local = instant.with_timezone(&self.tz).naive_local();
        let shifted = if months >= 0 {
            local.checked_add_months(Months::new(months.unsigned_abs()))
        } else {
            local.checked_sub_months(Months::new(months.unsigned_abs()))
        };
        self.resolve_or_saturate(shifted, months >= 0)
    }

    /// `YYYY-MM` of the local month containing `instant`.
    pub fn month_key(&self, instant: DateTime<Utc>) -> String {
        let local = instant.with_timezone(&self.tz);
        format!("{:04}-{:02}", local.year(), local.month())
    }

    /// Full month name in the configured locale.
    pub fn month_label(&self, instant: DateTime<Utc>) -> String {
        instant
            .with_timezone(&self.tz)
            .format_localized("%B", self.locale)
            .to_string()
    }

    fn resolve_or_saturate(&self, local: Option<NaiveDateTime>, forward: bool) -> DateTime<Utc> {
        match local {
            Some(local) => self.resolve_local(local),
            None if forward => DateTime::<Utc>::MAX_UTC,
            None => DateTime::<Utc>::MIN_UTC,
        }
    }

    // Ambiguous wall-clock times (DST fall-back) take the earlier instant.
    // Times skipped by a DST gap move forward past the gap.
    fn resolve_local(&self, local: NaiveDateTime) -> DateTime<Utc> {
        if let Some(dt) = self.tz.from_local_datetime(&local).earliest() {
            return dt.with_timezone(&Utc);
        }
        let after_gap = local + Duration::hours(1);
        match self.tz.from_local_datetime(&after_gap).earliest() {
            Some(dt) => dt.with_timezone(&Utc),
            None => Utc.from_utc_datetime(&local),
        }
    }
}
