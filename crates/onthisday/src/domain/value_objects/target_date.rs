//! TargetDate and SearchWindow - The calendar day a run looks back on

use chrono::{DateTime, Datelike, NaiveDate, NaiveTime, SecondsFormat, TimeDelta, Utc};

/// Hours ahead of UTC of the first timezone to start a day (UTC+14)
const EARLIEST_ZONE_HOURS: i64 = 14;
/// Hours behind UTC of the last timezone to finish a day (UTC-12)
const LATEST_ZONE_HOURS: i64 = 12;

/// Month and day of the run, independent of year
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TargetDate {
    pub month: u32,
    pub day: u32,
}

impl TargetDate {
    pub fn new(month: u32, day: u32) -> Self {
        Self { month, day }
    }

    /// The same month/day in `year`, or `None` if that year has no such day (29 Feb)
    pub fn in_year(&self, year: i32) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(year, self.month, self.day)
    }
}

impl From<NaiveDate> for TargetDate {
    fn from(date: NaiveDate) -> Self {
        Self::new(date.month(), date.day())
    }
}

impl std::fmt::Display for TargetDate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:02}-{:02}", self.month, self.day)
    }
}

/// Capture-time window covering a calendar day in every timezone
///
/// Server search is timezone-naive, so the window spans from the moment the
/// day starts at UTC+14 to the moment it ends at UTC-12. Results must then
/// be narrowed with [`crate::retain_day`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchWindow {
    pub taken_after: DateTime<Utc>,
    pub taken_before: DateTime<Utc>,
}

impl SearchWindow {
    pub fn for_day(date: NaiveDate) -> Self {
        let midnight = date.and_time(NaiveTime::MIN).and_utc();
        let taken_after = midnight - TimeDelta::hours(EARLIEST_ZONE_HOURS);
        let taken_before = midnight + TimeDelta::days(1) + TimeDelta::hours(LATEST_ZONE_HOURS)
            - TimeDelta::nanoseconds(1);

        Self {
            taken_after,
            taken_before,
        }
    }

    pub fn taken_after_rfc3339(&self) -> String {
        self.taken_after.to_rfc3339_opts(SecondsFormat::Nanos, true)
    }

    pub fn taken_before_rfc3339(&self) -> String {
        self.taken_before.to_rfc3339_opts(SecondsFormat::Nanos, true)
    }
}
