//! Calendar-day arithmetic at the business timezone.
//!
//! The business runs on Japan Standard Time. Day boundaries are computed by
//! shifting UTC by a fixed +9 hours; JST has no daylight saving, so the fixed
//! offset is exact.

use chrono::{Duration, NaiveDate, NaiveTime};

use crate::types::Timestamp;

/// Offset of the business timezone from UTC, in hours.
pub const JST_OFFSET_HOURS: i64 = 9;

fn offset() -> Duration {
    Duration::hours(JST_OFFSET_HOURS)
}

/// The JST calendar date containing `at`.
pub fn jst_date(at: Timestamp) -> NaiveDate {
    (at + offset()).date_naive()
}

/// Start of the JST day `date`, expressed in UTC.
pub fn day_start_utc(date: NaiveDate) -> Timestamp {
    date.and_time(NaiveTime::MIN).and_utc() - offset()
}

/// Start of "today" (the JST day containing `now`), expressed in UTC.
pub fn today_start_utc(now: Timestamp) -> Timestamp {
    day_start_utc(jst_date(now))
}

/// Half-open UTC range `[start, end)` covering the JST day containing `at`.
pub fn day_bounds_utc(at: Timestamp) -> (Timestamp, Timestamp) {
    let start = today_start_utc(at);
    (start, start + Duration::days(1))
}
