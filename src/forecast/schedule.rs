//! Forecast Timestamp Schedule
//!
//! Lays out where predicted rows land on the calendar: the first point
//! sits one median gap after the last history point, and every point after
//! that advances one business day.

use chrono::{DateTime, Datelike, Duration, Utc, Weekday};

/// Median spacing of consecutive history points. Falls back to one day
/// when the history has fewer than two points.
pub fn median_gap(times: &[DateTime<Utc>]) -> Duration {
    if times.len() < 2 {
        return Duration::days(1);
    }

    let mut gaps: Vec<Duration> = times.windows(2).map(|w| w[1] - w[0]).collect();
    gaps.sort();

    let mid = gaps.len() / 2;
    if gaps.len() % 2 == 1 {
        gaps[mid]
    } else {
        (gaps[mid - 1] + gaps[mid]) / 2
    }
}

fn is_business_day(t: &DateTime<Utc>) -> bool {
    !matches!(t.weekday(), Weekday::Sat | Weekday::Sun)
}

fn next_business_day(mut t: DateTime<Utc>) -> DateTime<Utc> {
    t = t + Duration::days(1);
    while !is_business_day(&t) {
        t = t + Duration::days(1);
    }
    t
}

/// Build `count` future timestamps after the last history point.
///
/// The median gap positions only the first point; every later point steps
/// forward one business day (Mon-Fri) regardless of the history's native
/// spacing. A first point landing on a weekend rolls forward to Monday
/// with its time of day preserved.
pub fn future_timestamps(history: &[DateTime<Utc>], count: usize) -> Vec<DateTime<Utc>> {
    let last = match history.last() {
        Some(t) => *t,
        None => return Vec::new(),
    };

    let gap = median_gap(history);
    let mut cursor = last + gap;
    while !is_business_day(&cursor) {
        cursor = cursor + Duration::days(1);
    }

    let mut out = Vec::with_capacity(count);
    while out.len() < count {
        out.push(cursor);
        cursor = next_business_day(cursor);
    }
    out
}
