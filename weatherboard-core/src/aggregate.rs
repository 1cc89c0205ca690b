//! Reshaping of the raw 3-hour forecast into display structures.
//!
//! Two time conventions live side by side here and both are intentional:
//! - hour labels and the header date use the location's local time
//!   (`timestamp + utc_offset`);
//! - daily grouping and the "Today" check use the UTC date of the raw
//!   timestamp.

use chrono::{DateTime, Datelike, NaiveDate, Timelike, Utc};

use crate::model::{DailySummary, ForecastSample, HourlyDisplayItem};

/// Upper bound on items in the upcoming-hours strip.
pub const MAX_UPCOMING: usize = 12;

/// Sunday-first, matching `Weekday::num_days_from_sunday`.
pub const WEEKDAYS: [&str; 7] = ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"];

pub const TODAY_LABEL: &str = "Today";

pub(crate) fn unix_to_utc(ts: i64) -> DateTime<Utc> {
    DateTime::from_timestamp(ts, 0).unwrap_or_default()
}

/// UTC calendar date of a raw timestamp, with no offset applied.
pub fn day_key(ts: i64) -> NaiveDate {
    unix_to_utc(ts).date_naive()
}

/// Format an hour of day (0..=23) on a 12-hour clock.
pub fn hour_label(hour: u32) -> String {
    let suffix = if hour >= 12 { "PM" } else { "AM" };
    format!("{}:00 {suffix}", (hour + 11) % 12 + 1)
}

/// Local hour-of-day label for a timestamp at the given UTC offset.
pub fn local_hour_label(ts: i64, utc_offset: i64) -> String {
    hour_label(unix_to_utc(ts + utc_offset).hour())
}

/// Header line such as `2024.05.01 Wed`, in location-local time.
pub fn local_date_line(ts: i64, utc_offset: i64) -> String {
    let local = unix_to_utc(ts + utc_offset);
    let weekday = WEEKDAYS[local.weekday().num_days_from_sunday() as usize];
    format!("{} {weekday}", local.format("%Y.%m.%d"))
}

/// Earliest samples at or after `now`, at most [`MAX_UPCOMING`], in order.
pub fn upcoming_hours(
    now: i64,
    utc_offset: i64,
    samples: &[ForecastSample],
) -> Vec<HourlyDisplayItem> {
    samples
        .iter()
        .filter(|s| s.timestamp >= now)
        .take(MAX_UPCOMING)
        .map(|s| HourlyDisplayItem {
            timestamp: s.timestamp,
            label: local_hour_label(s.timestamp, utc_offset),
            temperature: s.temperature_c.round() as i64,
            condition: s.condition.clone(),
        })
        .collect()
}

/// One summary per distinct UTC date, in first-seen order.
///
/// The representative condition is the first sample of the day, not the
/// most frequent one.
pub fn daily_summaries(samples: &[ForecastSample], today: NaiveDate) -> Vec<DailySummary> {
    let mut groups: Vec<(NaiveDate, Vec<&ForecastSample>)> = Vec::new();

    for sample in samples {
        let key = day_key(sample.timestamp);
        match groups.iter_mut().find(|(k, _)| *k == key) {
            Some((_, members)) => members.push(sample),
            None => groups.push((key, vec![sample])),
        }
    }

    groups.into_iter().map(|(key, members)| summarize(key, &members, today)).collect()
}

fn summarize(key: NaiveDate, members: &[&ForecastSample], today: NaiveDate) -> DailySummary {
    let min_temp_c = members.iter().map(|s| s.temperature_c).fold(f64::INFINITY, f64::min);
    let max_temp_c = members.iter().map(|s| s.temperature_c).fold(f64::NEG_INFINITY, f64::max);

    let avg_pop = members.iter().map(|s| s.pop).sum::<f64>() / members.len() as f64;

    let label = if key == today {
        TODAY_LABEL.to_string()
    } else {
        WEEKDAYS[key.weekday().num_days_from_sunday() as usize].to_string()
    };

    DailySummary {
        label,
        min_temp_c,
        max_temp_c,
        pop_pct: pop_percent(avg_pop),
        condition: members.first().and_then(|s| s.condition.clone()),
    }
}

/// Probability (0..=1) to a whole percent, clamped to 0..=100.
pub fn pop_percent(pop: f64) -> u8 {
    if pop.is_nan() {
        return 0;
    }
    (pop * 100.0).round().clamp(0.0, 100.0) as u8
}
