//! Start/end times and progress of the programme on air

use chrono::{Local, NaiveDateTime};

use crate::error::{Result, StateError};

const SECONDS_PER_DAY: i64 = 86_400;

/// Layout of `startDateTime` once the UTC offset is removed
const START_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

/// Length of the `+0100` offset suffix
const OFFSET_SUFFIX_LEN: usize = 5;

/// Schedule of the programme currently on air
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlayingTime {
    /// Start time of day, `HH:MM`
    pub start: String,
    /// End time of day, `HH:MM`
    pub end: String,
    /// Elapsed share of the duration in percent. Not capped at 100.
    pub percent: u64,
}

/// Sum `HH:MM:SS` values and format the total as `HH:MM`
///
/// Seconds are dropped and the hour wraps at 24, so
/// `23:00:00 + 01:30:00` is `00:30`.
pub fn calc_time(times: &[&str]) -> Result<String> {
    let mut total_secs: u64 = 0;
    for time in times {
        total_secs = total_secs
            .checked_add(parse_hms(time)?)
            .ok_or_else(|| StateError::InvalidTimestamp(format!("'{}' overflows the total", time)))?;
    }

    let total_mins = total_secs / 60;
    let hours = (total_mins / 60) % 24;
    let minutes = total_mins % 60;
    Ok(format!("{:02}:{:02}", hours, minutes))
}

fn parse_hms(time: &str) -> Result<u64> {
    let invalid = || StateError::InvalidTimestamp(format!("'{}' is not HH:MM:SS", time));

    let parts = time
        .split(':')
        .map(|part| part.trim().parse::<u64>())
        .collect::<std::result::Result<Vec<_>, _>>()
        .map_err(|_| invalid())?;

    match parts.as_slice() {
        [h, m, s] => h
            .checked_mul(60)
            .and_then(|mins| mins.checked_add(*m))
            .and_then(|mins| mins.checked_mul(60))
            .and_then(|secs| secs.checked_add(*s))
            .ok_or_else(invalid),
        _ => Err(invalid()),
    }
}

/// Start, end and progress of a programme
///
/// `start_date_time` looks like `2017-03-24T00:00:00+0100`; the offset is
/// discarded and the remainder is compared with `now` as local wall-clock
/// time. Elapsed time counts only the seconds within the day, so a
/// programme starting after `now` appears to have run almost a full day.
/// A zero duration reports 0 percent.
pub fn playing_time(start_date_time: &str, duration_sec: u64, now: NaiveDateTime) -> Result<PlayingTime> {
    let start = parse_start(start_date_time)?;

    let start_of_day = start.time().format("%H:%M:%S").to_string();
    let end = calc_time(&[&start_of_day, &format_duration(duration_sec)])?;

    let elapsed = (now - start)
        .num_milliseconds()
        .div_euclid(1000)
        .rem_euclid(SECONDS_PER_DAY);
    let percent = if duration_sec == 0 {
        0
    } else {
        (elapsed as f64 / duration_sec as f64 * 100.0).round_ties_even() as u64
    };

    Ok(PlayingTime {
        start: start.time().format("%H:%M").to_string(),
        end,
        percent,
    })
}

/// [`playing_time`] against the local clock
pub fn playing_time_now(start_date_time: &str, duration_sec: u64) -> Result<PlayingTime> {
    playing_time(start_date_time, duration_sec, Local::now().naive_local())
}

fn parse_start(start_date_time: &str) -> Result<NaiveDateTime> {
    let trimmed = start_date_time
        .len()
        .checked_sub(OFFSET_SUFFIX_LEN)
        .and_then(|end| start_date_time.get(..end))
        .ok_or_else(|| StateError::InvalidTimestamp(start_date_time.to_string()))?;

    NaiveDateTime::parse_from_str(trimmed, START_FORMAT)
        .map_err(|e| StateError::InvalidTimestamp(format!("{}: {}", start_date_time, e)))
}

/// `HH:MM:SS` of a duration, wrapping at one day
fn format_duration(duration_sec: u64) -> String {
    let secs = duration_sec % SECONDS_PER_DAY as u64;
    format!("{:02}:{:02}:{:02}", secs / 3600, (secs / 60) % 60, secs % 60)
}
