//! Observation date/time canonicalization.
//!
//! Survey sheets record dates as `M/D/YYYY` and times as `H:M:S`; spotting
//! records carry a single `YYYY-MM-DDTHH:MM:SSZ` string.

use chrono::{NaiveDate, NaiveTime};

use crate::config::TimestampMode;
use crate::error::{TimestampError, TimestampResult};

/// Combine a month/day/year date and an hour:minute:second time.
///
/// In [`TimestampMode::Verbatim`] the month and day are zero-padded and the
/// time parts are copied unchanged, so `3/4/2021` at `9:5:1` becomes
/// `2021-03-04T9:5:1Z`. [`TimestampMode::Padded`] validates both values and
/// pads every component.
pub fn normalize_timestamp(date: &str, time: &str, mode: TimestampMode) -> TimestampResult<String> {
    let [month, day, year] = split3(date, '/')
        .ok_or_else(|| TimestampError::MalformedDate(date.to_string()))?;
    let [hour, minute, second] = split3(time, ':')
        .ok_or_else(|| TimestampError::MalformedTime(time.to_string()))?;

    match mode {
        TimestampMode::Verbatim => Ok(format!(
            "{}-{:0>2}-{:0>2}T{}:{}:{}Z",
            year, month, day, hour, minute, second
        )),
        TimestampMode::Padded => {
            let out_of_range = || TimestampError::OutOfRange {
                date: date.to_string(),
                time: time.to_string(),
            };
            let date = NaiveDate::from_ymd_opt(
                year.parse().map_err(|_| out_of_range())?,
                month.parse().map_err(|_| out_of_range())?,
                day.parse().map_err(|_| out_of_range())?,
            )
            .ok_or_else(out_of_range)?;
            let time = NaiveTime::from_hms_opt(
                hour.parse().map_err(|_| out_of_range())?,
                minute.parse().map_err(|_| out_of_range())?,
                second.parse().map_err(|_| out_of_range())?,
            )
            .ok_or_else(out_of_range)?;

            Ok(date.and_time(time).format("%Y-%m-%dT%H:%M:%SZ").to_string())
        }
    }
}

fn split3(value: &str, sep: char) -> Option<[&str; 3]> {
    let mut parts = value.split(sep);
    let first = parts.next()?;
    let second = parts.next()?;
    let third = parts.next()?;
    if parts.next().is_some() {
        return None;
    }
    Some([first, second, third])
}
