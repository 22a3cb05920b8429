//
//  pagerduty-cli
//  util/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # Utility Module
//!
//! Helpers shared by the commands.
//!
//! ## Categories
//!
//! - **Time Utilities**: [`parse_date_phrase`], [`to_iso`], [`format_local_time`]
//! - **Flag Utilities**: [`split_dedup_and_flatten`], [`unescape_delimiter`]
//!
//! ## Example
//!
//! ```rust
//! use pagerduty_cli::util::{split_dedup_and_flatten, to_iso, parse_date_phrase};
//!
//! let since = parse_date_phrase("2026-01-15T10:00:00Z").unwrap();
//! assert_eq!(to_iso(since), "2026-01-15T10:00:00.000Z");
//!
//! let keys = split_dedup_and_flatten(&["a,b".to_string(), "b".to_string()]);
//! assert_eq!(keys, vec!["a", "b"]);
//! ```

use anyhow::{bail, Result};
use chrono::{
    DateTime, Duration, Local, Months, NaiveDate, NaiveDateTime, SecondsFormat, TimeZone, Utc,
};
use once_cell::sync::Lazy;
use regex::Regex;

static RELATIVE_PAST: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(?:(\d+)|an?)\s+(second|sec|minute|min|hour|hr|day|week|month|year)s?\s+ago$").unwrap()
});

static RELATIVE_FUTURE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^in\s+(?:(\d+)|an?)\s+(second|sec|minute|min|hour|hr|day|week|month|year)s?$").unwrap()
});

/// Parses a human date phrase relative to the current local time.
///
/// Accepted forms:
///
/// | Form | Example |
/// |------|---------|
/// | keywords | `now`, `today`, `yesterday`, `tomorrow` |
/// | relative | `30 days ago`, `an hour ago`, `in 2 weeks` |
/// | RFC 3339 | `2026-01-15T10:00:00Z` |
/// | local date | `2026-01-15` (midnight) |
/// | local date and time | `2026-01-15 10:00`, `2026-01-15T10:00:30` |
///
/// # Errors
///
/// Fails when the phrase matches none of these forms.
pub fn parse_date_phrase(phrase: &str) -> Result<DateTime<Utc>> {
    parse_date_phrase_at(phrase, Local::now())
}

/// Parses a human date phrase relative to `now`.
pub fn parse_date_phrase_at(phrase: &str, now: DateTime<Local>) -> Result<DateTime<Utc>> {
    let normalized = phrase.trim().to_lowercase();
    let normalized = normalized.split_whitespace().collect::<Vec<_>>().join(" ");

    let midnight = |days: i64| -> Result<DateTime<Utc>> {
        let date = now.date_naive() + Duration::days(days);
        local_to_utc(date.and_hms_opt(0, 0, 0).unwrap_or_default(), phrase)
    };

    match normalized.as_str() {
        "now" => return Ok(now.with_timezone(&Utc)),
        "today" => return midnight(0),
        "yesterday" => return midnight(-1),
        "tomorrow" => return midnight(1),
        _ => {}
    }

    if let Some(caps) = RELATIVE_PAST.captures(&normalized) {
        return shift(now, &caps, -1, phrase);
    }
    if let Some(caps) = RELATIVE_FUTURE.captures(&normalized) {
        return shift(now, &caps, 1, phrase);
    }

    let raw = phrase.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Ok(dt.with_timezone(&Utc));
    }
    for format in ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M", "%Y-%m-%dT%H:%M"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(raw, format) {
            return local_to_utc(naive, phrase);
        }
    }
    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return local_to_utc(date.and_hms_opt(0, 0, 0).unwrap_or_default(), phrase);
    }

    bail!("Could not understand the date '{}'", phrase)
}

fn shift(now: DateTime<Local>, caps: &regex::Captures<'_>, sign: i64, phrase: &str) -> Result<DateTime<Utc>> {
    let amount: i64 = match caps.get(1) {
        Some(m) => m.as_str().parse()?,
        None => 1,
    };
    let unit = caps.get(2).map(|m| m.as_str()).unwrap_or_default();

    let shifted = match unit {
        "month" | "year" => {
            let months = u32::try_from(if unit == "year" { amount * 12 } else { amount })?;
            if sign < 0 {
                now.checked_sub_months(Months::new(months))
            } else {
                now.checked_add_months(Months::new(months))
            }
        }
        _ => {
            let duration = match unit {
                "second" | "sec" => Duration::try_seconds(amount),
                "minute" | "min" => Duration::try_minutes(amount),
                "hour" | "hr" => Duration::try_hours(amount),
                "day" => Duration::try_days(amount),
                _ => Duration::try_weeks(amount),
            };
            duration.and_then(|d| now.checked_add_signed(d * sign as i32))
        }
    };

    match shifted {
        Some(dt) => Ok(dt.with_timezone(&Utc)),
        None => bail!("Date '{}' is out of range", phrase),
    }
}

fn local_to_utc(naive: NaiveDateTime, phrase: &str) -> Result<DateTime<Utc>> {
    match Local.from_local_datetime(&naive).earliest() {
        Some(dt) => Ok(dt.with_timezone(&Utc)),
        None => bail!("Date '{}' does not exist in the local time zone", phrase),
    }
}

/// Formats a timestamp the way the API expects it: UTC with milliseconds.
pub fn to_iso(dt: DateTime<Utc>) -> String {
    dt.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Renders an API timestamp in local time (`YYYY-MM-DD HH:MM:SS`).
///
/// Values that are not RFC 3339 timestamps are returned unchanged.
pub fn format_local_time(timestamp: &str) -> String {
    match DateTime::parse_from_rfc3339(timestamp) {
        Ok(dt) => dt.with_timezone(&Local).format("%Y-%m-%d %H:%M:%S").to_string(),
        Err(_) => timestamp.to_string(),
    }
}

/// Splits comma-separated flag values, dropping blanks and repeats.
///
/// Order of first appearance is kept.
pub fn split_dedup_and_flatten(values: &[String]) -> Vec<String> {
    let mut out: Vec<String> = Vec::new();
    for part in values.iter().flat_map(|v| v.split(',')).map(str::trim) {
        if !part.is_empty() && !out.iter().any(|seen| seen == part) {
            out.push(part.to_string());
        }
    }
    out
}

/// Turns the escape sequences `\n` and `\t` typed on a command line into
/// the characters they name.
pub fn unescape_delimiter(delimiter: &str) -> String {
    delimiter.replace("\\n", "\n").replace("\\t", "\t")
}
