use chrono::offset::LocalResult;
use chrono::{DateTime, Local, NaiveDateTime, TimeZone, Utc};
use chrono_tz::Tz;
use std::str::FromStr;

use crate::error::ReportError;

/// Timezone used for absolute timestamps and since bounds
#[derive(Debug, Clone, Copy)]
pub(crate) enum Timezone {
    Local,
    Named(Tz),
}

impl Timezone {
    pub(crate) fn parse(value: Option<&str>) -> Result<Self, ReportError> {
        let Some(raw) = value else {
            return Ok(Timezone::Local);
        };
        let trimmed = raw.trim();
        if trimmed.is_empty() || trimmed.eq_ignore_ascii_case("local") {
            return Ok(Timezone::Local);
        }
        if trimmed.eq_ignore_ascii_case("utc") || trimmed.eq_ignore_ascii_case("z") {
            return Ok(Timezone::Named(chrono_tz::UTC));
        }
        Tz::from_str(trimmed)
            .map(Timezone::Named)
            .map_err(|_| ReportError::InvalidTimezone {
                input: trimmed.to_string(),
            })
    }

    /// Render unix seconds in this timezone, `None` if out of chrono's range
    pub(crate) fn format_unix(self, secs: i64, format: &str) -> Option<String> {
        let utc = DateTime::<Utc>::from_timestamp(secs, 0)?;
        let rendered = match self {
            Timezone::Local => utc.with_timezone(&Local).format(format).to_string(),
            Timezone::Named(tz) => utc.with_timezone(&tz).format(format).to_string(),
        };
        Some(rendered)
    }

    /// Interpret a wall-clock time in this timezone as unix seconds.
    /// Ambiguous times resolve to the earlier instant.
    pub(crate) fn local_to_unix(self, naive: NaiveDateTime) -> Option<i64> {
        match self {
            Timezone::Local => earliest(Local.from_local_datetime(&naive)),
            Timezone::Named(tz) => earliest(tz.from_local_datetime(&naive)),
        }
    }
}

fn earliest<T: TimeZone>(result: LocalResult<DateTime<T>>) -> Option<i64> {
    result.earliest().map(|dt| dt.timestamp())
}
