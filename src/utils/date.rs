use chrono::{NaiveDate, NaiveDateTime, NaiveTime};

use crate::error::ReportError;
use crate::utils::Timezone;

/// Parse a since bound into unix seconds.
///
/// Accepts plain unix seconds, `YYYY-MM-DD`, `YYYYMMDD` and
/// `YYYY-MM-DDTHH:MM:SS` (or with a space). Dates and date-times are taken in
/// the given timezone.
pub(crate) fn parse_since(s: &str, timezone: Timezone) -> Result<i64, ReportError> {
    let trimmed = s.trim();
    let invalid = || ReportError::InvalidSince {
        input: s.to_string(),
    };

    // Try YYYYMMDD before unix seconds, both are all digits
    if trimmed.len() == 8
        && let Ok(d) = NaiveDate::parse_from_str(trimmed, "%Y%m%d")
    {
        return timezone.local_to_unix(d.and_time(NaiveTime::MIN)).ok_or_else(invalid);
    }
    if let Ok(secs) = trimmed.parse::<i64>() {
        return Ok(secs);
    }
    if let Ok(d) = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
        return timezone.local_to_unix(d.and_time(NaiveTime::MIN)).ok_or_else(invalid);
    }
    for format in ["%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M:%S"] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(trimmed, format) {
            return timezone.local_to_unix(dt).ok_or_else(invalid);
        }
    }
    Err(invalid())
}
