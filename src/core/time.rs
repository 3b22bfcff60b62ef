//! Relative and absolute rendering of record timestamps

use std::fmt::Write;

use crate::consts::{ABSOLUTE_TIME_FORMAT, INVALID_TIME};
use crate::utils::Timezone;

const MINUTE: i64 = 60;
const HOUR: i64 = 60 * MINUTE;
const DAY: i64 = 24 * HOUR;
const WEEK: i64 = 7 * DAY;

struct Magnitude {
    secs: i64,
    unit: char,
    /// Smaller units are left out once this unit's count reaches this
    min_break: i64,
}

const MAGNITUDES: [Magnitude; 4] = [
    Magnitude {
        secs: DAY,
        unit: 'd',
        min_break: 2,
    },
    Magnitude {
        secs: HOUR,
        unit: 'h',
        min_break: 12,
    },
    Magnitude {
        secs: MINUTE,
        unit: 'm',
        min_break: 30,
    },
    Magnitude {
        secs: 1,
        unit: 's',
        min_break: 60,
    },
];

/// Render an age in seconds as e.g. `2h 3m 1s ago`
pub(crate) fn format_relative(age: i64) -> String {
    if age < 1 {
        return "Just now".to_string();
    }

    let mut ret = String::new();
    let mut rest = age;
    for mag in &MAGNITUDES {
        let count = rest / mag.secs;
        rest %= mag.secs;
        if count > 0 {
            let _ = write!(ret, "{count}{} ", mag.unit);
            if count >= mag.min_break {
                break;
            }
        }
    }
    ret.push_str("ago");
    ret
}

/// Formats record timestamps relative to a fixed "now"
#[derive(Debug, Clone, Copy)]
pub(crate) struct TimeFormatter {
    now: i64,
    timezone: Timezone,
}

impl TimeFormatter {
    pub(crate) fn new(now: i64, timezone: Timezone) -> Self {
        Self { now, timezone }
    }

    pub(crate) fn format(&self, timestamp: i64) -> String {
        let age = self.now.saturating_sub(timestamp);
        if age <= WEEK {
            return format_relative(age);
        }
        self.timezone
            .format_unix(timestamp, ABSOLUTE_TIME_FORMAT)
            .unwrap_or_else(|| INVALID_TIME.to_string())
    }
}
