//! Worked-duration arithmetic over same-day time pairs.

use chrono::{NaiveTime, Timelike};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Duration calculation errors.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DurationError {
    /// The out time preceded the in time after the minute borrow.
    ///
    /// The historical behavior computed the borrow from minutes alone and
    /// let the hour delta go silently negative; this guard rejects that
    /// case instead.
    #[error("out time {out_time} is earlier than in time {in_time}")]
    Negative {
        in_time: NaiveTime,
        out_time: NaiveTime,
    },
}

/// A non-negative worked duration, minute precision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkedDuration {
    pub hours: u32,
    pub minutes: u32,
}

impl WorkedDuration {
    /// Total duration in minutes.
    #[must_use]
    pub const fn total_minutes(self) -> u32 {
        self.hours * 60 + self.minutes
    }
}

/// Computes the worked duration between two times on the same calendar day.
///
/// Minute underflow borrows from the hour delta: `08:45 → 17:30` is 8h45m,
/// not 9h-15m. Overnight shifts are unsupported; an out time earlier than
/// the in time is an error.
pub fn worked_duration(
    in_time: NaiveTime,
    out_time: NaiveTime,
) -> Result<WorkedDuration, DurationError> {
    let mut hours = i64::from(out_time.hour()) - i64::from(in_time.hour());
    let mut minutes = i64::from(out_time.minute()) - i64::from(in_time.minute());
    if minutes < 0 {
        minutes += 60;
        hours -= 1;
    }
    if hours < 0 {
        return Err(DurationError::Negative { in_time, out_time });
    }
    // Both deltas are non-negative and bounded by the day here.
    #[allow(clippy::cast_sign_loss, clippy::cast_possible_truncation)]
    Ok(WorkedDuration {
        hours: hours as u32,
        minutes: minutes as u32,
    })
}
