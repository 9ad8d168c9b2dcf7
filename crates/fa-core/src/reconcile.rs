//! Daily reconciliation: dedup, outer join, default-fill.

use std::collections::HashMap;

use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::duration::{DurationError, WorkedDuration, worked_duration};
use crate::scan::ScanEvent;
use crate::types::TokenId;

/// Sentinel in time for a token seen only on the departure side.
///
/// Together with [`DEFAULT_OUT_TIME`] this assumes a minimal stay that never
/// qualifies for overtime. A conservative default, not an observation.
pub const DEFAULT_IN_TIME: NaiveTime = match NaiveTime::from_hms_opt(12, 59, 0) {
    Some(t) => t,
    None => unreachable!(),
};

/// Sentinel out time for a token seen only on the arrival side.
pub const DEFAULT_OUT_TIME: NaiveTime = match NaiveTime::from_hms_opt(14, 0, 0) {
    Some(t) => t,
    None => unreachable!(),
};

/// One employee's reconciled attendance for one day.
///
/// At most one record exists per `(date, token)` pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttendanceRecord {
    pub date: NaiveDate,
    pub token: TokenId,
    pub in_time: NaiveTime,
    pub out_time: NaiveTime,
    pub worked: WorkedDuration,
}

/// Reconciliation errors.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ReconcileError {
    /// Neither candidate set had any events for the day.
    ///
    /// Callers must treat this as an explicitly empty day, not as a day with
    /// zero records.
    #[error("no scan candidates for {date}")]
    EmptyDay { date: NaiveDate },

    /// A paired record had an out time before its in time.
    #[error("invalid duration for token {token} on {date}: {source}")]
    Duration {
        date: NaiveDate,
        token: TokenId,
        source: DurationError,
    },
}

/// Sorts candidates by time and keeps one scan per token.
///
/// `keep_latest` selects between the arrival policy (first scan of the day
/// is authoritative) and the departure policy (last scan is).
fn dedup_by_token(candidates: &[ScanEvent], keep_latest: bool) -> HashMap<TokenId, NaiveTime> {
    let mut sorted: Vec<_> = candidates.to_vec();
    sorted.sort_by_key(|event| event.time);

    let mut by_token: HashMap<TokenId, NaiveTime> = HashMap::new();
    for event in sorted {
        match by_token.entry(event.token) {
            std::collections::hash_map::Entry::Vacant(slot) => {
                slot.insert(event.time);
            }
            std::collections::hash_map::Entry::Occupied(mut slot) => {
                if keep_latest {
                    slot.insert(event.time);
                }
            }
        }
    }
    by_token
}

/// Reconciles one day's candidates into attendance records.
///
/// Arrivals are deduplicated keeping the earliest scan per token, departures
/// keeping the latest. A full outer join on token then yields exactly one
/// record per token seen on either side, with the missing side filled from
/// [`DEFAULT_IN_TIME`] / [`DEFAULT_OUT_TIME`]. Records come back sorted by
/// `(in_time, out_time, token)`.
pub fn reconcile_day(
    date: NaiveDate,
    arrivals: &[ScanEvent],
    departures: &[ScanEvent],
) -> Result<Vec<AttendanceRecord>, ReconcileError> {
    if arrivals.is_empty() && departures.is_empty() {
        return Err(ReconcileError::EmptyDay { date });
    }

    let first_in = dedup_by_token(arrivals, false);
    let mut last_out = dedup_by_token(departures, true);

    let mut records = Vec::with_capacity(first_in.len() + last_out.len());
    for (token, in_time) in first_in {
        let out_time = last_out.remove(&token).unwrap_or_else(|| {
            tracing::debug!(%token, %date, "no departure scan, filling default out time");
            DEFAULT_OUT_TIME
        });
        records.push((token, in_time, out_time));
    }
    // Departure-only tokens survive the join with the sentinel in time.
    for (token, out_time) in last_out {
        tracing::debug!(%token, %date, "no arrival scan, filling default in time");
        records.push((token, DEFAULT_IN_TIME, out_time));
    }

    let mut reconciled = Vec::with_capacity(records.len());
    for (token, in_time, out_time) in records {
        let worked = worked_duration(in_time, out_time).map_err(|source| {
            ReconcileError::Duration {
                date,
                token: token.clone(),
                source,
            }
        })?;
        reconciled.push(AttendanceRecord {
            date,
            token,
            in_time,
            out_time,
            worked,
        });
    }

    reconciled.sort_by(|a, b| {
        (a.in_time, a.out_time, &a.token).cmp(&(b.in_time, b.out_time, &b.token))
    });
    Ok(reconciled)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day() -> NaiveDate {
        NaiveDate::from_ymd_opt(2021, 11, 1).unwrap()
    }

    fn scan(token: &str, hour: u32, min: u32) -> ScanEvent {
        ScanEvent {
            token: TokenId::new(token).unwrap(),
            date: day(),
            time: NaiveTime::from_hms_opt(hour, min, 0).unwrap(),
        }
    }

    fn t(hour: u32, min: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(hour, min, 0).unwrap()
    }

    #[test]
    fn arrival_dedup_keeps_earliest() {
        let arrivals = vec![scan("1111", 9, 15), scan("1111", 8, 30), scan("1111", 10, 0)];
        let departures = vec![scan("1111", 17, 0)];
        let records = reconcile_day(day(), &arrivals, &departures).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].in_time, t(8, 30));
    }

    #[test]
    fn departure_dedup_keeps_latest() {
        let arrivals = vec![scan("1111", 8, 0)];
        let departures = vec![scan("1111", 17, 0), scan("1111", 18, 30), scan("1111", 13, 5)];
        let records = reconcile_day(day(), &arrivals, &departures).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].out_time, t(18, 30));
    }

    #[test]
    fn outer_join_covers_every_token() {
        let arrivals = vec![scan("1111", 8, 0), scan("2222", 8, 30)];
        let departures = vec![scan("2222", 17, 0), scan("3333", 17, 30)];
        let records = reconcile_day(day(), &arrivals, &departures).unwrap();

        let tokens: Vec<_> = records.iter().map(|r| r.token.as_str()).collect();
        assert_eq!(records.len(), 3);
        for token in ["1111", "2222", "3333"] {
            assert_eq!(tokens.iter().filter(|t| **t == token).count(), 1);
        }
    }

    #[test]
    fn departure_only_gets_sentinel_in_time() {
        let records = reconcile_day(day(), &[], &[scan("1111", 17, 0)]).unwrap();
        assert_eq!(records[0].in_time, DEFAULT_IN_TIME);
        assert_eq!(records[0].out_time, t(17, 0));
    }

    #[test]
    fn arrival_only_gets_sentinel_out_time() {
        let records = reconcile_day(day(), &[scan("1111", 8, 0)], &[]).unwrap();
        assert_eq!(records[0].in_time, t(8, 0));
        assert_eq!(records[0].out_time, DEFAULT_OUT_TIME);
    }

    #[test]
    fn sentinel_pair_never_qualifies_for_overtime() {
        // A token seen only once on each sentinel side works 1h01m.
        let worked = crate::duration::worked_duration(DEFAULT_IN_TIME, DEFAULT_OUT_TIME).unwrap();
        assert_eq!(worked.total_minutes(), 61);
    }

    #[test]
    fn empty_day_is_an_error() {
        assert_eq!(
            reconcile_day(day(), &[], &[]),
            Err(ReconcileError::EmptyDay { date: day() })
        );
    }

    #[test]
    fn records_sorted_by_in_then_out_time() {
        let arrivals = vec![scan("3333", 9, 0), scan("1111", 8, 0), scan("2222", 8, 0)];
        let departures = vec![
            scan("3333", 17, 0),
            scan("1111", 18, 0),
            scan("2222", 17, 0),
        ];
        let records = reconcile_day(day(), &arrivals, &departures).unwrap();
        let order: Vec<_> = records.iter().map(|r| r.token.as_str()).collect();
        assert_eq!(order, vec!["2222", "1111", "3333"]);
    }

    #[test]
    fn underflow_pair_surfaces_duration_error() {
        // Arrival after the cutoff side's time is corrupt input, not a skip.
        let arrivals = vec![scan("1111", 12, 45)];
        let departures = vec![scan("1111", 12, 30)];
        // Classified oddly upstream, but the reconciler only sees the pair.
        let err = reconcile_day(day(), &arrivals, &departures).unwrap_err();
        assert!(matches!(err, ReconcileError::Duration { .. }));
    }
}
