//! Raw badge scan events and per-day candidate sets.

use std::collections::BTreeMap;

use chrono::{NaiveDate, NaiveTime, Timelike};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::types::TokenId;

/// Scans at or after this hour are departure candidates.
pub const ARRIVAL_CUTOFF_HOUR: u32 = 13;

/// A single raw badge scan. One per physical scan, never deduplicated here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScanEvent {
    /// The badge token that was scanned.
    pub token: TokenId,
    /// The calendar day of the scan.
    pub date: NaiveDate,
    /// Time of day of the scan, minute precision.
    pub time: NaiveTime,
}

/// Which candidate set a scan falls into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Bucket {
    /// Scanned before the cutoff hour.
    Arrival,
    /// Scanned at or after the cutoff hour.
    Departure,
}

impl Bucket {
    /// Classifies a time of day against the fixed cutoff.
    #[must_use]
    pub fn classify(time: NaiveTime) -> Self {
        if time.hour() < ARRIVAL_CUTOFF_HOUR {
            Self::Arrival
        } else {
            Self::Departure
        }
    }

    /// Lowercase label for logs and user-facing output.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Arrival => "arrival",
            Self::Departure => "departure",
        }
    }
}

impl std::fmt::Display for Bucket {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Error for an ingestion batch with no events.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("scan batch contained no events")]
pub struct EmptyBatchError;

/// Append-only candidate sets, keyed by date and partitioned by bucket.
///
/// Batches accumulate: recording the same day across multiple batches extends
/// the existing sequences. Deduplication is deliberately left to the
/// reconciler, which knows the earliest-in / latest-out policy.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CandidateLog {
    arrivals: BTreeMap<NaiveDate, Vec<ScanEvent>>,
    departures: BTreeMap<NaiveDate, Vec<ScanEvent>>,
}

impl CandidateLog {
    /// Creates an empty log.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Classifies and appends a single scan event.
    pub fn record(&mut self, event: ScanEvent) {
        let side = match Bucket::classify(event.time) {
            Bucket::Arrival => &mut self.arrivals,
            Bucket::Departure => &mut self.departures,
        };
        side.entry(event.date).or_default().push(event);
    }

    /// Classifies and appends a batch of scan events.
    ///
    /// The batch must be non-empty; callers with nothing to record should not
    /// call this at all.
    pub fn record_batch(
        &mut self,
        events: impl IntoIterator<Item = ScanEvent>,
    ) -> Result<usize, EmptyBatchError> {
        let mut count = 0;
        for event in events {
            self.record(event);
            count += 1;
        }
        if count == 0 {
            return Err(EmptyBatchError);
        }
        Ok(count)
    }

    /// Arrival candidates for a day, in recorded order.
    #[must_use]
    pub fn arrivals(&self, date: NaiveDate) -> &[ScanEvent] {
        self.arrivals.get(&date).map_or(&[], Vec::as_slice)
    }

    /// Departure candidates for a day, in recorded order.
    #[must_use]
    pub fn departures(&self, date: NaiveDate) -> &[ScanEvent] {
        self.departures.get(&date).map_or(&[], Vec::as_slice)
    }

    /// All dates with at least one candidate, ascending.
    pub fn dates(&self) -> impl Iterator<Item = NaiveDate> + '_ {
        let mut dates: Vec<_> = self.arrivals.keys().copied().collect();
        dates.extend(self.departures.keys().copied());
        dates.sort_unstable();
        dates.dedup();
        dates.into_iter()
    }

    /// Returns true if no events have been recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.arrivals.is_empty() && self.departures.is_empty()
    }
}
