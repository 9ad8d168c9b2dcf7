//! Merge command: reconcile a month's candidate logs into attendance records.

use anyhow::{Context, Result};
use chrono::{Datelike, NaiveDate};
use fa_core::{ReconcileError, reconcile_day};
use fa_store::Store;

/// Reconciles every day of the month and writes the monthly record file.
///
/// Days are processed in ascending order and each day's records come back
/// sorted, so the written file is ordered by `(date, in time, out time)`.
pub fn run(store: &Store, month: &str) -> Result<()> {
    let (year, month) = parse_month(month)?;
    let log = store
        .load_month_candidates(year, month)
        .with_context(|| format!("no candidate logs for {year:04}-{month:02}"))?;

    let mut records = Vec::new();
    for date in log.dates() {
        match reconcile_day(date, log.arrivals(date), log.departures(date)) {
            Ok(day_records) => records.extend(day_records),
            // A date from `dates()` has candidates on at least one side, but
            // keep the month going if a log file turned out to be all header.
            Err(ReconcileError::EmptyDay { date }) => {
                tracing::warn!(%date, "skipping day with no candidates");
            }
            Err(err @ ReconcileError::Duration { .. }) => {
                return Err(err).context("corrupt scan pair");
            }
        }
    }

    let path = store.write_monthly(year, month, &records)?;
    println!(
        "Merged {} attendance records into {}",
        records.len(),
        path.display()
    );
    Ok(())
}

/// Parses a `YYYY-MM` reporting month.
fn parse_month(value: &str) -> Result<(i32, u32)> {
    let date = NaiveDate::parse_from_str(&format!("{value}-01"), "%Y-%m-%d")
        .with_context(|| format!("month {value:?} must be YYYY-MM"))?;
    Ok((date.year(), date.month()))
}
