//! Scan command: record one badge scan into the day's candidate log.

use anyhow::{Context, Result, bail};
use chrono::{Local, NaiveDate, NaiveTime};
use fa_core::{Bucket, ScanEvent, TokenId};
use fa_store::Store;

/// Validates a raw scan and appends it to the right candidate log.
///
/// The scan is classified into the arrival or departure bucket by time of
/// day; no deduplication happens here, repeated scans accumulate.
pub fn run(store: &Store, token: &str, date: NaiveDate, time: &str) -> Result<()> {
    let event = build_event(token, date, time, Local::now().date_naive())?;
    let bucket = Bucket::classify(event.time);
    let path = store.append_scan(&event)?;

    tracing::info!(token = %event.token, %bucket, path = %path.display(), "recorded scan");
    println!(
        "Recorded {bucket} scan for token {} on {} at {}",
        event.token,
        event.date,
        event.time.format("%H:%M")
    );
    Ok(())
}

/// Parses and validates the scan fields against `today`.
fn build_event(token: &str, date: NaiveDate, time: &str, today: NaiveDate) -> Result<ScanEvent> {
    let token = TokenId::new(token).context("invalid token")?;
    let time = NaiveTime::parse_from_str(time, "%H:%M")
        .with_context(|| format!("time {time:?} must be HH:MM"))?;
    if date > today {
        bail!("scan date {date} is in the future");
    }
    Ok(ScanEvent { token, date, time })
}
