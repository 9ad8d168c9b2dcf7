//! Overtime report command.

use std::fmt::Write;

use anyhow::{Context, Result};
use chrono::{Datelike, NaiveDate};
use fa_core::{AttendanceRecord, OvertimeRecord, overtime_report};
use fa_store::{Store, format_work};
use serde::Serialize;

/// JSON report structure.
#[derive(Debug, Serialize)]
struct JsonReport<'a> {
    date: String,
    records: &'a [OvertimeRecord],
}

/// Loads the date's attendance records from the monthly file.
///
/// A missing monthly file is an error; a present file with no rows for the
/// date yields an empty set (a valid, explicitly empty report).
pub fn day_records(store: &Store, date: NaiveDate) -> Result<Vec<AttendanceRecord>> {
    let month_records = store
        .load_monthly(date.year(), date.month())
        .with_context(|| format!("no merged records for {:04}-{:02}; run 'fa merge' first", date.year(), date.month()))?;
    Ok(month_records
        .into_iter()
        .filter(|record| record.date == date)
        .collect())
}

/// Runs the overtime command: evaluate, persist the CSV, print the report.
pub fn run(store: &Store, date: NaiveDate, json: bool) -> Result<()> {
    let records = day_records(store, date)?;
    let roster = store.load_roster()?;
    let report = overtime_report(&records, &roster);
    let path = store.write_overtime_report(date, &report)?;
    tracing::info!(path = %path.display(), rows = report.len(), "wrote overtime report");

    if json {
        println!("{}", format_report_json(date, &report)?);
    } else {
        print!("{}", format_report(date, &report));
    }
    Ok(())
}

/// Formats the human-readable overtime table.
pub fn format_report(date: NaiveDate, report: &[OvertimeRecord]) -> String {
    let mut output = String::new();
    writeln!(output, "Overtime list for {date}").unwrap();

    if report.is_empty() {
        writeln!(output).unwrap();
        writeln!(output, "No employees clocked overtime on {date}.").unwrap();
        return output;
    }

    writeln!(output).unwrap();
    writeln!(
        output,
        "{:<12} {:<20} {:<18} {:>16}",
        "EmployeeID", "Name", "Work", "Overtime in mins"
    )
    .unwrap();
    for record in report {
        writeln!(
            output,
            "{:<12} {:<20} {:<18} {:>16}",
            record.employee_id,
            record.name,
            format_work(record.worked),
            record.overtime_minutes
        )
        .unwrap();
    }
    output
}

/// Formats the overtime report as JSON.
pub fn format_report_json(date: NaiveDate, report: &[OvertimeRecord]) -> Result<String> {
    let json = JsonReport {
        date: date.to_string(),
        records: report,
    };
    Ok(serde_json::to_string_pretty(&json)?)
}
