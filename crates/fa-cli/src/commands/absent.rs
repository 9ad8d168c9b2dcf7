//! Absentee report command.

use std::fmt::Write;

use anyhow::Result;
use chrono::NaiveDate;
use fa_core::{AbsenceRecord, absence_report};
use fa_store::Store;
use serde::Serialize;

use super::overtime::day_records;

/// JSON report structure.
#[derive(Debug, Serialize)]
struct JsonReport<'a> {
    date: String,
    records: &'a [AbsenceRecord],
}

/// Runs the absent command: evaluate, persist the CSV, print the report.
pub fn run(store: &Store, date: NaiveDate, json: bool) -> Result<()> {
    let records = day_records(store, date)?;
    let roster = store.load_roster()?;
    let report = absence_report(&roster, &records);
    let path = store.write_absence_report(date, &report)?;
    tracing::info!(path = %path.display(), rows = report.len(), "wrote absence report");

    if json {
        println!("{}", format_report_json(date, &report)?);
    } else {
        print!("{}", format_report(date, &report));
    }
    Ok(())
}

/// Formats the human-readable absentee table.
pub fn format_report(date: NaiveDate, report: &[AbsenceRecord]) -> String {
    let mut output = String::new();
    writeln!(output, "Absent list for {date}").unwrap();

    if report.is_empty() {
        writeln!(output).unwrap();
        writeln!(output, "There are no absentees on {date}.").unwrap();
        return output;
    }

    writeln!(output).unwrap();
    writeln!(output, "{:<12} {:<20}", "EmployeeID", "Name").unwrap();
    for record in report {
        writeln!(output, "{:<12} {:<20}", record.employee_id, record.name).unwrap();
    }
    output
}

/// Formats the absentee report as JSON.
pub fn format_report_json(date: NaiveDate, report: &[AbsenceRecord]) -> Result<String> {
    let json = JsonReport {
        date: date.to_string(),
        records: report,
    };
    Ok(serde_json::to_string_pretty(&json)?)
}

#[cfg(test)]
mod tests {
    use fa_core::EmployeeId;

    use super::*;

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2021, 11, 1).unwrap()
    }

    fn record(id: &str, name: &str) -> AbsenceRecord {
        AbsenceRecord {
            employee_id: EmployeeId::new(id).unwrap(),
            name: name.to_string(),
        }
    }

    #[test]
    fn empty_report_says_so() {
        let output = format_report(date(), &[]);
        assert!(output.contains("There are no absentees on 2021-11-01."));
    }

    #[test]
    fn table_lists_each_absentee() {
        let output = format_report(date(), &[record("S0002", "Bob"), record("S0003", "Carol")]);
        assert!(output.contains("Absent list for 2021-11-01"));
        assert!(output.contains("S0002"));
        assert!(output.contains("Carol"));
    }

    #[test]
    fn json_report_includes_records() {
        let output = format_report_json(date(), &[record("S0002", "Bob")]).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(parsed["records"][0]["employee_id"], "S0002");
        assert_eq!(parsed["records"][0]["name"], "Bob");
    }
}
