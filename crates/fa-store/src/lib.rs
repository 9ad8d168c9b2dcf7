//! CSV file layer for the attendance suite.
//!
//! Persists the resources the core logic consumes and produces, all rooted
//! at an explicitly passed base directory (never the process working
//! directory):
//!
//! - `scans/IN_YYYYMMDD.csv`, `scans/OT_YYYYMMDD.csv` — append-only daily
//!   candidate logs, columns `Date,Time,Token ID`
//! - `MG_YYYYMM.csv` — monthly reconciled records, columns
//!   `Date,In Time,Out Time,Token ID,Hrs,Mins`
//! - `employees.csv` — roster, columns
//!   `EmployeeID,Name,MobileNumber,EMail,TokenID` (append-only; duplicate
//!   employee IDs are resolved last-wins when loaded)
//! - `Daily_Overtime_report_YYYY-MM-DD.csv`, `Daily_Absent_report_YYYY-MM-DD.csv`
//!   — report outputs, one per run
//!
//! Dates are `%Y-%m-%d`, times of day `%H:%M`. A missing requested resource
//! is a terminal error for the run; nothing here retries.

use std::fs::{self, OpenOptions};
use std::path::{Path, PathBuf};

use chrono::{Datelike, NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use fa_core::{
    AbsenceRecord, AttendanceRecord, Bucket, CandidateLog, EmployeeProfile, OvertimeRecord,
    Roster, ScanEvent, TokenId, ValidationError, WorkedDuration,
};

/// Time-of-day format used in all persisted resources.
const TIME_FORMAT: &str = "%H:%M";

/// Date format used in all persisted resources.
const DATE_FORMAT: &str = "%Y-%m-%d";

/// Compact date form used in candidate log file names.
const FILE_DATE_FORMAT: &str = "%Y%m%d";

/// Storage errors.
#[derive(Debug, Error)]
pub enum StoreError {
    /// A requested resource does not exist.
    #[error("missing {what}: {path}")]
    MissingResource { what: &'static str, path: PathBuf },

    /// An error from the filesystem.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// An error from the CSV layer.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// A row that parsed as CSV but failed domain validation.
    #[error("invalid row in {path} (line {line}): {message}")]
    InvalidRow {
        path: PathBuf,
        line: usize,
        message: String,
    },

    /// A field value that failed core validation outside a row context.
    #[error(transparent)]
    Validation(#[from] ValidationError),
}

// ========== CSV row shapes ==========

#[derive(Debug, Serialize, Deserialize)]
struct ScanRow {
    #[serde(rename = "Date")]
    date: String,
    #[serde(rename = "Time")]
    time: String,
    #[serde(rename = "Token ID")]
    token: String,
}

#[derive(Debug, Serialize, Deserialize)]
struct MonthlyRow {
    #[serde(rename = "Date")]
    date: String,
    #[serde(rename = "In Time")]
    in_time: String,
    #[serde(rename = "Out Time")]
    out_time: String,
    #[serde(rename = "Token ID")]
    token: String,
    #[serde(rename = "Hrs")]
    hours: u32,
    #[serde(rename = "Mins")]
    minutes: u32,
}

#[derive(Debug, Serialize, Deserialize)]
struct RosterRow {
    #[serde(rename = "EmployeeID")]
    employee_id: String,
    #[serde(rename = "Name")]
    name: Option<String>,
    #[serde(rename = "MobileNumber")]
    mobile_number: String,
    #[serde(rename = "EMail")]
    email: String,
    #[serde(rename = "TokenID")]
    token: String,
}

#[derive(Debug, Serialize)]
struct OvertimeRow {
    #[serde(rename = "EmployeeID")]
    employee_id: String,
    #[serde(rename = "Name")]
    name: String,
    #[serde(rename = "Work")]
    work: String,
    #[serde(rename = "Overtime in mins")]
    overtime_minutes: u32,
}

#[derive(Debug, Serialize)]
struct AbsenceRow {
    #[serde(rename = "EmployeeID")]
    employee_id: String,
    #[serde(rename = "Name")]
    name: String,
}

// ========== Store ==========

/// File store rooted at a base directory.
#[derive(Debug, Clone)]
pub struct Store {
    base_dir: PathBuf,
    roster_path: PathBuf,
}

impl Store {
    /// Creates a store over the given base directory and roster file.
    pub fn new(base_dir: impl Into<PathBuf>, roster_path: impl Into<PathBuf>) -> Self {
        Self {
            base_dir: base_dir.into(),
            roster_path: roster_path.into(),
        }
    }

    /// The directory holding daily candidate logs.
    #[must_use]
    pub fn scans_dir(&self) -> PathBuf {
        self.base_dir.join("scans")
    }

    /// Path of one day's candidate log for the given bucket.
    #[must_use]
    pub fn candidate_path(&self, date: NaiveDate, bucket: Bucket) -> PathBuf {
        let prefix = match bucket {
            Bucket::Arrival => "IN",
            Bucket::Departure => "OT",
        };
        self.scans_dir()
            .join(format!("{prefix}_{}.csv", date.format(FILE_DATE_FORMAT)))
    }

    /// Path of the monthly reconciled-record file.
    #[must_use]
    pub fn monthly_path(&self, year: i32, month: u32) -> PathBuf {
        self.base_dir.join(format!("MG_{year:04}{month:02}.csv"))
    }

    /// Path of the roster file.
    #[must_use]
    pub fn roster_path(&self) -> &Path {
        &self.roster_path
    }

    /// Path of the overtime report for a date.
    #[must_use]
    pub fn overtime_report_path(&self, date: NaiveDate) -> PathBuf {
        self.base_dir
            .join(format!("Daily_Overtime_report_{}.csv", date.format(DATE_FORMAT)))
    }

    /// Path of the absence report for a date.
    #[must_use]
    pub fn absence_report_path(&self, date: NaiveDate) -> PathBuf {
        self.base_dir
            .join(format!("Daily_Absent_report_{}.csv", date.format(DATE_FORMAT)))
    }

    // ========== Candidate logs ==========

    /// Appends one scan event to its day/bucket candidate log.
    ///
    /// Creates the `scans/` directory and the file (with header) on first
    /// write; later writes append rows only. Returns the file written.
    pub fn append_scan(&self, event: &ScanEvent) -> Result<PathBuf, StoreError> {
        let path = self.candidate_path(event.date, Bucket::classify(event.time));
        fs::create_dir_all(self.scans_dir())?;

        let write_header = !path.exists();
        let file = OpenOptions::new().create(true).append(true).open(&path)?;
        let mut writer = csv::WriterBuilder::new()
            .has_headers(write_header)
            .from_writer(file);
        writer.serialize(ScanRow {
            date: event.date.format(DATE_FORMAT).to_string(),
            time: event.time.format(TIME_FORMAT).to_string(),
            token: event.token.to_string(),
        })?;
        writer.flush()?;

        tracing::debug!(path = %path.display(), token = %event.token, "appended scan event");
        Ok(path)
    }

    /// Loads one day's candidate log from the IN/OT files.
    ///
    /// Errors if neither bucket file exists for the day.
    pub fn load_day_candidates(&self, date: NaiveDate) -> Result<CandidateLog, StoreError> {
        let in_path = self.candidate_path(date, Bucket::Arrival);
        let ot_path = self.candidate_path(date, Bucket::Departure);
        if !in_path.exists() && !ot_path.exists() {
            return Err(StoreError::MissingResource {
                what: "candidate logs for day",
                path: in_path,
            });
        }

        let mut log = CandidateLog::new();
        for path in [in_path, ot_path] {
            if path.exists() {
                read_candidate_file(&path, &mut log)?;
            }
        }
        Ok(log)
    }

    /// Loads every candidate log of a month into one combined log.
    ///
    /// Errors if the month has no candidate files at all.
    pub fn load_month_candidates(
        &self,
        year: i32,
        month: u32,
    ) -> Result<CandidateLog, StoreError> {
        let scans_dir = self.scans_dir();
        if !scans_dir.exists() {
            return Err(StoreError::MissingResource {
                what: "candidate logs for month",
                path: scans_dir,
            });
        }

        let mut paths: Vec<PathBuf> = Vec::new();
        for entry in fs::read_dir(&scans_dir)? {
            let path = entry?.path();
            if file_date(&path)
                .is_some_and(|date| date.year() == year && date.month() == month)
            {
                paths.push(path);
            }
        }
        if paths.is_empty() {
            return Err(StoreError::MissingResource {
                what: "candidate logs for month",
                path: scans_dir,
            });
        }
        paths.sort();

        let mut log = CandidateLog::new();
        for path in &paths {
            read_candidate_file(path, &mut log)?;
        }
        Ok(log)
    }

    // ========== Monthly records ==========

    /// Writes the monthly reconciled-record file, replacing any previous one.
    pub fn write_monthly(
        &self,
        year: i32,
        month: u32,
        records: &[AttendanceRecord],
    ) -> Result<PathBuf, StoreError> {
        let path = self.monthly_path(year, month);
        let mut writer = csv::Writer::from_path(&path)?;
        for record in records {
            writer.serialize(MonthlyRow {
                date: record.date.format(DATE_FORMAT).to_string(),
                in_time: record.in_time.format(TIME_FORMAT).to_string(),
                out_time: record.out_time.format(TIME_FORMAT).to_string(),
                token: record.token.to_string(),
                hours: record.worked.hours,
                minutes: record.worked.minutes,
            })?;
        }
        writer.flush()?;
        tracing::info!(path = %path.display(), records = records.len(), "wrote monthly records");
        Ok(path)
    }

    /// Loads a month's reconciled records.
    ///
    /// Errors if the monthly file does not exist; an existing file with no
    /// rows is a valid (empty) month.
    pub fn load_monthly(&self, year: i32, month: u32) -> Result<Vec<AttendanceRecord>, StoreError> {
        let path = self.monthly_path(year, month);
        if !path.exists() {
            return Err(StoreError::MissingResource {
                what: "monthly record file",
                path,
            });
        }

        let mut reader = csv::Reader::from_path(&path)?;
        let mut records = Vec::new();
        for (index, row) in reader.deserialize::<MonthlyRow>().enumerate() {
            let row = row?;
            let line = index + 2;
            records.push(AttendanceRecord {
                date: parse_date(&row.date).map_err(|e| invalid_row(&path, line, &e))?,
                in_time: parse_time(&row.in_time).map_err(|e| invalid_row(&path, line, &e))?,
                out_time: parse_time(&row.out_time).map_err(|e| invalid_row(&path, line, &e))?,
                token: TokenId::new(row.token).map_err(|e| invalid_row(&path, line, &e))?,
                worked: WorkedDuration {
                    hours: row.hours,
                    minutes: row.minutes,
                },
            });
        }
        Ok(records)
    }

    // ========== Roster ==========

    /// Loads the roster, applying last-wins dedup by employee ID.
    pub fn load_roster(&self) -> Result<Roster, StoreError> {
        let path = &self.roster_path;
        if !path.exists() {
            return Err(StoreError::MissingResource {
                what: "roster file",
                path: path.clone(),
            });
        }

        let mut reader = csv::Reader::from_path(path)?;
        let mut roster = Roster::new();
        for (index, row) in reader.deserialize::<RosterRow>().enumerate() {
            let row = row?;
            let line = index + 2;
            roster.insert(EmployeeProfile {
                employee_id: fa_core::EmployeeId::new(row.employee_id)
                    .map_err(|e| invalid_row(path, line, &e))?,
                name: row.name,
                mobile_number: row.mobile_number,
                email: row.email,
                token: TokenId::new(row.token).map_err(|e| invalid_row(path, line, &e))?,
            });
        }
        Ok(roster)
    }

    /// Appends one profile to the roster file, creating it with a header
    /// when absent. Updates are appends too; dedup happens on load.
    pub fn append_roster_entry(&self, profile: &EmployeeProfile) -> Result<(), StoreError> {
        let path = &self.roster_path;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let write_header = !path.exists();
        let file = OpenOptions::new().create(true).append(true).open(path)?;
        let mut writer = csv::WriterBuilder::new()
            .has_headers(write_header)
            .from_writer(file);
        writer.serialize(RosterRow {
            employee_id: profile.employee_id.to_string(),
            name: profile.name.clone(),
            mobile_number: profile.mobile_number.clone(),
            email: profile.email.clone(),
            token: profile.token.to_string(),
        })?;
        writer.flush()?;

        tracing::debug!(employee_id = %profile.employee_id, "appended roster entry");
        Ok(())
    }

    // ========== Report outputs ==========

    /// Writes the overtime report for a date. An empty report still produces
    /// a file with headers, distinguishable from a missing resource.
    pub fn write_overtime_report(
        &self,
        date: NaiveDate,
        records: &[OvertimeRecord],
    ) -> Result<PathBuf, StoreError> {
        let path = self.overtime_report_path(date);
        let mut writer = csv::Writer::from_path(&path)?;
        if records.is_empty() {
            writer.write_record(["EmployeeID", "Name", "Work", "Overtime in mins"])?;
        }
        for record in records {
            writer.serialize(OvertimeRow {
                employee_id: record.employee_id.to_string(),
                name: record.name.clone(),
                work: format_work(record.worked),
                overtime_minutes: record.overtime_minutes,
            })?;
        }
        writer.flush()?;
        Ok(path)
    }

    /// Writes the absence report for a date; empty reports keep the header.
    pub fn write_absence_report(
        &self,
        date: NaiveDate,
        records: &[AbsenceRecord],
    ) -> Result<PathBuf, StoreError> {
        let path = self.absence_report_path(date);
        let mut writer = csv::Writer::from_path(&path)?;
        if records.is_empty() {
            writer.write_record(["EmployeeID", "Name"])?;
        }
        for record in records {
            writer.serialize(AbsenceRow {
                employee_id: record.employee_id.to_string(),
                name: record.name.clone(),
            })?;
        }
        writer.flush()?;
        Ok(path)
    }
}

/// Renders a worked duration for the overtime report's `Work` column.
#[must_use]
pub fn format_work(worked: WorkedDuration) -> String {
    format!("{} Hours {} Mins", worked.hours, worked.minutes)
}

/// Parses one candidate log file into the combined log.
fn read_candidate_file(path: &Path, log: &mut CandidateLog) -> Result<(), StoreError> {
    let mut reader = csv::Reader::from_path(path)?;
    for (index, row) in reader.deserialize::<ScanRow>().enumerate() {
        let row = row?;
        let line = index + 2; // header is line 1
        let event = ScanEvent {
            token: TokenId::new(row.token).map_err(|e| invalid_row(path, line, &e))?,
            date: parse_date(&row.date).map_err(|e| invalid_row(path, line, &e))?,
            time: parse_time(&row.time).map_err(|e| invalid_row(path, line, &e))?,
        };
        log.record(event);
    }
    Ok(())
}

/// Extracts the date from a candidate log file name (`IN_`/`OT_YYYYMMDD.csv`).
fn file_date(path: &Path) -> Option<NaiveDate> {
    let name = path.file_name()?.to_str()?;
    let stem = name
        .strip_prefix("IN_")
        .or_else(|| name.strip_prefix("OT_"))?
        .strip_suffix(".csv")?;
    NaiveDate::parse_from_str(stem, FILE_DATE_FORMAT).ok()
}

fn parse_date(value: &str) -> Result<NaiveDate, chrono::ParseError> {
    NaiveDate::parse_from_str(value, DATE_FORMAT)
}

fn parse_time(value: &str) -> Result<NaiveTime, chrono::ParseError> {
    NaiveTime::parse_from_str(value, TIME_FORMAT)
}

fn invalid_row(path: &Path, line: usize, error: &impl std::fmt::Display) -> StoreError {
    StoreError::InvalidRow {
        path: path.to_path_buf(),
        line,
        message: error.to_string(),
    }
}
