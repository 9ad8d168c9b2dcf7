//! Core domain logic for the attendance reconciliation suite.
//!
//! This crate contains the decision logic of the system, free of any I/O:
//! - Scan classification: bucketing raw badge scans into arrival/departure
//!   candidate sets per day
//! - Daily reconciliation: dedup, outer join, and default-fill into one
//!   attendance record per employee per day
//! - Duration arithmetic with minute borrow
//! - Overtime and absence evaluation against the employee roster
//!
//! Every operation here is a pure function of its inputs.

pub mod absence;
pub mod duration;
pub mod overtime;
pub mod reconcile;
pub mod roster;
pub mod scan;
pub mod types;

pub use absence::{AbsenceRecord, absence_report};
pub use duration::{DurationError, WorkedDuration, worked_duration};
pub use overtime::{
    BASE_SHIFT_MINUTES, OVERTIME_THRESHOLD_MINUTES, OvertimeRecord, overtime_report,
};
pub use reconcile::{
    AttendanceRecord, DEFAULT_IN_TIME, DEFAULT_OUT_TIME, ReconcileError, reconcile_day,
};
pub use roster::{EmployeeProfile, Roster};
pub use scan::{ARRIVAL_CUTOFF_HOUR, Bucket, CandidateLog, EmptyBatchError, ScanEvent};
pub use types::{EmployeeId, TokenId, ValidationError};
