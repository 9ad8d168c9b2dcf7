//! Overtime evaluation over reconciled attendance records.

use serde::{Deserialize, Serialize};

use crate::duration::WorkedDuration;
use crate::reconcile::AttendanceRecord;
use crate::roster::Roster;
use crate::types::EmployeeId;

/// Minimum total worked minutes to qualify for the overtime report (9h15m).
pub const OVERTIME_THRESHOLD_MINUTES: u32 = 555;

/// Base shift length in minutes (9h); overtime is the excess over this.
pub const BASE_SHIFT_MINUTES: u32 = 540;

/// One employee's overtime for one day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OvertimeRecord {
    pub employee_id: EmployeeId,
    /// Empty when the winning profile has no resolvable name; the row is
    /// still attributable by ID.
    pub name: String,
    pub worked: WorkedDuration,
    pub overtime_minutes: u32,
}

/// Evaluates overtime for one day's attendance records.
///
/// Records below [`OVERTIME_THRESHOLD_MINUTES`] are excluded. Qualifying
/// records join against the deduplicated roster by token; a token with no
/// matching profile cannot be attributed and is dropped with a warning.
/// Input order is preserved.
pub fn overtime_report(records: &[AttendanceRecord], roster: &Roster) -> Vec<OvertimeRecord> {
    let mut report = Vec::new();
    for record in records {
        let total = record.worked.total_minutes();
        if total < OVERTIME_THRESHOLD_MINUTES {
            continue;
        }
        let Some(profile) = roster.resolve_token(&record.token) else {
            tracing::warn!(
                token = %record.token,
                date = %record.date,
                "dropping overtime record with no matching roster profile"
            );
            continue;
        };
        report.push(OvertimeRecord {
            employee_id: profile.employee_id.clone(),
            name: profile.resolvable_name().unwrap_or_default().to_string(),
            worked: record.worked,
            overtime_minutes: total - BASE_SHIFT_MINUTES,
        });
    }
    report
}

#[cfg(test)]
mod tests {
    use chrono::{NaiveDate, NaiveTime};

    use super::*;
    use crate::roster::EmployeeProfile;
    use crate::types::TokenId;

    fn record(token: &str, hours: u32, minutes: u32) -> AttendanceRecord {
        AttendanceRecord {
            date: NaiveDate::from_ymd_opt(2021, 11, 1).unwrap(),
            token: TokenId::new(token).unwrap(),
            in_time: NaiveTime::from_hms_opt(8, 0, 0).unwrap(),
            out_time: NaiveTime::from_hms_opt(8 + hours, minutes, 0).unwrap(),
            worked: WorkedDuration { hours, minutes },
        }
    }

    fn roster_with(entries: &[(&str, Option<&str>, &str)]) -> Roster {
        Roster::from_profiles(entries.iter().map(|(id, name, token)| EmployeeProfile {
            employee_id: EmployeeId::new(*id).unwrap(),
            name: name.map(String::from),
            mobile_number: "81234567".to_string(),
            email: "e@example.com".to_string(),
            token: TokenId::new(*token).unwrap(),
        }))
    }

    #[test]
    fn threshold_is_inclusive_at_555() {
        let roster = roster_with(&[("S0001", Some("Alice"), "1111")]);
        let report = overtime_report(&[record("1111", 9, 15)], &roster);
        assert_eq!(report.len(), 1);
        assert_eq!(report[0].overtime_minutes, 15);
    }

    #[test]
    fn below_threshold_is_excluded() {
        let roster = roster_with(&[("S0001", Some("Alice"), "1111")]);
        let report = overtime_report(&[record("1111", 9, 14)], &roster);
        assert!(report.is_empty());
    }

    #[test]
    fn unresolved_token_is_dropped_not_fatal() {
        let roster = roster_with(&[("S0001", Some("Alice"), "1111")]);
        let report = overtime_report(
            &[record("9999", 10, 0), record("1111", 10, 0)],
            &roster,
        );
        assert_eq!(report.len(), 1);
        assert_eq!(report[0].employee_id.as_str(), "S0001");
        assert_eq!(report[0].overtime_minutes, 60);
    }

    #[test]
    fn joins_through_last_wins_roster() {
        let roster = roster_with(&[
            ("S0001", Some("Alice"), "1111"),
            ("S0001", Some("Alice"), "2222"),
        ]);
        // Old token no longer attributes, new one does.
        assert!(overtime_report(&[record("1111", 10, 0)], &roster).is_empty());
        assert_eq!(overtime_report(&[record("2222", 10, 0)], &roster).len(), 1);
    }

    #[test]
    fn input_order_preserved() {
        let roster = roster_with(&[
            ("S0001", Some("Alice"), "1111"),
            ("S0002", Some("Bob"), "2222"),
        ]);
        let report = overtime_report(
            &[record("2222", 10, 0), record("1111", 9, 30)],
            &roster,
        );
        let ids: Vec<_> = report.iter().map(|r| r.employee_id.as_str()).collect();
        assert_eq!(ids, vec!["S0002", "S0001"]);
    }

    #[test]
    fn nameless_profile_keeps_row_with_empty_name() {
        let roster = roster_with(&[("S0001", None, "1111")]);
        let report = overtime_report(&[record("1111", 10, 0)], &roster);
        assert_eq!(report.len(), 1);
        assert_eq!(report[0].name, "");
    }
}
