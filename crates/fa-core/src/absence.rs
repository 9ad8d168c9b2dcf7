//! Absence evaluation: roster minus the day's attendance.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::reconcile::AttendanceRecord;
use crate::roster::Roster;
use crate::types::EmployeeId;

/// One absent employee for one day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AbsenceRecord {
    pub employee_id: EmployeeId,
    pub name: String,
}

/// Lists employees with no reconciled attendance record for the day.
///
/// The present set is the employee IDs whose (deduplicated, last-wins)
/// profile token appears in `records`; absentees are the rest of the roster,
/// in roster insertion order. Profiles without a resolvable name are left
/// out of the listing, a formatting constraint of the report.
pub fn absence_report(roster: &Roster, records: &[AttendanceRecord]) -> Vec<AbsenceRecord> {
    let present: HashSet<&EmployeeId> = records
        .iter()
        .filter_map(|record| roster.resolve_token(&record.token))
        .map(|profile| &profile.employee_id)
        .collect();

    roster
        .profiles()
        .filter(|profile| !present.contains(&profile.employee_id))
        .filter_map(|profile| match profile.resolvable_name() {
            Some(name) => Some(AbsenceRecord {
                employee_id: profile.employee_id.clone(),
                name: name.to_string(),
            }),
            None => {
                tracing::debug!(
                    employee_id = %profile.employee_id,
                    "omitting nameless profile from absence listing"
                );
                None
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use chrono::{NaiveDate, NaiveTime};

    use super::*;
    use crate::duration::WorkedDuration;
    use crate::roster::EmployeeProfile;
    use crate::types::TokenId;

    fn profile(id: &str, name: Option<&str>, token: &str) -> EmployeeProfile {
        EmployeeProfile {
            employee_id: EmployeeId::new(id).unwrap(),
            name: name.map(String::from),
            mobile_number: "91234567".to_string(),
            email: "e@example.com".to_string(),
            token: TokenId::new(token).unwrap(),
        }
    }

    fn record(token: &str) -> AttendanceRecord {
        AttendanceRecord {
            date: NaiveDate::from_ymd_opt(2021, 11, 1).unwrap(),
            token: TokenId::new(token).unwrap(),
            in_time: NaiveTime::from_hms_opt(8, 0, 0).unwrap(),
            out_time: NaiveTime::from_hms_opt(17, 0, 0).unwrap(),
            worked: WorkedDuration { hours: 9, minutes: 0 },
        }
    }

    #[test]
    fn set_difference_against_roster() {
        let roster = Roster::from_profiles(vec![
            profile("S0001", Some("Alice"), "1111"),
            profile("S0002", Some("Bob"), "2222"),
            profile("S0003", Some("Carol"), "3333"),
        ]);

        let absent = absence_report(&roster, &[record("1111")]);
        let ids: Vec<_> = absent.iter().map(|r| r.employee_id.as_str()).collect();
        assert_eq!(ids, vec!["S0002", "S0003"]);
    }

    #[test]
    fn everyone_present_yields_empty_report() {
        let roster = Roster::from_profiles(vec![profile("S0001", Some("Alice"), "1111")]);
        assert!(absence_report(&roster, &[record("1111")]).is_empty());
    }

    #[test]
    fn nameless_profiles_are_omitted() {
        let roster = Roster::from_profiles(vec![
            profile("S0001", None, "1111"),
            profile("S0002", Some("Bob"), "2222"),
        ]);

        let absent = absence_report(&roster, &[]);
        assert_eq!(absent.len(), 1);
        assert_eq!(absent[0].employee_id.as_str(), "S0002");
    }

    #[test]
    fn unknown_attendance_token_counts_nobody_present() {
        let roster = Roster::from_profiles(vec![profile("S0001", Some("Alice"), "1111")]);
        let absent = absence_report(&roster, &[record("9999")]);
        assert_eq!(absent.len(), 1);
    }

    #[test]
    fn presence_joins_through_last_wins_roster() {
        let roster = Roster::from_profiles(vec![
            profile("S0001", Some("Alice"), "1111"),
            profile("S0001", Some("Alice"), "2222"),
        ]);

        // The superseded token no longer marks S0001 present.
        assert_eq!(absence_report(&roster, &[record("1111")]).len(), 1);
        assert!(absence_report(&roster, &[record("2222")]).is_empty());
    }
}
