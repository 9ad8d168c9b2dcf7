//! Employee roster with last-wins deduplication.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::types::{EmployeeId, TokenId};

/// A single employee profile as recorded in the roster.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmployeeProfile {
    pub employee_id: EmployeeId,
    /// Display name; absent names exclude the employee from listings that
    /// require one.
    pub name: Option<String>,
    pub mobile_number: String,
    pub email: String,
    pub token: TokenId,
}

impl EmployeeProfile {
    /// Returns the name if present and non-blank.
    #[must_use]
    pub fn resolvable_name(&self) -> Option<&str> {
        self.name
            .as_deref()
            .map(str::trim)
            .filter(|name| !name.is_empty())
    }
}

/// An insertion-ordered roster deduplicated by employee ID.
///
/// Profile updates are appended to the roster file, so the same employee ID
/// can occur multiple times; the most recently inserted profile wins. The
/// order is tracked explicitly here rather than inferred from file layout.
#[derive(Debug, Clone, Default)]
pub struct Roster {
    order: Vec<EmployeeId>,
    profiles: HashMap<EmployeeId, EmployeeProfile>,
}

impl Roster {
    /// Creates an empty roster.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a roster from profiles in insertion order, applying last-wins.
    #[must_use]
    pub fn from_profiles(profiles: impl IntoIterator<Item = EmployeeProfile>) -> Self {
        let mut roster = Self::new();
        for profile in profiles {
            roster.insert(profile);
        }
        roster
    }

    /// Inserts a profile, replacing any earlier one with the same ID.
    ///
    /// A replaced profile keeps its original position in the ordering.
    pub fn insert(&mut self, profile: EmployeeProfile) {
        let id = profile.employee_id.clone();
        if self.profiles.insert(id.clone(), profile).is_some() {
            tracing::debug!(employee_id = %id, "replacing earlier roster entry");
        } else {
            self.order.push(id);
        }
    }

    /// Looks up a profile by employee ID.
    #[must_use]
    pub fn get(&self, id: &EmployeeId) -> Option<&EmployeeProfile> {
        self.profiles.get(id)
    }

    /// Resolves a badge token to a profile over the deduplicated view.
    ///
    /// Only the winning profile per employee ID participates, so a token
    /// superseded by a profile update no longer resolves.
    #[must_use]
    pub fn resolve_token(&self, token: &TokenId) -> Option<&EmployeeProfile> {
        self.profiles().find(|profile| profile.token == *token)
    }

    /// Iterates deduplicated profiles in insertion order.
    pub fn profiles(&self) -> impl Iterator<Item = &EmployeeProfile> {
        self.order.iter().filter_map(|id| self.profiles.get(id))
    }

    /// Number of distinct employees.
    #[must_use]
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// Returns true if the roster has no profiles.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn profile(id: &str, name: Option<&str>, token: &str) -> EmployeeProfile {
        EmployeeProfile {
            employee_id: EmployeeId::new(id).unwrap(),
            name: name.map(String::from),
            mobile_number: "91234567".to_string(),
            email: "someone@example.com".to_string(),
            token: TokenId::new(token).unwrap(),
        }
    }

    #[test]
    fn last_wins_per_employee_id() {
        let roster = Roster::from_profiles(vec![
            profile("S0001", Some("Alice"), "1111"),
            profile("S0001", Some("Alice"), "9999"),
        ]);

        assert_eq!(roster.len(), 1);
        let id = EmployeeId::new("S0001").unwrap();
        assert_eq!(roster.get(&id).unwrap().token.as_str(), "9999");
    }

    #[test]
    fn superseded_token_no_longer_resolves() {
        let roster = Roster::from_profiles(vec![
            profile("S0001", Some("Alice"), "1111"),
            profile("S0001", Some("Alice"), "9999"),
        ]);

        assert!(roster.resolve_token(&TokenId::new("1111").unwrap()).is_none());
        assert!(roster.resolve_token(&TokenId::new("9999").unwrap()).is_some());
    }

    #[test]
    fn replacement_keeps_insertion_position() {
        let roster = Roster::from_profiles(vec![
            profile("S0001", Some("Alice"), "1111"),
            profile("S0002", Some("Bob"), "2222"),
            profile("S0001", Some("Alice"), "3333"),
        ]);

        let ids: Vec<_> = roster.profiles().map(|p| p.employee_id.as_str()).collect();
        assert_eq!(ids, vec!["S0001", "S0002"]);
    }

    #[test]
    fn resolvable_name_requires_non_blank() {
        assert_eq!(
            profile("S0001", Some("Alice"), "1111").resolvable_name(),
            Some("Alice")
        );
        assert_eq!(profile("S0001", Some("  "), "1111").resolvable_name(), None);
        assert_eq!(profile("S0001", None, "1111").resolvable_name(), None);
    }
}
