//! Roster commands: append profiles, list the deduplicated roster.

use std::fmt::Write;

use anyhow::{Context, Result, bail};
use fa_core::{EmployeeId, EmployeeProfile, Roster, TokenId};
use fa_store::Store;

/// Appends a profile to the roster file.
///
/// Re-adding an existing employee ID is how updates work; the loader keeps
/// the most recently appended profile per ID.
pub fn add(
    store: &Store,
    id: &str,
    name: &str,
    mobile: &str,
    email: &str,
    token: &str,
) -> Result<()> {
    let profile = build_profile(id, name, mobile, email, token)?;
    store.append_roster_entry(&profile)?;
    println!(
        "Added {} ({}) to {}",
        profile.employee_id,
        profile.name.as_deref().unwrap_or("unnamed"),
        store.roster_path().display()
    );
    Ok(())
}

/// Prints the roster after last-wins dedup.
pub fn list(store: &Store) -> Result<()> {
    let roster = store.load_roster()?;
    print!("{}", format_roster(&roster));
    Ok(())
}

/// Validates the profile fields.
///
/// Mobile numbers are 8 digits starting with 8 or 9 and emails must contain
/// a single `@`, matching the roster conventions; completeness of the
/// address is not checked beyond that.
fn build_profile(
    id: &str,
    name: &str,
    mobile: &str,
    email: &str,
    token: &str,
) -> Result<EmployeeProfile> {
    let employee_id = EmployeeId::new(id).context("invalid employee ID")?;
    let token = TokenId::new(token).context("invalid token")?;

    if mobile.len() != 8
        || !mobile.bytes().all(|b| b.is_ascii_digit())
        || !(mobile.starts_with('8') || mobile.starts_with('9'))
    {
        bail!("mobile number must be 8 digits starting with 8 or 9, got {mobile:?}");
    }
    if email.matches('@').count() != 1 {
        bail!("email must contain exactly one '@', got {email:?}");
    }

    let name = name.trim();
    Ok(EmployeeProfile {
        employee_id,
        name: (!name.is_empty()).then(|| name.to_string()),
        mobile_number: mobile.to_string(),
        email: email.to_string(),
        token,
    })
}

/// Formats the roster listing.
fn format_roster(roster: &Roster) -> String {
    let mut output = String::new();
    if roster.is_empty() {
        writeln!(output, "Roster is empty.").unwrap();
        return output;
    }

    writeln!(
        output,
        "{:<12} {:<20} {:<12} {:<28} {:<7}",
        "EmployeeID", "Name", "Mobile", "EMail", "TokenID"
    )
    .unwrap();
    for profile in roster.profiles() {
        writeln!(
            output,
            "{:<12} {:<20} {:<12} {:<28} {:<7}",
            profile.employee_id,
            profile.name.as_deref().unwrap_or(""),
            profile.mobile_number,
            profile.email,
            profile.token
        )
        .unwrap();
    }
    output
}
