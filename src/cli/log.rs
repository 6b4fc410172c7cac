//! Audit log CLI command

use crate::display::format_audit_entries;
use crate::error::LiftlogResult;
use crate::services::user::parse_username;
use crate::storage::Storage;

/// Show the most recent audit entries, oldest first
///
/// With a user, only entries about that user are shown. The user does not
/// have to be registered, so the history of a deleted user stays readable.
pub fn handle_log_command(
    storage: &Storage,
    limit: usize,
    user: Option<&str>,
) -> LiftlogResult<()> {
    let audit = storage.audit();
    if !audit.exists() {
        println!("Audit log is empty.");
        return Ok(());
    }

    let user = user.map(parse_username).transpose()?;
    let entries = audit.read_recent(limit, user.as_ref().map(|u| u.as_str()))?;

    if entries.is_empty() {
        match &user {
            Some(user) => println!("No audit entries for {}.", user),
            None => println!("Audit log is empty."),
        }
        return Ok(());
    }

    println!("{}", format_audit_entries(&entries));
    Ok(())
}
