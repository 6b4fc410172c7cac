//! User display formatting

use tabled::{Table, Tabled};

use crate::models::{User, Username};

use super::render;

#[derive(Tabled)]
struct UserRow {
    #[tabled(rename = "ID")]
    id: u64,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Registered")]
    registered: String,
}

/// Format registered users as a table
pub fn format_user_list(users: &[User]) -> String {
    if users.is_empty() {
        return "No users found.".to_string();
    }

    let rows = users.iter().map(|u| UserRow {
        id: u.id,
        name: u.name.to_string(),
        registered: u.created_at.format("%Y-%m-%d %H:%M").to_string(),
    });

    render(Table::new(rows))
}

/// Confirmation shown once after registration, including the protection code
pub fn format_registration(user: &User) -> String {
    let mut output = format!("Created user: {} (ID: {})\n", user.name, user.id);
    if let Some(code) = &user.protection_code {
        output.push_str(&format!("  Protection code: {}\n", code.reveal()));
        output.push_str("  Keep this code; it is required to delete the user.\n");
    }
    output
}

/// Format the names of users that can be restored
pub fn format_archived_list(users: &[Username]) -> String {
    if users.is_empty() {
        return "No archived users.".to_string();
    }

    let mut output = String::from("Archived users:\n");
    for user in users {
        output.push_str(&format!("  {}\n", user));
    }
    output
}
