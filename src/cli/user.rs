//! User CLI commands
//!
//! Implements CLI commands for registering, deleting and restoring users.

use clap::Subcommand;

use crate::display::{format_archived_list, format_registration, format_user_list};
use crate::error::LiftlogResult;
use crate::services::{LifecycleService, UserService};
use crate::storage::Storage;

use super::prompt_secret;

/// User subcommands
#[derive(Subcommand)]
pub enum UserCommands {
    /// Register a new user
    Add {
        /// Username
        name: String,
    },
    /// List registered users
    List,
    /// Delete a user (data is backed up and archived)
    Delete {
        /// Username
        name: String,
        /// Protection code shown at registration (prompted if omitted)
        #[arg(short, long)]
        code: Option<String>,
    },
    /// Restore a deleted user from the archive
    Restore {
        /// Username
        name: String,
    },
    /// List deleted users that can be restored
    Archived,
}

/// Handle a user command
pub fn handle_user_command(storage: &Storage, cmd: UserCommands) -> LiftlogResult<()> {
    let users = UserService::new(storage);
    let lifecycle = LifecycleService::new(storage);

    match cmd {
        UserCommands::Add { name } => {
            let user = users.register(&name)?;
            print!("{}", format_registration(&user));
        }

        UserCommands::List => {
            println!("{}", format_user_list(&users.list()?));
        }

        UserCommands::Delete { name, code } => {
            // Fail fast before prompting
            let user = users.require(&name)?;
            let code = match code {
                Some(code) => code,
                None => prompt_secret(&format!("Protection code for {}: ", user.name))?,
            };

            let archive = lifecycle.delete_user(&name, code.trim())?;
            println!("Deleted user: {}", user.name);
            if let Some(archive) = archive {
                println!("Data archived to: {}", archive.path.display());
            }
            println!("Restore with: liftlog user restore {}", user.name);
        }

        UserCommands::Restore { name } => {
            let user = lifecycle.restore_user(&name)?;
            println!("Restored user: {} (ID: {})", user.name, user.id);
            if let Some(code) = &user.protection_code {
                println!("  New protection code: {}", code.reveal());
            }
        }

        UserCommands::Archived => {
            println!("{}", format_archived_list(&lifecycle.list_archived()?));
        }
    }

    Ok(())
}
