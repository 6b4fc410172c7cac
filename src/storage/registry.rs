//! User registry for JSON storage
//!
//! Manages loading and saving the list of active users to users.json.

use std::path::PathBuf;
use std::sync::RwLock;

use crate::error::LiftlogError;
use crate::models::{User, Username};

use super::file_io::{read_json, write_json_atomic};

/// Serializable registry data structure
#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
pub struct RegistryData {
    pub users: Vec<User>,

    /// Next id to hand out; ids are never reused
    #[serde(default)]
    pub next_id: u64,
}

impl RegistryData {
    /// The next free id, never below any id already in use
    fn effective_next_id(&self) -> u64 {
        let above_max = self.users.iter().map(|u| u.id).max().unwrap_or(0) + 1;
        self.next_id.max(above_max)
    }
}

/// Repository for the user registry
pub struct UserRegistry {
    path: PathBuf,
    data: RwLock<RegistryData>,
}

impl UserRegistry {
    /// Create a new registry backed by the given file
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            data: RwLock::new(RegistryData::default()),
        }
    }

    /// Load the registry from disk (empty if the file doesn't exist)
    pub fn load(&self) -> Result<(), LiftlogError> {
        let file_data: RegistryData = read_json(&self.path)?;

        let mut data = self
            .data
            .write()
            .map_err(|e| LiftlogError::Storage(format!("Failed to acquire write lock: {}", e)))?;

        *data = file_data;
        Ok(())
    }

    /// Save the registry to disk
    pub fn save(&self) -> Result<(), LiftlogError> {
        let data = self
            .data
            .read()
            .map_err(|e| LiftlogError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        let file_data = RegistryData {
            users: data.users.clone(),
            next_id: data.effective_next_id(),
        };

        write_json_atomic(&self.path, &file_data)
    }

    /// Get all users in registration order
    pub fn get_all(&self) -> Result<Vec<User>, LiftlogError> {
        let data = self
            .data
            .read()
            .map_err(|e| LiftlogError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        Ok(data.users.clone())
    }

    /// Get a user by exact name
    pub fn get_by_name(&self, name: &Username) -> Result<Option<User>, LiftlogError> {
        let data = self
            .data
            .read()
            .map_err(|e| LiftlogError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        Ok(data.users.iter().find(|u| &u.name == name).cloned())
    }

    /// Check whether a user is registered
    pub fn contains(&self, name: &Username) -> Result<bool, LiftlogError> {
        Ok(self.get_by_name(name)?.is_some())
    }

    /// Create and insert a new user, assigning the next id
    ///
    /// Fails with `Duplicate` if the name is taken; the registry is left
    /// untouched in that case.
    pub fn create(&self, name: Username) -> Result<User, LiftlogError> {
        let mut data = self
            .data
            .write()
            .map_err(|e| LiftlogError::Storage(format!("Failed to acquire write lock: {}", e)))?;

        if data.users.iter().any(|u| u.name == name) {
            return Err(LiftlogError::user_exists(name.as_str()));
        }

        let id = data.effective_next_id();
        let user = User::new(id, name);
        data.users.push(user.clone());
        data.next_id = id + 1;

        Ok(user)
    }

    /// Remove a user by name, returning the removed record
    pub fn remove(&self, name: &Username) -> Result<Option<User>, LiftlogError> {
        let mut data = self
            .data
            .write()
            .map_err(|e| LiftlogError::Storage(format!("Failed to acquire write lock: {}", e)))?;

        let position = data.users.iter().position(|u| &u.name == name);
        Ok(position.map(|i| data.users.remove(i)))
    }

    /// Replace the whole user list (snapshot import)
    pub fn replace_all(&self, users: Vec<User>) -> Result<(), LiftlogError> {
        let mut data = self
            .data
            .write()
            .map_err(|e| LiftlogError::Storage(format!("Failed to acquire write lock: {}", e)))?;

        let next_id = data.effective_next_id();
        data.users = users;
        data.next_id = data.effective_next_id().max(next_id);
        Ok(())
    }
}
