//! User service
//!
//! Registration and lookup of active users. Deleting and restoring users
//! lives in the lifecycle service.

use serde_json::json;

use crate::audit::EntityType;
use crate::error::{LiftlogError, LiftlogResult};
use crate::models::{User, Username};
use crate::storage::file_io::remove_dir_if_exists;
use crate::storage::{init_user_storage, Storage};

/// Validate a username typed by a person
pub fn parse_username(name: &str) -> LiftlogResult<Username> {
    Username::new(name).map_err(|e| LiftlogError::Validation(e.to_string()))
}

/// Audit view of a user; never includes the protection code
pub(crate) fn audit_view(user: &User) -> serde_json::Value {
    json!({
        "id": user.id,
        "name": user.name,
        "created_at": user.created_at,
    })
}

/// Service for user management
pub struct UserService<'a> {
    storage: &'a Storage,
}

impl<'a> UserService<'a> {
    /// Create a new user service
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    /// Register a new user
    ///
    /// Creates the user's empty collections, then persists the registry. On
    /// any failure the registry and the disk are left as they were.
    pub fn register(&self, name: &str) -> LiftlogResult<User> {
        let name = parse_username(name)?;

        if self.storage.registry.contains(&name)? {
            return Err(LiftlogError::user_exists(name.as_str()));
        }

        let paths = self.storage.paths();
        let user_dir = paths.user_dir(&name);
        let dir_existed = user_dir.exists();
        if dir_existed {
            tracing::warn!(user = %name, "Reusing existing data directory for new user");
        }

        let user = self.storage.registry.create(name)?;

        let persisted = init_user_storage(paths, &user.name).and_then(|_| self.storage.registry.save());
        if let Err(e) = persisted {
            self.storage.registry.remove(&user.name)?;
            if !dir_existed {
                let _ = remove_dir_if_exists(&user_dir);
            }
            return Err(e);
        }

        self.storage.log_create(
            EntityType::User,
            user.name.as_str(),
            None,
            &audit_view(&user),
        )?;

        tracing::info!(user = %user.name, id = user.id, "Registered user");
        Ok(user)
    }

    /// All active users in registration order
    pub fn list(&self) -> LiftlogResult<Vec<User>> {
        self.storage.registry.get_all()
    }

    /// Look up a user by exact name
    pub fn get(&self, name: &str) -> LiftlogResult<Option<User>> {
        match Username::new(name) {
            Ok(name) => self.storage.registry.get_by_name(&name),
            Err(_) => Ok(None),
        }
    }

    /// Look up a user, failing with NotFound
    pub fn require(&self, name: &str) -> LiftlogResult<User> {
        self.get(name)?
            .ok_or_else(|| LiftlogError::user_not_found(name.trim()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::paths::LiftlogPaths;
    use crate::storage::initialize_storage;
    use tempfile::TempDir;

    fn create_test_storage() -> (TempDir, Storage) {
        let temp_dir = TempDir::new().unwrap();
        let paths = LiftlogPaths::with_base_dir(temp_dir.path().to_path_buf());
        initialize_storage(&paths).unwrap();
        let mut storage = Storage::new(paths).unwrap();
        storage.load_all().unwrap();
        (temp_dir, storage)
    }

    #[test]
    fn test_register_creates_files() {
        let (_temp_dir, storage) = create_test_storage();
        let service = UserService::new(&storage);

        let user = service.register("alice").unwrap();
        assert_eq!(user.name.as_str(), "alice");
        assert_eq!(user.protection_code.as_ref().unwrap().reveal().len(), 4);

        let paths = storage.paths();
        assert!(paths.exercises_file(&user.name).exists());
        assert!(paths.workouts_file(&user.name).exists());

        let on_disk = std::fs::read_to_string(paths.users_file()).unwrap();
        assert!(on_disk.contains("alice"));
    }

    #[test]
    fn test_register_twice_fails_and_leaves_registry() {
        let (_temp_dir, storage) = create_test_storage();
        let service = UserService::new(&storage);

        service.register("alice").unwrap();
        let before = service.list().unwrap();

        let err = service.register("alice").unwrap_err();
        assert!(err.is_duplicate());
        assert_eq!(service.list().unwrap(), before);
    }

    #[test]
    fn test_register_rejects_unsafe_names() {
        let (_temp_dir, storage) = create_test_storage();
        let service = UserService::new(&storage);

        for bad in ["", "../evil", "a/b", ".hidden"] {
            assert!(service.register(bad).unwrap_err().is_validation());
        }
        assert!(service.list().unwrap().is_empty());
    }

    #[test]
    fn test_audit_never_records_code() {
        let (_temp_dir, storage) = create_test_storage();
        let user = UserService::new(&storage).register("alice").unwrap();
        let code = user.protection_code.unwrap();

        let log = std::fs::read_to_string(storage.paths().audit_log()).unwrap();
        assert!(log.contains("alice"));
        assert!(!log.contains("protection_code"));
        assert!(!log.contains(&format!("\"{}\"", code.reveal())));
    }

    #[test]
    fn test_get_and_require() {
        let (_temp_dir, storage) = create_test_storage();
        let service = UserService::new(&storage);
        service.register("Bob").unwrap();

        assert!(service.get("Bob").unwrap().is_some());
        assert!(service.get("bob").unwrap().is_none());
        assert!(service.get("../x").unwrap().is_none());
        assert!(service.require("carol").unwrap_err().is_not_found());
    }

    #[test]
    fn test_ids_increase() {
        let (_temp_dir, storage) = create_test_storage();
        let service = UserService::new(&storage);

        let a = service.register("a").unwrap();
        let b = service.register("b").unwrap();
        assert!(b.id > a.id);
    }
}
