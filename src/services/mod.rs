//! Service layer for Liftlog
//!
//! The service layer provides business logic on top of the storage layer,
//! handling validation, per-user locking, audit logging and the user
//! lifecycle.

pub mod exercise;
pub mod import;
pub mod lifecycle;
pub mod user;
pub mod workout;

pub use exercise::{ExerciseService, UpsertOutcome};
pub use import::{ImportService, ImportSummary};
pub use lifecycle::{LifecycleService, SnapshotImportResult};
pub use user::UserService;
pub use workout::WorkoutService;
