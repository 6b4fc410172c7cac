//! Liftlog - multi-user workout logbook
//!
//! This library provides the core functionality for the Liftlog command-line
//! application. Several people share one machine; each has an exercise
//! catalog and a log of workout sets stored as JSON files, and deleted users
//! are archived so they can be restored later.
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - `config`: Configuration, path management and the access gate
//! - `error`: Custom error types
//! - `models`: Core data models (users, exercises, workout sets)
//! - `storage`: JSON file storage layer
//! - `services`: Business logic layer
//! - `audit`: Audit logging system
//! - `backup`: Full backups and the archive of deleted users
//! - `export`: Whole-system snapshots
//! - `reports`: Recent workouts, progress and weekly comparison
//! - `cli` / `display`: Command handlers and terminal tables
//!
//! # Example
//!
//! ```rust,ignore
//! use liftlog::config::paths::LiftlogPaths;
//! use liftlog::services::UserService;
//! use liftlog::storage::Storage;
//!
//! let mut storage = Storage::new(LiftlogPaths::new()?)?;
//! storage.load_all()?;
//! let alice = UserService::new(&storage).register("alice")?;
//! ```

pub mod audit;
pub mod backup;
pub mod cli;
pub mod config;
pub mod display;
pub mod error;
pub mod export;
pub mod models;
pub mod reports;
pub mod services;
pub mod storage;

pub use error::{LiftlogError, LiftlogResult};
