//! Configuration module for Liftlog
//!
//! This module provides configuration management including:
//! - Platform-aware path resolution
//! - Settings persistence
//! - The shared-password access gate

pub mod access;
pub mod paths;
pub mod settings;

pub use access::check_access;
pub use paths::LiftlogPaths;
pub use settings::Settings;
