//! Shared-password access gate
//!
//! A single password in `config.json` protects the whole logbook. It is a
//! convenience lock for a shared machine, not an authentication system.

use subtle::ConstantTimeEq;

use super::settings::Settings;
use crate::error::{LiftlogError, LiftlogResult};

/// Check a supplied password against the configured one
///
/// Passes when no password is configured.
pub fn check_access(settings: &Settings, supplied: Option<&str>) -> LiftlogResult<()> {
    let expected = match settings.access_password.as_deref() {
        Some(p) if !p.is_empty() => p,
        _ => return Ok(()),
    };

    let supplied = supplied.ok_or_else(|| LiftlogError::Access("password required".into()))?;

    if bool::from(expected.as_bytes().ct_eq(supplied.as_bytes())) {
        Ok(())
    } else {
        tracing::warn!("Rejected access attempt with incorrect password");
        Err(LiftlogError::Access("incorrect password".into()))
    }
}
