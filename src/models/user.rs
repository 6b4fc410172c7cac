//! User model
//!
//! A user owns a private exercise catalog and workout log. Usernames double as
//! directory names on disk, so they are validated up front.

use chrono::NaiveDateTime;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;
use subtle::ConstantTimeEq;

/// Maximum length of a username in characters
pub const MAX_USERNAME_LEN: usize = 64;

/// Number of digits in a protection code
pub const PROTECTION_CODE_LEN: usize = 4;

/// A validated, path-safe username
///
/// Allowed characters are alphanumerics, space, `-`, `_` and `.`; the name
/// may not start with `.`. Comparison is case-sensitive.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Username(String);

impl Username {
    /// Validate and wrap a username
    pub fn new(name: &str) -> Result<Self, UserValidationError> {
        let trimmed = name.trim();

        if trimmed.is_empty() {
            return Err(UserValidationError::EmptyName);
        }

        let len = trimmed.chars().count();
        if len > MAX_USERNAME_LEN {
            return Err(UserValidationError::NameTooLong(len));
        }

        if trimmed.starts_with('.') {
            return Err(UserValidationError::LeadingDot);
        }

        if let Some(c) = trimmed
            .chars()
            .find(|c| !(c.is_alphanumeric() || matches!(c, ' ' | '-' | '_' | '.')))
        {
            return Err(UserValidationError::InvalidCharacter(c));
        }

        Ok(Self(trimmed.to_string()))
    }

    /// Get the username as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Username {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<String> for Username {
    type Error = UserValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(&value)
    }
}

impl From<Username> for String {
    fn from(name: Username) -> Self {
        name.0
    }
}

impl AsRef<str> for Username {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// A 4-digit secret that authorizes deleting a user
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ProtectionCode(String);

impl ProtectionCode {
    /// Generate a new random code
    pub fn generate() -> Self {
        let mut rng = rand::thread_rng();
        let code: String = (0..PROTECTION_CODE_LEN)
            .map(|_| char::from(b'0' + rng.gen_range(0..10u8)))
            .collect();
        Self(code)
    }

    /// Parse a code entered by a person
    pub fn parse(code: &str) -> Result<Self, UserValidationError> {
        let code = code.trim();
        if code.len() != PROTECTION_CODE_LEN || !code.chars().all(|c| c.is_ascii_digit()) {
            return Err(UserValidationError::MalformedCode);
        }
        Ok(Self(code.to_string()))
    }

    /// Compare against a candidate in constant time
    pub fn matches(&self, candidate: &str) -> bool {
        bool::from(self.0.as_bytes().ct_eq(candidate.trim().as_bytes()))
    }

    /// The code digits, for showing to the owner once
    pub fn reveal(&self) -> &str {
        &self.0
    }
}

// Never print the digits by accident
impl fmt::Debug for ProtectionCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ProtectionCode(****)")
    }
}

impl TryFrom<String> for ProtectionCode {
    type Error = UserValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<ProtectionCode> for String {
    fn from(code: ProtectionCode) -> Self {
        code.0
    }
}

/// A registered (active) user
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    /// Registry-wide identifier, never reused
    pub id: u64,

    /// Unique, case-sensitive name
    pub name: Username,

    /// When the user was registered
    pub created_at: NaiveDateTime,

    /// Deletion secret; absent on records written before codes existed
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub protection_code: Option<ProtectionCode>,
}

impl User {
    /// Create a new user with a freshly generated protection code
    pub fn new(id: u64, name: Username) -> Self {
        Self {
            id,
            name,
            created_at: chrono::Local::now().naive_local(),
            protection_code: Some(ProtectionCode::generate()),
        }
    }

    /// Check a candidate protection code
    ///
    /// Users without a stored code reject every candidate.
    pub fn verify_code(&self, candidate: &str) -> bool {
        self.protection_code
            .as_ref()
            .is_some_and(|code| code.matches(candidate))
    }
}

impl fmt::Display for User {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

/// Validation errors for users
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserValidationError {
    EmptyName,
    NameTooLong(usize),
    LeadingDot,
    InvalidCharacter(char),
    MalformedCode,
}

impl fmt::Display for UserValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyName => write!(f, "Username cannot be empty"),
            Self::NameTooLong(len) => write!(
                f,
                "Username too long ({} characters, max {})",
                len, MAX_USERNAME_LEN
            ),
            Self::LeadingDot => write!(f, "Username cannot start with '.'"),
            Self::InvalidCharacter(c) => {
                write!(f, "Username contains invalid character '{}'", c)
            }
            Self::MalformedCode => write!(
                f,
                "Protection code must be exactly {} digits",
                PROTECTION_CODE_LEN
            ),
        }
    }
}

impl std::error::Error for UserValidationError {}
