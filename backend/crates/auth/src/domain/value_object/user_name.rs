//! User Name Value Object
//!
//! Staff login names. Comparison is case-insensitive so `Admin` and
//! `admin` cannot both exist.

use std::fmt;

use thiserror::Error;
use unicode_normalization::UnicodeNormalization;

pub const USER_NAME_MIN_LENGTH: usize = 3;
pub const USER_NAME_MAX_LENGTH: usize = 50;

/// Error returned when user name validation fails
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UserNameError {
    #[error("Username cannot be empty")]
    Empty,

    #[error("Username is too short ({length} chars, minimum {min})")]
    TooShort { length: usize, min: usize },

    #[error("Username is too long ({length} chars, maximum {max})")]
    TooLong { length: usize, max: usize },

    #[error("Username cannot contain whitespace")]
    ContainsWhitespace,

    #[error("Username contains invalid character '{0}'")]
    InvalidCharacter(char),
}

/// Validated user name
///
/// # Invariants
/// - NFKC normalized and trimmed
/// - 3..=50 characters
/// - No whitespace or control characters
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct UserName(String);

impl UserName {
    pub fn new(input: impl AsRef<str>) -> Result<Self, UserNameError> {
        let normalized = Self::normalize(input.as_ref());
        Self::validate(&normalized)?;
        Ok(Self(normalized))
    }

    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    #[inline]
    pub fn into_inner(self) -> String {
        self.0
    }

    /// Case-insensitive match against a stored name
    pub fn matches(stored: &str, candidate: &str) -> bool {
        stored.to_lowercase() == Self::normalize(candidate).to_lowercase()
    }

    fn normalize(input: &str) -> String {
        input.nfkc().collect::<String>().trim().to_string()
    }

    fn validate(name: &str) -> Result<(), UserNameError> {
        if name.is_empty() {
            return Err(UserNameError::Empty);
        }

        let length = name.chars().count();
        if length < USER_NAME_MIN_LENGTH {
            return Err(UserNameError::TooShort {
                length,
                min: USER_NAME_MIN_LENGTH,
            });
        }
        if length > USER_NAME_MAX_LENGTH {
            return Err(UserNameError::TooLong {
                length,
                max: USER_NAME_MAX_LENGTH,
            });
        }

        for c in name.chars() {
            if c.is_whitespace() {
                return Err(UserNameError::ContainsWhitespace);
            }
            if c.is_control() {
                return Err(UserNameError::InvalidCharacter(c));
            }
        }

        Ok(())
    }
}

impl fmt::Display for UserName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
