//! Email Value Object
//!
//! Staff contact address, stored lowercase.

use std::fmt;

use platform::sanitize::is_valid_email;
use thiserror::Error;

pub const EMAIL_MAX_LENGTH: usize = 100;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EmailError {
    #[error("Email cannot be empty")]
    Empty,

    #[error("Email must be at most {max} characters")]
    TooLong { max: usize },

    #[error("Invalid email format")]
    InvalidFormat,
}

/// Email address value object
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Email(String);

impl Email {
    pub fn new(email: impl AsRef<str>) -> Result<Self, EmailError> {
        let email = email.as_ref().trim().to_lowercase();

        if email.is_empty() {
            return Err(EmailError::Empty);
        }
        if email.chars().count() > EMAIL_MAX_LENGTH {
            return Err(EmailError::TooLong {
                max: EMAIL_MAX_LENGTH,
            });
        }
        if !is_valid_email(&email) {
            return Err(EmailError::InvalidFormat);
        }

        Ok(Self(email))
    }

    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    #[inline]
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for Email {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
