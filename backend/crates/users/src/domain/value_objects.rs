//! Domain Value Objects
//!
//! ## User name rules
//! - ASCII letters, digits and `_ . -`; stored lowercase
//! - 3 to 30 characters after trimming
//! - Starts and ends with a letter or digit
//!
//! ## Email rules
//! Basic shape check only (one `@`, dotted domain), stored lowercase.

use crate::error::{UsersError, UsersResult};
use std::fmt;

pub const USER_NAME_MIN_LENGTH: usize = 3;
pub const USER_NAME_MAX_LENGTH: usize = 30;

const EMAIL_MAX_LENGTH: usize = 255;

/// Canonical (lowercase) user name
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct UserName(String);

impl UserName {
    pub fn parse(raw: &str) -> UsersResult<Self> {
        let name = raw.trim().to_ascii_lowercase();
        let len = name.chars().count();

        if len < USER_NAME_MIN_LENGTH || len > USER_NAME_MAX_LENGTH {
            return Err(UsersError::Validation(format!(
                "User name must be {USER_NAME_MIN_LENGTH}-{USER_NAME_MAX_LENGTH} characters"
            )));
        }
        if !name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '.' | '-'))
        {
            return Err(UsersError::Validation(
                "User name may only contain letters, digits, '_', '.' and '-'".to_string(),
            ));
        }

        let edge_ok = |c: Option<char>| c.is_some_and(|c| c.is_ascii_alphanumeric());
        if !edge_ok(name.chars().next()) || !edge_ok(name.chars().last()) {
            return Err(UsersError::Validation(
                "User name must start and end with a letter or digit".to_string(),
            ));
        }

        Ok(Self(name))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for UserName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Email address value object
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Email(String);

impl Email {
    pub fn parse(raw: &str) -> UsersResult<Self> {
        let email = raw.trim().to_lowercase();

        if email.is_empty() {
            return Err(UsersError::Validation("Email cannot be empty".to_string()));
        }
        if email.len() > EMAIL_MAX_LENGTH {
            return Err(UsersError::Validation(format!(
                "Email must be at most {EMAIL_MAX_LENGTH} characters"
            )));
        }
        if !Self::is_valid_format(&email) {
            return Err(UsersError::Validation("Invalid email format".to_string()));
        }

        Ok(Self(email))
    }

    fn is_valid_format(email: &str) -> bool {
        let Some((local, domain)) = email.split_once('@') else {
            return false;
        };

        !local.is_empty()
            && local.len() <= 64
            && !domain.contains('@')
            && domain.contains('.')
            && domain
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '.' || c == '-')
            && !domain.starts_with(['.', '-'])
            && !domain.ends_with(['.', '-'])
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}
