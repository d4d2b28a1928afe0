// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! User model for storage.

use serde::{Deserialize, Serialize};
use validator::Validate;

/// Registered user account.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct User {
    pub id: i64,
    pub name: String,
    /// Always stored trimmed and lower-cased
    pub email: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
}

/// Normalized registration data, checked before anything is hashed or stored.
#[derive(Debug, Clone, Validate)]
pub struct NewUser {
    #[validate(length(min = 1, message = "All fields are required."))]
    pub name: String,
    #[validate(
        length(min = 1, message = "All fields are required."),
        email(message = "Please enter a valid email address.")
    )]
    pub email: String,
    #[validate(length(min = 1, message = "All fields are required."))]
    pub password: String,
}

impl NewUser {
    /// Trim name and email and lower-case the email; the password is kept verbatim.
    pub fn normalized(name: &str, email: &str, password: &str) -> Self {
        Self {
            name: name.trim().to_string(),
            email: normalize_email(email),
            password: password.to_string(),
        }
    }
}

/// Canonical form used for storage and lookup.
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalized_trims_and_lowercases() {
        let user = NewUser::normalized("  Ada ", " Ada@Example.COM ", " pw ");
        assert_eq!(user.name, "Ada");
        assert_eq!(user.email, "ada@example.com");
        assert_eq!(user.password, " pw ");
        assert!(user.validate().is_ok());
    }

    #[test]
    fn test_blank_fields_fail_validation() {
        let user = NewUser::normalized("   ", "ada@example.com", "secret");
        assert!(user.validate().is_err());

        let user = NewUser::normalized("Ada", "ada@example.com", "");
        assert!(user.validate().is_err());
    }

    #[test]
    fn test_malformed_email_fails_validation() {
        let user = NewUser::normalized("Ada", "not-an-email", "secret");
        let errors = user.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("email"));
    }
}
