/*
 * Copyright 2025 Security Union LLC
 *
 * Licensed under either of
 *
 * * Apache License, Version 2.0
 *   (http://www.apache.org/licenses/LICENSE-2.0)
 * * MIT license
 *   (http://opensource.org/licenses/MIT)
 *
 * at your option.
 */

//! Request bodies for the authentication endpoints.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Request body for `POST /auth/token/`.
///
/// A snapshot of the login form taken at submit time. It is handed to the
/// session client and dropped once the request resolves.
#[derive(Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

impl Credentials {
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
        }
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Request body for `POST /auth/token/refresh/`.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct RefreshRequest {
    pub refresh: String,
}

/// Request body for `POST /auth/logout/`.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct LogoutRequest {
    /// The refresh token to blacklist.
    pub refresh_token: String,
}

/// Request body for `PUT /auth/profile/update/`. Absent fields are left
/// unchanged on the server.
#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq, Eq)]
pub struct ProfileUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
}

/// Request body for `POST /auth/password/change/`.
#[derive(Serialize, Deserialize, Clone)]
pub struct PasswordChange {
    pub current_password: String,
    pub new_password: String,
    pub confirm_new_password: String,
}

impl fmt::Debug for PasswordChange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PasswordChange").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn debug_redacts_password() {
        let creds = Credentials::new("user@test.com", "secret");
        let printed = format!("{creds:?}");
        assert!(printed.contains("user@test.com"));
        assert!(!printed.contains("secret"));
    }

    #[test]
    fn serializes_as_token_endpoint_body() {
        let creds = Credentials::new("user@test.com", "secret");
        let json = serde_json::to_value(&creds).unwrap();
        assert_eq!(
            json,
            serde_json::json!({ "email": "user@test.com", "password": "secret" })
        );
    }

    #[test]
    fn profile_update_omits_untouched_fields() {
        let update = ProfileUpdate {
            first_name: Some("Ada".to_string()),
            ..ProfileUpdate::default()
        };
        assert_eq!(
            serde_json::to_value(&update).unwrap(),
            serde_json::json!({ "first_name": "Ada" })
        );
    }

    #[test]
    fn password_change_debug_prints_no_secrets() {
        let change = PasswordChange {
            current_password: "old-secret".to_string(),
            new_password: "new-secret".to_string(),
            confirm_new_password: "new-secret".to_string(),
        };
        assert!(!format!("{change:?}").contains("secret"));
    }
}
