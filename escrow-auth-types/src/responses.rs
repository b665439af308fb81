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

//! Success payloads returned by the authentication endpoints.
//!
//! Unlike error bodies these have a fixed shape, so they deserialize straight
//! into structs. Unknown fields are ignored.

use serde::{Deserialize, Serialize};

/// Response payload for `POST /auth/token/` (200 OK).
///
/// # Example
///
/// ```json
/// {
///   "access": "eyJ...",
///   "refresh": "eyJ...",
///   "user": { "id": 7, "email": "ip@example.com", "first_name": "Ada",
///             "last_name": "Byron", "is_superuser": false }
/// }
/// ```
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct LoginResponse {
    pub access: String,
    pub refresh: String,
    pub user: UserSummary,
}

/// The user block embedded in [`LoginResponse`].
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct UserSummary {
    pub id: i64,
    pub email: String,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default)]
    pub is_superuser: bool,
}

/// Response payload for `POST /auth/token/refresh/`.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct RefreshResponse {
    pub access: String,
}

/// Response payload for `GET /auth/profile/`: `{ "status": "success", "user": {...} }`.
///
/// `PUT /auth/profile/update/` answers with the same shape plus a `message`.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct ProfileResponse {
    pub status: String,
    #[serde(default)]
    pub message: Option<String>,
    pub user: UserProfile,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct UserProfile {
    pub id: i64,
    pub email: String,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default)]
    pub is_active: bool,
    #[serde(default)]
    pub is_staff: bool,
    #[serde(default)]
    pub is_superuser: bool,
    /// ISO-8601 timestamp, passed through as sent.
    #[serde(default)]
    pub date_joined: Option<String>,
}

/// `{ "status": ..., "message": ... }`, returned by `POST /auth/password/change/`.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct StatusResponse {
    pub status: String,
    #[serde(default)]
    pub message: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn login_response_ignores_extra_fields() {
        let raw = r#"{
            "access": "a", "refresh": "r", "expires_in": 300,
            "user": { "id": 1, "email": "x@y.z", "first_name": "X",
                      "last_name": "Y", "is_superuser": false, "role": "ip" }
        }"#;
        let parsed: LoginResponse = serde_json::from_str(raw).unwrap();
        assert_eq!(parsed.access, "a");
        assert_eq!(parsed.user.email, "x@y.z");
    }

    #[test]
    fn profile_tolerates_missing_optional_fields() {
        let raw = r#"{ "status": "success", "user": { "id": 3, "email": "s@e.com" } }"#;
        let parsed: ProfileResponse = serde_json::from_str(raw).unwrap();
        assert_eq!(parsed.user.id, 3);
        assert!(parsed.user.date_joined.is_none());
        assert!(!parsed.user.is_staff);
    }
}
