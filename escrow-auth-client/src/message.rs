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

//! Turning a failure of any shape into the one line the login form shows.

use crate::error::AuthFailure;

/// Shown when nothing more specific can be extracted from a failure.
pub const FALLBACK_LOGIN_MESSAGE: &str =
    "Login failed. Please check your credentials and try again.";

/// Derive the user-facing message for a failed login.
///
/// First populated value wins:
///
/// 1. `detail` on the response body
/// 2. `message` on the response body
/// 3. the failure's own [`generic_message`](AuthFailure::generic_message)
/// 4. [`FALLBACK_LOGIN_MESSAGE`]
///
/// The result is never empty.
pub fn failure_message(failure: &AuthFailure) -> String {
    let body = failure.body();
    body.and_then(|b| b.detail())
        .or_else(|| body.and_then(|b| b.message()))
        .or_else(|| failure.generic_message())
        .unwrap_or(FALLBACK_LOGIN_MESSAGE)
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use escrow_auth_types::ErrorBody;
    use serde_json::json;
    use std::time::Duration;

    fn rejected(body: ErrorBody) -> AuthFailure {
        AuthFailure::Rejected { status: 401, body }
    }

    #[test]
    fn detail_wins_over_message() {
        let failure = rejected(ErrorBody::from(json!({
            "message": "Account locked",
            "detail": "Invalid credentials",
        })));
        assert_eq!(failure_message(&failure), "Invalid credentials");
    }

    #[test]
    fn message_used_when_detail_absent() {
        let failure = rejected(ErrorBody::from(json!({ "message": "Account locked" })));
        assert_eq!(failure_message(&failure), "Account locked");
    }

    #[test]
    fn empty_detail_falls_through_to_message() {
        let failure = rejected(ErrorBody::from(json!({ "detail": "", "message": "Try later" })));
        assert_eq!(failure_message(&failure), "Try later");
    }

    #[test]
    fn generic_message_used_when_body_has_neither_field() {
        let failure = AuthFailure::Message("Service unavailable".to_string());
        assert_eq!(failure_message(&failure), "Service unavailable");
    }

    #[test]
    fn unrecognized_shapes_fall_back() {
        let cases = [
            rejected(ErrorBody::from(json!({ "non_field_errors": ["nope"] }))),
            rejected(ErrorBody::Text("<h1>Bad Gateway</h1>".to_string())),
            rejected(ErrorBody::Empty),
            AuthFailure::Message("   ".to_string()),
            AuthFailure::TimedOut(Duration::from_secs(30)),
        ];
        for failure in &cases {
            assert_eq!(failure_message(failure), FALLBACK_LOGIN_MESSAGE, "{failure:?}");
        }
    }
}
