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

//! Error bodies of unknown shape.
//!
//! The backend does not wrap its errors in a fixed envelope. Depending on
//! which layer rejected the request the body may be `{ "detail": ... }`,
//! `{ "message": ... }`, a map of field errors, an HTML error page from a
//! proxy, or nothing at all. [`ErrorBody`] keeps whatever arrived and offers
//! typed lookups for the two fields the front end knows how to display.

use serde_json::Value;

/// Raw body of a failed response.
#[derive(Debug, Clone, PartialEq)]
pub enum ErrorBody {
    /// The body parsed as JSON (of any shape).
    Json(Value),
    /// A non-empty body that is not JSON.
    Text(String),
    /// No body, or only whitespace.
    Empty,
}

impl ErrorBody {
    /// Classify raw response text.
    pub fn from_text(text: &str) -> Self {
        if text.trim().is_empty() {
            return Self::Empty;
        }
        match serde_json::from_str::<Value>(text) {
            Ok(value) => Self::Json(value),
            Err(_) => Self::Text(text.to_string()),
        }
    }

    /// The top-level `detail` string, if present and non-empty.
    pub fn detail(&self) -> Option<&str> {
        self.string_field("detail")
    }

    /// The top-level `message` string, if present and non-empty.
    pub fn message(&self) -> Option<&str> {
        self.string_field("message")
    }

    /// The first message of a field-error map such as
    /// `{ "current_password": ["Current password is incorrect."] }`.
    ///
    /// Looks at the first top-level value only (keys in sorted order). A list yields its first
    /// entry; blank strings count as absent.
    pub fn first_field_error(&self) -> Option<&str> {
        let Self::Json(Value::Object(fields)) = self else {
            return None;
        };
        let message = match fields.values().next()? {
            Value::Array(items) => items.first().and_then(Value::as_str),
            other => other.as_str(),
        };
        message.filter(|s| !s.trim().is_empty())
    }

    fn string_field(&self, key: &str) -> Option<&str> {
        match self {
            Self::Json(value) => value
                .get(key)
                .and_then(Value::as_str)
                .filter(|s| !s.trim().is_empty()),
            Self::Text(_) | Self::Empty => None,
        }
    }
}

impl From<Value> for ErrorBody {
    fn from(value: Value) -> Self {
        Self::Json(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn classifies_raw_text() {
        assert_eq!(ErrorBody::from_text(""), ErrorBody::Empty);
        assert_eq!(ErrorBody::from_text("  \n"), ErrorBody::Empty);
        assert_eq!(
            ErrorBody::from_text("<html>502 Bad Gateway</html>"),
            ErrorBody::Text("<html>502 Bad Gateway</html>".to_string())
        );
        assert_eq!(
            ErrorBody::from_text(r#"{"detail":"nope"}"#),
            ErrorBody::Json(json!({ "detail": "nope" }))
        );
    }

    #[test]
    fn detail_and_message_are_independent_lookups() {
        let body = ErrorBody::from(json!({ "detail": "d", "message": "m" }));
        assert_eq!(body.detail(), Some("d"));
        assert_eq!(body.message(), Some("m"));
    }

    #[test]
    fn blank_or_non_string_fields_are_absent() {
        let body = ErrorBody::from(json!({ "detail": "   ", "message": 42 }));
        assert_eq!(body.detail(), None);
        assert_eq!(body.message(), None);

        let body = ErrorBody::from(json!({ "detail": ["Invalid"], "message": null }));
        assert_eq!(body.detail(), None);
        assert_eq!(body.message(), None);
    }

    #[test]
    fn non_object_json_has_no_fields() {
        let body = ErrorBody::from(json!(["detail", "message"]));
        assert_eq!(body.detail(), None);
        assert_eq!(ErrorBody::Text("detail".into()).detail(), None);
    }

    #[test]
    fn field_errors_map_has_no_display_field() {
        let body = ErrorBody::from_text(r#"{"email":["Enter a valid email address."]}"#);
        assert_eq!(body.detail(), None);
        assert_eq!(body.message(), None);
    }

    #[test]
    fn first_field_error_reads_list_or_string() {
        let body =
            ErrorBody::from_text(r#"{"current_password":["Current password is incorrect."]}"#);
        assert_eq!(
            body.first_field_error(),
            Some("Current password is incorrect.")
        );

        let body =
            ErrorBody::from(json!({ "confirm_new_password": "New passwords do not match." }));
        assert_eq!(body.first_field_error(), Some("New passwords do not match."));

        assert_eq!(ErrorBody::from(json!({ "code": 7 })).first_field_error(), None);
        assert_eq!(ErrorBody::Empty.first_field_error(), None);
    }
}
