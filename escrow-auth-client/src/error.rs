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

//! Failure payloads for the session client.

use std::time::Duration;

use escrow_auth_types::ErrorBody;
use thiserror::Error;

/// Why a request to the authentication service did not succeed.
///
/// This is the raw Failure side of a session outcome. It is deliberately not
/// display-ready: [`failure_message`](crate::failure_message) turns it into
/// the single string shown to the user.
#[derive(Debug, Error)]
pub enum AuthFailure {
    /// The service answered with a non-2xx status. `body` is whatever came
    /// back, structured or not.
    #[error("Request rejected ({status})")]
    Rejected { status: u16, body: ErrorBody },

    /// Connection failure, TLS failure, or a 2xx body that did not decode.
    #[error("Network error: {0}")]
    Transport(#[from] reqwest::Error),

    /// No outcome arrived within the allotted time.
    #[error("Request timed out after {0:?}")]
    TimedOut(Duration),

    /// A failure that carries its own human-readable message.
    #[error("{0}")]
    Message(String),
}

impl AuthFailure {
    /// The response body, for failures that have one.
    pub fn body(&self) -> Option<&ErrorBody> {
        match self {
            Self::Rejected { body, .. } => Some(body),
            _ => None,
        }
    }

    /// The failure's own generic message, if it carries a non-empty one.
    ///
    /// Transport errors and timeouts return `None`: their text describes the
    /// plumbing, not anything the user can act on.
    pub fn generic_message(&self) -> Option<&str> {
        match self {
            Self::Message(message) if !message.trim().is_empty() => Some(message.as_str()),
            _ => None,
        }
    }

    /// HTTP status, for failures that reached the service.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Rejected { status, .. } => Some(*status),
            Self::Transport(err) => err.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}
