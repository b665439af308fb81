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

//! Form state and the submit state machine.

use std::fmt;

use escrow_auth_types::Credentials;

/// Where the form is in its submit cycle.
///
/// ```text
///   Idle ──submit──▶ Submitting ──success──▶ Idle
///    ▲                   │
///    │                failure
///    │                   ▼
///    └──────────────  Failed(msg) ──submit──▶ Submitting
/// ```
///
/// `submit` is only available from `Idle` and `Failed`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Phase {
    #[default]
    Idle,
    Submitting,
    /// The last attempt failed; the message is what the form displays.
    Failed(String),
}

/// Everything the login form renders.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct FormState {
    pub email: String,
    pub password: String,
    pub remember_me: bool,
    pub phase: Phase,
}

impl FormState {
    pub fn submitting(&self) -> bool {
        matches!(self.phase, Phase::Submitting)
    }

    /// The message for the error region, if the last attempt failed.
    pub fn error_message(&self) -> Option<&str> {
        match &self.phase {
            Phase::Failed(message) => Some(message.as_str()),
            _ => None,
        }
    }

    pub fn has_required_fields(&self) -> bool {
        !self.email.is_empty() && !self.password.is_empty()
    }

    /// Both fields filled and no request in flight.
    pub fn can_submit(&self) -> bool {
        self.has_required_fields() && !self.submitting()
    }

    pub(crate) fn credentials(&self) -> Credentials {
        Credentials::new(self.email.clone(), self.password.clone())
    }
}

impl fmt::Debug for FormState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FormState")
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .field("remember_me", &self.remember_me)
            .field("phase", &self.phase)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form(email: &str, password: &str, phase: Phase) -> FormState {
        FormState {
            email: email.to_string(),
            password: password.to_string(),
            remember_me: false,
            phase,
        }
    }

    fn all_phases() -> [Phase; 3] {
        [Phase::Idle, Phase::Submitting, Phase::Failed("x".into())]
    }

    #[test]
    fn new_form_is_empty_and_idle() {
        let state = FormState::default();
        assert!(state.email.is_empty());
        assert!(state.password.is_empty());
        assert!(!state.remember_me);
        assert!(!state.submitting());
        assert_eq!(state.error_message(), None);
    }

    #[test]
    fn missing_field_blocks_submit_in_every_phase() {
        for phase in all_phases() {
            assert!(!form("", "", phase.clone()).can_submit());
            assert!(!form("a@b.c", "", phase.clone()).can_submit());
            assert!(!form("", "pw", phase.clone()).can_submit());
        }
    }

    #[test]
    fn filled_form_submits_unless_busy() {
        assert!(form("a@b.c", "pw", Phase::Idle).can_submit());
        assert!(form("a@b.c", "pw", Phase::Failed("bad".into())).can_submit());
        assert!(!form("a@b.c", "pw", Phase::Submitting).can_submit());
    }

    #[test]
    fn error_message_only_in_failed_phase() {
        assert_eq!(
            form("a", "b", Phase::Failed("Account locked".into())).error_message(),
            Some("Account locked")
        );
        assert_eq!(form("a", "b", Phase::Submitting).error_message(), None);
    }

    #[test]
    fn debug_redacts_password() {
        let printed = format!("{:?}", form("a@b.c", "hunter2", Phase::Idle));
        assert!(!printed.contains("hunter2"));
    }
}
