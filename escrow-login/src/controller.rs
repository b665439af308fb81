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

//! The credential submission controller.

use std::cell::{Cell, RefCell};
use std::time::Duration;

use escrow_auth_client::{failure_message, AuthFailure, Authenticator};
use log::{debug, info, warn};

use crate::state::{FormState, Phase};

/// Upper bound on one authentication request before the form gives up on it.
pub const DEFAULT_SUBMIT_TIMEOUT: Duration = Duration::from_secs(30);

/// Why a call to [`LoginController::submit`] did nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// Email or password is empty.
    MissingFields,
    /// A request from an earlier submit is still in flight.
    AlreadySubmitting,
}

/// What one call to [`LoginController::submit`] amounted to.
#[derive(Debug, PartialEq)]
pub enum SubmitResult<S> {
    /// No request was issued and the form state is unchanged.
    Skipped(SkipReason),
    /// The service accepted the credentials. `session` is passed through
    /// untouched; `remember_me` is the checkbox value at submit time.
    Authenticated { session: S, remember_me: bool },
    /// The attempt failed; the message is now shown on the form.
    Failed(String),
    /// The form was reset or left while the request was in flight, so the
    /// outcome was dropped without touching the new form state.
    Discarded,
}

/// Owns the login form and drives one authentication request at a time.
pub struct LoginController<A: Authenticator> {
    authenticator: A,
    state: RefCell<FormState>,
    // Bumped on every reset so that an in-flight request can tell it has
    // outlived the form it was submitted from.
    epoch: Cell<u64>,
    // Survives reset: the rendered phase may be back to Idle while an older
    // request is still outstanding.
    in_flight: Cell<bool>,
    timeout: Duration,
    on_success: Option<Box<dyn Fn()>>,
    on_leave: Option<Box<dyn Fn()>>,
}

impl<A: Authenticator> LoginController<A> {
    pub fn new(authenticator: A) -> Self {
        Self {
            authenticator,
            state: RefCell::new(FormState::default()),
            epoch: Cell::new(0),
            in_flight: Cell::new(false),
            timeout: DEFAULT_SUBMIT_TIMEOUT,
            on_success: None,
            on_leave: None,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Called once per successful submit, before the form leaves `Submitting`.
    pub fn set_success_callback_fn(&mut self, on_success: Box<dyn Fn()>) {
        self.on_success = Some(on_success);
    }

    /// Called by [`leave`](Self::leave), e.g. for "create an account instead".
    pub fn set_leave_callback_fn(&mut self, on_leave: Box<dyn Fn()>) {
        self.on_leave = Some(on_leave);
    }

    pub fn set_email(&self, value: impl Into<String>) {
        self.state.borrow_mut().email = value.into();
    }

    pub fn set_password(&self, value: impl Into<String>) {
        self.state.borrow_mut().password = value.into();
    }

    pub fn set_remember_me(&self, value: bool) {
        self.state.borrow_mut().remember_me = value;
    }

    /// False while any request is outstanding, including one started before
    /// the last [`reset`](Self::reset).
    pub fn can_submit(&self) -> bool {
        !self.in_flight.get() && self.state.borrow().can_submit()
    }

    pub fn is_submitting(&self) -> bool {
        self.state.borrow().submitting()
    }

    pub fn error_message(&self) -> Option<String> {
        self.state.borrow().error_message().map(str::to_string)
    }

    pub fn phase(&self) -> Phase {
        self.state.borrow().phase.clone()
    }

    /// Snapshot of the form for rendering.
    pub fn state(&self) -> FormState {
        self.state.borrow().clone()
    }

    /// Submit the current credentials.
    ///
    /// Does nothing unless [`can_submit`](Self::can_submit) holds. Otherwise
    /// clears any previous error, enters `Submitting`, and awaits exactly one
    /// authentication outcome (bounded by the configured timeout). The form
    /// leaves `Submitting` exactly once per cycle on every path, including
    /// when this future is dropped before it completes.
    ///
    /// At most one authentication call is outstanding per controller. A
    /// request that outlives a [`reset`](Self::reset) still blocks new
    /// submits until it resolves.
    ///
    /// The timeout uses `tokio::time`, so this must be polled inside a Tokio
    /// runtime with the time driver enabled.
    pub async fn submit(&self) -> SubmitResult<A::Session> {
        let (credentials, remember_me) = {
            let mut state = self.state.borrow_mut();
            if self.in_flight.get() || state.submitting() {
                debug!("submit ignored: request already in flight");
                return SubmitResult::Skipped(SkipReason::AlreadySubmitting);
            }
            if !state.has_required_fields() {
                debug!("submit ignored: email or password empty");
                return SubmitResult::Skipped(SkipReason::MissingFields);
            }
            state.phase = Phase::Submitting;
            (state.credentials(), state.remember_me)
        };
        let guard = SubmitGuard::new(&self.state, &self.epoch, &self.in_flight);

        debug!("submitting login for {}", credentials.email);
        let outcome = tokio::time::timeout(
            self.timeout,
            self.authenticator.authenticate(&credentials),
        )
        .await
        .unwrap_or_else(|_| Err(AuthFailure::TimedOut(self.timeout)));
        drop(credentials);

        if guard.is_stale() {
            debug!("login outcome dropped: form was reset while submitting");
            return SubmitResult::Discarded;
        }

        match outcome {
            Ok(session) => {
                info!("login succeeded");
                if let Some(on_success) = &self.on_success {
                    on_success();
                }
                guard.finish(Phase::Idle);
                SubmitResult::Authenticated {
                    session,
                    remember_me,
                }
            }
            Err(failure) => {
                warn!("login failed: {failure}");
                let message = failure_message(&failure);
                guard.finish(Phase::Failed(message.clone()));
                SubmitResult::Failed(message)
            }
        }
    }

    /// Return the form to its freshly-mounted state.
    ///
    /// A request still in flight is not cancelled. Its outcome will be
    /// discarded instead of applied, and submits stay blocked until it
    /// resolves.
    pub fn reset(&self) {
        self.epoch.set(self.epoch.get().wrapping_add(1));
        *self.state.borrow_mut() = FormState::default();
    }

    /// Leave the login flow without authenticating.
    pub fn leave(&self) {
        if let Some(on_leave) = &self.on_leave {
            on_leave();
        }
        self.reset();
    }
}

/// Holds the in-flight flag for one submit cycle and puts the form back to
/// `Idle` if the cycle ends without an outcome being applied (the submit
/// future was dropped, or a callback panicked).
struct SubmitGuard<'a> {
    state: &'a RefCell<FormState>,
    epoch: &'a Cell<u64>,
    in_flight: &'a Cell<bool>,
    started_at: u64,
    finished: bool,
}

impl<'a> SubmitGuard<'a> {
    fn new(
        state: &'a RefCell<FormState>,
        epoch: &'a Cell<u64>,
        in_flight: &'a Cell<bool>,
    ) -> Self {
        in_flight.set(true);
        Self {
            state,
            epoch,
            in_flight,
            started_at: epoch.get(),
            finished: false,
        }
    }

    fn is_stale(&self) -> bool {
        self.epoch.get() != self.started_at
    }

    fn finish(mut self, phase: Phase) {
        self.finished = true;
        if !self.is_stale() {
            self.state.borrow_mut().phase = phase;
        }
    }
}

impl Drop for SubmitGuard<'_> {
    fn drop(&mut self) {
        self.in_flight.set(false);
        if self.finished || self.is_stale() {
            return;
        }
        if let Ok(mut state) = self.state.try_borrow_mut() {
            if state.submitting() {
                state.phase = Phase::Idle;
            }
        }
    }
}
