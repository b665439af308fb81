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

//! Login form controller for the escrow account-entry flow.
//!
//! [`LoginController`] owns the form fields, decides when the form may be
//! submitted, and drives one authentication request at a time through an
//! [`Authenticator`]. Whatever shape a failure takes, the form ends up showing
//! exactly one message and returns to a submittable state.
//!
//! The controller is meant to live on a single-threaded UI event loop. Its
//! state sits behind a `RefCell` and the only await point is the
//! authentication call itself. That call is bounded with `tokio::time`, so
//! the loop must be a Tokio runtime with the time driver enabled (a
//! `current_thread` runtime is enough).

pub mod controller;
pub mod state;

pub use controller::{LoginController, SkipReason, SubmitResult, DEFAULT_SUBMIT_TIMEOUT};
pub use escrow_auth_client::{Authenticator, FALLBACK_LOGIN_MESSAGE};
pub use state::{FormState, Phase};
