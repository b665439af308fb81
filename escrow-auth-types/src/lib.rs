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

//! Shared wire types for the escrow authentication API.
//!
//! This crate defines the contract between the account-entry front end and
//! the `/auth/*` endpoints of the escrow backend. It carries no HTTP client
//! and no UI state, only request bodies, response payloads and the adapter
//! over error bodies of unknown shape.

pub mod error;
pub mod requests;
pub mod responses;

pub use error::ErrorBody;
pub use requests::Credentials;
pub use responses::LoginResponse;
