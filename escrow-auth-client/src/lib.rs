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

//! REST client for the escrow authentication endpoints.
//!
//! # Example
//!
//! ```no_run
//! use escrow_auth_client::{failure_message, AuthMode, SessionClient};
//! use escrow_auth_types::Credentials;
//!
//! # async fn example() {
//! let client = SessionClient::new("http://localhost:8000/api", AuthMode::Anonymous);
//! let credentials = Credentials::new("ip@example.com", "hunter2");
//!
//! match client.authenticate(&credentials).await {
//!     Ok(session) => println!("Logged in as: {}", session.user.email),
//!     Err(failure) => eprintln!("{}", failure_message(&failure)),
//! }
//! # }
//! ```

pub mod auth;
pub mod config;
pub mod error;
pub mod message;

pub use config::ClientConfig;
pub use error::AuthFailure;
pub use escrow_auth_types;
pub use message::{failure_message, FALLBACK_LOGIN_MESSAGE};

use std::future::Future;

use escrow_auth_types::{Credentials, ErrorBody};
use reqwest::{Client, StatusCode};

/// Terminal result of one authentication attempt.
pub type SessionOutcome<S> = Result<S, AuthFailure>;

/// Anything that can turn credentials into a session.
///
/// [`SessionClient`] is the production implementation; the login controller
/// is generic over this trait so it can be driven without a network.
pub trait Authenticator {
    /// Opaque session handle produced on success.
    type Session: Send;

    /// Issue exactly one authentication request and await its outcome.
    fn authenticate(
        &self,
        credentials: &Credentials,
    ) -> impl Future<Output = SessionOutcome<Self::Session>> + Send;
}

/// How the client authenticates its own requests.
#[derive(Debug, Clone)]
pub enum AuthMode {
    /// No `Authorization` header. Used for login and token refresh.
    Anonymous,
    /// Attach `Authorization: Bearer <token>` to every request.
    Bearer(String),
}

/// A typed REST client for the `/auth/*` endpoints.
///
/// When a refresh token is set, bearer-authenticated calls that come back
/// `401` trade it for a new access token once and replay the request.
#[derive(Debug, Clone)]
pub struct SessionClient {
    base_url: String,
    auth: AuthMode,
    refresh: Option<String>,
    http: Client,
}

impl SessionClient {
    /// Create a new client pointing at the given API base URL.
    ///
    /// # Arguments
    ///
    /// * `base_url` - e.g. `"http://localhost:8000/api"`
    /// * `auth` - how to authenticate requests
    pub fn new(base_url: &str, auth: AuthMode) -> Self {
        Self::with_http(base_url, auth, Client::new())
    }

    /// Create a client from [`ClientConfig`], applying its request timeout.
    pub fn from_config(config: &ClientConfig, auth: AuthMode) -> Result<Self, reqwest::Error> {
        let http = Client::builder().timeout(config.timeout).build()?;
        Ok(Self::with_http(&config.api_url, auth, http))
    }

    fn with_http(base_url: &str, auth: AuthMode, http: Client) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            auth,
            refresh: None,
            http,
        }
    }

    /// Keep a refresh token so an expired access token can be renewed.
    pub fn with_refresh_token(mut self, refresh: impl Into<String>) -> Self {
        self.refresh = Some(refresh.into());
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Update the bearer token (e.g. after login or a token refresh).
    pub fn set_bearer_token(&mut self, token: String) {
        self.auth = AuthMode::Bearer(token);
    }

    /// Drop the bearer token.
    pub fn clear_bearer_token(&mut self) {
        self.auth = AuthMode::Anonymous;
    }

    /// The access token currently attached to requests, if any.
    pub fn bearer_token(&self) -> Option<&str> {
        match &self.auth {
            AuthMode::Anonymous => None,
            AuthMode::Bearer(token) => Some(token.as_str()),
        }
    }

    /// Forget both tokens.
    pub fn clear_session(&mut self) {
        self.auth = AuthMode::Anonymous;
        self.refresh = None;
    }

    /// Build a GET request with auth applied.
    pub(crate) fn get(&self, path: &str) -> reqwest::RequestBuilder {
        self.apply_auth(self.http.get(self.url(path)))
    }

    /// Build a POST request with auth applied.
    pub(crate) fn post(&self, path: &str) -> reqwest::RequestBuilder {
        self.apply_auth(self.http.post(self.url(path)))
    }

    /// Build a PUT request with auth applied.
    pub(crate) fn put(&self, path: &str) -> reqwest::RequestBuilder {
        self.apply_auth(self.http.put(self.url(path)))
    }

    /// Send a bearer-authenticated request, renewing the access token once
    /// on `401`.
    ///
    /// `build` is called again for the replay so it picks up the new token.
    /// If the refresh itself fails the session is cleared and the original
    /// `401` response is returned.
    pub(crate) async fn send_authorized<F>(
        &mut self,
        build: F,
    ) -> Result<reqwest::Response, AuthFailure>
    where
        F: Fn(&Self) -> reqwest::RequestBuilder,
    {
        let response = build(self).send().await?;
        if response.status() != StatusCode::UNAUTHORIZED {
            return Ok(response);
        }
        let Some(refresh) = self.refresh.clone() else {
            return Ok(response);
        };

        log::debug!("access token rejected, refreshing once");
        match self.refresh_token(&refresh).await {
            Ok(renewed) => {
                self.set_bearer_token(renewed.access);
                Ok(build(self).send().await?)
            }
            Err(failure) => {
                log::warn!("token refresh failed, dropping session: {failure}");
                self.clear_session();
                Ok(response)
            }
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn apply_auth(&self, builder: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match &self.auth {
            AuthMode::Anonymous => builder,
            AuthMode::Bearer(token) => {
                builder.header(reqwest::header::AUTHORIZATION, format!("Bearer {token}"))
            }
        }
    }
}

/// Decode a 2xx JSON body into `T`, or capture the error body verbatim.
pub(crate) async fn parse_json_response<T: serde::de::DeserializeOwned>(
    response: reqwest::Response,
) -> Result<T, AuthFailure> {
    let status = response.status();
    if status.is_success() {
        return Ok(response.json().await?);
    }
    Err(rejection(status.as_u16(), response).await)
}

/// Parse a response where we only care about the status code, not the body.
pub(crate) async fn parse_status_only(response: reqwest::Response) -> Result<(), AuthFailure> {
    let status = response.status();
    if status.is_success() {
        return Ok(());
    }
    Err(rejection(status.as_u16(), response).await)
}

async fn rejection(status: u16, response: reqwest::Response) -> AuthFailure {
    let text = response.text().await.unwrap_or_default();
    log::debug!("request rejected with status {status} ({} byte body)", text.len());
    AuthFailure::Rejected {
        status,
        body: ErrorBody::from_text(&text),
    }
}
