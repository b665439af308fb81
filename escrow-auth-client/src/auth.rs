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

//! Authentication and session endpoints: `/auth/token/`, `/auth/token/refresh/`,
//! `/auth/profile/`, `/auth/profile/update/`, `/auth/password/change/`,
//! `/auth/logout/`.
//!
//! Everything after login and refresh requires bearer auth and goes through
//! the client's refresh-once retry.

use escrow_auth_types::requests::{LogoutRequest, PasswordChange, ProfileUpdate, RefreshRequest};
use escrow_auth_types::responses::{
    LoginResponse, ProfileResponse, RefreshResponse, StatusResponse, UserProfile,
};
use escrow_auth_types::Credentials;

use crate::error::AuthFailure;
use crate::{parse_json_response, parse_status_only, Authenticator, SessionClient, SessionOutcome};

impl SessionClient {
    /// Exchange email and password for an access/refresh token pair.
    ///
    /// Calls `POST /auth/token/`. Sends the request once and awaits it; there
    /// are no retries. The returned [`LoginResponse`] is opaque to the login
    /// form and handed back to its host.
    pub async fn authenticate(&self, credentials: &Credentials) -> SessionOutcome<LoginResponse> {
        log::debug!("POST /auth/token/");
        let response = self.post("/auth/token/").json(credentials).send().await?;
        let session: LoginResponse = parse_json_response(response).await?;
        log::info!("authenticated user {}", session.user.id);
        Ok(session)
    }

    /// Trade a refresh token for a new access token.
    ///
    /// Calls `POST /auth/token/refresh/`. No `Authorization` header is sent,
    /// since the access token is usually the thing that expired.
    pub async fn refresh_token(&self, refresh: &str) -> Result<RefreshResponse, AuthFailure> {
        let body = RefreshRequest {
            refresh: refresh.to_string(),
        };
        let response = self
            .http
            .post(self.url("/auth/token/refresh/"))
            .json(&body)
            .send()
            .await?;
        parse_json_response(response).await
    }

    /// Get the authenticated user's profile.
    ///
    /// Calls `GET /auth/profile/`. Requires bearer auth.
    pub async fn get_profile(&mut self) -> Result<UserProfile, AuthFailure> {
        let response = self.send_authorized(|c| c.get("/auth/profile/")).await?;
        let wrapper: ProfileResponse = parse_json_response(response).await?;
        Ok(wrapper.user)
    }

    /// Change the user's first and/or last name.
    ///
    /// Calls `PUT /auth/profile/update/` and returns the updated profile.
    /// Requires bearer auth.
    pub async fn update_profile(
        &mut self,
        update: &ProfileUpdate,
    ) -> Result<UserProfile, AuthFailure> {
        let response = self
            .send_authorized(|c| c.put("/auth/profile/update/").json(update))
            .await?;
        let wrapper: ProfileResponse = parse_json_response(response).await?;
        Ok(wrapper.user)
    }

    /// Change the user's password.
    ///
    /// Calls `POST /auth/password/change/`. Requires bearer auth. Validation
    /// failures come back as a field-error map, see
    /// [`ErrorBody::first_field_error`](escrow_auth_types::ErrorBody::first_field_error).
    pub async fn change_password(
        &mut self,
        change: &PasswordChange,
    ) -> Result<StatusResponse, AuthFailure> {
        let response = self
            .send_authorized(|c| c.post("/auth/password/change/").json(change))
            .await?;
        parse_json_response(response).await
    }

    /// Blacklist the refresh token on the server.
    ///
    /// Calls `POST /auth/logout/`. Requires bearer auth.
    pub async fn logout(&mut self, refresh: &str) -> Result<(), AuthFailure> {
        let body = LogoutRequest {
            refresh_token: refresh.to_string(),
        };
        let response = self
            .send_authorized(|c| c.post("/auth/logout/").json(&body))
            .await?;
        parse_status_only(response).await
    }
}

impl Authenticator for SessionClient {
    type Session = LoginResponse;

    async fn authenticate(&self, credentials: &Credentials) -> SessionOutcome<LoginResponse> {
        SessionClient::authenticate(self, credentials).await
    }
}
