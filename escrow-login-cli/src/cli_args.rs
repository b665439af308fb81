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

use std::time::Duration;

use clap::{Args, Parser, Subcommand};
use escrow_auth_client::ClientConfig;

/// Escrow account login
///
/// Signs in to the surrogacy escrow API and manages the resulting session tokens.
///
/// The API base URL and request timeout default to the `API_URL` and
/// `AUTH_TIMEOUT_SECS` environment variables.
#[derive(Parser, Debug)]
#[clap(name = "escrow-login")]
pub struct Opt {
    /// Base URL of the escrow API (e.g. http://localhost:8000/api).
    #[clap(long = "api-url", global = true)]
    pub api_url: Option<String>,

    /// Give up on a request after this many seconds.
    #[arg(long = "timeout-secs", global = true, value_parser = clap::value_parser!(u64).range(1..))]
    pub timeout_secs: Option<u64>,

    #[clap(subcommand)]
    pub mode: Mode,
}

impl Opt {
    /// Layer command-line overrides on top of the environment configuration.
    pub fn client_config(&self, base: ClientConfig) -> ClientConfig {
        ClientConfig {
            api_url: self.api_url.clone().unwrap_or(base.api_url),
            timeout: self
                .timeout_secs
                .map(Duration::from_secs)
                .unwrap_or(base.timeout),
        }
    }
}

#[derive(Subcommand, Debug)]
pub enum Mode {
    /// Log in with email and password.
    Login(Login),

    /// Exchange a refresh token for a new access token.
    Refresh(Refresh),

    /// Show the profile of the user owning an access token.
    Profile(Profile),

    /// Change the first and/or last name on the profile.
    UpdateProfile(UpdateProfile),

    /// Change the account password. Current and new password are read from
    /// stdin, one per line.
    ChangePassword(ChangePassword),

    /// Blacklist a refresh token.
    Logout(Logout),
}

/// Tokens for endpoints that need an authenticated session.
#[derive(Args, Debug, Clone)]
pub struct Session {
    #[clap(long = "access")]
    pub access: String,

    /// Renew the access token with this if the server rejects it.
    #[clap(long = "refresh")]
    pub refresh: Option<String>,
}

#[derive(Args, Debug, Clone)]
pub struct Login {
    #[clap(long = "email")]
    pub email: String,

    /// Password. Read from the first line of stdin when omitted.
    #[clap(long = "password")]
    pub password: Option<String>,

    /// Also print the refresh token so the session can be resumed later.
    #[clap(long = "remember-me")]
    pub remember_me: bool,
}

#[derive(Args, Debug, Clone)]
pub struct Refresh {
    #[clap(long = "refresh")]
    pub refresh: String,
}

#[derive(Args, Debug, Clone)]
pub struct Profile {
    #[clap(flatten)]
    pub session: Session,
}

#[derive(Args, Debug, Clone)]
pub struct UpdateProfile {
    #[clap(flatten)]
    pub session: Session,

    #[clap(long = "first-name")]
    pub first_name: Option<String>,

    #[clap(long = "last-name")]
    pub last_name: Option<String>,
}

#[derive(Args, Debug, Clone)]
pub struct ChangePassword {
    #[clap(flatten)]
    pub session: Session,
}

#[derive(Args, Debug, Clone)]
pub struct Logout {
    #[clap(long = "access")]
    pub access: String,

    #[clap(long = "refresh")]
    pub refresh: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_login_with_global_flags() {
        let opt = Opt::try_parse_from([
            "escrow-login",
            "login",
            "--email",
            "ip@example.com",
            "--remember-me",
            "--api-url",
            "https://escrow.example.com/api",
        ])
        .unwrap();
        let Mode::Login(login) = &opt.mode else {
            panic!("expected login mode");
        };
        assert_eq!(login.email, "ip@example.com");
        assert!(login.password.is_none());
        assert!(login.remember_me);
        assert_eq!(
            opt.client_config(ClientConfig::default()).api_url,
            "https://escrow.example.com/api"
        );
    }

    #[test]
    fn flags_override_only_what_is_given() {
        let opt = Opt::try_parse_from(["escrow-login", "--timeout-secs", "5", "refresh", "--refresh", "r"])
            .unwrap();
        let base = ClientConfig {
            api_url: "http://from-env/api".to_string(),
            timeout: Duration::from_secs(30),
        };
        let config = opt.client_config(base);
        assert_eq!(config.api_url, "http://from-env/api");
        assert_eq!(config.timeout, Duration::from_secs(5));
    }

    #[test]
    fn parses_update_profile_with_optional_refresh() {
        let opt = Opt::try_parse_from([
            "escrow-login",
            "update-profile",
            "--access",
            "a",
            "--refresh",
            "r",
            "--last-name",
            "Lovelace",
        ])
        .unwrap();
        let Mode::UpdateProfile(update) = &opt.mode else {
            panic!("expected update-profile mode");
        };
        assert_eq!(update.session.access, "a");
        assert_eq!(update.session.refresh.as_deref(), Some("r"));
        assert!(update.first_name.is_none());
        assert_eq!(update.last_name.as_deref(), Some("Lovelace"));
    }

    #[test]
    fn rejects_zero_timeout() {
        assert!(Opt::try_parse_from(["escrow-login", "--timeout-secs", "0", "profile", "--access", "a"]).is_err());
    }
}
