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

use std::io::BufRead;

use anyhow::{anyhow, bail, Context};
use clap::Parser;
use escrow_auth_client::escrow_auth_types::requests::{PasswordChange, ProfileUpdate};
use escrow_auth_client::{AuthFailure, AuthMode, ClientConfig, SessionClient};
use escrow_login::{LoginController, SkipReason, SubmitResult};
use escrow_login_cli::cli_args::{
    ChangePassword, Login, Logout, Mode, Opt, Profile, Refresh, Session, UpdateProfile,
};
use tracing::level_filters::LevelFilter;
use tracing::{debug, info};

/// Best human-readable text for a failed session call.
fn describe(failure: &AuthFailure) -> String {
    failure
        .body()
        .and_then(|body| {
            body.detail()
                .or_else(|| body.message())
                .or_else(|| body.first_field_error())
        })
        .map(str::to_string)
        .unwrap_or_else(|| failure.to_string())
}

fn session_client(config: &ClientConfig, session: Session) -> anyhow::Result<SessionClient> {
    let client = SessionClient::from_config(config, AuthMode::Bearer(session.access))?;
    Ok(match session.refresh {
        Some(refresh) => client.with_refresh_token(refresh),
        None => client,
    })
}

fn read_password_from_stdin() -> anyhow::Result<String> {
    let mut line = String::new();
    std::io::stdin()
        .lock()
        .read_line(&mut line)
        .context("failed to read password from stdin")?;
    Ok(line.trim_end_matches(['\r', '\n']).to_string())
}

async fn login(config: &ClientConfig, args: Login) -> anyhow::Result<()> {
    let client = SessionClient::from_config(config, AuthMode::Anonymous)?;
    let mut controller = LoginController::new(client).with_timeout(config.timeout);
    controller.set_success_callback_fn(Box::new(|| info!("credentials accepted")));

    let password = match args.password {
        Some(password) => password,
        None => read_password_from_stdin()?,
    };
    controller.set_email(args.email);
    controller.set_password(password);
    controller.set_remember_me(args.remember_me);

    match controller.submit().await {
        SubmitResult::Authenticated {
            session,
            remember_me,
        } => {
            println!("Logged in as {}", session.user.email);
            println!("access: {}", session.access);
            if remember_me {
                println!("refresh: {}", session.refresh);
            }
            Ok(())
        }
        SubmitResult::Failed(message) => Err(anyhow!(message)),
        SubmitResult::Skipped(SkipReason::MissingFields) => {
            bail!("email and password are both required")
        }
        SubmitResult::Skipped(SkipReason::AlreadySubmitting) | SubmitResult::Discarded => {
            bail!("login did not complete")
        }
    }
}

async fn refresh(config: &ClientConfig, args: Refresh) -> anyhow::Result<()> {
    let client = SessionClient::from_config(config, AuthMode::Anonymous)?;
    let refreshed = client
        .refresh_token(&args.refresh)
        .await
        .context("token refresh failed")?;
    println!("access: {}", refreshed.access);
    Ok(())
}

async fn profile(config: &ClientConfig, args: Profile) -> anyhow::Result<()> {
    let mut client = session_client(config, args.session)?;
    let user = client
        .get_profile()
        .await
        .map_err(|f| anyhow!("failed to fetch profile: {}", describe(&f)))?;
    println!("{} {} <{}>", user.first_name, user.last_name, user.email);
    println!("id: {}", user.id);
    println!("active: {}", user.is_active);
    if let Some(joined) = user.date_joined {
        println!("joined: {joined}");
    }
    Ok(())
}

async fn update_profile(config: &ClientConfig, args: UpdateProfile) -> anyhow::Result<()> {
    if args.first_name.is_none() && args.last_name.is_none() {
        bail!("nothing to update: pass --first-name and/or --last-name");
    }
    let mut client = session_client(config, args.session)?;
    let update = ProfileUpdate {
        first_name: args.first_name,
        last_name: args.last_name,
    };
    let user = client
        .update_profile(&update)
        .await
        .map_err(|f| anyhow!("failed to update profile: {}", describe(&f)))?;
    println!("{} {} <{}>", user.first_name, user.last_name, user.email);
    Ok(())
}

async fn change_password(config: &ClientConfig, args: ChangePassword) -> anyhow::Result<()> {
    let mut client = session_client(config, args.session)?;
    let current_password = read_password_from_stdin()?;
    let new_password = read_password_from_stdin()?;
    let change = PasswordChange {
        current_password,
        confirm_new_password: new_password.clone(),
        new_password,
    };
    let status = client
        .change_password(&change)
        .await
        .map_err(|f| anyhow!("failed to change password: {}", describe(&f)))?;
    println!(
        "{}",
        status.message.as_deref().unwrap_or("Password changed")
    );
    Ok(())
}

async fn logout(config: &ClientConfig, args: Logout) -> anyhow::Result<()> {
    let mut client = SessionClient::from_config(config, AuthMode::Bearer(args.access))?;
    client
        .logout(&args.refresh)
        .await
        .map_err(|f| anyhow!("logout failed: {}", describe(&f)))?;
    println!("Logged out");
    Ok(())
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    // try_init also bridges `log` records from the client and controller crates.
    tracing_subscriber::FmtSubscriber::builder()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::builder()
                .with_default_directive(LevelFilter::INFO.into())
                .from_env_lossy(),
        )
        .try_init()
        .map_err(|e| anyhow!("failed to install tracing subscriber: {e}"))?;

    let opt = Opt::parse();
    let base = ClientConfig::from_env().map_err(anyhow::Error::msg)?;
    let config = opt.client_config(base);
    debug!("using API at {}", config.api_url);

    match opt.mode {
        Mode::Login(args) => login(&config, args).await,
        Mode::Refresh(args) => refresh(&config, args).await,
        Mode::Profile(args) => profile(&config, args).await,
        Mode::UpdateProfile(args) => update_profile(&config, args).await,
        Mode::ChangePassword(args) => change_password(&config, args).await,
        Mode::Logout(args) => logout(&config, args).await,
    }
}
