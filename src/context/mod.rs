//
//  pagerduty-cli
//  context/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # Session Context Module
//!
//! Everything a command needs before it can talk to PagerDuty: the selected
//! profile, a validated credential and a configured [`PagerDutyClient`].
//!
//! ## Resolution
//!
//! [`SessionResolver`] picks the profile (`--profile`, `PD_PROFILE`, then
//! `core.default_profile`) and the token (`--token`, `PD_TOKEN`, then the
//! keyring entry of that profile). A token with the wrong shape is fatal;
//! no request is ever sent with it.
//!
//! ## Example
//!
//! ```rust,no_run
//! use pagerduty_cli::cli::GlobalOptions;
//! use pagerduty_cli::config::Config;
//! use pagerduty_cli::context::SessionResolver;
//!
//! # async fn demo() -> anyhow::Result<()> {
//! let session = SessionResolver::new(Config::load()?).resolve(&GlobalOptions::default())?;
//! let users = session.fetch("/users", Default::default(), "Getting users").await?;
//! println!("{} users", users.len());
//! # Ok(())
//! # }
//! ```

mod resolver;

pub use resolver::*;

use std::time::Duration;

use anyhow::Result;
use indicatif::{ProgressBar, ProgressStyle};
use serde_json::Value;
use thiserror::Error;

use crate::api::{PagerDutyClient, Params, PdResult};
use crate::auth::{InvalidCredential, TokenSource};
use crate::config::{Config, ProfileConfig};
use crate::exit_codes;

/// A resolved profile with a ready-to-use client.
#[derive(Debug)]
pub struct Session {
    /// Name of the selected profile
    pub profile: String,
    /// Where the token came from
    pub token_source: TokenSource,
    /// Configuration the session was resolved from
    pub config: Config,
    /// Suppresses spinners, set for `--json`
    pub quiet: bool,
    client: PagerDutyClient,
}

impl Session {
    pub fn client(&self) -> &PagerDutyClient {
        &self.client
    }

    /// Settings of the selected profile, if it has any.
    pub fn profile_settings(&self) -> Option<&ProfileConfig> {
        self.config.profile(&self.profile)
    }

    /// Drains a paginated endpoint behind a spinner.
    pub async fn fetch(&self, endpoint: &str, params: Params, description: &str) -> Result<Vec<Value>> {
        fetch_with_spinner(&self.client, endpoint, params, description, self.quiet).await
    }
}

/// Runs a paginated fetch while a spinner shows `description` on stderr.
///
/// The spinner is skipped when `hidden` is set or stderr is not a terminal.
/// A failed fetch becomes an error carrying the API message.
pub async fn fetch_with_spinner(
    client: &PagerDutyClient,
    endpoint: &str,
    params: Params,
    description: &str,
    hidden: bool,
) -> Result<Vec<Value>> {
    let spinner = spinner(description, hidden);
    let result = client.fetch(endpoint, params).await;
    spinner.finish_and_clear();

    Ok(into_anyhow(result)?.unwrap_or_default())
}

/// Creates a stderr spinner, or a hidden bar when `hidden` is set.
pub fn spinner(message: &str, hidden: bool) -> ProgressBar {
    if hidden || !console::Term::stderr().is_term() {
        return ProgressBar::hidden();
    }

    let pb = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::default_spinner().template("{spinner:.green} {msg}") {
        pb.set_style(style);
    }
    pb.set_message(message.to_string());
    pb.enable_steady_tick(Duration::from_millis(100));
    pb
}

/// A failed API call, as reported by a command.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{message}")]
pub struct RequestFailed {
    /// HTTP status, if the API answered
    pub status: Option<u16>,
    pub message: String,
}

/// Converts an API result into an `anyhow` result.
///
/// Failures become [`RequestFailed`] carrying
/// [`crate::api::ApiError::detailed_message`] as the error text.
pub fn into_anyhow<T>(result: PdResult<T>) -> Result<Option<T>> {
    match result {
        PdResult::Success(value) => Ok(value),
        PdResult::Failure(error) => Err(RequestFailed {
            status: error.status(),
            message: error.detailed_message(),
        }
        .into()),
    }
}

/// Picks the process exit code for a failed command.
///
/// | Cause | Code |
/// |-------|------|
/// | missing or malformed token, `401`/`403` | [`exit_codes::AUTH_ERROR`] |
/// | `404` | [`exit_codes::NOT_FOUND`] |
/// | anything else | [`exit_codes::ERROR`] |
pub fn exit_code(err: &anyhow::Error) -> i32 {
    for cause in err.chain() {
        if cause.is::<InvalidCredential>() || cause.is::<MissingToken>() {
            return exit_codes::AUTH_ERROR;
        }
        if let Some(failed) = cause.downcast_ref::<RequestFailed>() {
            match failed.status {
                Some(401 | 403) => return exit_codes::AUTH_ERROR,
                Some(404) => return exit_codes::NOT_FOUND,
                _ => {}
            }
        }
    }
    exit_codes::ERROR
}
