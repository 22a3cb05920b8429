//
//  pagerduty-cli
//  context/resolver.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # Session Resolver
//!
//! Turns global options and configuration into a [`Session`].
//!
//! ## Resolution Priority
//!
//! | Setting | Order |
//! |---------|-------|
//! | profile | `--profile` / `PD_PROFILE`, `core.default_profile` |
//! | token | `--token` / `PD_TOKEN`, keyring entry of the profile |
//! | base URL | `core.api_url`, `https://api.pagerduty.com` |

use anyhow::Result;
use thiserror::Error;
use tracing::debug;

use super::Session;
use crate::api::{ClientConfig, PagerDutyClient};
use crate::auth::{resolve_token, Credential, KeyringStore, TokenSource};
use crate::cli::GlobalOptions;
use crate::config::Config;

/// No token was passed and none is stored for the profile.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("No API token for profile '{profile}'. Run 'pd auth set --profile {profile}' or pass --token.")]
pub struct MissingToken {
    pub profile: String,
}

/// Resolves the profile, credential and client for a command.
pub struct SessionResolver {
    config: Config,
    store: KeyringStore,
}

impl SessionResolver {
    /// Creates a resolver backed by the default keyring service.
    pub fn new(config: Config) -> Self {
        Self {
            config,
            store: KeyringStore::new(),
        }
    }

    /// Returns the name of the profile a command runs under.
    pub fn profile_name(&self, options: &GlobalOptions) -> String {
        options
            .profile
            .as_deref()
            .map(str::trim)
            .filter(|p| !p.is_empty())
            .unwrap_or(&self.config.core.default_profile)
            .to_string()
    }

    /// Validates the token for `options` into a [`Credential`].
    ///
    /// # Errors
    ///
    /// Fails when no token is available or when it has neither the bearer
    /// nor the legacy shape.
    pub fn credential(&self, options: &GlobalOptions) -> Result<(Credential, TokenSource)> {
        let profile = self.profile_name(options);
        let Some(resolved) = resolve_token(options.token.as_deref(), &profile, &self.store)? else {
            return Err(MissingToken { profile }.into());
        };

        let credential = Credential::parse(&resolved.token)?;
        debug!(
            "Using {:?} token {} from {} for profile {}",
            credential.kind(),
            credential.masked(),
            resolved.source,
            profile
        );
        Ok((credential, resolved.source))
    }

    /// Builds the session for `options`.
    pub fn resolve(self, options: &GlobalOptions) -> Result<Session> {
        let profile = self.profile_name(options);
        let (credential, token_source) = self.credential(options)?;

        let client = PagerDutyClient::with_config(
            credential,
            ClientConfig {
                base_url: self.config.api_url().to_string(),
                batch_size: self.config.core.batch_size,
                ..ClientConfig::default()
            },
        )?;

        Ok(Session {
            profile,
            token_source,
            config: self.config,
            quiet: options.json,
            client,
        })
    }
}

/// Loads the configuration and resolves the session for `options`.
pub fn resolve_session(options: &GlobalOptions) -> Result<Session> {
    SessionResolver::new(Config::load()?).resolve(options)
}
