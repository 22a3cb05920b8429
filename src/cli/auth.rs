//
//  pagerduty-cli
//  cli/auth.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Authentication commands.
//!
//! Tokens are stored per profile in the system keyring. A token is checked
//! against `GET /users/me` before it is stored.

use anyhow::{bail, Result};
use clap::{Args, Subcommand};
use serde_json::{json, Value};

use crate::api::{ClientConfig, PagerDutyClient};
use crate::auth::{read_token_from_stdin, Credential, KeyringStore};
use crate::config::Config;
use crate::context::{into_anyhow, resolve_session, SessionResolver};
use crate::interactive::{prompt_confirm_with_default, prompt_input_optional, prompt_token};
use crate::output::{value_text, write_json, OutputWriter};

use super::GlobalOptions;

/// Manage API tokens.
///
/// The profile is taken from `--profile`, `PD_PROFILE` or the configured
/// default profile.
#[derive(Args, Debug)]
pub struct AuthCommand {
    #[command(subcommand)]
    pub command: AuthSubcommand,
}

#[derive(Subcommand, Debug)]
pub enum AuthSubcommand {
    /// Store an API token for a profile
    #[command(visible_alias = "login")]
    Set(SetArgs),

    /// Show the token and user of a profile
    #[command(visible_alias = "status")]
    Show(ShowArgs),

    /// Remove the stored token of a profile
    #[command(visible_alias = "logout")]
    Delete(DeleteArgs),
}

#[derive(Args, Debug)]
pub struct SetArgs {
    /// Read the token from standard input
    #[arg(long)]
    pub stdin: bool,

    /// Make this profile the default
    #[arg(long)]
    pub default: bool,

    /// Store the token without checking it against the API
    #[arg(long)]
    pub no_verify: bool,
}

#[derive(Args, Debug)]
pub struct ShowArgs {
    /// Do not call the API to look up the user
    #[arg(long)]
    pub offline: bool,
}

#[derive(Args, Debug)]
pub struct DeleteArgs {
    /// Skip the confirmation prompt
    #[arg(long, short = 'y')]
    pub yes: bool,
}

impl AuthCommand {
    pub async fn run(&self, global: &GlobalOptions) -> Result<()> {
        match &self.command {
            AuthSubcommand::Set(args) => set(args, global).await,
            AuthSubcommand::Show(args) => show(args, global).await,
            AuthSubcommand::Delete(args) => delete(args, global),
        }
    }
}

/// Validates and stores a token, recording the account email in the profile.
async fn set(args: &SetArgs, global: &GlobalOptions) -> Result<()> {
    let mut config = Config::load()?;
    let profile = SessionResolver::new(config.clone()).profile_name(global);

    let token = match global.token.as_deref().map(str::trim) {
        Some(token) if !token.is_empty() => token.to_string(),
        _ if args.stdin => read_token_from_stdin()?,
        _ if global.no_prompt => bail!("No token given. Pass --token or --stdin."),
        _ => prompt_token(&format!("API token for profile '{}'", profile))?,
    };
    let credential = Credential::parse(&token)?;

    let user = if args.no_verify {
        None
    } else {
        let client = PagerDutyClient::with_config(
            credential.clone(),
            ClientConfig {
                base_url: config.api_url().to_string(),
                ..ClientConfig::default()
            },
        )?;
        let response = client.me().await;
        if let Some(message) = response.get_error_message() {
            bail!("Token was rejected by PagerDuty: {}", message);
        }
        into_anyhow(response)?.and_then(|r| r.get("user").cloned())
    };

    KeyringStore::new().store(&profile, credential.as_str())?;

    let email = user.as_ref().and_then(|u| u.get("email")).map(value_text);
    if let Some(email) = &email {
        config.set(&format!("profiles.{}.email", profile), email)?;
    }
    let has_subdomain = config.profile(&profile).and_then(|p| p.subdomain.as_ref()).is_some();
    if !has_subdomain && !global.no_prompt && !args.stdin {
        if let Some(subdomain) = prompt_input_optional("Account subdomain (optional)")? {
            config.set(&format!("profiles.{}.subdomain", profile), &subdomain)?;
        }
    }
    if args.default {
        config.set("default_profile", &profile)?;
    }
    config.save()?;

    let output = OutputWriter::from_flag(global.json);
    match (&user, email) {
        (Some(user), Some(email)) => output.write_success(&format!(
            "Stored token for profile '{}' ({} <{}>)",
            profile,
            user.get("name").map(value_text).unwrap_or_default(),
            email
        )),
        _ => output.write_success(&format!("Stored token for profile '{}'", profile)),
    }
    Ok(())
}

async fn show(args: &ShowArgs, global: &GlobalOptions) -> Result<()> {
    let session = resolve_session(global)?;
    let credential = session.client().credential();

    let user = if args.offline {
        None
    } else {
        let response = session.client().me().await;
        if let Some(message) = response.get_error_message() {
            OutputWriter::table().write_warning(&format!("Could not look up the user: {}", message));
        }
        response
            .into_result()
            .ok()
            .flatten()
            .and_then(|r| r.get("user").cloned())
    };

    let field = |key: &str| -> String {
        user.as_ref()
            .and_then(|u| u.get(key))
            .map(value_text)
            .unwrap_or_default()
    };

    let settings = session.profile_settings();
    let subdomain = settings.and_then(|p| p.subdomain.clone());

    let record = json!({
        "profile": session.profile,
        "subdomain": subdomain,
        "source": session.token_source.to_string(),
        "kind": format!("{:?}", credential.kind()).to_lowercase(),
        "token": credential.masked(),
        "user": user.clone().unwrap_or(Value::Null),
    });

    if global.json {
        return write_json(&record);
    }

    let fields = vec![
        ("Profile", session.profile.clone()),
        ("Token", credential.masked()),
        ("Token type", format!("{:?}", credential.kind()).to_lowercase()),
        ("Source", session.token_source.to_string()),
        ("Subdomain", subdomain.clone().unwrap_or_default()),
        ("User", field("name")),
        ("Email", field("email")),
        ("Role", field("role")),
    ];
    OutputWriter::table().write_record(&record, &fields)
}

fn delete(args: &DeleteArgs, global: &GlobalOptions) -> Result<()> {
    let config = Config::load()?;
    let profile = SessionResolver::new(config).profile_name(global);

    let confirmed = args.yes
        || global.no_prompt
        || prompt_confirm_with_default(&format!("Remove the stored token for profile '{}'?", profile), false)?;
    if !confirmed {
        return Ok(());
    }

    KeyringStore::new().delete(&profile)?;
    OutputWriter::from_flag(global.json).write_success(&format!("Removed token for profile '{}'", profile));
    Ok(())
}
