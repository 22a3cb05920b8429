//
//  pagerduty-cli
//  cli/rest.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Raw REST API access
//!
//! Sends requests to any PagerDuty endpoint with the configured credential.
//! Useful for endpoints no other command covers.
//!
//! ## Examples
//!
//! ```bash
//! # One request
//! pd rest get /incidents -P statuses[]=triggered -P limit=5
//!
//! # Every page of a collection
//! pd rest fetch /services -P include[]=teams
//!
//! # Update with a JSON body and an extra header
//! pd rest put /users/PABC123 -d '{"user": {"name": "Jane"}}' -H 'From: jane@acme.com'
//!
//! # Body from a file
//! pd rest post /incidents -d @incident.json
//! ```

use std::fs;

use anyhow::{bail, Context, Result};
use clap::{Args, Subcommand};
use reqwest::Method;
use serde_json::Value;

use crate::api::{Params, Request};
use crate::context::{into_anyhow, resolve_session};
use crate::output::write_json;

use super::GlobalOptions;

/// Make raw REST API requests
#[derive(Args, Debug)]
pub struct RestCommand {
    #[command(subcommand)]
    pub command: RestSubcommand,
}

#[derive(Subcommand, Debug)]
pub enum RestSubcommand {
    /// Send a GET request
    Get(RestArgs),

    /// Send a POST request
    Post(RestArgs),

    /// Send a PUT request
    Put(RestArgs),

    /// Send a DELETE request
    Delete(RestArgs),

    /// GET every page of a collection endpoint
    Fetch(FetchArgs),
}

#[derive(Args, Debug)]
pub struct RestArgs {
    /// API endpoint (e.g. /incidents)
    pub endpoint: String,

    /// Query parameter as key=value (repeatable; `key[]=v` for arrays)
    #[arg(long = "param", short = 'P', action = clap::ArgAction::Append)]
    pub params: Vec<String>,

    /// Header override as 'Name: value' (repeatable)
    #[arg(long = "header", short = 'H', action = clap::ArgAction::Append)]
    pub headers: Vec<String>,

    /// JSON body, or @file to read it from a file (- for stdin)
    #[arg(long, short = 'd')]
    pub data: Option<String>,
}

#[derive(Args, Debug)]
pub struct FetchArgs {
    /// Collection endpoint (e.g. /services)
    pub endpoint: String,

    /// Query parameter as key=value (repeatable; `key[]=v` for arrays)
    #[arg(long = "param", short = 'P', action = clap::ArgAction::Append)]
    pub params: Vec<String>,
}

impl RestCommand {
    pub async fn run(&self, global: &GlobalOptions) -> Result<()> {
        let (method, args) = match &self.command {
            RestSubcommand::Get(args) => (Method::GET, args),
            RestSubcommand::Post(args) => (Method::POST, args),
            RestSubcommand::Put(args) => (Method::PUT, args),
            RestSubcommand::Delete(args) => (Method::DELETE, args),
            RestSubcommand::Fetch(args) => return self.fetch(args, global).await,
        };

        let mut request = Request::new(method, &args.endpoint)
            .with_params(parse_params(&args.params)?)
            .with_headers(
                args.headers
                    .iter()
                    .map(|h| parse_header(h))
                    .collect::<Result<Vec<_>>>()?,
            );
        if let Some(body) = read_body(args.data.as_deref())? {
            request = request.with_body(body);
        }

        let session = resolve_session(global)?;
        let value = into_anyhow(session.client().request(&request).await)?;

        write_json(&value.unwrap_or(Value::Null))
    }

    async fn fetch(&self, args: &FetchArgs, global: &GlobalOptions) -> Result<()> {
        let params = parse_params(&args.params)?;
        let session = resolve_session(global)?;

        let records = session
            .fetch(&args.endpoint, params, &format!("Fetching {}", args.endpoint))
            .await?;
        write_json(&records)
    }
}

/// Parses `key=value` pairs into query parameters.
///
/// Values are strings. A key given more than once, or written as `key[]`,
/// collects its values into an array.
pub fn parse_params(pairs: &[String]) -> Result<Params> {
    let mut params = Params::new();

    for pair in pairs {
        let Some((key, value)) = pair.split_once('=') else {
            bail!("Invalid parameter format: {}. Expected key=value", pair);
        };
        let key = key.trim();
        if key.is_empty() {
            bail!("Invalid parameter format: {}. Expected key=value", pair);
        }

        let (key, is_array) = match key.strip_suffix("[]") {
            Some(stripped) => (stripped, true),
            None => (key, false),
        };
        let value = Value::String(value.to_string());

        match params.get_mut(key) {
            Some(Value::Array(items)) => items.push(value),
            Some(existing) => {
                let first = existing.take();
                *existing = Value::Array(vec![first, value]);
            }
            None if is_array => {
                params.insert(key.to_string(), Value::Array(vec![value]));
            }
            None => {
                params.insert(key.to_string(), value);
            }
        }
    }

    Ok(params)
}

/// Parses a `Name: value` header.
pub fn parse_header(header: &str) -> Result<(String, String)> {
    match header.split_once(':') {
        Some((name, value)) if !name.trim().is_empty() => {
            Ok((name.trim().to_string(), value.trim().to_string()))
        }
        _ => bail!("Invalid header format: {}. Expected 'Name: Value'", header),
    }
}

fn read_body(data: Option<&str>) -> Result<Option<Value>> {
    let Some(data) = data else {
        return Ok(None);
    };

    let content = match data.strip_prefix('@') {
        Some("-") => {
            let mut buffer = String::new();
            std::io::Read::read_to_string(&mut std::io::stdin(), &mut buffer)?;
            buffer
        }
        Some(path) => fs::read_to_string(path).with_context(|| format!("Failed to read {}", path))?,
        None => data.to_string(),
    };

    let value = serde_json::from_str(&content).context("Request body is not valid JSON")?;
    Ok(Some(value))
}
