//
//  pagerduty-cli
//  auth/token.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # Token Resolution
//!
//! A command finds its API token in this order:
//!
//! 1. The `--token` flag, or the `PD_TOKEN` environment variable
//! 2. The keyring entry of the selected profile
//!
//! The first non-blank value wins. Resolution does not validate the token's
//! shape; that happens once, when the value is parsed into a
//! [`Credential`](super::Credential).

use std::fmt;

use anyhow::Result;

use super::KeyringStore;

/// Where a resolved token came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenSource {
    /// `--token` or `PD_TOKEN`
    Explicit,
    /// The keyring entry of a profile
    Keyring,
}

impl fmt::Display for TokenSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Explicit => write!(f, "--token / PD_TOKEN"),
            Self::Keyring => write!(f, "keyring"),
        }
    }
}

/// A token together with its origin.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedToken {
    /// The raw token string
    pub token: String,
    /// Where it was found
    pub source: TokenSource,
}

/// Resolves the token for `profile`.
///
/// Returns `Ok(None)` when neither an explicit token nor a keyring entry is
/// available. Keyring access errors are propagated.
pub fn resolve_token(
    explicit: Option<&str>,
    profile: &str,
    store: &KeyringStore,
) -> Result<Option<ResolvedToken>> {
    if let Some(token) = non_blank(explicit) {
        return Ok(Some(ResolvedToken {
            token,
            source: TokenSource::Explicit,
        }));
    }

    let stored = store.get(profile)?;
    Ok(non_blank(stored.as_deref()).map(|token| ResolvedToken {
        token,
        source: TokenSource::Keyring,
    }))
}

/// Reads a token from the first line of standard input.
///
/// Used when a token is piped in: `echo $TOKEN | pd auth set --stdin`.
pub fn read_token_from_stdin() -> Result<String> {
    use std::io::{self, BufRead};

    let stdin = io::stdin();
    let mut line = String::new();
    stdin.lock().read_line(&mut line)?;

    Ok(line.trim().to_string())
}

fn non_blank(token: Option<&str>) -> Option<String> {
    token
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(str::to_string)
}
