//
//  pagerduty-cli
//  auth/credential.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # API Token Classification
//!
//! PagerDuty accepts two token shapes, each with its own `Authorization`
//! header scheme:
//!
//! | Kind | Shape | Header |
//! |------|-------|--------|
//! | Bearer | 64 hexadecimal characters (OAuth) | `Bearer <token>` |
//! | Legacy | 20 characters from `[A-Za-z0-9_-+/=]` (REST API key) | `Token token=<token>` |
//!
//! Any other string is rejected before a request is ever built. The
//! [`Credential`] type carries that guarantee: once parsed, producing its
//! header cannot fail.
//!
//! ## Example
//!
//! ```rust
//! use pagerduty_cli::auth::{Credential, CredentialKind};
//!
//! let credential = Credential::parse("y_NbAkKc66ryYTWUXYEu").unwrap();
//! assert_eq!(credential.kind(), CredentialKind::Legacy);
//! assert_eq!(credential.authorization_header(), "Token token=y_NbAkKc66ryYTWUXYEu");
//!
//! assert!(Credential::parse("not a token").is_err());
//! ```

use std::fmt;

use once_cell::sync::Lazy;
use regex::Regex;
use thiserror::Error;

/// Exactly 64 hexadecimal characters.
static BEARER_PATTERN: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[0-9a-fA-F]{64}$").unwrap());

/// Exactly 20 characters from the REST API key alphabet.
static LEGACY_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[0-9a-zA-Z_\-\+/=]{20}$").unwrap());

/// Returned when a string is neither a bearer nor a legacy token.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Invalid token '{masked}'")]
pub struct InvalidCredential {
    masked: String,
}

/// The shape of a PagerDuty API token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CredentialKind {
    /// OAuth token, sent as `Authorization: Bearer <token>`
    Bearer,
    /// REST API key, sent as `Authorization: Token token=<token>`
    Legacy,
}

impl CredentialKind {
    /// Classifies a token string.
    ///
    /// Returns `None` when the string matches neither shape.
    pub fn classify(token: &str) -> Option<Self> {
        if is_bearer_token(token) {
            Some(Self::Bearer)
        } else if is_legacy_token(token) {
            Some(Self::Legacy)
        } else {
            None
        }
    }
}

impl fmt::Display for CredentialKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bearer => write!(f, "OAuth bearer token"),
            Self::Legacy => write!(f, "REST API key"),
        }
    }
}

/// A validated PagerDuty API token.
///
/// Construction goes through [`Credential::parse`], so every `Credential` is
/// known to be either a bearer or a legacy token. The `Debug` output masks
/// the secret.
#[derive(Clone, PartialEq, Eq)]
pub struct Credential {
    token: String,
    kind: CredentialKind,
}

impl Credential {
    /// Validates and wraps a token string.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidCredential`] when the token matches neither shape.
    pub fn parse(token: &str) -> Result<Self, InvalidCredential> {
        let kind = CredentialKind::classify(token).ok_or_else(|| InvalidCredential {
            masked: mask_token(token),
        })?;

        Ok(Self {
            token: token.to_string(),
            kind,
        })
    }

    /// Returns the token shape.
    pub fn kind(&self) -> CredentialKind {
        self.kind
    }

    /// Returns the raw token.
    pub fn as_str(&self) -> &str {
        &self.token
    }

    /// Returns the token with all but its last four characters hidden.
    pub fn masked(&self) -> String {
        mask_token(&self.token)
    }

    /// Returns the `Authorization` header value for this token.
    pub fn authorization_header(&self) -> String {
        match self.kind {
            CredentialKind::Bearer => format!("Bearer {}", self.token),
            CredentialKind::Legacy => format!("Token token={}", self.token),
        }
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credential")
            .field("token", &self.masked())
            .field("kind", &self.kind)
            .finish()
    }
}

/// Checks for an OAuth bearer token (64 hexadecimal characters).
pub fn is_bearer_token(token: &str) -> bool {
    BEARER_PATTERN.is_match(token)
}

/// Checks for a legacy REST API key (20 characters from `[A-Za-z0-9_-+/=]`).
pub fn is_legacy_token(token: &str) -> bool {
    LEGACY_PATTERN.is_match(token)
}

/// Checks whether a token has either accepted shape.
pub fn is_valid_token(token: &str) -> bool {
    is_bearer_token(token) || is_legacy_token(token)
}

/// Builds the `Authorization` header value for a raw token string.
///
/// # Errors
///
/// Returns [`InvalidCredential`] when the token matches neither shape.
pub fn auth_header_for_token(token: &str) -> Result<String, InvalidCredential> {
    Credential::parse(token).map(|credential| credential.authorization_header())
}

/// Hides all but the last four characters of a token.
pub fn mask_token(token: &str) -> String {
    let chars: Vec<char> = token.chars().collect();
    if chars.len() <= 4 {
        return "*".repeat(chars.len());
    }
    let visible: String = chars[chars.len() - 4..].iter().collect();
    format!("{}{}", "*".repeat(chars.len() - 4), visible)
}
