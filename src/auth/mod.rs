//
//  pagerduty-cli
//  auth/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # Authentication Module
//!
//! PagerDuty authenticates every request with a single API token, sent in
//! the `Authorization` header. Two token shapes are accepted:
//!
//! - **OAuth bearer tokens**: 64 hexadecimal characters, sent as `Bearer <token>`
//! - **REST API keys**: 20 characters, sent as `Token token=<token>`
//!
//! ## Module Structure
//!
//! - [`credential`]: token classification and the validated [`Credential`] type
//! - [`keyring`]: per-profile token storage in the system keyring
//! - [`token`]: resolution of the active token from flags, environment and keyring

pub mod credential;
pub mod keyring;
pub mod token;

pub use self::credential::*;
pub use self::keyring::*;
pub use self::token::*;
