//
//  pagerduty-cli
//  lib.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # PagerDuty CLI Library
//!
//! The core of the `pd` command-line client for the PagerDuty REST API (v2).
//!
//! ## Overview
//!
//! Commands are thin: they build query parameters, call the access layer and
//! print a table or JSON. The access layer does the real work:
//!
//! - **Authentication**: bearer (OAuth) and legacy (REST API key) tokens,
//!   validated before any request is sent
//! - **Requests**: one HTTP call with the standard PagerDuty headers, results
//!   wrapped in [`api::PdResult`]
//! - **Batches**: chunked concurrent requests, stopping at the first failed chunk
//! - **Pagination**: classic (`more`/`total`) and cursor (`next_cursor`)
//!   pagination drained behind one `fetch` call
//!
//! ## Module Structure
//!
//! - [`cli`]: Command-line interface definitions using clap
//! - [`api`]: PagerDuty client, pagination and lookup helpers
//! - [`auth`]: Token validation and keyring storage
//! - [`config`]: Configuration file management
//! - [`context`]: Profile and session resolution
//! - [`output`]: Output formatting (Table, CSV, JSON)
//! - [`interactive`]: Interactive prompts
//! - [`util`]: Date phrases and flag helpers
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use pagerduty_cli::api::PagerDutyClient;
//! use pagerduty_cli::auth::Credential;
//!
//! # async fn demo() -> anyhow::Result<()> {
//! let client = PagerDutyClient::new(Credential::parse("y_NbAkKc66ryYTWUXYEu")?)?;
//! let services = client.fetch("/services", Default::default()).await;
//! if let Some(services) = services.value() {
//!     println!("{} services", services.len());
//! }
//! # Ok(())
//! # }
//! ```

/// Command-line interface definitions.
pub mod cli;

/// PagerDuty REST API client.
///
/// Request execution, batching, pagination and the domain lookups built on
/// top of them.
pub mod api;

/// Token validation and secure storage in the system keyring.
pub mod auth;

/// Configuration file management.
///
/// Stored in platform-specific locations:
/// - Linux: `~/.config/pd/config.toml`
/// - macOS: `~/Library/Application Support/pd/config.toml`
/// - Windows: `%APPDATA%\pd\config.toml`
pub mod config;

/// Profile, credential and client resolution for commands.
pub mod context;

/// Output formatting: tables, CSV and JSON.
pub mod output;

/// Interactive terminal prompts.
pub mod interactive;

/// Utility functions and helpers.
pub mod util;

pub use cli::Cli;
pub use config::Config;
pub use context::Session;

/// Name of the CLI binary.
pub const APP_NAME: &str = "pd";

/// Application version, taken from Cargo.toml.
///
/// Sent in the `User-Agent` and `X-PagerDuty-Client` headers.
///
/// ```rust
/// use pagerduty_cli::VERSION;
///
/// println!("pd version {}", VERSION);
/// ```
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Exit codes for the CLI.
///
/// - `0`: Success
/// - `1-3`: General errors and usage issues
/// - `4-7`: Authentication-related issues
/// - `8-15`: Resource-related issues
pub mod exit_codes {
    /// The command completed without errors.
    pub const SUCCESS: i32 = 0;

    /// An error occurred. Details are printed on stderr.
    pub const ERROR: i32 = 1;

    /// Invalid arguments or options. Reported by clap.
    pub const USAGE: i32 = 2;

    /// No token, or a token of the wrong shape.
    pub const AUTH_ERROR: i32 = 4;

    /// The requested object does not exist.
    pub const NOT_FOUND: i32 = 8;
}
