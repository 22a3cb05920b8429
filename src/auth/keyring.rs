//
//  pagerduty-cli
//  auth/keyring.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # Token Storage
//!
//! API tokens are kept in the platform keyring rather than the config file:
//!
//! - **macOS**: Keychain Services
//! - **Linux**: Secret Service API (GNOME Keyring, KWallet)
//! - **Windows**: Windows Credential Manager
//!
//! Every entry lives under the `pagerduty-cli` service and is keyed by
//! profile name, so several PagerDuty accounts can be used side by side.
//!
//! ## Example
//!
//! ```rust,no_run
//! use pagerduty_cli::auth::KeyringStore;
//!
//! fn remember() -> anyhow::Result<()> {
//!     let store = KeyringStore::new();
//!     store.store("default", "y_NbAkKc66ryYTWUXYEu")?;
//!     assert!(store.get("default")?.is_some());
//!     store.delete("default")?;
//!     Ok(())
//! }
//! ```

use anyhow::{Context, Result};
use keyring::Entry;

/// Keyring service under which all tokens are stored.
pub const SERVICE_NAME: &str = "pagerduty-cli";

/// Token storage backed by the system keyring.
pub struct KeyringStore {
    service: String,
}

impl Default for KeyringStore {
    fn default() -> Self {
        Self::new()
    }
}

impl KeyringStore {
    /// Creates a store for the `pagerduty-cli` service.
    ///
    /// The keyring itself is only touched when a method is called.
    pub fn new() -> Self {
        Self::with_service(SERVICE_NAME)
    }

    /// Creates a store for a custom service name.
    pub fn with_service(service: &str) -> Self {
        Self {
            service: service.to_string(),
        }
    }

    /// Returns the service name entries are stored under.
    pub fn service(&self) -> &str {
        &self.service
    }

    /// Stores the token for `profile`, replacing any previous one.
    pub fn store(&self, profile: &str, token: &str) -> Result<()> {
        let entry = self.entry(profile)?;
        entry
            .set_password(token)
            .with_context(|| format!("Failed to store token for profile '{}'", profile))?;
        Ok(())
    }

    /// Reads the token for `profile`.
    ///
    /// A missing entry is `Ok(None)`, not an error.
    pub fn get(&self, profile: &str) -> Result<Option<String>> {
        let entry = self.entry(profile)?;
        match entry.get_password() {
            Ok(token) => Ok(Some(token)),
            Err(keyring::Error::NoEntry) => Ok(None),
            Err(e) => Err(e).with_context(|| format!("Failed to read token for profile '{}'", profile)),
        }
    }

    /// Removes the token for `profile`.
    ///
    /// Deleting a missing entry succeeds.
    pub fn delete(&self, profile: &str) -> Result<()> {
        let entry = self.entry(profile)?;
        match entry.delete_credential() {
            Ok(()) | Err(keyring::Error::NoEntry) => Ok(()),
            Err(e) => Err(e).with_context(|| format!("Failed to remove token for profile '{}'", profile)),
        }
    }

    fn entry(&self, profile: &str) -> Result<Entry> {
        Entry::new(&self.service, profile)
            .with_context(|| format!("Failed to open keyring entry for profile '{}'", profile))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_service_name() {
        assert_eq!(KeyringStore::new().service(), "pagerduty-cli");
        assert_eq!(KeyringStore::default().service(), SERVICE_NAME);
    }

    #[test]
    fn test_custom_service_name() {
        let store = KeyringStore::with_service("pagerduty-cli-test");
        assert_eq!(store.service(), "pagerduty-cli-test");
    }
}
