//
//  pagerduty-cli
//  api/common/pagination.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Pagination Helpers for PagerDuty API Responses
//!
//! PagerDuty list endpoints use one of two pagination protocols, and a single
//! endpoint sticks to the same protocol for the lifetime of a query.
//!
//! | Protocol | Metadata | Strategy |
//! |----------|----------|----------|
//! | Classic | `more`, `total` | Offset-based, page count known upfront |
//! | Cursor | `next_cursor` | Each page names the next one |
//!
//! The collection itself is stored under a key derived from the endpoint
//! path, e.g. `GET /log_entries` returns `{"log_entries": [...], ...}`.
//!
//! # Example
//!
//! ```rust
//! use pagerduty_cli::api::common::{endpoint_identifier, Pagination};
//! use serde_json::json;
//!
//! assert_eq!(endpoint_identifier("/users/PABC123/sessions"), "user_sessions");
//!
//! let page = json!({"users": [], "more": true, "total": 57});
//! assert_eq!(Pagination::detect(&page), Pagination::Classic { total: 57 });
//! ```

use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value;

use super::is_truthy;

/// Number of records requested per page.
pub const PAGE_LIMIT: u64 = 25;

static USER_SESSIONS_PATTERN: Lazy<Regex> = Lazy::new(|| Regex::new(r"users/P.*/sessions").unwrap());

/// The pagination protocol announced by a first page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Pagination {
    /// Offset pagination; `total` records exist across all pages.
    Classic {
        /// Total number of records reported by the API
        total: u64,
    },
    /// Cursor pagination; `next_cursor` names the following page.
    Cursor {
        /// Cursor to send with the next request
        next_cursor: String,
    },
    /// The first page holds the entire collection.
    Single,
}

impl Pagination {
    /// Detects the pagination protocol from the first page of a response.
    ///
    /// A truthy `more` flag means classic pagination (a missing or
    /// non-numeric `total` counts as zero). Otherwise a non-empty
    /// `next_cursor` means cursor pagination. Anything else is a single page.
    pub fn detect(page: &Value) -> Self {
        if page.get("more").is_some_and(is_truthy) {
            let total = page.get("total").and_then(Value::as_u64).unwrap_or(0);
            return Self::Classic { total };
        }

        match next_cursor(page) {
            Some(next_cursor) => Self::Cursor { next_cursor },
            None => Self::Single,
        }
    }
}

/// Returns the `next_cursor` of a page, if it names a following page.
///
/// `null`, an empty string and a missing field all terminate the chain.
pub fn next_cursor(page: &Value) -> Option<String> {
    match page.get("next_cursor") {
        Some(Value::String(cursor)) if !cursor.is_empty() => Some(cursor.clone()),
        Some(other) if is_truthy(other) => Some(other.to_string()),
        _ => None,
    }
}

/// Derives the key under which an endpoint returns its collection.
///
/// This is the last path segment of the endpoint, except for per-user
/// session listings (`users/P…/sessions`), which are returned under
/// `user_sessions`.
///
/// # Example
///
/// ```rust
/// use pagerduty_cli::api::common::endpoint_identifier;
///
/// assert_eq!(endpoint_identifier("/escalation_policies"), "escalation_policies");
/// assert_eq!(endpoint_identifier("services/PSVC1/integrations"), "integrations");
/// ```
pub fn endpoint_identifier(endpoint: &str) -> String {
    if USER_SESSIONS_PATTERN.is_match(endpoint) {
        return "user_sessions".to_string();
    }

    endpoint.rsplit('/').next().unwrap_or(endpoint).to_string()
}

/// Lists the offsets of every page after the first one.
///
/// Offsets are successive multiples of `limit`, starting at `limit`, strictly
/// less than `total`.
pub fn classic_offsets(total: u64, limit: u64) -> Vec<u64> {
    if limit == 0 {
        return Vec::new();
    }
    (limit..total).step_by(limit as usize).collect()
}

/// Moves the named collection out of a page.
///
/// A missing or non-array collection contributes no records.
pub fn take_collection(page: &mut Value, identifier: &str) -> Vec<Value> {
    match page.get_mut(identifier).map(Value::take) {
        Some(Value::Array(records)) => records,
        _ => Vec::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_endpoint_identifier() {
        assert_eq!(endpoint_identifier("/users/PABC123/sessions"), "user_sessions");
        assert_eq!(endpoint_identifier("users/PXYZ/sessions"), "user_sessions");
        assert_eq!(endpoint_identifier("/escalation_policies"), "escalation_policies");
        assert_eq!(endpoint_identifier("log_entries"), "log_entries");
        assert_eq!(endpoint_identifier("/users/PABC123/contact_methods"), "contact_methods");
        assert_eq!(endpoint_identifier("/users/PABC123/sessions/mobile/S1"), "user_sessions");
        assert_eq!(endpoint_identifier("/users/me/sessions"), "sessions");
    }

    #[test]
    fn test_detect_classic() {
        let page = json!({"users": [], "more": true, "total": 57, "limit": 25, "offset": 0});
        assert_eq!(Pagination::detect(&page), Pagination::Classic { total: 57 });
    }

    #[test]
    fn test_detect_classic_without_total() {
        let page = json!({"users": [], "more": true});
        assert_eq!(Pagination::detect(&page), Pagination::Classic { total: 0 });
    }

    #[test]
    fn test_detect_cursor() {
        let page = json!({"log_entries": [], "next_cursor": "abc"});
        assert_eq!(
            Pagination::detect(&page),
            Pagination::Cursor { next_cursor: "abc".to_string() }
        );
    }

    #[test]
    fn test_detect_single() {
        assert_eq!(Pagination::detect(&json!({"users": [], "more": false})), Pagination::Single);
        assert_eq!(Pagination::detect(&json!({"users": [], "next_cursor": null})), Pagination::Single);
        assert_eq!(Pagination::detect(&json!({"users": []})), Pagination::Single);
    }

    #[test]
    fn test_classic_offsets() {
        assert_eq!(classic_offsets(57, 25), vec![25, 50]);
        assert_eq!(classic_offsets(50, 25), vec![25]);
        assert_eq!(classic_offsets(25, 25), Vec::<u64>::new());
        assert_eq!(classic_offsets(0, 25), Vec::<u64>::new());
    }

    #[test]
    fn test_take_collection() {
        let mut page = json!({"users": [{"id": "P1"}, {"id": "P2"}], "more": false});
        let users = take_collection(&mut page, "users");
        assert_eq!(users.len(), 2);
        assert!(take_collection(&mut page, "schedules").is_empty());
    }
}
