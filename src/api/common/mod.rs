//
//  pagerduty-cli
//  api/common/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Common API Types for the PagerDuty REST API
//!
//! This module provides the types shared by every network operation in the
//! access layer: the error taxonomy, the [`PdResult`] success/failure wrapper
//! and the pagination helpers used by the fetch-all operation.
//!
//! # Overview
//!
//! - [`ApiError`] - Unified error type for all API operations
//! - [`PdResult`] - Success/failure container returned by network operations
//! - Pagination helpers (re-exported from the `pagination` submodule)
//!
//! # Example
//!
//! ```rust
//! use pagerduty_cli::api::common::{ApiError, PdResult};
//!
//! let result: PdResult<u32> = PdResult::fail(ApiError::Unknown);
//! assert_eq!(result.get_error_message().as_deref(), Some("unknown error"));
//! ```

use serde_json::Value;
use thiserror::Error;

mod pagination;
mod result;

pub use pagination::*;
pub use result::*;

/// Unified error type for all PagerDuty API operations.
///
/// # Variants
///
/// | Variant | Description |
/// |---------|-------------|
/// | `Http` | The API answered with a non-success status |
/// | `Unknown` | The request produced no usable response |
/// | `Message` | A plain failure description |
///
/// # Example
///
/// ```rust
/// use pagerduty_cli::api::common::ApiError;
///
/// let err = ApiError::Http {
///     status: 404,
///     status_text: "Not Found".to_string(),
///     body: None,
/// };
/// assert!(err.is_not_found());
/// assert_eq!(err.to_string(), "404 Not Found");
/// ```
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ApiError {
    /// The API returned a non-2xx response.
    ///
    /// The parsed response body is retained so that callers can inspect the
    /// PagerDuty error object (`{"error": {"message": ..., "errors": [...]}}`).
    #[error("{status} {status_text}")]
    Http {
        /// HTTP status code
        status: u16,
        /// Canonical reason phrase for the status
        status_text: String,
        /// Parsed response body, if the response carried one
        body: Option<Value>,
    },

    /// The transport failed before a response was received.
    ///
    /// Covers connection failures, timeouts and unreadable response bodies.
    #[error("unknown error")]
    Unknown,

    /// A plain failure description.
    #[error("{0}")]
    Message(String),
}

impl ApiError {
    /// Returns the HTTP status code for `Http` errors.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Http { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Checks whether the API answered with `404 Not Found`.
    pub fn is_not_found(&self) -> bool {
        self.status() == Some(404)
    }

    /// Builds the user-facing message for this error.
    ///
    /// For `Http` errors whose body carries a PagerDuty error object with a
    /// `message`, the result is `"{status} {statusText}: {message}"`, followed
    /// by `": {errors joined by space}"` when the object lists sub-errors.
    /// Every other error renders as its status line or raw string.
    pub fn detailed_message(&self) -> String {
        let summary = self.to_string();

        let Self::Http {
            body: Some(body), ..
        } = self
        else {
            return summary;
        };

        let Some(error) = body.get("error") else {
            return summary;
        };

        let Some(message) = error.get("message").filter(|m| is_truthy(m)) else {
            return summary;
        };

        let mut detailed = format!("{}: {}", summary, text_of(message));
        if let Some(errors) = error.get("errors").filter(|e| is_truthy(e)) {
            let joined = match errors {
                Value::Array(items) => items.iter().map(text_of).collect::<Vec<_>>().join(" "),
                other => text_of(other),
            };
            detailed.push_str(": ");
            detailed.push_str(&joined);
        }
        detailed
    }
}

impl From<String> for ApiError {
    fn from(message: String) -> Self {
        Self::Message(message)
    }
}

impl From<&str> for ApiError {
    fn from(message: &str) -> Self {
        Self::Message(message.to_string())
    }
}

/// Checks a JSON value for JavaScript-style truthiness.
///
/// The PagerDuty API reports pagination flags loosely, so `more`,
/// `next_cursor` and error fields are interpreted the way the API's own
/// clients interpret them.
pub(crate) fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

fn text_of(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn http_error(status: u16, status_text: &str, body: Option<Value>) -> ApiError {
        ApiError::Http {
            status,
            status_text: status_text.to_string(),
            body,
        }
    }

    #[test]
    fn test_detailed_message_with_sub_errors() {
        let err = http_error(
            400,
            "Bad Request",
            Some(json!({"error": {"message": "Invalid Input Provided", "errors": ["Name is blank.", "Email is taken."]}})),
        );
        assert_eq!(
            err.detailed_message(),
            "400 Bad Request: Invalid Input Provided: Name is blank. Email is taken."
        );
    }

    #[test]
    fn test_detailed_message_without_sub_errors() {
        let err = http_error(
            403,
            "Forbidden",
            Some(json!({"error": {"message": "Access Denied", "code": 2010}})),
        );
        assert_eq!(err.detailed_message(), "403 Forbidden: Access Denied");
    }

    #[test]
    fn test_detailed_message_falls_back_to_status_line() {
        let err = http_error(502, "Bad Gateway", Some(json!("<html>upstream</html>")));
        assert_eq!(err.detailed_message(), "502 Bad Gateway");

        let err = http_error(500, "Internal Server Error", None);
        assert_eq!(err.detailed_message(), "500 Internal Server Error");
    }

    #[test]
    fn test_plain_messages() {
        assert_eq!(ApiError::Unknown.detailed_message(), "unknown error");
        assert_eq!(ApiError::from("boom").detailed_message(), "boom");
    }

    #[test]
    fn test_status_accessors() {
        assert!(http_error(404, "Not Found", None).is_not_found());
        assert_eq!(http_error(429, "Too Many Requests", None).status(), Some(429));
        assert_eq!(ApiError::Unknown.status(), None);
    }

    #[test]
    fn test_truthiness() {
        assert!(is_truthy(&json!(true)));
        assert!(is_truthy(&json!("abc")));
        assert!(is_truthy(&json!(1)));
        assert!(!is_truthy(&json!(false)));
        assert!(!is_truthy(&json!("")));
        assert!(!is_truthy(&json!(0)));
        assert!(!is_truthy(&Value::Null));
    }
}
