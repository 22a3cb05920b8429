//
//  pagerduty-cli
//  api/common/result.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Success/failure container for PagerDuty network operations.
//!
//! Every request, batch and paginated fetch returns a [`PdResult`] rather than
//! bubbling transport errors up as `anyhow::Error`. Commands decide how to
//! present a failure; the access layer only records what went wrong.
//!
//! # Example
//!
//! ```rust
//! use pagerduty_cli::api::common::{ApiError, PdResult};
//!
//! let results = vec![
//!     PdResult::ok(1),
//!     PdResult::fail("first"),
//!     PdResult::fail(ApiError::Unknown),
//! ];
//!
//! let combined = PdResult::combine(results);
//! assert_eq!(combined.get_error_message().as_deref(), Some("first"));
//! ```

use super::ApiError;

/// The outcome of a PagerDuty network operation.
///
/// A `PdResult` is either a success, optionally carrying a payload, or a
/// failure carrying an [`ApiError`]. A value and an error can never coexist,
/// and a failure can never lack an error. The container is immutable: it is
/// inspected by reference or consumed by value.
///
/// # Variants
///
/// * `Success` - The operation succeeded; `None` means "success, no payload"
/// * `Failure` - The operation failed with the contained error
#[derive(Debug, Clone, PartialEq)]
#[must_use]
pub enum PdResult<T> {
    /// The operation succeeded.
    Success(Option<T>),
    /// The operation failed.
    Failure(ApiError),
}

impl<T> PdResult<T> {
    /// Creates a success carrying `value`.
    pub fn ok(value: T) -> Self {
        Self::Success(Some(value))
    }

    /// Creates a success without a payload.
    pub fn ok_empty() -> Self {
        Self::Success(None)
    }

    /// Creates a failure.
    ///
    /// Accepts a structured [`ApiError`] or anything convertible into one,
    /// such as a plain `&str` or `String` description.
    pub fn fail(error: impl Into<ApiError>) -> Self {
        Self::Failure(error.into())
    }

    /// Returns `true` for a success.
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success(_))
    }

    /// Returns `true` for a failure.
    pub fn is_failure(&self) -> bool {
        matches!(self, Self::Failure(_))
    }

    /// Borrows the payload of a success.
    ///
    /// Returns `None` for a failure or for a success without payload.
    pub fn value(&self) -> Option<&T> {
        match self {
            Self::Success(value) => value.as_ref(),
            Self::Failure(_) => None,
        }
    }

    /// Consumes the result and returns its payload.
    ///
    /// # Panics
    ///
    /// Retrieving the value of a failed result is a programming error and
    /// panics. Check [`is_success`](Self::is_success) first, or use
    /// [`into_result`](Self::into_result) to propagate the error with `?`.
    #[track_caller]
    pub fn get_value(self) -> Option<T> {
        match self {
            Self::Success(value) => value,
            Self::Failure(error) => {
                panic!("Can't retrieve the value from a failed result ({error})")
            }
        }
    }

    /// Borrows the underlying error of a failure.
    pub fn full_error(&self) -> Option<&ApiError> {
        match self {
            Self::Success(_) => None,
            Self::Failure(error) => Some(error),
        }
    }

    /// Returns the short error summary of a failure.
    ///
    /// This is the HTTP status line (`"404 Not Found"`) for API errors and
    /// the raw description otherwise.
    pub fn error(&self) -> Option<String> {
        self.full_error().map(ToString::to_string)
    }

    /// Returns the human-readable error message of a failure.
    ///
    /// Includes the PagerDuty error message and sub-errors when the API
    /// returned them. See [`ApiError::detailed_message`].
    pub fn get_error_message(&self) -> Option<String> {
        self.full_error().map(ApiError::detailed_message)
    }

    /// Converts into a standard `Result` for `?` propagation.
    pub fn into_result(self) -> Result<Option<T>, ApiError> {
        match self {
            Self::Success(value) => Ok(value),
            Self::Failure(error) => Err(error),
        }
    }

    /// Maps the payload of a success, leaving failures untouched.
    pub fn map<U, F: FnOnce(T) -> U>(self, f: F) -> PdResult<U> {
        match self {
            Self::Success(value) => PdResult::Success(value.map(f)),
            Self::Failure(error) => PdResult::Failure(error),
        }
    }

    /// Collapses a list of results into one.
    ///
    /// Returns the first failure in iteration order, or a success without
    /// payload when every result succeeded.
    pub fn combine<I>(results: I) -> Self
    where
        I: IntoIterator<Item = Self>,
    {
        results
            .into_iter()
            .find(Self::is_failure)
            .unwrap_or_else(Self::ok_empty)
    }
}

impl<T> From<Result<T, ApiError>> for PdResult<T> {
    fn from(result: Result<T, ApiError>) -> Self {
        match result {
            Ok(value) => Self::ok(value),
            Err(error) => Self::Failure(error),
        }
    }
}
