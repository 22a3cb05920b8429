//
//  pagerduty-cli
//  api/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # API Access Layer
//!
//! This module provides everything needed to talk to the PagerDuty REST API (v2).
//!
//! ## Architecture
//!
//! - [`client`]: authenticated request execution, batching and paginated fetch
//! - [`lookup`]: id lookups by email or name, priorities, partial update bodies
//! - [`common`]: the [`PdResult`] wrapper, [`ApiError`] and pagination helpers
//!
//! ## Error Handling
//!
//! Network operations never return `Err`; they return a [`PdResult`] whose
//! failure carries an [`ApiError`]:
//!
//! - `Http`: the API answered with a non-2xx status
//! - `Unknown`: no response was received
//! - `Message`: a plain description

pub mod client;
pub mod common;
pub mod lookup;

pub use client::{query_pairs, ClientConfig, PagerDutyClient, Params, Request, DEFAULT_BASE_URL, DEFAULT_BATCH_SIZE};
pub use common::{ApiError, PdResult};
pub use lookup::{put_body_for_set_attribute, put_body_for_set_attributes, PrioritiesMap};
