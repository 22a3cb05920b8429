//
//  pagerduty-cli
//  api/lookup.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Lookups that resolve human-facing names to PagerDuty object ids.
//!
//! Commands accept emails and names, but the API addresses objects by id.
//! The helpers here bridge the two:
//!
//! | Helper | Endpoint | Matches on |
//! |--------|----------|------------|
//! | [`user_id_for_email`](PagerDutyClient::user_id_for_email) | `/users` | `query=<email>` |
//! | [`schedule_id_for_name`](PagerDutyClient::schedule_id_for_name) | `/schedules` | `query=<name>` |
//! | [`ep_id_for_name`](PagerDutyClient::ep_id_for_name) | `/escalation_policies` | `query=<name>` |
//!
//! A single-id lookup only succeeds when the query matches exactly one
//! object. Zero matches, several matches and request failures all come back
//! as `None`.
//!
//! The module also builds the bodies for partial `PUT` updates, see
//! [`put_body_for_set_attributes`].

use serde_json::{json, Map, Value};
use tracing::debug;

use super::client::{PagerDutyClient, Params, Request};
use super::common::PdResult;

/// Priorities keyed by one of their attributes.
pub type PrioritiesMap = Map<String, Value>;

impl PagerDutyClient {
    /// Fetches the user that owns the current token.
    pub async fn me(&self) -> PdResult<Value> {
        self.request(&Request::get("/users/me")).await
    }

    /// Returns the id of the only user matching `email`.
    pub async fn user_id_for_email(&self, email: &str) -> Option<String> {
        self.single_id_for_query("users", email).await
    }

    /// Returns the id of the only schedule matching `name`.
    pub async fn schedule_id_for_name(&self, name: &str) -> Option<String> {
        self.single_id_for_query("schedules", name).await
    }

    /// Returns the id of the only escalation policy matching `name`.
    pub async fn ep_id_for_name(&self, name: &str) -> Option<String> {
        self.single_id_for_query("escalation_policies", name).await
    }

    /// Resolves many emails to user ids.
    ///
    /// Each email runs its own paginated search, one after the other. Every
    /// user any search returns is included, so a partial email can match
    /// several users. Failed searches are skipped. Ids are deduplicated,
    /// keeping the order in which they were first seen.
    pub async fn user_ids_for_emails(&self, emails: &[String]) -> Vec<String> {
        let mut ids: Vec<String> = Vec::new();

        for email in emails {
            let mut params = Params::new();
            params.insert("query".to_string(), Value::String(email.clone()));

            let users = match self.fetch("users", params).await.into_result() {
                Ok(users) => users.unwrap_or_default(),
                Err(e) => {
                    debug!("User search for {} failed: {}", email, e);
                    continue;
                }
            };

            for id in users.iter().filter_map(|user| user.get("id").and_then(Value::as_str)) {
                if !ids.iter().any(|seen| seen == id) {
                    ids.push(id.to_string());
                }
            }
        }

        ids
    }

    /// Fetches all priorities, keyed by the string value of `attr`.
    ///
    /// Accounts with priorities disabled answer `404`; that case is a
    /// success with an empty map. Priorities lacking `attr` are left out.
    pub async fn priorities_map_by(&self, attr: &str) -> PdResult<PrioritiesMap> {
        let priorities = match self.fetch("/priorities", Params::new()).await {
            PdResult::Failure(error) if error.is_not_found() => {
                debug!("Priorities are disabled for this account");
                return PdResult::ok(PrioritiesMap::new());
            }
            PdResult::Failure(error) => return PdResult::Failure(error),
            PdResult::Success(priorities) => priorities.unwrap_or_default(),
        };

        let mut map = PrioritiesMap::new();
        for priority in priorities {
            let key = match priority.get(attr) {
                Some(Value::String(s)) => s.clone(),
                Some(Value::Null) | None => continue,
                Some(other) => other.to_string(),
            };
            map.insert(key, priority);
        }

        PdResult::ok(map)
    }

    /// Fetches all priorities keyed by name.
    pub async fn priorities_map_by_name(&self) -> PdResult<PrioritiesMap> {
        self.priorities_map_by("name").await
    }

    /// Fetches all priorities keyed by id.
    pub async fn priorities_map_by_id(&self) -> PdResult<PrioritiesMap> {
        self.priorities_map_by("id").await
    }

    async fn single_id_for_query(&self, collection: &str, query: &str) -> Option<String> {
        let request = Request::get(collection).with_param("query", query);
        let body = self.request(&request).await.into_result().ok()??;

        match body.get(collection)?.as_array()?.as_slice() {
            [only] => only.get("id")?.as_str().map(str::to_string),
            matches => {
                debug!("{} {} matched '{}'", matches.len(), collection, query);
                None
            }
        }
    }
}

/// Builds the body of a `PUT` that sets several attributes of one object.
///
/// The body references the object as `{"<type>": {"id": .., "type":
/// "<type>_reference"}}` and adds one field per attribute. Absent, empty and
/// whitespace-only values become `null`, which clears the field.
///
/// # Example
///
/// ```rust
/// use pagerduty_cli::api::put_body_for_set_attributes;
/// use serde_json::json;
///
/// let body = put_body_for_set_attributes("user", "PABC123", &[("name", Some("  "))]);
/// assert_eq!(body, json!({"user": {"id": "PABC123", "type": "user_reference", "name": null}}));
/// ```
pub fn put_body_for_set_attributes(
    object_type: &str,
    object_id: &str,
    attributes: &[(&str, Option<&str>)],
) -> Value {
    let mut object = Map::new();
    object.insert("id".to_string(), json!(object_id));
    object.insert("type".to_string(), json!(format!("{}_reference", object_type)));

    for (key, value) in attributes {
        let value = match value {
            Some(v) if !v.trim().is_empty() => Value::String(v.to_string()),
            _ => Value::Null,
        };
        object.insert(key.to_string(), value);
    }

    let mut body = Map::new();
    body.insert(object_type.to_string(), Value::Object(object));
    Value::Object(body)
}

/// Builds the body of a `PUT` that sets a single attribute.
pub fn put_body_for_set_attribute(
    object_type: &str,
    object_id: &str,
    key: &str,
    value: Option<&str>,
) -> Value {
    put_body_for_set_attributes(object_type, object_id, &[(key, value)])
}
