//
//  pagerduty-cli
//  cli/user.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! User commands

use anyhow::{bail, Result};
use clap::{Args, Subcommand};
use serde_json::{json, Value};

use crate::api::{put_body_for_set_attribute, Params, Request};
use crate::context::{into_anyhow, resolve_session, spinner};
use crate::output::{value_text, write_json, Column, OutputWriter, TableOptions};
use crate::util::split_dedup_and_flatten;

use super::GlobalOptions;

/// Manage users
#[derive(Args, Debug)]
pub struct UserCommand {
    #[command(subcommand)]
    pub command: UserSubcommand,
}

#[derive(Subcommand, Debug)]
pub enum UserSubcommand {
    /// List users
    #[command(visible_alias = "ls")]
    List(ListArgs),

    /// Show the user the token belongs to
    Me,

    /// Set an attribute on one or more users
    Set(SetArgs),
}

#[derive(Args, Debug)]
pub struct ListArgs {
    /// Only users whose name or email contains this text
    #[arg(long, short = 'e')]
    pub email: Option<String>,

    #[command(flatten)]
    pub table: TableOptions,
}

#[derive(Args, Debug)]
pub struct SetArgs {
    /// Emails of the users to update (repeatable, comma-separated)
    #[arg(long, short = 'e', action = clap::ArgAction::Append)]
    pub emails: Vec<String>,

    /// IDs of the users to update (repeatable, comma-separated)
    #[arg(long, short = 'i', action = clap::ArgAction::Append)]
    pub ids: Vec<String>,

    /// Attribute to set, e.g. job_title
    #[arg(long, short = 'k')]
    pub key: String,

    /// New value. Omit or leave blank to clear the attribute
    #[arg(long, short = 'v')]
    pub value: Option<String>,
}

impl UserCommand {
    pub async fn run(&self, global: &GlobalOptions) -> Result<()> {
        match &self.command {
            UserSubcommand::List(args) => self.list(args, global).await,
            UserSubcommand::Me => self.me(global).await,
            UserSubcommand::Set(args) => self.set(args, global).await,
        }
    }

    async fn list(&self, args: &ListArgs, global: &GlobalOptions) -> Result<()> {
        let mut params = Params::new();
        if let Some(email) = &args.email {
            params.insert("query".to_string(), json!(email));
        }

        let session = resolve_session(global)?;
        let users = session.fetch("/users", params, "Getting users").await?;

        OutputWriter::from_flag(global.json).write_records(&users, &user_columns(), &args.table)
    }

    async fn me(&self, global: &GlobalOptions) -> Result<()> {
        let session = resolve_session(global)?;
        let response = into_anyhow(session.client().me().await)?.unwrap_or(Value::Null);
        let user = response.get("user").unwrap_or(&response);

        let fields: Vec<(&str, String)> = ["id", "name", "email", "role", "job_title", "time_zone", "html_url"]
            .into_iter()
            .map(|key| (key, user.get(key).map(value_text).unwrap_or_default()))
            .collect();
        OutputWriter::from_flag(global.json).write_record(user, &fields)
    }

    async fn set(&self, args: &SetArgs, global: &GlobalOptions) -> Result<()> {
        let session = resolve_session(global)?;
        let client = session.client();

        let mut ids = split_dedup_and_flatten(&args.ids);
        let emails = split_dedup_and_flatten(&args.emails);
        for id in client.user_ids_for_emails(&emails).await {
            if !ids.contains(&id) {
                ids.push(id);
            }
        }
        if ids.is_empty() {
            bail!("No users found. Provide user IDs with --ids or emails with --emails.");
        }

        let requests = set_requests(&ids, &args.key, args.value.as_deref());
        let pb = spinner(&format!("Setting {} on {} users", args.key, ids.len()), session.quiet);
        let result = client.batched_request(&requests, client.batch_size()).await;
        pb.finish_and_clear();
        let updated = into_anyhow(result)?.unwrap_or_default();

        let output = OutputWriter::from_flag(global.json);
        if output.is_json() {
            return write_json(&updated);
        }
        for response in &updated {
            let user = response.get("user").unwrap_or(response);
            let value = user.get(&args.key).map(value_text).unwrap_or_default();
            output.write_success(&format!(
                "{}: {} = '{}'",
                user.get("email").map(value_text).unwrap_or_default(),
                args.key,
                value
            ));
        }
        Ok(())
    }
}

fn user_columns() -> Vec<Column> {
    vec![
        Column::field("id").header("ID"),
        Column::field("name").header("Name"),
        Column::field("email").header("Email"),
        Column::field("role").header("Role"),
        Column::field("job_title").header("Job Title"),
        Column::new("teams", |user: &Value| {
            user.get("teams")
                .and_then(Value::as_array)
                .map(|teams| {
                    teams
                        .iter()
                        .filter_map(|t| t.get("summary").and_then(Value::as_str))
                        .collect::<Vec<_>>()
                        .join(", ")
                })
                .unwrap_or_default()
        })
        .header("Teams"),
    ]
}

fn set_requests(ids: &[String], key: &str, value: Option<&str>) -> Vec<Request> {
    ids.iter()
        .map(|id| {
            Request::put(format!("/users/{}", id))
                .without_params()
                .with_body(put_body_for_set_attribute("user", id, key, value))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::output::build_record_table;

    #[test]
    fn test_user_columns() {
        let users = vec![json!({
            "id": "PABC123",
            "name": "Jane Doe",
            "email": "jane@acme.com",
            "role": "admin",
            "teams": [{"summary": "Ops"}, {"summary": "Web"}]
        })];

        let table = build_record_table(&users, &user_columns(), &TableOptions::default()).unwrap();
        assert_eq!(table.rows[0][0], "PABC123");
        assert_eq!(table.rows[0][4], "");
        assert_eq!(table.rows[0][5], "Ops, Web");
    }

    #[test]
    fn test_set_requests() {
        let ids = vec!["P1".to_string(), "P2".to_string()];
        let requests = set_requests(&ids, "job_title", None);

        assert_eq!(requests.len(), 2);
        assert_eq!(requests[1].endpoint(), "/users/P2");
        assert_eq!(requests[1].method(), &reqwest::Method::PUT);
        assert!(requests[1].params().is_none());
    }
}
