//
//  pagerduty-cli
//  cli/schedule.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Schedule commands

use anyhow::{anyhow, bail, Result};
use clap::{Args, Subcommand};
use serde_json::Value;

use crate::api::Request;
use crate::context::{into_anyhow, resolve_session};
use crate::output::{print_header, value_text, OutputWriter, TableBuilder};
use crate::util::format_local_time;

use super::GlobalOptions;

/// Manage schedules
#[derive(Args, Debug)]
pub struct ScheduleCommand {
    #[command(subcommand)]
    pub command: ScheduleSubcommand,
}

#[derive(Subcommand, Debug)]
pub enum ScheduleSubcommand {
    /// Show a schedule
    Show(ShowArgs),
}

#[derive(Args, Debug)]
pub struct ShowArgs {
    /// Schedule name
    #[arg(long, short = 'n', conflicts_with = "id", required_unless_present = "id")]
    pub name: Option<String>,

    /// Schedule ID
    #[arg(long, short = 'i')]
    pub id: Option<String>,
}

impl ScheduleCommand {
    pub async fn run(&self, global: &GlobalOptions) -> Result<()> {
        match &self.command {
            ScheduleSubcommand::Show(args) => self.show(args, global).await,
        }
    }

    async fn show(&self, args: &ShowArgs, global: &GlobalOptions) -> Result<()> {
        let session = resolve_session(global)?;
        let client = session.client();

        let id = match (&args.id, &args.name) {
            (Some(id), _) => id.clone(),
            (None, Some(name)) => client
                .schedule_id_for_name(name)
                .await
                .ok_or_else(|| anyhow!("No unique schedule found with name '{}'", name))?,
            (None, None) => bail!("Provide a schedule name with --name or an ID with --id"),
        };

        let response = into_anyhow(client.request(&Request::get(format!("/schedules/{}", id))).await)?
            .unwrap_or(Value::Null);
        let schedule = response.get("schedule").unwrap_or(&response);

        let output = OutputWriter::from_flag(global.json);
        let fields: Vec<(&str, String)> = ["id", "name", "description", "time_zone", "html_url"]
            .into_iter()
            .map(|key| (key, schedule.get(key).map(value_text).unwrap_or_default()))
            .collect();
        output.write_record(schedule, &fields)?;

        if !output.is_json() {
            let rows = schedule_entries(schedule);
            if !rows.is_empty() {
                println!();
                print_header("Final schedule");
                TableBuilder::new()
                    .headers(["Start", "End", "User"])
                    .rows(rows)
                    .print();
            }
        }
        Ok(())
    }
}

/// Extracts `(start, end, user)` rows from the rendered final schedule.
fn schedule_entries(schedule: &Value) -> Vec<Vec<String>> {
    schedule
        .pointer("/final_schedule/rendered_schedule_entries")
        .and_then(Value::as_array)
        .map(|entries| {
            entries
                .iter()
                .map(|entry| {
                    let time = |key: &str| {
                        entry
                            .get(key)
                            .and_then(Value::as_str)
                            .map(format_local_time)
                            .unwrap_or_default()
                    };
                    let user = entry
                        .pointer("/user/summary")
                        .map(value_text)
                        .unwrap_or_default();
                    vec![time("start"), time("end"), user]
                })
                .collect()
        })
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_schedule_entries() {
        let schedule = json!({
            "id": "PSCH01",
            "final_schedule": {
                "rendered_schedule_entries": [
                    {"start": "not a time", "end": "later", "user": {"summary": "Jane"}},
                    {"start": "x", "end": "y"}
                ]
            }
        });

        let rows = schedule_entries(&schedule);
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0], vec!["not a time", "later", "Jane"]);
        assert_eq!(rows[1][2], "");
        assert!(schedule_entries(&json!({"id": "PSCH02"})).is_empty());
    }
}
