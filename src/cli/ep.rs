//
//  pagerduty-cli
//  cli/ep.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Escalation policy commands

use anyhow::{anyhow, bail, Result};
use clap::{Args, Subcommand};
use serde_json::Value;

use crate::api::Request;
use crate::context::{into_anyhow, resolve_session};
use crate::output::{print_header, value_text, OutputWriter, TableBuilder};

use super::GlobalOptions;

/// Manage escalation policies
#[derive(Args, Debug)]
pub struct EpCommand {
    #[command(subcommand)]
    pub command: EpSubcommand,
}

#[derive(Subcommand, Debug)]
pub enum EpSubcommand {
    /// Show an escalation policy and its rules
    Show(ShowArgs),
}

#[derive(Args, Debug)]
pub struct ShowArgs {
    /// Escalation policy name
    #[arg(long, short = 'n', conflicts_with = "id", required_unless_present = "id")]
    pub name: Option<String>,

    /// Escalation policy ID
    #[arg(long, short = 'i')]
    pub id: Option<String>,
}

impl EpCommand {
    pub async fn run(&self, global: &GlobalOptions) -> Result<()> {
        match &self.command {
            EpSubcommand::Show(args) => self.show(args, global).await,
        }
    }

    async fn show(&self, args: &ShowArgs, global: &GlobalOptions) -> Result<()> {
        let session = resolve_session(global)?;
        let client = session.client();

        let id = match (&args.id, &args.name) {
            (Some(id), _) => id.clone(),
            (None, Some(name)) => client
                .ep_id_for_name(name)
                .await
                .ok_or_else(|| anyhow!("No unique escalation policy found with name '{}'", name))?,
            (None, None) => bail!("Provide an escalation policy name with --name or an ID with --id"),
        };

        let request = Request::get(format!("/escalation_policies/{}", id));
        let response = into_anyhow(client.request(&request).await)?.unwrap_or(Value::Null);
        let policy = response.get("escalation_policy").unwrap_or(&response);

        let output = OutputWriter::from_flag(global.json);
        let fields: Vec<(&str, String)> = ["id", "name", "description", "num_loops", "html_url"]
            .into_iter()
            .map(|key| (key, policy.get(key).map(value_text).unwrap_or_default()))
            .collect();
        output.write_record(policy, &fields)?;

        if !output.is_json() {
            println!();
            print_header("Escalation rules");
            TableBuilder::new()
                .headers(["Level", "Delay (min)", "Targets"])
                .rows(rule_rows(policy))
                .print();
        }
        Ok(())
    }
}

fn rule_rows(policy: &Value) -> Vec<Vec<String>> {
    let Some(rules) = policy.get("escalation_rules").and_then(Value::as_array) else {
        return Vec::new();
    };

    rules
        .iter()
        .enumerate()
        .map(|(level, rule)| {
            let targets = rule
                .get("targets")
                .and_then(Value::as_array)
                .map(|targets| {
                    targets
                        .iter()
                        .filter_map(|t| t.get("summary").and_then(Value::as_str))
                        .collect::<Vec<_>>()
                        .join(", ")
                })
                .unwrap_or_default();
            vec![
                (level + 1).to_string(),
                rule.get("escalation_delay_in_minutes")
                    .map(value_text)
                    .unwrap_or_default(),
                targets,
            ]
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_rule_rows() {
        let policy = json!({
            "escalation_rules": [
                {"escalation_delay_in_minutes": 30, "targets": [{"summary": "Primary"}]},
                {"escalation_delay_in_minutes": 15, "targets": [{"summary": "Jane"}, {"summary": "Ops Lead"}]}
            ]
        });

        assert_eq!(
            rule_rows(&policy),
            vec![
                vec!["1".to_string(), "30".to_string(), "Primary".to_string()],
                vec!["2".to_string(), "15".to_string(), "Jane, Ops Lead".to_string()],
            ]
        );
        assert!(rule_rows(&json!({})).is_empty());
    }
}
