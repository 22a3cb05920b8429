//
//  pagerduty-cli
//  cli/priority.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Incident priority commands

use anyhow::Result;
use clap::{Args, Subcommand};
use serde_json::Value;

use crate::context::{into_anyhow, resolve_session};
use crate::output::{Column, OutputWriter, TableOptions};

use super::GlobalOptions;

/// List incident priorities
#[derive(Args, Debug)]
pub struct PriorityCommand {
    #[command(subcommand)]
    pub command: PrioritySubcommand,
}

#[derive(Subcommand, Debug)]
pub enum PrioritySubcommand {
    /// List the priorities of the account
    #[command(visible_alias = "ls")]
    List(ListArgs),
}

#[derive(Args, Debug)]
pub struct ListArgs {
    #[command(flatten)]
    pub table: TableOptions,
}

impl PriorityCommand {
    pub async fn run(&self, global: &GlobalOptions) -> Result<()> {
        match &self.command {
            PrioritySubcommand::List(args) => self.list(args, global).await,
        }
    }

    async fn list(&self, args: &ListArgs, global: &GlobalOptions) -> Result<()> {
        let session = resolve_session(global)?;
        let priorities = into_anyhow(session.client().priorities_map_by_name().await)?.unwrap_or_default();

        let output = OutputWriter::from_flag(global.json);
        if priorities.is_empty() && !output.is_json() {
            output.write_warning("No priorities found. Incident priorities may be disabled for this account.");
            return Ok(());
        }

        let records: Vec<Value> = priorities.values().cloned().collect();
        output.write_records(&records, &priority_columns(), &args.table)
    }
}

fn priority_columns() -> Vec<Column> {
    vec![
        Column::field("id").header("ID"),
        Column::field("name").header("Name"),
        Column::field("description").header("Description"),
    ]
}
