//
//  pagerduty-cli
//  cli/log.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Account log entries
//!
//! ## Examples
//!
//! ```bash
//! # Last 30 days
//! pd log
//!
//! # Overview entries of the last day, newest first, with the agent
//! pd log --since yesterday -O --sort -created -k '$.agent.summary'
//! ```

use anyhow::Result;
use clap::Args;
use serde_json::{json, Value};

use crate::api::Params;
use crate::context::resolve_session;
use crate::output::{compile_path, format_field, Column, OutputWriter, TableOptions};
use crate::util::{format_local_time, parse_date_phrase, split_dedup_and_flatten, to_iso, unescape_delimiter};

use super::GlobalOptions;

/// Show PagerDuty domain log entries
#[derive(Args, Debug)]
pub struct LogCommand {
    /// The start of the date range over which you want to search.
    /// Accepts `now`, `yesterday`, `3 days ago`, `2026-01-15` or RFC 3339.
    /// A date that cannot be understood is an error
    #[arg(long, default_value = "30 days ago")]
    pub since: String,

    /// The end of the date range over which you want to search.
    /// Same formats as --since; a date that cannot be understood is an error
    #[arg(long)]
    pub until: Option<String>,

    /// Get only `overview` log entries
    #[arg(long, short = 'O')]
    pub overview: bool,

    /// Additional fields to display as JSON paths (repeatable, comma-separated)
    #[arg(long, short = 'k', action = clap::ArgAction::Append)]
    pub keys: Vec<String>,

    /// Delimiter for fields that have more than one value
    #[arg(long, short = 'd', default_value = "\\n")]
    pub delimiter: String,

    #[command(flatten)]
    pub table: TableOptions,
}

impl LogCommand {
    pub async fn run(&self, global: &GlobalOptions) -> Result<()> {
        let keys = split_dedup_and_flatten(&self.keys);
        let columns = log_columns(&keys, &unescape_delimiter(&self.delimiter))?;
        let params = self.params()?;

        let session = resolve_session(global)?;
        let entries = session.fetch("/log_entries", params, "Getting log entries").await?;

        if entries.is_empty() {
            return Ok(());
        }

        let mut options = self.table.clone();
        options.sort.get_or_insert_with(|| "created".to_string());

        OutputWriter::from_flag(global.json).write_records(&entries, &columns, &options)
    }

    fn params(&self) -> Result<Params> {
        let mut params = Params::new();
        params.insert("is_overview".to_string(), json!(self.overview));
        params.insert("since".to_string(), json!(to_iso(parse_date_phrase(&self.since)?)));
        if let Some(until) = &self.until {
            params.insert("until".to_string(), json!(to_iso(parse_date_phrase(until)?)));
        }
        Ok(params)
    }
}

/// Builds the log entry table columns plus one column per JSON path key.
///
/// Keys are checked up front so that a bad path fails before any request.
fn log_columns(keys: &[String], delimiter: &str) -> Result<Vec<Column>> {
    let mut columns = vec![
        Column::field("id").header("Log Entry ID"),
        Column::field("type").header("Log Entry Type"),
        Column::new("created", |entry: &Value| {
            entry
                .get("created_at")
                .and_then(Value::as_str)
                .map(format_local_time)
                .unwrap_or_default()
        }),
        Column::field("summary"),
    ];

    for key in keys {
        let path = compile_path(key)?;
        let delimiter = delimiter.to_string();
        columns.push(Column::new(key.as_str(), move |entry: &Value| {
            format_field(&path.query(entry).all(), &delimiter)
        }));
    }

    Ok(columns)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::output::build_record_table;

    fn entries() -> Vec<Value> {
        vec![
            json!({
                "id": "R2",
                "type": "acknowledge_log_entry",
                "created_at": "2026-01-15T10:00:00Z",
                "summary": "Acknowledged by Jane",
                "agent": {"summary": "Jane"},
                "channel": {"notes": ["a", "b"]}
            }),
            json!({
                "id": "R1",
                "type": "trigger_log_entry",
                "created_at": "2026-01-14T09:00:00Z",
                "summary": "Triggered through the API",
                "agent": {"summary": "Monitoring"}
            }),
        ]
    }

    #[test]
    fn test_default_sort_is_created() {
        let columns = log_columns(&[], "\n").unwrap();
        let options = TableOptions {
            sort: Some("created".to_string()),
            ..Default::default()
        };

        let table = build_record_table(&entries(), &columns, &options).unwrap();
        assert_eq!(table.headers, vec!["Log Entry ID", "Log Entry Type", "created", "summary"]);
        assert_eq!(table.rows[0][0], "R1");
        assert_eq!(table.rows[1][0], "R2");
    }

    #[test]
    fn test_key_columns() {
        let keys = vec!["$.agent.summary".to_string(), "$.channel.notes".to_string()];
        let columns = log_columns(&keys, " | ").unwrap();

        let table = build_record_table(&entries(), &columns, &TableOptions::default()).unwrap();
        assert_eq!(table.headers[4], "$.agent.summary");
        assert_eq!(table.rows[0][4], "Jane");
        assert_eq!(table.rows[0][5], "a | b");
        assert_eq!(table.rows[1][5], "");
    }

    #[test]
    fn test_bad_key_fails_early() {
        assert!(log_columns(&["$.agent[".to_string()], "\n").is_err());
    }

    #[test]
    fn test_recursive_and_filter_keys() {
        let keys = vec!["$..summary".to_string(), "$.channel.notes[?@ == 'b']".to_string()];
        let columns = log_columns(&keys, ",").unwrap();

        let table = build_record_table(&entries(), &columns, &TableOptions::default()).unwrap();
        assert_eq!(table.rows[0][4], "Acknowledged by Jane,Jane");
        assert_eq!(table.rows[0][5], "b");
        assert_eq!(table.rows[1][5], "");
    }

    #[test]
    fn test_params() {
        let cmd = LogCommand {
            since: "2026-01-01T00:00:00Z".to_string(),
            until: Some("2026-01-02T00:00:00Z".to_string()),
            overview: true,
            keys: Vec::new(),
            delimiter: "\\n".to_string(),
            table: TableOptions::default(),
        };

        let params = cmd.params().unwrap();
        assert_eq!(params["is_overview"], json!(true));
        assert_eq!(params["since"], json!("2026-01-01T00:00:00.000Z"));
        assert_eq!(params["until"], json!("2026-01-02T00:00:00.000Z"));

        let bad = LogCommand {
            since: "whenever".to_string(),
            ..cmd
        };
        assert!(bad.params().is_err());
    }
}
