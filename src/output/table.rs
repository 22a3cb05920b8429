//
//  pagerduty-cli
//  output/table.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # Table Output Formatting
//!
//! List commands print PagerDuty records as a table. Each [`Column`] knows
//! how to pull its cell out of a JSON record; [`TableOptions`] lets the user
//! filter, sort and pick columns, or switch to CSV.
//!
//! ## Example
//!
//! ```rust,ignore
//! use pagerduty_cli::output::{print_records, Column, TableOptions};
//!
//! let columns = vec![
//!     Column::field("id").header("ID"),
//!     Column::field("summary"),
//! ];
//! print_records(&records, &columns, &TableOptions::default())?;
//! ```
//!
//! ## Notes
//!
//! Tables are rendered with UTF-8 box-drawing characters and arranged to fit
//! the terminal width.

use std::cmp::Ordering;

use anyhow::{bail, Context, Result};
use clap::Args;
use comfy_table::{presets::UTF8_FULL, Cell, Color, ContentArrangement, Table};
use regex::Regex;
use serde_json::Value;

use super::json::value_text;

/// Creates an empty table with the standard preset.
pub fn create_table() -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic);
    table
}

/// Builder for terminal tables.
pub struct TableBuilder {
    table: Table,
    color: bool,
}

impl TableBuilder {
    pub fn new() -> Self {
        Self {
            table: create_table(),
            color: console::colors_enabled(),
        }
    }

    /// Overrides color detection.
    pub fn color(mut self, enabled: bool) -> Self {
        self.color = enabled;
        self
    }

    /// Sets the header row. Headers are cyan when color is enabled.
    pub fn headers<I, S>(mut self, headers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let headers: Vec<String> = headers.into_iter().map(Into::into).collect();
        if self.color {
            let cells: Vec<Cell> = headers.iter().map(|h| Cell::new(h).fg(Color::Cyan)).collect();
            self.table.set_header(cells);
        } else {
            self.table.set_header(headers);
        }
        self
    }

    pub fn row<I, S>(mut self, cells: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let row: Vec<String> = cells.into_iter().map(Into::into).collect();
        self.table.add_row(row);
        self
    }

    pub fn rows<I, R, S>(mut self, rows: I) -> Self
    where
        I: IntoIterator<Item = R>,
        R: IntoIterator<Item = S>,
        S: Into<String>,
    {
        for row in rows {
            self = self.row(row);
        }
        self
    }

    pub fn print(self) {
        println!("{}", self.table);
    }
}

impl Default for TableBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Display options shared by every list command.
#[derive(Args, Debug, Clone, Default, PartialEq, Eq)]
pub struct TableOptions {
    /// Property to sort by (prepend '-' for descending)
    #[arg(long, allow_hyphen_values = true)]
    pub sort: Option<String>,

    /// Only show provided columns (comma-separated)
    #[arg(long, value_delimiter = ',')]
    pub columns: Option<Vec<String>>,

    /// Filter property by regex, e.g. summary=foo (prepend '-' to exclude)
    #[arg(long, allow_hyphen_values = true)]
    pub filter: Option<String>,

    /// Hide table header from output
    #[arg(long)]
    pub no_header: bool,

    /// Output is CSV
    #[arg(long)]
    pub csv: bool,
}

/// One column of a record table.
pub struct Column {
    key: String,
    header: String,
    extract: Box<dyn Fn(&Value) -> String>,
}

impl Column {
    /// Creates a column with a custom cell extractor.
    pub fn new<F>(key: impl Into<String>, extract: F) -> Self
    where
        F: Fn(&Value) -> String + 'static,
    {
        let key = key.into();
        Self {
            header: key.clone(),
            key,
            extract: Box::new(extract),
        }
    }

    /// Creates a column showing the top-level field `key`.
    pub fn field(key: &str) -> Self {
        let name = key.to_string();
        Self::new(key, move |record| record.get(&name).map(value_text).unwrap_or_default())
    }

    /// Sets the header text. Defaults to the key.
    pub fn header(mut self, header: impl Into<String>) -> Self {
        self.header = header.into();
        self
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    fn matches(&self, name: &str) -> bool {
        self.key.eq_ignore_ascii_case(name) || self.header.eq_ignore_ascii_case(name)
    }
}

/// A rendered table: headers plus string cells, ready for output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordTable {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

/// Extracts, filters, sorts and projects records into a [`RecordTable`].
///
/// # Errors
///
/// Fails when `--sort`, `--filter` or `--columns` name a column that does
/// not exist, or when the filter pattern is not a valid regex.
pub fn build_record_table(records: &[Value], columns: &[Column], options: &TableOptions) -> Result<RecordTable> {
    let mut rows: Vec<Vec<String>> = records
        .iter()
        .map(|record| columns.iter().map(|c| (c.extract)(record)).collect())
        .collect();

    if let Some(filter) = &options.filter {
        let (negate, expression) = match filter.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, filter.as_str()),
        };
        let Some((name, pattern)) = expression.split_once('=') else {
            bail!("Filter must look like <column>=<pattern>, got '{}'", filter);
        };
        let index = column_index(columns, name)?;
        let regex = Regex::new(&format!("(?i){}", pattern))
            .with_context(|| format!("Invalid filter pattern '{}'", pattern))?;
        rows.retain(|row| regex.is_match(&row[index]) != negate);
    }

    if let Some(sort) = &options.sort {
        let (descending, name) = match sort.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, sort.as_str()),
        };
        let index = column_index(columns, name)?;
        rows.sort_by(|a, b| {
            let ordering = compare_cells(&a[index], &b[index]);
            if descending {
                ordering.reverse()
            } else {
                ordering
            }
        });
    }

    let selected: Vec<usize> = match &options.columns {
        Some(names) => names
            .iter()
            .map(|name| column_index(columns, name.trim()))
            .collect::<Result<_>>()?,
        None => (0..columns.len()).collect(),
    };

    Ok(RecordTable {
        headers: selected.iter().map(|&i| columns[i].header.clone()).collect(),
        rows: rows
            .into_iter()
            .map(|row| selected.iter().map(|&i| row[i].clone()).collect())
            .collect(),
    })
}

/// Prints records as a table, or as CSV with `--csv`.
pub fn print_records(records: &[Value], columns: &[Column], options: &TableOptions) -> Result<()> {
    let table = build_record_table(records, columns, options)?;

    if options.csv {
        print!("{}", to_csv(&table, options.no_header));
        return Ok(());
    }

    let mut builder = TableBuilder::new();
    if !options.no_header {
        builder = builder.headers(table.headers);
    }
    builder.rows(table.rows).print();
    Ok(())
}

/// Renders a table as CSV.
pub fn to_csv(table: &RecordTable, no_header: bool) -> String {
    let mut out = String::new();
    let lines = (!no_header)
        .then_some(&table.headers)
        .into_iter()
        .chain(table.rows.iter());
    for line in lines {
        let cells: Vec<String> = line.iter().map(|cell| csv_escape(cell)).collect();
        out.push_str(&cells.join(","));
        out.push('\n');
    }
    out
}

fn csv_escape(cell: &str) -> String {
    if cell.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", cell.replace('"', "\"\""))
    } else {
        cell.to_string()
    }
}

fn column_index(columns: &[Column], name: &str) -> Result<usize> {
    match columns.iter().position(|c| c.matches(name)) {
        Some(index) => Ok(index),
        None => {
            let known: Vec<&str> = columns.iter().map(Column::key).collect();
            bail!("Unknown column '{}'. Available columns: {}", name, known.join(", "))
        }
    }
}

fn compare_cells(a: &str, b: &str) -> Ordering {
    match (a.parse::<f64>(), b.parse::<f64>()) {
        (Ok(x), Ok(y)) => x.partial_cmp(&y).unwrap_or(Ordering::Equal),
        _ => a.cmp(b),
    }
}
