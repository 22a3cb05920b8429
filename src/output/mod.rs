//
//  pagerduty-cli
//  output/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # Output Module
//!
//! Commands print results in one of two formats:
//!
//! - **Table format**: human-readable tables for interactive use
//! - **JSON format**: the full API records for scripting (`--json`)
//!
//! ## Architecture
//!
//! - [`table`]: record tables with sorting, filtering, column selection and CSV
//! - [`json`]: JSON output and the path queries behind `--keys`
//!
//! [`OutputWriter`] ties the two together and also owns status messages
//! (errors, warnings, success ticks), which go to stderr so that stdout stays
//! machine-readable.

pub mod json;
pub mod table;

pub use json::*;
pub use table::*;

use anyhow::Result;
use serde_json::Value;

/// Available output formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Table,
    Json,
}

/// Writes command results in the selected format.
pub struct OutputWriter {
    format: OutputFormat,
    color: bool,
}

impl OutputWriter {
    pub fn new(format: OutputFormat) -> Self {
        Self {
            format,
            color: console::colors_enabled(),
        }
    }

    pub fn json() -> Self {
        Self::new(OutputFormat::Json)
    }

    pub fn table() -> Self {
        Self::new(OutputFormat::Table)
    }

    /// Picks JSON when `json` is set, a table otherwise.
    pub fn from_flag(json: bool) -> Self {
        if json {
            Self::json()
        } else {
            Self::table()
        }
    }

    pub fn format(&self) -> OutputFormat {
        self.format
    }

    pub fn is_json(&self) -> bool {
        self.format == OutputFormat::Json
    }

    /// Writes a list of records, as a table or as a JSON array.
    pub fn write_records(&self, records: &[Value], columns: &[Column], options: &TableOptions) -> Result<()> {
        match self.format {
            OutputFormat::Json => write_json(&records),
            OutputFormat::Table => print_records(records, columns, options),
        }
    }

    /// Writes a single record, as `key: value` lines or as JSON.
    pub fn write_record(&self, record: &Value, fields: &[(&str, String)]) -> Result<()> {
        match self.format {
            OutputFormat::Json => write_json(record),
            OutputFormat::Table => {
                for (key, value) in fields {
                    print_field(key, value, self.color);
                }
                Ok(())
            }
        }
    }

    pub fn write_warning(&self, msg: &str) {
        use console::style;
        if self.color {
            eprintln!("{} {}", style("warning:").yellow().bold(), msg);
        } else {
            eprintln!("warning: {}", msg);
        }
    }

    pub fn write_success(&self, msg: &str) {
        use console::style;
        if self.color {
            eprintln!("{} {}", style("✓").green().bold(), msg);
        } else {
            eprintln!("✓ {}", msg);
        }
    }
}

/// Applies the `color` setting (`auto`, `always` or `never`).
///
/// `auto` leaves terminal detection to `console`.
pub fn apply_color_setting(setting: &str) {
    match setting {
        "always" => {
            console::set_colors_enabled(true);
            console::set_colors_enabled_stderr(true);
        }
        "never" => {
            console::set_colors_enabled(false);
            console::set_colors_enabled_stderr(false);
        }
        _ => {}
    }
}

/// Prints a bold header with an underline.
pub fn print_header(text: &str) {
    use console::style;
    println!("{}", style(text).bold());
    println!("{}", "-".repeat(text.chars().count()));
}

/// Prints one `key: value` line, dimming the key when color is enabled.
pub fn print_field(key: &str, value: &str, color: bool) {
    use console::style;
    if color {
        println!("{}: {}", style(key).dim(), value);
    } else {
        println!("{}: {}", key, value);
    }
}
