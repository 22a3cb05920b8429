//
//  pagerduty-cli
//  output/json.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # JSON Output and Path Queries
//!
//! Pretty JSON output for `--json`, plus the JSONPath queries (RFC 9535)
//! used by `--keys` to add columns taken from anywhere inside a record.
//!
//! ## Path Syntax
//!
//! | Syntax | Meaning |
//! |--------|---------|
//! | `$` | The record itself |
//! | `.name` / `['name']` | Object member |
//! | `[2]` / `[-1]` / `[0:2]` | Array element or slice |
//! | `.*` / `[*]` | Every member or element |
//! | `..name` | `name` at any depth |
//! | `[?@.type == 'user']` | Elements matching a filter |
//!
//! A path without the leading `$` is read as if it had one, so
//! `agent.summary` and `$.agent.summary` are the same query.
//!
//! ## Example
//!
//! ```rust
//! use pagerduty_cli::output::{format_field, query_path};
//! use serde_json::json;
//!
//! let record = json!({"channel": {"notes": [{"text": "a"}, {"text": "b"}]}});
//! let matches = query_path(&record, "$.channel.notes[*].text").unwrap();
//! assert_eq!(format_field(&matches, ", "), "a, b");
//! ```

use std::io::Write;

use anyhow::{Context, Result};
use serde::Serialize;
use serde_json::Value;
use serde_json_path::JsonPath;

/// Prints a value as pretty JSON on stdout.
pub fn write_json<T: Serialize>(value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value)?;
    println!("{}", json);
    Ok(())
}

/// Writes a value as pretty JSON followed by a newline.
pub fn write_json_to<W: Write, T: Serialize>(writer: &mut W, value: &T) -> Result<()> {
    serde_json::to_writer_pretty(&mut *writer, value)?;
    writeln!(writer)?;
    Ok(())
}

/// Renders a JSON value as cell text.
///
/// Strings are shown without quotes and `null` as an empty cell; anything
/// else is compact JSON.
pub fn value_text(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Joins the values a path query returned into one cell.
///
/// Arrays are flattened and every element is rendered with
/// [`value_text`], separated by `delimiter`.
pub fn format_field(values: &[&Value], delimiter: &str) -> String {
    let mut parts = Vec::new();
    for value in values {
        collect_parts(value, &mut parts);
    }
    parts.join(delimiter)
}

fn collect_parts(value: &Value, parts: &mut Vec<String>) {
    match value {
        Value::Array(items) => items.iter().for_each(|item| collect_parts(item, parts)),
        other => parts.push(value_text(other)),
    }
}

/// Parses a path query once so it can be run against many records.
///
/// A path without the leading `$` is read as if it had one.
///
/// # Errors
///
/// Fails when the path is not valid JSONPath.
pub fn compile_path(path: &str) -> Result<JsonPath> {
    let path = path.trim();
    let normalized = match path.chars().next() {
        Some('$') => path.to_string(),
        Some('[') => format!("${}", path),
        _ => format!("$.{}", path),
    };
    JsonPath::parse(&normalized).with_context(|| format!("Invalid path '{}'", path))
}

/// Returns every value `path` selects in `value`, in document order.
///
/// # Errors
///
/// Fails when the path cannot be parsed.
pub fn query_path<'a>(value: &'a Value, path: &str) -> Result<Vec<&'a Value>> {
    Ok(compile_path(path)?.query(value).all())
}
