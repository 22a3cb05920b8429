//
//  pagerduty-cli
//  cli/config.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! CLI configuration commands
//!
//! Reads and writes the settings described in [`crate::config`]. Keys are
//! either core settings (`batch_size`) or profile settings
//! (`profiles.work.email`).

use anyhow::{bail, Result};
use clap::{Args, Subcommand};
use serde_json::json;

use crate::config::Config;
use crate::output::{write_json, OutputWriter, TableBuilder};

use super::GlobalOptions;

/// Manage CLI configuration
#[derive(Args, Debug)]
pub struct ConfigCommand {
    #[command(subcommand)]
    pub command: ConfigSubcommand,
}

#[derive(Subcommand, Debug)]
pub enum ConfigSubcommand {
    /// Get a configuration value
    Get(GetArgs),

    /// Set a configuration value
    Set(SetArgs),

    /// List all configuration values
    #[command(visible_alias = "ls")]
    List,

    /// Show configuration file path
    Path,
}

#[derive(Args, Debug)]
pub struct GetArgs {
    /// Configuration key
    pub key: String,
}

#[derive(Args, Debug)]
pub struct SetArgs {
    /// Configuration key
    pub key: String,

    /// Configuration value (empty clears a profile setting)
    pub value: String,
}

impl ConfigCommand {
    pub async fn run(&self, global: &GlobalOptions) -> Result<()> {
        match &self.command {
            ConfigSubcommand::Get(args) => self.get(args, global),
            ConfigSubcommand::Set(args) => self.set(args),
            ConfigSubcommand::List => self.list(global),
            ConfigSubcommand::Path => self.path(global),
        }
    }

    fn get(&self, args: &GetArgs, global: &GlobalOptions) -> Result<()> {
        let config = Config::load()?;
        let Some(value) = config.get(&args.key) else {
            bail!("'{}' is not set", args.key);
        };

        if global.json {
            write_json(&json!({ "key": args.key, "value": value }))
        } else {
            println!("{}", value);
            Ok(())
        }
    }

    fn set(&self, args: &SetArgs) -> Result<()> {
        let mut config = Config::load()?;
        config.set(&args.key, &args.value)?;
        config.save()?;

        OutputWriter::table().write_success(&format!("Set {} to '{}'", args.key, args.value));
        Ok(())
    }

    fn list(&self, global: &GlobalOptions) -> Result<()> {
        let config = Config::load()?;
        if global.json {
            return write_json(&config);
        }

        TableBuilder::new()
            .headers(["Key", "Value"])
            .rows(config.entries().into_iter().map(|(key, value)| vec![key, value]))
            .print();
        Ok(())
    }

    fn path(&self, global: &GlobalOptions) -> Result<()> {
        let config_path = Config::config_path()?;

        if global.json {
            write_json(&json!({
                "path": config_path.display().to_string(),
                "exists": config_path.exists(),
            }))
        } else {
            println!("{}", config_path.display());
            Ok(())
        }
    }
}
