//
//  pagerduty-cli
//  cli/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! CLI command definitions using clap derive macros

mod auth;
mod completion;
mod config;
mod ep;
mod log;
mod priority;
mod rest;
mod schedule;
mod user;

pub use auth::AuthCommand;
pub use completion::CompletionCommand;
pub use config::ConfigCommand;
pub use ep::EpCommand;
pub use log::LogCommand;
pub use priority::PriorityCommand;
pub use rest::{parse_header, parse_params, RestCommand};
pub use schedule::ScheduleCommand;
pub use user::UserCommand;

use clap::{Parser, Subcommand};

/// PagerDuty CLI - Work with PagerDuty from the command line
#[derive(Parser, Debug)]
#[command(
    name = "pd",
    version,
    about = "Work with PagerDuty from the command line",
    long_about = "pd is a CLI for the PagerDuty REST API.\n\n\
                  It brings log entries, users, schedules, escalation policies and raw API access to your terminal.",
    propagate_version = true,
    after_help = "Use 'pd <command> --help' for more information about a command."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    #[command(flatten)]
    pub global: GlobalOptions,
}

/// Global options available to all commands
#[derive(Parser, Debug, Clone, Default)]
pub struct GlobalOptions {
    /// API token to use instead of the stored one
    #[arg(long, global = true, env = "PD_TOKEN", hide_env_values = true)]
    pub token: Option<String>,

    /// Profile whose stored token and settings to use
    #[arg(long, short = 'p', global = true, env = "PD_PROFILE")]
    pub profile: Option<String>,

    /// Output full details as JSON
    #[arg(long, short = 'j', global = true)]
    pub json: bool,

    /// Disable interactive prompts
    #[arg(long, global = true, env = "PD_NO_PROMPT")]
    pub no_prompt: bool,
}

/// Top-level commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Show account log entries
    Log(LogCommand),

    /// Manage users
    #[command(visible_alias = "u")]
    User(UserCommand),

    /// Show schedules
    Schedule(ScheduleCommand),

    /// Show escalation policies
    Ep(EpCommand),

    /// List incident priorities
    Priority(PriorityCommand),

    /// Make raw REST API requests
    Rest(RestCommand),

    /// Manage API tokens
    Auth(AuthCommand),

    /// Manage CLI configuration
    Config(ConfigCommand),

    /// Generate shell completion scripts
    Completion(CompletionCommand),

    /// Print version information
    Version,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_global_options_after_subcommand() {
        let cli = Cli::try_parse_from(["pd", "log", "-O", "--json", "--profile", "ops", "--sort", "-created"]).unwrap();
        assert!(cli.global.json);
        assert_eq!(cli.global.profile.as_deref(), Some("ops"));
        let Commands::Log(log) = cli.command else {
            panic!("expected the log command");
        };
        assert!(log.overview);
        assert_eq!(log.since, "30 days ago");
        assert_eq!(log.table.sort.as_deref(), Some("-created"));
    }

    #[test]
    fn test_user_set_args() {
        let cli = Cli::try_parse_from([
            "pd", "user", "set", "-e", "a@x.com,b@x.com", "-e", "c@x.com", "-k", "job_title", "-v", "SRE",
        ])
        .unwrap();
        let Commands::User(user) = cli.command else {
            panic!("expected the user command");
        };
        let user::UserSubcommand::Set(args) = user.command else {
            panic!("expected user set");
        };
        assert_eq!(args.emails, vec!["a@x.com,b@x.com", "c@x.com"]);
        assert_eq!(args.value.as_deref(), Some("SRE"));
    }

    #[test]
    fn test_schedule_show_requires_name_or_id() {
        assert!(Cli::try_parse_from(["pd", "schedule", "show"]).is_err());
        assert!(Cli::try_parse_from(["pd", "schedule", "show", "-n", "Primary", "--id", "P1"]).is_err());
        assert!(Cli::try_parse_from(["pd", "ep", "show", "--id", "PEP01"]).is_ok());
    }
}
