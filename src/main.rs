//
//  pagerduty-cli
//  main.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use pagerduty_cli::cli::{Cli, Commands};
use pagerduty_cli::config::Config;
use pagerduty_cli::context::exit_code;
use pagerduty_cli::exit_codes;
use pagerduty_cli::output::apply_color_setting;

#[tokio::main]
async fn main() -> Result<()> {
    init_logging();

    let cli = Cli::parse();

    // An unreadable config file is reported by the command that needs it
    if let Ok(config) = Config::load() {
        apply_color_setting(&config.core.color);
    }

    match run(cli).await {
        Ok(()) => std::process::exit(exit_codes::SUCCESS),
        Err(e) => {
            eprintln!("Error: {e:#}");
            std::process::exit(exit_code(&e));
        }
    }
}

/// Initialize logging from `PD_DEBUG`
fn init_logging() {
    let filter = EnvFilter::try_from_env("PD_DEBUG").unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
        .with(filter)
        .init();
}

/// Main command dispatcher
async fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Log(cmd) => cmd.run(&cli.global).await,
        Commands::User(cmd) => cmd.run(&cli.global).await,
        Commands::Schedule(cmd) => cmd.run(&cli.global).await,
        Commands::Ep(cmd) => cmd.run(&cli.global).await,
        Commands::Priority(cmd) => cmd.run(&cli.global).await,
        Commands::Rest(cmd) => cmd.run(&cli.global).await,
        Commands::Auth(cmd) => cmd.run(&cli.global).await,
        Commands::Config(cmd) => cmd.run(&cli.global).await,
        Commands::Completion(cmd) => cmd.run(&cli.global).await,
        Commands::Version => {
            println!("pd version {}", pagerduty_cli::VERSION);
            Ok(())
        }
    }
}
