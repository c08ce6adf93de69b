//! CLI argument parsing with clap derive

use std::process::ExitCode;

use anyhow::Result;
use clap::{Parser, Subcommand};

use fleet_agent::app::AppContext;
use fleet_agent::commands;

/// Fleet agent: association compilation and inventory collection
#[derive(Parser)]
#[command(
    name = "fleet-agent",
    version,
    propagate_version = true,
    subcommand_required = true,
    arg_required_else_help = true
)]
pub struct Cli {
    /// Output in JSON format
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Compile an association message into document execution state
    Compile(commands::compile::CompileArgs),

    /// Collect and upload inventory
    #[command(subcommand)]
    Inventory(commands::inventory::InventoryCommand),

    /// Manage configuration
    #[command(subcommand)]
    Config(commands::config::ConfigCommand),

    /// Show version
    Version,
}

impl Cli {
    /// Execute the CLI command.
    ///
    /// # Errors
    ///
    /// Returns an error if the command fails.
    pub async fn run(self) -> Result<ExitCode> {
        let Cli { json, command } = self;
        let app = AppContext::new(json);
        match command {
            Command::Compile(args) => commands::compile::run(&app, &args),
            Command::Inventory(cmd) => commands::inventory::run(&app, cmd).await,
            Command::Config(cmd) => commands::config::run(&app, cmd),
            Command::Version => {
                commands::version::run(json);
                Ok(ExitCode::SUCCESS)
            }
        }
    }
}
