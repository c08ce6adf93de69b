//! `fleet-agent config`: show and set configuration values.

use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Subcommand;
use serde::Serialize;

use crate::app::AppContext;
use crate::application::ports::ConfigStore;
use crate::application::services::config_service;
use crate::domain::config::AgentConfig;

/// Config subcommands.
#[derive(Subcommand)]
pub enum ConfigCommand {
    /// Show current configuration
    Show,
    /// Set configuration value
    Set {
        /// Configuration key
        key: String,
        /// Configuration value
        value: String,
    },
}

/// Run the config command.
///
/// # Errors
///
/// Returns an error if the configuration cannot be loaded, validated or
/// saved.
pub fn run(app: &AppContext, cmd: ConfigCommand) -> Result<ExitCode> {
    match cmd {
        ConfigCommand::Show => show_config(app),
        ConfigCommand::Set { key, value } => set_config(app, &key, &value),
    }
}

#[derive(Serialize)]
struct ConfigView<'a> {
    path: String,
    config: &'a AgentConfig,
}

fn show_config(app: &AppContext) -> Result<ExitCode> {
    let config = app.config()?;
    let path = app.config_store.path()?;
    if app.is_json() {
        let view = ConfigView {
            path: path.display().to_string(),
            config: &config,
        };
        let out = serde_json::to_string_pretty(&view).context("cannot serialize config")?;
        println!("{out}");
    } else {
        println!("# {}", path.display());
        print!("{}", serde_yaml::to_string(&config).context("cannot serialize config")?);
    }
    Ok(ExitCode::SUCCESS)
}

fn set_config(app: &AppContext, key: &str, value: &str) -> Result<ExitCode> {
    config_service::set_config_value(&app.config_store, key, value)?;
    println!("Set {key} = {value}");
    Ok(ExitCode::SUCCESS)
}
