//! `fleet-agent inventory`: collect and upload instance inventory.

use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use clap::Subcommand;

use crate::app::AppContext;
use crate::application::services::inventory::{CycleOutcome, apply_inventory_policy};
use crate::infra::clock::SystemClock;
use crate::infra::gatherers::load_gatherers_from;
use crate::infra::policy::FilePolicySource;
use crate::infra::scheduler::{InventoryScheduler, shutdown_signal};
use crate::infra::uploader::SpoolUploader;

/// Inventory subcommands.
#[derive(Subcommand)]
pub enum InventoryCommand {
    /// Apply the inventory policy once
    Run {
        /// Policy file to apply instead of the configured one
        #[arg(long)]
        policy: Option<PathBuf>,
    },
    /// List the registered gatherers
    Gatherers,
    /// Apply the inventory policy periodically until interrupted
    Schedule,
}

/// Run the inventory command.
///
/// # Errors
///
/// Returns an error if the configuration cannot be loaded or the gatherer
/// registry cannot be built.
pub async fn run(app: &AppContext, cmd: InventoryCommand) -> Result<ExitCode> {
    match cmd {
        InventoryCommand::Run { policy } => run_once(app, policy),
        InventoryCommand::Gatherers => list_gatherers(app),
        InventoryCommand::Schedule => schedule(app).await,
    }
}

fn run_once(app: &AppContext, policy: Option<PathBuf>) -> Result<ExitCode> {
    let config = app.config()?;
    let inv = &config.inventory;
    let registry = load_gatherers_from(&config.agent.system_root)?;
    let source = FilePolicySource::new(policy.unwrap_or_else(|| inv.policy_path()));
    let uploader = SpoolUploader::new(inv.spool_dir.clone(), SystemClock);

    let outcome = apply_inventory_policy(&source, &registry, &uploader, inv.size_limits());
    report(app, &outcome);
    Ok(if outcome.is_failure() {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    })
}

fn report(app: &AppContext, outcome: &CycleOutcome) {
    let (status, detail, items) = match outcome {
        CycleOutcome::NoPolicy => ("skipped", "no inventory policy found".to_string(), 0),
        CycleOutcome::PolicyUnreadable(msg) => ("policy_unreadable", msg.clone(), 0),
        CycleOutcome::Failed(e) => ("failed", e.to_string(), 0),
        CycleOutcome::UploadFailed(msg) => ("upload_failed", msg.clone(), 0),
        CycleOutcome::Uploaded { items } => ("uploaded", format!("{items} item(s) uploaded"), *items),
    };
    if app.is_json() {
        let out = serde_json::json!({ "status": status, "detail": detail, "items": items });
        println!("{out}");
    } else {
        println!("{status}: {detail}");
    }
}

fn list_gatherers(app: &AppContext) -> Result<ExitCode> {
    let config = app.config()?;
    let registry = load_gatherers_from(&config.agent.system_root)?;
    if app.is_json() {
        let names: Vec<&str> = registry.names().collect();
        println!("{}", serde_json::json!({ "gatherers": names }));
    } else {
        for name in registry.names() {
            println!("{name}");
        }
    }
    Ok(ExitCode::SUCCESS)
}

async fn schedule(app: &AppContext) -> Result<ExitCode> {
    let config = app.config()?;
    let inv = config.inventory;
    if !inv.enabled {
        tracing::info!("inventory collection is disabled");
        return Ok(ExitCode::SUCCESS);
    }

    let registry = Arc::new(load_gatherers_from(&config.agent.system_root)?);
    let scheduler = InventoryScheduler::new(
        FilePolicySource::new(inv.policy_path()),
        registry,
        SpoolUploader::new(inv.spool_dir.clone(), SystemClock),
        inv.size_limits(),
        Duration::from_secs(inv.frequency_minutes.saturating_mul(60)),
        inv.error_threshold,
    );
    scheduler.run(shutdown_signal()).await;
    Ok(ExitCode::SUCCESS)
}
