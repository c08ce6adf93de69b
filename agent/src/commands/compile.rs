//! `fleet-agent compile`: turn an association message into execution state.

use std::io::Read;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Args;
use fleet_common::RawAssociationMessage;

use crate::app::AppContext;
use crate::application::services::association::compile_association;
use crate::infra::clock::SystemClock;

/// Arguments for the compile command.
#[derive(Args)]
pub struct CompileArgs {
    /// Association message JSON file (`-` reads stdin)
    pub message: PathBuf,
}

/// Run the compile command. The state is printed as JSON on stdout.
///
/// # Errors
///
/// Returns an error if the message cannot be read or decoded, or the
/// document it carries is malformed.
pub fn run(app: &AppContext, args: &CompileArgs) -> Result<ExitCode> {
    let input = read_message(&args.message)?;
    let raw: RawAssociationMessage = serde_json::from_str(&input)
        .with_context(|| format!("invalid association message {}", args.message.display()))?;

    let layout = app.layout()?;
    let state = compile_association(&raw, &SystemClock, &layout)?;

    let out = if app.is_json() {
        serde_json::to_string(&state)
    } else {
        serde_json::to_string_pretty(&state)
    }
    .context("cannot serialize document state")?;
    println!("{out}");
    Ok(ExitCode::SUCCESS)
}

fn read_message(path: &Path) -> Result<String> {
    if path.as_os_str() == "-" {
        let mut buf = String::new();
        std::io::stdin()
            .read_to_string(&mut buf)
            .context("cannot read message from stdin")?;
        return Ok(buf);
    }
    std::fs::read_to_string(path).with_context(|| format!("cannot read {}", path.display()))
}
