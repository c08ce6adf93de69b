//! Built-in inventory gatherers and the production registry.

mod instance_info;
mod packages;

use std::path::Path;

use anyhow::Result;
use chrono::{DateTime, Utc};

pub use instance_info::InstanceInformationGatherer;
pub use packages::ApplicationGatherer;

use crate::application::registry::GathererRegistry;

/// Build the registry of every gatherer this agent ships.
///
/// # Errors
///
/// Returns an error if two gatherers claim the same name.
pub fn load_gatherers() -> Result<GathererRegistry> {
    load_gatherers_from(Path::new("/"))
}

/// Same as [`load_gatherers`], reading system files below `root`.
///
/// # Errors
///
/// Returns an error if two gatherers claim the same name.
pub fn load_gatherers_from(root: &Path) -> Result<GathererRegistry> {
    let registry = GathererRegistry::builder()
        .register(Box::new(InstanceInformationGatherer::new(root)))?
        .register(Box::new(ApplicationGatherer::new(root)))?
        .build();
    tracing::debug!(gatherers = ?registry, "gatherer registry loaded");
    Ok(registry)
}

/// Capture timestamp format used by the inventory service.
fn capture_time(now: DateTime<Utc>) -> String {
    now.format("%Y-%m-%dT%H:%M:%SZ").to_string()
}

/// Read a file below `root`, treating a missing file as empty.
fn read_optional(root: &Path, relative: &str) -> Result<Option<String>> {
    let path = root.join(relative);
    match std::fs::read_to_string(&path) {
        Ok(content) => Ok(Some(content)),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
        Err(e) => Err(anyhow::Error::new(e).context(format!("reading {}", path.display()))),
    }
}
