//! File-backed `PolicySource`.

use std::path::PathBuf;

use anyhow::{Context, Result};
use fleet_common::InventoryPolicy;

use crate::application::ports::PolicySource;

/// Reads `InventoryPolicy.json` from disk on every load, so policy changes
/// are picked up by the next cycle.
pub struct FilePolicySource {
    path: PathBuf,
}

impl FilePolicySource {
    #[must_use]
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }
}

impl PolicySource for FilePolicySource {
    fn load(&self) -> Result<Option<InventoryPolicy>> {
        if !self.path.exists() {
            tracing::debug!(path = %self.path.display(), "inventory policy not found");
            return Ok(None);
        }
        let content = std::fs::read_to_string(&self.path)
            .with_context(|| format!("reading policy {}", self.path.display()))?;
        let policy = serde_json::from_str(&content)
            .with_context(|| format!("parsing policy {}", self.path.display()))?;
        Ok(Some(policy))
    }
}
