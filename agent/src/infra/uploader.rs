//! Spool-directory `InventoryUploader`.
//!
//! Each converted batch lands in its own JSON file; the transport that
//! forwards batches to the inventory service consumes the spool.

use std::path::PathBuf;

use anyhow::{Context, Result};
use fleet_common::{InventoryItem, WireInventoryItem, identity};

use crate::application::ports::{Clock, InventoryUploader};
use crate::domain::inventory::to_wire;
use crate::infra::fs::write_atomic;

/// Writes wire batches to `<spool_dir>/inventory-<runId>.json`.
pub struct SpoolUploader<C> {
    spool_dir: PathBuf,
    clock: C,
}

impl<C: Clock> SpoolUploader<C> {
    #[must_use]
    pub fn new(spool_dir: PathBuf, clock: C) -> Self {
        Self { spool_dir, clock }
    }
}

impl<C: Clock> InventoryUploader for SpoolUploader<C> {
    fn convert(&self, items: &[InventoryItem]) -> Result<Vec<WireInventoryItem>> {
        to_wire(items)
    }

    fn send(&self, items: &[WireInventoryItem]) -> Result<()> {
        let file = self
            .spool_dir
            .join(format!("inventory-{}.json", identity::run_id(self.clock.now())));
        let content = serde_json::to_vec_pretty(items).context("serializing inventory batch")?;
        write_atomic(&file, &content)?;
        tracing::info!(path = %file.display(), items = items.len(), "inventory batch spooled");
        Ok(())
    }
}
