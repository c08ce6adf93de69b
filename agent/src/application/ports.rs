//! Port trait definitions for the Application layer.
//!
//! Ports are the interfaces (contracts) that infrastructure must fulfill.
//! This file imports only from `crate::domain` and `fleet_common`, never
//! from `crate::infra` or `crate::commands`.

use std::path::PathBuf;

use anyhow::Result;
use chrono::{DateTime, Utc};
use fleet_common::{InventoryItem, InventoryPolicy, WireInventoryItem};
use serde_json::Value;

use crate::domain::config::AgentConfig;

// ── Time ──────────────────────────────────────────────────────────────────────

/// Source of the current time. Injected so compilation is reproducible.
pub trait Clock {
    fn now(&self) -> DateTime<Utc>;
}

// ── Inventory Ports ───────────────────────────────────────────────────────────

/// A named inventory collector.
///
/// Implementations must be shareable across threads: the registry holding
/// them is handed to the scheduler task.
pub trait Gatherer: Send + Sync {
    /// Inventory type this gatherer produces, e.g. `AWS:Application`.
    fn name(&self) -> &str;
    /// Collect one item according to the gatherer's sub-policy.
    fn run(&self, policy: &Value) -> Result<InventoryItem>;
}

/// Ships collected inventory to the inventory service.
pub trait InventoryUploader {
    /// Convert collected items to the service's item shape.
    fn convert(&self, items: &[InventoryItem]) -> Result<Vec<WireInventoryItem>>;
    /// Send a converted batch. Delivery is attempted once.
    fn send(&self, items: &[WireInventoryItem]) -> Result<()>;
}

/// Where the current inventory policy comes from.
pub trait PolicySource {
    /// Load the policy, returning `None` when no policy is configured.
    fn load(&self) -> Result<Option<InventoryPolicy>>;
}

// ── Configuration Port ────────────────────────────────────────────────────────

/// Persistent agent configuration.
pub trait ConfigStore {
    /// Load the configuration, falling back to defaults when none is stored.
    fn load(&self) -> Result<AgentConfig>;
    /// Persist the configuration.
    fn save(&self, config: &AgentConfig) -> Result<()>;
    /// Location of the configuration file.
    fn path(&self) -> Result<PathBuf>;
}
