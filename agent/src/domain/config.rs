//! Domain types and validators for agent configuration.
//!
//! Pure functions only: no I/O, no async, no filesystem access.

use std::path::PathBuf;

use anyhow::Result;
use serde::{Deserialize, Serialize};

use crate::domain::error::ConfigError;
use crate::domain::inventory::SizeLimits;

// ── Constants ────────────────────────────────────────────────────────────────

pub const VALID_CONFIG_KEYS: &[&str] = &[
    "inventory.enabled",
    "inventory.frequency_minutes",
    "inventory.item_size_limit_kb",
    "inventory.total_size_limit_kb",
];

/// File name of the inventory policy inside `inventory.policy_dir`.
pub const INVENTORY_POLICY_FILE: &str = "InventoryPolicy.json";

// ── Config schema ────────────────────────────────────────────────────────────

/// Top-level configuration stored in `~/.fleet-agent/config.yaml`.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct AgentConfig {
    /// On-disk layout used when compiling documents.
    pub agent: AgentSection,
    /// Inventory collection settings.
    pub inventory: InventorySection,
}

/// Orchestration directory layout.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AgentSection {
    /// Root of the agent data store.
    pub data_store_root: PathBuf,
    /// Per-instance segment under which document state lives.
    pub document_root_dir_name: String,
    /// Segment holding per-run orchestration directories.
    pub orchestration_root_dir: String,
    /// Filesystem root the built-in gatherers inspect.
    pub system_root: PathBuf,
}

impl Default for AgentSection {
    fn default() -> Self {
        Self {
            data_store_root: PathBuf::from("/var/lib/fleet-agent"),
            document_root_dir_name: "document".to_string(),
            orchestration_root_dir: "orchestration".to_string(),
            system_root: PathBuf::from("/"),
        }
    }
}

/// Inventory scheduling and limits.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct InventorySection {
    pub enabled: bool,
    /// Minutes between two policy applications.
    pub frequency_minutes: u64,
    /// Directory containing `InventoryPolicy.json`.
    pub policy_dir: PathBuf,
    /// Directory the uploader spools finished batches into.
    pub spool_dir: PathBuf,
    pub item_size_limit_kb: u64,
    pub total_size_limit_kb: u64,
    /// Consecutive failed cycles tolerated before a tick is skipped.
    pub error_threshold: u32,
}

impl Default for InventorySection {
    fn default() -> Self {
        Self {
            enabled: true,
            frequency_minutes: 5,
            policy_dir: PathBuf::from("/etc/fleet-agent"),
            spool_dir: PathBuf::from("/var/lib/fleet-agent/inventory"),
            item_size_limit_kb: 200,
            total_size_limit_kb: 1024,
            error_threshold: 10,
        }
    }
}

impl InventorySection {
    /// Full path of the policy file.
    #[must_use]
    pub fn policy_path(&self) -> PathBuf {
        self.policy_dir.join(INVENTORY_POLICY_FILE)
    }

    #[must_use]
    pub fn size_limits(&self) -> SizeLimits {
        SizeLimits::from_kb(self.item_size_limit_kb, self.total_size_limit_kb)
    }
}

impl AgentConfig {
    /// Check cross-field constraints the YAML schema cannot express.
    ///
    /// # Errors
    ///
    /// Returns an error describing the first violated constraint.
    pub fn validate(&self) -> Result<()> {
        let inv = &self.inventory;
        if inv.frequency_minutes == 0 {
            return Err(
                ConfigError::Invalid("inventory.frequency_minutes must be > 0".into()).into(),
            );
        }
        if inv.item_size_limit_kb == 0 || inv.total_size_limit_kb == 0 {
            return Err(ConfigError::Invalid("inventory size limits must be > 0".into()).into());
        }
        if inv.item_size_limit_kb > inv.total_size_limit_kb {
            return Err(ConfigError::Invalid(
                "inventory.item_size_limit_kb cannot exceed inventory.total_size_limit_kb".into(),
            )
            .into());
        }
        if self.agent.orchestration_root_dir.is_empty() {
            return Err(
                ConfigError::Invalid("agent.orchestration_root_dir must not be empty".into())
                    .into(),
            );
        }
        Ok(())
    }
}

// ── Validators ───────────────────────────────────────────────────────────────

/// Validates a configuration key against the whitelist.
///
/// # Errors
///
/// Returns an error if the key is not in the allowed list.
pub fn validate_config_key(key: &str) -> Result<()> {
    if !VALID_CONFIG_KEYS.contains(&key) {
        return Err(ConfigError::UnknownKey {
            key: key.to_string(),
            valid: VALID_CONFIG_KEYS.join(", "),
        }
        .into());
    }
    Ok(())
}

/// Validates a configuration value for the given key.
///
/// # Errors
///
/// Returns an error if the value is not valid for the key.
pub fn validate_config_value(key: &str, value: &str) -> Result<()> {
    let invalid = |reason: &str| -> anyhow::Error {
        ConfigError::InvalidValue {
            key: key.to_string(),
            value: value.to_string(),
            reason: reason.to_string(),
        }
        .into()
    };
    match key {
        "inventory.enabled" => {
            if value != "true" && value != "false" {
                return Err(invalid("Valid values: true, false"));
            }
        }
        "inventory.frequency_minutes"
        | "inventory.item_size_limit_kb"
        | "inventory.total_size_limit_kb" => match value.parse::<u64>() {
            Ok(n) if n > 0 => {}
            _ => return Err(invalid("Expected a positive integer")),
        },
        _ => {}
    }
    Ok(())
}

/// Apply an already validated `key = value` to the config.
///
/// # Errors
///
/// Returns an error if the key is unknown or the value does not parse, or if
/// the updated configuration violates a cross-field constraint.
pub fn apply_config_value(config: &mut AgentConfig, key: &str, value: &str) -> Result<()> {
    validate_config_key(key)?;
    validate_config_value(key, value)?;
    let inv = &mut config.inventory;
    match key {
        "inventory.enabled" => inv.enabled = value == "true",
        "inventory.frequency_minutes" => inv.frequency_minutes = value.parse()?,
        "inventory.item_size_limit_kb" => inv.item_size_limit_kb = value.parse()?,
        "inventory.total_size_limit_kb" => inv.total_size_limit_kb = value.parse()?,
        _ => anyhow::bail!("Unknown setting: {key}"),
    }
    config.validate()
}

// ── Unit tests ───────────────────────────────────────────────────────────────
