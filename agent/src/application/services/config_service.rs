//! Application service: configuration use-cases.

use anyhow::Result;

use crate::application::ports::ConfigStore;
use crate::domain::config::{AgentConfig, apply_config_value};

/// Load configuration and check its invariants.
///
/// # Errors
///
/// Returns an error if the store cannot be read or the stored values are
/// inconsistent.
pub fn load_config(store: &impl ConfigStore) -> Result<AgentConfig> {
    let config = store.load()?;
    config.validate()?;
    Ok(config)
}

/// Update a single setting and persist the result.
///
/// # Errors
///
/// Returns an error if the key or value is invalid, or the store fails.
pub fn set_config_value(store: &impl ConfigStore, key: &str, value: &str) -> Result<AgentConfig> {
    let mut config = store.load()?;
    apply_config_value(&mut config, key, value)?;
    store.save(&config)?;
    tracing::info!(key, value, "configuration updated");
    Ok(config)
}
