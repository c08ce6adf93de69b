//! Application context: unified state passed to every command handler.
//!
//! Constructed once in `Cli::run()`; commands read configuration and build
//! their adapters through it instead of reaching for globals.

use anyhow::Result;

use crate::application::services::config_service;
use crate::domain::association::OrchestrationLayout;
use crate::domain::config::AgentConfig;
use crate::infra::config::YamlConfigStore;

/// Output rendering mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    /// Human-readable terminal output (default).
    Human,
    /// Machine-readable JSON output.
    Json,
}

/// Unified application context passed to every command handler.
pub struct AppContext {
    /// Persistent configuration.
    pub config_store: YamlConfigStore,
    /// Output rendering mode (human vs JSON).
    pub mode: OutputMode,
}

impl AppContext {
    #[must_use]
    pub fn new(json: bool) -> Self {
        let mode = if json {
            OutputMode::Json
        } else {
            OutputMode::Human
        };
        Self {
            config_store: YamlConfigStore,
            mode,
        }
    }

    /// Returns `true` when JSON output mode is active.
    #[must_use]
    pub fn is_json(&self) -> bool {
        self.mode == OutputMode::Json
    }

    /// Load and validate the agent configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file is unreadable or inconsistent.
    pub fn config(&self) -> Result<AgentConfig> {
        config_service::load_config(&self.config_store)
    }

    /// Orchestration layout derived from the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration cannot be loaded.
    pub fn layout(&self) -> Result<OrchestrationLayout> {
        Ok(OrchestrationLayout::from(&self.config()?.agent))
    }
}
