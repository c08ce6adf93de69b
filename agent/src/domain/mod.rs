//! Domain layer: pure business logic, types, and validation.
//!
//! This module has zero imports from `crate::infra`, `crate::commands`,
//! `crate::application`, `tokio`, `std::fs`, `std::process`, or `std::net`.
//! All functions are synchronous and take data in, returning data out.

pub mod association;
pub mod config;
pub mod error;
pub mod inventory;
pub mod parameters;
pub mod stop_policy;

pub use association::{OrchestrationLayout, ParsedDocument, compile, parse_document};
pub use config::{AgentConfig, apply_config_value, validate_config_key, validate_config_value};
pub use error::{ConfigError, DocumentError, InventoryError, RegistryError};
pub use inventory::{SizeBudget, SizeLimits, content_entries, to_wire};
pub use parameters::{ParameterBindings, ParameterValue, resolve_parameters, substitute_parameters};
pub use stop_policy::StopPolicy;
