//! Wire contracts shared by fleet agent components.
//!
//! Types here are plain serde data: no I/O, no logging, no clocks.

pub mod association;
pub mod document;
pub mod identity;
pub mod inventory;
pub mod paths;
pub mod state;

pub use association::{Association, OutputLocation, RawAssociationMessage, S3Location};
pub use document::{DocumentContent, ParameterDefinition, ParameterType, PluginConfig, StepConfig};
pub use inventory::{GathererPolicies, InventoryItem, InventoryPolicy, WireInventoryItem};
pub use paths::{join_under, s3_join};
pub use state::{
    DocumentExecutionState, DocumentInfo, DocumentStatus, DocumentType, PluginConfiguration,
    PluginState, Plugins, StateShapeError,
};
