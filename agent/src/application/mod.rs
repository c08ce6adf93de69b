//! Application layer: port trait definitions and use-case orchestration.
//!
//! This module depends only on `crate::domain`, never on `crate::infra` or
//! `crate::commands`.

pub mod ports;
pub mod registry;
pub mod services;

pub use ports::{Clock, ConfigStore, Gatherer, InventoryUploader, PolicySource};
pub use registry::{GathererRegistry, GathererRegistryBuilder};
