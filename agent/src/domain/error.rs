//! Typed domain error enums.
//!
//! This module has zero imports from `crate::infra`, `crate::commands`,
//! `crate::application`, `tokio`, `std::fs`, `std::process`, or `std::net`.
//! All error types implement `thiserror::Error` and convert to `anyhow::Error`
//! via the `?` operator.

use thiserror::Error;

// ── Document errors ───────────────────────────────────────────────────────────

/// Errors raised while compiling an association document.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum DocumentError {
    #[error("Malformed document: {0}")]
    MalformedDocument(String),
}

// ── Inventory errors ──────────────────────────────────────────────────────────

/// Errors that void an inventory collection cycle.
///
/// None of these carry collected items: a failed cycle reports nothing.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum InventoryError {
    #[error("Unrecognized inventory gatherer - {0}")]
    UnregisteredGatherer(String),

    #[error("Encountered error while executing {name}. Error - {cause}")]
    GathererExecutionFailed { name: String, cause: String },

    #[error(
        "Size limit exceeded for collected data: item '{item}' is {item_bytes} bytes \
         (limit {per_item_limit}), batch is {total_bytes} bytes (limit {total_limit})"
    )]
    SizeLimitExceeded {
        item: String,
        item_bytes: u64,
        per_item_limit: u64,
        total_bytes: u64,
        total_limit: u64,
    },
}

// ── Registry errors ───────────────────────────────────────────────────────────

/// Errors raised while building the gatherer registry.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RegistryError {
    #[error("Gatherer '{0}' is registered more than once")]
    Duplicate(String),
}

// ── Config errors ─────────────────────────────────────────────────────────────

/// Errors related to configuration key/value validation.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Unknown setting: {key}\n\nValid settings: {valid}")]
    UnknownKey { key: String, valid: String },

    #[error("Invalid value for {key}: {value}\n\n{reason}")]
    InvalidValue {
        key: String,
        value: String,
        reason: String,
    },

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}
