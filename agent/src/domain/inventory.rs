//! Inventory batch rules: size limits and conversion to the upload shape.
//!
//! Pure functions only. Gatherers and uploads live behind ports in
//! `crate::application`.

use anyhow::{Result, bail};
use fleet_common::{InventoryItem, WireInventoryItem};
use serde_json::{Map, Value};
use sha2::{Digest, Sha256};

use crate::domain::error::InventoryError;

/// Bytes in one kilobyte as the inventory service counts them.
pub const BYTES_PER_KB: u64 = 1000;

/// Upper bounds on collected inventory, in bytes of serialized JSON.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SizeLimits {
    pub per_item_bytes: u64,
    pub total_bytes: u64,
}

impl SizeLimits {
    /// Limits expressed in kilobytes (`1 KB = 1000 bytes`).
    #[must_use]
    pub fn from_kb(per_item_kb: u64, total_kb: u64) -> Self {
        Self {
            per_item_bytes: per_item_kb.saturating_mul(BYTES_PER_KB),
            total_bytes: total_kb.saturating_mul(BYTES_PER_KB),
        }
    }
}

impl Default for SizeLimits {
    fn default() -> Self {
        Self::from_kb(200, 1024)
    }
}

/// Size of an item as it would be uploaded.
#[must_use]
pub fn serialized_size(item: &InventoryItem) -> u64 {
    // Serializing a `Value`-backed struct cannot fail; fall back to 0 anyway.
    serde_json::to_vec(item).map_or(0, |bytes| bytes.len() as u64)
}

/// Tracks the running batch size while items are collected.
#[derive(Debug, Clone, Copy)]
pub struct SizeBudget {
    limits: SizeLimits,
    used: u64,
}

impl SizeBudget {
    #[must_use]
    pub fn new(limits: SizeLimits) -> Self {
        Self { limits, used: 0 }
    }

    /// Account for one more item.
    ///
    /// # Errors
    ///
    /// Returns [`InventoryError::SizeLimitExceeded`] when the item alone is
    /// above the per-item limit or the batch including it is above the total.
    pub fn charge(&mut self, item: &InventoryItem) -> Result<(), InventoryError> {
        let item_bytes = serialized_size(item);
        let total_bytes = self.used.saturating_add(item_bytes);
        if item_bytes > self.limits.per_item_bytes || total_bytes > self.limits.total_bytes {
            return Err(InventoryError::SizeLimitExceeded {
                item: item.name.clone(),
                item_bytes,
                per_item_limit: self.limits.per_item_bytes,
                total_bytes,
                total_limit: self.limits.total_bytes,
            });
        }
        self.used = total_bytes;
        Ok(())
    }

    #[must_use]
    pub fn used(&self) -> u64 {
        self.used
    }
}

/// Split item content into the entry list the inventory service expects.
///
/// An object becomes a single entry, an array of objects one entry per
/// element. `null` means "nothing collected".
///
/// # Errors
///
/// Returns an error for scalars or arrays containing non-objects.
pub fn content_entries(content: &Value) -> Result<Vec<Map<String, Value>>> {
    match content {
        Value::Null => Ok(Vec::new()),
        Value::Object(map) => Ok(vec![map.clone()]),
        Value::Array(items) => items
            .iter()
            .enumerate()
            .map(|(i, entry)| -> Result<Map<String, Value>> {
                match entry {
                    Value::Object(map) => Ok(map.clone()),
                    other => bail!("content entry {i} is not an object: {other}"),
                }
            })
            .collect(),
        other => bail!("content must be an object or an array of objects, got {other}"),
    }
}

/// Convert collected items to the upload shape, hashing each content list.
///
/// # Errors
///
/// Returns an error if an item's content cannot be split into entries.
pub fn to_wire(items: &[InventoryItem]) -> Result<Vec<WireInventoryItem>> {
    items
        .iter()
        .map(|item| -> Result<WireInventoryItem> {
            let content = content_entries(&item.content)
                .map_err(|e| e.context(format!("cannot convert '{}'", item.name)))?;
            let content_hash = content_hash(&content)?;
            Ok(WireInventoryItem {
                type_name: item.name.clone(),
                schema_version: item.schema_version.clone(),
                capture_time: item.capture_time.clone(),
                content,
                content_hash,
            })
        })
        .collect()
}

/// Lowercase hex SHA-256 of the serialized entries.
///
/// # Errors
///
/// Returns an error if the entries cannot be serialized.
pub fn content_hash(entries: &[Map<String, Value>]) -> Result<String> {
    let bytes = serde_json::to_vec(entries)?;
    Ok(hex_encode(&Sha256::digest(bytes)))
}

/// Encode bytes as lowercase hexadecimal.
#[must_use]
pub fn hex_encode(bytes: &[u8]) -> String {
    const HEX: &[u8; 16] = b"0123456789abcdef";
    let mut out = String::with_capacity(bytes.len() * 2);
    for &b in bytes {
        out.push(char::from(HEX[(b >> 4) as usize]));
        out.push(char::from(HEX[(b & 0xf) as usize]));
    }
    out
}
