//! Application service: inventory collection and upload.
//!
//! Collection is all-or-nothing: any failure voids the whole cycle and
//! nothing is uploaded.

use fleet_common::{InventoryItem, InventoryPolicy};

use crate::application::ports::{InventoryUploader, PolicySource};
use crate::application::registry::GathererRegistry;
use crate::domain::error::InventoryError;
use crate::domain::inventory::{SizeBudget, SizeLimits};

/// How one inventory cycle ended.
#[derive(Debug, Clone, PartialEq)]
pub enum CycleOutcome {
    /// No policy is configured; nothing was collected.
    NoPolicy,
    /// The policy exists but could not be read or parsed.
    PolicyUnreadable(String),
    /// Collection failed; the batch was discarded.
    Failed(InventoryError),
    /// Collection succeeded but conversion or delivery did not.
    UploadFailed(String),
    /// The batch was handed to the uploader.
    Uploaded { items: usize },
}

impl CycleOutcome {
    /// Whether the cycle counts as a failure for the stop policy.
    #[must_use]
    pub fn is_failure(&self) -> bool {
        matches!(
            self,
            Self::PolicyUnreadable(_) | Self::Failed(_) | Self::UploadFailed(_)
        )
    }
}

/// Run every gatherer the policy names, in policy order.
///
/// # Errors
///
/// * [`InventoryError::UnregisteredGatherer`] for a name the registry lacks;
/// * [`InventoryError::GathererExecutionFailed`] when a gatherer fails;
/// * [`InventoryError::SizeLimitExceeded`] when an item or the batch is too
///   large.
///
/// Gatherers after the failing one are not run.
pub fn verify_and_run_gatherers(
    policy: &InventoryPolicy,
    registry: &GathererRegistry,
    limits: SizeLimits,
) -> Result<Vec<InventoryItem>, InventoryError> {
    let mut items = Vec::with_capacity(policy.gatherers.len());
    let mut budget = SizeBudget::new(limits);

    for (name, sub_policy) in policy.gatherers.iter() {
        let gatherer = registry
            .lookup(name)
            .ok_or_else(|| InventoryError::UnregisteredGatherer(name.to_string()))?;

        tracing::debug!(gatherer = name, "running gatherer");
        let item = gatherer
            .run(sub_policy)
            .map_err(|e| InventoryError::GathererExecutionFailed {
                name: name.to_string(),
                cause: format!("{e:#}"),
            })?;

        budget.charge(&item)?;
        items.push(item);
    }

    tracing::debug!(items = items.len(), bytes = budget.used(), "inventory collected");
    Ok(items)
}

/// Apply the current inventory policy once: load, collect, convert, send.
pub fn apply_inventory_policy(
    source: &impl PolicySource,
    registry: &GathererRegistry,
    uploader: &impl InventoryUploader,
    limits: SizeLimits,
) -> CycleOutcome {
    let policy = match source.load() {
        Ok(Some(policy)) => policy,
        Ok(None) => {
            tracing::info!("no inventory policy to apply");
            return CycleOutcome::NoPolicy;
        }
        Err(e) => {
            tracing::error!(error = %format!("{e:#}"), "unable to load inventory policy");
            return CycleOutcome::PolicyUnreadable(format!("{e:#}"));
        }
    };

    let items = match verify_and_run_gatherers(&policy, registry, limits) {
        Ok(items) => items,
        Err(e) => {
            tracing::error!(error = %e, "inventory collection failed");
            return CycleOutcome::Failed(e);
        }
    };

    if let Ok(json) = serde_json::to_string(&items) {
        tracing::debug!(data = %json, "collected inventory data");
    }

    let sent = uploader
        .convert(&items)
        .and_then(|wire| uploader.send(&wire));
    match sent {
        Ok(()) => {
            tracing::info!(items = items.len(), "inventory uploaded");
            CycleOutcome::Uploaded { items: items.len() }
        }
        Err(e) => {
            tracing::error!(error = %format!("{e:#}"), "inventory upload failed");
            CycleOutcome::UploadFailed(format!("{e:#}"))
        }
    }
}
