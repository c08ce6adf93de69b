//! Periodic inventory collection on a tokio interval.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use crate::application::ports::{InventoryUploader, PolicySource};
use crate::application::registry::GathererRegistry;
use crate::application::services::inventory::{CycleOutcome, apply_inventory_policy};
use crate::domain::inventory::SizeLimits;
use crate::domain::stop_policy::StopPolicy;

/// Name the stop policy reports under.
pub const INVENTORY_JOB: &str = "inventory";

/// What a single scheduler tick did.
#[derive(Debug, Clone, PartialEq)]
pub enum TickResult {
    /// Too many consecutive failures: the tick was skipped and the stop
    /// policy reset.
    CoolingDown,
    Ran(CycleOutcome),
}

/// Applies the inventory policy every `period` until shut down.
pub struct InventoryScheduler<S, U> {
    source: S,
    registry: Arc<GathererRegistry>,
    uploader: U,
    limits: SizeLimits,
    period: Duration,
    stop_policy: StopPolicy,
}

impl<S: PolicySource, U: InventoryUploader> InventoryScheduler<S, U> {
    #[must_use]
    pub fn new(
        source: S,
        registry: Arc<GathererRegistry>,
        uploader: U,
        limits: SizeLimits,
        period: Duration,
        error_threshold: u32,
    ) -> Self {
        Self {
            source,
            registry,
            uploader,
            limits,
            period,
            stop_policy: StopPolicy::new(INVENTORY_JOB, error_threshold),
        }
    }

    #[must_use]
    pub fn stop_policy(&self) -> &StopPolicy {
        &self.stop_policy
    }

    /// Run one cycle, honouring the stop policy.
    pub fn tick(&mut self) -> TickResult {
        if !self.stop_policy.is_healthy() {
            tracing::warn!(
                job = self.stop_policy.name(),
                failures = self.stop_policy.error_count(),
                "error threshold reached, skipping this run"
            );
            self.stop_policy.reset();
            return TickResult::CoolingDown;
        }

        let outcome =
            apply_inventory_policy(&self.source, &self.registry, &self.uploader, self.limits);
        if outcome.is_failure() {
            self.stop_policy.record_failure();
        } else {
            self.stop_policy.record_success();
        }
        TickResult::Ran(outcome)
    }

    /// Tick every period, starting immediately, until `shutdown` resolves.
    ///
    /// Each cycle runs on the blocking pool. A shutdown that arrives mid-cycle
    /// returns at once and leaves that cycle to finish on its own.
    pub async fn run(self, shutdown: impl Future<Output = ()>)
    where
        S: Send + 'static,
        U: Send + 'static,
    {
        tracing::info!(period_secs = self.period.as_secs(), "inventory scheduler started");
        let mut interval = tokio::time::interval(self.period);
        interval.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
        tokio::pin!(shutdown);

        let mut scheduler = self;
        loop {
            tokio::select! {
                () = &mut shutdown => break,
                _ = interval.tick() => {}
            }

            let cycle = tokio::task::spawn_blocking(move || {
                let result = scheduler.tick();
                (scheduler, result)
            });
            tokio::select! {
                () = &mut shutdown => {
                    tracing::info!("shutdown requested during an inventory cycle");
                    break;
                }
                joined = cycle => match joined {
                    Ok((back, _)) => scheduler = back,
                    Err(e) => {
                        tracing::error!(error = %e, "inventory cycle task failed");
                        break;
                    }
                },
            }
        }
        tracing::info!("inventory scheduler stopped");
    }
}

/// Resolves on Ctrl-C. If the handler cannot be installed, waits forever.
pub async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "cannot install Ctrl-C handler");
        std::future::pending::<()>().await;
    }
    tracing::info!("received shutdown signal");
}
