//! Consecutive-failure tracking for periodic jobs.

/// Counts consecutive failures of a named job.
///
/// The job is considered healthy while fewer than `threshold` failures have
/// been recorded since the last success or reset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StopPolicy {
    name: String,
    threshold: u32,
    error_count: u32,
}

impl StopPolicy {
    #[must_use]
    pub fn new(name: impl Into<String>, threshold: u32) -> Self {
        Self {
            name: name.into(),
            threshold,
            error_count: 0,
        }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn error_count(&self) -> u32 {
        self.error_count
    }

    pub fn record_success(&mut self) {
        self.error_count = 0;
    }

    pub fn record_failure(&mut self) {
        self.error_count = self.error_count.saturating_add(1);
    }

    #[must_use]
    pub fn is_healthy(&self) -> bool {
        self.error_count < self.threshold
    }

    pub fn reset(&mut self) {
        self.error_count = 0;
    }
}
