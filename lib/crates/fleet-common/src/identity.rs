// lib/crates/fleet-common/src/identity.rs

//! Identifier formats shared by the document compiler and its consumers.

use chrono::{DateTime, Utc};

/// Run identifier: the run timestamp with `-` instead of `:` so it can be
/// used as a path segment (`2026-03-01T10-00-00.000Z`).
#[must_use]
pub fn run_id(now: DateTime<Utc>) -> String {
    now.format("%Y-%m-%dT%H-%M-%S%.3fZ").to_string()
}

/// ISO-8601 UTC timestamp with millisecond precision.
#[must_use]
pub fn iso8601(ts: DateTime<Utc>) -> String {
    ts.format("%Y-%m-%dT%H:%M:%S%.3fZ").to_string()
}

/// Document id of one run: `<associationId>.<runId>`.
#[must_use]
pub fn document_id(association_id: &str, run_id: &str) -> String {
    format!("{association_id}.{run_id}")
}

/// Correlation id shared by every run of an association on an instance.
#[must_use]
pub fn message_id(association_id: &str, instance_id: &str) -> String {
    format!("aws.ssm.{association_id}.{instance_id}")
}
