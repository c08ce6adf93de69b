// lib/crates/fleet-common/src/association.rs

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Association message as delivered by the poller (`InstanceAssociation`).
///
/// Field names follow the upstream service, which uses PascalCase keys.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawAssociationMessage {
    #[serde(rename = "Association")]
    pub association: Association,
    /// Opaque document body (JSON text). Decoded by the compiler, never here.
    #[serde(rename = "Document")]
    pub document: String,
    #[serde(rename = "CreateDate")]
    pub create_date: DateTime<Utc>,
    #[serde(rename = "RunOnce", default)]
    pub run_once: bool,
}

/// Association descriptor carried by a [`RawAssociationMessage`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Association {
    /// Document name the association applies.
    #[serde(rename = "Name", default)]
    pub name: Option<String>,
    #[serde(rename = "AssociationId")]
    pub association_id: String,
    #[serde(rename = "InstanceId")]
    pub instance_id: String,
    /// Caller-supplied parameter values; every parameter is a list on the wire.
    #[serde(rename = "Parameters", default)]
    pub parameters: HashMap<String, Vec<String>>,
    #[serde(rename = "OutputLocation", default)]
    pub output_location: Option<OutputLocation>,
}

/// Where plugin output should be uploaded.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OutputLocation {
    #[serde(rename = "S3Location", default)]
    pub s3_location: Option<S3Location>,
}

/// Bucket + key prefix pair. Both halves are optional upstream.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct S3Location {
    #[serde(rename = "OutputS3BucketName", default)]
    pub bucket_name: Option<String>,
    #[serde(rename = "OutputS3KeyPrefix", default)]
    pub key_prefix: Option<String>,
}

impl Association {
    /// Returns the configured `(bucket, key_prefix)`, using empty strings for
    /// whatever half is missing.
    #[must_use]
    pub fn output_target(&self) -> (String, String) {
        let Some(s3) = self
            .output_location
            .as_ref()
            .and_then(|loc| loc.s3_location.as_ref())
        else {
            return (String::new(), String::new());
        };
        (
            s3.bucket_name.clone().unwrap_or_default(),
            s3.key_prefix.clone().unwrap_or_default(),
        )
    }
}
