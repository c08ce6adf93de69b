// lib/crates/fleet-common/src/state.rs

//! Document execution state handed to the plugin runner.
//!
//! The runner reads a fixed JSON layout: plugins live either in
//! `PluginsInformation` (name-keyed map) or `InstancePluginsInformation`
//! (ordered array). In Rust that either/or is the [`Plugins`] enum; the wire
//! form is produced and checked by the `serde` conversions below.

use std::collections::BTreeMap;
use std::path::PathBuf;

use serde::{Deserialize, Serialize, Serializer};
use serde_json::Value;
use thiserror::Error;

/// Kind of document being executed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DocumentType {
    Association,
}

/// Lifecycle status recorded on the document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DocumentStatus {
    InProgress,
}

/// Identity and bookkeeping of a single document run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentInfo {
    #[serde(rename = "AssociationID")]
    pub association_id: String,
    #[serde(rename = "InstanceID")]
    pub instance_id: String,
    /// `aws.ssm.<associationId>.<instanceId>`; identical across runs.
    #[serde(rename = "MessageID")]
    pub message_id: String,
    /// Run timestamp, path-safe ISO-8601.
    #[serde(rename = "RunID")]
    pub run_id: String,
    /// `<associationId>.<runId>`; distinct per run.
    #[serde(rename = "DocumentID")]
    pub document_id: String,
    #[serde(rename = "CreatedDate")]
    pub created_date: String,
    #[serde(rename = "DocumentName")]
    pub document_name: String,
    #[serde(rename = "IsCommand")]
    pub is_command: bool,
    #[serde(rename = "DocumentStatus")]
    pub document_status: DocumentStatus,
    #[serde(rename = "RunOnce")]
    pub run_once: bool,
    #[serde(rename = "DocumentTraceOutput")]
    pub document_trace_output: String,
}

/// Configuration a single plugin receives from the runner.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct PluginConfiguration {
    pub settings: Value,
    pub properties: Value,
    #[serde(rename = "OutputS3BucketName")]
    pub output_s3_bucket_name: String,
    #[serde(rename = "OutputS3KeyPrefix")]
    pub output_s3_key_prefix: String,
    pub orchestration_directory: PathBuf,
    pub message_id: String,
    /// Equal to the document id of the run.
    pub book_keeping_file_name: String,
}

/// One plugin execution unit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PluginState {
    #[serde(rename = "Configuration")]
    pub configuration: PluginConfiguration,
    #[serde(rename = "Id")]
    pub id: String,
    #[serde(rename = "Name")]
    pub name: String,
    /// Owned by the execution engine once the state is handed off.
    #[serde(rename = "HasExecuted")]
    pub has_executed: bool,
}

/// Plugin collection of a document: never both shapes at once.
#[derive(Debug, Clone, PartialEq)]
pub enum Plugins {
    /// Legacy `runtimeConfig` documents, keyed by plugin name.
    Named(BTreeMap<String, PluginState>),
    /// `mainSteps` documents, in document order.
    Steps(Vec<PluginState>),
    /// Document declared no plugins; the runner treats it as a no-op.
    Empty,
}

impl Plugins {
    #[must_use]
    pub fn len(&self) -> usize {
        match self {
            Plugins::Named(map) => map.len(),
            Plugins::Steps(steps) => steps.len(),
            Plugins::Empty => 0,
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Iterate the units in execution order (name order for legacy maps).
    pub fn iter(&self) -> Box<dyn Iterator<Item = &PluginState> + '_> {
        match self {
            Plugins::Named(map) => Box::new(map.values()),
            Plugins::Steps(steps) => Box::new(steps.iter()),
            Plugins::Empty => Box::new(std::iter::empty()),
        }
    }
}

/// Compiled, immutable plan for one document run.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(try_from = "DocumentStateWire")]
pub struct DocumentExecutionState {
    pub document_information: DocumentInfo,
    pub document_type: DocumentType,
    pub schema_version: String,
    pub plugins: Plugins,
}

/// Rejected wire shapes.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum StateShapeError {
    #[error("document state carries both PluginsInformation and InstancePluginsInformation")]
    BothPluginShapes,
}

#[derive(Deserialize)]
struct DocumentStateWire {
    #[serde(rename = "DocumentInformation")]
    document_information: DocumentInfo,
    #[serde(rename = "DocumentType")]
    document_type: DocumentType,
    #[serde(rename = "SchemaVersion")]
    schema_version: String,
    #[serde(rename = "PluginsInformation", default)]
    plugins_information: Option<BTreeMap<String, PluginState>>,
    #[serde(rename = "InstancePluginsInformation", default)]
    instance_plugins_information: Option<Vec<PluginState>>,
}

impl TryFrom<DocumentStateWire> for DocumentExecutionState {
    type Error = StateShapeError;

    fn try_from(wire: DocumentStateWire) -> Result<Self, Self::Error> {
        let named = wire.plugins_information.filter(|m| !m.is_empty());
        let steps = wire.instance_plugins_information.filter(|s| !s.is_empty());
        let plugins = match (named, steps) {
            (Some(_), Some(_)) => return Err(StateShapeError::BothPluginShapes),
            (Some(map), None) => Plugins::Named(map),
            (None, Some(steps)) => Plugins::Steps(steps),
            (None, None) => Plugins::Empty,
        };
        Ok(Self {
            document_information: wire.document_information,
            document_type: wire.document_type,
            schema_version: wire.schema_version,
            plugins,
        })
    }
}

#[derive(Serialize)]
struct DocumentStateWireRef<'a> {
    #[serde(rename = "DocumentInformation")]
    document_information: &'a DocumentInfo,
    #[serde(rename = "DocumentType")]
    document_type: DocumentType,
    #[serde(rename = "SchemaVersion")]
    schema_version: &'a str,
    #[serde(rename = "PluginsInformation")]
    plugins_information: Option<&'a BTreeMap<String, PluginState>>,
    #[serde(rename = "InstancePluginsInformation")]
    instance_plugins_information: Option<&'a [PluginState]>,
}

impl Serialize for DocumentExecutionState {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let (named, steps) = match &self.plugins {
            Plugins::Named(map) => (Some(map), None),
            Plugins::Steps(steps) => (None, Some(steps.as_slice())),
            Plugins::Empty => (None, None),
        };
        DocumentStateWireRef {
            document_information: &self.document_information,
            document_type: self.document_type,
            schema_version: &self.schema_version,
            plugins_information: named,
            instance_plugins_information: steps,
        }
        .serialize(serializer)
    }
}
