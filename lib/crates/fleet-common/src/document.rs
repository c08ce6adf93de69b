// lib/crates/fleet-common/src/document.rs

use std::collections::{BTreeMap, HashMap};

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Decoded association document body.
///
/// Exactly one of `runtime_config` / `main_steps` is expected to carry
/// plugins; which one depends on the schema version the author used.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentContent {
    #[serde(rename = "schemaVersion")]
    pub schema_version: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub parameters: HashMap<String, ParameterDefinition>,
    /// Legacy (1.x) plugin section, keyed by plugin name.
    #[serde(
        rename = "runtimeConfig",
        default,
        deserialize_with = "null_as_default",
        skip_serializing_if = "BTreeMap::is_empty"
    )]
    pub runtime_config: BTreeMap<String, PluginConfig>,
    /// Step-based (2.x) plugin section, in execution order.
    #[serde(
        rename = "mainSteps",
        default,
        deserialize_with = "null_as_default",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub main_steps: Vec<StepConfig>,
}

/// Declared document parameter.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParameterDefinition {
    #[serde(rename = "type")]
    pub param_type: ParameterType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<Value>,
}

/// Declared parameter type. Anything the agent does not know is kept verbatim
/// so the resolver can report it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ParameterType {
    String,
    StringList,
    #[serde(untagged)]
    Unrecognized(std::string::String),
}

/// One entry of `runtimeConfig`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PluginConfig {
    #[serde(default)]
    pub properties: Value,
    #[serde(default)]
    pub settings: Value,
}

/// One entry of `mainSteps`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StepConfig {
    /// Plugin to run, e.g. `aws:runShellScript`.
    pub action: String,
    /// Author-chosen step name, unique within the document.
    pub name: String,
    #[serde(default)]
    pub inputs: Value,
    #[serde(default)]
    pub settings: Value,
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
