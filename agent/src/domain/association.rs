//! Association document compilation: pure functions, no I/O, no clocks.
//!
//! `parse_document` decodes the opaque body and applies parameters;
//! `compile` turns the result into the immutable [`DocumentExecutionState`]
//! the plugin runner consumes.

use std::collections::BTreeMap;
use std::path::PathBuf;

use chrono::{DateTime, Utc};
use fleet_common::{
    DocumentContent, DocumentExecutionState, DocumentInfo, DocumentStatus, DocumentType,
    PluginConfiguration, PluginState, Plugins, RawAssociationMessage, identity, join_under,
    s3_join,
};
use serde_json::Value;

use crate::domain::config::AgentSection;
use crate::domain::error::DocumentError;
use crate::domain::parameters::{ParameterBindings, resolve_parameters, substitute_parameters};

/// Document body after decoding and parameter substitution.
#[derive(Debug, Clone)]
pub struct ParsedDocument {
    pub document_name: String,
    /// Association id; associations reuse it as their command id.
    pub command_id: String,
    pub output_s3_bucket_name: String,
    pub output_s3_key_prefix: String,
    pub parameters: ParameterBindings,
    pub content: DocumentContent,
}

/// Directory layout the orchestration directories are derived from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrchestrationLayout {
    pub data_store_root: PathBuf,
    pub document_root_dir_name: String,
    pub orchestration_root_dir: String,
}

impl From<&AgentSection> for OrchestrationLayout {
    fn from(section: &AgentSection) -> Self {
        Self {
            data_store_root: section.data_store_root.clone(),
            document_root_dir_name: section.document_root_dir_name.clone(),
            orchestration_root_dir: section.orchestration_root_dir.clone(),
        }
    }
}

impl OrchestrationLayout {
    /// `<data_store_root>/<instance>/<document_root>/<orchestration_root>`.
    ///
    /// Every segment is appended as a relative path, so the result never
    /// leaves `data_store_root`.
    #[must_use]
    pub fn orchestration_root(&self, instance_id: &str) -> PathBuf {
        [
            instance_id,
            self.document_root_dir_name.as_str(),
            self.orchestration_root_dir.as_str(),
        ]
        .iter()
        .fold(self.data_store_root.clone(), |dir, segment| {
            join_under(&dir, segment)
        })
    }
}

/// Decode the document body, resolve parameters and substitute them into
/// every plugin's settings and inputs.
///
/// # Errors
///
/// Returns [`DocumentError::MalformedDocument`] if the body is not valid JSON
/// or does not have the expected document shape.
pub fn parse_document(raw: &RawAssociationMessage) -> Result<ParsedDocument, DocumentError> {
    let mut content: DocumentContent = serde_json::from_str(&raw.document)
        .map_err(|e| DocumentError::MalformedDocument(e.to_string()))?;

    let association = &raw.association;
    let (bucket, key_prefix) = association.output_target();
    let parameters = resolve_parameters(&association.parameters, &content.parameters);

    for plugin in content.runtime_config.values_mut() {
        plugin.settings = substitute_parameters(&plugin.settings, &parameters);
        plugin.properties = substitute_parameters(&plugin.properties, &parameters);
    }
    for step in &mut content.main_steps {
        step.settings = substitute_parameters(&step.settings, &parameters);
        step.inputs = substitute_parameters(&step.inputs, &parameters);
    }

    Ok(ParsedDocument {
        document_name: association.name.clone().unwrap_or_default(),
        command_id: association.association_id.clone(),
        output_s3_bucket_name: bucket,
        output_s3_key_prefix: key_prefix,
        parameters,
        content,
    })
}

/// Build the identity of one run. Called once per compile.
#[must_use]
pub fn new_document_info(
    raw: &RawAssociationMessage,
    document_name: &str,
    now: DateTime<Utc>,
) -> DocumentInfo {
    let association_id = raw.association.association_id.clone();
    let instance_id = raw.association.instance_id.clone();
    let run_id = identity::run_id(now);
    DocumentInfo {
        message_id: identity::message_id(&association_id, &instance_id),
        document_id: identity::document_id(&association_id, &run_id),
        run_id,
        created_date: identity::iso8601(raw.create_date),
        document_name: document_name.to_string(),
        is_command: false,
        document_status: DocumentStatus::InProgress,
        run_once: raw.run_once,
        document_trace_output: String::new(),
        association_id,
        instance_id,
    }
}

/// Compile a parsed document into its execution state.
///
/// `now` is the run timestamp; the document id and every unit's bookkeeping
/// key derive from it.
#[must_use]
pub fn compile(
    raw: &RawAssociationMessage,
    parsed: &ParsedDocument,
    layout: &OrchestrationLayout,
    now: DateTime<Utc>,
) -> DocumentExecutionState {
    let info = new_document_info(raw, &parsed.document_name, now);

    let s3_key_prefix = s3_join(&[
        &parsed.output_s3_key_prefix,
        &info.document_id,
        &info.instance_id,
    ]);
    let orchestration_dir = join_under(
        &layout.orchestration_root(&info.instance_id),
        &info.document_id,
    );

    let unit_config = |settings: &Value, properties: &Value, plugin_name: &str| {
        PluginConfiguration {
            settings: settings.clone(),
            properties: properties.clone(),
            output_s3_bucket_name: parsed.output_s3_bucket_name.clone(),
            output_s3_key_prefix: s3_join(&[&s3_key_prefix, plugin_name]),
            orchestration_directory: join_under(&orchestration_dir, plugin_name),
            message_id: info.message_id.clone(),
            book_keeping_file_name: info.document_id.clone(),
        }
    };

    let content = &parsed.content;
    let plugins = if !content.runtime_config.is_empty() {
        let units: BTreeMap<String, PluginState> = content
            .runtime_config
            .iter()
            .map(|(plugin_name, cfg)| {
                let unit = PluginState {
                    configuration: unit_config(&cfg.settings, &cfg.properties, plugin_name),
                    id: plugin_name.clone(),
                    name: plugin_name.clone(),
                    has_executed: false,
                };
                (plugin_name.clone(), unit)
            })
            .collect();
        Plugins::Named(units)
    } else if !content.main_steps.is_empty() {
        // Id is the step name, Name is the action; output paths key on the action.
        let units = content
            .main_steps
            .iter()
            .map(|step| PluginState {
                configuration: unit_config(&step.settings, &step.inputs, &step.action),
                id: step.name.clone(),
                name: step.action.clone(),
                has_executed: false,
            })
            .collect();
        Plugins::Steps(units)
    } else {
        Plugins::Empty
    };

    DocumentExecutionState {
        document_information: info,
        document_type: DocumentType::Association,
        schema_version: content.schema_version.clone(),
        plugins,
    }
}
