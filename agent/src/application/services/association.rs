//! Application service: association compilation use-case.

use anyhow::{Context, Result};
use fleet_common::{DocumentExecutionState, RawAssociationMessage};

use crate::application::ports::Clock;
use crate::domain::association::{OrchestrationLayout, compile, parse_document};

/// Parse and compile an association message using the injected clock.
///
/// # Errors
///
/// Returns an error if the document body is malformed.
pub fn compile_association(
    raw: &RawAssociationMessage,
    clock: &impl Clock,
    layout: &OrchestrationLayout,
) -> Result<DocumentExecutionState> {
    let association_id = raw.association.association_id.as_str();
    tracing::info!(association = association_id, "compiling association document");

    let parsed = parse_document(raw)
        .with_context(|| format!("cannot compile association {association_id}"))?;
    tracing::debug!(
        association = association_id,
        document = %parsed.document_name,
        parameters = parsed.parameters.len(),
        "document parsed"
    );

    let state = compile(raw, &parsed, layout, clock.now());
    tracing::info!(
        document_id = %state.document_information.document_id,
        plugins = state.plugins.len(),
        "association compiled"
    );
    Ok(state)
}
