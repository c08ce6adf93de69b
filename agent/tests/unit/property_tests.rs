//! Property-based tests for parameter resolution, compilation and limits.
//!
//! Uses `proptest` to verify invariants across many random inputs.

#![allow(clippy::expect_used)]

use std::collections::HashMap;
use std::path::PathBuf;

use chrono::{TimeZone, Utc};
use fleet_agent::domain::association::{OrchestrationLayout, compile, parse_document};
use fleet_agent::domain::config::{VALID_CONFIG_KEYS, validate_config_key};
use fleet_agent::domain::inventory::{SizeBudget, SizeLimits, serialized_size};
use fleet_agent::domain::parameters::resolve_parameters;
use fleet_common::{InventoryItem, ParameterDefinition, ParameterType, RawAssociationMessage};
use proptest::prelude::*;
use serde_json::json;

fn param_type() -> impl Strategy<Value = ParameterType> {
    prop_oneof![
        Just(ParameterType::String),
        Just(ParameterType::StringList),
        "[A-Z][a-z]{2,8}".prop_map(ParameterType::Unrecognized),
    ]
}

fn declared() -> impl Strategy<Value = HashMap<String, ParameterDefinition>> {
    prop::collection::hash_map(
        "[a-z]{1,6}",
        (param_type(), prop::option::of("[a-z]{0,5}")).prop_map(|(param_type, default)| {
            ParameterDefinition {
                param_type,
                description: None,
                default: default.map(serde_json::Value::String),
            }
        }),
        0..6,
    )
}

fn supplied() -> impl Strategy<Value = HashMap<String, Vec<String>>> {
    prop::collection::hash_map("[a-z]{1,6}", prop::collection::vec("[a-z]{0,5}", 0..4), 0..6)
}

// ============================================================================
// resolve_parameters() property tests
// ============================================================================

proptest! {
    /// The resolved key set is exactly the declared parameter set.
    #[test]
    fn prop_resolved_keys_equal_declared_keys(declared in declared(), supplied in supplied()) {
        let bindings = resolve_parameters(&supplied, &declared);
        let mut resolved: Vec<&String> = bindings.keys().collect();
        let mut expected: Vec<&String> = declared.keys().collect();
        resolved.sort();
        expected.sort();
        prop_assert_eq!(resolved, expected);
    }

    /// Resolution is a pure function of its inputs.
    #[test]
    fn prop_resolution_is_deterministic(declared in declared(), supplied in supplied()) {
        prop_assert_eq!(
            resolve_parameters(&supplied, &declared),
            resolve_parameters(&supplied, &declared)
        );
    }
}

// ============================================================================
// compile() property tests
// ============================================================================

fn message(steps: &[(String, String)]) -> RawAssociationMessage {
    let main_steps: Vec<_> = steps
        .iter()
        .map(|(name, action)| json!({ "name": name, "action": action }))
        .collect();
    let document = json!({ "schemaVersion": "2.2", "mainSteps": main_steps });
    serde_json::from_value(json!({
        "Association": { "AssociationId": "assoc-1", "InstanceId": "i-1" },
        "Document": document.to_string(),
        "CreateDate": "2026-03-01T00:00:00Z"
    }))
    .expect("message")
}

proptest! {
    /// Step documents keep their order, and every unit shares the run's
    /// bookkeeping key.
    #[test]
    fn prop_steps_preserve_order_and_share_document_id(
        steps in prop::collection::vec(("[a-z]{1,8}", "aws:[a-zA-Z]{1,12}"), 1..8),
        millis in 0i64..4_000_000_000_000,
    ) {
        let raw = message(&steps);
        let parsed = parse_document(&raw).expect("parse");
        let now = Utc.timestamp_millis_opt(millis).single().expect("valid");
        let layout = OrchestrationLayout {
            data_store_root: PathBuf::from("/data"),
            document_root_dir_name: "document".into(),
            orchestration_root_dir: "orchestration".into(),
        };
        let state = compile(&raw, &parsed, &layout, now);

        prop_assert_eq!(state.plugins.len(), steps.len());
        let doc_id = &state.document_information.document_id;
        for (unit, (name, action)) in state.plugins.iter().zip(&steps) {
            prop_assert_eq!(&unit.id, name);
            prop_assert_eq!(&unit.name, action);
            prop_assert_eq!(&unit.configuration.book_keeping_file_name, doc_id);
            prop_assert!(!unit.has_executed);
        }
    }
}

proptest! {
    /// No action name moves a unit's orchestration directory outside the
    /// data-store root.
    #[test]
    fn prop_orchestration_directory_stays_under_root(
        actions in prop::collection::vec("[a-z./]{1,12}", 1..5),
    ) {
        let steps: Vec<(String, String)> =
            actions.into_iter().map(|a| ("s".to_string(), a)).collect();
        let raw = message(&steps);
        let parsed = parse_document(&raw).expect("parse");
        let now = Utc.timestamp_millis_opt(0).single().expect("valid");
        let layout = OrchestrationLayout {
            data_store_root: PathBuf::from("/data"),
            document_root_dir_name: "document".into(),
            orchestration_root_dir: "orchestration".into(),
        };
        let root = layout.orchestration_root("i-1");
        let state = compile(&raw, &parsed, &layout, now);
        for unit in state.plugins.iter() {
            let dir = &unit.configuration.orchestration_directory;
            prop_assert!(dir.starts_with(&root), "got {}", dir.display());
        }
    }
}

// ============================================================================
// Size limit property tests
// ============================================================================

fn sized_item(name: String, len: usize) -> InventoryItem {
    InventoryItem {
        name,
        schema_version: "1.0".into(),
        capture_time: "2026-03-01T00:00:00Z".into(),
        content: json!({ "Blob": "x".repeat(len) }),
    }
}

proptest! {
    /// A batch passes exactly when every item and the sum fit.
    #[test]
    fn prop_budget_matches_direct_computation(
        lens in prop::collection::vec(0usize..3_000, 0..8),
        per_item_kb in 1u64..4,
        total_kb in 4u64..12,
    ) {
        let items: Vec<_> = lens
            .iter()
            .enumerate()
            .map(|(i, len)| sized_item(format!("G{i}"), *len))
            .collect();
        let limits = SizeLimits::from_kb(per_item_kb, total_kb);
        let sizes: Vec<u64> = items.iter().map(serialized_size).collect();
        let fits = sizes.iter().all(|s| *s <= limits.per_item_bytes)
            && sizes.iter().sum::<u64>() <= limits.total_bytes;
        let mut budget = SizeBudget::new(limits);
        let charged = items.iter().try_for_each(|item| budget.charge(item));
        prop_assert_eq!(charged.is_ok(), fits);
    }
}

// ============================================================================
// validate_config_key() property tests
// ============================================================================

proptest! {
    /// Arbitrary keys (not in whitelist) are rejected.
    #[test]
    fn prop_arbitrary_keys_rejected(key in "[a-z]{1,20}\\.[a-z_]{1,20}") {
        if !VALID_CONFIG_KEYS.contains(&key.as_str()) {
            prop_assert!(validate_config_key(&key).is_err(), "accepted invalid key: {key}");
        }
    }
}
