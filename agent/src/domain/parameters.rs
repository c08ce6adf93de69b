//! Parameter resolution and `{{ name }}` substitution: pure, no I/O.
//!
//! Resolution merges caller-supplied values with the document's declared
//! parameters; substitution rewrites plugin inputs with the resolved values.

use std::collections::HashMap;
use std::sync::LazyLock;

use fleet_common::{ParameterDefinition, ParameterType};
use regex::{Captures, Regex};
use serde::Serialize;
use serde_json::Value;

/// Placeholder syntax: `{{ name }}`, whitespace inside the braces optional.
pub static PLACEHOLDER_RE: LazyLock<Regex> = LazyLock::new(|| {
    // Safety: this is a compile-time constant pattern: cannot fail.
    #[allow(clippy::expect_used)]
    Regex::new(r"\{\{\s*([A-Za-z0-9_.:-]+)\s*\}\}").expect("valid regex")
});

/// A resolved parameter value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum ParameterValue {
    String(String),
    StringList(Vec<String>),
}

impl ParameterValue {
    /// Interpret a declared default. Only strings and arrays of strings fit.
    fn from_default(raw: &Value) -> Option<Self> {
        match raw {
            Value::String(s) => Some(Self::String(s.clone())),
            Value::Array(items) => items
                .iter()
                .map(|v| v.as_str().map(str::to_string))
                .collect::<Option<Vec<_>>>()
                .map(Self::StringList),
            _ => None,
        }
    }

    fn to_json(&self) -> Value {
        match self {
            Self::String(s) => Value::String(s.clone()),
            Self::StringList(items) => {
                Value::Array(items.iter().cloned().map(Value::String).collect())
            }
        }
    }
}

/// Resolved parameters. `None` means the parameter is declared but has
/// neither a supplied value nor a usable default: it is never substituted.
pub type ParameterBindings = HashMap<String, Option<ParameterValue>>;

/// Merge supplied values with the declared parameter set.
///
/// * supplied + declared `String` takes the first supplied value;
/// * supplied + declared `StringList` takes every supplied value;
/// * an empty supplied list counts as not supplied, for either type;
/// * supplied + unrecognized declared type is skipped with a debug event;
/// * supplied but undeclared is dropped;
/// * every declared parameter still missing gets its default.
#[must_use]
pub fn resolve_parameters(
    supplied: &HashMap<String, Vec<String>>,
    declared: &HashMap<String, ParameterDefinition>,
) -> ParameterBindings {
    let mut bindings = ParameterBindings::new();

    for (name, values) in supplied {
        let Some(definition) = declared.get(name) else {
            continue;
        };
        match &definition.param_type {
            ParameterType::String => {
                if let Some(first) = values.first() {
                    bindings.insert(name.clone(), Some(ParameterValue::String(first.clone())));
                }
            }
            ParameterType::StringList => {
                if !values.is_empty() {
                    bindings.insert(
                        name.clone(),
                        Some(ParameterValue::StringList(values.clone())),
                    );
                }
            }
            ParameterType::Unrecognized(kind) => {
                tracing::debug!(parameter = %name, param_type = %kind, "unknown parameter type");
            }
        }
    }

    for (name, definition) in declared {
        if bindings.contains_key(name) {
            continue;
        }
        let default = definition.default.as_ref().and_then(|raw| {
            let value = ParameterValue::from_default(raw);
            if value.is_none() && !raw.is_null() {
                tracing::debug!(parameter = %name, "default value is neither a string nor a string list");
            }
            value
        });
        bindings.insert(name.clone(), default);
    }

    bindings
}

/// Replace `{{ name }}` placeholders throughout a JSON value.
///
/// A string made of exactly one placeholder becomes the bound value itself
/// (a JSON array for lists). Placeholders inside longer strings are replaced
/// by string values only. Unbound placeholders stay as they are. Object keys
/// are never rewritten.
#[must_use]
pub fn substitute_parameters(value: &Value, bindings: &ParameterBindings) -> Value {
    match value {
        Value::String(s) => substitute_in_string(s, bindings),
        Value::Array(items) => Value::Array(
            items
                .iter()
                .map(|item| substitute_parameters(item, bindings))
                .collect(),
        ),
        Value::Object(map) => Value::Object(
            map.iter()
                .map(|(k, v)| (k.clone(), substitute_parameters(v, bindings)))
                .collect(),
        ),
        other => other.clone(),
    }
}

fn bound<'a>(bindings: &'a ParameterBindings, name: &str) -> Option<&'a ParameterValue> {
    bindings.get(name).and_then(Option::as_ref)
}

fn substitute_in_string(s: &str, bindings: &ParameterBindings) -> Value {
    let trimmed = s.trim();
    if let Some(caps) = PLACEHOLDER_RE.captures(trimmed)
        && caps.get(0).is_some_and(|m| m.as_str() == trimmed)
        && let Some(value) = bound(bindings, &caps[1])
    {
        return value.to_json();
    }

    let replaced = PLACEHOLDER_RE.replace_all(s, |caps: &Captures<'_>| match bound(bindings, &caps[1]) {
        Some(ParameterValue::String(v)) => v.clone(),
        _ => caps[0].to_string(),
    });
    Value::String(replaced.into_owned())
}
