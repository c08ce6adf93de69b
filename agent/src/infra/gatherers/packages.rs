use std::path::{Path, PathBuf};

use anyhow::Result;
use chrono::Utc;
use fleet_common::InventoryItem;
use serde_json::{Map, Value};

use super::{capture_time, read_optional};
use crate::application::ports::Gatherer;

pub const NAME: &str = "AWS:Application";

const DPKG_STATUS: &str = "var/lib/dpkg/status";

/// Installed packages, read from the dpkg status database.
pub struct ApplicationGatherer {
    root: PathBuf,
}

impl ApplicationGatherer {
    #[must_use]
    pub fn new(root: &Path) -> Self {
        Self {
            root: root.to_path_buf(),
        }
    }
}

/// Parse dpkg status stanzas, keeping only installed packages.
fn parse_dpkg_status(content: &str) -> Vec<Value> {
    content
        .split("\n\n")
        .filter_map(|stanza| {
            let mut fields: Map<String, Value> = Map::new();
            let mut installed = false;
            for line in stanza.lines() {
                // Continuation lines belong to multi-line fields we don't keep.
                if line.starts_with(' ') {
                    continue;
                }
                let Some((key, value)) = line.split_once(':') else {
                    continue;
                };
                let value = value.trim();
                match key {
                    "Package" => {
                        fields.insert("Name".into(), value.into());
                    }
                    "Version" => {
                        fields.insert("Version".into(), value.into());
                    }
                    "Architecture" => {
                        fields.insert("Architecture".into(), value.into());
                    }
                    "Description" => {
                        fields.insert("Summary".into(), value.into());
                    }
                    "Status" => installed = value.ends_with(" installed"),
                    _ => {}
                }
            }
            (installed && fields.contains_key("Name")).then_some(Value::Object(fields))
        })
        .collect()
}

impl Gatherer for ApplicationGatherer {
    fn name(&self) -> &str {
        NAME
    }

    fn run(&self, _policy: &Value) -> Result<InventoryItem> {
        let packages = read_optional(&self.root, DPKG_STATUS)?
            .as_deref()
            .map(parse_dpkg_status)
            .unwrap_or_default();
        tracing::debug!(packages = packages.len(), "applications collected");

        Ok(InventoryItem {
            name: NAME.to_string(),
            schema_version: "1.1".to_string(),
            capture_time: capture_time(Utc::now()),
            content: Value::Array(packages),
        })
    }
}
