use std::path::{Path, PathBuf};

use anyhow::Result;
use chrono::Utc;
use fleet_common::InventoryItem;
use serde_json::{Value, json};

use super::{capture_time, read_optional};
use crate::application::ports::Gatherer;

pub const NAME: &str = "AWS:InstanceInformation";

/// Host identity: agent, hostname, platform.
pub struct InstanceInformationGatherer {
    root: PathBuf,
}

impl InstanceInformationGatherer {
    #[must_use]
    pub fn new(root: &Path) -> Self {
        Self {
            root: root.to_path_buf(),
        }
    }

    fn hostname(&self) -> Result<String> {
        for candidate in ["etc/hostname", "proc/sys/kernel/hostname"] {
            if let Some(name) = read_optional(&self.root, candidate)? {
                let name = name.trim();
                if !name.is_empty() {
                    return Ok(name.to_string());
                }
            }
        }
        Ok(String::new())
    }
}

/// Extract `NAME` and `VERSION_ID` from an os-release file.
fn parse_os_release(content: &str) -> (String, String) {
    let mut name = String::new();
    let mut version = String::new();
    for line in content.lines() {
        let Some((key, value)) = line.split_once('=') else {
            continue;
        };
        let value = value.trim().trim_matches('"').to_string();
        match key.trim() {
            "NAME" => name = value,
            "VERSION_ID" => version = value,
            _ => {}
        }
    }
    (name, version)
}

impl Gatherer for InstanceInformationGatherer {
    fn name(&self) -> &str {
        NAME
    }

    fn run(&self, _policy: &Value) -> Result<InventoryItem> {
        let (platform_name, platform_version) = read_optional(&self.root, "etc/os-release")?
            .as_deref()
            .map(parse_os_release)
            .unwrap_or_default();

        Ok(InventoryItem {
            name: NAME.to_string(),
            schema_version: "1.0".to_string(),
            capture_time: capture_time(Utc::now()),
            content: json!({
                "AgentName": "fleet-agent",
                "AgentVersion": env!("CARGO_PKG_VERSION"),
                "ComputerName": self.hostname()?,
                "PlatformName": platform_name,
                "PlatformVersion": platform_version,
                "PlatformType": std::env::consts::OS,
                "Architecture": std::env::consts::ARCH,
            }),
        })
    }
}
