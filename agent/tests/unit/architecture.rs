//! Structural tests for architectural boundary enforcement.
//!
//! These tests scan source files to verify that the layer boundaries
//! (domain → application → infra/commands) hold.

use std::path::{Path, PathBuf};

/// Collect all `.rs` files under a directory recursively.
fn collect_rs_files(dir: &Path) -> Vec<PathBuf> {
    let mut files = Vec::new();
    if let Ok(entries) = std::fs::read_dir(dir) {
        for entry in entries.flatten() {
            let path = entry.path();
            if path.is_dir() {
                files.extend(collect_rs_files(&path));
            } else if path.extension().and_then(|e| e.to_str()) == Some("rs") {
                files.push(path);
            }
        }
    }
    files
}

/// Track brace depth and return whether a line is inside a `#[cfg(test)]` block.
struct CfgTestTracker {
    in_test_block: bool,
    brace_depth: i32,
    test_block_start_depth: i32,
}

impl CfgTestTracker {
    fn new() -> Self {
        Self {
            in_test_block: false,
            brace_depth: 0,
            test_block_start_depth: 0,
        }
    }

    /// Process a line and return `true` if it's inside a `#[cfg(test)]` block.
    fn process_line(&mut self, line: &str) -> bool {
        let trimmed = line.trim();
        if trimmed.contains("#[cfg(test)]") {
            self.in_test_block = true;
            self.test_block_start_depth = self.brace_depth;
        }
        for ch in line.chars() {
            match ch {
                '{' => self.brace_depth += 1,
                '}' => {
                    self.brace_depth -= 1;
                    if self.in_test_block && self.brace_depth <= self.test_block_start_depth {
                        self.in_test_block = false;
                    }
                }
                _ => {}
            }
        }
        self.in_test_block
    }
}

/// Non-comment lines outside `#[cfg(test)]` blocks, with their line numbers.
fn production_lines(path: &Path) -> Vec<(usize, String)> {
    let Ok(content) = std::fs::read_to_string(path) else {
        return Vec::new();
    };
    let mut tracker = CfgTestTracker::new();
    content
        .lines()
        .enumerate()
        .filter(|(_, line)| {
            let in_test = tracker.process_line(line);
            let trimmed = line.trim();
            !in_test && !trimmed.starts_with("//") && !trimmed.starts_with("/*")
        })
        .map(|(i, line)| (i + 1, line.to_string()))
        .collect()
}

/// Report every production line under `dir` containing a forbidden pattern.
fn find_violations(dir: &Path, forbidden: &[&str]) -> Vec<String> {
    let mut violations = Vec::new();
    for file in collect_rs_files(dir) {
        let rel = file
            .strip_prefix(env!("CARGO_MANIFEST_DIR"))
            .unwrap_or(&file)
            .display()
            .to_string();
        for (lineno, line) in production_lines(&file) {
            for pattern in forbidden {
                if line.contains(pattern) {
                    violations.push(format!("{rel}:{lineno}: `{pattern}`: {}", line.trim()));
                }
            }
        }
    }
    violations
}

fn src() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("src")
}

#[test]
fn domain_is_free_of_io_and_outer_layers() {
    let violations = find_violations(
        &src().join("domain"),
        &[
            "crate::infra",
            "crate::application",
            "crate::commands",
            "tokio",
            "std::fs",
            "std::process",
            "std::net",
        ],
    );
    assert!(
        violations.is_empty(),
        "Domain layer must stay pure:\n{}",
        violations.join("\n")
    );
}

#[test]
fn application_does_not_depend_on_infra_or_commands() {
    let violations = find_violations(
        &src().join("application"),
        &["crate::infra", "crate::commands", "std::fs"],
    );
    assert!(
        violations.is_empty(),
        "Application layer must only use ports:\n{}",
        violations.join("\n")
    );
}

#[test]
fn no_concrete_adapters_in_service_signatures() {
    let concrete = [
        "YamlConfigStore",
        "SpoolUploader",
        "FilePolicySource",
        "SystemClock",
    ];
    let violations: Vec<String> = find_violations(&src().join("application"), &concrete)
        .into_iter()
        .chain(find_violations(&src().join("domain"), &concrete))
        .collect();
    assert!(
        violations.is_empty(),
        "Found concrete adapters outside infra/: use port traits instead:\n{}",
        violations.join("\n")
    );
}

#[test]
fn no_unwrap_or_expect_in_production_code() {
    let violations = find_violations(&src(), &[".unwrap()", ".expect("]);
    // LazyLock regex initialisation is the one sanctioned `expect`.
    let violations: Vec<String> = violations
        .into_iter()
        .filter(|v| !v.contains("valid regex"))
        .collect();
    assert!(
        violations.is_empty(),
        "Found unwrap/expect outside tests:\n{}",
        violations.join("\n")
    );
}

#[test]
fn gatherer_registry_is_not_a_global() {
    let violations = find_violations(&src(), &["static REGISTRY", "OnceLock<GathererRegistry"]);
    assert!(
        violations.is_empty(),
        "The gatherer registry must be injected:\n{}",
        violations.join("\n")
    );
}
