// lib/crates/fleet-common/src/paths.rs

use std::path::{Component, Path, PathBuf};

/// Join object-store key segments with `/`.
///
/// Empty segments are skipped, repeated separators collapse, `.` segments
/// vanish and `..` removes the previous segment. A leading `/` on the first
/// non-empty segment is kept.
#[must_use]
pub fn s3_join(parts: &[&str]) -> String {
    let rooted = parts
        .iter()
        .find(|p| !p.is_empty())
        .is_some_and(|p| p.starts_with('/'));

    let mut segments: Vec<&str> = Vec::new();
    for segment in parts.iter().flat_map(|p| p.split('/')) {
        match segment {
            "" | "." => {}
            ".." => {
                if segments.last().is_some_and(|last| *last != "..") {
                    segments.pop();
                } else if !rooted {
                    segments.push("..");
                }
            }
            other => segments.push(other),
        }
    }

    let joined = segments.join("/");
    if rooted {
        format!("/{joined}")
    } else {
        joined
    }
}

/// Append `segment` below `base`, keeping only its normal components.
///
/// Root, prefix, `.` and `..` components are dropped, so the result always
/// stays inside `base` whatever the segment holds.
#[must_use]
pub fn join_under(base: &Path, segment: &str) -> PathBuf {
    let mut path = base.to_path_buf();
    for component in Path::new(segment).components() {
        if let Component::Normal(part) = component {
            path.push(part);
        }
    }
    path
}
