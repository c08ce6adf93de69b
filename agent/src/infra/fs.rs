//! Filesystem helpers shared by the file-backed adapters.

use std::path::Path;

use anyhow::{Context, Result};

/// Write `content` to `path` atomically: temp file in the same directory,
/// owner-only permissions, then rename over the target.
///
/// # Errors
///
/// Returns an error if the directory cannot be created or any step of the
/// write fails.
pub fn write_atomic(path: &Path, content: &[u8]) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("creating directory {}", parent.display()))?;
    }

    let mut temp_name = path.file_name().unwrap_or_default().to_os_string();
    temp_name.push(".tmp");
    let temp_path = path.with_file_name(temp_name);
    std::fs::write(&temp_path, content)
        .with_context(|| format!("writing temp file {}", temp_path.display()))?;

    let finalized = finalize(&temp_path, path);
    if finalized.is_err() {
        let _ = std::fs::remove_file(&temp_path);
    }
    finalized
}

fn finalize(temp_path: &Path, path: &Path) -> Result<()> {
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        std::fs::set_permissions(temp_path, std::fs::Permissions::from_mode(0o600))
            .with_context(|| format!("setting permissions on {}", temp_path.display()))?;
    }

    std::fs::rename(temp_path, path)
        .with_context(|| format!("finalizing {}", path.display()))?;
    Ok(())
}
