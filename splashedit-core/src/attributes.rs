use crate::error::{Result, SplashError};
use std::fs;
use std::path::Path;

/// Marks `path` read-only. Setting it again is a no-op.
pub fn set_readonly(path: &Path) -> Result<()> {
    set_readonly_flag(path, true)
}

/// Clears the read-only flag so the file can be overwritten
pub fn clear_readonly(path: &Path) -> Result<()> {
    set_readonly_flag(path, false)
}

/// Reports the current read-only state of `path`
pub fn is_readonly(path: &Path) -> Result<bool> {
    let metadata =
        fs::metadata(path).map_err(|e| SplashError::fs("read attributes of", path, e))?;
    Ok(metadata.permissions().readonly())
}

#[allow(clippy::permissions_set_readonly_false)]
fn set_readonly_flag(path: &Path, readonly: bool) -> Result<()> {
    let action = if readonly {
        "set read-only on"
    } else {
        "clear read-only on"
    };

    let mut permissions = fs::metadata(path)
        .map_err(|e| SplashError::fs(action, path, e))?
        .permissions();
    permissions.set_readonly(readonly);

    fs::set_permissions(path, permissions).map_err(|e| SplashError::fs(action, path, e))
}
