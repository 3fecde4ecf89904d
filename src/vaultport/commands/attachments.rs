use crate::error::{Result, VaultError};
use log::{debug, info};
use std::fs;
use std::path::Path;
use walkdir::WalkDir;

/// Copies the attachments directory tree verbatim. Returns the number of
/// files copied; an export without attachments copies nothing.
pub fn copy_dir(from: &Path, to: &Path) -> Result<usize> {
    if !from.is_dir() {
        info!("no attachments directory at {}", from.display());
        return Ok(0);
    }

    let mut copied = 0;
    for entry in WalkDir::new(from) {
        let entry = entry.map_err(|e| VaultError::Copy(e.to_string()))?;
        let relative = entry
            .path()
            .strip_prefix(from)
            .map_err(|e| VaultError::Copy(e.to_string()))?;
        let target = to.join(relative);

        if entry.file_type().is_dir() {
            fs::create_dir_all(&target).map_err(|e| VaultError::write(&target, e))?;
        } else if entry.file_type().is_file() {
            fs::copy(entry.path(), &target).map_err(|e| {
                VaultError::Copy(format!(
                    "{} -> {}: {}",
                    entry.path().display(),
                    target.display(),
                    e
                ))
            })?;
            copied += 1;
        } else {
            debug!("skipping special file {}", entry.path().display());
        }
    }
    Ok(copied)
}
