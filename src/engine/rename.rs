//! Rename a hashed file to `<digest><ext>` in its own directory.

use std::path::{Path, PathBuf};

use crate::engine::tools::digest_file_name;
use crate::error::HashError;

/// Rename `path` after `digest`. Returns the new path.
///
/// Refuses with [`HashError::AlreadyExists`] when the target name is taken, leaving `path` untouched.
/// A file already carrying its digest name is reported as existing too (target == source).
pub fn rename_to_digest(path: &Path, digest: &str) -> Result<PathBuf, HashError> {
    let target = digest_file_name(path, digest);
    if target.symlink_metadata().is_ok() {
        return Err(HashError::AlreadyExists(target));
    }
    std::fs::rename(path, &target).map_err(|source| HashError::Rename {
        target: target.clone(),
        source,
    })?;
    log::debug!("renamed {} -> {}", path.display(), target.display());
    Ok(target)
}
