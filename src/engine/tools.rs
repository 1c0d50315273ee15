//! Path and filter utilities

use glob::{MatchOptions, Pattern};
use std::path::{Path, PathBuf};

/// Compiled file-name filter. A malformed pattern compiles to a filter that never matches.
#[derive(Clone, Debug)]
pub struct NameFilter {
    pattern: Option<Pattern>,
}

impl NameFilter {
    pub fn new(pattern: &str) -> Self {
        let pattern = match Pattern::new(pattern) {
            Ok(p) => Some(p),
            Err(e) => {
                log::warn!("Invalid file pattern {:?}: {}; nothing will match", pattern, e);
                None
            }
        };
        Self { pattern }
    }

    /// True when the pattern compiled.
    pub fn is_valid(&self) -> bool {
        self.pattern.is_some()
    }

    /// Match against the final component of `path` only. A name that is not valid UTF-8 is
    /// matched in its lossy form, so `*` and `*.ext` still pick it up.
    pub fn matches_path(&self, path: &Path) -> bool {
        match path.file_name() {
            Some(name) => self.matches_name(&name.to_string_lossy()),
            None => false,
        }
    }

    pub fn matches_name(&self, name: &str) -> bool {
        let opts = MatchOptions {
            case_sensitive: true,
            require_literal_separator: true,
            require_literal_leading_dot: false,
        };
        self.pattern
            .as_ref()
            .is_some_and(|p| p.matches_with(name, opts))
    }
}

/// Simple glob check: compile `pattern` and match it against `name`. Malformed patterns never match.
pub fn glob_match(pattern: &str, name: &str) -> bool {
    NameFilter::new(pattern).matches_name(name)
}

/// Target for renaming `path` after its digest: `<dir>/<digest><.ext>`.
/// Only the last extension is kept (`a.tar.gz` → `<digest>.gz`).
pub fn digest_file_name(path: &Path, digest: &str) -> PathBuf {
    let name = match path.extension() {
        Some(ext) => format!("{}.{}", digest, ext.to_string_lossy()),
        None => digest.to_string(),
    };
    match path.parent() {
        Some(dir) => dir.join(name),
        None => PathBuf::from(name),
    }
}

/// True if the process is running with effective uid 0 (e.g. via sudo).
#[cfg(unix)]
pub fn running_as_root() -> bool {
    unsafe { libc::geteuid() == 0 }
}

#[cfg(not(unix))]
pub fn running_as_root() -> bool {
    false
}
