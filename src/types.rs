//! Public and internal types for the hashcalc API and pipeline.

use std::collections::HashMap;
use std::path::PathBuf;

use crate::engine::registry::HashAlgorithm;
use crate::error::HashError;

/// Outcome for one path: a digest or the reason there is none. Never both.
#[derive(Debug)]
pub struct FileResult {
    pub path: PathBuf,
    pub outcome: std::result::Result<String, HashError>,
}

impl FileResult {
    pub fn ok(path: PathBuf, digest: String) -> Self {
        Self {
            path,
            outcome: Ok(digest),
        }
    }

    pub fn err(path: PathBuf, error: HashError) -> Self {
        Self {
            path,
            outcome: Err(error),
        }
    }

    pub fn digest(&self) -> Option<&str> {
        self.outcome.as_ref().ok().map(String::as_str)
    }

    pub fn error(&self) -> Option<&HashError> {
        self.outcome.as_ref().err()
    }
}

/// Map of path → lowercase hex digest for every file hashed successfully.
///
/// Keys are the paths as discovered by the walk (joined onto the root as given, not canonicalized).
pub type Digests = HashMap<PathBuf, String>;

/// Everything a finished run produced. Built by the collector once the result stream is closed.
#[derive(Debug, Default)]
pub struct HashReport {
    pub digests: Digests,
    /// Failures in the order they were received, each tied to its path.
    pub errors: Vec<(PathBuf, HashError)>,
}

impl HashReport {
    pub fn has_failures(&self) -> bool {
        !self.errors.is_empty()
    }

    /// Number of results seen (successes + failures).
    pub fn total(&self) -> usize {
        self.digests.len() + self.errors.len()
    }
}

/// Lib-only options for [`hash_dir`](crate::hash_dir). Only the fields that apply when using the crate.
#[derive(Clone, Debug)]
pub struct HashOpts {
    pub algorithm: HashAlgorithm,
    /// Glob matched against each file name (not the full path). `*` matches everything.
    pub file_pattern: String,
    /// Override worker count. When None, host parallelism capped by the FD limit.
    pub num_workers: Option<usize>,
    /// Follow symbolic links while walking.
    pub follow_links: bool,
}

impl Default for HashOpts {
    fn default() -> Self {
        Self {
            algorithm: HashAlgorithm::default(),
            file_pattern: crate::utils::config::DEFAULT_FILE_PATTERN.to_string(),
            num_workers: None,
            follow_links: false,
        }
    }
}

impl From<&HashOpts> for Opts {
    fn from(o: &HashOpts) -> Self {
        Opts {
            algorithm: o.algorithm,
            file_pattern: o.file_pattern.clone(),
            num_workers: o.num_workers,
            follow_links: o.follow_links,
            ..Opts::default()
        }
    }
}

/// Full options (CLI). Use [`HashOpts`] for lib.
#[derive(Clone, Debug)]
pub struct Opts {
    pub algorithm: HashAlgorithm,
    pub file_pattern: String,
    pub num_workers: Option<usize>,
    pub follow_links: bool,
    /// Write `path: digest` lines here after the run.
    pub out_file: Option<PathBuf>,
    /// Rename each hashed file to `<digest><ext>` in its directory.
    pub rename: bool,
    /// Print `path: digest` to stdout (suppressed when `out_file` is set).
    pub display: bool,
    /// Debug logging and a progress counter on stderr.
    pub verbose: bool,
}

impl Default for Opts {
    fn default() -> Self {
        Self {
            algorithm: HashAlgorithm::default(),
            file_pattern: crate::utils::config::DEFAULT_FILE_PATTERN.to_string(),
            num_workers: None,
            follow_links: false,
            out_file: None,
            rename: false,
            display: true,
            verbose: false,
        }
    }
}

impl Opts {
    /// Console lines go out as results arrive unless everything is going to a file.
    pub fn prints_to_console(&self) -> bool {
        self.display && self.out_file.is_none()
    }
}
