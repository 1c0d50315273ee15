//! Hashcalc: concurrent file hashing over a directory tree

pub mod engine;
pub mod error;
pub mod pipeline;
pub mod run;
pub mod types;
pub mod utils;

/// Re-export types for API
pub use engine::hashing::StreamHasher;
pub use engine::registry::{HashAlgorithm, lookup};
pub use error::HashError;
pub use pipeline::CancelToken;
pub use types::*;

use std::path::Path;

/// Result alias used by public hashcalc API
pub use anyhow::Error;
pub type Result<T> = std::result::Result<T, Error>;

/// Single entry point: hash files under `root` matching `opts.file_pattern` and return the report.
///
/// - **`on_result: None`** → just collect.
/// - **`on_result: Some(f)`** → streaming; `f` is invoked for each result as it arrives. Keep it fast.
///
/// Per-file failures (traversal, open, read) are in [`HashReport::errors`], never an `Err` here.
pub fn hash_dir<F>(root: &Path, opts: &HashOpts, on_result: Option<F>) -> Result<HashReport>
where
    F: FnMut(&FileResult),
{
    hash_dir_with_cancel(root, opts, CancelToken::new(), on_result)
}

/// Like [`hash_dir`], with a [`CancelToken`] the caller can trip from another thread.
/// Jobs not yet hashed when it trips are reported as [`HashError::Cancelled`].
pub fn hash_dir_with_cancel<F>(
    root: &Path,
    opts: &HashOpts,
    cancel: CancelToken,
    on_result: Option<F>,
) -> Result<HashReport>
where
    F: FnMut(&FileResult),
{
    let opts = Opts::from(opts);
    match on_result {
        None => run::hash_dir_with_opts(root, &opts, cancel, |_| Ok(())),
        Some(mut f) => run::hash_dir_with_opts(root, &opts, cancel, |r| {
            f(r);
            Ok(())
        }),
    }
}

/// Hash a single file with `algorithm`. Open and read failures come back as [`HashError`].
pub fn hash_file(path: &Path, algorithm: HashAlgorithm) -> std::result::Result<String, HashError> {
    pipeline::hash_path(path, &StreamHasher::new(algorithm), &CancelToken::new())
}
