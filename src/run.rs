//! Directory hashing operations

use anyhow::Result;
use log::{debug, info};
use std::path::Path;

use crate::error::HashError;
use crate::pipeline::{CancelToken, collect_results, run_pipeline};
use crate::{FileResult, HashReport, Opts};

/// Hash every file under `root` whose name matches `opts.file_pattern`.
///
/// `on_result` runs on the calling thread for each result as it arrives (any order); an `Err` it
/// returns is added to the report against that path. Per-file failures never fail the call;
/// `Err` is only returned if a pipeline thread could not be started or panicked.
pub fn hash_dir_with_opts<F>(
    root: &Path,
    opts: &Opts,
    cancel: CancelToken,
    on_result: F,
) -> Result<HashReport>
where
    F: FnMut(&FileResult) -> std::result::Result<(), HashError>,
{
    info!(
        "Hashing {} ({}, pattern {:?})",
        root.display(),
        opts.algorithm,
        opts.file_pattern
    );
    let handle = run_pipeline(root, opts, cancel)?;
    let report = collect_results(handle, on_result)?;
    debug!("Done: {} results", report.total());
    Ok(report)
}
