//! Discovery: walk the tree, send matching file paths as jobs, turn walk errors into results.

use crossbeam_channel::Sender;
use std::io;
use std::path::PathBuf;
use std::thread::{self, JoinHandle};

use crate::FileResult;
use crate::error::HashError;

use super::context::PipelineContext;

/// One item from a directory walk: a file to consider, a directory (never a job), or an error with optional path.
pub enum WalkOutcome {
    File(PathBuf),
    Dir,
    Err { error: io::Error, path: Option<PathBuf> },
}

/// Convert a walkdir result into [`WalkOutcome`].
pub fn to_outcome_walkdir(r: Result<walkdir::DirEntry, walkdir::Error>) -> WalkOutcome {
    match r {
        Ok(entry) if entry.file_type().is_dir() => WalkOutcome::Dir,
        Ok(entry) => WalkOutcome::File(entry.into_path()),
        Err(err) => {
            let path = err.path().map(PathBuf::from);
            WalkOutcome::Err {
                error: io::Error::from(err),
                path,
            }
        }
    }
}

fn walkdir_iter(ctx: &PipelineContext) -> Box<dyn Iterator<Item = WalkOutcome>> {
    use walkdir::WalkDir;
    // Sorting makes walkdir read each directory in full before yielding from it, so files
    // renamed while the run is in progress are never discovered a second time.
    Box::new(
        WalkDir::new(&ctx.root)
            .follow_links(ctx.follow_links)
            .sort_by_file_name()
            .into_iter()
            .map(to_outcome_walkdir),
    )
}

/// Spawn the producer thread. It owns `job_tx`; dropping it at the end closes the job channel.
/// If the OS refuses the thread, both senders are dropped with the closure.
pub fn spawn_walk_thread(
    job_tx: Sender<PathBuf>,
    result_tx: Sender<FileResult>,
    ctx: PipelineContext,
) -> io::Result<JoinHandle<usize>> {
    thread::Builder::new()
        .name("hashcalc-walk".to_string())
        .spawn(move || {
            let iter = walkdir_iter(&ctx);
            run_walk_loop(job_tx, result_tx, ctx, iter)
        })
}

/// Run the walk loop: consume `iter` of [`WalkOutcome`], send files whose name passes the filter to `job_tx`,
/// send one error result per walk error to `result_tx` and keep going.
/// Stops early on cancel or when every receiver is gone. Drops both senders when done and returns the number of jobs sent.
pub fn run_walk_loop<I>(
    job_tx: Sender<PathBuf>,
    result_tx: Sender<FileResult>,
    ctx: PipelineContext,
    iter: I,
) -> usize
where
    I: Iterator<Item = WalkOutcome>,
{
    let mut count = 0_usize;
    let mut errors = 0_usize;
    for outcome in iter {
        if ctx.cancel.is_cancelled() {
            log::debug!("walk: cancel requested, stopping after {} jobs", count);
            break;
        }
        match outcome {
            WalkOutcome::Dir => {}
            WalkOutcome::File(path) => {
                if !ctx.filter.matches_path(&path) {
                    continue;
                }
                if job_tx.send(path).is_err() {
                    break;
                }
                count += 1;
            }
            WalkOutcome::Err { error, path } => {
                let path = path.unwrap_or_else(|| ctx.root.clone());
                log::debug!("walk: {}: {}", path.display(), error);
                errors += 1;
                if result_tx
                    .send(FileResult::err(path, HashError::Traversal(error)))
                    .is_err()
                {
                    break;
                }
            }
        }
    }
    if errors > 0 {
        log::warn!("Skipped {} paths due to permission errors or access issues", errors);
    }
    log::debug!("walk: done, {} jobs queued", count);
    drop(job_tx);
    drop(result_tx);
    count
}
