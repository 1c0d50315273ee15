//! Worker pool: each worker pulls paths from the shared job channel, hashes the file, sends one result per job.

use crossbeam_channel::{Receiver, Sender};
use std::fs::File;
use std::io::{self, Read};
use std::panic::{self, AssertUnwindSafe};
use std::path::{Path, PathBuf};
use std::thread::{self, JoinHandle};

use crate::FileResult;
use crate::engine::hashing::StreamHasher;
use crate::error::HashError;

use super::context::CancelToken;

/// Reader that fails the next read once cancel is requested, so an in-flight hash stops at a chunk boundary.
struct CancellableReader<'a, R> {
    inner: R,
    cancel: &'a CancelToken,
}

impl<R: Read> Read for CancellableReader<'_, R> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        if self.cancel.is_cancelled() {
            return Err(io::Error::other("cancelled"));
        }
        self.inner.read(buf)
    }
}

/// Open and hash one file. The handle lives only inside this call and is closed on every return path.
pub fn hash_path(
    path: &Path,
    hasher: &StreamHasher,
    cancel: &CancelToken,
) -> Result<String, HashError> {
    let file = File::open(path).map_err(HashError::Open)?;
    let reader = CancellableReader {
        inner: file,
        cancel,
    };
    match hasher.hash(reader) {
        Err(HashError::Read(_)) if cancel.is_cancelled() => Err(HashError::Cancelled),
        other => other,
    }
}

/// Hash one job, turning a panic inside the hasher into an error result for that path.
fn process_job(
    path: &Path,
    hasher: &StreamHasher,
    cancel: &CancelToken,
) -> Result<String, HashError> {
    if cancel.is_cancelled() {
        return Err(HashError::Cancelled);
    }
    panic::catch_unwind(AssertUnwindSafe(|| hash_path(path, hasher, cancel))).unwrap_or_else(
        |payload| {
            let msg = payload
                .downcast_ref::<&str>()
                .map(|s| s.to_string())
                .or_else(|| payload.downcast_ref::<String>().cloned())
                .unwrap_or_else(|| "unknown panic".to_string());
            Err(HashError::WorkerPanic(msg))
        },
    )
}

/// Single worker: read paths from job_rx until it is closed and drained, send each outcome on result_tx.
fn worker_loop(
    id: usize,
    job_rx: Receiver<PathBuf>,
    result_tx: Sender<FileResult>,
    hasher: StreamHasher,
    cancel: CancelToken,
) {
    let mut done = 0_usize;
    while let Ok(path) = job_rx.recv() {
        let outcome = process_job(&path, &hasher, &cancel);
        if result_tx.send(FileResult { path, outcome }).is_err() {
            break;
        }
        done += 1;
    }
    log::debug!("worker {}: job channel closed after {} files", id, done);
    drop(result_tx);
}

/// Spawn exactly `num_workers` workers sharing `job_rx`. Each holds its own `result_tx` clone;
/// the caller must drop its sender after this so the result channel closes once the last worker exits.
///
/// Fails if the OS refuses a thread. Workers already started keep running until the job
/// channel closes, which happens once the caller drops its `job_tx`.
pub fn spawn_workers(
    job_rx: Receiver<PathBuf>,
    result_tx: &Sender<FileResult>,
    hasher: StreamHasher,
    cancel: &CancelToken,
    num_workers: usize,
) -> io::Result<Vec<JoinHandle<()>>> {
    (0..num_workers)
        .map(|id| {
            let job_rx = job_rx.clone();
            let result_tx = result_tx.clone();
            let cancel = cancel.clone();
            thread::Builder::new()
                .name(format!("hashcalc-worker-{id}"))
                .spawn(move || worker_loop(id, job_rx, result_tx, hasher, cancel))
        })
        .collect()
}
