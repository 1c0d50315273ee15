use anyhow::{Context, Result};
use log::debug;
use std::path::Path;

use crate::Opts;
use crate::engine::hashing::StreamHasher;
use crate::pipeline;
use crate::pipeline::context::{CancelToken, PipelineTuning};

/// Start the walk + hashing pipeline. Returns the handle; caller receives from
/// `result_rx` and must join `walk_handle` and `worker_handles` when done.
///
/// Workers start first, so a refused walk thread leaves nothing behind but idle workers that
/// exit as soon as the job channel closes.
pub fn run_pipeline(
    root: &Path,
    opts: &Opts,
    cancel: CancelToken,
) -> Result<pipeline::PipelineHandle> {
    let tuning = PipelineTuning::from_opts(opts);
    debug!(
        "pipeline: root={} pattern={:?} hash={} workers={} channel_cap={}",
        root.display(),
        opts.file_pattern,
        opts.algorithm,
        tuning.num_workers,
        tuning.channel_cap
    );

    let channels =
        pipeline::create_pipeline_channels(root, opts, tuning.channel_cap, cancel.clone());

    let worker_handles = pipeline::spawn_workers(
        channels.job_rx,
        &channels.result_tx,
        StreamHasher::new(opts.algorithm),
        &cancel,
        tuning.num_workers,
    )
    .with_context(|| format!("spawn {} hashing workers", tuning.num_workers))?;

    let walk_handle = pipeline::spawn_walk_thread(
        channels.job_tx,
        channels.result_tx.clone(),
        channels.ctx,
    )
    .context("spawn walk thread")?;

    // Dropping the last sender we hold: the result channel now closes exactly when the walk
    // and every worker have dropped theirs, i.e. after all in-flight results were sent.
    drop(channels.result_tx);

    Ok(pipeline::PipelineHandle {
        result_rx: channels.result_rx,
        walk_handle,
        worker_handles,
        cancel,
    })
}

/// Shut down the pipeline by joining walk and worker threads (after the result stream is drained).
/// Returns the number of jobs the walk queued.
pub fn shutdown_pipeline_handles(
    walk_handle: std::thread::JoinHandle<usize>,
    worker_handles: Vec<std::thread::JoinHandle<()>>,
) -> Result<usize> {
    let job_count = walk_handle
        .join()
        .map_err(|_| anyhow::anyhow!("walk thread panicked"))?;
    for h in worker_handles {
        h.join()
            .map_err(|_| anyhow::anyhow!("worker thread panicked"))?;
    }
    Ok(job_count)
}
