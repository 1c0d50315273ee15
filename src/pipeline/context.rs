//! Pipeline context and tuning: shared data passed into the walk thread and the worker pool.

use crossbeam_channel::{Receiver, Sender, bounded};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread::JoinHandle;

use crate::engine::tools::NameFilter;
use crate::utils::config::{ChannelCap, WorkerThreadLimits};
use crate::{FileResult, Opts};

/// Shared cancel flag. Set once (e.g. from a Ctrl+C handler); the walk stops emitting and
/// workers abandon their current file.
#[derive(Clone, Debug, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}

/// Worker count and channel capacity for one run.
#[derive(Clone, Debug)]
pub struct PipelineTuning {
    pub num_workers: usize,
    /// Capacity for the job and result channels.
    pub channel_cap: usize,
}

impl PipelineTuning {
    pub fn from_opts(opts: &Opts) -> Self {
        let num_workers = WorkerThreadLimits::current().resolve(opts.num_workers);
        Self {
            num_workers,
            channel_cap: ChannelCap::for_workers(num_workers),
        }
    }
}

/// Shared context for the walk thread: root, filter, link policy, cancel flag.
pub struct PipelineContext {
    pub root: PathBuf,
    pub filter: NameFilter,
    pub follow_links: bool,
    pub cancel: CancelToken,
}

/// Live state of one run, returned by [`run_pipeline`](crate::pipeline::run_pipeline).
///
/// Receive from `result_rx` (it closes once the walk and every worker have finished), then
/// call [`shutdown_pipeline_handles`](crate::pipeline::shutdown_pipeline_handles) or use
/// [`collect_results`](crate::pipeline::collect_results), which does both. Consumed by either,
/// so a handle serves exactly one run.
pub struct PipelineHandle {
    pub result_rx: Receiver<FileResult>,
    pub walk_handle: JoinHandle<usize>,
    pub worker_handles: Vec<JoinHandle<()>>,
    pub cancel: CancelToken,
}

/// Channels for the pipeline. Walk thread gets job_tx and a result_tx clone; workers get job_rx and result_tx clones.
pub struct PipelineChannels {
    pub job_tx: Sender<PathBuf>,
    pub job_rx: Receiver<PathBuf>,
    pub result_tx: Sender<FileResult>,
    pub result_rx: Receiver<FileResult>,
    pub ctx: PipelineContext,
}

pub fn create_pipeline_channels(
    root: &Path,
    opts: &Opts,
    channel_cap: usize,
    cancel: CancelToken,
) -> PipelineChannels {
    let (job_tx, job_rx) = bounded::<PathBuf>(channel_cap);
    let (result_tx, result_rx) = bounded::<FileResult>(channel_cap);

    let ctx = PipelineContext {
        root: root.to_path_buf(),
        filter: NameFilter::new(&opts.file_pattern),
        follow_links: opts.follow_links,
        cancel,
    };

    PipelineChannels {
        job_tx,
        job_rx,
        result_tx,
        result_rx,
        ctx,
    }
}
