//! Result collector: sole reader of the result stream and sole owner of the aggregated report.

use anyhow::Result;
use crossbeam_channel::Receiver;
use log::debug;

use crate::error::HashError;
use crate::{FileResult, HashReport};

use super::context::PipelineHandle;
use super::orchestrator::shutdown_pipeline_handles;

/// Accumulates results as they arrive. No ordering is assumed between results.
#[derive(Default)]
pub struct ResultCollector {
    report: HashReport,
}

impl ResultCollector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, result: FileResult) {
        match result.outcome {
            Ok(digest) => {
                self.report.digests.insert(result.path, digest);
            }
            Err(e) => self.report.errors.push((result.path, e)),
        }
    }

    /// Record a failure raised downstream of the pipeline (e.g. a rename).
    pub fn record_error(&mut self, path: std::path::PathBuf, error: HashError) {
        self.report.errors.push((path, error));
    }

    pub fn finish(self) -> HashReport {
        self.report
    }
}

/// Drain `result_rx` until it closes. `on_result` sees every result first; an `Err` it returns
/// is recorded against the same path. The report is only returned once the stream is closed.
pub fn drain_results<F>(result_rx: &Receiver<FileResult>, mut on_result: F) -> HashReport
where
    F: FnMut(&FileResult) -> std::result::Result<(), HashError>,
{
    let mut collector = ResultCollector::new();
    while let Ok(result) = result_rx.recv() {
        match on_result(&result) {
            Ok(()) => collector.record(result),
            Err(e) => {
                let path = result.path.clone();
                collector.record(result);
                collector.record_error(path, e);
            }
        }
    }
    collector.finish()
}

/// Drain a running pipeline to completion, then join its threads. Consumes the handle.
pub fn collect_results<F>(handle: PipelineHandle, on_result: F) -> Result<HashReport>
where
    F: FnMut(&FileResult) -> std::result::Result<(), HashError>,
{
    let PipelineHandle {
        result_rx,
        walk_handle,
        worker_handles,
        cancel: _,
    } = handle;

    let report = drain_results(&result_rx, on_result);
    debug!(
        "collector: channel closed, {} digests, {} errors",
        report.digests.len(),
        report.errors.len()
    );

    let job_count = shutdown_pipeline_handles(walk_handle, worker_handles)?;
    debug!("collector: {} jobs queued by walk", job_count);
    Ok(report)
}
