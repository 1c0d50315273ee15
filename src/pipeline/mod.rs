//! Pipeline components: context, walk (producer), worker pool, collector.

pub mod collector;
pub mod context;
pub mod orchestrator;
pub mod walk;
pub mod worker;

pub use collector::{ResultCollector, collect_results, drain_results};
pub use context::{
    CancelToken, PipelineChannels, PipelineContext, PipelineHandle, PipelineTuning,
    create_pipeline_channels,
};
pub use orchestrator::{run_pipeline, shutdown_pipeline_handles};
pub use walk::{WalkOutcome, run_walk_loop, spawn_walk_thread, to_outcome_walkdir};
pub use worker::{hash_path, spawn_workers};
