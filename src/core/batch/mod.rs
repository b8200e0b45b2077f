//! Batch orchestration: the queue arena of items, progress accounting, and
//! the windowed orchestrator that drives the standardizer over the queue.
pub mod orchestrator;
pub mod progress;
pub mod queue;

pub use orchestrator::{
    BatchEvent, BatchOrchestrator, CancelToken, DEFAULT_CONCURRENCY, ItemOutcome, RunSummary, run,
};
pub use progress::BatchProgress;
pub use queue::{BatchQueue, FailureReason, ItemId, QueueItem};
