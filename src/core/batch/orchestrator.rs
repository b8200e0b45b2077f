use std::collections::HashSet;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc;
use std::thread;
use std::time::Instant;

use tracing::{debug, info, trace, warn};

use crate::core::batch::progress::BatchProgress;
use crate::core::batch::queue::{BatchQueue, FailureReason, ItemId, QueueItem};
use crate::core::params::{BatchParams, CanvasSpec};
use crate::core::processing::pipeline::{StandardizedImage, standardize_with_filter};
use crate::error::{Error, Result, StandardizeError};
use crate::types::{Lifecycle, ResampleFilter};

/// Window size used when the caller does not choose one.
pub const DEFAULT_CONCURRENCY: usize = 4;

/// Change notification emitted by the orchestrator as items move through their lifecycle.
#[derive(Debug, Clone, PartialEq)]
pub enum BatchEvent {
    ItemStarted { id: ItemId },
    ItemFinished { id: ItemId, lifecycle: Lifecycle },
    /// Emitted after each window completes
    Progress { percent: u8 },
}

/// Final state of one queue item after a run.
#[derive(Debug, Clone, PartialEq)]
pub struct ItemOutcome {
    pub id: ItemId,
    pub lifecycle: Lifecycle,
    /// Already completed before the run started
    pub skipped: bool,
    pub failure: Option<FailureReason>,
}

#[derive(Debug, Clone, Default)]
pub struct RunSummary {
    /// One entry per queue item, in queue order
    pub outcomes: Vec<ItemOutcome>,
    pub completed: usize,
    pub failed: usize,
    pub skipped: usize,
    pub cancelled: bool,
    pub progress: u8,
}

/// Cooperative cancellation flag, checked between windows.
#[derive(Debug, Clone, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    pub fn cancel(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

type WorkerOutcome = (usize, std::result::Result<StandardizedImage, StandardizeError>);
type StandardizeFn =
    fn(&[u8], &CanvasSpec, ResampleFilter) -> std::result::Result<StandardizedImage, StandardizeError>;

/// Drives the standardizer over a queue in fixed-size windows.
///
/// Every item of a window runs on its own scoped thread; the next window is
/// not dispatched until all of them have reported back. Workers never touch
/// the queue, they send their result over a channel to the coordinating thread.
#[derive(Debug, Clone)]
pub struct BatchOrchestrator {
    canvas: CanvasSpec,
    concurrency: usize,
    filter: ResampleFilter,
    cancel: CancelToken,
    worker: StandardizeFn,
}

impl BatchOrchestrator {
    pub fn new(canvas: CanvasSpec, concurrency: usize) -> Result<Self> {
        if concurrency == 0 {
            return Err(Error::ZeroSize { size: concurrency });
        }
        Ok(Self {
            canvas,
            concurrency,
            filter: ResampleFilter::default(),
            cancel: CancelToken::default(),
            worker: standardize_with_filter,
        })
    }

    pub fn from_params(params: &BatchParams) -> Result<Self> {
        Ok(Self::new(params.canvas, params.concurrency)?.with_filter(params.filter))
    }

    pub fn with_filter(mut self, filter: ResampleFilter) -> Self {
        self.filter = filter;
        self
    }

    #[cfg(test)]
    fn with_worker(mut self, worker: StandardizeFn) -> Self {
        self.worker = worker;
        self
    }

    pub fn canvas(&self) -> &CanvasSpec {
        &self.canvas
    }

    pub fn concurrency(&self) -> usize {
        self.concurrency
    }

    pub fn cancel_token(&self) -> CancelToken {
        self.cancel.clone()
    }

    pub fn run(&self, queue: &mut BatchQueue) -> RunSummary {
        self.run_with_observer(queue, |_| {})
    }

    /// Processes every item that is not already `Completed`, reporting changes to `observer`.
    ///
    /// Individual failures are recorded on their items and never abort the run.
    pub fn run_with_observer<F>(&self, queue: &mut BatchQueue, mut observer: F) -> RunSummary
    where
        F: FnMut(&BatchEvent),
    {
        let started = Instant::now();
        let total = queue.len();
        let runnable: Vec<usize> = queue
            .iter()
            .enumerate()
            .filter(|(_, item)| item.lifecycle() != Lifecycle::Completed)
            .map(|(idx, _)| idx)
            .collect();
        let skipped = total - runnable.len();

        let mut progress = BatchProgress::new(total);
        progress.record(skipped);

        info!(
            "Starting batch: {} items, {} to process, {} already completed, window size {}",
            total,
            runnable.len(),
            skipped,
            self.concurrency
        );

        let mut cancelled = false;
        for (window_no, window) in runnable.chunks(self.concurrency).enumerate() {
            if self.cancel.is_cancelled() {
                warn!(
                    "Batch cancelled before window {}; {} items left pending",
                    window_no + 1,
                    runnable.len() - window_no * self.concurrency
                );
                cancelled = true;
                break;
            }
            debug!("Dispatching window {} ({} items)", window_no + 1, window.len());
            self.run_window(queue, window, &mut observer);

            progress.record(window.len());
            let percent = progress.percent();
            info!(
                "Progress: {}% ({}/{})",
                percent,
                progress.terminal(),
                progress.total()
            );
            observer(&BatchEvent::Progress { percent });
        }

        let processed: HashSet<usize> = runnable.into_iter().collect();
        let mut summary = RunSummary {
            skipped,
            cancelled,
            progress: progress.percent(),
            ..RunSummary::default()
        };
        for (idx, item) in queue.iter().enumerate() {
            let ran = processed.contains(&idx);
            match item.lifecycle() {
                Lifecycle::Completed if ran => summary.completed += 1,
                Lifecycle::Failed if ran => summary.failed += 1,
                _ => {}
            }
            summary.outcomes.push(ItemOutcome {
                id: item.id(),
                lifecycle: item.lifecycle(),
                skipped: !ran,
                failure: item.failure().cloned(),
            });
        }

        info!("Batch processing complete!");
        info!("Completed: {}", summary.completed);
        info!("Failed: {}", summary.failed);
        info!("Skipped: {}", summary.skipped);
        info!("Elapsed: {:.2?}", started.elapsed());
        summary
    }

    fn run_window<F>(&self, queue: &mut BatchQueue, window: &[usize], observer: &mut F)
    where
        F: FnMut(&BatchEvent),
    {
        let items = queue.items_mut();
        let mut jobs = Vec::with_capacity(window.len());
        for &idx in window {
            let item = &mut items[idx];
            item.lifecycle = Lifecycle::Processing;
            item.result = None;
            item.failure = None;
            trace!("Item {} ({}) -> processing", item.id(), item.name());
            observer(&BatchEvent::ItemStarted { id: item.id() });
            jobs.push((idx, item.shared_source()));
        }

        let canvas = self.canvas;
        let filter = self.filter;
        let worker = self.worker;
        let (tx, rx) = mpsc::channel::<WorkerOutcome>();

        thread::scope(|s| {
            let handles: Vec<_> = jobs
                .into_iter()
                .map(|(idx, source)| {
                    let tx = tx.clone();
                    s.spawn(move || {
                        let outcome = worker(&source, &canvas, filter);
                        let _ = tx.send((idx, outcome));
                    })
                })
                .collect();
            drop(tx);

            for (idx, outcome) in rx {
                finish_item(&mut items[idx], outcome, observer);
            }
            for handle in handles {
                // A panicking worker never reported; it is failed below.
                let _ = handle.join();
            }
        });

        for &idx in window {
            let item = &mut items[idx];
            if item.lifecycle == Lifecycle::Processing {
                warn!("Worker for {} exited without a result", item.name());
                item.failure = Some(FailureReason {
                    kind: "worker_panicked".to_string(),
                    message: "standardization worker panicked".to_string(),
                });
                item.lifecycle = Lifecycle::Failed;
                observer(&BatchEvent::ItemFinished {
                    id: item.id(),
                    lifecycle: Lifecycle::Failed,
                });
            }
        }
    }
}

fn finish_item<F>(
    item: &mut QueueItem,
    outcome: std::result::Result<StandardizedImage, StandardizeError>,
    observer: &mut F,
) where
    F: FnMut(&BatchEvent),
{
    match outcome {
        Ok(image) => {
            debug!(
                "Completed {} -> {}x{} ({} bytes)",
                item.name(),
                image.width,
                image.height,
                image.encoded.len()
            );
            item.result = Some(image);
            item.lifecycle = Lifecycle::Completed;
        }
        Err(e) => {
            warn!("Error processing {}: {}", item.name(), e);
            item.failure = Some(FailureReason::from(&e));
            item.lifecycle = Lifecycle::Failed;
        }
    }
    observer(&BatchEvent::ItemFinished {
        id: item.id(),
        lifecycle: item.lifecycle,
    });
}

/// Runs `queue` with the given canvas and window size.
pub fn run(queue: &mut BatchQueue, canvas: &CanvasSpec, concurrency: usize) -> Result<RunSummary> {
    Ok(BatchOrchestrator::new(*canvas, concurrency)?.run(queue))
}
