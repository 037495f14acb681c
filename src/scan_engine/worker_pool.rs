//! Fixed-size worker pool over a shared target queue
//!
//! `W` workers pull targets from one FIFO. Each worker runs one pipeline to
//! completion before taking the next target, so at most `W` pipelines are in
//! flight. Every target is taken by exactly one worker. The pool returns
//! once the queue is drained and every in-flight pipeline has finished;
//! there is no pool-level timeout or cancellation.
//!
//! Outcomes leave a worker over a channel the moment they are produced, so a
//! worker that dies later cannot take already finished outcomes with it.

use futures::StreamExt;
use futures::stream::FuturesUnordered;
use log::{debug, error, info};
use std::collections::VecDeque;
use std::panic::{AssertUnwindSafe, catch_unwind};
use std::sync::Arc;
use tokio::sync::{Mutex, mpsc};

use super::pipeline::{PipelineContext, process_target};
use super::progress::ProgressReporter;
use super::scan_types::{FailureKind, RunOutcome};

pub struct WorkerPool {
    workers: usize,
}

impl WorkerPool {
    /// Pool with `workers` concurrent pipelines (at least one)
    #[must_use]
    pub fn new(workers: usize) -> Self {
        Self {
            workers: workers.max(1),
        }
    }

    #[must_use]
    pub fn workers(&self) -> usize {
        self.workers
    }

    /// Process every target and return one outcome per target.
    ///
    /// Targets are dispatched in list order; outcomes come back in completion
    /// order.
    pub async fn run<P>(
        &self,
        targets: Vec<String>,
        ctx: Arc<PipelineContext>,
        progress: Arc<P>,
    ) -> Vec<RunOutcome>
    where
        P: ProgressReporter + ?Sized + 'static,
    {
        let total = targets.len();
        let queue = Arc::new(Mutex::new(VecDeque::from(targets)));
        let worker_count = self.workers.min(total);
        info!("Starting {worker_count} workers for {total} targets");

        let (outcome_tx, mut outcome_rx) = mpsc::unbounded_channel();

        let mut workers: FuturesUnordered<_> = (0..worker_count)
            .map(|worker_id| {
                let queue = Arc::clone(&queue);
                let ctx = Arc::clone(&ctx);
                let progress = Arc::clone(&progress);
                let outcome_tx = outcome_tx.clone();
                tokio::spawn(worker_loop(worker_id, queue, ctx, progress, outcome_tx))
            })
            .collect();
        drop(outcome_tx);

        while let Some(joined) = workers.next().await {
            if let Err(e) = joined {
                error!("Worker task failed: {e}");
            }
        }

        // Every sender is gone once the workers are joined
        let mut outcomes = Vec::with_capacity(total);
        while let Some(outcome) = outcome_rx.recv().await {
            outcomes.push(outcome);
        }

        // Targets left behind by workers that died still get an outcome
        for target in queue.lock().await.drain(..) {
            error!("[ERR ] {target} -> {} (no worker left)", FailureKind::Internal);
            outcomes.push(RunOutcome::failed(
                target,
                None,
                FailureKind::Internal,
                "no worker left to process target",
            ));
        }

        debug!("All workers finished, {} outcomes", outcomes.len());
        outcomes
    }
}

/// Run a progress callback, keeping a panicking reporter away from the worker
fn guarded_report(target: &str, event: &str, report: impl FnOnce()) {
    if catch_unwind(AssertUnwindSafe(report)).is_err() {
        error!("Progress reporter panicked on {event} for {target}");
    }
}

async fn worker_loop<P>(
    worker_id: usize,
    queue: Arc<Mutex<VecDeque<String>>>,
    ctx: Arc<PipelineContext>,
    progress: Arc<P>,
    outcomes: mpsc::UnboundedSender<RunOutcome>,
) where
    P: ProgressReporter + ?Sized + 'static,
{
    loop {
        // Lock is released before the pipeline runs
        let next = queue.lock().await.pop_front();
        let Some(target) = next else { break };

        info!("[SCAN] worker {worker_id} -> {target}");
        guarded_report(&target, "start", || progress.report_started(&target));

        // A panicking pipeline must not take the worker down with it
        let task_ctx = Arc::clone(&ctx);
        let task_target = target.clone();
        let outcome =
            match tokio::spawn(async move { process_target(&task_target, &task_ctx).await }).await
            {
                Ok(outcome) => outcome,
                Err(e) => {
                    error!("[ERR ] {target} -> {} ({e})", FailureKind::Internal);
                    RunOutcome::failed(target.as_str(), None, FailureKind::Internal, e.to_string())
                }
            };

        guarded_report(&target, "outcome", || progress.report_outcome(&outcome));
        if outcomes.send(outcome).is_err() {
            break;
        }
    }
}
