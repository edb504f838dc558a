// ABOUTME: Sequential executor walking a task graph in dependency order
// ABOUTME: Captures per-task failures and propagates skips to downstream tasks

use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{error, info, instrument, warn};

use super::context::TaskContext;
use super::exchange::Exchange;
use super::graph::TaskGraph;
use super::result::{RunReport, TaskOutcome, TaskStatus};
use super::task::Task;

/// Runs a [`TaskGraph`] one task at a time in the precomputed order. Each run
/// owns a fresh [`Exchange`]; nothing is shared across runs.
#[derive(Debug, Default)]
pub struct Executor;

impl Executor {
    pub fn new() -> Self {
        Self
    }

    /// Execute every task in the graph exactly once. A task whose upstream
    /// set contains a failed or skipped task is skipped without being
    /// invoked. A task error is recorded and the loop continues, so branches
    /// independent of the failure still execute.
    #[instrument(skip(self, graph), fields(tasks = graph.len()))]
    pub async fn run(&self, graph: &TaskGraph) -> RunReport {
        let run_id = uuid::Uuid::new_v4().to_string();
        let exchange = Arc::new(RwLock::new(Exchange::new()));
        let mut report = RunReport::new(run_id.clone());

        info!("Starting run {} with {} tasks", run_id, graph.len());

        for task in graph.tasks() {
            let outcome = self.run_task(task, &run_id, &exchange, &report).await;
            report.record(outcome);
        }

        report.mark_completed();
        info!(
            "Run {} finished with status {} ({} ok, {} failed, {} skipped)",
            run_id,
            report.status,
            report.successful_tasks(),
            report.failed_tasks(),
            report.skipped_tasks(),
        );
        report
    }

    async fn run_task(
        &self,
        task: &Task,
        run_id: &str,
        exchange: &Arc<RwLock<Exchange>>,
        report: &RunReport,
    ) -> TaskOutcome {
        let mut outcome = TaskOutcome::new(task.id.clone());

        // Order guarantees every upstream task already has a terminal
        // outcome, so one pass over the report is enough for skip
        // propagation.
        if let Some(blocked_on) = task
            .upstream
            .iter()
            .find(|upstream| {
                !matches!(report.status_of(upstream), Some(TaskStatus::Success))
            })
        {
            warn!(
                "Skipping task '{}': upstream '{}' did not succeed",
                task.id, blocked_on
            );
            outcome.mark_skipped(format!("upstream '{blocked_on}' did not succeed"));
            return outcome;
        }

        outcome.mark_started();
        info!("Executing task '{}'", task.id);

        let context = TaskContext::for_task(task, run_id, Arc::clone(exchange));
        match task.invoke(context).await {
            Ok(()) => {
                let published = exchange.read().await.published_keys(&task.id);
                info!(
                    "Task '{}' completed, published keys: {:?}",
                    task.id, published
                );
                outcome.mark_success(published);
            }
            Err(e) => {
                error!("Task '{}' failed: {}", task.id, e);
                outcome.mark_failed(e.to_string());
            }
        }

        outcome
    }
}
