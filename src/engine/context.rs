// ABOUTME: Execution context handed to each task body
// ABOUTME: Exposes publish/fetch bound to the run's exchange plus the task's static parameters

use serde_json::Value;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use super::error::{ExecutionError, Result};
use super::exchange::Exchange;
use super::task::Task;

/// The only handle a task body receives. `publish` writes under this task's
/// id; `fetch` reads values published by other tasks. Tasks must not hold a
/// context beyond their own `run` invocation.
#[derive(Clone)]
pub struct TaskContext {
    task_id: String,
    run_id: String,
    upstream: Vec<String>,
    params: HashMap<String, Value>,
    exchange: Arc<RwLock<Exchange>>,
}

impl TaskContext {
    pub(crate) fn for_task(task: &Task, run_id: &str, exchange: Arc<RwLock<Exchange>>) -> Self {
        Self {
            task_id: task.id.clone(),
            run_id: run_id.to_string(),
            upstream: task.upstream.clone(),
            params: task.params.clone(),
            exchange,
        }
    }

    pub fn task_id(&self) -> &str {
        &self.task_id
    }

    pub fn run_id(&self) -> &str {
        &self.run_id
    }

    /// Upstream task ids as declared at registration, in declaration order.
    pub fn upstream(&self) -> &[String] {
        &self.upstream
    }

    /// Publish a value under `(this task, key)`. Write-once per run.
    pub async fn publish(&self, key: &str, value: Value) -> Result<()> {
        let mut exchange = self.exchange.write().await;
        exchange.publish(&self.task_id, key, value)
    }

    /// Fetch `key` from each of the given producers, positionally aligned.
    pub async fn fetch(&self, key: &str, producer_ids: &[String]) -> Result<Vec<Value>> {
        let exchange = self.exchange.read().await;
        exchange.fetch(key, producer_ids)
    }

    /// Fetch `key` from every declared upstream task, in declaration order.
    pub async fn fetch_upstream(&self, key: &str) -> Result<Vec<Value>> {
        self.fetch(key, &self.upstream).await
    }

    pub fn param(&self, name: &str) -> Option<&Value> {
        self.params.get(name)
    }

    /// A required string parameter; anything else is a configuration error.
    pub fn param_str(&self, name: &str) -> Result<&str> {
        self.params
            .get(name)
            .and_then(Value::as_str)
            .ok_or_else(|| ExecutionError::MissingParameter {
                task_id: self.task_id.clone(),
                name: name.to_string(),
            })
    }
}

impl std::fmt::Debug for TaskContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TaskContext")
            .field("task_id", &self.task_id)
            .field("run_id", &self.run_id)
            .field("upstream", &self.upstream)
            .finish()
    }
}
