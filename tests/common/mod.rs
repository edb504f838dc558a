// ABOUTME: Common utilities and helpers for integration tests
// ABOUTME: Provides task implementations that record start order, publish values, or fail

#![allow(dead_code)]

use async_trait::async_trait;
use serde_json::{json, Value};
use std::sync::{Arc, Mutex};

use conveyor::engine::error::{ExecutionError, Result};
use conveyor::engine::{GraphBuilder, Task, TaskContext, TaskGraph, TaskImpl};

/// Records its own task id into a shared log when invoked, then publishes a
/// marker value so downstream tasks have something to fetch.
pub struct RecordingTask {
    pub log: Arc<Mutex<Vec<String>>>,
}

#[async_trait]
impl TaskImpl for RecordingTask {
    async fn run(&self, context: TaskContext) -> Result<()> {
        self.log.lock().unwrap().push(context.task_id().to_string());
        context.publish("marker", json!(context.task_id())).await
    }
}

/// Always fails with a fixed error message.
pub struct FailingTask {
    pub message: &'static str,
}

#[async_trait]
impl TaskImpl for FailingTask {
    async fn run(&self, _context: TaskContext) -> Result<()> {
        Err(ExecutionError::TaskExecutionError(self.message.to_string()))
    }
}

/// Publishes a fixed JSON value under a fixed key.
pub struct PublishTask {
    pub key: &'static str,
    pub value: Value,
}

#[async_trait]
impl TaskImpl for PublishTask {
    async fn run(&self, context: TaskContext) -> Result<()> {
        context.publish(self.key, self.value.clone()).await
    }
}

/// Builds graphs of recording tasks from (id, upstream) pairs.
pub struct TestGraphBuilder {
    log: Arc<Mutex<Vec<String>>>,
    builder: GraphBuilder,
}

impl TestGraphBuilder {
    pub fn new() -> Self {
        Self {
            log: Arc::new(Mutex::new(Vec::new())),
            builder: GraphBuilder::new(),
        }
    }

    pub fn add_task(mut self, id: &str, upstream: &[&str]) -> Self {
        let mut task = Task::new(id, Box::new(RecordingTask { log: self.log.clone() }));
        for dep in upstream {
            task = task.depends_on(*dep);
        }
        self.builder.register(task).unwrap();
        self
    }

    pub fn add_failing_task(mut self, id: &str, upstream: &[&str]) -> Self {
        let mut task = Task::new(id, Box::new(FailingTask { message: "injected failure" }));
        for dep in upstream {
            task = task.depends_on(*dep);
        }
        self.builder.register(task).unwrap();
        self
    }

    pub fn build(self) -> (TaskGraph, Arc<Mutex<Vec<String>>>) {
        (self.builder.build().unwrap(), self.log)
    }
}

/// Small deterministic generator for shuffling dependency shapes in tests.
pub struct TestRng(u64);

impl TestRng {
    pub fn new(seed: u64) -> Self {
        Self(seed)
    }

    pub fn next(&mut self) -> u64 {
        // Numerical Recipes LCG constants
        self.0 = self.0.wrapping_mul(6364136223846793005).wrapping_add(1442695040888963407);
        self.0 >> 33
    }

    pub fn below(&mut self, bound: u64) -> u64 {
        self.next() % bound
    }
}
