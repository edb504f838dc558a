// ABOUTME: Task abstraction: a named unit of work with declared upstream dependencies
// ABOUTME: Task bodies implement the TaskImpl trait and receive only a TaskContext

use async_trait::async_trait;
use serde_json::Value;
use std::collections::HashMap;

use super::context::TaskContext;
use super::error::Result;

/// A task body. Implementations read what they need from the context
/// (`fetch`, `param`) and hand results forward with `publish`.
#[async_trait]
pub trait TaskImpl: Send + Sync {
    async fn run(&self, context: TaskContext) -> Result<()>;
}

/// A registered unit of work: identifier, upstream task ids, static
/// parameters, and the body to invoke.
pub struct Task {
    pub id: String,
    pub upstream: Vec<String>,
    pub params: HashMap<String, Value>,
    implementation: Box<dyn TaskImpl>,
}

impl Task {
    pub fn new(id: impl Into<String>, implementation: Box<dyn TaskImpl>) -> Self {
        Self {
            id: id.into(),
            upstream: Vec::new(),
            params: HashMap::new(),
            implementation,
        }
    }

    /// Declare an upstream dependency. Order is preserved: `fetch` results
    /// are aligned with the order dependencies were declared.
    pub fn depends_on(mut self, upstream_id: impl Into<String>) -> Self {
        self.upstream.push(upstream_id.into());
        self
    }

    /// Attach a static parameter available to the body via the context.
    pub fn with_param(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.params.insert(name.into(), value.into());
        self
    }

    pub(crate) async fn invoke(&self, context: TaskContext) -> Result<()> {
        self.implementation.run(context).await
    }

    pub fn is_root(&self) -> bool {
        self.upstream.is_empty()
    }
}

impl std::fmt::Debug for Task {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Task")
            .field("id", &self.id)
            .field("upstream", &self.upstream)
            .field("params", &self.params)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct NoopTask;

    #[async_trait]
    impl TaskImpl for NoopTask {
        async fn run(&self, _context: TaskContext) -> Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_task_builder() {
        let task = Task::new("transform", Box::new(NoopTask))
            .depends_on("extract")
            .with_param("mode", "flat");

        assert_eq!(task.id, "transform");
        assert_eq!(task.upstream, vec!["extract"]);
        assert_eq!(task.params.get("mode").unwrap(), "flat");
        assert!(!task.is_root());
    }

    #[test]
    fn test_root_task_has_no_upstream() {
        let task = Task::new("extract", Box::new(NoopTask));
        assert!(task.is_root());
        assert!(task.upstream.is_empty());
    }
}
