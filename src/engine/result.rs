// ABOUTME: Per-task outcome tracking and whole-run report aggregation
// ABOUTME: A run is failed if and only if at least one task ended Failed

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::time::Duration;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum TaskStatus {
    Pending,
    Running,
    Success,
    Failed,
    Skipped,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum RunStatus {
    Running,
    Success,
    Failed,
}

/// Terminal record for one task in one run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaskOutcome {
    pub task_id: String,
    pub status: TaskStatus,
    pub published: Vec<String>,
    pub error: Option<String>,
    pub start_time: Option<DateTime<Utc>>,
    pub end_time: Option<DateTime<Utc>>,
}

/// Summary of one executor invocation: every task's terminal state plus,
/// for failures, the captured error. Retained for the lifetime of the run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunReport {
    pub run_id: String,
    pub status: RunStatus,
    pub start_time: DateTime<Utc>,
    pub end_time: Option<DateTime<Utc>>,
    pub duration: Option<Duration>,
    pub outcomes: Vec<TaskOutcome>,
}

impl TaskOutcome {
    pub fn new(task_id: String) -> Self {
        Self {
            task_id,
            status: TaskStatus::Pending,
            published: Vec::new(),
            error: None,
            start_time: None,
            end_time: None,
        }
    }

    pub fn mark_started(&mut self) {
        self.status = TaskStatus::Running;
        self.start_time = Some(Utc::now());
    }

    pub fn mark_success(&mut self, published: Vec<String>) {
        self.status = TaskStatus::Success;
        self.published = published;
        self.end_time = Some(Utc::now());
    }

    pub fn mark_failed(&mut self, error: String) {
        self.status = TaskStatus::Failed;
        self.error = Some(error);
        self.end_time = Some(Utc::now());
    }

    pub fn mark_skipped(&mut self, reason: String) {
        self.status = TaskStatus::Skipped;
        self.error = Some(reason);
        self.end_time = Some(Utc::now());
    }

    pub fn is_terminal(&self) -> bool {
        matches!(
            self.status,
            TaskStatus::Success | TaskStatus::Failed | TaskStatus::Skipped
        )
    }
}

impl RunReport {
    pub fn new(run_id: String) -> Self {
        Self {
            run_id,
            status: RunStatus::Running,
            start_time: Utc::now(),
            end_time: None,
            duration: None,
            outcomes: Vec::new(),
        }
    }

    pub fn record(&mut self, outcome: TaskOutcome) {
        self.outcomes.push(outcome);
    }

    pub fn outcome(&self, task_id: &str) -> Option<&TaskOutcome> {
        self.outcomes.iter().find(|o| o.task_id == task_id)
    }

    pub fn status_of(&self, task_id: &str) -> Option<TaskStatus> {
        self.outcome(task_id).map(|o| o.status)
    }

    pub fn mark_completed(&mut self) {
        let now = Utc::now();
        self.end_time = Some(now);
        self.duration = Some((now - self.start_time).to_std().unwrap_or(Duration::ZERO));
        self.status = if self.has_failures() {
            RunStatus::Failed
        } else {
            RunStatus::Success
        };
    }

    pub fn has_failures(&self) -> bool {
        self.outcomes.iter().any(|o| o.status == TaskStatus::Failed)
    }

    pub fn succeeded(&self) -> bool {
        self.status == RunStatus::Success
    }

    fn count(&self, status: TaskStatus) -> usize {
        self.outcomes.iter().filter(|o| o.status == status).count()
    }

    pub fn successful_tasks(&self) -> usize {
        self.count(TaskStatus::Success)
    }

    pub fn failed_tasks(&self) -> usize {
        self.count(TaskStatus::Failed)
    }

    pub fn skipped_tasks(&self) -> usize {
        self.count(TaskStatus::Skipped)
    }
}

impl std::fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TaskStatus::Pending => write!(f, "pending"),
            TaskStatus::Running => write!(f, "running"),
            TaskStatus::Success => write!(f, "success"),
            TaskStatus::Failed => write!(f, "failed"),
            TaskStatus::Skipped => write!(f, "skipped"),
        }
    }
}

impl std::fmt::Display for RunStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RunStatus::Running => write!(f, "running"),
            RunStatus::Success => write!(f, "success"),
            RunStatus::Failed => write!(f, "failed"),
        }
    }
}
