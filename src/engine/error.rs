// ABOUTME: Error types for graph construction and pipeline execution
// ABOUTME: Build-time errors abort graph construction, run-time errors are recorded per task

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ExecutionError {
    #[error("duplicate task id: {task_id}")]
    DuplicateTask { task_id: String },

    #[error("task '{task_id}' depends on unknown task '{dependency}'")]
    UnknownDependency { task_id: String, dependency: String },

    #[error("circular dependency detected involving task '{task_id}'")]
    Cycle { task_id: String },

    #[error("task '{producer_id}' already published key '{key}' this run")]
    DuplicateKey { producer_id: String, key: String },

    #[error("no value published under key '{key}' by task '{producer_id}'")]
    MissingKey { producer_id: String, key: String },

    #[error("task '{task_id}' is missing required parameter '{name}'")]
    MissingParameter { task_id: String, name: String },

    #[error("task execution error: {0}")]
    TaskExecutionError(String),

    #[error("serialization error: {0}")]
    SerdeError(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, ExecutionError>;
