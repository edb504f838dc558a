// ABOUTME: Main library module for the conveyor pipeline runner
// ABOUTME: Exports the execution engine, the user ETL pipeline, and the CLI

pub mod cli;
pub mod engine;
pub mod pipeline;

// Re-export commonly used types
pub use cli::{App, Args, Config};
pub use engine::{
    Executor, GraphBuilder, RunReport, RunStatus, Task, TaskContext, TaskGraph, TaskImpl,
    TaskStatus,
};

// Error handling
pub type Result<T> = anyhow::Result<T>;

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
