// ABOUTME: Task-graph execution engine with inter-task data exchange
// ABOUTME: Registration, validation, ordering, sequential execution, and skip propagation

pub mod context;
pub mod error;
pub mod exchange;
pub mod executor;
pub mod graph;
pub mod result;
pub mod task;

pub use context::TaskContext;
pub use error::{ExecutionError, Result};
pub use exchange::Exchange;
pub use executor::Executor;
pub use graph::{GraphBuilder, TaskGraph};
pub use result::{RunReport, RunStatus, TaskOutcome, TaskStatus};
pub use task::{Task, TaskImpl};
