// ABOUTME: The user ETL pipeline: extract, transform, load over the task-graph engine
// ABOUTME: Stage bodies are collaborators; the graph wiring lives in users_graph

pub mod extract;
pub mod load;
pub mod records;
pub mod transform;

pub use extract::ExtractUsers;
pub use load::LoadUsers;
pub use records::{Address, Company, User, UserRow};
pub use transform::TransformUsers;

use crate::engine::error::Result;
use crate::engine::{GraphBuilder, Task, TaskGraph};

pub const EXTRACT_TASK: &str = "extract_users";
pub const TRANSFORM_TASK: &str = "transform_users";
pub const LOAD_TASK: &str = "load_users";

/// Key under which the extract stage publishes the raw payload.
pub const EXTRACTED_USERS_KEY: &str = "extracted_users";
/// Key under which the transform stage publishes flattened rows.
pub const TRANSFORMED_USERS_KEY: &str = "transformed_users";

/// Build the three-stage user pipeline: extract -> transform -> load.
pub fn users_graph(url: &str, path: &str) -> Result<TaskGraph> {
    let mut builder = GraphBuilder::new();

    builder.register(Task::new(EXTRACT_TASK, Box::new(ExtractUsers)).with_param("url", url))?;
    builder.register(Task::new(TRANSFORM_TASK, Box::new(TransformUsers)).depends_on(EXTRACT_TASK))?;
    builder.register(
        Task::new(LOAD_TASK, Box::new(LoadUsers))
            .depends_on(TRANSFORM_TASK)
            .with_param("path", path),
    )?;

    builder.build()
}
