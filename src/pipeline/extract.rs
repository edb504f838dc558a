// ABOUTME: Extract stage: fetches the user payload over HTTP
// ABOUTME: Publishes the parsed JSON body under the extracted_users key

use async_trait::async_trait;
use serde_json::Value;
use tracing::{debug, info};

use super::EXTRACTED_USERS_KEY;
use crate::engine::error::{ExecutionError, Result};
use crate::engine::{TaskContext, TaskImpl};

/// Fetches JSON from the `url` parameter and publishes the parsed body as-is.
/// Shape validation is deferred to the transform stage.
pub struct ExtractUsers;

#[async_trait]
impl TaskImpl for ExtractUsers {
    async fn run(&self, context: TaskContext) -> Result<()> {
        let url = context.param_str("url")?;
        info!("Fetching users from {}", url);

        let payload: Value = reqwest::get(url)
            .await
            .and_then(reqwest::Response::error_for_status)
            .map_err(|e| ExecutionError::TaskExecutionError(format!("GET {url} failed: {e}")))?
            .json()
            .await
            .map_err(|e| {
                ExecutionError::TaskExecutionError(format!("invalid JSON from {url}: {e}"))
            })?;

        debug!(
            "Fetched {} records",
            payload.as_array().map(Vec::len).unwrap_or(0)
        );
        context.publish(EXTRACTED_USERS_KEY, payload).await
    }
}
