// ABOUTME: Transform stage: flattens raw user records into output rows
// ABOUTME: Reads extracted_users from upstream and publishes transformed_users

use async_trait::async_trait;
use tracing::{debug, info};

use super::records::{User, UserRow};
use super::{EXTRACTED_USERS_KEY, TRANSFORMED_USERS_KEY};
use crate::engine::error::{ExecutionError, Result};
use crate::engine::{TaskContext, TaskImpl};

/// Deserializes the extracted payload into typed records, flattens each one
/// (nested address and company collapse into single columns), and publishes
/// the rows for the load stage.
pub struct TransformUsers;

#[async_trait]
impl TaskImpl for TransformUsers {
    async fn run(&self, context: TaskContext) -> Result<()> {
        let mut values = context.fetch_upstream(EXTRACTED_USERS_KEY).await?;
        let payload = values.pop().ok_or_else(|| {
            ExecutionError::TaskExecutionError(
                "transform requires exactly one upstream producer".to_string(),
            )
        })?;

        let users: Vec<User> = serde_json::from_value(payload)?;
        info!("Transforming {} user records", users.len());

        let rows: Vec<UserRow> = users.into_iter().map(UserRow::from).collect();
        debug!("Flattened into {} rows", rows.len());

        context
            .publish(TRANSFORMED_USERS_KEY, serde_json::to_value(rows)?)
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::{Executor, GraphBuilder, Task, TaskStatus};
    use serde_json::{json, Value};

    struct FixedExtract {
        payload: Value,
    }

    #[async_trait]
    impl TaskImpl for FixedExtract {
        async fn run(&self, context: TaskContext) -> Result<()> {
            context
                .publish(EXTRACTED_USERS_KEY, self.payload.clone())
                .await
        }
    }

    struct CaptureRows {
        seen: std::sync::Arc<std::sync::Mutex<Vec<Value>>>,
    }

    #[async_trait]
    impl TaskImpl for CaptureRows {
        async fn run(&self, context: TaskContext) -> Result<()> {
            let mut values = context.fetch_upstream(TRANSFORMED_USERS_KEY).await?;
            self.seen.lock().unwrap().push(values.pop().unwrap());
            Ok(())
        }
    }

    #[tokio::test]
    async fn test_transform_publishes_flattened_rows() {
        let payload = json!([{
            "id": 1,
            "name": "Leanne Graham",
            "username": "Bret",
            "email": "Sincere@april.biz",
            "address": {"street": "Kulas Light", "suite": "Apt. 556", "city": "Gwenborough"},
            "phone": "1-770-736-8031",
            "company": {"name": "Romaguera-Crona"}
        }]);

        let seen = std::sync::Arc::new(std::sync::Mutex::new(Vec::new()));
        let mut builder = GraphBuilder::new();
        builder
            .register(Task::new("extract_users", Box::new(FixedExtract { payload })))
            .unwrap();
        builder
            .register(Task::new("transform_users", Box::new(TransformUsers)).depends_on("extract_users"))
            .unwrap();
        builder
            .register(
                Task::new("capture", Box::new(CaptureRows { seen: seen.clone() }))
                    .depends_on("transform_users"),
            )
            .unwrap();
        let graph = builder.build().unwrap();

        let report = Executor::new().run(&graph).await;
        assert!(report.succeeded());

        let captured = seen.lock().unwrap();
        assert_eq!(
            captured[0],
            json!([{
                "ID": 1,
                "Name": "Leanne Graham",
                "Username": "Bret",
                "Email": "Sincere@april.biz",
                "Address": "Kulas Light, Apt. 556, Gwenborough",
                "PhoneNumber": "1-770-736-8031",
                "Company": "Romaguera-Crona"
            }])
        );
    }

    #[tokio::test]
    async fn test_transform_fails_on_malformed_payload() {
        let mut builder = GraphBuilder::new();
        builder
            .register(Task::new(
                "extract_users",
                Box::new(FixedExtract {
                    payload: json!([{"id": "not a number"}]),
                }),
            ))
            .unwrap();
        builder
            .register(Task::new("transform_users", Box::new(TransformUsers)).depends_on("extract_users"))
            .unwrap();
        let graph = builder.build().unwrap();

        let report = Executor::new().run(&graph).await;
        assert_eq!(report.status_of("transform_users"), Some(TaskStatus::Failed));
    }
}
