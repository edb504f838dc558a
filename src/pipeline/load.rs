// ABOUTME: Load stage: writes transformed rows as a CSV file
// ABOUTME: Header row plus one row per record, no index column, minimal quoting

use async_trait::async_trait;
use std::borrow::Cow;
use tokio::fs;
use tracing::{debug, info};

use super::records::UserRow;
use super::TRANSFORMED_USERS_KEY;
use crate::engine::error::{ExecutionError, Result};
use crate::engine::{TaskContext, TaskImpl};

pub const CSV_HEADER: &str = "ID,Name,Username,Email,Address,PhoneNumber,Company";

/// Writes the transformed rows to the `path` parameter as CSV.
pub struct LoadUsers;

#[async_trait]
impl TaskImpl for LoadUsers {
    async fn run(&self, context: TaskContext) -> Result<()> {
        let path = context.param_str("path")?;

        let mut values = context.fetch_upstream(TRANSFORMED_USERS_KEY).await?;
        let payload = values.pop().ok_or_else(|| {
            ExecutionError::TaskExecutionError(
                "load requires exactly one upstream producer".to_string(),
            )
        })?;
        let rows: Vec<UserRow> = serde_json::from_value(payload)?;

        info!("Writing {} rows to {}", rows.len(), path);
        let content = render_csv(&rows);

        if let Some(parent) = std::path::Path::new(path).parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).await?;
            }
        }
        fs::write(path, content).await?;
        debug!("CSV written to {}", path);
        Ok(())
    }
}

/// Render rows with the fixed header order. Fields are quoted only when they
/// contain a delimiter, quote, or line break; embedded quotes are doubled.
pub fn render_csv(rows: &[UserRow]) -> String {
    let mut out = String::from(CSV_HEADER);
    out.push('\n');
    for row in rows {
        let fields = [
            Cow::Owned(row.id.to_string()),
            csv_field(&row.name),
            csv_field(&row.username),
            csv_field(&row.email),
            csv_field(&row.address),
            csv_field(&row.phone_number),
            csv_field(&row.company),
        ];
        out.push_str(&fields.join(","));
        out.push('\n');
    }
    out
}

fn csv_field(value: &str) -> Cow<'_, str> {
    if value.contains(',') || value.contains('"') || value.contains('\n') {
        Cow::Owned(format!("\"{}\"", value.replace('"', "\"\"")))
    } else {
        Cow::Borrowed(value)
    }
}
