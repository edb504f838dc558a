// ABOUTME: Command implementations for the conveyor CLI
// ABOUTME: Handles execution of the run and plan commands

use anyhow::Result;
use std::path::PathBuf;
use tracing::info;

use super::config::Config;
use crate::engine::{Executor, RunStatus, TaskStatus};
use crate::pipeline;

/// Build and execute the user pipeline, printing a per-task report.
pub async fn run_pipeline(
    source: Option<String>,
    dest: Option<PathBuf>,
    report_path: Option<PathBuf>,
    config: &Config,
) -> Result<()> {
    let source = source.unwrap_or_else(|| config.source_url.clone());
    let dest = dest.unwrap_or_else(|| config.dest_path.clone());
    let dest = dest.to_string_lossy().into_owned();

    info!("Running user pipeline: {} -> {}", source, dest);

    let graph = pipeline::users_graph(&source, &dest)
        .map_err(|e| anyhow::anyhow!("Failed to build pipeline graph: {}", e))?;

    let executor = Executor::new();
    let report = executor.run(&graph).await;

    if let Some(path) = report_path {
        let json = serde_json::to_string_pretty(&report)?;
        std::fs::write(&path, json)?;
        info!("Run report written to {}", path.display());
    }

    println!("Run {} completed with status: {}", report.run_id, report.status);
    for outcome in &report.outcomes {
        match outcome.status {
            TaskStatus::Failed => println!(
                "  Task '{}': {} ({})",
                outcome.task_id,
                outcome.status,
                outcome.error.as_deref().unwrap_or("unknown error")
            ),
            TaskStatus::Skipped => println!(
                "  Task '{}': {} ({})",
                outcome.task_id,
                outcome.status,
                outcome.error.as_deref().unwrap_or("upstream did not succeed")
            ),
            _ => println!("  Task '{}': {}", outcome.task_id, outcome.status),
        }
    }

    // Non-zero exit code iff at least one task failed
    match report.status {
        RunStatus::Failed => Err(anyhow::anyhow!("pipeline run failed")),
        _ => Ok(()),
    }
}

/// Validate the pipeline graph and print the execution order without running.
pub async fn plan_pipeline(
    source: Option<String>,
    dest: Option<PathBuf>,
    config: &Config,
) -> Result<()> {
    let source = source.unwrap_or_else(|| config.source_url.clone());
    let dest = dest.unwrap_or_else(|| config.dest_path.clone());

    let graph = pipeline::users_graph(&source, &dest.to_string_lossy())
        .map_err(|e| anyhow::anyhow!("Pipeline validation failed: {}", e))?;

    println!("✓ Pipeline graph is valid ({} tasks)", graph.len());
    for (position, task) in graph.tasks().enumerate() {
        if task.is_root() {
            println!("  {}. {}", position + 1, task.id);
        } else {
            println!("  {}. {} (after {})", position + 1, task.id, task.upstream.join(", "));
        }
    }

    Ok(())
}
