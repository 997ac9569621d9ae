//! CLI output formatting

use crate::{
    core::{PipelineResult, RunStatus},
    execution::ExecutionEvent,
};
use console::Emoji;

// Re-export style
pub use console::style;

// Emojis for output
pub static CHECK: Emoji<'_, '_> = Emoji("✅ ", "✓ ");
pub static CROSS: Emoji<'_, '_> = Emoji("❌ ", "✗ ");
pub static SPINNER: Emoji<'_, '_> = Emoji("⏳ ", "~ ");
pub static INFO: Emoji<'_, '_> = Emoji("ℹ️  ", "i ");
pub static WARN: Emoji<'_, '_> = Emoji("⚠️  ", "! ");
pub static ROCKET: Emoji<'_, '_> = Emoji("🚀 ", "> ");

/// Format a run status for display
pub fn format_status(status: RunStatus) -> String {
    match status {
        RunStatus::Pending => style("PENDING").dim().to_string(),
        RunStatus::Running => style("RUNNING").yellow().to_string(),
        RunStatus::Completed => style("PASSED").green().to_string(),
        RunStatus::Failed => style("FAILED").red().to_string(),
        RunStatus::Cancelled => style("CANCELLED").yellow().to_string(),
    }
}

/// Format an execution event for display.
///
/// `StepOutput` events are not handled here: the raw line is echoed through
/// directly so tool output reaches the terminal unchanged.
pub fn format_execution_event(event: &ExecutionEvent) -> String {
    match event {
        ExecutionEvent::PipelineStarted {
            execution_id,
            pipeline_name,
            total_steps,
        } => format!(
            "{} {} ({} steps, run {})",
            ROCKET,
            style(pipeline_name).bold(),
            total_steps,
            style(&execution_id.to_string()[..8]).dim()
        ),
        ExecutionEvent::StepStarted {
            name,
            index,
            total_steps,
        } => format!(
            "{} [{}/{}] {}",
            SPINNER,
            index + 1,
            total_steps,
            style(name).cyan()
        ),
        ExecutionEvent::StepOutput { line, .. } => line.clone(),
        ExecutionEvent::StepCompleted { name } => {
            format!("{} {}", CHECK, style(name).green())
        }
        ExecutionEvent::StepFailed { name, exit_code } => format!(
            "{} {} (exit code {})",
            CROSS,
            style(name).red(),
            style(exit_code).bold()
        ),
        ExecutionEvent::PipelineCompleted {
            execution_id,
            status,
        } => format!(
            "{} Run {} {}",
            INFO,
            style(&execution_id.to_string()[..8]).dim(),
            format_status(*status)
        ),
    }
}

/// One-line summary of a finished run, naming the failing step if any
pub fn format_run_summary(result: &PipelineResult) -> String {
    match result.status {
        RunStatus::Failed => {
            // failed_at is set whenever status is Failed
            let failed = result.failed_step();
            let name = failed.map(|r| r.step_name.as_str()).unwrap_or("unknown");
            let code = failed.map(|r| r.exit_code).unwrap_or(1);
            format!(
                "{} {} failed at step {} (exit code {})",
                CROSS,
                style(&result.pipeline_name).bold(),
                style(name).red(),
                code
            )
        }
        RunStatus::Cancelled => format!(
            "{} {} cancelled after {} of its steps",
            WARN,
            style(&result.pipeline_name).bold(),
            result.results.len()
        ),
        _ => format!(
            "{} {} {}",
            CHECK,
            style(&result.pipeline_name).bold(),
            style("passed").green()
        ),
    }
}
