//! Step executor - runs a single step through the command runner

use crate::{
    command::{CancelFlag, CommandError, CommandRunner, OutputSink},
    core::{Step, StepResult},
};
use chrono::Utc;
use std::time::Duration;
use tracing::{error, info, warn};

/// Synthetic exit code recorded when a step's command cannot be launched
pub const LAUNCH_FAILURE_CODE: i32 = 127;

/// Synthetic exit code recorded when a step exceeds its timeout
pub const TIMEOUT_FAILURE_CODE: i32 = 124;

/// Result of executing one step
#[derive(Debug, Clone)]
pub enum StepExecution {
    /// The step ran (or failed to launch) and produced a result
    Finished(StepResult),
    /// Execution was cancelled before or during the step
    Cancelled,
}

/// Executes a single step
pub struct StepExecutor<R> {
    runner: R,
}

impl<R: CommandRunner> StepExecutor<R> {
    pub fn new(runner: R) -> Self {
        Self { runner }
    }

    /// Execute a step and return its result.
    ///
    /// Never returns an error for a well-formed step: launch failures and
    /// timeouts become failing results with synthetic exit codes, so the
    /// pipeline always gets a `StepResult` to record.
    pub async fn execute(
        &self,
        step: &Step,
        sink: Option<&dyn OutputSink>,
        cancel: &CancelFlag,
    ) -> StepExecution {
        if cancel.is_cancelled() {
            info!("Step {} skipped: run cancelled", step.name);
            return StepExecution::Cancelled;
        }

        info!("Running step: {} ({})", step.name, step.command);
        let started_at = Utc::now();
        let timeout = step.timeout_secs.map(Duration::from_secs);

        let (exit_code, output) = match self.runner.run(&step.command, timeout, sink, cancel).await
        {
            Ok(output) => (output.exit_code, output.output),
            Err(CommandError::Cancelled) => return StepExecution::Cancelled,
            Err(err @ CommandError::Launch { .. }) => {
                error!("Step {} could not start: {}", step.name, err);
                (LAUNCH_FAILURE_CODE, format!("{}\n", err))
            }
            Err(err @ CommandError::Timeout(_)) => {
                error!("Step {}: {}", step.name, err);
                (TIMEOUT_FAILURE_CODE, format!("{}\n", err))
            }
            Err(err) => {
                error!("Step {} failed to run: {}", step.name, err);
                (1, format!("{}\n", err))
            }
        };

        let succeeded = exit_code == 0;
        if succeeded {
            info!("Step {} passed", step.name);
        } else {
            warn!("Step {} failed with exit code {}", step.name, exit_code);
        }

        StepExecution::Finished(StepResult {
            step_name: step.name.clone(),
            command: step.command.to_string(),
            exit_code,
            succeeded,
            output,
            started_at,
            completed_at: Utc::now(),
        })
    }
}
