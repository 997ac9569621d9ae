//! Run outcome models

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Exit code reported by the process when a run is cancelled (SIGINT convention).
pub const CANCELLED_EXIT_CODE: i32 = 130;

/// Overall status of a pipeline run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RunStatus {
    /// Run has not started
    Pending,
    /// Run is in progress
    Running,
    /// Every executed step succeeded and none were skipped
    Completed,
    /// At least one step failed
    Failed,
    /// Run was cancelled before all steps finished
    Cancelled,
}

/// Outcome of running a single step
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StepResult {
    /// Name of the step this result belongs to
    pub step_name: String,

    /// The command line that was invoked
    pub command: String,

    /// Exit code of the subprocess (synthetic for launch failures and timeouts)
    pub exit_code: i32,

    /// Whether the step succeeded (`exit_code == 0`)
    pub succeeded: bool,

    /// Captured stdout/stderr text
    pub output: String,

    /// When the step started
    pub started_at: DateTime<Utc>,

    /// When the step finished
    pub completed_at: DateTime<Utc>,
}

/// Aggregate outcome of a pipeline run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelineResult {
    /// Unique run ID
    pub execution_id: Uuid,

    /// Name of the pipeline that ran
    pub pipeline_name: String,

    /// Final run status
    pub status: RunStatus,

    /// Results of executed steps, in execution order. Shorter than the step
    /// list when a fail-fast stop or cancellation cut the run short.
    pub results: Vec<StepResult>,

    /// Index of the first failing step among executed results, if any
    pub failed_at: Option<usize>,

    /// When the run started
    pub started_at: DateTime<Utc>,

    /// When the run finished
    pub completed_at: Option<DateTime<Utc>>,
}

impl PipelineResult {
    /// Start a fresh run record for a pipeline
    pub fn start(pipeline_name: &str) -> Self {
        Self {
            execution_id: Uuid::new_v4(),
            pipeline_name: pipeline_name.to_string(),
            status: RunStatus::Running,
            results: Vec::new(),
            failed_at: None,
            started_at: Utc::now(),
            completed_at: None,
        }
    }

    /// Whether every executed step succeeded and the run was not cut short
    pub fn succeeded(&self) -> bool {
        self.status == RunStatus::Completed
    }

    /// Record the result of an executed step, tracking the first failure
    pub fn record(&mut self, result: StepResult) {
        if !result.succeeded && self.failed_at.is_none() {
            self.failed_at = Some(self.results.len());
        }
        self.results.push(result);
    }

    /// Mark the run as finished, deriving the final status from `failed_at`
    pub fn finish(&mut self) {
        self.status = if self.failed_at.is_none() {
            RunStatus::Completed
        } else {
            RunStatus::Failed
        };
        self.completed_at = Some(Utc::now());
    }

    /// Mark the run as cancelled
    pub fn cancel(&mut self) {
        self.status = RunStatus::Cancelled;
        self.completed_at = Some(Utc::now());
    }

    /// The first failing step's result, if any
    pub fn failed_step(&self) -> Option<&StepResult> {
        self.failed_at.and_then(|i| self.results.get(i))
    }

    /// Process exit status for this run.
    ///
    /// 0 on success, the first failing step's exit code when non-zero
    /// (falling back to 1 so a failed run never exits 0), and 130 when
    /// the run was cancelled.
    pub fn exit_code(&self) -> i32 {
        match self.status {
            RunStatus::Completed => 0,
            RunStatus::Cancelled => CANCELLED_EXIT_CODE,
            _ => self
                .failed_step()
                .map(|r| r.exit_code)
                .filter(|code| *code != 0)
                .unwrap_or(1),
        }
    }
}
