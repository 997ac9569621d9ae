//! Main execution engine - drives the fail-fast check loop

use crate::{
    command::{CancelFlag, CommandRunner, OutputSink, OutputStream},
    core::{Pipeline, PipelineResult, RunStatus},
    execution::{StepExecution, StepExecutor},
};
use std::sync::{Arc, Mutex};
use thiserror::Error;
use tracing::{info, warn};
use uuid::Uuid;

/// Errors from invoking the engine with a bad pipeline
#[derive(Debug, Error)]
pub enum EngineError {
    /// An empty step list is a configuration error, not a trivial success
    #[error("pipeline has no steps")]
    EmptyPipeline,
}

/// Events that can occur during a pipeline run
#[derive(Debug, Clone)]
pub enum ExecutionEvent {
    PipelineStarted {
        execution_id: Uuid,
        pipeline_name: String,
        total_steps: usize,
    },
    StepStarted {
        name: String,
        index: usize,
        total_steps: usize,
    },
    /// One line of a running step's output, as it arrives
    StepOutput {
        name: String,
        stream: OutputStream,
        line: String,
    },
    StepCompleted {
        name: String,
    },
    StepFailed {
        name: String,
        exit_code: i32,
    },
    PipelineCompleted {
        execution_id: Uuid,
        status: RunStatus,
    },
}

/// Type for event handlers
pub type EventHandler = Arc<dyn Fn(ExecutionEvent) + Send + Sync>;

/// Sequential fail-fast pipeline engine.
///
/// Runs steps in declaration order, one at a time, and stops at the first
/// failing step unless that step is marked `continue_on_failure`.
pub struct ExecutionEngine<R> {
    executor: StepExecutor<R>,
    event_handlers: Mutex<Vec<EventHandler>>,
    cancel: CancelFlag,
}

impl<R: CommandRunner> ExecutionEngine<R> {
    pub fn new(runner: R) -> Self {
        Self {
            executor: StepExecutor::new(runner),
            event_handlers: Mutex::new(Vec::new()),
            cancel: CancelFlag::new(),
        }
    }

    /// Handle to the cancellation flag shared with running steps
    pub fn cancel_flag(&self) -> CancelFlag {
        self.cancel.clone()
    }

    /// Add an event handler
    pub fn add_event_handler<F>(&self, handler: F)
    where
        F: Fn(ExecutionEvent) + Send + Sync + 'static,
    {
        self.event_handlers.lock().unwrap().push(Arc::new(handler));
    }

    /// Emit an event to all handlers
    fn emit(&self, event: ExecutionEvent) {
        let handlers = self.event_handlers.lock().unwrap();
        for handler in handlers.iter() {
            handler(event.clone());
        }
    }

    /// Run the whole pipeline and return its aggregate result.
    ///
    /// Always yields a `PipelineResult` for a non-empty pipeline; individual
    /// step problems (non-zero exits, launch failures, timeouts) are recorded
    /// in the result rather than surfaced as errors.
    pub async fn execute(&self, pipeline: &Pipeline) -> Result<PipelineResult, EngineError> {
        if pipeline.is_empty() {
            return Err(EngineError::EmptyPipeline);
        }

        let mut run = PipelineResult::start(&pipeline.name);
        let total_steps = pipeline.len();

        info!(
            "Starting pipeline: {} ({} steps, run {})",
            pipeline.name, total_steps, run.execution_id
        );
        self.emit(ExecutionEvent::PipelineStarted {
            execution_id: run.execution_id,
            pipeline_name: pipeline.name.clone(),
            total_steps,
        });

        for (index, step) in pipeline.steps.iter().enumerate() {
            if self.cancel.is_cancelled() {
                warn!("Run cancelled before step: {}", step.name);
                run.cancel();
                self.emit(ExecutionEvent::PipelineCompleted {
                    execution_id: run.execution_id,
                    status: run.status,
                });
                return Ok(run);
            }

            self.emit(ExecutionEvent::StepStarted {
                name: step.name.clone(),
                index,
                total_steps,
            });

            let sink = EngineSink {
                engine: self,
                step_name: step.name.clone(),
            };

            match self.executor.execute(step, Some(&sink), &self.cancel).await {
                StepExecution::Cancelled => {
                    warn!("Run cancelled during step: {}", step.name);
                    run.cancel();
                    self.emit(ExecutionEvent::PipelineCompleted {
                        execution_id: run.execution_id,
                        status: run.status,
                    });
                    return Ok(run);
                }
                StepExecution::Finished(result) => {
                    let failed = !result.succeeded;

                    if failed {
                        self.emit(ExecutionEvent::StepFailed {
                            name: step.name.clone(),
                            exit_code: result.exit_code,
                        });
                    } else {
                        self.emit(ExecutionEvent::StepCompleted {
                            name: step.name.clone(),
                        });
                    }

                    run.record(result);

                    if failed && !step.continue_on_failure {
                        // Fail-fast: remaining steps are not executed
                        info!(
                            "Stopping after failed step: {} ({} of {} steps ran)",
                            step.name,
                            index + 1,
                            total_steps
                        );
                        break;
                    }
                }
            }
        }

        run.finish();
        info!("Pipeline {} finished: {:?}", pipeline.name, run.status);
        self.emit(ExecutionEvent::PipelineCompleted {
            execution_id: run.execution_id,
            status: run.status,
        });

        Ok(run)
    }
}

/// Bridges a running step's output lines into engine events
struct EngineSink<'a, R> {
    engine: &'a ExecutionEngine<R>,
    step_name: String,
}

impl<R: CommandRunner> OutputSink for EngineSink<'_, R> {
    fn on_line(&self, stream: OutputStream, line: &str) {
        self.engine.emit(ExecutionEvent::StepOutput {
            name: self.step_name.clone(),
            stream,
            line: line.to_string(),
        });
    }
}
