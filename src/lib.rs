//! run-checks - a fail-fast pre-merge check pipeline runner

pub mod cli;
pub mod command;
pub mod core;
pub mod execution;

// Re-export commonly used types
pub use command::{
    CancelFlag, CommandError, CommandOutput, CommandRunner, OutputSink, OutputStream,
    SubprocessRunner,
};
pub use core::{CommandSpec, Pipeline, PipelineResult, RunStatus, Step, StepResult};
pub use execution::{EngineError, ExecutionEngine, ExecutionEvent, StepExecution, StepExecutor};
