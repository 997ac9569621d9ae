//! Pipeline execution

pub mod engine;
pub mod executor;

pub use engine::{EngineError, EventHandler, ExecutionEngine, ExecutionEvent};
pub use executor::{StepExecution, StepExecutor, LAUNCH_FAILURE_CODE, TIMEOUT_FAILURE_CODE};
