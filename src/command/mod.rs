//! External command execution

pub mod outcome;
pub mod subprocess;

use crate::core::CommandSpec;
use async_trait::async_trait;
use std::time::Duration;

pub use outcome::{CancelFlag, CommandError, CommandOutput, OutputSink, OutputStream};
pub use subprocess::SubprocessRunner;

/// Trait for command execution - allows for mock runners in tests
#[async_trait]
pub trait CommandRunner: Send + Sync {
    /// Run a command to completion, streaming its output into the sink.
    ///
    /// Blocks until the process exits, the optional timeout elapses, or the
    /// cancel flag is raised.
    async fn run(
        &self,
        command: &CommandSpec,
        timeout: Option<Duration>,
        sink: Option<&dyn OutputSink>,
        cancel: &CancelFlag,
    ) -> Result<CommandOutput, CommandError>;
}
