//! Command execution outcome types

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use thiserror::Error;

/// Error types for command execution
#[derive(Debug, Error)]
pub enum CommandError {
    /// The command could not be started at all
    #[error("failed to launch '{program}': {reason}")]
    Launch { program: String, reason: String },

    /// The command exceeded its time bound
    #[error("timed out after {0} seconds")]
    Timeout(u64),

    /// Execution was cancelled from outside
    #[error("cancelled")]
    Cancelled,

    /// Anything else that went wrong around the subprocess
    #[error("internal error: {0}")]
    Internal(String),
}

/// Captured result of a command that ran to completion
#[derive(Debug, Clone)]
pub struct CommandOutput {
    /// Exit code of the process (-1 if terminated by a signal)
    pub exit_code: i32,

    /// Combined captured stdout and stderr text
    pub output: String,
}

/// Which stream a captured line came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputStream {
    Stdout,
    Stderr,
}

/// Receiver for output lines as a command produces them
pub trait OutputSink: Send + Sync {
    /// Called once per line, in arrival order per stream
    fn on_line(&self, stream: OutputStream, line: &str);
}

/// Shared cancellation signal for a run.
///
/// Cloning yields a handle to the same flag; once set it stays set for the
/// lifetime of the run.
#[derive(Debug, Clone, Default)]
pub struct CancelFlag(Arc<AtomicBool>);

impl CancelFlag {
    /// Create a fresh, unset flag
    pub fn new() -> Self {
        Self::default()
    }

    /// Request cancellation
    pub fn cancel(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    /// Whether cancellation has been requested
    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}
