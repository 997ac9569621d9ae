//! Step domain model

use crate::core::config::StepConfig;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Invocation descriptor for an external tool
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommandSpec {
    /// Executable name or path
    pub program: String,

    /// Arguments passed to the executable
    pub args: Vec<String>,
}

impl CommandSpec {
    /// Create a command spec from a program and its arguments
    pub fn new(program: impl Into<String>, args: Vec<String>) -> Self {
        Self {
            program: program.into(),
            args,
        }
    }

    /// Build a command spec from an argv-style list (program first)
    pub fn from_argv(argv: &[String]) -> Option<Self> {
        let (program, args) = argv.split_first()?;
        if program.is_empty() {
            return None;
        }
        Some(Self {
            program: program.clone(),
            args: args.to_vec(),
        })
    }
}

impl fmt::Display for CommandSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.program)?;
        for arg in &self.args {
            write!(f, " {}", arg)?;
        }
        Ok(())
    }
}

/// A single named verification step in a pipeline
#[derive(Debug, Clone)]
pub struct Step {
    /// Unique step name, used for reporting
    pub name: String,

    /// The external command this step runs
    pub command: CommandSpec,

    /// Keep running later steps even if this one fails
    pub continue_on_failure: bool,

    /// Timeout for this step in seconds (None = no timeout)
    pub timeout_secs: Option<u64>,
}

impl Step {
    /// Create a step from a step config
    pub fn from_config(config: &StepConfig, defaults: &StepDefaults) -> Self {
        // Validation guarantees a non-empty command list
        let command = CommandSpec::from_argv(&config.command)
            .unwrap_or_else(|| CommandSpec::new(String::new(), Vec::new()));

        Step {
            name: config.name.clone(),
            command,
            continue_on_failure: config.continue_on_failure,
            timeout_secs: config.timeout_secs.or(defaults.timeout_secs),
        }
    }
}

/// Pipeline-level defaults applied to steps that don't override them
#[derive(Debug, Clone, Default)]
pub struct StepDefaults {
    /// Default timeout in seconds (None preserves the no-timeout behavior)
    pub timeout_secs: Option<u64>,
}
