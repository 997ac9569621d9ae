//! CLI command definitions

use crate::core::config::CoveragePolicy;
use clap::Args;

/// Run a check pipeline
#[derive(Debug, Args, Clone, Default)]
pub struct RunCommand {
    /// Path to a pipeline YAML file (defaults to the built-in check list)
    #[arg(short, long)]
    pub file: Option<String>,

    /// When to run the coverage-report step relative to test failures
    #[arg(long, value_enum, default_value_t = CoveragePolicyArg::OnSuccess)]
    pub coverage_policy: CoveragePolicyArg,

    /// Print the full run result as JSON at the end
    #[arg(long)]
    pub json: bool,
}

/// Validate a pipeline configuration
#[derive(Debug, Args, Clone)]
pub struct ValidateCommand {
    /// Path to a pipeline YAML file
    #[arg(short, long)]
    pub file: String,

    /// Output in JSON format
    #[arg(long)]
    pub json: bool,
}

/// List the steps of a pipeline
#[derive(Debug, Args, Clone)]
pub struct ListCommand {
    /// Path to a pipeline YAML file (defaults to the built-in check list)
    #[arg(short, long)]
    pub file: Option<String>,

    /// Output in JSON format
    #[arg(long)]
    pub json: bool,
}

/// Coverage policy argument
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum CoveragePolicyArg {
    /// Coverage report only runs when the test step passed
    #[default]
    OnSuccess,
    /// Coverage report runs even when the test step failed
    Always,
}

impl From<CoveragePolicyArg> for CoveragePolicy {
    fn from(arg: CoveragePolicyArg) -> Self {
        match arg {
            CoveragePolicyArg::OnSuccess => CoveragePolicy::OnSuccess,
            CoveragePolicyArg::Always => CoveragePolicy::Always,
        }
    }
}
