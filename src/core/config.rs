//! Pipeline configuration from YAML

use crate::core::Pipeline;
use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Policy for running the coverage-report step when tests fail.
///
/// The built-in pipeline gates coverage reporting behind the test step; this
/// makes that ambiguity an explicit choice instead of an accident of ordering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CoveragePolicy {
    /// Only generate the coverage report when the test step passed
    OnSuccess,
    /// Generate the coverage report even when the test step failed
    Always,
}

impl Default for CoveragePolicy {
    fn default() -> Self {
        CoveragePolicy::OnSuccess
    }
}

/// Top-level pipeline configuration loaded from YAML
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelineConfig {
    /// Pipeline name
    pub name: String,

    /// Default timeout for steps in seconds (None = no timeout)
    #[serde(default)]
    pub default_timeout_secs: Option<u64>,

    /// Pipeline steps, executed in declaration order
    pub steps: Vec<StepConfig>,
}

/// Step configuration as defined in YAML
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StepConfig {
    /// Unique step name
    pub name: String,

    /// Optional step description
    #[serde(default)]
    pub description: Option<String>,

    /// Command to run, argv style (program first)
    pub command: Vec<String>,

    /// Keep running later steps even if this one fails
    #[serde(default)]
    pub continue_on_failure: bool,

    /// Timeout for this step (overrides the pipeline default)
    #[serde(default)]
    pub timeout_secs: Option<u64>,
}

impl PipelineConfig {
    /// Load pipeline configuration from a YAML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    /// Parse pipeline configuration from a YAML string
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        let config: PipelineConfig = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// The built-in pre-merge check pipeline: lint, format check, tests with
    /// coverage, coverage report.
    pub fn builtin(coverage_policy: CoveragePolicy) -> Self {
        let argv = |parts: &[&str]| parts.iter().map(|s| s.to_string()).collect();

        PipelineConfig {
            name: "pre-merge checks".to_string(),
            default_timeout_secs: None,
            steps: vec![
                StepConfig {
                    name: "lint".to_string(),
                    description: Some("Static analysis over the project tree".to_string()),
                    command: argv(&["flake8", "."]),
                    continue_on_failure: false,
                    timeout_secs: None,
                },
                StepConfig {
                    name: "format-check".to_string(),
                    description: Some("Formatting check in verify mode".to_string()),
                    command: argv(&["black", "--check", "."]),
                    continue_on_failure: false,
                    timeout_secs: None,
                },
                StepConfig {
                    name: "test-with-coverage".to_string(),
                    description: Some("Test run with coverage instrumentation".to_string()),
                    command: argv(&["pytest", "-v", "--maxfail=1", "--cov"]),
                    continue_on_failure: coverage_policy == CoveragePolicy::Always,
                    timeout_secs: None,
                },
                StepConfig {
                    name: "coverage-report".to_string(),
                    description: Some("Coverage report with missing lines".to_string()),
                    command: argv(&["coverage", "report", "--show-missing"]),
                    continue_on_failure: false,
                    timeout_secs: None,
                },
            ],
        }
    }

    /// Validate the pipeline configuration
    pub fn validate(&self) -> Result<()> {
        if self.steps.is_empty() {
            anyhow::bail!("Pipeline '{}' has no steps", self.name);
        }

        let mut seen_names = std::collections::HashSet::new();
        for step in &self.steps {
            if step.name.is_empty() {
                anyhow::bail!("Step with empty name in pipeline '{}'", self.name);
            }
            if !seen_names.insert(&step.name) {
                anyhow::bail!("Duplicate step name: {}", step.name);
            }
            if step.command.is_empty() || step.command[0].is_empty() {
                anyhow::bail!("Step '{}' has an empty command", step.name);
            }
        }

        Ok(())
    }

    /// Convert config to a Pipeline domain model
    pub fn to_pipeline(&self) -> Pipeline {
        Pipeline::from_config(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_simple_pipeline() {
        let yaml = r#"
name: "Checks"
steps:
  - name: "lint"
    command: ["flake8", "."]
  - name: "tests"
    command: ["pytest", "-v"]
    timeout_secs: 120
"#;

        let config = PipelineConfig::from_yaml(yaml).unwrap();
        assert_eq!(config.name, "Checks");
        assert_eq!(config.steps.len(), 2);
        assert_eq!(config.steps[0].command, vec!["flake8", "."]);
        assert!(!config.steps[0].continue_on_failure);
        assert_eq!(config.steps[1].timeout_secs, Some(120));
    }

    #[test]
    fn test_empty_step_list_fails() {
        let yaml = r#"
name: "Empty"
steps: []
"#;

        let err = PipelineConfig::from_yaml(yaml).unwrap_err();
        assert!(err.to_string().contains("no steps"));
    }

    #[test]
    fn test_duplicate_step_name_fails() {
        let yaml = r#"
name: "Checks"
steps:
  - name: "lint"
    command: ["flake8"]
  - name: "lint"
    command: ["black", "--check"]
"#;

        assert!(PipelineConfig::from_yaml(yaml).is_err());
    }

    #[test]
    fn test_empty_command_fails() {
        let yaml = r#"
name: "Checks"
steps:
  - name: "broken"
    command: []
"#;

        assert!(PipelineConfig::from_yaml(yaml).is_err());
    }

    #[test]
    fn test_continue_on_failure_parses() {
        let yaml = r#"
name: "Checks"
steps:
  - name: "tests"
    command: ["pytest"]
    continue_on_failure: true
  - name: "report"
    command: ["coverage", "report"]
"#;

        let config = PipelineConfig::from_yaml(yaml).unwrap();
        assert!(config.steps[0].continue_on_failure);
        assert!(!config.steps[1].continue_on_failure);
    }

    #[test]
    fn test_builtin_step_order() {
        let config = PipelineConfig::builtin(CoveragePolicy::OnSuccess);
        config.validate().unwrap();

        let names: Vec<&str> = config.steps.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(
            names,
            vec!["lint", "format-check", "test-with-coverage", "coverage-report"]
        );
        assert!(config.steps.iter().all(|s| !s.continue_on_failure));
    }

    #[test]
    fn test_builtin_always_policy_unblocks_report() {
        let config = PipelineConfig::builtin(CoveragePolicy::Always);

        let test_step = config
            .steps
            .iter()
            .find(|s| s.name == "test-with-coverage")
            .unwrap();
        assert!(test_step.continue_on_failure);

        let report_step = config
            .steps
            .iter()
            .find(|s| s.name == "coverage-report")
            .unwrap();
        assert!(!report_step.continue_on_failure);
    }
}
