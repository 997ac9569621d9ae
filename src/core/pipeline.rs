//! Pipeline domain model

use crate::core::{
    config::PipelineConfig,
    step::{Step, StepDefaults},
};

/// An ordered pipeline of verification steps
#[derive(Debug, Clone)]
pub struct Pipeline {
    /// Pipeline name
    pub name: String,

    /// Steps in declaration (and execution) order
    pub steps: Vec<Step>,
}

impl Pipeline {
    /// Create a pipeline from configuration
    pub fn from_config(config: &PipelineConfig) -> Self {
        let defaults = StepDefaults {
            timeout_secs: config.default_timeout_secs,
        };

        let steps = config
            .steps
            .iter()
            .map(|step_config| Step::from_config(step_config, &defaults))
            .collect();

        Pipeline {
            name: config.name.clone(),
            steps,
        }
    }

    /// Get a step by name
    pub fn step(&self, name: &str) -> Option<&Step> {
        self.steps.iter().find(|s| s.name == name)
    }

    /// Number of steps in the pipeline
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    /// Whether the pipeline has no steps
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_config_preserves_order() {
        let yaml = r#"
name: "Checks"
steps:
  - name: "lint"
    command: ["flake8", "."]
  - name: "format-check"
    command: ["black", "--check", "."]
  - name: "tests"
    command: ["pytest"]
"#;

        let config = PipelineConfig::from_yaml(yaml).unwrap();
        let pipeline = config.to_pipeline();

        let names: Vec<&str> = pipeline.steps.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["lint", "format-check", "tests"]);
    }

    #[test]
    fn test_step_lookup() {
        let yaml = r#"
name: "Checks"
default_timeout_secs: 30
steps:
  - name: "lint"
    command: ["flake8", "."]
"#;

        let config = PipelineConfig::from_yaml(yaml).unwrap();
        let pipeline = config.to_pipeline();

        let step = pipeline.step("lint").unwrap();
        assert_eq!(step.command.program, "flake8");
        assert_eq!(step.timeout_secs, Some(30));
        assert!(pipeline.step("missing").is_none());
    }
}
