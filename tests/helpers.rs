//! Shared test utilities for run-checks

use async_trait::async_trait;
use run_checks::command::{CancelFlag, CommandError, CommandOutput, CommandRunner, OutputSink};
use run_checks::core::config::PipelineConfig;
use run_checks::core::{CommandSpec, Pipeline, PipelineResult};
use run_checks::execution::ExecutionEngine;
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// Record of which programs a mock runner was asked to execute, in order
pub type CallLog = Arc<Mutex<Vec<String>>>;

/// Mock runner with a fixed exit code per program (anything else exits 0)
pub struct MockRunner {
    codes: Vec<(String, i32)>,
    calls: CallLog,
}

impl MockRunner {
    pub fn new(codes: &[(&str, i32)]) -> (Self, CallLog) {
        let calls: CallLog = Arc::new(Mutex::new(Vec::new()));
        let runner = Self {
            codes: codes
                .iter()
                .map(|(program, code)| (program.to_string(), *code))
                .collect(),
            calls: calls.clone(),
        };
        (runner, calls)
    }
}

#[async_trait]
impl CommandRunner for MockRunner {
    async fn run(
        &self,
        command: &CommandSpec,
        _timeout: Option<Duration>,
        _sink: Option<&dyn OutputSink>,
        _cancel: &CancelFlag,
    ) -> Result<CommandOutput, CommandError> {
        self.calls.lock().unwrap().push(command.program.clone());

        if command.program == "missing-tool" {
            return Err(CommandError::Launch {
                program: command.program.clone(),
                reason: "No such file or directory".to_string(),
            });
        }

        let exit_code = self
            .codes
            .iter()
            .find(|(program, _)| *program == command.program)
            .map(|(_, code)| *code)
            .unwrap_or(0);

        Ok(CommandOutput {
            exit_code,
            output: format!("{} ran\n", command.program),
        })
    }
}

/// Parse a pipeline from YAML, panicking on config errors
pub fn pipeline_from_yaml(yaml: &str) -> Pipeline {
    PipelineConfig::from_yaml(yaml)
        .expect("test YAML should be valid")
        .to_pipeline()
}

/// Run a pipeline against a mock runner with the given per-program exit codes
pub async fn run_with_mock(
    pipeline: &Pipeline,
    codes: &[(&str, i32)],
) -> (PipelineResult, Vec<String>) {
    let (runner, calls) = MockRunner::new(codes);
    let engine = ExecutionEngine::new(runner);
    let result = engine
        .execute(pipeline)
        .await
        .expect("pipeline should produce a result");
    let calls = calls.lock().unwrap().clone();
    (result, calls)
}

/// Assert that the executed results match the expected step names, in order
pub fn assert_execution_order(result: &PipelineResult, expected: &[&str]) {
    let actual: Vec<&str> = result.results.iter().map(|r| r.step_name.as_str()).collect();
    assert_eq!(actual, expected, "executed steps should match declaration order");
}
