//! Fail-fast semantics: a failing step halts the pipeline and later steps
//! never run.

mod helpers;

use helpers::*;
use run_checks::core::RunStatus;
use run_checks::execution::LAUNCH_FAILURE_CODE;

const THREE_CHECKS: &str = r#"
name: "Checks"
steps:
  - name: "lint"
    command: ["lint-tool"]
  - name: "format-check"
    command: ["fmt-tool"]
  - name: "tests"
    command: ["test-tool"]
"#;

#[tokio::test]
async fn test_failure_stops_remaining_steps() {
    let pipeline = pipeline_from_yaml(THREE_CHECKS);
    let (result, calls) = run_with_mock(&pipeline, &[("fmt-tool", 1)]).await;

    assert_eq!(result.status, RunStatus::Failed);
    assert_eq!(result.results.len(), 2);
    assert_eq!(result.failed_at, Some(1));

    // The third step was never invoked
    assert_eq!(calls, vec!["lint-tool", "fmt-tool"]);
    assert_execution_order(&result, &["lint", "format-check"]);
}

#[tokio::test]
async fn test_exit_code_matches_failing_step() {
    let pipeline = pipeline_from_yaml(THREE_CHECKS);
    let (result, _) = run_with_mock(&pipeline, &[("test-tool", 3)]).await;

    assert_eq!(result.status, RunStatus::Failed);
    assert_eq!(result.exit_code(), 3);
    assert_eq!(result.failed_step().unwrap().step_name, "tests");
}

#[tokio::test]
async fn test_first_step_failure_runs_nothing_else() {
    let pipeline = pipeline_from_yaml(THREE_CHECKS);
    let (result, calls) = run_with_mock(&pipeline, &[("lint-tool", 2)]).await;

    assert_eq!(result.results.len(), 1);
    assert_eq!(result.failed_at, Some(0));
    assert_eq!(calls, vec!["lint-tool"]);
}

#[tokio::test]
async fn test_launch_failure_fails_fast_with_sentinel() {
    let yaml = r#"
name: "Checks"
steps:
  - name: "broken"
    command: ["missing-tool"]
  - name: "tests"
    command: ["test-tool"]
"#;

    let pipeline = pipeline_from_yaml(yaml);
    let (result, calls) = run_with_mock(&pipeline, &[]).await;

    assert_eq!(result.status, RunStatus::Failed);
    assert_eq!(result.results.len(), 1);
    assert_eq!(result.results[0].exit_code, LAUNCH_FAILURE_CODE);
    assert!(result.results[0].output.contains("missing-tool"));

    // Launch failure gates later steps just like a non-zero exit
    assert_eq!(calls, vec!["missing-tool"]);
}

#[tokio::test]
async fn test_continue_on_failure_reaches_later_steps() {
    let yaml = r#"
name: "Checks"
steps:
  - name: "test-with-coverage"
    command: ["test-tool"]
    continue_on_failure: true
  - name: "coverage-report"
    command: ["report-tool"]
"#;

    let pipeline = pipeline_from_yaml(yaml);
    let (result, calls) = run_with_mock(&pipeline, &[("test-tool", 1)]).await;

    // The report ran, but the pipeline still reports the failure
    assert_eq!(calls, vec!["test-tool", "report-tool"]);
    assert_eq!(result.status, RunStatus::Failed);
    assert_eq!(result.failed_at, Some(0));
    assert_eq!(result.exit_code(), 1);
    assert_execution_order(&result, &["test-with-coverage", "coverage-report"]);
}
