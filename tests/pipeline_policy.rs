// tests/pipeline_policy.rs

mod common;
use crate::common::init_tracing;

use std::error::Error;
use std::future::Future;
use std::pin::Pin;
use std::sync::{Arc, Mutex};

use speech_installer::errors::{InstallerError, Result};
use speech_installer::pipeline::{FailurePolicy, Pipeline, Step, StepHandler, StepStatus};
use speech_installer::transcript::Transcript;
use speech_installer::types::Severity;

type TestResult = std::result::Result<(), Box<dyn Error>>;

#[derive(Debug, Clone)]
enum FakeOp {
    Ok(&'static str),
    Fail(&'static str),
    Panic,
}

/// Records the order in which operations ran.
#[derive(Default)]
struct RecordingHandler {
    ran: Mutex<Vec<String>>,
}

impl RecordingHandler {
    fn ran(&self) -> Vec<String> {
        self.ran.lock().unwrap().clone()
    }
}

impl StepHandler<FakeOp> for RecordingHandler {
    fn execute<'a>(
        &'a self,
        op: &'a FakeOp,
    ) -> Pin<Box<dyn Future<Output = Result<()>> + Send + 'a>> {
        Box::pin(async move {
            match op {
                FakeOp::Ok(tag) => {
                    self.ran.lock().unwrap().push(tag.to_string());
                    Ok(())
                }
                FakeOp::Fail(tag) => {
                    self.ran.lock().unwrap().push(tag.to_string());
                    Err(InstallerError::ConfigError(format!("{tag} broke")))
                }
                FakeOp::Panic => panic!("handler panicked"),
            }
        })
    }
}

fn steps(ops: Vec<FakeOp>) -> Vec<Step<FakeOp>> {
    ops.into_iter()
        .enumerate()
        .map(|(i, op)| Step::new(format!("step {i}"), op))
        .collect()
}

#[tokio::test]
async fn steps_run_in_order_and_report_success() -> TestResult {
    init_tracing();

    let transcript = Transcript::new();
    let handler = Arc::new(RecordingHandler::default());
    let reports = Pipeline::new(FailurePolicy::Continue, transcript.clone())
        .run_all(
            steps(vec![FakeOp::Ok("a"), FakeOp::Ok("b"), FakeOp::Ok("c")]),
            Arc::clone(&handler),
        )
        .await;

    assert_eq!(handler.ran(), vec!["a", "b", "c"]);
    assert!(reports.iter().all(|r| r.status == StepStatus::Succeeded));

    let texts = transcript.texts();
    assert_eq!(texts.first().map(String::as_str), Some("Starting setup..."));
    assert_eq!(texts.last().map(String::as_str), Some("Setup complete."));
    assert_eq!(&texts[1..4], &["step 0", "step 1", "step 2"]);
    Ok(())
}

#[tokio::test]
async fn failure_is_logged_and_later_steps_still_run() -> TestResult {
    init_tracing();

    let transcript = Transcript::new();
    let handler = Arc::new(RecordingHandler::default());
    let reports = Pipeline::new(FailurePolicy::default(), transcript.clone())
        .spawn(
            steps(vec![FakeOp::Ok("a"), FakeOp::Fail("b"), FakeOp::Ok("c")]),
            Arc::clone(&handler),
        )
        .await?;

    assert_eq!(handler.ran(), vec!["a", "b", "c"]);
    assert_eq!(reports[0].status, StepStatus::Succeeded);
    assert!(reports[1].is_failed());
    assert!(reports[1].error().unwrap_or_default().contains("b broke"));
    assert_eq!(reports[2].status, StepStatus::Succeeded);

    let errors: Vec<_> = transcript
        .lines()
        .into_iter()
        .filter(|l| l.severity == Severity::Error)
        .map(|l| l.text)
        .collect();
    assert_eq!(errors.len(), 1);
    assert!(errors[0].starts_with("Error: "));
    assert!(errors[0].contains("b broke"));

    assert_eq!(
        transcript.texts().last().map(String::as_str),
        Some("Setup finished with 1 failed step(s).")
    );
    Ok(())
}

#[tokio::test]
async fn abort_policy_skips_remaining_steps() -> TestResult {
    init_tracing();

    let handler = Arc::new(RecordingHandler::default());
    let reports = Pipeline::new(FailurePolicy::AbortOnFirstFailure, Transcript::new())
        .run_all(
            steps(vec![FakeOp::Fail("a"), FakeOp::Ok("b"), FakeOp::Ok("c")]),
            Arc::clone(&handler),
        )
        .await;

    assert_eq!(handler.ran(), vec!["a"]);
    assert!(reports[0].is_failed());
    assert_eq!(reports[1].status, StepStatus::Skipped);
    assert_eq!(reports[2].status, StepStatus::Skipped);
    Ok(())
}

#[tokio::test]
async fn panicking_step_is_reported_as_failed() -> TestResult {
    init_tracing();

    let handler = Arc::new(RecordingHandler::default());
    let reports = Pipeline::new(FailurePolicy::Continue, Transcript::new())
        .run_all(
            steps(vec![FakeOp::Panic, FakeOp::Ok("after")]),
            Arc::clone(&handler),
        )
        .await;

    assert!(reports[0].is_failed());
    assert_eq!(reports[1].status, StepStatus::Succeeded);
    assert_eq!(handler.ran(), vec!["after"]);
    Ok(())
}

#[tokio::test]
async fn empty_pipeline_completes() -> TestResult {
    let transcript = Transcript::new();
    let reports = Pipeline::new(FailurePolicy::Continue, transcript.clone())
        .run_all(Vec::new(), Arc::new(RecordingHandler::default()))
        .await;

    assert!(reports.is_empty());
    assert_eq!(transcript.texts(), vec!["Starting setup...", "Setup complete."]);
    Ok(())
}
