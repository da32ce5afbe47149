/// Submission Evaluator - Per-Test-Case Orchestration
///
/// For each test case, in authored order: build the harnessed source, ship
/// it through retry-wrapped, queue-gated judge calls, and compare the
/// captured output against the expected output with exact string equality.
///
/// Failure isolation is the core contract: a harness construction error,
/// exhausted retries or a permanent backend error each mark that one test
/// case failed (with the error text as the actual output) and evaluation
/// moves on. Only whole-submission validation belongs to the caller.

use crate::client::{ExecutionRequest, JudgeClient};
use crate::queue::ExecutionQueue;
use crate::retry::RetryPolicy;
use arbiter_common::types::{Language, TestCase, TestResult};
use arbiter_harness::build_harness;
use std::sync::Arc;
use std::time::Instant;
use tracing::{info, warn};

pub struct Evaluator {
    client: Arc<dyn JudgeClient>,
    queue: Arc<ExecutionQueue>,
    retry: RetryPolicy,
}

impl Evaluator {
    pub fn new(client: Arc<dyn JudgeClient>, queue: Arc<ExecutionQueue>, retry: RetryPolicy) -> Self {
        Evaluator {
            client,
            queue,
            retry,
        }
    }

    /// Evaluate a submission against its test cases.
    /// Always returns one result per test case, in input order.
    pub async fn evaluate(
        &self,
        code: &str,
        language: Language,
        test_cases: &[TestCase],
        adapter_code: Option<&str>,
    ) -> Vec<TestResult> {
        let mut results = Vec::with_capacity(test_cases.len());
        for (index, test_case) in test_cases.iter().enumerate() {
            let number = (index + 1) as u32;
            let result = self
                .evaluate_test_case(number, code, language, test_case, adapter_code)
                .await;
            info!(
                test_case = number,
                passed = result.passed,
                execution_ms = result.execution_time,
                "test case evaluated"
            );
            results.push(result);
        }
        results
    }

    async fn evaluate_test_case(
        &self,
        number: u32,
        code: &str,
        language: Language,
        test_case: &TestCase,
        adapter_code: Option<&str>,
    ) -> TestResult {
        let source = match build_harness(language, code, &test_case.input, adapter_code, None) {
            Ok(source) => source,
            Err(err) => {
                warn!(test_case = number, error = %err, "harness construction failed");
                return self.failed_result(number, test_case, err.to_string(), 0);
            }
        };

        let request = ExecutionRequest { language, source };
        let client = Arc::clone(&self.client);
        let retry = self.retry.clone();

        let (outcome, elapsed_ms) = self
            .queue
            .submit(|| async move {
                let started = Instant::now();
                let outcome = retry
                    .run(|| {
                        let client = Arc::clone(&client);
                        let request = request.clone();
                        async move { client.execute(&request).await }
                    })
                    .await;
                (outcome, started.elapsed().as_millis() as u64)
            })
            .await;

        match outcome {
            Ok(output) => {
                // A crashed program reports through stderr; surface that as
                // the actual output so the user sees the error text
                let actual = if !output.stdout.is_empty() {
                    output.stdout
                } else {
                    output.stderr.unwrap_or_default()
                };
                // Exact equality, deliberately unnormalized: authors own the
                // serialization convention of expected outputs
                let passed = actual == test_case.expected_output;
                TestResult {
                    test_case: number,
                    passed,
                    input: test_case.input.clone(),
                    expected_output: test_case.expected_output.clone(),
                    actual_output: actual,
                    execution_time: output.execution_time_ms.unwrap_or(elapsed_ms),
                    explanation: test_case.explanation.clone(),
                }
            }
            Err(err) => {
                warn!(test_case = number, error = %err, "judge call failed permanently");
                self.failed_result(number, test_case, err.to_string(), elapsed_ms)
            }
        }
    }

    fn failed_result(
        &self,
        number: u32,
        test_case: &TestCase,
        actual_output: String,
        execution_time: u64,
    ) -> TestResult {
        TestResult {
            test_case: number,
            passed: false,
            input: test_case.input.clone(),
            expected_output: test_case.expected_output.clone(),
            actual_output,
            execution_time,
            explanation: test_case.explanation.clone(),
        }
    }
}
