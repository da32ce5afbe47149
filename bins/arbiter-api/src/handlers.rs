// HTTP route handlers for the Arbiter API

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json},
};

use arbiter_common::types::{
    Language, RunReport, StarterCodeEntry, SubmissionRecord, TestCase, MAX_SOURCE_CODE_BYTES,
};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{info, warn};
use uuid::Uuid;

use crate::{metrics, AppState};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RunCodeRequest {
    pub code: String,
    pub language: String,
    #[serde(default)]
    pub test_cases: Vec<TestCase>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitCodeRequest {
    pub code: String,
    pub language: Language,
    pub problem_id: String,
    pub problem_title: String,
    #[serde(default)]
    pub test_cases: Vec<TestCase>,
    /// The problem's starter-code entries; the adapter for the submission
    /// language is resolved from here
    #[serde(default)]
    pub starter_code: Vec<StarterCodeEntry>,
    #[serde(default)]
    pub roadmap_id: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitCodeResponse {
    pub submission: SubmissionRecord,
    pub message: String,
}

#[derive(Debug, Serialize)]
pub struct ApiError {
    pub error: String,
}

fn reject(reason: &'static str, message: &str) -> (StatusCode, Json<ApiError>) {
    metrics::record_rejected(reason);
    (
        StatusCode::BAD_REQUEST,
        Json(ApiError {
            error: message.to_string(),
        }),
    )
}

/// Whole-submission validation: these are the only errors that surface to
/// the caller as HTTP failures; everything later becomes a per-test result.
fn validate(code: &str, test_cases: &[TestCase]) -> Result<(), (StatusCode, Json<ApiError>)> {
    if code.trim().is_empty() {
        return Err(reject("empty_code", "code cannot be empty"));
    }
    if code.len() > MAX_SOURCE_CODE_BYTES {
        return Err(reject(
            "code_too_large",
            "code exceeds the maximum allowed size",
        ));
    }
    if test_cases.is_empty() {
        return Err(reject("no_test_cases", "test cases are required"));
    }
    Ok(())
}

/// POST /run - unauthenticated "try it" execution, JavaScript only
pub async fn run_code(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<RunCodeRequest>,
) -> impl IntoResponse {
    if let Err(rejection) = validate(&payload.code, &payload.test_cases) {
        return rejection.into_response();
    }
    match Language::from_str(&payload.language) {
        Some(Language::Javascript) => {}
        _ => {
            warn!(language = %payload.language, "run path rejected non-javascript submission");
            return reject(
                "unsupported_language",
                "only javascript is supported here; other languages require a problem submission",
            )
            .into_response();
        }
    }

    let results = state
        .evaluator
        .evaluate(
            &payload.code,
            Language::Javascript,
            &payload.test_cases,
            None,
        )
        .await;
    let report = RunReport::from_results(results);

    info!(
        passed = report.passed_tests,
        total = report.total_tests,
        "run completed"
    );
    (StatusCode::OK, Json(report)).into_response()
}

/// POST /submit - full judging path for problem submissions
pub async fn submit_code(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<SubmitCodeRequest>,
) -> impl IntoResponse {
    if let Err(rejection) = validate(&payload.code, &payload.test_cases) {
        return rejection.into_response();
    }

    let language = payload.language;
    metrics::record_submitted(&language.to_string());

    let adapter_code = payload
        .starter_code
        .iter()
        .find(|entry| entry.language == language)
        .map(|entry| entry.adapter_code.as_str())
        .filter(|code| !code.trim().is_empty());

    let started = std::time::Instant::now();
    let results = state
        .evaluator
        .evaluate(&payload.code, language, &payload.test_cases, adapter_code)
        .await;
    let report = RunReport::from_results(results);

    metrics::record_completed(
        &language.to_string(),
        if report.all_passed { "accepted" } else { "rejected" },
        started.elapsed().as_millis() as f64,
    );

    let message = if report.all_passed {
        "All test cases passed! Solution accepted.".to_string()
    } else {
        format!(
            "{} of {} test cases passed",
            report.passed_tests, report.total_tests
        )
    };

    let submission = SubmissionRecord {
        id: Uuid::new_v4(),
        problem_id: payload.problem_id,
        problem_title: payload.problem_title,
        roadmap_id: payload.roadmap_id,
        language,
        code: payload.code,
        results: report.results,
        passed_tests: report.passed_tests,
        total_tests: report.total_tests,
        all_passed: report.all_passed,
        submitted_at: Utc::now(),
    };

    info!(
        submission_id = %submission.id,
        problem_id = %submission.problem_id,
        language = %language,
        passed = submission.passed_tests,
        total = submission.total_tests,
        all_passed = submission.all_passed,
        "submission evaluated"
    );

    (
        StatusCode::OK,
        Json(SubmitCodeResponse {
            submission,
            message,
        }),
    )
        .into_response()
}

/// GET /health - liveness check
pub async fn health_check() -> impl IntoResponse {
    (StatusCode::OK, "OK")
}

/// GET /queue - admission gate status
pub async fn queue_status(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    Json(state.queue.status())
}

/// GET /metrics - prometheus scrape endpoint
pub async fn metrics_endpoint(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    metrics::update_queue_gauges(state.queue.status());
    metrics::render_metrics()
}
