/// Judge Backend Client
///
/// One call per (submission, test case): ship the harnessed source, get
/// back captured output. The backend is an opaque sandboxed judge; this
/// client only knows the wire shape and which failures carry a status.
/// The trait exists so the evaluator can be tested against a mock.

use crate::error::JudgeError;
use arbiter_common::types::Language;
use async_trait::async_trait;
use base64::{engine::general_purpose, Engine as _};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// One harnessed program bound for the execution backend.
#[derive(Debug, Clone)]
pub struct ExecutionRequest {
    pub language: Language,
    pub source: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct WireRequest {
    language: Language,
    source_code: String,
    base64_encoded: bool,
}

/// Captured execution output as reported by the backend.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExecutionOutput {
    #[serde(default)]
    pub stdout: String,
    #[serde(default)]
    pub stderr: Option<String>,
    #[serde(default)]
    pub status_code: Option<u16>,
    #[serde(default)]
    pub execution_time_ms: Option<u64>,
}

#[async_trait]
pub trait JudgeClient: Send + Sync {
    async fn execute(&self, request: &ExecutionRequest) -> Result<ExecutionOutput, JudgeError>;
}

/// HTTP client for the judge service.
pub struct HttpJudgeClient {
    http: reqwest::Client,
    base_url: String,
    api_key: Option<String>,
}

impl HttpJudgeClient {
    pub fn new(base_url: &str, api_key: Option<String>) -> Self {
        HttpJudgeClient {
            http: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key,
        }
    }
}

#[async_trait]
impl JudgeClient for HttpJudgeClient {
    async fn execute(&self, request: &ExecutionRequest) -> Result<ExecutionOutput, JudgeError> {
        let body = WireRequest {
            language: request.language,
            source_code: general_purpose::STANDARD.encode(&request.source),
            base64_encoded: true,
        };

        let url = format!("{}/execute", self.base_url);
        debug!(
            language = %request.language,
            source_bytes = request.source.len(),
            "submitting to judge backend"
        );

        let mut http_request = self.http.post(&url).json(&body);
        if let Some(key) = &self.api_key {
            http_request = http_request.bearer_auth(key);
        }

        let response = http_request.send().await?;
        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(JudgeError::Http {
                status: status.as_u16(),
                message,
            });
        }

        response
            .json::<ExecutionOutput>()
            .await
            .map_err(|err| JudgeError::InvalidResponse(err.to_string()))
    }
}
