use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Safety limits to prevent pathological inputs from reaching the judge backend
pub const MAX_SOURCE_CODE_BYTES: usize = 1024 * 1024; // 1MB
pub const MAX_TEST_INPUT_BYTES: usize = 10 * 1024 * 1024; // 10MB

/// Strongly-typed language enum
/// Closed set - each variant has its own harness builder
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    Javascript,
    Python,
    Java,
    Cpp,
    C,
}

impl Language {
    /// Returns all language variants
    /// This is the single source of truth for supported languages
    pub fn all_variants() -> &'static [Language] {
        &[
            Language::Javascript,
            Language::Python,
            Language::Java,
            Language::Cpp,
            Language::C,
        ]
    }

    /// Parse a language from string (case-insensitive)
    pub fn from_str(s: &str) -> Option<Language> {
        match s.to_lowercase().as_str() {
            "javascript" | "js" => Some(Language::Javascript),
            "python" => Some(Language::Python),
            "java" => Some(Language::Java),
            "cpp" | "c++" => Some(Language::Cpp),
            "c" => Some(Language::C),
            _ => None,
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Language::Javascript => write!(f, "javascript"),
            Language::Python => write!(f, "python"),
            Language::Java => write!(f, "java"),
            Language::Cpp => write!(f, "cpp"),
            Language::C => write!(f, "c"),
        }
    }
}

/// Test Case Definition (Immutable Input)
/// Authored alongside the problem; field names are part of the persisted
/// authoring format and must not change
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TestCase {
    pub input: String,
    pub expected_output: String,
    #[serde(default)]
    pub is_hidden: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub explanation: Option<String>,
}

/// Per-language starter code authored with a problem
/// `visible_code` is the user-facing stub; `adapter_code` is the hidden
/// bridge that exposes the canonical entry point
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StarterCodeEntry {
    pub language: Language,
    pub visible_code: String,
    pub adapter_code: String,
}

/// Per-Test Result
/// Captures individual test case execution outcome
/// Enables partial success and detailed feedback
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TestResult {
    pub test_case: u32,
    pub passed: bool,
    pub input: String,
    pub expected_output: String,
    pub actual_output: String,
    pub execution_time: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub explanation: Option<String>,
}

/// Aggregate view over one evaluation run
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RunReport {
    pub results: Vec<TestResult>,
    pub passed_tests: u32,
    pub total_tests: u32,
    pub all_passed: bool,
}

impl RunReport {
    pub fn from_results(results: Vec<TestResult>) -> Self {
        let total_tests = results.len() as u32;
        let passed_tests = results.iter().filter(|r| r.passed).count() as u32;
        RunReport {
            all_passed: total_tests > 0 && passed_tests == total_tests,
            passed_tests,
            total_tests,
            results,
        }
    }
}

/// Submission Record
/// Written once per authenticated submission; persistence is the caller's
/// concern but the shape is part of this core's contract
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmissionRecord {
    pub id: Uuid,
    pub problem_id: String,
    pub problem_title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub roadmap_id: Option<String>,
    pub language: Language,
    pub code: String,
    pub results: Vec<TestResult>,
    pub passed_tests: u32,
    pub total_tests: u32,
    pub all_passed: bool,
    pub submitted_at: DateTime<Utc>,
}
