// Runtime settings, read once from the environment at startup

use std::fmt::Debug;
use std::str::FromStr;

/// Process-wide settings shared by the API surface and the engine
#[derive(Debug, Clone)]
pub struct Settings {
    /// Address the HTTP server binds to
    pub bind_addr: String,
    /// Base URL of the external execution backend
    pub judge_url: String,
    /// Optional bearer token for the execution backend
    pub judge_api_key: Option<String>,
    /// Ceiling on in-flight calls to the execution backend
    pub max_concurrent_executions: usize,
    /// Retry attempts after the first failure
    pub max_retries: u32,
    /// Base delay for exponential backoff
    pub retry_initial_delay_ms: u64,
}

impl Settings {
    pub fn from_env() -> Self {
        Settings {
            bind_addr: env_or("BIND_ADDR", "0.0.0.0:3000"),
            judge_url: env_or("JUDGE_URL", "http://127.0.0.1:2358"),
            judge_api_key: std::env::var("JUDGE_API_KEY").ok().filter(|v| !v.is_empty()),
            max_concurrent_executions: env_parse("MAX_CONCURRENT_EXECUTIONS", 5),
            max_retries: env_parse("MAX_RETRIES", 3),
            retry_initial_delay_ms: env_parse("RETRY_INITIAL_DELAY_MS", 1000),
        }
    }
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

fn env_parse<T>(key: &str, default: T) -> T
where
    T: FromStr + Debug,
{
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_env_parse_falls_back_on_garbage() {
        std::env::set_var("ARBITER_TEST_PARSE_KEY", "not-a-number");
        assert_eq!(env_parse("ARBITER_TEST_PARSE_KEY", 7u32), 7);
        std::env::remove_var("ARBITER_TEST_PARSE_KEY");
    }

    #[test]
    fn test_env_parse_reads_value() {
        std::env::set_var("ARBITER_TEST_PARSE_KEY_2", "42");
        assert_eq!(env_parse("ARBITER_TEST_PARSE_KEY_2", 0u64), 42);
        std::env::remove_var("ARBITER_TEST_PARSE_KEY_2");
    }

    #[test]
    fn test_env_or_default() {
        assert_eq!(env_or("ARBITER_TEST_MISSING_KEY", "fallback"), "fallback");
    }
}
