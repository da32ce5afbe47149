/// Retry Policy - Exponential Backoff for Judge Calls
///
/// Transient backend failures (5xx, 429, network errors) are retried with
/// exponential backoff plus jitter; permanent client errors (other 4xx)
/// fail immediately. The last error is returned unchanged so callers can
/// inspect the original failure.
///
/// This composes *around* the execution queue: the retrying task keeps its
/// queue slot across attempts, so a retry storm can never push more
/// concurrent connections at the backend than the configured ceiling.

use crate::error::JudgeError;
use std::future::Future;
use std::time::Duration;
use tracing::warn;

#[derive(Debug, Clone)]
pub struct RetryPolicy {
    /// Retries after the first attempt; 3 means up to 4 attempts total
    pub max_retries: u32,
    pub initial_delay: Duration,
    pub retryable_status_codes: Vec<u16>,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        RetryPolicy {
            max_retries: 3,
            initial_delay: Duration::from_millis(1000),
            retryable_status_codes: vec![500, 502, 503, 504, 429],
        }
    }
}

impl RetryPolicy {
    pub fn new(max_retries: u32, initial_delay_ms: u64) -> Self {
        RetryPolicy {
            max_retries,
            initial_delay: Duration::from_millis(initial_delay_ms),
            ..Default::default()
        }
    }

    /// Status 400-499 except 429 is a permanent client error; a status
    /// outside the retryable set is permanent too. Everything else -
    /// retryable statuses and statusless transport failures - is transient.
    fn should_retry(&self, error: &JudgeError) -> bool {
        match error.status() {
            Some(status) if (400..500).contains(&status) && status != 429 => false,
            Some(status) if !self.retryable_status_codes.contains(&status) => false,
            _ => true,
        }
    }

    fn backoff_delay(&self, attempt: u32) -> Duration {
        let base = (self.initial_delay.as_millis() as u64).saturating_mul(1u64 << attempt.min(32));
        Duration::from_millis(base.saturating_add(jitter(base)))
    }

    pub async fn run<T, F, Fut>(&self, mut operation: F) -> Result<T, JudgeError>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T, JudgeError>>,
    {
        let mut attempt = 0u32;
        loop {
            match operation().await {
                Ok(value) => return Ok(value),
                Err(error) => {
                    if attempt >= self.max_retries || !self.should_retry(&error) {
                        return Err(error);
                    }
                    let delay = self.backoff_delay(attempt);
                    warn!(
                        attempt = attempt + 1,
                        max_retries = self.max_retries,
                        delay_ms = delay.as_millis() as u64,
                        error = %error,
                        "judge call failed, retrying"
                    );
                    tokio::time::sleep(delay).await;
                    attempt += 1;
                }
            }
        }
    }
}

/// 0-30% of the computed delay, to spread competing retries apart
fn jitter(base_ms: u64) -> u64 {
    let mut buf = [0u8; 8];
    if getrandom::getrandom(&mut buf).is_err() {
        return 0;
    }
    let span = base_ms * 3 / 10;
    if span == 0 {
        return 0;
    }
    u64::from_le_bytes(buf) % (span + 1)
}
