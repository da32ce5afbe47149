use thiserror::Error;

/// Failures from a single call to the execution backend.
/// The optional HTTP-style status drives the retry classification.
#[derive(Debug, Error)]
pub enum JudgeError {
    /// Backend answered with a non-success HTTP status
    #[error("judge backend returned status {status}: {message}")]
    Http { status: u16, message: String },

    /// The backend could not be reached at all
    #[error("failed to reach judge backend: {0}")]
    Transport(#[from] reqwest::Error),

    /// A 2xx answer whose body did not match the judge wire contract
    #[error("judge backend returned an invalid response: {0}")]
    InvalidResponse(String),
}

impl JudgeError {
    /// Status code when one was observed. Network and decode failures carry
    /// none and are treated as transient.
    pub fn status(&self) -> Option<u16> {
        match self {
            JudgeError::Http { status, .. } => Some(*status),
            JudgeError::Transport(err) => err.status().map(|s| s.as_u16()),
            JudgeError::InvalidResponse(_) => None,
        }
    }
}
