//! Error types for port operations.

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LlmError {
    /// Transport-level failure (connection refused, DNS, TLS, body read).
    #[error("LLM request failed: {0}")]
    RequestFailed(String),
    /// The provider did not answer within the configured timeout.
    #[error("LLM request timed out")]
    Timeout,
    /// The provider answered with a non-success status.
    #[error("LLM request failed with status {status}: {body}")]
    Status { status: u16, body: String },
    /// No API key configured; the request was never sent.
    #[error("LLM credential is not configured")]
    MissingCredential,
    /// The provider's envelope could not be read (no choices, bad JSON).
    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}
