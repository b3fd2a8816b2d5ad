//! Sim API client error types.

use thiserror::Error;

/// Result type for Sim API calls.
pub type SimResult<T> = Result<T, SimError>;

/// Errors that can occur while talking to the Sim API.
#[derive(Debug, Error)]
pub enum SimError {
    /// No API key is configured, so no request is attempted.
    #[error(
        "SIM_API_KEY is missing. Please set the SIM_API_KEY environment variable with your Sim API key."
    )]
    MissingApiKey,

    /// The request exceeded the configured time budget.
    #[error("Sim API request timed out after {timeout_ms}ms; the call can be retried")]
    Timeout { timeout_ms: u64 },

    /// Network or transport failure.
    #[error("Sim API request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The response body was not valid JSON.
    #[error("Sim API returned a non-JSON body (HTTP {status}): {source}")]
    Decode {
        status: u16,
        #[source]
        source: serde_json::Error,
    },

    /// The configured base URL cannot be used to build request URLs.
    #[error("Invalid Sim API URL: {0}")]
    InvalidUrl(String),
}

impl SimError {
    /// Create an invalid URL error.
    pub fn invalid_url(msg: impl Into<String>) -> Self {
        Self::InvalidUrl(msg.into())
    }

    /// Whether repeating the same call may succeed.
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Timeout { .. } => true,
            Self::Request(e) => e.is_connect() || e.is_timeout(),
            _ => false,
        }
    }
}
