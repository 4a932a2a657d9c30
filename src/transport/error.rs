//! Normalized transport failures

use thiserror::Error;

/// Every way a submission can fail, reduced to a user-facing message
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransportError {
    #[error("Intake endpoint is not configured")]
    NotConfigured,

    #[error("Request failed with status code {0}")]
    Status(u16),

    #[error("Request timed out after {0}s")]
    Timeout(u64),

    #[error("Network error: unable to reach the intake service")]
    Connect,

    #[error("An error occurred while processing your request.")]
    Http,

    /// A message supplied by the transport as-is
    #[error("{0}")]
    Message(String),

    #[error("An unexpected error occurred.")]
    Unexpected,
}

impl TransportError {
    /// The display message for the failure banner
    pub fn message(&self) -> String {
        self.to_string()
    }

    /// Classify a reqwest failure
    pub(crate) fn from_reqwest(err: &reqwest::Error, timeout_secs: u64) -> Self {
        if err.is_timeout() {
            Self::Timeout(timeout_secs)
        } else if err.is_connect() {
            Self::Connect
        } else if let Some(status) = err.status() {
            Self::Status(status.as_u16())
        } else if err.is_decode() {
            Self::Unexpected
        } else {
            Self::Http
        }
    }
}
