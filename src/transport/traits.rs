//! Trait abstraction for the intake transport to enable mocking in tests

use super::error::TransportError;
use crate::state::SubmissionPayload;
use async_trait::async_trait;

/// Sends one intake payload to the remote endpoint
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait IntakeTransport: Send + Sync {
    /// Post the payload; any 2xx response is success and its body is ignored
    async fn submit_intake(&self, payload: &SubmissionPayload) -> Result<(), TransportError>;
}
