//! HTTP client for the remote intake endpoint
//!
//! Posts the intake payload as JSON and normalizes every failure into a
//! [`TransportError`].

use super::error::TransportError;
use super::traits::IntakeTransport;
use crate::state::SubmissionPayload;
use anyhow::{anyhow, Result};
use async_trait::async_trait;
use std::time::Duration;
use tracing::Instrument;
use url::Url;
use uuid::Uuid;

/// Header carrying the per-submission id
const REQUEST_ID_HEADER: &str = "X-Request-Id";

/// Client for posting intake payloads
pub struct IntakeClient {
    http: reqwest::Client,
    /// Submit endpoint; `None` when nothing was configured
    endpoint: Option<Url>,
    timeout: Duration,
}

impl IntakeClient {
    /// Create a client for `endpoint`. A blank endpoint leaves the client
    /// unconfigured, so every submission fails with a clear message.
    pub fn new(endpoint: Option<&str>, timeout: Duration) -> Result<Self> {
        let endpoint = match endpoint.map(str::trim).filter(|e| !e.is_empty()) {
            Some(raw) => Some(
                Url::parse(raw).map_err(|e| anyhow!("Invalid intake endpoint {raw:?}: {e}"))?,
            ),
            None => None,
        };

        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| anyhow!("Failed to build HTTP client: {}", e))?;

        Ok(Self {
            http,
            endpoint,
            timeout,
        })
    }

    pub fn endpoint(&self) -> Option<&Url> {
        self.endpoint.as_ref()
    }

    async fn post(
        &self,
        endpoint: &Url,
        payload: &SubmissionPayload,
        request_id: Uuid,
    ) -> Result<(), TransportError> {
        let response = self
            .http
            .post(endpoint.clone())
            .header(REQUEST_ID_HEADER, request_id.to_string())
            .json(payload)
            .send()
            .await
            .map_err(|e| {
                tracing::warn!("Intake request failed: {e}");
                TransportError::from_reqwest(&e, self.timeout.as_secs())
            })?;

        let status = response.status();
        if !status.is_success() {
            tracing::warn!("Intake endpoint answered {status}");
            return Err(TransportError::Status(status.as_u16()));
        }

        tracing::info!("Intake accepted with status {status}");
        Ok(())
    }
}

#[async_trait]
impl IntakeTransport for IntakeClient {
    async fn submit_intake(&self, payload: &SubmissionPayload) -> Result<(), TransportError> {
        let Some(endpoint) = self.endpoint.as_ref() else {
            tracing::warn!("Submission attempted without an intake endpoint");
            return Err(TransportError::NotConfigured);
        };

        let request_id = Uuid::new_v4();
        let span = tracing::info_span!("submit_intake", %request_id, endpoint = %endpoint);
        self.post(endpoint, payload, request_id)
            .instrument(span)
            .await
    }
}
