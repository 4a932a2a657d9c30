//! Submission lifecycle
//!
//! Maps validated values to the wire payload, drives the transport call and
//! reduces its outcome into a [`SubmissionState`].

use super::validation::NormalizedValues;
use crate::transport::{IntakeTransport, TransportError};
use serde::{Deserialize, Serialize};

/// Confirmation shown after the endpoint accepted a submission
pub const SUCCESS_MESSAGE: &str = "Form submitted successfully!";

/// Shown when a failed transport call carries no message of its own
pub const FALLBACK_ERROR_MESSAGE: &str = "An error occurred while submitting the form.";

/// JSON body posted to the intake endpoint
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmissionPayload {
    pub full_name: String,
    pub email: String,
    pub company_name: String,
    pub services: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub budget_usd: Option<u32>,
    pub project_start_date: String,
    pub accept_terms: bool,
}

impl From<&NormalizedValues> for SubmissionPayload {
    fn from(values: &NormalizedValues) -> Self {
        Self {
            full_name: values.full_name.clone(),
            email: values.email.clone(),
            company_name: values.company_name.clone(),
            services: values.services_interested_in.clone(),
            budget_usd: values.budget,
            project_start_date: values.project_start_date_raw.clone(),
            accept_terms: values.accept_terms,
        }
    }
}

/// Where the current submission stands
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SubmissionState {
    #[default]
    Idle,
    Submitting,
    Succeeded(String),
    Failed(String),
}

impl SubmissionState {
    pub fn is_submitting(&self) -> bool {
        matches!(self, Self::Submitting)
    }

    /// Banner message for the terminal states
    pub fn message(&self) -> Option<&str> {
        match self {
            Self::Succeeded(msg) | Self::Failed(msg) => Some(msg.as_str()),
            Self::Idle | Self::Submitting => None,
        }
    }
}

/// Owns the submit lifecycle for one form session
#[derive(Debug, Clone, Default)]
pub struct SubmissionOrchestrator {
    state: SubmissionState,
}

impl SubmissionOrchestrator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &SubmissionState {
        &self.state
    }

    pub fn is_submitting(&self) -> bool {
        self.state.is_submitting()
    }

    /// Start a submission. Returns `None` while one is already in flight.
    ///
    /// Moving to `Submitting` drops any earlier success or error message.
    pub fn begin(&mut self, values: &NormalizedValues) -> Option<SubmissionPayload> {
        if self.is_submitting() {
            tracing::debug!("Submit ignored: a submission is already in flight");
            return None;
        }
        self.state = SubmissionState::Submitting;
        Some(SubmissionPayload::from(values))
    }

    /// Settle the in-flight submission with the transport's outcome
    pub fn resolve(&mut self, outcome: Result<(), TransportError>) -> SubmissionState {
        self.state = match outcome {
            Ok(()) => {
                tracing::info!("Submission succeeded");
                SubmissionState::Succeeded(SUCCESS_MESSAGE.to_string())
            }
            Err(err) => {
                let message = err.message();
                tracing::warn!("Submission failed: {message}");
                if message.trim().is_empty() {
                    SubmissionState::Failed(FALLBACK_ERROR_MESSAGE.to_string())
                } else {
                    SubmissionState::Failed(message)
                }
            }
        };
        self.state.clone()
    }

    /// Begin, call the transport and resolve in one step.
    ///
    /// Returns the unchanged state when a submission is already in flight.
    pub async fn submit(
        &mut self,
        transport: &dyn IntakeTransport,
        values: &NormalizedValues,
    ) -> SubmissionState {
        let Some(payload) = self.begin(values) else {
            return self.state.clone();
        };
        let outcome = transport.submit_intake(&payload).await;
        self.resolve(outcome)
    }

    /// Back to `Idle`, dropping any message
    pub fn clear(&mut self) {
        self.state = SubmissionState::Idle;
    }
}
