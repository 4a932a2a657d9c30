//! Intake form session
//!
//! Ties the form values, field errors, shareable link and submission
//! lifecycle together and enforces the order of side effects:
//! validation, link write, transport call, state transition, then the
//! field reset after a success.

use super::form_values::{FieldName, FormValues};
use super::location::Location;
use super::query_sync::{clear_query, load_from_query, save_to_query};
use super::submission::{SubmissionOrchestrator, SubmissionPayload, SubmissionState};
use super::validation::{validate, FieldErrors, ValidationResult};
use crate::transport::{IntakeTransport, TransportError};
use chrono::{Local, NaiveDate};

/// Source of "today" for defaults and the start date rule
pub type Clock = fn() -> NaiveDate;

pub fn local_today() -> NaiveDate {
    Local::now().date_naive()
}

/// One form session
#[derive(Debug, Clone)]
pub struct IntakeSession {
    values: FormValues,
    errors: FieldErrors,
    location: Location,
    orchestrator: SubmissionOrchestrator,
    clock: Clock,
    /// Set by the first submit attempt; edits re-validate from then on
    attempted: bool,
}

impl IntakeSession {
    /// Start a session seeded from the query of `location`
    pub fn new(location: Location) -> Self {
        Self::with_clock(location, local_today)
    }

    pub fn with_clock(location: Location, clock: Clock) -> Self {
        let mut values = FormValues::with_today(clock());
        load_from_query(location.url(), &mut values);
        Self {
            values,
            errors: FieldErrors::default(),
            location,
            orchestrator: SubmissionOrchestrator::new(),
            clock,
            attempted: false,
        }
    }

    pub fn values(&self) -> &FormValues {
        &self.values
    }

    pub fn errors(&self) -> &FieldErrors {
        &self.errors
    }

    pub fn location(&self) -> &Location {
        &self.location
    }

    pub fn state(&self) -> &SubmissionState {
        self.orchestrator.state()
    }

    pub fn is_submitting(&self) -> bool {
        self.orchestrator.is_submitting()
    }

    /// Replace a text field's value
    pub fn set_text(&mut self, field: FieldName, value: &str) {
        self.edit(|values| {
            if let Some(slot) = values.text_mut(field) {
                *slot = value.to_string();
            }
        });
    }

    pub fn push_char(&mut self, field: FieldName, c: char) {
        self.edit(|values| {
            if let Some(slot) = values.text_mut(field) {
                slot.push(c);
            }
        });
    }

    pub fn pop_char(&mut self, field: FieldName) {
        self.edit(|values| {
            if let Some(slot) = values.text_mut(field) {
                slot.pop();
            }
        });
    }

    pub fn toggle_service(&mut self, service: &str) {
        self.edit(|values| values.toggle_service(service));
    }

    pub fn toggle_accept_terms(&mut self) {
        self.edit(|values| values.accept_terms = !values.accept_terms);
    }

    /// Apply an edit unless a submission is in flight
    fn edit(&mut self, apply: impl FnOnce(&mut FormValues)) {
        if self.is_submitting() {
            return;
        }
        apply(&mut self.values);
        if self.attempted {
            self.errors = validate(&self.values, (self.clock)()).errors();
        }
    }

    /// Validate and, when valid, write the link and begin the submission.
    ///
    /// Returns the payload to send, or `None` when a submission is already
    /// in flight or a field failed validation.
    pub fn attempt_submit(&mut self) -> Option<SubmissionPayload> {
        if self.is_submitting() {
            tracing::debug!("Submit ignored: a submission is already in flight");
            return None;
        }
        self.attempted = true;

        let normalized = match validate(&self.values, (self.clock)()) {
            ValidationResult::Valid(normalized) => normalized,
            ValidationResult::Invalid(errors) => {
                tracing::debug!("Submit blocked by {} field error(s)", errors.len());
                self.errors = errors;
                return None;
            }
        };
        self.errors = FieldErrors::default();

        save_to_query(&self.values, &mut self.location);
        let payload = self.orchestrator.begin(&normalized)?;
        tracing::info!("Submitting intake for {}", payload.company_name);
        Some(payload)
    }

    /// Settle the in-flight submission; a success resets the form and link
    pub fn complete_submission(&mut self, outcome: Result<(), TransportError>) -> SubmissionState {
        if !self.is_submitting() {
            tracing::warn!("Submission outcome arrived with nothing in flight");
            return self.state().clone();
        }
        let state = self.orchestrator.resolve(outcome);
        if matches!(state, SubmissionState::Succeeded(_)) {
            self.reset_fields();
        }
        state
    }

    /// Attempt, send and settle in one step
    pub async fn submit(&mut self, transport: &dyn IntakeTransport) -> SubmissionState {
        let Some(payload) = self.attempt_submit() else {
            return self.state().clone();
        };
        let outcome = transport.submit_intake(&payload).await;
        self.complete_submission(outcome)
    }

    /// Manual reset: defaults, bare link, no errors, no message.
    ///
    /// Refused while a submission is in flight; returns whether it ran.
    pub fn reset(&mut self) -> bool {
        if self.is_submitting() {
            return false;
        }
        self.reset_fields();
        self.orchestrator.clear();
        true
    }

    fn reset_fields(&mut self) {
        self.values = FormValues::with_today((self.clock)());
        self.errors = FieldErrors::default();
        self.attempted = false;
        clear_query(&mut self.location);
    }
}
