//! Application state and core logic

use crate::config::ServiceOption;
use crate::state::{FieldName, IntakeSession};
use crate::transport::{IntakeTransport, TransportError};
use anyhow::{anyhow, Result};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use std::sync::Arc;
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};

/// Focus slots: the seven fields followed by the actions row
const FOCUS_COUNT: usize = FieldName::ALL.len() + 1;

/// Index of the actions row in the focus order
pub const ACTIONS_ROW: usize = FieldName::ALL.len();

/// Action buttons, in panel order
pub const BUTTON_RESET: usize = 0;
pub const BUTTON_SUBMIT: usize = 1;
const BUTTON_COUNT: usize = 2;

type Outcome = Result<(), TransportError>;

/// Main application struct
pub struct App {
    /// The intake form session
    pub session: IntakeSession,
    /// Transport used for submissions
    transport: Arc<dyn IntakeTransport>,
    /// Selectable services, in display order
    pub services: Vec<ServiceOption>,
    /// Focused slot (see [`ACTIONS_ROW`])
    pub active_field: usize,
    /// Selected button on the actions row
    pub selected_button: usize,
    /// Highlighted option in the services group
    pub service_cursor: usize,
    /// Transient feedback shown in the status bar
    pub status_message: Option<String>,
    /// Whether the app should quit
    quit: bool,
    outcome_tx: UnboundedSender<Outcome>,
    outcome_rx: UnboundedReceiver<Outcome>,
}

impl App {
    /// Create a new App instance
    pub fn new(
        session: IntakeSession,
        transport: Arc<dyn IntakeTransport>,
        services: Vec<ServiceOption>,
    ) -> Self {
        let (outcome_tx, outcome_rx) = mpsc::unbounded_channel();
        Self {
            session,
            transport,
            services,
            active_field: 0,
            selected_button: BUTTON_SUBMIT,
            service_cursor: 0,
            status_message: None,
            quit: false,
            outcome_tx,
            outcome_rx,
        }
    }

    /// Check if app should quit
    pub fn should_quit(&self) -> bool {
        self.quit
    }

    /// Field under focus, `None` on the actions row
    pub fn focused_field(&self) -> Option<FieldName> {
        FieldName::ALL.get(self.active_field).copied()
    }

    pub fn is_actions_row_active(&self) -> bool {
        self.active_field == ACTIONS_ROW
    }

    pub fn next_field(&mut self) {
        self.active_field = (self.active_field + 1) % FOCUS_COUNT;
    }

    pub fn prev_field(&mut self) {
        if self.active_field == 0 {
            self.active_field = FOCUS_COUNT - 1;
        } else {
            self.active_field -= 1;
        }
    }

    /// Handle a key event
    pub fn handle_key(&mut self, key: KeyEvent) -> Result<()> {
        // Clear any status messages on key press
        self.status_message = None;

        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        match key.code {
            KeyCode::Esc => {
                self.quit = true;
                return Ok(());
            }
            KeyCode::Char('c') if ctrl => {
                self.quit = true;
                return Ok(());
            }
            KeyCode::Char('s') if ctrl => {
                self.submit();
                return Ok(());
            }
            KeyCode::Char('r') if ctrl => {
                self.reset();
                return Ok(());
            }
            KeyCode::Char('y') if key.modifiers.contains(crate::platform::COPY_MODIFIER) => {
                if let Err(e) = self.copy_link() {
                    tracing::warn!("Copy failed: {e}");
                    self.status_message = Some("Could not copy link".to_string());
                }
                return Ok(());
            }
            KeyCode::Tab => {
                self.next_field();
                return Ok(());
            }
            KeyCode::BackTab => {
                self.prev_field();
                return Ok(());
            }
            _ => {}
        }

        match self.focused_field() {
            None => self.handle_actions_key(key),
            Some(FieldName::ServicesInterestedIn) => self.handle_services_key(key),
            Some(FieldName::AcceptTerms) => {
                if matches!(key.code, KeyCode::Char(' ') | KeyCode::Enter) {
                    self.session.toggle_accept_terms();
                }
            }
            Some(field) if field.is_text() => self.handle_text_key(field, key),
            Some(_) => {}
        }
        Ok(())
    }

    fn handle_text_key(&mut self, field: FieldName, key: KeyEvent) {
        match key.code {
            KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.session.push_char(field, c)
            }
            KeyCode::Backspace => self.session.pop_char(field),
            KeyCode::Enter | KeyCode::Down => self.next_field(),
            KeyCode::Up => self.prev_field(),
            _ => {}
        }
    }

    fn handle_services_key(&mut self, key: KeyEvent) {
        let count = self.services.len();
        match key.code {
            KeyCode::Up | KeyCode::Char('k') if count > 0 => {
                self.service_cursor = (self.service_cursor + count - 1) % count;
            }
            KeyCode::Down | KeyCode::Char('j') if count > 0 => {
                self.service_cursor = (self.service_cursor + 1) % count;
            }
            KeyCode::Char(' ') | KeyCode::Enter => {
                if let Some(option) = self.services.get(self.service_cursor) {
                    let value = option.value.clone();
                    self.session.toggle_service(&value);
                }
            }
            _ => {}
        }
    }

    fn handle_actions_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Left | KeyCode::Up | KeyCode::Char('h') | KeyCode::Char('k') => {
                self.selected_button = (self.selected_button + BUTTON_COUNT - 1) % BUTTON_COUNT;
            }
            KeyCode::Right | KeyCode::Down | KeyCode::Char('l') | KeyCode::Char('j') => {
                self.selected_button = (self.selected_button + 1) % BUTTON_COUNT;
            }
            KeyCode::Enter | KeyCode::Char(' ') => match self.selected_button {
                BUTTON_SUBMIT => self.submit(),
                BUTTON_RESET => self.reset(),
                _ => {}
            },
            _ => {}
        }
    }

    /// Validate, write the link and send the payload in the background.
    ///
    /// The outcome comes back through [`App::poll_submission`].
    pub fn submit(&mut self) {
        let Some(payload) = self.session.attempt_submit() else {
            let first_error = self.session.errors().fields().next();
            if let Some(field) = first_error {
                self.focus_field(field);
            }
            return;
        };

        let transport = Arc::clone(&self.transport);
        let tx = self.outcome_tx.clone();
        tokio::spawn(async move {
            let outcome = transport.submit_intake(&payload).await;
            if tx.send(outcome).is_err() {
                tracing::warn!("Submission finished after the form was closed");
            }
        });
    }

    /// Manual reset; ignored while a submission is in flight
    pub fn reset(&mut self) {
        if self.session.reset() {
            self.active_field = 0;
            self.service_cursor = 0;
            self.selected_button = BUTTON_SUBMIT;
        }
    }

    /// Apply a finished submission, if one arrived. Returns true when the
    /// state changed.
    pub fn poll_submission(&mut self) -> bool {
        match self.outcome_rx.try_recv() {
            Ok(outcome) => {
                self.apply_outcome(outcome);
                true
            }
            Err(_) => false,
        }
    }

    fn apply_outcome(&mut self, outcome: Outcome) {
        let state = self.session.complete_submission(outcome);
        if matches!(state, crate::state::SubmissionState::Succeeded(_)) {
            self.active_field = 0;
            self.service_cursor = 0;
        }
    }

    fn focus_field(&mut self, field: FieldName) {
        if let Some(index) = FieldName::ALL.iter().position(|f| *f == field) {
            self.active_field = index;
        }
    }

    /// Copy the current shareable link to the clipboard
    fn copy_link(&mut self) -> Result<()> {
        let link = self.session.location().to_string();
        let mut clipboard =
            arboard::Clipboard::new().map_err(|e| anyhow!("Clipboard unavailable: {}", e))?;
        clipboard
            .set_text(link)
            .map_err(|e| anyhow!("Failed to copy link: {}", e))?;
        self.status_message = Some("Link copied to clipboard".to_string());
        Ok(())
    }

    /// Wait for the in-flight submission and apply it
    #[cfg(test)]
    async fn wait_for_submission(&mut self) {
        if let Some(outcome) = self.outcome_rx.recv().await {
            self.apply_outcome(outcome);
        }
    }
}
