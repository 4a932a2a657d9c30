//! Client intake form rendering

use super::field_renderer::{
    checkbox_group_height, draw_checkbox, draw_checkbox_group, draw_help_text, draw_text_field,
    FieldProps, CHECKBOX_HEIGHT, TEXT_FIELD_HEIGHT,
};
use crate::app::{App, BUTTON_RESET, BUTTON_SUBMIT};
use crate::platform::{COPY_LINK_SHORTCUT, RESET_SHORTCUT, SUBMIT_SHORTCUT};
use crate::state::{FieldErrorInput, FieldName, SubmissionState};
use crate::ui::components::{
    render_action_button, render_alert, AlertVariant, ALERT_HEIGHT, BUTTON_HEIGHT,
};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    widgets::{Block, Borders},
    Frame,
};

/// Draw the intake form with action sidebar
pub fn draw(frame: &mut Frame, area: Rect, app: &App) {
    // Split into form (left) and action panel (right)
    let main_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Min(40),    // Form area
            Constraint::Length(20), // Action panel
        ])
        .split(area);

    draw_form(frame, main_chunks[0], app);
    draw_action_panel(frame, main_chunks[1], app);
}

/// Banner for the current submission state, if any
fn banner(state: &SubmissionState) -> Option<(AlertVariant, &str)> {
    match state {
        SubmissionState::Succeeded(msg) => Some((AlertVariant::Success, msg.as_str())),
        SubmissionState::Failed(msg) => Some((AlertVariant::Error, msg.as_str())),
        SubmissionState::Idle | SubmissionState::Submitting => None,
    }
}

/// Draw the banner and form fields
fn draw_form(frame: &mut Frame, area: Rect, app: &App) {
    let banner = banner(app.session.state());
    let banner_height = if banner.is_some() { ALERT_HEIGHT } else { 0 };
    let services_height = checkbox_group_height(app.services.len());

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(banner_height),     // Banner
            Constraint::Length(TEXT_FIELD_HEIGHT), // Full name
            Constraint::Length(TEXT_FIELD_HEIGHT), // Email
            Constraint::Length(TEXT_FIELD_HEIGHT), // Company name
            Constraint::Length(services_height),   // Services
            Constraint::Length(TEXT_FIELD_HEIGHT), // Budget
            Constraint::Length(TEXT_FIELD_HEIGHT), // Start date
            Constraint::Length(CHECKBOX_HEIGHT),   // Accept terms
            Constraint::Length(1),                 // Help text
            Constraint::Min(0),
        ])
        .margin(1)
        .split(area);

    let form_focused = !app.is_actions_row_active();
    let border_color = if form_focused {
        Color::Cyan
    } else {
        Color::DarkGray
    };

    let block = Block::default()
        .title(" Client Onboarding Form ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border_color));
    frame.render_widget(block, area);

    if let Some((variant, message)) = banner {
        render_alert(frame, chunks[0], variant, message);
    }

    let values = app.session.values();
    let errors = app.session.errors();
    let focused = app.focused_field();

    // Inline fields pass the structured error; the group gets the bare message
    let structured_error =
        |field: FieldName| errors.get(field).map(FieldErrorInput::structured);

    for (field, chunk) in [
        (FieldName::FullName, chunks[1]),
        (FieldName::Email, chunks[2]),
        (FieldName::CompanyName, chunks[3]),
        (FieldName::Budget, chunks[5]),
        (FieldName::ProjectStartDate, chunks[6]),
    ] {
        let error = structured_error(field);
        let props = FieldProps {
            label: field.label(),
            required: field.is_required(),
            is_active: focused == Some(field),
            error: error.as_ref(),
        };
        draw_text_field(frame, chunk, &props, values.text(field));
    }

    let services_error = errors
        .get(FieldName::ServicesInterestedIn)
        .map(FieldErrorInput::from);
    let services_props = FieldProps {
        label: FieldName::ServicesInterestedIn.label(),
        required: true,
        is_active: focused == Some(FieldName::ServicesInterestedIn),
        error: services_error.as_ref(),
    };
    draw_checkbox_group(
        frame,
        chunks[4],
        &services_props,
        &app.services,
        &values.services_interested_in,
        app.service_cursor,
    );

    let terms_error = structured_error(FieldName::AcceptTerms);
    let terms_props = FieldProps {
        label: FieldName::AcceptTerms.label(),
        required: true,
        is_active: focused == Some(FieldName::AcceptTerms),
        error: terms_error.as_ref(),
    };
    draw_checkbox(frame, chunks[7], &terms_props, values.accept_terms);

    draw_help_text(
        frame,
        chunks[8],
        &[
            ("Tab", "next field"),
            ("Space", "toggle"),
            (SUBMIT_SHORTCUT, "submit"),
            (RESET_SHORTCUT, "reset"),
            (COPY_LINK_SHORTCUT, "copy link"),
            ("Esc", "quit"),
        ],
    );
}

/// Draw the action panel sidebar
fn draw_action_panel(frame: &mut Frame, area: Rect, app: &App) {
    let is_focused = app.is_actions_row_active();
    let submitting = app.session.is_submitting();

    let border_color = if is_focused {
        Color::Cyan
    } else {
        Color::DarkGray
    };

    let block = Block::default()
        .title(" Actions ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border_color));

    let inner_area = block.inner(area);
    frame.render_widget(block, area);

    let button_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(BUTTON_HEIGHT), // Reset
            Constraint::Length(BUTTON_HEIGHT), // Submit
            Constraint::Min(0),
        ])
        .split(inner_area);

    render_action_button(
        frame,
        button_chunks[BUTTON_RESET],
        "Reset",
        is_focused && app.selected_button == BUTTON_RESET,
        !submitting,
        None,
    );

    let submit_label = if submitting { "Submitting..." } else { "Submit" };
    render_action_button(
        frame,
        button_chunks[BUTTON_SUBMIT],
        submit_label,
        is_focused && app.selected_button == BUTTON_SUBMIT,
        !submitting,
        Some(Color::Green),
    );
}
