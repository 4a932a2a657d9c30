//! Field rendering utilities for the intake form
//!
//! Every renderer takes a value, a label, the required flag and an optional
//! [`FieldErrorInput`], and reserves one line under the widget for the error.

use crate::config::ServiceOption;
use crate::state::{error_display, FieldErrorInput};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// Rows taken by a text field: bordered input plus the error line
pub const TEXT_FIELD_HEIGHT: u16 = 4;

/// Rows taken by the single checkbox plus its error line
pub const CHECKBOX_HEIGHT: u16 = 2;

/// Rows taken by a checkbox group with `options` entries
pub fn checkbox_group_height(options: usize) -> u16 {
    options as u16 + 3
}

/// Common inputs of a form field
pub struct FieldProps<'a> {
    pub label: &'a str,
    pub required: bool,
    pub is_active: bool,
    pub error: Option<&'a FieldErrorInput>,
}

impl FieldProps<'_> {
    fn title(&self) -> String {
        if self.required {
            format!(" {} * ", self.label)
        } else {
            format!(" {} ", self.label)
        }
    }

    fn border_style(&self) -> Style {
        if error_display(self.error).is_some() {
            Style::default().fg(Color::Red)
        } else if self.is_active {
            Style::default().fg(Color::Cyan)
        } else {
            Style::default().fg(Color::DarkGray)
        }
    }
}

/// Split `area` into the widget and the error line below it
fn split_error_line(area: Rect) -> (Rect, Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(1), Constraint::Length(1)])
        .split(area);
    (chunks[0], chunks[1])
}

fn draw_error_line(frame: &mut Frame, area: Rect, error: Option<&FieldErrorInput>) {
    if let Some(message) = error_display(error) {
        let line = Paragraph::new(Line::from(Span::styled(
            format!(" {message}"),
            Style::default().fg(Color::Red),
        )));
        frame.render_widget(line, area);
    }
}

/// Draw a single-line text input
pub fn draw_text_field(frame: &mut Frame, area: Rect, props: &FieldProps, value: &str) {
    let (input_area, error_area) = split_error_line(area);

    let style = if props.is_active {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default().fg(Color::DarkGray)
    };

    let display_value = if value.is_empty() && !props.is_active {
        "(empty)"
    } else {
        value
    };

    let cursor = if props.is_active { "▌" } else { "" };

    let content = Paragraph::new(Line::from(vec![
        Span::styled(display_value, style),
        Span::styled(cursor, Style::default().fg(Color::Cyan)),
    ]));

    let block = Block::default()
        .title(props.title())
        .borders(Borders::ALL)
        .border_style(props.border_style());

    frame.render_widget(content.block(block), input_area);
    draw_error_line(frame, error_area, props.error);
}

fn checkbox_mark(checked: bool) -> &'static str {
    if checked {
        "[x]"
    } else {
        "[ ]"
    }
}

/// Draw a single checkbox with its label on one line
pub fn draw_checkbox(frame: &mut Frame, area: Rect, props: &FieldProps, checked: bool) {
    let (box_area, error_area) = split_error_line(area);

    let label_style = if props.is_active {
        Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default()
    };

    let line = Line::from(vec![
        Span::styled(format!(" {} ", checkbox_mark(checked)), props.border_style()),
        Span::styled(props.label, label_style),
    ]);
    frame.render_widget(Paragraph::new(line), box_area);
    draw_error_line(frame, error_area, props.error);
}

/// Draw a bordered group of checkboxes, highlighting the row at `cursor`
pub fn draw_checkbox_group(
    frame: &mut Frame,
    area: Rect,
    props: &FieldProps,
    options: &[ServiceOption],
    selected: &[String],
    cursor: usize,
) {
    let (group_area, error_area) = split_error_line(area);

    let lines: Vec<Line> = options
        .iter()
        .enumerate()
        .map(|(idx, option)| {
            let is_checked = selected.iter().any(|s| s == &option.value);
            let is_cursor = props.is_active && idx == cursor;
            let style = if is_cursor {
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD)
            } else if is_checked {
                Style::default().fg(Color::Green)
            } else {
                Style::default()
            };
            let pointer = if is_cursor { "▸" } else { " " };
            Line::from(Span::styled(
                format!("{pointer}{} {}", checkbox_mark(is_checked), option.label),
                style,
            ))
        })
        .collect();

    let block = Block::default()
        .title(props.title())
        .borders(Borders::ALL)
        .border_style(props.border_style());

    frame.render_widget(Paragraph::new(lines).block(block), group_area);
    draw_error_line(frame, error_area, props.error);
}

/// Draw the key help line at the bottom of the form
pub fn draw_help_text(frame: &mut Frame, area: Rect, hints: &[(&str, &str)]) {
    let mut spans = Vec::new();
    for (key, action) in hints {
        spans.push(Span::styled(*key, Style::default().fg(Color::Cyan)));
        spans.push(Span::raw(format!(": {action}  ")));
    }
    let help = Paragraph::new(Line::from(spans)).style(Style::default().fg(Color::DarkGray));
    frame.render_widget(help, area);
}
