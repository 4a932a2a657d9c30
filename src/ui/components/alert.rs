//! Page-level alert banner

use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

/// Rows taken by the banner
pub const ALERT_HEIGHT: u16 = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlertVariant {
    Success,
    Error,
}

impl AlertVariant {
    fn color(&self) -> Color {
        match self {
            Self::Success => Color::Green,
            Self::Error => Color::Red,
        }
    }

    fn title(&self) -> &'static str {
        match self {
            Self::Success => " Success ",
            Self::Error => " Error ",
        }
    }
}

/// Render a bordered banner carrying `message`
pub fn render_alert(frame: &mut Frame, area: Rect, variant: AlertVariant, message: &str) {
    let color = variant.color();
    let block = Block::default()
        .title(Span::styled(
            variant.title(),
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        ))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(color));

    let paragraph = Paragraph::new(Line::from(Span::styled(
        message,
        Style::default().fg(color),
    )))
    .wrap(Wrap { trim: true })
    .block(block);

    frame.render_widget(paragraph, area);
}
