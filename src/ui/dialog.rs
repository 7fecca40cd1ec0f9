use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

use crate::ui::controller::{FormController, MessageKind};
use crate::ui::layout::centered;

/// Draws the delete confirmation or the current message, if any.
/// Confirmation wins: it is the only dialog that needs an answer.
pub fn render(f: &mut Frame, ctl: &FormController) {
    if let Some(id) = ctl.pending_delete() {
        let body = vec![
            Line::from(format!("Delete subvention {}?", id)),
            Line::from(""),
            Line::from(Span::styled(
                "y = delete    n / Esc = cancel",
                Style::default().fg(Color::DarkGray),
            )),
        ];
        draw(f, " Confirm delete ", Color::Yellow, body);
        return;
    }

    if let Some(message) = ctl.message() {
        let (title, color) = match message.kind {
            MessageKind::Info => (" Information ", Color::Cyan),
            MessageKind::Validation => (" Validation error ", Color::Yellow),
            MessageKind::Error => (" Error ", Color::Red),
        };
        let body = vec![
            Line::from(message.text.as_str()),
            Line::from(""),
            Line::from(Span::styled(
                "Press any key",
                Style::default().fg(Color::DarkGray),
            )),
        ];
        draw(f, title, color, body);
    }
}

fn draw(f: &mut Frame, title: &str, color: Color, body: Vec<Line>) {
    let area: Rect = centered(f.area(), 50, 7);
    let block = Block::default()
        .borders(Borders::ALL)
        .title(Span::styled(
            title,
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        ))
        .border_style(Style::default().fg(color));
    let paragraph = Paragraph::new(body)
        .block(block)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true });
    f.render_widget(Clear, area);
    f.render_widget(paragraph, area);
}
