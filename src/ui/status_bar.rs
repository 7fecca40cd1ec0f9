use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::ui::controller::FormController;
use crate::ui::format::CurrencyFormat;

/// Title line with connection state.
pub fn render_header(f: &mut Frame, area: Rect, ctl: &FormController) {
    let status = if ctl.is_connected() {
        Span::styled(
            format!("● Connected - {} subventions loaded", ctl.records().len()),
            Style::default().fg(Color::Yellow),
        )
    } else {
        Span::styled("○ Disconnected", Style::default().fg(Color::Red))
    };
    let line = Line::from(vec![
        Span::styled(
            " SUBVENTION MANAGEMENT ",
            Style::default()
                .fg(Color::White)
                .bg(Color::Blue)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw("  "),
        status,
    ]);
    f.render_widget(Paragraph::new(line), area);
}

/// Statistics line: record count and total amount as reported by the database.
pub fn render_stats(f: &mut Frame, area: Rect, ctl: &FormController, fmt: &CurrencyFormat) {
    let stats = ctl.stats();
    let refreshed = ctl
        .last_refresh()
        .map(|t| t.format("%H:%M:%S").to_string())
        .unwrap_or_else(|| "never".to_string());
    let line = Line::from(vec![
        Span::styled(
            format!(" Total subventions: {}", stats.count),
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw("    "),
        Span::styled(
            format!("Total amount: {}", fmt.format(stats.total)),
            Style::default()
                .fg(Color::Green)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw("    "),
        Span::styled(
            format!("Refreshed {}", refreshed),
            Style::default().fg(Color::DarkGray),
        ),
    ]);
    f.render_widget(Paragraph::new(line), area);
}
