use ratatui::{
    layout::{Constraint, Direction, Layout, Position, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::ui::controller::{Focus, FormController};

fn field_block(title: &str, focused: bool) -> Block<'_> {
    let color = if focused { Color::Green } else { Color::DarkGray };
    Block::default()
        .borders(Borders::ALL)
        .title(title)
        .border_style(Style::default().fg(color))
}

fn action_span(label: &str, enabled: bool) -> Span<'_> {
    let style = if enabled {
        Style::default().fg(Color::White).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::DarkGray)
    };
    Span::styled(label, style)
}

pub fn render(f: &mut Frame, area: Rect, ctl: &FormController) {
    let outer = Block::default()
        .borders(Borders::ALL)
        .title(match ctl.selected() {
            Some(id) => format!(" Edit subvention {} ", id),
            None => " New subvention ".to_string(),
        })
        .border_style(Style::default().fg(Color::Blue));
    let inner = outer.inner(area);
    f.render_widget(outer, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Country
            Constraint::Length(3), // Type picker
            Constraint::Length(3), // Amount
            Constraint::Length(1), // Hint
            Constraint::Length(1),
            Constraint::Min(0), // Actions
        ])
        .split(inner);

    let form = ctl.form();
    let focus = ctl.focus();

    let country = Paragraph::new(form.country.as_str())
        .block(field_block(" Country ", focus == Focus::Country));
    f.render_widget(country, chunks[0]);

    let picker = Paragraph::new(Line::from(vec![
        Span::raw("◀ "),
        Span::styled(
            form.subsidy_type.as_str(),
            Style::default().add_modifier(Modifier::BOLD),
        ),
        Span::raw(" ▶"),
    ]))
    .block(field_block(" Subsidy type ", focus == Focus::SubsidyType));
    f.render_widget(picker, chunks[1]);

    let amount = Paragraph::new(form.amount.as_str())
        .block(field_block(" Amount ", focus == Focus::Amount));
    f.render_widget(amount, chunks[2]);

    let hint = Paragraph::new(Span::styled(
        "Example: 40000000 or 40000000.50",
        Style::default()
            .fg(Color::Gray)
            .add_modifier(Modifier::ITALIC),
    ));
    f.render_widget(hint, chunks[3]);

    let actions = Paragraph::new(vec![
        Line::from(vec![
            action_span("F2 Create", ctl.can_create()),
            Span::raw("   "),
            action_span("F3 Update", ctl.can_update()),
        ]),
        Line::from(vec![
            action_span("F4 Delete", ctl.can_delete()),
            Span::raw("   "),
            action_span("F5 Refresh", true),
        ]),
        Line::from(""),
        Line::from(Span::styled(
            "Tab focus · ↑↓ select · Esc clear · F10 quit",
            Style::default().fg(Color::DarkGray),
        )),
    ]);
    f.render_widget(actions, chunks[5]);

    // Cursor at the end of the focused text field
    let cursor_field = match focus {
        Focus::Country => Some((chunks[0], form.country.chars().count())),
        Focus::Amount => Some((chunks[2], form.amount.chars().count())),
        Focus::Table | Focus::SubsidyType => None,
    };
    if let Some((rect, len)) = cursor_field {
        f.set_cursor_position(cursor_position(rect, len));
    }
}

/// Cursor after `len` typed characters inside a bordered field, clamped to
/// the last inner column.
fn cursor_position(field: Rect, len: usize) -> Position {
    let max_x = field.x + field.width.saturating_sub(2);
    let len = u16::try_from(len).unwrap_or(u16::MAX);
    let x = (field.x + 1).saturating_add(len).min(max_x);
    Position::new(x, field.y + 1)
}
