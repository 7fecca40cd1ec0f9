use ratatui::{
    layout::{Constraint, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Row, Table, TableState},
    Frame,
};

use crate::domain::Subvention;
use crate::ui::controller::{Focus, FormController};
use crate::ui::format::CurrencyFormat;

pub const HEADERS: [&str; 4] = ["ID", "Country", "Subsidy type", "Amount"];

/// Display strings for one grid row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowView {
    pub id: String,
    pub country: String,
    pub subsidy_type: String,
    pub amount: String,
}

/// Pure projection of the record list into grid rows, in list order.
pub fn rows(records: &[Subvention], fmt: &CurrencyFormat) -> Vec<RowView> {
    records
        .iter()
        .map(|r| RowView {
            id: r.id.map(|id| id.to_string()).unwrap_or_default(),
            country: r.country.clone(),
            subsidy_type: r.subsidy_type.clone(),
            amount: fmt.format(r.amount),
        })
        .collect()
}

pub fn render(f: &mut Frame, area: Rect, ctl: &FormController, fmt: &CurrencyFormat) {
    let border_color = if ctl.focus() == Focus::Table {
        Color::Cyan
    } else {
        Color::DarkGray
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .title(" Subventions ")
        .border_style(Style::default().fg(border_color));

    if ctl.records().is_empty() {
        let empty = Paragraph::new(vec![
            Line::from(""),
            Line::from(Span::styled(
                "No subventions yet",
                Style::default()
                    .fg(Color::DarkGray)
                    .add_modifier(Modifier::BOLD),
            )),
            Line::from(Span::styled(
                "Fill in the form and press F2 to create one",
                Style::default().fg(Color::DarkGray),
            )),
        ])
        .block(block)
        .alignment(ratatui::layout::Alignment::Center);
        f.render_widget(empty, area);
        return;
    }

    let header = Row::new(HEADERS).style(
        Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD),
    );
    let body: Vec<Row> = rows(ctl.records(), fmt)
        .into_iter()
        .map(|r| Row::new([r.id, r.country, r.subsidy_type, r.amount]))
        .collect();
    let widths = [
        Constraint::Length(6),
        Constraint::Percentage(30),
        Constraint::Percentage(30),
        Constraint::Min(16),
    ];
    let table = Table::new(body, widths)
        .header(header)
        .block(block)
        .row_highlight_style(
            Style::default()
                .bg(Color::Blue)
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol("> ");

    let mut state = TableState::default().with_selected(ctl.selected_index());
    f.render_stateful_widget(table, area, &mut state);
}
