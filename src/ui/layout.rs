use ratatui::layout::{Constraint, Direction, Layout as RatatuiLayout, Rect};

/// Layout manager for the TUI
pub struct Layout;

impl Layout {
    /// Header, content, statistics bar.
    ///
    /// Returns: (header_area, content_area, stats_area)
    pub fn main(area: Rect) -> (Rect, Rect, Rect) {
        let chunks = RatatuiLayout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1),
                Constraint::Min(0),
                Constraint::Length(1),
            ])
            .split(area);

        (chunks[0], chunks[1], chunks[2])
    }

    /// Grid on the left, form on the right.
    ///
    /// Returns: (table_area, form_area)
    pub fn panes(area: Rect) -> (Rect, Rect) {
        let chunks = RatatuiLayout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Min(40), Constraint::Length(42)])
            .split(area);

        (chunks[0], chunks[1])
    }
}

/// A `width` x `height` box centered in `area`, clamped to fit.
pub fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}
