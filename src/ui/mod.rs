//! Form controller and its terminal view.

pub mod controller;
pub mod dialog;
pub mod form_panel;
pub mod format;
pub mod keys;
pub mod layout;
pub mod status_bar;
pub mod table;
pub mod validation;

use ratatui::Frame;

pub use controller::{FormController, Outcome};
pub use format::{CurrencyFormat, Locale};

/// Main UI renderer
pub struct UI {
    pub format: CurrencyFormat,
}

impl UI {
    pub fn new(format: CurrencyFormat) -> Self {
        Self { format }
    }

    /// Render the entire screen from controller state
    pub fn render(&self, f: &mut Frame, ctl: &FormController) {
        let (header_area, content_area, stats_area) = layout::Layout::main(f.area());
        status_bar::render_header(f, header_area, ctl);
        status_bar::render_stats(f, stats_area, ctl, &self.format);

        let (table_area, form_area) = layout::Layout::panes(content_area);
        table::render(f, table_area, ctl, &self.format);
        form_panel::render(f, form_area, ctl);

        dialog::render(f, ctl);
    }
}
