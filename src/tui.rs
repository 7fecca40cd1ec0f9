//! Terminal setup and the single-threaded event loop.

use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;
use std::time::Duration;

use crate::error::AppError;
use crate::ui::keys::{action_for, apply, KeyContext};
use crate::ui::{FormController, UI};

const POLL_INTERVAL: Duration = Duration::from_millis(200);

/// Take over the terminal, run the form until the user quits, then restore it.
/// The terminal is restored even when the loop fails.
pub fn run_tui(ctl: &mut FormController, ui: &UI) -> Result<(), AppError> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    if let Err(e) = execute!(stdout, EnterAlternateScreen) {
        let _ = disable_raw_mode();
        return Err(e.into());
    }
    let backend = CrosstermBackend::new(stdout);
    let res = Terminal::new(backend)
        .map_err(AppError::from)
        .and_then(|mut terminal| {
            let res = run_event_loop(&mut terminal, ctl, ui);
            let _ = terminal.show_cursor();
            res
        });

    disable_raw_mode()?;
    execute!(io::stdout(), LeaveAlternateScreen)?;
    res
}

fn run_event_loop<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    ctl: &mut FormController,
    ui: &UI,
) -> Result<(), AppError> {
    ctl.refresh();

    loop {
        terminal.draw(|f| ui.render(f, ctl))?;

        if !event::poll(POLL_INTERVAL)? {
            continue;
        }
        match event::read()? {
            Event::Key(key) if key.kind == KeyEventKind::Press => {
                if let Some(action) = action_for(key, KeyContext::of(ctl)) {
                    log::debug!("Key action: {:?}", action);
                    if apply(ctl, action) {
                        break;
                    }
                }
            }
            // Resize and the rest are picked up by the next draw
            _ => {}
        }
    }

    Ok(())
}
