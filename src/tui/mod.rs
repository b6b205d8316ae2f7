//! Interactive full-screen pie chart view.
//!
//! ```rust,no_run
//! use flopmap::chart::PieChart;
//! use flopmap::complexity::compute_breakdown;
//! use flopmap::core::Hyperparameters;
//! use flopmap::tui::ChartViewer;
//!
//! let breakdown = compute_breakdown(&Hyperparameters::default())?;
//! let chart = PieChart::from_breakdown(&breakdown)?;
//!
//! // Blocks until the user presses q, Esc or Enter
//! ChartViewer::new()?.show(&chart)?;
//! # Ok::<(), flopmap::errors::FlopmapError>(())
//! ```

pub mod theme;

use crate::chart::widget::PieChartWidget;
use crate::chart::PieChart;
use crate::errors::{FlopmapError, Result};
use crate::observability::set_tui_active;
use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;
use theme::Theme;

/// Owns the terminal while the chart is on screen
pub struct ChartViewer {
    terminal: Terminal<CrosstermBackend<io::Stdout>>,
    theme: Theme,
    active: bool,
}

impl ChartViewer {
    /// Switch the terminal into raw mode on the alternate screen
    pub fn new() -> Result<Self> {
        enable_raw_mode().map_err(terminal_error)?;
        set_tui_active(true);
        let terminal = undo_on_error(enter_alternate_screen(), leave_raw_mode)?;

        Ok(Self {
            terminal,
            theme: Theme::default_theme(),
            active: true,
        })
    }

    /// Draw `chart` and block until the user dismisses it
    pub fn show(mut self, chart: &PieChart) -> Result<()> {
        loop {
            self.terminal
                .draw(|f| f.render_widget(PieChartWidget::new(chart, &self.theme), f.area()))
                .map_err(terminal_error)?;

            match event::read().map_err(terminal_error)? {
                Event::Key(key) if is_dismiss_key(&key) => break,
                _ => {}
            }
        }
        self.cleanup()
    }

    /// Restore the terminal
    pub fn cleanup(&mut self) -> Result<()> {
        if !self.active {
            return Ok(());
        }
        self.active = false;
        set_tui_active(false);
        disable_raw_mode().map_err(terminal_error)?;
        execute!(self.terminal.backend_mut(), LeaveAlternateScreen).map_err(terminal_error)?;
        self.terminal.show_cursor().map_err(terminal_error)?;
        Ok(())
    }
}

impl Drop for ChartViewer {
    fn drop(&mut self) {
        let _ = self.cleanup();
    }
}

fn enter_alternate_screen() -> Result<Terminal<CrosstermBackend<io::Stdout>>> {
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen).map_err(terminal_error)?;
    Terminal::new(CrosstermBackend::new(stdout)).map_err(|err| {
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        terminal_error(err)
    })
}

fn leave_raw_mode() {
    set_tui_active(false);
    let _ = disable_raw_mode();
}

/// Run `undo` when setup failed partway, then pass the result through
fn undo_on_error<T>(result: Result<T>, undo: impl FnOnce()) -> Result<T> {
    if result.is_err() {
        undo();
    }
    result
}

fn is_dismiss_key(key: &KeyEvent) -> bool {
    key.kind == KeyEventKind::Press
        && matches!(
            key.code,
            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc | KeyCode::Enter
        )
}

fn terminal_error(err: impl std::fmt::Display) -> FlopmapError {
    FlopmapError::Terminal(err.to_string())
}
