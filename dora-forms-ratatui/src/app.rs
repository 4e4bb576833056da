//! Terminal session driving a [`SavedForms`] view.

use std::io::{self, Stdout};

use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use dora_forms::{ChartSurface, DocumentGenerator, FormDelegate, FormSource, SavedForms};
use ratatui::{Terminal, prelude::CrosstermBackend, style::Color};
use thiserror::Error;
use tracing::{debug, info};

use crate::draw::draw_view;
use crate::state::UiState;

/// Error type for the terminal front end.
#[derive(Debug, Error)]
pub enum TuiError {
    /// An I/O error occurred.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Color theme for the saved-forms screen.
#[derive(Debug, Clone)]
pub struct Theme {
    pub primary: Color,
    pub secondary: Color,
    pub background: Color,
    pub text: Color,
    pub highlight: Color,
    pub error: Color,
    pub success: Color,
    pub border: Color,
    pub selected_bg: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            primary: Color::Cyan,
            secondary: Color::Blue,
            background: Color::Black,
            text: Color::White,
            highlight: Color::Yellow,
            error: Color::Red,
            success: Color::Green,
            border: Color::Gray,
            selected_bg: Color::DarkGray,
        }
    }
}

/// Full-screen terminal front end for the saved-forms view.
#[derive(Debug, Clone, Default)]
pub struct SavedFormsTui {
    theme: Theme,
}

impl SavedFormsTui {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a custom color theme.
    pub fn with_theme(mut self, theme: Theme) -> Self {
        self.theme = theme;
        self
    }

    fn setup_terminal(&self) -> Result<Terminal<CrosstermBackend<Stdout>>, TuiError> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
        let backend = CrosstermBackend::new(stdout);
        let terminal = Terminal::new(backend)?;
        Ok(terminal)
    }

    fn restore_terminal(
        &self,
        terminal: &mut Terminal<CrosstermBackend<Stdout>>,
    ) -> Result<(), TuiError> {
        disable_raw_mode()?;
        execute!(
            terminal.backend_mut(),
            LeaveAlternateScreen,
            DisableMouseCapture
        )?;
        terminal.show_cursor()?;
        Ok(())
    }

    /// Run the interactive session until the user quits.
    ///
    /// Every frame also renders the chart surface, so a PDF export always
    /// captures the chart that is on screen.
    pub fn run<D, C, G>(&self, view: &mut SavedForms<D, C, G>) -> Result<(), TuiError>
    where
        D: FormDelegate + FormSource,
        C: ChartSurface,
        G: DocumentGenerator,
    {
        let mut terminal = self.setup_terminal()?;
        let result = self.event_loop(&mut terminal, view);
        self.restore_terminal(&mut terminal)?;
        result
    }

    fn event_loop<D, C, G>(
        &self,
        terminal: &mut Terminal<CrosstermBackend<Stdout>>,
        view: &mut SavedForms<D, C, G>,
    ) -> Result<(), TuiError>
    where
        D: FormDelegate + FormSource,
        C: ChartSurface,
        G: DocumentGenerator,
    {
        info!(forms = view.forms().len(), "saved forms session started");
        let mut ui = UiState::default();

        while !ui.quit {
            terminal.draw(|frame| draw_view(frame, view, &ui, &self.theme))?;
            view.render_chart();

            match event::read()? {
                Event::Key(key) => ui.handle_key(view, key),
                Event::Resize(width, height) => debug!(width, height, "terminal resized"),
                _ => {}
            }
        }

        info!("saved forms session ended");
        Ok(())
    }
}
