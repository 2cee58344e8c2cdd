//! Terminal-backed render surface

use std::io::{self, Stdout};

use badge_weather_core::RenderSurface;
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    Terminal,
};
use tracing::{debug, warn};

use crate::components::{Component, WeatherDisplay, WeatherDisplayProps};

/// Owns the terminal for one activation of the view
pub struct TerminalSurface<B: Backend> {
    terminal: Terminal<B>,
    text: String,
    display: WeatherDisplay,
    restore_on_release: bool,
}

impl TerminalSurface<CrosstermBackend<Stdout>> {
    /// Take over stdout: raw mode plus the alternate screen. Released by
    /// [`RenderSurface::release`].
    pub fn acquire() -> io::Result<Self> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        if let Err(err) = execute!(stdout, EnterAlternateScreen) {
            let _ = disable_raw_mode();
            return Err(err);
        }

        let mut terminal = Terminal::new(CrosstermBackend::new(stdout))?;
        terminal.clear()?;
        Ok(Self {
            terminal,
            text: String::new(),
            display: WeatherDisplay,
            restore_on_release: true,
        })
    }
}

impl<B: Backend> TerminalSurface<B> {
    /// Wrap an existing terminal (e.g. over `TestBackend`). Release leaves
    /// the terminal as it is.
    pub fn new(terminal: Terminal<B>) -> Self {
        Self {
            terminal,
            text: String::new(),
            display: WeatherDisplay,
            restore_on_release: false,
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn backend(&self) -> &B {
        self.terminal.backend()
    }

    fn draw(&mut self) -> io::Result<()> {
        let text = self.text.as_str();
        let display = &mut self.display;
        self.terminal.draw(|frame| {
            display.render(frame, frame.area(), WeatherDisplayProps { text });
        })?;
        Ok(())
    }

    fn restore(&mut self) -> io::Result<()> {
        disable_raw_mode()?;
        execute!(io::stdout(), LeaveAlternateScreen)?;
        self.terminal.show_cursor()
    }
}

impl<B: Backend> RenderSurface for TerminalSurface<B> {
    fn set_display_text(&mut self, text: &str) {
        text.clone_into(&mut self.text);
    }

    fn request_immediate_redraw(&mut self) {
        if let Err(err) = self.draw() {
            warn!(error = %err, "draw failed");
        }
    }

    fn release(mut self) {
        if !self.restore_on_release {
            debug!("releasing borrowed terminal");
            return;
        }
        if let Err(err) = self.restore() {
            warn!(error = %err, "could not restore terminal");
        }
    }
}
