//! Raw-mode terminal session for the explorer screen.

use std::io::{self, Stdout};

use crossterm::{
    cursor, execute,
    terminal::{self, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Frame, Terminal};

use crate::error::Result;

type Backend = CrosstermBackend<Stdout>;

/// Owns the alternate screen for as long as it lives.
///
/// Dropping it leaves the alternate screen even when the event loop bails
/// out early with an error.
pub struct Tui {
    terminal: Terminal<Backend>,
    active: bool,
}

impl Tui {
    pub fn new() -> Result<Self> {
        terminal::enable_raw_mode()?;
        let mut stdout = io::stdout();
        if let Err(e) = execute!(stdout, EnterAlternateScreen) {
            let _ = terminal::disable_raw_mode();
            return Err(e.into());
        }
        let terminal = Terminal::new(CrosstermBackend::new(stdout))?;
        Ok(Self {
            terminal,
            active: true,
        })
    }

    /// Draw one frame.
    pub fn draw(&mut self, render: impl FnOnce(&mut Frame)) -> Result<()> {
        self.terminal.draw(render)?;
        Ok(())
    }

    /// Give the terminal back to the shell. Calling it twice is harmless.
    pub fn restore(&mut self) -> Result<()> {
        if !self.active {
            return Ok(());
        }
        self.active = false;
        leave_screen(&mut io::stdout())
    }
}

impl Drop for Tui {
    fn drop(&mut self) {
        if let Err(e) = self.restore() {
            tracing::warn!(error = %e, "could not restore terminal");
        }
    }
}

fn leave_screen(out: &mut impl io::Write) -> Result<()> {
    terminal::disable_raw_mode()?;
    execute!(out, LeaveAlternateScreen, cursor::Show)?;
    Ok(())
}

/// Chain a panic hook that leaves the alternate screen first, so the
/// panic message lands on the normal screen.
pub fn install_panic_hook() {
    let previous = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = leave_screen(&mut io::stdout());
        previous(info);
    }));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn leave_screen_emits_leave_and_show_cursor() {
        let mut out: Vec<u8> = Vec::new();
        leave_screen(&mut out).unwrap();
        let written = String::from_utf8(out).unwrap();
        assert!(written.contains("\x1b[?1049l"));
        assert!(written.contains("\x1b[?25h"));
    }
}
