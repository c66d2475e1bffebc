use std::io::{self, Stdout};

use anyhow::{Context, Result};
use crossterm::cursor::{Hide, Show};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, SetTitle, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;

const WINDOW_TITLE: &str = "delivery-desk";

type DeskTerminal = Terminal<CrosstermBackend<Stdout>>;

/// Raw-mode alternate screen for the browser.
///
/// The screen is left exactly once: by [`restore`](Self::restore) on a normal
/// exit, or by `Drop` on an early return or panic.
pub struct TerminalManager {
    terminal: DeskTerminal,
    active: bool,
}

impl TerminalManager {
    pub fn new() -> Result<Self> {
        enable_raw_mode().context("Failed to enable raw mode")?;

        let mut stdout = io::stdout();
        if let Err(e) = execute!(stdout, EnterAlternateScreen, Hide, SetTitle(WINDOW_TITLE)) {
            let _ = disable_raw_mode();
            return Err(e).context("Failed to enter the alternate screen");
        }

        let terminal = Terminal::new(CrosstermBackend::new(stdout))
            .context("Failed to initialize terminal")?;
        Ok(Self { terminal, active: true })
    }

    pub fn terminal_mut(&mut self) -> &mut DeskTerminal {
        &mut self.terminal
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Leave the alternate screen, reporting the first failure
    pub fn restore(mut self) -> Result<()> {
        self.leave()
    }

    fn leave(&mut self) -> Result<()> {
        if !self.active {
            return Ok(());
        }
        self.active = false;

        let raw = disable_raw_mode().context("Failed to disable raw mode");
        let screen = execute!(self.terminal.backend_mut(), Show, LeaveAlternateScreen)
            .context("Failed to leave the alternate screen");
        raw.and(screen)
    }
}

impl Drop for TerminalManager {
    fn drop(&mut self) {
        // Errors are ignored; this may run while unwinding
        if self.is_active() {
            let _ = self.leave();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_restore_then_drop_leaves_once() {
        // No TTY in CI: setup fails and there is nothing to restore
        let Ok(manager) = TerminalManager::new() else {
            return;
        };

        assert!(manager.is_active());
        assert!(manager.restore().is_ok());
    }

    #[test]
    fn test_leave_is_idempotent() {
        let Ok(mut manager) = TerminalManager::new() else {
            return;
        };

        assert!(manager.leave().is_ok());
        assert!(!manager.is_active());
        // Second leave, and the one in Drop, are no-ops
        assert!(manager.leave().is_ok());
    }
}
