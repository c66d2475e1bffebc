//! Interactive terminal browser over the wallet, menu, and templates.

mod app;
mod events;
mod layout;
mod rendering;
mod terminal;

use anyhow::Result;
pub use app::{App, Screen};

use self::terminal::TerminalManager;
use crate::config::Settings;
use crate::store::DataSource;

/// Run the browser until the user quits.
///
/// Records are loaded before the terminal switches to raw mode, so load errors
/// print normally.
pub fn run_interactive(source: &dyn DataSource, settings: &Settings) -> Result<()> {
    let mut app = App::new(source, settings)?;

    let mut manager = TerminalManager::new()?;
    let res = app.run(manager.terminal_mut());
    manager.restore()?;

    res
}
