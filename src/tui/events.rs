use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyModifiers};

/// User actions from keyboard events
#[derive(Debug, PartialEq)]
pub enum Action {
    Quit,
    ClearSearch,
    MoveUp,
    MoveDown,
    PageUp,
    PageDown,
    NextScreen,
    ApplyFilter,
    ToggleSelection,
    SelectAllVisible,
    ClearSelection,
    CycleSortKey,
    FlipSortDirection,
    CopySelected,
    Refresh,
    MoveAppliedUp,
    MoveAppliedDown,
    UpdateSearch(char),
    DeleteChar,
    None,
}

/// Poll for keyboard events and convert to actions
pub fn poll_event(timeout: Duration) -> anyhow::Result<Action> {
    if event::poll(timeout)?
        && let Event::Key(key) = event::read()?
    {
        return Ok(key_to_action(key));
    }
    Ok(Action::None)
}

fn key_to_action(key: KeyEvent) -> Action {
    match (key.code, key.modifiers) {
        (KeyCode::Char('c'), KeyModifiers::CONTROL) => Action::Quit,
        (KeyCode::Esc, _) => Action::ClearSearch,

        (KeyCode::Char('p'), KeyModifiers::CONTROL) => Action::MoveUp,
        (KeyCode::Char('n'), KeyModifiers::CONTROL) => Action::MoveDown,
        (KeyCode::Up, _) => Action::MoveUp,
        (KeyCode::Down, _) => Action::MoveDown,
        (KeyCode::PageUp, _) => Action::PageUp,
        (KeyCode::PageDown, _) => Action::PageDown,
        (KeyCode::Tab, _) => Action::NextScreen,

        (KeyCode::Enter, _) => Action::ApplyFilter,
        (KeyCode::Char('t'), KeyModifiers::CONTROL) => Action::ToggleSelection,
        (KeyCode::Char('a'), KeyModifiers::CONTROL) => Action::SelectAllVisible,
        (KeyCode::Char('x'), KeyModifiers::CONTROL) => Action::ClearSelection,
        (KeyCode::Char('s'), KeyModifiers::CONTROL) => Action::CycleSortKey,
        (KeyCode::Char('o'), KeyModifiers::CONTROL) => Action::FlipSortDirection,
        (KeyCode::Char('y'), KeyModifiers::CONTROL) => Action::CopySelected,
        (KeyCode::Char('r'), KeyModifiers::CONTROL) => Action::Refresh,
        (KeyCode::Char('k'), KeyModifiers::CONTROL) => Action::MoveAppliedUp,
        (KeyCode::Char('j'), KeyModifiers::CONTROL) => Action::MoveAppliedDown,

        (KeyCode::Char(c), KeyModifiers::NONE) | (KeyCode::Char(c), KeyModifiers::SHIFT) => {
            Action::UpdateSearch(c)
        }
        (KeyCode::Backspace, _) => Action::DeleteChar,

        _ => Action::None,
    }
}
