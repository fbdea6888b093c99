use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputCommand {
    Insert(char),
    Backspace,
    ClearInput,
    Submit,
    AcceptSuggestion,
    SuggestionUp,
    SuggestionDown,
    ShowPrediction,
    Quit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PopupCommand {
    Close,
    Quit,
}

fn is_quit(key: &KeyEvent) -> bool {
    key.modifiers.contains(KeyModifiers::CONTROL)
        && matches!(key.code, KeyCode::Char('c') | KeyCode::Char('q'))
}

pub fn parse_input_command(key: &KeyEvent) -> Option<InputCommand> {
    if key.kind == KeyEventKind::Release {
        return None;
    }
    if is_quit(key) {
        return Some(InputCommand::Quit);
    }
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return match key.code {
            KeyCode::Char('p') => Some(InputCommand::ShowPrediction),
            KeyCode::Char('u') => Some(InputCommand::ClearInput),
            _ => None,
        };
    }
    match key.code {
        KeyCode::Enter => Some(InputCommand::Submit),
        KeyCode::Tab => Some(InputCommand::AcceptSuggestion),
        KeyCode::Up => Some(InputCommand::SuggestionUp),
        KeyCode::Down => Some(InputCommand::SuggestionDown),
        KeyCode::Backspace => Some(InputCommand::Backspace),
        KeyCode::F(2) => Some(InputCommand::ShowPrediction),
        KeyCode::Char(c) => Some(InputCommand::Insert(c)),
        _ => None,
    }
}

/// While a popup is open every other key is swallowed.
pub fn parse_popup_command(key: &KeyEvent) -> Option<PopupCommand> {
    if key.kind == KeyEventKind::Release {
        return None;
    }
    if is_quit(key) {
        return Some(PopupCommand::Quit);
    }
    match key.code {
        KeyCode::Esc | KeyCode::Enter => Some(PopupCommand::Close),
        _ => None,
    }
}
