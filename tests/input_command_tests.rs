use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use intraday_forecast::input::{
    parse_input_command, parse_popup_command, InputCommand, PopupCommand,
};

fn key(code: KeyCode) -> KeyEvent {
    KeyEvent::new(code, KeyModifiers::NONE)
}

fn ctrl(c: char) -> KeyEvent {
    KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL)
}

#[test]
fn printable_keys_edit_the_input() {
    assert_eq!(
        parse_input_command(&key(KeyCode::Char('a'))),
        Some(InputCommand::Insert('a'))
    );
    assert_eq!(
        parse_input_command(&KeyEvent::new(KeyCode::Char('A'), KeyModifiers::SHIFT)),
        Some(InputCommand::Insert('A'))
    );
    assert_eq!(
        parse_input_command(&key(KeyCode::Char('|'))),
        Some(InputCommand::Insert('|'))
    );
    assert_eq!(
        parse_input_command(&key(KeyCode::Backspace)),
        Some(InputCommand::Backspace)
    );
}

#[test]
fn navigation_and_actions() {
    assert_eq!(parse_input_command(&key(KeyCode::Enter)), Some(InputCommand::Submit));
    assert_eq!(
        parse_input_command(&key(KeyCode::Tab)),
        Some(InputCommand::AcceptSuggestion)
    );
    assert_eq!(
        parse_input_command(&key(KeyCode::Up)),
        Some(InputCommand::SuggestionUp)
    );
    assert_eq!(
        parse_input_command(&key(KeyCode::Down)),
        Some(InputCommand::SuggestionDown)
    );
    assert_eq!(
        parse_input_command(&key(KeyCode::F(2))),
        Some(InputCommand::ShowPrediction)
    );
    assert_eq!(parse_input_command(&ctrl('p')), Some(InputCommand::ShowPrediction));
    assert_eq!(parse_input_command(&ctrl('u')), Some(InputCommand::ClearInput));
    assert_eq!(parse_input_command(&key(KeyCode::Esc)), None);
}

#[test]
/// Plain `q` must stay typeable (it appears in symbols such as QQQ); only the
/// control chords quit.
fn quit_requires_control_modifier() {
    assert_eq!(
        parse_input_command(&key(KeyCode::Char('q'))),
        Some(InputCommand::Insert('q'))
    );
    assert_eq!(parse_input_command(&ctrl('q')), Some(InputCommand::Quit));
    assert_eq!(parse_input_command(&ctrl('c')), Some(InputCommand::Quit));
    assert_eq!(parse_input_command(&ctrl('x')), None);
}

#[test]
fn key_release_events_are_ignored() {
    let mut release = key(KeyCode::Enter);
    release.kind = KeyEventKind::Release;
    assert_eq!(parse_input_command(&release), None);
    assert_eq!(parse_popup_command(&release), None);
}

#[test]
fn popup_only_closes_or_quits() {
    assert_eq!(parse_popup_command(&key(KeyCode::Esc)), Some(PopupCommand::Close));
    assert_eq!(
        parse_popup_command(&key(KeyCode::Enter)),
        Some(PopupCommand::Close)
    );
    assert_eq!(parse_popup_command(&ctrl('c')), Some(PopupCommand::Quit));
    assert_eq!(parse_popup_command(&key(KeyCode::Char('a'))), None);
    assert_eq!(parse_popup_command(&key(KeyCode::Tab)), None);
}
