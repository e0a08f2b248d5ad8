//! Key bindings: crossterm key presses to state machine events.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::commit::{CommitComposer, ComposerEvent};
use crate::stage::SelectorEvent;
use crate::stats::CalendarEvent;

fn is_ctrl_c(key: &KeyEvent) -> bool {
    key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c')
}

pub fn selector_event(key: KeyEvent) -> Option<SelectorEvent> {
    if is_ctrl_c(&key) {
        return Some(SelectorEvent::Quit);
    }
    match key.code {
        KeyCode::Up | KeyCode::Char('k') => Some(SelectorEvent::Up),
        KeyCode::Down | KeyCode::Char('j') => Some(SelectorEvent::Down),
        KeyCode::Char(' ') => Some(SelectorEvent::Toggle),
        KeyCode::Char('a') => Some(SelectorEvent::ToggleAll),
        KeyCode::Enter => Some(SelectorEvent::Confirm),
        KeyCode::Char('q') | KeyCode::Esc => Some(SelectorEvent::Quit),
        _ => None,
    }
}

/// The composer reads keys differently while its edit buffer is open.
pub fn composer_event(composer: &CommitComposer, key: KeyEvent) -> Option<ComposerEvent> {
    if composer.buffer().is_some() {
        return editing_event(key);
    }
    if is_ctrl_c(&key) {
        return Some(ComposerEvent::Quit);
    }
    match key.code {
        KeyCode::Left | KeyCode::Up | KeyCode::BackTab | KeyCode::Char('h') | KeyCode::Char('k') => {
            Some(ComposerEvent::Prev)
        }
        KeyCode::Right
        | KeyCode::Down
        | KeyCode::Tab
        | KeyCode::Char('l')
        | KeyCode::Char('j') => Some(ComposerEvent::Next),
        KeyCode::Enter | KeyCode::Char(' ') => Some(ComposerEvent::Activate),
        KeyCode::Char('q') | KeyCode::Esc => Some(ComposerEvent::Quit),
        _ => None,
    }
}

fn editing_event(key: KeyEvent) -> Option<ComposerEvent> {
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return match key.code {
            KeyCode::Char('c') => Some(ComposerEvent::AbortEdit),
            KeyCode::Char('u') => Some(ComposerEvent::ClearBuffer),
            _ => None,
        };
    }
    match key.code {
        KeyCode::Enter => Some(ComposerEvent::CommitEdit),
        KeyCode::Esc => Some(ComposerEvent::AbortEdit),
        KeyCode::Backspace => Some(ComposerEvent::Backspace),
        KeyCode::Char(c) => Some(ComposerEvent::Insert(c)),
        _ => None,
    }
}

pub fn calendar_event(key: KeyEvent) -> Option<CalendarEvent> {
    if is_ctrl_c(&key) {
        return Some(CalendarEvent::Quit);
    }
    match key.code {
        KeyCode::Left | KeyCode::Char('h') => Some(CalendarEvent::DayLeft),
        KeyCode::Right | KeyCode::Char('l') => Some(CalendarEvent::DayRight),
        KeyCode::Up | KeyCode::Char('k') => Some(CalendarEvent::WeekUp),
        KeyCode::Down | KeyCode::Char('j') => Some(CalendarEvent::WeekDown),
        KeyCode::PageUp | KeyCode::Char('[') => Some(CalendarEvent::PagePrev),
        KeyCode::PageDown | KeyCode::Char(']') => Some(CalendarEvent::PageNext),
        KeyCode::Char('q') | KeyCode::Esc => Some(CalendarEvent::Quit),
        _ => None,
    }
}
