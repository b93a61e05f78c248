use std::collections::HashMap;
use std::io;
use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

/// A key press, reduced to what the key map can bind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Left,
    Right,
    Up,
    Down,
    Home,
    End,
    Delete,
    Backspace,
    Enter,
    Tab,
    PageUp,
    PageDown,
    Ctrl(char),
    Alt(char),
    Char(char),
}

impl Key {
    /// `None` for releases and keys nothing is bound to.
    pub fn from_event(key: KeyEvent) -> Option<Key> {
        if key.kind == KeyEventKind::Release {
            return None;
        }
        let key = match key.code {
            KeyCode::Left => Key::Left,
            KeyCode::Right => Key::Right,
            KeyCode::Up => Key::Up,
            KeyCode::Down => Key::Down,
            KeyCode::Home => Key::Home,
            KeyCode::End => Key::End,
            KeyCode::Delete => Key::Delete,
            KeyCode::Backspace => Key::Backspace,
            KeyCode::Enter => Key::Enter,
            KeyCode::Tab => Key::Tab,
            KeyCode::PageUp => Key::PageUp,
            KeyCode::PageDown => Key::PageDown,
            // Some terminals send ^H for Backspace
            KeyCode::Char('h') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                Key::Backspace
            }
            KeyCode::Char(c) if key.modifiers.contains(KeyModifiers::CONTROL) => {
                Key::Ctrl(c.to_ascii_lowercase())
            }
            KeyCode::Char(c) if key.modifiers.contains(KeyModifiers::ALT) => Key::Alt(c),
            KeyCode::Char(c) => Key::Char(c),
            _ => return None,
        };
        Some(key)
    }
}

/// What a bound key asks for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Left,
    Right,
    Home,
    End,
    WordLeft,
    WordRight,
    Backspace,
    Delete,
    DeleteWord,
    KillToEnd,
    KillToStart,
    Yank,
    Up,
    Down,
    Complete,
    Submit,
    PageUp,
    PageDown,
    NextTab,
    PrevTab,
    Quit,
}

pub struct KeyMap {
    bindings: HashMap<Key, Command>,
}

impl Default for KeyMap {
    fn default() -> Self {
        use Command as C;
        let bindings = HashMap::from([
            (Key::Left, C::Left),
            (Key::Right, C::Right),
            (Key::Up, C::Up),
            (Key::Down, C::Down),
            (Key::Home, C::Home),
            (Key::Ctrl('a'), C::Home),
            (Key::End, C::End),
            (Key::Ctrl('e'), C::End),
            (Key::Delete, C::Delete),
            (Key::Ctrl('d'), C::Delete),
            (Key::Backspace, C::Backspace),
            (Key::Alt('b'), C::WordLeft),
            (Key::Alt('f'), C::WordRight),
            (Key::Ctrl('w'), C::DeleteWord),
            (Key::Ctrl('k'), C::KillToEnd),
            (Key::Ctrl('u'), C::KillToStart),
            (Key::Ctrl('y'), C::Yank),
            (Key::Tab, C::Complete),
            (Key::Enter, C::Submit),
            (Key::Ctrl('j'), C::Submit),
            (Key::PageUp, C::PageUp),
            (Key::PageDown, C::PageDown),
            (Key::Ctrl('n'), C::NextTab),
            (Key::Ctrl('p'), C::PrevTab),
            (Key::Ctrl('c'), C::Quit),
        ]);
        Self { bindings }
    }
}

impl KeyMap {
    pub fn command(&self, key: Key) -> Option<Command> {
        self.bindings.get(&key).copied()
    }

    /// Bound keys become commands; unbound printable chars are typed.
    pub fn translate(&self, key: Key) -> Option<TuiEvent> {
        match (self.command(key), key) {
            (Some(command), _) => Some(TuiEvent::Command(command)),
            (None, Key::Char(c)) if !c.is_control() => Some(TuiEvent::Insert(c)),
            _ => None,
        }
    }
}

/// TUI-specific input events
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TuiEvent {
    Command(Command),
    Insert(char),
    Paste(String), // Bracketed paste
    Resize,
}

/// Poll for an event with timeout (blocks up to 100ms)
pub fn poll_event(keymap: &KeyMap) -> io::Result<Option<TuiEvent>> {
    poll_event_timeout(Duration::from_millis(100), keymap)
}

/// Poll for an event without blocking (returns immediately)
pub fn poll_event_immediate(keymap: &KeyMap) -> io::Result<Option<TuiEvent>> {
    poll_event_timeout(Duration::ZERO, keymap)
}

fn poll_event_timeout(timeout: Duration, keymap: &KeyMap) -> io::Result<Option<TuiEvent>> {
    if !event::poll(timeout)? {
        return Ok(None);
    }
    let event = match event::read()? {
        Event::Key(key_event) => {
            log::debug!("Key event: {:?} with modifiers {:?}", key_event.code, key_event.modifiers);
            Key::from_event(key_event).and_then(|key| keymap.translate(key))
        }
        Event::Paste(data) => Some(TuiEvent::Paste(data)),
        Event::Resize(..) => Some(TuiEvent::Resize),
        _ => None,
    };
    Ok(event)
}
