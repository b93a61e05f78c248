//! # InputBox Component
//!
//! The one-line prompt at the bottom of the screen.
//!
//! ## Responsibilities
//!
//! - Capture text input and bracketed pastes
//! - Handle editing (cursor moves, word moves, kill/yank)
//! - Browse submitted lines with Up/Down
//! - Complete nicknames on Tab
//! - Handle submission (Enter)
//!
//! ## State Management
//!
//! The buffer, history and completion state are internal. The names offered
//! to completion and the completion settings are props set by the parent
//! before each event.

pub mod completion;
pub mod editor;
pub mod history;

use ratatui::layout::Rect;

use crate::core::config::CompletionSettings;
use crate::tui::component::{Component, EventHandler};
use crate::tui::event::{Command, TuiEvent};
use crate::tui::region::Region;
use crate::tui::screen::Screen;
use crate::tui::theme;

use completion::Completion;
use editor::LineEditor;
use history::{History, Recall};

/// High-level events emitted by the InputBox
#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    /// User submitted the text (Enter pressed). May be empty.
    Submit(String),
    /// Text or cursor changed.
    Changed,
}

pub struct InputBox {
    editor: LineEditor,
    history: History,
    completion: Completion,
    /// Completion candidates (Prop)
    pub names: Vec<String>,
    /// Completion behaviour (Prop)
    pub settings: CompletionSettings,
    region: Region,
}

impl InputBox {
    pub fn new(screen: &Screen, settings: CompletionSettings) -> Self {
        Self {
            editor: LineEditor::new(1),
            history: History::default(),
            completion: Completion::Idle,
            names: Vec::new(),
            settings,
            region: Region::new(screen, 0, 0, 0, 0),
        }
    }

    pub fn text(&self) -> String {
        self.editor.text()
    }

    pub fn is_empty(&self) -> bool {
        self.editor.is_empty()
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    fn recall(&mut self, recall: Recall) -> Option<InputEvent> {
        match recall {
            Recall::Unchanged => return None,
            Recall::Entry(text) => self.editor.set_text(&text),
            Recall::Clear => {
                self.editor.take();
            }
        }
        Some(InputEvent::Changed)
    }

    fn run_command(&mut self, command: Command) -> Option<InputEvent> {
        if command == Command::Complete {
            completion::complete(
                &mut self.editor,
                &mut self.completion,
                &self.names,
                &self.settings,
            );
            return Some(InputEvent::Changed);
        }

        let editor = &mut self.editor;
        match command {
            Command::Left => editor.left(),
            Command::Right => editor.right(),
            Command::Home => editor.home(),
            Command::End => editor.end(),
            Command::WordLeft => editor.word_left(),
            Command::WordRight => editor.word_right(),
            Command::Backspace => editor.backspace(),
            Command::Delete => editor.delete(),
            Command::DeleteWord => editor.delete_word(),
            Command::KillToEnd => editor.kill_to_end(),
            Command::KillToStart => editor.kill_to_start(),
            Command::Yank => editor.yank(),
            Command::Up => {
                self.completion.reset();
                let recall = self.history.up();
                return self.recall(recall);
            }
            Command::Down => {
                self.completion.reset();
                let recall = self.history.down();
                return self.recall(recall);
            }
            Command::Submit => {
                self.completion.reset();
                let text = self.editor.take();
                self.history.push(&text);
                return Some(InputEvent::Submit(text));
            }
            _ => return None,
        }
        self.completion.reset();
        Some(InputEvent::Changed)
    }
}

impl Component for InputBox {
    type Props<'a> = ();

    fn resize(&mut self, area: Rect) {
        self.region.resize_to(area);
        self.editor.set_width(usize::from(self.region.width()));
    }

    fn refresh(&mut self, _props: ()) {
        if self.region.height() == 0 {
            return;
        }
        self.region.erase();
        let visible: String = self.editor.visible().iter().collect();
        self.region.write_at(0, 0, &visible, theme::INPUT_TEXT);

        let cursor = self.editor.char_at_cursor().unwrap_or(' ');
        let col = u16::try_from(self.editor.pos()).unwrap_or(u16::MAX);
        self.region
            .write_at(0, col, cursor.encode_utf8(&mut [0; 4]), theme::INPUT_CURSOR);
        self.region.flush();
    }
}

impl EventHandler for InputBox {
    type Event = InputEvent;

    fn handle_event(&mut self, event: &TuiEvent) -> Option<Self::Event> {
        match event {
            TuiEvent::Insert(c) => {
                self.completion.reset();
                self.editor.insert(*c);
                Some(InputEvent::Changed)
            }
            TuiEvent::Paste(text) => {
                self.completion.reset();
                self.editor.paste(text);
                Some(InputEvent::Changed)
            }
            TuiEvent::Command(command) => self.run_command(*command),
            TuiEvent::Resize => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tui::screen::TerminalGrid;
    use crate::tui::screen::tests::row_text;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;
    use ratatui::style::Modifier;

    fn screen(width: u16) -> Screen {
        Screen::new(TerminalGrid::new(Terminal::new(TestBackend::new(width, 1)).unwrap()))
    }

    fn input(screen: &Screen) -> InputBox {
        let mut input = InputBox::new(screen, CompletionSettings::default());
        input.resize(screen.area());
        input
    }

    fn type_str(input: &mut InputBox, text: &str) {
        for c in text.chars() {
            input.handle_event(&TuiEvent::Insert(c));
        }
    }

    fn command(input: &mut InputBox, command: Command) -> Option<InputEvent> {
        input.handle_event(&TuiEvent::Command(command))
    }

    #[test]
    fn test_typing_and_backspace() {
        let screen = screen(20);
        let mut input = input(&screen);
        type_str(&mut input, "ab");
        assert_eq!(command(&mut input, Command::Backspace), Some(InputEvent::Changed));
        assert_eq!(input.text(), "a");
    }

    #[test]
    fn test_submit_clears_and_records_history() {
        let screen = screen(20);
        let mut input = input(&screen);
        type_str(&mut input, "hello");
        assert_eq!(
            command(&mut input, Command::Submit),
            Some(InputEvent::Submit("hello".to_string()))
        );
        assert!(input.is_empty(), "buffer should be cleared after submit");

        assert_eq!(command(&mut input, Command::Up), Some(InputEvent::Changed));
        assert_eq!(input.text(), "hello");
        command(&mut input, Command::Down);
        assert!(input.is_empty());
    }

    #[test]
    fn test_empty_submit_is_reported_but_not_recorded() {
        let screen = screen(20);
        let mut input = input(&screen);
        assert_eq!(
            command(&mut input, Command::Submit),
            Some(InputEvent::Submit(String::new()))
        );
        assert!(input.history().entries().is_empty());
    }

    #[test]
    fn test_tab_completes_and_edit_resets_rotation() {
        let screen = screen(20);
        let mut input = input(&screen);
        input.names = vec!["alice".into(), "bob".into()];

        command(&mut input, Command::Complete);
        assert_eq!(input.text(), "alice, ");
        type_str(&mut input, "b");
        command(&mut input, Command::Complete);
        assert_eq!(input.text(), "alice, bob ", "fresh completion after an edit");
    }

    #[test]
    fn test_paste_flattens_newlines() {
        let screen = screen(20);
        let mut input = input(&screen);
        input.handle_event(&TuiEvent::Paste("one\ntwo".to_string()));
        assert_eq!(input.text(), "one two");
    }

    #[test]
    fn test_render_scrolls_and_marks_cursor() {
        let screen = screen(5);
        let mut input = input(&screen);
        type_str(&mut input, "abcdefg");
        input.refresh(());

        let buffer = screen.contents();
        assert_eq!(row_text(&buffer, 0), "defg ");
        assert!(buffer[(4, 0)].modifier.contains(Modifier::REVERSED));

        command(&mut input, Command::Home);
        input.refresh(());
        let buffer = screen.contents();
        assert_eq!(row_text(&buffer, 0), "abcde");
        assert!(buffer[(0, 0)].modifier.contains(Modifier::REVERSED));
        assert!(!buffer[(1, 0)].modifier.contains(Modifier::REVERSED));
    }

    #[test]
    fn test_redraw_at_same_size_keeps_scroll() {
        let screen = screen(5);
        let mut input = input(&screen);
        type_str(&mut input, "abcdefghij");
        for _ in 0..4 {
            command(&mut input, Command::Left);
        }
        let before = (input.editor.pos(), input.editor.line_pos());
        assert_eq!(before, (0, 6));

        // draw_ui resizes every window on every frame
        input.resize(screen.area());
        input.refresh(());
        input.resize(screen.area());
        assert_eq!((input.editor.pos(), input.editor.line_pos()), before);
        assert_eq!(row_text(&screen.contents(), 0), "ghij ");

        command(&mut input, Command::Left);
        assert_eq!((input.editor.pos(), input.editor.line_pos()), (0, 5));
    }
}
