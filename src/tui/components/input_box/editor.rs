//! Single-line editing buffer with a horizontally scrolling view.
//!
//! The input region is `width` columns wide and shows `text` from `line_pos`
//! on. `pos` is the cursor column on screen, so `line_pos + pos` is the
//! logical cursor index.
//!
//! ```text
//! text:     h e l l o   w o r l d
//!                 ├─────────┤        visible window (width = 5)
//! line_pos: 4 ────┘   ▲
//! pos:      2 ────────┘  cursor index 6
//! ```
//!
//! Invariants, kept by every command:
//! - `pos <= width - 1` and `pos <= len`
//! - `line_pos + pos <= len`
//!
//! The buffer is a `Vec<char>` so cursor arithmetic is in chars.

pub struct LineEditor {
    text: Vec<char>,
    pos: usize,
    line_pos: usize,
    width: usize,
    /// Last cut text. `None` until something is cut.
    clipboard: Option<Vec<char>>,
}

impl LineEditor {
    pub fn new(width: usize) -> Self {
        Self {
            text: Vec::new(),
            pos: 0,
            line_pos: 0,
            width: width.max(1),
            clipboard: None,
        }
    }

    pub fn text(&self) -> String {
        self.text.iter().collect()
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    pub fn len(&self) -> usize {
        self.text.len()
    }

    pub fn pos(&self) -> usize {
        self.pos
    }

    pub fn line_pos(&self) -> usize {
        self.line_pos
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn cursor(&self) -> usize {
        self.pos + self.line_pos
    }

    pub fn at_end(&self) -> bool {
        self.cursor() == self.text.len()
    }

    pub fn clipboard(&self) -> Option<String> {
        self.clipboard.as_ref().map(|c| c.iter().collect())
    }

    /// The slice of text the region shows.
    pub fn visible(&self) -> &[char] {
        let start = self.line_pos.min(self.text.len());
        let end = (self.line_pos + self.width).min(self.text.len());
        &self.text[start..end]
    }

    /// Char under the cursor, if any.
    pub fn char_at_cursor(&self) -> Option<char> {
        self.text.get(self.cursor()).copied()
    }

    /// Follow a region resize, keeping the logical cursor. The view only
    /// moves when the width actually changes.
    pub fn set_width(&mut self, width: usize) {
        let width = width.max(1);
        if width == self.width {
            return;
        }
        let cursor = self.cursor();
        self.width = width;
        self.pos = cursor.min(self.width - 1);
        self.line_pos = cursor - self.pos;
    }

    pub fn insert(&mut self, c: char) {
        let cursor = self.cursor();
        self.text.insert(cursor, c);
        if self.pos < self.width - 1 {
            self.pos += 1;
        } else {
            self.line_pos += 1;
        }
    }

    /// Insert pasted text. The input is a single line, so newlines become spaces.
    pub fn paste(&mut self, text: &str) {
        for c in text.chars().filter(|c| *c != '\r') {
            self.insert(if c == '\n' { ' ' } else { c });
        }
    }

    pub fn left(&mut self) {
        if self.pos == 0 && self.line_pos > 0 {
            self.line_pos -= 1;
        } else if self.pos > 0 {
            self.pos -= 1;
        }
    }

    pub fn right(&mut self) {
        if self.at_end() {
            return;
        }
        if self.pos >= self.width - 1 {
            self.line_pos += 1;
        } else {
            self.pos += 1;
        }
    }

    pub fn home(&mut self) {
        self.pos = 0;
        self.line_pos = 0;
    }

    /// Cursor after the last char, showing as much of the tail as fits.
    pub fn end(&mut self) {
        let len = self.text.len();
        if len >= self.width - 1 {
            self.pos = self.width - 1;
            self.line_pos = len - self.pos;
        } else {
            self.pos = len;
            self.line_pos = 0;
        }
    }

    /// Index of the last space before the cursor, or 0.
    fn previous_space(&self) -> usize {
        let cursor = self.cursor();
        self.text[..cursor]
            .iter()
            .rposition(|c| *c == ' ')
            .unwrap_or(0)
    }

    pub fn word_left(&mut self) {
        let steps = self.cursor() - self.previous_space();
        for _ in 0..steps {
            self.left();
        }
    }

    pub fn word_right(&mut self) {
        let cursor = self.cursor();
        if cursor >= self.text.len() {
            return;
        }
        let next_space = self.text[cursor + 1..]
            .iter()
            .position(|c| *c == ' ')
            .map_or(self.text.len(), |i| cursor + 1 + i);
        for _ in cursor..next_space {
            self.right();
        }
    }

    pub fn backspace(&mut self) {
        let cursor = self.cursor();
        if cursor == 0 {
            return;
        }
        self.text.remove(cursor - 1);
        self.left();
    }

    pub fn delete(&mut self) {
        let cursor = self.cursor();
        if cursor < self.text.len() {
            self.text.remove(cursor);
        }
    }

    /// Erase back to the previous space.
    pub fn delete_word(&mut self) {
        let steps = self.cursor() - self.previous_space();
        for _ in 0..steps {
            self.backspace();
        }
    }

    /// Cut from the cursor to the end into the clipboard.
    pub fn kill_to_end(&mut self) {
        let cursor = self.cursor();
        if cursor == self.text.len() {
            return;
        }
        self.clipboard = Some(self.text.split_off(cursor));
        self.end();
    }

    /// Cut from the start to the cursor into the clipboard.
    pub fn kill_to_start(&mut self) {
        let cursor = self.cursor();
        if cursor == 0 {
            return;
        }
        self.clipboard = Some(self.text.drain(..cursor).collect());
        self.home();
    }

    pub fn yank(&mut self) {
        let Some(clipboard) = self.clipboard.clone() else {
            return;
        };
        for c in clipboard {
            self.insert(c);
        }
    }

    /// Replace the whole text and move to its end.
    pub fn set_text(&mut self, text: &str) {
        self.text = text.chars().collect();
        self.end();
    }

    /// Drop the last `count` chars, append `with` and move to the end.
    pub fn replace_tail(&mut self, count: usize, with: &str) {
        let keep = self.text.len().saturating_sub(count);
        self.text.truncate(keep);
        self.text.extend(with.chars());
        self.end();
    }

    /// Return the text and reset the buffer. The clipboard survives.
    pub fn take(&mut self) -> String {
        let text = self.text.drain(..).collect();
        self.home();
        text
    }
}
