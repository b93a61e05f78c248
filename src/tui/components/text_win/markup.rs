//! Token styling for event lines (joins, parts, kicks, topic changes).
//!
//! An event line is split into words with shell-style quoting, then each
//! word is styled on its own:
//!
//! ```text
//! --> {alice} joined the room as [moderator] (admin)
//! ^^^  ^^^^^                      ^^^^^^^^^   ^^^^^
//! glyph curly                     bracketed   parenthesized
//! ```
//!
//! Delimiters keep the line's base color. Words are re-joined with single
//! spaces.

use crate::tui::theme::{CHAR_JOIN, CHAR_KICK, CHAR_QUIT};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tint {
    Base,
    Join,
    Quit,
    Kick,
    Parenthesized,
    Curly,
    Bracketed,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Run {
    pub text: String,
    pub tint: Tint,
}

impl Run {
    fn new(text: impl Into<String>, tint: Tint) -> Self {
        Self {
            text: text.into(),
            tint,
        }
    }
}

/// Split on ASCII whitespace honoring `'single'` and `"double"` quotes and
/// backslash escapes. `None` on an unclosed quote or a dangling backslash.
pub fn split_quoted(text: &str) -> Option<Vec<String>> {
    let mut words = Vec::new();
    let mut word = String::new();
    let mut in_word = false;
    let mut chars = text.chars();

    while let Some(c) = chars.next() {
        match c {
            c if c.is_ascii_whitespace() => {
                if in_word {
                    words.push(std::mem::take(&mut word));
                    in_word = false;
                }
            }
            '\\' => {
                word.push(chars.next()?);
                in_word = true;
            }
            '\'' => {
                in_word = true;
                loop {
                    match chars.next()? {
                        '\'' => break,
                        c => word.push(c),
                    }
                }
            }
            '"' => {
                in_word = true;
                loop {
                    match chars.next()? {
                        '"' => break,
                        '\\' => {
                            let escaped = chars.next()?;
                            if !matches!(escaped, '"' | '\\') {
                                word.push('\\');
                            }
                            word.push(escaped);
                        }
                        c => word.push(c),
                    }
                }
            }
            c => {
                word.push(c);
                in_word = true;
            }
        }
    }
    if in_word {
        words.push(word);
    }
    Some(words)
}

/// Fallback for lines that do not parse: drop quoted bracket pairs and
/// split on whitespace.
fn split_plain(text: &str) -> Vec<String> {
    let mut text = text.to_string();
    for pattern in ["\"[", "]\"", "\"{", "}\"", "\"(", ")\""] {
        text = text.replace(pattern, "");
    }
    text.split_ascii_whitespace().map(str::to_string).collect()
}

pub fn tokenize(text: &str) -> Vec<String> {
    split_quoted(text).unwrap_or_else(|| split_plain(text))
}

fn glyph_tint(word: &str) -> Option<Tint> {
    match word {
        CHAR_JOIN => Some(Tint::Join),
        CHAR_QUIT => Some(Tint::Quit),
        CHAR_KICK => Some(Tint::Kick),
        _ => None,
    }
}

fn bracket_tint(word: &str) -> Option<(char, &str, char, Tint)> {
    let mut chars = word.chars();
    let open = chars.next()?;
    let close = chars.next_back()?;
    let tint = match (open, close) {
        ('(', ')') => Tint::Parenthesized,
        ('{', '}') => Tint::Curly,
        ('[', ']') => Tint::Bracketed,
        _ => return None,
    };
    Some((open, chars.as_str(), close, tint))
}

/// Styled runs for one event line, each word followed by a space.
pub fn style_runs(text: &str) -> Vec<Run> {
    let mut runs = Vec::new();
    for word in tokenize(text) {
        if let Some(tint) = glyph_tint(&word) {
            runs.push(Run::new(word, tint));
        } else if let Some((open, inner, close, tint)) = bracket_tint(&word) {
            runs.push(Run::new(open, Tint::Base));
            runs.push(Run::new(inner, tint));
            runs.push(Run::new(close, Tint::Base));
        } else {
            runs.push(Run::new(word, Tint::Base));
        }
        runs.push(Run::new(" ", Tint::Base));
    }
    runs
}
