//! Message log → display lines.
//!
//! ```text
//! [12:01:33] alice> this is a long message that does
//! not fit on one line and continues here
//! - - - - - - - - - - - - - - - - - - - - - - - - -
//! ```
//!
//! Widths are counted in chars, one column per char.

use crate::core::message::LogEntry;

use super::line::{DisplayLine, WrappedLine, display_nick, prefix_width};

/// Byte index of the `n`th char of `s`, or `s.len()` past the end.
fn byte_index(s: &str, n: usize) -> usize {
    s.char_indices().nth(n).map_or(s.len(), |(i, _)| i)
}

/// Split `body` into display-line slices. The first slice gets at most
/// `first_width` chars, the following ones `width`. Both are clamped to 1.
///
/// A line breaks at the first newline inside its window. Otherwise, when the
/// rest does not fit, it breaks at the last space of the window (found past
/// the first char) or hard at the window edge. Break spaces and newlines are
/// consumed.
pub fn wrap_text(body: &str, first_width: usize, width: usize) -> Vec<&str> {
    let mut lines = Vec::new();
    let mut rest = body;
    let mut available = first_width.max(1);

    while !rest.is_empty() {
        let edge = byte_index(rest, available);
        let window = &rest[..edge];

        let (line, mut next) = if let Some(nl) = window.find('\n') {
            (&rest[..nl], &rest[nl..])
        } else if edge < rest.len() {
            match window.rfind(' ') {
                Some(space) if space > 0 => (&rest[..space], &rest[space + 1..]),
                _ => (window, &rest[edge..]),
            }
        } else {
            (rest, "")
        };
        if let Some(stripped) = next.strip_prefix('\n') {
            next = stripped;
        }

        lines.push(line);
        rest = next;
        available = width.max(1);
    }
    lines
}

/// Build every display line of `log` for a window `width` columns wide.
pub fn build_lines(log: &[LogEntry], width: usize, show_timestamps: bool) -> Vec<DisplayLine<'_>> {
    let mut lines = Vec::new();
    for entry in log {
        let message = match entry {
            LogEntry::Separator => {
                lines.push(DisplayLine::Separator);
                continue;
            }
            LogEntry::Message(message) => message,
        };

        let offset = prefix_width(message.nickname.as_deref(), message.delivered, show_timestamps);
        let first_width = width.saturating_sub(offset);
        for (i, text) in wrap_text(&message.body, first_width, width).into_iter().enumerate() {
            let first = i == 0;
            lines.push(DisplayLine::Text(WrappedLine {
                nickname: if first {
                    message.nickname.as_deref().map(display_nick)
                } else {
                    None
                },
                nick_tone: message.nick_tone,
                time: (first && show_timestamps).then_some(message.time),
                delivered: first && message.delivered,
                text,
                tone: message.tone,
                offset: if first { offset } else { 0 },
                colorized: message.colorized,
            }));
        }
    }
    lines
}

/// The `height` lines shown when scrolled `pos` lines up from the bottom.
///
/// Returns the window and `pos` clamped so that `pos + height <= lines.len()`.
pub fn visible_window<T>(lines: &[T], height: usize, pos: usize) -> (&[T], usize) {
    let total = lines.len();
    let pos = if pos.saturating_add(height) > total {
        total.saturating_sub(height)
    } else {
        pos
    };
    let end = total - pos;
    let start = end.saturating_sub(height);
    (&lines[start..end], pos)
}
