//! Display lines: what one terminal row of the text window shows.
//!
//! Lines borrow their text from the room log and are rebuilt on every
//! render. A line without nickname and time continues the message above it.

use std::borrow::Cow;

use chrono::{DateTime, Local};

use crate::core::message::Tone;

/// Columns taken by `[HH:MM:SS] `.
pub const TIME_WIDTH: usize = 11;
/// Longer nicknames are cut and get an ellipsis.
pub const NICK_MAX: usize = 30;
/// Columns after the nickname: `> `.
pub const NICK_SUFFIX: usize = 2;
/// Columns of the delivery mark and its space.
pub const ACK_WIDTH: usize = 2;

#[derive(Debug, Clone, PartialEq)]
pub struct WrappedLine<'a> {
    pub nickname: Option<Cow<'a, str>>,
    pub nick_tone: Tone,
    pub time: Option<DateTime<Local>>,
    /// Delivery mark, only on the first line of a receipted message.
    pub delivered: bool,
    pub text: &'a str,
    pub tone: Tone,
    /// Column where `text` starts.
    pub offset: usize,
    pub colorized: bool,
}

impl WrappedLine<'_> {
    pub fn is_continuation(&self) -> bool {
        self.nickname.is_none() && self.time.is_none()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum DisplayLine<'a> {
    Text(WrappedLine<'a>),
    /// "New text below" rule.
    Separator,
}

/// Nickname as displayed: cut to [`NICK_MAX`] chars plus `…` when too long.
pub fn display_nick(nick: &str) -> Cow<'_, str> {
    if nick.chars().count() >= NICK_MAX {
        let cut: String = nick.chars().take(NICK_MAX).collect();
        Cow::Owned(format!("{cut}…"))
    } else {
        Cow::Borrowed(nick)
    }
}

/// Width of the time, delivery mark and nickname prefix on a message's
/// first line.
pub fn prefix_width(nick: Option<&str>, delivered: bool, show_timestamps: bool) -> usize {
    let time = if show_timestamps { TIME_WIDTH } else { 0 };
    let ack = if delivered { ACK_WIDTH } else { 0 };
    let nick = nick.map_or(0, |n| display_nick(n).chars().count() + NICK_SUFFIX);
    time + ack + nick
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_nick_truncates_long_names() {
        assert_eq!(display_nick("alice"), "alice");
        let long = "x".repeat(40);
        let shown = display_nick(&long);
        assert_eq!(shown.chars().count(), NICK_MAX + 1);
        assert!(shown.ends_with('…'));
    }

    #[test]
    fn test_prefix_width() {
        assert_eq!(prefix_width(None, false, false), 0);
        assert_eq!(prefix_width(None, false, true), 11);
        assert_eq!(prefix_width(Some("bob"), false, true), 16);
        assert_eq!(prefix_width(Some("bob"), false, false), 5);
        assert_eq!(prefix_width(Some("bob"), true, true), 18);
    }
}
