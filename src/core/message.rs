//! # Conversation Log Entries
//!
//! A room's log is an ordered `Vec<LogEntry>`, most recent last. Each entry is
//! either a chat `Message` or a `Separator` marking "new text below this
//! point" (inserted when the user leaves a tab).
//!
//! Messages are plain data. Wrapping and styling happen in the TUI layer and
//! never mutate the log.

use chrono::{DateTime, Local};

/// Style id of a piece of text. The TUI theme resolves it to a concrete style.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Tone {
    #[default]
    Plain,
    Info,
    Join,
    Part,
    Kick,
    Error,
    /// Nickname palette slot.
    Nick(u8),
}

impl Tone {
    /// Stable palette slot for a nickname, so a user keeps one color.
    pub fn for_nick(nick: &str) -> Tone {
        let sum = nick.bytes().fold(0u32, |acc, b| acc.wrapping_add(b as u32));
        Tone::Nick((sum % 256) as u8)
    }
}

/// One chat message as stored in a room log.
#[derive(Debug, Clone, PartialEq)]
pub struct Message {
    pub time: DateTime<Local>,
    /// `None` for informational lines (joins, topic changes, errors).
    pub nickname: Option<String>,
    pub nick_tone: Tone,
    pub body: String,
    pub tone: Tone,
    /// System/event text, styled token by token instead of as one run.
    pub colorized: bool,
    /// Id of our own outgoing message, used to match delivery receipts.
    pub id: Option<u64>,
    pub delivered: bool,
}

impl Message {
    /// A message spoken by `nick`.
    pub fn chat(nick: &str, body: impl Into<String>) -> Self {
        Self {
            time: Local::now(),
            nickname: Some(nick.to_string()),
            nick_tone: Tone::for_nick(nick),
            body: body.into(),
            tone: Tone::Plain,
            colorized: false,
            id: None,
            delivered: false,
        }
    }

    /// An event line (join, part, kick...) rendered with token styling.
    pub fn event(body: impl Into<String>, tone: Tone) -> Self {
        Self {
            time: Local::now(),
            nickname: None,
            nick_tone: Tone::Plain,
            body: body.into(),
            tone,
            colorized: true,
            id: None,
            delivered: false,
        }
    }

    /// A plain informational line without nickname.
    pub fn info(body: impl Into<String>, tone: Tone) -> Self {
        Self {
            colorized: false,
            ..Self::event(body, tone)
        }
    }

    pub fn with_time(mut self, time: DateTime<Local>) -> Self {
        self.time = time;
        self
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum LogEntry {
    Message(Message),
    Separator,
}

impl LogEntry {
    pub fn is_separator(&self) -> bool {
        matches!(self, LogEntry::Separator)
    }
}

impl From<Message> for LogEntry {
    fn from(message: Message) -> Self {
        LogEntry::Message(message)
    }
}
