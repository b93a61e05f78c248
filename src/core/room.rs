//! # Rooms
//!
//! A `Room` is one conversation: a multi-user chat, a private chat with a
//! room occupant, or a one-to-one conversation with a contact. It owns the
//! message log and the scroll offset the text window reads.

use serde::{Deserialize, Serialize};

use crate::core::message::{LogEntry, Message, Tone};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RoomKind {
    #[default]
    Muc,
    Private,
    Conversation,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Moderator,
    #[default]
    Participant,
    Visitor,
    None,
}

impl Role {
    pub fn label(self) -> &'static str {
        match self {
            Role::Moderator => "moderator",
            Role::Participant => "participant",
            Role::Visitor => "visitor",
            Role::None => "none",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Affiliation {
    Owner,
    Admin,
    Member,
    Outcast,
    #[default]
    None,
}

impl Affiliation {
    pub fn label(self) -> &'static str {
        match self {
            Affiliation::Owner => "owner",
            Affiliation::Admin => "admin",
            Affiliation::Member => "member",
            Affiliation::Outcast => "outcast",
            Affiliation::None => "none",
        }
    }
}

/// Presence "show" value of a user or contact.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Show {
    #[default]
    Available,
    Chat,
    Away,
    Xa,
    Dnd,
    Unavailable,
}

impl Show {
    pub fn label(self) -> &'static str {
        match self {
            Show::Available => "available",
            Show::Chat => "chat",
            Show::Away => "away",
            Show::Xa => "xa",
            Show::Dnd => "dnd",
            Show::Unavailable => "unavailable",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct User {
    pub nick: String,
    pub role: Role,
    pub affiliation: Affiliation,
    pub show: Show,
    pub tone: Tone,
}

impl User {
    pub fn new(nick: &str, role: Role, affiliation: Affiliation) -> Self {
        Self {
            nick: nick.to_string(),
            role,
            affiliation,
            show: Show::Available,
            tone: Tone::for_nick(nick),
        }
    }
}

/// Attention state of a tab, shown in the tab list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TabState {
    #[default]
    Normal,
    NewMessage,
    /// Someone said our nick.
    Highlight,
    Current,
    Disconnected,
}

#[derive(Debug, Clone)]
pub struct Room {
    pub name: String,
    pub kind: RoomKind,
    pub topic: String,
    pub own_nick: String,
    pub joined: bool,
    /// Occupants in join order.
    pub users: Vec<User>,
    pub log: Vec<LogEntry>,
    /// Scroll offset in display lines from the newest line.
    pub pos: usize,
    pub state: TabState,
    next_id: u64,
}

impl Room {
    pub fn new(name: &str, kind: RoomKind, own_nick: &str) -> Self {
        Self {
            name: name.to_string(),
            kind,
            topic: String::new(),
            own_nick: own_nick.to_string(),
            joined: false,
            users: Vec::new(),
            log: Vec::new(),
            pos: 0,
            state: TabState::Normal,
            next_id: 1,
        }
    }

    pub fn push(&mut self, message: Message) {
        self.log.push(LogEntry::Message(message));
    }

    /// Append our own message and return the id it was stamped with.
    pub fn push_own(&mut self, body: &str) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        let mut message = Message::chat(&self.own_nick, body);
        message.id = Some(id);
        self.push(message);
        id
    }

    /// Insert a "new text below" marker unless the log already ends with one.
    pub fn mark_read_position(&mut self) {
        match self.log.last() {
            None | Some(LogEntry::Separator) => {}
            Some(LogEntry::Message(_)) => self.log.push(LogEntry::Separator),
        }
    }

    pub fn mark_delivered(&mut self, id: u64) -> bool {
        let found = self.log.iter_mut().rev().find_map(|entry| match entry {
            LogEntry::Message(m) if m.id == Some(id) => Some(m),
            _ => None,
        });
        match found {
            Some(message) => {
                message.delivered = true;
                true
            }
            None => false,
        }
    }

    pub fn find_user(&self, nick: &str) -> Option<&User> {
        self.users.iter().find(|u| u.nick == nick)
    }

    pub fn own_user(&self) -> Option<&User> {
        self.find_user(&self.own_nick)
    }

    /// Add or replace an occupant. Returns `true` if the nick is new.
    pub fn add_user(&mut self, user: User) -> bool {
        match self.users.iter_mut().find(|u| u.nick == user.nick) {
            Some(existing) => {
                *existing = user;
                false
            }
            None => {
                self.users.push(user);
                true
            }
        }
    }

    pub fn remove_user(&mut self, nick: &str) -> Option<User> {
        let idx = self.users.iter().position(|u| u.nick == nick)?;
        Some(self.users.remove(idx))
    }

    /// Nicknames offered to completion: occupants in join order, ourselves excluded.
    pub fn completion_names(&self) -> Vec<String> {
        self.users
            .iter()
            .filter(|u| u.nick != self.own_nick)
            .map(|u| u.nick.clone())
            .collect()
    }

    /// Occupants sorted for display: by role, then case-insensitively by nick.
    pub fn sorted_users(&self) -> Vec<&User> {
        let mut users: Vec<&User> = self.users.iter().collect();
        users.sort_by(|a, b| {
            a.role
                .cmp(&b.role)
                .then_with(|| a.nick.to_lowercase().cmp(&b.nick.to_lowercase()))
        });
        users
    }

    /// Whether `body` mentions our nick as a whole word.
    pub fn mentions_own_nick(&self, body: &str) -> bool {
        if self.own_nick.is_empty() {
            return false;
        }
        let nick = self.own_nick.to_lowercase();
        body.to_lowercase()
            .split(|c: char| !(c.is_alphanumeric() || c == '_' || c == '-'))
            .any(|word| word == nick)
    }

    pub fn scroll_up(&mut self, lines: usize) {
        self.pos = self.pos.saturating_add(lines);
    }

    pub fn scroll_down(&mut self, lines: usize) {
        self.pos = self.pos.saturating_sub(lines);
    }
}
