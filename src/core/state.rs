//! # Application State
//!
//! Core business state for Murmur. This module contains domain logic only -
//! no TUI-specific types. Presentation state lives in the `tui` module.
//!
//! ```text
//! App
//! ├── tabs: Vec<Tab>                 // tab 0 is the roster, then one per room
//! ├── current: usize                 // index of the focused tab
//! ├── roster: Roster                 // contact groups
//! └── show_timestamps: bool          // text window prefix
//! ```
//!
//! State changes only happen through `update(state, action)` in action.rs.

use crate::core::config::ResolvedConfig;
use crate::core::relay::RelayRoom;
use crate::core::room::{Room, RoomKind, TabState};
use crate::core::roster::{Contact, Roster};

#[derive(Debug, Clone)]
pub enum Tab {
    Roster,
    Room(Room),
}

impl Tab {
    pub fn name(&self) -> &str {
        match self {
            Tab::Roster => "Roster",
            Tab::Room(room) => &room.name,
        }
    }
}

pub struct App {
    pub tabs: Vec<Tab>,
    pub current: usize,
    pub roster: Roster,
    pub show_timestamps: bool,
}

impl App {
    pub fn new(rooms: Vec<Room>, roster: Roster) -> Self {
        let mut tabs = vec![Tab::Roster];
        tabs.extend(rooms.into_iter().map(Tab::Room));
        let current = if tabs.len() > 1 { 1 } else { 0 };
        Self {
            tabs,
            current,
            roster,
            show_timestamps: true,
        }
    }

    pub fn from_config(config: &ResolvedConfig) -> Self {
        let rooms = config
            .rooms
            .iter()
            .map(|entry| {
                let mut room = Room::new(&entry.name, entry.kind.unwrap_or_default(), &config.nick);
                if let Some(topic) = &entry.topic {
                    room.topic = topic.clone();
                }
                room
            })
            .collect();

        let mut roster = Roster::default();
        for c in &config.contacts {
            roster.add_contact(&c.group, Contact::new(&c.jid, c.name.as_deref(), c.presence));
        }

        let mut app = Self::new(rooms, roster);
        app.show_timestamps = config.show_timestamps;
        app
    }

    /// What the relay needs to know to simulate each room.
    pub fn relay_rooms(&self, config: &ResolvedConfig) -> Vec<RelayRoom> {
        config
            .rooms
            .iter()
            .map(|entry| RelayRoom {
                name: entry.name.clone(),
                own_nick: config.nick.clone(),
                occupants: match entry.kind.unwrap_or_default() {
                    RoomKind::Muc => entry.occupants.clone(),
                    RoomKind::Private | RoomKind::Conversation => Vec::new(),
                },
            })
            .collect()
    }

    pub fn current_tab(&self) -> &Tab {
        &self.tabs[self.current]
    }

    pub fn current_room(&self) -> Option<&Room> {
        match self.tabs.get(self.current) {
            Some(Tab::Room(room)) => Some(room),
            _ => None,
        }
    }

    pub fn current_room_mut(&mut self) -> Option<&mut Room> {
        match self.tabs.get_mut(self.current) {
            Some(Tab::Room(room)) => Some(room),
            _ => None,
        }
    }

    pub fn room_index(&self, name: &str) -> Option<usize> {
        self.tabs
            .iter()
            .position(|t| matches!(t, Tab::Room(room) if room.name == name))
    }

    /// State shown for tab `idx` in the tab list.
    pub fn tab_state(&self, idx: usize) -> TabState {
        if idx == self.current {
            return TabState::Current;
        }
        match self.tabs.get(idx) {
            Some(Tab::Room(room)) if !room.joined && room.state == TabState::Normal => {
                TabState::Disconnected
            }
            Some(Tab::Room(room)) => room.state,
            _ => TabState::Normal,
        }
    }

    /// Names offered to nickname completion in the focused tab.
    pub fn completion_names(&self) -> Vec<String> {
        self.current_room()
            .map(Room::completion_names)
            .unwrap_or_default()
    }

    /// Move focus to tab `idx`, leaving a read marker in the tab we leave.
    pub fn focus(&mut self, idx: usize) {
        if idx >= self.tabs.len() || idx == self.current {
            return;
        }
        if let Some(room) = self.current_room_mut() {
            room.mark_read_position();
            room.state = TabState::Normal;
        }
        self.current = idx;
        if let Some(room) = self.current_room_mut() {
            room.state = TabState::Normal;
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::core::message::Message;
    use crate::core::room::{Room, RoomKind, TabState};
    use crate::test_support::test_app;

    use super::Tab;

    #[test]
    fn test_app_new_defaults() {
        let app = test_app();
        assert!(matches!(app.tabs[0], Tab::Roster));
        assert_eq!(app.current, 1);
        assert_eq!(app.current_tab().name(), "lounge@muc.example");
    }

    #[test]
    fn test_focus_leaves_separator_behind() {
        let mut app = test_app();
        app.current_room_mut().unwrap().push(Message::chat("alice", "hello"));
        app.focus(0);
        assert_eq!(app.current, 0);
        match &app.tabs[1] {
            Tab::Room(room) => assert!(room.log.last().unwrap().is_separator()),
            Tab::Roster => panic!("expected room"),
        }
    }

    #[test]
    fn test_focus_out_of_range_is_noop() {
        let mut app = test_app();
        app.focus(42);
        assert_eq!(app.current, 1);
    }

    #[test]
    fn test_tab_state_reports_disconnected_rooms() {
        let mut app = test_app();
        app.tabs.push(Tab::Room(Room::new("other@muc", RoomKind::Muc, "me")));
        assert_eq!(app.tab_state(1), TabState::Current);
        assert_eq!(app.tab_state(2), TabState::Disconnected);
        assert_eq!(app.tab_state(0), TabState::Normal);
    }

    #[test]
    fn test_completion_names_empty_on_roster() {
        let mut app = test_app();
        assert_eq!(app.completion_names(), vec!["alice", "alicia", "bob"]);
        app.focus(0);
        assert!(app.completion_names().is_empty());
    }
}
