//! # Status Bars
//!
//! The one-row bars around the text window:
//!
//! - `TopicBar`: room subject, top row
//! - `InfoBar`: facts about the focused tab, under the text window
//! - `TabBar`: one number per tab, colored by its attention state
//!
//! All three are stateless. They receive everything as props and repaint
//! their whole row on every refresh, padding to the right edge with the bar
//! style so the bar reads as one solid line.
//!
//! ## Info bar layout
//!
//! ```text
//! [lounge@muc.example] me (owner, moderator) -PLUS(3)-
//! [bob] from room lounge@muc.example
//! [carol@example.org]
//! ```
//!
//! The `-PLUS(n)-` marker only shows while the room is scrolled back by `n`
//! lines.

use ratatui::layout::Rect;

use crate::core::room::{Affiliation, Room, RoomKind, TabState};
use crate::core::roster::Contact;
use crate::tui::component::Component;
use crate::tui::region::Region;
use crate::tui::screen::Screen;
use crate::tui::theme;

/// Longest own nick shown in full in the info bar.
const OWN_NICK_MAX: usize = 13;

fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() > max {
        let mut short: String = text.chars().take(max).collect();
        short.push('…');
        short
    } else {
        text.to_string()
    }
}

pub struct TopicBar {
    region: Region,
}

impl TopicBar {
    pub fn new(screen: &Screen) -> Self {
        Self {
            region: Region::new(screen, 0, 0, 0, 0),
        }
    }
}

impl Component for TopicBar {
    type Props<'a> = &'a str;

    fn resize(&mut self, area: Rect) {
        self.region.resize_to(area);
    }

    fn refresh(&mut self, topic: &str) {
        self.region.erase();
        let max = usize::from(self.region.width()).saturating_sub(1);
        let shown: String = topic.chars().take(max).collect();
        self.region.write_at(0, 0, &shown, theme::TOPIC_BAR);
        self.region.finish_line(theme::TOPIC_BAR);
        self.region.flush();
    }
}

pub struct InfoProps<'a> {
    pub room: &'a Room,
    /// Roster entry of a one-to-one conversation, if known.
    pub contact: Option<&'a Contact>,
}

pub struct InfoBar {
    region: Region,
}

impl InfoBar {
    pub fn new(screen: &Screen) -> Self {
        Self {
            region: Region::new(screen, 0, 0, 0, 0),
        }
    }

    fn write_name(&mut self, name: &str) {
        self.region.write_at(0, 0, "[", theme::INFORMATION_BAR);
        self.region.write(name, theme::ROOM_NAME);
        self.region.write("] ", theme::INFORMATION_BAR);
    }

    fn write_muc(&mut self, room: &Room) {
        self.write_name(&room.name);
        self.region
            .write(&truncate(&room.own_nick, OWN_NICK_MAX), theme::INFORMATION_BAR);
        if !room.joined {
            self.region.write(" -!- Not connected ", theme::INFORMATION_BAR);
        }
        if let Some(user) = room.own_user() {
            let status = match user.affiliation {
                Affiliation::None => format!(" ({})", user.role.label()),
                affiliation => format!(" ({}, {})", affiliation.label(), user.role.label()),
            };
            self.region.write(&status, theme::INFORMATION_BAR);
        }
    }

    /// Private chats are named `room/nick`.
    fn write_private(&mut self, room: &Room) {
        let (muc, nick) = room.name.split_once('/').unwrap_or(("", &room.name));
        self.write_name(nick);
        if !muc.is_empty() {
            self.region
                .write(&format!("from room {muc}"), theme::INFORMATION_BAR);
        }
    }

    fn write_conversation(&mut self, room: &Room, contact: Option<&Contact>) {
        let name = contact.map_or(room.name.as_str(), Contact::bare_jid);
        self.write_name(name);
        if let Some(contact) = contact {
            self.region
                .write(&format!("({})", contact.presence.label()), theme::INFORMATION_BAR);
        }
    }
}

impl Component for InfoBar {
    type Props<'a> = InfoProps<'a>;

    fn resize(&mut self, area: Rect) {
        self.region.resize_to(area);
    }

    fn refresh(&mut self, props: InfoProps<'_>) {
        self.region.erase();
        let room = props.room;
        match room.kind {
            RoomKind::Muc => self.write_muc(room),
            RoomKind::Private => self.write_private(room),
            RoomKind::Conversation => self.write_conversation(room, props.contact),
        }
        if room.pos > 0 {
            self.region
                .write(&format!(" -PLUS({})-", room.pos), theme::SCROLLABLE_NUMBER);
        }
        self.region.finish_line(theme::INFORMATION_BAR);
        self.region.flush();
    }
}

/// The tab list: `[0|1|2] `, each number in its tab's state style.
pub struct TabBar {
    region: Region,
}

impl TabBar {
    pub fn new(screen: &Screen) -> Self {
        Self {
            region: Region::new(screen, 0, 0, 0, 0),
        }
    }
}

impl Component for TabBar {
    type Props<'a> = &'a [TabState];

    fn resize(&mut self, area: Rect) {
        self.region.resize_to(area);
    }

    fn refresh(&mut self, states: &[TabState]) {
        self.region.erase();
        self.region.write_at(0, 0, "[", theme::INFORMATION_BAR);
        for (idx, state) in states.iter().enumerate() {
            if idx > 0 {
                self.region.write("|", theme::INFORMATION_BAR);
            }
            self.region.write(&idx.to_string(), theme::tab_state(*state));
        }
        self.region.write("] ", theme::INFORMATION_BAR);
        self.region.finish_line(theme::INFORMATION_BAR);
        self.region.flush();
    }
}
