//! Colors and glyphs. Core types carry style ids (`Tone`, `Role`, `Show`,
//! `TabState`); this is where they become ratatui styles.

use ratatui::style::{Color, Modifier, Style};

use crate::core::message::Tone;
use crate::core::room::{Role, Show, TabState};

pub const CHAR_JOIN: &str = "-->";
pub const CHAR_QUIT: &str = "<--";
pub const CHAR_KICK: &str = "-!-";
pub const CHAR_STATUS: &str = "|";
pub const CHAR_TIME_LEFT: &str = "[";
pub const CHAR_TIME_RIGHT: &str = "]";
pub const CHAR_ACK_RECEIVED: &str = "✔";

pub const INFORMATION_BAR: Style = Style::new().fg(Color::White).bg(Color::Blue);
pub const TOPIC_BAR: Style = Style::new().fg(Color::White).bg(Color::Blue);
pub const ROOM_NAME: Style = Style::new()
    .fg(Color::LightCyan)
    .bg(Color::Blue)
    .add_modifier(Modifier::BOLD);
pub const SCROLLABLE_NUMBER: Style = Style::new()
    .fg(Color::Yellow)
    .bg(Color::Blue)
    .add_modifier(Modifier::BOLD);
pub const CHAR_ACK: Style = Style::new().fg(Color::Green);
pub const NEW_TEXT_SEPARATOR: Style = Style::new().fg(Color::Red);
pub const VERTICAL_SEPARATOR: Style = Style::new().fg(Color::Blue);

pub const TIME_LIMITER: Style = Style::new().fg(Color::Blue);
pub const TIME_NUMBERS: Style = Style::new();
pub const TIME_SEPARATOR: Style = Style::new().fg(Color::Blue);

pub const JOIN_CHAR: Style = Style::new().fg(Color::Green).add_modifier(Modifier::BOLD);
pub const QUIT_CHAR: Style = Style::new().fg(Color::Red).add_modifier(Modifier::BOLD);
pub const KICK_CHAR: Style = Style::new().fg(Color::Magenta).add_modifier(Modifier::BOLD);
pub const PARENTHESIZED_WORD: Style = Style::new().fg(Color::Blue);
pub const CURLY_WORD: Style = Style::new().fg(Color::Yellow).add_modifier(Modifier::BOLD);
pub const BRACKETED_WORD: Style = Style::new().fg(Color::Cyan);

pub const INPUT_TEXT: Style = Style::new();
pub const INPUT_CURSOR: Style = Style::new().add_modifier(Modifier::REVERSED);

pub const ROSTER_HEADER: Style = Style::new().fg(Color::White).bg(Color::Blue);
pub const ROSTER_SELECTED: Style = Style::new().fg(Color::Black).bg(Color::Cyan);
pub const ROSTER_PLUS: Style = Style::new().fg(Color::Yellow).add_modifier(Modifier::BOLD);

const NICK_PALETTE: [Color; 12] = [
    Color::Red,
    Color::Green,
    Color::Yellow,
    Color::Blue,
    Color::Magenta,
    Color::Cyan,
    Color::LightRed,
    Color::LightGreen,
    Color::LightYellow,
    Color::LightBlue,
    Color::LightMagenta,
    Color::LightCyan,
];

pub fn tone(tone: Tone) -> Style {
    match tone {
        Tone::Plain => Style::new(),
        Tone::Info => Style::new().fg(Color::Cyan),
        Tone::Join => Style::new().fg(Color::Gray),
        Tone::Part => Style::new().fg(Color::Gray),
        Tone::Kick => Style::new().fg(Color::LightRed),
        Tone::Error => Style::new().fg(Color::Red).add_modifier(Modifier::BOLD),
        Tone::Nick(slot) => {
            Style::new().fg(NICK_PALETTE[usize::from(slot) % NICK_PALETTE.len()])
        }
    }
}

pub fn role(role: Role) -> Style {
    match role {
        Role::Moderator => Style::new().fg(Color::Red).add_modifier(Modifier::BOLD),
        Role::Participant => Style::new().fg(Color::Blue),
        Role::Visitor => Style::new().fg(Color::Yellow),
        Role::None => Style::new().fg(Color::Gray),
    }
}

pub fn show(show: Show) -> Style {
    match show {
        Show::Available => Style::new().bg(Color::Green),
        Show::Chat => Style::new().bg(Color::Cyan),
        Show::Away => Style::new().bg(Color::Yellow),
        Show::Xa => Style::new().bg(Color::Blue),
        Show::Dnd => Style::new().bg(Color::Red),
        Show::Unavailable => Style::new().bg(Color::DarkGray),
    }
}

pub fn tab_state(state: TabState) -> Style {
    match state {
        TabState::Normal => INFORMATION_BAR,
        TabState::Current => Style::new().fg(Color::White).bg(Color::Cyan),
        TabState::NewMessage => Style::new().fg(Color::White).bg(Color::Magenta),
        TabState::Highlight => Style::new()
            .fg(Color::White)
            .bg(Color::Red)
            .add_modifier(Modifier::BOLD),
        TabState::Disconnected => Style::new().fg(Color::DarkGray).bg(Color::Blue),
    }
}
