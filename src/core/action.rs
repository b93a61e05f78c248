//! # Actions
//!
//! Everything that can happen in Murmur becomes an `Action`.
//! User presses Enter? That's `Action::Submit(text)`.
//! The relay reports a join? That's `Action::Inbound(InboundEvent::Joined { .. })`.
//!
//! The `update()` function takes the current state and an action,
//! mutates the state and returns an `Effect` describing the I/O the caller
//! should perform. No side effects here. I/O happens elsewhere.
//!
//! ```text
//! State + Action  →  update()  →  New State + Effect
//! ```
//!
//! Submitted lines starting with `/` are commands. `//` escapes a literal
//! leading slash.

use log::{debug, info, warn};

use crate::core::message::{Message, Tone};
use crate::core::relay::{InboundEvent, Outgoing};
use crate::core::room::{Room, RoomKind, TabState, User};
use crate::core::state::{App, Tab};

#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    Submit(String),
    Inbound(InboundEvent),
    ScrollUp(usize),
    ScrollDown(usize),
    NextTab,
    PrevTab,
    /// Fold or unfold the roster group at this row.
    ToggleGroup(usize),
    Quit,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    None,
    Quit,
    Send(Outgoing),
}

pub fn update(app: &mut App, action: Action) -> Effect {
    debug!("update: {:?}", action);
    match action {
        Action::Submit(text) => submit(app, text),
        Action::Inbound(event) => {
            inbound(app, event);
            Effect::None
        }
        Action::ScrollUp(lines) => {
            if let Some(room) = app.current_room_mut() {
                room.scroll_up(lines);
            }
            Effect::None
        }
        Action::ScrollDown(lines) => {
            if let Some(room) = app.current_room_mut() {
                room.scroll_down(lines);
            }
            Effect::None
        }
        Action::NextTab => {
            let next = (app.current + 1) % app.tabs.len();
            app.focus(next);
            Effect::None
        }
        Action::PrevTab => {
            let prev = (app.current + app.tabs.len() - 1) % app.tabs.len();
            app.focus(prev);
            Effect::None
        }
        Action::ToggleGroup(row) => {
            app.roster.toggle_fold_at(row);
            Effect::None
        }
        Action::Quit => Effect::Quit,
    }
}

fn submit(app: &mut App, text: String) -> Effect {
    if let Some(command) = text.strip_prefix('/')
        && !command.starts_with('/')
    {
        return run_command(app, command);
    }
    let body = text.strip_prefix('/').unwrap_or(&text).to_string();

    let Some(room) = app.current_room_mut() else {
        debug!("Ignoring text submitted on the roster tab");
        return Effect::None;
    };
    if room.kind == RoomKind::Muc && !room.joined {
        room.push(Message::info("You are not in this room", Tone::Error));
        return Effect::None;
    }
    let id = room.push_own(&body);
    room.pos = 0;
    Effect::Send(Outgoing {
        room: room.name.clone(),
        id,
        body,
    })
}

fn run_command(app: &mut App, command: &str) -> Effect {
    let (name, arg) = match command.split_once(' ') {
        Some((name, arg)) => (name, arg.trim()),
        None => (command, ""),
    };
    info!("Command /{}", name);
    match name {
        "quit" | "exit" => Effect::Quit,
        "topic" => {
            if let Some(room) = app.current_room_mut() {
                if arg.is_empty() {
                    let line = format!("The subject is: {}", room.topic);
                    room.push(Message::info(line, Tone::Info));
                } else {
                    room.topic = arg.to_string();
                    let line = format!("{} changed the subject to: {}", room.own_nick, arg);
                    room.push(Message::info(line, Tone::Info));
                }
            }
            Effect::None
        }
        "clear" => {
            if let Some(room) = app.current_room_mut() {
                room.log.clear();
                room.pos = 0;
            }
            Effect::None
        }
        _ => {
            if let Some(room) = app.current_room_mut() {
                room.push(Message::info(format!("Unknown command: /{name}"), Tone::Error));
            }
            Effect::None
        }
    }
}

fn inbound(app: &mut App, event: InboundEvent) {
    let room_name = match &event {
        InboundEvent::Joined { room, .. }
        | InboundEvent::Left { room, .. }
        | InboundEvent::Message { room, .. }
        | InboundEvent::Topic { room, .. }
        | InboundEvent::Receipt { room, .. } => room.clone(),
    };
    let Some(idx) = app.room_index(&room_name) else {
        warn!("Inbound event for unknown room {}", room_name);
        return;
    };
    let is_current = idx == app.current;
    let Some(Tab::Room(room)) = app.tabs.get_mut(idx) else {
        return;
    };

    match event {
        InboundEvent::Joined {
            nick,
            role,
            affiliation,
            ..
        } => {
            let is_self = nick == room.own_nick;
            let is_new = room.add_user(User::new(&nick, role, affiliation));
            if is_self {
                room.joined = true;
                let line = format!("--> You joined the room as [{}] ({})", nick, role.label());
                room.push(Message::event(line, Tone::Join));
            } else if is_new {
                let line = format!("--> {{{}}} joined the room", nick);
                room.push(Message::event(line, Tone::Join));
            }
        }
        InboundEvent::Left { nick, .. } => {
            if room.remove_user(&nick).is_some() {
                let line = format!("<-- {{{}}} left the room", nick);
                room.push(Message::event(line, Tone::Part));
            }
            if nick == room.own_nick {
                room.joined = false;
            }
        }
        InboundEvent::Message { nick, body, .. } => {
            let highlight = nick != room.own_nick && room.mentions_own_nick(&body);
            room.push(Message::chat(&nick, body));
            if !is_current {
                mark_activity(room, highlight);
            }
        }
        InboundEvent::Topic { topic, .. } => {
            room.push(Message::info(format!("The subject is: {topic}"), Tone::Info));
            room.topic = topic;
        }
        InboundEvent::Receipt { id, .. } => {
            if !room.mark_delivered(id) {
                debug!("Receipt for unknown message {} in {}", id, room.name);
            }
        }
    }
}

fn mark_activity(room: &mut Room, highlight: bool) {
    room.state = match (room.state, highlight) {
        (_, true) | (TabState::Highlight, false) => TabState::Highlight,
        _ => TabState::NewMessage,
    };
}
