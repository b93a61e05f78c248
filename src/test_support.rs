//! Test utilities shared across the crate.
//!
//! This module is only compiled during tests (`#[cfg(test)]`).

use crate::core::roster::Roster;
use crate::core::room::{Affiliation, Role, Room, RoomKind, User};
use crate::core::state::App;

/// A joined room where we are "me", with alice, alicia and bob present.
pub fn test_room() -> Room {
    let mut room = Room::new("lounge@muc.example", RoomKind::Muc, "me");
    room.joined = true;
    room.add_user(User::new("me", Role::Moderator, Affiliation::Owner));
    for nick in ["alice", "alicia", "bob"] {
        room.add_user(User::new(nick, Role::Participant, Affiliation::None));
    }
    room
}

/// Creates a test App with the roster tab and one joined room, focused.
pub fn test_app() -> App {
    App::new(vec![test_room()], Roster::default())
}
