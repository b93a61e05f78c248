//! # TUI Components
//!
//! This module contains all windows of the terminal interface.
//!
//! ## Component Architecture
//!
//! Every window owns a [`Region`](crate::tui::region::Region) and implements
//! [`Component`](crate::tui::component::Component): `resize` places it,
//! `refresh` erases, writes and flushes it. Components follow two patterns:
//!
//! ### Stateless Components (Props-Based Rendering)
//!
//! Display windows that receive all data as props:
//! - `TopicBar`, `InfoBar`, `TabBar`: one-row status bars
//! - `UserList`: occupants of a multi-user room
//! - `TextWin`: the conversation, wrapped from the room log
//! - `ContactInfoWin`: the roster row under the cursor
//!
//! ### Stateful Components (Event-Driven)
//!
//! Windows that keep presentation state or handle events:
//! - `InputBox`: line editor with history and nick completion
//! - `RosterWin`: roster list with a cursor
//!
//! ## Props-Based Data Flow
//!
//! Components receive external data as props, not by reaching into `App`.
//! The scroll offset of a room is the one prop passed by `&mut`: the text
//! window clamps it to what the log can show.
//!
//! ```rust,ignore
//! // Good: dependencies are explicit
//! topic_bar.refresh(&room.topic);
//!
//! // Bad: hidden dependency on global state
//! topic_bar.refresh(app);
//! ```
//!
//! ## Module Structure
//!
//! ```text
//! components/
//! ├── mod.rs          (this file)
//! ├── info_bar.rs     (topic, info and tab bars)
//! ├── user_list.rs    (room occupants)
//! ├── roster_win.rs   (roster list and contact info)
//! ├── text_win/       (conversation window: lines, wrapping, markup)
//! └── input_box/      (editor, history, completion)
//! ```

pub mod info_bar;
pub mod input_box;
pub mod roster_win;
pub mod text_win;
pub mod user_list;

pub use info_bar::{InfoBar, InfoProps, TabBar, TopicBar};
pub use input_box::{InputBox, InputEvent};
pub use roster_win::{ContactInfoWin, RosterWin};
pub use text_win::{TextProps, TextWin};
pub use user_list::UserList;
