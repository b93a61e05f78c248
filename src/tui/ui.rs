//! Screen layout and the per-frame refresh.
//!
//! ```text
//! room tab                         roster tab
//! ┌──────────────────────────┐     ┌──────────────────────────┐
//! │ topic                    │     │ roster                   │
//! ├───────────────────┬──────┤     │                          │
//! │ text              │ users│     │                          │
//! ├───────────────────┴──────┤     ├──────────────────────────┤
//! │ info                     │     │ contact info             │
//! │ tabs                     │     │ tabs                     │
//! │ input                    │     │ input                    │
//! └──────────────────────────┘     └──────────────────────────┘
//! ```
//!
//! The user list only shows for multi-user rooms and takes a seventh of the
//! width.

use ratatui::layout::{Constraint, Layout, Rect};

use crate::core::config::CompletionSettings;
use crate::core::room::{Room, RoomKind, TabState};
use crate::core::roster::Roster;
use crate::core::state::{App, Tab};
use crate::tui::component::Component;
use crate::tui::components::{
    ContactInfoWin, InfoBar, InfoProps, InputBox, RosterWin, TabBar, TextProps, TextWin,
    TopicBar, UserList,
};
use crate::tui::event::KeyMap;
use crate::tui::screen::Screen;

/// Every window of the interface. Only the ones of the focused tab type are
/// refreshed in a frame.
pub struct Windows {
    pub topic: TopicBar,
    pub text: TextWin,
    pub users: UserList,
    pub info: InfoBar,
    pub roster: RosterWin,
    pub contact_info: ContactInfoWin,
    pub tabs: TabBar,
}

impl Windows {
    fn new(screen: &Screen) -> Self {
        Self {
            topic: TopicBar::new(screen),
            text: TextWin::new(screen),
            users: UserList::new(screen),
            info: InfoBar::new(screen),
            roster: RosterWin::new(screen),
            contact_info: ContactInfoWin::new(screen),
            tabs: TabBar::new(screen),
        }
    }
}

/// TUI-specific presentation state (not part of core business logic)
pub struct TuiState {
    pub screen: Screen,
    pub windows: Windows,
    pub input_box: InputBox,
    pub keymap: KeyMap,
}

impl TuiState {
    pub fn new(screen: Screen, completion: CompletionSettings) -> Self {
        Self {
            windows: Windows::new(&screen),
            input_box: InputBox::new(&screen, completion),
            keymap: KeyMap::default(),
            screen,
        }
    }
}

/// Redraw the whole interface as one frame.
pub fn draw_ui(app: &mut App, tui: &mut TuiState) {
    let _frame = tui.screen.frame();
    tui.screen.clear();
    let area = tui.screen.area();

    let tab_states: Vec<TabState> = (0..app.tabs.len()).map(|i| app.tab_state(i)).collect();
    let App {
        tabs,
        current,
        roster,
        show_timestamps,
        ..
    } = app;

    let tabs_area = match tabs.get_mut(*current) {
        Some(Tab::Room(room)) => draw_room(&mut tui.windows, area, room, roster, *show_timestamps),
        Some(Tab::Roster) | None => draw_roster(&mut tui.windows, area, roster),
    };
    let [tabs_row, input_row] = Layout::vertical([Constraint::Length(1); 2]).areas(tabs_area);

    tui.windows.tabs.resize(tabs_row);
    tui.windows.tabs.refresh(&tab_states);
    tui.input_box.resize(input_row);
    tui.input_box.refresh(());
}

/// Lay out and refresh the room windows. Returns the area left for the tab
/// bar and the input line.
fn draw_room(
    windows: &mut Windows,
    area: Rect,
    room: &mut Room,
    roster: &Roster,
    show_timestamps: bool,
) -> Rect {
    use Constraint::{Length, Min};
    let [topic_area, body_area, info_area, bottom_area] =
        Layout::vertical([Length(1), Min(0), Length(1), Length(2)]).areas(area);

    let (text_area, users_area) = if room.kind == RoomKind::Muc {
        let [text, users] =
            Layout::horizontal([Min(0), Length(body_area.width / 7)]).areas(body_area);
        (text, users)
    } else {
        (body_area, Rect::default())
    };

    windows.topic.resize(topic_area);
    windows.topic.refresh(&room.topic);

    windows.text.resize(text_area);
    windows.text.refresh(TextProps {
        log: &room.log,
        pos: &mut room.pos,
        show_timestamps,
    });

    windows.users.resize(users_area);
    windows.users.refresh(room);

    windows.info.resize(info_area);
    windows.info.refresh(InfoProps {
        room,
        contact: roster.find_contact(&room.name),
    });

    bottom_area
}

fn draw_roster(windows: &mut Windows, area: Rect, roster: &Roster) -> Rect {
    use Constraint::{Length, Min};
    let [roster_area, info_area, bottom_area] =
        Layout::vertical([Min(0), Length(1), Length(2)]).areas(area);

    windows.roster.resize(roster_area);
    windows.roster.refresh(roster);

    let rows = roster.rows();
    windows.contact_info.resize(info_area);
    windows
        .contact_info
        .refresh(rows.get(windows.roster.selected()).copied());

    bottom_area
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::message::Message;
    use crate::core::room::Show;
    use crate::core::roster::Contact;
    use crate::test_support::test_app;
    use crate::tui::screen::TerminalGrid;
    use crate::tui::screen::tests::row_text;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    fn tui(width: u16, height: u16) -> TuiState {
        let terminal = Terminal::new(TestBackend::new(width, height)).unwrap();
        TuiState::new(Screen::new(TerminalGrid::new(terminal)), CompletionSettings::default())
    }

    fn rows(tui: &TuiState) -> Vec<String> {
        let buffer = tui.screen.contents();
        (0..buffer.area.height).map(|y| row_text(&buffer, y)).collect()
    }

    #[test]
    fn test_room_layout() {
        let mut app = test_app();
        app.show_timestamps = false;
        let room = app.current_room_mut().unwrap();
        room.topic = "welcome".to_string();
        room.push(Message::chat("bob", "hi"));
        let mut tui = tui(35, 7);
        draw_ui(&mut app, &mut tui);

        let rows = rows(&tui);
        assert_eq!(rows[0].trim_end(), "welcome");
        assert!(rows[1].starts_with("bob> hi"), "{}", rows[1]);
        assert!(rows[1].ends_with("│|me "), "{}", rows[1]);
        assert!(rows[2].ends_with("│|ali"), "{}", rows[2]);
        assert!(rows[4].starts_with("[lounge@muc.example] me"), "{}", rows[4]);
        assert_eq!(rows[5].trim_end(), "[0|1]");
        assert_eq!(rows[6].trim_end(), "");
    }

    #[test]
    fn test_switching_to_roster_leaves_no_room_content() {
        let mut app = test_app();
        app.roster
            .add_contact("Friends", Contact::new("carol@x", None, Show::Chat));
        let mut tui = tui(30, 6);
        draw_ui(&mut app, &mut tui);
        app.focus(0);
        draw_ui(&mut app, &mut tui);

        let rows = rows(&tui);
        assert_eq!(rows[0].trim_end(), "1 contacts");
        assert_eq!(rows[1].trim_end(), "[-] Friends");
        assert_eq!(rows[2].trim_end(), "    carol@x");
        assert_eq!(rows[3].trim_end(), "Friends");
        assert_eq!(rows[4].trim_end(), "[0|1]");
        assert!(rows.iter().all(|row| !row.contains('│')));
    }

    #[test]
    fn test_text_window_clamps_room_scroll() {
        let mut app = test_app();
        app.show_timestamps = false;
        let room = app.current_room_mut().unwrap();
        for i in 0..10 {
            room.push(Message::chat("bob", format!("line {i}")));
        }
        room.pos = usize::MAX;
        // 8 rows minus topic, info, tabs and input
        let mut tui = tui(30, 8);
        draw_ui(&mut app, &mut tui);

        assert_eq!(app.current_room().unwrap().pos, 6);
        assert!(rows(&tui)[1].starts_with("bob> line 0"));
    }

    #[test]
    fn test_tiny_terminal_does_not_panic() {
        let mut app = test_app();
        app.current_room_mut().unwrap().push(Message::chat("bob", "hello world"));
        let mut tui = tui(3, 2);
        draw_ui(&mut app, &mut tui);
        app.focus(0);
        draw_ui(&mut app, &mut tui);
    }
}
