//! # UserList Component
//!
//! Occupants of a multi-user room, right of the text window. Each row is a
//! separator column, a presence mark and the nick colored by role. Rows past
//! the region height are dropped.

use ratatui::layout::Rect;

use crate::core::room::Room;
use crate::tui::component::Component;
use crate::tui::region::Region;
use crate::tui::screen::Screen;
use crate::tui::theme;

const SEPARATOR: &str = "│";

pub struct UserList {
    region: Region,
}

impl UserList {
    pub fn new(screen: &Screen) -> Self {
        Self {
            region: Region::new(screen, 0, 0, 0, 0),
        }
    }
}

impl Component for UserList {
    type Props<'a> = &'a Room;

    fn resize(&mut self, area: Rect) {
        self.region.resize_to(area);
    }

    fn refresh(&mut self, room: &Room) {
        let height = self.region.height();
        if height == 0 {
            return;
        }
        self.region.erase();
        for y in 0..height {
            self.region.write_at(y, 0, SEPARATOR, theme::VERTICAL_SEPARATOR);
        }
        let nick_width = usize::from(self.region.width().saturating_sub(2));
        for (y, user) in (0..height).zip(room.sorted_users()) {
            self.region
                .write_at(y, 1, theme::CHAR_STATUS, theme::show(user.show));
            self.region
                .write_bounded(y, 2, &user.nick, nick_width, theme::role(user.role));
        }
        self.region.flush();
    }
}
