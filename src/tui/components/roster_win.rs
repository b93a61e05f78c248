//! # RosterWin Component
//!
//! The roster tab: a header with the contact count, then groups and the
//! contacts of unfolded groups as one scrollable list with a cursor.
//!
//! ```text
//! 3 contacts
//! [-] Friends
//!    alice@example.org                  ++++
//!    Bob (bob@example.org)
//! [+] Work
//! ```
//!
//! `++++` marks rows hidden above (second row) or below (last row).
//!
//! ## State
//!
//! The cursor row and the first shown row are presentation state and live
//! here, not in the core. The list scrolls in jumps of `SCROLL_STEP` rows so
//! the view does not move on every cursor step.

use ratatui::layout::Rect;
use ratatui::style::Style;

use crate::core::roster::{Roster, RosterRow};
use crate::tui::component::Component;
use crate::tui::region::Region;
use crate::tui::screen::Screen;
use crate::tui::theme;

const SCROLL_STEP: usize = 8;
const MORE_MARK: &str = "++++";
const CONTACT_COL: u16 = 4;

pub struct RosterWin {
    region: Region,
    /// Selected row, an index into `Roster::rows`.
    pos: usize,
    /// First row shown.
    start: usize,
}

impl RosterWin {
    pub fn new(screen: &Screen) -> Self {
        Self {
            region: Region::new(screen, 0, 0, 0, 0),
            pos: 0,
            start: 0,
        }
    }

    pub fn selected(&self) -> usize {
        self.pos
    }

    pub fn start(&self) -> usize {
        self.start
    }

    pub fn move_up(&mut self) {
        self.pos = self.pos.saturating_sub(1);
    }

    /// Clamped at the next refresh, once the row count is known.
    pub fn move_down(&mut self) {
        self.pos = self.pos.saturating_add(1);
    }

    /// Bring `pos` into `[0, rows)`, then scroll `start` by a step toward it.
    fn clamp(&mut self, rows: usize, visible: usize) {
        self.pos = self.pos.min(rows.saturating_sub(1));
        if visible == 0 {
            return;
        }
        if self.pos < self.start {
            self.start = self.start.saturating_sub(SCROLL_STEP).min(self.pos);
        } else if self.pos >= self.start + visible {
            self.start = (self.start + SCROLL_STEP).min(self.pos);
        }
        if self.pos >= self.start + visible {
            self.start = self.pos + 1 - visible;
        }
    }

    fn write_row(&mut self, y: u16, row: RosterRow<'_>, selected: bool) {
        match row {
            RosterRow::Group(group) => {
                let fold = if group.folded { "[+] " } else { "[-] " };
                let style = if selected {
                    theme::ROSTER_SELECTED
                } else {
                    Style::default()
                };
                self.region.write_at(y, 0, fold, style);
                self.region.write(&group.name, style);
                if selected {
                    self.region.finish_line(style);
                }
            }
            RosterRow::Contact(contact) => {
                self.region
                    .write_at(y, 1, " ", theme::show(contact.presence));
                let style = if selected {
                    theme::ROSTER_SELECTED
                } else {
                    Style::default()
                };
                self.region
                    .write_at(y, CONTACT_COL, &contact.display_name(), style);
                if selected {
                    self.region.finish_line(style);
                }
            }
        }
    }
}

impl Component for RosterWin {
    type Props<'a> = &'a Roster;

    fn resize(&mut self, area: Rect) {
        self.region.resize_to(area);
    }

    fn refresh(&mut self, roster: &Roster) {
        let height = self.region.height();
        if height == 0 {
            return;
        }
        let rows = roster.rows();
        let visible = usize::from(height - 1);
        self.clamp(rows.len(), visible);

        self.region.erase();
        let header = format!("{} contacts", roster.contact_count());
        self.region.write_at(0, 0, &header, theme::ROSTER_HEADER);
        self.region.finish_line(theme::ROSTER_HEADER);

        for (y, (idx, row)) in (1..height).zip(rows.iter().enumerate().skip(self.start)) {
            self.write_row(y, *row, idx == self.pos);
        }

        let mark_col = self.region.width().saturating_sub(5);
        if self.start > 0 && height > 1 {
            self.region.write_at(1, mark_col, MORE_MARK, theme::ROSTER_PLUS);
        }
        if self.start + visible < rows.len() {
            self.region
                .write_at(height - 1, mark_col, MORE_MARK, theme::ROSTER_PLUS);
        }
        self.region.flush();
    }
}

/// Row under the roster: what the cursor is on.
pub struct ContactInfoWin {
    region: Region,
}

impl ContactInfoWin {
    pub fn new(screen: &Screen) -> Self {
        Self {
            region: Region::new(screen, 0, 0, 0, 0),
        }
    }
}

impl Component for ContactInfoWin {
    type Props<'a> = Option<RosterRow<'a>>;

    fn resize(&mut self, area: Rect) {
        self.region.resize_to(area);
    }

    fn refresh(&mut self, row: Option<RosterRow<'_>>) {
        self.region.erase();
        let text = match row {
            Some(RosterRow::Group(group)) => group.name.clone(),
            Some(RosterRow::Contact(contact)) => {
                format!("{} ({})", contact.jid, contact.presence.label())
            }
            None => String::new(),
        };
        self.region.write_at(0, 0, &text, theme::INFORMATION_BAR);
        self.region.finish_line(theme::INFORMATION_BAR);
        self.region.flush();
    }
}
