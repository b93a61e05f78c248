//! # Screen Region
//!
//! A rectangle of the terminal grid with its own staging buffer. Renderers
//! erase the region, write into it with the bounded primitives below, then
//! `flush()` pushes the staged cells to the shared [`Screen`].
//!
//! Every drawing call is total. Writes past the edge are clipped, and a region
//! with zero height or width swallows everything until it is resized to a
//! usable size again.

use ratatui::buffer::{Buffer, Cell};
use ratatui::layout::Rect;
use ratatui::style::Style;

use crate::tui::screen::Screen;

pub struct Region {
    screen: Screen,
    /// Placement on the screen. `None` while the geometry is degenerate.
    area: Option<Rect>,
    /// Staged cells, in region-local coordinates.
    staged: Buffer,
    /// Where `write` continues from: (column, row).
    cursor: (u16, u16),
}

fn placement(height: u16, width: u16, y: u16, x: u16) -> Option<Rect> {
    (height > 0 && width > 0).then(|| Rect::new(x, y, width, height))
}

impl Region {
    pub fn new(screen: &Screen, height: u16, width: u16, y: u16, x: u16) -> Self {
        let area = placement(height, width, y, x);
        Self {
            screen: screen.clone(),
            area,
            staged: Buffer::empty(local(area)),
            cursor: (0, 0),
        }
    }

    /// Replace the geometry. Staged content is dropped.
    pub fn resize(&mut self, height: u16, width: u16, y: u16, x: u16) {
        let area = placement(height, width, y, x);
        if area == self.area {
            return;
        }
        self.area = area;
        self.staged = Buffer::empty(local(area));
        self.cursor = (0, 0);
    }

    pub fn resize_to(&mut self, rect: Rect) {
        self.resize(rect.height, rect.width, rect.y, rect.x);
    }

    pub fn area(&self) -> Option<Rect> {
        self.area
    }

    pub fn height(&self) -> u16 {
        self.area.map_or(0, |a| a.height)
    }

    pub fn width(&self) -> u16 {
        self.area.map_or(0, |a| a.width)
    }

    pub fn erase(&mut self) {
        self.staged.reset();
        self.cursor = (0, 0);
    }

    /// Write `text` at (`row`, `col`), clipped to the region's right edge.
    pub fn write_at(&mut self, row: u16, col: u16, text: &str, style: Style) {
        self.write_bounded(row, col, text, usize::MAX, style);
    }

    /// Like [`write_at`](Self::write_at), but writes at most `max_width` columns.
    pub fn write_bounded(&mut self, row: u16, col: u16, text: &str, max_width: usize, style: Style) {
        let width = self.width();
        if row >= self.height() || col >= width {
            return;
        }
        let max_width = max_width.min(usize::from(width - col));
        let (x, y) = self.staged.set_stringn(col, row, text, max_width, style);
        self.cursor = (x, y);
    }

    /// Write `text` where the previous write stopped.
    pub fn write(&mut self, text: &str, style: Style) {
        let (col, row) = self.cursor;
        self.write_at(row, col, text, style);
    }

    /// Pad the current row with styled blanks up to the right edge.
    pub fn finish_line(&mut self, style: Style) {
        let (col, row) = self.cursor;
        let remaining = usize::from(self.width().saturating_sub(col));
        if remaining > 0 {
            self.write_at(row, col, &" ".repeat(remaining), style);
        }
    }

    /// Push the staged cells through the screen lock.
    pub fn flush(&self) {
        let Some(area) = self.area else {
            return;
        };
        let staged = &self.staged;
        self.screen.draw(|grid| {
            grid.erase(area);
            let blank = Cell::default();
            for position in staged.area.positions() {
                let Some(cell) = staged.cell(position) else {
                    continue;
                };
                if *cell == blank {
                    continue;
                }
                grid.write_at(area.x + position.x, area.y + position.y, cell.symbol(), cell.style());
            }
        });
    }

    #[cfg(test)]
    pub(crate) fn staged(&self) -> &Buffer {
        &self.staged
    }
}

fn local(area: Option<Rect>) -> Rect {
    area.map_or(Rect::default(), |a| Rect::new(0, 0, a.width, a.height))
}
