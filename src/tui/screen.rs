//! # Screen
//!
//! The one grid every region draws through.
//!
//! ```text
//!  Region ──┐
//!  Region ──┼──▶ Screen (Arc<Mutex<..>>) ──▶ GridWriter ──▶ terminal
//!  Region ──┘        one lock, one composite
//! ```
//!
//! A region flush takes the lock, erases its rectangle on the grid, copies its
//! staged cells and releases the lock. Two renders can therefore never
//! interleave partial writes inside one physical frame.
//!
//! The physical flush is batched: while a [`FrameGuard`] from
//! [`Screen::frame`] is alive, region flushes only update the composite and
//! the terminal is written once when the last guard drops.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use log::warn;
use ratatui::Terminal;
use ratatui::backend::Backend;
use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::Style;

/// Minimal terminal-grid writer. Every method is total: coordinates outside
/// the grid are ignored and device errors are logged, never returned.
pub trait GridWriter {
    /// Current grid size. Picks up terminal resizes.
    fn area(&mut self) -> Rect;

    fn erase(&mut self, area: Rect);

    /// Write `text` starting at column `x` of row `y`, clipped at the right edge.
    fn write_at(&mut self, x: u16, y: u16, text: &str, style: Style);

    /// Push the composite to the physical device.
    fn flush(&mut self);

    /// Copy of what the grid currently holds.
    fn contents(&self) -> Buffer;
}

/// [`GridWriter`] over a ratatui terminal. Works with the crossterm backend
/// and with `TestBackend`.
pub struct TerminalGrid<B: Backend> {
    terminal: Terminal<B>,
    composite: Buffer,
}

impl<B: Backend> TerminalGrid<B> {
    pub fn new(terminal: Terminal<B>) -> Self {
        let area = terminal
            .size()
            .map(|size| Rect::new(0, 0, size.width, size.height))
            .unwrap_or_default();
        Self {
            terminal,
            composite: Buffer::empty(area),
        }
    }

    pub fn terminal(&self) -> &Terminal<B> {
        &self.terminal
    }
}

impl<B: Backend> GridWriter for TerminalGrid<B> {
    fn area(&mut self) -> Rect {
        match self.terminal.size() {
            Ok(size) => {
                let area = Rect::new(0, 0, size.width, size.height);
                if area != self.composite.area {
                    self.composite.resize(area);
                }
                area
            }
            Err(e) => {
                warn!("Failed to query terminal size: {}", e);
                self.composite.area
            }
        }
    }

    fn erase(&mut self, area: Rect) {
        let area = area.intersection(self.composite.area);
        for position in area.positions() {
            if let Some(cell) = self.composite.cell_mut(position) {
                cell.reset();
            }
        }
    }

    fn write_at(&mut self, x: u16, y: u16, text: &str, style: Style) {
        let bounds = self.composite.area;
        if x >= bounds.right() || y >= bounds.bottom() {
            return;
        }
        let max_width = usize::from(bounds.right() - x);
        self.composite.set_stringn(x, y, text, max_width, style);
    }

    fn flush(&mut self) {
        let composite = &mut self.composite;
        let result = self.terminal.draw(|frame| {
            let area = frame.area();
            if composite.area != area {
                composite.resize(area);
            }
            let target = frame.buffer_mut();
            for position in area.positions() {
                if let (Some(src), Some(dst)) = (composite.cell(position), target.cell_mut(position)) {
                    *dst = src.clone();
                }
            }
        });
        if let Err(e) = result {
            warn!("Terminal flush failed: {}", e);
        }
    }

    fn contents(&self) -> Buffer {
        self.composite.clone()
    }
}

type Grid = dyn GridWriter + Send;

struct Compositor {
    grid: Box<Grid>,
    /// Number of live frame guards.
    hold: u32,
}

/// Cheap, cloneable handle to the shared grid.
#[derive(Clone)]
pub struct Screen {
    inner: Arc<Mutex<Compositor>>,
}

impl Screen {
    pub fn new(grid: impl GridWriter + Send + 'static) -> Self {
        Self {
            inner: Arc::new(Mutex::new(Compositor {
                grid: Box::new(grid),
                hold: 0,
            })),
        }
    }

    /// A render that panicked mid-frame leaves at worst a stale composite.
    fn lock(&self) -> MutexGuard<'_, Compositor> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn area(&self) -> Rect {
        self.lock().grid.area()
    }

    pub fn contents(&self) -> Buffer {
        self.lock().grid.contents()
    }

    /// Blank the whole grid. Regions not refreshed afterwards stay empty.
    pub fn clear(&self) {
        self.draw(|grid| {
            let area = grid.area();
            grid.erase(area);
        });
    }

    /// Run `draw` under the screen lock, then flush unless a frame is open.
    pub(crate) fn draw(&self, draw: impl FnOnce(&mut Grid)) {
        let mut compositor = self.lock();
        draw(compositor.grid.as_mut());
        if compositor.hold == 0 {
            compositor.grid.flush();
        }
    }

    /// Open a logical refresh cycle. The terminal is written once, when the
    /// last guard is dropped.
    pub fn frame(&self) -> FrameGuard {
        self.lock().hold += 1;
        FrameGuard {
            screen: self.clone(),
        }
    }
}

#[must_use = "the frame is flushed when the guard is dropped"]
pub struct FrameGuard {
    screen: Screen,
}

impl Drop for FrameGuard {
    fn drop(&mut self) {
        let mut compositor = self.screen.lock();
        compositor.hold = compositor.hold.saturating_sub(1);
        if compositor.hold == 0 {
            compositor.grid.flush();
        }
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use ratatui::backend::TestBackend;
    use ratatui::style::Color;

    /// Grid that counts physical flushes.
    pub(crate) struct CountingGrid {
        pub buffer: Buffer,
        pub flushes: Arc<Mutex<u32>>,
    }

    impl CountingGrid {
        pub fn new(width: u16, height: u16) -> (Self, Arc<Mutex<u32>>) {
            let flushes = Arc::new(Mutex::new(0));
            let grid = Self {
                buffer: Buffer::empty(Rect::new(0, 0, width, height)),
                flushes: flushes.clone(),
            };
            (grid, flushes)
        }
    }

    impl GridWriter for CountingGrid {
        fn area(&mut self) -> Rect {
            self.buffer.area
        }

        fn erase(&mut self, area: Rect) {
            for position in area.intersection(self.buffer.area).positions() {
                if let Some(cell) = self.buffer.cell_mut(position) {
                    cell.reset();
                }
            }
        }

        fn write_at(&mut self, x: u16, y: u16, text: &str, style: Style) {
            let bounds = self.buffer.area;
            if x < bounds.right() && y < bounds.bottom() {
                self.buffer.set_stringn(x, y, text, usize::from(bounds.right() - x), style);
            }
        }

        fn flush(&mut self) {
            *self.flushes.lock().unwrap() += 1;
        }

        fn contents(&self) -> Buffer {
            self.buffer.clone()
        }
    }

    pub(crate) fn row_text(buffer: &Buffer, y: u16) -> String {
        (buffer.area.left()..buffer.area.right())
            .map(|x| buffer[(x, y)].symbol())
            .collect()
    }

    #[test]
    fn test_terminal_grid_reaches_backend_on_flush() {
        let terminal = Terminal::new(TestBackend::new(10, 2)).unwrap();
        let mut grid = TerminalGrid::new(terminal);
        grid.write_at(2, 1, "hello", Style::default().fg(Color::Red));
        grid.flush();

        let buffer = grid.terminal().backend().buffer();
        assert_eq!(row_text(buffer, 1), "  hello   ");
        assert_eq!(buffer[(2, 1)].fg, Color::Red);
    }

    #[test]
    fn test_terminal_grid_ignores_out_of_bounds_writes() {
        let terminal = Terminal::new(TestBackend::new(4, 1)).unwrap();
        let mut grid = TerminalGrid::new(terminal);
        grid.write_at(10, 0, "x", Style::default());
        grid.write_at(0, 5, "x", Style::default());
        grid.write_at(2, 0, "overflow", Style::default());
        grid.flush();
        assert_eq!(row_text(grid.terminal().backend().buffer(), 0), "  ov");
    }

    #[test]
    fn test_terminal_grid_erase_clears_only_area() {
        let terminal = Terminal::new(TestBackend::new(6, 1)).unwrap();
        let mut grid = TerminalGrid::new(terminal);
        grid.write_at(0, 0, "abcdef", Style::default());
        grid.erase(Rect::new(1, 0, 2, 1));
        assert_eq!(row_text(&grid.contents(), 0), "a  def");
    }

    #[test]
    fn test_frame_guard_batches_flushes() {
        let (grid, flushes) = CountingGrid::new(10, 3);
        let screen = Screen::new(grid);
        {
            let _frame = screen.frame();
            screen.draw(|g| g.write_at(0, 0, "a", Style::default()));
            screen.draw(|g| g.write_at(0, 1, "b", Style::default()));
            {
                let _nested = screen.frame();
                screen.draw(|g| g.write_at(0, 2, "c", Style::default()));
            }
            assert_eq!(*flushes.lock().unwrap(), 0);
        }
        assert_eq!(*flushes.lock().unwrap(), 1);

        screen.draw(|g| g.write_at(1, 0, "d", Style::default()));
        assert_eq!(*flushes.lock().unwrap(), 2, "unbatched draw flushes immediately");
    }

    #[test]
    fn test_screen_survives_poisoned_lock() {
        let (grid, _) = CountingGrid::new(4, 1);
        let screen = Screen::new(grid);
        let clone = screen.clone();
        let _ = std::thread::spawn(move || {
            clone.draw(|_| panic!("render failed"));
        })
        .join();
        screen.draw(|g| g.write_at(0, 0, "ok", Style::default()));
        assert_eq!(row_text(&screen.contents(), 0), "ok  ");
    }
}
