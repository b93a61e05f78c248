//! # TextWin Component
//!
//! The conversation area. Every refresh rebuilds the display lines from the
//! room log, picks the window selected by the scroll offset and rewrites the
//! whole region.
//!
//! ## Modules
//!
//! - [`line`]: Display line model
//! - [`wrap`]: Log → lines wrapping and viewport selection
//! - [`markup`]: Token styling for event lines

pub mod line;
pub mod markup;
pub mod wrap;

use chrono::{DateTime, Local};
use ratatui::layout::Rect;
use ratatui::style::Style;

use crate::core::message::LogEntry;
use crate::tui::component::Component;
use crate::tui::region::Region;
use crate::tui::screen::Screen;
use crate::tui::theme;

use line::{DisplayLine, WrappedLine};
use markup::{Tint, style_runs};
use wrap::{build_lines, visible_window};

pub struct TextProps<'a> {
    pub log: &'a [LogEntry],
    /// Scroll offset of the room. Clamped in place.
    pub pos: &'a mut usize,
    pub show_timestamps: bool,
}

pub struct TextWin {
    region: Region,
}

impl TextWin {
    pub fn new(screen: &Screen) -> Self {
        Self {
            region: Region::new(screen, 0, 0, 0, 0),
        }
    }

    pub fn height(&self) -> u16 {
        self.region.height()
    }

    fn write_separator(&mut self, y: u16) {
        let width = usize::from(self.region.width());
        let rule = "- ".repeat(width / 2);
        self.region.write_at(y, 0, &rule, theme::NEW_TEXT_SEPARATOR);
    }

    fn write_time(&mut self, y: u16, time: &DateTime<Local>) {
        self.region.write_at(y, 0, theme::CHAR_TIME_LEFT, theme::TIME_LIMITER);
        self.region.write(&time.format("%H").to_string(), theme::TIME_NUMBERS);
        self.region.write(":", theme::TIME_SEPARATOR);
        self.region.write(&time.format("%M").to_string(), theme::TIME_NUMBERS);
        self.region.write(":", theme::TIME_SEPARATOR);
        self.region.write(&time.format("%S").to_string(), theme::TIME_NUMBERS);
        self.region.write(theme::CHAR_TIME_RIGHT, theme::TIME_LIMITER);
        self.region.write(" ", Style::default());
    }

    fn write_line(&mut self, y: u16, line: &WrappedLine<'_>) {
        if let Some(time) = &line.time {
            self.write_time(y, time);
        }
        let mut col = if line.time.is_some() { line::TIME_WIDTH } else { 0 };
        if line.delivered {
            self.region
                .write_at(y, to_col(col), theme::CHAR_ACK_RECEIVED, theme::CHAR_ACK);
            col += line::ACK_WIDTH;
        }
        if let Some(nick) = &line.nickname {
            self.region
                .write_at(y, to_col(col), nick, theme::tone(line.nick_tone));
            self.region.write("> ", Style::default());
        }

        let base = theme::tone(line.tone);
        let col = to_col(line.offset);
        if !line.colorized {
            self.region.write_at(y, col, line.text, base);
            return;
        }
        // Position the write cursor, then append runs.
        self.region.write_at(y, col, "", base);
        for run in style_runs(line.text) {
            let style = match run.tint {
                Tint::Base => base,
                Tint::Join => theme::JOIN_CHAR,
                Tint::Quit => theme::QUIT_CHAR,
                Tint::Kick => theme::KICK_CHAR,
                Tint::Parenthesized => theme::PARENTHESIZED_WORD,
                Tint::Curly => theme::CURLY_WORD,
                Tint::Bracketed => theme::BRACKETED_WORD,
            };
            self.region.write(&run.text, style);
        }
    }
}

fn to_col(col: usize) -> u16 {
    u16::try_from(col).unwrap_or(u16::MAX)
}

impl Component for TextWin {
    type Props<'a> = TextProps<'a>;

    fn resize(&mut self, area: Rect) {
        self.region.resize_to(area);
    }

    fn refresh(&mut self, props: TextProps<'_>) {
        let height = usize::from(self.region.height());
        if height == 0 {
            return;
        }
        let width = usize::from(self.region.width());
        let lines = build_lines(props.log, width, props.show_timestamps);
        let (shown, pos) = visible_window(&lines, height, *props.pos);
        *props.pos = pos;

        self.region.erase();
        for (y, line) in shown.iter().enumerate() {
            let y = to_col(y);
            match line {
                DisplayLine::Separator => self.write_separator(y),
                DisplayLine::Text(line) => self.write_line(y, line),
            }
        }
        self.region.flush();
    }
}
