//! # TUI Adapter
//!
//! The terminal-specific layer. Handles terminal I/O, renders the windows,
//! and translates keyboard events into core::Action values.
//!
//! This is the only module that knows about ratatui and crossterm.
//!
//! ## Drawing Model
//!
//! Windows do not render through `Terminal::draw` directly. Each one owns a
//! [`region::Region`] and pushes its cells through the shared
//! [`screen::Screen`]; `ui::draw_ui` opens one frame so the terminal is
//! written once per redraw.
//!
//! ## Redraw Strategy
//!
//! The event loop only redraws when something changed: a key, a paste, a
//! resize or an action from the relay. Between events it sleeps in
//! `poll_event` for up to 100ms, then drains relay actions.

pub mod component;
pub mod components;
pub mod event;
pub mod region;
pub mod screen;
pub mod theme;
pub mod ui;

use log::{debug, info, warn};
use std::io::stdout;
use std::sync::mpsc;

use crossterm::event::{DisableBracketedPaste, EnableBracketedPaste};
use crossterm::execute;
use tokio::sync::mpsc as async_mpsc;

use crate::core::action::{Action, Effect, update};
use crate::core::config::ResolvedConfig;
use crate::core::relay::{Outgoing, ReceiptPolicy, Relay};
use crate::core::state::{App, Tab};
use crate::tui::component::EventHandler;
use crate::tui::components::InputEvent;
use crate::tui::event::{Command, TuiEvent, poll_event, poll_event_immediate};
use crate::tui::screen::{Screen, TerminalGrid};
use crate::tui::ui::TuiState;

struct TerminalModeGuard;

impl TerminalModeGuard {
    fn new() -> std::io::Result<Self> {
        execute!(stdout(), EnableBracketedPaste)?;
        info!("Terminal modes enabled (bracketed paste)");
        Ok(Self)
    }
}

impl Drop for TerminalModeGuard {
    fn drop(&mut self) {
        let _ = execute!(stdout(), DisableBracketedPaste);
    }
}

/// Turn a terminal event into a core action, updating presentation state on
/// the way. Returns `None` when the event stays inside the TUI.
pub fn route_event(app: &App, tui: &mut TuiState, event: TuiEvent) -> Option<Action> {
    let on_roster = matches!(app.current_tab(), Tab::Roster);
    let half_page = usize::from(tui.windows.text.height() / 2).max(1);

    if let TuiEvent::Command(command) = event {
        match command {
            Command::Quit => return Some(Action::Quit),
            Command::NextTab => return Some(Action::NextTab),
            Command::PrevTab => return Some(Action::PrevTab),
            Command::PageUp => return Some(Action::ScrollUp(half_page)),
            Command::PageDown => return Some(Action::ScrollDown(half_page)),
            Command::Up if on_roster => {
                tui.windows.roster.move_up();
                return None;
            }
            Command::Down if on_roster => {
                tui.windows.roster.move_down();
                return None;
            }
            Command::Submit if on_roster && tui.input_box.is_empty() => {
                return Some(Action::ToggleGroup(tui.windows.roster.selected()));
            }
            _ => {}
        }
    }

    tui.input_box.names = app.completion_names();
    match tui.input_box.handle_event(&event)? {
        InputEvent::Submit(text) if text.is_empty() => None,
        InputEvent::Submit(text) => Some(Action::Submit(text)),
        InputEvent::Changed => None,
    }
}

/// Run an action through the reducer and perform its effect.
/// Returns `true` when the application should quit.
fn apply(app: &mut App, action: Action, out_tx: &async_mpsc::UnboundedSender<Outgoing>) -> bool {
    match update(app, action) {
        Effect::None => false,
        Effect::Quit => true,
        Effect::Send(outgoing) => {
            if out_tx.send(outgoing).is_err() {
                warn!("Failed to send outgoing message: relay dropped");
            }
            false
        }
    }
}

pub fn run(config: ResolvedConfig) -> std::io::Result<()> {
    let mut app = App::from_config(&config);

    let terminal = ratatui::init();
    let screen = Screen::new(TerminalGrid::new(terminal));
    let mut tui = TuiState::new(screen, config.completion.clone());
    let _terminal_mode_guard = TerminalModeGuard::new();

    // Relay → UI actions, UI → relay outgoing lines
    let (tx, rx) = mpsc::channel();
    let (out_tx, out_rx) = async_mpsc::unbounded_channel();
    let relay = Relay::new(
        ReceiptPolicy::from_config(config.request_receipts),
        app.relay_rooms(&config),
    );
    tokio::spawn(relay.run(out_rx, tx));

    let result = event_loop(&mut app, &mut tui, &rx, &out_tx);
    ratatui::restore();
    info!("Murmur shutting down");
    result
}

fn event_loop(
    app: &mut App,
    tui: &mut TuiState,
    rx: &mpsc::Receiver<Action>,
    out_tx: &async_mpsc::UnboundedSender<Outgoing>,
) -> std::io::Result<()> {
    let mut needs_redraw = true; // Force first frame

    loop {
        // Drain relay actions
        while let Ok(action) = rx.try_recv() {
            if apply(app, action, out_tx) {
                return Ok(());
            }
            needs_redraw = true;
        }

        if needs_redraw {
            ui::draw_ui(app, tui);
            needs_redraw = false;
        }

        // Process first event + drain ALL pending events before next draw
        let mut next = poll_event(&tui.keymap)?;
        if next.is_some() {
            needs_redraw = true;
        }
        while let Some(event) = next {
            debug!("Event: {:?}", event);
            if let Some(action) = route_event(app, tui, event)
                && apply(app, action, out_tx)
            {
                return Ok(());
            }
            next = poll_event_immediate(&tui.keymap)?;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::CompletionSettings;
    use crate::core::room::Show;
    use crate::core::roster::Contact;
    use crate::test_support::test_app;
    use crate::tui::component::Component;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    fn tui() -> TuiState {
        let terminal = Terminal::new(TestBackend::new(40, 10)).unwrap();
        TuiState::new(Screen::new(TerminalGrid::new(terminal)), CompletionSettings::default())
    }

    fn type_line(app: &App, tui: &mut TuiState, text: &str) -> Option<Action> {
        for c in text.chars() {
            route_event(app, tui, TuiEvent::Insert(c));
        }
        route_event(app, tui, TuiEvent::Command(Command::Submit))
    }

    #[test]
    fn test_typed_line_becomes_submit_action() {
        let app = test_app();
        let mut tui = tui();
        assert_eq!(type_line(&app, &mut tui, "hi"), Some(Action::Submit("hi".to_string())));
        assert_eq!(type_line(&app, &mut tui, ""), None, "empty lines are not sent");
    }

    #[test]
    fn test_tab_uses_room_occupants() {
        let app = test_app();
        let mut tui = tui();
        route_event(&app, &mut tui, TuiEvent::Insert('b'));
        route_event(&app, &mut tui, TuiEvent::Command(Command::Complete));
        assert_eq!(tui.input_box.text(), "bob, ");
    }

    #[test]
    fn test_global_commands() {
        let app = test_app();
        let mut tui = tui();
        let quit = route_event(&app, &mut tui, TuiEvent::Command(Command::Quit));
        assert_eq!(quit, Some(Action::Quit));
        let next = route_event(&app, &mut tui, TuiEvent::Command(Command::NextTab));
        assert_eq!(next, Some(Action::NextTab));
    }

    #[test]
    fn test_page_up_scrolls_half_the_text_window() {
        let mut app = test_app();
        let mut tui = tui();
        ui::draw_ui(&mut app, &mut tui);
        // 10 rows minus topic, info, tabs and input
        assert_eq!(tui.windows.text.height(), 6);
        let action = route_event(&app, &mut tui, TuiEvent::Command(Command::PageUp));
        assert_eq!(action, Some(Action::ScrollUp(3)));
    }

    #[test]
    fn test_roster_keys_move_cursor_and_toggle_groups() {
        let mut app = test_app();
        app.roster
            .add_contact("Friends", Contact::new("carol@x", None, Show::Chat));
        app.focus(0);
        let mut tui = tui();
        tui.windows.roster.resize(ratatui::layout::Rect::new(0, 0, 40, 5));

        route_event(&app, &mut tui, TuiEvent::Command(Command::Down));
        assert_eq!(tui.windows.roster.selected(), 1);
        route_event(&app, &mut tui, TuiEvent::Command(Command::Up));
        assert_eq!(
            route_event(&app, &mut tui, TuiEvent::Command(Command::Submit)),
            Some(Action::ToggleGroup(0))
        );
        assert!(tui.input_box.history().entries().is_empty());
    }

    #[test]
    fn test_send_effect_reaches_relay_channel() {
        let mut app = test_app();
        let (out_tx, mut out_rx) = async_mpsc::unbounded_channel();
        assert!(!apply(&mut app, Action::Submit("hello".into()), &out_tx));
        let sent = out_rx.try_recv().unwrap();
        assert_eq!(sent.body, "hello");
        assert!(apply(&mut app, Action::Quit, &out_tx));
    }
}
