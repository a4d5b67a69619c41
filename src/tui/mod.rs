//! # TUI Host
//!
//! The ratatui-specific layer. Handles terminal I/O, renders the current
//! `PageView`, and translates keyboard events into `NavigationEvent` values.
//!
//! This is the only module that knows about ratatui and crossterm. The
//! navigation core never draws and never blocks on the terminal.
//!
//! ## Fetch Strategy
//!
//! Drill-down fetches run on tokio's blocking pool and come back through an
//! mpsc channel as `FetchOutcome`s, one per loop iteration. The loop keeps
//! accepting keys meanwhile, so Back or Quit can abandon a slow fetch.
//! `--sync-fetch` runs them inline instead.
//!
//! ## Redraw Strategy
//!
//! Draws only after an event or a fetch result. Polls every 50ms while a
//! fetch is in flight and every 250ms otherwise.

mod component;
mod components;
mod event;
mod ui;

use log::{debug, info, warn};
use std::io::{self, stdout};
use std::sync::mpsc;
use std::time::Duration;

use crossterm::cursor::{Hide, Show};
use crossterm::execute;

use crate::core::config::ResolvedConfig;
use crate::core::controller::{FetchOutcome, FetchRequest};
use crate::core::{Effect, NavError, NavigationController, NavigationEvent};
use crate::fetch::TopicsFetch;
use crate::tui::components::{PageListState, StatusLine};
use crate::tui::event::{TuiEvent, poll_event_immediate, poll_event_timeout};

/// TUI-specific presentation state (not part of the navigation core)
pub struct TuiState {
    pub page_list: PageListState,
    pub status: StatusLine,
}

impl TuiState {
    pub fn new() -> Self {
        Self {
            page_list: PageListState::new(),
            status: StatusLine::default(),
        }
    }
}

impl Default for TuiState {
    fn default() -> Self {
        Self::new()
    }
}

struct TerminalModeGuard;

impl TerminalModeGuard {
    fn new() -> io::Result<Self> {
        execute!(stdout(), Hide)?;
        info!("Terminal modes enabled (hidden cursor)");
        Ok(Self)
    }
}

impl Drop for TerminalModeGuard {
    fn drop(&mut self) {
        let _ = execute!(stdout(), Show);
    }
}

pub fn run(config: ResolvedConfig) -> io::Result<()> {
    let (width, height) = crossterm::terminal::size()?;
    let root = TopicsFetch::root(config.fixtures);
    let mut nav = NavigationController::initialize(width, height, root).map_err(io::Error::other)?;

    let mut terminal = ratatui::init();
    let result = TerminalModeGuard::new()
        .and_then(|_guard| event_loop(&mut terminal, &mut nav, config.sync_fetch));
    ratatui::restore();
    result
}

fn event_loop(
    terminal: &mut ratatui::DefaultTerminal,
    nav: &mut NavigationController,
    sync_fetch: bool,
) -> io::Result<()> {
    let mut tui = TuiState::new();

    // Channel for fetch results from worker threads
    let (tx, rx) = mpsc::channel::<FetchOutcome>();
    let mut needs_redraw = true; // Force first frame

    loop {
        if needs_redraw {
            let view = nav.current_view().map_err(io::Error::other)?;
            terminal.draw(|f| ui::draw_ui(f, &view, &mut tui))?;
            needs_redraw = false;
        }

        let timeout = if nav.is_fetching() {
            Duration::from_millis(50)
        } else {
            Duration::from_millis(250)
        };

        // Process first event + drain ALL pending events before next draw
        let mut should_quit = false;
        let mut next = poll_event_timeout(timeout)?;
        while let Some(event) = next {
            needs_redraw = true;
            if dispatch(nav, &mut tui, event, &tx, sync_fetch)? == Effect::Quit {
                should_quit = true;
                break;
            }
            next = poll_event_immediate()?;
        }

        if should_quit {
            break;
        }

        // Handle results from background fetches
        while let Ok(outcome) = rx.try_recv() {
            needs_redraw = true;
            match nav.complete_fetch(outcome) {
                Ok(true) => tui.status.clear(),
                Ok(false) => {}
                Err(e) => report(&mut tui.status, e)?,
            }
        }
    }

    info!("Quit at depth {}", nav.depth());
    Ok(())
}

/// Applies one terminal event to the controller.
fn dispatch(
    nav: &mut NavigationController,
    tui: &mut TuiState,
    event: TuiEvent,
    tx: &mpsc::Sender<FetchOutcome>,
    sync_fetch: bool,
) -> io::Result<Effect> {
    if let TuiEvent::Resize(width, height) = event {
        nav.resize(width, height);
        return Ok(Effect::None);
    }
    let Some(nav_event) = event.navigation() else {
        return Ok(Effect::None);
    };

    if nav_event == NavigationEvent::Select && !sync_fetch {
        match nav.prepare_select() {
            Ok(Some(request)) => {
                tui.status.info(format!("Loading {}...", request.key()));
                spawn_fetch(request, tx.clone());
            }
            Ok(None) => {}
            Err(e) => report(&mut tui.status, e)?,
        }
        return Ok(Effect::None);
    }

    match nav.handle_input(nav_event) {
        Ok(effect) => {
            // A pending select keeps its "Loading ..." line until it resolves.
            let moved = matches!(nav_event, NavigationEvent::MoveUp | NavigationEvent::MoveDown);
            if !moved && !nav.is_fetching() {
                tui.status.clear();
            }
            Ok(effect)
        }
        Err(e) => {
            report(&mut tui.status, e)?;
            Ok(Effect::None)
        }
    }
}

/// Shows a recoverable error in the footer; anything else ends the session.
fn report(status: &mut StatusLine, error: NavError) -> io::Result<()> {
    if error.is_recoverable() {
        warn!("Navigation error: {}", error);
        status.error(error.to_string());
        Ok(())
    } else {
        Err(io::Error::other(error))
    }
}

fn spawn_fetch(request: FetchRequest, tx: mpsc::Sender<FetchOutcome>) {
    let ticket = request.ticket();
    info!("Spawning fetch for '{}' (ticket {})", request.key(), ticket);
    tokio::task::spawn_blocking(move || {
        let outcome = request.run();
        debug!("Fetch finished (ticket {})", ticket);
        if tx.send(outcome).is_err() {
            warn!(
                "Failed to deliver fetch result (ticket {}): receiver dropped",
                ticket
            );
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Page;
    use crate::fetch::FixtureOptions;
    use crate::test_support::{StubFetch, rows};

    fn nav() -> NavigationController {
        NavigationController::initialize(60, 8, TopicsFetch::root(FixtureOptions::default()))
            .unwrap()
    }

    #[test]
    fn test_dispatch_sync_select_pushes() {
        let mut nav = nav();
        let mut tui = TuiState::new();
        let (tx, _rx) = mpsc::channel();
        let effect = dispatch(&mut nav, &mut tui, TuiEvent::Submit, &tx, true).unwrap();
        assert_eq!(effect, Effect::None);
        assert_eq!(nav.depth(), 2);
    }

    #[test]
    fn test_dispatch_async_select_waits_for_outcome() {
        let rt = tokio::runtime::Runtime::new().unwrap();
        let _enter = rt.enter();
        let mut nav = nav();
        let mut tui = TuiState::new();
        let (tx, rx) = mpsc::channel();

        dispatch(&mut nav, &mut tui, TuiEvent::Submit, &tx, false).unwrap();
        assert_eq!(nav.depth(), 1);
        assert!(nav.is_fetching());
        assert_eq!(tui.status.text.as_deref(), Some("Loading topic 0..."));

        let outcome = rx.recv_timeout(Duration::from_secs(5)).unwrap();
        assert!(nav.complete_fetch(outcome).unwrap());
        assert_eq!(nav.depth(), 2);
    }

    #[test]
    fn test_dispatch_keeps_loading_status_while_paging() {
        let rt = tokio::runtime::Runtime::new().unwrap();
        let _enter = rt.enter();
        let mut nav = nav();
        let mut tui = TuiState::new();
        let (tx, rx) = mpsc::channel();

        dispatch(&mut nav, &mut tui, TuiEvent::Submit, &tx, false).unwrap();
        dispatch(&mut nav, &mut tui, TuiEvent::PageDown, &tx, false).unwrap();
        assert!(nav.is_fetching());
        assert_eq!(tui.status.text.as_deref(), Some("Loading topic 0..."));
        assert_eq!(nav.current_view().unwrap().sub_page, 1);

        let outcome = rx.recv_timeout(Duration::from_secs(5)).unwrap();
        assert!(nav.complete_fetch(outcome).unwrap());
        assert_eq!(nav.current_view().unwrap().header, "topic 0");
    }

    #[test]
    fn test_dispatch_back_clears_loading_status() {
        let rt = tokio::runtime::Runtime::new().unwrap();
        let _enter = rt.enter();
        let mut nav = nav();
        let mut tui = TuiState::new();
        let (tx, _rx) = mpsc::channel();

        dispatch(&mut nav, &mut tui, TuiEvent::Submit, &tx, false).unwrap();
        dispatch(&mut nav, &mut tui, TuiEvent::Back, &tx, false).unwrap();
        assert!(!nav.is_fetching());
        assert!(tui.status.text.is_none());
    }

    #[test]
    fn test_dispatch_reports_fetch_errors_in_footer() {
        let root = StubFetch::returning(
            Page::new("root", rows(&["a"])).with_advance(StubFetch::failing("broker down")),
        );
        let mut nav = NavigationController::initialize(60, 8, root).unwrap();
        let mut tui = TuiState::new();
        let (tx, _rx) = mpsc::channel();

        dispatch(&mut nav, &mut tui, TuiEvent::Submit, &tx, true).unwrap();
        assert!(tui.status.is_error);
        assert_eq!(
            tui.status.text.as_deref(),
            Some("upstream unavailable: broker down")
        );
        assert_eq!(nav.depth(), 1);
    }

    #[test]
    fn test_dispatch_quit_and_resize() {
        let mut nav = nav();
        let mut tui = TuiState::new();
        let (tx, _rx) = mpsc::channel();
        dispatch(&mut nav, &mut tui, TuiEvent::Resize(100, 30), &tx, true).unwrap();
        assert_eq!(nav.viewport().body_rows(), 28);
        let effect = dispatch(&mut nav, &mut tui, TuiEvent::ForceQuit, &tx, true).unwrap();
        assert_eq!(effect, Effect::Quit);
    }

    #[test]
    fn test_report_rejects_contract_errors() {
        let mut status = StatusLine::default();
        assert!(report(&mut status, NavError::EmptyStack).is_err());
        assert!(status.text.is_none());
    }
}
