//! # Navigation Controller
//!
//! Every key the host cares about becomes a `NavigationEvent`.
//! Enter? That's `NavigationEvent::Select`. Backspace? `NavigationEvent::Back`.
//!
//! `handle_input()` applies one event to the controller's state and returns
//! an `Effect` telling the host whether to keep running.
//!
//! ```text
//! Controller + NavigationEvent  →  handle_input()  →  Effect
//! ```
//!
//! ## Fetching off the event loop
//!
//! `Select` can be split in two so the fetch runs elsewhere:
//!
//! ```text
//! prepare_select() ──▶ FetchRequest ──run()──▶ FetchOutcome ──▶ complete_fetch()
//!        │                                                          │
//!        └─ issues ticket N              drops it unless ticket N is still current
//! ```
//!
//! `Back`, `Quit` and a newer `Select` all retire the outstanding ticket, so a
//! result that arrives late is thrown away instead of pushed.

use std::sync::Arc;

use log::{debug, info, warn};

use crate::core::error::NavError;
use crate::core::page::{Page, RowView};
use crate::core::stack::PageStack;
use crate::fetch::{Fetch, FetchError};

/// Lines reserved for the header and footer around the body.
pub const CHROME_ROWS: u16 = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavigationEvent {
    MoveDown,
    MoveUp,
    Select,
    Back,
    PageForward,
    PageBackward,
    Quit,
}

/// What the host should do after an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Effect {
    None,
    Quit,
}

/// Terminal size as reported by the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: u16,
    pub height: u16,
}

impl Viewport {
    pub fn new(width: u16, height: u16) -> Self {
        Self { width, height }
    }

    /// Rows left for the page body once header and footer are drawn.
    pub fn body_rows(&self) -> usize {
        usize::from(self.height.saturating_sub(CHROME_ROWS))
    }
}

/// A drill-down fetch that has been decided on but not yet run.
pub struct FetchRequest {
    ticket: u64,
    fetch: Arc<dyn Fetch>,
    viewport_rows: usize,
    key: String,
}

impl FetchRequest {
    pub fn ticket(&self) -> u64 {
        self.ticket
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    /// Runs the fetch. Safe to call on any thread.
    pub fn run(self) -> FetchOutcome {
        debug!(
            "Running '{}' fetch for key '{}' (ticket {})",
            self.fetch.name(),
            self.key,
            self.ticket
        );
        FetchOutcome {
            ticket: self.ticket,
            result: self.fetch.fetch(self.viewport_rows, &self.key),
        }
    }
}

/// The result of a `FetchRequest`, tagged with the ticket it was issued under.
pub struct FetchOutcome {
    pub ticket: u64,
    pub result: Result<Page, FetchError>,
}

/// Snapshot of what the host should draw.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageView {
    pub header: String,
    pub breadcrumbs: Vec<String>,
    pub rows: Vec<RowView>,
    pub cursor: usize,
    pub sub_page: usize,
    pub sub_page_count: usize,
    pub depth: usize,
    pub is_leaf: bool,
    pub is_fetching: bool,
}

/// Owns the page stack, the cursor and the viewport. One per session.
pub struct NavigationController {
    root: Arc<dyn Fetch>,
    stack: PageStack,
    cursor: usize,
    viewport: Viewport,
    next_ticket: u64,
    pending: Option<u64>,
}

impl NavigationController {
    /// Fetches the root page and builds a controller around it.
    ///
    /// A failing root fetch is returned as an error; there is no page to
    /// fall back to.
    pub fn initialize(width: u16, height: u16, root: Arc<dyn Fetch>) -> Result<Self, NavError> {
        let viewport = Viewport::new(width, height);
        info!(
            "Initializing navigation with root '{}' ({}x{})",
            root.name(),
            width,
            height
        );
        let page = root.fetch(viewport.body_rows(), "")?;
        Ok(Self {
            root,
            stack: PageStack::new(page)?,
            cursor: 0,
            viewport,
            next_ticket: 0,
            pending: None,
        })
    }

    pub fn handle_input(&mut self, event: NavigationEvent) -> Result<Effect, NavError> {
        debug!("Navigation event: {:?}", event);
        match event {
            NavigationEvent::MoveDown => self.move_down()?,
            NavigationEvent::MoveUp => self.move_up(),
            NavigationEvent::Select => self.select()?,
            NavigationEvent::Back => self.back(),
            NavigationEvent::PageForward => self.page_forward()?,
            NavigationEvent::PageBackward => self.page_backward()?,
            NavigationEvent::Quit => {
                self.cancel_pending();
                return Ok(Effect::Quit);
            }
        }
        Ok(Effect::None)
    }

    pub fn current_view(&self) -> Result<PageView, NavError> {
        let page = self.stack.top()?;
        Ok(PageView {
            header: page.title().to_string(),
            breadcrumbs: self.stack.titles().map(str::to_string).collect(),
            rows: page.rows().iter().map(RowView::from).collect(),
            cursor: self.cursor,
            sub_page: page.current_sub_page(),
            sub_page_count: page.sub_page_count(),
            depth: self.stack.depth(),
            is_leaf: page.is_leaf(),
            is_fetching: self.pending.is_some(),
        })
    }

    /// Records a new terminal size for later fetches.
    ///
    /// Pages already on the stack keep their rows, with one exception: a root
    /// page that came back empty (e.g. the terminal started too short to show
    /// a body) is fetched again once there is room.
    pub fn resize(&mut self, width: u16, height: u16) {
        debug!("Viewport resized to {}x{}", width, height);
        self.viewport = Viewport::new(width, height);
        if let Err(e) = self.refill_empty_root() {
            warn!("Could not refetch root after resize: {}", e);
        }
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn depth(&self) -> usize {
        self.stack.depth()
    }

    pub fn top(&self) -> Result<&Page, NavError> {
        self.stack.top()
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn is_fetching(&self) -> bool {
        self.pending.is_some()
    }

    /// Decides what `Select` would fetch without running it.
    ///
    /// Returns `None` on an empty row list or a leaf page. Otherwise issues a
    /// new ticket, which retires any earlier one.
    pub fn prepare_select(&mut self) -> Result<Option<FetchRequest>, NavError> {
        let page = self.stack.top()?;
        let rows = page.rows();
        if rows.is_empty() {
            debug!("Select ignored: '{}' has no rows", page.title());
            return Ok(None);
        }
        let Some(fetch) = page.on_advance().cloned() else {
            debug!("Select ignored: '{}' is a leaf page", page.title());
            return Ok(None);
        };
        let row = rows.get(self.cursor).ok_or(NavError::OutOfRange {
            index: self.cursor,
            len: rows.len(),
        })?;
        let key = row.key().to_string();

        self.next_ticket += 1;
        let ticket = self.next_ticket;
        if let Some(stale) = self.pending.replace(ticket) {
            debug!("Ticket {} superseded by {}", stale, ticket);
        }
        Ok(Some(FetchRequest {
            ticket,
            fetch,
            viewport_rows: self.viewport.body_rows(),
            key,
        }))
    }

    /// Applies a finished fetch.
    ///
    /// Returns `Ok(false)` if the ticket was retired in the meantime. A failed
    /// fetch comes back as `NavError::Fetch` with the stack and cursor as they
    /// were.
    pub fn complete_fetch(&mut self, outcome: FetchOutcome) -> Result<bool, NavError> {
        if self.pending != Some(outcome.ticket) {
            debug!("Discarding stale fetch result (ticket {})", outcome.ticket);
            return Ok(false);
        }
        self.pending = None;
        match outcome.result {
            Ok(page) => {
                self.stack.push(page)?;
                self.cursor = 0;
                Ok(true)
            }
            Err(e) => {
                warn!("Fetch failed (ticket {}): {}", outcome.ticket, e);
                Err(e.into())
            }
        }
    }

    fn move_down(&mut self) -> Result<(), NavError> {
        let len = self.stack.current_rows()?.len();
        self.cursor = if len == 0 {
            0
        } else {
            (self.cursor + 1).min(len - 1)
        };
        Ok(())
    }

    fn move_up(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    fn select(&mut self) -> Result<(), NavError> {
        if let Some(request) = self.prepare_select()? {
            self.complete_fetch(request.run())?;
        }
        Ok(())
    }

    fn back(&mut self) {
        self.cancel_pending();
        if self.stack.pop().is_some() {
            self.cursor = 0;
        } else {
            debug!("Back ignored at root");
        }
    }

    fn page_forward(&mut self) -> Result<(), NavError> {
        let page = self.stack.top()?;
        let current = page.current_sub_page();
        if current + 1 < page.sub_page_count() {
            self.stack.top_mut()?.set_sub_page(current + 1)?;
            self.cursor = 0;
            return Ok(());
        }
        let Some(fetch) = page.on_forward().cloned() else {
            return Ok(());
        };
        let Some(edge) = page.rows().last().map(|row| row.key().to_string()) else {
            return Ok(());
        };

        let rows = fetch.fetch_rows(self.viewport.body_rows(), &edge)?;
        if rows.is_empty() {
            debug!("No rows past '{}'", edge);
            return Ok(());
        }
        self.stack.top_mut()?.push_sub_page(rows);
        self.cursor = 0;
        Ok(())
    }

    fn page_backward(&mut self) -> Result<(), NavError> {
        let page = self.stack.top()?;
        let current = page.current_sub_page();
        if current > 0 {
            self.stack.top_mut()?.set_sub_page(current - 1)?;
            self.cursor = 0;
            return Ok(());
        }
        let Some(fetch) = page.on_back().cloned() else {
            return Ok(());
        };
        let Some(edge) = page.rows().first().map(|row| row.key().to_string()) else {
            return Ok(());
        };

        let rows = fetch.fetch_rows(self.viewport.body_rows(), &edge)?;
        if rows.is_empty() {
            debug!("No rows before '{}'", edge);
            return Ok(());
        }
        self.stack.top_mut()?.prepend_sub_page(rows);
        self.cursor = 0;
        Ok(())
    }

    fn refill_empty_root(&mut self) -> Result<(), NavError> {
        let body_rows = self.viewport.body_rows();
        let top = self.stack.top()?;
        if self.stack.depth() != 1
            || body_rows == 0
            || top.sub_page_count() != 1
            || !top.rows().is_empty()
        {
            return Ok(());
        }
        let page = self.root.fetch(body_rows, "")?;
        self.stack.replace_root(page)?;
        self.cursor = 0;
        Ok(())
    }

    fn cancel_pending(&mut self) {
        if let Some(ticket) = self.pending.take() {
            debug!("Abandoning in-flight fetch (ticket {})", ticket);
        }
    }
}
