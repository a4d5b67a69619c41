//! # PageList Component
//!
//! The body: rows of the current page with the cursor row highlighted.
//!
//! Follows the persistent state + transient wrapper pattern:
//! - `PageListState` lives in `TuiState` and keeps the scroll offset
//! - `PageList` is created each frame with borrowed state and the view

use ratatui::Frame;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::{List, ListItem, ListState, Paragraph};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use crate::core::RowView;
use crate::tui::component::Component;

/// Persistent state for the page body.
#[derive(Default)]
pub struct PageListState {
    pub list_state: ListState,
}

impl PageListState {
    pub fn new() -> Self {
        Self::default()
    }
}

/// Transient render wrapper for the page body.
pub struct PageList<'a> {
    state: &'a mut PageListState,
    rows: &'a [RowView],
    cursor: usize,
}

impl<'a> PageList<'a> {
    pub fn new(state: &'a mut PageListState, rows: &'a [RowView], cursor: usize) -> Self {
        Self {
            state,
            rows,
            cursor,
        }
    }
}

impl Component for PageList<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        if self.rows.is_empty() {
            let empty = Paragraph::new("(no rows)")
                .style(Style::default().fg(Color::DarkGray))
                .alignment(Alignment::Center);
            frame.render_widget(empty, area);
            self.state.list_state.select(None);
            return;
        }

        let width = usize::from(area.width);
        let items: Vec<ListItem> = self
            .rows
            .iter()
            .map(|row| ListItem::new(truncate_str(&row.display, width)))
            .collect();

        let list = List::new(items)
            .style(Style::default().fg(Color::Gray))
            .highlight_style(
                Style::default()
                    .fg(Color::White)
                    .add_modifier(Modifier::BOLD | Modifier::REVERSED),
            );

        self.state
            .list_state
            .select(Some(self.cursor.min(self.rows.len() - 1)));
        frame.render_stateful_widget(list, area, &mut self.state.list_state);
    }
}

/// Truncate a string to fit within `max_width` columns, adding "..." if needed.
fn truncate_str(s: &str, max_width: usize) -> String {
    if s.width() <= max_width {
        return s.to_string();
    }
    if max_width <= 3 {
        return ".".repeat(max_width);
    }
    let mut out = String::new();
    let mut used = 0;
    for c in s.chars() {
        let w = c.width().unwrap_or(0);
        if used + w > max_width - 3 {
            break;
        }
        used += w;
        out.push(c);
    }
    out.push_str("...");
    out
}
