//! # StatusBar Component
//!
//! Bottom line. Left side shows, in priority order: the last error or a
//! transient status (e.g. "Loading topic 3..."), a loading hint while a fetch
//! is in flight, or key hints. Right side
//! shows the sub-page position when the page has more than one.

use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Style};
use ratatui::text::Span;

use crate::tui::component::Component;

const HINTS: &str = "j/k move  enter open  bksp back  [/] page  q quit";
const LEAF_HINTS: &str = "j/k move  bksp back  q quit";
const LOADING: &str = "Loading...";

/// What the footer should say, owned by the TUI state.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct StatusLine {
    pub text: Option<String>,
    pub is_error: bool,
}

impl StatusLine {
    pub fn info(&mut self, text: impl Into<String>) {
        self.text = Some(text.into());
        self.is_error = false;
    }

    pub fn error(&mut self, text: impl Into<String>) {
        self.text = Some(text.into());
        self.is_error = true;
    }

    pub fn clear(&mut self) {
        self.text = None;
        self.is_error = false;
    }
}

pub struct StatusBar<'a> {
    pub status: &'a StatusLine,
    pub sub_page: usize,
    pub sub_page_count: usize,
    pub is_leaf: bool,
    pub is_fetching: bool,
}

impl StatusBar<'_> {
    pub fn left_text(&self) -> &str {
        match &self.status.text {
            Some(text) => text,
            None if self.is_fetching => LOADING,
            None if self.is_leaf => LEAF_HINTS,
            None => HINTS,
        }
    }

    pub fn right_text(&self) -> Option<String> {
        (self.sub_page_count > 1)
            .then(|| format!("page {}/{}", self.sub_page + 1, self.sub_page_count))
    }
}

impl Component for StatusBar<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let right = self.right_text().unwrap_or_default();
        let right_width = u16::try_from(right.len()).unwrap_or(area.width);
        let [left_area, right_area] =
            Layout::horizontal([Constraint::Min(0), Constraint::Length(right_width)]).areas(area);

        let style = if self.status.is_error {
            Style::default().fg(Color::Red)
        } else {
            Style::default().fg(Color::DarkGray)
        };
        frame.render_widget(Span::styled(self.left_text().to_string(), style), left_area);
        frame.render_widget(
            Span::styled(right, Style::default().fg(Color::Yellow)),
            right_area,
        );
    }
}
