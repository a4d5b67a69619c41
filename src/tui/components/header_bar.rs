//! # HeaderBar Component
//!
//! Top line showing where the user is: the breadcrumb trail from the root
//! page to the page on screen.
//!
//! ```text
//! topics › topic 2 › partition 1
//! ```
//!
//! When the trail is wider than the terminal, it is cut from the left so the
//! current page title always stays visible.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use crate::tui::component::Component;

const SEPARATOR: &str = " › ";
const ELLIPSIS: &str = "…";

pub struct HeaderBar<'a> {
    /// Page titles from root to current
    pub breadcrumbs: &'a [String],
}

impl<'a> HeaderBar<'a> {
    pub fn new(breadcrumbs: &'a [String]) -> Self {
        Self { breadcrumbs }
    }

    pub fn text(&self) -> String {
        self.breadcrumbs.join(SEPARATOR)
    }
}

impl Component for HeaderBar<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let text = truncate_left(&self.text(), usize::from(area.width));
        let line = Line::from(Span::styled(
            text,
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        ));
        frame.render_widget(line, area);
    }
}

/// Keep the rightmost `max_width` columns of `s`, marking the cut with "…".
fn truncate_left(s: &str, max_width: usize) -> String {
    if s.width() <= max_width {
        return s.to_string();
    }
    if max_width == 0 {
        return String::new();
    }
    let budget = max_width - ELLIPSIS.width();
    let mut kept = Vec::new();
    let mut used = 0;
    for c in s.chars().rev() {
        let w = c.width().unwrap_or(0);
        if used + w > budget {
            break;
        }
        used += w;
        kept.push(c);
    }
    let tail: String = kept.into_iter().rev().collect();
    format!("{ELLIPSIS}{tail}")
}
