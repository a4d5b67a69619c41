use ratatui::Frame;
use ratatui::layout::Rect;

/// A reusable UI component.
///
/// Components receive data via props (struct fields), may borrow persistent
/// state (via `&mut State` fields), and render to a `Frame` within a `Rect`.
///
/// # Mutability
///
/// `render` takes `&mut self` so components can update presentation state
/// (e.g. the list scroll offset) during the render pass. This aligns with
/// Ratatui's `StatefulWidget` pattern.
pub trait Component {
    /// Render the component into the given area.
    fn render(&mut self, frame: &mut Frame, area: Rect);
}
