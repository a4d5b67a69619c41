use ratatui::Frame;
use ratatui::layout::{Constraint, Layout};

use crate::core::PageView;
use crate::tui::TuiState;
use crate::tui::component::Component;
use crate::tui::components::{HeaderBar, PageList, StatusBar};

pub fn draw_ui(frame: &mut Frame, view: &PageView, tui: &mut TuiState) {
    use Constraint::{Length, Min};
    // Header and footer heights must add up to `controller::CHROME_ROWS`.
    let layout = Layout::vertical([Length(1), Min(0), Length(1)]);
    let [header_area, body_area, footer_area] = layout.areas(frame.area());

    HeaderBar::new(&view.breadcrumbs).render(frame, header_area);
    PageList::new(&mut tui.page_list, &view.rows, view.cursor).render(frame, body_area);
    StatusBar {
        status: &tui.status,
        sub_page: view.sub_page,
        sub_page_count: view.sub_page_count,
        is_leaf: view.is_leaf,
        is_fetching: view.is_fetching,
    }
    .render(frame, footer_area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{NavigationController, NavigationEvent};
    use crate::fetch::{FixtureOptions, TopicsFetch};
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    fn screen(terminal: &Terminal<TestBackend>) -> Vec<String> {
        let buffer = terminal.backend().buffer();
        (0..buffer.area.height)
            .map(|y| {
                (0..buffer.area.width)
                    .map(|x| buffer[(x, y)].symbol())
                    .collect::<String>()
                    .trim_end()
                    .to_string()
            })
            .collect()
    }

    #[test]
    fn test_draw_root_page() {
        let root = TopicsFetch::root(FixtureOptions::default());
        let nav = NavigationController::initialize(60, 6, root).unwrap();
        let view = nav.current_view().unwrap();
        let mut tui = TuiState::new();

        let mut terminal = Terminal::new(TestBackend::new(60, 6)).unwrap();
        terminal.draw(|f| draw_ui(f, &view, &mut tui)).unwrap();

        let lines = screen(&terminal);
        assert_eq!(lines[0], "topics");
        assert_eq!(lines[1], "topic 0");
        assert_eq!(lines[4], "topic 3");
        assert!(lines[5].starts_with("j/k move"));
    }

    #[test]
    fn test_draw_after_drill_down_shows_breadcrumbs() {
        let root = TopicsFetch::root(FixtureOptions::default());
        let mut nav = NavigationController::initialize(60, 6, root).unwrap();
        nav.handle_input(NavigationEvent::MoveDown).unwrap();
        nav.handle_input(NavigationEvent::Select).unwrap();
        let view = nav.current_view().unwrap();
        let mut tui = TuiState::new();

        let mut terminal = Terminal::new(TestBackend::new(60, 6)).unwrap();
        terminal.draw(|f| draw_ui(f, &view, &mut tui)).unwrap();

        let lines = screen(&terminal);
        assert_eq!(lines[0], "topics › topic 1");
        assert_eq!(lines[1], "partition 1");
    }

    #[test]
    fn test_draw_error_status() {
        let root = TopicsFetch::root(FixtureOptions::default());
        let nav = NavigationController::initialize(60, 6, root).unwrap();
        let view = nav.current_view().unwrap();
        let mut tui = TuiState::new();
        tui.status.error("upstream unavailable: broker down");

        let mut terminal = Terminal::new(TestBackend::new(60, 6)).unwrap();
        terminal.draw(|f| draw_ui(f, &view, &mut tui)).unwrap();

        assert_eq!(screen(&terminal)[5], "upstream unavailable: broker down");
    }

    #[test]
    fn test_draw_loading_hint_while_fetching() {
        let root = TopicsFetch::root(FixtureOptions::default());
        let mut nav = NavigationController::initialize(60, 6, root).unwrap();
        let _request = nav.prepare_select().unwrap().unwrap();
        let view = nav.current_view().unwrap();
        assert!(view.is_fetching);
        let mut tui = TuiState::new();

        let mut terminal = Terminal::new(TestBackend::new(60, 6)).unwrap();
        terminal.draw(|f| draw_ui(f, &view, &mut tui)).unwrap();

        assert_eq!(screen(&terminal)[5], "Loading...");
    }
}
