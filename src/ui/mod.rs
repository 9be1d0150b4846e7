mod components;
mod results;
mod search;

use crate::app::{App, Focus};
use crate::search::SearchLayout;
use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
};

/// Screen areas from the last draw, used to route mouse clicks
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScreenLayout {
    pub search: SearchLayout,
    pub results: Rect,
}

pub fn render(f: &mut Frame, app: &App) -> ScreenLayout {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Length(3), // Search input
            Constraint::Min(0),    // Submitted searches, suggestion overlay
            Constraint::Length(3), // Footer
        ])
        .split(f.area());

    let &[header, input, body, footer] = &chunks[..] else {
        return ScreenLayout::default();
    };

    let widget = app.search.borrow();
    let history_detail = match widget.history().len() {
        0 => String::new(),
        1 => "(1 recent search)".to_string(),
        count => format!("({} recent searches)", count),
    };
    components::render_view_header(f, header, "Search", &history_detail);

    // Results first so the suggestion list overlays them
    results::render_results(f, app, body);
    let search = search::render_search(
        f,
        &widget,
        input,
        body,
        app.visible_rows,
        app.focus == Focus::Search,
    );

    let options = widget.options();
    let (mode, keybindings): (&str, &[(&str, &str)]) = match app.focus {
        Focus::Search => (
            "SEARCH",
            &[
                ("↑↓", "Select"),
                ("Enter", "Search"),
                ("Tab", "Complete"),
                ("Esc", "Close"),
                ("Ctrl+C", "Quit"),
            ],
        ),
        Focus::Results => (
            "RESULTS",
            &[
                ("↑↓", "Navigate"),
                ("Enter", "Recall"),
                ("Ctrl+Y", "Copy"),
                ("Esc", "Back"),
                ("Ctrl+C", "Quit"),
            ],
        ),
    };
    components::render_navigation_footer(
        f,
        footer,
        mode,
        keybindings,
        &[
            ("PERSIST", options.persistent),
            ("AUTO", options.autocomplete_on_match),
        ],
        app.status_toast_message(),
    );

    ScreenLayout {
        search,
        results: body,
    }
}
