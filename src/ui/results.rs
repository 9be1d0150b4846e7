use ratatui::{
    Frame,
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
};

use crate::app::{App, Focus};
use crate::ui::components;

pub fn render_results(f: &mut Frame, app: &App, area: Rect) {
    let focused = app.focus == Focus::Results;
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(if focused {
            Color::Cyan
        } else {
            Color::DarkGray
        }))
        .title(Line::from(Span::styled(
            " Submitted ",
            Style::default().fg(Color::DarkGray),
        )));

    if app.submitted.is_empty() {
        f.render_widget(
            Paragraph::new(Line::from(Span::styled(
                "Nothing searched yet. Type a term and press Enter.",
                Style::default().fg(Color::DarkGray),
            )))
            .alignment(Alignment::Center)
            .block(block),
            area,
        );
        return;
    }

    let text_width = usize::from(area.width.saturating_sub(16));
    let items: Vec<ListItem> = app
        .submitted
        .iter()
        .enumerate()
        .map(|(index, entry)| {
            let is_selected = focused && index == app.results_selected_index;
            let prefix = if is_selected { " > " } else { "   " };
            ListItem::new(Line::from(vec![
                Span::styled(prefix, Style::default().fg(Color::DarkGray)),
                Span::styled(
                    components::truncate_to_width(&entry.term, text_width),
                    components::selected_name_style(is_selected),
                ),
                Span::styled(
                    format!("  {}", entry.timestamp),
                    Style::default()
                        .fg(Color::DarkGray)
                        .add_modifier(Modifier::ITALIC),
                ),
            ]))
        })
        .collect();

    let mut list_state = ListState::default();
    if focused {
        list_state.select(Some(app.results_selected_index));
    }
    f.render_stateful_widget(List::new(items).block(block), area, &mut list_state);
}
