use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, Paragraph},
};

use crate::config::{InputPosition, parse_color};
use crate::search::{SearchLayout, SuggestionInputSearch};
use crate::ui::components;

const PROMPT: &str = "> ";
const CURSOR: &str = "█";

/// Where the widget goes: the input in `input`, the list (when open) over
/// the top of `below`
#[must_use]
pub fn layout(
    widget: &SuggestionInputSearch,
    input: Rect,
    below: Rect,
    visible_rows: u16,
) -> SearchLayout {
    let list = if widget.is_list_visible() {
        let rows = u16::try_from(widget.state().suggestions().len())
            .unwrap_or(u16::MAX)
            .clamp(1, visible_rows.max(1));
        let height = rows.saturating_add(2).min(below.height);
        (height > 2).then_some(Rect {
            height,
            ..below
        })
    } else {
        None
    };
    SearchLayout { input, list }
}

/// Draws the widget and returns the areas it covered
pub fn render_search(
    frame: &mut Frame,
    widget: &SuggestionInputSearch,
    input: Rect,
    below: Rect,
    visible_rows: u16,
    focused: bool,
) -> SearchLayout {
    let layout = layout(widget, input, below, visible_rows);
    render_input(frame, widget, layout.input, focused);
    if let Some(list_area) = layout.list {
        render_suggestion_list(frame, widget, list_area);
    }
    layout
}

fn render_input(frame: &mut Frame, widget: &SuggestionInputSearch, area: Rect, focused: bool) {
    let options = widget.options();
    let accent = parse_color(&options.input_style).unwrap_or(Color::Cyan);
    let input = widget.state().input();
    let cursor = if focused { CURSOR } else { "" };

    let prompt_style = if input.is_empty() {
        Style::default().fg(Color::DarkGray)
    } else {
        Style::default().fg(accent)
    };
    let cursor_style = Style::default().fg(accent).add_modifier(Modifier::SLOW_BLINK);

    let mut spans = Vec::new();
    if options.input_position == InputPosition::Start {
        spans.push(Span::styled(PROMPT, prompt_style));
    }

    if input.is_empty() {
        spans.push(Span::styled(cursor, cursor_style));
        if !(options.floating_label && focused) {
            spans.push(Span::styled(
                options.placeholder.clone(),
                Style::default()
                    .fg(Color::DarkGray)
                    .add_modifier(Modifier::ITALIC),
            ));
        }
    } else {
        let inner_width = usize::from(area.width.saturating_sub(2));
        let reserved = PROMPT.chars().count() + usize::from(focused);
        let available_width = inner_width.saturating_sub(reserved).max(1);
        let (start, end) = components::visible_window(input.content(), input.cursor(), available_width);
        let visible = components::slice_by_chars(input.content(), start, end);
        let relative_cursor = input.cursor().saturating_sub(start).min(visible.chars().count());
        let before = components::slice_by_chars(&visible, 0, relative_cursor);
        let after = components::slice_by_chars(&visible, relative_cursor, visible.chars().count());

        spans.push(Span::styled(before, Style::default().fg(Color::White)));
        spans.push(Span::styled(cursor, cursor_style));
        spans.push(Span::styled(after, Style::default().fg(Color::White)));
    }

    if options.input_position == InputPosition::End {
        spans.push(Span::styled(" <", prompt_style));
    }

    let border_color = if focused { accent } else { Color::DarkGray };
    let mut block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border_color));
    // Floating label: the placeholder moves up into the border once the field is in use
    if options.floating_label && (focused || !input.is_empty()) {
        block = block.title(Line::from(Span::styled(
            format!(" {} ", options.placeholder),
            Style::default().fg(accent),
        )));
    }

    let alignment = match options.input_position {
        InputPosition::Start => ratatui::layout::Alignment::Left,
        InputPosition::End => ratatui::layout::Alignment::Right,
    };
    frame.render_widget(
        Paragraph::new(Line::from(spans))
            .alignment(alignment)
            .block(block),
        area,
    );
}

fn render_suggestion_list(frame: &mut Frame, widget: &SuggestionInputSearch, area: Rect) {
    let options = widget.options();
    let state = widget.state();
    let border = parse_color(&options.suggestion_list_style).unwrap_or(Color::DarkGray);
    let rows = usize::from(area.height.saturating_sub(2));
    let text_width = usize::from(area.width.saturating_sub(4));

    let items: Vec<ListItem> = if state.suggestions().is_empty() {
        vec![ListItem::new(Line::from(Span::styled(
            " No matching searches",
            Style::default().fg(Color::DarkGray),
        )))]
    } else {
        state
            .suggestions()
            .iter()
            .enumerate()
            .skip(state.scroll_offset())
            .take(rows)
            .map(|(index, suggestion)| {
                let is_selected = index == state.selected_item_index();
                let prefix = if is_selected { "> " } else { "  " };
                ListItem::new(Line::from(vec![
                    Span::styled(prefix, Style::default().fg(Color::DarkGray)),
                    Span::styled(
                        components::truncate_to_width(suggestion, text_width),
                        components::selected_name_style(is_selected),
                    ),
                ]))
            })
            .collect()
    };

    let mut block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border));
    if !state.suggestions().is_empty() {
        block = block.title(Line::from(Span::styled(
            format!(
                " {}/{} ",
                state.selected_item_index() + 1,
                state.suggestions().len()
            ),
            Style::default().fg(Color::DarkGray),
        )));
    }

    frame.render_widget(Clear, area);
    frame.render_widget(List::new(items).block(block), area);
}
