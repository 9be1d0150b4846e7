use ratatui::{
    Frame,
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};
use unicode_width::UnicodeWidthChar;

const SEPARATOR: &str = "  ";

pub fn render_view_header(frame: &mut Frame, area: Rect, title: &str, detail: &str) {
    frame.render_widget(
        Paragraph::new(Line::from(vec![
            Span::raw(" "),
            Span::styled(
                "Suggestion Search",
                Style::default()
                    .fg(Color::Magenta)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled(" ", Style::default().fg(Color::DarkGray)),
            Span::styled(title.to_string(), Style::default().fg(Color::Cyan)),
            Span::styled(format!(" {}", detail), Style::default().fg(Color::DarkGray)),
        ]))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::DarkGray)),
        )
        .alignment(Alignment::Left),
        area,
    );
}

pub fn selected_name_style(is_selected: bool) -> Style {
    if is_selected {
        Style::default()
            .fg(Color::Black)
            .bg(Color::Cyan)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::White)
    }
}

/// Start and end (in chars) of the slice of `content` to show in `width`
/// columns so the cursor stays visible
pub fn visible_window(content: &str, cursor: usize, width: usize) -> (usize, usize) {
    let length = content.chars().count();
    let cursor = cursor.min(length);
    if length <= width {
        return (0, length);
    }
    let mut start = cursor.saturating_sub(width.saturating_sub(1));
    if start + width > length {
        start = length.saturating_sub(width);
    }
    (start, start + width)
}

pub fn slice_by_chars(value: &str, start: usize, end: usize) -> String {
    value
        .chars()
        .skip(start)
        .take(end.saturating_sub(start))
        .collect()
}

/// Cuts `text` to at most `max_width` terminal columns, marking the cut with `…`
pub fn truncate_to_width(text: &str, max_width: usize) -> String {
    let total: usize = text.chars().map(|c| c.width().unwrap_or(0)).sum();
    if total <= max_width {
        return text.to_string();
    }
    let budget = max_width.saturating_sub(1);
    let mut used = 0;
    let mut truncated = String::new();
    for character in text.chars() {
        let width = character.width().unwrap_or(0);
        if used + width > budget {
            break;
        }
        used += width;
        truncated.push(character);
    }
    if max_width > 0 {
        truncated.push('…');
    }
    truncated
}

/// Footer line: focus badge, key hints, then the widget's option toggles
fn footer_line(
    mode: &str,
    keybindings: &[(&str, &str)],
    toggles: &[(&str, bool)],
) -> Line<'static> {
    let mut spans = vec![
        Span::raw(" "),
        Span::styled(
            format!(" {} ", mode),
            Style::default()
                .fg(Color::Black)
                .bg(Color::Magenta)
                .add_modifier(Modifier::BOLD),
        ),
    ];

    spans.extend(keybindings.iter().flat_map(|&(key, action)| {
        [
            Span::raw(SEPARATOR),
            Span::styled(
                key.to_string(),
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled(format!(" {}", action), Style::default().fg(Color::White)),
        ]
    }));

    spans.extend(toggles.iter().flat_map(|&(label, enabled)| {
        let (marker, color) = if enabled {
            ("●", Color::Green)
        } else {
            ("○", Color::DarkGray)
        };
        [
            Span::raw(SEPARATOR),
            Span::styled(format!("{} {}", marker, label), Style::default().fg(color)),
        ]
    }));

    Line::from(spans)
}

/// Footer bar; a pending toast is drawn inside it, flush right
pub fn render_navigation_footer(
    f: &mut Frame,
    area: Rect,
    mode: &str,
    keybindings: &[(&str, &str)],
    toggles: &[(&str, bool)],
    toast: Option<&str>,
) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray));
    let inner = block.inner(area);

    f.render_widget(
        Paragraph::new(footer_line(mode, keybindings, toggles)).block(block),
        area,
    );

    if let Some(message) = toast {
        f.render_widget(
            Paragraph::new(Span::styled(
                format!(" {} ", message),
                Style::default()
                    .fg(Color::Black)
                    .bg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            ))
            .alignment(Alignment::Right),
            inner,
        );
    }
}
