use ratatui::layout::{Margin, Position, Rect};

/// Screen areas the widget occupied in the last frame.
///
/// This is the widget's hit-test surface: clicks inside it belong to the
/// widget, anything else counts as an outside click.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SearchLayout {
    pub input: Rect,
    pub list: Option<Rect>,
}

impl SearchLayout {
    #[must_use]
    pub fn contains(&self, position: Position) -> bool {
        self.input.contains(position) || self.list.is_some_and(|list| list.contains(position))
    }

    /// Suggestion rows that fit inside the list border
    #[must_use]
    pub fn viewport_rows(&self) -> usize {
        self.list
            .map_or(0, |list| usize::from(list.height.saturating_sub(2)))
    }

    /// Viewport row under `position`, counted from the first visible row
    #[must_use]
    pub fn list_row(&self, position: Position) -> Option<usize> {
        let inner = self.list?.inner(Margin::new(1, 1));
        if !inner.contains(position) {
            return None;
        }
        Some(usize::from(position.y - inner.y))
    }
}
