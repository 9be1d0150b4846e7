use super::text_input::TextInput;

/// Snapshot of everything the widget shows apart from its history.
///
/// Snapshots are never edited in place: each transition below builds the next
/// one and the widget swaps it in whole.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchState {
    term: TextInput,
    suggestions: Vec<String>,
    selected_item_index: usize,
    show_suggestions: bool,
    input_clicked: bool,
    scroll_offset: usize,
}

impl SearchState {
    #[must_use]
    pub fn term(&self) -> &str {
        self.term.content()
    }

    #[must_use]
    pub fn input(&self) -> &TextInput {
        &self.term
    }

    #[must_use]
    pub fn suggestions(&self) -> &[String] {
        &self.suggestions
    }

    #[must_use]
    pub fn selected_item_index(&self) -> usize {
        self.selected_item_index
    }

    #[must_use]
    pub fn show_suggestions(&self) -> bool {
        self.show_suggestions
    }

    #[must_use]
    pub fn input_clicked(&self) -> bool {
        self.input_clicked
    }

    #[must_use]
    pub fn scroll_offset(&self) -> usize {
        self.scroll_offset
    }

    /// Suggestion under the highlight, if there are any suggestions
    #[must_use]
    pub fn highlighted(&self) -> Option<&str> {
        self.suggestions
            .get(self.selected_item_index)
            .map(String::as_str)
    }

    /// True when neither visibility nor highlight differ from their defaults
    #[must_use]
    pub fn is_closed(&self) -> bool {
        !self.show_suggestions && self.selected_item_index == 0
    }

    /// New term typed, with its fresh suggestion list
    #[must_use]
    pub fn searched(&self, term: TextInput, suggestions: Vec<String>, show: bool) -> Self {
        Self {
            term,
            suggestions,
            selected_item_index: 0,
            show_suggestions: show,
            input_clicked: self.input_clicked,
            scroll_offset: 0,
        }
    }

    /// Cursor moved without changing the text
    #[must_use]
    pub fn with_input(&self, term: TextInput) -> Self {
        Self {
            term,
            ..self.clone()
        }
    }

    #[must_use]
    pub fn with_selection(&self, index: usize, scroll_offset: usize) -> Self {
        Self {
            selected_item_index: index,
            scroll_offset,
            ..self.clone()
        }
    }

    /// Input container clicked: reopen the list for the current term
    #[must_use]
    pub fn clicked(&self, suggestions: Vec<String>, show: bool) -> Self {
        if suggestions == self.suggestions {
            return Self {
                input_clicked: true,
                show_suggestions: self.show_suggestions || show,
                ..self.clone()
            };
        }
        Self {
            term: self.term.clone(),
            suggestions,
            selected_item_index: 0,
            show_suggestions: show,
            input_clicked: true,
            scroll_offset: 0,
        }
    }

    /// Escape pressed: list hidden and emptied, the typed text stays
    #[must_use]
    pub fn escaped(&self) -> Self {
        Self {
            term: self.term.clone(),
            ..Self::default()
        }
    }

    /// Click landed outside the widget
    #[must_use]
    pub fn closed(&self) -> Self {
        Self {
            selected_item_index: 0,
            show_suggestions: false,
            input_clicked: false,
            scroll_offset: 0,
            ..self.clone()
        }
    }

    /// A term was submitted
    #[must_use]
    pub fn submitted(&self) -> Self {
        Self::default()
    }
}
