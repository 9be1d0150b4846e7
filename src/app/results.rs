use crate::app::App;
use crate::app::types::Focus;
use crate::search::Navigable;

impl App {
    pub fn focus_results(&mut self) {
        if !self.submitted.is_empty() {
            self.focus = Focus::Results;
        }
    }

    pub fn focus_search(&mut self) {
        self.focus = Focus::Search;
    }

    /// Puts the selected past search back into the field
    pub fn recall_selected_result(&mut self) {
        let Some(entry) = self.submitted.get(self.results_selected_index) else {
            return;
        };
        let term = entry.term.clone();
        self.search.borrow_mut().handle_search(&term);
        self.focus = Focus::Search;
    }

    pub fn copy_selected_result(&mut self) {
        let term = match self.focus {
            Focus::Results => self.submitted.get(self.results_selected_index),
            Focus::Search => self.submitted.first(),
        }
        .map(|entry| entry.term.clone());

        let Some(term) = term else {
            self.show_status_toast("NOTHING TO COPY");
            return;
        };
        if let Err(error) = self.clipboard_service.copy_text(&term) {
            tracing::warn!(%error, "clipboard copy failed");
            self.show_status_toast("COPY FAILED");
        } else {
            self.show_status_toast("COPIED");
        }
    }

    pub fn next_result(&mut self) {
        ResultsNavigable::new(self).next_item();
    }

    pub fn previous_result(&mut self) {
        ResultsNavigable::new(self).previous_item();
    }
}

// Navigation for the submitted-search pane
pub struct ResultsNavigable<'a> {
    app: &'a mut App,
}

impl<'a> ResultsNavigable<'a> {
    pub fn new(app: &'a mut App) -> Self {
        Self { app }
    }
}

impl<'a> Navigable for ResultsNavigable<'a> {
    fn get_item_count(&self) -> usize {
        self.app.submitted.len()
    }

    fn get_selected_index(&self) -> usize {
        self.app.results_selected_index
    }

    fn set_selected_index(&mut self, index: usize) {
        self.app.results_selected_index = index;
    }
}
