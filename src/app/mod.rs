mod clipboard;
mod results;
mod types;

pub use clipboard::ClipboardService;
pub use results::ResultsNavigable;
pub use types::*;

use crate::config::Config;
use crate::document::{Document, Subscription};
use crate::search::{EventResult, SuggestionInputSearch};
use crate::storage::KeyValueStore;
use crate::ui::ScreenLayout;
use color_eyre::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};
use ratatui::layout::{Position, Rect};
use std::cell::RefCell;
use std::rc::Rc;
use std::sync::mpsc::{Receiver, channel};
use std::time::Duration;

/// Demo host: one search widget plus a pane listing what it submitted
pub struct App {
    pub search: Rc<RefCell<SuggestionInputSearch>>,
    pub document: Document,
    subscription: Option<Subscription>,
    submit_rx: Receiver<String>,
    pub submitted: Vec<SubmittedSearch>,
    pub results_selected_index: usize,
    pub results_area: Option<Rect>,
    pub focus: Focus,
    pub visible_rows: u16,
    pub status_toast: Option<StatusToast>,
    pub clipboard_service: ClipboardService,
    pub should_quit: bool,
}

impl App {
    /// Builds the widget from `config`, mounts it and wires its submissions to the results pane
    pub fn new(config: &Config, store: impl KeyValueStore + 'static) -> Result<Self> {
        let (tx, rx) = channel();
        let widget = SuggestionInputSearch::new(config.search.clone())?
            .with_store(store)
            .with_on_submit(move |term| {
                // Receiver lives as long as the app, which owns the widget
                let _ = tx.send(term.to_string());
            });
        let search = Rc::new(RefCell::new(widget));
        let document = Document::new();
        let subscription = SuggestionInputSearch::mount(&search, &document);

        Ok(Self {
            search,
            document,
            subscription: Some(subscription),
            submit_rx: rx,
            submitted: Vec::new(),
            results_selected_index: 0,
            results_area: None,
            focus: Focus::Search,
            visible_rows: config.appearance.visible_rows.max(1),
            status_toast: None,
            clipboard_service: ClipboardService::new(),
            should_quit: false,
        })
    }

    /// Moves terms submitted since the last call into the results pane
    pub fn check_submissions(&mut self) {
        while let Ok(term) = self.submit_rx.try_recv() {
            tracing::info!(term = %term, "search submitted");
            self.submitted.insert(0, SubmittedSearch::new(term));
            self.results_selected_index = 0;
            self.show_status_toast("SEARCHED");
        }
    }

    /// Records where the last frame put the widget and the results pane
    pub fn set_screen_layout(&mut self, layout: ScreenLayout) {
        self.search.borrow_mut().set_layout(layout.search);
        self.results_area = Some(layout.results);
    }

    pub fn handle_mouse(&mut self, mouse: MouseEvent) {
        let left_press = matches!(mouse.kind, MouseEventKind::Down(MouseButton::Left));
        if left_press {
            let position = Position::new(mouse.column, mouse.row);
            self.document.dispatch_click(position);
            if self.results_area.is_some_and(|area| area.contains(position)) {
                self.focus_results();
            }
        }

        let result = self.search.borrow_mut().handle_mouse(mouse);
        // Hover and wheel over the overlay leave keyboard focus alone
        if left_press && result == EventResult::Consumed {
            self.focus_search();
        }
    }

    /// Types pasted text into the search field, skipping control characters
    pub fn handle_paste(&mut self, text: &str) {
        self.focus_search();
        let mut widget = self.search.borrow_mut();
        for character in text.chars().filter(|c| !c.is_control()) {
            widget.handle_key(KeyEvent::new(KeyCode::Char(character), KeyModifiers::NONE));
        }
    }

    /// Drops the outside-click listener
    pub fn unmount(&mut self) {
        if let Some(subscription) = self.subscription.take() {
            subscription.unsubscribe();
        }
    }

    pub fn show_status_toast(&mut self, message: impl Into<String>) {
        self.status_toast = Some(StatusToast::new(message));
    }

    pub fn clear_expired_status_toast(&mut self) {
        let should_clear = self
            .status_toast
            .as_ref()
            .is_some_and(|toast| toast.is_expired(Duration::from_secs(3)));
        if should_clear {
            self.status_toast = None;
        }
    }

    #[must_use]
    pub fn status_toast_message(&self) -> Option<&str> {
        self.status_toast.as_ref().map(|toast| toast.message.as_str())
    }
}
