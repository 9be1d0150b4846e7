//! The suggestion search widget.
//!
//! [`SuggestionInputSearch`] owns the typed term, the recent-search history and
//! the suggestion list state. Hosts feed it crossterm key and mouse events,
//! tell it where it was drawn via [`SuggestionInputSearch::set_layout`], and
//! receive submitted terms through the `on_submit` callback.

mod history;
mod layout;
pub mod matcher;
pub mod navigation;
mod state;
mod text_input;

pub use history::RecentSearches;
pub use layout::SearchLayout;
pub use navigation::{Direction, Navigable};
pub use state::SearchState;
pub use text_input::TextInput;

use crate::config::SearchOptions;
use crate::document::{Document, Subscription};
use crate::storage::{KeyValueStore, PersistenceBridge};
use color_eyre::Result;
use crossterm::event::{
    KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};
use ratatui::layout::Position;
use std::cell::RefCell;
use std::rc::Rc;

type SubmitCallback = Box<dyn FnMut(&str)>;

/// Whether the widget used an event or left it to the host
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventResult {
    Consumed,
    Ignored,
}

pub struct SuggestionInputSearch {
    options: SearchOptions,
    history: RecentSearches,
    state: SearchState,
    revision: u64,
    on_submit: Option<SubmitCallback>,
    persistence: Option<PersistenceBridge>,
    layout: Option<SearchLayout>,
    /// List rows seen in the last frame that drew the list
    viewport_rows: usize,
}

impl SuggestionInputSearch {
    /// Creates the widget, seeding history from `options.recent_searches`
    pub fn new(options: SearchOptions) -> Result<Self> {
        options.validate()?;
        let history = RecentSearches::new(options.recent_searches.iter().cloned());
        Ok(Self {
            options,
            history,
            state: SearchState::default(),
            revision: 0,
            on_submit: None,
            persistence: None,
            layout: None,
            viewport_rows: 0,
        })
    }

    /// Sets the consumer notified with every submitted term
    #[must_use]
    pub fn with_on_submit(mut self, callback: impl FnMut(&str) + 'static) -> Self {
        self.on_submit = Some(Box::new(callback));
        self
    }

    /// Attaches the history store.
    ///
    /// With `persistent` enabled, a history already in the store replaces the
    /// configured seed. A store that cannot be read is logged and left alone.
    #[must_use]
    pub fn with_store(mut self, store: impl KeyValueStore + 'static) -> Self {
        let mut bridge = PersistenceBridge::new(Box::new(store));
        if self.options.persistent {
            match bridge.load() {
                Ok(Some(stored)) => {
                    self.history = RecentSearches::new(stored);
                    tracing::info!(entries = self.history.len(), "recent searches restored");
                }
                Ok(None) => bridge.mark_synced(self.history.as_slice()),
                Err(error) => tracing::warn!(%error, "ignoring unreadable search history"),
            }
        }
        self.persistence = Some(bridge);
        self
    }

    /// Registers the outside-click listener; it stays active while the
    /// returned subscription is alive
    pub fn mount(widget: &Rc<RefCell<Self>>, document: &Document) -> Subscription {
        let weak = Rc::downgrade(widget);
        document.add_click_listener(move |position| {
            if let Some(widget) = weak.upgrade()
                && let Ok(mut widget) = widget.try_borrow_mut()
            {
                widget.handle_click_outside(position);
            }
        })
    }

    #[must_use]
    pub fn state(&self) -> &SearchState {
        &self.state
    }

    #[must_use]
    pub fn history(&self) -> &[String] {
        self.history.as_slice()
    }

    #[must_use]
    pub fn options(&self) -> &SearchOptions {
        &self.options
    }

    /// Number of state replacements so far; unchanged by no-op transitions
    #[must_use]
    pub fn revision(&self) -> u64 {
        self.revision
    }

    #[must_use]
    pub fn has_submit_handler(&self) -> bool {
        self.on_submit.is_some()
    }

    /// Whether the suggestion list should be drawn
    #[must_use]
    pub fn is_list_visible(&self) -> bool {
        self.state.show_suggestions()
    }

    /// Records where the widget was drawn this frame
    pub fn set_layout(&mut self, layout: SearchLayout) {
        if layout.list.is_some() {
            self.viewport_rows = layout.viewport_rows();
        }
        self.layout = Some(layout);
    }

    #[must_use]
    pub fn suggestions_for(&self, term: &str) -> Vec<String> {
        matcher::suggestions_for(
            term,
            self.history.as_slice(),
            self.options.min_length,
            self.options.max_suggestions,
        )
    }

    /// Index the highlight would move to; does not change state
    #[must_use]
    pub fn select_item(&self, suggestions_len: usize, direction: Direction) -> usize {
        navigation::select_item(self.state.selected_item_index(), suggestions_len, direction)
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> EventResult {
        if key.kind != KeyEventKind::Press {
            return EventResult::Ignored;
        }
        let chorded = key
            .modifiers
            .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT);

        match key.code {
            KeyCode::Down => {
                self.next_item();
                EventResult::Consumed
            }
            KeyCode::Up => {
                self.previous_item();
                EventResult::Consumed
            }
            KeyCode::Enter => {
                let term = self
                    .state
                    .highlighted()
                    .unwrap_or_else(|| self.state.term())
                    .to_string();
                self.submit_search(&term);
                EventResult::Consumed
            }
            KeyCode::Tab => match self.state.suggestions() {
                [only] => {
                    let term = only.clone();
                    self.submit_search(&term);
                    EventResult::Consumed
                }
                _ => EventResult::Ignored,
            },
            KeyCode::Esc => {
                let next = self.state.escaped();
                self.replace_state(next);
                EventResult::Consumed
            }
            KeyCode::Char(character) if !chorded => {
                self.edit_term(|input| input.insert_char(character));
                EventResult::Consumed
            }
            KeyCode::Backspace => {
                self.edit_term(TextInput::backspace);
                EventResult::Consumed
            }
            KeyCode::Delete => {
                self.edit_term(TextInput::delete);
                EventResult::Consumed
            }
            KeyCode::Left => self.move_cursor(TextInput::move_left),
            KeyCode::Right => self.move_cursor(TextInput::move_right),
            KeyCode::Home => self.move_cursor(TextInput::move_home),
            KeyCode::End => self.move_cursor(TextInput::move_end),
            KeyCode::Char(_)
            | KeyCode::PageUp
            | KeyCode::PageDown
            | KeyCode::BackTab
            | KeyCode::Insert
            | KeyCode::F(_)
            | KeyCode::Null
            | KeyCode::CapsLock
            | KeyCode::ScrollLock
            | KeyCode::NumLock
            | KeyCode::PrintScreen
            | KeyCode::Pause
            | KeyCode::Menu
            | KeyCode::KeypadBegin
            | KeyCode::Media(_)
            | KeyCode::Modifier(_) => EventResult::Ignored,
        }
    }

    /// Handles clicks and hovers that land on the widget itself.
    ///
    /// Clicks elsewhere are the outside-click listener's business.
    pub fn handle_mouse(&mut self, mouse: MouseEvent) -> EventResult {
        let Some(layout) = self.layout else {
            return EventResult::Ignored;
        };
        let position = Position::new(mouse.column, mouse.row);
        let row = self.suggestion_index_at(&layout, position);

        match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) => {
                if let Some(index) = row {
                    if let Some(text) = self.state.suggestions().get(index).cloned() {
                        self.handle_click_on_item(&text);
                    }
                    EventResult::Consumed
                } else if layout.input.contains(position) {
                    self.handle_container_click();
                    EventResult::Consumed
                } else {
                    EventResult::Ignored
                }
            }
            MouseEventKind::Moved => match row {
                Some(index) => {
                    self.handle_selected_item_index(index);
                    EventResult::Consumed
                }
                None => EventResult::Ignored,
            },
            MouseEventKind::ScrollDown if layout.contains(position) => {
                self.next_item();
                EventResult::Consumed
            }
            MouseEventKind::ScrollUp if layout.contains(position) => {
                self.previous_item();
                EventResult::Consumed
            }
            MouseEventKind::Down(_)
            | MouseEventKind::Up(_)
            | MouseEventKind::Drag(_)
            | MouseEventKind::ScrollDown
            | MouseEventKind::ScrollUp
            | MouseEventKind::ScrollLeft
            | MouseEventKind::ScrollRight => EventResult::Ignored,
        }
    }

    /// Runs a new field value through the matcher
    pub fn handle_search(&mut self, text: &str) {
        self.search_with(TextInput::from(text));
    }

    /// Submits the text of a clicked suggestion row
    pub fn handle_click_on_item(&mut self, text: &str) {
        self.submit_search(text);
    }

    /// Input container clicked: suggestions for the current term come back
    pub fn handle_container_click(&mut self) {
        let term = self.state.term().to_string();
        let suggestions = self.suggestions_for(&term);
        let show = self.should_show(&term, &suggestions);
        let next = self.state.clicked(suggestions, show);
        // The highlight may have moved while the list was hidden
        let index = next.selected_item_index();
        let offset = match self.viewport_rows {
            0 => index,
            rows => navigation::scroll_into_view(next.scroll_offset(), index, rows),
        };
        let next = next.with_selection(index, offset);
        self.replace_state(next);
    }

    /// Highlights the row under the pointer
    pub fn handle_selected_item_index(&mut self, index: usize) {
        if index < self.state.suggestions().len() {
            self.set_selected_index(index);
        }
    }

    /// Closes the list when `position` is outside the widget
    pub fn handle_click_outside(&mut self, position: Position) {
        if self.layout.is_some_and(|layout| layout.contains(position)) {
            return;
        }
        if self.state.is_closed() {
            return;
        }
        let next = self.state.closed();
        self.replace_state(next);
    }

    /// Commits `term` to the history and notifies the consumer.
    ///
    /// Blank terms are ignored. Returns whether the term was accepted.
    pub fn submit_search(&mut self, term: &str) -> bool {
        let term = term.trim();
        if term.is_empty() {
            return false;
        }

        let history_changed = self.history.record(term, self.options.dedupe_policy);
        let next = self.state.submitted();
        self.replace_state(next);
        if history_changed {
            self.persist_history();
        }

        match self.on_submit.as_mut() {
            Some(callback) => callback(term),
            None => tracing::error!(term, "search submitted but no on_submit callback is configured"),
        }
        true
    }

    fn search_with(&mut self, input: TextInput) {
        let suggestions = self.suggestions_for(input.content());

        if self.options.autocomplete_on_match
            && let Some(found) = matcher::exact_match(input.content(), &suggestions)
        {
            let found = found.to_string();
            self.submit_search(&found);
            return;
        }

        let show = self.should_show(input.content(), &suggestions);
        let next = self.state.searched(input, suggestions, show);
        self.replace_state(next);
    }

    fn edit_term(&mut self, edit: impl FnOnce(&mut TextInput)) {
        let mut input = self.state.input().clone();
        edit(&mut input);
        if input.content() == self.state.term() {
            let next = self.state.with_input(input);
            self.replace_state(next);
        } else {
            self.search_with(input);
        }
    }

    fn move_cursor(&mut self, movement: impl FnOnce(&mut TextInput)) -> EventResult {
        let mut input = self.state.input().clone();
        movement(&mut input);
        let next = self.state.with_input(input);
        self.replace_state(next);
        EventResult::Consumed
    }

    fn should_show(&self, term: &str, suggestions: &[String]) -> bool {
        if !suggestions.is_empty() {
            return true;
        }
        self.options.always_show_list
            && !term.is_empty()
            && term.chars().count() >= self.options.min_length
    }

    fn suggestion_index_at(&self, layout: &SearchLayout, position: Position) -> Option<usize> {
        if !self.is_list_visible() {
            return None;
        }
        let index = self.state.scroll_offset() + layout.list_row(position)?;
        (index < self.state.suggestions().len()).then_some(index)
    }

    /// Swaps in `next`. Returns false, without counting a revision, when
    /// nothing changed.
    fn replace_state(&mut self, next: SearchState) -> bool {
        if next == self.state {
            return false;
        }
        self.state = next;
        self.revision += 1;
        true
    }

    fn persist_history(&mut self) {
        if !self.options.persistent {
            return;
        }
        let Some(bridge) = self.persistence.as_mut() else {
            tracing::warn!("persistent search history enabled without a store");
            return;
        };
        match bridge.sync(self.history.as_slice()) {
            Ok(true) => tracing::debug!(entries = self.history.len(), "recent searches persisted"),
            Ok(false) => {}
            Err(error) => tracing::warn!(%error, "failed to persist recent searches"),
        }
    }
}

impl Navigable for SuggestionInputSearch {
    fn get_item_count(&self) -> usize {
        self.state.suggestions().len()
    }

    fn get_selected_index(&self) -> usize {
        self.state.selected_item_index()
    }

    /// Moves the highlight and scrolls it into view
    fn set_selected_index(&mut self, index: usize) {
        let offset =
            navigation::scroll_into_view(self.state.scroll_offset(), index, self.viewport_rows);
        let next = self.state.with_selection(index, offset);
        self.replace_state(next);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DedupePolicy;
    use crate::storage::{MemoryStore, RECENT_SEARCHES_KEY};
    use ratatui::layout::Rect;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use tracing_subscriber::layer::SubscriberExt;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn mouse(kind: MouseEventKind, column: u16, row: u16) -> MouseEvent {
        MouseEvent {
            kind,
            column,
            row,
            modifiers: KeyModifiers::NONE,
        }
    }

    fn left_click(column: u16, row: u16) -> MouseEvent {
        mouse(MouseEventKind::Down(MouseButton::Left), column, row)
    }

    fn options(history: &[&str]) -> SearchOptions {
        SearchOptions {
            recent_searches: history.iter().map(|entry| entry.to_string()).collect(),
            ..SearchOptions::default()
        }
    }

    /// Widget whose submissions are collected into the returned vector
    fn recording(options: SearchOptions) -> (SuggestionInputSearch, Rc<RefCell<Vec<String>>>) {
        let submitted = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&submitted);
        let widget = SuggestionInputSearch::new(options)
            .unwrap()
            .with_on_submit(move |term| sink.borrow_mut().push(term.to_string()));
        (widget, submitted)
    }

    fn type_text(widget: &mut SuggestionInputSearch, text: &str) {
        for character in text.chars() {
            widget.handle_key(key(KeyCode::Char(character)));
        }
    }

    /// Input on rows 0..3, a list with three visible rows (4, 5, 6)
    fn layout() -> SearchLayout {
        SearchLayout {
            input: Rect::new(0, 0, 30, 3),
            list: Some(Rect::new(0, 3, 30, 5)),
        }
    }

    const FIVE_STARS: [&str; 5] = ["star 1", "star 2", "star 3", "star 4", "star 5"];

    #[test]
    fn test_invalid_options_are_rejected() {
        let options = SearchOptions {
            max_suggestions: 0,
            ..SearchOptions::default()
        };
        assert!(SuggestionInputSearch::new(options).is_err());
    }

    #[test]
    fn test_suggestions_for_uses_history_and_limits() {
        let widget = SuggestionInputSearch::new(options(&[])).unwrap();
        assert!(widget.suggestions_for("star wars").is_empty());

        let widget =
            SuggestionInputSearch::new(options(&["star wars", "star wars 2", "star wars 3"]))
                .unwrap();
        assert_eq!(widget.suggestions_for("StAr").len(), 3);
        assert!(widget.suggestions_for("").is_empty());
    }

    #[test]
    fn test_select_item_does_not_mutate() {
        let (mut widget, _) = recording(options(&FIVE_STARS));
        type_text(&mut widget, "star");
        widget.handle_selected_item_index(3);

        assert_eq!(widget.select_item(5, Direction::Down), 4);
        assert_eq!(widget.select_item(5, Direction::Up), 2);
        assert_eq!(widget.state().selected_item_index(), 3);
    }

    #[test]
    fn test_arrow_keys_wrap() {
        let (mut widget, submitted) = recording(options(&FIVE_STARS));
        type_text(&mut widget, "star");
        widget.handle_selected_item_index(3);

        assert_eq!(widget.handle_key(key(KeyCode::Down)), EventResult::Consumed);
        assert_eq!(widget.state().selected_item_index(), 4);
        widget.handle_key(key(KeyCode::Down));
        assert_eq!(widget.state().selected_item_index(), 0);
        widget.handle_key(key(KeyCode::Up));
        assert_eq!(widget.state().selected_item_index(), 4);
        assert!(submitted.borrow().is_empty());
    }

    #[test]
    fn test_arrow_keys_without_suggestions() {
        let (mut widget, _) = recording(options(&[]));
        let revision = widget.revision();

        assert_eq!(widget.handle_key(key(KeyCode::Down)), EventResult::Consumed);
        assert_eq!(widget.state().selected_item_index(), 0);
        assert_eq!(widget.revision(), revision);
    }

    #[test]
    fn test_arrow_keys_scroll_highlight_into_view() {
        let (mut widget, _) = recording(options(&FIVE_STARS));
        widget.set_layout(layout());
        type_text(&mut widget, "star");

        for _ in 0..3 {
            widget.handle_key(key(KeyCode::Down));
        }
        assert_eq!(widget.state().selected_item_index(), 3);
        assert_eq!(widget.state().scroll_offset(), 1);

        widget.handle_key(key(KeyCode::Down));
        assert_eq!(widget.state().scroll_offset(), 2);

        widget.handle_key(key(KeyCode::Down));
        assert_eq!(widget.state().selected_item_index(), 0);
        assert_eq!(widget.state().scroll_offset(), 0);

        // moving inside the viewport leaves the offset alone
        widget.handle_key(key(KeyCode::Down));
        assert_eq!(widget.state().scroll_offset(), 0);
    }

    #[test]
    fn test_enter_submits_highlighted_suggestion() {
        let (mut widget, submitted) = recording(options(&["star wars"]));
        type_text(&mut widget, "star");

        assert_eq!(widget.handle_key(key(KeyCode::Enter)), EventResult::Consumed);
        assert_eq!(*submitted.borrow(), vec!["star wars".to_string()]);
        assert_eq!(widget.state(), &SearchState::default());
    }

    #[test]
    fn test_enter_submits_suggestion_under_highlight() {
        let (mut widget, submitted) = recording(options(&["star wars", "star trek"]));
        type_text(&mut widget, "star");
        widget.handle_key(key(KeyCode::Down));

        widget.handle_key(key(KeyCode::Enter));
        assert_eq!(*submitted.borrow(), vec!["star trek".to_string()]);
    }

    #[test]
    fn test_enter_without_suggestions_submits_typed_term() {
        let (mut widget, submitted) = recording(options(&[]));
        type_text(&mut widget, "dune");
        widget.handle_key(key(KeyCode::Enter));

        assert_eq!(*submitted.borrow(), vec!["dune".to_string()]);
        assert_eq!(widget.history(), ["dune"]);
    }

    #[test]
    fn test_enter_on_empty_field_does_nothing() {
        let (mut widget, submitted) = recording(options(&["dune"]));
        widget.handle_key(key(KeyCode::Enter));

        assert!(submitted.borrow().is_empty());
        assert_eq!(widget.history(), ["dune"]);
    }

    #[test]
    fn test_tab_submits_single_suggestion() {
        let (mut widget, submitted) = recording(options(&["star wars", "dune"]));
        type_text(&mut widget, "star");

        assert_eq!(widget.handle_key(key(KeyCode::Tab)), EventResult::Consumed);
        assert_eq!(*submitted.borrow(), vec!["star wars".to_string()]);
    }

    #[test]
    fn test_tab_ignored_unless_exactly_one_suggestion() {
        let (mut widget, submitted) = recording(options(&["star wars", "star trek"]));
        assert_eq!(widget.handle_key(key(KeyCode::Tab)), EventResult::Ignored);

        type_text(&mut widget, "star");
        assert_eq!(widget.state().suggestions().len(), 2);
        assert_eq!(widget.handle_key(key(KeyCode::Tab)), EventResult::Ignored);
        assert!(submitted.borrow().is_empty());
    }

    #[test]
    fn test_escape_hides_list() {
        let (mut widget, _) = recording(options(&["star wars", "star trek"]));
        type_text(&mut widget, "star");
        widget.handle_key(key(KeyCode::Down));
        assert!(widget.is_list_visible());

        widget.handle_key(key(KeyCode::Esc));
        assert!(!widget.is_list_visible());
        assert_eq!(widget.state().selected_item_index(), 0);
        assert!(widget.state().suggestions().is_empty());
        assert_eq!(widget.state().term(), "star");
    }

    #[test]
    fn test_escape_then_enter_submits_typed_term() {
        let (mut widget, submitted) = recording(options(&["star wars"]));
        type_text(&mut widget, "star");
        widget.handle_key(key(KeyCode::Esc));
        widget.handle_key(key(KeyCode::Enter));

        assert_eq!(*submitted.borrow(), vec!["star".to_string()]);
    }

    #[test]
    fn test_chorded_keys_are_not_typed() {
        let (mut widget, _) = recording(options(&[]));
        let result = widget.handle_key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL));

        assert_eq!(result, EventResult::Ignored);
        assert_eq!(widget.state().term(), "");
    }

    #[test]
    fn test_cursor_editing_refilters() {
        let (mut widget, _) = recording(options(&["dune"]));
        type_text(&mut widget, "dne");
        assert!(widget.state().suggestions().is_empty());

        widget.handle_key(key(KeyCode::Left));
        widget.handle_key(key(KeyCode::Left));
        widget.handle_key(key(KeyCode::Char('u')));
        assert_eq!(widget.state().term(), "dune");
        assert_eq!(widget.state().suggestions(), ["dune"]);

        widget.handle_key(key(KeyCode::End));
        widget.handle_key(key(KeyCode::Backspace));
        assert_eq!(widget.state().term(), "dun");
    }

    #[test]
    fn test_search_updates_state_without_suggestions() {
        let (mut widget, _) = recording(options(&[]));
        widget.handle_search("star wars");

        assert_eq!(widget.state().term(), "star wars");
        assert!(!widget.is_list_visible());
        assert_eq!(widget.revision(), 1);
    }

    #[test]
    fn test_search_shows_matching_suggestions() {
        let (mut widget, _) = recording(options(&["star wars"]));
        widget.handle_search("star wars");

        assert!(widget.is_list_visible());
        assert_eq!(widget.state().suggestions(), ["star wars"]);
    }

    #[test]
    fn test_always_show_list_without_matches() {
        let mut opts = options(&["dune"]);
        opts.always_show_list = true;
        opts.min_length = 2;
        let (mut widget, _) = recording(opts);

        widget.handle_search("x");
        assert!(!widget.is_list_visible());
        widget.handle_search("xy");
        assert!(widget.is_list_visible());
        assert!(widget.state().suggestions().is_empty());
    }

    #[test]
    fn test_autocomplete_on_match_submits() {
        let mut opts = options(&["star wars"]);
        opts.autocomplete_on_match = true;
        let (mut widget, submitted) = recording(opts);

        widget.handle_search("Star Wars");
        assert_eq!(*submitted.borrow(), vec!["star wars".to_string()]);
        assert_eq!(widget.state().term(), "");
    }

    #[test]
    fn test_autocomplete_disabled_keeps_list() {
        let (mut widget, submitted) = recording(options(&["star wars"]));
        widget.handle_search("star wars");

        assert!(submitted.borrow().is_empty());
        assert!(widget.is_list_visible());
    }

    #[test]
    fn test_click_on_item_submits_row_text() {
        let (mut widget, submitted) = recording(options(&["star wars", "star trek"]));
        widget.set_layout(layout());
        type_text(&mut widget, "star");

        assert_eq!(widget.handle_mouse(left_click(4, 5)), EventResult::Consumed);
        assert_eq!(*submitted.borrow(), vec!["star trek".to_string()]);
    }

    #[test]
    fn test_click_on_scrolled_list_uses_offset() {
        let (mut widget, submitted) = recording(options(&FIVE_STARS));
        widget.set_layout(layout());
        type_text(&mut widget, "star");
        for _ in 0..3 {
            widget.handle_key(key(KeyCode::Down));
        }
        assert_eq!(widget.state().scroll_offset(), 1);

        // first visible row now shows the second suggestion
        widget.handle_mouse(left_click(4, 4));
        assert_eq!(*submitted.borrow(), vec!["star 2".to_string()]);
    }

    #[test]
    fn test_click_below_last_row_submits_nothing() {
        let (mut widget, submitted) = recording(options(&["star wars"]));
        widget.set_layout(layout());
        type_text(&mut widget, "star");

        widget.handle_mouse(left_click(4, 6));
        assert!(submitted.borrow().is_empty());
    }

    #[test]
    fn test_handle_click_on_item() {
        let (mut widget, submitted) = recording(options(&[]));
        widget.handle_click_on_item("star wars");

        assert_eq!(*submitted.borrow(), vec!["star wars".to_string()]);
    }

    #[test]
    fn test_hover_highlights_row() {
        let (mut widget, _) = recording(options(&["star wars", "star trek"]));
        widget.set_layout(layout());
        type_text(&mut widget, "star");

        widget.handle_mouse(mouse(MouseEventKind::Moved, 2, 5));
        assert_eq!(widget.state().selected_item_index(), 1);

        let revision = widget.revision();
        widget.handle_selected_item_index(7);
        assert_eq!(widget.revision(), revision);
    }

    #[test]
    fn test_container_click_reopens_list() {
        let (mut widget, _) = recording(options(&["star wars"]));
        widget.set_layout(layout());
        type_text(&mut widget, "star");

        widget.handle_click_outside(Position::new(50, 20));
        assert!(!widget.is_list_visible());

        assert_eq!(widget.handle_mouse(left_click(3, 1)), EventResult::Consumed);
        assert!(widget.state().input_clicked());
        assert!(widget.is_list_visible());
    }

    #[test]
    fn test_reopened_list_shows_highlight_moved_while_hidden() {
        let (mut widget, _) = recording(options(&FIVE_STARS));
        widget.set_layout(layout());
        type_text(&mut widget, "star");
        widget.handle_click_outside(Position::new(50, 20));
        widget.set_layout(SearchLayout {
            list: None,
            ..layout()
        });

        for _ in 0..4 {
            widget.handle_key(key(KeyCode::Down));
        }
        widget.handle_container_click();

        let state = widget.state();
        assert!(widget.is_list_visible());
        assert_eq!(state.selected_item_index(), 4);
        assert_eq!(state.scroll_offset(), 2);
    }

    #[test]
    fn test_reopen_before_first_draw_keeps_highlight_visible() {
        let (mut widget, _) = recording(options(&FIVE_STARS));
        widget.handle_search("star");
        widget.handle_click_outside(Position::new(50, 20));
        widget.handle_key(key(KeyCode::Up));
        widget.handle_container_click();

        assert_eq!(widget.state().selected_item_index(), 4);
        assert_eq!(widget.state().scroll_offset(), 4);
    }

    #[test]
    fn test_click_outside_closes_open_list() {
        let (mut widget, _) = recording(options(&["star wars", "star trek"]));
        widget.set_layout(layout());
        type_text(&mut widget, "star");
        widget.handle_key(key(KeyCode::Down));

        widget.handle_click_outside(Position::new(50, 20));
        assert!(!widget.is_list_visible());
        assert_eq!(widget.state().selected_item_index(), 0);
    }

    #[test]
    fn test_click_outside_when_closed_is_not_a_write() {
        let (mut widget, _) = recording(options(&["star wars"]));
        let revision = widget.revision();

        widget.handle_click_outside(Position::new(50, 20));
        assert_eq!(widget.revision(), revision);
    }

    #[test]
    fn test_click_inside_keeps_list() {
        let (mut widget, _) = recording(options(&["star wars"]));
        widget.set_layout(layout());
        type_text(&mut widget, "star");
        let revision = widget.revision();

        widget.handle_click_outside(Position::new(2, 4));
        assert!(widget.is_list_visible());
        assert_eq!(widget.revision(), revision);
    }

    #[test]
    fn test_submit_adds_new_term_once() {
        let (mut widget, _) = recording(options(&["star"]));

        assert!(widget.submit_search("star wars"));
        assert_eq!(widget.history(), ["star wars", "star"]);

        widget.submit_search("star");
        widget.submit_search("star wars");
        assert_eq!(widget.history(), ["star wars", "star"]);
    }

    #[test]
    fn test_submit_move_to_front_policy() {
        let mut opts = options(&["dune", "star"]);
        opts.dedupe_policy = DedupePolicy::MoveToFront;
        let (mut widget, _) = recording(opts);

        widget.submit_search("star");
        assert_eq!(widget.history(), ["star", "dune"]);
    }

    #[test]
    fn test_submit_ignores_blank_terms() {
        let (mut widget, submitted) = recording(options(&[]));

        assert!(!widget.submit_search("   "));
        assert!(widget.history().is_empty());
        assert!(submitted.borrow().is_empty());
    }

    struct ErrorCounter(Arc<AtomicUsize>);

    impl<S: tracing::Subscriber> tracing_subscriber::Layer<S> for ErrorCounter {
        fn on_event(
            &self,
            event: &tracing::Event<'_>,
            _ctx: tracing_subscriber::layer::Context<'_, S>,
        ) {
            if *event.metadata().level() == tracing::Level::ERROR {
                self.0.fetch_add(1, Ordering::SeqCst);
            }
        }
    }

    #[test]
    fn test_submit_without_callback_reports_error() {
        let errors = Arc::new(AtomicUsize::new(0));
        let subscriber = tracing_subscriber::registry().with(ErrorCounter(Arc::clone(&errors)));
        let mut widget = SuggestionInputSearch::new(options(&["star wars"])).unwrap();
        assert!(!widget.has_submit_handler());

        tracing::subscriber::with_default(subscriber, || {
            assert!(widget.submit_search("dune"));
        });

        assert_eq!(errors.load(Ordering::SeqCst), 1);
        assert_eq!(widget.history(), ["dune", "star wars"]);
    }

    #[test]
    fn test_persistent_history_writes_only_on_change() {
        let store = Rc::new(RefCell::new(MemoryStore::new()));
        let mut opts = options(&["star"]);
        opts.persistent = true;
        let (widget, _) = recording(opts);
        let mut widget = widget.with_store(Rc::clone(&store));
        assert_eq!(store.borrow().writes(), 0);

        widget.submit_search("star wars");
        assert_eq!(store.borrow().writes(), 1);
        assert_eq!(
            store.borrow().get(RECENT_SEARCHES_KEY).unwrap().as_deref(),
            Some(r#"["star wars","star"]"#)
        );

        // unrelated state changes
        type_text(&mut widget, "sta");
        widget.handle_key(key(KeyCode::Down));
        widget.handle_key(key(KeyCode::Esc));
        // already present, history unchanged
        widget.submit_search("star");
        assert_eq!(store.borrow().writes(), 1);

        widget.submit_search("dune");
        assert_eq!(store.borrow().writes(), 2);
    }

    #[test]
    fn test_persistent_history_is_restored() {
        let store = Rc::new(RefCell::new(MemoryStore::new()));
        store
            .borrow_mut()
            .set(RECENT_SEARCHES_KEY, r#"["alien","aliens"]"#)
            .unwrap();
        let mut opts = options(&["seed"]);
        opts.persistent = true;

        let widget = SuggestionInputSearch::new(opts)
            .unwrap()
            .with_store(Rc::clone(&store));
        assert_eq!(widget.history(), ["alien", "aliens"]);
        assert_eq!(widget.suggestions_for("ALIEN").len(), 2);
    }

    #[test]
    fn test_unreadable_store_keeps_seed() {
        let store = Rc::new(RefCell::new(MemoryStore::new()));
        store
            .borrow_mut()
            .set(RECENT_SEARCHES_KEY, "not json")
            .unwrap();
        let mut opts = options(&["seed"]);
        opts.persistent = true;

        let widget = SuggestionInputSearch::new(opts)
            .unwrap()
            .with_store(Rc::clone(&store));
        assert_eq!(widget.history(), ["seed"]);
    }

    #[test]
    fn test_non_persistent_never_writes() {
        let store = Rc::new(RefCell::new(MemoryStore::new()));
        let (widget, _) = recording(options(&[]));
        let mut widget = widget.with_store(Rc::clone(&store));

        widget.submit_search("dune");
        assert_eq!(store.borrow().writes(), 0);
    }

    #[test]
    fn test_mounted_widget_closes_on_document_click() {
        let document = Document::new();
        let (widget, _) = recording(options(&["star wars"]));
        let widget = Rc::new(RefCell::new(widget));
        widget.borrow_mut().set_layout(layout());
        let subscription = SuggestionInputSearch::mount(&widget, &document);

        type_text(&mut widget.borrow_mut(), "star");
        document.dispatch_click(Position::new(2, 4));
        assert!(widget.borrow().is_list_visible());

        document.dispatch_click(Position::new(60, 30));
        assert!(!widget.borrow().is_list_visible());

        drop(subscription);
        assert_eq!(document.listener_count(), 0);

        widget.borrow_mut().handle_container_click();
        document.dispatch_click(Position::new(60, 30));
        assert!(widget.borrow().is_list_visible());
    }
}
