/// Direction of a keyboard move through the suggestion list
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
}

/// Next highlighted index for a list of `len` items, wrapping at both ends.
///
/// An empty list always yields 0.
#[must_use]
pub fn select_item(current: usize, len: usize, direction: Direction) -> usize {
    if len == 0 {
        return 0;
    }
    let current = current % len;
    match direction {
        Direction::Down => (current + 1) % len,
        Direction::Up => (current + len - 1) % len,
    }
}

/// New scroll offset that keeps `index` inside a viewport of `viewport` rows.
///
/// The offset is left alone while the row is already visible, and an unknown
/// (zero-height) viewport never scrolls.
#[must_use]
pub fn scroll_into_view(offset: usize, index: usize, viewport: usize) -> usize {
    if viewport == 0 {
        return offset;
    }
    if index < offset {
        index
    } else if index >= offset + viewport {
        index + 1 - viewport
    } else {
        offset
    }
}

/// Generic navigation trait for list-like UI components
pub trait Navigable {
    /// Returns the total number of items in the list
    fn get_item_count(&self) -> usize;

    /// Returns the currently selected index
    fn get_selected_index(&self) -> usize;

    /// Sets the selected index
    fn set_selected_index(&mut self, index: usize);

    /// Moves to the next item (wraps around to start)
    fn next_item(&mut self) {
        let next = select_item(
            self.get_selected_index(),
            self.get_item_count(),
            Direction::Down,
        );
        self.set_selected_index(next);
    }

    /// Moves to the previous item (wraps around to end)
    fn previous_item(&mut self) {
        let previous = select_item(
            self.get_selected_index(),
            self.get_item_count(),
            Direction::Up,
        );
        self.set_selected_index(previous);
    }
}
