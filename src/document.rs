//! Process-wide click listeners.
//!
//! The host loop owns one [`Document`] and feeds it every mouse press.
//! Widgets that need to hear about clicks anywhere on screen (to close a
//! popup, say) register a listener and keep the returned [`Subscription`];
//! dropping it removes the listener.

use ratatui::layout::Position;
use std::cell::RefCell;
use std::collections::BTreeMap;
use std::rc::{Rc, Weak};

type ClickListener = Rc<RefCell<dyn FnMut(Position)>>;

#[derive(Default)]
struct Registry {
    next_id: u64,
    listeners: BTreeMap<u64, ClickListener>,
}

/// Click-listener registry shared by the host and its widgets
#[derive(Clone, Default)]
pub struct Document {
    registry: Rc<RefCell<Registry>>,
}

impl Document {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `listener` for every dispatched click until the subscription is dropped
    pub fn add_click_listener(&self, listener: impl FnMut(Position) + 'static) -> Subscription {
        let mut registry = self.registry.borrow_mut();
        let id = registry.next_id;
        registry.next_id += 1;
        registry
            .listeners
            .insert(id, Rc::new(RefCell::new(listener)));
        tracing::debug!(id, "click listener registered");

        Subscription {
            id,
            registry: Rc::downgrade(&self.registry),
        }
    }

    #[must_use]
    pub fn listener_count(&self) -> usize {
        self.registry.borrow().listeners.len()
    }

    /// Calls every listener registered when the dispatch starts.
    ///
    /// The registry is not borrowed while listeners run, so a listener may
    /// drop subscriptions (its own included) or register new ones.
    pub fn dispatch_click(&self, position: Position) {
        let listeners: Vec<ClickListener> =
            self.registry.borrow().listeners.values().cloned().collect();
        for listener in &listeners {
            // A listener that re-enters the dispatch is skipped rather than aliased
            if let Ok(mut callback) = listener.try_borrow_mut() {
                (&mut *callback)(position);
            }
        }
    }
}

/// Keeps a click listener registered; dropping it deregisters the listener
#[must_use = "dropping the subscription removes the listener immediately"]
pub struct Subscription {
    id: u64,
    registry: Weak<RefCell<Registry>>,
}

impl Subscription {
    /// Deregisters now instead of at end of scope
    pub fn unsubscribe(self) {}
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(registry) = self.registry.upgrade()
            && let Ok(mut registry) = registry.try_borrow_mut()
        {
            registry.listeners.remove(&self.id);
            tracing::debug!(id = self.id, "click listener removed");
        }
    }
}
