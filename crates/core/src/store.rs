//! Ordered store of committed chip values with change notification.
//!
//! The store is the one piece of authoritative mutable state in the core.
//! Every successful mutating call emits exactly one notification to every
//! subscribed listener, carrying a snapshot of the current values. There is
//! no batching and no suppression: `add` notifies even when the value is a
//! duplicate (duplicates are permitted at this seam; the suggestion filter
//! is what prevents re-adding in practice).

use std::fmt;

use crate::error::ChiplineError;

/// Handle returned by [`ValueStore::subscribe`], used to unsubscribe.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

type Listener<T> = Box<dyn FnMut(&[T])>;

/// Ordered, observable collection of committed values.
pub struct ValueStore<T> {
    /// Committed values in insertion order
    items: Vec<T>,
    /// Subscribed change listeners, in subscription order
    listeners: Vec<(ListenerId, Listener<T>)>,
    /// Next listener id, never reused within one store
    next_listener: u64,
}

impl<T: Clone + PartialEq> ValueStore<T> {
    pub fn new(initial: Vec<T>) -> Self {
        Self {
            items: initial,
            listeners: Vec::new(),
            next_listener: 0,
        }
    }

    // ===== SELECTORS =====

    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn contains(&self, value: &T) -> bool {
        self.items.contains(value)
    }

    // ===== SUBSCRIPTIONS =====

    /// Register a change listener. The listener is invoked after every
    /// successful mutation with the current ordered values.
    pub fn subscribe(&mut self, listener: impl FnMut(&[T]) + 'static) -> ListenerId {
        let id = ListenerId(self.next_listener);
        self.next_listener += 1;
        self.listeners.push((id, Box::new(listener)));
        id
    }

    /// Remove a listener. Returns `false` if the id was already gone.
    pub fn unsubscribe(&mut self, id: ListenerId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(lid, _)| *lid != id);
        self.listeners.len() != before
    }

    // ===== REDUCERS =====

    /// Append a value and notify once.
    pub fn add(&mut self, value: T) {
        self.items.push(value);
        self.notify();
    }

    /// Remove the value at `index` and notify once.
    ///
    /// Indices come from real displayed chips, so an out-of-range index is a
    /// wiring bug; it surfaces as [`ChiplineError::OutOfRange`] with no
    /// mutation and no notification.
    pub fn remove_at(&mut self, index: usize) -> Result<T, ChiplineError> {
        if index >= self.items.len() {
            return Err(ChiplineError::OutOfRange {
                index,
                len: self.items.len(),
            });
        }
        let removed = self.items.remove(index);
        self.notify();
        Ok(removed)
    }

    /// Remove the first value equal to `value`. Silent no-op (no
    /// notification) when absent; returns whether anything was removed.
    pub fn remove_by_value(&mut self, value: &T) -> bool {
        let Some(index) = self.items.iter().position(|item| item == value) else {
            return false;
        };
        self.items.remove(index);
        self.notify();
        true
    }

    /// Remove the most recently committed value. Silent no-op when empty.
    pub fn remove_last(&mut self) -> Option<T> {
        let removed = self.items.pop()?;
        self.notify();
        Some(removed)
    }

    /// Drop all values and notify once.
    pub fn clear(&mut self) {
        self.items.clear();
        self.notify();
    }

    fn notify(&mut self) {
        let items = &self.items;
        for (_, listener) in &mut self.listeners {
            listener(items);
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for ValueStore<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ValueStore")
            .field("items", &self.items)
            .field("listeners", &self.listeners.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::rc::Rc;

    fn counting_store() -> (ValueStore<String>, Rc<Cell<usize>>) {
        let mut store = ValueStore::new(Vec::new());
        let count = Rc::new(Cell::new(0));
        let seen = Rc::clone(&count);
        store.subscribe(move |_| seen.set(seen.get() + 1));
        (store, count)
    }

    #[test]
    fn add_notifies_once_per_call_including_duplicates() {
        let (mut store, count) = counting_store();
        store.add("go".to_string());
        store.add("go".to_string());
        assert_eq!(store.items(), ["go", "go"]);
        assert_eq!(count.get(), 2);
    }

    #[test]
    fn remove_at_out_of_range_errors_without_notifying() {
        let (mut store, count) = counting_store();
        store.add("rust".to_string());
        assert_eq!(
            store.remove_at(3),
            Err(ChiplineError::OutOfRange { index: 3, len: 1 })
        );
        assert_eq!(store.len(), 1);
        assert_eq!(count.get(), 1);
    }

    #[test]
    fn remove_by_value_missing_is_silent() {
        let (mut store, count) = counting_store();
        store.add("rust".to_string());
        assert!(!store.remove_by_value(&"zig".to_string()));
        assert_eq!(count.get(), 1);
        assert!(store.remove_by_value(&"rust".to_string()));
        assert_eq!(count.get(), 2);
        assert!(store.is_empty());
    }

    #[test]
    fn remove_last_on_empty_is_silent() {
        let (mut store, count) = counting_store();
        assert!(store.remove_last().is_none());
        assert_eq!(count.get(), 0);
        store.add("a".to_string());
        assert_eq!(store.remove_last().as_deref(), Some("a"));
        assert_eq!(count.get(), 2);
    }

    #[test]
    fn clear_notifies_once() {
        let (mut store, count) = counting_store();
        store.add("a".to_string());
        store.add("b".to_string());
        store.clear();
        assert!(store.is_empty());
        assert_eq!(count.get(), 3);
    }

    #[test]
    fn unsubscribe_stops_notifications() {
        let mut store = ValueStore::new(Vec::new());
        let count = Rc::new(Cell::new(0));
        let seen = Rc::clone(&count);
        let id = store.subscribe(move |_| seen.set(seen.get() + 1));
        store.add("a".to_string());
        assert!(store.unsubscribe(id));
        assert!(!store.unsubscribe(id));
        store.add("b".to_string());
        assert_eq!(count.get(), 1);
    }

    #[test]
    fn listener_sees_ordered_snapshot() {
        let mut store = ValueStore::new(vec!["pre".to_string()]);
        let last: Rc<Cell<usize>> = Rc::new(Cell::new(0));
        let seen = Rc::clone(&last);
        store.subscribe(move |items: &[String]| seen.set(items.len()));
        store.add("next".to_string());
        assert_eq!(last.get(), 2);
    }
}
