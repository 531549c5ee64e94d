#![forbid(unsafe_code)]

//! Lifetime management for groups of subscriptions.
//!
//! A [`BindingScope`] stands in for "the component that is currently mounted":
//! every watcher it registers lives exactly as long as the scope. Dropping the
//! scope (unmounting) releases them all, so no callback can fire against state
//! that has been torn down.
//!
//! # Invariants
//!
//! 1. Subscriptions are released in reverse registration order.
//! 2. After `clear()` or drop, no callback registered through the scope fires.
//! 3. `clear()` leaves the scope reusable.
//! 4. `binding_count()` is always accurate.

use crate::observable::{Observable, Subscription};

/// Collects subscriptions for a logical owner.
#[derive(Default)]
pub struct BindingScope {
    subscriptions: Vec<Subscription>,
}

impl BindingScope {
    /// Create an empty scope.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Keep `sub` alive until the scope is cleared or dropped.
    pub fn hold(&mut self, sub: Subscription) {
        self.subscriptions.push(sub);
    }

    /// Subscribe to `source` for the lifetime of this scope.
    pub fn subscribe<T: Clone + PartialEq + 'static>(
        &mut self,
        source: &Observable<T>,
        callback: impl Fn(&T) + 'static,
    ) -> &mut Self {
        self.hold(source.subscribe(callback));
        self
    }

    /// Number of held subscriptions.
    #[must_use]
    pub fn binding_count(&self) -> usize {
        self.subscriptions.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.subscriptions.is_empty()
    }

    /// Release everything now, newest first.
    pub fn clear(&mut self) {
        while let Some(sub) = self.subscriptions.pop() {
            drop(sub);
        }
    }
}

impl Drop for BindingScope {
    fn drop(&mut self) {
        self.clear();
    }
}

impl std::fmt::Debug for BindingScope {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BindingScope")
            .field("binding_count", &self.subscriptions.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::{Cell, RefCell};
    use std::rc::Rc;

    #[test]
    fn unmount_silences_watchers() {
        let query = Observable::new(String::from("page=1"));
        let renders = Rc::new(Cell::new(0));

        {
            let mut mounted = BindingScope::new();
            let r = Rc::clone(&renders);
            mounted.subscribe(&query, move |_| r.set(r.get() + 1));
            query.set("page=2".into());
            assert_eq!(renders.get(), 1);
        }

        query.set("page=3".into());
        assert_eq!(renders.get(), 1);
        assert_eq!(query.subscriber_count(), 0);
    }

    #[test]
    fn chained_subscribe_counts_every_watcher() {
        let cell = Observable::new(0u32);
        let mut scope = BindingScope::new();
        scope
            .subscribe(&cell, |_| {})
            .subscribe(&cell, |_| {})
            .hold(cell.subscribe(|_| {}));
        assert_eq!(scope.binding_count(), 3);
        assert_eq!(cell.subscriber_count(), 3);
    }

    #[test]
    fn clear_then_reuse() {
        let cell = Observable::new(0);
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut scope = BindingScope::new();

        let l = Rc::clone(&log);
        scope.subscribe(&cell, move |v| l.borrow_mut().push(("old", *v)));
        scope.clear();
        assert!(scope.is_empty());

        let l = Rc::clone(&log);
        scope.subscribe(&cell, move |v| l.borrow_mut().push(("new", *v)));
        cell.set(4);
        assert_eq!(*log.borrow(), vec![("new", 4)]);
    }

    #[test]
    fn debug_shows_count() {
        let cell = Observable::new(());
        let mut scope = BindingScope::new();
        scope.subscribe(&cell, |_| {});
        assert!(format!("{scope:?}").contains("binding_count: 1"));
    }
}
