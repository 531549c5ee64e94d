#![forbid(unsafe_code)]

//! The reactive-cell contract.
//!
//! The synchronizer never owns application state. It only needs to read the
//! cell, write it, and hear about changes; [`ReactiveCell`] is that surface.
//! [`Observable`] implements it directly, and any other store can by
//! forwarding to its own primitives.

use paramsync_reactive::{Observable, Subscription};

/// A value cell the synchronizer can read, write, and watch.
pub trait ReactiveCell<V> {
    /// The current value.
    fn read(&self) -> V;

    /// Replace the value. Listeners must see the new value in [`read`](Self::read).
    ///
    /// A write notifies exactly when the value differs under `PartialEq`; the
    /// notification may be held back (for example by a batch) but not dropped.
    fn write(&self, value: V);

    /// Call `listener` after each change until the subscription drops.
    fn subscribe(&self, listener: Box<dyn Fn(&V)>) -> Subscription;
}

impl<V: Clone + PartialEq + 'static> ReactiveCell<V> for Observable<V> {
    fn read(&self) -> V {
        self.get()
    }

    fn write(&self, value: V) {
        self.set(value);
    }

    fn subscribe(&self, listener: Box<dyn Fn(&V)>) -> Subscription {
        Observable::subscribe(self, listener)
    }
}
