#![forbid(unsafe_code)]

//! Shared, version-tracked values with change notification.
//!
//! # Design
//!
//! [`Observable<T>`] keeps its value, a version counter and a list of weakly
//! held subscriber callbacks behind one `Rc<RefCell<..>>`. Cloning an
//! `Observable` produces another handle to the same cell.
//!
//! A notification pass snapshots the live callbacks and the current value,
//! releases the borrow and then invokes the callbacks in registration order.
//! Callbacks are therefore free to read the observable, write to it, or
//! subscribe and unsubscribe. A write made during a pass marks the cell as
//! pending; the running pass finishes first and then a fresh pass delivers the
//! newest value. Subscribers never observe an older value after a newer one.
//!
//! # Failure Modes
//!
//! - **Callback panics**: the panic propagates to whoever triggered the
//!   mutation. The value has already been updated; the pass state is reset so
//!   later mutations notify normally.
//! - **Mutating inside [`with`](Observable::with)**: panics with a `RefCell`
//!   borrow error. Use [`get`](Observable::get) when the closure needs to write.

use std::any::Any;
use std::cell::RefCell;
use std::fmt;
use std::rc::{Rc, Weak};

use crate::batch;

type Callback<T> = dyn Fn(&T);

struct ObservableInner<T> {
    value: T,
    /// Bumped once per value-changing mutation.
    version: u64,
    subscribers: Vec<Weak<Callback<T>>>,
    /// A notification pass is running.
    notifying: bool,
    /// The value changed while a pass was running.
    pending: bool,
}

/// A shared, observable value.
///
/// # Invariants
///
/// 1. `set` with a value equal to the current one neither bumps the version
///    nor notifies.
/// 2. Subscribers run in registration order.
/// 3. Passes never nest: a write from a callback schedules a follow-up pass.
pub struct Observable<T> {
    inner: Rc<RefCell<ObservableInner<T>>>,
}

impl<T> Clone for Observable<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Rc::clone(&self.inner),
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for Observable<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let inner = self.inner.borrow();
        f.debug_struct("Observable")
            .field("value", &inner.value)
            .field("version", &inner.version)
            .field("subscribers", &inner.subscribers.len())
            .finish()
    }
}

impl<T: Default + Clone + PartialEq + 'static> Default for Observable<T> {
    fn default() -> Self {
        Self::new(T::default())
    }
}

impl<T: Clone + PartialEq + 'static> Observable<T> {
    /// Create a new observable holding `value` at version 0.
    #[must_use]
    pub fn new(value: T) -> Self {
        Self {
            inner: Rc::new(RefCell::new(ObservableInner {
                value,
                version: 0,
                subscribers: Vec::new(),
                notifying: false,
                pending: false,
            })),
        }
    }

    /// Clone out the current value.
    #[must_use]
    pub fn get(&self) -> T {
        self.inner.borrow().value.clone()
    }

    /// Borrow the current value for the duration of `f`.
    pub fn with<R>(&self, f: impl FnOnce(&T) -> R) -> R {
        f(&self.inner.borrow().value)
    }

    /// Replace the value, notifying subscribers if it changed.
    pub fn set(&self, value: T) {
        {
            let mut inner = self.inner.borrow_mut();
            if inner.value == value {
                return;
            }
            inner.value = value;
            inner.version += 1;
        }
        self.notify();
    }

    /// Modify the value in place through a copy, then [`set`](Self::set) it.
    pub fn update(&self, f: impl FnOnce(&mut T)) {
        let mut next = self.get();
        f(&mut next);
        self.set(next);
    }

    /// Number of value-changing mutations so far.
    #[must_use]
    pub fn version(&self) -> u64 {
        self.inner.borrow().version
    }

    /// Register `callback` to run after every change.
    ///
    /// The callback stays registered for as long as the returned
    /// [`Subscription`] is alive.
    pub fn subscribe(&self, callback: impl Fn(&T) + 'static) -> Subscription {
        let callback: Rc<Callback<T>> = Rc::new(callback);
        self.inner
            .borrow_mut()
            .subscribers
            .push(Rc::downgrade(&callback));
        Subscription {
            _callback: Box::new(callback),
        }
    }

    /// Number of live subscribers.
    #[must_use]
    pub fn subscriber_count(&self) -> usize {
        self.inner
            .borrow()
            .subscribers
            .iter()
            .filter(|weak| weak.strong_count() > 0)
            .count()
    }

    /// Whether two handles refer to the same cell.
    #[must_use]
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }

    fn notify(&self) {
        if batch::is_active() {
            let key = Rc::as_ptr(&self.inner).cast::<()>() as usize;
            let this = self.clone();
            batch::defer(key, move || this.notify_now());
            return;
        }
        self.notify_now();
    }

    fn notify_now(&self) {
        {
            let mut inner = self.inner.borrow_mut();
            if inner.notifying {
                inner.pending = true;
                return;
            }
            inner.notifying = true;
        }
        let _pass = PassGuard { inner: &self.inner };
        loop {
            let (value, callbacks) = {
                let mut inner = self.inner.borrow_mut();
                inner.pending = false;
                inner.subscribers.retain(|weak| weak.strong_count() > 0);
                let callbacks: Vec<Rc<Callback<T>>> =
                    inner.subscribers.iter().filter_map(Weak::upgrade).collect();
                (inner.value.clone(), callbacks)
            };
            for callback in &callbacks {
                callback(&value);
            }
            if !self.inner.borrow().pending {
                break;
            }
        }
    }
}

/// Clears the pass flags when a pass ends, including by unwinding.
struct PassGuard<'a, T> {
    inner: &'a RefCell<ObservableInner<T>>,
}

impl<T> Drop for PassGuard<'_, T> {
    fn drop(&mut self) {
        if let Ok(mut inner) = self.inner.try_borrow_mut() {
            inner.notifying = false;
            inner.pending = false;
        }
    }
}

/// RAII guard for a subscriber callback.
///
/// Dropping the guard unregisters the callback.
#[must_use = "dropping a Subscription unsubscribes immediately"]
pub struct Subscription {
    _callback: Box<dyn Any>,
}

impl fmt::Debug for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription").finish_non_exhaustive()
    }
}
