#![forbid(unsafe_code)]

//! Deferred notification scopes.
//!
//! While a [`BatchScope`] is alive on the current thread, [`Observable`]
//! mutations apply immediately but their notifications are queued. When the
//! outermost scope drops, each touched observable notifies once with its latest
//! value, in the order the observables were first mutated.
//!
//! This mirrors how a host UI framework batches state updates inside one event
//! handler: several writes, one render.
//!
//! [`Observable`]: crate::Observable

use std::cell::RefCell;
use std::marker::PhantomData;
use std::rc::Rc;

type Flush = Box<dyn FnOnce()>;

#[derive(Default)]
struct BatchState {
    depth: usize,
    /// Keyed by observable identity so repeated writes coalesce.
    queued: Vec<(usize, Flush)>,
}

thread_local! {
    static BATCH: RefCell<BatchState> = RefCell::new(BatchState::default());
}

/// RAII guard deferring observable notifications until it drops.
///
/// Scopes nest; only the outermost one flushes.
#[must_use = "notifications flush as soon as the BatchScope is dropped"]
pub struct BatchScope {
    _not_send: PhantomData<Rc<()>>,
}

impl BatchScope {
    /// Open a batch on the current thread.
    pub fn new() -> Self {
        BATCH.with(|batch| batch.borrow_mut().depth += 1);
        Self {
            _not_send: PhantomData,
        }
    }

    /// Whether any batch is open on the current thread.
    #[must_use]
    pub fn is_active() -> bool {
        is_active()
    }

    /// Number of observables waiting to notify.
    #[must_use]
    pub fn pending() -> usize {
        BATCH.with(|batch| batch.borrow().queued.len())
    }
}

impl Default for BatchScope {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for BatchScope {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BatchScope")
            .field("pending", &Self::pending())
            .finish()
    }
}

impl Drop for BatchScope {
    fn drop(&mut self) {
        let flushes = BATCH.with(|batch| {
            let mut state = batch.borrow_mut();
            state.depth = state.depth.saturating_sub(1);
            if state.depth == 0 {
                std::mem::take(&mut state.queued)
            } else {
                Vec::new()
            }
        });
        for (_, flush) in flushes {
            flush();
        }
    }
}

pub(crate) fn is_active() -> bool {
    BATCH.with(|batch| batch.borrow().depth > 0)
}

pub(crate) fn defer(key: usize, flush: impl FnOnce() + 'static) {
    BATCH.with(|batch| {
        let mut state = batch.borrow_mut();
        if !state.queued.iter().any(|(queued, _)| *queued == key) {
            state.queued.push((key, Box::new(flush)));
        }
    });
}
