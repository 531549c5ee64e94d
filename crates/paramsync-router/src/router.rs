#![forbid(unsafe_code)]

//! The in-memory router.
//!
//! [`MemoryRouter`] is a cheap, clonable handle over a shared history stack
//! plus an [`Observable<Location>`] mirroring the current entry. Every
//! navigation, whether by path, by query update or by history traversal,
//! commits the new location to both.
//!
//! # Invariants
//!
//! 1. `location()` always equals the history's current entry.
//! 2. Subscribers are notified only when the current location actually
//!    changes; re-navigating to the same href still records history but
//!    produces no notification.
//! 3. The history borrow is released before subscribers run, so a subscriber
//!    may navigate again.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use paramsync_reactive::{Observable, Subscription};

use crate::error::RouterError;
use crate::history::MemoryHistory;
use crate::location::Location;
use crate::params::SearchParams;

/// How a navigation affects the history stack.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct NavigateOptions {
    /// Overwrite the current entry instead of pushing a new one.
    pub replace: bool,
}

impl NavigateOptions {
    #[must_use]
    pub fn push() -> Self {
        Self { replace: false }
    }

    #[must_use]
    pub fn replace() -> Self {
        Self { replace: true }
    }
}

/// A change to the query string: a literal collection or a transform of the
/// current one.
pub enum SearchParamsUpdate {
    Replace(SearchParams),
    Transform(Box<dyn FnOnce(&mut SearchParams)>),
}

impl SearchParamsUpdate {
    /// Edit the current parameters in place.
    pub fn transform(f: impl FnOnce(&mut SearchParams) + 'static) -> Self {
        Self::Transform(Box::new(f))
    }

    fn apply(self, mut current: SearchParams) -> SearchParams {
        match self {
            Self::Replace(next) => next,
            Self::Transform(f) => {
                f(&mut current);
                current
            }
        }
    }
}

impl From<SearchParams> for SearchParamsUpdate {
    fn from(params: SearchParams) -> Self {
        Self::Replace(params)
    }
}

impl fmt::Debug for SearchParamsUpdate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Replace(params) => f.debug_tuple("Replace").field(params).finish(),
            Self::Transform(_) => f.write_str("Transform(..)"),
        }
    }
}

/// Router over an in-memory history.
#[derive(Clone)]
pub struct MemoryRouter {
    history: Rc<RefCell<MemoryHistory>>,
    location: Observable<Location>,
}

impl Default for MemoryRouter {
    fn default() -> Self {
        Self::from_history(MemoryHistory::default())
    }
}

impl fmt::Debug for MemoryRouter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let history = self.history.borrow();
        f.debug_struct("MemoryRouter")
            .field("location", &history.current().href())
            .field("index", &history.index())
            .field("len", &history.len())
            .finish()
    }
}

impl MemoryRouter {
    /// Create a router whose history holds `entries`, positioned at the last.
    ///
    /// ```
    /// use paramsync_router::MemoryRouter;
    ///
    /// let router = MemoryRouter::new(["/", "/?tab=files"]).unwrap();
    /// assert_eq!(router.search_params().get("tab"), Some("files"));
    /// ```
    pub fn new<I, S>(entries: I) -> Result<Self, RouterError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let entries = entries
            .into_iter()
            .map(|entry| Location::parse(entry.as_ref()))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self::from_history(MemoryHistory::new(entries)))
    }

    /// Wrap an existing history.
    #[must_use]
    pub fn from_history(history: MemoryHistory) -> Self {
        let location = Observable::new(history.current().clone());
        Self {
            history: Rc::new(RefCell::new(history)),
            location,
        }
    }

    #[must_use]
    pub fn location(&self) -> Location {
        self.location.get()
    }

    /// Parameters of the current location.
    #[must_use]
    pub fn search_params(&self) -> SearchParams {
        self.location.with(Location::search_params)
    }

    /// Navigate to `to` (absolute path, `?query` or `#hash`).
    pub fn navigate(&self, to: &str, options: NavigateOptions) -> Result<(), RouterError> {
        let next = self.location.with(|here| here.resolve(to))?;
        self.commit(next, options);
        Ok(())
    }

    /// Navigate to the current pathname with updated query parameters.
    pub fn set_search_params(
        &self,
        update: impl Into<SearchParamsUpdate>,
        options: NavigateOptions,
    ) {
        let here = self.location();
        let params = update.into().apply(here.search_params());
        self.commit(here.with_search_params(&params), options);
    }

    pub fn back(&self) -> bool {
        self.go(-1)
    }

    pub fn forward(&self) -> bool {
        self.go(1)
    }

    /// Traverse history by `delta` entries.
    pub fn go(&self, delta: isize) -> bool {
        let moved = {
            let mut history = self.history.borrow_mut();
            history.go(delta).then(|| history.current().clone())
        };
        match moved {
            Some(current) => {
                tracing::debug!(href = %current, delta, "history traversal");
                self.location.set(current);
                true
            }
            None => false,
        }
    }

    #[must_use]
    pub fn history_len(&self) -> usize {
        self.history.borrow().len()
    }

    #[must_use]
    pub fn history_index(&self) -> usize {
        self.history.borrow().index()
    }

    /// Run `callback` after every location change.
    pub fn subscribe(&self, callback: impl Fn(&Location) + 'static) -> Subscription {
        self.location.subscribe(callback)
    }

    /// The reactive location cell itself.
    #[must_use]
    pub fn location_observable(&self) -> &Observable<Location> {
        &self.location
    }

    fn commit(&self, next: Location, options: NavigateOptions) {
        tracing::debug!(href = %next, replace = options.replace, "navigate");
        {
            let mut history = self.history.borrow_mut();
            if options.replace {
                history.replace(next.clone());
            } else {
                history.push(next.clone());
            }
        }
        self.location.set(next);
    }
}
