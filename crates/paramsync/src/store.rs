#![forbid(unsafe_code)]

//! The URL parameter store contract.
//!
//! [`ParamStore`] is the slice of a router the synchronizer depends on:
//! reading one raw query value, writing it back as a navigation, and being told
//! when that value changes. [`MemoryRouter`] implements it; writes go through
//! the functional [`SearchParamsUpdate`] form so unrelated parameters survive.

use std::cell::RefCell;

use paramsync_reactive::Subscription;
use paramsync_router::{MemoryRouter, NavigateOptions, SearchParamsUpdate};

/// Reactive access to named query-string parameters.
pub trait ParamStore {
    /// Raw value of `name`, or `None` when absent.
    fn get(&self, name: &str) -> Option<String>;

    /// Set `name` to `value`, committing a navigation.
    fn set(&self, name: &str, value: String, options: NavigateOptions);

    /// Remove `name`, committing a navigation.
    fn remove(&self, name: &str, options: NavigateOptions);

    /// Call `listener` each time the raw value of `name` changes.
    ///
    /// Navigations that leave `name` untouched must not reach the listener.
    fn subscribe_param(&self, name: &str, listener: Box<dyn Fn(Option<&str>)>) -> Subscription;
}

impl ParamStore for MemoryRouter {
    fn get(&self, name: &str) -> Option<String> {
        self.search_params().get(name).map(str::to_owned)
    }

    fn set(&self, name: &str, value: String, options: NavigateOptions) {
        let name = name.to_owned();
        self.set_search_params(
            SearchParamsUpdate::transform(move |params| params.set(name, value)),
            options,
        );
    }

    fn remove(&self, name: &str, options: NavigateOptions) {
        let name = name.to_owned();
        self.set_search_params(
            SearchParamsUpdate::transform(move |params| params.delete(&name)),
            options,
        );
    }

    fn subscribe_param(&self, name: &str, listener: Box<dyn Fn(Option<&str>)>) -> Subscription {
        let name = name.to_owned();
        let last = RefCell::new(ParamStore::get(self, &name));
        self.subscribe(move |location| {
            let raw = location.search_params().get(&name).map(str::to_owned);
            if *last.borrow() == raw {
                return;
            }
            last.replace(raw.clone());
            listener(raw.as_deref());
        })
    }
}
