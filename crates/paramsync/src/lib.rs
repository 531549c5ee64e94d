#![forbid(unsafe_code)]

//! Keep a reactive cell and a URL query parameter in step.
//!
//! The crate connects two state sources owned by someone else: a
//! [`ReactiveCell`] (application state) and a [`ParamStore`] (the router's view
//! of the query string). Caller-supplied converters ([`Codec`]) translate
//! between the cell's type and the raw parameter string.
//!
//! - URL changes decode into the cell.
//! - Cell changes encode into the URL as a navigation.
//! - Each direction writes only when its target actually differs, which is
//!   what stops the two from feeding each other forever.
//! - Mounting seeds the cell from the URL without touching the URL.
//!
//! ```
//! use paramsync::use_url_params_sync;
//! use paramsync_reactive::Observable;
//! use paramsync_router::MemoryRouter;
//!
//! let router = MemoryRouter::new(["/search?q=rust"]).unwrap();
//! let query = Observable::new(String::new());
//! let _sync = use_url_params_sync(&query, &router, "q").unwrap();
//!
//! assert_eq!(query.get(), "rust");
//! query.set("wasm".into());
//! assert_eq!(router.location().href(), "/search?q=wasm");
//! ```

pub mod cell;
pub mod codec;
pub mod config;
pub mod error;
pub mod settle;
pub mod store;
pub mod sync;

pub use cell::ReactiveCell;
pub use codec::{Codec, Decode, Encode, default_decode, default_encode};
pub use config::{EmptyValue, HistoryMode, SyncOptions};
pub use error::SyncError;
pub use settle::{Equality, Settle};
pub use store::ParamStore;
pub use sync::{ParamAtomSynchronizer, SyncHandle, SyncPhase};

/// Attach a synchronizer with the default string converters.
pub fn use_url_params_sync<V, C, S>(cell: &C, store: &S, param_name: &str) -> Result<SyncHandle, SyncError>
where
    V: From<String> + ToString + Clone + PartialEq + 'static,
    C: ReactiveCell<V> + Clone + 'static,
    S: ParamStore + Clone + 'static,
{
    use_url_params_sync_with(cell, store, param_name, Codec::default())
}

/// Attach a synchronizer with explicit converters.
pub fn use_url_params_sync_with<V, C, S>(
    cell: &C,
    store: &S,
    param_name: &str,
    codec: Codec<V>,
) -> Result<SyncHandle, SyncError>
where
    V: Clone + PartialEq + 'static,
    C: ReactiveCell<V> + Clone + 'static,
    S: ParamStore + Clone + 'static,
{
    ParamAtomSynchronizer::new(cell.clone(), store.clone(), param_name, codec).attach()
}
