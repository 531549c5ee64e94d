#![forbid(unsafe_code)]

//! In-memory routing for paramsync.
//!
//! The router owns a history stack of [`Location`]s and publishes the current
//! one through an [`Observable`](paramsync_reactive::Observable). Query strings
//! are handled by [`SearchParams`], an ordered multimap with
//! `application/x-www-form-urlencoded` parsing and serialization.
//!
//! Writes to the query string go through [`MemoryRouter::set_search_params`],
//! which accepts either a full replacement collection or a transform applied
//! to the current one ([`SearchParamsUpdate`]). Either way the change is
//! committed as a navigation, pushing or replacing a history entry according
//! to [`NavigateOptions`].

pub mod error;
pub mod history;
pub mod location;
pub mod params;
pub mod router;

pub use error::RouterError;
pub use history::MemoryHistory;
pub use location::Location;
pub use params::SearchParams;
pub use router::{MemoryRouter, NavigateOptions, SearchParamsUpdate};
