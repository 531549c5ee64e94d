#![forbid(unsafe_code)]

//! Reactive primitives for paramsync.
//!
//! A synchronizer holds two subscriptions, one on the application's cell and
//! one on the router's location, and must release both when its component
//! unmounts. This crate supplies exactly that surface:
//!
//! - [`Observable`] is the cell: a shared value that notifies only on real
//!   changes and keeps a version counter tests can inspect.
//! - [`Subscription`] keeps one callback alive; the observable itself only
//!   holds it weakly.
//! - [`BindingScope`] groups the subscriptions of one mounted owner and drops
//!   them newest first.
//! - [`BatchScope`] models a host event handler: writes inside it land
//!   immediately, and each touched observable notifies once when the
//!   outermost scope closes.
//!
//! Everything is single-threaded. Nothing here is `Send`.
//!
//! # Invariants
//!
//! 1. An observable never notifies for a write equal to its current value.
//! 2. A write made from inside a callback is delivered after the running pass,
//!    to every subscriber registered by then.
//! 3. A notification held back by a batch is delivered once, with the latest
//!    value, when the outermost scope closes.
//! 4. Once a [`BindingScope`] is cleared or dropped, none of its callbacks run
//!    again.

pub mod batch;
pub mod observable;
pub mod scope;

pub use batch::BatchScope;
pub use observable::{Observable, Subscription};
pub use scope::BindingScope;
