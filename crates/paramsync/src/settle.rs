#![forbid(unsafe_code)]

//! The settle rule.
//!
//! A synchronization edge writes only when its computed target differs from
//! what the destination already holds. That single comparison is what stops a
//! URL write from echoing back as a cell write and vice versa.
//!
//! Cell values are compared with a pluggable predicate ([`Settle`]), which
//! defaults to `PartialEq`. Raw query values are compared as strings; an
//! absent parameter never equals any encoded value.

use std::fmt;
use std::rc::Rc;

/// Equality predicate for cell values.
pub type Equality<V> = Rc<dyn Fn(&V, &V) -> bool>;

/// Decides whether a proposed cell value is already in place.
pub struct Settle<V> {
    eq: Equality<V>,
}

impl<V> Clone for Settle<V> {
    fn clone(&self) -> Self {
        Self {
            eq: Rc::clone(&self.eq),
        }
    }
}

impl<V> fmt::Debug for Settle<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Settle").finish_non_exhaustive()
    }
}

impl<V: PartialEq + 'static> Default for Settle<V> {
    fn default() -> Self {
        Self::by(|a: &V, b: &V| a == b)
    }
}

impl<V> Settle<V> {
    /// Compare with `eq` instead of `PartialEq`.
    pub fn by(eq: impl Fn(&V, &V) -> bool + 'static) -> Self {
        Self { eq: Rc::new(eq) }
    }

    #[must_use]
    pub fn is_settled(&self, proposed: &V, current: &V) -> bool {
        (self.eq)(proposed, current)
    }
}

/// Whether `proposed` is already the parameter's raw value.
#[must_use]
pub fn param_settled(proposed: &str, current: Option<&str>) -> bool {
    current == Some(proposed)
}
