#![forbid(unsafe_code)]

//! In-memory history stack.
//!
//! # Invariants
//!
//! 1. The stack is never empty; `index` always points at a valid entry.
//! 2. `push` discards every entry after `index` before appending.
//! 3. `go` with an out-of-range delta changes nothing and returns `false`.

use crate::location::Location;

/// A browser-like history of visited locations.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MemoryHistory {
    entries: Vec<Location>,
    index: usize,
}

impl Default for MemoryHistory {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}

impl MemoryHistory {
    /// Build a history positioned at the last of `entries` (or at `/` when empty).
    #[must_use]
    pub fn new(entries: Vec<Location>) -> Self {
        let entries = if entries.is_empty() {
            vec![Location::root()]
        } else {
            entries
        };
        let index = entries.len() - 1;
        Self { entries, index }
    }

    #[must_use]
    pub fn current(&self) -> &Location {
        &self.entries[self.index]
    }

    /// Add a new entry after the current one.
    pub fn push(&mut self, location: Location) {
        self.entries.truncate(self.index + 1);
        self.entries.push(location);
        self.index = self.entries.len() - 1;
    }

    /// Overwrite the current entry.
    pub fn replace(&mut self, location: Location) {
        self.entries[self.index] = location;
    }

    /// Move by `delta` entries. Returns whether the position changed.
    pub fn go(&mut self, delta: isize) -> bool {
        let Some(target) = self.index.checked_add_signed(delta) else {
            return false;
        };
        if delta == 0 || target >= self.entries.len() {
            return false;
        }
        self.index = target;
        true
    }

    pub fn back(&mut self) -> bool {
        self.go(-1)
    }

    pub fn forward(&mut self) -> bool {
        self.go(1)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Always `false`; the stack holds at least one entry.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[must_use]
    pub fn index(&self) -> usize {
        self.index
    }

    pub fn entries(&self) -> impl Iterator<Item = &Location> {
        self.entries.iter()
    }
}
