//! In-memory navigation history.
//!
//! # Behavior
//! - `push` drops any forward entries, then appends
//! - `replace` overwrites the current entry
//! - `back`/`forward` move the cursor; `None` at either end
//!
//! Every successful operation yields the `NavigationEvent` the host would
//! deliver to the dispatcher.

use crate::routing::Location;

/// How the location changed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavigationKind {
    /// Link activation or programmatic navigation.
    Push,
    /// Redirect that does not add a history entry.
    Replace,
    /// Back/forward.
    Pop,
}

/// A location change delivered by the host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavigationEvent {
    pub kind: NavigationKind,
    pub location: Location,
}

#[derive(Debug, Clone)]
pub struct MemoryHistory {
    entries: Vec<Location>,
    index: usize,
}

impl MemoryHistory {
    pub fn new(initial: impl Into<Location>) -> Self {
        Self {
            entries: vec![initial.into()],
            index: 0,
        }
    }

    pub fn current(&self) -> &Location {
        &self.entries[self.index]
    }

    pub fn push(&mut self, location: impl Into<Location>) -> NavigationEvent {
        let location = location.into();
        self.entries.truncate(self.index + 1);
        self.entries.push(location.clone());
        self.index += 1;
        NavigationEvent {
            kind: NavigationKind::Push,
            location,
        }
    }

    pub fn replace(&mut self, location: impl Into<Location>) -> NavigationEvent {
        let location = location.into();
        self.entries[self.index] = location.clone();
        NavigationEvent {
            kind: NavigationKind::Replace,
            location,
        }
    }

    pub fn back(&mut self) -> Option<NavigationEvent> {
        self.index = self.index.checked_sub(1)?;
        Some(self.pop_event())
    }

    pub fn forward(&mut self) -> Option<NavigationEvent> {
        if self.index + 1 >= self.entries.len() {
            return None;
        }
        self.index += 1;
        Some(self.pop_event())
    }

    /// Number of entries. Never zero: the initial location is always kept.
    #[allow(clippy::len_without_is_empty)]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    fn pop_event(&self) -> NavigationEvent {
        NavigationEvent {
            kind: NavigationKind::Pop,
            location: self.current().clone(),
        }
    }
}

impl Default for MemoryHistory {
    fn default() -> Self {
        Self::new(Location::root())
    }
}
