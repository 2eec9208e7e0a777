//! Host environment abstraction.
//!
//! # Data Flow
//! ```text
//! Host navigation (link, back/forward, redirect)
//!     → history.rs (NavigationEvent)
//!     → Dispatcher::handle
//!     → Host::mount / Host::unmount on the output node
//!     → document.rs (node content + mutation log)
//! ```
//!
//! # Design Decisions
//! - The dispatcher only talks to the `Host` trait
//! - `MemoryHost` is the headless host used by the CLI shell and tests

pub mod document;
pub mod history;

pub use document::{Document, Mutation};
pub use history::{MemoryHistory, NavigationEvent, NavigationKind};

use crate::dispatch::MountError;
use crate::routing::Location;

/// The environment a dispatcher mounts views into.
pub trait Host {
    /// The location the host is currently showing.
    fn location(&self) -> Location;

    /// Whether an output node with this id exists right now.
    fn has_node(&self, id: &str) -> bool;

    /// Render `content` for `view` into the node.
    fn mount(&mut self, id: &str, view: &str, content: String) -> Result<(), MountError>;

    /// Remove whatever view the node holds.
    fn unmount(&mut self, id: &str) -> Result<(), MountError>;
}

/// A `Document` paired with a `MemoryHistory`.
#[derive(Debug, Clone, Default)]
pub struct MemoryHost {
    pub document: Document,
    pub history: MemoryHistory,
}

impl MemoryHost {
    pub fn new(document: Document, initial: impl Into<Location>) -> Self {
        Self {
            document,
            history: MemoryHistory::new(initial),
        }
    }

    /// A host with a single output node, starting at `initial`.
    pub fn with_node(id: &str, initial: impl Into<Location>) -> Self {
        Self::new(Document::with_nodes([id]), initial)
    }
}

impl Host for MemoryHost {
    fn location(&self) -> Location {
        self.history.current().clone()
    }

    fn has_node(&self, id: &str) -> bool {
        self.document.has_node(id)
    }

    fn mount(&mut self, id: &str, view: &str, content: String) -> Result<(), MountError> {
        self.document.mount(id, view, content)
    }

    fn unmount(&mut self, id: &str) -> Result<(), MountError> {
        self.document.unmount(id)
    }
}
