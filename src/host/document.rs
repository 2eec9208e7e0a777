//! In-memory DOM-like output target.
//!
//! Nodes are addressed by element id. Each node holds at most one
//! rendered view. Every mount/unmount is recorded so callers can check
//! that a navigation produced exactly the mutations it should have.

use std::collections::BTreeMap;

use crate::dispatch::MountError;

/// A single mutation applied to the document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mutation {
    Mount { node: String, view: String },
    Unmount { node: String, view: String },
}

#[derive(Debug, Clone, Default)]
struct Node {
    view: Option<String>,
    content: String,
}

/// Element tree keyed by id.
#[derive(Debug, Clone, Default)]
pub struct Document {
    nodes: BTreeMap<String, Node>,
    mutations: Vec<Mutation>,
}

impl Document {
    pub fn new() -> Self {
        Self::default()
    }

    /// A document containing empty nodes with the given ids.
    pub fn with_nodes<I, S>(ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut doc = Self::new();
        for id in ids {
            doc.add_node(id);
        }
        doc
    }

    pub fn add_node(&mut self, id: impl Into<String>) {
        self.nodes.entry(id.into()).or_default();
    }

    pub fn remove_node(&mut self, id: &str) -> bool {
        self.nodes.remove(id).is_some()
    }

    pub fn has_node(&self, id: &str) -> bool {
        self.nodes.contains_key(id)
    }

    /// Rendered markup of a node. Empty if nothing is mounted.
    pub fn content(&self, id: &str) -> Option<&str> {
        self.nodes.get(id).map(|n| n.content.as_str())
    }

    /// Name of the view currently mounted in a node.
    pub fn mounted_view(&self, id: &str) -> Option<&str> {
        self.nodes.get(id).and_then(|n| n.view.as_deref())
    }

    pub fn mutations(&self) -> &[Mutation] {
        &self.mutations
    }

    pub fn mount_count(&self) -> usize {
        self.mutations
            .iter()
            .filter(|m| matches!(m, Mutation::Mount { .. }))
            .count()
    }

    /// Place a view's markup into a node, replacing whatever it held.
    ///
    /// No `Unmount` is recorded for the replaced view; callers unmount first.
    pub fn mount(&mut self, id: &str, view: &str, content: String) -> Result<(), MountError> {
        let node = self
            .nodes
            .get_mut(id)
            .ok_or_else(|| MountError::NodeNotFound(id.to_string()))?;
        node.view = Some(view.to_string());
        node.content = content;
        self.mutations.push(Mutation::Mount {
            node: id.to_string(),
            view: view.to_string(),
        });
        Ok(())
    }

    /// Clear a node. No-op (and no mutation) if it was already empty.
    pub fn unmount(&mut self, id: &str) -> Result<(), MountError> {
        let node = self
            .nodes
            .get_mut(id)
            .ok_or_else(|| MountError::NodeNotFound(id.to_string()))?;
        if let Some(view) = node.view.take() {
            node.content.clear();
            self.mutations.push(Mutation::Unmount {
                node: id.to_string(),
                view,
            });
        }
        Ok(())
    }
}
