//! Read-only access to the page tree.
//!
//! The [`PageTree`] trait is the only way the navigator, the document
//! resolver and the ficha views look at content. Anything that can answer
//! "give me this node" and "give me its children" can back them: the
//! in-memory [`MemoryTree`] built by the scanner, or a database-backed store.

use crate::types::{Fields, Node, NodeId};
use std::collections::BTreeMap;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum TreeError {
    #[error("Duplicate node id {0}")]
    DuplicateId(NodeId),
    #[error("Node {0} references missing parent {1}")]
    MissingParent(NodeId, NodeId),
    #[error("Node {0} is its own parent")]
    SelfParent(NodeId),
}

/// Read-only page repository.
///
/// Implementations return owned nodes so that stores which materialize rows
/// on demand can implement it as easily as in-memory maps.
pub trait PageTree {
    /// Look up a single node.
    fn get_node(&self, id: NodeId) -> Option<Node>;

    /// Direct children of `parent_id`, ascending by `(sort_order, id)`.
    ///
    /// An unknown parent simply has no children.
    fn get_children(&self, parent_id: NodeId) -> Vec<Node>;

    /// Structured fields of a node.
    fn get_fields(&self, id: NodeId) -> Option<Fields> {
        self.get_node(id).map(|n| n.fields)
    }
}

/// In-memory tree keyed by id, with a parent → children index.
#[derive(Debug, Default, Clone)]
pub struct MemoryTree {
    nodes: BTreeMap<NodeId, Node>,
    children: BTreeMap<NodeId, Vec<NodeId>>,
}

impl MemoryTree {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a tree from a flat node list, checking ids and parent links.
    pub fn from_nodes(nodes: Vec<Node>) -> Result<Self, TreeError> {
        let mut tree = Self::new();
        for node in nodes {
            tree.insert(node)?;
        }
        for node in tree.nodes.values() {
            if let Some(parent) = node.parent_id
                && !tree.nodes.contains_key(&parent)
            {
                return Err(TreeError::MissingParent(node.id, parent));
            }
        }
        Ok(tree)
    }

    /// Add a node. Parents may be inserted after their children;
    /// [`from_nodes`](Self::from_nodes) checks the links once everything is in.
    pub fn insert(&mut self, node: Node) -> Result<(), TreeError> {
        if self.nodes.contains_key(&node.id) {
            return Err(TreeError::DuplicateId(node.id));
        }
        if node.parent_id == Some(node.id) {
            return Err(TreeError::SelfParent(node.id));
        }
        if let Some(parent) = node.parent_id {
            self.children.entry(parent).or_default().push(node.id);
        }
        self.nodes.insert(node.id, node);
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Nodes without a parent, in id order.
    pub fn roots(&self) -> Vec<&Node> {
        self.nodes
            .values()
            .filter(|n| n.parent_id.is_none())
            .collect()
    }

    /// All nodes in id order.
    pub fn nodes(&self) -> impl Iterator<Item = &Node> {
        self.nodes.values()
    }

    /// Consume the tree into its flat node list (id order).
    pub fn into_nodes(self) -> Vec<Node> {
        self.nodes.into_values().collect()
    }
}

impl PageTree for MemoryTree {
    fn get_node(&self, id: NodeId) -> Option<Node> {
        self.nodes.get(&id).cloned()
    }

    fn get_children(&self, parent_id: NodeId) -> Vec<Node> {
        let mut children: Vec<Node> = self
            .children
            .get(&parent_id)
            .map(|ids| ids.iter().filter_map(|id| self.nodes.get(id)).cloned().collect())
            .unwrap_or_default();
        children.sort_by_key(|n| (n.sort_order, n.id));
        children
    }
}
