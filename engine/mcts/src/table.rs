//! Transposition-aware node storage.

use std::collections::HashMap;

use game_connect4::PositionKey;

use crate::node::{Node, NodeId};

/// Arena of search nodes indexed by canonical position key.
///
/// Two move orders reaching the same discs share one node, so
/// statistics gathered along either path reinforce both.
#[derive(Debug, Default)]
pub struct SearchTable {
    nodes: Vec<Node>,
    index: HashMap<PositionKey, NodeId>,
}

impl SearchTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn get(&self, id: NodeId) -> &Node {
        &self.nodes[id.0 as usize]
    }

    pub fn get_mut(&mut self, id: NodeId) -> &mut Node {
        &mut self.nodes[id.0 as usize]
    }

    pub fn lookup(&self, key: &PositionKey) -> Option<NodeId> {
        self.index.get(key).copied()
    }

    /// Return the node for `key`, creating it with `make` on a miss.
    pub fn get_or_insert_with<F>(&mut self, key: PositionKey, make: F) -> NodeId
    where
        F: FnOnce() -> Node,
    {
        if let Some(&id) = self.index.get(&key) {
            return id;
        }
        let id = NodeId(self.nodes.len() as u32);
        self.nodes.push(make());
        self.index.insert(key, id);
        id
    }

    /// Drop all nodes, keeping allocations where possible.
    pub fn clear(&mut self) {
        self.nodes.clear();
        self.index.clear();
    }
}
