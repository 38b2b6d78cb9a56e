//! Search tree nodes.
//!
//! Nodes live in an arena owned by the table and refer to each other by
//! index, so transpositions can share a node and the whole tree drops
//! in one free.

use game_connect4::{PositionKey, Side};

/// Index into the node arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(pub u32);

/// One position in the search tree.
#[derive(Debug, Clone)]
pub struct Node {
    /// Canonical key of the position this node represents.
    pub key: PositionKey,

    /// The side that played the move leading into this position. Win
    /// credit during backpropagation is counted for this side. For the
    /// root it is the opponent of the side to move.
    pub mover: Side,

    /// Accumulated reward: 1.0 per win for `mover`, 0.5 per draw.
    pub wins: f64,

    /// Number of simulations that passed through this node.
    pub visits: u32,

    /// Legal columns not yet expanded into children.
    pub untried: Vec<u8>,

    /// Expanded children as (column, node) pairs, in expansion order.
    pub children: Vec<(u8, NodeId)>,
}

impl Node {
    pub fn new(key: PositionKey, mover: Side, untried: Vec<u8>) -> Self {
        Self {
            key,
            mover,
            wins: 0.0,
            visits: 0,
            untried,
            children: Vec::new(),
        }
    }

    /// UCB1 value of this node as a child of a parent with
    /// `parent_visits` visits. Unvisited nodes score infinity so every
    /// child is tried once before any is revisited.
    pub fn ucb1(&self, parent_visits: u32, exploration: f64) -> f64 {
        if self.visits == 0 {
            return f64::INFINITY;
        }
        let visits = self.visits as f64;
        let exploitation = self.wins / visits;
        let parent = (parent_visits.max(1)) as f64;
        exploitation + exploration * (parent.ln() / visits).sqrt()
    }

    /// Fully expanded means every legal reply has a child node.
    pub fn is_fully_expanded(&self) -> bool {
        self.untried.is_empty()
    }
}
