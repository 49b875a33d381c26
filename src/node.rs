//! Search nodes and the arena that owns them.
//!
//! Parent links are indices into a `NodeArena`, so every node has a single
//! owner and a child only ever points back at its parent.
use std::cmp::Ordering;

use crate::engine::{Board, Move};

/// Index of a node inside its `NodeArena`.
pub type NodeId = usize;

/// A node of the search tree.
#[derive(Clone, Debug)]
pub struct SearchNode {
    /// The board configuration at this node.
    pub board: Board,
    /// Parent node (`None` for the root).
    pub parent: Option<NodeId>,
    /// Move that produced this node from its parent (`None` for the root).
    pub last_move: Option<Move>,
    /// Path cost from the root (root = 0).
    pub depth: u32,
    /// `depth + heuristic(board)`.
    pub cost: u32,
}

impl SearchNode {
    pub fn root(board: Board, heuristic_value: u32) -> Self {
        SearchNode {
            board,
            parent: None,
            last_move: None,
            depth: 0,
            cost: heuristic_value,
        }
    }

    /// Builds the child reached from `parent` (stored at `parent_id`) by `mv`.
    pub fn child(parent_id: NodeId, parent: &SearchNode, board: Board, mv: Move, heuristic_value: u32) -> Self {
        let depth = parent.depth + 1;
        SearchNode {
            board,
            parent: Some(parent_id),
            last_move: Some(mv),
            depth,
            cost: depth + heuristic_value,
        }
    }
}

/// Append-only storage for the nodes of one search.
///
/// A* keeps every generated node here. IDA* uses it as its path stack and
/// `truncate`s it when it backtracks.
#[derive(Debug, Default)]
pub struct NodeArena {
    nodes: Vec<SearchNode>,
}

impl NodeArena {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, node: SearchNode) -> NodeId {
        self.nodes.push(node);
        self.nodes.len() - 1
    }

    /// # Panics
    /// Panics if `id` was not returned by `push` on this arena (or was truncated).
    pub fn get(&self, id: NodeId) -> &SearchNode {
        &self.nodes[id]
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Drops every node from index `len` onwards.
    pub fn truncate(&mut self, len: usize) {
        self.nodes.truncate(len);
    }

    /// Walks the parent chain from `id` back to the root.
    pub fn ancestors(&self, id: NodeId) -> impl Iterator<Item = &SearchNode> + '_ {
        std::iter::successors(Some(self.get(id)), move |node| node.parent.map(|p| self.get(p)))
    }

    /// Moves from the root to `id`, in play order.
    pub fn moves_to(&self, id: NodeId) -> Vec<Move> {
        let mut moves: Vec<Move> = self.ancestors(id).filter_map(|node| node.last_move).collect();
        moves.reverse();
        moves
    }

    /// Boards from the root to `id` inclusive, in play order.
    pub fn boards_to(&self, id: NodeId) -> Vec<Board> {
        let mut boards: Vec<Board> = self.ancestors(id).map(|node| node.board.clone()).collect();
        boards.reverse();
        boards
    }
}

/// Open-set entry for a `BinaryHeap`.
///
/// Ordered so that the heap pops the lowest `cost` first; equal costs pop in
/// insertion order (lower `sequence` first).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FrontierEntry {
    pub cost: u32,
    pub sequence: u64,
    pub node: NodeId,
}

impl Ord for FrontierEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reversed for min-heap behaviour.
        other
            .cost
            .cmp(&self.cost)
            .then_with(|| other.sequence.cmp(&self.sequence))
    }
}

impl PartialOrd for FrontierEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}
