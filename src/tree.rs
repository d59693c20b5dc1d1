//! Arena holding every state produced by one search.
//!
//! States refer to their parent by [`StateId`], so the search tree never
//! forms ownership cycles and the winning path can be walked back to the
//! root for as long as the tree is alive. The arena is dropped as a flat
//! `Vec`, which keeps teardown iterative even after a deep depth-first run.

use crate::puzzle::{Move, PuzzleState};

/// Index of a state inside its [`SearchTree`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct StateId(usize);

impl StateId {
    pub fn index(self) -> usize {
        self.0
    }
}

#[derive(Debug)]
struct Node {
    state: PuzzleState,
    /// `None` until the node is expanded.
    children: Option<Vec<StateId>>,
}

#[derive(Debug)]
pub struct SearchTree {
    nodes: Vec<Node>,
}

impl SearchTree {
    pub fn new(root: PuzzleState) -> Self {
        Self {
            nodes: vec![Node {
                state: root,
                children: None,
            }],
        }
    }

    pub fn root(&self) -> StateId {
        StateId(0)
    }

    pub fn get(&self, id: StateId) -> &PuzzleState {
        &self.nodes[id.0].state
    }

    /// Number of states allocated so far.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn is_expanded(&self, id: StateId) -> bool {
        self.nodes[id.0].children.is_some()
    }

    /// Successors of `id` in Up, Down, Left, Right order.
    ///
    /// The first call allocates the successors; later calls return the same
    /// ids without creating new states.
    pub fn expand(&mut self, id: StateId) -> &[StateId] {
        if self.nodes[id.0].children.is_none() {
            let successors: Vec<PuzzleState> = Move::ALL
                .iter()
                .filter_map(|&mv| self.nodes[id.0].state.try_move(mv))
                .collect();

            let mut children = Vec::with_capacity(successors.len());
            for state in successors {
                children.push(StateId(self.nodes.len()));
                self.nodes.push(Node {
                    state: state.with_parent(id),
                    children: None,
                });
            }
            self.nodes[id.0].children = Some(children);
        }

        self.children(id)
    }

    /// Cached successors; empty if `id` was never expanded.
    pub fn children(&self, id: StateId) -> &[StateId] {
        self.nodes[id.0].children.as_deref().unwrap_or(&[])
    }

    /// Actions leading from the root to `id`, in play order.
    pub fn path_to(&self, id: StateId) -> Vec<Move> {
        let mut path = Vec::with_capacity(self.get(id).cost());
        let mut current = id;
        while let Some(parent) = self.get(current).parent() {
            match self.get(current).action() {
                Some(mv) => path.push(mv),
                None => unreachable!("state {current:?} has a parent but no action"),
            }
            current = parent;
        }
        path.reverse();
        path
    }
}
