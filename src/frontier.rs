//! Frontier disciplines for the three search strategies.
//!
//! Every frontier tracks the configurations it currently holds and refuses
//! to queue a configuration twice, whatever path produced it.

use std::cmp::{Ordering, Reverse};
use std::collections::{BinaryHeap, HashSet, VecDeque};

use crate::heuristic::heuristic;
use crate::puzzle::{Move, PuzzleState};
use crate::tree::StateId;

pub trait Frontier {
    /// Queues `id`, whose state is `state`. Returns `false` if a state with
    /// the same configuration is already queued.
    fn add(&mut self, id: StateId, state: &PuzzleState) -> bool;

    /// Takes the next state according to the discipline.
    fn remove(&mut self) -> Option<StateId>;

    /// Whether a state with this configuration is queued.
    fn contains(&self, config: &[u32]) -> bool;

    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// First-in first-out queue for breadth-first search.
#[derive(Debug, Default)]
pub struct QueueFrontier {
    queue: VecDeque<(StateId, Vec<u32>)>,
    members: HashSet<Vec<u32>>,
}

impl QueueFrontier {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Frontier for QueueFrontier {
    fn add(&mut self, id: StateId, state: &PuzzleState) -> bool {
        if !self.members.insert(state.config().to_vec()) {
            return false;
        }
        self.queue.push_back((id, state.config().to_vec()));
        true
    }

    fn remove(&mut self) -> Option<StateId> {
        let (id, config) = self.queue.pop_front()?;
        self.members.remove(&config);
        Some(id)
    }

    fn contains(&self, config: &[u32]) -> bool {
        self.members.contains(config)
    }

    fn len(&self) -> usize {
        self.queue.len()
    }
}

/// Last-in first-out stack for depth-first search.
#[derive(Debug, Default)]
pub struct StackFrontier {
    stack: Vec<(StateId, Vec<u32>)>,
    members: HashSet<Vec<u32>>,
}

impl StackFrontier {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Frontier for StackFrontier {
    fn add(&mut self, id: StateId, state: &PuzzleState) -> bool {
        if !self.members.insert(state.config().to_vec()) {
            return false;
        }
        self.stack.push((id, state.config().to_vec()));
        true
    }

    fn remove(&mut self) -> Option<StateId> {
        let (id, config) = self.stack.pop()?;
        self.members.remove(&config);
        Some(id)
    }

    fn contains(&self, config: &[u32]) -> bool {
        self.members.contains(config)
    }

    fn len(&self) -> usize {
        self.stack.len()
    }
}

/// Ordering key of the informed frontier: `(cost + h, action, seq)`.
///
/// The action compares `Initial < Up < Down < Left < Right`; `seq` is the
/// insertion counter, so entries that tie on both pop in the order they
/// were added.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct PriorityKey {
    pub f_cost: usize,
    pub action: Option<Move>,
    pub seq: u64,
}

#[derive(Debug)]
struct PriorityEntry {
    key: Reverse<PriorityKey>,
    /// Heuristic computed once when the state was queued.
    h_cost: usize,
    id: StateId,
    config: Vec<u32>,
}

impl PartialEq for PriorityEntry {
    fn eq(&self, other: &Self) -> bool {
        self.key == other.key
    }
}

impl Eq for PriorityEntry {}

impl PartialOrd for PriorityEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for PriorityEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        self.key.cmp(&other.key)
    }
}

/// Min-priority queue on `cost + heuristic` for informed search.
#[derive(Debug, Default)]
pub struct PriorityFrontier {
    heap: BinaryHeap<PriorityEntry>,
    members: HashSet<Vec<u32>>,
    next_seq: u64,
}

impl PriorityFrontier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Key and stored heuristic of the entry that would be removed next.
    pub fn peek(&self) -> Option<(PriorityKey, usize)> {
        self.heap.peek().map(|e| (e.key.0, e.h_cost))
    }
}

impl Frontier for PriorityFrontier {
    fn add(&mut self, id: StateId, state: &PuzzleState) -> bool {
        if !self.members.insert(state.config().to_vec()) {
            return false;
        }
        let h_cost = heuristic(state);
        let key = PriorityKey {
            f_cost: state.cost() + h_cost,
            action: state.action(),
            seq: self.next_seq,
        };
        self.next_seq += 1;
        self.heap.push(PriorityEntry {
            key: Reverse(key),
            h_cost,
            id,
            config: state.config().to_vec(),
        });
        true
    }

    fn remove(&mut self) -> Option<StateId> {
        let entry = self.heap.pop()?;
        self.members.remove(&entry.config);
        Some(entry.id)
    }

    fn contains(&self, config: &[u32]) -> bool {
        self.members.contains(config)
    }

    fn len(&self) -> usize {
        self.heap.len()
    }
}
