//! Search drivers and the solution record they produce.
//!
//! All three strategies run the same loop and differ only in the frontier
//! discipline, the order children are queued in, and where the maximum
//! search depth is sampled:
//!
//! | strategy      | frontier            | child order | depth sampled on |
//! |---------------|---------------------|-------------|------------------|
//! | breadth-first | [`QueueFrontier`]   | U, D, L, R  | queued children  |
//! | depth-first   | [`StackFrontier`]   | R, L, D, U  | popped state     |
//! | informed      | [`PriorityFrontier`]| U, D, L, R  | queued children  |

use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;
use std::time::Instant;

use log::{debug, info, trace, warn};
use serde::Serialize;

use crate::error::{PuzzleError, Result};
use crate::frontier::{Frontier, PriorityFrontier, QueueFrontier, StackFrontier};
use crate::puzzle::{action_name, Move, PuzzleState};
use crate::tree::{SearchTree, StateId};
use crate::usage::MemoryBaseline;

const PROGRESS_INTERVAL: usize = 10_000;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Strategy {
    BreadthFirst,
    DepthFirst,
    Informed,
}

impl Strategy {
    pub const ALL: [Strategy; 3] = [
        Strategy::BreadthFirst,
        Strategy::DepthFirst,
        Strategy::Informed,
    ];

    pub fn short_name(&self) -> &'static str {
        match self {
            Strategy::BreadthFirst => "bfs",
            Strategy::DepthFirst => "dfs",
            Strategy::Informed => "ast",
        }
    }

    fn frontier(&self) -> Box<dyn Frontier> {
        match self {
            Strategy::BreadthFirst => Box::new(QueueFrontier::new()),
            Strategy::DepthFirst => Box::new(StackFrontier::new()),
            Strategy::Informed => Box::new(PriorityFrontier::new()),
        }
    }

    /// Depth-first samples depth on pop, the others on queued children.
    fn samples_depth_on_pop(&self) -> bool {
        matches!(self, Strategy::DepthFirst)
    }

    /// Depth-first pushes children in reverse so Up is popped first.
    fn reverses_children(&self) -> bool {
        matches!(self, Strategy::DepthFirst)
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Strategy::BreadthFirst => "breadth-first",
            Strategy::DepthFirst => "depth-first",
            Strategy::Informed => "informed",
        };
        write!(f, "{}", s)
    }
}

impl FromStr for Strategy {
    type Err = PuzzleError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "bfs" | "breadth-first" => Ok(Strategy::BreadthFirst),
            "dfs" | "depth-first" => Ok(Strategy::DepthFirst),
            "ast" | "astar" | "a-star" | "informed" => Ok(Strategy::Informed),
            other => Err(PuzzleError::Parse(format!(
                "unknown strategy {other:?}, expected bfs, dfs or ast"
            ))),
        }
    }
}

/// Outcome of a successful search.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Solution {
    pub path_to_goal: Vec<Move>,
    pub cost_of_path: usize,
    /// Number of configurations expanded before the goal was popped.
    pub nodes_expanded: usize,
    /// Cost of the goal state.
    pub search_depth: usize,
    pub max_search_depth: usize,
    /// Wall time of the search in seconds.
    pub running_time: f64,
    /// Growth of the process peak RSS during the search, in megabytes.
    pub max_ram_usage: f64,
}

/// Validates `config` as an `n`-wide board and searches it.
///
/// Returns `Ok(None)` when the reachable state space is exhausted without
/// meeting the goal.
///
/// # Errors
///
/// [`PuzzleError::InvalidConfiguration`] if `config` is not a permutation of
/// `0..n²` or `n < 2`.
pub fn solve(strategy: Strategy, config: Vec<u32>, n: usize) -> Result<Option<Solution>> {
    let root = PuzzleState::new(config, n)?;
    Ok(search(strategy, root))
}

pub fn search(strategy: Strategy, root: PuzzleState) -> Option<Solution> {
    let mut frontier = strategy.frontier();
    run(strategy, root, frontier.as_mut())
}

pub fn bfs_search(root: PuzzleState) -> Option<Solution> {
    search(Strategy::BreadthFirst, root)
}

pub fn dfs_search(root: PuzzleState) -> Option<Solution> {
    search(Strategy::DepthFirst, root)
}

pub fn a_star_search(root: PuzzleState) -> Option<Solution> {
    search(Strategy::Informed, root)
}

fn run(strategy: Strategy, root: PuzzleState, frontier: &mut dyn Frontier) -> Option<Solution> {
    let start = Instant::now();
    let memory = MemoryBaseline::capture();

    info!("{strategy} search from {:?}", root.config());

    let mut tree = SearchTree::new(root);
    let mut explored: HashSet<Vec<u32>> = HashSet::new();
    let root_id = tree.root();
    let mut max_search_depth = if strategy.samples_depth_on_pop() {
        tree.get(root_id).cost()
    } else {
        0
    };
    frontier.add(root_id, tree.get(root_id));

    while let Some(id) = frontier.remove() {
        let state = tree.get(id);
        trace!(
            "pop {:?} via {} at cost {}",
            state.config(),
            action_name(state.action()),
            state.cost()
        );

        if strategy.samples_depth_on_pop() {
            max_search_depth = max_search_depth.max(state.cost());
        }

        if state.is_goal() {
            let solution = Solution {
                path_to_goal: tree.path_to(id),
                cost_of_path: state.cost(),
                nodes_expanded: explored.len(),
                search_depth: state.cost(),
                max_search_depth,
                running_time: start.elapsed().as_secs_f64(),
                max_ram_usage: memory.growth_mb(),
            };
            info!(
                "{strategy} search reached the goal: cost {}, {} nodes expanded, {} states allocated",
                solution.cost_of_path,
                solution.nodes_expanded,
                tree.len()
            );
            return Some(solution);
        }

        let config = state.config();
        if !explored.contains(config) && !frontier.contains(config) {
            explored.insert(config.to_vec());
            tree.expand(id);
            if explored.len() % PROGRESS_INTERVAL == 0 {
                debug!(
                    "{} nodes expanded, frontier holds {}",
                    explored.len(),
                    frontier.len()
                );
            }
        }

        for child in ordered_children(&tree, id, strategy.reverses_children()) {
            let child_state = tree.get(child);
            let child_config = child_state.config();
            if !explored.contains(child_config) && !frontier.contains(child_config) {
                frontier.add(child, child_state);
            }
            debug_assert!(
                !(explored.contains(child_config) && frontier.contains(child_config)),
                "{child_config:?} is both explored and queued"
            );
            if !strategy.samples_depth_on_pop() {
                max_search_depth = max_search_depth.max(child_state.cost());
            }
        }
    }

    warn!(
        "{strategy} search exhausted the state space after expanding {} nodes",
        explored.len()
    );
    None
}

fn ordered_children(tree: &SearchTree, id: StateId, reverse: bool) -> Vec<StateId> {
    let mut children = tree.children(id).to_vec();
    if reverse {
        children.reverse();
    }
    children
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::heuristic::{heuristic, manhattan_distance};

    fn root(config: &[u32]) -> PuzzleState {
        PuzzleState::from_config(config.to_vec()).unwrap()
    }

    fn replay(config: &[u32], path: &[Move]) -> PuzzleState {
        let mut state = root(config);
        for &mv in path {
            assert!(state.apply_move(mv), "{mv} leaves the board");
        }
        state
    }

    #[test]
    fn strategy_names_parse() {
        assert_eq!("bfs".parse::<Strategy>().unwrap(), Strategy::BreadthFirst);
        assert_eq!("DFS".parse::<Strategy>().unwrap(), Strategy::DepthFirst);
        assert_eq!("ast".parse::<Strategy>().unwrap(), Strategy::Informed);
        assert_eq!("informed".parse::<Strategy>().unwrap(), Strategy::Informed);
        assert!("ida".parse::<Strategy>().is_err());
        for strategy in Strategy::ALL {
            assert_eq!(strategy.short_name().parse::<Strategy>().unwrap(), strategy);
        }
    }

    #[test]
    fn breadth_first_two_lefts() {
        let solution = bfs_search(root(&[1, 2, 0, 3, 4, 5, 6, 7, 8])).unwrap();
        assert_eq!(solution.path_to_goal, vec![Move::Left, Move::Left]);
        assert_eq!(solution.cost_of_path, 2);
        assert_eq!(solution.nodes_expanded, 6);
        assert_eq!(solution.search_depth, 2);
        assert_eq!(solution.max_search_depth, 3);
    }

    #[test]
    fn informed_two_lefts() {
        let solution = a_star_search(root(&[1, 2, 0, 3, 4, 5, 6, 7, 8])).unwrap();
        assert_eq!(solution.path_to_goal, vec![Move::Left, Move::Left]);
        assert_eq!(solution.nodes_expanded, 2);
        assert_eq!(solution.max_search_depth, 2);
    }

    #[test]
    fn goal_input_needs_no_moves() {
        for strategy in Strategy::ALL {
            let solution = solve(strategy, (0..9).collect(), 3).unwrap().unwrap();
            assert!(solution.path_to_goal.is_empty(), "{strategy}");
            assert_eq!(solution.cost_of_path, 0);
            assert_eq!(solution.nodes_expanded, 0);
            assert_eq!(solution.search_depth, 0);
            assert_eq!(solution.max_search_depth, 0);
        }
    }

    #[test]
    fn unsolvable_two_by_two_exhausts() {
        for strategy in Strategy::ALL {
            assert_eq!(solve(strategy, vec![0, 2, 1, 3], 2).unwrap(), None, "{strategy}");
        }
    }

    #[test]
    fn malformed_input_is_rejected() {
        let err = solve(Strategy::BreadthFirst, vec![1, 2, 3, 4, 5, 6, 7, 8, 8], 3).unwrap_err();
        assert!(matches!(err, PuzzleError::InvalidConfiguration(_)));
        let err = solve(Strategy::Informed, vec![0, 1, 2, 3], 3).unwrap_err();
        assert!(matches!(err, PuzzleError::InvalidConfiguration(_)));
    }

    /// The solvable 2×2 component is a 12-cycle. Depth-first pops Down
    /// first, walks ten states around the cycle, finds the goal already
    /// queued and falls back to the root's Left child.
    #[test]
    fn depth_first_samples_popped_depth() {
        let solution = dfs_search(root(&[1, 0, 2, 3])).unwrap();
        assert_eq!(solution.path_to_goal, vec![Move::Left]);
        assert_eq!(solution.nodes_expanded, 11);
        assert_eq!(solution.max_search_depth, 10);
    }

    #[test]
    fn breadth_first_samples_child_depth() {
        let solution = bfs_search(root(&[1, 0, 2, 3])).unwrap();
        assert_eq!(solution.path_to_goal, vec![Move::Left]);
        assert_eq!(solution.nodes_expanded, 2);
        assert_eq!(solution.max_search_depth, 2);
    }

    #[test]
    fn informed_pops_goal_child_immediately() {
        let solution = a_star_search(root(&[1, 0, 2, 3])).unwrap();
        assert_eq!(solution.nodes_expanded, 1);
        assert_eq!(solution.max_search_depth, 1);
    }

    #[test]
    fn up_left_left() {
        let config = [1, 2, 5, 3, 4, 0, 6, 7, 8];
        let expected = vec![Move::Up, Move::Left, Move::Left];

        let bfs = bfs_search(root(&config)).unwrap();
        assert_eq!(bfs.path_to_goal, expected);
        assert_eq!(bfs.nodes_expanded, 10);
        assert_eq!(bfs.max_search_depth, 4);

        let ast = a_star_search(root(&config)).unwrap();
        assert_eq!(ast.path_to_goal, expected);
        assert_eq!(ast.nodes_expanded, 3);
        assert_eq!(ast.max_search_depth, 3);
    }

    #[test]
    fn path_replays_to_goal() {
        let config = [3, 1, 2, 6, 4, 5, 7, 0, 8];
        for strategy in [Strategy::BreadthFirst, Strategy::Informed] {
            let solution = search(strategy, root(&config)).unwrap();
            assert_eq!(solution.path_to_goal.len(), solution.cost_of_path);
            assert!(replay(&config, &solution.path_to_goal).is_goal());
        }
    }

    /// Each move shifts the blank and one tile by a cell, so the tile-only
    /// sum is a lower bound and the full sum is at most twice the distance.
    #[test]
    fn heuristic_bounds_against_breadth_first_cost() {
        for config in [
            [1, 2, 5, 3, 4, 0, 6, 7, 8],
            [3, 1, 2, 6, 4, 5, 7, 0, 8],
            [1, 4, 2, 3, 5, 0, 6, 7, 8],
        ] {
            let state = root(&config);
            let exact = bfs_search(state.clone()).unwrap().cost_of_path;
            let h = heuristic(&state);
            let tiles_only = h - manhattan_distance(state.blank_index(), 0, state.n());
            assert!(tiles_only <= exact, "{config:?}");
            assert!(h <= 2 * exact, "{config:?}");
        }
    }

    #[test]
    fn timing_fields_are_populated() {
        let solution = bfs_search(root(&[1, 2, 5, 3, 4, 0, 6, 7, 8])).unwrap();
        assert!(solution.running_time >= 0.0);
        assert!(solution.max_ram_usage >= 0.0);
    }
}
