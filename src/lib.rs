//! Uninformed and informed search over the n×n sliding-tile puzzle.
//!
//! A board is a row-major permutation of `0..n²` with `0` as the blank; the
//! goal places the tiles in ascending order with the blank first.
//!
//! ```
//! use slider_search::{solve, Move, Strategy};
//!
//! let solution = solve(Strategy::BreadthFirst, vec![1, 2, 5, 3, 4, 0, 6, 7, 8], 3)
//!     .unwrap()
//!     .unwrap();
//! assert_eq!(solution.path_to_goal, vec![Move::Up, Move::Left, Move::Left]);
//! ```

pub mod error;
pub mod frontier;
pub mod heuristic;
pub mod puzzle;
pub mod report;
pub mod search;
pub mod tree;
pub mod usage;

pub use error::{PuzzleError, Result};
pub use puzzle::{Move, PuzzleState};
pub use search::{a_star_search, bfs_search, dfs_search, search, solve, Solution, Strategy};
pub use tree::{SearchTree, StateId};
