use crate::puzzle::PuzzleState;

/// Distance between cell `idx` and the goal cell of tile `value` on an
/// `n`-wide board. Tile `v` belongs at row `v / n`, column `v % n`.
pub fn manhattan_distance(idx: usize, value: u32, n: usize) -> usize {
    let value = value as usize;
    (idx / n).abs_diff(value / n) + (idx % n).abs_diff(value % n)
}

/// Sum of every tile's Manhattan distance, the blank included.
pub fn heuristic(state: &PuzzleState) -> usize {
    state
        .config()
        .iter()
        .enumerate()
        .map(|(idx, &value)| manhattan_distance(idx, value, state.n()))
        .sum()
}

/// Path cost so far plus the heuristic estimate.
pub fn total_cost(state: &PuzzleState) -> usize {
    state.cost() + heuristic(state)
}
