use rand::{seq::SliceRandom, Rng};
use serde::Serialize;
use std::fmt;
use std::str::FromStr;

use crate::error::{PuzzleError, Result};
use crate::tree::StateId;

/// Direction the blank travels.
///
/// Variant order is the canonical expansion order and also the tie-break
/// order of the informed frontier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum Move {
    Up,
    Down,
    Left,
    Right,
}

impl Move {
    pub const ALL: [Move; 4] = [Move::Up, Move::Down, Move::Left, Move::Right];

    /// Row and column delta applied to the blank.
    pub fn as_offset(&self) -> (isize, isize) {
        match self {
            Move::Up => (-1, 0),
            Move::Down => (1, 0),
            Move::Left => (0, -1),
            Move::Right => (0, 1),
        }
    }

    pub fn opposite(&self) -> Self {
        match self {
            Move::Up => Move::Down,
            Move::Down => Move::Up,
            Move::Left => Move::Right,
            Move::Right => Move::Left,
        }
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match *self {
            Move::Up => "Up",
            Move::Left => "Left",
            Move::Down => "Down",
            Move::Right => "Right",
        };
        write!(f, "{}", s)
    }
}

/// Name of an action as it appears in reports; `None` is the root's action.
pub fn action_name(action: Option<Move>) -> String {
    match action {
        Some(mv) => mv.to_string(),
        None => "Initial".to_string(),
    }
}

/// A board snapshot plus the move that produced it.
///
/// Two states with the same configuration are interchangeable for
/// visitation purposes; frontier and explored bookkeeping key on
/// [`PuzzleState::config`] rather than on the state itself.
#[derive(Debug, Clone)]
pub struct PuzzleState {
    config: Vec<u32>,
    n: usize,
    parent: Option<StateId>,
    action: Option<Move>,
    cost: usize,
    blank_index: usize,
}

impl PuzzleState {
    /// Validating root constructor.
    pub fn new(config: Vec<u32>, n: usize) -> Result<Self> {
        match n.checked_mul(n) {
            Some(len) if n >= 2 && len == config.len() => {}
            _ => {
                return Err(PuzzleError::InvalidConfiguration(format!(
                    "{} tiles do not form a {n}x{n} board (n must be at least 2)",
                    config.len()
                )));
            }
        }

        let mut seen = vec![false; config.len()];
        for &value in &config {
            let slot = seen.get_mut(value as usize).ok_or_else(|| {
                PuzzleError::InvalidConfiguration(format!(
                    "tile {value} is out of range for {config:?}"
                ))
            })?;
            if *slot {
                return Err(PuzzleError::InvalidConfiguration(format!(
                    "tile {value} appears more than once in {config:?}"
                )));
            }
            *slot = true;
        }

        // Every slot is filled, so 0 is present.
        let blank_index = config.iter().position(|&v| v == 0).unwrap_or_default();

        Ok(Self {
            config,
            n,
            parent: None,
            action: None,
            cost: 0,
            blank_index,
        })
    }

    /// Builds a root state, inferring the board width from the tile count.
    pub fn from_config(config: Vec<u32>) -> Result<Self> {
        let n = (config.len() as f64).sqrt().round() as usize;
        if n * n != config.len() {
            return Err(PuzzleError::InvalidConfiguration(format!(
                "{} tiles do not form a square board",
                config.len()
            )));
        }
        Self::new(config, n)
    }

    /// The canonical goal: tiles ascending with the blank first.
    ///
    /// `n` must be at least 2 and `n²` must fit in a `u32`.
    pub fn goal(n: usize) -> Self {
        assert!(n >= 2, "a board needs a width of at least 2, got {n}");
        let len = n
            .checked_mul(n)
            .and_then(|len| u32::try_from(len).ok())
            .unwrap_or_else(|| panic!("a {n}x{n} board does not fit in u32 tiles"));
        Self {
            config: (0..len).collect(),
            n,
            parent: None,
            action: None,
            cost: 0,
            blank_index: 0,
        }
    }

    /// A random solvable root state.
    pub fn scrambled<R: Rng + ?Sized>(n: usize, rng: &mut R) -> Self {
        let mut state = Self::goal(n);

        loop {
            state.config.shuffle(rng);
            state.blank_index = state
                .config
                .iter()
                .position(|&v| v == 0)
                .unwrap_or_default();

            if state.is_solvable() {
                break;
            }
        }

        state
    }

    pub fn config(&self) -> &[u32] {
        &self.config
    }

    pub fn n(&self) -> usize {
        self.n
    }

    pub fn parent(&self) -> Option<StateId> {
        self.parent
    }

    pub fn action(&self) -> Option<Move> {
        self.action
    }

    pub fn cost(&self) -> usize {
        self.cost
    }

    pub fn blank_index(&self) -> usize {
        self.blank_index
    }

    pub fn row(&self, idx: usize) -> usize {
        idx / self.n
    }

    pub fn col(&self, idx: usize) -> usize {
        idx % self.n
    }

    pub fn is_goal(&self) -> bool {
        self.config
            .iter()
            .enumerate()
            .all(|(idx, &value)| value as usize == idx)
    }

    pub fn can_move(&self, movement: Move) -> bool {
        let idx = self.blank_index;
        match movement {
            Move::Up => idx >= self.n,
            Move::Down => idx < self.n * (self.n - 1),
            Move::Left => idx % self.n != 0,
            Move::Right => idx % self.n != self.n - 1,
        }
    }

    fn neighbour(&self, movement: Move) -> Option<usize> {
        if !self.can_move(movement) {
            return None;
        }
        let (dr, dc) = movement.as_offset();
        let target = self.blank_index as isize + dr * self.n as isize + dc;
        Some(target as usize)
    }

    /// Slides the blank in place; returns `false` if the move leaves the board.
    pub fn apply_move(&mut self, movement: Move) -> bool {
        match self.neighbour(movement) {
            Some(target) => {
                self.config.swap(self.blank_index, target);
                self.blank_index = target;
                self.cost += 1;
                self.action = Some(movement);
                true
            }
            None => false,
        }
    }

    /// The successor produced by `movement`, detached from any tree.
    pub fn try_move(&self, movement: Move) -> Option<Self> {
        let target = self.neighbour(movement)?;
        let mut config = self.config.clone();
        config.swap(self.blank_index, target);
        Some(Self {
            config,
            n: self.n,
            parent: None,
            action: Some(movement),
            cost: self.cost + 1,
            blank_index: target,
        })
    }

    pub(crate) fn with_parent(mut self, parent: StateId) -> Self {
        self.parent = Some(parent);
        self
    }

    /// Whether the goal is reachable at all.
    ///
    /// Every move swaps the blank with a neighbour, flipping both the
    /// permutation parity and the parity of the blank's distance from
    /// cell 0, so the two parities agree exactly on the goal's component.
    pub fn is_solvable(&self) -> bool {
        let blank_distance = self.row(self.blank_index) + self.col(self.blank_index);
        Self::count_inversions(&self.config) % 2 == blank_distance % 2
    }

    fn count_inversions(flattened: &[u32]) -> usize {
        flattened
            .iter()
            .enumerate()
            .map(|(i, &val)| {
                flattened[i + 1..]
                    .iter()
                    .filter(|&&next| next < val)
                    .count()
            })
            .sum()
    }
}

impl PartialEq for PuzzleState {
    fn eq(&self, other: &Self) -> bool {
        self.config == other.config
    }
}

impl Eq for PuzzleState {}

impl FromStr for PuzzleState {
    type Err = PuzzleError;

    /// Parses a comma separated board such as `1,2,5,3,4,0,6,7,8`.
    fn from_str(s: &str) -> Result<Self> {
        let config = s
            .split(',')
            .map(|token| {
                let token = token.trim();
                token
                    .parse::<u32>()
                    .map_err(|e| PuzzleError::Parse(format!("{token:?}: {e}")))
            })
            .collect::<Result<Vec<u32>>>()?;
        Self::from_config(config)
    }
}

impl fmt::Display for PuzzleState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.config.chunks(self.n) {
            for &val in row {
                write!(f, "{:2} ", val)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn board(config: &[u32]) -> PuzzleState {
        PuzzleState::from_config(config.to_vec()).unwrap()
    }

    #[test]
    fn rejects_duplicate_tile() {
        let err = PuzzleState::new(vec![1, 2, 3, 4, 5, 6, 7, 8, 8], 3).unwrap_err();
        assert!(matches!(err, PuzzleError::InvalidConfiguration(_)));
    }

    #[test]
    fn rejects_out_of_range_tile() {
        let err = PuzzleState::new(vec![0, 1, 2, 9], 2).unwrap_err();
        assert!(matches!(err, PuzzleError::InvalidConfiguration(_)));
    }

    #[test]
    fn rejects_widths_whose_square_overflows() {
        for n in [usize::MAX, 1usize << 32, (1usize << 32) + 1] {
            for config in [vec![], vec![0, 1, 2, 3]] {
                let err = PuzzleState::new(config, n).unwrap_err();
                assert!(matches!(err, PuzzleError::InvalidConfiguration(_)), "n = {n}");
            }
        }
    }

    #[test]
    fn rejects_empty_board() {
        assert!(PuzzleState::new(vec![], 0).is_err());
        assert!(PuzzleState::from_config(vec![]).is_err());
    }

    #[test]
    #[should_panic]
    fn goal_needs_width_of_two() {
        let _ = PuzzleState::goal(1);
    }

    #[test]
    fn rejects_wrong_length_and_tiny_boards() {
        assert!(PuzzleState::new(vec![0, 1, 2], 2).is_err());
        assert!(PuzzleState::new(vec![0], 1).is_err());
        assert!(PuzzleState::from_config(vec![0, 1, 2]).is_err());
    }

    #[test]
    fn root_has_initial_action_and_cached_blank() {
        let state = board(&[1, 2, 0, 3, 4, 5, 6, 7, 8]);
        assert_eq!(state.n(), 3);
        assert_eq!(state.cost(), 0);
        assert_eq!(state.action(), None);
        assert_eq!(action_name(state.action()), "Initial");
        assert_eq!(state.blank_index(), 2);
        assert!(state.parent().is_none());
    }

    #[test]
    fn boundary_rules_follow_blank_position() {
        // Blank in the top-right corner.
        let state = board(&[1, 2, 0, 3, 4, 5, 6, 7, 8]);
        assert!(!state.can_move(Move::Up));
        assert!(state.can_move(Move::Down));
        assert!(state.can_move(Move::Left));
        assert!(!state.can_move(Move::Right));

        // Blank in the bottom-left corner.
        let state = board(&[1, 2, 3, 4, 5, 6, 0, 7, 8]);
        assert!(state.can_move(Move::Up));
        assert!(!state.can_move(Move::Down));
        assert!(!state.can_move(Move::Left));
        assert!(state.can_move(Move::Right));
    }

    #[test]
    fn try_move_swaps_blank_with_neighbour() {
        let state = board(&[1, 2, 0, 3, 4, 5, 6, 7, 8]);
        let left = state.try_move(Move::Left).unwrap();
        assert_eq!(left.config(), &[1, 0, 2, 3, 4, 5, 6, 7, 8]);
        assert_eq!(left.cost(), 1);
        assert_eq!(left.action(), Some(Move::Left));
        assert_eq!(left.blank_index(), 1);

        let down = state.try_move(Move::Down).unwrap();
        assert_eq!(down.config(), &[1, 2, 5, 3, 4, 0, 6, 7, 8]);
        assert!(state.try_move(Move::Up).is_none());
    }

    #[test]
    fn apply_move_then_opposite_restores_board() {
        let mut state = board(&[3, 1, 2, 0, 4, 5, 6, 7, 8]);
        let before = state.clone();
        assert!(state.apply_move(Move::Right));
        assert!(state.apply_move(Move::Right.opposite()));
        assert_eq!(state, before);
        assert_eq!(state.cost(), 2);
        assert!(!state.apply_move(Move::Left));
    }

    #[test]
    fn goal_detection() {
        assert!(PuzzleState::goal(3).is_goal());
        assert!(PuzzleState::goal(4).is_goal());
        assert!(!board(&[1, 0, 2, 3]).is_goal());
    }

    #[test]
    fn parses_comma_separated_board() {
        let state: PuzzleState = "1, 2,5,3,4,0,6,7,8".parse().unwrap();
        assert_eq!(state.config(), &[1, 2, 5, 3, 4, 0, 6, 7, 8]);
        assert!(matches!(
            "1,2,x,3".parse::<PuzzleState>(),
            Err(PuzzleError::Parse(_))
        ));
    }

    #[test]
    fn solvability_parity() {
        assert!(PuzzleState::goal(3).is_solvable());
        assert!(board(&[1, 2, 0, 3, 4, 5, 6, 7, 8]).is_solvable());
        assert!(board(&[8, 7, 6, 5, 4, 3, 2, 1, 0]).is_solvable());
        assert!(!board(&[0, 2, 1, 3, 4, 5, 6, 7, 8]).is_solvable());
        assert!(!board(&[0, 2, 1, 3]).is_solvable());
    }

    #[test]
    fn scrambled_boards_are_valid_and_solvable() {
        let mut rng = StdRng::seed_from_u64(7);
        for n in 2..=4 {
            let state = PuzzleState::scrambled(n, &mut rng);
            assert!(state.is_solvable());
            assert!(PuzzleState::new(state.config().to_vec(), n).is_ok());
            assert_eq!(state.config()[state.blank_index()], 0);
        }
    }

    #[test]
    fn display_renders_rows() {
        let text = PuzzleState::goal(2).to_string();
        assert_eq!(text, " 0  1 \n 2  3 \n");
    }
}
