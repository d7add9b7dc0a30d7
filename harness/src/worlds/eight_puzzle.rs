//! `EightPuzzle`: the 3×3 sliding-tile puzzle.
//!
//! Tiles `1..=8` and one blank (stored as 0). A move slides a tile into the
//! blank; each move costs 1. Starts are produced by walking randomly away
//! from the goal, so every generated instance is solvable.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use pathwise_kernel::key::{CanonicalKey, CanonicalState};
use pathwise_search::contract::{SearchProblem, Successor};

use crate::contract::DescribeState;

const SIDE: usize = 3;
const CELLS: usize = SIDE * SIDE;

/// Blank moves in successor order: up, down, left, right.
const MOVES: [(isize, isize); 4] = [(-1, 0), (1, 0), (0, -1), (0, 1)];

/// Error parsing a [`Board`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BoardError {
    WrongLength { found: usize },
    InvalidCell { found: char },
    /// Every tile `0..=8` must appear exactly once.
    NotAPermutation,
}

impl std::fmt::Display for BoardError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::WrongLength { found } => write!(f, "expected 9 cells, found {found}"),
            Self::InvalidCell { found } => write!(f, "invalid cell {found:?}"),
            Self::NotAPermutation => write!(f, "tiles must be a permutation of 0..=8"),
        }
    }
}

impl std::error::Error for BoardError {}

/// Row-major tile layout; 0 is the blank.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Board(pub [u8; CELLS]);

impl Board {
    /// The layout used by the lab experiments:
    ///
    /// ```text
    /// 1 2 3
    /// 8 _ 4
    /// 7 6 5
    /// ```
    pub const SPIRAL: Board = Board([1, 2, 3, 8, 0, 4, 7, 6, 5]);

    /// Parse nine cells in row-major order. `_` or `0` is the blank;
    /// whitespace and `/` are ignored.
    ///
    /// # Errors
    ///
    /// Returns [`BoardError`] for the wrong cell count, a non-digit cell or a
    /// repeated tile.
    pub fn parse(text: &str) -> Result<Self, BoardError> {
        let mut cells = Vec::with_capacity(CELLS);
        for ch in text.chars().filter(|c| !c.is_whitespace() && *c != '/') {
            let tile = match ch {
                '_' => 0,
                _ => ch
                    .to_digit(9)
                    .and_then(|d| u8::try_from(d).ok())
                    .ok_or(BoardError::InvalidCell { found: ch })?,
            };
            cells.push(tile);
        }
        let tiles: [u8; CELLS] = cells
            .as_slice()
            .try_into()
            .map_err(|_| BoardError::WrongLength { found: cells.len() })?;
        let mut seen = [false; CELLS];
        for &t in &tiles {
            let slot = &mut seen[usize::from(t)];
            if *slot {
                return Err(BoardError::NotAPermutation);
            }
            *slot = true;
        }
        Ok(Self(tiles))
    }

    fn blank(&self) -> usize {
        self.0.iter().position(|&t| t == 0).unwrap_or(0)
    }

    /// Boards one slide away, in [`MOVES`] order.
    #[must_use]
    pub fn neighbors(&self) -> Vec<Board> {
        let blank = self.blank();
        let (row, col) = (blank / SIDE, blank % SIDE);
        MOVES
            .iter()
            .filter_map(|&(dr, dc)| {
                let r = row.checked_add_signed(dr).filter(|&r| r < SIDE)?;
                let c = col.checked_add_signed(dc).filter(|&c| c < SIDE)?;
                let mut next = *self;
                next.0.swap(blank, r * SIDE + c);
                Some(next)
            })
            .collect()
    }

    /// Random walk of `depth` slides from `self`. The walk may backtrack, so
    /// the optimal distance back is at most `depth`.
    #[must_use]
    pub fn scrambled(&self, depth: u32, seed: u64) -> Board {
        let mut rng = StdRng::seed_from_u64(seed);
        let mut board = *self;
        for _ in 0..depth {
            let options = board.neighbors();
            board = options[rng.random_range(0..options.len())];
        }
        board
    }
}

impl CanonicalState for Board {
    fn canonical_key(&self) -> CanonicalKey {
        CanonicalKey::builder()
            .grid(self.0.chunks(SIDE).map(|row| row.iter().map(|&t| i64::from(t))))
            .build()
    }
}

/// Heuristic choice for [`EightPuzzle`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PuzzleHeuristic {
    /// Constant zero (uniform-cost behaviour).
    Zero,
    /// Tiles not on their goal cell; the blank is not counted.
    Misplaced,
    /// Sum of tile Manhattan distances to their goal cells.
    #[default]
    Manhattan,
}

impl PuzzleHeuristic {
    pub const ALL: [PuzzleHeuristic; 3] = [Self::Zero, Self::Misplaced, Self::Manhattan];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Zero => "zero",
            Self::Misplaced => "misplaced",
            Self::Manhattan => "manhattan",
        }
    }

    #[must_use]
    pub fn parse(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|h| h.as_str() == name)
    }
}

impl std::fmt::Display for PuzzleHeuristic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone)]
pub struct EightPuzzle {
    start: Board,
    goal: Board,
    heuristic: PuzzleHeuristic,
    /// Goal cell per tile value.
    goal_cell: [usize; CELLS],
}

impl EightPuzzle {
    #[must_use]
    pub fn new(start: Board, goal: Board, heuristic: PuzzleHeuristic) -> Self {
        let mut goal_cell = [0; CELLS];
        for (cell, &tile) in goal.0.iter().enumerate() {
            if let Some(slot) = goal_cell.get_mut(usize::from(tile)) {
                *slot = cell;
            }
        }
        Self {
            start,
            goal,
            heuristic,
            goal_cell,
        }
    }

    /// A start `depth` random slides away from `goal`.
    #[must_use]
    pub fn scrambled(goal: Board, depth: u32, seed: u64, heuristic: PuzzleHeuristic) -> Self {
        Self::new(goal.scrambled(depth, seed), goal, heuristic)
    }

    /// The same instance under a different heuristic.
    #[must_use]
    pub fn with_heuristic(&self, heuristic: PuzzleHeuristic) -> Self {
        Self::new(self.start, self.goal, heuristic)
    }

    #[must_use]
    pub fn start(&self) -> Board {
        self.start
    }

    #[must_use]
    pub fn goal(&self) -> Board {
        self.goal
    }

    #[must_use]
    pub fn heuristic_kind(&self) -> PuzzleHeuristic {
        self.heuristic
    }

    fn misplaced(&self, board: &Board) -> i64 {
        let count = board
            .0
            .iter()
            .zip(self.goal.0.iter())
            .filter(|&(&tile, &want)| tile != 0 && tile != want)
            .count();
        i64::try_from(count).unwrap_or(i64::MAX)
    }

    fn manhattan(&self, board: &Board) -> i64 {
        let mut total = 0;
        for (cell, &tile) in board.0.iter().enumerate() {
            if tile == 0 {
                continue;
            }
            let Some(&target) = self.goal_cell.get(usize::from(tile)) else {
                continue;
            };
            total += (cell / SIDE).abs_diff(target / SIDE) + (cell % SIDE).abs_diff(target % SIDE);
        }
        i64::try_from(total).unwrap_or(i64::MAX)
    }
}

impl SearchProblem for EightPuzzle {
    type State = Board;

    #[allow(clippy::unnecessary_literal_bound)]
    fn problem_id(&self) -> &str {
        "eight_puzzle"
    }

    fn start_state(&self) -> Board {
        self.start
    }

    fn is_goal(&self, state: &Board) -> bool {
        *state == self.goal
    }

    fn successors(&self, state: &Board) -> Vec<Successor<Board>> {
        state.neighbors().into_iter().map(Successor::unit).collect()
    }

    fn heuristic(&self, state: &Board) -> i64 {
        match self.heuristic {
            PuzzleHeuristic::Zero => 0,
            PuzzleHeuristic::Misplaced => self.misplaced(state),
            PuzzleHeuristic::Manhattan => self.manhattan(state),
        }
    }
}

impl DescribeState for EightPuzzle {
    fn describe_state(&self, state: &Board) -> String {
        state
            .0
            .chunks(SIDE)
            .map(|row| {
                row.iter()
                    .map(|&t| if t == 0 { '_' } else { char::from(b'0' + t) })
                    .collect::<String>()
            })
            .collect::<Vec<_>>()
            .join("/")
    }
}
