//! `PegSolitaire`: peg solitaire on a 7×7 grid.
//!
//! A peg jumps an orthogonally adjacent peg into an empty hole directly
//! beyond it, and the jumped peg is removed. The goal is a single peg left in
//! the center hole. Each jump costs 1.
//!
//! Boards are written as seven rows of seven cells: `O` is a peg, `0` or `.`
//! an empty hole, `-` a cell that is not part of the board.

use pathwise_kernel::key::{CanonicalKey, CanonicalState};
use pathwise_search::contract::{SearchProblem, Successor};

use crate::contract::DescribeState;

pub const SIZE: usize = 7;
const CENTER: usize = (SIZE / 2) * SIZE + SIZE / 2;

/// Jump directions in successor order: up, down, left, right.
const DIRECTIONS: [(isize, isize); 4] = [(-1, 0), (1, 0), (0, -1), (0, 1)];

/// The English cross board with every hole but the center filled.
pub const ENGLISH: [&str; SIZE] = [
    "--OOO--",
    "--OOO--",
    "OOOOOOO",
    "OOO0OOO",
    "OOOOOOO",
    "--OOO--",
    "--OOO--",
];

/// Error parsing a board.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PegBoardError {
    WrongRowCount { found: usize },
    WrongRowLength { row: usize, found: usize },
    InvalidCell { row: usize, found: char },
}

impl std::fmt::Display for PegBoardError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::WrongRowCount { found } => write!(f, "expected {SIZE} rows, found {found}"),
            Self::WrongRowLength { row, found } => {
                write!(f, "row {row}: expected {SIZE} cells, found {found}")
            }
            Self::InvalidCell { row, found } => write!(f, "row {row}: invalid cell {found:?}"),
        }
    }
}

impl std::error::Error for PegBoardError {}

/// Occupied holes as a bitmask, bit `row * 7 + col`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PegBoard(pub u64);

impl PegBoard {
    #[must_use]
    pub fn peg_count(self) -> u32 {
        self.0.count_ones()
    }

    #[must_use]
    pub fn has_peg(self, cell: usize) -> bool {
        self.0 & bit(cell) != 0
    }
}

impl CanonicalState for PegBoard {
    fn canonical_key(&self) -> CanonicalKey {
        // 49 bits, so the mask always fits in an i64.
        CanonicalKey::from_ints([i64::try_from(self.0).unwrap_or(i64::MAX)])
    }
}

/// Heuristic choice for [`PegSolitaire`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PegHeuristic {
    /// Pegs left minus one: exact jump count still needed, if solvable.
    /// Every jump removes one peg, so `g + h` is constant and A* degrades
    /// into a breadth-first sweep.
    PegCount,
    /// Sum of Manhattan distances from every peg to the center. Not
    /// admissible; pairs well with greedy best-first.
    #[default]
    CenterDistance,
}

impl PegHeuristic {
    pub const ALL: [PegHeuristic; 2] = [Self::PegCount, Self::CenterDistance];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::PegCount => "peg_count",
            Self::CenterDistance => "center_distance",
        }
    }

    #[must_use]
    pub fn parse(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|h| h.as_str() == name)
    }
}

#[derive(Debug, Clone)]
pub struct PegSolitaire {
    /// Cells that belong to the board.
    layout: u64,
    start: PegBoard,
    heuristic: PegHeuristic,
}

impl PegSolitaire {
    /// Parse a 7×7 start position.
    ///
    /// # Errors
    ///
    /// Returns [`PegBoardError`] when the rows do not form a 7×7 grid of
    /// known cell characters.
    pub fn parse<S: AsRef<str>>(rows: &[S], heuristic: PegHeuristic) -> Result<Self, PegBoardError> {
        if rows.len() != SIZE {
            return Err(PegBoardError::WrongRowCount { found: rows.len() });
        }
        let mut layout = 0;
        let mut pegs = 0;
        for (r, row) in rows.iter().enumerate() {
            let cells: Vec<char> = row.as_ref().chars().collect();
            if cells.len() != SIZE {
                return Err(PegBoardError::WrongRowLength {
                    row: r,
                    found: cells.len(),
                });
            }
            for (c, ch) in cells.into_iter().enumerate() {
                let cell = r * SIZE + c;
                match ch {
                    'O' => {
                        layout |= bit(cell);
                        pegs |= bit(cell);
                    }
                    '0' | '.' => layout |= bit(cell),
                    '-' => {}
                    _ => return Err(PegBoardError::InvalidCell { row: r, found: ch }),
                }
            }
        }
        Ok(Self {
            layout,
            start: PegBoard(pegs),
            heuristic,
        })
    }

    /// The standard English board with the center empty.
    #[must_use]
    pub fn english(heuristic: PegHeuristic) -> Self {
        let mut layout = 0;
        let mut pegs = 0;
        for (r, row) in ENGLISH.iter().enumerate() {
            for (c, ch) in row.chars().enumerate() {
                let cell = r * SIZE + c;
                if ch != '-' {
                    layout |= bit(cell);
                }
                if ch == 'O' {
                    pegs |= bit(cell);
                }
            }
        }
        Self {
            layout,
            start: PegBoard(pegs),
            heuristic,
        }
    }

    fn on_board(&self, row: isize, col: isize) -> Option<usize> {
        let r = usize::try_from(row).ok().filter(|&r| r < SIZE)?;
        let c = usize::try_from(col).ok().filter(|&c| c < SIZE)?;
        let cell = r * SIZE + c;
        (self.layout & bit(cell) != 0).then_some(cell)
    }

    /// Every board one jump away, scanning pegs in row-major order.
    #[must_use]
    pub fn jumps(&self, board: PegBoard) -> Vec<PegBoard> {
        let mut next = Vec::new();
        for from in 0..SIZE * SIZE {
            if !board.has_peg(from) {
                continue;
            }
            let (row, col) = (signed(from / SIZE), signed(from % SIZE));
            for (dr, dc) in DIRECTIONS {
                let Some(over) = self.on_board(row + dr, col + dc) else {
                    continue;
                };
                let Some(to) = self.on_board(row + 2 * dr, col + 2 * dc) else {
                    continue;
                };
                if board.has_peg(over) && !board.has_peg(to) {
                    next.push(PegBoard(board.0 ^ bit(from) ^ bit(over) ^ bit(to)));
                }
            }
        }
        next
    }

    fn center_distance(board: PegBoard) -> i64 {
        let center = (CENTER / SIZE, CENTER % SIZE);
        let total: usize = (0..SIZE * SIZE)
            .filter(|&cell| board.has_peg(cell))
            .map(|cell| (cell / SIZE).abs_diff(center.0) + (cell % SIZE).abs_diff(center.1))
            .sum();
        i64::try_from(total).unwrap_or(i64::MAX)
    }
}

impl SearchProblem for PegSolitaire {
    type State = PegBoard;

    #[allow(clippy::unnecessary_literal_bound)]
    fn problem_id(&self) -> &str {
        "peg_solitaire"
    }

    fn start_state(&self) -> PegBoard {
        self.start
    }

    fn is_goal(&self, state: &PegBoard) -> bool {
        state.peg_count() == 1 && state.has_peg(CENTER)
    }

    fn successors(&self, state: &PegBoard) -> Vec<Successor<PegBoard>> {
        self.jumps(*state).into_iter().map(Successor::unit).collect()
    }

    fn heuristic(&self, state: &PegBoard) -> i64 {
        match self.heuristic {
            PegHeuristic::PegCount => i64::from(state.peg_count().saturating_sub(1)),
            PegHeuristic::CenterDistance => Self::center_distance(*state),
        }
    }
}

impl DescribeState for PegSolitaire {
    fn describe_state(&self, state: &PegBoard) -> String {
        (0..SIZE)
            .map(|r| {
                (0..SIZE)
                    .map(|c| {
                        let cell = r * SIZE + c;
                        if self.layout & bit(cell) == 0 {
                            '-'
                        } else if state.has_peg(cell) {
                            'O'
                        } else {
                            '.'
                        }
                    })
                    .collect::<String>()
            })
            .collect::<Vec<_>>()
            .join("/")
    }
}

fn bit(cell: usize) -> u64 {
    1 << cell
}

fn signed(v: usize) -> isize {
    isize::try_from(v).unwrap_or(isize::MAX)
}
