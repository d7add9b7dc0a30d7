//! `RabbitLeap`: swap two lines of rabbits across a single gap.
//!
//! `n` east-facing rabbits sit left of one empty stone and `n` west-facing
//! rabbits sit right of it. A rabbit only moves forward, either onto the
//! adjacent stone if it is empty or by jumping exactly one rabbit into the
//! empty stone. The goal is the mirrored arrangement. Every move costs 1.

use pathwise_kernel::key::{CanonicalKey, CanonicalState};
use pathwise_search::contract::{SearchProblem, Successor};

use crate::contract::DescribeState;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Stone {
    /// Rabbit that moves toward higher indices.
    East,
    /// Rabbit that moves toward lower indices.
    West,
    Empty,
}

impl Stone {
    fn as_char(self) -> char {
        match self {
            Self::East => '>',
            Self::West => '<',
            Self::Empty => '_',
        }
    }
}

/// A row of stones, left to right.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Lane(pub Vec<Stone>);

impl Lane {
    fn gap(&self) -> Option<usize> {
        self.0.iter().position(|s| *s == Stone::Empty)
    }
}

impl CanonicalState for Lane {
    fn canonical_key(&self) -> CanonicalKey {
        CanonicalKey::from_ints(self.0.iter().map(|s| match s {
            Stone::East => 1,
            Stone::West => -1,
            Stone::Empty => 0,
        }))
    }
}

#[derive(Debug, Clone)]
pub struct RabbitLeap {
    per_side: usize,
    prune_dead_ends: bool,
}

impl RabbitLeap {
    /// `per_side` rabbits in each direction. Dead-end pruning is on.
    #[must_use]
    pub fn new(per_side: usize) -> Self {
        Self {
            per_side,
            prune_dead_ends: true,
        }
    }

    /// Keep successors from which no rabbit can move.
    #[must_use]
    pub fn without_pruning(mut self) -> Self {
        self.prune_dead_ends = false;
        self
    }

    #[must_use]
    pub fn goal_lane(&self) -> Lane {
        self.lane(Stone::West, Stone::East)
    }

    fn lane(&self, left: Stone, right: Stone) -> Lane {
        let mut stones = vec![left; self.per_side];
        stones.push(Stone::Empty);
        stones.extend(vec![right; self.per_side]);
        Lane(stones)
    }

    /// Every lane reachable in one move, ordered by source stone from the
    /// gap: two left, one left, one right, two right.
    fn moves(lane: &Lane) -> Vec<Lane> {
        let Some(gap) = lane.gap() else {
            return Vec::new();
        };
        let mut next = Vec::new();
        for offset in [-2_isize, -1, 1, 2] {
            let Some(from) = gap.checked_add_signed(offset) else {
                continue;
            };
            let Some(&stone) = lane.0.get(from) else {
                continue;
            };
            let forward = match stone {
                Stone::East => offset < 0,
                Stone::West => offset > 0,
                Stone::Empty => false,
            };
            if !forward {
                continue;
            }
            let mut stones = lane.0.clone();
            stones.swap(from, gap);
            next.push(Lane(stones));
        }
        next
    }

    /// Total forward distance still to travel, halved and rounded up (a move
    /// covers at most two stones).
    fn remaining_distance(&self, lane: &Lane) -> i64 {
        let n = self.per_side;
        let mut distance = 0_usize;
        let mut east_rank = 0_usize;
        let mut west_rank = 0_usize;
        for (pos, stone) in lane.0.iter().enumerate() {
            match stone {
                Stone::East => {
                    distance += (n + 1 + east_rank).saturating_sub(pos);
                    east_rank += 1;
                }
                Stone::West => {
                    distance += pos.saturating_sub(west_rank);
                    west_rank += 1;
                }
                Stone::Empty => {}
            }
        }
        i64::try_from(distance.div_ceil(2)).unwrap_or(i64::MAX)
    }
}

impl SearchProblem for RabbitLeap {
    type State = Lane;

    #[allow(clippy::unnecessary_literal_bound)]
    fn problem_id(&self) -> &str {
        "rabbit_leap"
    }

    fn start_state(&self) -> Lane {
        self.lane(Stone::East, Stone::West)
    }

    fn is_goal(&self, state: &Lane) -> bool {
        *state == self.goal_lane()
    }

    fn successors(&self, state: &Lane) -> Vec<Successor<Lane>> {
        Self::moves(state)
            .into_iter()
            .filter(|next| {
                !self.prune_dead_ends || self.is_goal(next) || !Self::moves(next).is_empty()
            })
            .map(Successor::unit)
            .collect()
    }

    fn heuristic(&self, state: &Lane) -> i64 {
        self.remaining_distance(state)
    }
}

impl DescribeState for RabbitLeap {
    fn describe_state(&self, state: &Lane) -> String {
        state.0.iter().map(|s| s.as_char()).collect()
    }
}
