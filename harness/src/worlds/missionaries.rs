//! `Missionaries`: the missionaries-and-cannibals river crossing.
//!
//! `n` missionaries and `n` cannibals start on the left bank with a boat that
//! carries one to `capacity` people. Cannibals may never outnumber
//! missionaries on a bank that has any missionaries. Every crossing costs 1.

use pathwise_kernel::key::{CanonicalKey, CanonicalState};
use pathwise_search::contract::{SearchProblem, Successor};

use crate::contract::DescribeState;

/// People on the left bank plus the boat's side. The right bank is implied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RiverState {
    pub missionaries_left: u32,
    pub cannibals_left: u32,
    pub boat_left: bool,
}

impl CanonicalState for RiverState {
    fn canonical_key(&self) -> CanonicalKey {
        CanonicalKey::from_ints([
            i64::from(self.missionaries_left),
            i64::from(self.cannibals_left),
            i64::from(self.boat_left),
        ])
    }
}

#[derive(Debug, Clone)]
pub struct Missionaries {
    people: u32,
    /// `(missionaries, cannibals)` per crossing, in successor order.
    loads: Vec<(u32, u32)>,
}

impl Missionaries {
    /// `people` of each kind, a boat carrying up to `capacity`.
    #[must_use]
    pub fn new(people: u32, capacity: u32) -> Self {
        let mut loads = Vec::new();
        for m in (1..=capacity).rev() {
            loads.push((m, 0));
        }
        for c in (1..=capacity).rev() {
            loads.push((0, c));
        }
        for m in 1..capacity {
            for c in 1..=capacity - m {
                loads.push((m, c));
            }
        }
        Self { people, loads }
    }

    /// Three of each, boat of two.
    #[must_use]
    pub fn classic() -> Self {
        Self::new(3, 2)
    }

    #[must_use]
    pub fn loads(&self) -> &[(u32, u32)] {
        &self.loads
    }

    /// Whether neither bank has missionaries outnumbered.
    #[must_use]
    pub fn is_safe(&self, state: &RiverState) -> bool {
        let m_left = state.missionaries_left;
        let c_left = state.cannibals_left;
        if m_left > self.people || c_left > self.people {
            return false;
        }
        let m_right = self.people - m_left;
        let c_right = self.people - c_left;
        (m_left == 0 || m_left >= c_left) && (m_right == 0 || m_right >= c_right)
    }
}

impl SearchProblem for Missionaries {
    type State = RiverState;

    #[allow(clippy::unnecessary_literal_bound)]
    fn problem_id(&self) -> &str {
        "missionaries"
    }

    fn start_state(&self) -> RiverState {
        RiverState {
            missionaries_left: self.people,
            cannibals_left: self.people,
            boat_left: true,
        }
    }

    fn is_goal(&self, state: &RiverState) -> bool {
        state.missionaries_left == 0 && state.cannibals_left == 0 && !state.boat_left
    }

    fn successors(&self, state: &RiverState) -> Vec<Successor<RiverState>> {
        self.loads
            .iter()
            .filter_map(|&(m, c)| {
                let next = if state.boat_left {
                    RiverState {
                        missionaries_left: state.missionaries_left.checked_sub(m)?,
                        cannibals_left: state.cannibals_left.checked_sub(c)?,
                        boat_left: false,
                    }
                } else {
                    RiverState {
                        missionaries_left: state.missionaries_left + m,
                        cannibals_left: state.cannibals_left + c,
                        boat_left: true,
                    }
                };
                self.is_safe(&next).then(|| Successor::unit(next))
            })
            .collect()
    }

    /// `ceil(left / capacity)`: every crossing moves at most `capacity`
    /// people, so this never overestimates and drops by at most one per step.
    fn heuristic(&self, state: &RiverState) -> i64 {
        let left = i64::from(state.missionaries_left + state.cannibals_left);
        let capacity = self
            .loads
            .iter()
            .map(|&(m, c)| i64::from(m + c))
            .max()
            .unwrap_or(1);
        (left + capacity - 1) / capacity
    }
}

impl DescribeState for Missionaries {
    fn describe_state(&self, state: &RiverState) -> String {
        let side = if state.boat_left { "L" } else { "R" };
        format!(
            "M{}C{}|{}|M{}C{}",
            state.missionaries_left,
            state.cannibals_left,
            side,
            self.people - state.missionaries_left.min(self.people),
            self.people - state.cannibals_left.min(self.people),
        )
    }
}
