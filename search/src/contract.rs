//! Problem adapter contract.

use pathwise_kernel::key::CanonicalState;

/// One outgoing transition produced by [`SearchProblem::successors`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Successor<S> {
    /// The state reached by the transition.
    pub state: S,
    /// Non-negative transition cost.
    pub cost: i64,
}

impl<S> Successor<S> {
    #[must_use]
    pub fn new(state: S, cost: i64) -> Self {
        Self { state, cost }
    }

    /// A transition with cost 1.
    #[must_use]
    pub fn unit(state: S) -> Self {
        Self { state, cost: 1 }
    }
}

/// Trait for problems the engine can search.
///
/// # Contract
///
/// - Every method must be deterministic and free of side effects: the same
///   state always yields the same goal verdict, the same successors in the
///   same order, and the same heuristic value.
/// - Transition costs must be non-negative.
/// - `heuristic` should be non-negative. An inconsistent or overestimating
///   heuristic does not break the engine; it only loses the optimality
///   guarantee (the closed set keeps the first-closed cost).
/// - Identity comes from [`CanonicalState::canonical_key`]; two states with
///   the same key are the same state as far as the closed set is concerned.
pub trait SearchProblem {
    type State: CanonicalState + Clone;

    /// Stable identifier recorded in audit metadata.
    fn problem_id(&self) -> &str;

    fn start_state(&self) -> Self::State;

    fn is_goal(&self, state: &Self::State) -> bool;

    /// Enumerate `(next_state, cost)` transitions from `state`.
    fn successors(&self, state: &Self::State) -> Vec<Successor<Self::State>>;

    /// Estimated remaining cost to a goal. Constant zero reduces A* to
    /// uniform-cost search.
    fn heuristic(&self, state: &Self::State) -> i64;
}

impl<P: SearchProblem + ?Sized> SearchProblem for &P {
    type State = P::State;

    fn problem_id(&self) -> &str {
        (**self).problem_id()
    }

    fn start_state(&self) -> Self::State {
        (**self).start_state()
    }

    fn is_goal(&self, state: &Self::State) -> bool {
        (**self).is_goal(state)
    }

    fn successors(&self, state: &Self::State) -> Vec<Successor<Self::State>> {
        (**self).successors(state)
    }

    fn heuristic(&self, state: &Self::State) -> i64 {
        (**self).heuristic(state)
    }
}
