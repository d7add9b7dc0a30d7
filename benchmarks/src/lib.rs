//! Shared workloads for pathwise benchmark suites.
//!
//! Each [`Regime`] stresses one part of the engine: the expansion ceiling,
//! lazy deletion of duplicate frontier entries, a large frontier, or a full
//! exhaustive sweep.

use pathwise_harness::report::RunReport;
use pathwise_harness::runner::{run_search, RunError};
use pathwise_harness::worlds::eight_puzzle::{Board, EightPuzzle, PuzzleHeuristic};
use pathwise_harness::worlds::peg_solitaire::{PegHeuristic, PegSolitaire};
use pathwise_harness::worlds::rabbit_leap::RabbitLeap;
use pathwise_harness::worlds::weighted_graph::WeightedGraph;
use pathwise_search::error::SearchError;
use pathwise_search::policy::SearchPolicy;
use pathwise_search::search::search;
use pathwise_search::stats::SearchStatistics;
use pathwise_search::strategy::SearchStrategy;

/// The problem a regime runs.
#[derive(Debug, Clone)]
pub enum Workload {
    Puzzle(EightPuzzle),
    Pegs(PegSolitaire),
    Rabbits(RabbitLeap),
    Graph(WeightedGraph),
}

/// A named workload plus the policy it runs under.
#[derive(Debug, Clone)]
pub struct Regime {
    pub name: &'static str,
    pub workload: Workload,
    pub policy: SearchPolicy,
}

impl Regime {
    /// Run `search()` only, with graph recording as configured.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError`] if the policy is invalid.
    pub fn search_only(&self) -> Result<SearchStatistics, SearchError> {
        let stats = match &self.workload {
            Workload::Puzzle(p) => *search(p, &self.policy)?.outcome.stats(),
            Workload::Pegs(p) => *search(p, &self.policy)?.outcome.stats(),
            Workload::Rabbits(p) => *search(p, &self.policy)?.outcome.stats(),
            Workload::Graph(p) => *search(p, &self.policy)?.outcome.stats(),
        };
        Ok(stats)
    }

    /// Run the full harness pipeline: search, render, hash, assemble.
    ///
    /// # Errors
    ///
    /// Returns [`RunError`] from [`run_search`].
    pub fn report(&self) -> Result<RunReport, RunError> {
        match &self.workload {
            Workload::Puzzle(p) => run_search(p, &self.policy),
            Workload::Pegs(p) => run_search(p, &self.policy),
            Workload::Rabbits(p) => run_search(p, &self.policy),
            Workload::Graph(p) => run_search(p, &self.policy),
        }
    }
}

/// Deep scramble under uniform cost, cut off by the expansion ceiling.
#[must_use]
pub fn regime_budget_limited() -> Regime {
    Regime {
        name: "budget_limited",
        workload: Workload::Puzzle(EightPuzzle::scrambled(
            Board::SPIRAL,
            30,
            1,
            PuzzleHeuristic::Zero,
        )),
        policy: SearchPolicy::with_strategy(SearchStrategy::UniformCost).with_max_expansions(2_000),
    }
}

/// Dense grid graph with many equal-cost routes: lots of stale pops.
#[must_use]
pub fn regime_duplicates() -> Regime {
    const SIDE: usize = 24;
    let mut graph = WeightedGraph::new("grid", "0_0");
    for r in 0..SIDE {
        for c in 0..SIDE {
            let here = format!("{r}_{c}");
            if r + 1 < SIDE {
                let _ = graph.add_undirected_edge(&here, &format!("{}_{c}", r + 1), 1);
            }
            if c + 1 < SIDE {
                let _ = graph.add_undirected_edge(&here, &format!("{r}_{}", c + 1), 1);
            }
        }
    }
    graph.add_goal(&format!("{}_{}", SIDE - 1, SIDE - 1));
    Regime {
        name: "duplicates",
        workload: Workload::Graph(graph),
        policy: SearchPolicy::with_strategy(SearchStrategy::UniformCost),
    }
}

/// Five rabbits a side, no dead-end pruning, breadth-first: nearly every
/// reachable lane is expanded before the goal.
#[must_use]
pub fn regime_exhaustive() -> Regime {
    Regime {
        name: "exhaustive",
        workload: Workload::Rabbits(RabbitLeap::new(5).without_pruning()),
        policy: SearchPolicy::with_strategy(SearchStrategy::BreadthFirst),
    }
}

/// Greedy peg solitaire on the full English board: wide frontier.
#[must_use]
pub fn regime_frontier_pressure() -> Regime {
    Regime {
        name: "frontier_pressure",
        workload: Workload::Pegs(PegSolitaire::english(PegHeuristic::CenterDistance)),
        policy: SearchPolicy::with_strategy(SearchStrategy::GreedyBestFirst)
            .with_max_expansions(5_000),
    }
}

/// Every regime, in a fixed order.
#[must_use]
pub fn all_regimes() -> Vec<Regime> {
    vec![
        regime_budget_limited(),
        regime_duplicates(),
        regime_exhaustive(),
        regime_frontier_pressure(),
    ]
}
