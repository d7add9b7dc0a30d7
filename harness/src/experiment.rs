//! Heuristic comparison on scrambled 8-puzzles.
//!
//! For every scramble depth, `runs` instances are generated from seeds that
//! depend only on the experiment seed, the depth and the run index, so every
//! heuristic is measured on exactly the same boards. Only engine counters
//! are reported; there is no wall-clock column, so output is reproducible.

use std::fmt::Write as _;

use pathwise_search::error::SearchError;
use pathwise_search::policy::SearchPolicy;
use pathwise_search::search::{search, Outcome};
use pathwise_search::strategy::SearchStrategy;

use crate::worlds::eight_puzzle::{Board, EightPuzzle, PuzzleHeuristic};

/// Parameters for [`compare_heuristics`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExperimentConfig {
    pub goal: Board,
    pub depths: Vec<u32>,
    /// Instances per depth.
    pub runs: u32,
    pub seed: u64,
    pub heuristics: Vec<PuzzleHeuristic>,
    pub strategy: SearchStrategy,
    pub max_expansions: Option<u64>,
}

impl Default for ExperimentConfig {
    fn default() -> Self {
        Self {
            goal: Board::SPIRAL,
            depths: vec![2, 5, 8, 10, 12, 15, 18, 20],
            runs: 10,
            seed: 0,
            heuristics: PuzzleHeuristic::ALL.to_vec(),
            strategy: SearchStrategy::AStar,
            max_expansions: None,
        }
    }
}

/// Aggregates for one `(depth, heuristic)` cell.
#[derive(Debug, Clone, PartialEq)]
pub struct ExperimentRow {
    pub depth: u32,
    pub heuristic: PuzzleHeuristic,
    pub runs: u32,
    pub solved: u32,
    /// Runs stopped by the expansion ceiling.
    pub limit_hits: u32,
    pub mean_nodes_expanded: f64,
    pub mean_max_frontier: f64,
    /// Mean solution length over solved runs; `None` when nothing solved.
    pub mean_solution_depth: Option<f64>,
}

/// Seed for instance `run` at scramble `depth`.
#[must_use]
pub fn instance_seed(seed: u64, depth: u32, run: u32) -> u64 {
    seed ^ (u64::from(depth) << 32) ^ u64::from(run)
}

/// Run every heuristic on every instance and aggregate per depth.
///
/// Rows come out depth-major, heuristics in `config.heuristics` order.
///
/// # Errors
///
/// Returns [`SearchError::InvalidPolicy`] for a zero `max_expansions`.
pub fn compare_heuristics(config: &ExperimentConfig) -> Result<Vec<ExperimentRow>, SearchError> {
    let policy = SearchPolicy {
        strategy: config.strategy,
        max_expansions: config.max_expansions,
        record_graph: false,
    };
    policy.validate()?;

    let mut rows = Vec::with_capacity(config.depths.len() * config.heuristics.len());
    for &depth in &config.depths {
        let instances: Vec<EightPuzzle> = (0..config.runs)
            .map(|run| {
                EightPuzzle::scrambled(
                    config.goal,
                    depth,
                    instance_seed(config.seed, depth, run),
                    PuzzleHeuristic::Zero,
                )
            })
            .collect();

        for &heuristic in &config.heuristics {
            let mut solved = 0_u32;
            let mut limit_hits = 0_u32;
            let mut expanded = 0_u64;
            let mut frontier = 0_u64;
            let mut solution_depth = 0_u64;
            for instance in &instances {
                let result = search(&instance.with_heuristic(heuristic), &policy)?;
                let stats = result.outcome.stats();
                expanded += stats.nodes_expanded;
                frontier += stats.max_frontier_size;
                match &result.outcome {
                    Outcome::Success { path, .. } => {
                        solved += 1;
                        solution_depth += u64::try_from(path.len().saturating_sub(1)).unwrap_or(u64::MAX);
                    }
                    Outcome::LimitExceeded { .. } => limit_hits += 1,
                    Outcome::Exhausted { .. } => {}
                }
            }
            rows.push(ExperimentRow {
                depth,
                heuristic,
                runs: config.runs,
                solved,
                limit_hits,
                mean_nodes_expanded: mean(expanded, config.runs),
                mean_max_frontier: mean(frontier, config.runs),
                mean_solution_depth: (solved > 0).then(|| mean(solution_depth, solved)),
            });
        }
    }
    Ok(rows)
}

#[allow(clippy::cast_precision_loss)]
fn mean(total: u64, count: u32) -> f64 {
    if count == 0 {
        0.0
    } else {
        total as f64 / f64::from(count)
    }
}

/// Fixed-width console table, one line per row.
#[must_use]
pub fn render_table(rows: &[ExperimentRow]) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "{:<7}{:<11}{:>8}{:>14}{:>14}{:>12}",
        "Depth", "Heuristic", "Solved", "Avg Expanded", "Avg Frontier", "Avg Length"
    );
    for row in rows {
        let length = row
            .mean_solution_depth
            .map_or_else(|| "-".to_string(), |d| format!("{d:.1}"));
        let _ = writeln!(
            out,
            "{:<7}{:<11}{:>8}{:>14.1}{:>14.1}{:>12}",
            row.depth,
            row.heuristic.as_str(),
            format!("{}/{}", row.solved, row.runs),
            row.mean_nodes_expanded,
            row.mean_max_frontier,
            length
        );
    }
    out
}
