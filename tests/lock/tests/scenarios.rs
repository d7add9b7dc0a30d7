//! End-to-end search scenarios on concrete problems.
//!
//! Each test pins an exact outcome: path, cost and expansion count where the
//! problem makes them unambiguous.

use pathwise_harness::worlds::eight_puzzle::{Board, EightPuzzle, PuzzleHeuristic};
use pathwise_harness::worlds::missionaries::Missionaries;
use pathwise_harness::worlds::weighted_graph::WeightedGraph;
use pathwise_search::policy::SearchPolicy;
use pathwise_search::search::{search, Outcome};
use pathwise_search::strategy::SearchStrategy;

fn names(graph: &WeightedGraph, path: &[usize]) -> Vec<String> {
    path.iter().map(|&n| graph.node_name(n).to_string()).collect()
}

// ---------------------------------------------------------------------------
// Line graph
// ---------------------------------------------------------------------------

#[test]
fn line_graph_reaches_goal_in_order() {
    let graph = WeightedGraph::line(&["A", "B", "C", "D"], "D");
    let result = search(&graph, &SearchPolicy::default()).unwrap();

    let Outcome::Success {
        path,
        total_cost,
        stats,
    } = &result.outcome
    else {
        panic!("expected success, got {:?}", result.outcome.kind());
    };
    assert_eq!(names(&graph, path), vec!["A", "B", "C", "D"]);
    assert_eq!(*total_cost, 3);
    assert_eq!(stats.nodes_expanded, 4);
}

#[test]
fn line_graph_missing_goal_exhausts() {
    let graph = WeightedGraph::line(&["A", "B", "C", "D"], "Z");
    let result = search(&graph, &SearchPolicy::default()).unwrap();

    assert!(
        matches!(result.outcome, Outcome::Exhausted { .. }),
        "expected exhausted, got {}",
        result.outcome.kind()
    );
    assert!(result.outcome.path().is_none());
    assert_eq!(result.outcome.stats().nodes_expanded, 4);
}

#[test]
fn every_strategy_walks_the_line() {
    let graph = WeightedGraph::line(&["A", "B", "C", "D"], "D");
    for strategy in SearchStrategy::ALL {
        let result = search(&graph, &SearchPolicy::with_strategy(strategy)).unwrap();
        assert_eq!(result.outcome.total_cost(), Some(3), "{strategy}");
    }
}

// ---------------------------------------------------------------------------
// Start state and cycles
// ---------------------------------------------------------------------------

#[test]
fn start_that_is_goal_needs_one_expansion() {
    let graph = WeightedGraph::line(&["A", "B"], "A");
    let result = search(&graph, &SearchPolicy::default()).unwrap();
    assert_eq!(result.outcome.path().map(<[usize]>::len), Some(1));
    assert_eq!(result.outcome.total_cost(), Some(0));
    assert_eq!(result.outcome.stats().nodes_expanded, 1);
}

#[test]
fn cycles_terminate() {
    let mut graph = WeightedGraph::new("cycle", "A");
    graph.add_edge("A", "B", 1).unwrap();
    graph.add_edge("B", "C", 1).unwrap();
    graph.add_edge("C", "A", 1).unwrap();
    graph.add_edge("B", "B", 0).unwrap();
    graph.add_goal("nowhere");

    let result = search(&graph, &SearchPolicy::default()).unwrap();
    assert_eq!(result.outcome.kind(), "exhausted");
    assert_eq!(result.outcome.stats().nodes_expanded, 3);
}

#[test]
fn cheaper_detour_beats_direct_edge() {
    let mut graph = WeightedGraph::new("detour", "S");
    graph.add_edge("S", "G", 10).unwrap();
    graph.add_edge("S", "A", 1).unwrap();
    graph.add_edge("A", "B", 1).unwrap();
    graph.add_edge("B", "G", 1).unwrap();
    graph.add_goal("G");

    let result = search(&graph, &SearchPolicy::default()).unwrap();
    let path = result.outcome.path().unwrap();
    assert_eq!(names(&graph, path), vec!["S", "A", "B", "G"]);
    assert_eq!(result.outcome.total_cost(), Some(3));
}

// ---------------------------------------------------------------------------
// Expansion ceiling
// ---------------------------------------------------------------------------

#[test]
fn ceiling_is_distinct_from_exhaustion() {
    let graph = WeightedGraph::line(&["A", "B", "C", "D", "E", "F"], "F");
    let policy = SearchPolicy::default().with_max_expansions(3);
    let result = search(&graph, &policy).unwrap();
    match result.outcome {
        Outcome::LimitExceeded { limit, stats } => {
            assert_eq!(limit, 3);
            assert_eq!(stats.nodes_expanded, 3);
        }
        other => panic!("expected limit_exceeded, got {}", other.kind()),
    }
}

#[test]
fn ceiling_equal_to_need_still_succeeds() {
    let graph = WeightedGraph::line(&["A", "B", "C", "D"], "D");
    let policy = SearchPolicy::default().with_max_expansions(4);
    assert!(search(&graph, &policy).unwrap().outcome.is_success());
}

// ---------------------------------------------------------------------------
// 8-puzzle
// ---------------------------------------------------------------------------

#[test]
fn manhattan_expands_no_more_than_zero_at_depth_two() {
    for seed in 0..10 {
        let zero = EightPuzzle::scrambled(Board::SPIRAL, 2, seed, PuzzleHeuristic::Zero);
        let manhattan = zero.with_heuristic(PuzzleHeuristic::Manhattan);

        let z = search(&zero, &SearchPolicy::default()).unwrap().outcome;
        let m = search(&manhattan, &SearchPolicy::default()).unwrap().outcome;

        assert_eq!(z.total_cost(), m.total_cost(), "seed {seed}");
        assert!(
            m.stats().nodes_expanded <= z.stats().nodes_expanded,
            "seed {seed}: manhattan {} > zero {}",
            m.stats().nodes_expanded,
            z.stats().nodes_expanded
        );
    }
}

#[test]
fn all_puzzle_heuristics_find_the_same_cost() {
    let base = EightPuzzle::scrambled(Board::SPIRAL, 14, 5, PuzzleHeuristic::Zero);
    let costs: Vec<Option<i64>> = PuzzleHeuristic::ALL
        .iter()
        .map(|&h| {
            search(&base.with_heuristic(h), &SearchPolicy::default())
                .unwrap()
                .outcome
                .total_cost()
        })
        .collect();
    assert!(costs.iter().all(|c| *c == costs[0]), "{costs:?}");
}

// ---------------------------------------------------------------------------
// Missionaries
// ---------------------------------------------------------------------------

#[test]
fn missionaries_optimal_under_every_cost_aware_strategy() {
    let problem = Missionaries::classic();
    for strategy in [
        SearchStrategy::AStar,
        SearchStrategy::UniformCost,
        SearchStrategy::BreadthFirst,
    ] {
        let result = search(&problem, &SearchPolicy::with_strategy(strategy)).unwrap();
        assert_eq!(result.outcome.total_cost(), Some(11), "{strategy}");
    }
}

// ---------------------------------------------------------------------------
// Heuristic caveats
// ---------------------------------------------------------------------------

/// S→A(1), S→B(4), A→B(1), B→G(1). The cheapest route S→A→B→G costs 3.
fn shortcut_graph(h_a: i64) -> WeightedGraph {
    let mut graph = WeightedGraph::new("shortcut", "S");
    graph.add_edge("S", "A", 1).unwrap();
    graph.add_edge("S", "B", 4).unwrap();
    graph.add_edge("A", "B", 1).unwrap();
    graph.add_edge("B", "G", 1).unwrap();
    graph.add_goal("G");
    graph.set_heuristic("A", h_a).unwrap();
    graph
}

#[test]
fn inconsistent_heuristic_returns_first_closed_route() {
    let graph = shortcut_graph(10);
    let result = search(&graph, &SearchPolicy::default()).unwrap();

    assert_eq!(result.outcome.total_cost(), Some(5));
    assert_eq!(names(&graph, result.outcome.path().unwrap()), vec!["S", "B", "G"]);
    assert_eq!(result.outcome.stats().nodes_expanded, 3);

    let optimal = search(&graph, &SearchPolicy::with_strategy(SearchStrategy::UniformCost)).unwrap();
    assert_eq!(optimal.outcome.total_cost(), Some(3));
}

#[test]
fn closed_state_is_not_reopened_by_cheaper_route() {
    // A pops after B is closed at g=4; the cheaper g=2 route into B is dropped.
    let graph = shortcut_graph(4);
    let result = search(&graph, &SearchPolicy::default()).unwrap();

    assert_eq!(result.outcome.total_cost(), Some(5));
    let stats = result.outcome.stats();
    assert_eq!(stats.nodes_expanded, 4);
    assert_eq!(stats.successors_suppressed, 1);
}

#[test]
fn negative_heuristic_is_tolerated() {
    let graph = shortcut_graph(-7);
    let result = search(&graph, &SearchPolicy::default()).unwrap();

    assert!(result.outcome.is_success(), "got {}", result.outcome.kind());
    assert_eq!(result.outcome.total_cost(), Some(3));
    assert_eq!(names(&graph, result.outcome.path().unwrap()), vec!["S", "A", "B", "G"]);
}
