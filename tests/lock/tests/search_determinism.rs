//! In-process determinism and audit-trail consistency.
//!
//! Repeated runs must agree byte-for-byte on the search graph, and the graph
//! must agree with the outcome it was recorded alongside.

use std::collections::BTreeSet;

use pathwise_harness::worlds::eight_puzzle::{Board, EightPuzzle, PuzzleHeuristic};
use pathwise_harness::worlds::peg_solitaire::{PegHeuristic, PegSolitaire};
use pathwise_harness::worlds::rabbit_leap::RabbitLeap;
use pathwise_harness::worlds::sentence_alignment::SentenceAlignment;
use pathwise_search::contract::SearchProblem;
use pathwise_search::graph::{SearchGraph, SuccessorOutcome, TerminationReason};
use pathwise_search::policy::SearchPolicy;
use pathwise_search::search::search;
use pathwise_search::strategy::SearchStrategy;

fn graph_of<P: SearchProblem>(problem: &P, policy: &SearchPolicy) -> SearchGraph {
    search(problem, policy)
        .unwrap()
        .graph
        .expect("record_graph is on by default")
}

#[test]
fn search_determinism_inproc_n10() {
    let puzzle = EightPuzzle::scrambled(Board::SPIRAL, 12, 99, PuzzleHeuristic::Misplaced);
    let policy = SearchPolicy::default();

    let first = graph_of(&puzzle, &policy).to_canonical_json_bytes().unwrap();
    for _ in 1..10 {
        let other = graph_of(&puzzle, &policy).to_canonical_json_bytes().unwrap();
        assert_eq!(first, other, "search graph bytes differ across runs");
    }
}

#[test]
fn determinism_holds_for_every_strategy() {
    let problem = RabbitLeap::new(3);
    for strategy in SearchStrategy::ALL {
        let policy = SearchPolicy::with_strategy(strategy);
        let a = search(&problem, &policy).unwrap();
        let b = search(&problem, &policy).unwrap();
        assert_eq!(a.outcome.path(), b.outcome.path(), "{strategy}");
        assert_eq!(a.outcome.stats(), b.outcome.stats(), "{strategy}");
        assert_eq!(
            a.graph.unwrap().digest().unwrap(),
            b.graph.unwrap().digest().unwrap(),
            "{strategy}"
        );
    }
}

#[test]
fn graph_records_one_event_per_expansion() {
    let puzzle = EightPuzzle::scrambled(Board::SPIRAL, 10, 4, PuzzleHeuristic::Manhattan);
    let result = search(&puzzle, &SearchPolicy::default()).unwrap();
    let graph = result.graph.unwrap();

    let stats = result.outcome.stats();
    assert_eq!(graph.expansions.len() as u64, stats.nodes_expanded);
    assert_eq!(graph.metadata.stats, *stats);

    let fingerprints: BTreeSet<&str> = graph
        .expansions
        .iter()
        .map(|e| e.state_fingerprint.as_str())
        .collect();
    assert_eq!(
        fingerprints.len(),
        graph.expansions.len(),
        "a state was expanded twice"
    );

    for (i, event) in graph.expansions.iter().enumerate() {
        assert_eq!(event.expansion_order, i as u64);
    }
}

#[test]
fn pop_keys_never_decrease_under_consistent_heuristic() {
    let puzzle = EightPuzzle::scrambled(Board::SPIRAL, 16, 8, PuzzleHeuristic::Manhattan);
    let graph = graph_of(&puzzle, &SearchPolicy::default());
    for pair in graph.expansions.windows(2) {
        assert!(
            pair[0].pop_key.priority <= pair[1].pop_key.priority,
            "f dropped from {} to {}",
            pair[0].pop_key.priority,
            pair[1].pop_key.priority
        );
    }
}

#[test]
fn goal_event_is_last_and_has_no_successors() {
    let problem = SentenceAlignment::from_texts(
        "One fish. Two fish. Red fish.",
        "One fish. Blue fish. Red fish.",
    );
    let graph = graph_of(&problem, &SearchPolicy::default());
    let TerminationReason::GoalReached { node_id } = graph.metadata.termination_reason else {
        panic!("expected goal_reached");
    };
    let last = graph.expansions.last().unwrap();
    assert_eq!(last.node_id, node_id);
    assert!(last.successors.is_empty());
}

#[test]
fn suppressed_successors_are_counted() {
    let problem = PegSolitaire::parse(
        &[
            "--...--", "--.O.--", "..OOO..", "...O...", ".......", "--...--", "--...--",
        ],
        PegHeuristic::PegCount,
    )
    .unwrap();
    let result = search(&problem, &SearchPolicy::with_strategy(SearchStrategy::BreadthFirst))
        .unwrap();
    let graph = result.graph.unwrap();
    let suppressed = graph
        .expansions
        .iter()
        .flat_map(|e| &e.successors)
        .filter(|s| matches!(s.outcome, SuccessorOutcome::ClosedSuppressed { .. }))
        .count() as u64;
    assert_eq!(suppressed, result.outcome.stats().successors_suppressed);
}
