//! Property tests on random small graphs, checked against brute force.

use std::collections::BTreeSet;

use lock_tests::reference::{exact_cost_to_goal, indexed_graph, install_heuristic, optimal_cost};
use pathwise_search::policy::SearchPolicy;
use pathwise_search::search::{search, Outcome};
use pathwise_search::strategy::SearchStrategy;
use proptest::prelude::*;

fn edges_strategy() -> impl Strategy<Value = (usize, Vec<(usize, usize, i64)>, usize)> {
    (2usize..9).prop_flat_map(|nodes| {
        (
            Just(nodes),
            prop::collection::vec((0..nodes, 0..nodes, 0i64..12), 0..24),
            0..nodes,
        )
    })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(128))]

    #[test]
    fn zero_heuristic_finds_optimal_cost((nodes, edges, goal) in edges_strategy()) {
        let graph = indexed_graph(nodes, &edges, goal);
        let result = search(&graph, &SearchPolicy::default()).unwrap();
        prop_assert_eq!(result.outcome.total_cost(), optimal_cost(&graph));
    }

    #[test]
    fn consistent_heuristic_matches_brute_force((nodes, edges, goal) in edges_strategy()) {
        let mut graph = indexed_graph(nodes, &edges, goal);
        let exact = exact_cost_to_goal(&graph);
        install_heuristic(&mut graph, &exact);

        let result = search(&graph, &SearchPolicy::default()).unwrap();
        prop_assert_eq!(result.outcome.total_cost(), optimal_cost(&graph));
    }

    #[test]
    fn halved_heuristic_is_still_optimal((nodes, edges, goal) in edges_strategy()) {
        let mut graph = indexed_graph(nodes, &edges, goal);
        let halved: Vec<i64> = exact_cost_to_goal(&graph).iter().map(|h| h / 2).collect();
        install_heuristic(&mut graph, &halved);

        let result = search(&graph, &SearchPolicy::default()).unwrap();
        prop_assert_eq!(result.outcome.total_cost(), optimal_cost(&graph));
    }

    #[test]
    fn path_is_a_real_walk((nodes, edges, goal) in edges_strategy()) {
        let graph = indexed_graph(nodes, &edges, goal);
        let result = search(&graph, &SearchPolicy::default()).unwrap();
        if let Outcome::Success { path, total_cost, .. } = &result.outcome {
            prop_assert_eq!(path[0], 0);
            prop_assert!(graph.is_goal_node(path[path.len() - 1]));
            let mut walked = 0;
            for pair in path.windows(2) {
                let step = graph
                    .edges_from(pair[0])
                    .iter()
                    .filter(|&&(to, _)| to == pair[1])
                    .map(|&(_, cost)| cost)
                    .min();
                prop_assert!(step.is_some(), "no edge {} -> {}", pair[0], pair[1]);
                walked += step.unwrap_or_default();
            }
            prop_assert_eq!(walked, *total_cost);
        }
    }

    #[test]
    fn no_state_expanded_twice((nodes, edges, goal) in edges_strategy()) {
        let graph = indexed_graph(nodes, &edges, goal);
        for strategy in SearchStrategy::ALL {
            let result = search(&graph, &SearchPolicy::with_strategy(strategy)).unwrap();
            let events = result.graph.unwrap().expansions;
            let distinct: BTreeSet<String> =
                events.iter().map(|e| e.state_fingerprint.clone()).collect();
            prop_assert_eq!(distinct.len(), events.len());
            prop_assert_eq!(events.len() as u64, result.outcome.stats().nodes_expanded);
            prop_assert!(events.len() <= graph.node_count());
        }
    }

    #[test]
    fn unreachable_goal_exhausts((nodes, edges, goal) in edges_strategy()) {
        let graph = indexed_graph(nodes, &edges, goal);
        let result = search(&graph, &SearchPolicy::default()).unwrap();
        if optimal_cost(&graph).is_none() {
            prop_assert_eq!(result.outcome.kind(), "exhausted");
            prop_assert!(result.outcome.path().is_none());
        } else {
            prop_assert!(result.outcome.is_success());
        }
    }

    #[test]
    fn ceiling_caps_expansions(
        (nodes, edges, goal) in edges_strategy(),
        limit in 1u64..6,
    ) {
        let graph = indexed_graph(nodes, &edges, goal);
        let policy = SearchPolicy::default().with_max_expansions(limit);
        let result = search(&graph, &policy).unwrap();
        prop_assert!(result.outcome.stats().nodes_expanded <= limit);
        if let Outcome::LimitExceeded { stats, .. } = &result.outcome {
            prop_assert_eq!(stats.nodes_expanded, limit);
        }
    }

    #[test]
    fn replay_is_identical((nodes, edges, goal) in edges_strategy()) {
        let graph = indexed_graph(nodes, &edges, goal);
        let a = search(&graph, &SearchPolicy::default()).unwrap();
        let b = search(&graph, &SearchPolicy::default()).unwrap();
        prop_assert_eq!(a.outcome.path(), b.outcome.path());
        prop_assert_eq!(a.outcome.stats(), b.outcome.stats());
        prop_assert_eq!(
            a.graph.unwrap().to_canonical_json_bytes().unwrap(),
            b.graph.unwrap().to_canonical_json_bytes().unwrap()
        );
    }
}
