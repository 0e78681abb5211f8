use circuit_core::{BacktrackingSolver, CircuitSolver, TournamentGraph, validate_circuit};
use common::types::Edge;
use proptest::prelude::*;
use proptest::strategy::Strategy;

const NUM_NODES_STRATEGY: std::ops::Range<usize> = 1usize..8;

fn labels(num_nodes: usize) -> Vec<String> {
    (0..num_nodes).map(|i| format!("N{:02}", i)).collect()
}

fn graph_from(num_nodes: usize, mut edges: Vec<Edge>) -> TournamentGraph {
    TournamentGraph::from_edges(labels(num_nodes), &mut edges).unwrap()
}

fn graph_strategy() -> impl Strategy<Value = (usize, Vec<Edge>)> {
    NUM_NODES_STRATEGY.prop_flat_map(|num_nodes| {
        let edge_generator = (0usize..num_nodes, 0usize..num_nodes);
        let edges_generator = prop::collection::vec(edge_generator, 0..40);

        (proptest::strategy::Just(num_nodes), edges_generator)
    })
}

/// A random graph guaranteed to contain the circuit given by a shuffled node order.
fn planted_strategy() -> impl Strategy<Value = (usize, Vec<Edge>)> {
    (2usize..9).prop_flat_map(|num_nodes| {
        let order = Just((0..num_nodes).collect::<Vec<_>>()).prop_shuffle();
        let extra = prop::collection::vec((0usize..num_nodes, 0usize..num_nodes), 0..30);

        (order, extra).prop_map(move |(order, mut edges)| {
            for i in 0..num_nodes {
                edges.push((order[i], order[(i + 1) % num_nodes]));
            }
            (num_nodes, edges)
        })
    })
}

/// Tries every ordering of the non-start nodes.
fn brute_force_has_circuit(graph: &TournamentGraph) -> bool {
    fn extend(graph: &TournamentGraph, path: &mut Vec<usize>, used: &mut [bool]) -> bool {
        let n = graph.num_nodes();
        let last = path[path.len() - 1];
        if path.len() == n {
            return graph.has_edge(last, path[0]);
        }
        for next in 0..n {
            if !used[next] && graph.has_edge(last, next) {
                used[next] = true;
                path.push(next);
                if extend(graph, path, used) {
                    return true;
                }
                path.pop();
                used[next] = false;
            }
        }
        false
    }

    let n = graph.num_nodes();
    if n == 0 {
        return false;
    }
    let mut used = vec![false; n];
    used[0] = true;
    extend(graph, &mut vec![0], &mut used)
}

proptest! {
    /// Property: any returned circuit is closed, covers every node once and uses real edges
    #[test]
    fn found_circuits_are_valid((num_nodes, edges) in graph_strategy()) {
        let graph = graph_from(num_nodes, edges);

        if let Some(circuit) = BacktrackingSolver::new().find_circuit(&graph).unwrap() {
            prop_assert_eq!(validate_circuit(&graph, &circuit), Ok(()));
            prop_assert_eq!(circuit.start(), Some(0));
        }
    }

    /// Property: the search agrees with an independent exhaustive check on existence
    #[test]
    fn existence_matches_brute_force((num_nodes, edges) in graph_strategy()) {
        let graph = graph_from(num_nodes, edges);

        let found = BacktrackingSolver::new().find_circuit(&graph).unwrap().is_some();
        prop_assert_eq!(found, brute_force_has_circuit(&graph));
    }

    /// Property: existence does not depend on the start node
    #[test]
    fn existence_is_independent_of_start((num_nodes, edges) in graph_strategy()) {
        let graph = graph_from(num_nodes, edges);
        let solver = BacktrackingSolver::new();

        let expected = solver.find_circuit(&graph).unwrap().is_some();
        for start in 0..num_nodes {
            let circuit = solver.find_circuit_from(&graph, start).unwrap();
            prop_assert_eq!(circuit.is_some(), expected);
            if let Some(circuit) = circuit {
                prop_assert_eq!(circuit.start(), Some(start));
            }
        }
    }

    /// Property: running the same search twice gives the same outcome
    #[test]
    fn search_is_repeatable((num_nodes, edges) in graph_strategy()) {
        let graph = graph_from(num_nodes, edges);
        let solver = BacktrackingSolver::new();

        prop_assert_eq!(solver.search(&graph).unwrap(), solver.search(&graph).unwrap());
    }

    /// Property: a planted circuit is always found, whatever extra edges surround it
    #[test]
    fn planted_circuit_is_found((num_nodes, edges) in planted_strategy()) {
        let graph = graph_from(num_nodes, edges);

        let circuit = BacktrackingSolver::new().find_circuit(&graph).unwrap();
        prop_assert!(circuit.is_some());
        prop_assert_eq!(validate_circuit(&graph, &circuit.unwrap()), Ok(()));
    }

    /// Property: a node that is never beaten rules out any circuit
    #[test]
    fn unbeaten_node_rules_out_circuit((num_nodes, edges) in graph_strategy()) {
        prop_assume!(num_nodes >= 2);
        let source = num_nodes - 1;
        let edges: Vec<Edge> = edges.into_iter().filter(|&(_, v)| v != source).collect();
        let graph = graph_from(num_nodes, edges);

        prop_assert_eq!(graph.in_degree(source), 0);
        prop_assert!(BacktrackingSolver::new().find_circuit(&graph).unwrap().is_none());
    }

    /// Property: a node that never wins rules out any circuit
    #[test]
    fn winless_node_rules_out_circuit((num_nodes, edges) in graph_strategy()) {
        prop_assume!(num_nodes >= 2);
        let sink = 0;
        let edges: Vec<Edge> = edges.into_iter().filter(|&(u, _)| u != sink).collect();
        let graph = graph_from(num_nodes, edges);

        prop_assert_eq!(graph.out_degree(sink), 0);
        prop_assert!(BacktrackingSolver::new().find_circuit(&graph).unwrap().is_none());
    }
}
