use super::graph::TournamentGraph;
use common::{error::Error, types::Circuit};

/// Checks that `circuit` is a Hamiltonian circuit of `graph`.
///
/// The circuit must be closed, visit every node exactly once before the
/// closing repeat, and only use edges present in the graph.
///
/// # Errors
/// Returns `Error::InvalidGraph` describing the first violated condition.
pub fn validate_circuit(graph: &TournamentGraph, circuit: &Circuit) -> Result<(), Error> {
    let num_nodes = graph.num_nodes();

    if !circuit.is_closed() {
        return Err(Error::InvalidGraph("circuit does not return to its start".into()));
    }

    if circuit.len() != num_nodes {
        return Err(Error::InvalidGraph(format!(
            "circuit visits {} nodes, graph has {}",
            circuit.len(),
            num_nodes
        )));
    }

    let mut seen = vec![false; num_nodes];
    for &node in &circuit.nodes[..circuit.len()] {
        if node >= num_nodes {
            return Err(Error::NodeIndexOutOfBounds(node));
        }
        if std::mem::replace(&mut seen[node], true) {
            return Err(Error::InvalidGraph(format!(
                "node {} is visited twice",
                graph.label(node).unwrap_or("?")
            )));
        }
    }

    if let Some((u, v)) = circuit.edges().find(|&(u, v)| !graph.has_edge(u, v)) {
        return Err(Error::InvalidGraph(format!(
            "missing edge {} -> {}",
            graph.label(u).unwrap_or("?"),
            graph.label(v).unwrap_or("?")
        )));
    }

    Ok(())
}
